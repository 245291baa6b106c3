use anyhow::Result;
use std::env;

use largest_banks::{db, pipeline, PipelineConfig};

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();
    let config = PipelineConfig::default();

    if args.len() > 1 && args[1] == "query" {
        // Query-only mode: read back whatever the last run persisted
        run_query_mode(&config)?;
    } else {
        // Full pipeline (default)
        run_pipeline(&config)?;
    }

    Ok(())
}

fn run_pipeline(config: &PipelineConfig) -> Result<()> {
    println!("🏦 Largest Banks ETL - extract → transform → load");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");

    println!("\n🌐 Source: {}", config.source_url);
    println!("💱 Rates:  {}", config.rate_csv.display());

    let records = pipeline::run(config)?;

    println!("\n━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("✓ {} banks extracted and converted", records.len());
    println!("✓ CSV written to {}", config.output_csv.display());
    println!(
        "✓ Table '{}' replaced in {}",
        config.table_name,
        config.db_path.display()
    );
    println!("✓ Progress log: {}", config.log_path.display());
    println!("\n🎉 Pipeline complete!");

    Ok(())
}

fn run_query_mode(config: &PipelineConfig) -> Result<()> {
    if !config.db_path.exists() {
        eprintln!("❌ Database not found!");
        eprintln!("   Run: largest-banks");
        eprintln!("   to build it first.");
        std::process::exit(1);
    }

    println!("📊 Querying '{}' in {}...\n", config.table_name, config.db_path.display());
    db::run_queries(config)?;

    Ok(())
}
