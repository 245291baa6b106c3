// SQLite persistence - the queryable side of the pipeline output

use rusqlite::{params_from_iter, types::Value, Connection};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::transform::{column_name, currency_code, Conversion, EnrichedBankRecord};

/// Replace the named table's entire contents with `records`.
///
/// Drop-and-recreate semantics: no incremental update, no primary-key
/// continuity across runs. Columns are `Name`, `MC_USD_Billion`, then one
/// REAL column per configured currency, in configured order. All inserts
/// happen inside one transaction; this is the sole write of the run.
pub fn replace_banks(
    conn: &mut Connection,
    table_name: &str,
    target_currencies: &[String],
    records: &[EnrichedBankRecord],
) -> Result<()> {
    let tx = conn.transaction()?;

    tx.execute(&format!("DROP TABLE IF EXISTS \"{}\"", table_name), [])?;

    let mut columns = vec![
        "\"Name\" TEXT NOT NULL".to_string(),
        "\"MC_USD_Billion\" REAL NOT NULL".to_string(),
    ];
    columns.extend(
        target_currencies
            .iter()
            .map(|code| format!("\"{}\" REAL NOT NULL", column_name(code))),
    );
    tx.execute(
        &format!("CREATE TABLE \"{}\" ({})", table_name, columns.join(", ")),
        [],
    )?;

    let placeholders: Vec<String> = (1..=target_currencies.len() + 2)
        .map(|i| format!("?{}", i))
        .collect();
    let insert_sql = format!(
        "INSERT INTO \"{}\" VALUES ({})",
        table_name,
        placeholders.join(", ")
    );

    {
        let mut stmt = tx.prepare(&insert_sql)?;
        for record in records {
            let mut values: Vec<Value> = vec![
                Value::from(record.name.clone()),
                Value::from(record.market_cap_usd),
            ];
            values.extend(record.conversions.iter().map(|c| Value::from(c.market_cap)));
            stmt.execute(params_from_iter(values))?;
        }
    }

    tx.commit()?;
    Ok(())
}

/// Open the store at the configured path, replace the table, close.
pub fn load_to_db(config: &PipelineConfig, records: &[EnrichedBankRecord]) -> Result<()> {
    let mut conn = Connection::open(&config.db_path)?;
    replace_banks(&mut conn, &config.table_name, &config.target_currencies, records)
}

/// Unconditional read-all, rows in insertion (rowid) order.
pub fn fetch_all(conn: &Connection, table_name: &str) -> Result<Vec<EnrichedBankRecord>> {
    let mut stmt = conn.prepare(&format!("SELECT * FROM \"{}\"", table_name))?;

    let codes: Vec<String> = stmt
        .column_names()
        .iter()
        .skip(2)
        .map(|column| currency_code(column))
        .collect();

    let records = stmt
        .query_map([], |row| {
            let name: String = row.get(0)?;
            let market_cap_usd: f64 = row.get(1)?;

            let mut conversions = Vec::with_capacity(codes.len());
            for (i, code) in codes.iter().enumerate() {
                let market_cap: f64 = row.get(2 + i)?;
                conversions.push(Conversion {
                    code: code.clone(),
                    market_cap,
                });
            }

            Ok(EnrichedBankRecord {
                name,
                market_cap_usd,
                conversions,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(records)
}

pub fn verify_count(conn: &Connection, table_name: &str) -> Result<i64> {
    let count: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM \"{}\"", table_name),
        [],
        |row| row.get(0),
    )?;

    Ok(count)
}

/// Average market cap per cap column, as `(column, average)` pairs.
pub fn market_cap_averages(conn: &Connection, table_name: &str) -> Result<Vec<(String, f64)>> {
    let columns: Vec<String> = {
        let stmt = conn.prepare(&format!("SELECT * FROM \"{}\" LIMIT 0", table_name))?;
        stmt.column_names()
            .iter()
            .skip(1)
            .map(|column| column.to_string())
            .collect()
    };

    let mut averages = Vec::with_capacity(columns.len());
    for column in columns {
        let average: f64 = conn.query_row(
            &format!(
                "SELECT COALESCE(AVG(\"{}\"), 0.0) FROM \"{}\"",
                column, table_name
            ),
            [],
            |row| row.get(0),
        )?;
        averages.push((column, average));
    }

    Ok(averages)
}

/// Diagnostic read-back of the persisted table.
///
/// Opens its own connection after the writer has closed, so a failure here
/// never affects the committed state. Prints every row plus count and
/// per-currency averages, and returns the rows.
pub fn run_queries(config: &PipelineConfig) -> Result<Vec<EnrichedBankRecord>> {
    let conn = Connection::open(&config.db_path)?;

    let records = fetch_all(&conn, &config.table_name)?;
    let count = verify_count(&conn, &config.table_name)?;

    println!("✓ {} rows in '{}'", count, config.table_name);
    for record in &records {
        let converted: Vec<String> = record
            .conversions
            .iter()
            .map(|c| format!("{} {:.2}", c.code, c.market_cap))
            .collect();
        println!(
            "  {} | USD {:.2} | {}",
            record.name,
            record.market_cap_usd,
            converted.join(" | ")
        );
    }

    for (column, average) in market_cap_averages(&conn, &config.table_name)? {
        println!("✓ AVG({}) = {:.2}", column, average);
    }

    Ok(records)
}
