// Extraction - fetch the source document and read the ranked bank table

use scraper::{ElementRef, Html, Selector};
use std::time::Duration;

use crate::config::PipelineConfig;
use crate::error::{EtlError, Result};

/// One extracted row: bank name and market cap in USD billions.
///
/// Row order carries the capitalization ranking; records are immutable once
/// extracted.
#[derive(Debug, Clone, PartialEq)]
pub struct BankRecord {
    pub name: String,
    pub market_cap_usd: f64,
}

// ============================================================================
// TABLE SELECTION
// ============================================================================

/// Strategy for locating the authoritative table in the document.
///
/// Selection is a policy, not part of extraction: swapping it (by heading
/// text, by column shape) must not touch the row-reading logic below.
pub trait TableSelector {
    fn select<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>>;
}

/// The original policy: the first table carrying a marker class is
/// authoritative. Positional, and fragile against source restructuring.
pub struct FirstByClass {
    selector: Selector,
}

impl FirstByClass {
    pub fn new(class: &str) -> Self {
        let selector =
            Selector::parse(&format!("table.{}", class)).expect("valid CSS class name");
        Self { selector }
    }

    /// Wikipedia's ranking tables carry the `wikitable` class.
    pub fn wikitable() -> Self {
        Self::new("wikitable")
    }
}

impl TableSelector for FirstByClass {
    fn select<'a>(&self, document: &'a Html) -> Option<ElementRef<'a>> {
        document.select(&self.selector).next()
    }
}

// ============================================================================
// FETCH + PARSE
// ============================================================================

/// Fetch the source document over HTTP.
///
/// A non-success status is an extraction failure. The 30s timeout is
/// transport configuration; the pipeline itself imposes no deadline.
pub fn fetch_document(url: &str) -> Result<String> {
    let client = reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent("Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36")
        .build()?;

    let response = client.get(url).send()?;
    if !response.status().is_success() {
        return Err(EtlError::Extraction(format!(
            "GET {} returned {}",
            url,
            response.status()
        )));
    }

    Ok(response.text()?)
}

/// Read the top `row_limit` data rows of the selected table.
///
/// Skips the header row, then takes the second and third `<td>` of each data
/// row as (name, market-cap text). Whitespace is trimmed and thousands
/// separators stripped before the cap parses as f64. Names are not checked
/// for emptiness and caps are not checked for ranking order.
pub fn parse_bank_table(
    html: &str,
    selector: &dyn TableSelector,
    row_limit: usize,
) -> Result<Vec<BankRecord>> {
    let document = Html::parse_document(html);

    let table = selector.select(&document).ok_or_else(|| {
        EtlError::Extraction("no table matching the expected class".to_string())
    })?;

    let row_selector = Selector::parse("tr").unwrap();
    let cell_selector = Selector::parse("td").unwrap();

    let rows: Vec<ElementRef> = table.select(&row_selector).collect();
    if rows.len() < row_limit + 1 {
        return Err(EtlError::Extraction(format!(
            "table has {} rows, expected at least {} including header",
            rows.len(),
            row_limit + 1
        )));
    }

    let mut records = Vec::with_capacity(row_limit);
    for row in &rows[1..=row_limit] {
        let cells: Vec<ElementRef> = row.select(&cell_selector).collect();
        if cells.len() < 3 {
            return Err(EtlError::Extraction(format!(
                "data row has {} cells, expected at least 3",
                cells.len()
            )));
        }

        let name = cell_text(&cells[1]);
        let cap_text = cell_text(&cells[2]).replace(',', "");
        let market_cap_usd = cap_text.parse::<f64>().map_err(|_| {
            EtlError::Extraction(format!(
                "cannot parse market cap {:?} for bank {:?}",
                cap_text, name
            ))
        })?;

        records.push(BankRecord {
            name,
            market_cap_usd,
        });
    }

    Ok(records)
}

fn cell_text(cell: &ElementRef) -> String {
    cell.text().collect::<String>().trim().to_string()
}

/// Fetch and parse in one step.
pub fn extract(config: &PipelineConfig, selector: &dyn TableSelector) -> Result<Vec<BankRecord>> {
    let html = fetch_document(&config.source_url)?;
    parse_bank_table(&html, selector, config.row_limit)
}

// ============================================================================
// FIXTURES
// ============================================================================

/// Fixture table mirroring the source layout: rank, name, cap columns
/// under a header row, inside a `wikitable`-classed table.
#[cfg(test)]
pub fn table_fragment(rows: &[(&str, &str)]) -> String {
    let mut html = String::from(
        "<table class=\"wikitable sortable\">\
         <tr><th>Rank</th><th>Bank name</th><th>Market cap (US$ billion)</th></tr>",
    );
    for (i, (name, cap)) in rows.iter().enumerate() {
        html.push_str(&format!(
            "<tr><td>{}</td><td> {} </td><td>{}\n</td></tr>",
            i + 1,
            name,
            cap
        ));
    }
    html.push_str("</table>");
    html
}

/// A whole fixture document holding one qualifying table.
#[cfg(test)]
pub fn sample_table_html(rows: &[(&str, &str)]) -> String {
    format!("<html><body>{}</body></html>", table_fragment(rows))
}
