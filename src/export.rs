//! Export writers: mass-upload XML, simplified JSON and detailed JSON

use crate::error::Result;
use crate::models::PriceLookup;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Default markup percentage applied to upload prices
pub const DEFAULT_MARKUP_PERCENT: f64 = 10.0;

/// Upload price: average price plus markup with two decimals, "0.00" when unavailable
pub fn upload_price(result: &PriceLookup, markup_percent: f64) -> String {
    match result.average_price() {
        Some(avg) => format!("{:.2}", avg * (1.0 + markup_percent / 100.0)),
        None => "0.00".to_string(),
    }
}

fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Build a mass-upload inventory document.
///
/// The element order inside `ITEM` is fixed; the upload tool rejects other orders.
pub fn upload_xml(results: &[PriceLookup], markup_percent: f64) -> String {
    let mut lines = vec!["<INVENTORY>".to_string()];

    for result in results {
        lines.push("    <ITEM>".to_string());
        lines.push("        <CATEGORY></CATEGORY>".to_string());
        lines.push("        <COLOR>0</COLOR>".to_string());
        lines.push(format!(
            "        <PRICE>{}</PRICE>",
            upload_price(result, markup_percent)
        ));
        lines.push(format!("        <QTY>{}</QTY>", result.quantity));
        lines.push("        <BULK>1</BULK>".to_string());
        lines.push("        <DESCRIPTION></DESCRIPTION>".to_string());
        lines.push(format!(
            "        <CONDITION>{}</CONDITION>",
            result.condition.code()
        ));
        lines.push(format!(
            "        <ITEMTYPE>{}</ITEMTYPE>",
            result.item_type.code()
        ));
        lines.push(format!(
            "        <ITEMID>{}</ITEMID>",
            escape_xml(&result.item_id)
        ));
        lines.push("    </ITEM>".to_string());
    }

    lines.push("</INVENTORY>".to_string());
    lines.join("\n")
}

/// One entry of the simplified JSON export
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SimplifiedEntry {
    pub item_id: String,
    pub item_type: String,
    pub amount: u32,
    pub average_price: Option<f64>,
    pub condition: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn simplified_entries(results: &[PriceLookup]) -> Vec<SimplifiedEntry> {
    results
        .iter()
        .map(|r| SimplifiedEntry {
            item_id: r.item_id.clone(),
            item_type: r.item_type.api_name().to_string(),
            amount: r.quantity,
            average_price: r.average_price(),
            condition: r.condition.code().to_string(),
            error: r.error().map(str::to_string),
        })
        .collect()
}

pub fn simplified_json(results: &[PriceLookup]) -> Result<String> {
    Ok(serde_json::to_string_pretty(&simplified_entries(results))?)
}

pub fn detailed_json(results: &[PriceLookup]) -> Result<String> {
    Ok(serde_json::to_string_pretty(results)?)
}

/// Output file locations derived from an export name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportPaths {
    pub upload_xml: PathBuf,
    pub simplified_json: PathBuf,
    pub detailed_json: PathBuf,
}

impl ExportPaths {
    /// "prices" and "prices.xml" both give prices.xml, prices.json, prices_detailed.json
    pub fn from_name(name: &str) -> Self {
        let base = Path::new(name).with_extension("");
        let base = base.to_string_lossy();
        Self {
            upload_xml: PathBuf::from(format!("{base}.xml")),
            simplified_json: PathBuf::from(format!("{base}.json")),
            detailed_json: PathBuf::from(format!("{base}_detailed.json")),
        }
    }
}

/// Outcome of writing one export file
#[derive(Debug)]
pub struct ExportFile {
    pub label: &'static str,
    pub path: PathBuf,
    pub result: Result<()>,
}

/// Outcome of all export steps
#[derive(Debug)]
pub struct ExportReport {
    pub files: Vec<ExportFile>,
}

impl ExportReport {
    pub fn all_written(&self) -> bool {
        self.files.iter().all(|f| f.result.is_ok())
    }

    /// Console lines for each file; the markup note follows the upload XML line
    pub fn status_lines(&self, markup_percent: f64) -> Vec<String> {
        let mut lines = Vec::new();
        for (i, file) in self.files.iter().enumerate() {
            match &file.result {
                Ok(()) => {
                    lines.push(format!("{} exported to: {}", file.label, file.path.display()));
                    if i == 0 {
                        lines.push(format!("  (Prices increased by {markup_percent}%)"));
                    }
                }
                Err(e) => lines.push(format!("Error exporting {}: {}", file.path.display(), e)),
            }
        }
        lines
    }
}

fn write_file(path: &Path, content: Result<String>) -> Result<()> {
    std::fs::write(path, content?)?;
    Ok(())
}

/// Write all three export files. A failing step does not stop the others.
pub fn write_exports(name: &str, results: &[PriceLookup], markup_percent: f64) -> ExportReport {
    let paths = ExportPaths::from_name(name);

    let steps: [(&'static str, PathBuf, Result<String>); 3] = [
        (
            "BrickLink Mass Upload XML",
            paths.upload_xml,
            Ok(upload_xml(results, markup_percent)),
        ),
        (
            "Simplified JSON",
            paths.simplified_json,
            simplified_json(results),
        ),
        ("Detailed results", paths.detailed_json, detailed_json(results)),
    ];

    let files = steps
        .into_iter()
        .map(|(label, path, content)| {
            let result = write_file(&path, content);
            match &result {
                Ok(()) => log::debug!("{} exported to: {}", label, path.display()),
                Err(e) => log::warn!("Error exporting {} to {}: {}", label, path.display(), e),
            }
            ExportFile {
                label,
                path,
                result,
            }
        })
        .collect();

    ExportReport { files }
}

#[cfg(test)]
#[path = "export_tests.rs"]
mod tests;
