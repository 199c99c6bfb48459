//! Rendering of search results for stdout.

use chargenear_core::{ChargerRecord, ClassifiedCharger, DisplayClass};
use serde::Serialize;

const TITLE_WIDTH: usize = 34;
const MISSING: &str = "\u{2014}";

/// One element of `search --json` output.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct JsonResult<'a> {
    charger: &'a ChargerRecord,
    display_class: DisplayClass,
    marker_color: &'static str,
}

/// # Errors
///
/// Returns an error if serialization fails.
pub(crate) fn render_json(results: &[ClassifiedCharger]) -> anyhow::Result<String> {
    let rows: Vec<JsonResult<'_>> = results
        .iter()
        .map(|r| JsonResult {
            charger: &r.charger,
            display_class: r.display_class,
            marker_color: r.display_class.marker_color(),
        })
        .collect();
    Ok(serde_json::to_string_pretty(&rows)?)
}

/// Header line followed by one line per charger.
pub(crate) fn render_table(results: &[ClassifiedCharger]) -> Vec<String> {
    let mut lines = Vec::with_capacity(results.len() + 1);
    lines.push(format!(
        "{:<24}{:<36}{:<16}{:<30}{:>8}{:>9}  DIRECTIONS",
        "CLASS", "TITLE", "TOWN", "OPERATOR", "MAX KW", "MILES"
    ));
    for r in results {
        let c = &r.charger;
        let max_kw = c.max_power_kw().map(|kw| format!("{kw:.0}"));
        let miles = c.address.distance.map(|d| format!("{d:.1}"));
        lines.push(format!(
            "{:<24}{:<36}{:<16}{:<30}{:>8}{:>9}  {}",
            r.display_class.to_string(),
            truncate(&c.address.title, TITLE_WIDTH),
            c.address.town.as_deref().unwrap_or(MISSING),
            c.operator_title().unwrap_or(MISSING),
            max_kw.as_deref().unwrap_or(MISSING),
            miles.as_deref().unwrap_or(MISSING),
            c.directions_url()
        ));
    }
    lines
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let head: String = text.chars().take(max_chars - 3).collect();
    format!("{head}...")
}
