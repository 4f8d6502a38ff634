// src/models.rs
use crate::analyzer::{self, CapacityStats};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Headline capacity figures shown on the dashboard, in megawatts.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SummaryFigures {
    pub accepted_capacity: f64,
    pub connected_capacity: f64,
    pub max_export_capacity: f64,
    pub max_import_capacity: f64,
    pub grand_total: f64,
}

/// The aggregate served by the API and persisted to the snapshot file.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CapacitySnapshot {
    pub totals: BTreeMap<String, CapacityStats>,
    pub records_count: usize,
    pub last_updated: String,
    pub summary: SummaryFigures,
}

/// Snapshot figures formatted for page display: thousands separators,
/// two decimal places.
#[derive(Debug, Serialize, Clone)]
pub struct FormattedSummary {
    pub accepted_capacity: String,
    pub connected_capacity: String,
    pub max_export_capacity: String,
    pub max_import_capacity: String,
    pub grand_total: String,
    pub records_count: String,
    pub last_updated: String,
}

impl SummaryFigures {
    fn from_totals(totals: &BTreeMap<String, CapacityStats>) -> Self {
        let total_of = |key: &str| totals.get(key).map(|stats| stats.total_mw).unwrap_or(0.0);
        let grand_total = totals.values().map(|stats| stats.total_mw).sum();

        SummaryFigures {
            accepted_capacity: total_of("accepted_registered_capacity"),
            connected_capacity: total_of("connected_registered_capacity"),
            max_export_capacity: total_of("maximum_export_capacity"),
            max_import_capacity: total_of("maximum_import_capacity"),
            grand_total,
        }
    }
}

impl CapacitySnapshot {
    /// Assembles a snapshot from computed totals, stamped with the current
    /// local time.
    pub fn build(totals: BTreeMap<String, CapacityStats>, records_count: usize) -> Self {
        let summary = SummaryFigures::from_totals(&totals);
        CapacitySnapshot {
            totals,
            records_count,
            last_updated: Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            summary,
        }
    }

    /// The all-zero payload served when neither the upstream API nor the
    /// snapshot file is available.
    pub fn empty() -> Self {
        Self::build(analyzer::calculate_capacity_totals(&[]), 0)
    }
}

impl FormattedSummary {
    pub fn from_snapshot(snapshot: &CapacitySnapshot) -> Self {
        FormattedSummary {
            accepted_capacity: format_mw(snapshot.summary.accepted_capacity),
            connected_capacity: format_mw(snapshot.summary.connected_capacity),
            max_export_capacity: format_mw(snapshot.summary.max_export_capacity),
            max_import_capacity: format_mw(snapshot.summary.max_import_capacity),
            grand_total: format_mw(snapshot.summary.grand_total),
            records_count: format_count(snapshot.records_count),
            last_updated: snapshot.last_updated.clone(),
        }
    }
}

/// Formats a megawatt figure as `1,234.57`.
pub fn format_mw(value: f64) -> String {
    let raw = format!("{:.2}", value);
    match raw.split_once('.') {
        Some((int_part, frac_part)) => format!("{}.{}", group_thousands(int_part), frac_part),
        None => group_thousands(&raw),
    }
}

/// Formats a record count as `12,345`.
pub fn format_count(value: usize) -> String {
    group_thousands(&value.to_string())
}

fn group_thousands(digits: &str) -> String {
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}{}", sign, grouped)
}
