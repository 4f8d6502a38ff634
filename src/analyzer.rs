// src/analyzer.rs

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

use crate::ckan::Record;

/// Location fields scanned when deciding whether a record is Scottish.
pub const LOCATION_FIELDS: [&str; 4] = ["Country", "County", "town__city", "Postcode"];

/// Substrings that mark a location value as Scottish (matched case-insensitively).
pub const SCOTTISH_INDICATORS: [&str; 6] = [
    "Scotland",
    "Glasgow",
    "Edinburgh",
    "Aberdeen",
    "Dundee",
    "Inverness",
];

/// Postcode areas covering Scotland.
pub const SCOTTISH_POSTCODE_AREAS: [&str; 7] = ["G", "EH", "AB", "DD", "IV", "KY", "FK"];

/// Capacity figure name and the datastore column holding it.
pub const CAPACITY_FIELDS: [(&str, &str); 4] = [
    (
        "accepted_registered_capacity",
        "accepted_to_connect_registered_capacity__mw_",
    ),
    (
        "connected_registered_capacity",
        "already_connected_registered_capacity__mw_",
    ),
    ("maximum_export_capacity", "maximum_export_capacity__mw_"),
    ("maximum_import_capacity", "maximum_import_capacity__mw_"),
];

/// Aggregate statistics for one capacity column, in megawatts.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CapacityStats {
    pub total_mw: f64,
    pub count_records: usize,
    pub average_mw: f64,
    pub min_mw: f64,
    pub max_mw: f64,
}

impl CapacityStats {
    fn from_values(values: &[f64]) -> Self {
        if values.is_empty() {
            return CapacityStats {
                total_mw: 0.0,
                count_records: 0,
                average_mw: 0.0,
                min_mw: 0.0,
                max_mw: 0.0,
            };
        }

        let total: f64 = values.iter().sum();
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

        CapacityStats {
            total_mw: total,
            count_records: values.len(),
            average_mw: total / values.len() as f64,
            min_mw: min,
            max_mw: max,
        }
    }
}

/// Keeps the records whose location fields point at Scotland.
pub fn filter_scotland_records(records: &[Record]) -> Vec<Record> {
    let postcode_re = Regex::new(r"^([A-Z]+)").unwrap();
    records
        .iter()
        .filter(|record| is_scottish(record, &postcode_re))
        .cloned()
        .collect()
}

fn is_scottish(record: &Record, postcode_re: &Regex) -> bool {
    for field in LOCATION_FIELDS {
        if let Some(value) = record.get(field) {
            let text = value_as_text(value).to_lowercase();
            if SCOTTISH_INDICATORS
                .iter()
                .any(|indicator| text.contains(&indicator.to_lowercase()))
            {
                return true;
            }
        }
    }

    if let Some(postcode) = record.get("Postcode") {
        let text = value_as_text(postcode);
        if let Some(caps) = postcode_re.captures(&text) {
            if SCOTTISH_POSTCODE_AREAS.contains(&&caps[1]) {
                return true;
            }
        }
    }

    false
}

/// Computes per-column aggregate statistics over the given records.
/// A column missing from every record yields an all-zero entry.
pub fn calculate_capacity_totals(records: &[Record]) -> BTreeMap<String, CapacityStats> {
    let mut totals = BTreeMap::new();

    for (name, column) in CAPACITY_FIELDS {
        let values: Vec<f64> = records
            .iter()
            .filter_map(|record| field_as_f64(record, column))
            .collect();
        totals.insert(name.to_string(), CapacityStats::from_values(&values));
    }

    totals
}

/// Coerces a record field to a number: JSON numbers and numeric strings pass,
/// anything else is skipped.
pub fn field_as_f64(record: &Record, field: &str) -> Option<f64> {
    match record.get(field)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn value_as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(fields: Value) -> Record {
        fields.as_object().unwrap().clone()
    }

    #[test]
    fn test_filter_keeps_scottish_locations() {
        let records = vec![
            record(json!({"Country": "Scotland", "Postcode": "G12 8QQ"})),
            record(json!({"County": "Lanarkshire", "town__city": "Glasgow"})),
            record(json!({"Country": "Wales", "town__city": "Cardiff", "Postcode": "CF10 1EP"})),
        ];

        let scotland = filter_scotland_records(&records);
        assert_eq!(scotland.len(), 2);
    }

    #[test]
    fn test_filter_matches_postcode_area() {
        let records = vec![
            record(json!({"Postcode": "EH1 2NG"})),
            record(json!({"Postcode": "SW1A 1AA"})),
            // "GL" is Gloucester, not Glasgow: the whole prefix must match.
            record(json!({"Postcode": "GL1 1EP"})),
        ];

        let scotland = filter_scotland_records(&records);
        assert_eq!(scotland.len(), 1);
        assert_eq!(scotland[0].get("Postcode"), Some(&json!("EH1 2NG")));
    }

    #[test]
    fn test_filter_is_case_insensitive() {
        let records = vec![record(json!({"Country": "SCOTLAND"}))];
        assert_eq!(filter_scotland_records(&records).len(), 1);
    }

    #[test]
    fn test_totals_coerce_numbers_and_strings() {
        let records = vec![
            record(json!({"maximum_export_capacity__mw_": 10.5})),
            record(json!({"maximum_export_capacity__mw_": "4.5"})),
            record(json!({"maximum_export_capacity__mw_": "n/a"})),
            record(json!({"maximum_export_capacity__mw_": null})),
        ];

        let totals = calculate_capacity_totals(&records);
        let export = &totals["maximum_export_capacity"];

        assert_eq!(export.total_mw, 15.0);
        assert_eq!(export.count_records, 2);
        assert_eq!(export.average_mw, 7.5);
        assert_eq!(export.min_mw, 4.5);
        assert_eq!(export.max_mw, 10.5);
    }

    #[test]
    fn test_totals_on_empty_input_are_all_zero() {
        let totals = calculate_capacity_totals(&[]);

        assert_eq!(totals.len(), CAPACITY_FIELDS.len());
        for stats in totals.values() {
            assert_eq!(stats.total_mw, 0.0);
            assert_eq!(stats.count_records, 0);
            assert_eq!(stats.average_mw, 0.0);
        }
    }

    #[test]
    fn test_totals_cover_every_capacity_column() {
        let records = vec![record(json!({
            "accepted_to_connect_registered_capacity__mw_": 100,
            "already_connected_registered_capacity__mw_": 50,
            "maximum_export_capacity__mw_": 25,
            "maximum_import_capacity__mw_": 5,
        }))];

        let totals = calculate_capacity_totals(&records);

        assert_eq!(totals["accepted_registered_capacity"].total_mw, 100.0);
        assert_eq!(totals["connected_registered_capacity"].total_mw, 50.0);
        assert_eq!(totals["maximum_export_capacity"].total_mw, 25.0);
        assert_eq!(totals["maximum_import_capacity"].total_mw, 5.0);
    }
}
