// src/api/handlers/pages.rs
use actix_web::{web, HttpResponse, Result};
use serde_json::json;

use crate::api::AppState;
use crate::errors::DashboardError;
use crate::models::{format_count, format_mw, CapacitySnapshot, FormattedSummary};
use crate::templates;

const HTML: &str = "text/html; charset=utf-8";

/// Main dashboard page.
pub async fn index(state: web::Data<AppState>) -> Result<HttpResponse> {
    dashboard_page(&state, false).await
}

/// Forces a refresh, then shows the dashboard with a refreshed notice.
pub async fn refresh_page(state: web::Data<AppState>) -> Result<HttpResponse> {
    dashboard_page(&state, true).await
}

/// Detailed per-column statistics page.
pub async fn details(state: web::Data<AppState>) -> Result<HttpResponse> {
    let snapshot = match state.store.get(false).await {
        Ok(snapshot) => snapshot,
        Err(e) => return server_error_page(e),
    };

    let data = json!({
        "rows": stats_rows(&snapshot),
        "records_count": format_count(snapshot.records_count),
        "last_updated": snapshot.last_updated,
    });

    match templates::render("details.html", &data) {
        Ok(html) => Ok(HttpResponse::Ok().content_type(HTML).body(html)),
        Err(e) => server_error_page(e),
    }
}

async fn dashboard_page(state: &AppState, force_refresh: bool) -> Result<HttpResponse> {
    let snapshot = match state.store.get(force_refresh).await {
        Ok(snapshot) => snapshot,
        Err(e) => return server_error_page(e),
    };

    let formatted = FormattedSummary::from_snapshot(&snapshot);
    let mut data = match serde_json::to_value(&formatted) {
        Ok(data) => data,
        Err(e) => return server_error_page(e.into()),
    };

    let banner = if force_refresh {
        r#"<div class="notice">Data refreshed successfully</div>"#
    } else {
        ""
    };
    data["refreshed_banner"] = json!(banner);

    match templates::render("index.html", &data) {
        Ok(html) => Ok(HttpResponse::Ok().content_type(HTML).body(html)),
        Err(e) => server_error_page(e),
    }
}

fn server_error_page(e: DashboardError) -> Result<HttpResponse> {
    log::error!("Page render failed: {}", e);
    let body = templates::render("500.html", &json!({}))
        .unwrap_or_else(|_| "500 Internal Server Error".to_string());
    Ok(HttpResponse::InternalServerError().content_type(HTML).body(body))
}

/// Builds the per-capacity table rows for the details page.
fn stats_rows(snapshot: &CapacitySnapshot) -> String {
    let mut rows = String::new();
    for (name, stats) in &snapshot.totals {
        rows.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
            title_case(name),
            format_mw(stats.total_mw),
            stats.count_records,
            format_mw(stats.average_mw),
            format_mw(stats.min_mw),
            format_mw(stats.max_mw),
        ));
    }
    rows
}

fn title_case(key: &str) -> String {
    key.split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer;

    #[test]
    fn test_title_case() {
        assert_eq!(
            title_case("accepted_registered_capacity"),
            "Accepted Registered Capacity"
        );
        assert_eq!(title_case("maximum_export_capacity"), "Maximum Export Capacity");
    }

    #[test]
    fn test_stats_rows_formats_every_column() {
        let mut row = serde_json::Map::new();
        row.insert(
            "maximum_export_capacity__mw_".to_string(),
            serde_json::json!(1500.0),
        );
        let totals = analyzer::calculate_capacity_totals(&[row]);
        let snapshot = CapacitySnapshot::build(totals, 1);

        let rows = stats_rows(&snapshot);

        assert!(rows.contains("<td>Maximum Export Capacity</td>"));
        assert!(rows.contains("<td>1,500.00</td>"));
        assert_eq!(rows.matches("<tr>").count(), 4);
    }
}
