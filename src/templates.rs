// src/templates.rs

use regex::Regex;
use rust_embed::RustEmbed;
use serde_json::Value;

use crate::errors::{DashboardError, Result};

/// Server-rendered page templates, embedded at build time.
#[derive(RustEmbed)]
#[folder = "templates/"]
struct Templates;

/// Renders an embedded template, substituting `{{ key }}` placeholders from
/// a JSON object.
pub fn render(name: &str, data: &Value) -> Result<String> {
    let file = Templates::get(name)
        .ok_or_else(|| DashboardError::TemplateNotFound(name.to_string()))?;
    let template = String::from_utf8_lossy(file.data.as_ref());
    Ok(render_str(&template, data))
}

/// Placeholder substitution over an in-memory template string.
/// Placeholders are in the format `{{key}}`; unknown keys are kept verbatim.
pub fn render_str(template: &str, data: &Value) -> String {
    let re = Regex::new(r"\{\{\s*(\w+)\s*\}\}").unwrap();
    re.replace_all(template, |caps: &regex::Captures| {
        let key = &caps[1];
        data.get(key)
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .unwrap_or_else(|| caps[0].to_string())
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_str_substitutes_placeholders() {
        let html = render_str(
            "<p>{{ grand_total }} MW across {{records_count}} records</p>",
            &json!({"grand_total": "1,234.50", "records_count": "321"}),
        );
        assert_eq!(html, "<p>1,234.50 MW across 321 records</p>");
    }

    #[test]
    fn test_render_str_keeps_unknown_keys() {
        let html = render_str("{{ missing }}", &json!({}));
        assert_eq!(html, "{{ missing }}");
    }

    #[test]
    fn test_render_missing_template_is_an_error() {
        let result = render("no-such-page.html", &json!({}));
        assert!(matches!(result, Err(DashboardError::TemplateNotFound(_))));
    }

    #[test]
    fn test_render_dashboard_template() {
        let data = json!({
            "accepted_capacity": "1,000.00",
            "connected_capacity": "500.00",
            "max_export_capacity": "250.00",
            "max_import_capacity": "125.00",
            "grand_total": "1,875.00",
            "records_count": "42",
            "last_updated": "2026-01-05 09:30:00",
            "refreshed_banner": "",
        });

        let html = render("index.html", &data).unwrap();
        assert!(html.contains("1,875.00"));
        assert!(html.contains("42"));
        assert!(html.contains("2026-01-05 09:30:00"));
    }
}
