// src/refresh.rs

use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::errors::Result;

/// Status value a refresh reply must carry to count as a success.
pub const STATUS_SUCCESS: &str = "success";

/// The one message shown to the user when a refresh fails, whatever the cause.
pub const REFRESH_ERROR_MESSAGE: &str = "Error refreshing data";

/// How long the deferred auto-refresh waits before firing. Single-shot: a
/// new one is armed only when a successful refresh reloads the page.
pub const AUTO_REFRESH_DELAY: Duration = Duration::from_millis(300_000);

/// Body of a `POST /api/refresh` reply. Parsed once for the branch decision,
/// then dropped; the embedded data payload is not consumed here.
#[derive(Debug, Deserialize)]
pub struct RefreshReply {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
}

/// The host page the trigger acts on. A browser reloads the document and
/// raises an alert; the terminal client repaints and writes to stderr.
pub trait Page {
    fn reload(&self);
    fn alert(&self, message: &str);
}

/// Issues the refresh POST against `{base_url}/api/refresh`.
///
/// The reply body decides the branch whatever the HTTP status; a non-JSON
/// body lands in the error arm along with transport failures.
pub async fn post_refresh(client: &Client, base_url: &str) -> Result<RefreshReply> {
    let url = format!("{}/api/refresh", base_url.trim_end_matches('/'));

    let resp = client
        .post(&url)
        .header("Content-Type", "application/json")
        .send()
        .await?;

    Ok(resp.json::<RefreshReply>().await?)
}

/// Applies a refresh outcome to the page: reload on the success status, the
/// fixed alert on anything else. Returns true when the page was reloaded.
pub fn handle_reply(reply: Result<RefreshReply>, page: &impl Page) -> bool {
    match reply {
        Ok(reply) if reply.status == STATUS_SUCCESS => {
            page.reload();
            true
        }
        Ok(_) => {
            page.alert(REFRESH_ERROR_MESSAGE);
            false
        }
        Err(e) => {
            log::error!("Error refreshing data: {}", e);
            page.alert(REFRESH_ERROR_MESSAGE);
            false
        }
    }
}

/// Fires one refresh against the dashboard and applies the outcome.
pub async fn trigger_refresh(client: &Client, base_url: &str, page: &impl Page) -> bool {
    handle_reply(post_refresh(client, base_url).await, page)
}

/// Waits the fixed delay, then fires the trigger exactly once.
pub async fn delayed_refresh(client: &Client, base_url: &str, page: &impl Page) -> bool {
    tokio::time::sleep(AUTO_REFRESH_DELAY).await;
    log::info!("Auto-refreshing data...");
    trigger_refresh(client, base_url, page).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::DashboardError;
    use std::cell::{Cell, RefCell};

    #[derive(Default)]
    struct RecordingPage {
        reloads: Cell<u32>,
        alerts: RefCell<Vec<String>>,
    }

    impl Page for RecordingPage {
        fn reload(&self) {
            self.reloads.set(self.reloads.get() + 1);
        }

        fn alert(&self, message: &str) {
            self.alerts.borrow_mut().push(message.to_string());
        }
    }

    fn reply(status: &str) -> RefreshReply {
        RefreshReply {
            status: status.to_string(),
            message: None,
        }
    }

    #[test]
    fn test_success_reloads_once_without_alert() {
        let page = RecordingPage::default();

        let reloaded = handle_reply(Ok(reply("success")), &page);

        assert!(reloaded);
        assert_eq!(page.reloads.get(), 1);
        assert!(page.alerts.borrow().is_empty());
    }

    #[test]
    fn test_failure_status_alerts_without_reload() {
        let page = RecordingPage::default();

        let reloaded = handle_reply(Ok(reply("failure")), &page);

        assert!(!reloaded);
        assert_eq!(page.reloads.get(), 0);
        assert_eq!(*page.alerts.borrow(), [REFRESH_ERROR_MESSAGE]);
    }

    #[test]
    fn test_any_non_success_status_counts_as_failure() {
        let page = RecordingPage::default();

        handle_reply(Ok(reply("Success")), &page);
        handle_reply(Ok(reply("error")), &page);

        assert_eq!(page.reloads.get(), 0);
        assert_eq!(page.alerts.borrow().len(), 2);
    }

    #[test]
    fn test_transport_failure_alerts_without_reload() {
        let page = RecordingPage::default();
        let error = DashboardError::UnexpectedResponse("connection reset".to_string());

        let reloaded = handle_reply(Err(error), &page);

        assert!(!reloaded);
        assert_eq!(page.reloads.get(), 0);
        assert_eq!(*page.alerts.borrow(), [REFRESH_ERROR_MESSAGE]);
    }

    #[test]
    fn test_malformed_body_takes_the_failure_path() {
        let page = RecordingPage::default();
        let parse_error = serde_json::from_str::<RefreshReply>("<html>oops</html>")
            .map_err(DashboardError::from)
            .unwrap_err();

        let reloaded = handle_reply(Err(parse_error), &page);

        assert!(!reloaded);
        assert_eq!(*page.alerts.borrow(), [REFRESH_ERROR_MESSAGE]);
    }

    #[test]
    fn test_reply_parses_with_and_without_message() {
        let bare: RefreshReply = serde_json::from_str(r#"{"status": "success"}"#).unwrap();
        assert_eq!(bare.status, "success");
        assert_eq!(bare.message, None);

        let full: RefreshReply = serde_json::from_str(
            r#"{"status": "success", "message": "Data refreshed successfully", "data": {}}"#,
        )
        .unwrap();
        assert_eq!(full.message.as_deref(), Some("Data refreshed successfully"));
    }

    #[test]
    fn test_auto_refresh_delay_is_five_minutes() {
        assert_eq!(AUTO_REFRESH_DELAY, Duration::from_millis(300_000));
    }

    // Paused-clock run: the deferred trigger must not fire early, and one
    // invocation produces exactly one page outcome.
    #[tokio::test(start_paused = true)]
    async fn test_delayed_refresh_fires_once_after_the_delay() {
        let page = RecordingPage::default();
        let client = Client::new();
        let started = tokio::time::Instant::now();

        // Nothing listens on this port, so the trigger lands in the alert arm.
        let reloaded = delayed_refresh(&client, "http://127.0.0.1:9", &page).await;

        assert!(started.elapsed() >= AUTO_REFRESH_DELAY);
        assert!(!reloaded);
        assert_eq!(page.reloads.get(), 0);
        assert_eq!(page.alerts.borrow().len(), 1);
    }
}
