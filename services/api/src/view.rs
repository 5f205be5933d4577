use crate::infra::AppState;
use axum::http::header;
use axum::response::IntoResponse;
use axum::Extension;

const PAGE: &str = include_str!("../assets/dashboard.html");
const POLL_PLACEHOLDER: &str = "__POLL_MS__";

/// Renders the dashboard page with the configured polling interval.
pub(crate) fn render_page(poll_secs: u64) -> String {
    let poll_ms = poll_secs.max(1).saturating_mul(1000);
    PAGE.replace(POLL_PLACEHOLDER, &poll_ms.to_string())
}

pub(crate) async fn dashboard_page(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, mime::TEXT_HTML_UTF_8.to_string())],
        render_page(state.poll_secs),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_polls_at_the_configured_interval() {
        let page = render_page(30);
        assert!(page.contains("const POLL_MS = 30000;"));
        assert!(!page.contains(POLL_PLACEHOLDER));
    }

    #[test]
    fn zero_interval_still_polls() {
        assert!(render_page(0).contains("const POLL_MS = 1000;"));
    }
}
