use super::payload::ValueRange;
use super::{RowSource, RowSourceError, Rows, SheetRange};
use crate::config::SheetsApiConfig;
use async_trait::async_trait;
use reqwest::{Client, Url};
use tokio::sync::OnceCell;
use tracing::debug;
use yup_oauth2::authenticator::DefaultAuthenticator;
use yup_oauth2::{ServiceAccountAuthenticator, ServiceAccountKey};

pub const SHEETS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";

/// Reads ranges through the Google Sheets v4 `spreadsheets.values.get` endpoint.
///
/// Requests carry a service-account token when a key is configured, otherwise
/// the static access token if any; the API key is sent either way.
pub struct SheetsApiRowSource {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    access_token: Option<String>,
    service_account: Option<ServiceAccountTokens>,
}

/// Mints readonly-scope tokens for one service account. The authenticator is
/// built on first use and refreshes tokens as they expire.
struct ServiceAccountTokens {
    key: ServiceAccountKey,
    authenticator: OnceCell<DefaultAuthenticator>,
}

impl ServiceAccountTokens {
    fn new(key: ServiceAccountKey) -> Self {
        Self {
            key,
            authenticator: OnceCell::new(),
        }
    }

    async fn token(&self) -> Result<String, RowSourceError> {
        let authenticator = self
            .authenticator
            .get_or_try_init(|| ServiceAccountAuthenticator::builder(self.key.clone()).build())
            .await
            .map_err(|err| RowSourceError::Auth(err.to_string()))?;

        let token = authenticator
            .token(&[SHEETS_READONLY_SCOPE])
            .await
            .map_err(|err| RowSourceError::Auth(err.to_string()))?;
        token.token().map(str::to_string).ok_or_else(|| {
            RowSourceError::Auth("token response carried no access token".to_string())
        })
    }
}

impl SheetsApiRowSource {
    pub fn new(config: &SheetsApiConfig) -> Result<Self, RowSourceError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(RowSourceError::Http)?;
        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            access_token: config.access_token.clone(),
            service_account: config.service_account.clone().map(ServiceAccountTokens::new),
        })
    }

    fn values_url(&self, spreadsheet_id: &str, range: &SheetRange) -> Result<Url, RowSourceError> {
        let invalid = || RowSourceError::Endpoint(self.base_url.clone());
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(["spreadsheets", spreadsheet_id, "values", range.as_str()]);
        Ok(url)
    }

    async fn bearer_token(&self) -> Result<Option<String>, RowSourceError> {
        match &self.service_account {
            Some(tokens) => tokens.token().await.map(Some),
            None => Ok(self.access_token.clone()),
        }
    }
}

impl std::fmt::Debug for SheetsApiRowSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SheetsApiRowSource")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field(
                "service_account",
                &self.service_account.as_ref().map(|tokens| &tokens.key.client_email),
            )
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl RowSource for SheetsApiRowSource {
    async fn fetch_range(
        &self,
        spreadsheet_id: &str,
        range: &SheetRange,
    ) -> Result<Rows, RowSourceError> {
        let url = self.values_url(spreadsheet_id, range)?;
        debug!(%url, "requesting sheet values");

        let mut request = self
            .client
            .get(url)
            .query(&[("majorDimension", "ROWS")]);
        if let Some(key) = &self.api_key {
            request = request.query(&[("key", key.as_str())]);
        }
        if let Some(token) = self.bearer_token().await? {
            request = request.bearer_auth(token);
        }

        // The request URL carries the API key, so it never reaches error text.
        let response = request
            .send()
            .await
            .map_err(|err| RowSourceError::Http(err.without_url()))?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(RowSourceError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: ValueRange = response
            .json()
            .await
            .map_err(|err| RowSourceError::Http(err.without_url()))?;
        Ok(payload.into_rows())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config(base_url: &str) -> SheetsApiConfig {
        SheetsApiConfig {
            base_url: base_url.to_string(),
            api_key: Some("secret-key".to_string()),
            access_token: None,
            service_account: None,
            timeout: Duration::from_secs(5),
        }
    }

    fn source(base_url: &str) -> SheetsApiRowSource {
        SheetsApiRowSource::new(&config(base_url)).expect("client builds")
    }

    async fn closed_port() -> u16 {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let port = listener.local_addr().expect("addr").port();
        drop(listener);
        port
    }

    fn service_account_key(token_uri: &str) -> ServiceAccountKey {
        yup_oauth2::parse_service_account_key(format!(
            r#"{{
                "type": "service_account",
                "private_key": "not a pem key",
                "client_email": "dashboard@recruiting.iam.gserviceaccount.com",
                "token_uri": "{token_uri}"
            }}"#
        ))
        .expect("key json parses")
    }

    #[test]
    fn values_url_encodes_range_as_a_path_segment() {
        let range = SheetRange::parse("工作表1!A1:K100").expect("range");
        let url = source("https://sheets.googleapis.com/v4/")
            .values_url("sheet-id", &range)
            .expect("url builds");

        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-id/values/%E5%B7%A5%E4%BD%9C%E8%A1%A81!A1:K100"
        );
    }

    #[test]
    fn debug_output_redacts_credentials() {
        let rendered = format!("{:?}", source("https://sheets.googleapis.com/v4"));
        assert!(!rendered.contains("secret-key"));
        assert!(rendered.contains("<redacted>"));
    }

    #[test]
    fn rejects_non_hierarchical_base_urls() {
        let range = SheetRange::parse("A1:B2").expect("range");
        let error = source("mailto:hr@example.com")
            .values_url("sheet-id", &range)
            .expect_err("cannot append path segments");
        assert!(matches!(error, RowSourceError::Endpoint(_)));
    }

    #[tokio::test]
    async fn transport_errors_never_expose_the_api_key() {
        let port = closed_port().await;
        let range = SheetRange::parse("A1:B2").expect("range");

        let error = source(&format!("http://127.0.0.1:{port}/v4"))
            .fetch_range("jobs", &range)
            .await
            .expect_err("nothing listens on the port");

        assert!(matches!(error, RowSourceError::Http(_)));
        let rendered = format!("{error} {error:?}");
        assert!(!rendered.contains("secret-key"), "leaked: {rendered}");
    }

    #[tokio::test]
    async fn service_account_failures_stop_before_the_sheet_request() {
        let port = closed_port().await;
        let mut config = config(&format!("http://127.0.0.1:{port}/v4"));
        config.service_account = Some(service_account_key(&format!(
            "http://127.0.0.1:{port}/token"
        )));
        let range = SheetRange::parse("A1:B2").expect("range");

        let source = SheetsApiRowSource::new(&config).expect("client builds");
        let error = source
            .fetch_range("jobs", &range)
            .await
            .expect_err("unusable key");

        assert!(matches!(error, RowSourceError::Auth(_)));
        let rendered = format!("{source:?}");
        assert!(rendered.contains("dashboard@recruiting.iam.gserviceaccount.com"));
        assert!(!rendered.contains("not a pem key"));
    }
}
