use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;

use super::traits::{Method, Payload, RawResponse, ServiceRequest, Transport, UPLOAD_FIELD};
use crate::errors::CoreError;
use crate::models::settings::DashboardConfig;

/// reqwest-backed transport talking to the analytics service.
///
/// - Uploads are sent as `multipart/form-data` with the file under `file`.
/// - Everything else is a JSON body (POST) or no body (GET).
/// - No timeout unless `request_timeout_secs` is configured.
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(config: &DashboardConfig) -> Self {
        let builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = match config.request_timeout() {
            Some(timeout) => builder.timeout(timeout),
            None => builder,
        };
        Self {
            client: builder.build().unwrap_or_else(|_| Client::new()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Absolute URL of an endpoint path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}/{path}", self.base_url)
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(&DashboardConfig::default())
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl Transport for HttpTransport {
    fn name(&self) -> &str {
        "HTTP"
    }

    async fn send(&self, request: ServiceRequest) -> Result<RawResponse, CoreError> {
        let url = self.url(request.endpoint.path());
        let builder = match request.method {
            Method::Get => self.client.get(&url),
            Method::Post => self.client.post(&url),
        };

        let builder = match request.payload {
            Payload::Empty => builder,
            Payload::Json(body) => builder.json(&body),
            Payload::File(file) => {
                let part = Part::bytes(file.bytes)
                    .file_name(file.name)
                    .mime_str("text/csv")?;
                builder.multipart(Form::new().part(UPLOAD_FIELD, part))
            }
        };

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        Ok(RawResponse { status, body })
    }
}
