use serde::de::DeserializeOwned;

use super::traits::{Endpoint, FileAttachment, Payload, RawResponse, ServiceRequest, Transport};
use crate::errors::CoreError;
use crate::models::chart::ChartEnvelope;
use crate::models::dataset::{DataInfo, HealthStatus, SampleDataResponse, UploadResponse};
use crate::models::filter::{DataType, FilterQuery};
use crate::models::statistics::StatisticsEnvelope;
use crate::services::loading_service::LoadingIndicator;
use crate::services::notification_service::NotificationPresenter;

/// Uniform request/response wrapper around the analytics service.
///
/// Every call:
/// 1. holds the loading overlay until it settles (success or failure),
/// 2. turns a non-2xx status into `CoreError::Service` with the message the
///    service put in the body,
/// 3. shows transport/protocol failures as an error banner and returns
///    them, so callers can skip their follow-up work.
///
/// Service-level `success: false` replies are *not* errors here; they are
/// returned as data and each caller decides how to present them.
pub struct ServiceClient {
    transport: Box<dyn Transport>,
    loading: LoadingIndicator,
    notifier: NotificationPresenter,
}

impl ServiceClient {
    pub fn new(
        transport: Box<dyn Transport>,
        loading: LoadingIndicator,
        notifier: NotificationPresenter,
    ) -> Self {
        Self {
            transport,
            loading,
            notifier,
        }
    }

    #[must_use]
    pub fn loading(&self) -> &LoadingIndicator {
        &self.loading
    }

    #[must_use]
    pub fn notifier(&self) -> &NotificationPresenter {
        &self.notifier
    }

    // ── Generic calls ───────────────────────────────────────────────

    /// Call an endpoint and return the raw body bytes.
    pub async fn call_raw(&self, endpoint: Endpoint, payload: Payload) -> Result<Vec<u8>, CoreError> {
        let _guard = self.loading.begin();
        self.exchange(endpoint, payload)
            .await
            .map_err(|e| self.surface(endpoint, e))
    }

    /// Call an endpoint and decode its JSON body into `T`.
    pub async fn call_json<T: DeserializeOwned>(
        &self,
        endpoint: Endpoint,
        payload: Payload,
    ) -> Result<T, CoreError> {
        let _guard = self.loading.begin();
        let result = match self.exchange(endpoint, payload).await {
            Ok(body) => serde_json::from_slice(&body).map_err(|e| {
                CoreError::Deserialization(format!("Unreadable response from {endpoint}: {e}"))
            }),
            Err(e) => Err(e),
        };
        result.map_err(|e| self.surface(endpoint, e))
    }

    /// Call an endpoint and return the untyped JSON body.
    pub async fn call(&self, endpoint: Endpoint, payload: Payload) -> Result<serde_json::Value, CoreError> {
        self.call_json(endpoint, payload).await
    }

    // ── Endpoints ───────────────────────────────────────────────────

    pub async fn upload(
        &self,
        data_type: DataType,
        file: FileAttachment,
    ) -> Result<UploadResponse, CoreError> {
        let endpoint = match data_type {
            DataType::Prices => Endpoint::UploadPrices,
            DataType::Returns => Endpoint::UploadReturns,
        };
        self.call_json(endpoint, Payload::File(file)).await
    }

    pub async fn load_sample_data(&self) -> Result<SampleDataResponse, CoreError> {
        self.call_json(Endpoint::LoadSampleData, Payload::Empty).await
    }

    pub async fn data_info(&self) -> Result<DataInfo, CoreError> {
        self.call_json(Endpoint::DataInfo, Payload::Empty).await
    }

    pub async fn chart_data(&self, query: &FilterQuery) -> Result<ChartEnvelope, CoreError> {
        self.call_json(Endpoint::ChartData, Payload::json(query)?).await
    }

    pub async fn statistics(&self, query: &FilterQuery) -> Result<StatisticsEnvelope, CoreError> {
        self.call_json(Endpoint::Statistics, Payload::json(query)?).await
    }

    /// Filtered dataset as CSV bytes.
    pub async fn export(&self, query: &FilterQuery) -> Result<Vec<u8>, CoreError> {
        self.call_raw(Endpoint::Export, Payload::json(query)?).await
    }

    pub async fn health(&self) -> Result<HealthStatus, CoreError> {
        self.call_json(Endpoint::Health, Payload::Empty).await
    }

    // ── Internal ────────────────────────────────────────────────────

    async fn exchange(&self, endpoint: Endpoint, payload: Payload) -> Result<Vec<u8>, CoreError> {
        tracing::debug!(%endpoint, transport = self.transport.name(), "request issued");
        let response = self
            .transport
            .send(ServiceRequest::new(endpoint, payload))
            .await?;
        tracing::debug!(%endpoint, status = response.status, "request settled");

        if response.is_success() {
            Ok(response.body)
        } else {
            Err(CoreError::Service {
                status: response.status,
                message: error_message(&response),
            })
        }
    }

    fn surface(&self, endpoint: Endpoint, error: CoreError) -> CoreError {
        tracing::error!(%endpoint, %error, "service call failed");
        self.notifier.error(error.user_message());
        error
    }
}

/// Extract the human-readable message from an error body.
fn error_message(response: &RawResponse) -> String {
    serde_json::from_slice::<serde_json::Value>(&response.body)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("error"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| format!("Request failed with status {}", response.status))
}
