// ═══════════════════════════════════════════════════════════════════
// Shared test doubles — scripted transport, recording widgets, fixtures
// ═══════════════════════════════════════════════════════════════════

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::NaiveDate;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use fund_dashboard_core::client::traits::{Endpoint, RawResponse, ServiceRequest, Transport};
use fund_dashboard_core::errors::CoreError;
use fund_dashboard_core::models::chart::RenderedChart;
use fund_dashboard_core::models::settings::DashboardConfig;
use fund_dashboard_core::models::view::{ControlsView, DataInfoPanel, StatPanel};
use fund_dashboard_core::services::loading_service::LoadingIndicator;
use fund_dashboard_core::ui::{ChartWidget, DashboardView, ElementId, UiSurface};
use fund_dashboard_core::Dashboard;

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

// ── Mock transport ──────────────────────────────────────────────────

type Scripted = Result<RawResponse, String>;

#[derive(Default)]
struct TransportLog {
    once: HashMap<Endpoint, VecDeque<Scripted>>,
    always: HashMap<Endpoint, Scripted>,
    requests: Vec<ServiceRequest>,
    loading_seen: Vec<bool>,
    observer: Option<LoadingIndicator>,
}

/// Transport answering from a script and recording every request.
/// Unscripted endpoints answer 404.
#[derive(Clone, Default)]
pub struct MockTransport {
    log: Arc<Mutex<TransportLog>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every call to `endpoint` with `status` and `body`.
    pub fn respond(&self, endpoint: Endpoint, status: u16, body: Value) -> &Self {
        self.log.lock().always.insert(endpoint, Ok(raw(status, &body)));
        self
    }

    /// Answer the next call to `endpoint` only; later calls fall back.
    pub fn respond_once(&self, endpoint: Endpoint, status: u16, body: Value) -> &Self {
        self.log
            .lock()
            .once
            .entry(endpoint)
            .or_default()
            .push_back(Ok(raw(status, &body)));
        self
    }

    /// Answer every call to `endpoint` with raw bytes.
    pub fn respond_bytes(&self, endpoint: Endpoint, status: u16, body: &[u8]) -> &Self {
        self.log.lock().always.insert(
            endpoint,
            Ok(RawResponse {
                status,
                body: body.to_vec(),
            }),
        );
        self
    }

    /// Fail every call to `endpoint` before any response arrives.
    pub fn fail(&self, endpoint: Endpoint, message: &str) -> &Self {
        self.log.lock().always.insert(endpoint, Err(message.to_string()));
        self
    }

    /// Record the overlay visibility at the moment each request is sent.
    pub fn observe_loading(&self, loading: LoadingIndicator) {
        self.log.lock().observer = Some(loading);
    }

    pub fn requests(&self) -> Vec<ServiceRequest> {
        self.log.lock().requests.clone()
    }

    pub fn endpoints(&self) -> Vec<Endpoint> {
        self.log.lock().requests.iter().map(|r| r.endpoint).collect()
    }

    pub fn count(&self, endpoint: Endpoint) -> usize {
        self.endpoints().into_iter().filter(|e| *e == endpoint).count()
    }

    pub fn loading_seen(&self) -> Vec<bool> {
        self.log.lock().loading_seen.clone()
    }
}

fn raw(status: u16, body: &Value) -> RawResponse {
    RawResponse {
        status,
        body: serde_json::to_vec(body).unwrap(),
    }
}

#[async_trait]
impl Transport for MockTransport {
    fn name(&self) -> &str {
        "Mock"
    }

    async fn send(&self, request: ServiceRequest) -> Result<RawResponse, CoreError> {
        let mut log = self.log.lock();
        let visible = log.observer.as_ref().map(|l| l.is_visible());
        if let Some(v) = visible {
            log.loading_seen.push(v);
        }
        let endpoint = request.endpoint;
        log.requests.push(request);

        let scripted = log
            .once
            .get_mut(&endpoint)
            .and_then(|q| q.pop_front())
            .or_else(|| log.always.get(&endpoint).cloned());

        match scripted {
            Some(Ok(response)) => Ok(response),
            Some(Err(message)) => Err(CoreError::Network(message)),
            None => Ok(raw(404, &json!({"message": format!("No mock for {endpoint}")}))),
        }
    }
}

// ── Presentation doubles ────────────────────────────────────────────

pub struct MockSurface {
    ids: HashSet<&'static str>,
}

impl MockSurface {
    pub fn complete() -> Self {
        Self {
            ids: ElementId::REQUIRED.iter().map(|e| e.dom_id()).collect(),
        }
    }

    pub fn without(element: ElementId) -> Self {
        let mut surface = Self::complete();
        surface.ids.remove(element.dom_id());
        surface
    }
}

impl UiSurface for MockSurface {
    fn has_element(&self, dom_id: &str) -> bool {
        self.ids.contains(dom_id)
    }
}

pub const PNG_BYTES: &[u8] = b"\x89PNG\r\n\x1a\nfake";

/// Chart widget keeping every projection it received.
#[derive(Clone, Default)]
pub struct RecordingChart {
    pub charts: Arc<Mutex<Vec<RenderedChart>>>,
}

impl ChartWidget for RecordingChart {
    fn replace(&mut self, chart: &RenderedChart) {
        self.charts.lock().push(chart.clone());
    }

    fn export_png(&self) -> Result<Vec<u8>, CoreError> {
        Ok(PNG_BYTES.to_vec())
    }
}

#[derive(Default)]
pub struct ViewLog {
    pub stats: Vec<StatPanel>,
    pub data_info: Vec<DataInfoPanel>,
    pub controls: Vec<ControlsView>,
}

/// Dashboard view keeping every projection it received.
#[derive(Clone, Default)]
pub struct RecordingView {
    pub log: Arc<Mutex<ViewLog>>,
}

impl DashboardView for RecordingView {
    fn show_statistics(&mut self, panel: &StatPanel) {
        self.log.lock().stats.push(panel.clone());
    }

    fn show_data_info(&mut self, panel: &DataInfoPanel) {
        self.log.lock().data_info.push(panel.clone());
    }

    fn show_controls(&mut self, controls: &ControlsView) {
        self.log.lock().controls.push(controls.clone());
    }
}

/// A dashboard over a mock transport, plus handles to everything it drives.
pub struct Harness {
    pub dashboard: Dashboard,
    pub transport: MockTransport,
    pub chart: RecordingChart,
    pub view: RecordingView,
}

pub fn harness(transport: MockTransport) -> Harness {
    let chart = RecordingChart::default();
    let view = RecordingView::default();
    let dashboard = Dashboard::with_transport(
        &DashboardConfig::default(),
        Box::new(transport.clone()),
        &MockSurface::complete(),
        Box::new(chart.clone()),
        Box::new(view.clone()),
    )
    .unwrap();
    Harness {
        dashboard,
        transport,
        chart,
        view,
    }
}

// ── JSON fixtures (service wire format) ─────────────────────────────

pub fn upload_ok(message: &str) -> Value {
    json!({
        "success": true,
        "message": message,
        "date_range": {"start": "2003-07-01", "end": "2003-07-10"},
        "columns": ["GFund", "FFund", "CFund", "SFund", "IFund", "Date"],
        "nan_statistics": {
            "GFund": {"total": 10, "valid": 10, "missing": 0, "missing_percentage": 0.0}
        }
    })
}

pub fn data_info_prices_only() -> Value {
    json!({
        "prices_loaded": true,
        "returns_loaded": false,
        "available_funds": ["GFund", "FFund", "CFund", "SFund", "IFund"],
        "prices_info": {
            "record_count": 10,
            "date_range": {"start": "2003-07-01", "end": "2003-07-10"},
            "fund_availability": {
                "GFund": {"valid_records": 10, "total_records": 10, "coverage_percentage": 100.0},
                "IFund": {"valid_records": 6, "total_records": 10, "coverage_percentage": 60.0}
            }
        }
    })
}

pub fn data_info_both() -> Value {
    let mut info = data_info_prices_only();
    info["returns_loaded"] = json!(true);
    info["returns_info"] = json!({
        "record_count": 28,
        "date_range": {"start": "2020-01-01", "end": "2024-12-01"},
        "fund_availability": {
            "CFund": {
                "valid_records": 26, "total_records": 28, "coverage_percentage": 92.9,
                "first_data_date": "2020-03-01", "last_data_date": "2024-12-01"
            }
        }
    });
    info
}

pub fn chart_ok() -> Value {
    json!({
        "success": true,
        "data": {
            "labels": ["2003-07-01", "2003-07-02", "2003-07-03"],
            "datasets": [
                {"label": "GFund", "data": [10.02, 10.02, 10.02], "borderColor": "#2196f3",
                 "backgroundColor": "#2196f320", "spanGaps": false, "pointRadius": 1, "pointHoverRadius": 4},
                {"label": "CFund", "data": [null, null, 10.24], "borderColor": "#ff9800",
                 "backgroundColor": "#ff980020", "spanGaps": false, "pointRadius": 1, "pointHoverRadius": 4}
            ]
        },
        "record_count": 3
    })
}

pub fn stats_ok() -> Value {
    json!({
        "success": true,
        "statistics": {
            "GFund": {
                "current": 10.24, "previous": 10.02, "change": 0.22, "min": 10.02, "max": 10.24,
                "mean": 10.13, "std": 0.08, "count": 10, "total_periods": 10,
                "missing_periods": 0, "data_coverage": 100.0
            },
            "IFund": {
                "current": null, "previous": null, "change": null, "min": null, "max": null,
                "mean": null, "std": null, "count": 0, "total_periods": 4,
                "missing_periods": 4, "data_coverage": 0.0
            }
        }
    })
}

/// Transport with a prices dataset ready to be uploaded and rendered.
pub fn prices_service() -> MockTransport {
    let transport = MockTransport::new();
    transport
        .respond(Endpoint::UploadPrices, 200, upload_ok("Loaded 10 price records"))
        .respond(Endpoint::DataInfo, 200, data_info_prices_only())
        .respond(Endpoint::ChartData, 200, chart_ok())
        .respond(Endpoint::Statistics, 200, stats_ok());
    transport
}
