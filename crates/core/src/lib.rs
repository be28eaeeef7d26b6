pub mod client;
pub mod errors;
pub mod models;
pub mod services;
pub mod ui;

use chrono::NaiveDate;
use std::time::Instant;

use client::http::HttpTransport;
use client::service::ServiceClient;
use client::traits::{FileAttachment, Transport};
use models::{
    chart::{ChartEnvelope, RenderedChart},
    filter::{ChartType, DataType, FilterQuery},
    fund::{FundId, SelectedFunds},
    notification::Notification,
    settings::DashboardConfig,
    state::AppState,
    view::{DataInfoPanel, StatPanel},
};
use services::{
    chart_service::{ChartCompletion, ChartService, PendingChart},
    data_info_service::render_data_info,
    export_service,
    loading_service::LoadingIndicator,
    notification_service::NotificationPresenter,
    statistics_service::StatisticsService,
    upload_service,
};
use ui::{ChartWidget, DashboardView, UiSurface};

use errors::CoreError;

/// Result of a chart or statistics update that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The projection was rebuilt and pushed to the view.
    Rendered,
    /// A client-side guard refused the request; a warning was shown.
    Skipped,
    /// The response arrived after a newer request was issued and was dropped.
    Stale,
}

/// Main entry point of the dashboard controller.
/// Owns the application state and drives every request/render cycle.
#[must_use]
pub struct Dashboard {
    state: AppState,
    client: ServiceClient,
    chart_service: ChartService,
    statistics_service: StatisticsService,
    chart_widget: Box<dyn ChartWidget>,
    view: Box<dyn DashboardView>,
    notifier: NotificationPresenter,
    loading: LoadingIndicator,
    rendered_chart: Option<RenderedChart>,
    stat_panel: StatPanel,
    data_info_panel: DataInfoPanel,
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("state", &self.state)
            .field("pending_requests", &self.loading.pending())
            .field("has_chart", &self.rendered_chart.is_some())
            .finish()
    }
}

impl Dashboard {
    /// Build a dashboard talking HTTP to `config.base_url`.
    /// Fails if the presentation layer lacks a required element.
    pub fn new(
        config: &DashboardConfig,
        surface: &dyn UiSurface,
        chart_widget: Box<dyn ChartWidget>,
        view: Box<dyn DashboardView>,
    ) -> Result<Self, CoreError> {
        Self::with_transport(
            config,
            Box::new(HttpTransport::new(config)),
            surface,
            chart_widget,
            view,
        )
    }

    /// Build a dashboard over an arbitrary transport.
    pub fn with_transport(
        config: &DashboardConfig,
        transport: Box<dyn Transport>,
        surface: &dyn UiSurface,
        chart_widget: Box<dyn ChartWidget>,
        view: Box<dyn DashboardView>,
    ) -> Result<Self, CoreError> {
        ui::verify_surface(surface)?;

        let notifier = NotificationPresenter::from_config(config);
        let loading = LoadingIndicator::new();
        let client = ServiceClient::new(transport, loading.clone(), notifier.clone());

        let mut dashboard = Self {
            state: AppState::new(),
            client,
            chart_service: ChartService::new(),
            statistics_service: StatisticsService::new(),
            chart_widget,
            view,
            notifier,
            loading,
            rendered_chart: None,
            stat_panel: StatPanel::Empty,
            data_info_panel: DataInfoPanel::default(),
        };
        dashboard.push_controls();
        Ok(dashboard)
    }

    /// Initial data-info fetch so the panel and date bounds reflect whatever
    /// the service already holds.
    pub async fn start(&mut self) -> Result<(), CoreError> {
        self.refresh_data_info().await
    }

    // ── Accessors ───────────────────────────────────────────────────

    #[must_use]
    pub fn state(&self) -> &AppState {
        &self.state
    }

    #[must_use]
    pub fn client(&self) -> &ServiceClient {
        &self.client
    }

    /// The banner currently on screen.
    #[must_use]
    pub fn notification(&self) -> Option<Notification> {
        self.notifier.current()
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.loading.is_visible()
    }

    /// The last chart pushed to the widget.
    #[must_use]
    pub fn rendered_chart(&self) -> Option<&RenderedChart> {
        self.rendered_chart.as_ref()
    }

    #[must_use]
    pub fn stat_panel(&self) -> &StatPanel {
        &self.stat_panel
    }

    #[must_use]
    pub fn data_info_panel(&self) -> &DataInfoPanel {
        &self.data_info_panel
    }

    // ── Uploads ─────────────────────────────────────────────────────

    pub async fn upload_prices(&mut self, file: FileAttachment) -> Result<(), CoreError> {
        self.upload(DataType::Prices, file).await
    }

    pub async fn upload_returns(&mut self, file: FileAttachment) -> Result<(), CoreError> {
        self.upload(DataType::Returns, file).await
    }

    /// Shared handler of the drop zone and the file picker.
    /// An empty capture is ignored without a notification.
    pub async fn upload_files(
        &mut self,
        data_type: DataType,
        files: Vec<FileAttachment>,
    ) -> Result<(), CoreError> {
        match upload_service::accept_files(files) {
            Some(file) => self.upload(data_type, file).await,
            None => Ok(()),
        }
    }

    /// Ask the service to load its built-in sample datasets.
    pub async fn load_sample_data(&mut self) -> Result<(), CoreError> {
        let response = self.client.load_sample_data().await?;
        let message = upload_service::apply_sample(&mut self.state, &response)
            .inspect_err(|e| {
                self.notifier.error(e.user_message());
            })?;
        self.notifier.success(message);
        self.after_load().await;
        Ok(())
    }

    async fn upload(&mut self, data_type: DataType, file: FileAttachment) -> Result<(), CoreError> {
        tracing::info!(%data_type, file = %file.name, bytes = file.bytes.len(), "uploading dataset");
        let response = self.client.upload(data_type, file).await?;
        let message = upload_service::apply_upload(&mut self.state, data_type, &response)
            .inspect_err(|e| {
                self.notifier.error(e.user_message());
            })?;
        self.notifier.success(message);
        self.after_load().await;
        Ok(())
    }

    /// Refresh data info then re-render. Both already surface their own
    /// failures, and the load itself has succeeded at this point.
    async fn after_load(&mut self) {
        if let Err(e) = self.refresh_data_info().await {
            tracing::warn!(error = %e, "data info refresh failed after load");
        }
        if let Err(e) = self.update_chart().await {
            tracing::warn!(error = %e, "chart update failed after load");
        }
    }

    // ── Filter controls ─────────────────────────────────────────────

    /// Mirror a fund checkbox and re-render.
    pub async fn toggle_fund(&mut self, fund: FundId, checked: bool) -> Result<RenderOutcome, CoreError> {
        self.state.set_fund_selected(fund, checked);
        self.push_controls();
        self.update_chart().await
    }

    /// Switch dataset; date bounds follow the new dataset's range.
    pub async fn set_data_type(&mut self, data_type: DataType) -> Result<RenderOutcome, CoreError> {
        self.state.set_data_type(data_type);
        self.push_controls();
        self.update_chart().await
    }

    pub async fn set_chart_type(&mut self, chart_type: ChartType) -> Result<RenderOutcome, CoreError> {
        self.state.set_chart_type(chart_type);
        self.push_controls();
        self.update_chart().await
    }

    pub async fn set_start_date(&mut self, date: NaiveDate) -> Result<RenderOutcome, CoreError> {
        self.state.set_start_date(date);
        self.push_controls();
        self.update_chart().await
    }

    pub async fn set_end_date(&mut self, date: NaiveDate) -> Result<RenderOutcome, CoreError> {
        self.state.set_end_date(date);
        self.push_controls();
        self.update_chart().await
    }

    /// Restore all funds, prices and line chart, re-derive the date bounds
    /// from a fresh data-info fetch, then re-render.
    pub async fn reset_filters(&mut self) -> Result<RenderOutcome, CoreError> {
        self.state.reset_filters();
        self.push_controls();
        self.refresh_data_info().await?;
        self.update_chart().await
    }

    /// Fetch data info, rebuild the data-info panel and clamp date bounds.
    pub async fn refresh_data_info(&mut self) -> Result<(), CoreError> {
        let info = self.client.data_info().await?;
        self.data_info_panel = render_data_info(&info);
        self.view.show_data_info(&self.data_info_panel);
        self.state.apply_data_info(info);
        self.push_controls();
        Ok(())
    }

    // ── Chart ───────────────────────────────────────────────────────

    /// Request chart data for the active filter and push it into the widget.
    /// A successful chart update always refreshes the statistics for the
    /// same filter.
    pub async fn update_chart(&mut self) -> Result<RenderOutcome, CoreError> {
        let Some(pending) = self.begin_chart_request() else {
            return Ok(RenderOutcome::Skipped);
        };
        let result = self.client.chart_data(&pending.query).await;
        self.finish_chart_request(&pending, result).await
    }

    /// First half of [`update_chart`](Self::update_chart): run the guards and
    /// issue a request ticket. Shows a warning and returns `None` if refused.
    pub fn begin_chart_request(&mut self) -> Option<PendingChart> {
        match self.chart_service.prepare(&self.state) {
            Ok(pending) => Some(pending),
            Err(e) => {
                tracing::warn!(error = %e, "chart request refused");
                self.notifier.warning(guard_message(&e));
                None
            }
        }
    }

    /// Second half of [`update_chart`](Self::update_chart): apply a settled
    /// response. Stale responses are dropped; failures leave the current
    /// chart on screen.
    pub async fn finish_chart_request(
        &mut self,
        pending: &PendingChart,
        result: Result<ChartEnvelope, CoreError>,
    ) -> Result<RenderOutcome, CoreError> {
        if !self.chart_service.is_current(pending) {
            tracing::warn!(ticket = ?pending.ticket, "discarding stale chart response");
            return Ok(RenderOutcome::Stale);
        }
        let envelope = result?;
        match self.chart_service.complete(pending, envelope) {
            Ok(ChartCompletion::Stale) => Ok(RenderOutcome::Stale),
            Ok(ChartCompletion::Render(chart)) => {
                tracing::info!(
                    labels = chart.labels.len(),
                    series = chart.series.len(),
                    "chart rendered"
                );
                self.chart_widget.replace(&chart);
                self.rendered_chart = Some(chart);
                if let Err(e) = self.render_statistics_for(pending.query.clone()).await {
                    tracing::warn!(error = %e, "statistics update failed after chart render");
                }
                Ok(RenderOutcome::Rendered)
            }
            Err(e) => {
                self.notifier.error(e.user_message());
                Err(e)
            }
        }
    }

    // ── Statistics ──────────────────────────────────────────────────

    /// Request statistics for the active filter and rebuild the stat panel.
    pub async fn update_statistics(&mut self) -> Result<RenderOutcome, CoreError> {
        let query = self.state.query();
        self.render_statistics_for(query).await
    }

    async fn render_statistics_for(&mut self, query: FilterQuery) -> Result<RenderOutcome, CoreError> {
        let funds: SelectedFunds = query.funds.iter().copied().collect();
        let pending = self.statistics_service.prepare(query, funds);
        let result = self.client.statistics(&pending.query).await;

        let Some(panel) = self.statistics_service.complete(&pending, &result) else {
            return Ok(RenderOutcome::Stale);
        };
        self.view.show_statistics(&panel);
        self.stat_panel = panel;

        let error = match result {
            Ok(envelope) if envelope.success => return Ok(RenderOutcome::Rendered),
            Ok(envelope) => CoreError::Rejected(
                envelope.message.unwrap_or_else(|| "Statistics request rejected".to_string()),
            ),
            Err(e) => e,
        };
        // Transport failures were already announced by the client.
        if !error.is_transport() {
            self.notifier.error(error.user_message());
        }
        Err(error)
    }

    // ── Export ──────────────────────────────────────────────────────

    /// Download the filtered dataset as CSV into `dir` (native only).
    /// The file is named `{dataType}_export_{today}.csv`.
    #[cfg(not(target_arch = "wasm32"))]
    pub async fn export_data(
        &self,
        dir: &std::path::Path,
        today: NaiveDate,
    ) -> Result<std::path::PathBuf, CoreError> {
        let data_type = self.state.data_type();
        if !self.state.active_dataset_loaded() {
            let e = CoreError::DatasetNotLoaded(data_type);
            self.notifier.warning(guard_message(&e));
            return Err(e);
        }

        let query = self.state.query();
        if let Err(e) = query.validate() {
            tracing::warn!(error = %e, "export refused");
            self.notifier.warning(guard_message(&e));
            return Err(e);
        }

        let bytes = self.client.export(&query).await?;
        let filename = export_service::csv_export_filename(data_type, today);
        let path = export_service::save_export(dir, &filename, &bytes)
            .inspect_err(|e| {
                self.notifier.error(e.user_message());
            })?;
        self.notifier.success("Data exported successfully");
        Ok(path)
    }

    /// Save the current chart as PNG into `dir` (native only). No network.
    /// The file is named `{dataType}_chart_{today}.png`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn export_chart(
        &self,
        dir: &std::path::Path,
        today: NaiveDate,
    ) -> Result<std::path::PathBuf, CoreError> {
        if self.rendered_chart.is_none() {
            let e = CoreError::Unsupported("No chart to export".to_string());
            self.notifier.warning(e.user_message());
            return Err(e);
        }

        let result = self.chart_widget.export_png().and_then(|png| {
            let filename = export_service::chart_export_filename(self.state.data_type(), today);
            export_service::save_export(dir, &filename, &png)
        });
        match result {
            Ok(path) => {
                self.notifier.success("Chart exported successfully");
                Ok(path)
            }
            Err(e) => {
                self.notifier.error(e.user_message());
                Err(e)
            }
        }
    }

    // ── Notifications ───────────────────────────────────────────────

    /// Close a banner. Safe to call repeatedly or after it expired.
    pub fn dismiss_notification(&self, id: uuid::Uuid) -> bool {
        self.notifier.dismiss(id)
    }

    /// Advance banner timers. Returns `true` if the banner changed.
    pub fn tick(&self, now: Instant) -> bool {
        self.notifier.tick(now)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn push_controls(&mut self) {
        self.view.show_controls(&self.state.controls_view());
    }
}

/// Warning text for a refused chart or export request.
fn guard_message(error: &CoreError) -> String {
    match error {
        CoreError::DatasetNotLoaded(data_type) => {
            format!("Please upload {data_type} data first")
        }
        CoreError::ValidationError(message) => message.clone(),
        other => other.user_message(),
    }
}
