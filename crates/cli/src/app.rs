//! Command dispatch.

use anyhow::{Context, Result};
use chrono::Local;

use fund_dashboard_core::client::traits::FileAttachment;
use fund_dashboard_core::models::filter::DataType;
use fund_dashboard_core::models::fund::FundId;
use fund_dashboard_core::models::settings::DashboardConfig;
use fund_dashboard_core::Dashboard;

use crate::config::{AppConfig, Command, FilterArgs, LoadArgs};
use crate::terminal::{
    format_chart, format_data_info, format_notification, format_statistics, TerminalChart,
    TerminalSurface, TerminalView,
};

pub async fn run(config: &AppConfig) -> Result<()> {
    let mut settings = DashboardConfig::default();
    if let Some(url) = &config.api_url {
        settings = settings.with_base_url(url)?;
    }
    settings.request_timeout_secs = config.timeout;
    tracing::debug!(base_url = %settings.base_url, "service configured");

    let mut dashboard = Dashboard::new(
        &settings,
        &TerminalSurface,
        Box::new(TerminalChart),
        Box::new(TerminalView),
    )?;

    let result = dispatch(&mut dashboard, &config.command).await;
    if let Some(banner) = dashboard.notification() {
        eprintln!("{}", format_notification(&banner));
    }
    result
}

async fn dispatch(dashboard: &mut Dashboard, command: &Command) -> Result<()> {
    match command {
        Command::Health => {
            let health = dashboard.client().health().await?;
            println!("{}: {}", health.status, health.message);
        }
        Command::Info => {
            dashboard.start().await?;
            print!("{}", format_data_info(dashboard.data_info_panel()));
        }
        Command::Upload { data_type, file } => {
            let file = FileAttachment::from_path(file)
                .with_context(|| format!("reading {}", file.display()))?;
            dashboard.upload_files(*data_type, vec![file]).await?;
            print!("{}", format_data_info(dashboard.data_info_panel()));
        }
        Command::Sample => {
            dashboard.load_sample_data().await?;
            print!("{}", format_data_info(dashboard.data_info_panel()));
        }
        Command::Chart { load, filter } => {
            load_datasets(dashboard, load).await?;
            apply_filter(dashboard, filter).await?;
            match dashboard.rendered_chart() {
                Some(chart) => print!("{}", format_chart(chart)),
                None => println!("No chart rendered."),
            }
            print!("{}", format_statistics(dashboard.stat_panel()));
        }
        Command::Export { load, filter, out } => {
            load_datasets(dashboard, load).await?;
            apply_filter(dashboard, filter).await?;
            let path = dashboard
                .export_data(out, Local::now().date_naive())
                .await?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

async fn load_datasets(dashboard: &mut Dashboard, load: &LoadArgs) -> Result<()> {
    if load.sample {
        dashboard.load_sample_data().await?;
    }
    for (data_type, path) in [(DataType::Prices, &load.prices), (DataType::Returns, &load.returns)] {
        if let Some(path) = path {
            let file = FileAttachment::from_path(path)
                .with_context(|| format!("reading {}", path.display()))?;
            dashboard.upload_files(data_type, vec![file]).await?;
        }
    }
    if !dashboard.state().availability().any_loaded() {
        anyhow::bail!("Nothing loaded: pass --sample, --prices or --returns");
    }
    Ok(())
}

/// Drive the same controls a user would, changing only what differs.
async fn apply_filter(dashboard: &mut Dashboard, filter: &FilterArgs) -> Result<()> {
    if dashboard.state().data_type() != filter.data_type {
        dashboard.set_data_type(filter.data_type).await?;
    }
    if dashboard.state().chart_type() != filter.chart_type {
        dashboard.set_chart_type(filter.chart_type).await?;
    }
    if let Some(start) = filter.start {
        dashboard.set_start_date(start).await?;
    }
    if let Some(end) = filter.end {
        dashboard.set_end_date(end).await?;
    }
    if !filter.funds.is_empty() {
        // Check the wanted funds before clearing the rest so the
        // selection is never empty in between.
        for fund in &filter.funds {
            dashboard.toggle_fund(*fund, true).await?;
        }
        for fund in FundId::ALL {
            if !filter.funds.contains(&fund) {
                dashboard.toggle_fund(fund, false).await?;
            }
        }
    }
    Ok(())
}
