//! Command-line flags and subcommands.

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use fund_dashboard_core::models::filter::{ChartType, DataType};
use fund_dashboard_core::models::fund::FundId;
use fund_dashboard_core::models::settings::API_URL_ENV;

/// Terminal front end for the fund visualization dashboard.
#[derive(Parser, Debug)]
#[command(name = "fund-dashboard", version, about)]
pub struct AppConfig {
    /// Base URL of the analytics service.
    #[arg(long, global = true, env = API_URL_ENV)]
    pub api_url: Option<String>,

    /// Per-request timeout in seconds. Waits indefinitely when omitted.
    #[arg(long, global = true)]
    pub timeout: Option<u64>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check that the service is reachable.
    Health,

    /// Show what the service currently holds.
    Info,

    /// Upload a CSV dataset.
    Upload {
        /// Which dataset the file contains: prices or returns.
        data_type: DataType,
        file: PathBuf,
    },

    /// Load the service's built-in sample datasets.
    Sample,

    /// Load datasets, apply a filter and print the chart and statistics.
    Chart {
        #[command(flatten)]
        load: LoadArgs,

        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Load datasets, apply a filter and save the filtered data as CSV.
    Export {
        #[command(flatten)]
        load: LoadArgs,

        #[command(flatten)]
        filter: FilterArgs,

        /// Directory the CSV file is written to.
        #[arg(long, default_value = ".")]
        out: PathBuf,
    },
}

/// Datasets to load before charting. A session only charts what it loaded.
#[derive(Args, Debug)]
pub struct LoadArgs {
    /// Prices CSV to upload first.
    #[arg(long)]
    pub prices: Option<PathBuf>,

    /// Returns CSV to upload first.
    #[arg(long)]
    pub returns: Option<PathBuf>,

    /// Load the sample datasets first.
    #[arg(long)]
    pub sample: bool,
}

#[derive(Args, Debug)]
pub struct FilterArgs {
    #[arg(long, default_value = "prices")]
    pub data_type: DataType,

    #[arg(long, default_value = "line")]
    pub chart_type: ChartType,

    /// First date to include (YYYY-MM-DD).
    #[arg(long)]
    pub start: Option<NaiveDate>,

    /// Last date to include (YYYY-MM-DD).
    #[arg(long)]
    pub end: Option<NaiveDate>,

    /// Funds to include, e.g. `G,C,I`. Defaults to all five.
    #[arg(long, value_delimiter = ',')]
    pub funds: Vec<FundId>,
}

impl AppConfig {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }
}
