pub mod chart;
pub mod dataset;
pub mod filter;
pub mod fund;
pub mod notification;
pub mod settings;
pub mod state;
pub mod statistics;
pub mod view;
