pub mod chart_service;
pub mod data_info_service;
pub mod export_service;
pub mod loading_service;
pub mod notification_service;
pub mod request_generation;
pub mod statistics_service;
pub mod upload_service;
