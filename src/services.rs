pub mod auth;
pub mod catalog_service;
pub mod export_service;
pub mod register_service;
pub mod report_service;
pub mod sale_service;
