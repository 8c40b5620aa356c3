pub mod auth;
pub mod catalog;
pub mod register;
pub mod report;
pub mod sale;
