pub mod auth;
pub mod catalog;
pub mod registers;
pub mod reports;
pub mod sales;
pub mod users;
