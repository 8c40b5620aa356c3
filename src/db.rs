pub mod user_repo;
pub use user_repo::UserRepository;
pub mod password_reset_repo;
pub use password_reset_repo::PasswordResetRepository;
pub mod product_repo;
pub use product_repo::ProductRepository;
pub mod catalog_repo;
pub use catalog_repo::CatalogRepository;
pub mod register_repo;
pub use register_repo::RegisterRepository;
pub mod sale_repo;
pub use sale_repo::SaleRepository;
pub mod report_repo;
pub use report_repo::ReportRepository;
