// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{
        CatalogRepository, PasswordResetRepository, ProductRepository, RegisterRepository,
        ReportRepository, SaleRepository, UserRepository,
    },
    services::{
        auth::AuthService, catalog_service::CatalogService, export_service::ExportService,
        register_service::RegisterService, report_service::ReportService,
        sale_service::SaleService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub auth_service: AuthService,
    pub catalog_service: CatalogService,
    pub register_service: RegisterService,
    pub sale_service: SaleService,
    pub report_service: ReportService,
    pub export_service: ExportService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL deve ser definida"))?;
        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| anyhow::anyhow!("JWT_SECRET deve ser definido"))?;

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let user_repo = UserRepository::new(db_pool.clone());
        let reset_repo = PasswordResetRepository::new(db_pool.clone());
        let product_repo = ProductRepository::new(db_pool.clone());
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let register_repo = RegisterRepository::new(db_pool.clone());
        let sale_repo = SaleRepository::new(db_pool.clone());
        let report_repo = ReportRepository::new(db_pool.clone());

        let auth_service =
            AuthService::new(user_repo, reset_repo, jwt_secret, db_pool.clone());
        let catalog_service =
            CatalogService::new(product_repo.clone(), catalog_repo, db_pool.clone());
        let register_service = RegisterService::new(
            register_repo.clone(),
            auth_service.clone(),
            db_pool.clone(),
        );
        let sale_service = SaleService::new(
            sale_repo,
            product_repo,
            register_repo,
            auth_service.clone(),
            db_pool.clone(),
        );
        let report_service = ReportService::new(report_repo);
        let export_service = ExportService::new();

        Ok(Self {
            db_pool,
            auth_service,
            catalog_service,
            register_service,
            sale_service,
            report_service,
            export_service,
        })
    }
}
