// src/services/catalog_service.rs
//
// Orquestra o CRUD do catálogo. A regra de negócio aqui é pouca: validação
// dos payloads e a flag de estoque baixo na listagem de produtos.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::{CatalogRepository, ProductRepository},
    models::catalog::{
        Category, CategoryPayload, Consumer, ConsumerPayload, Product, ProductPayload,
        ProductWithAlert, Supplier, SupplierPayload,
    },
};

#[derive(Clone)]
pub struct CatalogService {
    product_repo: ProductRepository,
    catalog_repo: CatalogRepository,
    pool: PgPool,
}

impl CatalogService {
    pub fn new(product_repo: ProductRepository, catalog_repo: CatalogRepository, pool: PgPool) -> Self {
        Self {
            product_repo,
            catalog_repo,
            pool,
        }
    }

    // --- Produtos ---

    fn check_product(payload: &ProductPayload) -> Result<(), AppError> {
        payload.validate()?;
        // O derive do validator não alcança Decimal; o preço é conferido aqui.
        if payload.price < Decimal::ZERO {
            return Err(AppError::InvalidInput(
                "O preço não pode ser negativo.".into(),
            ));
        }
        Ok(())
    }

    pub async fn list_products(&self) -> Result<Vec<ProductWithAlert>, AppError> {
        let products = self.product_repo.list_all().await?;
        Ok(products.into_iter().map(ProductWithAlert::from).collect())
    }

    pub async fn get_product(&self, id: Uuid) -> Result<Product, AppError> {
        self.product_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Produto".into()))
    }

    pub async fn create_product(&self, payload: ProductPayload) -> Result<Product, AppError> {
        Self::check_product(&payload)?;
        self.product_repo
            .create(
                &self.pool,
                &payload.name,
                payload.description.as_deref(),
                payload.price,
                payload.stock,
                payload.min_stock,
                &payload.sku,
                payload.category_id,
                payload.supplier_id,
                payload.image_url.as_deref(),
            )
            .await
    }

    pub async fn update_product(&self, id: Uuid, payload: ProductPayload) -> Result<Product, AppError> {
        Self::check_product(&payload)?;
        self.product_repo
            .update(
                &self.pool,
                id,
                &payload.name,
                payload.description.as_deref(),
                payload.price,
                payload.stock,
                payload.min_stock,
                &payload.sku,
                payload.category_id,
                payload.supplier_id,
                payload.image_url.as_deref(),
            )
            .await
    }

    pub async fn delete_product(&self, id: Uuid) -> Result<(), AppError> {
        self.product_repo.delete(&self.pool, id).await
    }

    // --- Categorias ---

    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        self.catalog_repo.list_categories().await
    }

    pub async fn get_category(&self, id: Uuid) -> Result<Category, AppError> {
        self.catalog_repo
            .find_category(id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Categoria".into()))
    }

    pub async fn create_category(&self, payload: CategoryPayload) -> Result<Category, AppError> {
        payload.validate()?;
        self.catalog_repo
            .create_category(&self.pool, &payload.name, payload.description.as_deref())
            .await
    }

    pub async fn update_category(&self, id: Uuid, payload: CategoryPayload) -> Result<Category, AppError> {
        payload.validate()?;
        self.catalog_repo
            .update_category(&self.pool, id, &payload.name, payload.description.as_deref())
            .await
    }

    pub async fn delete_category(&self, id: Uuid) -> Result<(), AppError> {
        self.catalog_repo.delete_category(&self.pool, id).await
    }

    // --- Fornecedores ---

    pub async fn list_suppliers(&self) -> Result<Vec<Supplier>, AppError> {
        self.catalog_repo.list_suppliers().await
    }

    pub async fn get_supplier(&self, id: Uuid) -> Result<Supplier, AppError> {
        self.catalog_repo
            .find_supplier(id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Fornecedor".into()))
    }

    pub async fn create_supplier(&self, payload: SupplierPayload) -> Result<Supplier, AppError> {
        payload.validate()?;
        self.catalog_repo
            .create_supplier(
                &self.pool,
                &payload.name,
                payload.cnpj.as_deref(),
                payload.email.as_deref(),
                payload.phone.as_deref(),
                payload.address.as_deref(),
            )
            .await
    }

    pub async fn update_supplier(&self, id: Uuid, payload: SupplierPayload) -> Result<Supplier, AppError> {
        payload.validate()?;
        self.catalog_repo
            .update_supplier(
                &self.pool,
                id,
                &payload.name,
                payload.cnpj.as_deref(),
                payload.email.as_deref(),
                payload.phone.as_deref(),
                payload.address.as_deref(),
            )
            .await
    }

    pub async fn delete_supplier(&self, id: Uuid) -> Result<(), AppError> {
        self.catalog_repo.delete_supplier(&self.pool, id).await
    }

    // --- Clientes ---

    pub async fn list_consumers(&self) -> Result<Vec<Consumer>, AppError> {
        self.catalog_repo.list_consumers().await
    }

    pub async fn get_consumer(&self, id: Uuid) -> Result<Consumer, AppError> {
        self.catalog_repo
            .find_consumer(id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Cliente".into()))
    }

    pub async fn create_consumer(&self, payload: ConsumerPayload) -> Result<Consumer, AppError> {
        payload.validate()?;
        self.catalog_repo
            .create_consumer(
                &self.pool,
                &payload.name,
                payload.cpf.as_deref(),
                payload.email.as_deref(),
                payload.phone.as_deref(),
            )
            .await
    }

    pub async fn update_consumer(&self, id: Uuid, payload: ConsumerPayload) -> Result<Consumer, AppError> {
        payload.validate()?;
        self.catalog_repo
            .update_consumer(
                &self.pool,
                id,
                &payload.name,
                payload.cpf.as_deref(),
                payload.email.as_deref(),
                payload.phone.as_deref(),
            )
            .await
    }

    pub async fn delete_consumer(&self, id: Uuid) -> Result<(), AppError> {
        self.catalog_repo.delete_consumer(&self.pool, id).await
    }
}
