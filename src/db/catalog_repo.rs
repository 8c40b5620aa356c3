// src/db/catalog_repo.rs
//
// Entidades de apoio do catálogo: categorias, fornecedores e clientes.
// CRUD simples, sem ciclo de vida próprio.

use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::catalog::{Category, Consumer, Supplier},
};

#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // --- Categorias ---

    pub async fn list_categories(&self) -> Result<Vec<Category>, AppError> {
        let rows = sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_category(&self, id: Uuid) -> Result<Option<Category>, AppError> {
        let row = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn create_category<'e, E>(
        &self,
        executor: E,
        name: &str,
        description: Option<&str>,
    ) -> Result<Category, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categories (name, description) VALUES ($1, $2) RETURNING *",
        )
        .bind(name)
        .bind(description)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::CategoryNameAlreadyExists;
                }
            }
            e.into()
        })
    }

    pub async fn update_category<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: &str,
        description: Option<&str>,
    ) -> Result<Category, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Category>(
            "UPDATE categories SET name = $2, description = $3 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .fetch_optional(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::CategoryNameAlreadyExists;
                }
            }
            AppError::from(e)
        })?
        .ok_or_else(|| AppError::ResourceNotFound("Categoria".into()))
    }

    pub async fn delete_category<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::ResourceNotFound("Categoria".into()));
        }
        Ok(())
    }

    // --- Fornecedores ---

    pub async fn list_suppliers(&self) -> Result<Vec<Supplier>, AppError> {
        let rows = sqlx::query_as::<_, Supplier>("SELECT * FROM suppliers ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_supplier(&self, id: Uuid) -> Result<Option<Supplier>, AppError> {
        let row = sqlx::query_as::<_, Supplier>("SELECT * FROM suppliers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn create_supplier<'e, E>(
        &self,
        executor: E,
        name: &str,
        cnpj: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> Result<Supplier, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, Supplier>(
            r#"
            INSERT INTO suppliers (name, cnpj, email, phone, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(cnpj)
        .bind(email)
        .bind(phone)
        .bind(address)
        .fetch_one(executor)
        .await?;
        Ok(row)
    }

    pub async fn update_supplier<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: &str,
        cnpj: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
        address: Option<&str>,
    ) -> Result<Supplier, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Supplier>(
            r#"
            UPDATE suppliers
            SET name = $2, cnpj = $3, email = $4, phone = $5, address = $6
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(cnpj)
        .bind(email)
        .bind(phone)
        .bind(address)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| AppError::ResourceNotFound("Fornecedor".into()))
    }

    pub async fn delete_supplier<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM suppliers WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::ResourceNotFound("Fornecedor".into()));
        }
        Ok(())
    }

    // --- Clientes ---

    pub async fn list_consumers(&self) -> Result<Vec<Consumer>, AppError> {
        let rows = sqlx::query_as::<_, Consumer>("SELECT * FROM consumers ORDER BY name ASC")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    pub async fn find_consumer(&self, id: Uuid) -> Result<Option<Consumer>, AppError> {
        let row = sqlx::query_as::<_, Consumer>("SELECT * FROM consumers WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn create_consumer<'e, E>(
        &self,
        executor: E,
        name: &str,
        cpf: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Consumer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let row = sqlx::query_as::<_, Consumer>(
            r#"
            INSERT INTO consumers (name, cpf, email, phone)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(cpf)
        .bind(email)
        .bind(phone)
        .fetch_one(executor)
        .await?;
        Ok(row)
    }

    pub async fn update_consumer<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        name: &str,
        cpf: Option<&str>,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Consumer, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Consumer>(
            r#"
            UPDATE consumers
            SET name = $2, cpf = $3, email = $4, phone = $5
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(cpf)
        .bind(email)
        .bind(phone)
        .fetch_optional(executor)
        .await?
        .ok_or_else(|| AppError::ResourceNotFound("Cliente".into()))
    }

    pub async fn delete_consumer<'e, E>(&self, executor: E, id: Uuid) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let result = sqlx::query("DELETE FROM consumers WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::ResourceNotFound("Cliente".into()));
        }
        Ok(())
    }
}
