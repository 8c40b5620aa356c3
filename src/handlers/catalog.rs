// src/handlers/catalog.rs
//
// CRUD do catálogo: produtos, categorias, fornecedores e clientes.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::catalog::{
        Category, CategoryPayload, Consumer, ConsumerPayload, Product, ProductPayload,
        ProductWithAlert, Supplier, SupplierPayload,
    },
};

// --- Produtos ---

#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Catalog",
    security(("api_jwt" = [])),
    responses((status = 200, description = "Produtos com flag de estoque baixo", body = [ProductWithAlert]))
)]
pub async fn list_products(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<ProductWithAlert>>, AppError> {
    Ok(Json(app_state.catalog_service.list_products().await?))
}

#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Catalog",
    security(("api_jwt" = [])),
    request_body = ProductPayload,
    responses(
        (status = 201, description = "Produto criado", body = Product),
        (status = 409, description = "SKU já cadastrado")
    )
)]
pub async fn create_product(
    State(app_state): State<AppState>,
    Json(payload): Json<ProductPayload>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let product = app_state.catalog_service.create_product(payload).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Catalog",
    security(("api_jwt" = [])),
    responses(
        (status = 200, description = "Produto encontrado", body = Product),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn get_product(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Product>, AppError> {
    Ok(Json(app_state.catalog_service.get_product(id).await?))
}

#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Catalog",
    security(("api_jwt" = [])),
    request_body = ProductPayload,
    responses(
        (status = 200, description = "Produto atualizado", body = Product),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn update_product(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ProductPayload>,
) -> Result<Json<Product>, AppError> {
    Ok(Json(app_state.catalog_service.update_product(id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Catalog",
    security(("api_jwt" = [])),
    responses(
        (status = 204, description = "Produto removido"),
        (status = 404, description = "Produto não encontrado")
    )
)]
pub async fn delete_product(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.catalog_service.delete_product(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// --- Categorias ---

#[utoipa::path(
    get,
    path = "/api/categories",
    tag = "Catalog",
    security(("api_jwt" = [])),
    responses((status = 200, description = "Lista de categorias", body = [Category]))
)]
pub async fn list_categories(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Category>>, AppError> {
    Ok(Json(app_state.catalog_service.list_categories().await?))
}

#[utoipa::path(
    post,
    path = "/api/categories",
    tag = "Catalog",
    security(("api_jwt" = [])),
    request_body = CategoryPayload,
    responses(
        (status = 201, description = "Categoria criada", body = Category),
        (status = 409, description = "Nome já cadastrado")
    )
)]
pub async fn create_category(
    State(app_state): State<AppState>,
    Json(payload): Json<CategoryPayload>,
) -> Result<(StatusCode, Json<Category>), AppError> {
    let category = app_state.catalog_service.create_category(payload).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

#[utoipa::path(
    get,
    path = "/api/categories/{id}",
    tag = "Catalog",
    security(("api_jwt" = [])),
    responses(
        (status = 200, description = "Categoria encontrada", body = Category),
        (status = 404, description = "Categoria não encontrada")
    )
)]
pub async fn get_category(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Category>, AppError> {
    Ok(Json(app_state.catalog_service.get_category(id).await?))
}

#[utoipa::path(
    put,
    path = "/api/categories/{id}",
    tag = "Catalog",
    security(("api_jwt" = [])),
    request_body = CategoryPayload,
    responses((status = 200, description = "Categoria atualizada", body = Category))
)]
pub async fn update_category(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CategoryPayload>,
) -> Result<Json<Category>, AppError> {
    Ok(Json(app_state.catalog_service.update_category(id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/categories/{id}",
    tag = "Catalog",
    security(("api_jwt" = [])),
    responses((status = 204, description = "Categoria removida"))
)]
pub async fn delete_category(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.catalog_service.delete_category(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// --- Fornecedores ---

#[utoipa::path(
    get,
    path = "/api/suppliers",
    tag = "Catalog",
    security(("api_jwt" = [])),
    responses((status = 200, description = "Lista de fornecedores", body = [Supplier]))
)]
pub async fn list_suppliers(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Supplier>>, AppError> {
    Ok(Json(app_state.catalog_service.list_suppliers().await?))
}

#[utoipa::path(
    post,
    path = "/api/suppliers",
    tag = "Catalog",
    security(("api_jwt" = [])),
    request_body = SupplierPayload,
    responses((status = 201, description = "Fornecedor criado", body = Supplier))
)]
pub async fn create_supplier(
    State(app_state): State<AppState>,
    Json(payload): Json<SupplierPayload>,
) -> Result<(StatusCode, Json<Supplier>), AppError> {
    let supplier = app_state.catalog_service.create_supplier(payload).await?;
    Ok((StatusCode::CREATED, Json(supplier)))
}

#[utoipa::path(
    get,
    path = "/api/suppliers/{id}",
    tag = "Catalog",
    security(("api_jwt" = [])),
    responses(
        (status = 200, description = "Fornecedor encontrado", body = Supplier),
        (status = 404, description = "Fornecedor não encontrado")
    )
)]
pub async fn get_supplier(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Supplier>, AppError> {
    Ok(Json(app_state.catalog_service.get_supplier(id).await?))
}

#[utoipa::path(
    put,
    path = "/api/suppliers/{id}",
    tag = "Catalog",
    security(("api_jwt" = [])),
    request_body = SupplierPayload,
    responses((status = 200, description = "Fornecedor atualizado", body = Supplier))
)]
pub async fn update_supplier(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<SupplierPayload>,
) -> Result<Json<Supplier>, AppError> {
    Ok(Json(app_state.catalog_service.update_supplier(id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/suppliers/{id}",
    tag = "Catalog",
    security(("api_jwt" = [])),
    responses((status = 204, description = "Fornecedor removido"))
)]
pub async fn delete_supplier(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.catalog_service.delete_supplier(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// --- Clientes ---

#[utoipa::path(
    get,
    path = "/api/consumers",
    tag = "Catalog",
    security(("api_jwt" = [])),
    responses((status = 200, description = "Lista de clientes", body = [Consumer]))
)]
pub async fn list_consumers(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<Consumer>>, AppError> {
    Ok(Json(app_state.catalog_service.list_consumers().await?))
}

#[utoipa::path(
    post,
    path = "/api/consumers",
    tag = "Catalog",
    security(("api_jwt" = [])),
    request_body = ConsumerPayload,
    responses((status = 201, description = "Cliente criado", body = Consumer))
)]
pub async fn create_consumer(
    State(app_state): State<AppState>,
    Json(payload): Json<ConsumerPayload>,
) -> Result<(StatusCode, Json<Consumer>), AppError> {
    let consumer = app_state.catalog_service.create_consumer(payload).await?;
    Ok((StatusCode::CREATED, Json(consumer)))
}

#[utoipa::path(
    get,
    path = "/api/consumers/{id}",
    tag = "Catalog",
    security(("api_jwt" = [])),
    responses(
        (status = 200, description = "Cliente encontrado", body = Consumer),
        (status = 404, description = "Cliente não encontrado")
    )
)]
pub async fn get_consumer(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Consumer>, AppError> {
    Ok(Json(app_state.catalog_service.get_consumer(id).await?))
}

#[utoipa::path(
    put,
    path = "/api/consumers/{id}",
    tag = "Catalog",
    security(("api_jwt" = [])),
    request_body = ConsumerPayload,
    responses((status = 200, description = "Cliente atualizado", body = Consumer))
)]
pub async fn update_consumer(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<ConsumerPayload>,
) -> Result<Json<Consumer>, AppError> {
    Ok(Json(app_state.catalog_service.update_consumer(id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/consumers/{id}",
    tag = "Catalog",
    security(("api_jwt" = [])),
    responses((status = 204, description = "Cliente removido"))
)]
pub async fn delete_consumer(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.catalog_service.delete_consumer(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
