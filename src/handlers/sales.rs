// src/handlers/sales.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::sale::{CancelSalePayload, CreateSalePayload, Sale, SaleDetail, SaleListQuery},
};

#[utoipa::path(
    post,
    path = "/api/sales",
    tag = "Sales",
    security(("api_jwt" = [])),
    request_body = CreateSalePayload,
    responses(
        (status = 201, description = "Venda registrada", body = SaleDetail),
        (status = 400, description = "Sem caixa aberto ou estoque insuficiente")
    )
)]
pub async fn create(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CreateSalePayload>,
) -> Result<(StatusCode, Json<SaleDetail>), AppError> {
    let detail = app_state.sale_service.create(&user, payload).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

#[utoipa::path(
    put,
    path = "/api/sales/{id}/cancel",
    tag = "Sales",
    security(("api_jwt" = [])),
    request_body = CancelSalePayload,
    responses(
        (status = 200, description = "Venda cancelada, estoque devolvido", body = SaleDetail),
        (status = 403, description = "Token de gerente ausente ou inválido"),
        (status = 409, description = "Venda já cancelada")
    )
)]
pub async fn cancel(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(payload): Json<CancelSalePayload>,
) -> Result<Json<SaleDetail>, AppError> {
    Ok(Json(app_state.sale_service.cancel(id, payload).await?))
}

#[utoipa::path(
    get,
    path = "/api/sales",
    tag = "Sales",
    security(("api_jwt" = [])),
    params(
        ("from" = Option<String>, Query, description = "Data inicial (AAAA-MM-DD)"),
        ("to" = Option<String>, Query, description = "Data final (AAAA-MM-DD)")
    ),
    responses((status = 200, description = "Vendas do período", body = [Sale]))
)]
pub async fn list(
    State(app_state): State<AppState>,
    Query(query): Query<SaleListQuery>,
) -> Result<Json<Vec<Sale>>, AppError> {
    Ok(Json(app_state.sale_service.list(query.from, query.to).await?))
}

#[utoipa::path(
    get,
    path = "/api/sales/{id}",
    tag = "Sales",
    security(("api_jwt" = [])),
    responses(
        (status = 200, description = "Venda com itens", body = SaleDetail),
        (status = 404, description = "Venda não encontrada")
    )
)]
pub async fn detail(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SaleDetail>, AppError> {
    Ok(Json(app_state.sale_service.detail(id).await?))
}
