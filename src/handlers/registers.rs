// src/handlers/registers.rs

use axum::{extract::State, http::StatusCode, Json};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::register::{
        CloseRegisterPayload, CloseRegisterResponse, OpenRegisterPayload, Register,
        RegisterDashboard, Withdrawal, WithdrawalPayload,
    },
};

#[utoipa::path(
    post,
    path = "/api/register/open",
    tag = "Register",
    security(("api_jwt" = [])),
    request_body = OpenRegisterPayload,
    responses(
        (status = 201, description = "Caixa aberto", body = Register),
        (status = 403, description = "Caixa (papel) sem token de gerente"),
        (status = 409, description = "Operador já tem caixa aberto")
    )
)]
pub async fn open(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<OpenRegisterPayload>,
) -> Result<(StatusCode, Json<Register>), AppError> {
    let register = app_state.register_service.open(&user, payload).await?;
    Ok((StatusCode::CREATED, Json(register)))
}

#[utoipa::path(
    get,
    path = "/api/register/current",
    tag = "Register",
    security(("api_jwt" = [])),
    responses(
        (status = 200, description = "Caixa aberto do operador", body = Register),
        (status = 404, description = "Nenhum caixa aberto")
    )
)]
pub async fn current(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Register>, AppError> {
    Ok(Json(app_state.register_service.current(&user).await?))
}

#[utoipa::path(
    get,
    path = "/api/register/dashboard",
    tag = "Register",
    security(("api_jwt" = [])),
    responses((status = 200, description = "Painel do caixa", body = RegisterDashboard))
)]
pub async fn dashboard(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<RegisterDashboard>, AppError> {
    Ok(Json(app_state.register_service.dashboard(&user).await?))
}

#[utoipa::path(
    post,
    path = "/api/register/withdrawal",
    tag = "Register",
    security(("api_jwt" = [])),
    request_body = WithdrawalPayload,
    responses(
        (status = 201, description = "Sangria registrada", body = Withdrawal),
        (status = 403, description = "Token de gerente ausente ou inválido")
    )
)]
pub async fn withdrawal(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<WithdrawalPayload>,
) -> Result<(StatusCode, Json<Withdrawal>), AppError> {
    let withdrawal = app_state.register_service.withdrawal(&user, payload).await?;
    Ok((StatusCode::CREATED, Json(withdrawal)))
}

#[utoipa::path(
    post,
    path = "/api/register/close",
    tag = "Register",
    security(("api_jwt" = [])),
    request_body = CloseRegisterPayload,
    responses(
        (status = 200, description = "Caixa fechado com reconciliação", body = CloseRegisterResponse),
        (status = 403, description = "Token de gerente ausente ou inválido"),
        (status = 409, description = "Caixa já fechado")
    )
)]
pub async fn close(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
    Json(payload): Json<CloseRegisterPayload>,
) -> Result<Json<CloseRegisterResponse>, AppError> {
    Ok(Json(app_state.register_service.close(&user, payload).await?))
}

#[utoipa::path(
    get,
    path = "/api/register/history",
    tag = "Register",
    security(("api_jwt" = [])),
    responses((status = 200, description = "Caixas fechados, do mais recente", body = [Register]))
)]
pub async fn history(
    State(app_state): State<AppState>,
    AuthenticatedUser(user): AuthenticatedUser,
) -> Result<Json<Vec<Register>>, AppError> {
    Ok(Json(app_state.register_service.history(&user).await?))
}
