// src/handlers/auth.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::json;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedUser,
    models::auth::{
        AuthResponse, LoginPayload, RequestResetPayload, ResetPasswordPayload, User,
    },
};

// Handler de login
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = "Auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Login bem-sucedido", body = AuthResponse),
        (status = 401, description = "Credenciais inválidas")
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<AuthResponse>, AppError> {
    payload.validate()?;

    let (token, user) = app_state
        .auth_service
        .login_user(&payload.email, &payload.password)
        .await?;

    Ok(Json(AuthResponse { token, user }))
}

// Handler da rota protegida /me
#[utoipa::path(
    get,
    path = "/api/users/me",
    tag = "Users",
    security(("api_jwt" = [])),
    responses((status = 200, description = "Usuário autenticado", body = User))
)]
pub async fn get_me(AuthenticatedUser(user): AuthenticatedUser) -> Json<User> {
    Json(user)
}

// --- Redefinição de senha ---

#[utoipa::path(
    post,
    path = "/api/password-reset/request",
    tag = "Auth",
    request_body = RequestResetPayload,
    responses((status = 204, description = "Sempre 204, exista ou não o e-mail"))
)]
pub async fn request_reset(
    State(app_state): State<AppState>,
    Json(payload): Json<RequestResetPayload>,
) -> Result<StatusCode, AppError> {
    payload.validate()?;
    app_state
        .auth_service
        .request_password_reset(&payload.email)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/api/password-reset/validate/{token}",
    tag = "Auth",
    responses(
        (status = 200, description = "Token válido"),
        (status = 404, description = "Token inválido, usado ou expirado")
    )
)]
pub async fn validate_reset(
    State(app_state): State<AppState>,
    Path(token): Path<String>,
) -> Result<Json<serde_json::Value>, AppError> {
    app_state.auth_service.validate_reset_token(&token).await?;
    Ok(Json(json!({ "valid": true })))
}

#[utoipa::path(
    post,
    path = "/api/password-reset/reset",
    tag = "Auth",
    request_body = ResetPasswordPayload,
    responses(
        (status = 204, description = "Senha redefinida"),
        (status = 404, description = "Token inválido, usado ou expirado")
    )
)]
pub async fn reset_password(
    State(app_state): State<AppState>,
    Json(payload): Json<ResetPasswordPayload>,
) -> Result<StatusCode, AppError> {
    payload.validate()?;
    app_state
        .auth_service
        .reset_password(&payload.token, &payload.password)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
