// src/handlers/users.rs
//
// Gestão de usuários (admin) e o endpoint de autorização de gerente.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::roles::{RequireRole, RoleAdmin},
    models::auth::{
        CreateUserPayload, ManagerAuthPayload, ManagerAuthResponse, UpdateUserPayload, User,
    },
    services::auth::ELEVATED_TTL_SECONDS,
};

/// Portão de gerente: troca credenciais de admin/gerente por um token curto
/// amarrado a uma única ação sensível.
#[utoipa::path(
    post,
    path = "/api/users/authenticate-manager",
    tag = "Users",
    security(("api_jwt" = [])),
    request_body = ManagerAuthPayload,
    responses(
        (status = 200, description = "Token elevado emitido", body = ManagerAuthResponse),
        (status = 401, description = "Credenciais inválidas"),
        (status = 403, description = "A conta não tem alçada de gerente")
    )
)]
pub async fn authenticate_manager(
    State(app_state): State<AppState>,
    Json(payload): Json<ManagerAuthPayload>,
) -> Result<Json<ManagerAuthResponse>, AppError> {
    payload.validate()?;

    let token = app_state
        .auth_service
        .authenticate_manager(&payload.email, &payload.password, &payload.action)
        .await?;

    Ok(Json(ManagerAuthResponse {
        token,
        expires_in: ELEVATED_TTL_SECONDS,
    }))
}

#[utoipa::path(
    get,
    path = "/api/users",
    tag = "Users",
    security(("api_jwt" = [])),
    responses((status = 200, description = "Lista de usuários", body = [User]))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    _guard: RequireRole<RoleAdmin>,
) -> Result<Json<Vec<User>>, AppError> {
    Ok(Json(app_state.auth_service.list_users().await?))
}

#[utoipa::path(
    post,
    path = "/api/users",
    tag = "Users",
    security(("api_jwt" = [])),
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "Usuário criado", body = User),
        (status = 409, description = "E-mail já em uso")
    )
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    _guard: RequireRole<RoleAdmin>,
    Json(payload): Json<CreateUserPayload>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let user = app_state.auth_service.create_user(payload).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

#[utoipa::path(
    get,
    path = "/api/users/{id}",
    tag = "Users",
    security(("api_jwt" = [])),
    responses(
        (status = 200, description = "Usuário encontrado", body = User),
        (status = 404, description = "Usuário não encontrado")
    )
)]
pub async fn get_user(
    State(app_state): State<AppState>,
    _guard: RequireRole<RoleAdmin>,
    Path(id): Path<Uuid>,
) -> Result<Json<User>, AppError> {
    Ok(Json(app_state.auth_service.get_user(id).await?))
}

#[utoipa::path(
    put,
    path = "/api/users/{id}",
    tag = "Users",
    security(("api_jwt" = [])),
    request_body = UpdateUserPayload,
    responses(
        (status = 200, description = "Usuário atualizado", body = User),
        (status = 404, description = "Usuário não encontrado")
    )
)]
pub async fn update_user(
    State(app_state): State<AppState>,
    _guard: RequireRole<RoleAdmin>,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateUserPayload>,
) -> Result<Json<User>, AppError> {
    Ok(Json(app_state.auth_service.update_user(id, payload).await?))
}

#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    tag = "Users",
    security(("api_jwt" = [])),
    responses(
        (status = 204, description = "Usuário removido"),
        (status = 404, description = "Usuário não encontrado")
    )
)]
pub async fn delete_user(
    State(app_state): State<AppState>,
    _guard: RequireRole<RoleAdmin>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    app_state.auth_service.delete_user(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
