use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Tipo de erro central da aplicação. Cada variante conhece seu status HTTP.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("E-mail ou senha inválidos")]
    InvalidCredentials,

    #[error("Token de autenticação inválido ou ausente")]
    InvalidToken,

    #[error("Autorização de gerente necessária")]
    ManagerAuthorizationRequired,

    #[error("Permissão insuficiente")]
    InsufficientRole,

    #[error("Usuário não encontrado")]
    UserNotFound,

    #[error("{0} não encontrado")]
    ResourceNotFound(String),

    #[error("Este e-mail já está em uso")]
    EmailAlreadyExists,

    #[error("Já existe um produto com este SKU")]
    SkuAlreadyExists,

    #[error("Já existe uma categoria com este nome")]
    CategoryNameAlreadyExists,

    #[error("Já existe um caixa aberto para este operador")]
    RegisterAlreadyOpen,

    #[error("Nenhum caixa aberto para este operador")]
    RegisterNotOpen,

    #[error("Caixa já está fechado")]
    RegisterAlreadyClosed,

    #[error("Venda já está cancelada")]
    SaleAlreadyCancelled,

    #[error("Estoque insuficiente para o produto '{0}'")]
    InsufficientStock(String),

    #[error("Token de redefinição inválido ou expirado")]
    InvalidResetToken,

    #[error("{0}")]
    InvalidInput(String),

    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Validação retorna todos os detalhes por campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::InvalidCredentials | AppError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, self.to_string())
            }

            AppError::ManagerAuthorizationRequired | AppError::InsufficientRole => {
                (StatusCode::FORBIDDEN, self.to_string())
            }

            AppError::UserNotFound
            | AppError::ResourceNotFound(_)
            | AppError::InvalidResetToken => (StatusCode::NOT_FOUND, self.to_string()),

            AppError::EmailAlreadyExists
            | AppError::SkuAlreadyExists
            | AppError::CategoryNameAlreadyExists
            | AppError::RegisterAlreadyOpen
            | AppError::RegisterAlreadyClosed
            | AppError::SaleAlreadyCancelled => (StatusCode::CONFLICT, self.to_string()),

            AppError::RegisterNotOpen
            | AppError::InsufficientStock(_)
            | AppError::InvalidInput(_) => (StatusCode::BAD_REQUEST, self.to_string()),

            // DatabaseError, InternalServerError etc. viram 500 genérico.
            // O detalhe fica apenas no log.
            ref e => {
                tracing::error!("Erro interno do servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
