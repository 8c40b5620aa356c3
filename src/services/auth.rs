// src/services/auth.rs

use bcrypt::{hash, verify};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::{PasswordResetRepository, UserRepository},
    models::auth::{Claims, CreateUserPayload, UpdateUserPayload, User},
};

/// Validade do token de sessão.
const SESSION_TTL_DAYS: i64 = 7;
/// Validade do token elevado de gerente. Curto de propósito: ele libera uma
/// única ação sensível e expira logo em seguida.
pub const ELEVATED_TTL_SECONDS: i64 = 300;
/// Validade do token de redefinição de senha.
const RESET_TTL_HOURS: i64 = 1;

/// Gera um JWT assinado. `scope` presente marca o token como elevado,
/// amarrado a uma única ação.
pub fn create_token(
    secret: &str,
    user_id: Uuid,
    ttl: Duration,
    scope: Option<String>,
) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        exp: (now + ttl).timestamp() as usize,
        iat: now.timestamp() as usize,
        scope,
    };

    Ok(encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )?)
}

pub fn decode_token(secret: &str, token: &str) -> Result<Claims, AppError> {
    let validation = Validation::default();
    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )
    .map_err(|_| AppError::InvalidToken)?;
    Ok(token_data.claims)
}

#[derive(Clone)]
pub struct AuthService {
    user_repo: UserRepository,
    reset_repo: PasswordResetRepository,
    jwt_secret: String,
    pool: PgPool,
}

impl AuthService {
    pub fn new(
        user_repo: UserRepository,
        reset_repo: PasswordResetRepository,
        jwt_secret: String,
        pool: PgPool,
    ) -> Self {
        Self {
            user_repo,
            reset_repo,
            jwt_secret,
            pool,
        }
    }

    async fn hash_password(&self, password: &str) -> Result<String, AppError> {
        let password = password.to_owned();
        // bcrypt é caro: roda fora do executor async.
        let hashed = tokio::task::spawn_blocking(move || hash(&password, bcrypt::DEFAULT_COST))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de hashing: {}", e))??;
        Ok(hashed)
    }

    async fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool, AppError> {
        let password = password.to_owned();
        let password_hash = password_hash.to_owned();
        let ok = tokio::task::spawn_blocking(move || verify(&password, &password_hash))
            .await
            .map_err(|e| anyhow::anyhow!("Falha na task de verificação de senha: {}", e))??;
        Ok(ok)
    }

    async fn check_credentials(&self, email: &str, password: &str) -> Result<User, AppError> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !self.verify_password(password, &user.password_hash).await? {
            return Err(AppError::InvalidCredentials);
        }
        Ok(user)
    }

    pub async fn login_user(&self, email: &str, password: &str) -> Result<(String, User), AppError> {
        let user = self.check_credentials(email, password).await?;
        let token = create_token(
            &self.jwt_secret,
            user.id,
            Duration::days(SESSION_TTL_DAYS),
            None,
        )?;
        Ok((token, user))
    }

    /// Valida um token de sessão. Tokens elevados não servem como sessão.
    pub async fn validate_token(&self, token: &str) -> Result<User, AppError> {
        let claims = decode_token(&self.jwt_secret, token)?;
        if claims.scope.is_some() {
            return Err(AppError::InvalidToken);
        }

        self.user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    /// Portão de autorização de gerente: valida credenciais de um
    /// admin/gerente e emite um token curto amarrado à ação pedida.
    /// Credencial errada ou conta sem alçada bloqueia a ação original inteira.
    pub async fn authenticate_manager(
        &self,
        email: &str,
        password: &str,
        action: &str,
    ) -> Result<String, AppError> {
        let manager = self.check_credentials(email, password).await?;

        if !manager.role.can_authorize() {
            return Err(AppError::InsufficientRole);
        }

        tracing::info!(
            manager = %manager.email,
            action = %action,
            "Autorização de gerente concedida"
        );

        create_token(
            &self.jwt_secret,
            manager.id,
            Duration::seconds(ELEVATED_TTL_SECONDS),
            Some(action.to_string()),
        )
    }

    /// Consome um token elevado, conferindo que o escopo bate com a ação.
    /// Retorna o gerente que autorizou, para auditoria (closed_by etc.).
    pub async fn validate_manager_token(
        &self,
        token: &str,
        action: &str,
    ) -> Result<User, AppError> {
        let claims = decode_token(&self.jwt_secret, token)
            .map_err(|_| AppError::ManagerAuthorizationRequired)?;

        if claims.scope.as_deref() != Some(action) {
            return Err(AppError::ManagerAuthorizationRequired);
        }

        let manager = self
            .user_repo
            .find_by_id(claims.sub)
            .await?
            .ok_or(AppError::ManagerAuthorizationRequired)?;

        if !manager.role.can_authorize() {
            return Err(AppError::ManagerAuthorizationRequired);
        }
        Ok(manager)
    }

    // --- Gestão de usuários (somente admin, garantido nos handlers) ---

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.user_repo.list_all().await
    }

    pub async fn get_user(&self, id: Uuid) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::UserNotFound)
    }

    pub async fn create_user(&self, payload: CreateUserPayload) -> Result<User, AppError> {
        payload.validate()?;
        let hashed = self.hash_password(&payload.password).await?;
        self.user_repo
            .create_user(
                &self.pool,
                &payload.name,
                &payload.email,
                &hashed,
                payload.role,
                payload.phone.as_deref(),
                payload.avatar_url.as_deref(),
            )
            .await
    }

    pub async fn update_user(&self, id: Uuid, payload: UpdateUserPayload) -> Result<User, AppError> {
        payload.validate()?;
        self.user_repo
            .update_user(
                &self.pool,
                id,
                &payload.name,
                &payload.email,
                payload.role,
                payload.phone.as_deref(),
                payload.avatar_url.as_deref(),
            )
            .await
    }

    pub async fn delete_user(&self, id: Uuid) -> Result<(), AppError> {
        self.user_repo.delete_user(&self.pool, id).await
    }

    // --- Redefinição de senha ---

    /// Gera o token de redefinição. Responde sucesso mesmo quando o e-mail
    /// não existe, para não vazar contas cadastradas. O envio de e-mail fica
    /// fora deste serviço; o token aparece no log para repasse manual.
    pub async fn request_password_reset(&self, email: &str) -> Result<(), AppError> {
        let Some(user) = self.user_repo.find_by_email(email).await? else {
            tracing::debug!("Pedido de redefinição para e-mail desconhecido");
            return Ok(());
        };

        let token = Uuid::new_v4().to_string();
        let expires_at = Utc::now() + Duration::hours(RESET_TTL_HOURS);

        self.reset_repo
            .create(&self.pool, user.id, &token, expires_at)
            .await?;

        tracing::info!(user = %user.email, token = %token, "Token de redefinição gerado");
        Ok(())
    }

    pub async fn validate_reset_token(&self, token: &str) -> Result<(), AppError> {
        self.reset_repo
            .find_valid(token)
            .await?
            .map(|_| ())
            .ok_or(AppError::InvalidResetToken)
    }

    /// Aplica a nova senha e queima o token, tudo na mesma transação.
    pub async fn reset_password(&self, token: &str, password: &str) -> Result<(), AppError> {
        let reset = self
            .reset_repo
            .find_valid(token)
            .await?
            .ok_or(AppError::InvalidResetToken)?;

        let hashed = self.hash_password(password).await?;

        let mut tx = self.pool.begin().await?;
        self.user_repo
            .update_password(&mut *tx, reset.user_id, &hashed)
            .await?;
        self.reset_repo.mark_used(&mut *tx, reset.id).await?;
        tx.commit().await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::auth::UserRole;

    const SECRET: &str = "segredo-de-teste";

    #[test]
    fn session_token_round_trip() {
        let user_id = Uuid::new_v4();
        let token = create_token(SECRET, user_id, Duration::days(1), None).unwrap();
        let claims = decode_token(SECRET, &token).unwrap();

        assert_eq!(claims.sub, user_id);
        assert!(claims.scope.is_none());
    }

    #[test]
    fn elevated_token_carries_action_scope() {
        let token = create_token(
            SECRET,
            Uuid::new_v4(),
            Duration::seconds(ELEVATED_TTL_SECONDS),
            Some("register:close".to_string()),
        )
        .unwrap();

        let claims = decode_token(SECRET, &token).unwrap();
        assert_eq!(claims.scope.as_deref(), Some("register:close"));
    }

    #[test]
    fn expired_token_is_rejected() {
        // Token emitido com validade negativa já nasce expirado.
        let token = create_token(SECRET, Uuid::new_v4(), Duration::seconds(-120), None).unwrap();
        assert!(matches!(
            decode_token(SECRET, &token),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let token = create_token("outro-segredo", Uuid::new_v4(), Duration::days(1), None).unwrap();
        assert!(matches!(
            decode_token(SECRET, &token),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn only_admin_and_manager_can_authorize() {
        assert!(UserRole::Admin.can_authorize());
        assert!(UserRole::Manager.can_authorize());
        assert!(!UserRole::Cashier.can_authorize());
    }
}
