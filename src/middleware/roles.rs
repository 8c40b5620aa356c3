// src/middleware/roles.rs
//
// Guarda de papel por extractor: colocar `RequireRole<RoleAdmin>` na
// assinatura do handler já barra quem não tem o papel mínimo.

use axum::{extract::FromRequestParts, http::request::Parts};
use std::marker::PhantomData;

use crate::{
    common::error::AppError,
    models::auth::{User, UserRole},
};

/// O trait que define o requisito de papel.
pub trait RoleDef: Send + Sync + 'static {
    fn allows(role: UserRole) -> bool;
}

/// O extractor (guardião). Depende do auth_middleware já ter colocado o
/// usuário nas extensions.
pub struct RequireRole<T>(pub PhantomData<T>);

impl<T, S> FromRequestParts<S> for RequireRole<T>
where
    T: RoleDef,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let user = parts.extensions.get::<User>().ok_or(AppError::InvalidToken)?;

        if !T::allows(user.role) {
            return Err(AppError::InsufficientRole);
        }

        Ok(RequireRole(PhantomData))
    }
}

// ---
// DEFINIÇÃO DOS REQUISITOS DE PAPEL
// ---

/// Somente admin.
pub struct RoleAdmin;
impl RoleDef for RoleAdmin {
    fn allows(role: UserRole) -> bool {
        matches!(role, UserRole::Admin)
    }
}

/// Admin ou gerente.
pub struct RoleManager;
impl RoleDef for RoleManager {
    fn allows(role: UserRole) -> bool {
        matches!(role, UserRole::Admin | UserRole::Manager)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_guard_only_allows_admin() {
        assert!(RoleAdmin::allows(UserRole::Admin));
        assert!(!RoleAdmin::allows(UserRole::Manager));
        assert!(!RoleAdmin::allows(UserRole::Cashier));
    }

    #[test]
    fn manager_guard_allows_admin_and_manager() {
        assert!(RoleManager::allows(UserRole::Admin));
        assert!(RoleManager::allows(UserRole::Manager));
        assert!(!RoleManager::allows(UserRole::Cashier));
    }
}
