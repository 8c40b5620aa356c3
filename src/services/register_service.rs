// src/services/register_service.rs
//
// Ciclo de vida do caixa: abertura, painel, sangria e fechamento com
// reconciliação declarado × sistema.

use rust_decimal::Decimal;
use sqlx::PgPool;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::RegisterRepository,
    models::{
        auth::{User, UserRole},
        register::{
            CloseRegisterPayload, CloseRegisterResponse, OpenRegisterPayload, Register,
            RegisterDashboard, RegisterStatus, Withdrawal, WithdrawalPayload,
        },
    },
    services::auth::AuthService,
};

/// Ações sensíveis do caixa, gravadas no escopo do token elevado.
pub const ACTION_OPEN: &str = "register:open";
pub const ACTION_CLOSE: &str = "register:close";
pub const ACTION_WITHDRAWAL: &str = "register:withdrawal";

/// Saldo esperado na gaveta: troco inicial mais vendas, menos sangrias.
pub fn current_balance(initial: Decimal, total_sales: Decimal, withdrawals: Decimal) -> Decimal {
    initial + total_sales - withdrawals
}

/// Diferença da conferência de fechamento. Positiva quer dizer sobra na
/// gaveta; negativa, falta. Nunca bloqueia o fechamento.
pub fn reconciliation_difference(declared: Decimal, system: Decimal) -> Decimal {
    declared - system
}

#[derive(Clone)]
pub struct RegisterService {
    register_repo: RegisterRepository,
    auth_service: AuthService,
    pool: PgPool,
}

impl RegisterService {
    pub fn new(register_repo: RegisterRepository, auth_service: AuthService, pool: PgPool) -> Self {
        Self {
            register_repo,
            auth_service,
            pool,
        }
    }

    /// Abre um caixa para o operador. Caixas (papel `cashier`) precisam da
    /// liberação de um gerente; admin e gerente abrem sozinhos.
    pub async fn open(&self, user: &User, payload: OpenRegisterPayload) -> Result<Register, AppError> {
        payload.validate()?;

        if payload.initial_balance < Decimal::ZERO {
            return Err(AppError::InvalidInput(
                "O saldo inicial não pode ser negativo.".into(),
            ));
        }

        if user.role == UserRole::Cashier {
            let token = payload
                .manager_token
                .as_deref()
                .ok_or(AppError::ManagerAuthorizationRequired)?;
            self.auth_service
                .validate_manager_token(token, ACTION_OPEN)
                .await?;
        }

        let register = self
            .register_repo
            .open(&self.pool, user.id, payload.initial_balance)
            .await?;

        tracing::info!(register = %register.id, operador = %user.email, "Caixa aberto");
        Ok(register)
    }

    /// Fecha o caixa aberto do operador, registrando o que foi declarado e a
    /// diferença frente ao apurado. A diferença é informativa.
    pub async fn close(
        &self,
        user: &User,
        payload: CloseRegisterPayload,
    ) -> Result<CloseRegisterResponse, AppError> {
        payload.validate()?;

        if payload.final_balance < Decimal::ZERO {
            return Err(AppError::InvalidInput(
                "O saldo final não pode ser negativo.".into(),
            ));
        }
        if payload.declared.has_negative() {
            return Err(AppError::InvalidInput(
                "Os valores declarados não podem ser negativos.".into(),
            ));
        }

        let open = self
            .register_repo
            .find_open_by_user(user.id)
            .await?
            .ok_or(AppError::RegisterNotOpen)?;

        let manager = self
            .auth_service
            .validate_manager_token(&payload.manager_token, ACTION_CLOSE)
            .await?;

        let totals = self.register_repo.totals(&self.pool, open.id).await?;
        let total_declarado = payload.declared.total();
        let total_sistema = totals.total_vendas;
        let diferenca = reconciliation_difference(total_declarado, total_sistema);

        let register = self
            .register_repo
            .close(
                &self.pool,
                open.id,
                payload.final_balance,
                payload.declared,
                diferenca,
                manager.id,
                chrono::Utc::now(),
            )
            .await?;

        tracing::info!(
            register = %register.id,
            operador = %user.email,
            diferenca = %diferenca,
            "Caixa fechado"
        );

        Ok(CloseRegisterResponse {
            register,
            total_declarado,
            total_sistema,
            diferenca,
        })
    }

    /// Caixa aberto do operador, se houver.
    pub async fn current(&self, user: &User) -> Result<Register, AppError> {
        self.register_repo
            .find_open_by_user(user.id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Caixa aberto".into()))
    }

    /// Painel do caixa do operador. Com caixa aberto mostra a posição ao
    /// vivo; sem caixa aberto, o resumo do último fechamento.
    pub async fn dashboard(&self, user: &User) -> Result<RegisterDashboard, AppError> {
        if let Some(open) = self.register_repo.find_open_by_user(user.id).await? {
            let totals = self.register_repo.totals(&self.pool, open.id).await?;
            let sangrias = self
                .register_repo
                .sum_withdrawals(&self.pool, open.id)
                .await?;

            return Ok(RegisterDashboard {
                status: RegisterStatus::Open,
                register_id: open.id,
                saldo_inicial: open.initial_balance,
                saldo_atual: current_balance(open.initial_balance, totals.total_vendas, sangrias),
                total_vendas: totals.total_vendas,
                qtd_vendas: totals.qtd_vendas,
                total_sangrias: sangrias,
                vendas_por_forma_pagamento: totals.por_forma,
                opened_at: open.opened_at,
                closed_at: None,
            });
        }

        let last = self
            .register_repo
            .find_last_closed_by_user(user.id)
            .await?
            .ok_or(AppError::RegisterNotOpen)?;

        let totals = self.register_repo.totals(&self.pool, last.id).await?;
        let sangrias = self
            .register_repo
            .sum_withdrawals(&self.pool, last.id)
            .await?;

        Ok(RegisterDashboard {
            status: RegisterStatus::Closed,
            register_id: last.id,
            saldo_inicial: last.initial_balance,
            saldo_atual: last.final_balance.unwrap_or(Decimal::ZERO),
            total_vendas: totals.total_vendas,
            qtd_vendas: totals.qtd_vendas,
            total_sangrias: sangrias,
            vendas_por_forma_pagamento: totals.por_forma,
            opened_at: last.opened_at,
            closed_at: last.closed_at,
        })
    }

    /// Sangria (retirada avulsa de dinheiro da gaveta). Sempre exige a
    /// liberação de um gerente, independente do papel do operador.
    pub async fn withdrawal(
        &self,
        user: &User,
        payload: WithdrawalPayload,
    ) -> Result<Withdrawal, AppError> {
        payload.validate()?;

        if payload.amount <= Decimal::ZERO {
            return Err(AppError::InvalidInput(
                "O valor da sangria deve ser maior que zero.".into(),
            ));
        }

        let open = self
            .register_repo
            .find_open_by_user(user.id)
            .await?
            .ok_or(AppError::RegisterNotOpen)?;

        self.auth_service
            .validate_manager_token(&payload.manager_token, ACTION_WITHDRAWAL)
            .await?;

        let withdrawal = self
            .register_repo
            .insert_withdrawal(
                &self.pool,
                open.id,
                payload.amount,
                payload.reason.as_deref(),
                user.id,
            )
            .await?;

        tracing::info!(
            register = %open.id,
            valor = %payload.amount,
            "Sangria registrada"
        );
        Ok(withdrawal)
    }

    /// Histórico de caixas fechados. Caixas enxergam só os próprios;
    /// admin e gerente enxergam todos.
    pub async fn history(&self, user: &User) -> Result<Vec<Register>, AppError> {
        let filter = match user.role {
            UserRole::Cashier => Some(user.id),
            UserRole::Admin | UserRole::Manager => None,
        };
        self.register_repo.history(filter).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn balance_adds_sales_and_subtracts_withdrawals() {
        assert_eq!(
            current_balance(dec!(100.00), dec!(50.00), Decimal::ZERO),
            dec!(150.00)
        );
        assert_eq!(
            current_balance(dec!(100.00), dec!(80.00), dec!(30.00)),
            dec!(150.00)
        );
    }

    #[test]
    fn difference_is_zero_when_declared_matches_system() {
        assert_eq!(
            reconciliation_difference(dec!(50.00), dec!(50.00)),
            Decimal::ZERO
        );
    }

    #[test]
    fn difference_is_negative_when_drawer_is_short() {
        assert_eq!(
            reconciliation_difference(dec!(45.00), dec!(50.00)),
            dec!(-5.00)
        );
    }

    #[test]
    fn difference_is_positive_when_drawer_has_surplus() {
        assert_eq!(
            reconciliation_difference(dec!(52.50), dec!(50.00)),
            dec!(2.50)
        );
    }
}
