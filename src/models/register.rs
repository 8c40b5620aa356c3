// src/models/register.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "register_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RegisterStatus {
    Open,
    Closed,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Register {
    pub id: Uuid,
    pub user_id: Uuid,
    pub status: RegisterStatus,
    #[schema(example = "100.00")]
    pub initial_balance: Decimal,
    pub final_balance: Option<Decimal>,
    pub declared_cash: Option<Decimal>,
    pub declared_credit: Option<Decimal>,
    pub declared_debit: Option<Decimal>,
    pub declared_pix: Option<Decimal>,
    pub difference: Option<Decimal>,
    pub opened_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
    pub closed_by: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Withdrawal {
    pub id: Uuid,
    pub register_id: Uuid,
    pub amount: Decimal,
    pub reason: Option<String>,
    pub created_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Totais por forma de pagamento. Serve tanto para o que o operador declara
/// no fechamento quanto para o que o sistema apurou.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaymentTotals {
    #[serde(default)]
    pub cash: Decimal,
    #[serde(default)]
    pub credit: Decimal,
    #[serde(default)]
    pub debit: Decimal,
    #[serde(default)]
    pub pix: Decimal,
}

impl PaymentTotals {
    pub fn total(&self) -> Decimal {
        self.cash + self.credit + self.debit + self.pix
    }

    /// Conferência de fechamento não admite valor negativo em forma alguma.
    pub fn has_negative(&self) -> bool {
        self.cash < Decimal::ZERO
            || self.credit < Decimal::ZERO
            || self.debit < Decimal::ZERO
            || self.pix < Decimal::ZERO
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OpenRegisterPayload {
    #[schema(example = "100.00")]
    pub initial_balance: Decimal,
    /// Obrigatório quando o operador é caixa: token elevado com
    /// action = "register:open".
    pub manager_token: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CloseRegisterPayload {
    pub final_balance: Decimal,
    pub declared: PaymentTotals,
    /// Sempre obrigatório: token elevado com action = "register:close".
    #[validate(length(min = 1, message = "required"))]
    pub manager_token: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WithdrawalPayload {
    pub amount: Decimal,
    pub reason: Option<String>,
    /// Token elevado com action = "register:withdrawal".
    #[validate(length(min = 1, message = "required"))]
    pub manager_token: String,
}

/// Snapshot do caixa atual (ou resumo do último fechado) para o painel.
/// Os nomes dos campos seguem o contrato pt-BR do cliente.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterDashboard {
    pub status: RegisterStatus,
    pub register_id: Uuid,
    #[schema(example = "100.00")]
    pub saldo_inicial: Decimal,
    #[schema(example = "150.00")]
    pub saldo_atual: Decimal,
    pub total_vendas: Decimal,
    pub qtd_vendas: i64,
    pub total_sangrias: Decimal,
    pub vendas_por_forma_pagamento: PaymentTotals,
    pub opened_at: DateTime<Utc>,
    pub closed_at: Option<DateTime<Utc>>,
}

/// Resultado do fechamento, com a reconciliação declarado × sistema.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CloseRegisterResponse {
    #[serde(flatten)]
    pub register: Register,
    pub total_declarado: Decimal,
    pub total_sistema: Decimal,
    /// declarado − sistema. Informativo: nunca bloqueia o fechamento.
    pub diferenca: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn payment_totals_sum_all_methods() {
        let totals = PaymentTotals {
            cash: dec!(10.00),
            credit: dec!(20.00),
            debit: dec!(5.50),
            pix: dec!(4.50),
        };
        assert_eq!(totals.total(), dec!(40.00));
    }

    #[test]
    fn negative_declared_value_is_flagged() {
        let totals = PaymentTotals {
            cash: dec!(10.00),
            credit: dec!(-0.01),
            ..PaymentTotals::default()
        };
        assert!(totals.has_negative());
        assert!(!PaymentTotals::default().has_negative());
    }

    #[test]
    fn declared_totals_default_to_zero() {
        // Formas omitidas no JSON de fechamento entram como zero.
        let totals: PaymentTotals = serde_json::from_str(r#"{"cash": 12.0}"#).unwrap();
        assert_eq!(totals.cash, dec!(12.00));
        assert_eq!(totals.total(), dec!(12.00));
    }
}
