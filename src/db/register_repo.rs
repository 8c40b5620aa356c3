// src/db/register_repo.rs

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{Acquire, Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        register::{PaymentTotals, Register, Withdrawal},
        sale::PaymentMethod,
    },
};

/// Linha auxiliar da agregação por forma de pagamento.
#[derive(sqlx::FromRow)]
struct MethodTotalRow {
    payment_method: PaymentMethod,
    total: Option<Decimal>,
}

/// Totais apurados pelo sistema para um caixa: soma e contagem das vendas
/// concluídas, quebradas por forma de pagamento.
#[derive(Debug, Clone, Default)]
pub struct RegisterTotals {
    pub total_vendas: Decimal,
    pub qtd_vendas: i64,
    pub por_forma: PaymentTotals,
}

#[derive(Clone)]
pub struct RegisterRepository {
    pool: PgPool,
}

impl RegisterRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_open_by_user(&self, user_id: Uuid) -> Result<Option<Register>, AppError> {
        let register = sqlx::query_as::<_, Register>(
            "SELECT * FROM registers WHERE user_id = $1 AND status = 'open'",
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(register)
    }

    pub async fn find_last_closed_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<Register>, AppError> {
        let register = sqlx::query_as::<_, Register>(
            r#"
            SELECT * FROM registers
            WHERE user_id = $1 AND status = 'closed'
            ORDER BY closed_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(register)
    }

    pub async fn open<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        initial_balance: Decimal,
    ) -> Result<Register, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Register>(
            r#"
            INSERT INTO registers (user_id, initial_balance)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(initial_balance)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            // O índice parcial garante um único caixa aberto por operador.
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::RegisterAlreadyOpen;
                }
            }
            e.into()
        })
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn close<'e, E>(
        &self,
        executor: E,
        id: Uuid,
        final_balance: Decimal,
        declared: PaymentTotals,
        difference: Decimal,
        closed_by: Uuid,
        closed_at: DateTime<Utc>,
    ) -> Result<Register, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Register>(
            r#"
            UPDATE registers
            SET status = 'closed',
                final_balance = $2,
                declared_cash = $3,
                declared_credit = $4,
                declared_debit = $5,
                declared_pix = $6,
                difference = $7,
                closed_by = $8,
                closed_at = $9
            WHERE id = $1 AND status = 'open'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(final_balance)
        .bind(declared.cash)
        .bind(declared.credit)
        .bind(declared.debit)
        .bind(declared.pix)
        .bind(difference)
        .bind(closed_by)
        .bind(closed_at)
        .fetch_optional(executor)
        .await?
        .ok_or(AppError::RegisterAlreadyClosed)
    }

    pub async fn history(&self, user_id: Option<Uuid>) -> Result<Vec<Register>, AppError> {
        let registers = match user_id {
            Some(uid) => {
                sqlx::query_as::<_, Register>(
                    r#"
                    SELECT * FROM registers
                    WHERE status = 'closed' AND user_id = $1
                    ORDER BY closed_at DESC
                    "#,
                )
                .bind(uid)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, Register>(
                    "SELECT * FROM registers WHERE status = 'closed' ORDER BY closed_at DESC",
                )
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(registers)
    }

    /// Totais das vendas concluídas do caixa, por forma de pagamento.
    /// Aceita tanto a pool quanto uma transação em andamento.
    pub async fn totals<'e, A>(
        &self,
        executor: A,
        register_id: Uuid,
    ) -> Result<RegisterTotals, AppError>
    where
        A: Acquire<'e, Database = Postgres>,
    {
        let mut conn = executor.acquire().await?;

        let rows = sqlx::query_as::<_, MethodTotalRow>(
            r#"
            SELECT payment_method, SUM(total) AS total
            FROM sales
            WHERE register_id = $1 AND status = 'completed'
            GROUP BY payment_method
            "#,
        )
        .bind(register_id)
        .fetch_all(&mut *conn)
        .await?;

        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM sales WHERE register_id = $1 AND status = 'completed'",
        )
        .bind(register_id)
        .fetch_one(&mut *conn)
        .await?;

        let mut por_forma = PaymentTotals::default();
        for row in rows {
            let value = row.total.unwrap_or(Decimal::ZERO);
            match row.payment_method {
                PaymentMethod::Cash => por_forma.cash = value,
                PaymentMethod::Credit => por_forma.credit = value,
                PaymentMethod::Debit => por_forma.debit = value,
                PaymentMethod::Pix => por_forma.pix = value,
            }
        }

        Ok(RegisterTotals {
            total_vendas: por_forma.total(),
            qtd_vendas: count,
            por_forma,
        })
    }

    // --- Sangrias ---

    pub async fn insert_withdrawal<'e, E>(
        &self,
        executor: E,
        register_id: Uuid,
        amount: Decimal,
        reason: Option<&str>,
        created_by: Uuid,
    ) -> Result<Withdrawal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let withdrawal = sqlx::query_as::<_, Withdrawal>(
            r#"
            INSERT INTO register_withdrawals (register_id, amount, reason, created_by)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(register_id)
        .bind(amount)
        .bind(reason)
        .bind(created_by)
        .fetch_one(executor)
        .await?;
        Ok(withdrawal)
    }

    pub async fn sum_withdrawals<'e, E>(
        &self,
        executor: E,
        register_id: Uuid,
    ) -> Result<Decimal, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let total: Option<Decimal> = sqlx::query_scalar(
            "SELECT SUM(amount) FROM register_withdrawals WHERE register_id = $1",
        )
        .bind(register_id)
        .fetch_one(executor)
        .await?;
        Ok(total.unwrap_or(Decimal::ZERO))
    }
}
