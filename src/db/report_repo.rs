// src/db/report_repo.rs
//
// Consultas de agregação dos relatórios. Somente vendas com status
// 'completed' entram nos números (canceladas ficam no histórico, fora da
// receita).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::sale::PaymentMethod};

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct PeriodTotalsRow {
    pub total: Option<Decimal>,
    pub count: i64,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MethodBreakdownRow {
    pub payment_method: PaymentMethod,
    pub total: Option<Decimal>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ProductTotalsRow {
    pub product_id: Uuid,
    pub name: String,
    pub quantity: i64,
    pub value: Option<Decimal>,
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct DayTotalsRow {
    pub day: NaiveDate,
    pub total: Option<Decimal>,
    pub count: i64,
}

#[derive(Clone)]
pub struct ReportRepository {
    pool: PgPool,
}

impl ReportRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Faturamento e quantidade de vendas concluídas no intervalo fechado
    /// [from, to] (datas do calendário).
    pub async fn period_totals(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<PeriodTotalsRow, AppError> {
        let row = sqlx::query_as::<_, PeriodTotalsRow>(
            r#"
            SELECT COALESCE(SUM(total), 0) AS total, COUNT(*) AS count
            FROM sales
            WHERE status = 'completed'
              AND created_at::date BETWEEN $1 AND $2
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn method_breakdown(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<MethodBreakdownRow>, AppError> {
        let rows = sqlx::query_as::<_, MethodBreakdownRow>(
            r#"
            SELECT payment_method, SUM(total) AS total
            FROM sales
            WHERE status = 'completed'
              AND created_at::date BETWEEN $1 AND $2
            GROUP BY payment_method
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Produtos mais vendidos no período, por faturamento.
    pub async fn product_totals(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        limit: Option<i64>,
    ) -> Result<Vec<ProductTotalsRow>, AppError> {
        let rows = sqlx::query_as::<_, ProductTotalsRow>(
            r#"
            SELECT
                p.id AS product_id,
                p.name,
                SUM(si.quantity)::bigint AS quantity,
                SUM(si.quantity * si.unit_price) AS value
            FROM sale_items si
            JOIN sales s ON si.sale_id = s.id
            JOIN products p ON si.product_id = p.id
            WHERE s.status = 'completed'
              AND s.created_at::date BETWEEN $1 AND $2
            GROUP BY p.id, p.name
            ORDER BY value DESC
            LIMIT $3
            "#,
        )
        .bind(from)
        .bind(to)
        .bind(limit.unwrap_or(i64::MAX))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Totais por dia dentro do intervalo (dias sem venda não aparecem;
    /// o service preenche os buracos com zero).
    pub async fn daily_totals(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DayTotalsRow>, AppError> {
        let rows = sqlx::query_as::<_, DayTotalsRow>(
            r#"
            SELECT created_at::date AS day, SUM(total) AS total, COUNT(*) AS count
            FROM sales
            WHERE status = 'completed'
              AND created_at::date BETWEEN $1 AND $2
            GROUP BY 1
            ORDER BY 1 ASC
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
