// src/services/report_service.rs
//
// Agregação dos relatórios diário, semanal, mensal e de produtos. As somas
// pesadas ficam no banco; aqui entram a moldura de datas, os percentuais e
// o preenchimento dos dias sem venda.

use chrono::{Datelike, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    db::{report_repo::MethodBreakdownRow, ReportRepository},
    models::{
        report::{
            DailyReport, DayTotal, MonthTotal, MonthlyReport, PaymentMethodSummary,
            ProductReportEntry, ProductsReport, TopProductEntry, WeekTotal, WeeklyReport,
        },
        sale::PaymentMethod,
    },
};

const TOP_PRODUCTS_LIMIT: i64 = 5;
const PREVIOUS_WEEKS: i64 = 4;
const PREVIOUS_MONTHS: i32 = 6;

/// Ticket médio do período. Zero quando não houve venda.
pub fn ticket_medio(total: Decimal, count: i64) -> Decimal {
    if count == 0 {
        return Decimal::ZERO;
    }
    (total / Decimal::from(count)).round_dp(2)
}

/// Participação percentual de `part` em `total`. Zero quando o total é zero.
pub fn percentual(part: Decimal, total: Decimal) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    (part * Decimal::ONE_HUNDRED / total).round_dp(2)
}

/// Consolida o faturamento por forma de pagamento. O total faturado sai da
/// soma das próprias linhas, então a lista sempre fecha com ele. Todas as
/// formas aparecem, mesmo as que não faturaram.
pub fn summarize_methods(rows: &[MethodBreakdownRow]) -> (Decimal, Vec<PaymentMethodSummary>) {
    let total: Decimal = rows
        .iter()
        .map(|r| r.total.unwrap_or(Decimal::ZERO))
        .sum();

    let summaries = PaymentMethod::ALL
        .iter()
        .map(|&forma| {
            let valor = rows
                .iter()
                .find(|r| r.payment_method == forma)
                .and_then(|r| r.total)
                .unwrap_or(Decimal::ZERO);
            PaymentMethodSummary {
                forma,
                valor,
                percentual: percentual(valor, total),
            }
        })
        .collect();

    (total, summaries)
}

/// Segunda-feira da semana que contém `date`.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Desloca (ano, mês) em `delta` meses, cruzando a virada do ano.
pub fn shift_month(year: i32, month: u32, delta: i32) -> (i32, u32) {
    let total = year * 12 + month as i32 - 1 + delta;
    (total.div_euclid(12), (total.rem_euclid(12) + 1) as u32)
}

/// Primeiro e último dia do mês. Mês fora de 1..=12 é rejeitado.
pub fn month_bounds(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), AppError> {
    let first = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        AppError::InvalidInput(format!("Mês inválido: {}/{}", month, year))
    })?;

    let (next_year, next_month) = shift_month(year, month, 1);
    let last = NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .ok_or_else(|| AppError::InvalidInput(format!("Mês inválido: {}/{}", month, year)))?
        - Duration::days(1);

    Ok((first, last))
}

#[derive(Clone)]
pub struct ReportService {
    report_repo: ReportRepository,
}

impl ReportService {
    pub fn new(report_repo: ReportRepository) -> Self {
        Self { report_repo }
    }

    pub async fn daily(&self, date: Option<NaiveDate>) -> Result<DailyReport, AppError> {
        let date = date.unwrap_or_else(|| Utc::now().date_naive());

        // A contagem vem do agregado geral; o total faturado sai da quebra
        // por forma de pagamento, para os dois nunca divergirem.
        let totals = self.report_repo.period_totals(date, date).await?;
        let rows = self.report_repo.method_breakdown(date, date).await?;
        let (total_faturado, formas_pagamento) = summarize_methods(&rows);

        let top_produtos = self
            .report_repo
            .product_totals(date, date, Some(TOP_PRODUCTS_LIMIT))
            .await?
            .into_iter()
            .map(|row| TopProductEntry {
                product_id: row.product_id,
                nome: row.name,
                quantidade: row.quantity,
                valor: row.value.unwrap_or(Decimal::ZERO),
            })
            .collect();

        Ok(DailyReport {
            data: date,
            total_faturado,
            qtd_vendas: totals.count,
            ticket_medio: ticket_medio(total_faturado, totals.count),
            formas_pagamento,
            top_produtos,
        })
    }

    pub async fn weekly(&self, reference: Option<NaiveDate>) -> Result<WeeklyReport, AppError> {
        let reference = reference.unwrap_or_else(|| Utc::now().date_naive());
        let inicio = start_of_week(reference);
        let fim = inicio + Duration::days(6);

        let rows = self.report_repo.daily_totals(inicio, fim).await?;

        // Os sete dias sempre aparecem; dia sem venda vem zerado.
        let dias: Vec<DayTotal> = (0..7)
            .map(|offset| {
                let data = inicio + Duration::days(offset);
                rows.iter()
                    .find(|r| r.day == data)
                    .map(|r| DayTotal {
                        data,
                        total_faturado: r.total.unwrap_or(Decimal::ZERO),
                        qtd_vendas: r.count,
                    })
                    .unwrap_or(DayTotal {
                        data,
                        total_faturado: Decimal::ZERO,
                        qtd_vendas: 0,
                    })
            })
            .collect();

        let total_faturado: Decimal = dias.iter().map(|d| d.total_faturado).sum();
        let qtd_vendas: i64 = dias.iter().map(|d| d.qtd_vendas).sum();

        // Semanas anteriores, da mais antiga para a mais recente.
        let mut semanas_anteriores = Vec::with_capacity(PREVIOUS_WEEKS as usize);
        for back in (1..=PREVIOUS_WEEKS).rev() {
            let week_start = inicio - Duration::weeks(back);
            let week_end = week_start + Duration::days(6);
            let totals = self.report_repo.period_totals(week_start, week_end).await?;
            semanas_anteriores.push(WeekTotal {
                inicio: week_start,
                fim: week_end,
                total_faturado: totals.total.unwrap_or(Decimal::ZERO),
                qtd_vendas: totals.count,
            });
        }

        Ok(WeeklyReport {
            inicio_semana: inicio,
            dias,
            semanas_anteriores,
            total_faturado,
            qtd_vendas,
            ticket_medio: ticket_medio(total_faturado, qtd_vendas),
        })
    }

    async fn month_total(&self, year: i32, month: u32) -> Result<MonthTotal, AppError> {
        let (first, last) = month_bounds(year, month)?;
        let totals = self.report_repo.period_totals(first, last).await?;
        let total_faturado = totals.total.unwrap_or(Decimal::ZERO);

        Ok(MonthTotal {
            mes: month,
            ano: year,
            total_faturado,
            qtd_vendas: totals.count,
            ticket_medio: ticket_medio(total_faturado, totals.count),
        })
    }

    pub async fn monthly(&self, month: u32, year: i32) -> Result<MonthlyReport, AppError> {
        // month_bounds já barra mês fora de 1..=12.
        let atual = self.month_total(year, month).await?;

        let mut historico = Vec::with_capacity(PREVIOUS_MONTHS as usize);
        for back in (1..=PREVIOUS_MONTHS).rev() {
            let (y, m) = shift_month(year, month, -back);
            historico.push(self.month_total(y, m).await?);
        }

        Ok(MonthlyReport {
            mes: month,
            ano: year,
            atual,
            historico,
        })
    }

    pub async fn products(&self, from: NaiveDate, to: NaiveDate) -> Result<ProductsReport, AppError> {
        if from > to {
            return Err(AppError::InvalidInput(
                "A data inicial não pode ser posterior à final.".into(),
            ));
        }

        let rows = self.report_repo.product_totals(from, to, None).await?;
        let total_faturado: Decimal = rows
            .iter()
            .map(|r| r.value.unwrap_or(Decimal::ZERO))
            .sum();

        let produtos = rows
            .into_iter()
            .map(|row| {
                let valor = row.value.unwrap_or(Decimal::ZERO);
                ProductReportEntry {
                    product_id: row.product_id,
                    nome: row.name,
                    quantidade: row.quantity,
                    valor,
                    percentual: percentual(valor, total_faturado),
                }
            })
            .collect();

        Ok(ProductsReport {
            inicio: from,
            fim: to,
            total_faturado,
            produtos,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn ticket_medio_is_zero_without_sales() {
        assert_eq!(ticket_medio(Decimal::ZERO, 0), Decimal::ZERO);
    }

    #[test]
    fn ticket_medio_divides_and_rounds() {
        assert_eq!(ticket_medio(dec!(100.00), 3), dec!(33.33));
    }

    #[test]
    fn percentual_is_zero_when_total_is_zero() {
        assert_eq!(percentual(dec!(10.00), Decimal::ZERO), Decimal::ZERO);
    }

    #[test]
    fn percentual_of_half_is_fifty() {
        assert_eq!(percentual(dec!(25.00), dec!(50.00)), dec!(50.00));
    }

    #[test]
    fn method_summary_total_matches_sum_of_entries() {
        let rows = vec![
            MethodBreakdownRow {
                payment_method: PaymentMethod::Cash,
                total: Some(dec!(60.00)),
            },
            MethodBreakdownRow {
                payment_method: PaymentMethod::Pix,
                total: Some(dec!(40.00)),
            },
            MethodBreakdownRow {
                payment_method: PaymentMethod::Debit,
                total: None,
            },
        ];

        let (total, summaries) = summarize_methods(&rows);

        assert_eq!(total, dec!(100.00));
        let soma: Decimal = summaries.iter().map(|s| s.valor).sum();
        assert_eq!(soma, total);
        // As quatro formas aparecem, com as ausentes zeradas.
        assert_eq!(summaries.len(), PaymentMethod::ALL.len());

        let pix = summaries
            .iter()
            .find(|s| s.forma == PaymentMethod::Pix)
            .unwrap();
        assert_eq!(pix.percentual, dec!(40.00));
    }

    #[test]
    fn method_summary_is_all_zero_without_sales() {
        let (total, summaries) = summarize_methods(&[]);
        assert_eq!(total, Decimal::ZERO);
        assert!(summaries
            .iter()
            .all(|s| s.valor.is_zero() && s.percentual.is_zero()));
    }

    #[test]
    fn week_starts_on_monday() {
        // 2026-08-26 é uma quarta-feira.
        let wednesday = NaiveDate::from_ymd_opt(2026, 8, 26).unwrap();
        let monday = NaiveDate::from_ymd_opt(2026, 8, 24).unwrap();
        assert_eq!(start_of_week(wednesday), monday);
        // Segunda-feira é o próprio início.
        assert_eq!(start_of_week(monday), monday);
    }

    #[test]
    fn shift_month_wraps_year_backwards() {
        assert_eq!(shift_month(2026, 1, -1), (2025, 12));
        assert_eq!(shift_month(2026, 3, -6), (2025, 9));
    }

    #[test]
    fn shift_month_wraps_year_forwards() {
        assert_eq!(shift_month(2025, 12, 1), (2026, 1));
    }

    #[test]
    fn month_bounds_handles_february_leap_year() {
        let (first, last) = month_bounds(2024, 2).unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2024, 2, 1).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2024, 2, 29).unwrap());
    }

    #[test]
    fn month_thirteen_is_rejected() {
        assert!(matches!(
            month_bounds(2026, 13),
            Err(AppError::InvalidInput(_))
        ));
        assert!(matches!(
            month_bounds(2026, 0),
            Err(AppError::InvalidInput(_))
        ));
    }
}
