// src/models/report.rs
//
// DTOs de relatórios. Os nomes em pt-BR seguem o contrato do cliente
// (totalFaturado, qtdVendas, ticketMedio, percentual).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::sale::PaymentMethod;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethodSummary {
    pub forma: PaymentMethod,
    #[schema(example = "40.00")]
    pub valor: Decimal,
    /// Percentual do faturamento do período (0 quando o período não faturou).
    pub percentual: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TopProductEntry {
    pub product_id: Uuid,
    pub nome: String,
    pub quantidade: i64,
    pub valor: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DailyReport {
    pub data: NaiveDate,
    pub total_faturado: Decimal,
    pub qtd_vendas: i64,
    pub ticket_medio: Decimal,
    pub formas_pagamento: Vec<PaymentMethodSummary>,
    /// Top 5 produtos por faturamento no dia.
    pub top_produtos: Vec<TopProductEntry>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayTotal {
    pub data: NaiveDate,
    pub total_faturado: Decimal,
    pub qtd_vendas: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeekTotal {
    pub inicio: NaiveDate,
    pub fim: NaiveDate,
    pub total_faturado: Decimal,
    pub qtd_vendas: i64,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReport {
    pub inicio_semana: NaiveDate,
    pub dias: Vec<DayTotal>,
    /// Totais das 4 semanas anteriores, da mais antiga para a mais recente.
    pub semanas_anteriores: Vec<WeekTotal>,
    pub total_faturado: Decimal,
    pub qtd_vendas: i64,
    pub ticket_medio: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthTotal {
    pub mes: u32,
    pub ano: i32,
    pub total_faturado: Decimal,
    pub qtd_vendas: i64,
    pub ticket_medio: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub mes: u32,
    pub ano: i32,
    pub atual: MonthTotal,
    /// Os 6 meses anteriores, do mais antigo para o mais recente.
    pub historico: Vec<MonthTotal>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductReportEntry {
    pub product_id: Uuid,
    pub nome: String,
    pub quantidade: i64,
    pub valor: Decimal,
    pub percentual: Decimal,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductsReport {
    pub inicio: NaiveDate,
    pub fim: NaiveDate,
    pub total_faturado: Decimal,
    pub produtos: Vec<ProductReportEntry>,
}

// --- Query params ---

#[derive(Debug, Deserialize, ToSchema)]
pub struct DailyQuery {
    /// Data do relatório (default: hoje).
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct WeeklyQuery {
    /// Qualquer dia dentro da semana desejada (default: hoje).
    pub reference: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct MonthlyQuery {
    pub month: u32,
    pub year: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ProductsQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
}
