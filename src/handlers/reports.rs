// src/handlers/reports.rs
//
// Relatórios em JSON e os mesmos agregados exportados em Excel/PDF.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    models::report::{
        DailyQuery, DailyReport, MonthlyQuery, MonthlyReport, ProductsQuery, ProductsReport,
        WeeklyQuery, WeeklyReport,
    },
};

const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";
const PDF_MIME: &str = "application/pdf";

enum ExportFormat {
    Excel,
    Pdf,
}

impl ExportFormat {
    fn parse(raw: &str) -> Result<Self, AppError> {
        match raw {
            "excel" => Ok(ExportFormat::Excel),
            "pdf" => Ok(ExportFormat::Pdf),
            other => Err(AppError::InvalidInput(format!(
                "Formato de exportação inválido: '{}'. Use 'excel' ou 'pdf'.",
                other
            ))),
        }
    }

    fn mime(&self) -> &'static str {
        match self {
            ExportFormat::Excel => XLSX_MIME,
            ExportFormat::Pdf => PDF_MIME,
        }
    }

    fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Excel => "xlsx",
            ExportFormat::Pdf => "pdf",
        }
    }
}

fn attachment(bytes: Vec<u8>, stem: &str, format: &ExportFormat) -> Response {
    (
        [
            (header::CONTENT_TYPE, format.mime().to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}.{}\"", stem, format.extension()),
            ),
        ],
        bytes,
    )
        .into_response()
}

// --- JSON ---

#[utoipa::path(
    get,
    path = "/api/reports/daily",
    tag = "Reports",
    security(("api_jwt" = [])),
    params(("date" = Option<String>, Query, description = "Data do relatório (default: hoje)")),
    responses((status = 200, description = "Relatório diário", body = DailyReport))
)]
pub async fn daily(
    State(app_state): State<AppState>,
    Query(query): Query<DailyQuery>,
) -> Result<Json<DailyReport>, AppError> {
    Ok(Json(app_state.report_service.daily(query.date).await?))
}

#[utoipa::path(
    get,
    path = "/api/reports/weekly",
    tag = "Reports",
    security(("api_jwt" = [])),
    params(("reference" = Option<String>, Query, description = "Qualquer dia da semana desejada")),
    responses((status = 200, description = "Relatório semanal", body = WeeklyReport))
)]
pub async fn weekly(
    State(app_state): State<AppState>,
    Query(query): Query<WeeklyQuery>,
) -> Result<Json<WeeklyReport>, AppError> {
    Ok(Json(app_state.report_service.weekly(query.reference).await?))
}

#[utoipa::path(
    get,
    path = "/api/reports/monthly",
    tag = "Reports",
    security(("api_jwt" = [])),
    params(
        ("month" = u32, Query, description = "Mês (1 a 12)"),
        ("year" = i32, Query, description = "Ano")
    ),
    responses(
        (status = 200, description = "Relatório mensal", body = MonthlyReport),
        (status = 400, description = "Mês fora de 1..=12")
    )
)]
pub async fn monthly(
    State(app_state): State<AppState>,
    Query(query): Query<MonthlyQuery>,
) -> Result<Json<MonthlyReport>, AppError> {
    Ok(Json(
        app_state
            .report_service
            .monthly(query.month, query.year)
            .await?,
    ))
}

#[utoipa::path(
    get,
    path = "/api/reports/products",
    tag = "Reports",
    security(("api_jwt" = [])),
    params(
        ("from" = String, Query, description = "Data inicial (AAAA-MM-DD)"),
        ("to" = String, Query, description = "Data final (AAAA-MM-DD)")
    ),
    responses((status = 200, description = "Relatório por produto", body = ProductsReport))
)]
pub async fn products(
    State(app_state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Result<Json<ProductsReport>, AppError> {
    Ok(Json(
        app_state
            .report_service
            .products(query.from, query.to)
            .await?,
    ))
}

// --- Exportação ---

#[utoipa::path(
    get,
    path = "/api/reports/daily/export/{format}",
    tag = "Reports",
    security(("api_jwt" = [])),
    params(("format" = String, Path, description = "'excel' ou 'pdf'")),
    responses((status = 200, description = "Arquivo para download"))
)]
pub async fn daily_export(
    State(app_state): State<AppState>,
    Path(format): Path<String>,
    Query(query): Query<DailyQuery>,
) -> Result<Response, AppError> {
    let format = ExportFormat::parse(&format)?;
    let report = app_state.report_service.daily(query.date).await?;

    let bytes = match format {
        ExportFormat::Excel => app_state.export_service.daily_excel(&report)?,
        ExportFormat::Pdf => app_state.export_service.daily_pdf(&report)?,
    };
    Ok(attachment(bytes, "relatorio-diario", &format))
}

#[utoipa::path(
    get,
    path = "/api/reports/weekly/export/{format}",
    tag = "Reports",
    security(("api_jwt" = [])),
    params(("format" = String, Path, description = "'excel' ou 'pdf'")),
    responses((status = 200, description = "Arquivo para download"))
)]
pub async fn weekly_export(
    State(app_state): State<AppState>,
    Path(format): Path<String>,
    Query(query): Query<WeeklyQuery>,
) -> Result<Response, AppError> {
    let format = ExportFormat::parse(&format)?;
    let report = app_state.report_service.weekly(query.reference).await?;

    let bytes = match format {
        ExportFormat::Excel => app_state.export_service.weekly_excel(&report)?,
        ExportFormat::Pdf => app_state.export_service.weekly_pdf(&report)?,
    };
    Ok(attachment(bytes, "relatorio-semanal", &format))
}

#[utoipa::path(
    get,
    path = "/api/reports/monthly/export/{format}",
    tag = "Reports",
    security(("api_jwt" = [])),
    params(("format" = String, Path, description = "'excel' ou 'pdf'")),
    responses((status = 200, description = "Arquivo para download"))
)]
pub async fn monthly_export(
    State(app_state): State<AppState>,
    Path(format): Path<String>,
    Query(query): Query<MonthlyQuery>,
) -> Result<Response, AppError> {
    let format = ExportFormat::parse(&format)?;
    let report = app_state
        .report_service
        .monthly(query.month, query.year)
        .await?;

    let bytes = match format {
        ExportFormat::Excel => app_state.export_service.monthly_excel(&report)?,
        ExportFormat::Pdf => app_state.export_service.monthly_pdf(&report)?,
    };
    Ok(attachment(bytes, "relatorio-mensal", &format))
}

#[utoipa::path(
    get,
    path = "/api/reports/products/export/{format}",
    tag = "Reports",
    security(("api_jwt" = [])),
    params(("format" = String, Path, description = "'excel' ou 'pdf'")),
    responses((status = 200, description = "Arquivo para download"))
)]
pub async fn products_export(
    State(app_state): State<AppState>,
    Path(format): Path<String>,
    Query(query): Query<ProductsQuery>,
) -> Result<Response, AppError> {
    let format = ExportFormat::parse(&format)?;
    let report = app_state
        .report_service
        .products(query.from, query.to)
        .await?;

    let bytes = match format {
        ExportFormat::Excel => app_state.export_service.products_excel(&report)?,
        ExportFormat::Pdf => app_state.export_service.products_pdf(&report)?,
    };
    Ok(attachment(bytes, "relatorio-produtos", &format))
}
