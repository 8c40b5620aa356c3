// src/services/export_service.rs
//
// Renderização dos relatórios em Excel e PDF. Só apresentação: os números
// chegam prontos do ReportService. As fontes do PDF são carregadas da pasta
// 'fonts/' em tempo de execução.

use std::io::Cursor;

use genpdf::{elements, style, Element};
use rust_decimal::Decimal;
use umya_spreadsheet::{Spreadsheet, Worksheet};

use crate::{
    common::error::AppError,
    models::report::{DailyReport, MonthTotal, MonthlyReport, ProductsReport, WeeklyReport},
};

/// Formata um valor monetário no padrão pt-BR: `R$ 1.234,56`.
pub fn format_brl(value: Decimal) -> String {
    let rounded = value.round_dp(2);
    let negative = rounded.is_sign_negative();
    let raw = format!("{:.2}", rounded.abs());
    let (int_part, frac_part) = raw.split_once('.').unwrap_or((raw.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{}R$ {},{}", sign, grouped, frac_part)
}

fn format_date(date: chrono::NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

// --- Excel ---

fn first_sheet(book: &mut Spreadsheet) -> Result<&mut Worksheet, AppError> {
    book.get_sheet_mut(&0)
        .ok_or_else(|| AppError::InternalServerError(anyhow::anyhow!("Planilha sem aba inicial")))
}

fn write_row(sheet: &mut Worksheet, row: u32, values: &[String]) {
    for (i, value) in values.iter().enumerate() {
        sheet
            .get_cell_mut((i as u32 + 1, row))
            .set_value(value.clone());
    }
}

fn render_xlsx(book: &Spreadsheet) -> Result<Vec<u8>, AppError> {
    let mut out = Cursor::new(Vec::new());
    umya_spreadsheet::writer::xlsx::write_writer(book, &mut out)
        .map_err(|e| AppError::InternalServerError(anyhow::anyhow!("Falha ao gerar Excel: {}", e)))?;
    Ok(out.into_inner())
}

// --- PDF ---

fn new_document(title: &str) -> Result<genpdf::Document, AppError> {
    let font_family = genpdf::fonts::from_files("./fonts", "Roboto", None).map_err(|_| {
        AppError::InternalServerError(anyhow::anyhow!("Fonte não encontrada na pasta ./fonts"))
    })?;

    let mut doc = genpdf::Document::new(font_family);
    doc.set_title(title);
    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(10);
    doc.set_page_decorator(decorator);

    doc.push(
        elements::Paragraph::new("EMBALAFEST")
            .styled(style::Style::new().bold().with_font_size(18)),
    );
    doc.push(
        elements::Paragraph::new(title).styled(style::Style::new().bold().with_font_size(14)),
    );
    doc.push(elements::Break::new(1.5));

    Ok(doc)
}

fn render_pdf(doc: genpdf::Document) -> Result<Vec<u8>, AppError> {
    let mut buffer = Vec::new();
    doc.render(&mut buffer)
        .map_err(|e| AppError::InternalServerError(anyhow::anyhow!("Falha ao gerar PDF: {}", e)))?;
    Ok(buffer)
}

fn bold() -> style::Style {
    style::Style::new().bold()
}

#[derive(Clone, Default)]
pub struct ExportService;

impl ExportService {
    pub fn new() -> Self {
        Self
    }

    // --- Relatório diário ---

    pub fn daily_excel(&self, report: &DailyReport) -> Result<Vec<u8>, AppError> {
        let mut book = umya_spreadsheet::new_file();
        let sheet = first_sheet(&mut book)?;

        write_row(sheet, 1, &["Relatório Diário".into(), format_date(report.data)]);
        write_row(sheet, 3, &["Total faturado".into(), format_brl(report.total_faturado)]);
        write_row(sheet, 4, &["Vendas".into(), report.qtd_vendas.to_string()]);
        write_row(sheet, 5, &["Ticket médio".into(), format_brl(report.ticket_medio)]);

        write_row(sheet, 7, &["Forma de pagamento".into(), "Valor".into(), "%".into()]);
        let mut row = 8;
        for forma in &report.formas_pagamento {
            write_row(
                sheet,
                row,
                &[
                    forma.forma.label().into(),
                    format_brl(forma.valor),
                    format!("{}%", forma.percentual),
                ],
            );
            row += 1;
        }

        row += 1;
        write_row(
            sheet,
            row,
            &["Produto".into(), "Quantidade".into(), "Valor".into()],
        );
        for produto in &report.top_produtos {
            row += 1;
            write_row(
                sheet,
                row,
                &[
                    produto.nome.clone(),
                    produto.quantidade.to_string(),
                    format_brl(produto.valor),
                ],
            );
        }

        render_xlsx(&book)
    }

    pub fn daily_pdf(&self, report: &DailyReport) -> Result<Vec<u8>, AppError> {
        let mut doc = new_document(&format!("Relatório Diário — {}", format_date(report.data)))?;

        doc.push(elements::Paragraph::new(format!(
            "Total faturado: {}",
            format_brl(report.total_faturado)
        )));
        doc.push(elements::Paragraph::new(format!("Vendas: {}", report.qtd_vendas)));
        doc.push(elements::Paragraph::new(format!(
            "Ticket médio: {}",
            format_brl(report.ticket_medio)
        )));
        doc.push(elements::Break::new(1.5));

        let mut table = elements::TableLayout::new(vec![3, 2, 1]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));
        table
            .row()
            .element(elements::Paragraph::new("Forma de pagamento").styled(bold()))
            .element(elements::Paragraph::new("Valor").styled(bold()))
            .element(elements::Paragraph::new("%").styled(bold()))
            .push()
            .map_err(|e| AppError::InternalServerError(anyhow::anyhow!("Tabela PDF: {}", e)))?;
        for forma in &report.formas_pagamento {
            table
                .row()
                .element(elements::Paragraph::new(forma.forma.label()))
                .element(elements::Paragraph::new(format_brl(forma.valor)))
                .element(elements::Paragraph::new(format!("{}%", forma.percentual)))
                .push()
                .map_err(|e| AppError::InternalServerError(anyhow::anyhow!("Tabela PDF: {}", e)))?;
        }
        doc.push(table);
        doc.push(elements::Break::new(1.5));

        let mut table = elements::TableLayout::new(vec![4, 1, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));
        table
            .row()
            .element(elements::Paragraph::new("Produto").styled(bold()))
            .element(elements::Paragraph::new("Qtd").styled(bold()))
            .element(elements::Paragraph::new("Valor").styled(bold()))
            .push()
            .map_err(|e| AppError::InternalServerError(anyhow::anyhow!("Tabela PDF: {}", e)))?;
        for produto in &report.top_produtos {
            table
                .row()
                .element(elements::Paragraph::new(produto.nome.clone()))
                .element(elements::Paragraph::new(produto.quantidade.to_string()))
                .element(elements::Paragraph::new(format_brl(produto.valor)))
                .push()
                .map_err(|e| AppError::InternalServerError(anyhow::anyhow!("Tabela PDF: {}", e)))?;
        }
        doc.push(table);

        render_pdf(doc)
    }

    // --- Relatório semanal ---

    pub fn weekly_excel(&self, report: &WeeklyReport) -> Result<Vec<u8>, AppError> {
        let mut book = umya_spreadsheet::new_file();
        let sheet = first_sheet(&mut book)?;

        write_row(
            sheet,
            1,
            &["Relatório Semanal".into(), format!("Semana de {}", format_date(report.inicio_semana))],
        );
        write_row(sheet, 3, &["Total faturado".into(), format_brl(report.total_faturado)]);
        write_row(sheet, 4, &["Vendas".into(), report.qtd_vendas.to_string()]);
        write_row(sheet, 5, &["Ticket médio".into(), format_brl(report.ticket_medio)]);

        write_row(sheet, 7, &["Dia".into(), "Faturamento".into(), "Vendas".into()]);
        let mut row = 8;
        for dia in &report.dias {
            write_row(
                sheet,
                row,
                &[
                    format_date(dia.data),
                    format_brl(dia.total_faturado),
                    dia.qtd_vendas.to_string(),
                ],
            );
            row += 1;
        }

        row += 1;
        write_row(sheet, row, &["Semana".into(), "Faturamento".into(), "Vendas".into()]);
        for semana in &report.semanas_anteriores {
            row += 1;
            write_row(
                sheet,
                row,
                &[
                    format!("{} a {}", format_date(semana.inicio), format_date(semana.fim)),
                    format_brl(semana.total_faturado),
                    semana.qtd_vendas.to_string(),
                ],
            );
        }

        render_xlsx(&book)
    }

    pub fn weekly_pdf(&self, report: &WeeklyReport) -> Result<Vec<u8>, AppError> {
        let mut doc = new_document(&format!(
            "Relatório Semanal — semana de {}",
            format_date(report.inicio_semana)
        ))?;

        doc.push(elements::Paragraph::new(format!(
            "Total faturado: {}",
            format_brl(report.total_faturado)
        )));
        doc.push(elements::Paragraph::new(format!("Vendas: {}", report.qtd_vendas)));
        doc.push(elements::Paragraph::new(format!(
            "Ticket médio: {}",
            format_brl(report.ticket_medio)
        )));
        doc.push(elements::Break::new(1.5));

        let mut table = elements::TableLayout::new(vec![2, 2, 1]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));
        table
            .row()
            .element(elements::Paragraph::new("Dia").styled(bold()))
            .element(elements::Paragraph::new("Faturamento").styled(bold()))
            .element(elements::Paragraph::new("Vendas").styled(bold()))
            .push()
            .map_err(|e| AppError::InternalServerError(anyhow::anyhow!("Tabela PDF: {}", e)))?;
        for dia in &report.dias {
            table
                .row()
                .element(elements::Paragraph::new(format_date(dia.data)))
                .element(elements::Paragraph::new(format_brl(dia.total_faturado)))
                .element(elements::Paragraph::new(dia.qtd_vendas.to_string()))
                .push()
                .map_err(|e| AppError::InternalServerError(anyhow::anyhow!("Tabela PDF: {}", e)))?;
        }
        doc.push(table);
        doc.push(elements::Break::new(1.5));

        let mut table = elements::TableLayout::new(vec![3, 2, 1]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));
        table
            .row()
            .element(elements::Paragraph::new("Semanas anteriores").styled(bold()))
            .element(elements::Paragraph::new("Faturamento").styled(bold()))
            .element(elements::Paragraph::new("Vendas").styled(bold()))
            .push()
            .map_err(|e| AppError::InternalServerError(anyhow::anyhow!("Tabela PDF: {}", e)))?;
        for semana in &report.semanas_anteriores {
            table
                .row()
                .element(elements::Paragraph::new(format!(
                    "{} a {}",
                    format_date(semana.inicio),
                    format_date(semana.fim)
                )))
                .element(elements::Paragraph::new(format_brl(semana.total_faturado)))
                .element(elements::Paragraph::new(semana.qtd_vendas.to_string()))
                .push()
                .map_err(|e| AppError::InternalServerError(anyhow::anyhow!("Tabela PDF: {}", e)))?;
        }
        doc.push(table);

        render_pdf(doc)
    }

    // --- Relatório mensal ---

    fn month_label(month: &MonthTotal) -> String {
        format!("{:02}/{}", month.mes, month.ano)
    }

    pub fn monthly_excel(&self, report: &MonthlyReport) -> Result<Vec<u8>, AppError> {
        let mut book = umya_spreadsheet::new_file();
        let sheet = first_sheet(&mut book)?;

        write_row(
            sheet,
            1,
            &["Relatório Mensal".into(), format!("{:02}/{}", report.mes, report.ano)],
        );
        write_row(
            sheet,
            3,
            &[
                "Mês".into(),
                "Faturamento".into(),
                "Vendas".into(),
                "Ticket médio".into(),
            ],
        );

        let mut row = 4;
        for month in report.historico.iter().chain(std::iter::once(&report.atual)) {
            write_row(
                sheet,
                row,
                &[
                    Self::month_label(month),
                    format_brl(month.total_faturado),
                    month.qtd_vendas.to_string(),
                    format_brl(month.ticket_medio),
                ],
            );
            row += 1;
        }

        render_xlsx(&book)
    }

    pub fn monthly_pdf(&self, report: &MonthlyReport) -> Result<Vec<u8>, AppError> {
        let mut doc = new_document(&format!(
            "Relatório Mensal — {:02}/{}",
            report.mes, report.ano
        ))?;

        let mut table = elements::TableLayout::new(vec![1, 2, 1, 2]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));
        table
            .row()
            .element(elements::Paragraph::new("Mês").styled(bold()))
            .element(elements::Paragraph::new("Faturamento").styled(bold()))
            .element(elements::Paragraph::new("Vendas").styled(bold()))
            .element(elements::Paragraph::new("Ticket médio").styled(bold()))
            .push()
            .map_err(|e| AppError::InternalServerError(anyhow::anyhow!("Tabela PDF: {}", e)))?;
        for month in report.historico.iter().chain(std::iter::once(&report.atual)) {
            table
                .row()
                .element(elements::Paragraph::new(Self::month_label(month)))
                .element(elements::Paragraph::new(format_brl(month.total_faturado)))
                .element(elements::Paragraph::new(month.qtd_vendas.to_string()))
                .element(elements::Paragraph::new(format_brl(month.ticket_medio)))
                .push()
                .map_err(|e| AppError::InternalServerError(anyhow::anyhow!("Tabela PDF: {}", e)))?;
        }
        doc.push(table);

        render_pdf(doc)
    }

    // --- Relatório de produtos ---

    pub fn products_excel(&self, report: &ProductsReport) -> Result<Vec<u8>, AppError> {
        let mut book = umya_spreadsheet::new_file();
        let sheet = first_sheet(&mut book)?;

        write_row(
            sheet,
            1,
            &[
                "Relatório de Produtos".into(),
                format!("{} a {}", format_date(report.inicio), format_date(report.fim)),
            ],
        );
        write_row(sheet, 3, &["Total faturado".into(), format_brl(report.total_faturado)]);

        write_row(
            sheet,
            5,
            &[
                "Produto".into(),
                "Quantidade".into(),
                "Valor".into(),
                "%".into(),
            ],
        );
        let mut row = 6;
        for produto in &report.produtos {
            write_row(
                sheet,
                row,
                &[
                    produto.nome.clone(),
                    produto.quantidade.to_string(),
                    format_brl(produto.valor),
                    format!("{}%", produto.percentual),
                ],
            );
            row += 1;
        }

        render_xlsx(&book)
    }

    pub fn products_pdf(&self, report: &ProductsReport) -> Result<Vec<u8>, AppError> {
        let mut doc = new_document(&format!(
            "Relatório de Produtos — {} a {}",
            format_date(report.inicio),
            format_date(report.fim)
        ))?;

        doc.push(elements::Paragraph::new(format!(
            "Total faturado: {}",
            format_brl(report.total_faturado)
        )));
        doc.push(elements::Break::new(1.5));

        let mut table = elements::TableLayout::new(vec![4, 1, 2, 1]);
        table.set_cell_decorator(elements::FrameCellDecorator::new(true, true, false));
        table
            .row()
            .element(elements::Paragraph::new("Produto").styled(bold()))
            .element(elements::Paragraph::new("Qtd").styled(bold()))
            .element(elements::Paragraph::new("Valor").styled(bold()))
            .element(elements::Paragraph::new("%").styled(bold()))
            .push()
            .map_err(|e| AppError::InternalServerError(anyhow::anyhow!("Tabela PDF: {}", e)))?;
        for produto in &report.produtos {
            table
                .row()
                .element(elements::Paragraph::new(produto.nome.clone()))
                .element(elements::Paragraph::new(produto.quantidade.to_string()))
                .element(elements::Paragraph::new(format_brl(produto.valor)))
                .element(elements::Paragraph::new(format!("{}%", produto.percentual)))
                .push()
                .map_err(|e| AppError::InternalServerError(anyhow::anyhow!("Tabela PDF: {}", e)))?;
        }
        doc.push(table);

        render_pdf(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    #[test]
    fn brl_formats_with_grouping_and_comma() {
        assert_eq!(format_brl(dec!(1234.56)), "R$ 1.234,56");
        assert_eq!(format_brl(dec!(1000000.50)), "R$ 1.000.000,50");
    }

    #[test]
    fn brl_formats_small_values() {
        assert_eq!(format_brl(Decimal::ZERO), "R$ 0,00");
        assert_eq!(format_brl(dec!(0.05)), "R$ 0,05");
        assert_eq!(format_brl(dec!(999)), "R$ 999,00");
    }

    #[test]
    fn brl_keeps_the_sign_outside() {
        assert_eq!(format_brl(dec!(-5.00)), "-R$ 5,00");
    }

    #[test]
    fn daily_excel_carries_the_totals() {
        let report = DailyReport {
            data: NaiveDate::from_ymd_opt(2026, 8, 24).unwrap(),
            total_faturado: dec!(150.00),
            qtd_vendas: 3,
            ticket_medio: dec!(50.00),
            formas_pagamento: vec![],
            top_produtos: vec![],
        };

        let bytes = ExportService::new().daily_excel(&report).unwrap();
        let book =
            umya_spreadsheet::reader::xlsx::read_reader(std::io::Cursor::new(bytes), true).unwrap();
        let sheet = book.get_sheet(&0).unwrap();

        assert_eq!(sheet.get_value((1, 1)), "Relatório Diário");
        assert_eq!(sheet.get_value((2, 3)), "R$ 150,00");
        assert_eq!(sheet.get_value((2, 4)), "3");
    }
}
