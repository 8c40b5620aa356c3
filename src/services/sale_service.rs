// src/services/sale_service.rs
//
// Registro e cancelamento de vendas. Tudo que mexe em estoque roda dentro
// de uma transação: ou a venda inteira entra, ou nada entra.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    db::{ProductRepository, RegisterRepository, SaleRepository},
    models::{
        auth::User,
        sale::{CancelSalePayload, CreateSalePayload, Sale, SaleDetail, SaleItem, SaleStatus},
    },
    services::auth::AuthService,
};

pub const ACTION_CANCEL: &str = "sale:cancel";

/// Total da venda: soma dos itens menos o desconto.
pub fn compute_total(subtotal: Decimal, discount: Decimal) -> Decimal {
    subtotal - discount
}

/// Só venda concluída pode ser cancelada. Cancelar de novo é rejeitado, o
/// que garante que o estoque de cada item volta uma única vez.
pub fn cancellation_allowed(status: SaleStatus) -> Result<(), AppError> {
    match status {
        SaleStatus::Completed => Ok(()),
        SaleStatus::Cancelled => Err(AppError::SaleAlreadyCancelled),
    }
}

/// Devoluções de estoque de um cancelamento: exatamente a quantidade que a
/// venda baixou, item a item.
pub fn restore_quantities(items: &[SaleItem]) -> Vec<(Uuid, i32)> {
    items
        .iter()
        .map(|item| (item.product_id, item.quantity))
        .collect()
}

#[derive(Clone)]
pub struct SaleService {
    sale_repo: SaleRepository,
    product_repo: ProductRepository,
    register_repo: RegisterRepository,
    auth_service: AuthService,
    pool: PgPool,
}

impl SaleService {
    pub fn new(
        sale_repo: SaleRepository,
        product_repo: ProductRepository,
        register_repo: RegisterRepository,
        auth_service: AuthService,
        pool: PgPool,
    ) -> Self {
        Self {
            sale_repo,
            product_repo,
            register_repo,
            auth_service,
            pool,
        }
    }

    /// Registra uma venda no caixa aberto do operador. O preço unitário é
    /// sempre o do cadastro no momento da venda; o cliente não manda preço.
    /// A baixa de estoque é condicional no banco, então duas vendas
    /// simultâneas do mesmo produto nunca deixam o saldo negativo.
    pub async fn create(&self, user: &User, payload: CreateSalePayload) -> Result<SaleDetail, AppError> {
        payload.validate()?;

        let discount = payload.discount.unwrap_or(Decimal::ZERO);
        if discount < Decimal::ZERO {
            return Err(AppError::InvalidInput(
                "O desconto não pode ser negativo.".into(),
            ));
        }

        let register = self
            .register_repo
            .find_open_by_user(user.id)
            .await?
            .ok_or(AppError::RegisterNotOpen)?;

        let mut tx = self.pool.begin().await?;

        let mut subtotal = Decimal::ZERO;
        let mut priced_items: Vec<(Uuid, i32, Decimal)> = Vec::with_capacity(payload.items.len());

        for item in &payload.items {
            let product = self
                .product_repo
                .try_decrement_stock(&mut *tx, item.product_id, item.quantity)
                .await?;

            let product = match product {
                Some(p) => p,
                None => {
                    // A baixa falhou: ou o produto não existe, ou não tem saldo.
                    let existing = self.product_repo.find_by_id(item.product_id).await?;
                    return Err(match existing {
                        Some(p) => AppError::InsufficientStock(p.name),
                        None => AppError::ResourceNotFound("Produto".into()),
                    });
                }
            };

            subtotal += product.price * Decimal::from(item.quantity);
            priced_items.push((product.id, item.quantity, product.price));
        }

        if discount > subtotal {
            return Err(AppError::InvalidInput(
                "O desconto não pode exceder o valor dos itens.".into(),
            ));
        }

        let total = compute_total(subtotal, discount);

        let sale = self
            .sale_repo
            .insert_sale(
                &mut *tx,
                register.id,
                user.id,
                payload.consumer_id,
                total,
                discount,
                payload.payment_method,
            )
            .await?;

        let mut items = Vec::with_capacity(priced_items.len());
        for (product_id, quantity, unit_price) in priced_items {
            let item = self
                .sale_repo
                .insert_item(&mut *tx, sale.id, product_id, quantity, unit_price)
                .await?;
            items.push(item);
        }

        tx.commit().await?;

        tracing::info!(venda = %sale.id, total = %sale.total, "Venda registrada");
        Ok(SaleDetail { sale, items })
    }

    /// Cancela uma venda concluída, devolvendo o estoque dos itens. Exige
    /// token elevado de gerente com escopo de cancelamento.
    pub async fn cancel(
        &self,
        sale_id: Uuid,
        payload: CancelSalePayload,
    ) -> Result<SaleDetail, AppError> {
        payload.validate()?;

        let manager = self
            .auth_service
            .validate_manager_token(&payload.manager_token, ACTION_CANCEL)
            .await?;

        let mut tx = self.pool.begin().await?;

        // Tranca a linha para o cancelamento não correr com outro.
        let locked = self
            .sale_repo
            .find_by_id_for_update(&mut *tx, sale_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Venda".into()))?;

        cancellation_allowed(locked.status)?;

        // O UPDATE também filtra por status; com a linha trancada, só uma
        // transação consegue virar a venda para cancelada.
        let sale = self
            .sale_repo
            .mark_cancelled(&mut *tx, sale_id, manager.id, chrono::Utc::now())
            .await?
            .ok_or(AppError::SaleAlreadyCancelled)?;

        let items = self.sale_repo.list_items_in(&mut *tx, sale_id).await?;
        for (product_id, quantity) in restore_quantities(&items) {
            self.product_repo
                .restore_stock(&mut *tx, product_id, quantity)
                .await?;
        }

        tx.commit().await?;

        tracing::info!(venda = %sale.id, gerente = %manager.email, "Venda cancelada");
        Ok(SaleDetail { sale, items })
    }

    pub async fn list(
        &self,
        from: Option<chrono::NaiveDate>,
        to: Option<chrono::NaiveDate>,
    ) -> Result<Vec<Sale>, AppError> {
        self.sale_repo.list(from, to).await
    }

    pub async fn detail(&self, sale_id: Uuid) -> Result<SaleDetail, AppError> {
        let sale = self
            .sale_repo
            .find_by_id(sale_id)
            .await?
            .ok_or_else(|| AppError::ResourceNotFound("Venda".into()))?;
        let items = self.sale_repo.list_items(sale_id).await?;
        Ok(SaleDetail { sale, items })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn total_is_item_sum_minus_discount() {
        // 2 × 10,00 + 1 × 5,50 = 25,50; desconto de 5,50 → 20,00
        let subtotal = dec!(10.00) * Decimal::from(2) + dec!(5.50);
        assert_eq!(compute_total(subtotal, dec!(5.50)), dec!(20.00));
    }

    #[test]
    fn total_without_discount_is_subtotal() {
        assert_eq!(compute_total(dec!(42.90), Decimal::ZERO), dec!(42.90));
    }

    #[test]
    fn cancelling_twice_is_rejected() {
        assert!(cancellation_allowed(SaleStatus::Completed).is_ok());
        assert!(matches!(
            cancellation_allowed(SaleStatus::Cancelled),
            Err(AppError::SaleAlreadyCancelled)
        ));
    }

    #[test]
    fn restore_returns_exactly_what_the_sale_took() {
        let sale_id = Uuid::new_v4();
        let produto_a = Uuid::new_v4();
        let produto_b = Uuid::new_v4();
        let items = vec![
            SaleItem {
                id: Uuid::new_v4(),
                sale_id,
                product_id: produto_a,
                quantity: 3,
                unit_price: dec!(10.00),
            },
            SaleItem {
                id: Uuid::new_v4(),
                sale_id,
                product_id: produto_b,
                quantity: 1,
                unit_price: dec!(5.50),
            },
        ];

        // A devolução espelha a baixa: mesmos produtos, mesmas quantidades.
        assert_eq!(
            restore_quantities(&items),
            vec![(produto_a, 3), (produto_b, 1)]
        );
    }
}
