// src/services/order_service.rs

use anyhow::anyhow;
use chrono::Utc;
use serde_json::{Map, Value};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::OrderRepository,
    models::order::{Order, OrderDetail},
    services::payment::PaymentGateway,
};

// Resultado do checkout: para onde mandar o comprador e qual pedido nasceu.
#[derive(Debug, Clone)]
pub struct CheckoutOutcome {
    pub payment_url: String,
    pub order_id: Uuid,
}

#[derive(Clone)]
pub struct OrderService {
    order_repo: OrderRepository,
    payment: PaymentGateway,
    pool: SqlitePool,
}

impl OrderService {
    pub fn new(order_repo: OrderRepository, payment: PaymentGateway, pool: SqlitePool) -> Self {
        Self {
            order_repo,
            payment,
            pool,
        }
    }

    /// Listagem administrativa: cada pedido com os seus itens e o total
    /// calculado sobre os preços dos produtos.
    pub async fn list_orders(&self, store_id: Uuid) -> Result<Vec<OrderDetail>, AppError> {
        let orders = self.order_repo.find_all(store_id).await?;

        let mut detailed = Vec::with_capacity(orders.len());
        for order in orders {
            let items = self.order_repo.find_items(order.id).await?;
            let total = items.iter().map(|item| item.price).sum();
            detailed.push(OrderDetail {
                order,
                items,
                total,
            });
        }

        Ok(detailed)
    }

    /// Checkout: pede a intenção ao gateway e, com ela em mãos, grava o
    /// pedido NÃO-PAGO com um item por produto, numa única transação. O
    /// pedido existe mesmo que o comprador nunca conclua o pagamento; não
    /// há processo de expiração.
    pub async fn checkout(
        &self,
        store_id: Uuid,
        product_ids: &[Uuid],
        phone: &str,
        address: &str,
        payment_data: &Map<String, Value>,
    ) -> Result<CheckoutOutcome, AppError> {
        let client_secret = self
            .payment
            .create_intention(store_id, payment_data)
            .await?;
        let payment_url = self.payment.hosted_checkout_url(&client_secret);

        let order = Order {
            id: Uuid::new_v4(),
            store_id,
            is_paid: false,
            phone: phone.to_string(),
            address: address.to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let mut tx = self.pool.begin().await?;
        self.order_repo.insert(&mut *tx, &order).await?;
        for product_id in product_ids {
            self.order_repo
                .insert_item(&mut *tx, order.id, *product_id)
                .await?;
        }
        tx.commit().await?;

        tracing::info!(order_id = %order.id, %store_id, "pedido criado (não pago)");

        Ok(CheckoutOutcome {
            payment_url,
            order_id: order.id,
        })
    }

    /// Transição CREATED → PAID, disparada exclusivamente pelo webhook do
    /// gateway. Repetir o webhook para o mesmo pedido é inócuo.
    pub async fn mark_order_paid(&self, order_id: Uuid) -> Result<(), AppError> {
        let affected = self.order_repo.mark_paid(order_id).await?;
        if affected == 0 {
            // O gateway avisou de um pedido que não temos: erro interno,
            // sem retry nem fila de reprocessamento.
            return Err(AppError::InternalServerError(anyhow!(
                "webhook para pedido desconhecido: {order_id}"
            )));
        }

        tracing::info!(%order_id, "pedido marcado como pago");
        Ok(())
    }
}
