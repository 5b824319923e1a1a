// src/models/dashboard.rs

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// 1. Resumo (os cards do topo do painel)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_revenue: f64, // Receita somada dos pedidos pagos
    pub sales_count: i64,   // Quantidade de pedidos pagos
    pub stock_count: i64,   // Produtos não arquivados
}

// 2. Gráfico de receita (últimos 7 dias)
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SalesChartEntry {
    pub date: String, // YYYY-MM-DD
    pub revenue: f64,
}

// Linha crua usada pela agregação: um item de pedido pago com o preço
// do produto e a data de criação do pedido.
#[derive(Debug, Clone, FromRow)]
pub struct PaidOrderItemRow {
    pub order_id: Uuid,
    pub order_created_at: DateTime<Utc>,
    pub price: f64,
}
