// src/services/dashboard_service.rs

use std::collections::HashSet;

use chrono::{Duration, NaiveDate, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::dashboard::{DashboardSummary, PaidOrderItemRow, SalesChartEntry},
};

#[derive(Clone)]
pub struct DashboardService {
    repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(repo: DashboardRepository) -> Self {
        Self { repo }
    }

    /// Receita total, vendas e estoque. Apenas pedidos pagos contam;
    /// pedidos não-pagos são invisíveis para o painel.
    pub async fn get_summary(&self, store_id: Uuid) -> Result<DashboardSummary, AppError> {
        let rows = self.repo.paid_order_items(store_id).await?;
        let stock_count = self.repo.stock_count(store_id).await?;

        Ok(DashboardSummary {
            total_revenue: total_revenue(&rows),
            sales_count: paid_order_count(&rows),
            stock_count,
        })
    }

    /// Receita diária dos últimos 7 dias corridos, terminando hoje.
    pub async fn get_sales_chart(&self, store_id: Uuid) -> Result<Vec<SalesChartEntry>, AppError> {
        let rows = self.repo.paid_order_items(store_id).await?;
        let days = last_seven_days(Utc::now().date_naive());

        Ok(daily_revenue(&rows, &days))
    }
}

// ---
// Agregação pura sobre as linhas já buscadas. Sem estado, sem IO.
// ---

pub(crate) fn total_revenue(rows: &[PaidOrderItemRow]) -> f64 {
    rows.iter().map(|row| row.price).sum()
}

pub(crate) fn paid_order_count(rows: &[PaidOrderItemRow]) -> i64 {
    let distinct: HashSet<Uuid> = rows.iter().map(|row| row.order_id).collect();
    distinct.len() as i64
}

/// As 7 datas (YYYY-MM-DD) terminando em `today`, em ordem crescente.
pub(crate) fn last_seven_days(today: NaiveDate) -> Vec<String> {
    (0..7)
        .rev()
        .map(|offset| (today - Duration::days(offset)).format("%Y-%m-%d").to_string())
        .collect()
}

/// Soma a receita por dia comparando o prefixo ISO da data de criação do
/// pedido com cada data da janela. Comparação de string, sem fuso: um
/// pedido só entra no balde cujo texto de data bate exatamente.
pub(crate) fn daily_revenue(rows: &[PaidOrderItemRow], days: &[String]) -> Vec<SalesChartEntry> {
    days.iter()
        .map(|day| {
            let revenue = rows
                .iter()
                .filter(|row| row.order_created_at.format("%Y-%m-%d").to_string() == *day)
                .map(|row| row.price)
                .sum();
            SalesChartEntry {
                date: day.clone(),
                revenue,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{DateTime, Utc};

    fn row(order_id: Uuid, created_at: &str, price: f64) -> PaidOrderItemRow {
        PaidOrderItemRow {
            order_id,
            order_created_at: created_at.parse::<DateTime<Utc>>().expect("data"),
            price,
        }
    }

    // Fixture clássica: 2 pedidos pagos somando 50; o não-pago de 20 nem
    // chega aqui, porque a consulta só devolve itens de pedidos pagos.
    #[test]
    fn receita_total_soma_somente_pedidos_pagos() {
        let pedido_a = Uuid::new_v4();
        let pedido_b = Uuid::new_v4();
        let rows = vec![
            row(pedido_a, "2025-03-10T12:00:00Z", 20.0),
            row(pedido_a, "2025-03-10T12:00:00Z", 10.0),
            row(pedido_b, "2025-03-11T09:30:00Z", 20.0),
        ];

        assert_eq!(total_revenue(&rows), 50.0);
        assert_eq!(paid_order_count(&rows), 2);
    }

    #[test]
    fn janela_de_sete_dias_termina_hoje() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 11).expect("data");
        let days = last_seven_days(today);

        assert_eq!(days.len(), 7);
        assert_eq!(days.first().map(String::as_str), Some("2025-03-05"));
        assert_eq!(days.last().map(String::as_str), Some("2025-03-11"));
    }

    #[test]
    fn receita_diaria_agrupa_pelo_prefixo_iso_da_data() {
        let pedido_a = Uuid::new_v4();
        let pedido_b = Uuid::new_v4();
        let rows = vec![
            row(pedido_a, "2025-03-10T23:59:59Z", 30.0),
            row(pedido_b, "2025-03-11T00:00:01Z", 20.0),
        ];
        let days = last_seven_days(NaiveDate::from_ymd_opt(2025, 3, 11).expect("data"));

        let chart = daily_revenue(&rows, &days);

        let by_date: Vec<(&str, f64)> = chart
            .iter()
            .map(|entry| (entry.date.as_str(), entry.revenue))
            .collect();
        assert!(by_date.contains(&("2025-03-10", 30.0)));
        assert!(by_date.contains(&("2025-03-11", 20.0)));
        assert!(by_date.contains(&("2025-03-09", 0.0)));
    }

    #[test]
    fn pedido_fora_da_janela_fica_de_fora() {
        let rows = vec![row(Uuid::new_v4(), "2025-01-01T10:00:00Z", 99.0)];
        let days = last_seven_days(NaiveDate::from_ymd_opt(2025, 3, 11).expect("data"));

        let chart = daily_revenue(&rows, &days);
        assert!(chart.iter().all(|entry| entry.revenue == 0.0));
    }
}
