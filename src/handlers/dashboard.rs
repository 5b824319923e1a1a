// src/handlers/dashboard.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthIdentity,
    models::dashboard::{DashboardSummary, SalesChartEntry},
};

// GET /api/stores/{store_id}/dashboard/summary
#[utoipa::path(
    get,
    path = "/api/stores/{store_id}/dashboard/summary",
    tag = "Dashboard",
    params(("store_id" = Uuid, Path, description = "ID da Loja")),
    responses(
        (status = 200, description = "Receita, vendas e estoque da loja", body = DashboardSummary),
        (status = 401, description = "Não autenticado"),
        (status = 404, description = "Loja não encontrada ou não é sua")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_summary(
    State(app_state): State<AppState>,
    identity: AuthIdentity,
    Path(store_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .store_service
        .ensure_owner(&identity.user_id, store_id)
        .await?;

    let summary = app_state.dashboard_service.get_summary(store_id).await?;

    Ok((StatusCode::OK, Json(summary)))
}

// GET /api/stores/{store_id}/dashboard/sales-chart
#[utoipa::path(
    get,
    path = "/api/stores/{store_id}/dashboard/sales-chart",
    tag = "Dashboard",
    params(("store_id" = Uuid, Path, description = "ID da Loja")),
    responses(
        (status = 200, description = "Receita diária dos últimos 7 dias", body = Vec<SalesChartEntry>),
        (status = 401, description = "Não autenticado"),
        (status = 404, description = "Loja não encontrada ou não é sua")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_sales_chart(
    State(app_state): State<AppState>,
    identity: AuthIdentity,
    Path(store_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .store_service
        .ensure_owner(&identity.user_id, store_id)
        .await?;

    let chart = app_state
        .dashboard_service
        .get_sales_chart(store_id)
        .await?;

    Ok((StatusCode::OK, Json(chart)))
}
