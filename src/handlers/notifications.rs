// src/handlers/notifications.rs

use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::{common::error::AppError, config::AppState};

// Rota pública, pensada para um agendador externo (cron). Percorre as
// parcelas vencidas do mês e dispara um push para cada locador com token.
#[utoipa::path(
    post,
    path = "/notifications/overdue-scan",
    tag = "notifications",
    responses((status = 200, description = "Quantidade de notificações tentadas"))
)]
pub async fn overdue_scan(
    State(app_state): State<AppState>,
) -> Result<Json<Value>, AppError> {
    let today = Utc::now().date_naive();
    let attempted = app_state.notification_service.overdue_scan(today).await?;
    Ok(Json(json!({ "attempted": attempted })))
}
