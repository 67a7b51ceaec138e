// src/handlers/reports.rs

use axum::{
    extract::State,
    http::header,
    response::IntoResponse,
};

use crate::{common::error::AppError, config::AppState, middleware::auth::AuthenticatedOwner};

// Consolida o ano corrente em PDF: resumo financeiro, despesas por tipo,
// ocupação e a tabela mês a mês de receitas e despesas.
#[utoipa::path(
    post,
    path = "/generate-report",
    tag = "reports",
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Relatório anual em PDF", content_type = "application/pdf"),
        (status = 500, description = "Falha ao renderizar o PDF"),
    )
)]
pub async fn generate_report(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
) -> Result<impl IntoResponse, AppError> {
    let pdf = app_state.document_service.yearly_report_pdf(owner.id).await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                "inline; filename=\"report.pdf\"".to_string(),
            ),
        ],
        pdf,
    ))
}
