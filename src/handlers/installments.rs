// src/handlers/installments.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedOwner,
    models::contract::{PaymentInstallment, UpdateInstallmentPayload},
};

// Gera o cronograma completo de parcelas do contrato.
#[utoipa::path(
    post,
    path = "/payment_installment/{contract_id}",
    tag = "installments",
    security(("bearer" = [])),
    params(("contract_id" = i32, Path, description = "Id do contrato")),
    responses(
        (status = 201, description = "Parcelas geradas", body = [PaymentInstallment]),
        (status = 400, description = "Duração inválida ou parcelas já geradas"),
    )
)]
pub async fn generate_installments(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
    Path(contract_id): Path<i32>,
) -> Result<(StatusCode, Json<Vec<PaymentInstallment>>), AppError> {
    let contract = app_state
        .contract_repo
        .find_scoped(owner.id, contract_id)
        .await?;

    let created = app_state.installment_service.generate(&contract).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/payment_installment/{contract_id}",
    tag = "installments",
    security(("bearer" = [])),
    params(("contract_id" = i32, Path, description = "Id do contrato")),
    responses((status = 200, description = "Parcelas do contrato", body = [PaymentInstallment]))
)]
pub async fn list_installments(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
    Path(contract_id): Path<i32>,
) -> Result<Json<Vec<PaymentInstallment>>, AppError> {
    let contract = app_state
        .contract_repo
        .find_scoped(owner.id, contract_id)
        .await?;
    let installments = app_state.contract_repo.list_installments(contract.id).await?;
    Ok(Json(installments))
}

// Marca (ou desmarca) o pagamento de uma parcela.
#[utoipa::path(
    patch,
    path = "/payment_installment/{installment_id}",
    tag = "installments",
    security(("bearer" = [])),
    params(("installment_id" = i32, Path, description = "Id da parcela")),
    request_body = UpdateInstallmentPayload,
    responses(
        (status = 200, description = "Parcela atualizada", body = PaymentInstallment),
        (status = 404, description = "Parcela não existe"),
        (status = 403, description = "Parcela de contrato de outro locador"),
    )
)]
pub async fn update_installment(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
    Path(installment_id): Path<i32>,
    Json(payload): Json<UpdateInstallmentPayload>,
) -> Result<Json<PaymentInstallment>, AppError> {
    let mut installment = app_state
        .contract_repo
        .find_installment_scoped(owner.id, installment_id)
        .await?;

    if let Some(paid) = payload.paid {
        installment.paid = paid;
        if !paid {
            // Estorno limpa os dados do pagamento
            installment.payment_type = None;
            installment.payment_date = None;
        }
    }
    if let Some(payment_type) = payload.payment_type {
        installment.payment_type = Some(payment_type);
    }
    if let Some(payment_date) = payload.payment_date {
        installment.payment_date = Some(payment_date);
    }

    let updated = app_state.contract_repo.save_installment(&installment).await?;
    Ok(Json(updated))
}
