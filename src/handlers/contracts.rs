// src/handlers/contracts.rs

use axum::{
    extract::{Multipart, Path, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedOwner,
    models::contract::{Contract, CreateContractPayload},
    services::installment_service,
};

#[utoipa::path(
    post,
    path = "/contracts",
    tag = "contracts",
    security(("bearer" = [])),
    request_body = CreateContractPayload,
    responses(
        (status = 201, description = "Contrato criado", body = Contract),
        (status = 400, description = "Duração menor que 1 mês"),
        (status = 403, description = "Casa, inquilino ou template de outro locador"),
        (status = 404, description = "Casa, inquilino ou template inexistente"),
    )
)]
pub async fn create_contract(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
    Json(payload): Json<CreateContractPayload>,
) -> Result<(StatusCode, Json<Contract>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    // Contrato curto demais nunca chega ao banco
    if installment_service::contract_duration_months(payload.start_date, payload.end_date) < 1 {
        return Err(AppError::ContractDurationTooShort);
    }

    let mut tx = app_state.db_pool.begin().await?;
    let created = app_state
        .contract_repo
        .create_contract(&mut *tx, owner.id, &payload)
        .await?;
    tx.commit().await?;

    tracing::info!("✅ Contrato {} criado para a casa {}", created.id, created.house_id);
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/contracts",
    tag = "contracts",
    security(("bearer" = [])),
    responses((status = 200, description = "Contratos do locador", body = [Contract]))
)]
pub async fn list_contracts(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
) -> Result<Json<Vec<Contract>>, AppError> {
    let contracts = app_state.contract_repo.list(owner.id).await?;
    Ok(Json(contracts))
}

#[utoipa::path(
    get,
    path = "/contracts/{contract_id}",
    tag = "contracts",
    security(("bearer" = [])),
    params(("contract_id" = i32, Path, description = "Id do contrato")),
    responses(
        (status = 200, description = "Contrato", body = Contract),
        (status = 404, description = "Contrato não existe"),
        (status = 403, description = "Contrato de outro locador"),
    )
)]
pub async fn get_contract(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
    Path(contract_id): Path<i32>,
) -> Result<Json<Contract>, AppError> {
    let contract = app_state
        .contract_repo
        .find_scoped(owner.id, contract_id)
        .await?;
    Ok(Json(contract))
}

// Parcelas e vistoria caem junto, na mesma transação.
#[utoipa::path(
    delete,
    path = "/contracts/{contract_id}",
    tag = "contracts",
    security(("bearer" = [])),
    params(("contract_id" = i32, Path, description = "Id do contrato")),
    responses((status = 204, description = "Contrato removido"))
)]
pub async fn delete_contract(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
    Path(contract_id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let contract = app_state
        .contract_repo
        .find_scoped(owner.id, contract_id)
        .await?;

    let mut tx = app_state.db_pool.begin().await?;
    app_state
        .contract_repo
        .delete_cascade(&mut *tx, contract.id)
        .await?;
    tx.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}

// Renderiza o contrato em PDF e devolve inline, sem persistir.
#[utoipa::path(
    get,
    path = "/contracts/{contract_id}/pdf",
    tag = "contracts",
    security(("bearer" = [])),
    params(("contract_id" = i32, Path, description = "Id do contrato")),
    responses(
        (status = 200, description = "PDF do contrato", content_type = "application/pdf"),
        (status = 400, description = "Contrato incompleto (fiador/caução ausente)"),
    )
)]
pub async fn contract_pdf(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
    Path(contract_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let pdf = app_state
        .document_service
        .contract_pdf(owner.id, contract_id)
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("inline; filename=\"contrato_{}.pdf\"", contract_id),
            ),
        ],
        pdf,
    ))
}

// Upload do PDF assinado pelas partes (multipart, campo "pdf").
#[utoipa::path(
    patch,
    path = "/contracts/{contract_id}/signed",
    tag = "contracts",
    security(("bearer" = [])),
    params(("contract_id" = i32, Path, description = "Id do contrato")),
    request_body(content_type = "multipart/form-data"),
    responses((status = 200, description = "URL do PDF assinado gravada", body = Contract))
)]
pub async fn submit_signed_contract(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
    Path(contract_id): Path<i32>,
    mut multipart: Multipart,
) -> Result<Json<Contract>, AppError> {
    let mut pdf: Option<Vec<u8>> = None;
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("pdf") {
            pdf = Some(field.bytes().await?.to_vec());
        }
    }
    let pdf =
        pdf.ok_or_else(|| AppError::BadRequest("O arquivo PDF assinado é obrigatório.".into()))?;

    let updated = app_state
        .document_service
        .submit_signed_contract(owner.id, contract_id, pdf)
        .await?;
    Ok(Json(updated))
}
