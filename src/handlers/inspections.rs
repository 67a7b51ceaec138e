// src/handlers/inspections.rs

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedOwner,
    models::contract::{Inspection, InspectionForm},
};

#[utoipa::path(
    get,
    path = "/inspection/{contract_id}",
    tag = "inspections",
    security(("bearer" = [])),
    params(("contract_id" = i32, Path, description = "Id do contrato")),
    responses(
        (status = 200, description = "Vistoria do contrato", body = Inspection),
        (status = 404, description = "Contrato sem vistoria"),
    )
)]
pub async fn get_inspection(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
    Path(contract_id): Path<i32>,
) -> Result<Json<Inspection>, AppError> {
    let contract = app_state
        .contract_repo
        .find_scoped(owner.id, contract_id)
        .await?;

    let inspection = app_state
        .contract_repo
        .find_inspection_by_contract(contract.id)
        .await?
        .ok_or(AppError::NotFound("Vistoria"))?;
    Ok(Json(inspection))
}

// Multipart: campo "inspection" com o formulário em JSON + campos "photos"
// repetidos com as fotos. Reenvio substitui a vistoria existente do contrato.
#[utoipa::path(
    post,
    path = "/inspection/{contract_id}",
    tag = "inspections",
    security(("bearer" = [])),
    params(("contract_id" = i32, Path, description = "Id do contrato")),
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Laudo gerado e vistoria gravada", body = Inspection),
        (status = 400, description = "Formulário ausente ou foto inválida"),
    )
)]
pub async fn create_inspection(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
    Path(contract_id): Path<i32>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Inspection>), AppError> {
    let mut form: Option<InspectionForm> = None;
    let mut photos: Vec<Vec<u8>> = Vec::new();

    while let Some(field) = multipart.next_field().await? {
        match field.name().unwrap_or_default() {
            "inspection" => {
                let raw = field.text().await?;
                form = Some(serde_json::from_str(&raw).map_err(|e| {
                    AppError::BadRequest(format!("Formulário de vistoria inválido: {}", e))
                })?);
            }
            "photos" => photos.push(field.bytes().await?.to_vec()),
            _ => {}
        }
    }

    let form = form.ok_or_else(|| {
        AppError::BadRequest("O campo 'inspection' com o formulário é obrigatório.".into())
    })?;

    let inspection = app_state
        .document_service
        .create_inspection(owner.id, contract_id, &form, &photos)
        .await?;
    Ok((StatusCode::CREATED, Json(inspection)))
}

// Upload do laudo contra-assinado (multipart, campo "pdf").
#[utoipa::path(
    patch,
    path = "/inspection/{inspection_id}",
    tag = "inspections",
    security(("bearer" = [])),
    params(("inspection_id" = i32, Path, description = "Id da vistoria")),
    request_body(content_type = "multipart/form-data"),
    responses((status = 200, description = "URL do PDF assinado gravada", body = Inspection))
)]
pub async fn submit_signed_inspection(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
    Path(inspection_id): Path<i32>,
    mut multipart: Multipart,
) -> Result<Json<Inspection>, AppError> {
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
        .submit_signed_inspection(owner.id, inspection_id, pdf)
        .await?;
    Ok(Json(updated))
}
