// src/handlers/guarantor.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedOwner,
    models::tenant::{CreateGuarantorPayload, Guarantor, UpdateGuarantorPayload},
};

// O fiador é sempre alcançado através do inquilino dele.
#[utoipa::path(
    post,
    path = "/guarantor/{tenant_id}",
    tag = "guarantor",
    security(("bearer" = [])),
    params(("tenant_id" = i32, Path, description = "Id do inquilino")),
    request_body = CreateGuarantorPayload,
    responses(
        (status = 201, description = "Fiador cadastrado", body = Guarantor),
        (status = 404, description = "Inquilino não existe"),
        (status = 409, description = "CPF de fiador já cadastrado ou inquilino já tem fiador"),
    )
)]
pub async fn create_guarantor(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
    Path(tenant_id): Path<i32>,
    Json(payload): Json<CreateGuarantorPayload>,
) -> Result<(StatusCode, Json<Guarantor>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let tenant = app_state
        .tenant_repo
        .find_tenant_scoped(owner.id, tenant_id)
        .await?;

    let created = app_state
        .tenant_repo
        .create_guarantor(tenant.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/guarantor/{tenant_id}",
    tag = "guarantor",
    security(("bearer" = [])),
    params(("tenant_id" = i32, Path, description = "Id do inquilino")),
    responses(
        (status = 200, description = "Fiador do inquilino", body = Guarantor),
        (status = 404, description = "Inquilino sem fiador"),
    )
)]
pub async fn get_guarantor(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
    Path(tenant_id): Path<i32>,
) -> Result<Json<Guarantor>, AppError> {
    let tenant = app_state
        .tenant_repo
        .find_tenant_scoped(owner.id, tenant_id)
        .await?;

    let guarantor = app_state
        .tenant_repo
        .find_guarantor_by_tenant(tenant.id)
        .await?
        .ok_or(AppError::NotFound("Fiador"))?;
    Ok(Json(guarantor))
}

#[utoipa::path(
    patch,
    path = "/guarantor/{guarantor_id}",
    tag = "guarantor",
    security(("bearer" = [])),
    params(("guarantor_id" = i32, Path, description = "Id do fiador")),
    request_body = UpdateGuarantorPayload,
    responses(
        (status = 200, description = "Fiador atualizado", body = Guarantor),
        (status = 404, description = "Fiador não existe"),
        (status = 403, description = "Fiador de outro locador"),
    )
)]
pub async fn update_guarantor(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
    Path(guarantor_id): Path<i32>,
    Json(payload): Json<UpdateGuarantorPayload>,
) -> Result<Json<Guarantor>, AppError> {
    let mut guarantor = app_state
        .tenant_repo
        .find_guarantor_scoped(owner.id, guarantor_id)
        .await?;

    if let Some(contact) = payload.contact {
        guarantor.contact = contact;
    }
    if let Some(name) = payload.name {
        guarantor.name = name;
    }
    if let Some(email) = payload.email {
        guarantor.email = email;
    }
    if let Some(profession) = payload.profession {
        guarantor.profession = profession;
    }
    if let Some(marital_status) = payload.marital_status {
        guarantor.marital_status = marital_status;
    }
    if let Some(comment) = payload.comment {
        guarantor.comment = comment;
    }
    if let Some(income) = payload.income {
        guarantor.income = income;
    }
    if let Some(street) = payload.street {
        guarantor.address.street = Some(street);
    }
    if let Some(neighborhood) = payload.neighborhood {
        guarantor.address.neighborhood = Some(neighborhood);
    }
    if let Some(number) = payload.number {
        guarantor.address.number = Some(number);
    }
    if let Some(zip_code) = payload.zip_code {
        guarantor.address.zip_code = Some(zip_code);
    }
    if let Some(city) = payload.city {
        guarantor.address.city = Some(city);
    }
    if let Some(state) = payload.state {
        guarantor.address.state = Some(state);
    }

    let updated = app_state.tenant_repo.save_guarantor(&guarantor).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/guarantor/{guarantor_id}",
    tag = "guarantor",
    security(("bearer" = [])),
    params(("guarantor_id" = i32, Path, description = "Id do fiador")),
    responses((status = 204, description = "Fiador removido"))
)]
pub async fn delete_guarantor(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
    Path(guarantor_id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let guarantor = app_state
        .tenant_repo
        .find_guarantor_scoped(owner.id, guarantor_id)
        .await?;
    app_state.tenant_repo.delete_guarantor(guarantor.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
