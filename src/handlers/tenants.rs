// src/handlers/tenants.rs

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
    models::tenant::{CreateTenantPayload, Tenant, UpdateTenantPayload},
};

#[utoipa::path(
    post,
    path = "/tenants",
    tag = "tenants",
    security(("bearer" = [])),
    request_body = CreateTenantPayload,
    responses(
        (status = 201, description = "Inquilino cadastrado", body = Tenant),
        (status = 409, description = "CPF já cadastrado para este locador"),
    )
)]
pub async fn create_tenant(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
    Json(payload): Json<CreateTenantPayload>,
) -> Result<(StatusCode, Json<Tenant>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let created = app_state
        .tenant_repo
        .create_tenant(owner.id, &payload)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/tenants",
    tag = "tenants",
    security(("bearer" = [])),
    responses((status = 200, description = "Inquilinos do locador", body = [Tenant]))
)]
pub async fn list_tenants(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
) -> Result<Json<Vec<Tenant>>, AppError> {
    let tenants = app_state.tenant_repo.list_tenants(owner.id).await?;
    Ok(Json(tenants))
}

#[utoipa::path(
    patch,
    path = "/tenants/{tenant_id}",
    tag = "tenants",
    security(("bearer" = [])),
    params(("tenant_id" = i32, Path, description = "Id do inquilino")),
    request_body = UpdateTenantPayload,
    responses(
        (status = 200, description = "Inquilino atualizado", body = Tenant),
        (status = 404, description = "Inquilino não existe"),
        (status = 403, description = "Inquilino de outro locador"),
    )
)]
pub async fn update_tenant(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
    Path(tenant_id): Path<i32>,
    Json(payload): Json<UpdateTenantPayload>,
) -> Result<Json<Tenant>, AppError> {
    let mut tenant = app_state
        .tenant_repo
        .find_tenant_scoped(owner.id, tenant_id)
        .await?;

    if let Some(contact) = payload.contact {
        tenant.contact = contact;
    }
    if let Some(name) = payload.name {
        tenant.name = name;
    }
    if let Some(email) = payload.email {
        tenant.email = email;
    }
    if let Some(profession) = payload.profession {
        tenant.profession = profession;
    }
    if let Some(marital_status) = payload.marital_status {
        tenant.marital_status = marital_status;
    }
    if let Some(emergency_contact) = payload.emergency_contact {
        tenant.emergency_contact = emergency_contact;
    }
    if let Some(income) = payload.income {
        tenant.income = income;
    }
    if let Some(residents) = payload.residents {
        tenant.residents = residents;
    }
    if let Some(street) = payload.street {
        tenant.address.street = Some(street);
    }
    if let Some(neighborhood) = payload.neighborhood {
        tenant.address.neighborhood = Some(neighborhood);
    }
    if let Some(number) = payload.number {
        tenant.address.number = Some(number);
    }
    if let Some(zip_code) = payload.zip_code {
        tenant.address.zip_code = Some(zip_code);
    }
    if let Some(city) = payload.city {
        tenant.address.city = Some(city);
    }
    if let Some(state) = payload.state {
        tenant.address.state = Some(state);
    }

    let updated = app_state.tenant_repo.save_tenant(&tenant).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/tenants/{tenant_id}",
    tag = "tenants",
    security(("bearer" = [])),
    params(("tenant_id" = i32, Path, description = "Id do inquilino")),
    responses((status = 204, description = "Inquilino removido"))
)]
pub async fn delete_tenant(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
    Path(tenant_id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let tenant = app_state
        .tenant_repo
        .find_tenant_scoped(owner.id, tenant_id)
        .await?;

    let mut tx = app_state.db_pool.begin().await?;
    app_state
        .tenant_repo
        .delete_tenant_cascade(&mut *tx, tenant.id)
        .await?;
    tx.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}
