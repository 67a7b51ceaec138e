// src/handlers/templates.rs

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
    models::contract::{CreateTemplatePayload, Template, UpdateTemplatePayload},
};

#[utoipa::path(
    post,
    path = "/templates",
    tag = "templates",
    security(("bearer" = [])),
    request_body = CreateTemplatePayload,
    responses((status = 201, description = "Template criado", body = Template))
)]
pub async fn create_template(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
    Json(payload): Json<CreateTemplatePayload>,
) -> Result<(StatusCode, Json<Template>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let created = app_state.template_repo.create(owner.id, &payload).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/templates",
    tag = "templates",
    security(("bearer" = [])),
    responses((status = 200, description = "Templates do locador", body = [Template]))
)]
pub async fn list_templates(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
) -> Result<Json<Vec<Template>>, AppError> {
    let templates = app_state.template_repo.list(owner.id).await?;
    Ok(Json(templates))
}

#[utoipa::path(
    get,
    path = "/templates/{template_id}",
    tag = "templates",
    security(("bearer" = [])),
    params(("template_id" = i32, Path, description = "Id do template")),
    responses(
        (status = 200, description = "Template", body = Template),
        (status = 404, description = "Template não existe"),
        (status = 403, description = "Template de outro locador"),
    )
)]
pub async fn get_template(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
    Path(template_id): Path<i32>,
) -> Result<Json<Template>, AppError> {
    let template = app_state
        .template_repo
        .find_scoped(owner.id, template_id)
        .await?;
    Ok(Json(template))
}

#[utoipa::path(
    patch,
    path = "/templates/{template_id}",
    tag = "templates",
    security(("bearer" = [])),
    params(("template_id" = i32, Path, description = "Id do template")),
    request_body = UpdateTemplatePayload,
    responses((status = 200, description = "Template atualizado", body = Template))
)]
pub async fn update_template(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
    Path(template_id): Path<i32>,
    Json(payload): Json<UpdateTemplatePayload>,
) -> Result<Json<Template>, AppError> {
    let mut template = app_state
        .template_repo
        .find_scoped(owner.id, template_id)
        .await?;

    if let Some(name) = payload.name {
        template.name = name;
    }
    if let Some(garage) = payload.garage {
        template.garage = garage;
    }
    if let Some(warranty) = payload.warranty {
        template.warranty = warranty;
    }
    if let Some(pets) = payload.pets {
        template.pets = pets;
    }
    if let Some(sublease) = payload.sublease {
        template.sublease = sublease;
    }
    if let Some(kind) = payload.kind {
        template.kind = kind;
    }
    if let Some(description) = payload.description {
        template.description = description;
    }

    let updated = app_state.template_repo.save(&template).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/templates/{template_id}",
    tag = "templates",
    security(("bearer" = [])),
    params(("template_id" = i32, Path, description = "Id do template")),
    responses((status = 204, description = "Template removido"))
)]
pub async fn delete_template(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
    Path(template_id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let template = app_state
        .template_repo
        .find_scoped(owner.id, template_id)
        .await?;
    app_state.template_repo.delete(template.id).await?;
    Ok(StatusCode::NO_CONTENT)
}
