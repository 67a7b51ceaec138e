// src/handlers/properties.rs

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
    models::property::{CreatePropertyPayload, Property, UpdatePropertyPayload},
};

#[utoipa::path(
    post,
    path = "/properties",
    tag = "properties",
    security(("bearer" = [])),
    request_body = CreatePropertyPayload,
    responses((status = 201, description = "Propriedade criada", body = Property))
)]
pub async fn create_property(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
    Json(payload): Json<CreatePropertyPayload>,
) -> Result<(StatusCode, Json<Property>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let created = app_state
        .property_repo
        .create_property(
            owner.id,
            &payload.nickname,
            payload.photo_url.as_deref(),
            payload.iptu_value,
            &payload.address,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get,
    path = "/properties",
    tag = "properties",
    security(("bearer" = [])),
    responses((status = 200, description = "Propriedades do locador", body = [Property]))
)]
pub async fn list_properties(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
) -> Result<Json<Vec<Property>>, AppError> {
    let properties = app_state.property_repo.list_properties(owner.id).await?;
    Ok(Json(properties))
}

#[utoipa::path(
    patch,
    path = "/properties/{property_id}",
    tag = "properties",
    security(("bearer" = [])),
    params(("property_id" = i32, Path, description = "Id da propriedade")),
    request_body = UpdatePropertyPayload,
    responses(
        (status = 200, description = "Propriedade atualizada", body = Property),
        (status = 404, description = "Propriedade não existe"),
        (status = 403, description = "Propriedade de outro locador"),
    )
)]
pub async fn update_property(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
    Path(property_id): Path<i32>,
    Json(payload): Json<UpdatePropertyPayload>,
) -> Result<Json<Property>, AppError> {
    let mut property = app_state
        .property_repo
        .find_property_scoped(owner.id, property_id)
        .await?;

    if let Some(nickname) = payload.nickname {
        property.nickname = nickname;
    }
    if let Some(iptu_value) = payload.iptu_value {
        property.iptu_value = iptu_value;
    }
    if let Some(photo_url) = payload.photo_url {
        property.photo_url = photo_url;
    }
    if let Some(street) = payload.street {
        property.address.street = Some(street);
    }
    if let Some(neighborhood) = payload.neighborhood {
        property.address.neighborhood = Some(neighborhood);
    }
    if let Some(number) = payload.number {
        property.address.number = Some(number);
    }
    if let Some(zip_code) = payload.zip_code {
        property.address.zip_code = Some(zip_code);
    }
    if let Some(city) = payload.city {
        property.address.city = Some(city);
    }
    if let Some(state) = payload.state {
        property.address.state = Some(state);
    }

    let updated = app_state.property_repo.save_property(&property).await?;
    Ok(Json(updated))
}

// Cascata em código: despesas -> casas -> propriedade, numa transação.
#[utoipa::path(
    delete,
    path = "/properties/{property_id}",
    tag = "properties",
    security(("bearer" = [])),
    params(("property_id" = i32, Path, description = "Id da propriedade")),
    responses((status = 204, description = "Propriedade removida"))
)]
pub async fn delete_property(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
    Path(property_id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let property = app_state
        .property_repo
        .find_property_scoped(owner.id, property_id)
        .await?;

    let mut tx = app_state.db_pool.begin().await?;
    app_state
        .property_repo
        .delete_property_cascade(&mut *tx, property.id)
        .await?;
    tx.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}
