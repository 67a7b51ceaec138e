// src/handlers/houses.rs

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    clients::storage::UploadKind,
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedOwner,
    models::property::{House, HouseStatus, NewHouse, UpdateHousePayload},
};

// Criação por multipart: campos de texto + foto opcional, que sobe para o
// storage antes do INSERT.
#[utoipa::path(
    post,
    path = "/houses/{property_id}",
    tag = "houses",
    security(("bearer" = [])),
    params(("property_id" = i32, Path, description = "Id da propriedade")),
    request_body(content_type = "multipart/form-data"),
    responses(
        (status = 201, description = "Casa criada", body = House),
        (status = 404, description = "Propriedade não existe"),
    )
)]
pub async fn create_house(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
    Path(property_id): Path<i32>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<House>), AppError> {
    let property = app_state
        .property_repo
        .find_property_scoped(owner.id, property_id)
        .await?;

    let mut nickname: Option<String> = None;
    let mut rooms: Option<i32> = None;
    let mut bathrooms: Option<i32> = None;
    let mut furnished = false;
    let mut status = HouseStatus::Vacant;
    let mut photo: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await? {
        match field.name().unwrap_or_default() {
            "nickname" => nickname = Some(field.text().await?),
            "rooms" => {
                rooms = Some(parse_field(&field.text().await?, "rooms")?);
            }
            "bathrooms" => {
                bathrooms = Some(parse_field(&field.text().await?, "bathrooms")?);
            }
            "furnished" => {
                furnished = parse_field(&field.text().await?, "furnished")?;
            }
            "status" => {
                let raw = field.text().await?;
                status = raw.parse().map_err(|_| {
                    AppError::BadRequest(format!("Status de casa inválido: {}", raw))
                })?;
            }
            "photo" => photo = Some(field.bytes().await?.to_vec()),
            _ => {}
        }
    }

    let nickname =
        nickname.ok_or_else(|| AppError::BadRequest("O apelido é obrigatório.".to_string()))?;
    let rooms =
        rooms.ok_or_else(|| AppError::BadRequest("O número de cômodos é obrigatório.".into()))?;
    let bathrooms = bathrooms
        .ok_or_else(|| AppError::BadRequest("O número de banheiros é obrigatório.".into()))?;

    let photo_url = match photo {
        Some(bytes) => Some(
            app_state
                .storage_client
                .upload(bytes, UploadKind::Image)
                .await?,
        ),
        None => None,
    };

    let house = NewHouse {
        nickname,
        photo_url,
        rooms,
        bathrooms,
        furnished,
        status,
    };
    let created = app_state
        .property_repo
        .create_house(property.id, &house)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

fn parse_field<T: std::str::FromStr>(raw: &str, name: &str) -> Result<T, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Campo '{}' inválido: {}", name, raw)))
}

#[utoipa::path(
    get,
    path = "/houses",
    tag = "houses",
    security(("bearer" = [])),
    responses((status = 200, description = "Casas do locador", body = [House]))
)]
pub async fn list_houses(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
) -> Result<Json<Vec<House>>, AppError> {
    let houses = app_state.property_repo.list_houses(owner.id).await?;
    Ok(Json(houses))
}

#[utoipa::path(
    patch,
    path = "/houses/{house_id}",
    tag = "houses",
    security(("bearer" = [])),
    params(("house_id" = i32, Path, description = "Id da casa")),
    request_body = UpdateHousePayload,
    responses(
        (status = 200, description = "Casa atualizada", body = House),
        (status = 404, description = "Casa não existe"),
        (status = 403, description = "Casa de outro locador"),
    )
)]
pub async fn update_house(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
    Path(house_id): Path<i32>,
    Json(payload): Json<UpdateHousePayload>,
) -> Result<Json<House>, AppError> {
    let mut house = app_state
        .property_repo
        .find_house_scoped(owner.id, house_id)
        .await?;

    if let Some(nickname) = payload.nickname {
        house.nickname = nickname;
    }
    if let Some(rooms) = payload.rooms {
        house.rooms = rooms;
    }
    if let Some(bathrooms) = payload.bathrooms {
        house.bathrooms = bathrooms;
    }
    if let Some(furnished) = payload.furnished {
        house.furnished = furnished;
    }
    if let Some(status) = payload.status {
        house.status = status;
    }
    if let Some(photo_url) = payload.photo_url {
        house.photo_url = photo_url;
    }

    let updated = app_state.property_repo.save_house(&house).await?;
    Ok(Json(updated))
}

#[utoipa::path(
    delete,
    path = "/houses/{house_id}",
    tag = "houses",
    security(("bearer" = [])),
    params(("house_id" = i32, Path, description = "Id da casa")),
    responses((status = 204, description = "Casa removida"))
)]
pub async fn delete_house(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
    Path(house_id): Path<i32>,
) -> Result<StatusCode, AppError> {
    let house = app_state
        .property_repo
        .find_house_scoped(owner.id, house_id)
        .await?;

    let mut tx = app_state.db_pool.begin().await?;
    app_state
        .property_repo
        .delete_house_cascade(&mut *tx, house.id)
        .await?;
    tx.commit().await?;

    Ok(StatusCode::NO_CONTENT)
}
