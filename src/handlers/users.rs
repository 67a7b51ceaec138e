// src/handlers/users.rs

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedOwner,
    models::auth::{
        ForgotPasswordPayload, Owner, ResetPasswordConfirmPayload, UpdateOwnerPayload,
        UpdatePasswordPayload,
    },
};

#[utoipa::path(
    get,
    path = "/users/me",
    tag = "users",
    security(("bearer" = [])),
    responses((status = 200, description = "Perfil do locador autenticado", body = Owner))
)]
pub async fn get_me(AuthenticatedOwner(owner): AuthenticatedOwner) -> Json<Owner> {
    Json(owner)
}

// PATCH esparso: campo ausente não altera, null explícito limpa o valor.
#[utoipa::path(
    patch,
    path = "/users/me",
    tag = "users",
    security(("bearer" = [])),
    request_body = UpdateOwnerPayload,
    responses((status = 200, description = "Perfil atualizado", body = Owner))
)]
pub async fn update_me(
    State(app_state): State<AppState>,
    AuthenticatedOwner(mut owner): AuthenticatedOwner,
    Json(payload): Json<UpdateOwnerPayload>,
) -> Result<Json<Owner>, AppError> {
    if let Some(name) = payload.name {
        owner.name = name;
    }
    if let Some(phone) = payload.phone {
        owner.phone = phone;
    }
    if let Some(marital_status) = payload.marital_status {
        owner.marital_status = marital_status;
    }
    if let Some(profession) = payload.profession {
        owner.profession = profession;
    }
    if let Some(signature_hash) = payload.signature_hash {
        owner.signature_hash = signature_hash;
    }
    if let Some(photo_url) = payload.photo_url {
        owner.photo_url = photo_url;
    }
    if let Some(push_token) = payload.push_token {
        owner.push_token = push_token;
    }

    let updated = app_state.owner_repo.save_profile(&owner).await?;
    Ok(Json(updated))
}

// Apaga a conta e todo o grafo de dados do locador.
#[utoipa::path(
    delete,
    path = "/users/me",
    tag = "users",
    security(("bearer" = [])),
    responses((status = 204, description = "Conta removida"))
)]
pub async fn delete_me(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
) -> Result<StatusCode, AppError> {
    app_state.auth_service.delete_account(owner.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// Troca de senha autenticada.
#[utoipa::path(
    post,
    path = "/users/reset-password",
    tag = "users",
    security(("bearer" = [])),
    request_body = UpdatePasswordPayload,
    responses((status = 204, description = "Senha alterada"))
)]
pub async fn reset_password(
    State(app_state): State<AppState>,
    AuthenticatedOwner(owner): AuthenticatedOwner,
    Json(payload): Json<UpdatePasswordPayload>,
) -> Result<StatusCode, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    app_state
        .auth_service
        .change_password(owner.id, &payload.password)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// Sempre 200, exista ou não o e-mail.
#[utoipa::path(
    post,
    path = "/users/forgot-password",
    tag = "users",
    request_body = ForgotPasswordPayload,
    responses((status = 200, description = "Se o e-mail existir, o link de redefinição foi enviado"))
)]
pub async fn forgot_password(
    State(app_state): State<AppState>,
    Json(payload): Json<ForgotPasswordPayload>,
) -> Result<Json<serde_json::Value>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    app_state.auth_service.forgot_password(&payload.email).await?;
    Ok(Json(serde_json::json!({
        "message": "Se o e-mail estiver cadastrado, as instruções foram enviadas."
    })))
}

#[utoipa::path(
    post,
    path = "/users/reset-password/confirm",
    tag = "users",
    request_body = ResetPasswordConfirmPayload,
    responses(
        (status = 204, description = "Senha redefinida"),
        (status = 400, description = "Token inválido/expirado ou senhas não coincidem"),
    )
)]
pub async fn reset_password_confirm(
    State(app_state): State<AppState>,
    Json(payload): Json<ResetPasswordConfirmPayload>,
) -> Result<StatusCode, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;
    app_state
        .auth_service
        .reset_password_confirm(&payload)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
