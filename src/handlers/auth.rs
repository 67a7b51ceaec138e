// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{
        LoginPayload, Owner, RefreshTokenPayload, RegisterOwnerPayload, TokenPairResponse,
    },
};

#[derive(serde::Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub owner: Owner,
    #[serde(flatten)]
    pub tokens: TokenPairResponse,
}

// Handler de registro
#[utoipa::path(
    post,
    path = "/auth/register",
    tag = "auth",
    request_body = RegisterOwnerPayload,
    responses(
        (status = 201, description = "Locador criado", body = RegisterResponse),
        (status = 409, description = "E-mail já cadastrado"),
    )
)]
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterOwnerPayload>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let (owner, tokens) = app_state.auth_service.register(&payload).await?;
    Ok((StatusCode::CREATED, Json(RegisterResponse { owner, tokens })))
}

// Handler de login
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginPayload,
    responses(
        (status = 200, description = "Par de tokens", body = TokenPairResponse),
        (status = 401, description = "Credenciais inválidas"),
    )
)]
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<TokenPairResponse>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let tokens = app_state
        .auth_service
        .login(&payload.email, &payload.password)
        .await?;
    Ok(Json(tokens))
}

// Rotação do refresh token: o token enviado é consumido.
#[utoipa::path(
    post,
    path = "/auth/refresh-token",
    tag = "auth",
    request_body = RefreshTokenPayload,
    responses(
        (status = 200, description = "Novo par de tokens", body = TokenPairResponse),
        (status = 404, description = "Refresh token desconhecido"),
        (status = 403, description = "Refresh token já usado ou expirado"),
    )
)]
pub async fn refresh_token(
    State(app_state): State<AppState>,
    Json(payload): Json<RefreshTokenPayload>,
) -> Result<Json<TokenPairResponse>, AppError> {
    let tokens = app_state
        .auth_service
        .refresh(&payload.refresh_token)
        .await?;
    Ok(Json(tokens))
}
