// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::{common::error::AppError, config::AppState, models::auth::Owner};

// Camada de autenticação: valida o bearer token e injeta o locador nos
// extensions da requisição. Tudo que está atrás desta camada pode assumir
// um Owner presente.
pub async fn auth_guard(
    State(app_state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let Some(TypedHeader(Authorization(bearer))) = bearer else {
        return Err(AppError::InvalidToken);
    };

    let owner = app_state.auth_service.validate_token(bearer.token()).await?;
    request.extensions_mut().insert(owner);
    Ok(next.run(request).await)
}

// Extrator para obter o locador autenticado diretamente nos handlers
pub struct AuthenticatedOwner(pub Owner);

impl<S> FromRequestParts<S> for AuthenticatedOwner
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Owner>()
            .cloned()
            .map(AuthenticatedOwner)
            .ok_or(AppError::InvalidToken)
    }
}
