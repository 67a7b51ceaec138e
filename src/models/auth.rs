// src/models/auth.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::patch::double_option;
use crate::models::address::Address;

// O proprietário (locador), raiz da cadeia de posse de todas as entidades.
#[derive(Debug, Clone, Serialize, sqlx::FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub id: Uuid,

    #[schema(example = "locador@exemplo.com")]
    pub email: String,

    #[serde(skip_serializing)] // IMPORTANTE para segurança
    pub password_hash: String,

    #[schema(example = "João da Silva")]
    pub name: String,

    #[schema(example = "61999990000")]
    pub phone: String,

    #[schema(example = "12345678901")]
    pub cpf: String,

    #[schema(value_type = String, format = Date, example = "1980-05-20")]
    pub birth_date: NaiveDate,

    pub marital_status: Option<String>,
    pub profession: Option<String>,

    #[serde(skip_serializing)]
    pub signature_hash: Option<String>,

    pub photo_url: Option<String>,

    // Token de push do aplicativo do locador; alvo do aviso de parcela vencida.
    pub push_token: Option<String>,

    #[sqlx(flatten)]
    #[serde(flatten)]
    pub address: Address,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Refresh token de uso único; consumido (used = true) na rotação.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RefreshToken {
    pub id: i64,
    pub token: String,
    pub used: bool,
    pub expires_at: i64,
    pub owner_id: Uuid,
}

// Estrutura de dados ("claims") dentro do JWT de acesso.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub iss: String, // Issuer (verificado na validação)
    pub sub: Uuid,   // Subject (ID do usuário)
    pub exp: usize,  // Expiration time
    pub iat: usize,  // Issued At
}

// Claims do token de redefinição de senha, enviado por e-mail.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResetClaims {
    pub iss: String,
    pub sub: String, // e-mail do usuário
    pub exp: usize,
    pub iat: usize,
    #[serde(rename = "type")]
    pub kind: String, // sempre "reset_password"
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterOwnerPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    #[validate(length(min = 8, message = "O telefone fornecido é inválido."))]
    pub phone: String,
    #[validate(length(equal = 11, message = "O CPF deve ter 11 dígitos."))]
    pub cpf: String,
    #[schema(value_type = String, format = Date)]
    pub birth_date: NaiveDate,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenPayload {
    pub refresh_token: String,
}

// Par de tokens devolvido no registro, login e rotação.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TokenPairResponse {
    #[schema(example = "Bearer")]
    pub token_type: &'static str,
    pub access_token: String,
    pub expires_at: i64,
    pub refresh_token: String,
    pub refresh_token_expires_at: i64,
}

// PATCH /users/me — semântica esparsa: campo ausente não altera,
// campo null limpa o valor (apenas nos opcionais).
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOwnerPayload {
    pub name: Option<String>,
    pub phone: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub marital_status: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub profession: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub signature_hash: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub photo_url: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub push_token: Option<Option<String>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordPayload {
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ForgotPasswordPayload {
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordConfirmPayload {
    pub token: String,
    #[validate(length(min = 6, message = "A senha deve ter no mínimo 6 caracteres."))]
    pub new_password: String,
    pub confirm_password: String,
}
