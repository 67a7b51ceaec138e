// src/models/tenant.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::patch::double_option;
use crate::models::address::Address;

// Inquilino (locatário). CPF único por locador.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: i32,

    #[schema(example = "98765432100")]
    pub cpf: String,

    #[schema(example = "61988887777")]
    pub contact: String,

    pub email: Option<String>,

    #[schema(example = "Maria Pereira")]
    pub name: String,

    pub profession: Option<String>,
    pub marital_status: Option<String>,

    #[schema(value_type = Option<String>, format = Date)]
    pub birth_date: Option<NaiveDate>,

    pub emergency_contact: Option<String>,

    #[schema(example = "3200.00")]
    pub income: Option<Decimal>,

    pub residents: Option<i32>,

    #[sqlx(flatten)]
    #[serde(flatten)]
    pub address: Address,

    pub owner_id: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Fiador: no máximo um por inquilino (tenant_id único).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Guarantor {
    pub id: i32,
    pub cpf: String,
    pub contact: String,
    pub email: Option<String>,
    pub name: String,
    pub profession: Option<String>,
    pub marital_status: Option<String>,

    #[schema(value_type = Option<String>, format = Date)]
    pub birth_date: Option<NaiveDate>,

    pub comment: Option<String>,
    pub income: Option<Decimal>,

    #[sqlx(flatten)]
    #[serde(flatten)]
    pub address: Address,

    pub tenant_id: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTenantPayload {
    #[validate(length(equal = 11, message = "O CPF deve ter 11 dígitos."))]
    pub cpf: String,
    #[validate(length(min = 8, message = "O contato fornecido é inválido."))]
    pub contact: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    pub profession: Option<String>,
    pub marital_status: Option<String>,
    #[schema(value_type = Option<String>, format = Date)]
    pub birth_date: Option<NaiveDate>,
    pub emergency_contact: Option<String>,
    pub income: Option<Decimal>,
    pub residents: Option<i32>,
    #[serde(flatten)]
    pub address: Address,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTenantPayload {
    pub contact: Option<String>,
    pub name: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub email: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub profession: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub marital_status: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub emergency_contact: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub income: Option<Option<Decimal>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i32>)]
    pub residents: Option<Option<i32>>,

    pub street: Option<String>,
    pub neighborhood: Option<String>,
    pub number: Option<i32>,
    pub zip_code: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGuarantorPayload {
    #[validate(length(equal = 11, message = "O CPF deve ter 11 dígitos."))]
    pub cpf: String,
    #[validate(length(min = 8, message = "O contato fornecido é inválido."))]
    pub contact: String,
    #[validate(email(message = "O e-mail fornecido é inválido."))]
    pub email: Option<String>,
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    pub profession: Option<String>,
    pub marital_status: Option<String>,
    #[schema(value_type = Option<String>, format = Date)]
    pub birth_date: Option<NaiveDate>,
    pub comment: Option<String>,
    pub income: Option<Decimal>,
    #[serde(flatten)]
    pub address: Address,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateGuarantorPayload {
    pub contact: Option<String>,
    pub name: Option<String>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub email: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub profession: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub marital_status: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub comment: Option<Option<String>>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub income: Option<Option<Decimal>>,

    pub street: Option<String>,
    pub neighborhood: Option<String>,
    pub number: Option<i32>,
    pub zip_code: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}
