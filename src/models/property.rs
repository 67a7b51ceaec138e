// src/models/property.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::patch::double_option;
use crate::models::address::Address;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "house_status", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum HouseStatus {
    Rented,     // Alugada
    Vacant,     // Vaga
    Renovation, // Em reforma
}

// Usado na leitura dos campos de formulário multipart.
impl FromStr for HouseStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "RENTED" => Ok(HouseStatus::Rented),
            "VACANT" => Ok(HouseStatus::Vacant),
            "RENOVATION" => Ok(HouseStatus::Renovation),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "expense_kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpenseKind {
    Maintenance, // Manutenção
    Repair,      // Reparo
    Tax,         // Imposto
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: i32,

    #[schema(example = "Vila Norte")]
    pub nickname: String,

    pub photo_url: Option<String>,

    #[schema(example = "850.00")]
    pub iptu_value: Decimal,

    #[sqlx(flatten)]
    #[serde(flatten)]
    pub address: Address,

    pub owner_id: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct House {
    pub id: i32,

    #[schema(example = "Casa 03")]
    pub nickname: String,

    pub photo_url: Option<String>,

    #[schema(example = 4)]
    pub rooms: i32,

    #[schema(example = 2)]
    pub bathrooms: i32,

    pub furnished: bool,
    pub status: HouseStatus,
    pub property_id: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: i32,
    pub kind: ExpenseKind,

    #[schema(example = "230.00")]
    pub value: Decimal,

    #[schema(value_type = String, format = Date, example = "2025-03-15")]
    pub expense_date: NaiveDate,

    pub house_id: i32,
    pub created_at: DateTime<Utc>,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyPayload {
    #[validate(length(min = 1, message = "O apelido é obrigatório."))]
    pub nickname: String,
    pub photo_url: Option<String>,
    pub iptu_value: Decimal,
    #[serde(flatten)]
    pub address: Address,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePropertyPayload {
    pub nickname: Option<String>,
    pub iptu_value: Option<Decimal>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub photo_url: Option<Option<String>>,

    pub street: Option<String>,
    pub neighborhood: Option<String>,
    pub number: Option<i32>,
    pub zip_code: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
}

// Montado a partir dos campos do formulário multipart de criação de casa.
#[derive(Debug)]
pub struct NewHouse {
    pub nickname: String,
    pub photo_url: Option<String>,
    pub rooms: i32,
    pub bathrooms: i32,
    pub furnished: bool,
    pub status: HouseStatus,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHousePayload {
    pub nickname: Option<String>,
    pub rooms: Option<i32>,
    pub bathrooms: Option<i32>,
    pub furnished: Option<bool>,
    pub status: Option<HouseStatus>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub photo_url: Option<Option<String>>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpensePayload {
    pub kind: ExpenseKind,
    pub value: Decimal,
    #[schema(value_type = String, format = Date)]
    pub expense_date: NaiveDate,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExpensePayload {
    pub kind: Option<ExpenseKind>,
    pub value: Option<Decimal>,
    #[schema(value_type = Option<String>, format = Date)]
    pub expense_date: Option<NaiveDate>,
}
