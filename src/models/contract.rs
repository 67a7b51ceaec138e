// src/models/contract.rs

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::common::patch::double_option;
use crate::models::auth::Owner;
use crate::models::property::{House, Property};
use crate::models::tenant::{Guarantor, Tenant};

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "warranty_kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WarrantyKind {
    Guarantor, // Fiador
    Deposit,   // Caução
    None,      // Nenhuma
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "contract_kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContractKind {
    Residential,
    Commercial,
}

// Índice de reajuste anual aplicado pelo gerador de parcelas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "readjustment_index", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReadjustmentIndex {
    Igpm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "payment_kind", rename_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentKind {
    Cash,
    Card,
    Transfer,
    Other,
}

// --- Structs ---

// Conjunto reutilizável de cláusulas de locação.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: i32,

    #[schema(example = "Residencial padrão com fiador")]
    pub name: String,

    pub description: Option<String>,
    pub garage: bool,
    pub warranty: WarrantyKind,
    pub pets: bool,
    pub sublease: bool,
    pub kind: ContractKind,
    pub owner_id: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub id: i32,

    #[schema(example = "1500.00")]
    pub deposit_value: Option<Decimal>,

    #[schema(value_type = String, format = Date, example = "2024-01-10")]
    pub start_date: NaiveDate,

    #[schema(value_type = String, format = Date, example = "2025-01-10")]
    pub end_date: NaiveDate,

    #[schema(example = "1000.00")]
    pub base_value: Decimal,

    #[schema(example = 10)]
    pub due_day: i32,

    pub readjustment: Option<ReadjustmentIndex>,
    pub signed_pdf_url: Option<String>,

    pub house_id: i32,
    pub template_id: i32,
    pub tenant_id: i32,
    pub owner_id: Uuid,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentInstallment {
    pub id: i32,

    #[schema(example = "1000.00")]
    pub value: Decimal,

    pub paid: bool,
    pub payment_type: Option<PaymentKind>,

    #[schema(value_type = String, format = Date, example = "2024-02-10")]
    pub due_date: NaiveDate,

    #[schema(value_type = Option<String>, format = Date)]
    pub payment_date: Option<NaiveDate>,

    pub contract_id: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Vistoria: no máximo uma por contrato (contract_id único).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Inspection {
    pub id: i32,
    pub report_pdf_url: Option<String>,
    pub signed_pdf_url: Option<String>,

    #[schema(value_type = String, format = Date)]
    pub inspection_date: NaiveDate,

    pub contract_id: i32,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Grafo completo de um contrato, resolvido dentro do escopo do locador.
// Usado pelo montador de documentos.
#[derive(Debug, Clone)]
pub struct ContractBundle {
    pub contract: Contract,
    pub template: Template,
    pub tenant: Tenant,
    pub house: House,
    pub property: Property,
    pub owner: Owner,
    pub guarantor: Option<Guarantor>,
}

// --- Payloads ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplatePayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    pub name: String,
    pub description: Option<String>,
    pub garage: bool,
    pub warranty: WarrantyKind,
    pub pets: bool,
    pub sublease: bool,
    pub kind: ContractKind,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTemplatePayload {
    pub name: Option<String>,
    pub garage: Option<bool>,
    pub warranty: Option<WarrantyKind>,
    pub pets: Option<bool>,
    pub sublease: Option<bool>,
    pub kind: Option<ContractKind>,

    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub description: Option<Option<String>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateContractPayload {
    pub deposit_value: Option<Decimal>,
    #[schema(value_type = String, format = Date)]
    pub start_date: NaiveDate,
    #[schema(value_type = String, format = Date)]
    pub end_date: NaiveDate,
    pub base_value: Decimal,
    #[validate(range(min = 1, max = 31, message = "O dia de vencimento deve estar entre 1 e 31."))]
    pub due_day: i32,
    pub readjustment: Option<ReadjustmentIndex>,
    pub house_id: i32,
    pub template_id: i32,
    pub tenant_id: i32,
}

// PATCH de parcela: marca pagamento. Campo ausente não altera.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInstallmentPayload {
    pub paid: Option<bool>,
    pub payment_type: Option<PaymentKind>,
    #[schema(value_type = Option<String>, format = Date)]
    pub payment_date: Option<NaiveDate>,
}

// --- Formulário de vistoria (parte JSON do multipart) ---

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemCondition {
    pub condition: Option<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaintCondition {
    pub condition: Option<String>,
    pub paint_type: Option<String>,
    pub color: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct KeysCondition {
    pub number: Option<String>,
    pub notes: Option<String>,
}

// Cada seção é opcional e só vira parágrafo no laudo se for enviada.
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct InspectionForm {
    #[schema(value_type = String, format = Date)]
    pub inspection_date: NaiveDate,
    pub paint: Option<PaintCondition>,
    pub finish: Option<ItemCondition>,
    pub electrical: Option<ItemCondition>,
    pub locks: Option<ItemCondition>,
    pub flooring: Option<ItemCondition>,
    pub windows: Option<ItemCondition>,
    pub roof: Option<ItemCondition>,
    pub plumbing: Option<ItemCondition>,
    pub furniture: Option<ItemCondition>,
    pub keys: Option<KeysCondition>,
}
