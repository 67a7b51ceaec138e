// src/models/dashboard.rs

use rust_decimal::Decimal;
use serde::Serialize;
use sqlx::FromRow;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub total_properties: i64,
    pub total_houses: i64,
    pub total_tenants: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct HousesAvailability {
    pub total_rented: i64,
    pub total_available: i64,
    pub total_maintenance: i64,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CashFlow {
    #[schema(example = "3200.00")]
    pub total_monthly_income: Decimal,
    #[schema(example = "540.00")]
    pub total_monthly_expenses: Decimal,
    #[schema(example = "2660.00")]
    pub total_profit_monthly: Decimal,
}

// Percentuais das parcelas com vencimento no mês corrente.
// Todos 0.0 quando não há parcelas no mês (sem divisão por zero).
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatus {
    pub total_monthly_paid: f64,
    pub total_monthly_overdue: f64,
    pub total_monthly_pending: f64,
}

// Contagens cruas do mês corrente, antes do cálculo de percentuais.
#[derive(Debug, Clone, Copy, Default)]
pub struct PaymentStatusCounts {
    pub total: i64,
    pub paid: i64,
    pub overdue: i64,
    pub pending: i64,
}

// --- Dados do relatório anual ---

#[derive(Debug, Clone, FromRow)]
pub struct MonthlyAmount {
    pub month: i32,
    pub total: Decimal,
}

#[derive(Debug, Clone, FromRow)]
pub struct ExpenseByKind {
    pub kind: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, FromRow)]
pub struct OccupancyByStatus {
    pub status: String,
    pub total: i64,
}
