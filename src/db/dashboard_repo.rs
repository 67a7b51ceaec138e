// src/db/dashboard_repo.rs

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::dashboard::{
        ExpenseByKind, HousesAvailability, MonthlyAmount, OccupancyByStatus, PaymentStatusCounts,
        Totals,
    },
};

// Agregados do painel e do relatório anual. Tudo escopado pelo locador
// através das mesmas cadeias de FK usadas no resto do sistema.
#[derive(Clone)]
pub struct DashboardRepository {
    pool: PgPool,
}

impl DashboardRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn totals(&self, owner_id: Uuid) -> Result<Totals, AppError> {
        let total_properties: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM properties WHERE owner_id = $1")
                .bind(owner_id)
                .fetch_one(&self.pool)
                .await?;

        let total_houses: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM houses h
            JOIN properties p ON h.property_id = p.id
            WHERE p.owner_id = $1
            "#,
        )
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        let total_tenants: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM tenants WHERE owner_id = $1")
                .bind(owner_id)
                .fetch_one(&self.pool)
                .await?;

        Ok(Totals {
            total_properties,
            total_houses,
            total_tenants,
        })
    }

    pub async fn houses_availability(
        &self,
        owner_id: Uuid,
    ) -> Result<HousesAvailability, AppError> {
        // Um único GROUP BY no lugar de três COUNTs separados.
        let rows: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT h.status::text, COUNT(*) FROM houses h
            JOIN properties p ON h.property_id = p.id
            WHERE p.owner_id = $1
            GROUP BY h.status
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;

        let mut availability = HousesAvailability {
            total_rented: 0,
            total_available: 0,
            total_maintenance: 0,
        };
        for (status, count) in rows {
            match status.as_str() {
                "RENTED" => availability.total_rented = count,
                "VACANT" => availability.total_available = count,
                "RENOVATION" => availability.total_maintenance = count,
                _ => {}
            }
        }
        Ok(availability)
    }

    // Receita: parcelas pagas com vencimento no mês. Despesa: lançamentos do mês.
    pub async fn monthly_income(
        &self,
        owner_id: Uuid,
        year: i32,
        month: u32,
    ) -> Result<Decimal, AppError> {
        let income: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(pi.value), 0)
            FROM payment_installments pi
            JOIN contracts c ON pi.contract_id = c.id
            WHERE EXTRACT(YEAR FROM pi.due_date) = $1
              AND EXTRACT(MONTH FROM pi.due_date) = $2
              AND pi.paid = TRUE
              AND c.owner_id = $3
            "#,
        )
        .bind(year)
        .bind(month as i32)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(income)
    }

    pub async fn monthly_expenses(
        &self,
        owner_id: Uuid,
        year: i32,
        month: u32,
    ) -> Result<Decimal, AppError> {
        let expenses: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(e.value), 0)
            FROM expenses e
            JOIN houses h ON e.house_id = h.id
            JOIN properties p ON h.property_id = p.id
            WHERE EXTRACT(YEAR FROM e.expense_date) = $1
              AND EXTRACT(MONTH FROM e.expense_date) = $2
              AND p.owner_id = $3
            "#,
        )
        .bind(year)
        .bind(month as i32)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(expenses)
    }

    // Contagens cruas das parcelas do mês corrente; o serviço converte em
    // percentuais. "Atrasada" é não paga com vencimento anterior a hoje.
    pub async fn payment_status_counts(
        &self,
        owner_id: Uuid,
        today: NaiveDate,
    ) -> Result<PaymentStatusCounts, AppError> {
        let row: (i64, i64, i64, i64) = sqlx::query_as(
            r#"
            SELECT COUNT(*),
                   COUNT(*) FILTER (WHERE pi.paid),
                   COUNT(*) FILTER (WHERE NOT pi.paid AND pi.due_date < $3),
                   COUNT(*) FILTER (WHERE NOT pi.paid AND pi.due_date >= $3)
            FROM payment_installments pi
            JOIN contracts c ON pi.contract_id = c.id
            WHERE EXTRACT(YEAR FROM pi.due_date) = $1
              AND EXTRACT(MONTH FROM pi.due_date) = $2
              AND c.owner_id = $4
            "#,
        )
        .bind(today.year())
        .bind(today.month() as i32)
        .bind(today)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(PaymentStatusCounts {
            total: row.0,
            paid: row.1,
            overdue: row.2,
            pending: row.3,
        })
    }

    // --- Relatório anual ---

    pub async fn yearly_paid_income(&self, owner_id: Uuid, year: i32) -> Result<Decimal, AppError> {
        let income: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(pi.value), 0)
            FROM payment_installments pi
            JOIN contracts c ON pi.contract_id = c.id
            WHERE EXTRACT(YEAR FROM pi.due_date) = $1
              AND pi.paid = TRUE
              AND c.owner_id = $2
            "#,
        )
        .bind(year)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(income)
    }

    pub async fn yearly_expenses(&self, owner_id: Uuid, year: i32) -> Result<Decimal, AppError> {
        let expenses: Decimal = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(e.value), 0)
            FROM expenses e
            JOIN houses h ON e.house_id = h.id
            JOIN properties p ON h.property_id = p.id
            WHERE EXTRACT(YEAR FROM e.expense_date) = $1
              AND p.owner_id = $2
            "#,
        )
        .bind(year)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(expenses)
    }

    pub async fn expenses_by_kind(
        &self,
        owner_id: Uuid,
        year: i32,
    ) -> Result<Vec<ExpenseByKind>, AppError> {
        let rows = sqlx::query_as::<_, ExpenseByKind>(
            r#"
            SELECT e.kind::text AS kind, SUM(e.value) AS total
            FROM expenses e
            JOIN houses h ON e.house_id = h.id
            JOIN properties p ON h.property_id = p.id
            WHERE EXTRACT(YEAR FROM e.expense_date) = $1
              AND p.owner_id = $2
            GROUP BY e.kind
            ORDER BY total DESC
            "#,
        )
        .bind(year)
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn occupancy_by_status(
        &self,
        owner_id: Uuid,
    ) -> Result<Vec<OccupancyByStatus>, AppError> {
        let rows = sqlx::query_as::<_, OccupancyByStatus>(
            r#"
            SELECT h.status::text AS status, COUNT(*) AS total
            FROM houses h
            JOIN properties p ON h.property_id = p.id
            WHERE p.owner_id = $1
            GROUP BY h.status
            ORDER BY total DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn paid_income_by_month(
        &self,
        owner_id: Uuid,
        year: i32,
    ) -> Result<Vec<MonthlyAmount>, AppError> {
        let rows = sqlx::query_as::<_, MonthlyAmount>(
            r#"
            SELECT CAST(EXTRACT(MONTH FROM pi.due_date) AS INT) AS month,
                   SUM(pi.value) AS total
            FROM payment_installments pi
            JOIN contracts c ON pi.contract_id = c.id
            WHERE EXTRACT(YEAR FROM pi.due_date) = $1
              AND pi.paid = TRUE
              AND c.owner_id = $2
            GROUP BY month
            ORDER BY month
            "#,
        )
        .bind(year)
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn expenses_by_month(
        &self,
        owner_id: Uuid,
        year: i32,
    ) -> Result<Vec<MonthlyAmount>, AppError> {
        let rows = sqlx::query_as::<_, MonthlyAmount>(
            r#"
            SELECT CAST(EXTRACT(MONTH FROM e.expense_date) AS INT) AS month,
                   SUM(e.value) AS total
            FROM expenses e
            JOIN houses h ON e.house_id = h.id
            JOIN properties p ON h.property_id = p.id
            WHERE EXTRACT(YEAR FROM e.expense_date) = $1
              AND p.owner_id = $2
            GROUP BY month
            ORDER BY month
            "#,
        )
        .bind(year)
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
