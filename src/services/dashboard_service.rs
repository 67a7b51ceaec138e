// src/services/dashboard_service.rs

use chrono::{Datelike, Utc};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::DashboardRepository,
    models::dashboard::{
        CashFlow, HousesAvailability, PaymentStatus, PaymentStatusCounts, Totals,
    },
};

#[derive(Clone)]
pub struct DashboardService {
    dashboard_repo: DashboardRepository,
}

impl DashboardService {
    pub fn new(dashboard_repo: DashboardRepository) -> Self {
        Self { dashboard_repo }
    }

    pub async fn totals(&self, owner_id: Uuid) -> Result<Totals, AppError> {
        self.dashboard_repo.totals(owner_id).await
    }

    pub async fn houses_availability(
        &self,
        owner_id: Uuid,
    ) -> Result<HousesAvailability, AppError> {
        self.dashboard_repo.houses_availability(owner_id).await
    }

    // Fluxo de caixa do mês corrente: parcelas pagas menos despesas lançadas.
    pub async fn cash_flow(&self, owner_id: Uuid) -> Result<CashFlow, AppError> {
        let today = Utc::now().date_naive();
        let income = self
            .dashboard_repo
            .monthly_income(owner_id, today.year(), today.month())
            .await?;
        let expenses = self
            .dashboard_repo
            .monthly_expenses(owner_id, today.year(), today.month())
            .await?;

        Ok(CashFlow {
            total_monthly_income: income.round_dp(2),
            total_monthly_expenses: expenses.round_dp(2),
            total_profit_monthly: (income - expenses).round_dp(2),
        })
    }

    pub async fn payment_status(&self, owner_id: Uuid) -> Result<PaymentStatus, AppError> {
        let today = Utc::now().date_naive();
        let counts = self
            .dashboard_repo
            .payment_status_counts(owner_id, today)
            .await?;
        Ok(payment_status_percentages(counts))
    }
}

// Percentuais arredondados a 2 casas; mês sem parcelas devolve tudo 0.0.
pub fn payment_status_percentages(counts: PaymentStatusCounts) -> PaymentStatus {
    if counts.total == 0 {
        return PaymentStatus {
            total_monthly_paid: 0.0,
            total_monthly_overdue: 0.0,
            total_monthly_pending: 0.0,
        };
    }

    let pct = |n: i64| ((n as f64 / counts.total as f64) * 100.0 * 100.0).round() / 100.0;
    PaymentStatus {
        total_monthly_paid: pct(counts.paid),
        total_monthly_overdue: pct(counts.overdue),
        total_monthly_pending: pct(counts.pending),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentuais_somam_100() {
        let status = payment_status_percentages(PaymentStatusCounts {
            total: 3,
            paid: 1,
            overdue: 1,
            pending: 1,
        });
        let sum = status.total_monthly_paid
            + status.total_monthly_overdue
            + status.total_monthly_pending;
        // 33.33 * 3 = 99.99: tolerância de arredondamento
        assert!((sum - 100.0).abs() < 0.05);
    }

    #[test]
    fn mes_sem_parcelas_devolve_zeros() {
        let status = payment_status_percentages(PaymentStatusCounts::default());
        assert_eq!(status.total_monthly_paid, 0.0);
        assert_eq!(status.total_monthly_overdue, 0.0);
        assert_eq!(status.total_monthly_pending, 0.0);
    }

    #[test]
    fn todas_pagas_da_100_por_cento() {
        let status = payment_status_percentages(PaymentStatusCounts {
            total: 4,
            paid: 4,
            overdue: 0,
            pending: 0,
        });
        assert_eq!(status.total_monthly_paid, 100.0);
    }
}
