// src/services/installment_service.rs

use chrono::{Datelike, Months, NaiveDate};
use rust_decimal::Decimal;
use sqlx::PgPool;

use crate::{
    common::error::AppError,
    db::ContractRepository,
    models::contract::{Contract, PaymentInstallment, ReadjustmentIndex},
};

// Fator anual do IGPM aplicado pelo gerador (4,5% a.a.).
const IGPM_YEARLY_FACTOR: Decimal = Decimal::from_parts(1045, 0, 0, false, 3);

#[derive(Clone)]
pub struct InstallmentService {
    contract_repo: ContractRepository,
    pool: PgPool,
}

impl InstallmentService {
    pub fn new(contract_repo: ContractRepository, pool: PgPool) -> Self {
        Self {
            contract_repo,
            pool,
        }
    }

    // Gera e persiste o cronograma completo do contrato numa transação.
    // Falha em qualquer parcela desfaz o lote inteiro.
    pub async fn generate(&self, contract: &Contract) -> Result<Vec<PaymentInstallment>, AppError> {
        let schedule = build_schedule(
            contract.start_date,
            contract.end_date,
            contract.due_day,
            contract.base_value,
            contract.readjustment,
        )?;

        let mut tx = self.pool.begin().await?;
        let created = self
            .contract_repo
            .insert_installments(&mut *tx, contract.id, &schedule)
            .await
            .map_err(|e| match e {
                AppError::DatabaseError(db) if is_unique_violation(&db) => {
                    AppError::InstallmentCreation(
                        "já existem parcelas geradas para este contrato".to_string(),
                    )
                }
                other => other,
            })?;
        tx.commit().await?;

        tracing::info!(
            "✅ {} parcelas geradas para o contrato {}",
            created.len(),
            contract.id
        );
        Ok(created)
    }
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .map(|db| db.is_unique_violation())
        .unwrap_or(false)
}

pub fn contract_duration_months(start: NaiveDate, end: NaiveDate) -> i32 {
    (end.year() - start.year()) * 12 + (end.month() as i32 - start.month() as i32)
}

// Cronograma de vencimentos: uma parcela por mês a partir do mês seguinte
// ao início, ancorada no dia de vencimento. O reajuste anual incide a cada
// 12 parcelas sobre o valor corrente sem arredondar o acumulador; só o
// valor persistido é arredondado a 2 casas.
pub fn build_schedule(
    start: NaiveDate,
    end: NaiveDate,
    due_day: i32,
    base_value: Decimal,
    readjustment: Option<ReadjustmentIndex>,
) -> Result<Vec<(NaiveDate, Decimal)>, AppError> {
    let duration = contract_duration_months(start, end);
    if duration < 1 {
        return Err(AppError::ContractDurationTooShort);
    }

    let anchor = start.with_day(due_day as u32).ok_or_else(|| {
        AppError::BadRequest("O dia de vencimento não existe no mês inicial do contrato.".into())
    })?;

    let mut running = base_value;
    let mut schedule = Vec::with_capacity(duration as usize);

    for i in 0..duration {
        if i > 0 && i % 12 == 0 && readjustment == Some(ReadjustmentIndex::Igpm) {
            running *= IGPM_YEARLY_FACTOR;
        }

        // Months::new clampa o dia no fim do mês (31 -> 28/29/30 quando preciso)
        let due_date = anchor
            .checked_add_months(Months::new((i + 1) as u32))
            .ok_or_else(|| {
                AppError::InstallmentCreation("data de vencimento fora do intervalo".to_string())
            })?;

        schedule.push((due_date, running.round_dp(2)));
    }

    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn contrato_de_um_ano_gera_12_parcelas() {
        let schedule =
            build_schedule(d(2024, 1, 10), d(2025, 1, 10), 10, dec!(1000.00), None).unwrap();
        assert_eq!(schedule.len(), 12);
        assert_eq!(schedule[0].0, d(2024, 2, 10));
        assert_eq!(schedule[11].0, d(2025, 1, 10));
        assert!(schedule.iter().all(|(_, v)| *v == dec!(1000.00)));
    }

    #[test]
    fn igpm_reajusta_a_partir_da_13a_parcela() {
        let schedule = build_schedule(
            d(2024, 1, 10),
            d(2026, 1, 10),
            10,
            dec!(1000.00),
            Some(ReadjustmentIndex::Igpm),
        )
        .unwrap();
        assert_eq!(schedule.len(), 24);
        assert_eq!(schedule[11].1, dec!(1000.00));
        assert_eq!(schedule[12].1, dec!(1045.00));
        assert_eq!(schedule[23].1, dec!(1045.00));
    }

    #[test]
    fn duracao_menor_que_um_mes_e_recusada() {
        let result = build_schedule(d(2024, 1, 10), d(2024, 1, 25), 10, dec!(1000.00), None);
        assert!(matches!(result, Err(AppError::ContractDurationTooShort)));
    }

    #[test]
    fn vencimentos_sao_estritamente_crescentes() {
        let schedule =
            build_schedule(d(2024, 1, 5), d(2025, 7, 5), 31, dec!(850.00), None).unwrap();
        for pair in schedule.windows(2) {
            assert!(pair[0].0 < pair[1].0);
        }
        // Fevereiro clampa o dia 31 para o último dia do mês
        assert_eq!(schedule[0].0, d(2024, 2, 29));
    }

    #[test]
    fn duracao_em_meses_ignora_o_dia() {
        assert_eq!(contract_duration_months(d(2024, 1, 31), d(2024, 2, 1)), 1);
        assert_eq!(contract_duration_months(d(2024, 3, 1), d(2024, 2, 28)), -1);
    }
}
