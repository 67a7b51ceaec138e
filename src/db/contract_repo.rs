// src/db/contract_repo.rs

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::contract::{Contract, CreateContractPayload, Inspection, PaymentInstallment},
};

// Linha do scan de inadimplência: parcela vencida + cadeia resolvida até o locador.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct OverdueInstallment {
    pub installment_id: i32,
    pub due_date: NaiveDate,
    pub value: Decimal,
    pub tenant_name: String,
    pub house_nickname: String,
    pub owner_id: Uuid,
    pub push_token: Option<String>,
}

#[derive(Clone)]
pub struct ContractRepository {
    pool: PgPool,
}

impl ContractRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // --- Contratos ---

    // Vínculo entre donos diferentes é invariante dura: casa, inquilino e
    // template são revalidados dentro da mesma transação do INSERT.
    pub async fn create_contract(
        &self,
        conn: &mut PgConnection,
        owner_id: Uuid,
        payload: &CreateContractPayload,
    ) -> Result<Contract, AppError> {
        let house_owner: Option<Uuid> = sqlx::query_scalar(
            r#"
            SELECT p.owner_id FROM houses h
            JOIN properties p ON h.property_id = p.id
            WHERE h.id = $1
            "#,
        )
        .bind(payload.house_id)
        .fetch_optional(&mut *conn)
        .await?;
        match house_owner {
            None => return Err(AppError::NotFound("Casa")),
            Some(o) if o != owner_id => return Err(AppError::Forbidden("esta casa")),
            _ => {}
        }

        let tenant_owner: Option<Uuid> =
            sqlx::query_scalar("SELECT owner_id FROM tenants WHERE id = $1")
                .bind(payload.tenant_id)
                .fetch_optional(&mut *conn)
                .await?;
        match tenant_owner {
            None => return Err(AppError::NotFound("Inquilino")),
            Some(o) if o != owner_id => return Err(AppError::Forbidden("este inquilino")),
            _ => {}
        }

        let template_owner: Option<Uuid> =
            sqlx::query_scalar("SELECT owner_id FROM templates WHERE id = $1")
                .bind(payload.template_id)
                .fetch_optional(&mut *conn)
                .await?;
        match template_owner {
            None => return Err(AppError::NotFound("Template")),
            Some(o) if o != owner_id => return Err(AppError::Forbidden("este template")),
            _ => {}
        }

        let created = sqlx::query_as::<_, Contract>(
            r#"
            INSERT INTO contracts
                (deposit_value, start_date, end_date, base_value, due_day,
                 readjustment, house_id, template_id, tenant_id, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(payload.deposit_value)
        .bind(payload.start_date)
        .bind(payload.end_date)
        .bind(payload.base_value)
        .bind(payload.due_day)
        .bind(payload.readjustment)
        .bind(payload.house_id)
        .bind(payload.template_id)
        .bind(payload.tenant_id)
        .bind(owner_id)
        .fetch_one(&mut *conn)
        .await?;
        Ok(created)
    }

    pub async fn list(&self, owner_id: Uuid) -> Result<Vec<Contract>, AppError> {
        let contracts =
            sqlx::query_as::<_, Contract>("SELECT * FROM contracts WHERE owner_id = $1 ORDER BY id")
                .bind(owner_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(contracts)
    }

    pub async fn find_scoped(
        &self,
        owner_id: Uuid,
        contract_id: i32,
    ) -> Result<Contract, AppError> {
        let contract = sqlx::query_as::<_, Contract>("SELECT * FROM contracts WHERE id = $1")
            .bind(contract_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound("Contrato"))?;

        if contract.owner_id != owner_id {
            return Err(AppError::Forbidden("este contrato"));
        }
        Ok(contract)
    }

    pub async fn delete_cascade(
        &self,
        conn: &mut PgConnection,
        contract_id: i32,
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM payment_installments WHERE contract_id = $1")
            .bind(contract_id)
            .execute(&mut *conn)
            .await?;

        sqlx::query("DELETE FROM inspections WHERE contract_id = $1")
            .bind(contract_id)
            .execute(&mut *conn)
            .await?;

        sqlx::query("DELETE FROM contracts WHERE id = $1")
            .bind(contract_id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    pub async fn set_signed_pdf(&self, contract_id: i32, url: &str) -> Result<Contract, AppError> {
        let updated = sqlx::query_as::<_, Contract>(
            "UPDATE contracts SET signed_pdf_url = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(contract_id)
        .bind(url)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    // --- Parcelas ---

    // Insere o lote dentro da transação recebida; qualquer falha (inclusive
    // a unique de vencimento por contrato) desfaz o lote inteiro no rollback.
    pub async fn insert_installments(
        &self,
        conn: &mut PgConnection,
        contract_id: i32,
        schedule: &[(NaiveDate, Decimal)],
    ) -> Result<Vec<PaymentInstallment>, AppError> {
        let mut created = Vec::with_capacity(schedule.len());
        for (due_date, value) in schedule {
            let installment = sqlx::query_as::<_, PaymentInstallment>(
                r#"
                INSERT INTO payment_installments (value, paid, due_date, contract_id)
                VALUES ($1, FALSE, $2, $3)
                RETURNING *
                "#,
            )
            .bind(value)
            .bind(due_date)
            .bind(contract_id)
            .fetch_one(&mut *conn)
            .await?;
            created.push(installment);
        }
        Ok(created)
    }

    pub async fn list_installments(
        &self,
        contract_id: i32,
    ) -> Result<Vec<PaymentInstallment>, AppError> {
        let installments = sqlx::query_as::<_, PaymentInstallment>(
            "SELECT * FROM payment_installments WHERE contract_id = $1 ORDER BY due_date",
        )
        .bind(contract_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(installments)
    }

    pub async fn find_installment_scoped(
        &self,
        owner_id: Uuid,
        installment_id: i32,
    ) -> Result<PaymentInstallment, AppError> {
        let installment = sqlx::query_as::<_, PaymentInstallment>(
            "SELECT * FROM payment_installments WHERE id = $1",
        )
        .bind(installment_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or(AppError::NotFound("Parcela"))?;

        let chain_owner: Uuid = sqlx::query_scalar("SELECT owner_id FROM contracts WHERE id = $1")
            .bind(installment.contract_id)
            .fetch_one(&self.pool)
            .await?;

        if chain_owner != owner_id {
            return Err(AppError::Forbidden("esta parcela"));
        }
        Ok(installment)
    }

    pub async fn save_installment(
        &self,
        installment: &PaymentInstallment,
    ) -> Result<PaymentInstallment, AppError> {
        let updated = sqlx::query_as::<_, PaymentInstallment>(
            r#"
            UPDATE payment_installments
            SET paid = $2, payment_type = $3, payment_date = $4, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(installment.id)
        .bind(installment.paid)
        .bind(installment.payment_type)
        .bind(installment.payment_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    // Parcelas não pagas, com vencimento no mês corrente e anterior a hoje,
    // de todos os locadores. Alimenta o disparo de notificações.
    pub async fn list_overdue_installments(
        &self,
        today: NaiveDate,
    ) -> Result<Vec<OverdueInstallment>, AppError> {
        let overdue = sqlx::query_as::<_, OverdueInstallment>(
            r#"
            SELECT pi.id AS installment_id,
                   pi.due_date,
                   pi.value,
                   t.name AS tenant_name,
                   h.nickname AS house_nickname,
                   o.id AS owner_id,
                   o.push_token
            FROM payment_installments pi
            JOIN contracts c ON pi.contract_id = c.id
            JOIN tenants t ON c.tenant_id = t.id
            JOIN houses h ON c.house_id = h.id
            JOIN owners o ON c.owner_id = o.id
            WHERE pi.paid = FALSE
              AND EXTRACT(MONTH FROM pi.due_date) = $1
              AND EXTRACT(YEAR FROM pi.due_date) = $2
              AND pi.due_date < $3
            ORDER BY pi.due_date
            "#,
        )
        .bind(today.month() as i32)
        .bind(today.year())
        .bind(today)
        .fetch_all(&self.pool)
        .await?;
        Ok(overdue)
    }

    // --- Vistorias ---

    pub async fn find_inspection_by_contract(
        &self,
        contract_id: i32,
    ) -> Result<Option<Inspection>, AppError> {
        let inspection =
            sqlx::query_as::<_, Inspection>("SELECT * FROM inspections WHERE contract_id = $1")
                .bind(contract_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(inspection)
    }

    // Upsert idempotente chaveado pelo contrato: reenvio substitui o PDF e a
    // data da vistoria existente em vez de criar uma segunda linha.
    pub async fn upsert_inspection(
        &self,
        contract_id: i32,
        report_pdf_url: &str,
        inspection_date: NaiveDate,
    ) -> Result<Inspection, AppError> {
        let inspection = sqlx::query_as::<_, Inspection>(
            r#"
            INSERT INTO inspections (report_pdf_url, inspection_date, contract_id)
            VALUES ($1, $2, $3)
            ON CONFLICT (contract_id)
            DO UPDATE SET report_pdf_url = EXCLUDED.report_pdf_url,
                          inspection_date = EXCLUDED.inspection_date,
                          updated_at = now()
            RETURNING *
            "#,
        )
        .bind(report_pdf_url)
        .bind(inspection_date)
        .bind(contract_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(inspection)
    }

    pub async fn find_inspection_scoped(
        &self,
        owner_id: Uuid,
        inspection_id: i32,
    ) -> Result<Inspection, AppError> {
        let inspection = sqlx::query_as::<_, Inspection>("SELECT * FROM inspections WHERE id = $1")
            .bind(inspection_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound("Vistoria"))?;

        let chain_owner: Uuid = sqlx::query_scalar("SELECT owner_id FROM contracts WHERE id = $1")
            .bind(inspection.contract_id)
            .fetch_one(&self.pool)
            .await?;

        if chain_owner != owner_id {
            return Err(AppError::Forbidden("esta vistoria"));
        }
        Ok(inspection)
    }

    pub async fn set_inspection_signed_pdf(
        &self,
        inspection_id: i32,
        url: &str,
    ) -> Result<Inspection, AppError> {
        let updated = sqlx::query_as::<_, Inspection>(
            "UPDATE inspections SET signed_pdf_url = $2, updated_at = now() WHERE id = $1 RETURNING *",
        )
        .bind(inspection_id)
        .bind(url)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }
}
