// src/db/tenant_repo.rs

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::tenant::{CreateGuarantorPayload, CreateTenantPayload, Guarantor, Tenant},
};

#[derive(Clone)]
pub struct TenantRepository {
    pool: PgPool,
}

impl TenantRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // --- Inquilinos ---

    pub async fn create_tenant(
        &self,
        owner_id: Uuid,
        payload: &CreateTenantPayload,
    ) -> Result<Tenant, AppError> {
        sqlx::query_as::<_, Tenant>(
            r#"
            INSERT INTO tenants
                (cpf, contact, email, name, profession, marital_status, birth_date,
                 emergency_contact, income, residents, street, neighborhood, number,
                 zip_code, city, state, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING *
            "#,
        )
        .bind(&payload.cpf)
        .bind(&payload.contact)
        .bind(&payload.email)
        .bind(&payload.name)
        .bind(&payload.profession)
        .bind(&payload.marital_status)
        .bind(payload.birth_date)
        .bind(&payload.emergency_contact)
        .bind(payload.income)
        .bind(payload.residents)
        .bind(&payload.address.street)
        .bind(&payload.address.neighborhood)
        .bind(payload.address.number)
        .bind(&payload.address.zip_code)
        .bind(&payload.address.city)
        .bind(&payload.address.state)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Violação da unique (cpf, owner_id)
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::TenantAlreadyExists;
                }
            }
            AppError::DatabaseError(e)
        })
    }

    pub async fn list_tenants(&self, owner_id: Uuid) -> Result<Vec<Tenant>, AppError> {
        let tenants =
            sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE owner_id = $1 ORDER BY id")
                .bind(owner_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(tenants)
    }

    pub async fn find_tenant_scoped(
        &self,
        owner_id: Uuid,
        tenant_id: i32,
    ) -> Result<Tenant, AppError> {
        let tenant = sqlx::query_as::<_, Tenant>("SELECT * FROM tenants WHERE id = $1")
            .bind(tenant_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound("Inquilino"))?;

        if tenant.owner_id != owner_id {
            return Err(AppError::Forbidden("este inquilino"));
        }
        Ok(tenant)
    }

    pub async fn save_tenant(&self, tenant: &Tenant) -> Result<Tenant, AppError> {
        let updated = sqlx::query_as::<_, Tenant>(
            r#"
            UPDATE tenants
            SET contact = $2, email = $3, name = $4, profession = $5,
                marital_status = $6, emergency_contact = $7, income = $8,
                residents = $9, street = $10, neighborhood = $11, number = $12,
                zip_code = $13, city = $14, state = $15, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(tenant.id)
        .bind(&tenant.contact)
        .bind(&tenant.email)
        .bind(&tenant.name)
        .bind(&tenant.profession)
        .bind(&tenant.marital_status)
        .bind(&tenant.emergency_contact)
        .bind(tenant.income)
        .bind(tenant.residents)
        .bind(&tenant.address.street)
        .bind(&tenant.address.neighborhood)
        .bind(tenant.address.number)
        .bind(&tenant.address.zip_code)
        .bind(&tenant.address.city)
        .bind(&tenant.address.state)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    // Fiador primeiro, depois o inquilino. Contratos vinculados fazem a
    // FK RESTRICT barrar a deleção.
    pub async fn delete_tenant_cascade(
        &self,
        conn: &mut PgConnection,
        tenant_id: i32,
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM guarantors WHERE tenant_id = $1")
            .bind(tenant_id)
            .execute(&mut *conn)
            .await?;

        sqlx::query("DELETE FROM tenants WHERE id = $1")
            .bind(tenant_id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    // --- Fiadores ---

    pub async fn create_guarantor(
        &self,
        tenant_id: i32,
        payload: &CreateGuarantorPayload,
    ) -> Result<Guarantor, AppError> {
        sqlx::query_as::<_, Guarantor>(
            r#"
            INSERT INTO guarantors
                (cpf, contact, email, name, profession, marital_status, birth_date,
                 comment, income, street, neighborhood, number, zip_code, city,
                 state, tenant_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            RETURNING *
            "#,
        )
        .bind(&payload.cpf)
        .bind(&payload.contact)
        .bind(&payload.email)
        .bind(&payload.name)
        .bind(&payload.profession)
        .bind(&payload.marital_status)
        .bind(payload.birth_date)
        .bind(&payload.comment)
        .bind(payload.income)
        .bind(&payload.address.street)
        .bind(&payload.address.neighborhood)
        .bind(payload.address.number)
        .bind(&payload.address.zip_code)
        .bind(&payload.address.city)
        .bind(&payload.address.state)
        .bind(tenant_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::GuarantorAlreadyExists;
                }
            }
            AppError::DatabaseError(e)
        })
    }

    pub async fn find_guarantor_by_tenant(
        &self,
        tenant_id: i32,
    ) -> Result<Option<Guarantor>, AppError> {
        let guarantor =
            sqlx::query_as::<_, Guarantor>("SELECT * FROM guarantors WHERE tenant_id = $1")
                .bind(tenant_id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(guarantor)
    }

    pub async fn find_guarantor_scoped(
        &self,
        owner_id: Uuid,
        guarantor_id: i32,
    ) -> Result<Guarantor, AppError> {
        let guarantor = sqlx::query_as::<_, Guarantor>("SELECT * FROM guarantors WHERE id = $1")
            .bind(guarantor_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound("Fiador"))?;

        let chain_owner: Uuid = sqlx::query_scalar("SELECT owner_id FROM tenants WHERE id = $1")
            .bind(guarantor.tenant_id)
            .fetch_one(&self.pool)
            .await?;

        if chain_owner != owner_id {
            return Err(AppError::Forbidden("este fiador"));
        }
        Ok(guarantor)
    }

    pub async fn save_guarantor(&self, guarantor: &Guarantor) -> Result<Guarantor, AppError> {
        let updated = sqlx::query_as::<_, Guarantor>(
            r#"
            UPDATE guarantors
            SET contact = $2, email = $3, name = $4, profession = $5,
                marital_status = $6, comment = $7, income = $8, street = $9,
                neighborhood = $10, number = $11, zip_code = $12, city = $13,
                state = $14, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(guarantor.id)
        .bind(&guarantor.contact)
        .bind(&guarantor.email)
        .bind(&guarantor.name)
        .bind(&guarantor.profession)
        .bind(&guarantor.marital_status)
        .bind(&guarantor.comment)
        .bind(guarantor.income)
        .bind(&guarantor.address.street)
        .bind(&guarantor.address.neighborhood)
        .bind(guarantor.address.number)
        .bind(&guarantor.address.zip_code)
        .bind(&guarantor.address.city)
        .bind(&guarantor.address.state)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    pub async fn delete_guarantor(&self, guarantor_id: i32) -> Result<(), AppError> {
        sqlx::query("DELETE FROM guarantors WHERE id = $1")
            .bind(guarantor_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
