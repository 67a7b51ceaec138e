// src/db/owner_repo.rs

use sqlx::{Executor, PgConnection, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::auth::{Owner, RefreshToken},
};

// Repositório de proprietários (contas de locador) e seus refresh tokens.
#[derive(Clone)]
pub struct OwnerRepository {
    pool: PgPool,
}

impl OwnerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<Owner>, AppError> {
        let owner = sqlx::query_as::<_, Owner>("SELECT * FROM owners WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(owner)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Owner>, AppError> {
        let owner = sqlx::query_as::<_, Owner>("SELECT * FROM owners WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(owner)
    }

    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        email: &str,
        password_hash: &str,
        name: &str,
        phone: &str,
        cpf: &str,
        birth_date: chrono::NaiveDate,
    ) -> Result<Owner, AppError> {
        sqlx::query_as::<_, Owner>(
            r#"
            INSERT INTO owners (id, email, password_hash, name, phone, cpf, birth_date)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(email)
        .bind(password_hash)
        .bind(name)
        .bind(phone)
        .bind(cpf)
        .bind(birth_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Converte violação de chave única em um erro mais amigável
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::EmailAlreadyExists;
                }
            }
            AppError::DatabaseError(e)
        })
    }

    // Persiste o perfil já com o patch aplicado pelo serviço.
    pub async fn save_profile(&self, owner: &Owner) -> Result<Owner, AppError> {
        let updated = sqlx::query_as::<_, Owner>(
            r#"
            UPDATE owners
            SET name = $2, phone = $3, marital_status = $4, profession = $5,
                signature_hash = $6, photo_url = $7, push_token = $8,
                updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(owner.id)
        .bind(&owner.name)
        .bind(&owner.phone)
        .bind(&owner.marital_status)
        .bind(&owner.profession)
        .bind(&owner.signature_hash)
        .bind(&owner.photo_url)
        .bind(&owner.push_token)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    pub async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE owners SET password_hash = $2, updated_at = now() WHERE id = $1")
            .bind(id)
            .bind(password_hash)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    // As regras de cascata são código, não comportamento implícito do banco:
    // deleção em ordem de dependência, dentro da transação recebida.
    pub async fn delete_cascade(
        &self,
        conn: &mut PgConnection,
        owner_id: Uuid,
    ) -> Result<(), AppError> {
        sqlx::query(
            "DELETE FROM payment_installments
             WHERE contract_id IN (SELECT id FROM contracts WHERE owner_id = $1)",
        )
        .bind(owner_id)
        .execute(&mut *conn)
        .await?;

        sqlx::query(
            "DELETE FROM inspections
             WHERE contract_id IN (SELECT id FROM contracts WHERE owner_id = $1)",
        )
        .bind(owner_id)
        .execute(&mut *conn)
        .await?;

        sqlx::query("DELETE FROM contracts WHERE owner_id = $1")
            .bind(owner_id)
            .execute(&mut *conn)
            .await?;

        sqlx::query(
            "DELETE FROM guarantors
             WHERE tenant_id IN (SELECT id FROM tenants WHERE owner_id = $1)",
        )
        .bind(owner_id)
        .execute(&mut *conn)
        .await?;

        sqlx::query("DELETE FROM tenants WHERE owner_id = $1")
            .bind(owner_id)
            .execute(&mut *conn)
            .await?;

        sqlx::query(
            "DELETE FROM expenses
             WHERE house_id IN (
                 SELECT h.id FROM houses h
                 JOIN properties p ON h.property_id = p.id
                 WHERE p.owner_id = $1
             )",
        )
        .bind(owner_id)
        .execute(&mut *conn)
        .await?;

        sqlx::query(
            "DELETE FROM houses
             WHERE property_id IN (SELECT id FROM properties WHERE owner_id = $1)",
        )
        .bind(owner_id)
        .execute(&mut *conn)
        .await?;

        sqlx::query("DELETE FROM properties WHERE owner_id = $1")
            .bind(owner_id)
            .execute(&mut *conn)
            .await?;

        sqlx::query("DELETE FROM templates WHERE owner_id = $1")
            .bind(owner_id)
            .execute(&mut *conn)
            .await?;

        sqlx::query("DELETE FROM refresh_tokens WHERE owner_id = $1")
            .bind(owner_id)
            .execute(&mut *conn)
            .await?;

        sqlx::query("DELETE FROM owners WHERE id = $1")
            .bind(owner_id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    // --- Refresh tokens ---

    pub async fn create_refresh_token<'e, E>(
        &self,
        executor: E,
        owner_id: Uuid,
        token: &str,
        expires_at: i64,
    ) -> Result<RefreshToken, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let created = sqlx::query_as::<_, RefreshToken>(
            r#"
            INSERT INTO refresh_tokens (token, used, expires_at, owner_id)
            VALUES ($1, FALSE, $2, $3)
            RETURNING id, token, used, expires_at, owner_id
            "#,
        )
        .bind(token)
        .bind(expires_at)
        .bind(owner_id)
        .fetch_one(executor)
        .await?;
        Ok(created)
    }

    pub async fn find_refresh_token<'e, E>(
        &self,
        executor: E,
        token: &str,
    ) -> Result<Option<RefreshToken>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let found = sqlx::query_as::<_, RefreshToken>(
            "SELECT id, token, used, expires_at, owner_id FROM refresh_tokens WHERE token = $1",
        )
        .bind(token)
        .fetch_optional(executor)
        .await?;
        Ok(found)
    }

    pub async fn mark_refresh_token_used<'e, E>(
        &self,
        executor: E,
        id: i64,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query("UPDATE refresh_tokens SET used = TRUE WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(())
    }
}
