// src/db/template_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::contract::{CreateTemplatePayload, Template},
};

#[derive(Clone)]
pub struct TemplateRepository {
    pool: PgPool,
}

impl TemplateRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        owner_id: Uuid,
        payload: &CreateTemplatePayload,
    ) -> Result<Template, AppError> {
        let created = sqlx::query_as::<_, Template>(
            r#"
            INSERT INTO templates
                (name, description, garage, warranty, pets, sublease, kind, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING *
            "#,
        )
        .bind(&payload.name)
        .bind(&payload.description)
        .bind(payload.garage)
        .bind(payload.warranty)
        .bind(payload.pets)
        .bind(payload.sublease)
        .bind(payload.kind)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    pub async fn list(&self, owner_id: Uuid) -> Result<Vec<Template>, AppError> {
        let templates =
            sqlx::query_as::<_, Template>("SELECT * FROM templates WHERE owner_id = $1 ORDER BY id")
                .bind(owner_id)
                .fetch_all(&self.pool)
                .await?;
        Ok(templates)
    }

    pub async fn find_scoped(
        &self,
        owner_id: Uuid,
        template_id: i32,
    ) -> Result<Template, AppError> {
        let template = sqlx::query_as::<_, Template>("SELECT * FROM templates WHERE id = $1")
            .bind(template_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound("Template"))?;

        if template.owner_id != owner_id {
            return Err(AppError::Forbidden("este template"));
        }
        Ok(template)
    }

    pub async fn save(&self, template: &Template) -> Result<Template, AppError> {
        let updated = sqlx::query_as::<_, Template>(
            r#"
            UPDATE templates
            SET name = $2, description = $3, garage = $4, warranty = $5,
                pets = $6, sublease = $7, kind = $8, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(template.id)
        .bind(&template.name)
        .bind(&template.description)
        .bind(template.garage)
        .bind(template.warranty)
        .bind(template.pets)
        .bind(template.sublease)
        .bind(template.kind)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    pub async fn delete(&self, template_id: i32) -> Result<(), AppError> {
        sqlx::query("DELETE FROM templates WHERE id = $1")
            .bind(template_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
