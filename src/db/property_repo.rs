// src/db/property_repo.rs

use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::{
        address::Address,
        property::{Expense, House, NewHouse, Property},
    },
};

// Propriedades, casas e despesas. Toda leitura pontual resolve a cadeia de
// posse em duas etapas: busca por id (ausente -> NotFound) e comparação do
// dono alcançado pela cadeia de FKs (divergente -> Forbidden).
#[derive(Clone)]
pub struct PropertyRepository {
    pool: PgPool,
}

impl PropertyRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // --- Propriedades ---

    pub async fn create_property(
        &self,
        owner_id: Uuid,
        nickname: &str,
        photo_url: Option<&str>,
        iptu_value: rust_decimal::Decimal,
        address: &Address,
    ) -> Result<Property, AppError> {
        let created = sqlx::query_as::<_, Property>(
            r#"
            INSERT INTO properties
                (nickname, photo_url, iptu_value, street, neighborhood, number,
                 zip_code, city, state, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(nickname)
        .bind(photo_url)
        .bind(iptu_value)
        .bind(&address.street)
        .bind(&address.neighborhood)
        .bind(address.number)
        .bind(&address.zip_code)
        .bind(&address.city)
        .bind(&address.state)
        .bind(owner_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    pub async fn list_properties(&self, owner_id: Uuid) -> Result<Vec<Property>, AppError> {
        let properties = sqlx::query_as::<_, Property>(
            "SELECT * FROM properties WHERE owner_id = $1 ORDER BY id",
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(properties)
    }

    pub async fn find_property_scoped(
        &self,
        owner_id: Uuid,
        property_id: i32,
    ) -> Result<Property, AppError> {
        let property = sqlx::query_as::<_, Property>("SELECT * FROM properties WHERE id = $1")
            .bind(property_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound("Propriedade"))?;

        if property.owner_id != owner_id {
            return Err(AppError::Forbidden("esta propriedade"));
        }
        Ok(property)
    }

    pub async fn save_property(&self, property: &Property) -> Result<Property, AppError> {
        let updated = sqlx::query_as::<_, Property>(
            r#"
            UPDATE properties
            SET nickname = $2, photo_url = $3, iptu_value = $4, street = $5,
                neighborhood = $6, number = $7, zip_code = $8, city = $9,
                state = $10, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(property.id)
        .bind(&property.nickname)
        .bind(&property.photo_url)
        .bind(property.iptu_value)
        .bind(&property.address.street)
        .bind(&property.address.neighborhood)
        .bind(property.address.number)
        .bind(&property.address.zip_code)
        .bind(&property.address.city)
        .bind(&property.address.state)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    // Despesas -> casas -> propriedade, na transação recebida.
    pub async fn delete_property_cascade(
        &self,
        conn: &mut PgConnection,
        property_id: i32,
    ) -> Result<(), AppError> {
        sqlx::query(
            "DELETE FROM expenses
             WHERE house_id IN (SELECT id FROM houses WHERE property_id = $1)",
        )
        .bind(property_id)
        .execute(&mut *conn)
        .await?;

        sqlx::query("DELETE FROM houses WHERE property_id = $1")
            .bind(property_id)
            .execute(&mut *conn)
            .await?;

        sqlx::query("DELETE FROM properties WHERE id = $1")
            .bind(property_id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    // --- Casas ---

    pub async fn create_house(
        &self,
        property_id: i32,
        house: &NewHouse,
    ) -> Result<House, AppError> {
        let created = sqlx::query_as::<_, House>(
            r#"
            INSERT INTO houses
                (nickname, photo_url, rooms, bathrooms, furnished, status, property_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&house.nickname)
        .bind(&house.photo_url)
        .bind(house.rooms)
        .bind(house.bathrooms)
        .bind(house.furnished)
        .bind(house.status)
        .bind(property_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    pub async fn list_houses(&self, owner_id: Uuid) -> Result<Vec<House>, AppError> {
        let houses = sqlx::query_as::<_, House>(
            r#"
            SELECT h.* FROM houses h
            JOIN properties p ON h.property_id = p.id
            WHERE p.owner_id = $1
            ORDER BY h.id
            "#,
        )
        .bind(owner_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(houses)
    }

    pub async fn find_house_scoped(
        &self,
        owner_id: Uuid,
        house_id: i32,
    ) -> Result<House, AppError> {
        let house = sqlx::query_as::<_, House>("SELECT * FROM houses WHERE id = $1")
            .bind(house_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound("Casa"))?;

        let chain_owner: Uuid =
            sqlx::query_scalar("SELECT owner_id FROM properties WHERE id = $1")
                .bind(house.property_id)
                .fetch_one(&self.pool)
                .await?;

        if chain_owner != owner_id {
            return Err(AppError::Forbidden("esta casa"));
        }
        Ok(house)
    }

    pub async fn save_house(&self, house: &House) -> Result<House, AppError> {
        let updated = sqlx::query_as::<_, House>(
            r#"
            UPDATE houses
            SET nickname = $2, photo_url = $3, rooms = $4, bathrooms = $5,
                furnished = $6, status = $7, updated_at = now()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(house.id)
        .bind(&house.nickname)
        .bind(&house.photo_url)
        .bind(house.rooms)
        .bind(house.bathrooms)
        .bind(house.furnished)
        .bind(house.status)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    pub async fn delete_house_cascade(
        &self,
        conn: &mut PgConnection,
        house_id: i32,
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM expenses WHERE house_id = $1")
            .bind(house_id)
            .execute(&mut *conn)
            .await?;

        // Contratos que referenciam a casa não são apagados; a FK RESTRICT
        // faz a deleção falhar se ainda houver contrato vinculado.
        sqlx::query("DELETE FROM houses WHERE id = $1")
            .bind(house_id)
            .execute(&mut *conn)
            .await?;

        Ok(())
    }

    // --- Despesas ---

    pub async fn create_expense(
        &self,
        house_id: i32,
        kind: crate::models::property::ExpenseKind,
        value: rust_decimal::Decimal,
        expense_date: chrono::NaiveDate,
    ) -> Result<Expense, AppError> {
        let created = sqlx::query_as::<_, Expense>(
            r#"
            INSERT INTO expenses (kind, value, expense_date, house_id)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(kind)
        .bind(value)
        .bind(expense_date)
        .bind(house_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(created)
    }

    pub async fn list_expenses(&self, house_id: i32) -> Result<Vec<Expense>, AppError> {
        let expenses = sqlx::query_as::<_, Expense>(
            "SELECT * FROM expenses WHERE house_id = $1 ORDER BY expense_date",
        )
        .bind(house_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(expenses)
    }

    pub async fn find_expense_scoped(
        &self,
        owner_id: Uuid,
        expense_id: i32,
    ) -> Result<Expense, AppError> {
        let expense = sqlx::query_as::<_, Expense>("SELECT * FROM expenses WHERE id = $1")
            .bind(expense_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or(AppError::NotFound("Despesa"))?;

        let chain_owner: Uuid = sqlx::query_scalar(
            r#"
            SELECT p.owner_id FROM houses h
            JOIN properties p ON h.property_id = p.id
            WHERE h.id = $1
            "#,
        )
        .bind(expense.house_id)
        .fetch_one(&self.pool)
        .await?;

        if chain_owner != owner_id {
            return Err(AppError::Forbidden("esta despesa"));
        }
        Ok(expense)
    }

    pub async fn save_expense(&self, expense: &Expense) -> Result<Expense, AppError> {
        let updated = sqlx::query_as::<_, Expense>(
            r#"
            UPDATE expenses
            SET kind = $2, value = $3, expense_date = $4
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(expense.id)
        .bind(expense.kind)
        .bind(expense.value)
        .bind(expense.expense_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(updated)
    }

    pub async fn delete_expense(&self, expense_id: i32) -> Result<(), AppError> {
        sqlx::query("DELETE FROM expenses WHERE id = $1")
            .bind(expense_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
