//! Repository for the `houses` table.

use std::collections::HashMap;

use hogwarts_core::error::CoreError;
use hogwarts_core::types::DbId;
use sqlx::PgPool;

use crate::error::{DbError, DbResult};
use crate::models::character::Character;
use crate::models::house::{CreateHouse, House, HouseWithCharacters, UpdateHouse};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, mascot, founder, created_at, updated_at";

/// Provides CRUD operations for houses.
pub struct HouseRepo;

impl HouseRepo {
    /// Insert a new house, returning the created row.
    ///
    /// Fails with `DuplicateName` if the name is already taken; the
    /// `uq_houses_name` constraint backs the check up under concurrency.
    pub async fn create(pool: &PgPool, input: &CreateHouse) -> DbResult<House> {
        ensure_name_free(pool, &input.name, None).await?;

        let query = format!(
            "INSERT INTO houses (name, mascot, founder)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let house = sqlx::query_as::<_, House>(&query)
            .bind(&input.name)
            .bind(&input.mascot)
            .bind(&input.founder)
            .fetch_one(pool)
            .await?;
        Ok(house)
    }

    /// Find a house by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<House>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM houses WHERE id = $1");
        sqlx::query_as::<_, House>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a house with its member characters embedded.
    pub async fn find_with_characters(
        pool: &PgPool,
        id: DbId,
    ) -> DbResult<Option<HouseWithCharacters>> {
        let Some(house) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let characters = Self::characters_of(pool, id).await?;
        Ok(Some(HouseWithCharacters::new(house, characters)))
    }

    /// List all houses with their member characters embedded.
    pub async fn list_all(pool: &PgPool) -> DbResult<Vec<HouseWithCharacters>> {
        let query = format!("SELECT {COLUMNS} FROM houses ORDER BY id");
        let houses = sqlx::query_as::<_, House>(&query).fetch_all(pool).await?;

        let members = sqlx::query_as::<_, Character>(
            "SELECT id, first_name, last_name, role, blood_status, house_id,
                    created_at, updated_at
             FROM characters WHERE house_id IS NOT NULL ORDER BY id",
        )
        .fetch_all(pool)
        .await?;

        let mut by_house: HashMap<DbId, Vec<Character>> = HashMap::new();
        for character in members {
            // house_id is non-null by the WHERE clause above.
            if let Some(house_id) = character.house_id {
                by_house.entry(house_id).or_default().push(character);
            }
        }

        Ok(houses
            .into_iter()
            .map(|house| {
                let characters = by_house.remove(&house.id).unwrap_or_default();
                HouseWithCharacters::new(house, characters)
            })
            .collect())
    }

    /// Update a house. Only supplied fields are applied; renaming to a
    /// taken name fails with `DuplicateName`.
    ///
    /// Fails with `NotFound` if no row with the given `id` exists.
    pub async fn update(pool: &PgPool, id: DbId, input: &UpdateHouse) -> DbResult<House> {
        let existing = Self::find_by_id(pool, id)
            .await?
            .ok_or(DbError::Core(CoreError::NotFound { entity: "House", id }))?;

        let name = match &input.name {
            Some(name) => {
                if *name != existing.name {
                    ensure_name_free(pool, name, Some(id)).await?;
                }
                name.clone()
            }
            None => existing.name,
        };
        let mascot = match &input.mascot {
            Some(mascot) => mascot.clone(),
            None => existing.mascot,
        };
        let founder = match &input.founder {
            Some(founder) => founder.clone(),
            None => existing.founder,
        };

        let query = format!(
            "UPDATE houses SET name = $2, mascot = $3, founder = $4, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let house = sqlx::query_as::<_, House>(&query)
            .bind(id)
            .bind(&name)
            .bind(&mascot)
            .bind(&founder)
            .fetch_one(pool)
            .await?;
        Ok(house)
    }

    /// Delete a house, detaching member characters first.
    ///
    /// Characters referencing the house keep existing with `house_id`
    /// cleared, so no dangling reference survives the delete.
    pub async fn delete(pool: &PgPool, id: DbId) -> DbResult<()> {
        let mut tx = pool.begin().await?;

        sqlx::query(
            "UPDATE characters SET house_id = NULL, updated_at = NOW() WHERE house_id = $1",
        )
        .bind(id)
        .execute(&mut *tx)
        .await?;

        let result = sqlx::query("DELETE FROM houses WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::Core(CoreError::NotFound { entity: "House", id }));
        }

        tx.commit().await?;
        Ok(())
    }

    /// Characters belonging to the house, oldest first.
    pub async fn characters_of(
        pool: &PgPool,
        house_id: DbId,
    ) -> Result<Vec<Character>, sqlx::Error> {
        sqlx::query_as::<_, Character>(
            "SELECT id, first_name, last_name, role, blood_status, house_id,
                    created_at, updated_at
             FROM characters WHERE house_id = $1 ORDER BY id",
        )
        .bind(house_id)
        .fetch_all(pool)
        .await
    }
}

/// Fail with `DuplicateName` if another house already uses `name`.
async fn ensure_name_free(pool: &PgPool, name: &str, exclude: Option<DbId>) -> DbResult<()> {
    let taken = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM houses WHERE name = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
    )
    .bind(name)
    .bind(exclude)
    .fetch_one(pool)
    .await?;
    if taken {
        return Err(DbError::Core(CoreError::DuplicateName {
            entity: "House",
            name: name.to_string(),
        }));
    }
    Ok(())
}
