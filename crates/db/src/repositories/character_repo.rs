//! Repository for the `characters` table.
//!
//! Characters are the only entity whose writes span multiple tables
//! (house attachment, enrollment replacement), so create, update, and
//! delete each run inside a single transaction: a missing house or
//! subject aborts the whole write and no partial state survives.

use std::collections::HashMap;

use hogwarts_core::error::CoreError;
use hogwarts_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::error::{DbError, DbResult};
use crate::models::character::{
    Character, CharacterWithRelations, CreateCharacter, UpdateCharacter,
};
use crate::models::house::House;
use crate::models::subject::Subject;
use crate::repositories::{EnrollmentRepo, HouseRepo};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, first_name, last_name, role, blood_status, house_id, created_at, updated_at";

/// Provides CRUD operations for characters, including their house
/// attachment and enrollment set.
pub struct CharacterRepo;

impl CharacterRepo {
    /// Insert a new character together with its house attachment and
    /// initial enrollment set, atomically.
    pub async fn create(
        pool: &PgPool,
        input: &CreateCharacter,
    ) -> DbResult<CharacterWithRelations> {
        let mut tx = pool.begin().await?;

        if let Some(house_id) = input.house_id {
            ensure_house_exists(&mut *tx, house_id).await?;
        }

        let query = format!(
            "INSERT INTO characters (first_name, last_name, role, blood_status, house_id)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let character = sqlx::query_as::<_, Character>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(&input.role)
            .bind(&input.blood_status)
            .bind(input.house_id)
            .fetch_one(&mut *tx)
            .await?;

        if let Some(subject_ids) = &input.subject_ids {
            EnrollmentRepo::sync_for_character(&mut *tx, character.id, subject_ids).await?;
        }

        tx.commit().await?;

        Self::find_with_relations(pool, character.id)
            .await?
            .ok_or(DbError::Core(CoreError::NotFound {
                entity: "Character",
                id: character.id,
            }))
    }

    /// Find a character by its internal ID, without relations.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Character>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM characters WHERE id = $1");
        sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a character with its house and subjects embedded.
    pub async fn find_with_relations(
        pool: &PgPool,
        id: DbId,
    ) -> DbResult<Option<CharacterWithRelations>> {
        let Some(character) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let house = match character.house_id {
            Some(house_id) => HouseRepo::find_by_id(pool, house_id).await?,
            None => None,
        };
        let subjects = EnrollmentRepo::subjects_for_character(pool, id).await?;

        Ok(Some(CharacterWithRelations::new(character, house, subjects)))
    }

    /// List all characters with their houses and subjects embedded.
    pub async fn list_all(pool: &PgPool) -> DbResult<Vec<CharacterWithRelations>> {
        let query = format!("SELECT {COLUMNS} FROM characters ORDER BY id");
        let characters = sqlx::query_as::<_, Character>(&query)
            .fetch_all(pool)
            .await?;

        let houses = sqlx::query_as::<_, House>(
            "SELECT id, name, mascot, founder, created_at, updated_at FROM houses ORDER BY id",
        )
        .fetch_all(pool)
        .await?;
        let house_by_id: HashMap<DbId, House> = houses.into_iter().map(|h| (h.id, h)).collect();

        let subjects = sqlx::query_as::<_, Subject>(
            "SELECT id, name, professor, created_at, updated_at FROM subjects ORDER BY id",
        )
        .fetch_all(pool)
        .await?;
        let subject_by_id: HashMap<DbId, Subject> =
            subjects.into_iter().map(|s| (s.id, s)).collect();

        let mut subjects_by_character: HashMap<DbId, Vec<Subject>> = HashMap::new();
        for enrollment in EnrollmentRepo::list_all(pool).await? {
            if let Some(subject) = subject_by_id.get(&enrollment.subject_id) {
                subjects_by_character
                    .entry(enrollment.character_id)
                    .or_default()
                    .push(subject.clone());
            }
        }

        Ok(characters
            .into_iter()
            .map(|character| {
                let house = character
                    .house_id
                    .and_then(|house_id| house_by_id.get(&house_id).cloned());
                let subjects = subjects_by_character
                    .remove(&character.id)
                    .unwrap_or_default();
                CharacterWithRelations::new(character, house, subjects)
            })
            .collect())
    }

    /// Update a character. Only supplied fields are applied; an
    /// explicit `null` clears `role`, `blood_status`, or the house
    /// attachment, while absent fields are left unchanged. A supplied
    /// `subject_ids` replaces the whole enrollment set.
    ///
    /// No optimistic locking: concurrent updates to the same character
    /// race and the last transaction to commit wins.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateCharacter,
    ) -> DbResult<CharacterWithRelations> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM characters WHERE id = $1");
        let existing = sqlx::query_as::<_, Character>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(DbError::Core(CoreError::NotFound {
                entity: "Character",
                id,
            }))?;

        let first_name = input
            .first_name
            .clone()
            .unwrap_or(existing.first_name);
        let last_name = input.last_name.clone().unwrap_or(existing.last_name);
        let role = match &input.role {
            Some(role) => role.clone(),
            None => existing.role,
        };
        let blood_status = match &input.blood_status {
            Some(blood_status) => blood_status.clone(),
            None => existing.blood_status,
        };
        let house_id = match input.house_id {
            None => existing.house_id,
            Some(None) => None,
            Some(Some(house_id)) => {
                ensure_house_exists(&mut *tx, house_id).await?;
                Some(house_id)
            }
        };

        sqlx::query(
            "UPDATE characters
             SET first_name = $2, last_name = $3, role = $4, blood_status = $5,
                 house_id = $6, updated_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .bind(&first_name)
        .bind(&last_name)
        .bind(&role)
        .bind(&blood_status)
        .bind(house_id)
        .execute(&mut *tx)
        .await?;

        if let Some(subject_ids) = &input.subject_ids {
            EnrollmentRepo::sync_for_character(&mut *tx, id, subject_ids).await?;
        }

        tx.commit().await?;

        Self::find_with_relations(pool, id)
            .await?
            .ok_or(DbError::Core(CoreError::NotFound {
                entity: "Character",
                id,
            }))
    }

    /// Cascade-delete a character: its enrollment rows first, then the
    /// row itself, in one transaction.
    pub async fn delete(pool: &PgPool, id: DbId) -> DbResult<()> {
        let mut tx = pool.begin().await?;

        EnrollmentRepo::delete_by_character(&mut *tx, id).await?;

        let result = sqlx::query("DELETE FROM characters WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::Core(CoreError::NotFound {
                entity: "Character",
                id,
            }));
        }

        tx.commit().await?;
        Ok(())
    }
}

/// Verify a house attachment target exists inside the current
/// transaction.
async fn ensure_house_exists(conn: &mut PgConnection, house_id: DbId) -> DbResult<()> {
    let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM houses WHERE id = $1)")
        .bind(house_id)
        .fetch_one(conn)
        .await?;
    if !exists {
        return Err(DbError::Core(CoreError::NotFound {
            entity: "House",
            id: house_id,
        }));
    }
    Ok(())
}
