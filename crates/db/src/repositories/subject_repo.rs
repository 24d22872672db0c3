//! Repository for the `subjects` table.

use std::collections::HashMap;

use hogwarts_core::error::CoreError;
use hogwarts_core::types::DbId;
use sqlx::PgPool;

use crate::error::{DbError, DbResult};
use crate::models::character::Character;
use crate::models::subject::{CreateSubject, Subject, SubjectWithCharacters, UpdateSubject};
use crate::repositories::EnrollmentRepo;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, professor, created_at, updated_at";

/// Provides CRUD operations for subjects.
pub struct SubjectRepo;

impl SubjectRepo {
    /// Insert a new subject, returning the created row.
    ///
    /// Fails with `DuplicateName` if the name is already taken; the
    /// `uq_subjects_name` constraint backs the check up under
    /// concurrency.
    pub async fn create(pool: &PgPool, input: &CreateSubject) -> DbResult<Subject> {
        ensure_name_free(pool, &input.name, None).await?;

        let query = format!(
            "INSERT INTO subjects (name, professor)
             VALUES ($1, $2)
             RETURNING {COLUMNS}"
        );
        let subject = sqlx::query_as::<_, Subject>(&query)
            .bind(&input.name)
            .bind(&input.professor)
            .fetch_one(pool)
            .await?;
        Ok(subject)
    }

    /// Find a subject by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Subject>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM subjects WHERE id = $1");
        sqlx::query_as::<_, Subject>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a subject with its enrolled characters embedded.
    pub async fn find_with_characters(
        pool: &PgPool,
        id: DbId,
    ) -> DbResult<Option<SubjectWithCharacters>> {
        let Some(subject) = Self::find_by_id(pool, id).await? else {
            return Ok(None);
        };
        let characters = EnrollmentRepo::characters_for_subject(pool, id).await?;
        Ok(Some(SubjectWithCharacters::new(subject, characters)))
    }

    /// List all subjects with their enrolled characters embedded.
    pub async fn list_all(pool: &PgPool) -> DbResult<Vec<SubjectWithCharacters>> {
        let query = format!("SELECT {COLUMNS} FROM subjects ORDER BY id");
        let subjects = sqlx::query_as::<_, Subject>(&query).fetch_all(pool).await?;

        let enrollments = EnrollmentRepo::list_all(pool).await?;
        let characters = sqlx::query_as::<_, Character>(
            "SELECT id, first_name, last_name, role, blood_status, house_id,
                    created_at, updated_at
             FROM characters ORDER BY id",
        )
        .fetch_all(pool)
        .await?;
        let character_by_id: HashMap<DbId, Character> =
            characters.into_iter().map(|c| (c.id, c)).collect();

        let mut by_subject: HashMap<DbId, Vec<Character>> = HashMap::new();
        for enrollment in enrollments {
            if let Some(character) = character_by_id.get(&enrollment.character_id) {
                by_subject
                    .entry(enrollment.subject_id)
                    .or_default()
                    .push(character.clone());
            }
        }

        Ok(subjects
            .into_iter()
            .map(|subject| {
                let characters = by_subject.remove(&subject.id).unwrap_or_default();
                SubjectWithCharacters::new(subject, characters)
            })
            .collect())
    }

    /// Update a subject. Only supplied fields are applied; renaming to
    /// a taken name fails with `DuplicateName`.
    ///
    /// Fails with `NotFound` if no row with the given `id` exists.
    pub async fn update(pool: &PgPool, id: DbId, input: &UpdateSubject) -> DbResult<Subject> {
        let existing = Self::find_by_id(pool, id).await?.ok_or(DbError::Core(
            CoreError::NotFound {
                entity: "Subject",
                id,
            },
        ))?;

        let name = match &input.name {
            Some(name) => {
                if *name != existing.name {
                    ensure_name_free(pool, name, Some(id)).await?;
                }
                name.clone()
            }
            None => existing.name,
        };
        let professor = match &input.professor {
            Some(professor) => professor.clone(),
            None => existing.professor,
        };

        let query = format!(
            "UPDATE subjects SET name = $2, professor = $3, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let subject = sqlx::query_as::<_, Subject>(&query)
            .bind(id)
            .bind(&name)
            .bind(&professor)
            .fetch_one(pool)
            .await?;
        Ok(subject)
    }

    /// Cascade-delete a subject: its enrollment rows first, then the
    /// row itself, in one transaction.
    pub async fn delete(pool: &PgPool, id: DbId) -> DbResult<()> {
        let mut tx = pool.begin().await?;

        EnrollmentRepo::delete_by_subject(&mut *tx, id).await?;

        let result = sqlx::query("DELETE FROM subjects WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        if result.rows_affected() == 0 {
            return Err(DbError::Core(CoreError::NotFound {
                entity: "Subject",
                id,
            }));
        }

        tx.commit().await?;
        Ok(())
    }
}

/// Fail with `DuplicateName` if another subject already uses `name`.
async fn ensure_name_free(pool: &PgPool, name: &str, exclude: Option<DbId>) -> DbResult<()> {
    let taken = sqlx::query_scalar::<_, bool>(
        "SELECT EXISTS (SELECT 1 FROM subjects WHERE name = $1 AND ($2::BIGINT IS NULL OR id <> $2))",
    )
    .bind(name)
    .bind(exclude)
    .fetch_one(pool)
    .await?;
    if taken {
        return Err(DbError::Core(CoreError::DuplicateName {
            entity: "Subject",
            name: name.to_string(),
        }));
    }
    Ok(())
}
