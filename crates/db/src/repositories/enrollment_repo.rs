//! Repository for the `enrollments` join table.
//!
//! Enrollment rows have no independent lifecycle: they are written and
//! removed only as a side effect of character and subject mutations.
//! Write methods therefore take `&mut PgConnection` so they compose
//! into the caller's transaction.

use hogwarts_core::error::CoreError;
use hogwarts_core::types::DbId;
use sqlx::{PgConnection, PgPool};

use crate::error::{DbError, DbResult};
use crate::models::character::Character;
use crate::models::enrollment::Enrollment;
use crate::models::subject::Subject;

pub struct EnrollmentRepo;

impl EnrollmentRepo {
    /// Replace the character's enrollment set with `subject_ids`.
    ///
    /// Deletes every existing row for the character, then inserts one
    /// row per distinct subject id, in input order. Every id must
    /// reference an existing subject; a missing one fails the whole
    /// operation so the caller's transaction rolls back and no partial
    /// set survives. Syncing the same set twice yields the same rows.
    pub async fn sync_for_character(
        conn: &mut PgConnection,
        character_id: DbId,
        subject_ids: &[DbId],
    ) -> DbResult<()> {
        let mut distinct: Vec<DbId> = Vec::with_capacity(subject_ids.len());
        for &id in subject_ids {
            if !distinct.contains(&id) {
                distinct.push(id);
            }
        }

        // Verify every target subject before touching any rows.
        let existing: Vec<DbId> = sqlx::query_scalar("SELECT id FROM subjects WHERE id = ANY($1)")
            .bind(&distinct)
            .fetch_all(&mut *conn)
            .await?;
        if let Some(&missing) = distinct.iter().find(|id| !existing.contains(id)) {
            return Err(DbError::Core(CoreError::NotFound {
                entity: "Subject",
                id: missing,
            }));
        }

        tracing::debug!(character_id, count = distinct.len(), "Replacing enrollment set");

        sqlx::query("DELETE FROM enrollments WHERE character_id = $1")
            .bind(character_id)
            .execute(&mut *conn)
            .await?;

        for subject_id in distinct {
            sqlx::query("INSERT INTO enrollments (character_id, subject_id) VALUES ($1, $2)")
                .bind(character_id)
                .bind(subject_id)
                .execute(&mut *conn)
                .await?;
        }

        Ok(())
    }

    /// Delete all enrollment rows for a character. Returns the row count.
    pub async fn delete_by_character(
        conn: &mut PgConnection,
        character_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM enrollments WHERE character_id = $1")
            .bind(character_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// Delete all enrollment rows for a subject. Returns the row count.
    pub async fn delete_by_subject(
        conn: &mut PgConnection,
        subject_id: DbId,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query("DELETE FROM enrollments WHERE subject_id = $1")
            .bind(subject_id)
            .execute(conn)
            .await?;
        Ok(result.rows_affected())
    }

    /// List a character's enrollment rows, oldest first.
    pub async fn list_by_character(
        pool: &PgPool,
        character_id: DbId,
    ) -> Result<Vec<Enrollment>, sqlx::Error> {
        sqlx::query_as::<_, Enrollment>(
            "SELECT id, character_id, subject_id, created_at FROM enrollments
             WHERE character_id = $1 ORDER BY id",
        )
        .bind(character_id)
        .fetch_all(pool)
        .await
    }

    /// Subjects the character is enrolled in, in enrollment order.
    pub async fn subjects_for_character(
        pool: &PgPool,
        character_id: DbId,
    ) -> Result<Vec<Subject>, sqlx::Error> {
        sqlx::query_as::<_, Subject>(
            "SELECT s.id, s.name, s.professor, s.created_at, s.updated_at
             FROM subjects s
             JOIN enrollments e ON e.subject_id = s.id
             WHERE e.character_id = $1
             ORDER BY e.id",
        )
        .bind(character_id)
        .fetch_all(pool)
        .await
    }

    /// Characters enrolled in the subject, in enrollment order.
    pub async fn characters_for_subject(
        pool: &PgPool,
        subject_id: DbId,
    ) -> Result<Vec<Character>, sqlx::Error> {
        sqlx::query_as::<_, Character>(
            "SELECT c.id, c.first_name, c.last_name, c.role, c.blood_status, c.house_id,
                    c.created_at, c.updated_at
             FROM characters c
             JOIN enrollments e ON e.character_id = c.id
             WHERE e.subject_id = $1
             ORDER BY e.id",
        )
        .bind(subject_id)
        .fetch_all(pool)
        .await
    }

    /// List every enrollment row, oldest first. Used to assemble
    /// embedded relations for list endpoints without per-row queries.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Enrollment>, sqlx::Error> {
        sqlx::query_as::<_, Enrollment>(
            "SELECT id, character_id, subject_id, created_at FROM enrollments ORDER BY id",
        )
        .fetch_all(pool)
        .await
    }
}
