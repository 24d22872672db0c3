//! Enrollment join-table model.
//!
//! Enrollments have no DTOs: rows are written and removed only as a
//! side effect of character and subject mutations.

use hogwarts_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// An enrollment row: "character takes subject".
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: DbId,
    pub character_id: DbId,
    pub subject_id: DbId,
    pub created_at: Timestamp,
}
