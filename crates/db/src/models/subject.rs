//! Subject entity model and DTOs.

use hogwarts_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::character::Character;
use crate::models::double_option;

/// A subject row from the `subjects` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    pub id: DbId,
    pub name: String,
    pub professor: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A subject with its enrolled characters embedded (read-time join).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectWithCharacters {
    pub id: DbId,
    pub name: String,
    pub professor: Option<String>,
    pub characters: Vec<Character>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl SubjectWithCharacters {
    pub fn new(subject: Subject, characters: Vec<Character>) -> Self {
        Self {
            id: subject.id,
            name: subject.name,
            professor: subject.professor,
            characters,
            created_at: subject.created_at,
            updated_at: subject.updated_at,
        }
    }
}

/// DTO for creating a new subject.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSubject {
    pub name: String,
    pub professor: Option<String>,
}

/// DTO for updating an existing subject.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSubject {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub professor: Option<Option<String>>,
}
