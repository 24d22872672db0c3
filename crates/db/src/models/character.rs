//! Character entity model and DTOs.

use hogwarts_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::double_option;
use crate::models::house::House;
use crate::models::subject::Subject;

/// A character row from the `characters` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Character {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub role: Option<String>,
    pub blood_status: Option<String>,
    pub house_id: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A character with its house and subjects embedded (read-time join).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CharacterWithRelations {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub role: Option<String>,
    pub blood_status: Option<String>,
    pub house: Option<House>,
    pub subjects: Vec<Subject>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl CharacterWithRelations {
    pub fn new(character: Character, house: Option<House>, subjects: Vec<Subject>) -> Self {
        Self {
            id: character.id,
            first_name: character.first_name,
            last_name: character.last_name,
            role: character.role,
            blood_status: character.blood_status,
            house,
            subjects,
            created_at: character.created_at,
            updated_at: character.updated_at,
        }
    }
}

/// DTO for creating a new character.
///
/// `subject_ids` seeds the initial enrollment set; both it and
/// `house_id` may simply be omitted.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCharacter {
    pub first_name: String,
    pub last_name: String,
    pub role: Option<String>,
    pub blood_status: Option<String>,
    pub house_id: Option<DbId>,
    pub subject_ids: Option<Vec<DbId>>,
}

/// DTO for updating an existing character.
///
/// Absent fields are left unchanged. `house_id`, `role`, and
/// `blood_status` distinguish an absent field from an explicit `null`
/// (which clears the value / detaches the house). An absent
/// `subject_ids` leaves the enrollment set untouched; a supplied list
/// (including an empty one) replaces it.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCharacter {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub role: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub blood_status: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub house_id: Option<Option<DbId>>,
    pub subject_ids: Option<Vec<DbId>>,
}
