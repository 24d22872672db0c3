//! House entity model and DTOs.

use hogwarts_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::models::character::Character;
use crate::models::double_option;

/// A house row from the `houses` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct House {
    pub id: DbId,
    pub name: String,
    pub mascot: Option<String>,
    pub founder: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A house with its member characters embedded (read-time join).
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseWithCharacters {
    pub id: DbId,
    pub name: String,
    pub mascot: Option<String>,
    pub founder: Option<String>,
    pub characters: Vec<Character>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl HouseWithCharacters {
    pub fn new(house: House, characters: Vec<Character>) -> Self {
        Self {
            id: house.id,
            name: house.name,
            mascot: house.mascot,
            founder: house.founder,
            characters,
            created_at: house.created_at,
            updated_at: house.updated_at,
        }
    }
}

/// DTO for creating a new house.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHouse {
    pub name: String,
    pub mascot: Option<String>,
    pub founder: Option<String>,
}

/// DTO for updating an existing house.
///
/// Absent fields are left unchanged; an explicit `null` clears the
/// nullable ones.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHouse {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub mascot: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub founder: Option<Option<String>>,
}
