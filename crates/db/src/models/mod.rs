//! Entity models and request DTOs.

pub mod character;
pub mod enrollment;
pub mod house;
pub mod subject;

use serde::{Deserialize, Deserializer};

/// Deserialize a field into `Some(Some(v))` for a concrete value and
/// `Some(None)` for an explicit JSON `null`.
///
/// Combined with `#[serde(default)]`, an absent field stays `None`,
/// which is how partial updates tell "leave unchanged" apart from
/// "clear the value".
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
