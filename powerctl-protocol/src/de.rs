//! Serde helpers for api quirks.

use serde::{Deserialize, Deserializer};

/// Deserialize `null` as the type's default, for lists the api may omit.
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
