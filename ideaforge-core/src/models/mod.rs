mod business_plan;
mod idea;
mod implementation_item;
mod validation;

pub use business_plan::*;
pub use idea::*;
pub use implementation_item::*;
pub use validation::*;

/// Open-ended JSON object produced by the analysis service.
pub type JsonObject = serde_json::Map<String, serde_json::Value>;

/// Deserialize a collection field, treating an explicit `null` like an absent one.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de> + Default,
{
    use serde::Deserialize;
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}
