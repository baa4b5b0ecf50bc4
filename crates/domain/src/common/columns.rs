//! Column decoding helpers.

use serde::{de, Deserialize, Deserializer};

/// Deserialize a nullable column into `T::default()` when it is `null`.
///
/// Use together with `#[serde(default)]` so a missing key behaves the same.
///
/// # Examples
///
/// ```
/// use serde::Deserialize;
/// use lorekeeper_domain::common::null_as_default;
///
/// #[derive(Deserialize)]
/// struct Row {
///     #[serde(default, deserialize_with = "null_as_default")]
///     role: String,
/// }
///
/// let row: Row = serde_json::from_str(r#"{"role": null}"#).unwrap();
/// assert_eq!(row.role, "");
/// ```
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawEmbedding {
    Values(Vec<f32>),
    Text(String),
}

/// Deserialize an optional embedding vector.
///
/// Accepts `null`, a JSON array of numbers, or the pgvector text form
/// `"[0.1,0.2,0.3]"`.
pub fn deserialize_embedding<'de, D>(deserializer: D) -> Result<Option<Vec<f32>>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawEmbedding>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawEmbedding::Values(values)) => Ok(Some(values)),
        Some(RawEmbedding::Text(text)) => parse_vector_text(&text).map(Some).map_err(de::Error::custom),
    }
}

fn parse_vector_text(text: &str) -> Result<Vec<f32>, String> {
    let inner = text
        .trim()
        .strip_prefix('[')
        .and_then(|s| s.strip_suffix(']'))
        .ok_or_else(|| format!("embedding is not a bracketed vector: {text}"))?;

    if inner.trim().is_empty() {
        return Ok(Vec::new());
    }

    inner
        .split(',')
        .map(|part| {
            part.trim()
                .parse::<f32>()
                .map_err(|e| format!("invalid embedding component '{}': {}", part.trim(), e))
        })
        .collect()
}
