//! Lenient field decoders for the PHP backend's JSON.
//!
//! The backend emits ids and integer codes either as numbers or as numeric
//! strings, and uses empty strings and `null` interchangeably. These helpers
//! normalize both forms and reject anything that is not a number at all.

use serde::de::Error;
use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Str(String),
}

/// Decodes a required, non-empty record identifier.
pub fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Scalar::deserialize(deserializer)? {
        Scalar::Int(id) => Ok(id.to_string()),
        Scalar::Str(s) if !s.trim().is_empty() => Ok(s.trim().to_string()),
        Scalar::Str(_) => Err(D::Error::custom("identifier must not be empty")),
        Scalar::Float(f) => Err(D::Error::custom(format!(
            "identifier must be an integer or string, got {f}"
        ))),
    }
}

/// Decodes an optional integer code; `null` and `""` both mean absent.
pub fn optional_code<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Scalar>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Scalar::Int(code)) => Ok(Some(code)),
        Some(Scalar::Float(f)) if f.fract() == 0.0 && f.is_finite() => Ok(Some(f as i64)),
        Some(Scalar::Float(f)) => Err(D::Error::custom(format!("code must be an integer, got {f}"))),
        Some(Scalar::Str(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<i64>()
                .map(Some)
                .map_err(|_| D::Error::custom(format!("code must be an integer, got {s:?}")))
        }
    }
}

/// Decodes a required non-negative amount.
pub fn amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    non_negative(Scalar::deserialize(deserializer)?)
}

/// Decodes an optional amount, treating `null` and `""` as absent.
pub fn optional_amount<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Scalar>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Scalar::Str(s)) if s.trim().is_empty() => Ok(None),
        Some(scalar) => non_negative(scalar).map(Some),
    }
}

fn non_negative<E: Error>(scalar: Scalar) -> Result<f64, E> {
    let value = match scalar {
        Scalar::Int(i) => i as f64,
        Scalar::Float(f) => f,
        Scalar::Str(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| E::custom(format!("amount must be numeric, got {s:?}")))?,
    };

    if !value.is_finite() || value < 0.0 {
        return Err(E::custom(format!(
            "amount must be a non-negative number, got {value}"
        )));
    }
    Ok(value)
}

/// Decodes optional free text, trimming it and mapping blank to `None`.
pub fn optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Option::<Scalar>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(Scalar::Str(s)) => s,
        Some(Scalar::Int(i)) => i.to_string(),
        Some(Scalar::Float(f)) => f.to_string(),
    };
    let trimmed = text.trim();
    if trimmed.is_empty() {
        Ok(None)
    } else {
        Ok(Some(trimmed.to_string()))
    }
}
