//! Lenient scalar deserializers.
//!
//! The gateway sends amounts and flags either as JSON numbers or as numeric
//! strings (`"12.00000000"`), and identifiers as strings or numbers.

use serde::de::{Deserialize, Deserializer, Error, Unexpected};

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum Scalar {
    Number(serde_json::Number),
    Text(String),
    Bool(bool),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Number(n) => n.to_string(),
            Scalar::Text(s) => s,
            Scalar::Bool(b) => b.to_string(),
        }
    }

    fn into_number<E: Error>(self) -> Result<f64, E> {
        match self {
            Scalar::Number(n) => n
                .as_f64()
                .ok_or_else(|| E::custom(format!("number out of range: {n}"))),
            Scalar::Text(s) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|v| v.is_finite())
                .ok_or_else(|| E::invalid_value(Unexpected::Str(&s), &"a numeric string")),
            Scalar::Bool(b) => Err(E::invalid_type(Unexpected::Bool(b), &"a number")),
        }
    }

    fn into_flag<E: Error>(self) -> Result<bool, E> {
        match self {
            Scalar::Bool(b) => Ok(b),
            other => other.into_number().map(|n| n == 1.0),
        }
    }
}

pub fn number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Scalar::deserialize(deserializer)?.into_number()
}

pub fn optional_number<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<f64>, D::Error> {
    Option::<Scalar>::deserialize(deserializer)?
        .map(Scalar::into_number)
        .transpose()
}

/// `1`, `"1"` and `true` are set; anything else numeric is unset
pub fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Scalar::deserialize(deserializer)?.into_flag()
}

pub fn text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Scalar::deserialize(deserializer)?.into_text())
}

pub fn optional_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_text))
}
