//! Conversions between stored text columns and model types.

use std::fmt::Display;
use std::str::FromStr;

use jiff::Timestamp;
use rusqlite::{types::Type, Row};
use serde::{de::DeserializeOwned, Serialize};

use crate::error::Result;

/// Current time truncated to what the store keeps.
///
/// Stored timestamps carry exactly six fractional digits so that text order
/// matches time order; truncating here keeps returned records equal to what a
/// later read produces.
pub(crate) fn current_timestamp() -> Timestamp {
    let now = Timestamp::now();
    Timestamp::from_microsecond(now.as_microsecond()).unwrap_or(now)
}

pub(crate) fn format_timestamp(ts: Timestamp) -> String {
    format!("{ts:.6}")
}

pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn conversion_error(idx: usize, message: String) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, message.into())
}

/// Parses a required text column through `FromStr`.
pub(crate) fn parse_column<T>(row: &Row, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw: String = row.get(idx)?;
    raw.parse::<T>()
        .map_err(|e| conversion_error(idx, format!("Invalid value '{raw}': {e}")))
}

/// Parses a nullable text column through `FromStr`.
pub(crate) fn parse_optional_column<T>(row: &Row, idx: usize) -> rusqlite::Result<Option<T>>
where
    T: FromStr,
    T::Err: Display,
{
    let raw: Option<String> = row.get(idx)?;
    raw.map(|value| {
        value
            .parse::<T>()
            .map_err(|e| conversion_error(idx, format!("Invalid value '{value}': {e}")))
    })
    .transpose()
}

/// Decodes a required JSON text column.
pub(crate) fn parse_json<T: DeserializeOwned>(row: &Row, idx: usize) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

/// Decodes a nullable JSON text column.
pub(crate) fn parse_optional_json<T: DeserializeOwned>(
    row: &Row,
    idx: usize,
) -> rusqlite::Result<Option<T>> {
    let raw: Option<String> = row.get(idx)?;
    raw.map(|value| {
        serde_json::from_str(&value)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
    })
    .transpose()
}

pub(crate) fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

pub(crate) fn to_optional_json<T: Serialize>(value: Option<&T>) -> Result<Option<String>> {
    value.map(to_json).transpose()
}

/// Reads an integer column into a narrower unsigned type.
pub(crate) fn get_unsigned<T: TryFrom<i64>>(row: &Row, idx: usize) -> rusqlite::Result<T> {
    let raw: i64 = row.get(idx)?;
    T::try_from(raw).map_err(|_| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Integer,
            format!("Value {raw} out of range").into(),
        )
    })
}

pub(crate) fn get_optional_unsigned<T: TryFrom<i64>>(
    row: &Row,
    idx: usize,
) -> rusqlite::Result<Option<T>> {
    let raw: Option<i64> = row.get(idx)?;
    raw.map(|value| {
        T::try_from(value).map_err(|_| {
            rusqlite::Error::FromSqlConversionFailure(
                idx,
                Type::Integer,
                format!("Value {value} out of range").into(),
            )
        })
    })
    .transpose()
}
