//! `--set key=value` assignments.
//!
//! | key                         | store write                         |
//! |-----------------------------|-------------------------------------|
//! | `station`                   | `Field::StationName`                |
//! | `period.start`/`period.end` | `PeriodField`                       |
//! | `<fuel>.tanks`/`.nozzles`   | `Field::TankCount`/`NozzleCount`    |
//! | `<fuel>.initial`            | `Field::Initial`                    |
//! | `<fuel>.received`           | `Field::Received`                   |
//! | `<fuel>.electronic`         | `Field::ElectronicSales`            |
//! | `<fuel>.tank[N]`            | `SequenceField::TankLevel`          |
//! | `<fuel>.nozzle[N].start`    | `SequenceField::NozzleStart`        |
//! | `<fuel>.nozzle[N].end`      | `SequenceField::NozzleEnd`          |
//!
//! `N` counts from 1, as on the paper sheets.

use std::fmt;
use std::str::FromStr;

use fuel_core::{Field, FormError, FormStore, FuelType, PeriodField, SequenceField};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("expected key=value, got '{0}'")]
    MissingValue(String),

    #[error("unknown field '{0}'")]
    UnknownKey(String),

    #[error("'{key}': position '{position}' must be a number from 1")]
    BadPosition { key: String, position: String },
}

/// One parsed assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Edit {
    Field(Field, String),
    Period(PeriodField, String),
    Sequence(SequenceField, usize, String),
}

impl Edit {
    pub fn apply(
        self,
        store: &mut FormStore,
    ) -> Result<(), FormError> {
        match self {
            Self::Field(field, value) => {
                store.set(field, value);
            }
            Self::Period(field, value) => {
                store.set_nested(field, value);
            }
            Self::Sequence(field, index, value) => {
                store.set_at(field, index, value)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for Edit {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            Self::Field(field, value) => write!(f, "{field} = '{value}'"),
            Self::Period(PeriodField::Start, value) => write!(f, "period start = '{value}'"),
            Self::Period(PeriodField::End, value) => write!(f, "period end = '{value}'"),
            Self::Sequence(field, index, value) => {
                write!(f, "{field} {} = '{value}'", index + 1)
            }
        }
    }
}

impl FromStr for Edit {
    type Err = EditError;

    fn from_str(assignment: &str) -> Result<Self, Self::Err> {
        let (key, value) = assignment
            .split_once('=')
            .ok_or_else(|| EditError::MissingValue(assignment.to_string()))?;
        let key = key.trim().to_ascii_lowercase();
        let value = value.trim().to_string();
        let unknown = || EditError::UnknownKey(key.clone());

        match key.as_str() {
            "station" => return Ok(Self::Field(Field::StationName, value)),
            "period.start" => return Ok(Self::Period(PeriodField::Start, value)),
            "period.end" => return Ok(Self::Period(PeriodField::End, value)),
            _ => {}
        }

        let (fuel, rest) = key.split_once('.').ok_or_else(unknown)?;
        let fuel = FuelType::parse(fuel).ok_or_else(unknown)?;

        let field = match rest {
            "tanks" => Field::TankCount(fuel),
            "nozzles" => Field::NozzleCount(fuel),
            "initial" => Field::Initial(fuel),
            "received" => Field::Received(fuel),
            "electronic" => Field::ElectronicSales(fuel),
            _ => {
                let (field, index) = sequence_key(&key, fuel, rest)?;
                return Ok(Self::Sequence(field, index, value));
            }
        };
        Ok(Self::Field(field, value))
    }
}

fn sequence_key(
    key: &str,
    fuel: FuelType,
    rest: &str,
) -> Result<(SequenceField, usize), EditError> {
    if let Some((position, suffix)) = bracketed(rest, "tank") {
        if suffix.is_empty() {
            return Ok((SequenceField::TankLevel(fuel), index(key, position)?));
        }
    }
    if let Some((position, suffix)) = bracketed(rest, "nozzle") {
        let field = match suffix {
            ".start" => SequenceField::NozzleStart(fuel),
            ".end" => SequenceField::NozzleEnd(fuel),
            _ => return Err(EditError::UnknownKey(key.to_string())),
        };
        return Ok((field, index(key, position)?));
    }
    Err(EditError::UnknownKey(key.to_string()))
}

/// Splits `name[pos]suffix` into `(pos, suffix)`.
fn bracketed<'a>(
    text: &'a str,
    name: &str,
) -> Option<(&'a str, &'a str)> {
    let inner = text.strip_prefix(name)?.strip_prefix('[')?;
    inner.split_once(']')
}

/// 1-based position to store index.
fn index(
    key: &str,
    position: &str,
) -> Result<usize, EditError> {
    match position.trim().parse::<usize>() {
        Ok(n) if n >= 1 => Ok(n - 1),
        _ => Err(EditError::BadPosition {
            key: key.to_string(),
            position: position.to_string(),
        }),
    }
}
