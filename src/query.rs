//! Turning raw form strings into a [`SearchQuery`].

use thiserror::Error;

use crate::config::{ORIGIN_FIRST_COORD, ORIGIN_MIN_FIELDS};
use crate::Position;

/// The four text fields of the search form, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormInput {
    pub ores: String,
    pub origin: String,
    pub max_distance: String,
    pub amount: String,
}

/// A validated search request.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchQuery {
    /// Substrings looked for in each record's composition.
    pub ores: Vec<String>,
    pub origin: Position,
    /// `0` means no limit.
    pub max_distance: f64,
    pub amount: usize,
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum QueryError {
    #[error("{field} cannot be empty")]
    Empty { field: &'static str },
    #[error("{field} must be a valid number, got '{value}'")]
    NotANumber { field: &'static str, value: String },
    #[error("{field} must be at least {min}")]
    BelowMinimum { field: &'static str, min: String },
    #[error("origin '{0}' needs at least {} colon-separated fields", ORIGIN_MIN_FIELDS)]
    OriginTooShort(String),
    #[error("origin '{0}' has no X:Y:Z coordinates")]
    OriginWithoutCoordinates(String),
}

impl SearchQuery {
    pub fn from_form(input: &FormInput) -> Result<Self, QueryError> {
        let max_distance = if input.max_distance.trim().is_empty() {
            0.0
        } else {
            validate_numeric_input(&input.max_distance, Some(0.0), "Max distance")?
        };

        Ok(Self {
            ores: split_ores(&input.ores),
            origin: parse_origin(&input.origin)?,
            max_distance,
            amount: validate_numeric_input(&input.amount, Some(0), "Amount")?,
        })
    }
}

/// Split a comma-separated ore list. Tokens are kept verbatim, so an
/// empty token (blank input, trailing comma) matches every composition.
pub fn split_ores(input: &str) -> Vec<String> {
    input.split(',').map(str::to_string).collect()
}

/// Read X/Y/Z from a colon-separated GPS string such as
/// `GPS:Home:100:-20.5:3:#FF75C9F1:`.
///
/// Coordinates normally sit at fields 2..=4. When those are not all
/// numeric, the first run of three numeric fields after the name is used.
pub fn parse_origin(input: &str) -> Result<Position, QueryError> {
    let fields: Vec<&str> = input.trim().split(':').map(str::trim).collect();
    if fields.len() < ORIGIN_MIN_FIELDS {
        return Err(QueryError::OriginTooShort(input.to_string()));
    }

    let numbers: Vec<Option<f64>> = fields
        .iter()
        .map(|f| f.parse::<f64>().ok().filter(|v| v.is_finite()))
        .collect();

    numbers[ORIGIN_FIRST_COORD..]
        .windows(3)
        .find_map(|w| match w {
            [Some(x), Some(y), Some(z)] => Some(Position::new(*x, *y, *z)),
            _ => None,
        })
        .ok_or_else(|| QueryError::OriginWithoutCoordinates(input.to_string()))
}

/// Parse a trimmed numeric field, enforcing an optional lower bound.
pub fn validate_numeric_input<T>(
    input: &str,
    min: Option<T>,
    field: &'static str,
) -> Result<T, QueryError>
where
    T: std::str::FromStr + std::fmt::Display + PartialOrd,
{
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(QueryError::Empty { field });
    }

    let val = trimmed.parse::<T>().map_err(|_| QueryError::NotANumber {
        field,
        value: trimmed.to_string(),
    })?;
    if let Some(min_val) = min {
        // also rejects NaN for floats
        if !(val >= min_val) {
            return Err(QueryError::BelowMinimum {
                field,
                min: min_val.to_string(),
            });
        }
    }
    Ok(val)
}
