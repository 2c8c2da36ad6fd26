use std::fmt;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod loader;
pub mod parser;
pub mod pipeline;
pub mod query;
pub mod render;
pub mod selector;

pub use loader::{CsvSource, HttpSource, LoadError, StaticSource};
pub use parser::{parse_asteroids, ParseReport};
pub use pipeline::{run_search, search, Outcome, ResultSink, SearchOutput, SearchReport, SubmissionTracker};
pub use query::{FormInput, QueryError, SearchQuery};
pub use render::{format_distance, render_blocks, Layout, ResultBlock};
pub use selector::{select, Ranked, Selection};

/// A point in space, in metres.
#[derive(Debug, Clone, Copy, PartialEq, Default, serde::Serialize, serde::Deserialize)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Euclidean distance to `other`. `NaN` in any coordinate yields `NaN`.
    pub fn distance_to(&self, other: &Position) -> f64 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2) + (self.z - other.z).powi(2))
            .sqrt()
    }
}

/// One row of the asteroid table.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Asteroid {
    pub region: String,
    /// The CSV `Type` column.
    pub kind: String,
    pub composition: String,
    pub position: Position,
    /// Used verbatim as a CSS color value.
    pub color: String,
    /// 1-based line in the source file.
    pub line: usize,
}

/// Something worth reporting about a single CSV line.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagnostic {
    pub line: usize,
    pub issue: Issue,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Issue {
    /// Row dropped: not enough fields.
    TooFewColumns { found: usize },
    /// Row dropped: the CSV reader could not decode it.
    Unreadable(String),
    /// Row kept, but a coordinate has no numeric value.
    NonNumericCoordinate { axis: char, value: String },
    /// Row excluded from selection: nothing to match ores against.
    MissingComposition,
}

impl fmt::Display for Issue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Issue::TooFewColumns { found } => write!(
                f,
                "expected {} columns, found {}",
                config::EXPECTED_COLUMNS,
                found
            ),
            Issue::Unreadable(reason) => write!(f, "unreadable row: {}", reason),
            Issue::NonNumericCoordinate { axis, value } => {
                write!(f, "{} coordinate '{}' is not a number", axis.to_ascii_uppercase(), value)
            }
            Issue::MissingComposition => write!(f, "composition is empty"),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.issue)
    }
}

/// Run a search over CSV text supplied by JavaScript.
///
/// Arguments are the raw form strings. Returns an array of result blocks,
/// or a string describing why the query was rejected.
#[wasm_bindgen]
pub fn search_asteroids(
    csv: &str,
    ores: &str,
    origin: &str,
    max_distance: &str,
    amount: &str,
) -> Result<JsValue, JsValue> {
    let form = FormInput {
        ores: ores.to_string(),
        origin: origin.to_string(),
        max_distance: max_distance.to_string(),
        amount: amount.to_string(),
    };
    let query = SearchQuery::from_form(&form).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let output = search(csv, &query);
    serde_wasm_bindgen::to_value(&output.blocks).map_err(|e| JsValue::from_str(&e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_euclidean() {
        let origin = Position::default();
        assert_eq!(Position::new(3.0, 4.0, 0.0).distance_to(&origin), 5.0);
        assert_eq!(Position::new(1.0, 2.0, 2.0).distance_to(&origin), 3.0);
    }

    #[test]
    fn nan_coordinate_gives_nan_distance() {
        let p = Position::new(f64::NAN, 0.0, 0.0);
        assert!(p.distance_to(&Position::default()).is_nan());
    }

    #[test]
    fn diagnostics_display_line_and_reason() {
        let d = Diagnostic {
            line: 4,
            issue: Issue::TooFewColumns { found: 3 },
        };
        assert_eq!(d.to_string(), "line 4: expected 7 columns, found 3");

        let d = Diagnostic {
            line: 9,
            issue: Issue::NonNumericCoordinate {
                axis: 'y',
                value: "abc".into(),
            },
        };
        assert_eq!(d.to_string(), "line 9: Y coordinate 'abc' is not a number");
    }
}
