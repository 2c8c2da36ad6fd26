use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::EXPECTED_COLUMNS;
use crate::{Asteroid, Diagnostic, Issue, Position};

// Longest leading float literal, the way a browser's parseFloat reads it
static FLOAT_PREFIX_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[+-]?(?:Infinity|(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?)")
        .expect("float prefix pattern is valid")
});

/// Records parsed from one CSV text plus everything noticed on the way.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParseReport {
    pub asteroids: Vec<Asteroid>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParseReport {
    /// Diagnostics for rows that did not become records.
    pub fn skipped(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| {
            matches!(
                d.issue,
                Issue::TooFewColumns { .. } | Issue::Unreadable(_)
            )
        })
    }
}

/// Parse asteroid CSV text. The first line is a header and is discarded.
///
/// Blank lines are dropped silently, lines with fewer than seven fields
/// are dropped with a warning. Columns are positional:
/// `Region,Type,Composition,X,Y,Z,Color`.
pub fn parse_asteroids(csv_content: &str) -> ParseReport {
    // The header is the first physical line, even when it is blank
    let body = csv_content
        .split_once('\n')
        .map(|(_, rest)| rest)
        .unwrap_or("");

    // Plain comma splitting: quotes are ordinary characters
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .quoting(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(body.as_bytes());

    let mut report = ParseReport::default();

    for (i, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                let line = e
                    .position()
                    .map(|p| p.line() as usize + 1)
                    .unwrap_or(i + 2);
                warn!("Skipping line {}: {}", line, e);
                report.diagnostics.push(Diagnostic {
                    line,
                    issue: Issue::Unreadable(e.to_string()),
                });
                continue;
            }
        };
        let line = record
            .position()
            .map(|p| p.line() as usize + 1)
            .unwrap_or(i + 2);

        // A whitespace-only line reads as a single empty field
        if record.len() == 1 && record[0].is_empty() {
            debug!("Skipping blank line {}", line);
            continue;
        }

        if record.len() < EXPECTED_COLUMNS {
            let issue = Issue::TooFewColumns {
                found: record.len(),
            };
            warn!("Skipping line {}: {}", line, issue);
            report.diagnostics.push(Diagnostic { line, issue });
            continue;
        }

        let mut coordinate = |axis: char, raw: &str| {
            let value = parse_coordinate(raw);
            if value.is_nan() {
                let issue = Issue::NonNumericCoordinate {
                    axis,
                    value: raw.to_string(),
                };
                warn!("Line {}: {}", line, issue);
                report.diagnostics.push(Diagnostic { line, issue });
            }
            value
        };
        let position = Position {
            x: coordinate('x', &record[3]),
            y: coordinate('y', &record[4]),
            z: coordinate('z', &record[5]),
        };

        report.asteroids.push(Asteroid {
            region: record[0].to_string(),
            kind: record[1].to_string(),
            composition: record[2].to_string(),
            position,
            color: record[6].to_string(),
            line,
        });
    }

    info!(
        "Parsed {} asteroids ({} diagnostics)",
        report.asteroids.len(),
        report.diagnostics.len()
    );
    report
}

/// Read the leading numeric part of `raw`; `NaN` when there is none.
///
/// `"3"`, `" 3.5km"` and `"1e3"` give 3, 3.5 and 1000.
pub fn parse_coordinate(raw: &str) -> f64 {
    FLOAT_PREFIX_REGEX
        .find(raw.trim_start())
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Region,Type,Composition,X,Y,Z,Color";

    #[test]
    fn keeps_well_formed_rows_in_file_order() {
        let csv = format!(
            "{}\nA,rock,FeNi,1,2,3,red\nB,ice,H2O,4,5,6,blue\nC,metal,Au,7,8,9,gold\n",
            HEADER
        );
        let report = parse_asteroids(&csv);
        let regions: Vec<&str> = report.asteroids.iter().map(|a| a.region.as_str()).collect();
        assert_eq!(regions, ["A", "B", "C"]);
        assert!(report.diagnostics.is_empty());

        let first = &report.asteroids[0];
        assert_eq!(first.kind, "rock");
        assert_eq!(first.composition, "FeNi");
        assert_eq!(first.position, Position::new(1.0, 2.0, 3.0));
        assert_eq!(first.color, "red");
        assert_eq!(first.line, 2);
    }

    #[test]
    fn short_rows_are_dropped_with_a_diagnostic() {
        let csv = format!("{}\nA,rock,FeNi,1,2,3,red\nB,ice,H2O\nC,metal,Au,7,8,9,gold\n", HEADER);
        let report = parse_asteroids(&csv);
        assert_eq!(report.asteroids.len(), 2);
        assert_eq!(
            report.diagnostics,
            vec![Diagnostic {
                line: 3,
                issue: Issue::TooFewColumns { found: 3 }
            }]
        );
        assert_eq!(report.skipped().count(), 1);
    }

    #[test]
    fn blank_lines_are_dropped_silently() {
        let csv = format!("{}\n\nA,rock,FeNi,1,2,3,red\n   \n\nB,ice,H2O,4,5,6,blue", HEADER);
        let report = parse_asteroids(&csv);
        assert_eq!(report.asteroids.len(), 2);
        assert!(report.diagnostics.is_empty());
    }

    #[test]
    fn surrounding_whitespace_and_crlf_are_trimmed() {
        let csv = format!("{}\r\n  A,rock,FeNi,1,2,3,red  \r\n", HEADER);
        let report = parse_asteroids(&csv);
        assert_eq!(report.asteroids.len(), 1);
        assert_eq!(report.asteroids[0].region, "A");
        assert_eq!(report.asteroids[0].color, "red");
    }

    #[test]
    fn header_only_yields_nothing() {
        let report = parse_asteroids(HEADER);
        assert!(report.asteroids.is_empty());
        assert!(report.diagnostics.is_empty());
        assert!(parse_asteroids("").asteroids.is_empty());
    }

    #[test]
    fn first_line_is_the_header_even_when_blank() {
        let report = parse_asteroids("\nA,rock,FeNi,1,2,3,red\n");
        assert_eq!(report.asteroids.len(), 1);
        assert_eq!(report.asteroids[0].region, "A");
        assert_eq!(report.asteroids[0].line, 2);
    }

    #[test]
    fn quotes_do_not_join_fields_or_lines() {
        let csv = format!(
            "{}\nA,rock,FeNi,1,2,3,\"red\nB,ice,Fe,4,5,6,blue\nC,ice,\"Fe,Ni\",7,8,9,green\n",
            HEADER
        );
        let report = parse_asteroids(&csv);
        let regions: Vec<&str> = report.asteroids.iter().map(|a| a.region.as_str()).collect();
        assert_eq!(regions, ["A", "B", "C"]);
        assert_eq!(report.asteroids[0].color, "\"red");
        assert_eq!(report.asteroids[1].line, 3);

        // `"Fe,Ni"` splits in two, shifting every later column
        let c = &report.asteroids[2];
        assert_eq!(c.composition, "\"Fe");
        assert!(c.position.x.is_nan());
        assert_eq!(c.position.y, 7.0);
        assert_eq!(c.position.z, 8.0);
        assert_eq!(c.color, "9");
    }

    #[test]
    fn extra_columns_are_ignored() {
        let csv = format!("{}\nA,rock,FeNi,1,2,3,red,extra,more\n", HEADER);
        let report = parse_asteroids(&csv);
        assert_eq!(report.asteroids.len(), 1);
        assert_eq!(report.asteroids[0].color, "red");
    }

    #[test]
    fn non_numeric_coordinate_is_kept_as_nan() {
        let csv = format!("{}\nA,rock,FeNi,abc,2,3,red\n", HEADER);
        let report = parse_asteroids(&csv);
        assert_eq!(report.asteroids.len(), 1);
        assert!(report.asteroids[0].position.x.is_nan());
        assert_eq!(
            report.diagnostics[0].issue,
            Issue::NonNumericCoordinate {
                axis: 'x',
                value: "abc".into()
            }
        );
        assert_eq!(report.skipped().count(), 0);
    }

    #[test]
    fn coordinates_read_leading_number() {
        assert_eq!(parse_coordinate("3"), 3.0);
        assert_eq!(parse_coordinate("-12.5"), -12.5);
        assert_eq!(parse_coordinate("  3.5km"), 3.5);
        assert_eq!(parse_coordinate("1e3"), 1000.0);
        assert_eq!(parse_coordinate("1e"), 1.0);
        assert_eq!(parse_coordinate(".5"), 0.5);
        assert_eq!(parse_coordinate("7."), 7.0);
        assert_eq!(parse_coordinate("-Infinity"), f64::NEG_INFINITY);
        assert!(parse_coordinate("").is_nan());
        assert!(parse_coordinate("x1").is_nan());
        assert!(parse_coordinate("-").is_nan());
    }
}
