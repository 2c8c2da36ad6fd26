//! Display formatting for selected asteroids.
//!
//! Produces plain [`ResultBlock`]s; the UI turns them into markup.

use crate::config::KM_THRESHOLD_M;
use crate::selector::Ranked;

/// How result blocks are laid out on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// One line of text per asteroid.
    Compact,
    /// A multi-line card per asteroid, tinted with its color.
    #[default]
    Detailed,
}

impl Layout {
    pub const ALL: [Layout; 2] = [Layout::Compact, Layout::Detailed];

    pub fn label(self) -> &'static str {
        match self {
            Layout::Compact => "Compact",
            Layout::Detailed => "Detailed",
        }
    }
}

/// Everything needed to show one result.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct ResultBlock {
    /// 1-based rank.
    pub index: usize,
    pub distance: String,
    pub region: String,
    pub kind: String,
    pub composition: String,
    /// `X:Y:Z` as found in the source.
    pub coordinates: String,
    pub color: String,
}

impl ResultBlock {
    pub fn from_ranked(index: usize, ranked: &Ranked) -> Self {
        let a = &ranked.asteroid;
        Self {
            index,
            distance: format_distance(ranked.distance),
            region: a.region.clone(),
            kind: a.kind.clone(),
            composition: a.composition.clone(),
            coordinates: format!("{}:{}:{}", a.position.x, a.position.y, a.position.z),
            color: a.color.clone(),
        }
    }

    /// `GPS:<region> <type> <composition>:X:Y:Z:<color>`
    pub fn gps(&self) -> String {
        format!(
            "GPS:{} {} {}:{}:{}",
            self.region, self.kind, self.composition, self.coordinates, self.color
        )
    }

    /// The single-line form used by [`Layout::Compact`].
    pub fn summary_line(&self) -> String {
        format!("{}. Distance: {} | {}", self.index, self.distance, self.gps())
    }
}

/// Metres up to 1000, kilometres with two decimals above that.
///
/// Rounds like a browser's `toFixed`: 1045 m shows as "1.04 km" because
/// 1.045 is stored just below the tie, and 2.5 m shows as "3 m".
pub fn format_distance(distance: f64) -> String {
    if distance > KM_THRESHOLD_M {
        format!("{} km", to_fixed(distance / KM_THRESHOLD_M, 2))
    } else {
        format!("{} m", to_fixed(distance, 0))
    }
}

/// Format with `digits` decimals, rounding the exact binary value and
/// sending exact ties away from zero (`1.125` gives "1.13").
fn to_fixed(value: f64, digits: usize) -> String {
    let formatted = format!("{:.*}", digits, value);
    if !value.is_finite() || value == 0.0 {
        return formatted;
    }

    // 1100 decimals hold the full expansion of any f64
    let exact = format!("{:.1100}", value);
    let tail = exact
        .split_once('.')
        .map(|(_, frac)| &frac[digits..])
        .unwrap_or("");
    let is_tie = tail.starts_with('5') && tail[1..].bytes().all(|b| b == b'0');
    if is_tie {
        // one ulp further from zero is past the tie
        format!("{:.*}", digits, f64::from_bits(value.to_bits() + 1))
    } else {
        formatted
    }
}

/// Number and format `results` in order.
pub fn render_blocks(results: &[Ranked]) -> Vec<ResultBlock> {
    results
        .iter()
        .enumerate()
        .map(|(i, ranked)| ResultBlock::from_ranked(i + 1, ranked))
        .collect()
}
