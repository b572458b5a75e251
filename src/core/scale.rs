use std::fmt;
use std::str::FromStr;

use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

use crate::core::ticks::{DEFAULT_TICK_COUNT, linear_ticks};
use crate::core::types::Key;
use crate::error::{ChartError, ChartResult};

/// Which family a scale belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleKind {
    /// Categorical: distinct keys split the range into equal bands.
    Band,
    /// Continuous: a numeric interval maps linearly onto the range.
    Linear,
}

impl ScaleKind {
    /// Parses a scale kind for a named axis.
    ///
    /// Anything other than `band` or `linear` is a wiring mistake and is
    /// reported as [`ChartError::UnexpectedScale`].
    pub fn parse_for_axis(axis: &str, kind: &str) -> ChartResult<Self> {
        match kind.trim().to_ascii_lowercase().as_str() {
            "band" | "scaleband" => Ok(Self::Band),
            "linear" | "scalelinear" => Ok(Self::Linear),
            _ => Err(ChartError::UnexpectedScale {
                axis: axis.to_owned(),
                kind: kind.to_owned(),
            }),
        }
    }
}

impl FromStr for ScaleKind {
    type Err = ChartError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_for_axis("unknown", s)
    }
}

impl fmt::Display for ScaleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Band => f.write_str("band"),
            Self::Linear => f.write_str("linear"),
        }
    }
}

/// Continuous scale mapping `[d0, d1]` linearly onto `[r0, r1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    domain: (f64, f64),
    range: (f64, f64),
}

impl Default for LinearScale {
    fn default() -> Self {
        Self {
            domain: (0.0, 1.0),
            range: (0.0, 1.0),
        }
    }
}

impl LinearScale {
    pub fn new(domain_start: f64, domain_end: f64) -> ChartResult<Self> {
        let mut scale = Self::default();
        scale.set_domain(domain_start, domain_end)?;
        Ok(scale)
    }

    pub fn set_domain(&mut self, start: f64, end: f64) -> ChartResult<()> {
        if !start.is_finite() || !end.is_finite() {
            return Err(ChartError::InvalidDomain(
                "continuous domain bounds must be finite".to_owned(),
            ));
        }
        self.domain = (start, end);
        Ok(())
    }

    pub fn set_range(&mut self, start: f64, end: f64) {
        self.range = (start, end);
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        self.domain
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        self.range
    }

    /// Maps a domain value to a pixel. A zero-width domain maps to the range start.
    #[must_use]
    pub fn map(self, value: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = d1 - d0;
        if span == 0.0 {
            return r0;
        }
        r0 + (value - d0) / span * (r1 - r0)
    }

    /// Maps a pixel back into the domain. A zero-width range maps to the domain start.
    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let (d0, d1) = self.domain;
        let (r0, r1) = self.range;
        let span = r1 - r0;
        if span == 0.0 {
            return d0;
        }
        d0 + (pixel - r0) / span * (d1 - d0)
    }

    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        linear_ticks(self.domain.0, self.domain.1, count)
    }
}

/// Categorical scale dividing a pixel span into one equal band per key.
///
/// Bands have no inner or outer padding. When the range is reversed the first
/// key occupies the band nearest `r0`, as with an inverted y axis.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BandScale {
    domain: Vec<Key>,
    range: (f64, f64),
}

impl BandScale {
    #[must_use]
    pub fn new(domain: Vec<Key>) -> Self {
        Self {
            domain: dedup_keys(domain),
            range: (0.0, 1.0),
        }
    }

    pub fn set_domain(&mut self, domain: Vec<Key>) {
        self.domain = dedup_keys(domain);
    }

    pub fn set_range(&mut self, start: f64, end: f64) {
        self.range = (start, end);
    }

    #[must_use]
    pub fn domain(&self) -> &[Key] {
        &self.domain
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Width of a single band; zero for an empty domain.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        let count = self.domain.len();
        if count == 0 {
            return 0.0;
        }
        let (r0, r1) = self.range;
        (r1 - r0).abs() / count as f64
    }

    /// Start coordinate of the band for `key`, or `None` for unknown keys.
    #[must_use]
    pub fn map(&self, key: &Key) -> Option<f64> {
        let index = self.domain.iter().position(|candidate| candidate == key)?;
        Some(self.position_of_index(index))
    }

    #[must_use]
    pub fn position_of_index(&self, index: usize) -> f64 {
        let (r0, r1) = self.range;
        let step = self.bandwidth();
        if r1 < r0 {
            let slots = self.domain.len().saturating_sub(1).saturating_sub(index);
            r1 + step * slots as f64
        } else {
            r0 + step * index as f64
        }
    }
}

fn dedup_keys(keys: Vec<Key>) -> Vec<Key> {
    keys.into_iter().collect::<IndexSet<Key>>().into_iter().collect()
}

/// A configured scale of either family.
#[derive(Debug, Clone, PartialEq)]
pub enum Scale {
    Band(BandScale),
    Linear(LinearScale),
}

impl Scale {
    #[must_use]
    pub fn from_kind(kind: ScaleKind) -> Self {
        match kind {
            ScaleKind::Band => Self::Band(BandScale::default()),
            ScaleKind::Linear => Self::Linear(LinearScale::default()),
        }
    }

    #[must_use]
    pub fn band() -> Self {
        Self::from_kind(ScaleKind::Band)
    }

    #[must_use]
    pub fn linear() -> Self {
        Self::from_kind(ScaleKind::Linear)
    }

    #[must_use]
    pub fn kind(&self) -> ScaleKind {
        match self {
            Self::Band(_) => ScaleKind::Band,
            Self::Linear(_) => ScaleKind::Linear,
        }
    }

    /// Binds a domain.
    ///
    /// Continuous scales take the first and last entries as `[min, max]`,
    /// both of which must be numeric. An empty continuous domain keeps the
    /// previous bounds.
    pub fn set_domain(&mut self, domain: &[Key]) -> ChartResult<()> {
        match self {
            Self::Band(scale) => {
                scale.set_domain(domain.to_vec());
                Ok(())
            }
            Self::Linear(scale) => {
                let (Some(first), Some(last)) = (domain.first(), domain.last()) else {
                    return Ok(());
                };
                let (Some(min), Some(max)) = (first.as_f64(), last.as_f64()) else {
                    return Err(ChartError::InvalidDomain(format!(
                        "continuous domain ends must be numeric, got `{first}` and `{last}`"
                    )));
                };
                scale.set_domain(min, max)
            }
        }
    }

    /// Ticks derived from the scale itself: nice ticks for continuous scales,
    /// the domain for categorical ones.
    #[must_use]
    pub fn ticks(&self) -> Vec<Key> {
        match self {
            Self::Band(scale) => scale.domain().to_vec(),
            Self::Linear(scale) => scale
                .ticks(DEFAULT_TICK_COUNT)
                .into_iter()
                .map(Key::number)
                .collect(),
        }
    }

    pub fn set_range(&mut self, start: f64, end: f64) {
        match self {
            Self::Band(scale) => scale.set_range(start, end),
            Self::Linear(scale) => scale.set_range(start, end),
        }
    }

    #[must_use]
    pub fn range(&self) -> (f64, f64) {
        match self {
            Self::Band(scale) => scale.range(),
            Self::Linear(scale) => scale.range(),
        }
    }

    /// Maps a key to a pixel. Continuous scales need a numeric key; band
    /// scales need a key present in the domain.
    #[must_use]
    pub fn map(&self, key: &Key) -> Option<f64> {
        match self {
            Self::Band(scale) => scale.map(key),
            Self::Linear(scale) => key.as_f64().map(|value| scale.map(value)),
        }
    }

    /// Band width reported by the scale itself; continuous scales have none.
    #[must_use]
    pub fn bandwidth(&self) -> f64 {
        match self {
            Self::Band(scale) => scale.bandwidth(),
            Self::Linear(_) => 0.0,
        }
    }

    #[must_use]
    pub fn as_band(&self) -> Option<&BandScale> {
        match self {
            Self::Band(scale) => Some(scale),
            Self::Linear(_) => None,
        }
    }

    #[must_use]
    pub fn as_linear(&self) -> Option<LinearScale> {
        match self {
            Self::Band(_) => None,
            Self::Linear(scale) => Some(*scale),
        }
    }
}
