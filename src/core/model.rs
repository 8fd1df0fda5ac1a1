use serde::{Deserialize, Serialize};

use crate::utils::validation::normalize_model;

/// How the size number following a series prefix is written
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NumberCoding {
    /// Continuous decimal code, e.g. `GW28.30` -> 28.30
    Decimal,
    /// Integer code, e.g. `HC1200` -> 1200
    Integer,
}

/// A primary model designation split into its series prefix and the text after it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCode {
    normalized: String,
    series_len: usize,
}

impl ModelCode {
    /// Parse a raw model string. Never fails; malformed input just has no
    /// series prefix and no series number.
    pub fn parse(raw: &str) -> Self {
        let normalized = normalize_model(raw);
        let series_len = normalized
            .char_indices()
            .find(|(_, c)| !c.is_ascii_alphabetic())
            .map_or(normalized.len(), |(i, _)| i);

        Self {
            normalized,
            series_len,
        }
    }

    /// Uppercased, trimmed designation
    pub fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Leading alphabetic series prefix (`HCT` for `HCT400A`, empty for `300`)
    pub fn series(&self) -> &str {
        &self.normalized[..self.series_len]
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    /// Numeric series number directly after the prefix, read with the given coding.
    ///
    /// Returns `None` when no digit follows the prefix.
    pub fn series_number(&self, coding: NumberCoding) -> Option<f64> {
        let rest = &self.normalized[self.series_len..];
        let digits = leading_digits(rest);
        if digits.is_empty() {
            return None;
        }

        match coding {
            NumberCoding::Integer => digits.parse::<u64>().ok().map(u64_to_f64),
            NumberCoding::Decimal => {
                let after = &rest[digits.len()..];
                let fraction = after
                    .strip_prefix('.')
                    .map(leading_digits)
                    .filter(|f| !f.is_empty());
                match fraction {
                    Some(fraction) => format!("{digits}.{fraction}").parse().ok(),
                    None => digits.parse().ok(),
                }
            }
        }
    }
}

impl std::fmt::Display for ModelCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.normalized)
    }
}

fn leading_digits(s: &str) -> &str {
    let end = s
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map_or(s.len(), |(i, _)| i);
    &s[..end]
}

#[inline]
fn u64_to_f64(value: u64) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    {
        value as f64
    }
}
