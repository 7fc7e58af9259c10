//! Configuration for the branch predictor models.
//!
//! This module defines the structures used to select and size a predictor. It provides:
//! 1. **Defaults:** Baseline table geometry for every scheme.
//! 2. **Structures:** The root [`Config`] and the perceptron-specific [`PerceptronConfig`].
//! 3. **Schemes:** The [`Scheme`] selector and its textual forms.
//! 4. **Sources:** JSON (`Config::from_json`) and the classic predictor spec
//!    (`gshare:13`, `tournament:9:10:10`, `perceptron:32:10`).
//!
//! Widths a scheme does not use are ignored, and are not validated.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::ConfigError;

/// Default configuration constants.
///
/// These values define the baseline predictor geometry when a field is not
/// given explicitly.
mod defaults {
    /// Default global history width (16K-entry tables).
    pub const GLOBAL_HISTORY_BITS: u32 = 14;

    /// Default local history width (1024-entry local counter table).
    pub const LOCAL_HISTORY_BITS: u32 = 10;

    /// Default number of PC bits used to index per-PC tables (1024 entries).
    pub const PC_INDEX_BITS: u32 = 10;

    /// Default perceptron weight width (8-bit signed, `[-128, 127]`).
    pub const WEIGHT_BITS: u32 = 8;
}

/// Upper bound for any width that sizes a table (`2^bits` entries).
pub const MAX_TABLE_BITS: u32 = 30;

/// Upper bound for the perceptron history length, which is packed into a `u64`.
pub const MAX_PERCEPTRON_HISTORY: u32 = 63;

/// Upper bound on the combined table storage of one predictor (1 GiB).
pub const MAX_TABLE_BYTES: u64 = 1 << 30;

/// Accepted perceptron weight widths.
pub const WEIGHT_BITS_RANGE: std::ops::RangeInclusive<u32> = 2..=16;

/// Branch prediction scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Scheme {
    /// Always predicts taken; holds no state.
    #[default]
    #[serde(alias = "static", alias = "STATIC")]
    Static,
    /// Global history XOR PC indexing a table of 2-bit counters.
    #[serde(alias = "Gshare", alias = "gshare", alias = "GSHARE")]
    GShare,
    /// Local and global predictors arbitrated by a selector table.
    #[serde(alias = "tournament", alias = "TOURNAMENT")]
    Tournament,
    /// Table of perceptrons over a signed global history.
    #[serde(alias = "perceptron", alias = "PERCEPTRON")]
    Perceptron,
    /// Reserved slot with no predictor behind it.
    ///
    /// Predicts not-taken for every branch and ignores training.
    #[serde(alias = "custom", alias = "CUSTOM")]
    Custom,
}

impl Scheme {
    /// All schemes, in declaration order.
    pub const ALL: [Self; 5] = [
        Self::Static,
        Self::GShare,
        Self::Tournament,
        Self::Perceptron,
        Self::Custom,
    ];

    /// Display name of the scheme.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Static => "Static",
            Self::GShare => "Gshare",
            Self::Tournament => "Tournament",
            Self::Perceptron => "Perceptron",
            Self::Custom => "Custom",
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scheme {
    type Err = ConfigError;

    /// Parses a scheme name case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|scheme| scheme.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownScheme(s.to_string()))
    }
}

/// Root predictor configuration.
///
/// # Examples
///
/// ```
/// use bpsim_core::config::{Config, Scheme};
///
/// let json = r#"{ "scheme": "Tournament", "global_history_bits": 9 }"#;
/// let config = Config::from_json(json).unwrap();
/// assert_eq!(config.scheme, Scheme::Tournament);
/// assert_eq!(config.global_history_bits, 9);
/// assert_eq!(config.local_history_bits, 10);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Selected prediction scheme.
    #[serde(default)]
    pub scheme: Scheme,

    /// Global history width `H` (GShare, Tournament, Perceptron history length).
    #[serde(default = "Config::default_global_history")]
    pub global_history_bits: u32,

    /// Local history width `L` (Tournament).
    #[serde(default = "Config::default_local_history")]
    pub local_history_bits: u32,

    /// PC index width `P` (Tournament local history table, Perceptron table).
    #[serde(default = "Config::default_pc_index")]
    pub pc_index_bits: u32,

    /// Perceptron-specific parameters.
    #[serde(default)]
    pub perceptron: PerceptronConfig,
}

impl Config {
    /// Returns the default global history width.
    fn default_global_history() -> u32 {
        defaults::GLOBAL_HISTORY_BITS
    }

    /// Returns the default local history width.
    fn default_local_history() -> u32 {
        defaults::LOCAL_HISTORY_BITS
    }

    /// Returns the default PC index width.
    fn default_pc_index() -> u32 {
        defaults::PC_INDEX_BITS
    }

    /// Default geometry with the given scheme selected.
    pub fn with_scheme(scheme: Scheme) -> Self {
        Self {
            scheme,
            ..Self::default()
        }
    }

    /// Deserializes and validates a JSON configuration.
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed JSON, or any error from
    /// [`Config::validate`].
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, deserializes and validates a JSON configuration file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read, otherwise
    /// as [`Config::from_json`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Parses and validates a classic predictor spec.
    ///
    /// Accepted forms:
    ///
    /// * `static`
    /// * `gshare:<ghistory>`
    /// * `tournament:<ghistory>:<lhistory>:<index>`
    /// * `perceptron:<ghistory>:<index>[:<weight bits>]`
    /// * `custom`
    ///
    /// Omitted widths keep their defaults; `gshare` alone is `gshare:14`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::UnknownScheme`] for an unknown name,
    /// [`ConfigError::InvalidSpec`] for non-numeric or surplus widths, or any
    /// error from [`Config::validate`].
    pub fn from_predictor_spec(spec: &str) -> Result<Self, ConfigError> {
        let mut fields = spec.trim().split(':');
        let scheme: Scheme = fields.next().unwrap_or_default().parse()?;
        let widths = fields
            .map(|field| {
                field.trim().parse::<u32>().map_err(|e| ConfigError::InvalidSpec {
                    spec: spec.to_string(),
                    reason: format!("`{field}` is not a bit width ({e})"),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut config = Self::with_scheme(scheme);
        let slots: Vec<&mut u32> = match scheme {
            Scheme::Static | Scheme::Custom => Vec::new(),
            Scheme::GShare => vec![&mut config.global_history_bits],
            Scheme::Tournament => vec![
                &mut config.global_history_bits,
                &mut config.local_history_bits,
                &mut config.pc_index_bits,
            ],
            Scheme::Perceptron => vec![
                &mut config.global_history_bits,
                &mut config.pc_index_bits,
                &mut config.perceptron.weight_bits,
            ],
        };
        if widths.len() > slots.len() {
            return Err(ConfigError::InvalidSpec {
                spec: spec.to_string(),
                reason: format!(
                    "{scheme} takes at most {} width(s), got {}",
                    slots.len(),
                    widths.len()
                ),
            });
        }
        for (slot, width) in slots.into_iter().zip(widths) {
            *slot = width;
        }

        config.validate()?;
        Ok(config)
    }

    /// Checks the widths used by the selected scheme.
    ///
    /// Zero widths and widths that would overflow the table representation are
    /// rejected; widths the scheme ignores are not inspected. The combined
    /// table storage must also fit in [`MAX_TABLE_BYTES`].
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroWidth`], [`ConfigError::WidthTooLarge`],
    /// [`ConfigError::WeightWidth`] or [`ConfigError::TableTooLarge`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.scheme {
            Scheme::Static | Scheme::Custom => {}
            Scheme::GShare => {
                check_width("global_history_bits", self.global_history_bits, MAX_TABLE_BITS)?;
            }
            Scheme::Tournament => {
                check_width("global_history_bits", self.global_history_bits, MAX_TABLE_BITS)?;
                check_width("local_history_bits", self.local_history_bits, MAX_TABLE_BITS)?;
                check_width("pc_index_bits", self.pc_index_bits, MAX_TABLE_BITS)?;
            }
            Scheme::Perceptron => {
                check_width(
                    "global_history_bits",
                    self.global_history_bits,
                    MAX_PERCEPTRON_HISTORY,
                )?;
                check_width("pc_index_bits", self.pc_index_bits, MAX_TABLE_BITS)?;
                self.perceptron.validate()?;
            }
        }

        let bytes = self.table_bytes();
        if bytes > MAX_TABLE_BYTES {
            return Err(ConfigError::TableTooLarge {
                scheme: self.scheme,
                bytes,
                max: MAX_TABLE_BYTES,
            });
        }
        Ok(())
    }

    /// Bytes of table storage the selected scheme allocates, saturating at
    /// `u64::MAX`.
    pub const fn table_bytes(&self) -> u64 {
        let h = self.global_history_bits;
        match self.scheme {
            Scheme::Static | Scheme::Custom => 0,
            // One byte per 2-bit counter.
            Scheme::GShare => scaled(1, h),
            // Global and selector counters, local counters, u64 local histories.
            Scheme::Tournament => scaled(2, h)
                .saturating_add(scaled(1, self.local_history_bits))
                .saturating_add(scaled(8, self.pc_index_bits)),
            // i16 weights, `H + 1` per row.
            Scheme::Perceptron => scaled(2 * (h as u64 + 1), self.pc_index_bits),
        }
    }
}

impl Default for Config {
    /// Static scheme with the default table geometry.
    fn default() -> Self {
        Self {
            scheme: Scheme::default(),
            global_history_bits: defaults::GLOBAL_HISTORY_BITS,
            local_history_bits: defaults::LOCAL_HISTORY_BITS,
            pc_index_bits: defaults::PC_INDEX_BITS,
            perceptron: PerceptronConfig::default(),
        }
    }
}

/// Perceptron predictor configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerceptronConfig {
    /// Width of each signed weight, bias included.
    #[serde(default = "PerceptronConfig::default_weight_bits")]
    pub weight_bits: u32,
}

impl PerceptronConfig {
    /// Returns the default perceptron weight width.
    fn default_weight_bits() -> u32 {
        defaults::WEIGHT_BITS
    }

    /// Smallest representable weight.
    pub const fn weight_min(&self) -> i32 {
        -(1 << (self.weight_bits - 1))
    }

    /// Largest representable weight.
    pub const fn weight_max(&self) -> i32 {
        (1 << (self.weight_bits - 1)) - 1
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if WEIGHT_BITS_RANGE.contains(&self.weight_bits) {
            Ok(())
        } else {
            Err(ConfigError::WeightWidth(self.weight_bits))
        }
    }
}

impl Default for PerceptronConfig {
    fn default() -> Self {
        Self {
            weight_bits: defaults::WEIGHT_BITS,
        }
    }
}

/// `scale × 2^bits`, saturating.
const fn scaled(scale: u64, bits: u32) -> u64 {
    if bits >= u64::BITS {
        u64::MAX
    } else {
        scale.saturating_mul(1 << bits)
    }
}

fn check_width(field: &'static str, bits: u32, max: u32) -> Result<(), ConfigError> {
    if bits == 0 {
        Err(ConfigError::ZeroWidth { field })
    } else if bits > max {
        Err(ConfigError::WidthTooLarge { field, bits, max })
    } else {
        Ok(())
    }
}
