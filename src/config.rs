//! Engine configuration
//!
//! Every engine takes its config explicitly. Defaults mirror the constants in
//! `lib.rs`; a TOML file may override any subset of them.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::{Error, Result};

/// Environment variable consulted when no config path is given
pub const CONFIG_ENV_VAR: &str = "CYCLEAR_CONFIG";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub tags: TagConfig,
    pub scoring: ScoringConfig,
    pub pricing: PricingConfig,
    pub server: ServerConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagConfig {
    pub max_tag_chars: usize,
    pub min_truncated_chars: usize,
    pub max_tags: usize,
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            max_tag_chars: crate::MAX_TAG_CHARS,
            min_truncated_chars: crate::MIN_TRUNCATED_TAG_CHARS,
            max_tags: crate::MAX_TAGS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Leading title characters searched for the core object
    pub pareto_prefix_chars: usize,
    pub min_title_chars: usize,
    pub max_word_repeats: usize,
    /// Tag count that earns the full density score
    pub target_tag_count: usize,
    pub low_velocity_threshold: f64,
    pub trendsetter_visual_threshold: f64,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            pareto_prefix_chars: crate::PARETO_PREFIX_CHARS,
            min_title_chars: crate::MIN_TITLE_CHARS,
            max_word_repeats: crate::MAX_WORD_REPEATS,
            target_tag_count: crate::MAX_TAGS,
            low_velocity_threshold: crate::LOW_VELOCITY_THRESHOLD,
            trendsetter_visual_threshold: crate::TRENDSETTER_VISUAL_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingConfig {
    /// Category floor used when the caller has none
    pub category_min: f64,
    /// Category ceiling used when the content generator gives no valuation
    pub category_max: f64,
    pub premium_lqs_threshold: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            category_min: crate::DEFAULT_CATEGORY_MIN,
            category_max: crate::DEFAULT_CATEGORY_MAX,
            premium_lqs_threshold: crate::PREMIUM_LQS_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub addr: String,
    pub snapshot_dir: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: "127.0.0.1:8787".to_string(),
            snapshot_dir: PathBuf::from("./snapshots"),
        }
    }
}

impl Config {
    /// Parse a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from a TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    }

    /// Resolve configuration in priority order:
    /// 1. explicit path
    /// 2. `CYCLEAR_CONFIG` environment variable
    /// 3. compiled defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::from_file(path);
        }

        if let Ok(env_path) = std::env::var(CONFIG_ENV_VAR) {
            return Self::from_file(Path::new(&env_path));
        }

        debug!("No config file given, using defaults");
        Ok(Self::default())
    }

    /// Reject values the engines cannot work with
    pub fn validate(&self) -> Result<()> {
        if self.tags.max_tags == 0 {
            return Err(Error::Config("tags.max_tags must be at least 1".to_string()));
        }
        if self.tags.min_truncated_chars > self.tags.max_tag_chars {
            return Err(Error::Config(
                "tags.min_truncated_chars exceeds tags.max_tag_chars".to_string(),
            ));
        }
        if self.scoring.target_tag_count == 0 {
            return Err(Error::Config(
                "scoring.target_tag_count must be at least 1".to_string(),
            ));
        }
        let pricing = &self.pricing;
        if !(pricing.category_min >= 0.0
            && pricing.category_max.is_finite()
            && pricing.category_min <= pricing.category_max)
        {
            return Err(Error::Config(format!(
                "pricing bounds invalid: min={} max={}",
                pricing.category_min, pricing.category_max
            )));
        }
        if !(0.0..=100.0).contains(&pricing.premium_lqs_threshold) {
            return Err(Error::Config(format!(
                "pricing.premium_lqs_threshold out of range: {}",
                pricing.premium_lqs_threshold
            )));
        }
        Ok(())
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_constants() {
        let config = Config::default();
        assert_eq!(config.tags.max_tags, crate::MAX_TAGS);
        assert_eq!(config.scoring.pareto_prefix_chars, 40);
        assert_eq!(config.pricing.category_min, 5.0);
        assert_eq!(config.pricing.category_max, 100.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml_str(
            r#"
            [pricing]
            category_max = 250.0

            [scoring]
            min_title_chars = 60
            "#,
        )
        .unwrap();

        assert_eq!(config.pricing.category_max, 250.0);
        assert_eq!(config.pricing.category_min, 5.0);
        assert_eq!(config.scoring.min_title_chars, 60);
        assert_eq!(config.tags, TagConfig::default());
    }

    #[test]
    fn test_inverted_bounds_rejected() {
        let result = Config::from_toml_str(
            r#"
            [pricing]
            category_min = 80.0
            category_max = 20.0
            "#,
        );
        assert!(matches!(result, Err(Error::Config(_))));
    }

    #[test]
    fn test_infinite_ceiling_rejected() {
        let result = Config::from_toml_str(
            r#"
            [pricing]
            category_max = inf
            "#,
        );
        assert!(matches!(result, Err(Error::Config(_))));

        let mut config = Config::default();
        config.pricing.category_max = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml() {
        let result = Config::from_toml_str("[pricing\ncategory_min = ");
        assert!(matches!(result, Err(Error::Toml(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cyclear.toml");
        std::fs::write(&path, "[tags]\nmax_tags = 10\n").unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.tags.max_tags, 10);
    }
}
