//! Advisor Configuration
//!
//! Matching parameters and resource locations. These are fixed per deployment
//! (not runtime inputs): the crop keyword narrows the dataset to the crop the
//! model was trained on, and the recommendation cap bounds table/export size.
//!
//! The binary reads overrides from environment variables; the library only
//! sees the resolved struct.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Leading lines dropped before the header row (dataset title + blank line)
pub const DEFAULT_SKIP_LEADING_LINES: usize = 2;

/// Cap on recommendation rows per prediction
pub const DEFAULT_MAX_RECOMMENDATIONS: usize = 10;

/// Advisor deployment configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvisorConfig {
    /// Treatment recommendation dataset (UTF-8 delimited text)
    pub dataset_path: PathBuf,

    /// Directory of per-disease documentation files (`<keyword>.md`)
    pub docs_dir: PathBuf,

    /// Lines dropped before the dataset header row
    pub skip_leading_lines: usize,

    /// Crop filter applied to every recommendation lookup
    pub crop_keyword: String,

    /// Maximum recommendation rows returned per prediction
    pub max_recommendations: usize,

    /// Filename prefix for exported CSV files
    pub export_prefix: String,
}

impl Default for AdvisorConfig {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("data/Pepper_protection.csv"),
            docs_dir: PathBuf::from("data/docs"),
            skip_leading_lines: DEFAULT_SKIP_LEADING_LINES,
            crop_keyword: "고추".to_string(),
            max_recommendations: DEFAULT_MAX_RECOMMENDATIONS,
            export_prefix: "권장농약".to_string(),
        }
    }
}

impl AdvisorConfig {
    /// Resolve configuration from environment variables, falling back to
    /// defaults field by field.
    ///
    /// Recognized variables: `DATA_FILE`, `DOCS_DIR`, `CROP_KEYWORD`,
    /// `MAX_RECOMMENDATIONS`, `EXPORT_PREFIX`.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(path) = std::env::var("DATA_FILE") {
            config.dataset_path = PathBuf::from(path);
        }
        if let Ok(dir) = std::env::var("DOCS_DIR") {
            config.docs_dir = PathBuf::from(dir);
        }
        if let Ok(keyword) = std::env::var("CROP_KEYWORD") {
            config.crop_keyword = keyword;
        }
        if let Ok(cap) = std::env::var("MAX_RECOMMENDATIONS") {
            if let Ok(cap) = cap.parse() {
                config.max_recommendations = cap;
            }
        }
        if let Ok(prefix) = std::env::var("EXPORT_PREFIX") {
            config.export_prefix = prefix;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AdvisorConfig::default();

        assert_eq!(config.skip_leading_lines, 2);
        assert_eq!(config.max_recommendations, 10);
        assert_eq!(config.crop_keyword, "고추");
    }

    #[test]
    fn test_deserialize_partial() {
        let config: AdvisorConfig =
            serde_json::from_str(r#"{"crop_keyword": "토마토"}"#).unwrap();

        assert_eq!(config.crop_keyword, "토마토");
        assert_eq!(config.max_recommendations, 10);
    }
}
