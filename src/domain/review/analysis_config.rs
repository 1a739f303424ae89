// ============================================================
// ANALYSIS CONFIGURATION
// ============================================================
// Values controlling upload acceptance and the labeling pass

use serde::{Deserialize, Serialize};

/// Upper bound for the simulated labeling delay
const MAX_SIMULATED_DELAY_MS: u64 = 60_000;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Pause between parsing and labeling, standing in for a remote call (default: 2000)
    pub simulated_delay_ms: u64,

    /// File extension accepted for uploads, without the dot (default: "csv")
    pub accepted_extension: String,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            simulated_delay_ms: 2000,
            accepted_extension: "csv".to_string(),
        }
    }
}

impl AnalysisConfig {
    /// Config with no simulated delay, for tests and batch runs
    pub fn instant() -> Self {
        Self {
            simulated_delay_ms: 0,
            ..Default::default()
        }
    }

    /// Whether `file_name` ends with the accepted extension, ignoring case
    pub fn accepts_file(&self, file_name: &str) -> bool {
        let suffix = format!(".{}", self.accepted_extension.to_lowercase());
        file_name.to_lowercase().ends_with(&suffix)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.accepted_extension.trim().is_empty() {
            return Err("accepted_extension must not be empty".to_string());
        }
        if self.accepted_extension.starts_with('.') {
            return Err("accepted_extension must not start with a dot".to_string());
        }
        if self.simulated_delay_ms > MAX_SIMULATED_DELAY_MS {
            return Err(format!(
                "simulated_delay_ms must be <= {}",
                MAX_SIMULATED_DELAY_MS
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_csv_case_insensitive() {
        let config = AnalysisConfig::default();
        assert!(config.accepts_file("reviews.csv"));
        assert!(config.accepts_file("REVIEWS.CSV"));
        assert!(!config.accepts_file("reviews.xlsx"));
        assert!(!config.accepts_file("csv"));
    }

    #[test]
    fn test_validate() {
        assert!(AnalysisConfig::default().validate().is_ok());
        assert!(AnalysisConfig::instant().validate().is_ok());

        let bad_ext = AnalysisConfig {
            accepted_extension: ".csv".into(),
            ..Default::default()
        };
        assert!(bad_ext.validate().is_err());

        let slow = AnalysisConfig {
            simulated_delay_ms: MAX_SIMULATED_DELAY_MS + 1,
            ..Default::default()
        };
        assert!(slow.validate().is_err());
    }
}
