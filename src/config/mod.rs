// src/config/mod.rs
use anyhow::{Context, Result};
use serde::Deserialize;
use std::{fs, path::Path};

/// Business-rule inputs for the filter stage. Nothing in the pipeline
/// hardcodes these; they arrive here, from a YAML file or the defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Applicant-type strings open to the target applicant population.
    pub qualified_applicants: Vec<String>,
    /// Cards dropped from the cashback pipeline over known-bad source data.
    pub excluded_cashback_cards: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        PipelineConfig {
            qualified_applicants: vec![
                "Anybody".to_string(),
                "Malaysians Only".to_string(),
                "Malaysians and Permanent Residents".to_string(),
            ],
            excluded_cashback_cards: vec![
                // TODO: remove once the upstream card info error is resolved.
                "standard_chartered_justone_platinum_mastercard".to_string(),
            ],
        }
    }
}

/// Load a pipeline config from YAML. Missing keys fall back to the defaults.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PipelineConfig> {
    let path = path.as_ref();
    let text =
        fs::read_to_string(path).with_context(|| format!("reading config {:?}", path))?;
    serde_yaml::from_str(&text).with_context(|| format!("parsing config {:?}", path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn defaults_cover_the_standard_allow_list() {
        let config = PipelineConfig::default();
        assert!(config
            .qualified_applicants
            .iter()
            .any(|a| a == "Anybody"));
        assert_eq!(config.excluded_cashback_cards.len(), 1);
    }

    #[test]
    fn partial_yaml_keeps_default_exclusions() -> Result<()> {
        let mut tmp = NamedTempFile::new()?;
        writeln!(tmp, "qualified_applicants:\n  - Anybody")?;

        let config = load_config(tmp.path())?;
        assert_eq!(config.qualified_applicants, vec!["Anybody".to_string()]);
        assert_eq!(
            config.excluded_cashback_cards,
            PipelineConfig::default().excluded_cashback_cards
        );
        Ok(())
    }
}
