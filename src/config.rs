//! Settings: built-in defaults, then the CONL settings file, then the
//! environment. Command-line flags are applied on top by `main`.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::generic::GenericRules;
use crate::runner::Pacing;

pub const DEFAULT_CONFIG_FILE: &str = "grant-images.conl";
pub const BASE_URL_ENV: &str = "GRANTS_API_URL";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub base_url: String,
    pub user_agent: String,
    /// Pause between two writes
    pub delay_ms: u64,
    /// Writes per batch; 0 disables batching
    pub batch_size: usize,
    /// Pause after each full batch
    pub batch_pause_ms: u64,
    pub generic: GenericRules,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000".to_string(),
            user_agent: "Mozilla/5.0 (compatible; GrantImageFixer/1.0)".to_string(),
            delay_ms: 100,
            batch_size: 10,
            batch_pause_ms: 1000,
            generic: GenericRules::default(),
        }
    }
}

impl Settings {
    /// Load settings. An explicitly given file must exist; the default file
    /// is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = match path {
            Some(p) => Self::from_file(p)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::from_file(Path::new(DEFAULT_CONFIG_FILE))?
            }
            None => {
                debug!("no {} found, using defaults", DEFAULT_CONFIG_FILE);
                Self::default()
            }
        };

        if let Ok(url) = std::env::var(BASE_URL_ENV) {
            if !url.trim().is_empty() {
                info!("{} set, using {}", BASE_URL_ENV, url.trim());
                settings.base_url = url.trim().to_string();
            }
        }
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings file: {}", path.display()))?;
        let settings = Self::parse(&content)
            .with_context(|| format!("Failed to parse settings file: {}", path.display()))?;
        info!("loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn parse(content: &str) -> Result<Self> {
        Ok(serde_conl::from_str(content)?)
    }

    pub fn pacing(&self) -> Pacing {
        Pacing {
            delay: Duration::from_millis(self.delay_ms),
            batch_size: self.batch_size,
            batch_pause: Duration::from_millis(self.batch_pause_ms),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.base_url, "http://localhost:5000");
        let pacing = settings.pacing();
        assert_eq!(pacing.delay, Duration::from_millis(100));
        assert_eq!(pacing.batch_size, 10);
        assert!(settings.generic.reject_svg);
    }

    #[test]
    fn test_parse_partial_file() {
        let content = "; local API\nbase_url = https://grants.example.org\ndelay_ms = 250\n";
        let settings = Settings::parse(content).unwrap();
        assert_eq!(settings.base_url, "https://grants.example.org");
        assert_eq!(settings.delay_ms, 250);
        assert_eq!(settings.batch_size, 10);
        assert!(!settings.generic.patterns.is_empty());
    }

    #[test]
    fn test_parse_generic_block() {
        let content = "\
generic
  patterns
    = stock-purple
    = missing
  blocked_photos
    = photo-1000000000000-abcdef012345
  reject_svg = false
";
        let settings = Settings::parse(content).unwrap();
        assert_eq!(settings.generic.patterns, vec!["stock-purple", "missing"]);
        assert_eq!(settings.generic.blocked_photos.len(), 1);
        assert!(!settings.generic.reject_svg);
        assert!(settings
            .generic
            .is_generic(Some("https://img.test/photo-1000000000000-abcdef012345?w=10")));
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Settings::parse("base_uri = http://x\n").is_err());
    }

    #[test]
    fn test_missing_explicit_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.conl");
        assert!(Settings::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.conl");
        fs::write(&path, "batch_size = 5\nbatch_pause_ms = 0\n").unwrap();
        let settings = Settings::from_file(&path).unwrap();
        assert_eq!(settings.batch_size, 5);
        assert_eq!(settings.pacing().batch_pause, Duration::ZERO);
    }
}
