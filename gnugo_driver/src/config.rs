use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Context;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TIMEOUT_MILLIS: u64 = 20_000;

/// Where to find the engine and how long to wait for it. Every field is optional
/// in the JSON file.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    pub gnugo_executable: PathBuf,
    /// Arguments placed before the engine's own, e.g. to run it through a wrapper.
    pub leading_args: Vec<String>,
    pub timeout_millis: u64,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            gnugo_executable: PathBuf::from("gnugo"),
            leading_args: Vec::new(),
            timeout_millis: DEFAULT_TIMEOUT_MILLIS,
        }
    }
}

impl DriverConfig {
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let file = File::open(path)
            .with_context(|| format!("Could not open config file '{}'", path.display()))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Could not parse config file '{}'", path.display()))
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_millis)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_defaults() {
        let config: DriverConfig = serde_json::from_str(r#"{"timeout_millis": 500}"#).unwrap();
        assert_eq!(config.gnugo_executable, PathBuf::from("gnugo"));
        assert!(config.leading_args.is_empty());
        assert_eq!(config.timeout(), Duration::from_millis(500));

        let config: DriverConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, DriverConfig::default());
        assert_eq!(config.timeout(), Duration::from_secs(20));
    }

    #[test]
    fn load_reports_missing_files() {
        let err = DriverConfig::load(Path::new("/nonexistent/driver.json")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/driver.json"));
    }
}
