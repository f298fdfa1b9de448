//! Config command handler

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::Report;

/// Execute the config command: the effective library configuration
pub fn execute_config(config: &CliConfig) -> CliResult<Report> {
    let yaml = config.probe.to_yaml()?;
    Ok(Report::new(
        yaml.trim_end(),
        serde_json::to_value(&config.probe)?,
    ))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use mapprobe::ProbeConfig;

    #[test]
    fn test_default_config_report() {
        let report = execute_config(&CliConfig::new()).unwrap();
        assert!(report.text.contains("timeout_ms: 30000"));
        assert_eq!(report.json["wait"]["interval_ms"], 50);
        assert_eq!(report.json["precision"], 4);
    }

    #[test]
    fn test_reflects_loaded_values() {
        let config = CliConfig::new().with_probe(ProbeConfig::new().with_timeout(1500));
        let report = execute_config(&config).unwrap();
        assert_eq!(report.json["wait"]["timeout_ms"], 1500);
    }
}
