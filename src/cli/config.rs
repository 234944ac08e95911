//! Config command handlers

use crate::cli::{ConfigInitArgs, ConfigShowArgs};
use crate::config::DecisionConfig;
use std::fs;

const EXAMPLE_CONFIG: &str = include_str!("../../hybridops.example.toml");

/// Handle `hybridops config init` command
pub fn handle_config_init(args: &ConfigInitArgs) -> anyhow::Result<String> {
    if args.output.exists() && !args.force {
        anyhow::bail!(
            "File already exists: {}. Use --force to overwrite.",
            args.output.display()
        );
    }

    fs::write(&args.output, EXAMPLE_CONFIG)?;

    Ok(format!(
        "✓ Configuration file created: {}\n  Edit the [policy] section to set thresholds and fallback.",
        args.output.display()
    ))
}

/// Handle `hybridops config show` command
///
/// Prints the validated policy after file and environment layering.
pub fn handle_config_show(args: &ConfigShowArgs) -> anyhow::Result<String> {
    let config = if args.config.exists() {
        DecisionConfig::load(Some(&args.config))?
    } else {
        DecisionConfig::default()
    };
    let policy = config.with_env_overrides().validate()?;

    if args.json {
        Ok(serde_json::to_string_pretty(&policy)?)
    } else {
        Ok(toml::to_string_pretty(&policy)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Policy;
    use std::path::PathBuf;

    #[test]
    fn test_config_init_creates_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output_path = temp_dir.path().join("hybridops.toml");

        let args = ConfigInitArgs {
            output: output_path.clone(),
            force: false,
        };

        handle_config_init(&args).unwrap();

        assert!(output_path.exists());
        let content = std::fs::read_to_string(&output_path).unwrap();
        assert!(content.contains("[policy]"));
    }

    #[test]
    fn test_config_init_no_overwrite() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output_path = temp_dir.path().join("hybridops.toml");

        std::fs::write(&output_path, "existing").unwrap();

        let args = ConfigInitArgs {
            output: output_path.clone(),
            force: false,
        };

        assert!(handle_config_init(&args).is_err());

        // Original content preserved
        let content = std::fs::read_to_string(&output_path).unwrap();
        assert_eq!(content, "existing");
    }

    #[test]
    fn test_config_init_force_overwrites() {
        let temp_dir = tempfile::tempdir().unwrap();
        let output_path = temp_dir.path().join("hybridops.toml");

        std::fs::write(&output_path, "old content").unwrap();

        let args = ConfigInitArgs {
            output: output_path.clone(),
            force: true,
        };

        handle_config_init(&args).unwrap();

        let content = std::fs::read_to_string(&output_path).unwrap();
        assert!(content.contains("[policy]"));
    }

    #[test]
    fn test_example_config_is_valid() {
        let config: DecisionConfig = toml::from_str(EXAMPLE_CONFIG).unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_show_json_round_trips_policy() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("hybridops.toml");
        std::fs::write(&path, EXAMPLE_CONFIG).unwrap();

        let output = handle_config_show(&ConfigShowArgs {
            config: path,
            json: true,
        })
        .unwrap();
        let policy: Policy = serde_json::from_str(&output).unwrap();
        assert_eq!(policy.providers().len(), 2);
    }

    #[test]
    fn test_config_show_rejects_invalid_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("hybridops.toml");
        std::fs::write(&path, "[policy]\nmax_rpo_seconds = -5\n").unwrap();

        let result = handle_config_show(&ConfigShowArgs {
            config: path,
            json: false,
        });
        assert!(result.is_err());
    }

    #[test]
    fn test_config_show_defaults_when_missing() {
        let output = handle_config_show(&ConfigShowArgs {
            config: PathBuf::from("/nonexistent/hybridops.toml"),
            json: false,
        })
        .unwrap();
        assert!(output.contains("strategy"));
    }
}
