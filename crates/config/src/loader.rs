use crate::{ConfigError, Result, ValidateConfig};
use std::fs;
use std::path::{Path, PathBuf};

/// File names probed in each directory, first match wins.
const CONFIG_FILES: &[&str] = &[
    ".graphql-validate.yml",
    ".graphql-validate.yaml",
    ".graphql-validate.json",
    "graphql-validate.toml",
];

/// Find a validation config file by walking up the directory tree from the given start directory.
/// Returns `None` once the filesystem root has been checked.
#[tracing::instrument(fields(start = %start_dir.display()))]
pub fn find_config(start_dir: &Path) -> Result<Option<PathBuf>> {
    let mut current_dir = start_dir.to_path_buf();
    let mut checked_dirs = 0;

    loop {
        tracing::trace!(dir = %current_dir.display(), "Checking directory for config files");
        for file_name in CONFIG_FILES {
            let config_path = current_dir.join(file_name);
            if config_path.is_file() {
                tracing::info!(path = %config_path.display(), checked_dirs, "Found config file");
                return Ok(Some(config_path));
            }
        }

        checked_dirs += 1;
        if !current_dir.pop() {
            tracing::debug!(checked_dirs, "No config file found");
            break;
        }
    }

    Ok(None)
}

/// Load a validation config from the specified path.
/// The format follows the file extension.
#[tracing::instrument(fields(path = %path.display()))]
pub fn load_config(path: &Path) -> Result<ValidateConfig> {
    tracing::debug!("Reading config file");
    let contents = fs::read_to_string(path)?;
    let config = load_config_from_str(&contents, path)?;
    tracing::info!(
        strict_fragments = config.strict_fragments,
        strict_deprecated = config.strict_deprecated,
        apollo = config.apollo,
        "Config loaded successfully"
    );
    Ok(config)
}

/// Load a validation config from a string.
/// `path` only selects the format and labels errors; nothing is read from disk.
#[tracing::instrument(skip(contents), fields(path = %path.display(), size = contents.len()))]
pub fn load_config_from_str(contents: &str, path: &Path) -> Result<ValidateConfig> {
    let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");

    tracing::debug!(extension, "Detecting config format");

    let config = match extension {
        "yml" | "yaml" => parse_yaml(contents, path)?,
        "json" => parse_json(contents, path)?,
        "toml" => parse_toml(contents, path)?,
        _ => return Err(ConfigError::UnsupportedFormat(path.to_path_buf())),
    };

    validate_config(&config, path)?;

    Ok(config)
}

fn parse_yaml(contents: &str, path: &Path) -> Result<ValidateConfig> {
    // An empty YAML document means "all defaults"
    if contents.trim().is_empty() {
        return Ok(ValidateConfig::default());
    }
    serde_saphyr::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("YAML parse error: {e}"),
    })
}

fn parse_json(contents: &str, path: &Path) -> Result<ValidateConfig> {
    serde_json::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("JSON parse error: {e}"),
    })
}

fn parse_toml(contents: &str, path: &Path) -> Result<ValidateConfig> {
    toml::from_str(contents).map_err(|e| ConfigError::Invalid {
        path: path.to_path_buf(),
        message: format!("TOML parse error: {e}"),
    })
}

/// Reject cost parameters that would poison every score.
///
/// Negative thresholds are the caller's business and are passed through.
fn validate_config(config: &ValidateConfig, path: &Path) -> Result<()> {
    let costs = [
        ("complexityScalarCost", config.complexity_scalar_cost),
        ("complexityObjectCost", config.complexity_object_cost),
        ("complexityDepthCostFactor", config.complexity_depth_cost_factor),
    ];
    for (key, value) in costs {
        if !value.is_finite() {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                message: format!("'{key}' must be a finite number, got {value}"),
            });
        }
    }

    if let Some(score) = config.max_complexity_score {
        if score.is_nan() {
            return Err(ConfigError::Invalid {
                path: path.to_path_buf(),
                message: "'maxComplexityScore' must be a number".to_string(),
            });
        }
    }

    tracing::debug!("Config validation passed");
    Ok(())
}
