//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/awsops/awsops.toml`
//! 3. Explicit config: `--config <file>`
//! 4. Environment variables: `AWSOPS_*` prefix
//!
//! Command-line connection flags (`--region`, `--profile`, `--endpoint-url`)
//! are applied on top by the transport.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::{ConfirmImpact, PartialFailure};

/// How results are written to stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Pretty printed JSON
    #[default]
    Json,
    /// Scalars bare, one array element per line
    Text,
}

/// Pagination behaviour.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PaginationConfig {
    /// What to do when a page fails after items were collected
    pub partial_failure: PartialFailure,
}

/// Raw settings for intermediate parsing (`None` means "not specified").
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub region: Option<String>,
    pub profile: Option<String>,
    pub output: Option<OutputFormat>,
    pub confirm_impact: Option<ConfirmImpact>,
    pub timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    pub credentials_file: Option<PathBuf>,
    pub config_file: Option<PathBuf>,
    pub pagination: RawPaginationConfig,
    pub endpoints: Option<BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawPaginationConfig {
    pub partial_failure: Option<PartialFailure>,
}

/// Unified configuration for awsops.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Default region when neither `--region` nor `AWS_REGION` is set
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Shared credentials profile (default: `AWS_PROFILE` or "default")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
    pub output: OutputFormat,
    /// Operations at or above this impact ask for confirmation
    pub confirm_impact: ConfirmImpact,
    /// Whole-request timeout
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
    /// Shared credentials file (default: `~/.aws/credentials`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials_file: Option<PathBuf>,
    /// Shared config file (default: `~/.aws/config`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
    pub pagination: PaginationConfig,
    /// Endpoint URL overrides, keyed by service id
    pub endpoints: BTreeMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            region: None,
            profile: None,
            output: OutputFormat::Json,
            confirm_impact: ConfirmImpact::Medium,
            timeout_secs: 60,
            connect_timeout_secs: 10,
            credentials_file: None,
            config_file: None,
            pagination: PaginationConfig::default(),
            endpoints: BTreeMap::new(),
        }
    }
}

/// Get the XDG config directory for awsops.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "awsops").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("awsops.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand `~` and `$VAR` in path-like fields.
    fn expand_paths(&mut self) {
        for path in [&mut self.credentials_file, &mut self.config_file]
            .into_iter()
            .flatten()
        {
            let raw = path.to_string_lossy().to_string();
            if let Ok(expanded) = shellexpand::full(&raw) {
                *path = PathBuf::from(expanded.as_ref());
            }
        }
    }

    /// Merge overlay config onto self (base): overlay wins where specified,
    /// endpoint tables are merged key by key.
    fn merge_with(&self, overlay: &RawSettings) -> Self {
        let mut endpoints = self.endpoints.clone();
        if let Some(extra) = &overlay.endpoints {
            endpoints.extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        Self {
            region: overlay.region.clone().or_else(|| self.region.clone()),
            profile: overlay.profile.clone().or_else(|| self.profile.clone()),
            output: overlay.output.unwrap_or(self.output),
            confirm_impact: overlay.confirm_impact.unwrap_or(self.confirm_impact),
            timeout_secs: overlay.timeout_secs.unwrap_or(self.timeout_secs),
            connect_timeout_secs: overlay
                .connect_timeout_secs
                .unwrap_or(self.connect_timeout_secs),
            credentials_file: overlay
                .credentials_file
                .clone()
                .or_else(|| self.credentials_file.clone()),
            config_file: overlay
                .config_file
                .clone()
                .or_else(|| self.config_file.clone()),
            pagination: PaginationConfig {
                partial_failure: overlay
                    .pagination
                    .partial_failure
                    .unwrap_or(self.pagination.partial_failure),
            },
            endpoints,
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file given with `--config`; must exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref(), explicit, true)
    }

    /// Load from the given files, optionally applying `AWSOPS_*` overrides.
    pub fn load_from(
        global: Option<&Path>,
        explicit: Option<&Path>,
        with_env: bool,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config, if present
        if let Some(global_path) = global {
            if global_path.exists() {
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        // 3. Explicit config file
        if let Some(path) = explicit {
            if !path.is_file() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables
        if with_env {
            current = Self::apply_env_overrides(current)?;
        }

        current.expand_paths();
        Ok(current)
    }

    /// Apply AWSOPS_* environment variables as explicit overrides.
    fn apply_env_overrides(settings: Self) -> Result<Self, ApplicationError> {
        Self::apply_env(settings, env_source())
    }

    fn apply_env(settings: Self, env: Environment) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(env)
            .build()
            .map_err(config_err)?;

        let raw = RawSettings {
            region: env_value(&config, "region")?,
            profile: env_value(&config, "profile")?,
            output: env_value(&config, "output")?,
            confirm_impact: env_value(&config, "confirm_impact")?,
            timeout_secs: env_value(&config, "timeout_secs")?,
            connect_timeout_secs: env_value(&config, "connect_timeout_secs")?,
            credentials_file: env_value(&config, "credentials_file")?,
            config_file: env_value(&config, "config_file")?,
            pagination: RawPaginationConfig {
                partial_failure: env_value(&config, "pagination.partial_failure")?,
            },
            // env keys cannot carry '-': AWSOPS_ENDPOINTS__KENDRA_RANKING names kendra-ranking
            endpoints: env_value::<BTreeMap<String, String>>(&config, "endpoints")?.map(|map| {
                map.into_iter()
                    .map(|(id, url)| (id.replace('_', "-"), url))
                    .collect()
            }),
        };
        Ok(settings.merge_with(&raw))
    }

    /// Endpoint override for a service id, if configured.
    pub fn endpoint_for(&self, service_id: &str) -> Option<&str> {
        self.endpoints.get(service_id).map(String::as_str)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# awsops configuration
#
# Locations (by precedence, lowest to highest):
#   Global:   ~/.config/awsops/awsops.toml
#   Explicit: --config <file>
#   Env:      AWSOPS_* environment variables (AWSOPS_PAGINATION__PARTIAL_FAILURE=fail,
#             AWSOPS_ENDPOINTS__KENDRA_RANKING=http://... where '_' in a service id means '-')
#   Flags:    --region, --profile, --endpoint-url

# Region used when neither --region nor AWS_REGION/AWS_DEFAULT_REGION is set
# region = "eu-central-1"

# Profile in the shared credentials file (default: $AWS_PROFILE or "default")
# profile = "default"

# Output format: "json" or "text"
# output = "json"

# Ask before running operations at or above this impact: "none", "low", "medium", "high"
# confirm_impact = "medium"

# HTTP timeouts in seconds
# timeout_secs = 60
# connect_timeout_secs = 10

# Shared AWS files
# credentials_file = "~/.aws/credentials"
# config_file = "~/.aws/config"

[pagination]
# A page failing after items were collected under --max-items:
#   "return-collected" returns what was gathered, "fail" reports the error
# partial_failure = "return-collected"

[endpoints]
# Endpoint URL per service id (kms, kendra-ranking, partnercentral-channel)
# kms = "http://localhost:4566"
"#
        .to_string()
    }
}

/// `AWSOPS_REGION`, `AWSOPS_PAGINATION__PARTIAL_FAILURE`: one `_` after the
/// prefix, `__` between nested keys.
fn env_source() -> Environment {
    Environment::with_prefix("AWSOPS")
        .prefix_separator("_")
        .separator("__")
}

/// Read one key from the environment layer; absent keys are `None`.
fn env_value<T: DeserializeOwned>(config: &Config, key: &str) -> Result<Option<T>, ApplicationError> {
    match config.get::<T>(key) {
        Ok(value) => Ok(Some(value)),
        Err(ConfigError::NotFound(_)) => Ok(None),
        Err(e) => Err(config_err(e)),
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
