//! Credential and region lookup from the environment and the shared AWS files.
//!
//! Only static credentials are supported: access key, secret key and an
//! optional session token.

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use config::{Config, File, FileFormat};
use tracing::debug;

use crate::infrastructure::error::CallError;

/// Lookup of environment variables, injectable for tests.
pub type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

pub fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub access_key_id: String,
    pub secret_access_key: String,
    pub session_token: Option<String>,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"***")
            .field("session_token", &self.session_token.as_ref().map(|_| "***"))
            .finish()
    }
}

impl Credentials {
    /// `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY` / `AWS_SESSION_TOKEN`.
    pub fn from_env(env: EnvLookup<'_>) -> Option<Self> {
        Some(Self {
            access_key_id: env("AWS_ACCESS_KEY_ID")?,
            secret_access_key: env("AWS_SECRET_ACCESS_KEY")?,
            session_token: env("AWS_SESSION_TOKEN"),
        })
    }

    fn from_section(section: &HashMap<String, String>) -> Option<Self> {
        let get = |key: &str| {
            section
                .iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(key))
                .map(|(_, v)| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        Some(Self {
            access_key_id: get("aws_access_key_id")?,
            secret_access_key: get("aws_secret_access_key")?,
            session_token: get("aws_session_token"),
        })
    }
}

type Sections = HashMap<String, HashMap<String, String>>;

/// Default `~/.aws/<name>`, unless `env_var` points elsewhere.
pub fn shared_file(name: &str, env_var: &str, env: EnvLookup<'_>) -> Option<PathBuf> {
    if let Some(path) = env(env_var) {
        return Some(PathBuf::from(path));
    }
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().join(".aws").join(name))
}

/// Sections of the shared credentials and config files.
#[derive(Debug, Default)]
pub struct SharedProfiles {
    credentials: Sections,
    config: Sections,
}

impl SharedProfiles {
    /// Load both files; a missing file counts as empty.
    pub fn load(credentials_file: Option<&Path>, config_file: Option<&Path>) -> Result<Self, CallError> {
        Ok(Self {
            credentials: load_sections(credentials_file)?,
            config: load_sections(config_file)?,
        })
    }

    pub fn credentials(&self, profile: &str) -> Option<Credentials> {
        section(&self.credentials, profile)
            .and_then(Credentials::from_section)
            .or_else(|| self.config_section(profile).and_then(Credentials::from_section))
    }

    pub fn region(&self, profile: &str) -> Option<String> {
        self.config_section(profile)?
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("region"))
            .map(|(_, v)| v.trim().to_string())
            .filter(|v| !v.is_empty())
    }

    /// The config file names non-default profiles `[profile NAME]`.
    fn config_section(&self, profile: &str) -> Option<&HashMap<String, String>> {
        section(&self.config, &format!("profile {profile}"))
            .or_else(|| section(&self.config, profile))
    }
}

fn section<'a>(sections: &'a Sections, name: &str) -> Option<&'a HashMap<String, String>> {
    sections
        .iter()
        .find(|(k, _)| k.trim().eq_ignore_ascii_case(name))
        .map(|(_, v)| v)
}

fn load_sections(path: Option<&Path>) -> Result<Sections, CallError> {
    let Some(path) = path.filter(|p| p.is_file()) else {
        return Ok(Sections::new());
    };
    debug!("reading {}", path.display());
    Config::builder()
        .add_source(File::from(path).format(FileFormat::Ini))
        .build()
        .and_then(Config::try_deserialize::<Sections>)
        .map_err(|e| CallError::Credentials(format!("{}: {e}", path.display())))
}

/// Resolve credentials: environment first, then the named profile.
pub fn resolve_credentials(
    env: EnvLookup<'_>,
    profiles: &SharedProfiles,
    profile: &str,
) -> Result<Credentials, CallError> {
    if let Some(creds) = Credentials::from_env(env) {
        debug!("using credentials from environment");
        return Ok(creds);
    }
    profiles.credentials(profile).ok_or_else(|| {
        CallError::Credentials(format!(
            "set AWS_ACCESS_KEY_ID and AWS_SECRET_ACCESS_KEY or configure profile '{profile}'"
        ))
    })
}

/// `--region` > `AWS_REGION` > `AWS_DEFAULT_REGION` > settings > profile.
pub fn resolve_region(
    flag: Option<&str>,
    env: EnvLookup<'_>,
    configured: Option<&str>,
    profiles: &SharedProfiles,
    profile: &str,
) -> Option<String> {
    flag.map(str::to_string)
        .or_else(|| env("AWS_REGION"))
        .or_else(|| env("AWS_DEFAULT_REGION"))
        .or_else(|| configured.map(str::to_string))
        .or_else(|| profiles.region(profile))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    fn write(dir: &TempDir, name: &str, content: &str) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn given_env_keys_when_resolving_then_environment_wins() {
        let env = |name: &str| match name {
            "AWS_ACCESS_KEY_ID" => Some("AKIA_ENV".to_string()),
            "AWS_SECRET_ACCESS_KEY" => Some("secret".to_string()),
            _ => None,
        };
        let creds = resolve_credentials(&env, &SharedProfiles::default(), "default").unwrap();
        assert_eq!(creds.access_key_id, "AKIA_ENV");
        assert_eq!(creds.session_token, None);
    }

    #[test]
    fn given_profile_in_credentials_file_when_resolving_then_reads_it() {
        let dir = TempDir::new().unwrap();
        let creds_file = write(
            &dir,
            "credentials",
            "[default]\naws_access_key_id = AKIA_DEFAULT\naws_secret_access_key = s1\n\n\
             [dev]\naws_access_key_id = AKIA_DEV\naws_secret_access_key = s2\naws_session_token = tok\n",
        );
        let profiles = SharedProfiles::load(Some(&creds_file), None).unwrap();

        let creds = resolve_credentials(&no_env, &profiles, "dev").unwrap();

        assert_eq!(creds.access_key_id, "AKIA_DEV");
        assert_eq!(creds.session_token.as_deref(), Some("tok"));
    }

    #[test]
    fn given_no_credentials_anywhere_when_resolving_then_fails() {
        let err = resolve_credentials(&no_env, &SharedProfiles::default(), "default").unwrap_err();
        assert!(matches!(err, CallError::Credentials(_)));
    }

    #[test]
    fn given_named_profile_in_config_file_when_resolving_region_then_uses_prefixed_section() {
        let dir = TempDir::new().unwrap();
        let config_file = write(
            &dir,
            "config",
            "[default]\nregion = us-east-1\n\n[profile dev]\nregion = eu-central-1\n",
        );
        let profiles = SharedProfiles::load(None, Some(&config_file)).unwrap();

        assert_eq!(
            resolve_region(None, &no_env, None, &profiles, "dev").as_deref(),
            Some("eu-central-1")
        );
        assert_eq!(
            resolve_region(None, &no_env, None, &profiles, "default").as_deref(),
            Some("us-east-1")
        );
    }

    #[test]
    fn given_flag_and_env_when_resolving_region_then_flag_wins() {
        let env = |name: &str| (name == "AWS_REGION").then(|| "eu-west-1".to_string());
        let profiles = SharedProfiles::default();
        assert_eq!(
            resolve_region(Some("ap-south-1"), &env, Some("us-west-2"), &profiles, "default")
                .as_deref(),
            Some("ap-south-1")
        );
        assert_eq!(
            resolve_region(None, &env, Some("us-west-2"), &profiles, "default").as_deref(),
            Some("eu-west-1")
        );
        assert_eq!(
            resolve_region(None, &no_env, Some("us-west-2"), &profiles, "default").as_deref(),
            Some("us-west-2")
        );
    }

    #[test]
    fn given_missing_files_when_loading_then_profiles_are_empty() {
        let profiles =
            SharedProfiles::load(Some(Path::new("/nonexistent/credentials")), None).unwrap();
        assert!(profiles.credentials("default").is_none());
    }

    #[test]
    fn debug_output_hides_secrets() {
        let creds = Credentials {
            access_key_id: "AKIA".into(),
            secret_access_key: "topsecret".into(),
            session_token: Some("tok".into()),
        };
        let shown = format!("{creds:?}");
        assert!(!shown.contains("topsecret"));
        assert!(!shown.contains("tok\""));
    }
}
