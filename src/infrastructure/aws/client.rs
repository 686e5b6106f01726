//! Signed AWS JSON protocol transport over blocking HTTP.

use std::collections::BTreeMap;
use std::error::Error as StdError;
use std::sync::{Arc, OnceLock};
use std::time::Duration;

use chrono::Utc;
use regex::Regex;
use reqwest::blocking::Client;
use serde_json::Value;
use tracing::{debug, trace};

use crate::config::Settings;
use crate::domain::Operation;
use crate::infrastructure::aws::credentials::{
    process_env, resolve_credentials, resolve_region, shared_file, Credentials, SharedProfiles,
};
use crate::infrastructure::aws::endpoint::{self, Endpoint};
use crate::infrastructure::aws::signing::Signer;
use crate::infrastructure::error::{CallError, InfraError, InfraResult};
use crate::infrastructure::traits::Transport;

const USER_AGENT: &str = concat!("awsops/", env!("CARGO_PKG_VERSION"));

/// Connection settings given on the command line; these win over settings.
#[derive(Debug, Clone, Default)]
pub struct ConnectionOptions {
    pub region: Option<String>,
    pub profile: Option<String>,
    pub endpoint_url: Option<String>,
}

/// Credentials and region, resolved on first use.
#[derive(Debug)]
struct Session {
    credentials: Credentials,
    region: String,
}

pub struct AwsJsonTransport {
    http: Client,
    settings: Arc<Settings>,
    options: ConnectionOptions,
    session: OnceLock<Session>,
}

impl AwsJsonTransport {
    pub fn new(settings: Arc<Settings>, options: ConnectionOptions) -> InfraResult<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .connect_timeout(Duration::from_secs(settings.connect_timeout_secs))
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| InfraError::Client(e.to_string()))?;
        Ok(Self {
            http,
            settings,
            options,
            session: OnceLock::new(),
        })
    }

    fn profile(&self) -> String {
        self.options
            .profile
            .clone()
            .or_else(|| process_env("AWS_PROFILE"))
            .or_else(|| self.settings.profile.clone())
            .unwrap_or_else(|| "default".into())
    }

    fn session(&self) -> Result<&Session, CallError> {
        if let Some(session) = self.session.get() {
            return Ok(session);
        }

        let env = process_env;
        let credentials_file = self
            .settings
            .credentials_file
            .clone()
            .or_else(|| shared_file("credentials", "AWS_SHARED_CREDENTIALS_FILE", &env));
        let config_file = self
            .settings
            .config_file
            .clone()
            .or_else(|| shared_file("config", "AWS_CONFIG_FILE", &env));
        let profiles = SharedProfiles::load(credentials_file.as_deref(), config_file.as_deref())?;

        let profile = self.profile();
        let credentials = resolve_credentials(&env, &profiles, &profile)?;
        let region = resolve_region(
            self.options.region.as_deref(),
            &env,
            self.settings.region.as_deref(),
            &profiles,
            &profile,
        )
        .ok_or(CallError::MissingRegion)?;
        debug!("profile={} region={}", profile, region);

        Ok(self.session.get_or_init(|| Session {
            credentials,
            region,
        }))
    }

    fn endpoint(&self, op: &Operation, region: &str) -> Result<Endpoint, CallError> {
        let override_url = self
            .options
            .endpoint_url
            .as_deref()
            .or_else(|| self.settings.endpoint_for(op.service.id));
        endpoint::resolve(op.service, region, override_url)
    }
}

impl Transport for AwsJsonTransport {
    fn invoke(&self, op: &Operation, body: &Value) -> Result<Value, CallError> {
        let session = self.session()?;
        let endpoint = self.endpoint(op, &session.region)?;
        let url = endpoint.url.to_string();
        let payload = serde_json::to_vec(body).map_err(|e| CallError::http(&url, e))?;

        let mut headers = BTreeMap::from([
            ("host".to_string(), endpoint.host()),
            (
                "content-type".to_string(),
                op.service.json_version.content_type().to_string(),
            ),
            ("x-amz-target".to_string(), op.target()),
        ]);
        Signer {
            credentials: &session.credentials,
            region: &endpoint.signing_region,
            service: op.service.signing_name,
        }
        .sign(&endpoint.url, &mut headers, &payload, Utc::now())?;

        debug!("POST {} {}", url, op.target());
        trace!("request body: {}", body);

        let mut request = self.http.post(endpoint.url.clone());
        for (name, value) in &headers {
            request = request.header(name.as_str(), value.as_str());
        }
        let response = request
            .body(payload)
            .send()
            .map_err(|e| classify_send_error(e, &endpoint))?;

        let status = response.status();
        let request_id = response
            .headers()
            .get("x-amzn-requestid")
            .or_else(|| response.headers().get("x-amz-request-id"))
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let error_type = response
            .headers()
            .get("x-amzn-errortype")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let text = response.text().map_err(|e| CallError::http(&url, e))?;
        debug!("{} {} request-id={:?}", op.target(), status.as_u16(), request_id);
        trace!("response body: {}", text);

        if !status.is_success() {
            return Err(parse_error(status.as_u16(), &text, error_type, request_id));
        }
        if text.trim().is_empty() {
            return Ok(Value::Object(Default::default()));
        }
        serde_json::from_str(&text).map_err(|e| CallError::Decode(e.to_string()))
    }
}

/// Turn a non-2xx JSON error document into a [`CallError::Service`].
pub fn parse_error(
    status: u16,
    body: &str,
    error_type: Option<String>,
    request_id: Option<String>,
) -> CallError {
    let doc: Value = serde_json::from_str(body).unwrap_or(Value::Null);
    let code = doc
        .get("__type")
        .or_else(|| doc.get("code"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .or(error_type)
        .map(|raw| strip_namespace(&raw))
        .unwrap_or_else(|| format!("HTTP{status}"));
    let message = ["message", "Message", "errorMessage"]
        .iter()
        .find_map(|key| doc.get(*key).and_then(Value::as_str))
        .map(str::to_string)
        .unwrap_or_else(|| {
            if body.trim().is_empty() || !doc.is_null() {
                format!("service returned HTTP {status}")
            } else {
                body.trim().to_string()
            }
        });
    CallError::Service {
        code,
        message,
        status,
        request_id,
    }
}

/// `com.amazonaws.kms#NotFoundException` and `NotFoundException:http://..`
/// both become `NotFoundException`.
fn strip_namespace(raw: &str) -> String {
    let name = raw.rsplit('#').next().unwrap_or(raw);
    name.split(':').next().unwrap_or(name).to_string()
}

fn classify_send_error(err: reqwest::Error, endpoint: &Endpoint) -> CallError {
    if is_name_resolution_failure(&err) {
        return CallError::NameResolution {
            endpoint: endpoint.host(),
            region: endpoint.signing_region.clone(),
        };
    }
    CallError::http(endpoint.url.as_str(), err)
}

/// Walk the source chain looking for a resolver failure.
pub fn is_name_resolution_failure(err: &(dyn StdError + 'static)) -> bool {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    let Some(pattern) = PATTERN
        .get_or_init(|| {
            Regex::new(
                r"(?i)dns error|failed to lookup address|name or service not known|no such host|nodename nor servname|name resolution",
            )
            .ok()
        })
        .as_ref()
    else {
        return false;
    };

    let mut current: Option<&(dyn StdError + 'static)> = Some(err);
    while let Some(e) = current {
        if pattern.is_match(&e.to_string()) {
            return true;
        }
        current = e.source();
    }
    false
}
