//! Endpoint resolution per service and region.

use url::Url;

use crate::domain::Service;
use crate::infrastructure::error::CallError;

/// Where to send a request and which region to sign it for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub url: Url,
    pub signing_region: String,
}

impl Endpoint {
    /// `host[:port]` as it goes into the signed `host` header.
    pub fn host(&self) -> String {
        let host = self.url.host_str().unwrap_or_default();
        match self.url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        }
    }
}

/// Resolve the endpoint of `service` in `region`.
///
/// A pinned service is always addressed and signed in its pinned region.
/// An override URL replaces the computed one but keeps the signing region.
pub fn resolve(service: &Service, region: &str, override_url: Option<&str>) -> Result<Endpoint, CallError> {
    let signing_region = service.pinned_region.unwrap_or(region).to_string();

    let raw = match override_url {
        Some(url) => url.to_string(),
        None => format!(
            "https://{}.{}.{}",
            service.endpoint_prefix,
            signing_region,
            dns_suffix(service, &signing_region)
        ),
    };
    let url = Url::parse(&raw).map_err(|e| CallError::Endpoint {
        endpoint: raw.clone(),
        reason: e.to_string(),
    })?;
    if url.host_str().is_none() {
        return Err(CallError::Endpoint {
            endpoint: raw,
            reason: "no host".into(),
        });
    }

    Ok(Endpoint {
        url,
        signing_region,
    })
}

fn dns_suffix(service: &Service, region: &str) -> String {
    if region.starts_with("cn-") && service.dns_suffix == "amazonaws.com" {
        return "amazonaws.com.cn".into();
    }
    service.dns_suffix.to_string()
}
