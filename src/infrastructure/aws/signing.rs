//! AWS Signature Version 4 for JSON protocol POST requests.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use sha2::{Digest, Sha256};
use url::Url;

use crate::infrastructure::aws::credentials::Credentials;
use crate::infrastructure::error::CallError;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Everything but the RFC 3986 unreserved characters.
const SIGV4_ENCODE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// Signs requests for one service in one region.
pub struct Signer<'a> {
    pub credentials: &'a Credentials,
    pub region: &'a str,
    pub service: &'a str,
}

impl Signer<'_> {
    /// Add `x-amz-date`, `x-amz-content-sha256`, the session token and the
    /// `authorization` header to `headers`.
    ///
    /// `headers` must already hold `host` and every other header to be signed.
    pub fn sign(
        &self,
        url: &Url,
        headers: &mut BTreeMap<String, String>,
        payload: &[u8],
        now: DateTime<Utc>,
    ) -> Result<(), CallError> {
        let date = now.format("%Y%m%d").to_string();
        let amz_date = now.format("%Y%m%dT%H%M%SZ").to_string();
        let payload_hash = sha256_hex(payload);

        headers.insert("x-amz-date".into(), amz_date.clone());
        headers.insert("x-amz-content-sha256".into(), payload_hash.clone());
        if let Some(token) = &self.credentials.session_token {
            headers.insert("x-amz-security-token".into(), token.clone());
        }

        let signed_headers = headers
            .keys()
            .map(|k| k.to_ascii_lowercase())
            .collect::<Vec<_>>()
            .join(";");
        let canonical_headers: String = headers
            .iter()
            .map(|(k, v)| format!("{}:{}\n", k.to_ascii_lowercase(), v.trim()))
            .collect();

        let canonical_request = format!(
            "POST\n{}\n{}\n{}\n{}\n{}",
            canonical_uri(url),
            canonical_query(url),
            canonical_headers,
            signed_headers,
            payload_hash
        );

        let scope = format!("{date}/{}/{}/aws4_request", self.region, self.service);
        let string_to_sign = format!(
            "{ALGORITHM}\n{amz_date}\n{scope}\n{}",
            sha256_hex(canonical_request.as_bytes())
        );

        let key = self.signing_key(&date)?;
        let signature = hex::encode(hmac_sha256(&key, string_to_sign.as_bytes())?);

        headers.insert(
            "authorization".into(),
            format!(
                "{ALGORITHM} Credential={}/{scope}, SignedHeaders={signed_headers}, Signature={signature}",
                self.credentials.access_key_id
            ),
        );
        Ok(())
    }

    fn signing_key(&self, date: &str) -> Result<Vec<u8>, CallError> {
        let secret = format!("AWS4{}", self.credentials.secret_access_key);
        let k_date = hmac_sha256(secret.as_bytes(), date.as_bytes())?;
        let k_region = hmac_sha256(&k_date, self.region.as_bytes())?;
        let k_service = hmac_sha256(&k_region, self.service.as_bytes())?;
        hmac_sha256(&k_service, b"aws4_request")
    }
}

pub fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>, CallError> {
    let mut mac = HmacSha256::new_from_slice(key)
        .map_err(|_| CallError::Credentials("unusable secret access key".into()))?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Path segments encoded twice, as required for every service except S3.
fn canonical_uri(url: &Url) -> String {
    let path = url.path();
    if path.is_empty() || path == "/" {
        return "/".into();
    }
    path.split('/')
        .map(|segment| utf8_percent_encode(segment, SIGV4_ENCODE).to_string())
        .collect::<Vec<_>>()
        .join("/")
}

fn canonical_query(url: &Url) -> String {
    let mut pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            (
                utf8_percent_encode(&k, SIGV4_ENCODE).to_string(),
                utf8_percent_encode(&v, SIGV4_ENCODE).to_string(),
            )
        })
        .collect();
    pairs.sort();
    pairs
        .into_iter()
        .map(|(k, v)| format!("{k}={v}"))
        .collect::<Vec<_>>()
        .join("&")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn credentials(token: Option<&str>) -> Credentials {
        Credentials {
            access_key_id: "AKIDEXAMPLE".into(),
            secret_access_key: "wJalrXUtnFEMI/K7MDENG+bPxRfiCYEXAMPLEKEY".into(),
            session_token: token.map(str::to_string),
        }
    }

    fn headers() -> BTreeMap<String, String> {
        BTreeMap::from([
            ("host".to_string(), "kms.us-east-1.amazonaws.com".to_string()),
            ("content-type".to_string(), "application/x-amz-json-1.1".to_string()),
            ("x-amz-target".to_string(), "TrentService.ListKeys".to_string()),
        ])
    }

    #[test]
    fn empty_payload_hash_matches_known_value() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn signing_key_matches_published_example() {
        let creds = credentials(None);
        let signer = Signer {
            credentials: &creds,
            region: "us-east-1",
            service: "iam",
        };
        let key = signer.signing_key("20120215").unwrap();
        assert_eq!(
            hex::encode(key),
            "f4780e2d9f65fa895f9c67b32ce1baf0b0d8a43505a000a1a9e090d414db404d"
        );
    }

    #[test]
    fn given_request_when_signing_then_authorization_names_scope_and_headers() {
        let creds = credentials(None);
        let signer = Signer {
            credentials: &creds,
            region: "us-east-1",
            service: "kms",
        };
        let url = Url::parse("https://kms.us-east-1.amazonaws.com/").unwrap();
        let now = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let mut h = headers();

        signer.sign(&url, &mut h, b"{}", now).unwrap();

        let auth = &h["authorization"];
        assert!(auth.starts_with(
            "AWS4-HMAC-SHA256 Credential=AKIDEXAMPLE/20240101/us-east-1/kms/aws4_request, "
        ));
        assert!(auth.contains(
            "SignedHeaders=content-type;host;x-amz-content-sha256;x-amz-date;x-amz-target, "
        ));
        assert_eq!(h["x-amz-date"], "20240101T120000Z");
        assert!(!h.contains_key("x-amz-security-token"));
    }

    #[test]
    fn given_same_input_when_signing_twice_then_signature_is_stable() {
        let creds = credentials(Some("session"));
        let signer = Signer {
            credentials: &creds,
            region: "eu-west-1",
            service: "kendra-ranking",
        };
        let url = Url::parse("https://kendra-ranking.eu-west-1.api.aws/").unwrap();
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap();

        let mut first = headers();
        let mut second = headers();
        signer.sign(&url, &mut first, b"{\"Id\":\"p\"}", now).unwrap();
        signer.sign(&url, &mut second, b"{\"Id\":\"p\"}", now).unwrap();

        assert_eq!(first["authorization"], second["authorization"]);
        assert_eq!(first["x-amz-security-token"], "session");
        assert!(first["authorization"].contains("x-amz-security-token"));
    }

    #[test]
    fn canonical_uri_encodes_segments_again() {
        let url = Url::parse("https://example.com/a b/c").unwrap();
        assert_eq!(canonical_uri(&url), "/a%2520b/c");
        let root = Url::parse("https://example.com").unwrap();
        assert_eq!(canonical_uri(&root), "/");
    }
}
