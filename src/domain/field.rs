//! Request fields: one command-line parameter mapped onto one request member.

use std::path::PathBuf;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::DateTime;
use serde_json::{Map, Value};

use crate::domain::error::{DomainError, DomainResult};

/// Prefix marking a blob value as a path to read bytes from.
pub const BLOB_FILE_PREFIX: &str = "fileb://";

/// Shape of a parameter value and its wire encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    /// String restricted to a closed value set
    Enum(&'static [&'static str]),
    Integer,
    Boolean,
    StringList,
    /// Bytes, base64 on the wire
    Blob,
    /// RFC 3339 on the command line, epoch seconds on the wire
    Timestamp,
    /// `Key=Value` pairs into a JSON object
    Map,
    /// `Key=Value` pairs into a list of `{key: .., value: ..}` objects
    Tags {
        key: &'static str,
        value: &'static str,
    },
    /// Any JSON document (structures, unions, lists of structures)
    Json,
    /// String filled with a fresh UUID when not bound
    IdempotencyToken,
}

impl FieldKind {
    /// Whether the parameter may be given several times.
    pub fn is_multi(&self) -> bool {
        matches!(
            self,
            FieldKind::StringList | FieldKind::Map | FieldKind::Tags { .. }
        )
    }

    pub fn value_name(&self) -> &'static str {
        match self {
            FieldKind::Integer => "INT",
            FieldKind::Boolean => "BOOL",
            FieldKind::Blob => "TEXT|fileb://PATH",
            FieldKind::Timestamp => "RFC3339",
            FieldKind::Map | FieldKind::Tags { .. } => "KEY=VALUE",
            FieldKind::Json => "JSON",
            _ => "STRING",
        }
    }
}

/// One parameter of an operation.
#[derive(Debug, Clone, Copy)]
pub struct Field {
    /// Parameter name as shown to the user (`TargetKeyId`)
    pub param: &'static str,
    /// Dot separated request member path (`Constraints.EncryptionContextSubset`)
    pub path: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Deprecated or renamed parameter names
    pub aliases: &'static [&'static str],
    pub help: &'static str,
}

impl Field {
    const fn of(param: &'static str, kind: FieldKind) -> Self {
        Self {
            param,
            path: param,
            kind,
            required: false,
            aliases: &[],
            help: "",
        }
    }

    pub const fn string(param: &'static str) -> Self {
        Self::of(param, FieldKind::String)
    }

    pub const fn one_of(param: &'static str, values: &'static [&'static str]) -> Self {
        Self::of(param, FieldKind::Enum(values))
    }

    pub const fn integer(param: &'static str) -> Self {
        Self::of(param, FieldKind::Integer)
    }

    pub const fn boolean(param: &'static str) -> Self {
        Self::of(param, FieldKind::Boolean)
    }

    pub const fn list(param: &'static str) -> Self {
        Self::of(param, FieldKind::StringList)
    }

    pub const fn blob(param: &'static str) -> Self {
        Self::of(param, FieldKind::Blob)
    }

    pub const fn timestamp(param: &'static str) -> Self {
        Self::of(param, FieldKind::Timestamp)
    }

    pub const fn map(param: &'static str) -> Self {
        Self::of(param, FieldKind::Map)
    }

    pub const fn tags(param: &'static str, key: &'static str, value: &'static str) -> Self {
        Self::of(param, FieldKind::Tags { key, value })
    }

    pub const fn json(param: &'static str) -> Self {
        Self::of(param, FieldKind::Json)
    }

    pub const fn token(param: &'static str) -> Self {
        Self::of(param, FieldKind::IdempotencyToken)
    }

    /// Place the value at a request path other than the parameter name.
    pub const fn at(self, path: &'static str) -> Self {
        Self { path, ..self }
    }

    pub const fn required(self) -> Self {
        Self {
            required: true,
            ..self
        }
    }

    pub const fn aliases(self, aliases: &'static [&'static str]) -> Self {
        Self { aliases, ..self }
    }

    pub const fn help(self, help: &'static str) -> Self {
        Self { help, ..self }
    }

    /// Long flag for this parameter (`--target-key-id`).
    pub fn flag(&self) -> String {
        kebab_case(self.param)
    }

    pub fn answers_to(&self, name: &str) -> bool {
        self.param.eq_ignore_ascii_case(name)
            || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }

    /// The bound value as typed: every occurrence for repeatable kinds, the
    /// last one otherwise. Blob paths are echoed, not read.
    pub fn echo(&self, raw: &[String]) -> Value {
        if self.kind.is_multi() {
            Value::Array(raw.iter().cloned().map(Value::String).collect())
        } else {
            raw.last().cloned().map_or(Value::Null, Value::String)
        }
    }

    /// Convert the raw command-line values into the wire value.
    ///
    /// Single-valued kinds use the last occurrence.
    pub fn to_wire(&self, raw: &[String]) -> DomainResult<Value> {
        let last = || {
            raw.last()
                .ok_or_else(|| DomainError::invalid_value(self.param, "no value given"))
        };
        match self.kind {
            FieldKind::String | FieldKind::Enum(_) | FieldKind::IdempotencyToken => {
                Ok(Value::String(last()?.clone()))
            }
            FieldKind::Integer => last()?
                .trim()
                .parse::<i64>()
                .map(Value::from)
                .map_err(|e| DomainError::invalid_value(self.param, e.to_string())),
            FieldKind::Boolean => parse_bool(last()?)
                .map(Value::Bool)
                .ok_or_else(|| DomainError::invalid_value(self.param, "expected true or false")),
            FieldKind::StringList => Ok(Value::Array(
                raw.iter().cloned().map(Value::String).collect(),
            )),
            FieldKind::Blob => {
                let bytes = read_blob(last()?)?;
                Ok(Value::String(STANDARD.encode(bytes)))
            }
            FieldKind::Timestamp => parse_timestamp(self.param, last()?),
            FieldKind::Map => {
                if let Some(doc) = single_json(raw, '{') {
                    return self.parse_json(doc);
                }
                let mut map = Map::new();
                for entry in raw {
                    let (k, v) = self.split_pair(entry)?;
                    map.insert(k.to_string(), Value::String(v.to_string()));
                }
                Ok(Value::Object(map))
            }
            FieldKind::Tags { key, value } => {
                if let Some(doc) = single_json(raw, '[') {
                    return self.parse_json(doc);
                }
                let mut tags = Vec::with_capacity(raw.len());
                for entry in raw {
                    let (k, v) = self.split_pair(entry)?;
                    let mut tag = Map::new();
                    tag.insert(key.to_string(), Value::String(k.to_string()));
                    tag.insert(value.to_string(), Value::String(v.to_string()));
                    tags.push(Value::Object(tag));
                }
                Ok(Value::Array(tags))
            }
            FieldKind::Json => self.parse_json(last()?),
        }
    }

    fn parse_json(&self, doc: &str) -> DomainResult<Value> {
        serde_json::from_str(doc)
            .map_err(|e| DomainError::invalid_value(self.param, format!("invalid JSON: {e}")))
    }

    fn split_pair<'a>(&self, entry: &'a str) -> DomainResult<(&'a str, &'a str)> {
        entry
            .split_once('=')
            .filter(|(k, _)| !k.is_empty())
            .ok_or_else(|| {
                DomainError::invalid_value(self.param, format!("expected KEY=VALUE, got '{entry}'"))
            })
    }
}

fn single_json(raw: &[String], open: char) -> Option<&str> {
    match raw {
        [only] if only.trim_start().starts_with(open) => Some(only.as_str()),
        _ => None,
    }
}

fn parse_bool(s: &str) -> Option<bool> {
    match s.trim().trim_start_matches('$').to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

fn parse_timestamp(param: &str, s: &str) -> DomainResult<Value> {
    if let Ok(secs) = s.trim().parse::<i64>() {
        return Ok(Value::from(secs));
    }
    let ts = DateTime::parse_from_rfc3339(s.trim())
        .map_err(|e| DomainError::invalid_value(param, format!("invalid timestamp: {e}")))?;
    let millis = ts.timestamp_millis();
    if millis % 1000 == 0 {
        Ok(Value::from(millis / 1000))
    } else {
        Ok(Value::from(millis as f64 / 1000.0))
    }
}

fn read_blob(raw: &str) -> DomainResult<Vec<u8>> {
    match raw.strip_prefix(BLOB_FILE_PREFIX) {
        Some(path) => {
            let path = PathBuf::from(
                shellexpand::full(path)
                    .map(|s| s.into_owned())
                    .unwrap_or_else(|_| path.to_string()),
            );
            std::fs::read(&path).map_err(|e| DomainError::BlobInput {
                path,
                reason: e.to_string(),
            })
        }
        None => Ok(raw.as_bytes().to_vec()),
    }
}

/// `TargetKeyId` → `target-key-id`, `ResourceARN` → `resource-arn`,
/// `CapacityUnits_RescoreCapacityUnits` → `capacity-units-rescore-capacity-units`.
pub fn kebab_case(name: &str) -> String {
    let chars: Vec<char> = name.chars().collect();
    let mut out = String::with_capacity(name.len() + 4);
    for (i, &c) in chars.iter().enumerate() {
        if c == '_' || c == '-' {
            if !out.is_empty() && !out.ends_with('-') {
                out.push('-');
            }
            continue;
        }
        if c.is_ascii_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_lower = chars.get(i + 1).is_some_and(|n| n.is_ascii_lowercase());
            let boundary = prev.is_ascii_lowercase()
                || prev.is_ascii_digit()
                || (prev.is_ascii_uppercase() && next_lower);
            if boundary && !out.ends_with('-') {
                out.push('-');
            }
        }
        out.push(c.to_ascii_lowercase());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    fn raw(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[rstest]
    #[case("TargetKeyId", "target-key-id")]
    #[case("ResourceARN", "resource-arn")]
    #[case("CapacityUnits_RescoreCapacityUnits", "capacity-units-rescore-capacity-units")]
    #[case("XksProxyUriEndpoint", "xks-proxy-uri-endpoint")]
    #[case("CloudHsmClusterId", "cloud-hsm-cluster-id")]
    #[case("catalog", "catalog")]
    #[case("Constraints_EncryptionContextSubset", "constraints-encryption-context-subset")]
    fn kebab_case_converts_parameter_names(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(kebab_case(input), expected);
    }

    #[rstest]
    #[case(Field::blob("Plaintext"), &["hello"], json!("hello"))]
    #[case(Field::blob("Plaintext"), &["fileb:///no/such/file"], json!("fileb:///no/such/file"))]
    #[case(Field::integer("Limit"), &["5", "7"], json!("7"))]
    #[case(Field::tags("Tag", "TagKey", "TagValue"), &["env=prod"], json!(["env=prod"]))]
    #[case(Field::list("GrantTokens"), &["a", "b"], json!(["a", "b"]))]
    fn echo_returns_values_as_typed(#[case] field: Field, #[case] values: &[&str], #[case] expected: Value) {
        assert_eq!(field.echo(&raw(values)), expected);
    }

    #[test]
    fn given_repeated_string_when_converting_then_last_value_wins() {
        let field = Field::string("Description");
        assert_eq!(field.to_wire(&raw(&["a", "b"])).unwrap(), json!("b"));
    }

    #[test]
    fn given_integer_field_when_value_is_not_a_number_then_fails() {
        let field = Field::integer("PendingWindowInDays");
        assert_eq!(field.to_wire(&raw(&["7"])).unwrap(), json!(7));
        let err = field.to_wire(&raw(&["seven"])).unwrap_err();
        assert!(err.to_string().contains("PendingWindowInDays"));
    }

    #[rstest]
    #[case("true", true)]
    #[case("$false", false)]
    #[case("1", true)]
    fn boolean_field_accepts_common_spellings(#[case] input: &str, #[case] expected: bool) {
        let field = Field::boolean("DryRun");
        assert_eq!(field.to_wire(&raw(&[input])).unwrap(), Value::Bool(expected));
    }

    #[test]
    fn given_map_pairs_when_converting_then_builds_object() {
        let field = Field::map("EncryptionContext");
        let value = field.to_wire(&raw(&["Dept=IT", "Purpose=Test=1"])).unwrap();
        assert_eq!(value, json!({"Dept": "IT", "Purpose": "Test=1"}));
    }

    #[test]
    fn given_map_entry_without_equals_when_converting_then_fails() {
        let field = Field::map("EncryptionContext");
        assert!(field.to_wire(&raw(&["Dept"])).is_err());
    }

    #[test]
    fn given_tag_pairs_when_converting_then_uses_declared_member_names() {
        let field = Field::tags("Tag", "TagKey", "TagValue");
        let value = field.to_wire(&raw(&["env=prod"])).unwrap();
        assert_eq!(value, json!([{"TagKey": "env", "TagValue": "prod"}]));
    }

    #[test]
    fn given_tags_as_json_when_converting_then_passes_document_through() {
        let field = Field::tags("Tag", "Key", "Value");
        let value = field
            .to_wire(&raw(&[r#"[{"Key":"a","Value":"b"}]"#]))
            .unwrap();
        assert_eq!(value, json!([{"Key": "a", "Value": "b"}]));
    }

    #[test]
    fn given_text_blob_when_converting_then_base64_encodes() {
        let field = Field::blob("Plaintext");
        assert_eq!(field.to_wire(&raw(&["hello"])).unwrap(), json!("aGVsbG8="));
    }

    #[test]
    fn given_file_blob_when_converting_then_reads_file_bytes() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("cipher.bin");
        std::fs::write(&path, [0u8, 1, 2]).unwrap();

        let field = Field::blob("CiphertextBlob");
        let value = field
            .to_wire(&[format!("{BLOB_FILE_PREFIX}{}", path.display())])
            .unwrap();
        assert_eq!(value, json!("AAEC"));
    }

    #[test]
    fn given_missing_blob_file_when_converting_then_reports_path() {
        let field = Field::blob("CiphertextBlob");
        let err = field
            .to_wire(&raw(&["fileb:///definitely/not/here.bin"]))
            .unwrap_err();
        assert!(matches!(err, DomainError::BlobInput { .. }));
    }

    #[test]
    fn given_rfc3339_timestamp_when_converting_then_yields_epoch_seconds() {
        let field = Field::timestamp("ValidTo");
        let value = field.to_wire(&raw(&["2024-01-01T00:00:00Z"])).unwrap();
        assert_eq!(value, json!(1704067200));
    }

    #[test]
    fn given_invalid_json_when_converting_then_fails() {
        let field = Field::json("Documents");
        assert!(field.to_wire(&raw(&["[not json"])).is_err());
    }
}
