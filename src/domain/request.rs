//! Binding parameter values into a request body.

use std::collections::BTreeMap;

use serde_json::{Map, Value};
use tracing::trace;
use uuid::Uuid;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::field::FieldKind;
use crate::domain::operation::Operation;

/// Raw values bound on the command line, keyed by parameter name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundParameters {
    values: BTreeMap<String, Vec<String>>,
}

impl BoundParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind one value; repeated calls append (list, map and tag parameters).
    pub fn bind(mut self, param: &str, value: impl Into<String>) -> Self {
        self.push(param, value);
        self
    }

    pub fn push(&mut self, param: &str, value: impl Into<String>) {
        self.values
            .entry(param.to_string())
            .or_default()
            .push(value.into());
    }

    pub fn get(&self, param: &str) -> Option<&[String]> {
        self.values.get(param).map(Vec::as_slice)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// Outcome of binding parameters into a request body.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestBody {
    pub body: Map<String, Value>,
    /// Required parameters that were left unbound
    pub missing_required: Vec<&'static str>,
}

/// Build the request body for `op`.
///
/// Bound parameters are copied onto their request paths unchanged; unbound
/// ones leave their member unset. Unbound idempotency tokens get a fresh
/// UUID. Missing required parameters are reported, not rejected.
pub fn build_request(op: &Operation, params: &BoundParameters) -> DomainResult<RequestBody> {
    for (name, _) in params.iter() {
        if op.field(name).is_none() {
            return Err(DomainError::UnknownParameter {
                command: op.command.to_string(),
                param: name.to_string(),
            });
        }
    }

    let mut body = Map::new();
    let mut missing_required = Vec::new();

    for field in op.fields {
        let raw = params
            .iter()
            .find(|(name, _)| field.answers_to(name))
            .map(|(_, raw)| raw);

        let value = match (raw, field.kind) {
            (Some(raw), _) => field.to_wire(raw)?,
            (None, FieldKind::IdempotencyToken) => Value::String(Uuid::new_v4().to_string()),
            (None, _) => {
                if field.required {
                    missing_required.push(field.param);
                }
                continue;
            }
        };
        trace!("bind {} -> {}", field.param, field.path);
        insert_at_path(&mut body, field.path, value);
    }

    Ok(RequestBody {
        body,
        missing_required,
    })
}

/// Set `value` at a dot separated path, creating intermediate objects.
pub fn insert_at_path(body: &mut Map<String, Value>, path: &str, value: Value) {
    let mut segments = path.split('.').peekable();
    let mut current = body;
    while let Some(segment) = segments.next() {
        if segments.peek().is_none() {
            current.insert(segment.to_string(), value);
            return;
        }
        if !current.get(segment).is_some_and(Value::is_object) {
            current.insert(segment.to_string(), Value::Object(Map::new()));
        }
        let Some(Value::Object(next)) = current.get_mut(segment) else {
            return;
        };
        current = next;
    }
}
