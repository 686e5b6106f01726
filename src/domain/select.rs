//! Output selection (`--select`)
//!
//! `*` selects the whole response, `^Param` echoes a bound input parameter,
//! anything else is a dot separated property path into the response.

use serde_json::Value;

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::operation::Operation;
use crate::domain::request::BoundParameters;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Response,
    Property(String),
    Parameter(&'static str),
}

impl Selection {
    pub fn parse(expr: &str, op: &Operation) -> DomainResult<Self> {
        let expr = expr.trim();
        if expr.is_empty() {
            return Err(DomainError::InvalidSelect(expr.to_string()));
        }
        if expr == "*" {
            return Ok(Selection::Response);
        }
        if let Some(param) = expr.strip_prefix('^') {
            let field = op.field(param).ok_or_else(|| DomainError::UnknownParameter {
                command: op.command.to_string(),
                param: param.to_string(),
            })?;
            return Ok(Selection::Parameter(field.param));
        }
        if expr.split('.').any(str::is_empty) {
            return Err(DomainError::InvalidSelect(expr.to_string()));
        }
        Ok(Selection::Property(expr.to_string()))
    }

    /// Project a response. Unknown properties and unbound parameters yield `Null`.
    pub fn project(
        &self,
        op: &Operation,
        response: &Value,
        params: &BoundParameters,
    ) -> DomainResult<Value> {
        match self {
            Selection::Response => Ok(response.clone()),
            Selection::Property(path) => Ok(lookup(response, path).cloned().unwrap_or(Value::Null)),
            Selection::Parameter(param) => echo_parameter(op, params, param),
        }
    }
}

/// Value of a bound parameter as it was given on the command line.
pub fn echo_parameter(
    op: &Operation,
    params: &BoundParameters,
    param: &str,
) -> DomainResult<Value> {
    let Some(field) = op.field(param) else {
        return Err(DomainError::UnknownParameter {
            command: op.command.to_string(),
            param: param.to_string(),
        });
    };
    match params.iter().find(|(name, _)| field.answers_to(name)) {
        Some((_, raw)) => Ok(field.echo(raw)),
        None => Ok(Value::Null),
    }
}

/// Follow a dot separated path through nested objects (case-sensitive first,
/// then case-insensitive).
pub fn lookup<'a>(value: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(value, |current, segment| {
        let map = current.as_object()?;
        map.get(segment).or_else(|| {
            map.iter()
                .find(|(k, _)| k.eq_ignore_ascii_case(segment))
                .map(|(_, v)| v)
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::field::Field;
    use crate::domain::operation::{JsonVersion, Service};
    use serde_json::json;

    static SVC: Service = Service {
        id: "test",
        title: "Test",
        noun_prefix: "TST",
        signing_name: "test",
        endpoint_prefix: "test",
        dns_suffix: "amazonaws.com",
        target_prefix: "Test",
        json_version: JsonVersion::V1_1,
        pinned_region: None,
    };

    static OP: Operation = Operation::new(
        &SVC,
        "DescribeKey",
        "Get-TSTKey",
        "",
        &[Field::string("KeyId").required(), Field::list("GrantTokens")],
    );

    fn response() -> Value {
        json!({"KeyMetadata": {"KeyId": "1234abcd", "Enabled": true}})
    }

    #[test]
    fn given_star_when_projecting_then_returns_whole_response() {
        let sel = Selection::parse("*", &OP).unwrap();
        let out = sel.project(&OP, &response(), &BoundParameters::new()).unwrap();
        assert_eq!(out, response());
    }

    #[test]
    fn given_property_path_when_projecting_then_returns_nested_value() {
        let sel = Selection::parse("KeyMetadata.Enabled", &OP).unwrap();
        let out = sel.project(&OP, &response(), &BoundParameters::new()).unwrap();
        assert_eq!(out, json!(true));
    }

    #[test]
    fn given_property_in_other_case_when_projecting_then_still_matches() {
        let sel = Selection::parse("keymetadata.keyid", &OP).unwrap();
        let out = sel.project(&OP, &response(), &BoundParameters::new()).unwrap();
        assert_eq!(out, json!("1234abcd"));
    }

    #[test]
    fn given_missing_property_when_projecting_then_returns_null() {
        let sel = Selection::parse("Nope", &OP).unwrap();
        let out = sel.project(&OP, &response(), &BoundParameters::new()).unwrap();
        assert_eq!(out, Value::Null);
    }

    #[test]
    fn given_caret_parameter_when_projecting_then_echoes_bound_value() {
        let params = BoundParameters::new().bind("KeyId", "1234abcd");
        let sel = Selection::parse("^keyid", &OP).unwrap();
        assert_eq!(sel, Selection::Parameter("KeyId"));
        let out = sel.project(&OP, &json!({}), &params).unwrap();
        assert_eq!(out, json!("1234abcd"));
    }

    #[test]
    fn given_caret_unknown_parameter_when_parsing_then_fails() {
        assert!(matches!(
            Selection::parse("^Missing", &OP),
            Err(DomainError::UnknownParameter { .. })
        ));
    }

    #[test]
    fn given_malformed_path_when_parsing_then_fails() {
        assert!(matches!(
            Selection::parse("KeyMetadata..KeyId", &OP),
            Err(DomainError::InvalidSelect(_))
        ));
        assert!(Selection::parse("  ", &OP).is_err());
    }
}
