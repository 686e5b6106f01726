//! Operation descriptors
//!
//! An [`Operation`] is the static description of one wrapped service call:
//! which service it targets, the flag-to-field table used to build the
//! request, how mutating it is, and how its response is projected by default.
//! The catalog declares one per command; a single driver runs them all.

use serde::{Deserialize, Serialize};

use crate::domain::field::Field;

/// AWS JSON protocol flavour spoken by a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JsonVersion {
    V1_0,
    V1_1,
}

impl JsonVersion {
    pub fn content_type(self) -> &'static str {
        match self {
            JsonVersion::V1_0 => "application/x-amz-json-1.0",
            JsonVersion::V1_1 => "application/x-amz-json-1.1",
        }
    }
}

/// Wire-level facts about a wrapped service.
#[derive(Debug)]
pub struct Service {
    /// Short id used in settings (`[endpoints]`) and `operations --service`
    pub id: &'static str,
    /// Human readable name
    pub title: &'static str,
    /// Noun prefix of every command (`KMS` in `New-KMSKey`)
    pub noun_prefix: &'static str,
    /// SigV4 signing name
    pub signing_name: &'static str,
    /// Host label in front of the region
    pub endpoint_prefix: &'static str,
    /// Domain after the region (`amazonaws.com` or `api.aws`)
    pub dns_suffix: &'static str,
    /// Prefix of the `X-Amz-Target` header
    pub target_prefix: &'static str,
    pub json_version: JsonVersion,
    /// Region the service is pinned to, for single-region services
    pub pinned_region: Option<&'static str>,
}

/// How disruptive an operation is; compared against the configured
/// confirmation threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfirmImpact {
    None,
    Low,
    Medium,
    High,
}

/// Continuation-token pagination of a list operation.
#[derive(Debug, Clone, Copy)]
pub struct Paging {
    /// Request member carrying the continuation token
    pub input_token: &'static str,
    /// Response member carrying the next continuation token
    pub output_token: &'static str,
    /// Request member carrying the page size
    pub page_size: &'static str,
    /// Largest page size the service accepts
    pub max_page_size: u32,
    /// Response member holding the page items
    pub items: &'static str,
}

impl Paging {
    /// KMS style: `Marker` / `NextMarker` / `Limit`.
    pub const fn marker(items: &'static str, max_page_size: u32) -> Self {
        Self {
            input_token: "Marker",
            output_token: "NextMarker",
            page_size: "Limit",
            max_page_size,
            items,
        }
    }

    /// `NextToken` / `NextToken` / `MaxResults`.
    pub const fn next_token(items: &'static str, max_page_size: u32) -> Self {
        Self {
            input_token: "NextToken",
            output_token: "NextToken",
            page_size: "MaxResults",
            max_page_size,
            items,
        }
    }

    /// Same as [`Paging::next_token`] with lower camel case members.
    pub const fn next_token_camel(items: &'static str, max_page_size: u32) -> Self {
        Self {
            input_token: "nextToken",
            output_token: "nextToken",
            page_size: "maxResults",
            max_page_size,
            items,
        }
    }
}

/// Static description of one command.
#[derive(Debug)]
pub struct Operation {
    pub service: &'static Service,
    /// API operation name (`CreateAlias`)
    pub name: &'static str,
    /// Verb-noun command name (`New-KMSAlias`)
    pub command: &'static str,
    pub about: &'static str,
    pub fields: &'static [Field],
    pub impact: ConfirmImpact,
    /// Default `--select` expression
    pub select: &'static str,
    /// Parameter echoed by `--pass-thru`
    pub pass_thru: Option<&'static str>,
    pub paging: Option<Paging>,
}

impl Operation {
    pub const fn new(
        service: &'static Service,
        name: &'static str,
        command: &'static str,
        about: &'static str,
        fields: &'static [Field],
    ) -> Self {
        Self {
            service,
            name,
            command,
            about,
            fields,
            impact: ConfirmImpact::None,
            select: "*",
            pass_thru: None,
            paging: None,
        }
    }

    pub const fn impact(self, impact: ConfirmImpact) -> Self {
        Self { impact, ..self }
    }

    pub const fn select(self, select: &'static str) -> Self {
        Self { select, ..self }
    }

    pub const fn pass_thru(self, param: &'static str) -> Self {
        Self {
            pass_thru: Some(param),
            ..self
        }
    }

    pub const fn paged(self, paging: Paging) -> Self {
        Self {
            paging: Some(paging),
            ..self
        }
    }

    /// Value of the `X-Amz-Target` header.
    pub fn target(&self) -> String {
        format!("{}.{}", self.service.target_prefix, self.name)
    }

    /// Look up a field by parameter name (case-insensitive, aliases included).
    pub fn field(&self, param: &str) -> Option<&'static Field> {
        self.fields.iter().find(|f| f.answers_to(param))
    }

    pub fn is_mutating(&self) -> bool {
        self.impact != ConfirmImpact::None
    }

    /// Parameter whose value names the target in confirmation prompts.
    pub fn confirm_target(&self) -> Option<&'static str> {
        self.pass_thru
            .or_else(|| self.fields.iter().find(|f| f.required).map(|f| f.param))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static TEST_SERVICE: Service = Service {
        id: "test",
        title: "Test Service",
        noun_prefix: "TST",
        signing_name: "test",
        endpoint_prefix: "test",
        dns_suffix: "amazonaws.com",
        target_prefix: "TestService",
        json_version: JsonVersion::V1_1,
        pinned_region: None,
    };

    static FIELDS: &[Field] = &[
        Field::string("Name").required(),
        Field::string("Description").aliases(&["Desc"]),
    ];

    #[test]
    fn given_operation_when_building_target_then_joins_prefix_and_name() {
        let op = Operation::new(&TEST_SERVICE, "CreateThing", "New-TSTThing", "", FIELDS);
        assert_eq!(op.target(), "TestService.CreateThing");
    }

    #[test]
    fn given_alias_in_any_case_when_looking_up_field_then_finds_it() {
        let op = Operation::new(&TEST_SERVICE, "CreateThing", "New-TSTThing", "", FIELDS);
        assert_eq!(op.field("desc").map(|f| f.param), Some("Description"));
        assert_eq!(op.field("NAME").map(|f| f.param), Some("Name"));
        assert!(op.field("Other").is_none());
    }

    #[test]
    fn given_no_pass_thru_when_asking_confirm_target_then_uses_first_required_field() {
        let op = Operation::new(&TEST_SERVICE, "CreateThing", "New-TSTThing", "", FIELDS)
            .impact(ConfirmImpact::Medium);
        assert_eq!(op.confirm_target(), Some("Name"));
        assert!(op.is_mutating());
    }

    #[test]
    fn impact_levels_are_ordered() {
        assert!(ConfirmImpact::High > ConfirmImpact::Medium);
        assert!(ConfirmImpact::Low > ConfirmImpact::None);
    }
}
