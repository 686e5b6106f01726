//! AWS Partner Central Channel
//!
//! Members are lower camel case on the wire; parameters keep the Pascal case
//! naming of the other services and map onto them with `.at(..)`.

use crate::domain::{ConfirmImpact, Field, JsonVersion, Operation, Paging, Service};

pub static PARTNER_CENTRAL_CHANNEL: Service = Service {
    id: "partnercentral-channel",
    title: "AWS Partner Central Channel",
    noun_prefix: "PCC",
    signing_name: "partnercentral-channel",
    endpoint_prefix: "partnercentral-channel",
    dns_suffix: "api.aws",
    target_prefix: "PartnerCentralChannel",
    json_version: JsonVersion::V1_0,
    pinned_region: Some("us-east-1"),
};

const CATALOGS: &[&str] = &["AWS", "Sandbox"];

const HANDSHAKE_TYPES: &[&str] = &[
    "START_SERVICE_PERIOD",
    "REVOKE_SERVICE_PERIOD",
    "PROGRAM_MANAGEMENT_ACCOUNT",
];

const PARTICIPANT_TYPES: &[&str] = &["SENDER", "RECEIVER"];

const PROGRAMS: &[&str] = &[
    "SOLUTION_PROVIDER",
    "DISTRIBUTION",
    "DISTRIBUTION_SELLER",
];

const ASSOCIATION_TYPES: &[&str] = &["DOWNSTREAM_SELLER", "END_CUSTOMER", "INTERNAL"];

const RESALE_ACCOUNT_MODELS: &[&str] = &["DISTRIBUTOR", "END_CUSTOMER", "SOLUTION_PROVIDER"];

const SECTORS: &[&str] = &["COMMERCIAL", "GOVERNMENT", "GOVERNMENT_EXCEPTION"];

const CATALOG: Field = Field::one_of("Catalog", CATALOGS).at("catalog").required();

const IDENTIFIER: Field = Field::string("Identifier").at("identifier").required();

const CLIENT_TOKEN: Field = Field::token("ClientToken").at("clientToken");

const REVISION: Field = Field::string("Revision").at("revision");

const TAGS: Field = Field::tags("Tag", "key", "value")
    .at("tags")
    .aliases(&["Tags"]);

const PMA_IDENTIFIER: Field =
    Field::string("ProgramManagementAccountIdentifier").at("programManagementAccountIdentifier");

const RESOURCE_ARN: Field = Field::string("ResourceArn").at("resourceArn").required();

const SORT: Field = Field::json("Sort")
    .at("sort")
    .help("JSON object with sortBy and sortOrder");

pub static OPERATIONS: &[Operation] = &[
    Operation::new(
        &PARTNER_CENTRAL_CHANNEL,
        "CreateChannelHandshake",
        "New-PCCChannelHandshake",
        "Send a channel handshake to another partner account",
        &[
            Field::one_of("HandshakeType", HANDSHAKE_TYPES)
                .at("handshakeType")
                .required(),
            CATALOG,
            Field::string("AssociatedResourceIdentifier")
                .at("associatedResourceIdentifier")
                .required(),
            Field::json("Payload")
                .at("payload")
                .help("JSON union matching the handshake type"),
            CLIENT_TOKEN,
            TAGS,
        ],
    )
    .impact(ConfirmImpact::Medium),
    Operation::new(
        &PARTNER_CENTRAL_CHANNEL,
        "AcceptChannelHandshake",
        "Approve-PCCChannelHandshake",
        "Accept a pending channel handshake",
        &[CATALOG, IDENTIFIER],
    )
    .impact(ConfirmImpact::Medium)
    .select("channelHandshakeDetail")
    .pass_thru("Identifier"),
    Operation::new(
        &PARTNER_CENTRAL_CHANNEL,
        "RejectChannelHandshake",
        "Deny-PCCChannelHandshake",
        "Reject a pending channel handshake",
        &[CATALOG, IDENTIFIER],
    )
    .impact(ConfirmImpact::Medium)
    .select("channelHandshakeDetail")
    .pass_thru("Identifier"),
    Operation::new(
        &PARTNER_CENTRAL_CHANNEL,
        "CancelChannelHandshake",
        "Stop-PCCChannelHandshake",
        "Cancel a channel handshake this account sent",
        &[CATALOG, IDENTIFIER],
    )
    .impact(ConfirmImpact::Medium)
    .select("channelHandshakeDetail")
    .pass_thru("Identifier"),
    Operation::new(
        &PARTNER_CENTRAL_CHANNEL,
        "ListChannelHandshakes",
        "Get-PCCChannelHandshakeList",
        "List channel handshakes sent or received",
        &[
            Field::one_of("HandshakeType", HANDSHAKE_TYPES)
                .at("handshakeType")
                .required(),
            CATALOG,
            Field::one_of("ParticipantType", PARTICIPANT_TYPES)
                .at("participantType")
                .required(),
            Field::list("Status").at("statuses").aliases(&["Statuses"]),
            Field::list("AssociatedResourceIdentifier")
                .at("associatedResourceIdentifiers")
                .aliases(&["AssociatedResourceIdentifiers"]),
            Field::json("HandshakeTypeFilters").at("handshakeTypeFilters"),
            Field::json("HandshakeTypeSort").at("handshakeTypeSort"),
        ],
    )
    .select("items")
    .paged(Paging::next_token_camel("items", 50)),
    Operation::new(
        &PARTNER_CENTRAL_CHANNEL,
        "CreateProgramManagementAccount",
        "New-PCCProgramManagementAccount",
        "Create a program management account",
        &[
            CATALOG,
            Field::one_of("Program", PROGRAMS).at("program").required(),
            Field::string("DisplayName").at("displayName").required(),
            Field::string("AccountId").at("accountId").required(),
            CLIENT_TOKEN,
            TAGS,
        ],
    )
    .impact(ConfirmImpact::Medium),
    Operation::new(
        &PARTNER_CENTRAL_CHANNEL,
        "ListProgramManagementAccounts",
        "Get-PCCProgramManagementAccountList",
        "List program management accounts",
        &[
            CATALOG,
            Field::list("DisplayName").at("displayNames").aliases(&["DisplayNames"]),
            Field::list("Program").at("programs").aliases(&["Programs"]),
            Field::list("AccountId").at("accountIds").aliases(&["AccountIds"]),
            Field::list("Status").at("statuses").aliases(&["Statuses"]),
            SORT,
        ],
    )
    .select("items")
    .paged(Paging::next_token_camel("items", 50)),
    Operation::new(
        &PARTNER_CENTRAL_CHANNEL,
        "UpdateProgramManagementAccount",
        "Update-PCCProgramManagementAccount",
        "Rename a program management account",
        &[
            CATALOG,
            IDENTIFIER,
            REVISION,
            Field::string("DisplayName").at("displayName"),
        ],
    )
    .impact(ConfirmImpact::Medium)
    .pass_thru("Identifier"),
    Operation::new(
        &PARTNER_CENTRAL_CHANNEL,
        "DeleteProgramManagementAccount",
        "Remove-PCCProgramManagementAccount",
        "Delete a program management account",
        &[CATALOG, IDENTIFIER, CLIENT_TOKEN],
    )
    .impact(ConfirmImpact::High)
    .pass_thru("Identifier"),
    Operation::new(
        &PARTNER_CENTRAL_CHANNEL,
        "CreateRelationship",
        "New-PCCRelationship",
        "Create a relationship between a program management account and another account",
        &[
            CATALOG,
            Field::one_of("AssociationType", ASSOCIATION_TYPES)
                .at("associationType")
                .required(),
            PMA_IDENTIFIER.required(),
            Field::string("AssociatedAccountId")
                .at("associatedAccountId")
                .required(),
            Field::string("DisplayName").at("displayName").required(),
            Field::one_of("ResaleAccountModel", RESALE_ACCOUNT_MODELS).at("resaleAccountModel"),
            Field::one_of("Sector", SECTORS).at("sector").required(),
            Field::json("RequestedSupportPlan").at("requestedSupportPlan"),
            CLIENT_TOKEN,
            TAGS,
        ],
    )
    .impact(ConfirmImpact::Medium),
    Operation::new(
        &PARTNER_CENTRAL_CHANNEL,
        "GetRelationship",
        "Get-PCCRelationship",
        "Describe a relationship",
        &[CATALOG, PMA_IDENTIFIER.required(), IDENTIFIER],
    )
    .select("relationshipDetail"),
    Operation::new(
        &PARTNER_CENTRAL_CHANNEL,
        "ListRelationships",
        "Get-PCCRelationshipList",
        "List relationships",
        &[
            CATALOG,
            Field::list("AssociatedAccountId")
                .at("associatedAccountIds")
                .aliases(&["AssociatedAccountIds"]),
            Field::list("AssociationType")
                .at("associationTypes")
                .aliases(&["AssociationTypes"]),
            Field::list("DisplayName").at("displayNames").aliases(&["DisplayNames"]),
            Field::list("ProgramManagementAccountIdentifier")
                .at("programManagementAccountIdentifiers")
                .aliases(&["ProgramManagementAccountIdentifiers"]),
            SORT,
        ],
    )
    .select("items")
    .paged(Paging::next_token_camel("items", 50)),
    Operation::new(
        &PARTNER_CENTRAL_CHANNEL,
        "UpdateRelationship",
        "Update-PCCRelationship",
        "Update a relationship",
        &[
            CATALOG,
            IDENTIFIER,
            PMA_IDENTIFIER.required(),
            REVISION,
            Field::string("DisplayName").at("displayName"),
            Field::json("RequestedSupportPlan").at("requestedSupportPlan"),
        ],
    )
    .impact(ConfirmImpact::Medium)
    .pass_thru("Identifier"),
    Operation::new(
        &PARTNER_CENTRAL_CHANNEL,
        "DeleteRelationship",
        "Remove-PCCRelationship",
        "Delete a relationship",
        &[CATALOG, IDENTIFIER, PMA_IDENTIFIER.required(), CLIENT_TOKEN],
    )
    .impact(ConfirmImpact::High)
    .pass_thru("Identifier"),
    Operation::new(
        &PARTNER_CENTRAL_CHANNEL,
        "TagResource",
        "Add-PCCResourceTag",
        "Add tags to a Partner Central Channel resource",
        &[RESOURCE_ARN, TAGS.required()],
    )
    .impact(ConfirmImpact::Medium)
    .pass_thru("ResourceArn"),
    Operation::new(
        &PARTNER_CENTRAL_CHANNEL,
        "UntagResource",
        "Remove-PCCResourceTag",
        "Remove tags from a Partner Central Channel resource",
        &[
            RESOURCE_ARN,
            Field::list("TagKeys")
                .at("tagKeys")
                .required()
                .aliases(&["TagKey"]),
        ],
    )
    .impact(ConfirmImpact::High)
    .pass_thru("ResourceArn"),
    Operation::new(
        &PARTNER_CENTRAL_CHANNEL,
        "ListTagsForResource",
        "Get-PCCResourceTag",
        "List the tags on a Partner Central Channel resource",
        &[RESOURCE_ARN],
    )
    .select("tags"),
];
