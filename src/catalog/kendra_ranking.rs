//! Amazon Kendra Intelligent Ranking

use crate::domain::{ConfirmImpact, Field, JsonVersion, Operation, Paging, Service};

pub static KENDRA_RANKING: Service = Service {
    id: "kendra-ranking",
    title: "Amazon Kendra Intelligent Ranking",
    noun_prefix: "KNDR",
    signing_name: "kendra-ranking",
    endpoint_prefix: "kendra-ranking",
    dns_suffix: "api.aws",
    target_prefix: "AWSKendraRerankingFrontendService",
    json_version: JsonVersion::V1_0,
    pinned_region: None,
};

const PLAN_ID: Field = Field::string("Id")
    .required()
    .help("Identifier of the rescore execution plan");

const CAPACITY_UNITS: Field = Field::integer("CapacityUnits_RescoreCapacityUnits")
    .at("CapacityUnits.RescoreCapacityUnits")
    .help("Additional capacity units, each adds 0.01 rescore requests per second");

const TAGS: Field = Field::tags("Tag", "Key", "Value")
    .at("Tags")
    .aliases(&["Tags"]);

const RESOURCE_ARN: Field = Field::string("ResourceARN").required();

pub static OPERATIONS: &[Operation] = &[
    Operation::new(
        &KENDRA_RANKING,
        "CreateRescoreExecutionPlan",
        "New-KNDRRescoreExecutionPlan",
        "Create a rescore execution plan",
        &[
            Field::string("Name").required(),
            Field::string("Description"),
            CAPACITY_UNITS,
            TAGS,
            Field::token("ClientToken"),
        ],
    )
    .impact(ConfirmImpact::Medium),
    Operation::new(
        &KENDRA_RANKING,
        "DeleteRescoreExecutionPlan",
        "Remove-KNDRRescoreExecutionPlan",
        "Delete a rescore execution plan",
        &[PLAN_ID],
    )
    .impact(ConfirmImpact::High)
    .pass_thru("Id"),
    Operation::new(
        &KENDRA_RANKING,
        "DescribeRescoreExecutionPlan",
        "Get-KNDRRescoreExecutionPlan",
        "Describe a rescore execution plan",
        &[PLAN_ID],
    ),
    Operation::new(
        &KENDRA_RANKING,
        "ListRescoreExecutionPlans",
        "Get-KNDRRescoreExecutionPlanList",
        "List rescore execution plans",
        &[],
    )
    .select("SummaryItems")
    .paged(Paging::next_token("SummaryItems", 50)),
    Operation::new(
        &KENDRA_RANKING,
        "UpdateRescoreExecutionPlan",
        "Update-KNDRRescoreExecutionPlan",
        "Update a rescore execution plan",
        &[
            PLAN_ID,
            Field::string("Name"),
            Field::string("Description"),
            CAPACITY_UNITS,
        ],
    )
    .impact(ConfirmImpact::Medium)
    .pass_thru("Id"),
    Operation::new(
        &KENDRA_RANKING,
        "Rescore",
        "Invoke-KNDRRescore",
        "Rescore search results with a rescore execution plan",
        &[
            Field::string("RescoreExecutionPlanId").required(),
            Field::string("SearchQuery").required(),
            Field::json("Documents")
                .required()
                .aliases(&["Document"])
                .help("JSON list of documents to rescore"),
        ],
    )
    .select("ResultItems"),
    Operation::new(
        &KENDRA_RANKING,
        "TagResource",
        "Add-KNDRResourceTag",
        "Add tags to a rescore execution plan",
        &[RESOURCE_ARN, TAGS.required()],
    )
    .impact(ConfirmImpact::Medium)
    .pass_thru("ResourceARN"),
    Operation::new(
        &KENDRA_RANKING,
        "UntagResource",
        "Remove-KNDRResourceTag",
        "Remove tags from a rescore execution plan",
        &[
            RESOURCE_ARN,
            Field::list("TagKeys").required().aliases(&["TagKey"]),
        ],
    )
    .impact(ConfirmImpact::High)
    .pass_thru("ResourceARN"),
    Operation::new(
        &KENDRA_RANKING,
        "ListTagsForResource",
        "Get-KNDRResourceTag",
        "List the tags on a rescore execution plan",
        &[RESOURCE_ARN],
    )
    .select("Tags"),
];
