//! CLI argument definitions using clap
//!
//! Global flags and built-in commands are derived; the per-operation
//! subcommands are generated from the catalog.

use std::path::PathBuf;

use clap::builder::PossibleValuesParser;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Args, Command, Subcommand, ValueHint};

use crate::application::services::RunOptions;
use crate::catalog;
use crate::config::{OutputFormat, Settings};
use crate::domain::{kebab_case, BoundParameters, Field, FieldKind, Operation, PagingPlan};

pub const SELECT: &str = "select";
pub const FORCE: &str = "force";
pub const PASS_THRU: &str = "pass-thru";
pub const TOKEN: &str = "continuation-token";
pub const MAX_ITEMS: &str = "max-items";
pub const NO_AUTO_ITERATION: &str = "no-auto-iteration";

/// Flags shared by every command.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Debug output (-d info, -dd debug, -ddd trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub debug: u8,

    /// AWS region (overrides AWS_REGION and settings)
    #[arg(long, global = true)]
    pub region: Option<String>,

    /// Shared credentials profile (overrides AWS_PROFILE and settings)
    #[arg(long, global = true)]
    pub profile: Option<String>,

    /// Send requests to this URL instead of the regional endpoint
    #[arg(long, global = true, value_hint = ValueHint::Url)]
    pub endpoint_url: Option<String>,

    /// Settings file layered over the global one
    #[arg(long, global = true, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub output: Option<OutputFormat>,
}

#[derive(Subcommand, Debug)]
pub enum BuiltinCommand {
    /// List the wrapped operations
    Operations {
        /// Only this service (kms, kendra-ranking, partnercentral-channel)
        #[arg(long)]
        service: Option<String>,
    },

    /// Manage settings
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Generate shell completions
    Completion {
        /// Shell type
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show merged config
    Show,

    /// Create global config template
    Init {
        /// Overwrite an existing file
        #[arg(short, long)]
        force: bool,
    },

    /// Show config paths
    Path,
}

/// The complete command tree.
pub fn build_cli() -> Command {
    let cmd = Command::new("awsops")
        .version(env!("CARGO_PKG_VERSION"))
        .about("One subcommand per AWS API operation")
        .propagate_version(true)
        .subcommand_required(true)
        .arg_required_else_help(true);
    let cmd = GlobalArgs::augment_args(cmd);
    let cmd = BuiltinCommand::augment_subcommands(cmd);
    cmd.subcommands(catalog::all().map(operation_command))
}

/// Subcommand for one operation: a flag per field plus the common switches.
pub fn operation_command(op: &'static Operation) -> Command {
    let mut cmd = Command::new(op.command)
        .alias(op.command.to_ascii_lowercase())
        .about(op.about)
        .long_about(format!("{}\n\nCalls {} ({}).", op.about, op.target(), op.service.title))
        .args_override_self(true)
        .args(op.fields.iter().map(field_arg));

    cmd = cmd.arg(
        Arg::new(SELECT)
            .long(SELECT)
            .aliases(["Select"])
            .value_name("EXPR")
            .help(format!(
                "Output selection: '*', a property path or ^Param (default: {})",
                op.select
            )),
    );

    if let Some(param) = op.pass_thru {
        cmd = cmd.arg(
            Arg::new(PASS_THRU)
                .long(PASS_THRU)
                .aliases(["PassThru"])
                .action(ArgAction::SetTrue)
                .conflicts_with(SELECT)
                .help(format!("Output the {param} parameter (same as --select ^{param})")),
        );
    }

    if op.is_mutating() {
        cmd = cmd.arg(
            Arg::new(FORCE)
                .long(FORCE)
                .aliases(["Force"])
                .action(ArgAction::SetTrue)
                .help("Do not ask for confirmation"),
        );
    }

    if let Some(paging) = op.paging {
        cmd = cmd
            .arg(
                Arg::new(TOKEN)
                    .long(kebab_case(paging.input_token))
                    .aliases(distinct_aliases(&kebab_case(paging.input_token), &[paging.input_token]))
                    .value_name("TOKEN")
                    .help("Continuation token from a previous call; fetches that one page only"),
            )
            .arg(
                Arg::new(MAX_ITEMS)
                    .long(MAX_ITEMS)
                    .aliases(distinct_aliases(MAX_ITEMS, &["MaxItem", paging.page_size]))
                    .value_name("COUNT")
                    .value_parser(value_parser!(u64))
                    .help(format!(
                        "Return at most COUNT items (pages of up to {})",
                        paging.max_page_size
                    )),
            )
            .arg(
                Arg::new(NO_AUTO_ITERATION)
                    .long(NO_AUTO_ITERATION)
                    .aliases(["NoAutoIteration"])
                    .action(ArgAction::SetTrue)
                    .help("Fetch a single page and report the next token"),
            );
    }

    cmd
}

fn field_arg(field: &'static Field) -> Arg {
    let flag = field.flag();
    let mut names = vec![field.param];
    names.extend(field.aliases.iter().copied());
    let aliases = distinct_aliases(&flag, &names);

    let mut help = if field.help.is_empty() {
        format!("Sets {}", field.path)
    } else {
        field.help.to_string()
    };
    if field.required {
        help.push_str(" [required]");
    }

    let arg = Arg::new(field.param)
        .long(flag)
        .aliases(aliases)
        .value_name(field.kind.value_name())
        .help(help);

    match field.kind {
        FieldKind::Enum(values) => arg
            .action(ArgAction::Set)
            .value_parser(PossibleValuesParser::new(values.iter().copied())),
        FieldKind::Boolean => arg
            .action(ArgAction::Set)
            .num_args(0..=1)
            .default_missing_value("true"),
        kind if kind.is_multi() => arg.action(ArgAction::Append),
        _ => arg.action(ArgAction::Set),
    }
}

/// Each name and its kebab-case form, minus the primary flag and repeats.
fn distinct_aliases(primary: &str, names: &[&str]) -> Vec<String> {
    let mut out: Vec<String> = Vec::new();
    for name in names {
        for candidate in [name.to_string(), kebab_case(name)] {
            if candidate != primary && !out.contains(&candidate) {
                out.push(candidate);
            }
        }
    }
    out
}

/// Collect the values given for the operation's fields.
pub fn bind_parameters(op: &Operation, matches: &ArgMatches) -> BoundParameters {
    let mut params = BoundParameters::new();
    for field in op.fields {
        if let Some(values) = matches.get_many::<String>(field.param) {
            for value in values {
                params.push(field.param, value.clone());
            }
        }
    }
    params
}

/// Switches for one run, from the operation's matches and the settings.
pub fn run_options(op: &Operation, matches: &ArgMatches, settings: &Settings) -> RunOptions {
    let mut paging = PagingPlan {
        partial_failure: settings.pagination.partial_failure,
        ..Default::default()
    };
    if op.paging.is_some() {
        paging.start_token = matches.get_one::<String>(TOKEN).cloned();
        paging.max_items = matches.get_one::<u64>(MAX_ITEMS).copied();
        // an explicit token means the caller is stepping through pages
        paging.manual = matches.get_flag(NO_AUTO_ITERATION) || paging.start_token.is_some();
    }

    RunOptions {
        force: op.is_mutating() && matches.get_flag(FORCE),
        select: matches.get_one::<String>(SELECT).cloned(),
        pass_thru: op.pass_thru.is_some() && matches.get_flag(PASS_THRU),
        paging,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn matches_for(op: &'static Operation, args: &[&str]) -> ArgMatches {
        let mut argv = vec![op.command];
        argv.extend_from_slice(args);
        operation_command(op).try_get_matches_from(argv).unwrap()
    }

    #[test]
    fn given_kebab_and_exact_flags_when_parsing_then_both_bind() {
        let op = catalog::find("New-KMSAlias").unwrap();
        let matches = matches_for(
            op,
            &["--target-key-id", "1234abcd", "--AliasName", "alias/test"],
        );

        let params = bind_parameters(op, &matches);

        assert_eq!(params.get("TargetKeyId"), Some(&["1234abcd".to_string()][..]));
        assert_eq!(params.get("AliasName"), Some(&["alias/test".to_string()][..]));
    }

    #[test]
    fn given_unbound_flags_when_binding_then_parameters_stay_empty() {
        let op = catalog::find("Get-KMSKeyList").unwrap();
        let matches = matches_for(op, &[]);
        assert!(bind_parameters(op, &matches).is_empty());
    }

    #[test]
    fn given_bare_boolean_flag_when_parsing_then_binds_true() {
        let op = catalog::find("Invoke-KMSEncrypt").unwrap();
        let matches = matches_for(op, &["--key-id", "k", "--plaintext", "p", "--dry-run"]);
        let params = bind_parameters(op, &matches);
        assert_eq!(params.get("DryRun"), Some(&["true".to_string()][..]));
    }

    #[test]
    fn given_repeated_tag_flag_when_parsing_then_appends() {
        let op = catalog::find("Add-KMSResourceTag").unwrap();
        let matches = matches_for(op, &["--key-id", "k", "--tag", "a=1", "--Tags", "b=2"]);
        let params = bind_parameters(op, &matches);
        assert_eq!(params.get("Tag").map(<[String]>::len), Some(2));
    }

    #[test]
    fn given_value_outside_enum_when_parsing_then_clap_rejects() {
        let op = catalog::find("New-KMSKey").unwrap();
        let result = operation_command(op).try_get_matches_from(["New-KMSKey", "--key-usage", "BOGUS"]);
        assert!(result.is_err());
    }

    #[test]
    fn given_paged_operation_when_parsing_then_reads_paging_switches() {
        let op = catalog::find("Get-KMSKeyList").unwrap();
        let matches = matches_for(op, &["--marker", "abc", "--limit", "5", "--no-auto-iteration"]);

        let options = run_options(op, &matches, &Settings::default());

        assert_eq!(options.paging.start_token.as_deref(), Some("abc"));
        assert_eq!(options.paging.max_items, Some(5));
        assert!(options.paging.manual);
        assert!(!options.force);
    }

    #[rstest]
    #[case(&["--marker", "abc"], true)]
    #[case(&["--Marker", "abc", "--max-items", "10"], true)]
    #[case(&["--max-items", "10"], false)]
    #[case(&[], false)]
    fn given_token_flag_when_parsing_then_caller_controls_paging(
        #[case] args: &[&str],
        #[case] manual: bool,
    ) {
        let op = catalog::find("Get-KMSKeyList").unwrap();
        let matches = matches_for(op, args);

        let options = run_options(op, &matches, &Settings::default());

        assert_eq!(options.paging.manual, manual);
    }

    #[test]
    fn given_camel_case_paging_when_building_then_token_flag_is_next_token() {
        let op = catalog::find("Get-PCCRelationshipList").unwrap();
        let matches = matches_for(op, &["--next-token", "t1", "--MaxItem", "3"]);
        let options = run_options(op, &matches, &Settings::default());
        assert_eq!(options.paging.start_token.as_deref(), Some("t1"));
        assert_eq!(options.paging.max_items, Some(3));
        assert!(options.paging.manual);
    }

    #[test]
    fn given_force_and_pass_thru_when_parsing_then_options_reflect_them() {
        let op = catalog::find("Remove-KMSAlias").unwrap();
        let matches = matches_for(op, &["--alias-name", "alias/x", "--force", "--pass-thru"]);
        let options = run_options(op, &matches, &Settings::default());
        assert!(options.force);
        assert!(options.pass_thru);
    }

    #[test]
    fn given_select_and_pass_thru_when_parsing_then_conflict() {
        let op = catalog::find("Remove-KMSAlias").unwrap();
        let result = operation_command(op).try_get_matches_from([
            "Remove-KMSAlias",
            "--pass-thru",
            "--select",
            "*",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn given_nested_field_when_building_then_flag_flattens_parent_and_child() {
        let op = catalog::find("New-KNDRRescoreExecutionPlan").unwrap();
        let matches = matches_for(
            op,
            &["--name", "p", "--capacity-units-rescore-capacity-units", "2"],
        );
        let params = bind_parameters(op, &matches);
        assert_eq!(
            params.get("CapacityUnits_RescoreCapacityUnits"),
            Some(&["2".to_string()][..])
        );
    }
}
