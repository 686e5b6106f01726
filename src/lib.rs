//! awsops: AWS API operations as command-line subcommands
//!
//! Every wrapped operation is a static descriptor in [`catalog`]; one
//! shared driver ([`application::services::OperationRunner`]) builds the
//! request, confirms, calls, paginates and projects the output.

pub mod application;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
