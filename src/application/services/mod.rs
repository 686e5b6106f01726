//! Application services

pub mod runner;

pub use runner::{OperationRunner, Outcome, RunOptions};
