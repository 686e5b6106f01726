//! Shared driver for every wrapped operation
//!
//! build request → warn on unbound required parameters → confirm →
//! invoke (or paginate) → project the response.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, info, warn};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::request::insert_at_path;
use crate::domain::select::{echo_parameter, lookup};
use crate::domain::{
    build_request, paginate, BoundParameters, Collected, ConfirmImpact, Operation, PageRequest,
    Paging, PagingPlan, Selection,
};
use crate::infrastructure::traits::{Confirmer, Transport};
use crate::infrastructure::CallError;

/// Per-invocation switches; nothing here outlives one run.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Skip the confirmation prompt
    pub force: bool,
    /// `--select` expression; overrides the operation default
    pub select: Option<String>,
    /// Legacy `--pass-thru`: echo the operation's pass-thru parameter
    pub pass_thru: bool,
    pub paging: PagingPlan,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// The user declined; nothing was sent.
    Declined,
    Completed {
        output: Value,
        /// Token to continue from, reported in manual paging mode
        next_token: Option<String>,
    },
}

pub struct OperationRunner {
    transport: Arc<dyn Transport>,
    confirmer: Arc<dyn Confirmer>,
    /// Operations at or above this impact prompt unless forced
    confirm_impact: ConfirmImpact,
    stop: Arc<AtomicBool>,
}

impl OperationRunner {
    pub fn new(
        transport: Arc<dyn Transport>,
        confirmer: Arc<dyn Confirmer>,
        confirm_impact: ConfirmImpact,
    ) -> Self {
        Self {
            transport,
            confirmer,
            confirm_impact,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Share an externally owned stop flag, e.g. one raised by an interrupt listener.
    pub fn with_stop(mut self, stop: Arc<AtomicBool>) -> Self {
        self.stop = stop;
        self
    }

    /// Flag checked between pages; setting it ends auto-pagination early.
    pub fn stop_handle(&self) -> Arc<AtomicBool> {
        self.stop.clone()
    }

    pub fn run(
        &self,
        op: &Operation,
        params: &BoundParameters,
        options: &RunOptions,
    ) -> ApplicationResult<Outcome> {
        let selection = self.selection(op, options)?;
        let request = build_request(op, params)?;
        for param in &request.missing_required {
            warn!("{}: required parameter {} is not set", op.command, param);
        }

        if !options.force && self.needs_confirmation(op) {
            let prompt = confirmation_prompt(op, params);
            if !self.confirmer.confirm(&prompt).map_err(ApplicationError::Prompt)? {
                info!("{}: cancelled, nothing sent", op.command);
                return Ok(Outcome::Declined);
            }
        }

        let body = request.body;
        match op.paging {
            Some(paging) => self.run_paged(op, &paging, body, params, &selection, &options.paging),
            None => {
                let response = self.transport.invoke(op, &Value::Object(body))?;
                let output = selection.project(op, &response, params)?;
                Ok(Outcome::Completed {
                    output,
                    next_token: None,
                })
            }
        }
    }

    fn needs_confirmation(&self, op: &Operation) -> bool {
        self.confirm_impact != ConfirmImpact::None
            && op.is_mutating()
            && op.impact >= self.confirm_impact
    }

    fn selection(&self, op: &Operation, options: &RunOptions) -> ApplicationResult<Selection> {
        let expr = match (&options.select, options.pass_thru, op.pass_thru) {
            (Some(expr), _, _) => expr.clone(),
            (None, true, Some(param)) => format!("^{param}"),
            _ => op.select.to_string(),
        };
        Ok(Selection::parse(&expr, op)?)
    }

    fn run_paged(
        &self,
        op: &Operation,
        paging: &Paging,
        body: Map<String, Value>,
        params: &BoundParameters,
        selection: &Selection,
        plan: &PagingPlan,
    ) -> ApplicationResult<Outcome> {
        let collected: Collected<CallError> =
            paginate(paging, plan, &self.stop, |page: &PageRequest| {
                let mut request = body.clone();
                if let Some(token) = &page.token {
                    insert_at_path(&mut request, paging.input_token, Value::String(token.clone()));
                }
                if let Some(size) = page.page_size {
                    insert_at_path(&mut request, paging.page_size, Value::from(size));
                }
                self.transport.invoke(op, &Value::Object(request))
            })?;
        debug!(
            "{}: {} items over {} pages",
            op.command,
            collected.items.len(),
            collected.pages.len()
        );

        let output = match selection {
            Selection::Parameter(param) => echo_parameter(op, params, param)?,
            Selection::Response => single_or_all(collected.pages),
            Selection::Property(path) if path.eq_ignore_ascii_case(paging.items) => {
                Value::Array(collected.items)
            }
            Selection::Property(path) => single_or_all(
                collected
                    .pages
                    .iter()
                    .filter_map(|page| lookup(page, path))
                    .filter(|v| !v.is_null())
                    .cloned()
                    .collect(),
            ),
        };

        Ok(Outcome::Completed {
            output,
            next_token: if plan.manual { collected.next_token } else { None },
        })
    }
}

/// One page stays itself; several become an array.
fn single_or_all(mut values: Vec<Value>) -> Value {
    match values.len() {
        0 => Value::Null,
        1 => values.remove(0),
        _ => Value::Array(values),
    }
}

fn confirmation_prompt(op: &Operation, params: &BoundParameters) -> String {
    let target = op
        .confirm_target()
        .and_then(|param| echo_parameter(op, params, param).ok())
        .map(|value| match value {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        })
        .unwrap_or_default();
    format!(
        "Performing the operation \"{} ({})\" on target \"{}\". Continue?",
        op.command, op.name, target
    )
}
