//! Auto-pagination of list operations.
//!
//! Pages are fetched while the service returns a continuation token and the
//! item budget is not exhausted. A failure after items were collected under a
//! budget ends the loop with what was gathered so far, unless the policy says
//! otherwise.

use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::operation::Paging;
use crate::domain::select::lookup;

/// What to do when a page fails after some items were already collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PartialFailure {
    /// Return the collected items if a budget was given (observed behavior)
    #[default]
    ReturnCollected,
    /// Always surface the error
    Fail,
}

/// Caller side of one paginated run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PagingPlan {
    /// Continuation token to start from
    pub start_token: Option<String>,
    /// Maximum number of items to return
    pub max_items: Option<u64>,
    /// Fetch a single page and report the next token
    pub manual: bool,
    pub partial_failure: PartialFailure,
}

/// Token and page size for one page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub token: Option<String>,
    pub page_size: Option<u32>,
}

/// Result of a paginated run.
#[derive(Debug)]
pub struct Collected<E> {
    /// Raw page responses in order
    pub pages: Vec<Value>,
    /// Items across all pages, trimmed to the budget
    pub items: Vec<Value>,
    /// Token to resume from, if the service had more
    pub next_token: Option<String>,
    /// Error that ended the run early, when it was swallowed
    pub interrupted: Option<E>,
}

impl<E> Default for Collected<E> {
    fn default() -> Self {
        Self {
            pages: Vec::new(),
            items: Vec::new(),
            next_token: None,
            interrupted: None,
        }
    }
}

/// Run the pagination loop, calling `fetch` once per page.
///
/// `stop` is checked between pages; when set, the loop returns what it has.
pub fn paginate<E, F>(
    paging: &Paging,
    plan: &PagingPlan,
    stop: &AtomicBool,
    mut fetch: F,
) -> Result<Collected<E>, E>
where
    E: std::fmt::Display,
    F: FnMut(&PageRequest) -> Result<Value, E>,
{
    let mut collected = Collected::default();
    let mut token = plan.start_token.clone();
    let mut remaining = plan.max_items;

    if remaining == Some(0) {
        collected.next_token = token;
        return Ok(collected);
    }

    loop {
        let request = PageRequest {
            token: token.clone(),
            page_size: remaining.map(|r| r.min(u64::from(paging.max_page_size)) as u32),
        };
        debug!(
            "page {}: token={:?} size={:?}",
            collected.pages.len() + 1,
            request.token,
            request.page_size
        );

        let response = match fetch(&request) {
            Ok(response) => response,
            Err(e) => {
                let swallow = !collected.items.is_empty()
                    && remaining.is_some()
                    && plan.partial_failure == PartialFailure::ReturnCollected;
                if !swallow {
                    return Err(e);
                }
                warn!(
                    "page request failed after {} items, returning those: {}",
                    collected.items.len(),
                    e
                );
                collected.interrupted = Some(e);
                break;
            }
        };

        let mut items = page_items(&response, paging.items);
        if let Some(left) = remaining {
            items.truncate(usize::try_from(left).unwrap_or(usize::MAX));
            remaining = Some(left - items.len() as u64);
        }
        token = next_token(&response, paging.output_token);
        collected.items.extend(items);
        collected.pages.push(response);

        if plan.manual || token.is_none() || remaining == Some(0) {
            break;
        }
        if stop.load(Ordering::Relaxed) {
            warn!(
                "stopped after {} pages: returning {} items collected so far",
                collected.pages.len(),
                collected.items.len()
            );
            break;
        }
    }

    collected.next_token = token;
    Ok(collected)
}

fn page_items(response: &Value, path: &str) -> Vec<Value> {
    match lookup(response, path) {
        Some(Value::Array(items)) => items.clone(),
        Some(Value::Null) | None => Vec::new(),
        Some(other) => vec![other.clone()],
    }
}

fn next_token(response: &Value, path: &str) -> Option<String> {
    lookup(response, path)
        .and_then(Value::as_str)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const PAGING: Paging = Paging::marker("Keys", 3);

    /// Backend holding `total` items, serving up to `per_page` per call.
    fn backend(total: usize, per_page: usize) -> impl FnMut(&PageRequest) -> Result<Value, String> {
        move |req: &PageRequest| {
            let start: usize = req.token.as_deref().map_or(0, |t| t.parse().unwrap());
            let size = req.page_size.map_or(per_page, |s| (s as usize).min(per_page));
            let end = (start + size).min(total);
            let keys: Vec<Value> = (start..end).map(|i| json!({ "KeyId": i })).collect();
            let mut page = json!({ "Keys": keys });
            if end < total {
                page["NextMarker"] = json!(end.to_string());
            }
            Ok(page)
        }
    }

    #[test]
    fn given_no_budget_when_paginating_then_fetches_until_token_runs_out() {
        let stop = AtomicBool::new(false);
        let result = paginate(&PAGING, &PagingPlan::default(), &stop, backend(7, 3)).unwrap();
        assert_eq!(result.items.len(), 7);
        assert_eq!(result.pages.len(), 3);
        assert_eq!(result.next_token, None);
    }

    #[test]
    fn given_budget_when_paginating_then_page_size_is_min_of_max_and_remaining() {
        let stop = AtomicBool::new(false);
        let mut sizes = Vec::new();
        let mut inner = backend(100, 3);
        let plan = PagingPlan {
            max_items: Some(5),
            ..Default::default()
        };

        let result = paginate(&PAGING, &plan, &stop, |req: &PageRequest| {
            sizes.push(req.page_size);
            inner(req)
        })
        .unwrap();

        assert_eq!(sizes, vec![Some(3), Some(2)]);
        assert_eq!(result.items.len(), 5);
        assert_eq!(result.next_token.as_deref(), Some("5"));
    }

    #[test]
    fn given_manual_mode_when_paginating_then_fetches_one_page_and_reports_token() {
        let stop = AtomicBool::new(false);
        let plan = PagingPlan {
            manual: true,
            start_token: Some("3".into()),
            ..Default::default()
        };
        let result = paginate(&PAGING, &plan, &stop, backend(10, 3)).unwrap();
        assert_eq!(result.pages.len(), 1);
        assert_eq!(result.items[0], json!({"KeyId": 3}));
        assert_eq!(result.next_token.as_deref(), Some("6"));
    }

    #[test]
    fn given_zero_budget_when_paginating_then_sends_nothing() {
        let stop = AtomicBool::new(false);
        let plan = PagingPlan {
            max_items: Some(0),
            ..Default::default()
        };
        let result = paginate(&PAGING, &plan, &stop, |_: &PageRequest| -> Result<Value, String> {
            panic!("no request expected")
        })
        .unwrap();
        assert!(result.items.is_empty());
    }

    #[test]
    fn given_service_overfills_page_when_paginating_then_trims_to_budget() {
        let stop = AtomicBool::new(false);
        let plan = PagingPlan {
            max_items: Some(2),
            ..Default::default()
        };
        let result = paginate(&PAGING, &plan, &stop, |_: &PageRequest| {
            Ok::<_, String>(json!({"Keys": [1, 2, 3], "NextMarker": "x"}))
        })
        .unwrap();
        assert_eq!(result.items, vec![json!(1), json!(2)]);
        assert_eq!(result.pages.len(), 1);
    }

    #[test]
    fn given_stop_flag_when_paginating_then_returns_after_current_page() {
        let stop = AtomicBool::new(true);
        let result = paginate(&PAGING, &PagingPlan::default(), &stop, backend(9, 3)).unwrap();
        assert_eq!(result.pages.len(), 1);
        assert_eq!(result.next_token.as_deref(), Some("3"));
    }

    #[test]
    fn given_first_page_fails_when_paginating_then_surfaces_error() {
        let stop = AtomicBool::new(false);
        let plan = PagingPlan {
            max_items: Some(10),
            ..Default::default()
        };
        let err = paginate(&PAGING, &plan, &stop, |_: &PageRequest| {
            Err::<Value, _>("boom".to_string())
        })
        .unwrap_err();
        assert_eq!(err, "boom");
    }

    fn failing_on_second_page() -> impl FnMut(&PageRequest) -> Result<Value, String> {
        let mut inner = backend(100, 3);
        let mut calls = 0;
        move |req: &PageRequest| {
            calls += 1;
            if calls == 2 {
                return Err("throttled".to_string());
            }
            inner(req)
        }
    }

    #[test]
    fn given_later_page_fails_under_budget_when_paginating_then_returns_collected() {
        let stop = AtomicBool::new(false);
        let plan = PagingPlan {
            max_items: Some(10),
            ..Default::default()
        };
        let result = paginate(&PAGING, &plan, &stop, failing_on_second_page()).unwrap();
        assert_eq!(result.items.len(), 3);
        assert_eq!(result.interrupted.as_deref(), Some("throttled"));
    }

    #[test]
    fn given_later_page_fails_without_budget_when_paginating_then_surfaces_error() {
        let stop = AtomicBool::new(false);
        let result = paginate(&PAGING, &PagingPlan::default(), &stop, failing_on_second_page());
        assert_eq!(result.unwrap_err(), "throttled");
    }

    #[test]
    fn given_fail_policy_when_later_page_fails_then_surfaces_error() {
        let stop = AtomicBool::new(false);
        let plan = PagingPlan {
            max_items: Some(10),
            partial_failure: PartialFailure::Fail,
            ..Default::default()
        };
        let result = paginate(&PAGING, &plan, &stop, failing_on_second_page());
        assert!(result.is_err());
    }
}
