//! Hand-written test doubles for the service call and the prompt.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};

use awsops::domain::Operation;
use awsops::infrastructure::traits::{Confirmer, Transport};
use awsops::infrastructure::CallError;

/// Records every request; answers from a queue, then with `{}`.
#[derive(Default)]
pub struct MockTransport {
    pub requests: Mutex<Vec<(String, Value)>>,
    responses: Mutex<VecDeque<Result<Value, CallError>>>,
    /// Raised while a request is in flight, like an interrupt arriving mid-fetch
    raise_on_invoke: Mutex<Option<Arc<AtomicBool>>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, response: Value) -> Self {
        self.responses.lock().unwrap().push_back(Ok(response));
        self
    }

    pub fn fail(self, code: &str) -> Self {
        self.responses.lock().unwrap().push_back(Err(CallError::Service {
            code: code.to_string(),
            message: "injected".to_string(),
            status: 400,
            request_id: None,
        }));
        self
    }

    pub fn raise_on_invoke(&self, flag: Arc<AtomicBool>) {
        *self.raise_on_invoke.lock().unwrap() = Some(flag);
    }

    /// Request bodies in call order.
    pub fn bodies(&self) -> Vec<Value> {
        self.requests.lock().unwrap().iter().map(|(_, b)| b.clone()).collect()
    }

    pub fn targets(&self) -> Vec<String> {
        self.requests.lock().unwrap().iter().map(|(t, _)| t.clone()).collect()
    }
}

impl Transport for MockTransport {
    fn invoke(&self, op: &Operation, body: &Value) -> Result<Value, CallError> {
        self.requests.lock().unwrap().push((op.target(), body.clone()));
        if let Some(flag) = self.raise_on_invoke.lock().unwrap().as_ref() {
            flag.store(true, Ordering::Relaxed);
        }
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(json!({})))
    }
}

/// Answers every prompt the same way and remembers the prompts.
pub struct MockConfirmer {
    answer: bool,
    pub prompts: Mutex<Vec<String>>,
}

impl MockConfirmer {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompt_count(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }
}

impl Confirmer for MockConfirmer {
    fn confirm(&self, prompt: &str) -> io::Result<bool> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        Ok(self.answer)
    }
}
