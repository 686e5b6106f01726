//! I/O boundary traits for testability
//!
//! These traits abstract the service call and the interactive prompt,
//! allowing the driver to be tested with mock implementations.

use std::io::{self, BufRead, IsTerminal, Write};

use serde_json::Value;
use tracing::warn;

use crate::domain::Operation;
use crate::infrastructure::error::CallError;

/// Sends one request to the service behind an operation.
pub trait Transport: Send + Sync {
    /// Invoke `op` with the given request body and return the response body.
    fn invoke(&self, op: &Operation, body: &Value) -> Result<Value, CallError>;
}

/// Asks the user to confirm a mutating operation.
pub trait Confirmer: Send + Sync {
    /// Returns `Ok(true)` if the user agreed.
    fn confirm(&self, prompt: &str) -> io::Result<bool>;
}

/// Prompt on stderr, read the answer from stdin.
pub struct TerminalConfirmer;

impl Confirmer for TerminalConfirmer {
    fn confirm(&self, prompt: &str) -> io::Result<bool> {
        let stdin = io::stdin();
        if !stdin.is_terminal() {
            warn!("stdin is not a terminal, cannot confirm; pass --force to proceed");
            return Ok(false);
        }

        let mut stderr = io::stderr();
        write!(stderr, "{prompt} [y/N] ")?;
        stderr.flush()?;

        let mut answer = String::new();
        stdin.lock().read_line(&mut answer)?;
        Ok(is_yes(&answer))
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}
