//! Service container for dependency injection
//!
//! Wires the operation runner to its transport and confirmation prompt.

use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use crate::application::services::OperationRunner;
use crate::config::Settings;
use crate::infrastructure::aws::{AwsJsonTransport, ConnectionOptions};
use crate::infrastructure::error::InfraResult;
use crate::infrastructure::traits::{Confirmer, TerminalConfirmer, Transport};

/// Container holding all application services.
pub struct ServiceContainer {
    /// Application settings
    pub settings: Arc<Settings>,

    /// Service call abstraction
    pub transport: Arc<dyn Transport>,

    /// Interactive confirmation
    pub confirmer: Arc<dyn Confirmer>,

    /// Raised on interrupt; every runner from this container checks it between pages
    pub stop: Arc<AtomicBool>,
}

impl ServiceContainer {
    /// Create a new service container with real implementations.
    pub fn new(settings: Settings, options: ConnectionOptions) -> InfraResult<Self> {
        let settings = Arc::new(settings);
        let transport = AwsJsonTransport::new(settings.clone(), options)?;
        Ok(Self {
            settings,
            transport: Arc::new(transport),
            confirmer: Arc::new(TerminalConfirmer),
            stop: Arc::new(AtomicBool::new(false)),
        })
    }

    /// Create a service container with custom dependencies (for testing).
    pub fn with_deps(
        settings: Settings,
        transport: Arc<dyn Transport>,
        confirmer: Arc<dyn Confirmer>,
    ) -> Self {
        Self {
            settings: Arc::new(settings),
            transport,
            confirmer,
            stop: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn runner(&self) -> OperationRunner {
        OperationRunner::new(
            self.transport.clone(),
            self.confirmer.clone(),
            self.settings.confirm_impact,
        )
        .with_stop(self.stop.clone())
    }
}
