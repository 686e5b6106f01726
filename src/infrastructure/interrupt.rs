//! Ctrl+C handling for paged listings
//!
//! The first interrupt (or SIGTERM) sets the runner's stop flag: the page in
//! flight completes and the items collected so far are printed. A second
//! interrupt exits at once.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;

use tokio::runtime;
use tracing::{debug, warn};

use crate::exitcode;
use crate::infrastructure::error::{InfraError, InfraResult};

/// Listen for interrupts on a background thread and raise `stop` on the first one.
pub fn stop_on_interrupt(stop: Arc<AtomicBool>) -> InfraResult<()> {
    let rt = runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| InfraError::io("start interrupt listener", e))?;

    thread::Builder::new()
        .name("interrupt".into())
        .spawn(move || rt.block_on(listen(stop)))
        .map_err(|e| InfraError::io("spawn interrupt listener", e))?;
    debug!("interrupt listener installed");
    Ok(())
}

async fn listen(stop: Arc<AtomicBool>) {
    shutdown_signal().await;
    warn!("interrupted: stopping after the current page (interrupt again to abort)");
    stop.store(true, Ordering::Relaxed);

    shutdown_signal().await;
    std::process::exit(exitcode::INTERRUPTED);
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            debug!("Ctrl+C handler unavailable: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                debug!("SIGTERM handler unavailable: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
