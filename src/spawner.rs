//! The background-task spawner the engine consumes rather than owns.

use std::future::Future;
use std::pin::Pin;

use crate::error::SpawnError;

/// Something that can run a future to completion in the background.
///
/// Injected so the decision worker's self-rescheduling loop doesn't hard-code
/// a `tokio::spawn` call, letting a host embed this engine on whatever
/// runtime/executor it already drives. Spawning is the one operation in this
/// crate that can genuinely fail (no ambient runtime to spawn onto); callers
/// treat `Err` exactly as a failed idempotent retry, per §7.
pub trait Spawner: Send + Sync + 'static {
    fn spawn(&self, future: Pin<Box<dyn Future<Output = ()> + Send>>) -> Result<(), SpawnError>;
}

/// Spawns onto the ambient Tokio runtime via [`tokio::spawn`].
#[derive(Clone, Copy, Debug, Default)]
pub struct TokioSpawner;

impl Spawner for TokioSpawner {
    fn spawn(&self, future: Pin<Box<dyn Future<Output = ()> + Send>>) -> Result<(), SpawnError> {
        let handle = tokio::runtime::Handle::try_current().map_err(|_| SpawnError::NoRuntime)?;
        handle.spawn(future);
        Ok(())
    }
}
