//! Operator interruption handling.

use log::{error, warn};
use tokio_util::sync::CancellationToken;

/// Cancels `cancel` on Ctrl-C (and SIGTERM on unix).
///
/// The batch loop observes the token between requests and during waits, then
/// goes through its normal final save. The listener task ends with the
/// first signal or when the token is cancelled by someone else.
pub fn spawn_signal_listener(cancel: CancellationToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        tokio::select! {
            signal = shutdown_signal() => {
                match signal {
                    Ok(name) => warn!("Received {}, stopping after the current record", name),
                    Err(e) => {
                        error!("Failed to listen for shutdown signals: {}", e);
                        return;
                    }
                }
                cancel.cancel();
            }
            _ = cancel.cancelled() => {}
        }
    })
}

#[cfg(unix)]
async fn shutdown_signal() -> std::io::Result<&'static str> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        result = tokio::signal::ctrl_c() => result.map(|_| "Ctrl-C"),
        _ = terminate.recv() => Ok("SIGTERM"),
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() -> std::io::Result<&'static str> {
    tokio::signal::ctrl_c().await.map(|_| "Ctrl-C")
}
