use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::signal;
use tokio::sync::broadcast;
use tracing::info;

/// Fans a single shutdown trigger out to every interested task.
///
/// The trigger is either an OS signal (SIGTERM, SIGINT) picked up by
/// [`wait_for_signal`](Self::wait_for_signal) or a direct call to
/// [`shutdown`](Self::shutdown). Whichever fires first wins; later triggers
/// are ignored.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    /// Notifies subscribed tasks that shutdown began
    notify: broadcast::Sender<()>,
    /// Latched once the first trigger lands
    entered: Arc<AtomicBool>,
}

impl ShutdownCoordinator {
    /// Coordinator plus the first subscription to its shutdown broadcast
    pub fn new() -> (Self, broadcast::Receiver<()>) {
        let (notify, rx) = broadcast::channel(1);
        let coordinator = Self {
            notify,
            entered: Arc::new(AtomicBool::new(false)),
        };
        (coordinator, rx)
    }

    /// Has a shutdown trigger already landed?
    pub fn is_shutting_down(&self) -> bool {
        self.entered.load(Ordering::Relaxed)
    }

    /// Trigger shutdown. Only the first call broadcasts.
    pub fn shutdown(&self) {
        if self
            .entered
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            info!("Initiating graceful shutdown");
            let _ = self.notify.send(());
        }
    }

    /// Block until SIGINT or SIGTERM arrives, then trigger shutdown
    pub async fn wait_for_signal(&self) {
        let ctrl_c = async {
            signal::ctrl_c()
                .await
                .expect("failed to install Ctrl+C handler");
        };

        #[cfg(unix)]
        let terminate = async {
            signal::unix::signal(signal::unix::SignalKind::terminate())
                .expect("failed to install SIGTERM handler")
                .recv()
                .await;
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            _ = ctrl_c => {
                info!("SIGINT received, shutting down");
            },
            _ = terminate => {
                info!("SIGTERM received, shutting down");
            },
        }

        self.shutdown();
    }
}

/// The future handed to axum's `with_graceful_shutdown`: resolves once a
/// shutdown trigger lands, after which axum drains in-flight requests.
pub(crate) async fn coordinated_shutdown(coordinator: ShutdownCoordinator) {
    coordinator.wait_for_signal().await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_only_first_trigger_broadcasts() {
        let (coordinator, mut rx) = ShutdownCoordinator::new();
        assert!(!coordinator.is_shutting_down());

        coordinator.shutdown();
        assert!(coordinator.is_shutting_down());
        rx.recv().await.unwrap();

        coordinator.shutdown();
        assert!(rx.try_recv().is_err());
    }
}
