use crate::events::AppEvent;
use async_channel::Sender;
use std::thread;
use tokio::runtime::Runtime;

/// Runs the control socket and the config watcher on a tokio runtime owned by a
/// background thread; both report back to the GTK side through `tx`.
pub fn start_background_services(tx: Sender<AppEvent>) {
    let spawned = thread::Builder::new()
        .name("wheel-services".into())
        .spawn(move || {
            let rt = match Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    log::error!("Failed to create Tokio runtime: {}", e);
                    return;
                }
            };

            rt.block_on(async {
                tokio::join!(
                    crate::sys::server::run_server(tx.clone()),
                    crate::config::run_async_watcher(tx),
                );
            });
            log::debug!("Background services stopped");
        });

    if let Err(e) = spawned {
        log::error!("Failed to start background services: {}", e);
    }
}
