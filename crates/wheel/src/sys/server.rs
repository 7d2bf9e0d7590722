use crate::events::AppEvent;
use async_channel::Sender;
use tickwheel::ipc::{Command, SOCKET_PATH};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::net::{UnixListener, UnixStream};

async fn handle_connection(mut stream: UnixStream, tx: Sender<AppEvent>) {
    let reader = BufReader::new(&mut stream);
    let mut lines = reader.lines();

    while let Ok(Some(line)) = lines.next_line().await {
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Command>() {
            Ok(command) => {
                log::debug!("Received '{}'", command);
                if tx.send(AppEvent::Command(command)).await.is_err() {
                    return;
                }
            }
            Err(e) => log::warn!("Ignoring '{}': {}", line.trim(), e),
        }
    }
}

pub async fn run_server(tx: Sender<AppEvent>) {
    // Stale socket from a previous run
    if fs_err::metadata(SOCKET_PATH).is_ok()
        && let Err(e) = fs_err::remove_file(SOCKET_PATH)
    {
        log::warn!("{}", e);
    }

    let listener = match UnixListener::bind(SOCKET_PATH) {
        Ok(l) => l,
        Err(e) => {
            log::error!("Failed to bind unix socket: {}", e);
            return;
        }
    };
    log::info!("Listening on {}", SOCKET_PATH);

    loop {
        match listener.accept().await {
            Ok((stream, _)) => {
                tokio::spawn(handle_connection(stream, tx.clone()));
            }
            Err(e) => {
                log::error!("Failed to accept connection: {}", e);
            }
        }
    }
}
