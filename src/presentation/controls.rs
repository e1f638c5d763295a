// User controls read from stdin
use crate::application::dashboard_service::DashboardService;
use std::io::BufRead;
use tokio::sync::mpsc;
use tokio_stream::{Stream, StreamExt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    TogglePause,
    Quit,
}

impl Command {
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "" | "p" | "pause" | "resume" => Some(Self::TogglePause),
            "q" | "quit" | "exit" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// Read stdin on a dedicated thread so a pending read never holds up runtime shutdown.
pub fn spawn_stdin_reader() -> std::io::Result<mpsc::Receiver<String>> {
    let (tx, rx) = mpsc::channel(16);

    std::thread::Builder::new()
        .name("stdin-controls".to_string())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                match line {
                    Ok(line) => {
                        if tx.blocking_send(line).is_err() {
                            break;
                        }
                    }
                    Err(e) => {
                        tracing::warn!("stopped reading controls: {}", e);
                        break;
                    }
                }
            }
        })?;

    Ok(rx)
}

/// Turn input lines into commands. Closing the input counts as quitting.
pub fn commands(mut lines: mpsc::Receiver<String>) -> impl Stream<Item = Command> {
    async_stream::stream! {
        while let Some(line) = lines.recv().await {
            match Command::parse(&line) {
                Some(command) => yield command,
                None => tracing::warn!("unknown command {:?}; use p to pause/resume, q to quit", line),
            }
        }
        yield Command::Quit;
    }
}

/// Apply commands to the service until a quit arrives.
pub async fn run_controls<S>(commands: S, service: &DashboardService)
where
    S: Stream<Item = Command>,
{
    tokio::pin!(commands);
    while let Some(command) = commands.next().await {
        match command {
            Command::TogglePause => {
                service.toggle_pause();
            }
            Command::Quit => {
                tracing::info!("quit requested");
                break;
            }
        }
    }
}
