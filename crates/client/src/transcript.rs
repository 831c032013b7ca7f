//! JSON-lines battle transcript.
//!
//! Subscribes to every runtime topic and appends each event as one JSON
//! object per line until the battle ends. Order is kept within a topic;
//! across topics it is only as close as the writer keeps up.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio::sync::broadcast::{self, error::RecvError};
use tokio::task::JoinHandle;

use runtime::{Event, EventBus, Topic, TurnEvent};

pub struct Transcript;

impl Transcript {
    /// Subscribes right away, then writes in the background. The task
    /// resolves to the number of events written.
    pub async fn start(bus: &EventBus, path: &Path) -> Result<JoinHandle<Result<usize>>> {
        let file = File::create(path)
            .await
            .with_context(|| format!("Failed to create transcript {}", path.display()))?;
        let turns = bus.subscribe(Topic::Turn).await;
        let combat = bus.subscribe(Topic::Combat).await;
        let path = path.to_path_buf();

        Ok(tokio::spawn(async move {
            write_events(BufWriter::new(file), turns, combat, path).await
        }))
    }
}

async fn write_events(
    mut out: BufWriter<File>,
    mut turns: broadcast::Receiver<Event>,
    mut combat: broadcast::Receiver<Event>,
    path: PathBuf,
) -> Result<usize> {
    let mut written = 0;

    loop {
        // Combat first: a turn's resolution is published before the next
        // turn event, so the battle-ended event is always read last.
        let received = tokio::select! {
            biased;
            event = combat.recv() => event,
            event = turns.recv() => event,
        };

        let event = match received {
            Ok(event) => event,
            Err(RecvError::Lagged(skipped)) => {
                tracing::warn!("Transcript skipped {} events", skipped);
                continue;
            }
            Err(RecvError::Closed) => break,
        };

        let mut line = serde_json::to_string(&event)?;
        line.push('\n');
        out.write_all(line.as_bytes())
            .await
            .with_context(|| format!("Failed to write transcript {}", path.display()))?;
        written += 1;

        if matches!(event, Event::Turn(TurnEvent::Ended(_))) {
            break;
        }
    }

    out.flush().await?;
    tracing::info!("Transcript written: {} events to {}", written, path.display());
    Ok(written)
}
