use tokio::sync::oneshot;

/// Handle the runtime awaits until the presentation layer finishes an effect.
#[derive(Debug)]
pub struct Completion(Option<oneshot::Receiver<()>>);

/// Sending half of a [`Completion`], held by the presentation layer.
#[derive(Debug)]
pub struct CompletionSignal(oneshot::Sender<()>);

impl Completion {
    /// An effect that is already done.
    pub fn ready() -> Self {
        Self(None)
    }

    /// A pending effect and the signal that finishes it.
    pub fn pending() -> (CompletionSignal, Self) {
        let (tx, rx) = oneshot::channel();
        (CompletionSignal(tx), Self(Some(rx)))
    }

    /// Waits for the effect. Returns `false` when the signal was dropped
    /// without completing.
    pub async fn wait(self) -> bool {
        match self.0 {
            None => true,
            Some(rx) => rx.await.is_ok(),
        }
    }
}

impl CompletionSignal {
    pub fn complete(self) {
        // The runtime may have stopped waiting; nothing to do then.
        let _ = self.0.send(());
    }
}

/// Waits for every completion. Returns how many were dropped unsignalled.
pub async fn join_all(completions: impl IntoIterator<Item = Completion>) -> usize {
    let mut dropped = 0;
    for completion in completions {
        if !completion.wait().await {
            dropped += 1;
        }
    }
    dropped
}
