use tokio::sync::watch;

/// What asked for a reload, for the logs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ReloadTrigger {
    Startup,
    Signal,
    Manual,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReloadEvent {
    /// Number of reloads requested so far; 0 is the initial state.
    pub generation: u64,
    pub trigger: ReloadTrigger,
}

/// Fans reload requests (SIGHUP) out to whoever rebuilds the runtime state.
///
/// Only the latest request is kept: several signals arriving while a reload
/// is running result in one more reload, not one per signal.
#[derive(Clone)]
pub struct ReloadHandle {
    tx: watch::Sender<ReloadEvent>,
}

impl Default for ReloadHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl ReloadHandle {
    pub fn new() -> Self {
        let (tx, _) = watch::channel(ReloadEvent {
            generation: 0,
            trigger: ReloadTrigger::Startup,
        });
        Self { tx }
    }

    pub fn subscribe(&self) -> watch::Receiver<ReloadEvent> {
        self.tx.subscribe()
    }

    pub fn request(&self, trigger: ReloadTrigger) -> u64 {
        let mut generation = 0;
        self.tx.send_modify(|event| {
            event.generation += 1;
            event.trigger = trigger;
            generation = event.generation;
        });
        tracing::info!(generation, trigger = ?trigger, "reload requested");
        generation
    }

    pub async fn install_signal_handler(&self) -> anyhow::Result<()> {
        use tokio::signal::unix::{SignalKind, signal};

        let mut hup = signal(SignalKind::hangup())?;
        while hup.recv().await.is_some() {
            self.request(ReloadTrigger::Signal);
        }
        Ok(())
    }
}
