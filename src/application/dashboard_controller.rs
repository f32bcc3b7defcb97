// Dashboard controller - Owns the view state and drives fetch/build cycles
use crate::application::sample_source::{FetchError, SampleSource};
use crate::application::series_builder::SeriesBuilder;
use crate::domain::sample::RawSample;
use crate::domain::view_state::{reduce, ViewEvent, ViewState};
use chrono::Utc;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{mpsc, watch};

const COMMAND_BUFFER: usize = 16;

enum Command {
    Reload,
    Fetched(Result<Vec<RawSample>, FetchError>),
}

#[derive(Debug, Error)]
#[error("dashboard controller has stopped")]
pub struct ControllerStopped;

/// Cheap handle used by HTTP handlers to read state and request reloads.
#[derive(Clone)]
pub struct DashboardHandle {
    commands: mpsc::Sender<Command>,
    state: watch::Receiver<ViewState>,
}

impl DashboardHandle {
    pub async fn reload(&self) -> Result<(), ControllerStopped> {
        self.commands
            .send(Command::Reload)
            .await
            .map_err(|_| ControllerStopped)
    }

    pub fn snapshot(&self) -> ViewState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.state.clone()
    }

    /// Handle whose controller task has already exited.
    #[cfg(test)]
    pub fn stopped() -> Self {
        let (commands, _) = mpsc::channel(1);
        let (_, state) = watch::channel(ViewState::default());
        Self { commands, state }
    }
}

pub struct DashboardController {
    source: Arc<dyn SampleSource>,
    builder: SeriesBuilder,
    state: watch::Sender<ViewState>,
    commands: mpsc::WeakSender<Command>,
}

impl DashboardController {
    /// Start the controller task and trigger the initial load.
    pub fn spawn(source: Arc<dyn SampleSource>, builder: SeriesBuilder) -> DashboardHandle {
        let (tx, rx) = mpsc::channel(COMMAND_BUFFER);
        let (state_tx, state_rx) = watch::channel(ViewState::default());

        let controller = Self {
            source,
            builder,
            state: state_tx,
            commands: tx.downgrade(),
        };
        tokio::spawn(controller.run(rx));

        DashboardHandle {
            commands: tx,
            state: state_rx,
        }
    }

    async fn run(self, mut rx: mpsc::Receiver<Command>) {
        self.dispatch(ViewEvent::Mounted);
        self.start_fetch();

        while let Some(command) = rx.recv().await {
            match command {
                Command::Reload => {
                    if self.state.borrow().loading {
                        tracing::debug!("Reload ignored, a fetch is already in flight");
                        continue;
                    }
                    self.dispatch(ViewEvent::ReloadRequested);
                    self.start_fetch();
                }
                Command::Fetched(result) => self.complete(result),
            }
        }

        tracing::debug!("Dashboard controller stopped");
    }

    fn start_fetch(&self) {
        let Some(tx) = self.commands.upgrade() else {
            return;
        };
        let source = self.source.clone();

        tokio::spawn(async move {
            let result = source.fetch().await;
            let _ = tx.send(Command::Fetched(result)).await;
        });
    }

    fn complete(&self, result: Result<Vec<RawSample>, FetchError>) {
        let samples = match result {
            Ok(samples) => samples,
            Err(e) => {
                tracing::error!("Error fetching temperatures: {}", e);
                self.dispatch(ViewEvent::LoadFailed);
                return;
            }
        };

        let (bounds, last_id) = {
            let state = self.state.borrow();
            (state.bounds, state.last_id)
        };

        match self.builder.build(&samples, bounds, last_id, Utc::now()) {
            Ok(build) => {
                tracing::info!(
                    fetched = samples.len(),
                    plotted = build.series[0].data.len(),
                    last_id = build.last_id,
                    "Temperatures loaded"
                );
                self.dispatch(ViewEvent::Loaded(build));
            }
            Err(e) => {
                tracing::error!("Error building temperature series: {}", e);
                self.dispatch(ViewEvent::LoadFailed);
            }
        }
    }

    fn dispatch(&self, event: ViewEvent) {
        self.state.send_modify(|state| *state = reduce(state, event));
    }
}
