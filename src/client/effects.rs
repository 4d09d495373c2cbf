//! The client host loop: single-writer state, actions in, snapshots out.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐  Action   ┌───────────────────┐  ClientState  ┌──────────┐
//! │ Host / UI    │──mpsc────►│  run_store task   │────watch─────►│ Observers│
//! └──────────────┘           │  reduce + effects │               └──────────┘
//!         ▲                  └─────────┬─────────┘
//!         │   LoadSucceeded/Failed     │ spawns once, at Initialize
//!         └──────────mpsc──────────────┴── loader.load(base_url, lang)
//! ```
//!
//! Exactly one load is in flight per session: the feedback sender is
//! consumed by the first `Initialize`, so no re-load path exists. User
//! actions dispatched while the load is pending interleave in channel FIFO
//! order; a late failure lands as a normal `LoadFailed` transition.
//!
//! An error out of an action step (the navigator, in practice) is converted
//! into a `last_error`-bearing state instead of terminating the loop — the
//! sole top-level recovery policy.

use crate::client::{
    ClientError, launch,
    loader::CatalogLoader,
    store::{self, Action, ClientState},
};
use std::sync::Arc;
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};

/// Capacity of the action channel; senders briefly back-pressure past this.
const ACTION_QUEUE: usize = 32;

/// Handle for feeding actions to and observing a running store.
#[derive(Debug, Clone)]
pub struct StoreHandle {
    pub actions: mpsc::Sender<Action>,
    pub state: watch::Receiver<ClientState>,
}

/// Spawn the store task. The task ends when every action sender (the handle
/// and any pending load feedback) has been dropped.
pub fn spawn_store<L, N>(loader: L, navigator: N) -> (StoreHandle, JoinHandle<()>)
where
    L: CatalogLoader,
    N: launch::Navigator,
{
    let (actions_tx, actions_rx) = mpsc::channel(ACTION_QUEUE);
    let (state_tx, state_rx) = watch::channel(ClientState::default());

    let feedback = actions_tx.clone();
    let task = tokio::spawn(run_store(loader, navigator, actions_rx, state_tx, feedback));

    (
        StoreHandle {
            actions: actions_tx,
            state: state_rx,
        },
        task,
    )
}

async fn run_store<L, N>(
    loader: L,
    navigator: N,
    mut actions: mpsc::Receiver<Action>,
    state_tx: watch::Sender<ClientState>,
    feedback: mpsc::Sender<Action>,
) where
    L: CatalogLoader,
    N: launch::Navigator,
{
    let loader = Arc::new(loader);
    let mut feedback = Some(feedback);
    let mut state = ClientState::default();

    while let Some(action) = actions.recv().await {
        if let Err(err) = step(&mut state, &action, &loader, &navigator, &mut feedback) {
            state.last_error = Some(err.to_string());
        }
        store::refresh_filtered(&mut state);
        let _ = state_tx.send(state.clone());
    }
}

/// Reduce one action, then run its effects.
fn step<L, N>(
    state: &mut ClientState,
    action: &Action,
    loader: &Arc<L>,
    navigator: &N,
    feedback: &mut Option<mpsc::Sender<Action>>,
) -> Result<(), ClientError>
where
    L: CatalogLoader,
    N: launch::Navigator,
{
    store::reduce(state, action);

    match action {
        Action::Initialize(_) => {
            // the feedback sender is single-use: exactly one load per session
            if let Some(tx) = feedback.take() {
                let loader = Arc::clone(loader);
                let base_url = state.options.base_url.clone();
                let lang = state.options.catalog_lang().to_string();

                tokio::spawn(async move {
                    let action = match loader.load(&base_url, &lang).await {
                        Ok(data) => Action::LoadSucceeded {
                            examples: data.examples,
                            tags: data.tags,
                        },
                        Err(err) => Action::LoadFailed {
                            error: err.to_string(),
                        },
                    };
                    let _ = tx.send(action).await;
                });
            }
        }
        Action::Use => {
            // no-op without a selection; must not fail on absent platform
            if let Some(example) = &state.selected_example {
                let url = launch::launch_url(&state.options.callback_url, example);
                navigator.open(&url, &state.options.target)?;
            }
        }
        _ => {}
    }

    Ok(())
}
