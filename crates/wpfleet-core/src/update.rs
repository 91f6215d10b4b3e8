// ── Update dispatcher and operation poller ──
//
// The submit-then-poll lifecycle is an explicit state machine with a
// pure transition function; the async driver below interprets its
// effects against real timers. Every path out of the polling loop
// (success, cancellation, optional poll budget) goes through the same
// teardown: the interval is dropped and the outcome reported.

use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use wpfleet_api::FleetClient;
use wpfleet_api::types::PluginUpdateRequest;

use crate::error::CoreError;

// ── State machine ────────────────────────────────────────────────────

/// Lifecycle of one plugin update.
///
/// `Idle → Polling → Completed` on the happy path; a rejected
/// submission goes straight to `Abandoned` with no timer ever created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateState {
    Idle,
    Polling { operation_id: String, polls: u32 },
    Completed { operation_id: String, polls: u32 },
    Abandoned { status: u16 },
}

/// Inputs to the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateEvent {
    SubmitAccepted { operation_id: String },
    SubmitRejected { status: u16 },
    /// A poll round-trip succeeded but the operation is still running.
    PollPending { status: u16 },
    /// A poll request failed outright; logged and swallowed, the
    /// interval keeps ticking.
    PollFailed,
    PollFinished,
}

/// Side effects requested by a transition. The driver owns the timer;
/// `Refresh` is the caller's re-resolution trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    StartPolling,
    StopPolling,
    Refresh,
}

/// Result of applying one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: UpdateState,
    pub effects: Vec<Effect>,
}

/// Pure transition function: `(state, event) -> (state, effects)`.
///
/// Events that make no sense in the current state leave it unchanged
/// with no effects.
pub fn step(state: UpdateState, event: UpdateEvent) -> Transition {
    match (state, event) {
        (UpdateState::Idle, UpdateEvent::SubmitAccepted { operation_id }) => Transition {
            state: UpdateState::Polling {
                operation_id,
                polls: 0,
            },
            effects: vec![Effect::StartPolling],
        },
        (UpdateState::Idle, UpdateEvent::SubmitRejected { status }) => Transition {
            state: UpdateState::Abandoned { status },
            effects: vec![],
        },
        (
            UpdateState::Polling {
                operation_id,
                polls,
            },
            UpdateEvent::PollPending { .. } | UpdateEvent::PollFailed,
        ) => Transition {
            state: UpdateState::Polling {
                operation_id,
                polls: polls + 1,
            },
            effects: vec![],
        },
        (
            UpdateState::Polling {
                operation_id,
                polls,
            },
            UpdateEvent::PollFinished,
        ) => Transition {
            state: UpdateState::Completed {
                operation_id,
                polls: polls + 1,
            },
            effects: vec![Effect::StopPolling, Effect::Refresh],
        },
        (state, event) => {
            debug!(?state, ?event, "ignoring event in current state");
            Transition {
                state,
                effects: vec![],
            }
        }
    }
}

// ── Driver ───────────────────────────────────────────────────────────

/// Polling cadence and the optional hardening bound.
///
/// The vendor gives no progress signal, so the only knobs are how
/// often to ask and when to give up. `max_polls: None` polls until
/// success, matching the console's original behavior.
#[derive(Debug, Clone)]
pub struct PollPolicy {
    pub interval: Duration,
    pub max_polls: Option<u32>,
}

impl Default for PollPolicy {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            max_polls: None,
        }
    }
}

/// Terminal result of one update flow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// The operation finished; the caller should re-resolve the fleet.
    Completed { operation_id: String, polls: u32 },
    /// The vendor did not accept the submission; no polling started.
    NotAccepted { status: u16 },
    /// The poll budget ran out with the operation still in flight.
    TimedOut { operation_id: String, polls: u32 },
    Cancelled,
}

/// Submit one plugin update and track the operation to completion.
///
/// The first poll fires one full interval after acceptance, matching
/// the vendor's own console. Poll failures are logged and the interval
/// keeps ticking; only a finished operation, cancellation, or an
/// exhausted [`PollPolicy::max_polls`] budget ends the loop.
pub async fn run_update(
    client: &FleetClient,
    env_id: &str,
    plugin: &str,
    version: &str,
    policy: &PollPolicy,
    cancel: &CancellationToken,
) -> Result<UpdateOutcome, CoreError> {
    let resp = client
        .update_plugin(
            env_id,
            &PluginUpdateRequest {
                name: plugin,
                update_version: version,
            },
        )
        .await?;

    if !resp.is_accepted() {
        debug!(env_id, status = resp.status, "update submission not accepted");
        let Transition { state, .. } = step(
            UpdateState::Idle,
            UpdateEvent::SubmitRejected {
                status: resp.status,
            },
        );
        debug_assert!(matches!(state, UpdateState::Abandoned { .. }));
        return Ok(UpdateOutcome::NotAccepted {
            status: resp.status,
        });
    }

    let operation_id = resp.operation_id.ok_or_else(|| CoreError::Api {
        message: "update accepted without an operation_id".into(),
        status: Some(resp.status),
    })?;
    debug!(env_id, %operation_id, "update accepted, polling");

    let mut transition = step(
        UpdateState::Idle,
        UpdateEvent::SubmitAccepted {
            operation_id: operation_id.clone(),
        },
    );
    debug_assert!(transition.effects.contains(&Effect::StartPolling));

    let start = tokio::time::Instant::now() + policy.interval;
    let mut ticker = tokio::time::interval_at(start, policy.interval);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            () = cancel.cancelled() => {
                debug!(%operation_id, "polling cancelled");
                return Ok(UpdateOutcome::Cancelled);
            }
            _ = ticker.tick() => {
                let event = match client.get_operation(&operation_id).await {
                    Ok(op) if op.is_finished() => UpdateEvent::PollFinished,
                    Ok(op) => UpdateEvent::PollPending { status: op.status },
                    Err(e) => {
                        warn!(%operation_id, error = %e, "operation poll failed, will retry");
                        UpdateEvent::PollFailed
                    }
                };

                transition = step(transition.state, event);
                match &transition.state {
                    UpdateState::Completed { polls, .. } => {
                        debug!(%operation_id, polls, "operation finished");
                        return Ok(UpdateOutcome::Completed {
                            operation_id,
                            polls: *polls,
                        });
                    }
                    UpdateState::Polling { polls, .. } => {
                        if policy.max_polls.is_some_and(|max| *polls >= max) {
                            warn!(%operation_id, polls, "poll budget exhausted");
                            return Ok(UpdateOutcome::TimedOut {
                                operation_id,
                                polls: *polls,
                            });
                        }
                    }
                    // step() never leaves Polling for any other state here.
                    _ => unreachable!("poller left Polling without completing"),
                }
            }
        }
    }
}
