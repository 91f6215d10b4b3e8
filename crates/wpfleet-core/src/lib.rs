//! Orchestration layer between `wpfleet-api` and the CLI.
//!
//! This crate owns the business logic of the fleet plugin console:
//!
//! - **[`FleetConsole`]** — Facade over one company's fleet. Resolves
//!   the full site → environment → plugin view
//!   ([`resolve_fleet`](FleetConsole::resolve_fleet)), derives the
//!   distinct plugin catalog, filters the fleet down to sites running a
//!   chosen plugin, and drives plugin updates to completion.
//!
//! - **Resolution cycle** ([`resolver`]) — Three sequential fan-out
//!   stages joined all-or-nothing: list sites, list each site's
//!   environments (keeping the canonical first one), list each
//!   environment's installed plugins. Every fetch rebuilds the view
//!   from scratch; nothing is cached or incrementally patched.
//!
//! - **Update state machine** ([`update`]) — Explicit
//!   `(state, event) -> (state, effects)` transitions for the
//!   submit-then-poll lifecycle, plus the async driver that interprets
//!   the effects against real timers and a [`CancellationToken`].
//!
//! [`CancellationToken`]: tokio_util::sync::CancellationToken

pub mod catalog;
pub mod console;
pub mod error;
pub mod model;
pub mod resolver;
pub mod update;

// ── Primary re-exports ──────────────────────────────────────────────
pub use console::{BulkReport, FleetConsole, UpdateReport};
pub use error::CoreError;
pub use model::{Environment, Site, SitePlugins, SiteWithPlugin};
pub use update::{PollPolicy, UpdateOutcome, UpdateState};

// Re-export the wire-level plugin record: the domain keeps it verbatim.
pub use wpfleet_api::types::PluginRecord;
