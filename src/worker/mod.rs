//! The caching decision engine.
//!
//! Three phases, run by the lifecycle host:
//!
//! - `Installer`: once per new version, pre-populates the generation
//! - `Activator`: once per takeover, purges superseded generations
//! - `Router`: continuously, routes every intercepted request through a
//!   cache-first or network-first strategy
//!
//! `OfflineWorker` assembles the three behind a single event dispatch.

pub mod activate;
pub mod events;
pub mod host;
pub mod install;
pub mod router;

pub use activate::Activator;
pub use events::{Event, EventOutcome, OfflineWorker};
pub use host::{LifecycleHost, NoopHost};
pub use install::{InstallError, Installer};
pub use router::{RouteOutcome, Router};
