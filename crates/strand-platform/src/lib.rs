//! Platform-aware primitives for native and wasm32 targets.
//!
//! The worker runs as a single cooperatively scheduled context. Everything
//! that suspends or hands control back to the scheduler goes through this
//! crate so the rest of the workspace stays target-agnostic.
//!
//! # Synchronization
//!
//! Re-exports [`parking_lot`] lock types. Locks in this workspace are never
//! held across an `.await`.
//!
//! # Conditional trait bounds
//!
//! [`MaybeSend`] and [`MaybeSync`] equal `Send`/`Sync` on native and are
//! blanket-implemented for all types on wasm32, where futures are `!Send`.
//!
//! # Scheduling
//!
//! - [`yield_now`] hands control back to the scheduler exactly once.
//! - [`spawn`] runs a detached task (`tokio::spawn` / `spawn_local`).
//! - [`time::sleep`] and [`time::Instant`] are wall-clock helpers.

#![forbid(unsafe_code)]

mod maybe_send;
mod task;
pub mod time;

pub use maybe_send::{MaybeSend, MaybeSync};
pub use parking_lot::{Mutex, MutexGuard, RwLock, RwLockReadGuard, RwLockWriteGuard};
pub use task::{spawn, yield_now};
