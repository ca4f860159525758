//! Conditional `Send`/`Sync` bounds.
//!
//! Native builds run futures on a tokio runtime that may move them between
//! threads, so spawned work must be `Send`. Browser workers have one thread
//! and JS handles are `!Send`, so the bound disappears there.
//!
//! Only usable in generic bounds: `dyn Trait + MaybeSend` is not allowed
//! because only auto-traits may follow `dyn Trait +`.

#[cfg(not(target_arch = "wasm32"))]
pub trait MaybeSend: Send {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Send> MaybeSend for T {}

#[cfg(target_arch = "wasm32")]
pub trait MaybeSend {}
#[cfg(target_arch = "wasm32")]
impl<T> MaybeSend for T {}

#[cfg(not(target_arch = "wasm32"))]
pub trait MaybeSync: Sync {}
#[cfg(not(target_arch = "wasm32"))]
impl<T: Sync> MaybeSync for T {}

#[cfg(target_arch = "wasm32")]
pub trait MaybeSync {}
#[cfg(target_arch = "wasm32")]
impl<T> MaybeSync for T {}
