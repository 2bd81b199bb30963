//! Runtime entity core for a side-scrolling warplane shooter.
//!
//! The hard part lives in `pool`, `emitter` and `collision`: reusable entity
//! slots with deferred destroy-then-sweep reclamation, a cooldown-driven
//! enemy spawner whose cadence is invariant to frame timing, and a
//! table-driven axis-aligned collision resolver.  `display` and `main` are
//! thin terminal wrappers around the core.

pub mod audio;
pub mod collision;
pub mod display;
pub mod emitter;
pub mod entities;
pub mod error;
pub mod math;
pub mod pool;
pub mod session;
