//! English ⇄ German voice translator core.
//!
//! Speech capture and playback are left to the host front end; this crate
//! covers what happens to the recognised text:
//!
//! * [`translate`]: backend chain with offline dictionary fallback.
//! * [`session`]: conversation history and running statistics.
//! * [`config`]: `settings.toml` loading and platform paths.

pub mod config;
pub mod session;
pub mod translate;
