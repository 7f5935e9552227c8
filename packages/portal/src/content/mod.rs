//! # Content — merged reads and gated mutations
//!
//! Each entity kind has an overlay collection next to its seed list:
//!
//! | Kind | Overlay holds | Read path |
//! |------|---------------|-----------|
//! | Incidents | full records, seed copies adopted on first change | seed ∪ overlay by id |
//! | News | full records, seed copies adopted on first change | seed ∪ overlay by id |
//! | Supes | one accumulated [`SupePatch`](crate::SupePatch) per supe | seed with patches applied |
//!
//! Mutators check the caller's [`Capabilities`](crate::Capabilities) first.
//! A missing capability or an unknown id is not an error: the call logs at
//! `debug` and returns `Ok(None)` without touching storage.

mod incidents;
mod news;
mod supes;

use std::fmt::Display;

use crate::error::PortalError;

/// Log an ignored mutation and report it as `Ok(None)`.
fn ignored<T>(op: &str, reason: impl Display) -> Result<Option<T>, PortalError> {
    tracing::debug!("Ignoring {}: {}", op, reason);
    Ok(None)
}
