//! Link normalization and platform classification.
//!
//! - [`rules`] — the ordered platform table and host-matching modes.
//! - [`classifier`] — entry point turning raw link strings into
//!   [`ClassifiedLink`](crate::models::ClassifiedLink)s.

pub mod classifier;
pub mod rules;
