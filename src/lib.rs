//! Turn raw profile links into display labels and platform tags.
//!
//! ```text
//! classify("scholar.google.com/citations?user=abc")
//!   => url: https://scholar.google.com/citations?user=abc
//!      displayName: Google Scholar, platform: scholar
//! ```
//!
//! - [`link`] — normalization, the ordered platform table, classification.
//! - [`source`] — readers for link lists and lab rosters.
//! - [`config`] — matching mode, extra rules, per-platform policy.
//! - [`report`] — terminal and HTML renderers.

pub mod config;
pub mod detector;
pub mod link;
pub mod logging;
pub mod models;
pub mod report;
pub mod source;

pub use link::classifier::{classify, classify_all, Classifier};
pub use models::ClassifiedLink;
