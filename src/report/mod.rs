//! Report renderers for classified links.
//!
//! - [`terminal`] — colored, tabular output with summary box; respects `--verbose` / `--quiet`.
//! - [`html`] — anchor lists grouped by owner, ready to embed in a profile page.

pub mod html;
pub mod terminal;
