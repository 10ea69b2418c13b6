//! Snapping text selections onto whole spans.
//!
//! A page's glyph text is tiled by spans, one per verse, with undecorated
//! gaps between them. Whatever the reader selects is widened to the spans it
//! touches, so a selection always means a set of whole verses.
//!
//! [`snap`] and friends are pure functions over UTF-16 ranges. The
//! [`SelectionCoordinator`] connects them to a live text view and keeps the
//! view's echo of a programmatic selection from being snapped twice.

mod coordinator;
mod snap;

pub use crate::coordinator::{MenuBuilder, SelectionCoordinator, SelectionSurface};
pub use crate::snap::{canonicalize, snap, snap_all};
