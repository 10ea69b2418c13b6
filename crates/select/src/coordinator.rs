use crate::snap::snap_all;
use mushaf_index::models::{PageMetadata, TextRange};
use std::cell::Cell;
use tracing::instrument;

/// The text view a [`SelectionCoordinator`] drives.
///
/// Writing the selection back may notify the coordinator again, synchronously,
/// from inside [`set_selected_ranges`](Self::set_selected_ranges).
pub trait SelectionSurface {
    fn selected_ranges(&self) -> Vec<TextRange>;
    fn set_selected_ranges(&mut self, ranges: Vec<TextRange>);
}

/// Builds the context menu for a set of snapped ranges. The menu type is
/// opaque here.
pub trait MenuBuilder {
    type Menu;
    fn build(&self, ranges: &[TextRange]) -> Self::Menu;
}
impl<F, M> MenuBuilder for F
where
    F: Fn(&[TextRange]) -> M,
{
    type Menu = M;
    fn build(&self, ranges: &[TextRange]) -> M {
        self(ranges)
    }
}

/// Keeps one page's selection snapped to whole spans.
///
/// Not `Sync`: it belongs to whichever thread delivers the surface's events.
pub struct SelectionCoordinator<B> {
    blocks: Vec<TextRange>,
    menu: B,
    adjusting: Cell<bool>,
}

impl<B> SelectionCoordinator<B> {
    pub fn new(blocks: Vec<TextRange>, menu: B) -> Self {
        Self { blocks, menu, adjusting: Cell::new(false) }
    }

    pub fn for_page(metadata: &PageMetadata, menu: B) -> Self {
        Self::new(metadata.ranges(), menu)
    }

    pub fn blocks(&self) -> &[TextRange] {
        &self.blocks
    }

    /// Whether a snapped selection is being written back right now.
    pub fn is_adjusting(&self) -> bool {
        self.adjusting.get()
    }

    /// Snap the surface's selection and write it back.
    ///
    /// Returns `false` without touching the surface when called while this
    /// coordinator is already writing a selection back: that call is the
    /// surface echoing our own write.
    #[instrument(level = "trace", skip_all)]
    pub fn selection_did_change<S: SelectionSurface + ?Sized>(&self, surface: &mut S) -> bool {
        if self.adjusting.replace(true) {
            tracing::trace!("Ignoring selection change raised by our own write");
            return false;
        }
        let _latch = Latch(&self.adjusting);
        let selected = surface.selected_ranges();
        let snapped = snap_all(&selected, &self.blocks);
        tracing::trace!(selected = selected.len(), snapped = snapped.len(), "Snapped selection");
        surface.set_selected_ranges(snapped);
        true
    }

    /// Build the context menu for what the surface currently has selected.
    pub fn edit_menu<S: SelectionSurface + ?Sized>(&self, surface: &S) -> B::Menu
    where
        B: MenuBuilder,
    {
        self.menu.build(&surface.selected_ranges())
    }
}

/// Releases the re-entrancy latch, even on unwind.
struct Latch<'a>(&'a Cell<bool>);
impl Drop for Latch<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}
