use mushaf_index::models::TextRange;

/// Snap one selection onto the spans it touches.
///
/// `blocks` must be sorted by location and must not overlap, as
/// [`PageMetadata::ranges`](mushaf_index::models::PageMetadata::ranges) returns them.
///
/// - A caret snaps to the block containing it, or to nothing.
/// - A range snaps to every block it overlaps, in block order.
/// - A range overlapping nothing falls back to the block containing its
///   start. Its end is never used as an anchor.
pub fn snap(selection: TextRange, blocks: &[TextRange]) -> Vec<TextRange> {
    if blocks.is_empty() {
        return Vec::new();
    }
    if selection.is_caret() {
        return containing(selection.location, blocks).into_iter().collect();
    }
    let covered: Vec<TextRange> = blocks.iter().filter(|block| block.overlaps(&selection)).copied().collect();
    if covered.is_empty() {
        return containing(selection.location, blocks).into_iter().collect();
    }
    covered
}

/// Snap every selection independently, then [`canonicalize`] the result.
pub fn snap_all(selections: &[TextRange], blocks: &[TextRange]) -> Vec<TextRange> {
    canonicalize(selections.iter().flat_map(|&selection| snap(selection, blocks)).collect())
}

/// Sort by location (shorter first on ties) and drop exact duplicates.
pub fn canonicalize(mut ranges: Vec<TextRange>) -> Vec<TextRange> {
    ranges.sort_unstable();
    ranges.dedup();
    ranges
}

fn containing(offset: usize, blocks: &[TextRange]) -> Option<TextRange> {
    blocks.iter().find(|block| block.contains(offset)).copied()
}
