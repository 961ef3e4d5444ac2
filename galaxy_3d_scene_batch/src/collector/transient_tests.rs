//! Unit tests for transient.rs

use crate::collector::transient::{DrawableZRange, TransientDrawableIndex, TransientTraits};
use crate::galaxy3d::LARGE_VALUE;
use crate::scene::DrawableIndex;

#[test]
fn test_z_range_default_is_invalid() {
    let range = DrawableZRange::default();
    assert!(!range.is_valid());
}

#[test]
fn test_z_range_accumulate_from_empty() {
    let mut range = DrawableZRange::empty();
    range.accumulate(DrawableZRange::new(2.0, 5.0));
    range.accumulate(DrawableZRange::new(-1.0, 3.0));
    assert_eq!(range, DrawableZRange::new(-1.0, 5.0));
    assert!(range.is_valid());
}

#[test]
fn test_z_range_infinite_sentinel() {
    let range = DrawableZRange::infinite();
    assert_eq!(range.min, LARGE_VALUE);
    assert_eq!(range.max, LARGE_VALUE);
}

#[test]
fn test_transient_index_reset_clears_traits() {
    let mut index = TransientDrawableIndex::default();
    index.reset(4);
    index.insert_traits(DrawableIndex(2), TransientTraits::UPDATED);
    index.insert_traits(DrawableIndex(2), TransientTraits::VISIBLE_GEOMETRY);
    index.set_z_range(DrawableIndex(2), DrawableZRange::new(1.0, 2.0));

    assert_eq!(
        index.traits(DrawableIndex(2)),
        TransientTraits::UPDATED | TransientTraits::VISIBLE_GEOMETRY
    );
    assert_eq!(index.z_range(DrawableIndex(2)), DrawableZRange::new(1.0, 2.0));

    index.reset(3);
    assert_eq!(index.len(), 3);
    assert!(index.traits(DrawableIndex(2)).is_empty());
    assert!(!index.z_range(DrawableIndex(2)).is_valid());
}

#[test]
fn test_transient_index_out_of_range_reads_default() {
    let mut index = TransientDrawableIndex::default();
    index.reset(2);
    assert!(!index.contains(DrawableIndex(2)));
    assert!(index.traits(DrawableIndex(7)).is_empty());
    index.insert_traits(DrawableIndex(7), TransientTraits::UPDATED);
    assert_eq!(index.len(), 2);
}
