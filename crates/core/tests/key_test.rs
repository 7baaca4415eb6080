//! Tests for cell key packing and cell-range arithmetic.

use cellgrid_core::range::{cell_bounds, cell_of};
use cellgrid_core::{CellCoord, CellKey, CellRange, Padding};

fn xorshift(state: &mut u64) -> u64 {
    *state ^= *state << 13;
    *state ^= *state >> 7;
    *state ^= *state << 17;
    *state
}

#[test]
fn test_key_round_trip_sweep() {
    let mut state = 0x9E37_79B9_7F4A_7C15u64;
    for _ in 0..10_000 {
        let bits = xorshift(&mut state);
        let coord: CellCoord = ((bits >> 32) as i32, bits as i32);
        let key = CellKey::from(coord);
        assert_eq!(key.decode(), coord);
        assert_eq!(CellKey::from_raw(key.raw()), key);
    }
}

#[test]
fn test_distinct_coords_give_distinct_keys() {
    let coords = [(0, 1), (1, 0), (-1, 0), (0, -1), (-1, -1), (1, 1)];
    let mut keys: Vec<CellKey> = coords.iter().copied().map(CellKey::from).collect();
    keys.sort();
    keys.dedup();
    assert_eq!(keys.len(), coords.len());
}

#[test]
fn test_keys_order_by_x_then_y() {
    let mut keys = vec![
        CellKey::encode(1, -5),
        CellKey::encode(-1, 7),
        CellKey::encode(0, 0),
        CellKey::encode(-1, -7),
    ];
    keys.sort();
    let coords: Vec<CellCoord> = keys.into_iter().map(CellCoord::from).collect();
    assert_eq!(coords, vec![(-1, -7), (-1, 7), (0, 0), (1, -5)]);
}

#[test]
fn test_entry_range_examples() {
    let range = CellRange::for_entry((0.0, 0.0, 32.0, 32.0), 64.0, Padding::NONE).unwrap();
    assert_eq!(range.keys().collect::<Vec<_>>(), vec![CellKey::encode(0, 0)]);

    let range = CellRange::for_entry((0.0, 0.0, 200.0, 200.0), 64.0, Padding::NONE).unwrap();
    assert_eq!((range.width(), range.height()), (4, 4));

    let range = CellRange::for_entry((-1.0, -1.0, 1.0, 1.0), 64.0, Padding::NONE).unwrap();
    let coords: Vec<CellCoord> = range.coords().collect();
    assert_eq!(coords, vec![(-1, -1), (0, -1), (-1, 0), (0, 0)]);
}

#[test]
fn test_padding_directions() {
    let bbox = (10.0, 10.0, 20.0, 20.0);
    let cases = [
        (Padding::LEFT, (-1, 0, 1, 1)),
        (Padding::RIGHT, (0, 0, 2, 1)),
        (Padding::TOP, (0, -1, 1, 1)),
        (Padding::BOTTOM, (0, 0, 1, 2)),
        (Padding::HORIZONTAL, (-1, 0, 2, 1)),
        (Padding::VERTICAL, (0, -1, 1, 2)),
        (Padding::ALL, (-1, -1, 2, 2)),
    ];
    for (padding, (sx, sy, ex, ey)) in cases {
        let range = CellRange::for_entry(bbox, 64.0, padding).unwrap();
        assert_eq!(
            (range.start_x(), range.start_y(), range.end_x(), range.end_y()),
            (sx, sy, ex, ey),
            "padding {padding:?}"
        );
    }
}

#[test]
fn test_query_range_clamps_infinite_rect() {
    let range = CellRange::for_query((f64::NEG_INFINITY, 0.0, f64::INFINITY, 1.0), 1.0);
    assert_eq!(range.start_x(), i64::from(i32::MIN));
    assert_eq!(range.end_x(), i64::from(i32::MAX) + 1);
    assert!(!range.is_empty());
}

#[test]
fn test_extreme_query_ranges_stay_in_cell_space() {
    let widest = CellRange::for_query((-1e300, -1e300, 1e300, 1e300), 1e-300);
    assert_eq!(widest.start_y(), i64::from(i32::MIN));
    assert_eq!(widest.end_y(), i64::from(i32::MAX) + 1);
    let last = CellRange::for_query((f64::MAX, f64::MAX, f64::MAX, f64::MAX), 1.0);
    assert_eq!(last.coords().collect::<Vec<_>>(), vec![(i32::MAX, i32::MAX)]);
}

#[test]
fn test_cell_helpers() {
    assert_eq!(cell_of(-0.5, 130.0, 64.0), Some((-1, 2)));
    assert_eq!(cell_of(f64::NAN, 0.0, 64.0), None);
    assert_eq!(cell_bounds((-1, 2), 64.0), (-64.0, 128.0, 0.0, 192.0));
}
