//! Consistency checks across the marching-cubes lookup tables

use planetoid::tables::{
    CORNER_BITS, EDGE_CORNERS, EDGE_TABLE, MAX_CELL_TRIANGLES, TRI_SENTINEL, TRI_TABLE,
};

/// Edges whose two corners disagree about being below the isolevel
fn crossed_edges(mask: u8) -> u16 {
    EDGE_CORNERS
        .iter()
        .enumerate()
        .filter(|(_, [a, b])| (mask & CORNER_BITS[*a] != 0) != (mask & CORNER_BITS[*b] != 0))
        .fold(0, |edges, (edge, _)| edges | (1 << edge))
}

fn row_entries(mask: u8) -> &'static [i8] {
    let row = &TRI_TABLE[mask as usize];
    let len = row
        .iter()
        .position(|&e| e == TRI_SENTINEL)
        .unwrap_or(row.len());
    &row[..len]
}

#[test]
fn test_edge_table_matches_corner_signs() {
    for mask in 0..=255u8 {
        assert_eq!(
            EDGE_TABLE[mask as usize],
            crossed_edges(mask),
            "mask {:#010b}",
            mask
        );
    }
}

#[test]
fn test_triangles_use_exactly_the_crossed_edges() {
    for mask in 0..=255u8 {
        let used = row_entries(mask)
            .iter()
            .fold(0u16, |edges, &e| edges | (1 << e));
        assert_eq!(used, EDGE_TABLE[mask as usize], "mask {}", mask);
    }
}

#[test]
fn test_rows_are_whole_triangles_then_sentinels() {
    for mask in 0..=255u8 {
        let row = &TRI_TABLE[mask as usize];
        let entries = row_entries(mask);

        assert_eq!(entries.len() % 3, 0, "mask {}", mask);
        assert!(entries.len() / 3 <= MAX_CELL_TRIANGLES);
        assert!(entries.iter().all(|&e| (0..12).contains(&e)));
        assert!(row[entries.len()..].iter().all(|&e| e == TRI_SENTINEL));
    }
}

#[test]
fn test_complement_crosses_the_same_edges() {
    for mask in 0..=255usize {
        assert_eq!(EDGE_TABLE[mask], EDGE_TABLE[255 - mask]);
    }
}

#[test]
fn test_some_cell_needs_every_triangle_slot() {
    let most = (0..=255u8)
        .map(|mask| row_entries(mask).len() / 3)
        .max()
        .unwrap();
    assert_eq!(most, MAX_CELL_TRIANGLES);
}
