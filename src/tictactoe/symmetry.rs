//! Symmetries of the 3x3 board (the dihedral group D4)

use super::board::{Cells, CELLS, SIZE};
use crate::search::zobrist::{Symmetry, SymmetryGroup};
use once_cell::sync::Lazy;

/// Cell permutations of the eight board symmetries, identity first.
/// `IMAGES[s][cell]` is the cell `cell` is moved to by symmetry `s`.
pub static IMAGES: Lazy<Vec<Vec<usize>>> = Lazy::new(|| {
    let last = SIZE - 1;
    let maps: [fn(usize, usize, usize) -> (usize, usize); 8] = [
        |r, c, _| (r, c),
        |r, c, l| (c, l - r),     // 90°
        |r, c, l| (l - r, l - c), // 180°
        |r, c, l| (l - c, r),     // 270°
        |r, c, l| (r, l - c),     // 左右反転
        |r, c, l| (l - r, c),     // 上下反転
        |r, c, _| (c, r),         // 主対角線
        |r, c, l| (l - c, l - r), // 副対角線
    ];
    maps.iter()
        .map(|map| {
            (0..CELLS)
                .map(|cell| {
                    let (r, c) = map(cell / SIZE, cell % SIZE, last);
                    r * SIZE + c
                })
                .collect()
        })
        .collect()
});

/// The board's symmetry group, shared by every game.
pub static D4: Lazy<SymmetryGroup> = Lazy::new(|| {
    SymmetryGroup::new(CELLS, IMAGES.clone()).unwrap_or_else(|e| {
        log::warn!("falling back to the trivial symmetry group: {}", e);
        SymmetryGroup::trivial(CELLS)
    })
});

/// The cells of the board after applying `symmetry`.
pub fn transform(cells: &Cells, symmetry: &Symmetry) -> Cells {
    let mut out = [None; CELLS];
    for (cell, &mark) in cells.iter().enumerate() {
        out[symmetry.map(cell)] = mark;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_eight_distinct_symmetries() {
        assert_eq!(D4.len(), 8);
        assert!(D4.iter().next().unwrap().is_identity());
    }

    #[test]
    fn test_centre_is_fixed_and_corners_stay_corners() {
        for symmetry in D4.iter() {
            assert_eq!(symmetry.map(4), 4);
            for corner in [0, 2, 6, 8] {
                assert!([0, 2, 6, 8].contains(&symmetry.map(corner)));
            }
        }
        // quarter turn moves the top-left corner to the top-right
        assert_eq!(IMAGES[1][0], 2);
    }
}
