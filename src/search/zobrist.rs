//! Zobrist hashing with symmetry folding
//!
//! A [`ZobristTable`] holds one random 64-bit term per (cell, occupant or
//! empty) pair and one per side to move. It is generated once for a board
//! geometry and player set and shared read-only by every state.
//!
//! A [`ZobristHasher`] keeps the hash of a position up to date with O(1) XOR
//! updates on every placement, removal and turn change. It also keeps one
//! hash per board symmetry: for a permutation `s` of the cells the symmetry
//! hash is the XOR of `term(s(cell), occupant(cell))`, which is exactly the
//! primary hash of the transformed board. Two boards related by a symmetry
//! therefore share a value in their symmetry sets.

use crate::error::SearchError;
use rand::Rng;
use std::sync::Arc;

/// Random terms for one board geometry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZobristTable {
    cells: usize,
    occupants: usize,
    // cells * (occupants + 1), slot 0 of every cell is "empty"
    terms: Vec<u64>,
    side_to_move: Vec<u64>,
}

impl ZobristTable {
    pub fn new<R: Rng + ?Sized>(cells: usize, occupants: usize, sides: usize, rng: &mut R) -> Self {
        let terms = (0..cells * (occupants + 1)).map(|_| rng.gen()).collect();
        let side_to_move = (0..sides).map(|_| rng.gen()).collect();
        Self {
            cells,
            occupants,
            terms,
            side_to_move,
        }
    }

    pub fn cells(&self) -> usize {
        self.cells
    }

    pub fn occupants(&self) -> usize {
        self.occupants
    }

    /// Term for `cell` holding `occupant` (`None` = empty).
    pub fn term(&self, cell: usize, occupant: Option<usize>) -> u64 {
        debug_assert!(cell < self.cells, "cell {} out of range", cell);
        debug_assert!(
            occupant.map_or(true, |o| o < self.occupants),
            "occupant {:?} out of range",
            occupant
        );
        let slot = occupant.map_or(0, |o| o + 1);
        self.terms[cell * (self.occupants + 1) + slot]
    }

    pub fn side_term(&self, side: usize) -> u64 {
        self.side_to_move[side]
    }

    /// Hash recomputed over the whole board.
    pub fn hash_from_scratch(&self, occupancy: &[Option<usize>], side: usize) -> u64 {
        self.hash_under(&Symmetry::identity(self.cells), occupancy, side)
    }

    fn hash_under(&self, symmetry: &Symmetry, occupancy: &[Option<usize>], side: usize) -> u64 {
        occupancy
            .iter()
            .enumerate()
            .fold(self.side_term(side), |hash, (cell, &occupant)| {
                hash ^ self.term(symmetry.map(cell), occupant)
            })
    }
}

/// A permutation of the board cells that maps the board onto itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symmetry {
    image: Vec<usize>,
}

impl Symmetry {
    pub fn identity(cells: usize) -> Self {
        Self {
            image: (0..cells).collect(),
        }
    }

    /// `image[c]` is where cell `c` ends up.
    pub fn from_image(image: Vec<usize>) -> Option<Self> {
        let mut seen = vec![false; image.len()];
        for &target in &image {
            if target >= image.len() || seen[target] {
                return None;
            }
            seen[target] = true;
        }
        Some(Self { image })
    }

    pub fn map(&self, cell: usize) -> usize {
        self.image[cell]
    }

    pub fn len(&self) -> usize {
        self.image.len()
    }

    pub fn is_empty(&self) -> bool {
        self.image.is_empty()
    }

    pub fn is_identity(&self) -> bool {
        self.image.iter().enumerate().all(|(cell, &target)| cell == target)
    }
}

/// The symmetry group of a board; index 0 is always the identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SymmetryGroup {
    members: Vec<Symmetry>,
}

impl SymmetryGroup {
    /// A group containing only the identity.
    pub fn trivial(cells: usize) -> Self {
        Self {
            members: vec![Symmetry::identity(cells)],
        }
    }

    /// Builds a group from cell permutations. The identity is put first
    /// (added when missing) and duplicates are dropped.
    pub fn new(cells: usize, images: Vec<Vec<usize>>) -> Result<Self, SearchError> {
        let mut members = vec![Symmetry::identity(cells)];
        for (index, image) in images.into_iter().enumerate() {
            if image.len() != cells {
                return Err(SearchError::InvalidSymmetry {
                    index,
                    reason: format!("maps {} cells, board has {}", image.len(), cells),
                });
            }
            let symmetry = Symmetry::from_image(image).ok_or_else(|| SearchError::InvalidSymmetry {
                index,
                reason: "not a permutation".to_string(),
            })?;
            if !members.contains(&symmetry) {
                members.push(symmetry);
            }
        }
        Ok(Self { members })
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn cells(&self) -> usize {
        self.members[0].len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symmetry> {
        self.members.iter()
    }
}

/// Incrementally maintained position hash plus all its symmetry hashes.
#[derive(Debug, Clone)]
pub struct ZobristHasher {
    table: Arc<ZobristTable>,
    group: Arc<SymmetryGroup>,
    hashes: Vec<u64>,
}

impl ZobristHasher {
    pub fn new(
        table: Arc<ZobristTable>,
        group: Arc<SymmetryGroup>,
        occupancy: &[Option<usize>],
        side: usize,
    ) -> Self {
        let hashes = group
            .iter()
            .map(|symmetry| table.hash_under(symmetry, occupancy, side))
            .collect();
        Self {
            table,
            group,
            hashes,
        }
    }

    /// Replaces the occupant of `cell`: XOR out the old term, XOR in the new.
    pub fn set_occupant(&mut self, cell: usize, old: Option<usize>, new: Option<usize>) {
        if old == new {
            return;
        }
        for (hash, symmetry) in self.hashes.iter_mut().zip(self.group.iter()) {
            let target = symmetry.map(cell);
            *hash ^= self.table.term(target, old);
            *hash ^= self.table.term(target, new);
        }
    }

    pub fn place(&mut self, cell: usize, occupant: usize) {
        self.set_occupant(cell, None, Some(occupant));
    }

    pub fn remove(&mut self, cell: usize, occupant: usize) {
        self.set_occupant(cell, Some(occupant), None);
    }

    pub fn change_side(&mut self, old: usize, new: usize) {
        if old == new {
            return;
        }
        let delta = self.table.side_term(old) ^ self.table.side_term(new);
        for hash in &mut self.hashes {
            *hash ^= delta;
        }
    }

    /// Primary (identity) hash.
    pub fn hash(&self) -> u64 {
        self.hashes[0]
    }

    /// Hashes of every symmetric image of the position, primary first.
    pub fn symmetry_hashes(&self) -> &[u64] {
        &self.hashes
    }

    pub fn table(&self) -> &Arc<ZobristTable> {
        &self.table
    }
}
