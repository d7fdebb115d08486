use super::symmetry::D4;
use crate::core::Problem;
use crate::search::hashing::ZobristHashable;
use crate::search::zobrist::{SymmetryGroup, ZobristHasher, ZobristTable};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;

pub const SIZE: usize = 3;
pub const CELLS: usize = SIZE * SIZE;

/// 勝ちライン (横3, 縦3, 斜め2)
pub const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

pub const CENTRE: usize = 4;
pub const CORNERS: [usize; 4] = [0, 2, 6, 8];
pub const EDGES: [usize; 4] = [1, 3, 5, 7];

pub type Cells = [Option<Mark>; CELLS];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(&self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    /// Occupant / side index used by the Zobrist table.
    pub fn index(&self) -> usize {
        match self {
            Mark::X => 0,
            Mark::O => 1,
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Mark::X => write!(f, "X"),
            Mark::O => write!(f, "O"),
        }
    }
}

/// 盤面
#[derive(Debug, Clone)]
pub struct Board {
    cells: Cells,
    to_move: Mark,
    /// Zobrist Hash (対称形を含む)
    hasher: ZobristHasher,
}

impl Board {
    pub fn new(table: Arc<ZobristTable>, group: Arc<SymmetryGroup>) -> Self {
        Self::from_cells([None; CELLS], Mark::X, table, group)
    }

    pub fn from_cells(
        cells: Cells,
        to_move: Mark,
        table: Arc<ZobristTable>,
        group: Arc<SymmetryGroup>,
    ) -> Self {
        let occupancy: Vec<Option<usize>> = cells.iter().map(|c| c.map(|m| m.index())).collect();
        let hasher = ZobristHasher::new(table, group, &occupancy, to_move.index());
        Board {
            cells,
            to_move,
            hasher,
        }
    }

    pub fn cells(&self) -> &Cells {
        &self.cells
    }

    pub fn get(&self, cell: usize) -> Option<Mark> {
        self.cells.get(cell).copied().flatten()
    }

    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    pub fn hasher(&self) -> &ZobristHasher {
        &self.hasher
    }

    /// Puts the mark of the side to move on `cell` and passes the turn.
    pub fn place(&mut self, cell: usize) {
        let mark = self.to_move;
        self.cells[cell] = Some(mark);
        self.hasher.place(cell, mark.index());
        self.hasher.change_side(mark.index(), mark.opponent().index());
        self.to_move = mark.opponent();
    }

    pub fn empty_cells(&self) -> Vec<usize> {
        (0..CELLS).filter(|&c| self.cells[c].is_none()).collect()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().all(|c| c.is_some())
    }

    pub fn winner(&self) -> Option<Mark> {
        LINES.iter().find_map(|line| {
            let first = self.cells[line[0]]?;
            if line.iter().all(|&c| self.cells[c] == Some(first)) {
                Some(first)
            } else {
                None
            }
        })
    }

    pub fn is_over(&self) -> bool {
        self.winner().is_some() || self.is_full()
    }

    /// Number of marks of each side on `line`: (player, opponent).
    pub fn line_counts(&self, line: &[usize; 3], player: Mark) -> (usize, usize) {
        line.iter().fold((0, 0), |(own, other), &c| match self.cells[c] {
            Some(m) if m == player => (own + 1, other),
            Some(_) => (own, other + 1),
            None => (own, other),
        })
    }
}

// The hasher is derived from the cells and the side to move.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.cells == other.cells && self.to_move == other.to_move
    }
}

impl ZobristHashable for Board {
    fn zobrist_hash(&self) -> u64 {
        self.hasher.hash()
    }

    fn symmetry_hashes(&self) -> Cow<'_, [u64]> {
        Cow::Borrowed(self.hasher.symmetry_hashes())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for row in 0..SIZE {
            let line: Vec<String> = (0..SIZE)
                .map(|col| match self.cells[row * SIZE + col] {
                    Some(m) => m.to_string(),
                    None => ".".to_string(),
                })
                .collect();
            writeln!(f, "{}", line.join(" "))?;
        }
        write!(f, "{} to move", self.to_move)
    }
}

/// Tic-tac-toe rules. Cloning is cheap: the Zobrist table and the symmetry
/// group are shared.
#[derive(Debug, Clone)]
pub struct TicTacToe {
    table: Arc<ZobristTable>,
    group: Arc<SymmetryGroup>,
}

impl TicTacToe {
    pub fn new<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::with_group(rng, D4.clone())
    }

    /// Rules whose states report no symmetric images besides themselves.
    pub fn without_symmetry<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::with_group(rng, SymmetryGroup::trivial(CELLS))
    }

    fn with_group<R: Rng + ?Sized>(rng: &mut R, group: SymmetryGroup) -> Self {
        Self {
            table: Arc::new(ZobristTable::new(CELLS, 2, 2, rng)),
            group: Arc::new(group),
        }
    }

    pub fn initial_state(&self) -> Board {
        Board::new(self.table.clone(), self.group.clone())
    }

    pub fn state_from_cells(&self, cells: Cells, to_move: Mark) -> Board {
        Board::from_cells(cells, to_move, self.table.clone(), self.group.clone())
    }

    pub fn table(&self) -> &Arc<ZobristTable> {
        &self.table
    }

    pub fn group(&self) -> &Arc<SymmetryGroup> {
        &self.group
    }
}

fn cell_rank(cell: usize) -> usize {
    if cell == CENTRE {
        0
    } else if CORNERS.contains(&cell) {
        1
    } else {
        2
    }
}

impl Problem for TicTacToe {
    type State = Board;
    type Action = usize;

    fn generate_actions(&self, state: &Board) -> Vec<usize> {
        if state.is_over() {
            return Vec::new();
        }
        state.empty_cells()
    }

    fn apply(&self, state: &Board, action: &usize) -> Board {
        let mut next = state.clone();
        next.place(*action);
        next
    }

    fn is_legal(&self, state: &Board, action: &usize) -> bool {
        *action < CELLS && state.get(*action).is_none() && state.winner().is_none()
    }

    fn is_terminal(&self, state: &Board) -> bool {
        state.is_over()
    }

    // centre, then corners, then edges
    fn order_actions(&self, _state: &Board, actions: &mut Vec<usize>) {
        actions.sort_by_key(|&cell| cell_rank(cell));
    }
}
