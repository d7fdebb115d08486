use crate::core::Value;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Bound {
    Exact,
    Lower, // fail-high: the true value is at least `score`
    Upper, // fail-low: the true value is at most `score`
}

#[derive(Clone, Copy, PartialEq, Debug)]
pub struct TTEntry {
    pub hash: u64,
    /// Remaining depth the score was searched with.
    pub depth: usize,
    pub score: Value,
    pub bound: Bound,
}

/// Fixed-size, direct-mapped cache from position hash to search result.
///
/// Slots are indexed by `hash % size`; the full hash is kept in the entry so
/// a slot collision reads as a miss, never as a wrong value.
pub struct TranspositionTable {
    entries: Vec<Option<TTEntry>>,
    size: usize,
}

impl TranspositionTable {
    pub fn new(num_entries: usize) -> Self {
        let size = num_entries.max(1);
        Self {
            entries: vec![None; size],
            size,
        }
    }

    pub fn capacity(&self) -> usize {
        self.size
    }

    pub fn clear(&mut self) {
        for entry in &mut self.entries {
            *entry = None;
        }
    }

    /// Number of slots currently holding an entry.
    pub fn occupied(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    pub fn get(&self, hash: u64) -> Option<TTEntry> {
        let idx = (hash % self.size as u64) as usize;
        match self.entries[idx] {
            Some(entry) if entry.hash == hash => Some(entry),
            _ => None,
        }
    }

    pub fn store(&mut self, hash: u64, depth: usize, score: Value, bound: Bound) {
        let idx = (hash % self.size as u64) as usize;

        // Deeper results win a slot; a shallower one never replaces them.
        if let Some(entry) = &self.entries[idx] {
            if depth < entry.depth {
                return;
            }
            // same position, same depth: keep an exact score over a bound
            if entry.hash == hash && depth == entry.depth && entry.bound == Bound::Exact && bound != Bound::Exact {
                return;
            }
        }

        self.entries[idx] = Some(TTEntry {
            hash,
            depth,
            score,
            bound,
        });
    }
}
