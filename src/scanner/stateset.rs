use bitvec::vec::BitVec;

use crate::nfa::State;

/// An insertion-ordered set of [`State`]s.
///
/// Membership is tracked by two bitmaps whose positions are relative to
/// the id of the first state inserted: one bitmap for ids at or above it,
/// another for ids below. The ids inside one compiled table come from a
/// single allocator run, so they cluster tightly and the bitmaps stay
/// small.
///
/// Iteration yields states in insertion order, which keeps the scanner's
/// emission order deterministic.
#[derive(Debug, Default)]
pub(crate) struct StateSet {
    // States in insertion order.
    items: Vec<State>,
    // Bitmap for ids >= the first inserted id.
    p_bitmap: BitVec<usize>,
    // Bitmap for ids < the first inserted id.
    n_bitmap: BitVec<usize>,
}

impl StateSet {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            p_bitmap: BitVec::repeat(false, 256),
            n_bitmap: BitVec::repeat(false, 256),
        }
    }

    /// Adds `state` to the set.
    ///
    /// Returns `true` if the state wasn't present and was added.
    pub fn insert(&mut self, state: State) -> bool {
        let first = match self.items.first() {
            Some(first) => *first,
            None => {
                // The set is empty; the first state anchors the bitmaps
                // and needs no bit of its own.
                self.items.push(state);
                return true;
            }
        };

        if state == first {
            return false;
        }

        let offset = state.id() as isize - first.id() as isize;
        let (bitmap, offset) = if offset < 0 {
            (&mut self.n_bitmap, (-offset as usize) - 1)
        } else {
            (&mut self.p_bitmap, offset as usize)
        };

        if bitmap.len() <= offset {
            bitmap.resize(offset + 1, false);
        }
        if bitmap[offset] {
            return false;
        }
        bitmap.set(offset, true);
        self.items.push(state);
        true
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Removes all states, keeping the bitmap capacity for reuse.
    pub fn clear(&mut self) {
        let first = match self.items.first() {
            Some(first) => *first,
            None => return,
        };
        for state in self.items.drain(..) {
            let offset = state.id() as isize - first.id() as isize;
            match offset {
                0 => {}
                offset if offset < 0 => {
                    self.n_bitmap.set((-offset as usize) - 1, false)
                }
                offset => self.p_bitmap.set(offset as usize, false),
            }
        }
    }

    /// Iterates the states in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &State> + '_ {
        self.items.iter()
    }
}
