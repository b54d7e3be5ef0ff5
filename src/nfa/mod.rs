/*! The transition-table representation of a compiled pattern.

A pattern compiles into a [`TransitionTable`]: a set of states, one
128-column transition row per state, and the lists of starting and
accepting states. The machine is nondeterministic; a row column holds an
ordered *list* of targets rather than a single one, and the same target may
appear more than once. The scanner treats the reached states as a set, so
duplicates cost nothing there, while the builder relies on the list
representation to graft new edges next to existing ones (see
[`TransitionRow::add_parallel_transition`]).

State identities come from a process-wide atomic counter. That makes deep
copies cheap to reason about: copying a table allocates fresh identities
throughout, so no two tables ever share a state.
*/

use std::fmt;
use std::sync::atomic::{AtomicU32, Ordering};

use itertools::Itertools;
use rustc_hash::FxHashMap;

pub mod builder;


/// The sentinel byte injected by the scanner before each line, matched by
/// the `^` anchor.
pub(crate) const BOL_BYTE: u8 = 2;

/// The sentinel byte that ends each line, matched by the `$` anchor. This
/// is the newline itself; the scanner injects one after lines that don't
/// have it.
pub(crate) const EOL_BYTE: u8 = b'\n';

static NEXT_STATE_ID: AtomicU32 = AtomicU32::new(0);

/// An opaque state identity.
///
/// Identities are handed out by a process-wide counter and never reused,
/// so any two independently created states are distinct. Ids are unique,
/// not dense.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct State(u32);

impl State {
    pub(crate) fn fresh() -> Self {
        State(NEXT_STATE_ID.fetch_add(1, Ordering::Relaxed))
    }

    #[inline]
    pub(crate) fn id(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "s{}", self.0)
    }
}

/// The transition row of one state: for every input byte, the ordered list
/// of target states.
///
/// Target lists keep their insertion order and may contain duplicates;
/// [`TransitionRow::add_parallel_transition`] relies on both.
#[derive(Clone)]
pub struct TransitionRow {
    targets: [Vec<State>; 128],
}

impl TransitionRow {
    fn new() -> Self {
        Self { targets: std::array::from_fn(|_| Vec::new()) }
    }

    /// Targets reachable on `byte`. Bytes outside the 7-bit range have no
    /// transitions.
    #[inline]
    pub fn targets(&self, byte: u8) -> &[State] {
        match self.targets.get(byte as usize) {
            Some(targets) => targets.as_slice(),
            None => &[],
        }
    }

    /// Appends a transition on `byte` to `target`.
    pub(crate) fn add_transition(&mut self, target: State, byte: u8) {
        self.targets[byte as usize].push(target);
    }

    /// Wherever a target list already contains `anchor`, appends all of
    /// `new_targets` at the end of that list. Existing entries are never
    /// rewritten, and the appended entries may duplicate present ones;
    /// duplicates collapse at scan time, where reached states form a set.
    pub(crate) fn add_parallel_transition(
        &mut self,
        anchor: State,
        new_targets: &[State],
    ) {
        for targets in self.targets.iter_mut() {
            if targets.contains(&anchor) {
                targets.extend_from_slice(new_targets);
            }
        }
    }

    fn shrink_to_fit(&mut self) {
        for targets in self.targets.iter_mut() {
            targets.shrink_to_fit();
        }
    }
}

/// A nondeterministic finite automaton in transition-table form.
///
/// Every state that appears in the starting list, the accepting list, or
/// as a transition target owns a row in the table, possibly an empty one.
/// A freshly built table holds a single state that both starts and
/// accepts: it accepts the empty string and nothing else.
pub struct TransitionTable {
    pub(crate) table: FxHashMap<State, TransitionRow>,
    pub(crate) starting_states: Vec<State>,
    pub(crate) accepting_states: Vec<State>,
}

impl TransitionTable {
    pub(crate) fn new() -> Self {
        let state = State::fresh();
        let mut table = FxHashMap::default();
        table.insert(state, TransitionRow::new());
        Self {
            table,
            starting_states: vec![state],
            accepting_states: vec![state],
        }
    }

    /// True if `state` accepts.
    #[inline]
    pub(crate) fn is_accepting(&self, state: State) -> bool {
        self.accepting_states.contains(&state)
    }

    /// Targets reachable from `state` on `byte`.
    #[inline]
    pub(crate) fn transitions(&self, state: State, byte: u8) -> &[State] {
        self.table[&state].targets(byte)
    }

    /// Number of states in the table.
    pub(crate) fn state_count(&self) -> usize {
        self.table.len()
    }

    fn shrink_to_fit(&mut self) {
        for row in self.table.values_mut() {
            row.shrink_to_fit();
        }
    }
}

/// Cloning allocates fresh identities for every state and rewrites the
/// starting list, the accepting list, and every transition target under
/// the new identities: the clone shares no state with the original.
impl Clone for TransitionTable {
    fn clone(&self) -> Self {
        let renamed: FxHashMap<State, State> =
            self.table.keys().map(|&old| (old, State::fresh())).collect();

        let mut table = FxHashMap::with_capacity_and_hasher(
            self.table.len(),
            Default::default(),
        );
        for (old, row) in self.table.iter() {
            let mut new_row = TransitionRow::new();
            for (byte, targets) in row.targets.iter().enumerate() {
                new_row.targets[byte] =
                    targets.iter().map(|old| renamed[old]).collect();
            }
            table.insert(renamed[old], new_row);
        }

        Self {
            table,
            starting_states: self
                .starting_states
                .iter()
                .map(|old| renamed[old])
                .collect(),
            accepting_states: self
                .accepting_states
                .iter()
                .map(|old| renamed[old])
                .collect(),
        }
    }
}

impl fmt::Debug for TransitionTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "starting: {:?}", self.starting_states)?;
        writeln!(f, "accepting: {:?}", self.accepting_states)?;
        for state in self.table.keys().sorted() {
            for (byte, targets) in self.table[state].targets.iter().enumerate()
            {
                if !targets.is_empty() {
                    writeln!(f, "{state:?} --{byte:#04x}--> {targets:?}")?;
                }
            }
        }
        Ok(())
    }
}
