/*! Builds transition tables by composing smaller ones.

[`TableBuilder`] wraps a [`TransitionTable`] under construction and exposes
the operations the compiler drives: sequencing (`+=`), alternation (`|=`),
the quantifiers, the line anchors, and the character-level appenders. Every
operation is closed over builders, so machines for sub-expressions compose
into machines for their enclosing expressions without any intermediate
representation.

None of the operations introduce epsilon transitions. Sequencing instead
grafts the right-hand machine's entry points as parallel transitions
wherever the left-hand machine reaches an accepting state, and repetition
loops acceptance back to the starting states the same way.
*/

use std::mem;
use std::ops::{AddAssign, BitOrAssign};

use rustc_hash::FxHashMap;

use super::{State, TransitionRow, TransitionTable, BOL_BYTE, EOL_BYTE};

/// A [`TransitionTable`] under construction.
///
/// A new builder holds the trivial one-state table, which accepts the
/// empty string; composition then grows it. Cloning a builder deep-copies
/// the table with fresh state identities throughout.
#[derive(Clone, Debug)]
pub struct TableBuilder {
    table: TransitionTable,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self { table: TransitionTable::new() }
    }

    /// Consumes the builder and yields the finished table.
    pub fn into_table(self) -> TransitionTable {
        self.table
    }

    /// The table built so far.
    pub fn table(&self) -> &TransitionTable {
        &self.table
    }

    /// Appends a transition on `byte` out of every accepting state into
    /// one fresh state, which becomes the only accepting state.
    pub fn add_char(&mut self, byte: u8) {
        let new_accept = State::fresh();
        let accepting =
            mem::replace(&mut self.table.accepting_states, vec![new_accept]);
        for accept in accepting {
            self.table
                .table
                .get_mut(&accept)
                .unwrap()
                .add_transition(new_accept, byte);
        }
        self.table.table.insert(new_accept, TransitionRow::new());
    }

    /// Appends a two-state machine that steps from its start to its accept
    /// on every byte in `set`. Duplicate bytes produce duplicate
    /// transitions, which is harmless.
    pub fn add_char_set(&mut self, set: &[u8]) {
        let mut machine = TableBuilder::new();
        let start = machine.table.starting_states[0];
        let accept = State::fresh();
        for &byte in set {
            machine
                .table
                .table
                .get_mut(&start)
                .unwrap()
                .add_transition(accept, byte);
        }
        machine.table.table.insert(accept, TransitionRow::new());
        machine.table.accepting_states = vec![accept];
        *self += machine;
    }

    /// Appends the complement of `set` within the printable range
    /// `[32..127)`.
    pub fn add_neg_char_set(&mut self, set: &[u8]) {
        let complement: Vec<u8> =
            (32u8..127).filter(|byte| !set.contains(byte)).collect();
        self.add_char_set(&complement);
    }

    /// Appends the wildcard: every printable byte except space,
    /// `[33..127)`. The space exclusion is deliberate.
    pub fn add_dot(&mut self) {
        let wildcard: Vec<u8> = (33u8..127).collect();
        self.add_char_set(&wildcard);
    }

    /// Kleene star: loops acceptance back to the starting states, then
    /// marks every starting state as accepting for the zero-occurrence
    /// case.
    pub fn star(&mut self) {
        let accepting = self.table.accepting_states.clone();
        let starting = self.table.starting_states.clone();
        for accept in accepting {
            self.add_parallel_transitions(accept, &starting);
        }
        self.table.accepting_states.extend(starting);
    }

    /// One or more occurrences: one mandatory copy followed by the starred
    /// form.
    pub fn plus(&mut self) {
        let mut tail = self.clone();
        tail.star();
        *self += tail;
    }

    /// Zero or one occurrence: every starting state also accepts.
    pub fn question(&mut self) {
        let starting = self.table.starting_states.clone();
        self.table.accepting_states.extend(starting);
    }

    /// Anchors the machine to the beginning of a line by prefixing a
    /// transition on the BOL sentinel byte.
    pub fn bol(&mut self) {
        let mut anchored = TableBuilder::new();
        anchored.add_char(BOL_BYTE);
        anchored += mem::take(self);
        *self = anchored;
    }

    /// Anchors the machine to the end of a line by appending a transition
    /// on the newline byte.
    pub fn eol(&mut self) {
        let mut anchor = TableBuilder::new();
        anchor.add_char(EOL_BYTE);
        *self += anchor;
    }

    /// Rebuilds the table with every transition reversed and the starting
    /// and accepting lists swapped. The result matches the mirror image of
    /// the original language.
    pub fn reverse(&mut self) {
        let mut reversed: FxHashMap<State, TransitionRow> = self
            .table
            .table
            .keys()
            .map(|&state| (state, TransitionRow::new()))
            .collect();

        for (&source, row) in self.table.table.iter() {
            for byte in 0..=127u8 {
                for &target in row.targets(byte) {
                    reversed
                        .get_mut(&target)
                        .unwrap()
                        .add_transition(source, byte);
                }
            }
        }

        self.table.table = reversed;
        mem::swap(
            &mut self.table.starting_states,
            &mut self.table.accepting_states,
        );
    }

    /// Releases excess row capacity. No semantic effect.
    pub fn shrink(&mut self) {
        self.table.shrink_to_fit();
    }

    /// Grafts `targets` as parallel transitions wherever any row in the
    /// table currently reaches `anchor`.
    fn add_parallel_transitions(&mut self, anchor: State, targets: &[State]) {
        for row in self.table.table.values_mut() {
            row.add_parallel_transition(anchor, targets);
        }
    }
}

impl Default for TableBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// `lhs += rhs` sequences `rhs` after `lhs`: wherever a transition in
/// `lhs` reaches one of its accepting states, parallel transitions into
/// `rhs`'s starting states are grafted on the same byte, and `rhs`'s
/// accepting states replace `lhs`'s. A trivial one-state `lhs` simply
/// becomes `rhs`.
///
/// Because no epsilon transitions are introduced, the grafted entries into
/// `rhs` sit behind at least one byte of `lhs`. When `lhs` accepts the
/// empty string this is observable: its starting states accept but nothing
/// transitions *to* them, so the zero-length path through `lhs` does not
/// reach `rhs`. The compiler appends bare literals with
/// [`TableBuilder::add_char`], which grows edges out of the accepting
/// states themselves and is not affected.
impl AddAssign for TableBuilder {
    fn add_assign(&mut self, rhs: TableBuilder) {
        if self.table.table.len() == 1 {
            *self = rhs;
            return;
        }

        let accepting = mem::take(&mut self.table.accepting_states);
        for accept in accepting {
            self.add_parallel_transitions(
                accept,
                &rhs.table.starting_states,
            );
        }

        self.table.table.extend(rhs.table.table);
        self.table.accepting_states = rhs.table.accepting_states;
    }
}

/// `lhs |= rhs` keeps both machines live from entry: starting lists,
/// accepting lists, and tables are unioned.
impl BitOrAssign for TableBuilder {
    fn bitor_assign(&mut self, rhs: TableBuilder) {
        self.table.starting_states.extend(rhs.table.starting_states);
        self.table.accepting_states.extend(rhs.table.accepting_states);
        self.table.table.extend(rhs.table.table);
    }
}
