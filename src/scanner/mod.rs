/*! Scans text with a compiled pattern, reporting every matching span.

The scanner works line-relative: the input splits on `\n` with each line
keeping its terminator, and every line is simulated independently with the
offsets rebased afterwards. Within a line the scanner maintains a list of
live *attempts*. Each attempt is anchored at the offset where it was
spawned and carries the set of states the machine has reached since; one
fresh attempt is spawned before every byte, so matches starting anywhere
are found, including overlapping ones.

The `^` and `$` anchors need no special cases here: the line is simulated
as if it were wrapped in the two sentinel bytes, with one synthetic BOL
step before the first byte and one synthetic EOL step after the last
(lines ending in `\n` carry their own EOL byte; the synthetic step then
finds no transitions and retires the surviving attempts).
*/

use std::ops::Range;

use bstr::ByteSlice;
use log::debug;

use crate::compiler::compile;
use crate::nfa::{TransitionTable, BOL_BYTE, EOL_BYTE};
use crate::parser::validate;
use crate::tokenizer::tokenize;
use crate::Error;

mod stateset;

use stateset::StateSet;


/// The span of one match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Match {
    /// Half-open byte range within the scanned text.
    pub range: Range<usize>,
}

/// A live attempt: the states reached so far, and the offset within the
/// current line where the attempt was anchored.
struct Attempt {
    states: StateSet,
    start: usize,
}

/// A compiled pattern, ready to scan text.
///
/// Construction tokenizes, validates, and compiles the pattern; scanning
/// never fails. A `Matcher` doesn't change after construction, so a shared
/// one can serve concurrent [`Matcher::scan`] calls.
#[derive(Debug)]
pub struct Matcher {
    table: TransitionTable,
}

impl Matcher {
    /// Compiles `pattern` for left-to-right scanning.
    pub fn new(pattern: &str) -> Result<Self, Error> {
        Self::with_direction(pattern, false)
    }

    /// Compiles `pattern` for right-to-left scanning: the resulting
    /// matcher finds the mirror images of what [`Matcher::new`] would.
    pub fn reversed(pattern: &str) -> Result<Self, Error> {
        Self::with_direction(pattern, true)
    }

    fn with_direction(pattern: &str, reverse: bool) -> Result<Self, Error> {
        let mut stream = tokenize(pattern).ok_or(Error::TrailingEscape)?;
        if !validate(&mut stream) {
            return Err(Error::MalformedPattern);
        }
        Ok(Self { table: compile(&mut stream, reverse) })
    }

    /// Reports every matching span in `text`.
    ///
    /// Matches are emitted in simulation order: earlier lines first,
    /// within a line ordered by the byte step that completed them, and
    /// within one step by attempt age, oldest first. Every accepting step
    /// of a live attempt emits, so quantified patterns report overlapping
    /// spans; only empty spans are suppressed.
    pub fn scan(&self, text: &str) -> Vec<Match> {
        let mut matches = Vec::new();
        let mut base = 0;

        for line in text.as_bytes().lines_with_terminator() {
            debug!("scanning line {:?} at offset {base}", line.as_bstr());
            self.scan_line(line, base, &mut matches);
            base += line.len();
        }

        matches
    }

    /// True if `text` contains at least one match.
    pub fn is_match(&self, text: &str) -> bool {
        !self.scan(text).is_empty()
    }

    fn scan_line(&self, line: &[u8], base: usize, matches: &mut Vec<Match>) {
        let mut attempts: Vec<Attempt> = Vec::new();
        let mut scratch = StateSet::new();

        // Anchor an attempt at offset 0 and feed it the BOL sentinel.
        self.spawn(&mut attempts, 0);
        self.step(&mut attempts, &mut scratch, BOL_BYTE, 0, base, matches);

        for (i, &byte) in line.iter().enumerate() {
            self.spawn(&mut attempts, i);
            self.step(&mut attempts, &mut scratch, byte, i + 1, base, matches);
        }

        // End-of-text counts as end-of-line: the EOL step runs even when
        // the line carries no trailing newline.
        self.step(
            &mut attempts,
            &mut scratch,
            EOL_BYTE,
            line.len(),
            base,
            matches,
        );
    }

    /// Appends a new attempt anchored at `start`, seeded with the starting
    /// states.
    fn spawn(&self, attempts: &mut Vec<Attempt>, start: usize) {
        let mut states = StateSet::new();
        for &state in self.table.starting_states.iter() {
            states.insert(state);
        }
        attempts.push(Attempt { states, start });
    }

    /// Advances every live attempt by one input byte. Attempts whose state
    /// set empties are dropped; an attempt that reaches an accepting state
    /// emits a span ending at `end`, unless that span would be empty.
    fn step(
        &self,
        attempts: &mut Vec<Attempt>,
        scratch: &mut StateSet,
        byte: u8,
        end: usize,
        base: usize,
        matches: &mut Vec<Match>,
    ) {
        attempts.retain_mut(|attempt| {
            scratch.clear();
            for &state in attempt.states.iter() {
                for &target in self.table.transitions(state, byte) {
                    scratch.insert(target);
                }
            }
            if scratch.is_empty() {
                return false;
            }
            std::mem::swap(&mut attempt.states, scratch);

            if end > attempt.start
                && attempt.states.iter().any(|&s| self.table.is_accepting(s))
            {
                matches.push(Match {
                    range: base + attempt.start..base + end,
                });
            }
            true
        });
    }
}
