/*! A line-oriented regular expression engine that reports every matching
span.

`linescan` compiles a small regular-expression dialect into a
nondeterministic finite automaton in transition-table form and simulates
that automaton over text, line by line. The simulation keeps one live
match attempt per starting offset, so every matching span is found,
including overlapping ones; spans are reported as half-open byte ranges
into the scanned text.

The dialect covers literal bytes, escaped metacharacters, the wildcard
`.`, the reserved classes `\s`, `\S`, `\d`, `\D`, `\w`, `\W`, bracket
classes with ranges and negation, grouping, alternation, the `*`, `+` and
`?` quantifiers, and the `^` / `$` line anchors. The input alphabet is
7-bit ASCII.

# Example

```rust
use linescan::Matcher;

let matcher = Matcher::new("ab").unwrap();

let spans: Vec<_> = matcher
    .scan("xabyab")
    .into_iter()
    .map(|m| (m.range.start, m.range.end))
    .collect();

assert_eq!(spans, vec![(1, 3), (4, 6)]);
```

The usual entry point is [`Matcher`], which runs the whole pipeline at
construction time. For callers that want to reuse a token stream or look
at the stages individually, the stages are also exposed on their own:
[`tokenize`] produces a [`TokenStream`], [`validate`] checks it, and
[`compile`] turns a validated stream into a [`TransitionTable`].

Anchors are implemented with two reserved sentinel bytes that the scanner
injects around every line: byte `2` for beginning-of-line and byte `10`
(the newline itself) for end-of-line. A pattern matching a literal byte
`2` has no defined behavior.
*/

#![deny(missing_docs)]

pub use compiler::compile;
pub use nfa::TransitionTable;
pub use parser::validate;
pub use scanner::Match;
pub use scanner::Matcher;
pub use tokenizer::tokenize;
pub use tokenizer::NormalKind;
pub use tokenizer::SetKind;
pub use tokenizer::Token;
pub use tokenizer::TokenStream;

use thiserror::Error;

mod compiler;
mod nfa;
mod parser;
mod scanner;
mod tokenizer;

#[cfg(test)]
mod tests;

/// The two ways constructing a [`Matcher`] can fail. Scanning never
/// fails.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The pattern ends with a `\` that escapes nothing.
    #[error("trailing escape at the end of the pattern")]
    TrailingEscape,

    /// The pattern does not conform to the grammar accepted by
    /// [`validate`].
    #[error("malformed pattern")]
    MalformedPattern,
}
