/*! Turns pattern strings into token streams.

Tokenization is the first step of compiling a pattern. The raw lexemes are
recognized by a [`logos`] lexer over the pattern bytes; a conversion layer
then produces dual-tagged [`Token`]s, resolving the readings that depend on
context (`^` right after `[` is a class negation, anywhere else a line
anchor). The resulting [`TokenStream`] is a non-destructive cursor that the
validator and the compiler both walk, each resetting or consuming it as
needed.
*/

use logos::Logos;

mod tokens;

pub use tokens::{NormalKind, SetKind, Token};

#[cfg(test)]
mod tests;

/// Raw lexemes recognized by the `logos` lexer.
///
/// These are one-to-one with spans of the pattern; [`tokenize`] converts
/// them into dual-tagged [`Token`]s.
#[derive(Logos, Clone, Copy, Debug, PartialEq)]
#[logos(source = [u8])]
enum RawToken {
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LSet,
    #[token("]")]
    RSet,
    #[token("^")]
    Caret,
    #[token("$")]
    Dollar,
    #[token(".")]
    Dot,
    #[token("|")]
    Pipe,
    #[token("+")]
    Plus,
    #[token("*")]
    Star,
    #[token("?")]
    Question,
    #[token("-")]
    Dash,

    // A backslash followed by any ASCII byte. A backslash at the very end
    // of the pattern matches no rule and surfaces as a lexing error.
    #[regex(r"\\[\x00-\x7f]")]
    Escape,

    // Any other ASCII byte stands for itself.
    #[regex(r"[^()\[\]^$.|+*?\-\\\x80-\xff]")]
    Byte,
}

/// Converts a pattern into its token stream.
///
/// Returns `None` when the pattern cannot be tokenized: a trailing `\` that
/// escapes nothing, or a byte outside the 7-bit ASCII range. The returned
/// stream always ends with exactly one terminator token.
pub fn tokenize(pattern: &str) -> Option<TokenStream> {
    let mut lexer = RawToken::lexer(pattern.as_bytes());
    let mut tokens = Vec::new();
    let mut prev = None;

    while let Some(raw) = lexer.next() {
        let raw = raw.ok()?;
        tokens.push(convert_token(raw, lexer.slice(), prev));
        prev = Some(raw);
    }

    tokens.push(Token::TERMINATOR);
    Some(TokenStream::new(tokens))
}

fn convert_token(raw: RawToken, slice: &[u8], prev: Option<RawToken>) -> Token {
    match raw {
        RawToken::LParen => normal(NormalKind::LParen, b'('),
        RawToken::RParen => normal(NormalKind::RParen, b')'),
        RawToken::LSet => Token {
            normal: NormalKind::LSet,
            set: SetKind::LSet,
            byte: b'[',
        },
        RawToken::RSet => Token {
            normal: NormalKind::RSet,
            set: SetKind::RSet,
            byte: b']',
        },
        // `^` right after `[` reads as a class negation; anywhere else it
        // anchors to the beginning of the line.
        RawToken::Caret if prev == Some(RawToken::LSet) => Token {
            normal: NormalKind::Character,
            set: SetKind::Neg,
            byte: b'^',
        },
        RawToken::Caret => normal(NormalKind::Bol, b'^'),
        RawToken::Dollar => normal(NormalKind::Eol, b'$'),
        RawToken::Dot => normal(NormalKind::ReservedSet, b'.'),
        RawToken::Pipe => normal(NormalKind::Or, b'|'),
        RawToken::Plus | RawToken::Star | RawToken::Question => {
            normal(NormalKind::PostModifier, slice[0])
        }
        RawToken::Dash => Token {
            normal: NormalKind::Character,
            set: SetKind::Range,
            byte: b'-',
        },
        RawToken::Escape => match slice[1] {
            c @ (b's' | b'S' | b'w' | b'W' | b'd' | b'D') => Token {
                normal: NormalKind::ReservedSet,
                set: SetKind::ReservedSet,
                byte: c,
            },
            c @ (b'b' | b'B') => normal(NormalKind::Boundary, c),
            c => normal(NormalKind::Character, c),
        },
        RawToken::Byte => normal(NormalKind::Character, slice[0]),
    }
}

fn normal(kind: NormalKind, byte: u8) -> Token {
    Token { normal: kind, set: SetKind::Character, byte }
}

/// A non-destructive cursor over a tokenized pattern.
///
/// The stream ends with a single terminator token and the cursor never
/// moves past it: popping at the terminator returns the terminator again
/// without advancing. The stream is empty when the cursor sits on the
/// terminator, and [`TokenStream::reset`] rewinds it to the first token.
#[derive(Clone, Debug)]
pub struct TokenStream {
    tokens: Vec<Token>,
    cursor: usize,
}

impl TokenStream {
    fn new(tokens: Vec<Token>) -> Self {
        debug_assert_eq!(tokens.last(), Some(&Token::TERMINATOR));
        Self { tokens, cursor: 0 }
    }

    /// Returns the token under the cursor without consuming it.
    #[inline]
    pub fn peek(&self) -> Token {
        self.tokens[self.cursor]
    }

    /// Returns the token right after the one under the cursor. At the end
    /// of the stream this is the terminator itself.
    #[inline]
    pub fn lookahead(&self) -> Token {
        self.tokens
            .get(self.cursor + 1)
            .copied()
            .unwrap_or(Token::TERMINATOR)
    }

    /// Consumes and returns the token under the cursor.
    pub fn pop(&mut self) -> Token {
        let token = self.tokens[self.cursor];
        if token.normal != NormalKind::Terminator {
            self.cursor += 1;
        }
        token
    }

    /// Consumes the current token if its normal-context kind is one of
    /// `kinds`. Returns whether a token was consumed.
    pub fn expect(&mut self, kinds: &[NormalKind]) -> bool {
        let matched = kinds.contains(&self.peek().normal);
        if matched {
            self.pop();
        }
        matched
    }

    /// Consumes the current token if its set-context kind is one of
    /// `kinds`. Returns whether a token was consumed.
    pub fn expect_set(&mut self, kinds: &[SetKind]) -> bool {
        let matched = kinds.contains(&self.peek().set);
        if matched {
            self.pop();
        }
        matched
    }

    /// Consumes the current token unless its normal-context kind is one of
    /// `kinds`. Returns whether a token was consumed; an empty stream
    /// consumes nothing.
    pub fn reject(&mut self, kinds: &[NormalKind]) -> bool {
        if self.is_empty() {
            return false;
        }
        let matched = kinds.contains(&self.peek().normal);
        if !matched {
            self.pop();
        }
        !matched
    }

    /// Rewinds the cursor to the first token.
    pub fn reset(&mut self) {
        self.cursor = 0;
    }

    /// True when the cursor sits on the terminator.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.peek().normal == NormalKind::Terminator
    }

    /// Number of tokens left before the terminator.
    #[inline]
    pub fn len(&self) -> usize {
        self.tokens.len() - 1 - self.cursor
    }
}
