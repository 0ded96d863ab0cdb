//! Splits the raw bytes of a job file into header, recipe names and delimiters.
//!
//! A job file is an 8 byte header followed by recipe step names, each
//! terminated by a 4 byte delimiter whose first byte is NUL. The last step is
//! normally written without a delimiter. A stream that ends right after a
//! delimiter is missing its final step and is reported as corrupt.

use crate::model::{Token, TokenKind};
use log::debug;

pub const HEADER_LEN: usize = 8;
pub const DELIMITER_LEN: usize = 4;
pub const DELIMITER_LEAD: u8 = 0x00;

/// Tokens of one job file plus where the stream broke off, if it did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan {
    pub tokens: Vec<Token>,
    /// Cursor position at which the stream ended without a final recipe step.
    pub corrupt_at: Option<usize>,
}

impl Scan {
    pub fn is_corrupt(&self) -> bool {
        self.corrupt_at.is_some()
    }
}

enum State {
    Header,
    Candidate(usize),
    Terminal,
}

/// Tokenize a job file. Never fails: a malformed stream yields the tokens
/// collected so far and sets [`Scan::corrupt_at`].
///
/// The tokens cover `raw` exactly once, in order, so concatenating their
/// contents gives back the input.
pub fn scan(raw: &[u8]) -> Scan {
    let mut tokens = Vec::new();
    let mut corrupt_at = None;
    let mut state = State::Header;

    loop {
        state = match state {
            State::Header => {
                let end = HEADER_LEN.min(raw.len());
                tokens.push(Token::new(0, &raw[..end], TokenKind::Header));
                State::Candidate(HEADER_LEN)
            }
            State::Candidate(cursor) => match next_delimiter(raw, cursor) {
                Some(next) => {
                    let end = (next + DELIMITER_LEN).min(raw.len());
                    tokens.push(Token::new(
                        cursor,
                        &raw[cursor..next],
                        TokenKind::RecipeCandidate,
                    ));
                    tokens.push(Token::new(next, &raw[next..end], TokenKind::Delimiter));
                    State::Candidate(next + DELIMITER_LEN)
                }
                None if cursor + 1 < raw.len() => {
                    tokens.push(Token::new(
                        cursor,
                        &raw[cursor..],
                        TokenKind::RecipeCandidate,
                    ));
                    State::Terminal
                }
                None => {
                    if cursor < raw.len() {
                        tokens.push(Token::new(cursor, &raw[cursor..], TokenKind::Residue));
                    }
                    corrupt_at = Some(cursor.min(raw.len()));
                    State::Terminal
                }
            },
            State::Terminal => break,
        }
    }

    debug!(
        "Scanned {} bytes into {} tokens (corrupt: {})",
        raw.len(),
        tokens.len(),
        corrupt_at.is_some()
    );

    Scan { tokens, corrupt_at }
}

/// Position of the next delimiter lead byte strictly after `cursor`.
fn next_delimiter(raw: &[u8], cursor: usize) -> Option<usize> {
    let start = cursor + 1;
    raw.get(start..)?
        .iter()
        .position(|b| *b == DELIMITER_LEAD)
        .map(|i| start + i)
}

/// Recipe step names in stream order, without header, delimiters or
/// candidates that are really stray delimiter bytes.
pub fn recipe_steps(tokens: &[Token]) -> Vec<String> {
    tokens
        .iter()
        .filter(|t| t.is_recipe_step())
        .map(|t| t.text().into_owned())
        .collect()
}
