// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Corpus assembly: one symbol sequence per response.
//!
//! Every version with content contributes its text followed by one separator:
//!
//! ```text
//! versions:  "abab"   (absent)   "ababab"
//! corpus:    a b a b ¹ a b a b a b ²
//! offsets:           4             11
//! ```
//!
//! Text characters become their Unicode scalar value. Separators live above
//! `char::MAX`, so no document can ever contain one and no LZ phrase can ever
//! match across a version boundary. Each separator is fresh (¹ ≠ ²), which
//! keeps phrases from matching one separator against another.

pub mod markup;

use std::borrow::Cow;

use crate::error::{Error, Result};
use crate::history::VersionRecord;

/// Lowest separator symbol: one past the largest Unicode scalar value.
pub const SEPARATOR_BASE: u32 = 0x11_0000;

/// The range separators are drawn from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeparatorAlphabet {
    start: u32,
    len: u32,
}

impl SeparatorAlphabet {
    /// Everything from [`SEPARATOR_BASE`] to `u32::MAX`.
    pub const FULL: SeparatorAlphabet = SeparatorAlphabet {
        start: SEPARATOR_BASE,
        len: u32::MAX - SEPARATOR_BASE + 1,
    };

    /// A custom range `[start, start + len)`. It must lie above `char::MAX`.
    pub fn new(start: u32, len: u32) -> Result<Self> {
        if start < SEPARATOR_BASE {
            return Err(Error::InvalidConfig(format!(
                "separator range must start at or above {:#x}, got {:#x}",
                SEPARATOR_BASE, start
            )));
        }
        if u64::from(start) + u64::from(len) > u64::from(u32::MAX) + 1 {
            return Err(Error::InvalidConfig(format!(
                "separator range {:#x}+{} overflows u32",
                start, len
            )));
        }
        Ok(Self { start, len })
    }

    pub fn capacity(&self) -> usize {
        self.len as usize
    }

    fn separators(self) -> Separators {
        Separators {
            next: u64::from(self.start),
            end: u64::from(self.start) + u64::from(self.len),
            issued: 0,
        }
    }
}

impl Default for SeparatorAlphabet {
    fn default() -> Self {
        Self::FULL
    }
}

/// Monotonic separator generator. Running dry is a configuration error.
#[derive(Debug)]
struct Separators {
    next: u64,
    end: u64,
    issued: usize,
}

impl Separators {
    fn draw(&mut self) -> Result<u32> {
        if self.next >= self.end {
            return Err(Error::SeparatorsExhausted(self.issued));
        }
        let symbol = self.next as u32;
        self.next += 1;
        self.issued += 1;
        Ok(symbol)
    }
}

/// Returns true when `symbol` lies in the separator range.
pub fn is_separator(symbol: u32) -> bool {
    symbol >= SEPARATOR_BASE
}

/// A concatenated, separator-delimited version history.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Corpus {
    symbols: Vec<u32>,
    separators: Vec<usize>,
    version_lengths: Vec<usize>,
}

impl Corpus {
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn symbols(&self) -> &[u32] {
        &self.symbols
    }

    /// Offsets of the separators, strictly increasing.
    pub fn separators(&self) -> &[usize] {
        &self.separators
    }

    /// Content length of each included version, in symbols.
    pub fn version_lengths(&self) -> &[usize] {
        &self.version_lengths
    }

    /// Number of versions that had content.
    pub fn version_count(&self) -> usize {
        self.separators.len()
    }

    pub fn into_parts(self) -> (Vec<u32>, Vec<usize>) {
        (self.symbols, self.separators)
    }
}

/// Builds a [`Corpus`] from a version history.
#[derive(Clone, Copy, Debug)]
pub struct CorpusAssembler {
    strip_markup: bool,
    alphabet: SeparatorAlphabet,
}

impl Default for CorpusAssembler {
    fn default() -> Self {
        Self {
            strip_markup: true,
            alphabet: SeparatorAlphabet::FULL,
        }
    }
}

impl CorpusAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reduce HTML content to plain text before concatenating.
    pub fn with_strip_markup(mut self, strip: bool) -> Self {
        self.strip_markup = strip;
        self
    }

    pub fn with_alphabet(mut self, alphabet: SeparatorAlphabet) -> Self {
        self.alphabet = alphabet;
        self
    }

    pub fn strips_markup(&self) -> bool {
        self.strip_markup
    }

    /// The text each included version contributes, in order.
    ///
    /// Versions without content are skipped, exactly as [`assemble`] skips
    /// them, so index `i` here lines up with version `i` of a factorization.
    ///
    /// [`assemble`]: CorpusAssembler::assemble
    pub fn version_texts<'a>(&self, history: &'a [VersionRecord]) -> Vec<Cow<'a, str>> {
        history
            .iter()
            .filter_map(VersionRecord::content)
            .map(|content| {
                if self.strip_markup {
                    Cow::Owned(markup::strip_markup(content))
                } else {
                    Cow::Borrowed(content)
                }
            })
            .collect()
    }

    pub fn assemble(&self, history: &[VersionRecord]) -> Result<Corpus> {
        let mut separators = self.alphabet.separators();
        let mut corpus = Corpus::default();

        for text in self.version_texts(history) {
            let before = corpus.symbols.len();
            corpus.symbols.extend(text.chars().map(u32::from));
            corpus.version_lengths.push(corpus.symbols.len() - before);

            corpus.separators.push(corpus.symbols.len());
            corpus.symbols.push(separators.draw()?);
        }

        Ok(corpus)
    }
}
