//! # NoteTable
//!
//! Maps note names (`"a"`, `"c#"`, `"eb"`, ...) to MIDI key numbers in the
//! octave starting at A3 (key 45). Built once and passed by reference.

use std::collections::HashMap;

use crate::error::{MelodyError, Result};

/// MIDI key number of A3, the lowest root the table offers.
pub const A3: u8 = 45;

/// Immutable note-name lookup table.
#[derive(Debug, Clone)]
pub struct NoteTable {
    codes: HashMap<String, u8>,
}

impl NoteTable {
    /// Naturals `a`..`g` ascending from A3, with `#` on every natural except
    /// `b`/`e` and `b` (flat) on every natural except `c`/`f`.
    pub fn standard() -> Self {
        // Semitone offsets of the naturals from A.
        const NATURALS: [(char, u8); 7] = [
            ('a', 0),
            ('b', 2),
            ('c', 3),
            ('d', 5),
            ('e', 7),
            ('f', 8),
            ('g', 10),
        ];

        let mut codes = HashMap::with_capacity(NATURALS.len() * 3);
        for (name, offset) in NATURALS {
            let code = A3 + offset;
            codes.insert(name.to_string(), code);
            if name != 'b' && name != 'e' {
                codes.insert(format!("{}#", name), code + 1);
            }
            if name != 'c' && name != 'f' {
                codes.insert(format!("{}b", name), code - 1);
            }
        }

        Self { codes }
    }

    /// Resolves a note name, ignoring case and surrounding whitespace.
    ///
    /// ```rust
    /// use genmelody::music::NoteTable;
    ///
    /// let table = NoteTable::standard();
    /// assert_eq!(table.code("A").unwrap(), 45);
    /// assert_eq!(table.code("c#").unwrap(), 49);
    /// assert!(table.code("h").is_err());
    /// ```
    pub fn code(&self, name: &str) -> Result<u8> {
        let key = name.trim().to_lowercase();
        self.codes
            .get(&key)
            .copied()
            .ok_or_else(|| MelodyError::UnknownNote(name.to_string()))
    }

    /// All names, sorted by key number then name.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<(&str, u8)> = self.codes.iter().map(|(n, c)| (n.as_str(), *c)).collect();
        names.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(b.0)));
        names.into_iter().map(|(n, _)| n).collect()
    }
}

impl Default for NoteTable {
    fn default() -> Self {
        Self::standard()
    }
}
