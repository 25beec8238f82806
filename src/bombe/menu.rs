//! Crib validation and the cable menu.
//!
//! A crib aligns a guessed plaintext against a stretch of ciphertext.
//! Every aligned position contributes one edge to the menu: the two
//! letters are wired together through the scrambler at that offset. Only
//! letters that occur in the crib have cables on the board.

use crate::charset::letter_index;
use crate::error::EnigmaError;

/// One menu edge at a crib position: this cable connects to `cable`
/// through the logical scrambler at `position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    pub position: usize,
    pub cable: usize,
}

/// The cable graph built from a validated crib.
pub struct Menu {
    plain_text: String,
    cipher_text: String,
    menu_chars: Vec<usize>,
    cables: [Vec<Connection>; 26],
}

impl Menu {
    /// Validates the crib alignment and wires the cable graph.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidCrib`] when the texts differ in
    /// length, contain a non-alphabetic character, or agree at any
    /// position. A letter can never encipher to itself, so an alignment
    /// with a match is physically impossible and is rejected before any
    /// search starts.
    pub fn new(plain_text: &str, cipher_text: &str) -> Result<Self, EnigmaError> {
        let plain_text = plain_text.to_ascii_uppercase();
        let cipher_text = cipher_text.to_ascii_uppercase();

        if plain_text.len() != cipher_text.len() {
            return Err(EnigmaError::InvalidCrib(format!(
                "plain text length {} does not match cipher text length {}",
                plain_text.len(),
                cipher_text.len()
            )));
        }
        if plain_text.is_empty() {
            return Err(EnigmaError::InvalidCrib("crib is empty".to_string()));
        }
        for text in [&plain_text, &cipher_text] {
            for c in text.chars() {
                if letter_index(c).is_none() {
                    return Err(EnigmaError::InvalidCrib(format!(
                        "character {c} is not valid, must be A-Z"
                    )));
                }
            }
        }

        let plain: Vec<usize> = plain_text.chars().map(|c| letter_index(c).unwrap_or(0)).collect();
        let cipher: Vec<usize> =
            cipher_text.chars().map(|c| letter_index(c).unwrap_or(0)).collect();

        for (i, (&p, &c)) in plain.iter().zip(cipher.iter()).enumerate() {
            if p == c {
                return Err(EnigmaError::InvalidCrib(format!(
                    "plain and cipher texts share the letter {} at index {i}",
                    plain_text.as_bytes()[i] as char
                )));
            }
        }

        let mut cables: [Vec<Connection>; 26] = Default::default();
        for (i, (&p, &c)) in plain.iter().zip(cipher.iter()).enumerate() {
            cables[p].push(Connection { position: i, cable: c });
            cables[c].push(Connection { position: i, cable: p });
        }
        let menu_chars: Vec<usize> = (0..26).filter(|&l| !cables[l].is_empty()).collect();

        Ok(Menu { plain_text, cipher_text, menu_chars, cables })
    }

    pub fn plain_text(&self) -> &str {
        &self.plain_text
    }

    pub fn cipher_text(&self) -> &str {
        &self.cipher_text
    }

    /// Crib length, which is also the number of logical scramblers a
    /// trace can route through.
    pub fn length(&self) -> usize {
        self.plain_text.len()
    }

    /// Sorted letter indices that have cables on the board.
    pub fn menu_chars(&self) -> &[usize] {
        &self.menu_chars
    }

    pub fn contains(&self, letter: usize) -> bool {
        !self.cables[letter].is_empty()
    }

    pub fn connections(&self, cable: usize) -> &[Connection] {
        &self.cables[cable]
    }

    /// The 26-column menu header used in register dumps: the letter
    /// where a cable exists, `_` where none does.
    pub fn menu_line(&self) -> String {
        (0..26)
            .map(|l| if self.contains(l) { (b'A' + l as u8) as char } else { '_' })
            .collect()
    }
}
