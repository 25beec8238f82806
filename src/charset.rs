//! Character sets used across the machine.
//!
//! Every component that deals in symbols binds to one of two 26-element
//! character sets: the letters A-Z or the two-digit numbers "01".."26".
//! Both map bijectively onto the dense contact indices 0..=25, and all
//! signal-path arithmetic happens on indices. Switching the active set on
//! a running component re-encodes stored symbol state by index, never by
//! symbol identity.

use crate::error::EnigmaError;

/// The letter character set, A-Z.
pub const LETTERS: [&str; 26] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R", "S",
    "T", "U", "V", "W", "X", "Y", "Z",
];

/// The numeric character set, "01".."26".
pub const NUMBERS: [&str; 26] = [
    "01", "02", "03", "04", "05", "06", "07", "08", "09", "10", "11", "12", "13", "14", "15", "16",
    "17", "18", "19", "20", "21", "22", "23", "24", "25", "26",
];

/// Selects the active 26-symbol character set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharSetFlag {
    /// Letters A-Z (flag 'L').
    #[default]
    Letters,
    /// Two-digit numbers "01".."26" (flag 'N').
    Numbers,
}

impl CharSetFlag {
    /// Parses a character set flag from its single-letter form.
    ///
    /// # Errors
    /// Returns [`EnigmaError::CharacterSetFlag`] if `flag` is not 'L', 'l',
    /// 'N' or 'n'.
    pub fn from_char(flag: char) -> Result<Self, EnigmaError> {
        match flag {
            'L' | 'l' => Ok(CharSetFlag::Letters),
            'N' | 'n' => Ok(CharSetFlag::Numbers),
            other => Err(EnigmaError::CharacterSetFlag(other)),
        }
    }

    /// Returns the single-letter form of the flag.
    pub fn as_char(self) -> char {
        match self {
            CharSetFlag::Letters => 'L',
            CharSetFlag::Numbers => 'N',
        }
    }

    /// Returns the character set selected by this flag.
    pub fn character_set(self) -> &'static [&'static str; 26] {
        match self {
            CharSetFlag::Letters => &LETTERS,
            CharSetFlag::Numbers => &NUMBERS,
        }
    }

    /// Returns the index of `symbol` in the active character set.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidSymbol`] if `symbol` is not a member.
    pub fn index_of(self, symbol: &str) -> Result<usize, EnigmaError> {
        self.character_set()
            .iter()
            .position(|s| *s == symbol)
            .ok_or_else(|| EnigmaError::InvalidSymbol(symbol.to_string()))
    }

    /// Returns the symbol at `index` in the active character set.
    ///
    /// # Errors
    /// Returns [`EnigmaError::IndexOutOfRange`] if `index` is not 0..=25.
    pub fn symbol_at(self, index: usize) -> Result<&'static str, EnigmaError> {
        self.character_set()
            .get(index)
            .copied()
            .ok_or(EnigmaError::IndexOutOfRange(index))
    }
}

/// Returns the contact index of an uppercase letter A-Z, if it is one.
///
/// The physical keyboard and lampboard always work in letters regardless
/// of the character set flags, so this helper stays on `char`.
pub fn letter_index(c: char) -> Option<usize> {
    if c.is_ascii_uppercase() {
        Some(c as usize - 'A' as usize)
    } else {
        None
    }
}

/// Returns the uppercase letter at contact index 0..=25.
///
/// # Panics
/// Does not panic for indices in range; callers pass indices produced by
/// the 26-contact signal path.
pub fn index_letter(index: usize) -> char {
    (b'A' + (index % 26) as u8) as char
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flag_from_char() {
        assert_eq!(CharSetFlag::from_char('L').unwrap(), CharSetFlag::Letters);
        assert_eq!(CharSetFlag::from_char('n').unwrap(), CharSetFlag::Numbers);
        assert_eq!(
            CharSetFlag::from_char('X'),
            Err(EnigmaError::CharacterSetFlag('X'))
        );
    }

    #[test]
    fn test_character_sets_have_26_distinct_symbols() {
        for flag in [CharSetFlag::Letters, CharSetFlag::Numbers] {
            let set = flag.character_set();
            assert_eq!(set.len(), 26);
            for i in 0..26 {
                for j in (i + 1)..26 {
                    assert_ne!(set[i], set[j], "duplicate symbol in {:?}", flag);
                }
            }
        }
    }

    #[test]
    fn test_index_of_symbol_at_roundtrip() {
        for flag in [CharSetFlag::Letters, CharSetFlag::Numbers] {
            for i in 0..26 {
                let symbol = flag.symbol_at(i).unwrap();
                assert_eq!(flag.index_of(symbol).unwrap(), i);
            }
        }
    }

    #[test]
    fn test_index_of_invalid_symbol() {
        assert_eq!(
            CharSetFlag::Letters.index_of("01"),
            Err(EnigmaError::InvalidSymbol("01".to_string()))
        );
        assert_eq!(
            CharSetFlag::Numbers.index_of("A"),
            Err(EnigmaError::InvalidSymbol("A".to_string()))
        );
    }

    #[test]
    fn test_symbol_at_out_of_range() {
        assert_eq!(
            CharSetFlag::Letters.symbol_at(26),
            Err(EnigmaError::IndexOutOfRange(26))
        );
    }

    #[test]
    fn test_same_index_across_sets() {
        // Re-encoding by index maps "A" <-> "01", "Z" <-> "26".
        assert_eq!(CharSetFlag::Letters.index_of("A").unwrap(), 0);
        assert_eq!(CharSetFlag::Numbers.symbol_at(0).unwrap(), "01");
        assert_eq!(CharSetFlag::Letters.index_of("Z").unwrap(), 25);
        assert_eq!(CharSetFlag::Numbers.symbol_at(25).unwrap(), "26");
    }

    #[test]
    fn test_letter_index() {
        assert_eq!(letter_index('A'), Some(0));
        assert_eq!(letter_index('Z'), Some(25));
        assert_eq!(letter_index('a'), None);
        assert_eq!(letter_index('#'), None);
        assert_eq!(index_letter(0), 'A');
        assert_eq!(index_letter(25), 'Z');
    }
}
