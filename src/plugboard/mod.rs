//! Plugboard variants.
//!
//! Two interchangeable boards sit between the keyboard and the rotor
//! stack: the plain stecker board with symmetric socket pairs, and the
//! Uhr box, which routes ten plug pairs through a 40-position rotary
//! connector. Both expose the same large-contact / small-contact
//! translation contract to the machine.

mod stecker;
mod uhr;

pub use stecker::SteckerPlugboard;
pub use uhr::{UhrBox, UhrBoxPlugboard};

use crate::charset::CharSetFlag;
use crate::error::EnigmaError;

/// The machine's plugboard, selected once per configuration change.
pub enum Plugboard {
    Stecker(SteckerPlugboard),
    UhrBox(Box<UhrBoxPlugboard>),
}

impl Plugboard {
    /// Builds the variant named by a mode flag, 'S' or 'U'.
    ///
    /// # Errors
    /// Returns [`EnigmaError::PlugboardMode`] on any other flag.
    pub fn from_mode(mode: char) -> Result<Self, EnigmaError> {
        match mode {
            'S' | 's' => Ok(Plugboard::Stecker(SteckerPlugboard::new())),
            'U' | 'u' => Ok(Plugboard::UhrBox(Box::new(UhrBoxPlugboard::new()))),
            _ => Err(EnigmaError::PlugboardMode(mode)),
        }
    }

    /// Mode flag of the active variant.
    pub fn mode(&self) -> char {
        match self {
            Plugboard::Stecker(_) => 'S',
            Plugboard::UhrBox(_) => 'U',
        }
    }

    /// Translation in the keyboard-to-scrambler direction.
    pub fn lg_contact_output(&self, index: usize) -> usize {
        match self {
            Plugboard::Stecker(board) => board.lg_contact_output(index),
            Plugboard::UhrBox(board) => board.lg_contact_output(index),
        }
    }

    /// Translation in the scrambler-to-lampboard direction.
    pub fn sm_contact_output(&self, index: usize) -> usize {
        match self {
            Plugboard::Stecker(board) => board.sm_contact_output(index),
            Plugboard::UhrBox(board) => board.sm_contact_output(index),
        }
    }

    /// True when the board carries a legal number of connections.
    pub fn valid_plugboard(&self) -> bool {
        match self {
            Plugboard::Stecker(board) => board.valid_plugboard(),
            Plugboard::UhrBox(board) => board.valid_plugboard(),
        }
    }

    /// Removes every connection.
    pub fn clear(&mut self) {
        match self {
            Plugboard::Stecker(board) => board.clear(),
            Plugboard::UhrBox(board) => board.clear(),
        }
    }

    pub fn char_set_flag(&self) -> CharSetFlag {
        match self {
            Plugboard::Stecker(board) => board.char_set_flag(),
            Plugboard::UhrBox(board) => board.char_set_flag(),
        }
    }

    pub fn set_char_set_flag(&mut self, flag: CharSetFlag) {
        match self {
            Plugboard::Stecker(board) => board.set_char_set_flag(flag),
            Plugboard::UhrBox(board) => board.set_char_set_flag(flag),
        }
    }
}

impl Default for Plugboard {
    fn default() -> Self {
        Plugboard::Stecker(SteckerPlugboard::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_mode() {
        assert_eq!(Plugboard::from_mode('S').unwrap().mode(), 'S');
        assert_eq!(Plugboard::from_mode('u').unwrap().mode(), 'U');
        assert_eq!(
            Plugboard::from_mode('X').err(),
            Some(EnigmaError::PlugboardMode('X'))
        );
    }

    #[test]
    fn test_default_is_passthrough_stecker() {
        let board = Plugboard::default();
        assert_eq!(board.mode(), 'S');
        assert!(board.valid_plugboard());
        for index in 0..26 {
            assert_eq!(board.lg_contact_output(index), index);
            assert_eq!(board.sm_contact_output(index), index);
        }
    }
}
