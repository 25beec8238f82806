//! Scrambler devices: reflectors and rotors.
//!
//! A rotor precomputes both of its translation directions for every core
//! offset, so enciphering a character is four table lookups per rotor no
//! matter where the rotor sits. The core offset is the rotor setting
//! minus the ring setting, modulo 26.

use crate::charset::{letter_index, CharSetFlag};
use crate::equipment::{DeviceKind, ReflectorSpec, RotorSpec};
use crate::error::EnigmaError;

fn wiring_map(wiring: &str) -> [usize; 26] {
    let mut map = [0usize; 26];
    for (i, c) in wiring.chars().enumerate() {
        map[i] = letter_index(c).unwrap_or(0);
    }
    map
}

/// A reflector. Translates one direction only and never steps.
#[derive(Debug, Clone)]
pub struct Reflector {
    id: &'static str,
    map: [usize; 26],
}

impl Reflector {
    /// Builds a reflector from its catalog entry.
    pub fn new(spec: &ReflectorSpec) -> Self {
        Reflector { id: spec.id, map: wiring_map(spec.wiring) }
    }

    /// Device id from the catalog, e.g. "UKW-B".
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Translates a contact index back toward the rotor stack.
    ///
    /// # Errors
    /// Returns [`EnigmaError::IndexOutOfRange`] above 25.
    pub fn output(&self, input: usize) -> Result<usize, EnigmaError> {
        if input >= 26 {
            return Err(EnigmaError::IndexOutOfRange(input));
        }
        Ok(self.map[input])
    }
}

/// A rotor with ring setting, rotor setting and turnover detection.
#[derive(Debug, Clone)]
pub struct Rotor {
    id: &'static str,
    kind: DeviceKind,
    /// Left-hand tables, keyboard side toward the reflector, one per
    /// core offset.
    lh: [[usize; 26]; 26],
    /// Right-hand tables, reflector side toward the keyboard.
    rh: [[usize; 26]; 26],
    turnover: [bool; 26],
    ring_setting: usize,
    rotor_setting: usize,
    flag: CharSetFlag,
}

impl Rotor {
    /// Builds a rotor from its catalog entry, ring and rotor settings at
    /// the first position.
    pub fn new(spec: &RotorSpec) -> Self {
        let forward = wiring_map(spec.wiring);
        let mut reverse = [0usize; 26];
        for (i, &out) in forward.iter().enumerate() {
            reverse[out] = i;
        }
        let mut lh = [[0usize; 26]; 26];
        let mut rh = [[0usize; 26]; 26];
        for offset in 0..26 {
            for input in 0..26 {
                lh[offset][input] = (forward[(input + offset) % 26] + 26 - offset) % 26;
                rh[offset][input] = (reverse[(input + offset) % 26] + 26 - offset) % 26;
            }
        }
        let mut turnover = [false; 26];
        for c in spec.turnover.chars() {
            if let Some(i) = letter_index(c) {
                turnover[i] = true;
            }
        }
        Rotor {
            id: spec.id,
            kind: spec.kind(),
            lh,
            rh,
            turnover,
            ring_setting: 0,
            rotor_setting: 0,
            flag: CharSetFlag::Letters,
        }
    }

    /// Device id from the catalog, e.g. "III".
    pub fn id(&self) -> &'static str {
        self.id
    }

    /// Static or dynamic, depending on the turnover characters.
    pub fn kind(&self) -> DeviceKind {
        self.kind
    }

    /// Character set used when reading settings as symbols.
    pub fn char_set_flag(&self) -> CharSetFlag {
        self.flag
    }

    pub fn set_char_set_flag(&mut self, flag: CharSetFlag) {
        self.flag = flag;
    }

    fn core_offset(&self) -> usize {
        (self.rotor_setting + 26 - self.ring_setting) % 26
    }

    /// Translates a contact index toward the reflector.
    ///
    /// # Errors
    /// Returns [`EnigmaError::IndexOutOfRange`] above 25.
    pub fn lh_output(&self, input: usize) -> Result<usize, EnigmaError> {
        if input >= 26 {
            return Err(EnigmaError::IndexOutOfRange(input));
        }
        Ok(self.lh[self.core_offset()][input])
    }

    /// Translates a contact index toward the keyboard.
    ///
    /// # Errors
    /// Returns [`EnigmaError::IndexOutOfRange`] above 25.
    pub fn rh_output(&self, input: usize) -> Result<usize, EnigmaError> {
        if input >= 26 {
            return Err(EnigmaError::IndexOutOfRange(input));
        }
        Ok(self.rh[self.core_offset()][input])
    }

    /// Current rotor setting as an index.
    pub fn rotor_setting(&self) -> usize {
        self.rotor_setting
    }

    /// Current rotor setting as a symbol in the active character set.
    pub fn rotor_setting_symbol(&self) -> &'static str {
        self.flag.character_set()[self.rotor_setting]
    }

    /// Sets the rotor setting from a symbol in the active character set.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidSymbol`] if the symbol is not in the
    /// set.
    pub fn set_rotor_setting(&mut self, symbol: &str) -> Result<(), EnigmaError> {
        self.rotor_setting = self.flag.index_of(symbol)?;
        Ok(())
    }

    /// Sets the rotor setting from a raw index.
    ///
    /// # Errors
    /// Returns [`EnigmaError::IndexOutOfRange`] above 25.
    pub fn set_rotor_setting_index(&mut self, index: usize) -> Result<(), EnigmaError> {
        if index >= 26 {
            return Err(EnigmaError::IndexOutOfRange(index));
        }
        self.rotor_setting = index;
        Ok(())
    }

    /// Current ring setting as an index.
    pub fn ring_setting(&self) -> usize {
        self.ring_setting
    }

    /// Current ring setting as a symbol in the active character set.
    pub fn ring_setting_symbol(&self) -> &'static str {
        self.flag.character_set()[self.ring_setting]
    }

    /// Sets the ring setting from a symbol in the active character set.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidSymbol`] if the symbol is not in the
    /// set.
    pub fn set_ring_setting(&mut self, symbol: &str) -> Result<(), EnigmaError> {
        self.ring_setting = self.flag.index_of(symbol)?;
        Ok(())
    }

    /// The wiring rendered through the active character set, input
    /// order.
    pub fn wire_characters(&self) -> Vec<&'static str> {
        let set = self.flag.character_set();
        (0..26).map(|i| set[self.lh[0][i]]).collect()
    }

    /// The turnover positions rendered through the active character
    /// set.
    pub fn turnover_characters(&self) -> Vec<&'static str> {
        let set = self.flag.character_set();
        (0..26).filter(|&i| self.turnover[i]).map(|i| set[i]).collect()
    }

    /// Zeroes both rotor and ring settings.
    pub fn reset(&mut self) {
        self.rotor_setting = 0;
        self.ring_setting = 0;
    }

    /// Zeroes the rotor setting only.
    pub fn default_rotor_setting(&mut self) {
        self.rotor_setting = 0;
    }

    /// True if the rotor currently shows a turnover character. Read
    /// before stepping.
    pub fn on_turnover(&self) -> bool {
        self.turnover[self.rotor_setting]
    }

    /// Advances the rotor setting one position, wrapping at the end of
    /// the character set.
    pub fn step(&mut self) {
        self.rotor_setting = (self.rotor_setting + 1) % 26;
    }
}

/// Any device that can occupy a scrambler cell. Rotors are boxed; their
/// precomputed tables dwarf a reflector.
#[derive(Debug, Clone)]
pub enum Device {
    Reflector(Reflector),
    Rotor(Box<Rotor>),
}

impl Device {
    pub fn id(&self) -> &'static str {
        match self {
            Device::Reflector(r) => r.id(),
            Device::Rotor(r) => r.id(),
        }
    }

    pub fn kind(&self) -> DeviceKind {
        match self {
            Device::Reflector(_) => DeviceKind::Reflector,
            Device::Rotor(r) => r.kind(),
        }
    }
}
