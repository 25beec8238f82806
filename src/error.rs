//! Error types for the enigma-bombe library.

use std::fmt;

/// Errors produced by the enigma-bombe library.
///
/// Configuration errors (invalid ids, incompatible slots, bad input) are
/// recoverable by the caller supplying corrected input and never corrupt
/// machine state. State-invariant errors (empty cell in a signal path,
/// double borrow, index out of range) indicate a caller-sequencing bug but
/// leave the machine usable afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnigmaError {
    /// Character set flag is not 'L' or 'N'.
    CharacterSetFlag(char),
    /// Symbol is not a member of the active character set.
    InvalidSymbol(String),
    /// Contact index is outside the range 0..=25.
    IndexOutOfRange(usize),
    /// Machine type is not in the equipment catalog.
    MachineId(String),
    /// Device id is not in the machine's equipment.
    DeviceId(String),
    /// Device is already installed in a scrambler cell.
    DeviceBorrowed {
        /// Device id that was requested.
        device_id: String,
        /// Cell currently holding the device.
        in_use_by: String,
    },
    /// Device capability does not match the allowed kinds.
    IncompatibleDevice(String),
    /// Device cannot physically occupy the requested cell.
    IncompatiblePosition {
        /// Device id that was requested.
        device_id: String,
        /// Cell the device was offered to.
        position: String,
    },
    /// Cell position is not part of this machine model.
    InvalidPosition(String),
    /// A signal path operation was attempted with an empty cell.
    ScramblerInvalid(String),
    /// Plugboard socket id is not a member of the plugboard character set.
    SocketId(String),
    /// Uhr box plug id is not one of "01A".."10A" / "01B".."10B".
    PlugId(String),
    /// Uhr box rotor setting is outside the range 0..=39.
    UhrSetting(usize),
    /// Plugboard mode flag is not 'S' or 'U'.
    PlugboardMode(char),
    /// Crib is malformed (length mismatch, bad character or a position
    /// where plain and cipher letters coincide).
    InvalidCrib(String),
    /// Permutation string does not match any accepted grammar.
    InvalidPermutation(String),
    /// Rotor setting symbol is not a valid ring character.
    RingCharacter(String),
}

impl fmt::Display for EnigmaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnigmaError::CharacterSetFlag(flag) => {
                write!(f, "{flag} is not a valid character set flag, must be 'L' or 'N'")
            }
            EnigmaError::InvalidSymbol(symbol) => {
                write!(f, "{symbol} is not a member of the active character set")
            }
            EnigmaError::IndexOutOfRange(index) => {
                write!(f, "{index} is not a valid contact index, must be 0..=25")
            }
            EnigmaError::MachineId(machine) => {
                write!(f, "{machine} is not a valid machine type")
            }
            EnigmaError::DeviceId(device_id) => {
                write!(f, "{device_id} is not a valid device id for this machine")
            }
            EnigmaError::DeviceBorrowed { device_id, in_use_by } => {
                write!(f, "device {device_id} is already installed in cell {in_use_by}")
            }
            EnigmaError::IncompatibleDevice(device_id) => {
                write!(f, "device {device_id} is not a compatible device type")
            }
            EnigmaError::IncompatiblePosition { device_id, position } => {
                write!(f, "device {device_id} cannot occupy cell {position}")
            }
            EnigmaError::InvalidPosition(position) => {
                write!(f, "{position} is not a valid cell position for this machine")
            }
            EnigmaError::ScramblerInvalid(detail) => {
                write!(f, "scrambler is not valid: {detail}")
            }
            EnigmaError::SocketId(socket_id) => {
                write!(f, "{socket_id} is not a valid plugboard socket id")
            }
            EnigmaError::PlugId(plug_id) => {
                write!(f, "{plug_id} is not a valid uhr box plug id")
            }
            EnigmaError::UhrSetting(setting) => {
                write!(f, "{setting} is not a valid uhr box setting, must be 0..=39")
            }
            EnigmaError::PlugboardMode(mode) => {
                write!(f, "{mode} is not a valid plugboard mode, must be 'S' or 'U'")
            }
            EnigmaError::InvalidCrib(detail) => {
                write!(f, "invalid crib: {detail}")
            }
            EnigmaError::InvalidPermutation(permutation) => {
                write!(f, "{permutation} is not a valid permutation string")
            }
            EnigmaError::RingCharacter(character) => {
                write!(f, "{character} is not a valid ring character")
            }
        }
    }
}

impl std::error::Error for EnigmaError {}
