//! Static equipment catalog.
//!
//! Per-machine-model tables of the available reflectors and rotors with
//! their historical wirings and turnover characters, plus each model's
//! cell map (which slot takes which kind of device). Every other
//! component takes this data by reference; nothing here is mutable.

use std::collections::HashMap;

use lazy_static::lazy_static;

use crate::error::EnigmaError;

/// Capability flag of a scrambler device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceKind {
    /// A reflector (one-directional, no rotor setting).
    Reflector,
    /// A rotor with no turnover characters; sits in the static fourth
    /// cell of a four-rotor machine and never steps.
    StaticRotor,
    /// A stepping rotor with one or more turnover characters.
    DynamicRotor,
}

/// Named scrambler cell positions, reflector side first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Position {
    /// Reflector cell.
    Ref,
    /// Static fourth rotor cell (four-rotor machines only).
    R4,
    /// Slow rotor cell.
    Rs,
    /// Middle rotor cell.
    Rm,
    /// Fast rotor cell.
    Rf,
}

impl Position {
    /// Returns the catalog name of the position ("REF", "R4", "RS", "RM",
    /// "RF").
    pub fn as_str(self) -> &'static str {
        match self {
            Position::Ref => "REF",
            Position::R4 => "R4",
            Position::Rs => "RS",
            Position::Rm => "RM",
            Position::Rf => "RF",
        }
    }

    /// Parses a position from its catalog name, case-insensitively.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidPosition`] for any other string.
    pub fn from_str(position: &str) -> Result<Self, EnigmaError> {
        match position.to_ascii_uppercase().as_str() {
            "REF" => Ok(Position::Ref),
            "R4" => Ok(Position::R4),
            "RS" => Ok(Position::Rs),
            "RM" => Ok(Position::Rm),
            "RF" => Ok(Position::Rf),
            _ => Err(EnigmaError::InvalidPosition(position.to_string())),
        }
    }

    /// Returns the device kind a cell at this position accepts.
    pub fn required_kind(self) -> DeviceKind {
        match self {
            Position::Ref => DeviceKind::Reflector,
            Position::R4 => DeviceKind::StaticRotor,
            Position::Rs | Position::Rm | Position::Rf => DeviceKind::DynamicRotor,
        }
    }
}

/// Catalog entry for one rotor type.
#[derive(Debug, Clone, Copy)]
pub struct RotorSpec {
    /// Device id, e.g. "III" or "Beta".
    pub id: &'static str,
    /// Wiring permutation as 26 letters.
    pub wiring: &'static str,
    /// Turnover characters; empty for a static rotor.
    pub turnover: &'static str,
}

impl RotorSpec {
    /// Returns the capability kind implied by the turnover characters.
    pub fn kind(&self) -> DeviceKind {
        if self.turnover.is_empty() {
            DeviceKind::StaticRotor
        } else {
            DeviceKind::DynamicRotor
        }
    }
}

/// Catalog entry for one reflector type.
#[derive(Debug, Clone, Copy)]
pub struct ReflectorSpec {
    /// Device id, e.g. "UKW-B".
    pub id: &'static str,
    /// Wiring permutation as 26 letters; involutive with no fixed points.
    pub wiring: &'static str,
}

/// Equipment available to one machine model.
#[derive(Debug, Clone)]
pub struct MachineSpec {
    /// Machine type name, e.g. "WEHRMACHT".
    pub machine_type: &'static str,
    /// Cell map in physical order, reflector first.
    pub cells: &'static [Position],
    /// Reflectors issued with this model.
    pub reflectors: &'static [ReflectorSpec],
    /// Rotors issued with this model.
    pub rotors: &'static [RotorSpec],
}

impl MachineSpec {
    /// Returns the rotor spec with the given id, if issued to this model.
    pub fn rotor(&self, id: &str) -> Option<&'static RotorSpec> {
        self.rotors.iter().find(|r| r.id.eq_ignore_ascii_case(id))
    }

    /// Returns the reflector spec with the given id, if issued to this
    /// model.
    pub fn reflector(&self, id: &str) -> Option<&'static ReflectorSpec> {
        self.reflectors.iter().find(|r| r.id.eq_ignore_ascii_case(id))
    }

    /// True if this model's cell map includes `position`.
    pub fn has_position(&self, position: Position) -> bool {
        self.cells.contains(&position)
    }

    /// Rotor cell positions in physical order (reflector excluded).
    pub fn rotor_positions(&self) -> impl DoubleEndedIterator<Item = Position> + '_ {
        self.cells.iter().copied().filter(|p| *p != Position::Ref)
    }
}

const ROTOR_I: RotorSpec = RotorSpec { id: "I", wiring: "EKMFLGDQVZNTOWYHXUSPAIBRCJ", turnover: "Q" };
const ROTOR_II: RotorSpec = RotorSpec { id: "II", wiring: "AJDKSIRUXBLHWTMCQGZNPYFVOE", turnover: "E" };
const ROTOR_III: RotorSpec = RotorSpec { id: "III", wiring: "BDFHJLCPRTXVZNYEIWGAKMUSQO", turnover: "V" };
const ROTOR_IV: RotorSpec = RotorSpec { id: "IV", wiring: "ESOVPZJAYQUIRHXLNFTGKDCMWB", turnover: "J" };
const ROTOR_V: RotorSpec = RotorSpec { id: "V", wiring: "VZBRGITYUPSDNHLXAWMJQOFECK", turnover: "Z" };
const ROTOR_VI: RotorSpec = RotorSpec { id: "VI", wiring: "JPGVOUMFYQBENHZRDKASXLICTW", turnover: "ZM" };
const ROTOR_VII: RotorSpec = RotorSpec { id: "VII", wiring: "NZJHGRCXMYSWBOUFAIVLPEKQDT", turnover: "ZM" };
const ROTOR_VIII: RotorSpec = RotorSpec { id: "VIII", wiring: "FKQHTLXOCBJSPDZRAMEWNIUYGV", turnover: "ZM" };
const ROTOR_BETA: RotorSpec = RotorSpec { id: "Beta", wiring: "LEYJVCNIXWPBQMDRTAKZGFUHOS", turnover: "" };
const ROTOR_GAMMA: RotorSpec = RotorSpec { id: "Gamma", wiring: "FSOKANUERHMBTIYCWLQPZXVGJD", turnover: "" };

const UKW_A: ReflectorSpec = ReflectorSpec { id: "UKW-A", wiring: "EJMZALYXVBWFCRQUONTSPIKHGD" };
const UKW_B: ReflectorSpec = ReflectorSpec { id: "UKW-B", wiring: "YRUHQSLDPXNGOKMIEBFZCWVJAT" };
const UKW_C: ReflectorSpec = ReflectorSpec { id: "UKW-C", wiring: "FVPJIAOYEDRZXWGCTKUQSBNMHL" };
const UKW_B_THIN: ReflectorSpec = ReflectorSpec { id: "UKW-B", wiring: "ENKQAUYWJICOPBLMDXZVFTHRGS" };
const UKW_C_THIN: ReflectorSpec = ReflectorSpec { id: "UKW-C", wiring: "RDOBJNTKVEHMLFCWZAXGYIPSUQ" };

const THREE_CELLS: [Position; 4] = [Position::Ref, Position::Rs, Position::Rm, Position::Rf];
const FOUR_CELLS: [Position; 5] =
    [Position::Ref, Position::R4, Position::Rs, Position::Rm, Position::Rf];

const ARMY_ROTORS: [RotorSpec; 5] = [ROTOR_I, ROTOR_II, ROTOR_III, ROTOR_IV, ROTOR_V];
const ARMY_REFLECTORS: [ReflectorSpec; 3] = [UKW_A, UKW_B, UKW_C];
const NAVY_M3_ROTORS: [RotorSpec; 8] = [
    ROTOR_I, ROTOR_II, ROTOR_III, ROTOR_IV, ROTOR_V, ROTOR_VI, ROTOR_VII, ROTOR_VIII,
];
const NAVY_M3_REFLECTORS: [ReflectorSpec; 2] = [UKW_B, UKW_C];
const NAVY_M4_ROTORS: [RotorSpec; 10] = [
    ROTOR_I, ROTOR_II, ROTOR_III, ROTOR_IV, ROTOR_V, ROTOR_VI, ROTOR_VII, ROTOR_VIII, ROTOR_BETA,
    ROTOR_GAMMA,
];
const NAVY_M4_REFLECTORS: [ReflectorSpec; 2] = [UKW_B_THIN, UKW_C_THIN];

lazy_static! {
    /// Machine models keyed by machine type, in catalog order.
    pub static ref EQUIPMENT: Vec<MachineSpec> = vec![
        MachineSpec {
            machine_type: "WEHRMACHT",
            cells: &THREE_CELLS,
            reflectors: &ARMY_REFLECTORS,
            rotors: &ARMY_ROTORS,
        },
        MachineSpec {
            machine_type: "LUFTWAFFE",
            cells: &THREE_CELLS,
            reflectors: &ARMY_REFLECTORS,
            rotors: &ARMY_ROTORS,
        },
        MachineSpec {
            machine_type: "ENIGMA M3 Kriegsmarine",
            cells: &THREE_CELLS,
            reflectors: &NAVY_M3_REFLECTORS,
            rotors: &NAVY_M3_ROTORS,
        },
        MachineSpec {
            machine_type: "ENIGMA M4 u-boat",
            cells: &FOUR_CELLS,
            reflectors: &NAVY_M4_REFLECTORS,
            rotors: &NAVY_M4_ROTORS,
        },
    ];
    /// Lookup from machine type to spec.
    static ref EQUIPMENT_BY_TYPE: HashMap<&'static str, &'static MachineSpec> =
        EQUIPMENT.iter().map(|m| (m.machine_type, m)).collect();
}

/// Returns the machine spec for `machine_type`.
///
/// # Errors
/// Returns [`EnigmaError::MachineId`] if the type is not cataloged.
pub fn machine_spec(machine_type: &str) -> Result<&'static MachineSpec, EnigmaError> {
    EQUIPMENT_BY_TYPE
        .get(machine_type)
        .copied()
        .ok_or_else(|| EnigmaError::MachineId(machine_type.to_string()))
}

/// Returns the catalog machine type names in catalog order.
pub fn machine_list() -> Vec<&'static str> {
    EQUIPMENT.iter().map(|m| m.machine_type).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charset::letter_index;

    #[test]
    fn test_machine_list() {
        let machines = machine_list();
        assert_eq!(machines.len(), 4);
        assert!(machines.contains(&"WEHRMACHT"));
        assert!(machines.contains(&"ENIGMA M4 u-boat"));
    }

    #[test]
    fn test_machine_spec_lookup() {
        assert!(machine_spec("WEHRMACHT").is_ok());
        assert_eq!(
            machine_spec("TYPEX").err(),
            Some(EnigmaError::MachineId("TYPEX".to_string()))
        );
    }

    #[test]
    fn test_all_wirings_are_bijections() {
        for machine in EQUIPMENT.iter() {
            for rotor in machine.rotors {
                let mut seen = [false; 26];
                for c in rotor.wiring.chars() {
                    seen[letter_index(c).unwrap()] = true;
                }
                assert!(seen.iter().all(|b| *b), "rotor {} wiring", rotor.id);
            }
            for reflector in machine.reflectors {
                let mut seen = [false; 26];
                for c in reflector.wiring.chars() {
                    seen[letter_index(c).unwrap()] = true;
                }
                assert!(seen.iter().all(|b| *b), "reflector {} wiring", reflector.id);
            }
        }
    }

    #[test]
    fn test_reflectors_have_no_fixed_points_and_are_involutive() {
        for machine in EQUIPMENT.iter() {
            for reflector in machine.reflectors {
                let map: Vec<usize> = reflector
                    .wiring
                    .chars()
                    .map(|c| letter_index(c).unwrap())
                    .collect();
                for (i, &out) in map.iter().enumerate() {
                    assert_ne!(i, out, "reflector {} maps {} to itself", reflector.id, i);
                    assert_eq!(map[out], i, "reflector {} not involutive at {}", reflector.id, i);
                }
            }
        }
    }

    #[test]
    fn test_m4_has_static_fourth_cell() {
        let m4 = machine_spec("ENIGMA M4 u-boat").unwrap();
        assert!(m4.has_position(Position::R4));
        assert_eq!(m4.rotor("Beta").unwrap().kind(), DeviceKind::StaticRotor);
        assert_eq!(m4.rotor("Gamma").unwrap().kind(), DeviceKind::StaticRotor);
        let wehrmacht = machine_spec("WEHRMACHT").unwrap();
        assert!(!wehrmacht.has_position(Position::R4));
    }

    #[test]
    fn test_position_round_trip() {
        for position in [Position::Ref, Position::R4, Position::Rs, Position::Rm, Position::Rf] {
            assert_eq!(Position::from_str(position.as_str()).unwrap(), position);
        }
        assert_eq!(Position::from_str("rf").unwrap(), Position::Rf);
        assert!(Position::from_str("R9").is_err());
    }

    #[test]
    fn test_required_kinds() {
        assert_eq!(Position::Ref.required_kind(), DeviceKind::Reflector);
        assert_eq!(Position::R4.required_kind(), DeviceKind::StaticRotor);
        assert_eq!(Position::Rf.required_kind(), DeviceKind::DynamicRotor);
    }
}
