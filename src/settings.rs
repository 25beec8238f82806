//! Machine settings snapshots and setting enumeration tools.
//!
//! [`MachineSettings`] is the partial snapshot exchanged at the machine
//! facade boundary; every field is optional and only present fields are
//! applied. [`RotorSettings`] is the base-26 odometer the Bombe drives
//! through the search space, and [`scrambler_perms`] enumerates rotor
//! orders. [`Permutation`] parses the textual rotor-order identifiers
//! the Bombe consumes.

use std::collections::BTreeMap;

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::charset::CharSetFlag;
use crate::error::EnigmaError;

/// Stecker pair list or Uhr box plug-to-socket map, depending on the
/// plugboard mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PlugboardConnections {
    /// Stecker mode: socket pairs.
    Pairs(Vec<(String, String)>),
    /// Uhr box mode: plug id to socket id.
    Plugs(BTreeMap<String, String>),
}

/// Partial settings snapshot. Absent fields leave current state
/// untouched when applied.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MachineSettings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub machine_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reflector: Option<String>,
    /// Rotor ids keyed by cell position name ("RF", "RM", "RS", "R4").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotor_types: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotor_settings: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ring_settings: Option<BTreeMap<String, String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub turnover_flag: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scrambler_char_set_flag: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugboard_mode: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugboard_char_flag: Option<char>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plugboard_connections: Option<PlugboardConnections>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uhr_box_setting: Option<usize>,
}

/// Base-26 odometer over three or four rotor positions. Position order
/// is RF, RM, RS, R4 with RF the fastest digit.
#[derive(Debug, Clone)]
pub struct RotorSettings {
    flag: CharSetFlag,
    positions: usize,
    value: usize,
}

const ODOMETER_POSITIONS: [&str; 4] = ["RF", "RM", "RS", "R4"];

impl RotorSettings {
    /// Builds an odometer at zero over `positions` rotor cells (3 or 4).
    pub fn new(flag: CharSetFlag, positions: usize) -> Self {
        RotorSettings { flag, positions, value: 0 }
    }

    fn limit(&self) -> usize {
        26usize.pow(self.positions as u32)
    }

    /// Advances one position. Returns `false` on overflow, leaving the
    /// odometer wrapped to zero; this is the loop-termination signal,
    /// not an error.
    pub fn inc(&mut self) -> bool {
        self.value += 1;
        if self.value >= self.limit() {
            self.value = 0;
            return false;
        }
        true
    }

    /// Steps back one position. Returns `false` on underflow, leaving
    /// the odometer wrapped to the last position.
    pub fn dec(&mut self) -> bool {
        if self.value == 0 {
            self.value = self.limit() - 1;
            return false;
        }
        self.value -= 1;
        true
    }

    pub fn reset(&mut self) {
        self.value = 0;
    }

    fn digit(&self, position: usize) -> usize {
        (self.value / 26usize.pow(position as u32)) % 26
    }

    /// Current settings keyed by cell position name.
    pub fn settings(&self) -> BTreeMap<String, String> {
        let set = self.flag.character_set();
        (0..self.positions)
            .map(|i| (ODOMETER_POSITIONS[i].to_string(), set[self.digit(i)].to_string()))
            .collect()
    }

    /// Loads the odometer from per-position symbols. Every position must
    /// be present.
    ///
    /// # Errors
    /// [`EnigmaError::RingCharacter`] for a missing position or a symbol
    /// outside the character set.
    pub fn set_settings(&mut self, settings: &BTreeMap<String, String>) -> Result<(), EnigmaError> {
        let set = self.flag;
        let mut value = 0usize;
        for i in 0..self.positions {
            let position = ODOMETER_POSITIONS[i];
            let symbol = settings
                .get(position)
                .ok_or_else(|| EnigmaError::RingCharacter(format!("missing setting for {position}")))?;
            let digit = set
                .index_of(symbol)
                .map_err(|_| EnigmaError::RingCharacter(symbol.clone()))?;
            value += digit * 26usize.pow(i as u32);
        }
        self.value = value;
        Ok(())
    }
}

/// One scrambler arrangement: a reflector plus a rotor for each cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScramblerPerm {
    pub reflector: String,
    pub r4: Option<String>,
    pub rs: String,
    pub rm: String,
    pub rf: String,
}

impl ScramblerPerm {
    /// Identifier in the permutation grammar, reflector first.
    pub fn id(&self) -> String {
        format!("{}_{}_{}_{}", self.reflector, self.rs, self.rm, self.rf)
    }
}

/// Enumerates every reflector and ordered choice of three distinct
/// dynamic rotors, crossed with the static rotors when given.
pub fn scrambler_perms(
    reflectors: &[&str],
    dynamic_rotors: &[&str],
    static_rotors: Option<&[&str]>,
) -> Vec<ScramblerPerm> {
    let mut orders = Vec::new();
    for &rs in dynamic_rotors {
        for &rm in dynamic_rotors {
            if rm == rs {
                continue;
            }
            for &rf in dynamic_rotors {
                if rf == rs || rf == rm {
                    continue;
                }
                orders.push((rs, rm, rf));
            }
        }
    }
    let mut perms = Vec::new();
    for &reflector in reflectors {
        match static_rotors {
            Some(statics) => {
                for &r4 in statics {
                    for &(rs, rm, rf) in &orders {
                        perms.push(ScramblerPerm {
                            reflector: reflector.to_string(),
                            r4: Some(r4.to_string()),
                            rs: rs.to_string(),
                            rm: rm.to_string(),
                            rf: rf.to_string(),
                        });
                    }
                }
            }
            None => {
                for &(rs, rm, rf) in &orders {
                    perms.push(ScramblerPerm {
                        reflector: reflector.to_string(),
                        r4: None,
                        rs: rs.to_string(),
                        rm: rm.to_string(),
                        rf: rf.to_string(),
                    });
                }
            }
        }
    }
    perms
}

lazy_static! {
    static ref PERM_START_GROUP: Regex =
        Regex::new("^([A-Z])_(UKW-[ABC])_([IV]+)_([IV]+)_([IV]+)_(G[123])$").unwrap();
    static ref PERM_GROUP: Regex =
        Regex::new("^(UKW-[ABC])_([IV]+)_([IV]+)_([IV]+)_(G[123])$").unwrap();
    static ref PERM_BARE: Regex =
        Regex::new("^(UKW-[ABC])_([IV]+)_([IV]+)_([IV]+)$").unwrap();
}

const PERM_ROTORS: [&str; 5] = ["I", "II", "III", "IV", "V"];

/// A parsed rotor-order identifier such as `A_UKW-B_III_II_I_G3`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Permutation {
    /// Starting letter of the slow rotor, when the identifier carries
    /// one.
    pub start_letter: Option<char>,
    pub reflector: String,
    pub rs: String,
    pub rm: String,
    pub rf: String,
    /// Sheet-group tag "G1".."G3", when present.
    pub group: Option<String>,
}

impl Permutation {
    /// Parses an identifier, trying the three grammars from most to
    /// least specific: with start letter and group, with group only,
    /// bare. Rotors must be distinct members of I..V.
    ///
    /// # Errors
    /// Returns [`EnigmaError::InvalidPermutation`] if no grammar matches
    /// or the rotor set is invalid.
    pub fn parse(permutation: &str) -> Result<Self, EnigmaError> {
        let upper = permutation.to_ascii_uppercase();
        let invalid = || EnigmaError::InvalidPermutation(permutation.to_string());
        let parsed = if let Some(caps) = PERM_START_GROUP.captures(&upper) {
            Permutation {
                start_letter: caps[1].chars().next(),
                reflector: caps[2].to_string(),
                rs: caps[3].to_string(),
                rm: caps[4].to_string(),
                rf: caps[5].to_string(),
                group: Some(caps[6].to_string()),
            }
        } else if let Some(caps) = PERM_GROUP.captures(&upper) {
            Permutation {
                start_letter: None,
                reflector: caps[1].to_string(),
                rs: caps[2].to_string(),
                rm: caps[3].to_string(),
                rf: caps[4].to_string(),
                group: Some(caps[5].to_string()),
            }
        } else if let Some(caps) = PERM_BARE.captures(&upper) {
            Permutation {
                start_letter: None,
                reflector: caps[1].to_string(),
                rs: caps[2].to_string(),
                rm: caps[3].to_string(),
                rf: caps[4].to_string(),
                group: None,
            }
        } else {
            return Err(invalid());
        };
        let rotors = [parsed.rs.as_str(), parsed.rm.as_str(), parsed.rf.as_str()];
        for rotor in rotors {
            if !PERM_ROTORS.contains(&rotor) {
                return Err(invalid());
            }
        }
        if rotors[0] == rotors[1] || rotors[0] == rotors[2] || rotors[1] == rotors[2] {
            return Err(invalid());
        }
        Ok(parsed)
    }

    /// The identifier without start letter or group tag.
    pub fn id(&self) -> String {
        format!("{}_{}_{}_{}", self.reflector, self.rs, self.rm, self.rf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_odometer_counts_fast_position_first() {
        let mut odometer = RotorSettings::new(CharSetFlag::Letters, 3);
        let s = odometer.settings();
        assert_eq!(s["RF"], "A");
        assert_eq!(s["RM"], "A");
        assert_eq!(s["RS"], "A");
        assert!(odometer.inc());
        assert_eq!(odometer.settings()["RF"], "B");
        for _ in 0..25 {
            assert!(odometer.inc());
        }
        let s = odometer.settings();
        assert_eq!(s["RF"], "A");
        assert_eq!(s["RM"], "B");
    }

    #[test]
    fn test_odometer_exhaustion() {
        let mut odometer = RotorSettings::new(CharSetFlag::Letters, 3);
        for _ in 0..(26 * 26 * 26 - 1) {
            assert!(odometer.inc());
        }
        assert!(!odometer.inc());
        assert_eq!(odometer.settings()["RF"], "A");
    }

    #[test]
    fn test_odometer_dec_wraps() {
        let mut odometer = RotorSettings::new(CharSetFlag::Letters, 3);
        assert!(!odometer.dec());
        let s = odometer.settings();
        assert_eq!(s["RF"], "Z");
        assert_eq!(s["RS"], "Z");
        assert!(odometer.dec());
        assert_eq!(odometer.settings()["RF"], "Y");
    }

    #[test]
    fn test_odometer_settings_round_trip() {
        let mut odometer = RotorSettings::new(CharSetFlag::Letters, 3);
        let mut wanted = BTreeMap::new();
        wanted.insert("RF".to_string(), "W".to_string());
        wanted.insert("RM".to_string(), "A".to_string());
        wanted.insert("RS".to_string(), "A".to_string());
        odometer.set_settings(&wanted).unwrap();
        assert_eq!(odometer.settings(), wanted);
        odometer.inc();
        assert_eq!(odometer.settings()["RF"], "X");
    }

    #[test]
    fn test_scrambler_perms_three_rotor_count() {
        let perms = scrambler_perms(&["UKW-B"], &["I", "II", "III", "IV", "V"], None);
        // 5 choose 3 ordered = 60.
        assert_eq!(perms.len(), 60);
        assert!(perms.iter().all(|p| p.r4.is_none()));
        assert!(perms
            .iter()
            .any(|p| p.id() == "UKW-B_III_II_I"));
    }

    #[test]
    fn test_scrambler_perms_with_statics() {
        let perms = scrambler_perms(&["UKW-B", "UKW-C"], &["I", "II", "III"], Some(&["Beta"]));
        assert_eq!(perms.len(), 2 * 1 * 6);
        assert!(perms.iter().all(|p| p.r4.as_deref() == Some("Beta")));
    }

    #[test]
    fn test_permutation_grammars() {
        let full = Permutation::parse("A_UKW-B_III_II_I_G3").unwrap();
        assert_eq!(full.start_letter, Some('A'));
        assert_eq!(full.group.as_deref(), Some("G3"));
        assert_eq!(full.id(), "UKW-B_III_II_I");

        let grouped = Permutation::parse("UKW-C_I_IV_V_G1").unwrap();
        assert_eq!(grouped.start_letter, None);
        assert_eq!(grouped.group.as_deref(), Some("G1"));

        let bare = Permutation::parse("ukw-b_iii_ii_i").unwrap();
        assert_eq!(bare.rs, "III");
        assert_eq!(bare.group, None);
    }

    #[test]
    fn test_permutation_rejects_bad_strings() {
        for bad in [
            "UKW-D_III_II_I",
            "UKW-B_III_II",
            "UKW-B_III_III_I",
            "UKW-B_IX_II_I",
            "G3_UKW-B_III_II_I",
            "",
        ] {
            assert!(Permutation::parse(bad).is_err(), "{bad}");
        }
    }

    #[test]
    fn test_settings_json_round_trip() {
        let mut rotor_types = BTreeMap::new();
        rotor_types.insert("RF".to_string(), "I".to_string());
        rotor_types.insert("RM".to_string(), "II".to_string());
        rotor_types.insert("RS".to_string(), "III".to_string());
        let settings = MachineSettings {
            machine_type: Some("WEHRMACHT".to_string()),
            reflector: Some("UKW-B".to_string()),
            rotor_types: Some(rotor_types),
            turnover_flag: Some(true),
            plugboard_mode: Some('S'),
            plugboard_connections: Some(PlugboardConnections::Pairs(vec![(
                "A".to_string(),
                "B".to_string(),
            )])),
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: MachineSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
        // Absent fields stay absent.
        assert!(back.ring_settings.is_none());
    }

    #[test]
    fn test_uhr_connections_json() {
        let mut plugs = BTreeMap::new();
        plugs.insert("01A".to_string(), "A".to_string());
        let settings = MachineSettings {
            plugboard_mode: Some('U'),
            plugboard_connections: Some(PlugboardConnections::Plugs(plugs)),
            uhr_box_setting: Some(2),
            ..Default::default()
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: MachineSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }
}
