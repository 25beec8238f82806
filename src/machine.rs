//! The machine facade: keyboard, plugboard and scrambler composed into
//! a single character transform.

use std::collections::BTreeMap;

use log::debug;

use crate::charset::{index_letter, letter_index, CharSetFlag};
use crate::equipment::{machine_list as equipment_machine_list, machine_spec, Position};
use crate::error::EnigmaError;
use crate::plugboard::Plugboard;
use crate::scrambler::Scrambler;
use crate::settings::{MachineSettings, PlugboardConnections};

/// A complete Enigma machine for one catalog model.
///
/// # Examples
/// ```
/// use enigma_bombe::machine::make_machine;
///
/// let mut machine = make_machine("WEHRMACHT").unwrap();
/// machine.apply_settings(&serde_json::from_str(r#"{
///     "reflector": "UKW-B",
///     "rotor_types": {"RS": "III", "RM": "II", "RF": "I"}
/// }"#).unwrap()).unwrap();
/// let out = machine.character_input('A').unwrap();
/// assert!(out.is_some());
/// ```
pub struct Enigma {
    scrambler: Scrambler,
    plugboard: Plugboard,
}

impl Enigma {
    /// Builds an empty machine of the given catalog model with a
    /// passthrough stecker plugboard.
    ///
    /// # Errors
    /// Returns [`EnigmaError::MachineId`] for an uncataloged type.
    pub fn new(machine_type: &str) -> Result<Self, EnigmaError> {
        let spec = machine_spec(machine_type)?;
        Ok(Enigma { scrambler: Scrambler::new(spec), plugboard: Plugboard::default() })
    }

    pub fn machine_type(&self) -> &'static str {
        self.scrambler.spec().machine_type
    }

    pub fn scrambler(&self) -> &Scrambler {
        &self.scrambler
    }

    pub fn scrambler_mut(&mut self) -> &mut Scrambler {
        &mut self.scrambler
    }

    pub fn plugboard(&self) -> &Plugboard {
        &self.plugboard
    }

    pub fn plugboard_mut(&mut self) -> &mut Plugboard {
        &mut self.plugboard
    }

    /// Swaps in a fresh plugboard of the given mode, dropping all
    /// current connections.
    ///
    /// # Errors
    /// Returns [`EnigmaError::PlugboardMode`] unless the mode is 'S' or
    /// 'U'.
    pub fn set_plugboard_mode(&mut self, mode: char) -> Result<(), EnigmaError> {
        if self.plugboard.mode() == mode.to_ascii_uppercase() {
            return Ok(());
        }
        self.plugboard = Plugboard::from_mode(mode)?;
        Ok(())
    }

    /// True when every scrambler cell is occupied and the plugboard
    /// carries a legal number of connections.
    pub fn valid_enigma(&self) -> bool {
        self.scrambler.valid_scrambler() && self.plugboard.valid_plugboard()
    }

    /// Resets every rotor setting to the first position.
    pub fn set_default_settings(&mut self) {
        self.scrambler.default_settings();
    }

    /// A key press: steps the rotors, then passes the letter through
    /// plugboard, scrambler and plugboard again. Non-alphabet input
    /// produces no output rather than an error, since upstream message
    /// cleaning may leave separators behind.
    ///
    /// # Errors
    /// Returns [`EnigmaError::ScramblerInvalid`] if any cell is empty.
    pub fn character_input(&mut self, symbol: char) -> Result<Option<char>, EnigmaError> {
        let index = match letter_index(symbol.to_ascii_uppercase()) {
            Some(index) => index,
            None => return Ok(None),
        };
        let index = self.plugboard.lg_contact_output(index);
        let index = self.scrambler.keyed_input(index)?;
        let index = self.plugboard.sm_contact_output(index);
        Ok(Some(index_letter(index)))
    }

    /// The same signal path without stepping the rotors. Used to probe
    /// the current scrambler wiring repeatedly; the caller advances the
    /// machine explicitly between probes.
    ///
    /// # Errors
    /// Returns [`EnigmaError::ScramblerInvalid`] if any cell is empty.
    pub fn non_keyed_input(&self, symbol: char) -> Result<Option<char>, EnigmaError> {
        let index = match letter_index(symbol.to_ascii_uppercase()) {
            Some(index) => index,
            None => return Ok(None),
        };
        let index = self.plugboard.lg_contact_output(index);
        let index = self.scrambler.output(index)?;
        let index = self.plugboard.sm_contact_output(index);
        Ok(Some(index_letter(index)))
    }

    /// Full settings snapshot of the current machine state.
    pub fn settings(&self) -> MachineSettings {
        let mut rotor_types = BTreeMap::new();
        let mut rotor_settings = BTreeMap::new();
        let mut ring_settings = BTreeMap::new();
        for (position, id) in self.scrambler.rotor_types() {
            if let Some(id) = id {
                rotor_types.insert(position.as_str().to_string(), id.to_string());
                if let Ok(setting) = self.scrambler.rotor_setting(position) {
                    rotor_settings.insert(position.as_str().to_string(), setting.to_string());
                }
                if let Ok(setting) = self.scrambler.ring_setting(position) {
                    ring_settings.insert(position.as_str().to_string(), setting.to_string());
                }
            }
        }
        let (plugboard_connections, uhr_box_setting) = match &self.plugboard {
            Plugboard::Stecker(board) => {
                (PlugboardConnections::Pairs(board.connections()), None)
            }
            Plugboard::UhrBox(board) => (
                PlugboardConnections::Plugs(board.connections().into_iter().collect()),
                Some(board.rotor_setting()),
            ),
        };
        MachineSettings {
            machine_type: Some(self.machine_type().to_string()),
            reflector: self
                .scrambler
                .device_id(Position::Ref)
                .ok()
                .flatten()
                .map(str::to_string),
            rotor_types: Some(rotor_types),
            rotor_settings: Some(rotor_settings),
            ring_settings: Some(ring_settings),
            turnover_flag: Some(self.scrambler.turnover_flag()),
            scrambler_char_set_flag: Some(self.scrambler.char_set_flag().as_char()),
            plugboard_mode: Some(self.plugboard.mode()),
            plugboard_char_flag: Some(self.plugboard.char_set_flag().as_char()),
            plugboard_connections: Some(plugboard_connections),
            uhr_box_setting,
        }
    }

    /// Applies a partial settings snapshot. Only present fields change
    /// state. Scrambler fields are applied first (character set, rotor
    /// types, rotor settings, ring settings, reflector, turnover flag),
    /// then the plugboard (mode, character set, Uhr setting,
    /// connections).
    ///
    /// # Errors
    /// Propagates the validation error of whichever field fails;
    /// already-applied fields keep their new values.
    pub fn apply_settings(&mut self, settings: &MachineSettings) -> Result<(), EnigmaError> {
        if let Some(flag) = settings.scrambler_char_set_flag {
            self.scrambler.set_char_set_flag(CharSetFlag::from_char(flag)?);
        }
        if let Some(rotor_types) = &settings.rotor_types {
            for (position, id) in rotor_types {
                self.scrambler.set_device(Position::from_str(position)?, id)?;
            }
        }
        if let Some(rotor_settings) = &settings.rotor_settings {
            for (position, symbol) in rotor_settings {
                self.scrambler.set_rotor_setting(Position::from_str(position)?, symbol)?;
            }
        }
        if let Some(ring_settings) = &settings.ring_settings {
            for (position, symbol) in ring_settings {
                self.scrambler.set_ring_setting(Position::from_str(position)?, symbol)?;
            }
        }
        if let Some(reflector) = &settings.reflector {
            self.scrambler.set_device(Position::Ref, reflector)?;
        }
        if let Some(flag) = settings.turnover_flag {
            self.scrambler.set_turnover_flag(flag);
        }
        if let Some(mode) = settings.plugboard_mode {
            self.set_plugboard_mode(mode)?;
        }
        if let Some(flag) = settings.plugboard_char_flag {
            self.plugboard.set_char_set_flag(CharSetFlag::from_char(flag)?);
        }
        if let Some(setting) = settings.uhr_box_setting {
            match &mut self.plugboard {
                Plugboard::UhrBox(board) => board.set_rotor_setting(setting)?,
                Plugboard::Stecker(_) => {
                    return Err(EnigmaError::PlugboardMode('S'));
                }
            }
        }
        if let Some(connections) = &settings.plugboard_connections {
            match (&mut self.plugboard, connections) {
                (Plugboard::Stecker(board), PlugboardConnections::Pairs(pairs)) => {
                    board.clear();
                    for (a, b) in pairs {
                        board.connect(a, b)?;
                    }
                }
                // A JSON map deserializes as Plugs even for a stecker
                // board; read it as socket-to-socket pairs.
                (Plugboard::Stecker(board), PlugboardConnections::Plugs(plugs)) => {
                    board.clear();
                    for (a, b) in plugs {
                        board.connect(a, b)?;
                    }
                }
                (Plugboard::UhrBox(board), PlugboardConnections::Plugs(plugs)) => {
                    let pairs: Vec<(String, String)> =
                        plugs.iter().map(|(p, s)| (p.clone(), s.clone())).collect();
                    board.make_connections(&pairs)?;
                }
                (board, _) => {
                    return Err(EnigmaError::PlugboardMode(board.mode()));
                }
            }
        }
        debug!(
            "applied settings to {} machine, valid={}",
            self.machine_type(),
            self.valid_enigma()
        );
        Ok(())
    }
}

/// Builds a machine of the given catalog model.
///
/// # Errors
/// Returns [`EnigmaError::MachineId`] for an uncataloged type.
pub fn make_machine(machine_type: &str) -> Result<Enigma, EnigmaError> {
    Enigma::new(machine_type)
}

/// Builds a machine and applies a settings snapshot in one step.
///
/// # Errors
/// Returns [`EnigmaError::MachineId`] for an uncataloged type, or
/// whatever [`Enigma::apply_settings`] reports for the snapshot.
pub fn make_configured_machine(
    machine_type: &str,
    settings: &MachineSettings,
) -> Result<Enigma, EnigmaError> {
    let mut machine = Enigma::new(machine_type)?;
    machine.apply_settings(settings)?;
    Ok(machine)
}

/// Catalog machine type names.
pub fn machine_list() -> Vec<&'static str> {
    equipment_machine_list()
}
