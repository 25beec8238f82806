//! The bombe engine: logical scramblers, path tracing and stop tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use log::{debug, info, warn};

use crate::charset::{index_letter, letter_index, CharSetFlag};
use crate::error::EnigmaError;
use crate::machine::{make_machine, Enigma};
use crate::settings::{MachineSettings, Permutation, RotorSettings};

use super::logs::BombeLogs;
use super::menu::Menu;

/// One accepted stop: a candidate rotor position with its inferred
/// stecker pairs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BombeStop {
    /// The permutation identifier the run was started with.
    pub permutation: String,
    /// Rotor settings as a slow-middle-fast letter triple.
    pub rotor_settings: String,
    /// Inferred pairs, each sorted, the list sorted and deduplicated. A
    /// letter paired with itself means "not steckered".
    pub stecker_pairs: Vec<(char, char)>,
}

/// A bombe run over one rotor order.
///
/// Twenty-six logical scramblers are wired from the machine's non-keyed
/// transform, one per fast-rotor offset, and rotated as the odometer
/// advances so that rewiring is only needed once every 26 positions.
pub struct TuringBombe {
    menu: Menu,
    permutation: Permutation,
    permutation_str: String,
    test_register: usize,
    diagonal_board: bool,
    machine: Enigma,
    odometer: RotorSettings,
    scramblers: VecDeque<[usize; 26]>,
    registers: [[bool; 26]; 26],
    visited: [[bool; 26]; 26],
    stops: Vec<BombeStop>,
    logs: Option<BombeLogs>,
    cancel: Arc<AtomicBool>,
}

impl TuringBombe {
    /// Builds a bombe for one crib alignment and rotor order. The
    /// machine is a three-rotor army model with ring settings at the
    /// first position and stepping disabled; the search advances the
    /// rotors explicitly.
    ///
    /// # Errors
    /// [`EnigmaError::InvalidCrib`] for a bad crib alignment,
    /// [`EnigmaError::InvalidPermutation`] for an unparseable rotor
    /// order, [`EnigmaError::InvalidSymbol`] for a non-letter test
    /// register.
    pub fn new(
        plain_text: &str,
        cipher_text: &str,
        permutation: &str,
        test_register: char,
    ) -> Result<Self, EnigmaError> {
        let menu = Menu::new(plain_text, cipher_text)?;
        let parsed = Permutation::parse(permutation)?;
        let test_register = letter_index(test_register.to_ascii_uppercase())
            .ok_or_else(|| EnigmaError::InvalidSymbol(test_register.to_string()))?;

        let mut machine = make_machine("WEHRMACHT")?;
        let mut rotor_types = std::collections::BTreeMap::new();
        rotor_types.insert("RS".to_string(), parsed.rs.clone());
        rotor_types.insert("RM".to_string(), parsed.rm.clone());
        rotor_types.insert("RF".to_string(), parsed.rf.clone());
        let mut ring_settings = std::collections::BTreeMap::new();
        for position in ["RS", "RM", "RF"] {
            ring_settings.insert(position.to_string(), "A".to_string());
        }
        machine.apply_settings(&MachineSettings {
            reflector: Some(parsed.reflector.clone()),
            rotor_types: Some(rotor_types),
            ring_settings: Some(ring_settings),
            turnover_flag: Some(false),
            ..Default::default()
        })?;

        Ok(TuringBombe {
            menu,
            permutation: parsed,
            permutation_str: permutation.to_ascii_uppercase(),
            test_register,
            diagonal_board: false,
            machine,
            odometer: RotorSettings::new(CharSetFlag::Letters, 3),
            scramblers: VecDeque::new(),
            registers: [[false; 26]; 26],
            visited: [[false; 26]; 26],
            stops: Vec::new(),
            logs: None,
            cancel: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    /// Enables or disables the diagonal-board assumption. Off by
    /// default.
    pub fn set_diagonal_board(&mut self, enabled: bool) {
        self.diagonal_board = enabled;
    }

    /// Attaches file logs for stop records.
    pub fn set_logs(&mut self, logs: BombeLogs) {
        self.logs = Some(logs);
    }

    /// A flag other threads can set to end the run at the next
    /// scrambler rewiring.
    pub fn cancel_token(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// Replaces the cancel flag, letting several runs share one.
    pub fn set_cancel_token(&mut self, cancel: Arc<AtomicBool>) {
        self.cancel = cancel;
    }

    pub fn stops(&self) -> &[BombeStop] {
        &self.stops
    }

    /// Runs the full 26 by 26 by 26 rotor-setting search for this rotor
    /// order, returning the accepted stops. Finding none is a valid
    /// outcome, not an error.
    ///
    /// # Errors
    /// Returns [`EnigmaError::ScramblerInvalid`] only if the machine
    /// loses a device mid-run, which indicates a caller bug.
    pub fn solve(&mut self) -> Result<&[BombeStop], EnigmaError> {
        self.odometer.reset();
        loop {
            if self.cancel.load(Ordering::Relaxed) {
                info!("bombe run {} cancelled", self.permutation_str);
                return Ok(&self.stops);
            }
            self.wire_scramblers()?;
            debug!("bombe {} at {}", self.permutation_str, self.settings_str());
            for _ in 0..26 {
                self.check_stop();
                self.scramblers.rotate_left(1);
                if !self.odometer.inc() {
                    return Ok(&self.stops);
                }
            }
        }
    }

    /// Slow-middle-fast settings string for the current odometer
    /// position.
    fn settings_str(&self) -> String {
        let settings = self.odometer.settings();
        format!("{}{}{}", settings["RS"], settings["RM"], settings["RF"])
    }

    /// Probes the machine at the current odometer position 26 times,
    /// stepping one keyed position between probes, so table `i` is the
    /// scrambler `i` positions past the odometer setting.
    fn wire_scramblers(&mut self) -> Result<(), EnigmaError> {
        let rotor_settings = self.odometer.settings();
        self.machine.apply_settings(&MachineSettings {
            rotor_settings: Some(rotor_settings),
            ..Default::default()
        })?;
        let mut scramblers = VecDeque::with_capacity(26);
        for _ in 0..26 {
            let mut table = [0usize; 26];
            for (input, slot) in table.iter_mut().enumerate() {
                let out = self
                    .machine
                    .non_keyed_input(index_letter(input))?
                    .ok_or_else(|| EnigmaError::InvalidSymbol(index_letter(input).to_string()))?;
                *slot = letter_index(out).unwrap_or(input);
            }
            scramblers.push_back(table);
            self.machine.character_input('A')?;
        }
        self.scramblers = scramblers;
        Ok(())
    }

    fn reset_registers(&mut self) {
        self.registers = [[false; 26]; 26];
        self.visited = [[false; 26]; 26];
    }

    /// Depth-first traversal over the cable graph from one live wire.
    /// The visited-edge matrix bounds the recursion at 676 frames.
    fn trace_path(&mut self, cable: usize, wire: usize) {
        self.visited[cable][wire] = true;
        self.registers[cable][wire] = true;
        if self.diagonal_board
            && cable != wire
            && self.menu.contains(wire)
            && !self.visited[wire][cable]
        {
            self.trace_path(wire, cable);
        }
        let connections = self.menu.connections(cable).to_vec();
        for connection in connections {
            let connected_wire = self.scramblers[connection.position][wire];
            if !self.visited[connection.cable][connected_wire] {
                self.trace_path(connection.cable, connected_wire);
            }
        }
    }

    fn live_count(&self, cable: usize) -> usize {
        self.registers[cable].iter().filter(|&&b| b).count()
    }

    /// Tests the current rotor position. A hypothesis that lights all
    /// 26 wires of the test register carries no information and is
    /// rejected outright; otherwise each test wire is traced in turn
    /// and a 25-live pattern is inverted to stand in for "the one false
    /// wire is true."
    fn check_stop(&mut self) {
        self.reset_registers();
        self.trace_path(self.test_register, 0);
        if self.live_count(self.test_register) == 26 {
            return;
        }
        for test_wire in 0..26 {
            self.reset_registers();
            self.trace_path(self.test_register, test_wire);
            if self.live_count(self.test_register) == 25 {
                self.invert_registers();
            }
            if self.live_count(self.test_register) == 1
                && self.valid_registers()
                && self.no_contradictions()
                && self.no_consecutive_steckers()
            {
                self.record_stop(test_wire);
                break;
            }
        }
    }

    fn invert_registers(&mut self) {
        for cable in 0..26 {
            if !self.menu.contains(cable) {
                continue;
            }
            for wire in self.registers[cable].iter_mut() {
                *wire = !*wire;
            }
        }
    }

    /// Every menu register must be dead or carry exactly one live wire.
    fn valid_registers(&self) -> bool {
        self.menu
            .menu_chars()
            .iter()
            .all(|&cable| self.live_count(cable) <= 1)
    }

    fn live_wire(&self, cable: usize) -> Option<usize> {
        self.registers[cable].iter().position(|&b| b)
    }

    /// The implied pairing must not give any letter two different
    /// partners.
    fn no_contradictions(&self) -> bool {
        let mut pairs: [Option<usize>; 26] = [None; 26];
        for &c1 in self.menu.menu_chars() {
            let c2 = match self.live_wire(c1) {
                Some(wire) => wire,
                None => continue,
            };
            for (a, b) in [(c1, c2), (c2, c1)] {
                match pairs[a] {
                    Some(partner) if partner != b => return false,
                    _ => pairs[a] = Some(b),
                }
            }
        }
        true
    }

    fn stecker_pairs(&self) -> Vec<(char, char)> {
        let mut pairs: Vec<(char, char)> = Vec::new();
        for &c1 in self.menu.menu_chars() {
            if let Some(c2) = self.live_wire(c1) {
                let (a, b) = if c1 <= c2 { (c1, c2) } else { (c2, c1) };
                let pair = (index_letter(a), index_letter(b));
                if !pairs.contains(&pair) {
                    pairs.push(pair);
                }
            }
        }
        pairs.sort_unstable();
        pairs
    }

    /// Rejects pairings of alphabet-adjacent letters, wrapping Z to A.
    /// A plausibility heuristic carried from operating practice, not a
    /// cryptographic law.
    fn no_consecutive_steckers(&self) -> bool {
        for (a, b) in self.stecker_pairs() {
            let (n1, n2) = (a as u8, b as u8);
            if (n1 == b'A' && n2 == b'Z') || n2 == n1 + 1 {
                return false;
            }
        }
        true
    }

    fn record_stop(&mut self, test_wire: usize) {
        let stop = BombeStop {
            permutation: self.permutation_str.clone(),
            rotor_settings: self.settings_str(),
            stecker_pairs: self.stecker_pairs(),
        };
        info!(
            "bombe stop at {} {} with {} pairs",
            stop.permutation,
            stop.rotor_settings,
            stop.stecker_pairs.len()
        );
        let dump = self.render_registers(test_wire);
        if let Some(logs) = &mut self.logs {
            if let Err(e) = logs.log_stop(&stop) {
                warn!("failed to write stop log: {e}");
            }
            if let Err(e) = logs.log_registers(&stop.permutation, &stop.rotor_settings, &dump) {
                warn!("failed to write register log: {e}");
            }
        }
        self.stops.push(stop);
    }

    /// The full register grid as text, one row per cable, `|` for a
    /// live wire, trailing `=` on menu cables.
    fn render_registers(&self, test_wire: usize) -> String {
        let mut out = format!(
            "Test Register {}: Test Wire {}\n  {}\n  ABCDEFGHIJKLMNOPQRSTUVWXYZ\n",
            index_letter(self.test_register),
            index_letter(test_wire),
            self.menu.menu_line()
        );
        for (cable, wires) in self.registers.iter().enumerate() {
            out.push(index_letter(cable));
            out.push(' ');
            for &live in wires {
                out.push(if live { '|' } else { '-' });
            }
            if self.menu.contains(cable) {
                out.push('=');
            }
            out.push('\n');
        }
        out
    }
}
