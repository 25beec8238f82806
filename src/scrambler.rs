//! Rotor group state machine.
//!
//! The scrambler owns the machine's cells (reflector plus three or four
//! rotor slots), checks devices in and out of the collection, and
//! implements both the double-stepping turnover cascade and the
//! bidirectional signal path.

use crate::charset::CharSetFlag;
use crate::collection::Collection;
use crate::device::{Device, Reflector, Rotor};
use crate::equipment::{MachineSpec, Position};
use crate::error::EnigmaError;

struct Cell {
    position: Position,
    device: Option<Device>,
}

/// Reflector and rotor cells for one machine model.
pub struct Scrambler {
    spec: &'static MachineSpec,
    collection: Collection,
    cells: Vec<Cell>,
    turnover_flag: bool,
    flag: CharSetFlag,
}

impl Scrambler {
    /// Builds an empty scrambler with one cell per catalog position and
    /// turnover enabled.
    pub fn new(spec: &'static MachineSpec) -> Self {
        let cells = spec
            .cells
            .iter()
            .map(|&position| Cell { position, device: None })
            .collect();
        Scrambler {
            spec,
            collection: Collection::new(spec),
            cells,
            turnover_flag: true,
            flag: CharSetFlag::Letters,
        }
    }

    pub fn spec(&self) -> &'static MachineSpec {
        self.spec
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    fn cell_index(&self, position: Position) -> Result<usize, EnigmaError> {
        self.cells
            .iter()
            .position(|c| c.position == position)
            .ok_or_else(|| EnigmaError::InvalidPosition(position.as_str().to_string()))
    }

    /// Installs the device with `id` into the cell at `position`,
    /// returning any current occupant to the collection first.
    ///
    /// # Errors
    /// [`EnigmaError::InvalidPosition`] if the model has no such cell,
    /// [`EnigmaError::IncompatiblePosition`] if the device cannot occupy
    /// it, [`EnigmaError::DeviceBorrowed`] if another cell holds the
    /// device.
    pub fn set_device(&mut self, position: Position, id: &str) -> Result<(), EnigmaError> {
        let index = self.cell_index(position)?;
        self.collection.compatible_device_position(id, position)?;
        if let Some(old) = self.cells[index].device.take() {
            self.collection.return_device(old.id())?;
        }
        let mut device = self.collection.borrow_device(id, position)?;
        if let Device::Rotor(ref mut rotor) = device {
            rotor.set_char_set_flag(self.flag);
        }
        self.cells[index].device = Some(device);
        Ok(())
    }

    /// Returns the cell's occupant to the collection; no-op if empty.
    pub fn remove_device(&mut self, position: Position) -> Result<(), EnigmaError> {
        let index = self.cell_index(position)?;
        if let Some(device) = self.cells[index].device.take() {
            self.collection.return_device(device.id())?;
        }
        Ok(())
    }

    /// Empties every cell back into the collection.
    pub fn clear_scrambler(&mut self) -> Result<(), EnigmaError> {
        for position in self.spec.cells.iter().copied().collect::<Vec<_>>() {
            self.remove_device(position)?;
        }
        Ok(())
    }

    /// Id of the cell's occupant, or `None` if empty.
    pub fn device_id(&self, position: Position) -> Result<Option<&'static str>, EnigmaError> {
        let index = self.cell_index(position)?;
        Ok(self.cells[index].device.as_ref().map(|d| d.id()))
    }

    fn rotor(&self, position: Position) -> Result<&Rotor, EnigmaError> {
        let index = self.cell_index(position)?;
        match self.cells[index].device {
            Some(Device::Rotor(ref rotor)) => Ok(rotor),
            _ => Err(EnigmaError::ScramblerInvalid(format!(
                "cell {} is empty",
                position.as_str()
            ))),
        }
    }

    fn rotor_mut(&mut self, position: Position) -> Result<&mut Rotor, EnigmaError> {
        let index = self.cell_index(position)?;
        match self.cells[index].device {
            Some(Device::Rotor(ref mut rotor)) => Ok(rotor),
            _ => Err(EnigmaError::ScramblerInvalid(format!(
                "cell {} is empty",
                position.as_str()
            ))),
        }
    }

    fn reflector(&self) -> Result<&Reflector, EnigmaError> {
        let index = self.cell_index(Position::Ref)?;
        match self.cells[index].device {
            Some(Device::Reflector(ref reflector)) => Ok(reflector),
            _ => Err(EnigmaError::ScramblerInvalid("cell REF is empty".to_string())),
        }
    }

    /// True when every cell is occupied.
    pub fn valid_scrambler(&self) -> bool {
        self.cells.iter().all(|c| c.device.is_some())
    }

    /// Resets every installed rotor's rotor setting to the first
    /// position. Ring settings are untouched.
    pub fn default_settings(&mut self) {
        for cell in &mut self.cells {
            if let Some(Device::Rotor(ref mut rotor)) = cell.device {
                rotor.default_rotor_setting();
            }
        }
    }

    /// Passes a contact index through the rotor stack and back: fast to
    /// slow toward the reflector, reflect, slow to fast back out. Does
    /// not step.
    ///
    /// # Errors
    /// [`EnigmaError::ScramblerInvalid`] if any cell is empty,
    /// [`EnigmaError::IndexOutOfRange`] if `index` is above 25.
    pub fn output(&self, index: usize) -> Result<usize, EnigmaError> {
        if index >= 26 {
            return Err(EnigmaError::IndexOutOfRange(index));
        }
        let mut signal = index;
        for position in self.spec.rotor_positions().rev() {
            signal = self.rotor(position)?.lh_output(signal)?;
        }
        signal = self.reflector()?.output(signal)?;
        for position in self.spec.rotor_positions() {
            signal = self.rotor(position)?.rh_output(signal)?;
        }
        Ok(signal)
    }

    /// Steps the rotors, then passes the signal through. Models the key
    /// press advancing the pawls before the contacts close.
    pub fn keyed_input(&mut self, index: usize) -> Result<usize, EnigmaError> {
        self.rotor_turnover()?;
        self.output(index)
    }

    /// The double-stepping cascade. All on-turnover checks read the
    /// pre-step positions; the increments do not interact within one
    /// call. With the turnover flag cleared only the fast rotor steps.
    ///
    /// # Errors
    /// [`EnigmaError::ScramblerInvalid`] if any cell is empty.
    pub fn rotor_turnover(&mut self) -> Result<(), EnigmaError> {
        if !self.valid_scrambler() {
            return Err(EnigmaError::ScramblerInvalid("rotor group is not valid".to_string()));
        }
        if self.turnover_flag {
            let middle_on_turnover = self.rotor(Position::Rm)?.on_turnover();
            let fast_on_turnover = self.rotor(Position::Rf)?.on_turnover();
            if middle_on_turnover {
                self.rotor_mut(Position::Rs)?.step();
            }
            if fast_on_turnover {
                self.rotor_mut(Position::Rm)?.step();
            }
        }
        self.rotor_mut(Position::Rf)?.step();
        Ok(())
    }

    pub fn turnover_flag(&self) -> bool {
        self.turnover_flag
    }

    pub fn set_turnover_flag(&mut self, flag: bool) {
        self.turnover_flag = flag;
    }

    pub fn char_set_flag(&self) -> CharSetFlag {
        self.flag
    }

    /// Switches the character set used for setting symbols. Settings are
    /// held as indices, so existing positions are preserved.
    pub fn set_char_set_flag(&mut self, flag: CharSetFlag) {
        self.flag = flag;
        for cell in &mut self.cells {
            if let Some(Device::Rotor(ref mut rotor)) = cell.device {
                rotor.set_char_set_flag(flag);
            }
        }
    }

    /// Rotor cell positions with their occupants' ids, in physical
    /// order.
    pub fn rotor_types(&self) -> Vec<(Position, Option<&'static str>)> {
        self.spec
            .rotor_positions()
            .map(|position| {
                let id = self
                    .cells
                    .iter()
                    .find(|c| c.position == position)
                    .and_then(|c| c.device.as_ref())
                    .map(|d| d.id());
                (position, id)
            })
            .collect()
    }

    /// Current rotor setting symbol of the rotor at `position`.
    pub fn rotor_setting(&self, position: Position) -> Result<&'static str, EnigmaError> {
        Ok(self.rotor(position)?.rotor_setting_symbol())
    }

    pub fn set_rotor_setting(
        &mut self,
        position: Position,
        symbol: &str,
    ) -> Result<(), EnigmaError> {
        self.rotor_mut(position)?.set_rotor_setting(symbol)
    }

    /// Current ring setting symbol of the rotor at `position`.
    pub fn ring_setting(&self, position: Position) -> Result<&'static str, EnigmaError> {
        Ok(self.rotor(position)?.ring_setting_symbol())
    }

    pub fn set_ring_setting(
        &mut self,
        position: Position,
        symbol: &str,
    ) -> Result<(), EnigmaError> {
        self.rotor_mut(position)?.set_ring_setting(symbol)
    }
}
