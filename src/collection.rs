//! Per-machine device collection.
//!
//! Each machine owns one collection: an arena of device singletons built
//! from the equipment catalog, each carrying an `in_use_by` tag naming
//! the scrambler cell it is currently installed in. A device can be
//! checked out by at most one cell at a time.

use crate::device::{Device, Reflector, Rotor};
use crate::equipment::{DeviceKind, MachineSpec, Position};
use crate::error::EnigmaError;

struct Entry {
    device: Device,
    in_use_by: Option<Position>,
}

/// Device arena for one machine model.
pub struct Collection {
    spec: &'static MachineSpec,
    entries: Vec<Entry>,
}

impl Collection {
    /// Instantiates every device the catalog issues to `spec`,
    /// reflectors first.
    pub fn new(spec: &'static MachineSpec) -> Self {
        let mut entries = Vec::with_capacity(spec.reflectors.len() + spec.rotors.len());
        for reflector in spec.reflectors {
            entries.push(Entry {
                device: Device::Reflector(Reflector::new(reflector)),
                in_use_by: None,
            });
        }
        for rotor in spec.rotors {
            entries.push(Entry {
                device: Device::Rotor(Box::new(Rotor::new(rotor))),
                in_use_by: None,
            });
        }
        Collection { spec, entries }
    }

    /// The catalog spec this collection was built from.
    pub fn spec(&self) -> &'static MachineSpec {
        self.spec
    }

    fn entry_index(&self, id: &str) -> Result<usize, EnigmaError> {
        self.entries
            .iter()
            .position(|e| e.device.id().eq_ignore_ascii_case(id))
            .ok_or_else(|| EnigmaError::DeviceId(id.to_string()))
    }

    /// Device ids with their checkout state, in catalog order.
    pub fn device_list(&self) -> Vec<(&'static str, Option<Position>)> {
        self.entries.iter().map(|e| (e.device.id(), e.in_use_by)).collect()
    }

    /// Catalog ids of the devices matching any of the given kinds.
    pub fn device_list_by_kind(&self, kinds: &[DeviceKind]) -> Vec<&'static str> {
        self.entries
            .iter()
            .filter(|e| kinds.contains(&e.device.kind()))
            .map(|e| e.device.id())
            .collect()
    }

    /// Checks the device's capability flag against `allowed`.
    ///
    /// # Errors
    /// [`EnigmaError::DeviceId`] for an unknown id,
    /// [`EnigmaError::IncompatibleDevice`] if the kind is not allowed.
    pub fn compatible_device_type(
        &self,
        id: &str,
        allowed: &[DeviceKind],
    ) -> Result<(), EnigmaError> {
        let index = self.entry_index(id)?;
        if allowed.contains(&self.entries[index].device.kind()) {
            Ok(())
        } else {
            Err(EnigmaError::IncompatibleDevice(id.to_string()))
        }
    }

    /// Checks that the device can physically occupy `position` on this
    /// machine model.
    ///
    /// # Errors
    /// [`EnigmaError::DeviceId`] for an unknown id,
    /// [`EnigmaError::IncompatiblePosition`] if the device's kind does
    /// not match the cell's required kind.
    pub fn compatible_device_position(
        &self,
        id: &str,
        position: Position,
    ) -> Result<(), EnigmaError> {
        let index = self.entry_index(id)?;
        if self.entries[index].device.kind() == position.required_kind() {
            Ok(())
        } else {
            Err(EnigmaError::IncompatiblePosition {
                device_id: id.to_string(),
                position: position.as_str().to_string(),
            })
        }
    }

    /// Checks the device out for `position`, cloning it into the
    /// caller's cell.
    ///
    /// # Errors
    /// [`EnigmaError::DeviceId`] for an unknown id,
    /// [`EnigmaError::DeviceBorrowed`] if another cell already holds it.
    pub fn borrow_device(&mut self, id: &str, position: Position) -> Result<Device, EnigmaError> {
        let index = self.entry_index(id)?;
        let entry = &mut self.entries[index];
        if let Some(holder) = entry.in_use_by {
            return Err(EnigmaError::DeviceBorrowed {
                device_id: id.to_string(),
                in_use_by: holder.as_str().to_string(),
            });
        }
        entry.in_use_by = Some(position);
        Ok(entry.device.clone())
    }

    /// Clears the checkout tag; returning a free device is a no-op.
    pub fn return_device(&mut self, id: &str) -> Result<(), EnigmaError> {
        let index = self.entry_index(id)?;
        self.entries[index].in_use_by = None;
        Ok(())
    }
}
