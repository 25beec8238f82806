//! The Uhr box: a 40-position rotary connector between ten plug pairs.
//!
//! Ten "A" plugs wire to the outer contact ring and ten "B" plugs to the
//! inner ring. Each plug carries a thick (large) and a thin (small)
//! contact; turning the rotor re-routes every thick contact to some
//! other plug's thin contact. The swap is reciprocal through the machine
//! (small is the inverse of large) but, unlike the stecker board, the
//! large-contact map itself is not an involution at most settings.

use crate::charset::CharSetFlag;
use crate::error::EnigmaError;

/// Rotor wiring, outer contact position to inner contact position at
/// setting zero. Every thick contact crosses to a thin contact of the
/// other ring at every setting.
const UHR_WIRING: [usize; 40] = [
    38, 19, 4, 33, 2, 15, 8, 13, 6, 3, 12, 37, 10, 39, 16, 25, 14, 35, 20, 17, 18, 23, 24, 29,
    22, 31, 28, 21, 26, 27, 32, 9, 30, 7, 36, 5, 34, 11, 0, 1,
];

/// Which ring a plug belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlugSide {
    A,
    B,
}

/// One of the twenty Uhr box plugs, "01A".."10A" / "01B".."10B".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlugId {
    side: PlugSide,
    /// Zero-based plug number.
    number: usize,
}

impl PlugId {
    /// Parses a plug id such as "07B".
    ///
    /// # Errors
    /// Returns [`EnigmaError::PlugId`] on anything else.
    pub fn parse(plug_id: &str) -> Result<Self, EnigmaError> {
        let invalid = || EnigmaError::PlugId(plug_id.to_string());
        if plug_id.len() != 3 {
            return Err(invalid());
        }
        let number: usize = plug_id[..2].parse().map_err(|_| invalid())?;
        if !(1..=10).contains(&number) {
            return Err(invalid());
        }
        let side = match &plug_id[2..] {
            "A" | "a" => PlugSide::A,
            "B" | "b" => PlugSide::B,
            _ => return Err(invalid()),
        };
        Ok(PlugId { side, number: number - 1 })
    }

    pub fn id(&self) -> String {
        let side = match self.side {
            PlugSide::A => 'A',
            PlugSide::B => 'B',
        };
        format!("{:02}{}", self.number + 1, side)
    }
}

/// The plug contact a signal enters on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Thick contact, keyboard-to-scrambler direction.
    Lg,
    /// Thin contact, scrambler-to-lampboard direction.
    Sm,
}

/// The rotary connector itself: wiring plus rotor setting.
pub struct UhrBox {
    forward: [usize; 40],
    reverse: [usize; 40],
    rotor_setting: usize,
}

impl UhrBox {
    pub fn new() -> Self {
        let mut reverse = [0usize; 40];
        for (outer, &inner) in UHR_WIRING.iter().enumerate() {
            reverse[inner] = outer;
        }
        UhrBox { forward: UHR_WIRING, reverse, rotor_setting: 0 }
    }

    pub fn rotor_setting(&self) -> usize {
        self.rotor_setting
    }

    /// # Errors
    /// Returns [`EnigmaError::UhrSetting`] above 39.
    pub fn set_rotor_setting(&mut self, setting: usize) -> Result<(), EnigmaError> {
        if setting >= 40 {
            return Err(EnigmaError::UhrSetting(setting));
        }
        self.rotor_setting = setting;
        Ok(())
    }

    fn cross(&self, position: usize, side: PlugSide) -> usize {
        let shifted = (position + self.rotor_setting) % 40;
        let landed = match side {
            PlugSide::A => self.forward[shifted],
            PlugSide::B => self.reverse[shifted],
        };
        (landed + 40 - self.rotor_setting) % 40
    }

    /// The plug whose opposite-thickness contact the signal exits on
    /// after crossing the rotor. A plug's thick contact sits at ring
    /// position `4n`, its thin contact at `4n + 2`.
    pub fn partner_plug(&self, plug: PlugId, contact: Contact) -> PlugId {
        let entry = match contact {
            Contact::Lg => 4 * plug.number,
            Contact::Sm => 4 * plug.number + 2,
        };
        let exit = self.cross(entry, plug.side);
        let side = match plug.side {
            PlugSide::A => PlugSide::B,
            PlugSide::B => PlugSide::A,
        };
        PlugId { side, number: exit / 4 }
    }
}

impl Default for UhrBox {
    fn default() -> Self {
        UhrBox::new()
    }
}

/// Plugboard variant routing socket pairs through an [`UhrBox`].
pub struct UhrBoxPlugboard {
    flag: CharSetFlag,
    uhr_box: UhrBox,
    /// Socket index each plug is connected to, A plugs then B plugs.
    plug_sockets: [[Option<usize>; 10]; 2],
    lg_contact_arr: [usize; 26],
    sm_contact_arr: [usize; 26],
}

impl UhrBoxPlugboard {
    pub fn new() -> Self {
        let mut board = UhrBoxPlugboard {
            flag: CharSetFlag::Letters,
            uhr_box: UhrBox::new(),
            plug_sockets: [[None; 10]; 2],
            lg_contact_arr: [0; 26],
            sm_contact_arr: [0; 26],
        };
        board.make_translation_arrays();
        board
    }

    pub fn char_set_flag(&self) -> CharSetFlag {
        self.flag
    }

    /// Sockets are held by index, so switching the character set only
    /// renames them.
    pub fn set_char_set_flag(&mut self, flag: CharSetFlag) {
        self.flag = flag;
    }

    pub fn rotor_setting(&self) -> usize {
        self.uhr_box.rotor_setting()
    }

    /// # Errors
    /// Returns [`EnigmaError::UhrSetting`] above 39.
    pub fn set_rotor_setting(&mut self, setting: usize) -> Result<(), EnigmaError> {
        self.uhr_box.set_rotor_setting(setting)?;
        self.make_translation_arrays();
        Ok(())
    }

    fn socket_index(&self, socket_id: &str) -> Result<usize, EnigmaError> {
        self.flag
            .index_of(socket_id)
            .map_err(|_| EnigmaError::SocketId(socket_id.to_string()))
    }

    fn plug_slot(&mut self, plug: PlugId) -> &mut Option<usize> {
        let side = match plug.side {
            PlugSide::A => 0,
            PlugSide::B => 1,
        };
        &mut self.plug_sockets[side][plug.number]
    }

    fn socket_of(&self, plug: PlugId) -> Option<usize> {
        let side = match plug.side {
            PlugSide::A => 0,
            PlugSide::B => 1,
        };
        self.plug_sockets[side][plug.number]
    }

    /// Connects a plug to a socket, unplugging anything already in that
    /// socket and re-plugging the plug if it was elsewhere.
    ///
    /// # Errors
    /// [`EnigmaError::PlugId`] / [`EnigmaError::SocketId`] on invalid
    /// ids.
    pub fn connect(&mut self, plug_id: &str, socket_id: &str) -> Result<(), EnigmaError> {
        let plug = PlugId::parse(plug_id)?;
        let socket = self.socket_index(socket_id)?;
        for side in &mut self.plug_sockets {
            for slot in side.iter_mut() {
                if *slot == Some(socket) {
                    *slot = None;
                }
            }
        }
        *self.plug_slot(plug) = Some(socket);
        self.make_translation_arrays();
        Ok(())
    }

    /// Unplugs whatever plug occupies the socket; no-op if empty.
    ///
    /// # Errors
    /// Returns [`EnigmaError::SocketId`] on an invalid id.
    pub fn disconnect(&mut self, socket_id: &str) -> Result<(), EnigmaError> {
        let socket = self.socket_index(socket_id)?;
        for side in &mut self.plug_sockets {
            for slot in side.iter_mut() {
                if *slot == Some(socket) {
                    *slot = None;
                }
            }
        }
        self.make_translation_arrays();
        Ok(())
    }

    /// Removes every plug. The rotor setting is kept.
    pub fn clear(&mut self) {
        self.plug_sockets = [[None; 10]; 2];
        self.make_translation_arrays();
    }

    pub fn number_of_connected(&self) -> usize {
        self.plug_sockets.iter().flatten().filter(|s| s.is_some()).count()
    }

    fn plug_at(&self, socket: usize) -> Option<PlugId> {
        for (side_index, side) in [PlugSide::A, PlugSide::B].into_iter().enumerate() {
            for number in 0..10 {
                if self.plug_sockets[side_index][number] == Some(socket) {
                    return Some(PlugId { side, number });
                }
            }
        }
        None
    }

    /// True if any plug occupies the socket.
    ///
    /// # Errors
    /// Returns [`EnigmaError::SocketId`] on an invalid id.
    pub fn is_connected(&self, socket_id: &str) -> Result<bool, EnigmaError> {
        let socket = self.socket_index(socket_id)?;
        Ok(self.plug_at(socket).is_some())
    }

    /// Id of the plug occupying the socket, or `None` if empty.
    ///
    /// # Errors
    /// Returns [`EnigmaError::SocketId`] on an invalid id.
    pub fn connected_plug(&self, socket_id: &str) -> Result<Option<String>, EnigmaError> {
        let socket = self.socket_index(socket_id)?;
        Ok(self.plug_at(socket).map(|p| p.id()))
    }

    /// The socket a signal entering on the given contact exits at, or
    /// `None` if the socket is unplugged or its Uhr partner dangles.
    ///
    /// # Errors
    /// Returns [`EnigmaError::SocketId`] on an invalid id.
    pub fn connected_to(
        &self,
        socket_id: &str,
        contact: Contact,
    ) -> Result<Option<&'static str>, EnigmaError> {
        let socket = self.socket_index(socket_id)?;
        let plug = match self.plug_at(socket) {
            Some(plug) => plug,
            None => return Ok(None),
        };
        Ok(self.resolve(plug, contact).map(|out| self.flag.character_set()[out]))
    }

    /// True iff no plugs are connected, or all twenty are.
    pub fn valid_plugboard(&self) -> bool {
        let n = self.number_of_connected();
        n == 0 || n == 20
    }

    pub fn lg_contact_output(&self, index: usize) -> usize {
        self.lg_contact_arr[index % 26]
    }

    pub fn sm_contact_output(&self, index: usize) -> usize {
        self.sm_contact_arr[index % 26]
    }

    /// Connected plugs as (plug id, socket symbol) pairs, A plugs first.
    pub fn connections(&self) -> Vec<(String, String)> {
        let set = self.flag.character_set();
        let mut connections = Vec::new();
        for (side_index, side) in [PlugSide::A, PlugSide::B].into_iter().enumerate() {
            for number in 0..10 {
                if let Some(socket) = self.plug_sockets[side_index][number] {
                    let plug = PlugId { side, number };
                    connections.push((plug.id(), set[socket].to_string()));
                }
            }
        }
        connections
    }

    /// Clears the board and applies the given plug-to-socket map.
    pub fn make_connections(&mut self, connections: &[(String, String)]) -> Result<(), EnigmaError> {
        self.clear();
        for (plug_id, socket_id) in connections {
            self.connect(plug_id, socket_id)?;
        }
        Ok(())
    }

    fn resolve(&self, plug: PlugId, contact: Contact) -> Option<usize> {
        let partner = self.uhr_box.partner_plug(plug, contact);
        self.socket_of(partner)
    }

    /// Rebuilds both 26-entry translation arrays. A socket with no plug,
    /// or whose Uhr partner plug dangles unconnected, stays
    /// self-mapped.
    fn make_translation_arrays(&mut self) {
        let mut lg = [0usize; 26];
        let mut sm = [0usize; 26];
        for (i, slot) in lg.iter_mut().enumerate() {
            *slot = i;
        }
        for (i, slot) in sm.iter_mut().enumerate() {
            *slot = i;
        }
        for (side_index, side) in [PlugSide::A, PlugSide::B].into_iter().enumerate() {
            for number in 0..10 {
                if let Some(socket) = self.plug_sockets[side_index][number] {
                    let plug = PlugId { side, number };
                    if let Some(out) = self.resolve(plug, Contact::Lg) {
                        lg[socket] = out;
                    }
                    if let Some(out) = self.resolve(plug, Contact::Sm) {
                        sm[socket] = out;
                    }
                }
            }
        }
        self.lg_contact_arr = lg;
        self.sm_contact_arr = sm;
    }
}

impl Default for UhrBoxPlugboard {
    fn default() -> Self {
        UhrBoxPlugboard::new()
    }
}
