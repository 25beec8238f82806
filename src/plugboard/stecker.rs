//! The plain stecker board: up to ten symmetric socket pairs.

use crate::charset::CharSetFlag;
use crate::error::EnigmaError;

/// Direct pairwise-swap plugboard. Both contact directions are the same
/// swap, so the board is always reciprocal.
pub struct SteckerPlugboard {
    flag: CharSetFlag,
    map: [usize; 26],
}

impl SteckerPlugboard {
    /// Builds a board with every socket self-mapped.
    pub fn new() -> Self {
        let mut map = [0usize; 26];
        for (i, slot) in map.iter_mut().enumerate() {
            *slot = i;
        }
        SteckerPlugboard { flag: CharSetFlag::Letters, map }
    }

    pub fn char_set_flag(&self) -> CharSetFlag {
        self.flag
    }

    /// Connections are held by index, so switching the character set
    /// only renames the sockets.
    pub fn set_char_set_flag(&mut self, flag: CharSetFlag) {
        self.flag = flag;
    }

    fn socket_index(&self, socket_id: &str) -> Result<usize, EnigmaError> {
        self.flag
            .index_of(socket_id)
            .map_err(|_| EnigmaError::SocketId(socket_id.to_string()))
    }

    /// Connects two sockets, breaking any stale pairing of either side
    /// first. Connecting a socket to itself just disconnects it.
    ///
    /// # Errors
    /// Returns [`EnigmaError::SocketId`] if either id is not a socket in
    /// the active character set.
    pub fn connect(&mut self, socket_a: &str, socket_b: &str) -> Result<(), EnigmaError> {
        let a = self.socket_index(socket_a)?;
        let b = self.socket_index(socket_b)?;
        self.disconnect_index(a);
        self.disconnect_index(b);
        if a != b {
            self.map[a] = b;
            self.map[b] = a;
        }
        Ok(())
    }

    /// Clears the socket's pairing, both sides. No-op if unconnected.
    ///
    /// # Errors
    /// Returns [`EnigmaError::SocketId`] on an invalid id.
    pub fn disconnect(&mut self, socket_id: &str) -> Result<(), EnigmaError> {
        let index = self.socket_index(socket_id)?;
        self.disconnect_index(index);
        Ok(())
    }

    fn disconnect_index(&mut self, index: usize) {
        let partner = self.map[index];
        self.map[partner] = partner;
        self.map[index] = index;
    }

    /// Removes every connection.
    pub fn clear(&mut self) {
        for (i, slot) in self.map.iter_mut().enumerate() {
            *slot = i;
        }
    }

    pub fn lg_contact_output(&self, index: usize) -> usize {
        self.map[index % 26]
    }

    pub fn sm_contact_output(&self, index: usize) -> usize {
        self.map[index % 26]
    }

    /// True if the socket is plugged.
    ///
    /// # Errors
    /// Returns [`EnigmaError::SocketId`] on an invalid id.
    pub fn is_connected(&self, socket_id: &str) -> Result<bool, EnigmaError> {
        let index = self.socket_index(socket_id)?;
        Ok(self.map[index] != index)
    }

    /// The socket's partner symbol, or `None` if unconnected.
    ///
    /// # Errors
    /// Returns [`EnigmaError::SocketId`] on an invalid id.
    pub fn connected_to(&self, socket_id: &str) -> Result<Option<&'static str>, EnigmaError> {
        let index = self.socket_index(socket_id)?;
        let partner = self.map[index];
        if partner == index {
            Ok(None)
        } else {
            Ok(Some(self.flag.character_set()[partner]))
        }
    }

    /// Number of plugged sockets (two per pair).
    pub fn number_of_connections(&self) -> usize {
        self.map.iter().enumerate().filter(|&(i, &p)| i != p).count()
    }

    /// Plugged socket symbols in character-set order.
    pub fn connected(&self) -> Vec<&'static str> {
        let set = self.flag.character_set();
        self.map
            .iter()
            .enumerate()
            .filter(|&(i, &p)| i != p)
            .map(|(i, _)| set[i])
            .collect()
    }

    /// Unplugged socket symbols in character-set order.
    pub fn unconnected(&self) -> Vec<&'static str> {
        let set = self.flag.character_set();
        self.map
            .iter()
            .enumerate()
            .filter(|&(i, &p)| i == p)
            .map(|(i, _)| set[i])
            .collect()
    }

    /// Connects a batch of pairs on top of the current state.
    ///
    /// # Errors
    /// Returns [`EnigmaError::SocketId`] on the first invalid id;
    /// earlier pairs in the batch stay connected.
    pub fn make_connections(&mut self, pairs: &[(String, String)]) -> Result<(), EnigmaError> {
        for (a, b) in pairs {
            self.connect(a, b)?;
        }
        Ok(())
    }

    /// True iff no sockets are connected, or exactly twenty are.
    pub fn valid_plugboard(&self) -> bool {
        let connected = self.number_of_connections();
        connected == 0 || connected == 20
    }

    /// Connected pairs as symbol tuples, each pair reported once with
    /// the lower-indexed socket first.
    pub fn connections(&self) -> Vec<(String, String)> {
        let set = self.flag.character_set();
        self.map
            .iter()
            .enumerate()
            .filter(|&(i, &p)| i < p)
            .map(|(i, &p)| (set[i].to_string(), set[p].to_string()))
            .collect()
    }
}

impl Default for SteckerPlugboard {
    fn default() -> Self {
        SteckerPlugboard::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_identity() {
        let board = SteckerPlugboard::new();
        for index in 0..26 {
            assert_eq!(board.lg_contact_output(index), index);
        }
        assert!(board.valid_plugboard());
    }

    #[test]
    fn test_connect_is_symmetric() {
        let mut board = SteckerPlugboard::new();
        board.connect("A", "B").unwrap();
        assert_eq!(board.lg_contact_output(0), 1);
        assert_eq!(board.lg_contact_output(1), 0);
        assert_eq!(board.sm_contact_output(0), 1);
    }

    #[test]
    fn test_reconnect_breaks_stale_pairing() {
        let mut board = SteckerPlugboard::new();
        board.connect("A", "B").unwrap();
        board.connect("A", "C").unwrap();
        assert_eq!(board.lg_contact_output(0), 2);
        assert_eq!(board.lg_contact_output(2), 0);
        // B is back to self-mapped.
        assert_eq!(board.lg_contact_output(1), 1);
    }

    #[test]
    fn test_self_connection_disconnects() {
        let mut board = SteckerPlugboard::new();
        board.connect("A", "B").unwrap();
        board.connect("A", "A").unwrap();
        assert_eq!(board.lg_contact_output(0), 0);
        assert_eq!(board.lg_contact_output(1), 1);
    }

    #[test]
    fn test_disconnect() {
        let mut board = SteckerPlugboard::new();
        board.connect("F", "Q").unwrap();
        board.disconnect("Q").unwrap();
        assert_eq!(board.lg_contact_output(5), 5);
        assert_eq!(board.lg_contact_output(16), 16);
    }

    #[test]
    fn test_invalid_socket_id() {
        let mut board = SteckerPlugboard::new();
        assert_eq!(
            board.connect("A", "5").err(),
            Some(EnigmaError::SocketId("5".to_string()))
        );
    }

    #[test]
    fn test_valid_only_at_zero_or_twenty() {
        let mut board = SteckerPlugboard::new();
        board.connect("A", "B").unwrap();
        assert!(!board.valid_plugboard());
        let pairs = [
            ("C", "D"), ("E", "F"), ("G", "H"), ("I", "J"), ("K", "L"),
            ("M", "N"), ("O", "P"), ("Q", "R"), ("S", "T"),
        ];
        for (a, b) in pairs {
            board.connect(a, b).unwrap();
        }
        assert!(board.valid_plugboard());
        board.connect("U", "V").unwrap();
        assert!(!board.valid_plugboard());
    }

    #[test]
    fn test_numbers_character_set() {
        let mut board = SteckerPlugboard::new();
        board.connect("A", "B").unwrap();
        board.set_char_set_flag(CharSetFlag::Numbers);
        // The pairing survives by index under the new names.
        assert_eq!(board.lg_contact_output(0), 1);
        board.connect("03", "04").unwrap();
        assert_eq!(board.lg_contact_output(2), 3);
        assert_eq!(
            board.connect("A", "C").err(),
            Some(EnigmaError::SocketId("A".to_string()))
        );
        assert_eq!(
            board.connections()[0],
            ("01".to_string(), "02".to_string())
        );
    }

    #[test]
    fn test_socket_queries() {
        let mut board = SteckerPlugboard::new();
        board.make_connections(&[
            ("A".to_string(), "B".to_string()),
            ("M".to_string(), "Z".to_string()),
        ])
        .unwrap();
        assert!(board.is_connected("A").unwrap());
        assert!(!board.is_connected("C").unwrap());
        assert_eq!(board.connected_to("Z").unwrap(), Some("M"));
        assert_eq!(board.connected_to("C").unwrap(), None);
        assert_eq!(board.number_of_connections(), 4);
        assert_eq!(board.connected(), vec!["A", "B", "M", "Z"]);
        assert_eq!(board.unconnected().len(), 22);
        assert!(!board.unconnected().contains(&"M"));
    }

    #[test]
    fn test_connections_listing() {
        let mut board = SteckerPlugboard::new();
        board.connect("B", "A").unwrap();
        board.connect("Z", "M").unwrap();
        assert_eq!(
            board.connections(),
            vec![
                ("A".to_string(), "B".to_string()),
                ("M".to_string(), "Z".to_string()),
            ]
        );
    }
}
