//! Enigma rotor cipher machines and the Turing bombe.
//!
//! This crate emulates the wartime Enigma family (army, air force and
//! naval models, three and four rotor scramblers, stecker and Uhr box
//! plugboards) and the electromechanical bombe used to attack it with
//! a crib.
//!
//! # Architecture
//!
//! ```text
//! Device      (a wired rotor or reflector from the equipment catalog)
//!     ↕ borrowed from a per-machine Collection
//! Scrambler   (rotors seated in cells — REF, R4, RS, RM, RF)
//!     ↕ plugboard on the keyboard side
//! Enigma      (scrambler + plugboard, keyed and non-keyed input)
//!     ↕ 26 logical scramblers per rotor position block
//! TuringBombe (menu graph tracing over all 17576 rotor settings)
//! ```
//!
//! # Examples
//!
//! Encipher a message, then decipher it with the same settings:
//!
//! ```
//! use enigma_bombe::{make_machine, MachineSettings};
//!
//! let mut encoder = make_machine("WEHRMACHT").unwrap();
//! let setup: MachineSettings = serde_json::from_str(
//!     r#"{
//!         "reflector": "UKW-B",
//!         "rotor_types": {"RS": "III", "RM": "II", "RF": "I"},
//!         "rotor_settings": {"RS": "Q", "RM": "E", "RF": "V"}
//!     }"#,
//! )
//! .unwrap();
//! encoder.apply_settings(&setup).unwrap();
//! let settings = encoder.settings();
//!
//! let mut cipher = String::new();
//! for c in "TOPSECRET".chars() {
//!     if let Some(out) = encoder.character_input(c).unwrap() {
//!         cipher.push(out);
//!     }
//! }
//! assert_ne!(cipher, "TOPSECRET");
//!
//! let mut decoder = make_machine("WEHRMACHT").unwrap();
//! decoder.apply_settings(&settings).unwrap();
//! let mut plain = String::new();
//! for c in cipher.chars() {
//!     if let Some(out) = decoder.character_input(c).unwrap() {
//!         plain.push(out);
//!     }
//! }
//! assert_eq!(plain, "TOPSECRET");
//! ```
//!
//! Run a bombe attack from a crib:
//!
//! ```no_run
//! use enigma_bombe::TuringBombe;
//!
//! let mut bombe = TuringBombe::new(
//!     "WEATHERFORECASTBISCAY",
//!     "YHXBDYCWCJAQPBLMHMBGP",
//!     "UKW-B_III_II_I",
//!     'A',
//! )
//! .unwrap();
//! for stop in bombe.solve().unwrap() {
//!     println!("{} {:?}", stop.rotor_settings, stop.stecker_pairs);
//! }
//! ```

#![deny(clippy::all)]

pub mod bombe;
pub mod charset;
pub mod collection;
pub mod device;
pub mod equipment;
pub mod error;
pub mod machine;
pub mod plugboard;
pub mod scrambler;
pub mod settings;

pub use bombe::{run_permutations, BombeStop, TuringBombe};
pub use error::EnigmaError;
pub use machine::{make_configured_machine, make_machine, machine_list, Enigma};
pub use settings::{scrambler_perms, MachineSettings, Permutation, ScramblerPerm};
