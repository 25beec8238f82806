//! Frozen cipher-text snapshots for the machine emulation.
//!
//! Every expected string here was produced once from a known-good run
//! and frozen: any change in output indicates a regression in the
//! rotor maths, the stepping cascade or the plugboard wiring.
//!
//! Coverage:
//! - stecker plugboard with ten pairs, offset rotor and ring settings
//! - default all-A settings on each three-rotor model and the M4
//! - Uhr box plugboard, fully plugged at setting 2
//! - stepping cascade around the middle-rotor turnover
//! - settings snapshot round trip through JSON

use enigma_bombe::{make_machine, Enigma, MachineSettings};

const MESSAGE: &str = "MYNAMEISCIARANCLEAR";

fn encode(machine: &mut Enigma, text: &str) -> String {
    text.chars()
        .filter_map(|c| machine.character_input(c).unwrap())
        .collect()
}

fn wired(machine_type: &str, json: &str) -> Enigma {
    let mut machine = make_machine(machine_type).unwrap();
    let settings: MachineSettings = serde_json::from_str(json).unwrap();
    machine.apply_settings(&settings).unwrap();
    machine
}

// ═══════════════════════════════════════════════════════════════════════
// Stecker plugboard
// ═══════════════════════════════════════════════════════════════════════

const STECKER_SETUP: &str = r#"{
    "reflector": "UKW-B",
    "rotor_types": {"RS": "III", "RM": "II", "RF": "I"},
    "rotor_settings": {"RS": "X", "RM": "Y", "RF": "Z"},
    "ring_settings": {"RS": "X", "RM": "Y", "RF": "Z"},
    "plugboard_connections": [
        ["A", "B"], ["C", "D"], ["E", "F"], ["G", "H"], ["I", "J"],
        ["K", "L"], ["M", "N"], ["O", "P"], ["Q", "R"], ["S", "T"]
    ]
}"#;

#[test]
fn stecker_vector() {
    let mut machine = wired("WEHRMACHT", STECKER_SETUP);
    assert!(machine.valid_enigma());
    assert_eq!(encode(&mut machine, MESSAGE), "LDHHAUKORQRKSVXGZUI");
}

#[test]
fn stecker_vector_deciphers() {
    let mut machine = wired("WEHRMACHT", STECKER_SETUP);
    assert_eq!(encode(&mut machine, "LDHHAUKORQRKSVXGZUI"), MESSAGE);
}

#[test]
fn non_alphabet_input_is_dropped_without_stepping() {
    let mut machine = wired("WEHRMACHT", STECKER_SETUP);
    assert_eq!(machine.character_input(' ').unwrap(), None);
    assert_eq!(machine.character_input('3').unwrap(), None);
    assert_eq!(encode(&mut machine, "MY NAME IS CIARAN, CLEAR."), "LDHHAUKORQRKSVXGZUI");
}

// ═══════════════════════════════════════════════════════════════════════
// Default all-A settings
// ═══════════════════════════════════════════════════════════════════════

const ALL_A_SETUP: &str = r#"{
    "reflector": "UKW-B",
    "rotor_types": {"RS": "III", "RM": "II", "RF": "I"}
}"#;

/// The same rotors at the same settings produce the same cipher text on
/// every three-rotor model.
#[test]
fn all_a_vector_on_each_three_rotor_model() {
    for machine_type in ["WEHRMACHT", "LUFTWAFFE", "ENIGMA M3 Kriegsmarine"] {
        let mut machine = wired(machine_type, ALL_A_SETUP);
        assert_eq!(encode(&mut machine, MESSAGE), "HCLMFDVUKZJZGEEOOCY", "{machine_type}");
    }
}

/// Thin UKW-B with Beta at A is wired to match the three-rotor UKW-B, so
/// the four-rotor machine at all-A reproduces the same vector.
#[test]
fn all_a_vector_on_m4_with_beta_at_a() {
    let setup = r#"{
        "reflector": "UKW-B",
        "rotor_types": {"R4": "Beta", "RS": "III", "RM": "II", "RF": "I"}
    }"#;
    let mut machine = wired("ENIGMA M4 u-boat", setup);
    assert_eq!(encode(&mut machine, MESSAGE), "HCLMFDVUKZJZGEEOOCY");
}

/// A four-rotor machine with its own thin reflector and a static Beta
/// rotor still deciphers its own output.
#[test]
fn m4_round_trip() {
    let setup = r#"{
        "reflector": "UKW-B",
        "rotor_types": {"R4": "Beta", "RS": "VI", "RM": "II", "RF": "VIII"},
        "rotor_settings": {"R4": "C", "RS": "Q", "RM": "E", "RF": "V"}
    }"#;
    let mut encoder = wired("ENIGMA M4 u-boat", setup);
    let snapshot = encoder.settings();
    let cipher = encode(&mut encoder, MESSAGE);
    assert_ne!(cipher, MESSAGE);

    let mut decoder = make_machine("ENIGMA M4 u-boat").unwrap();
    decoder.apply_settings(&snapshot).unwrap();
    assert_eq!(encode(&mut decoder, &cipher), MESSAGE);
}

// ═══════════════════════════════════════════════════════════════════════
// Uhr box
// ═══════════════════════════════════════════════════════════════════════

/// Fully plugged Uhr at setting 2: plugs 01A..10A into sockets A..J,
/// plugs 01B..10B into K..T.
const UHR_SETUP: &str = r#"{
    "reflector": "UKW-B",
    "rotor_types": {"RS": "III", "RM": "II", "RF": "I"},
    "plugboard_mode": "U",
    "uhr_box_setting": 2,
    "plugboard_connections": {
        "01A": "A", "02A": "B", "03A": "C", "04A": "D", "05A": "E",
        "06A": "F", "07A": "G", "08A": "H", "09A": "I", "10A": "J",
        "01B": "K", "02B": "L", "03B": "M", "04B": "N", "05B": "O",
        "06B": "P", "07B": "Q", "08B": "R", "09B": "S", "10B": "T"
    }
}"#;

#[test]
fn uhr_vector() {
    let mut machine = wired("WEHRMACHT", UHR_SETUP);
    assert!(machine.valid_enigma());
    assert_eq!(encode(&mut machine, MESSAGE), "FMIPNGKZJLVICKACOJZ");
}

#[test]
fn uhr_vector_deciphers() {
    let mut machine = wired("WEHRMACHT", UHR_SETUP);
    assert_eq!(encode(&mut machine, "FMIPNGKZJLVICKACOJZ"), MESSAGE);
}

/// Applying an Uhr setting while a stecker board is fitted is refused.
#[test]
fn uhr_setting_needs_uhr_mode() {
    let mut machine = make_machine("WEHRMACHT").unwrap();
    let settings: MachineSettings =
        serde_json::from_str(r#"{"uhr_box_setting": 5}"#).unwrap();
    assert!(machine.apply_settings(&settings).is_err());
}

// ═══════════════════════════════════════════════════════════════════════
// Stepping cascade
// ═══════════════════════════════════════════════════════════════════════

/// Frozen window sequence with rotors I/II/III from ADU: the middle
/// rotor picks up at its turnover letter E and carries the slow rotor.
#[test]
fn turnover_cascade_from_adu() {
    let setup = r#"{
        "reflector": "UKW-B",
        "rotor_types": {"RS": "I", "RM": "II", "RF": "III"},
        "rotor_settings": {"RS": "A", "RM": "D", "RF": "U"}
    }"#;
    let mut machine = wired("WEHRMACHT", setup);
    let mut windows = Vec::new();
    for _ in 0..6 {
        machine.character_input('A').unwrap();
        let settings = machine.settings();
        let rotor_settings = settings.rotor_settings.unwrap();
        windows.push(format!(
            "{}{}{}",
            rotor_settings["RS"], rotor_settings["RM"], rotor_settings["RF"]
        ));
    }
    assert_eq!(windows, ["ADV", "AEW", "BEX", "CEY", "DEZ", "EEA"]);
}

/// With the turnover flag cleared only the fast rotor moves.
#[test]
fn turnover_flag_off_steps_fast_rotor_only() {
    let setup = r#"{
        "reflector": "UKW-B",
        "rotor_types": {"RS": "I", "RM": "II", "RF": "III"},
        "rotor_settings": {"RS": "A", "RM": "D", "RF": "U"},
        "turnover_flag": false
    }"#;
    let mut machine = wired("WEHRMACHT", setup);
    for _ in 0..40 {
        machine.character_input('A').unwrap();
    }
    let rotor_settings = machine.settings().rotor_settings.unwrap();
    assert_eq!(rotor_settings["RS"], "A");
    assert_eq!(rotor_settings["RM"], "D");
    assert_eq!(rotor_settings["RF"], "I");
}

// ═══════════════════════════════════════════════════════════════════════
// Settings round trip
// ═══════════════════════════════════════════════════════════════════════

#[test]
fn settings_survive_json_round_trip() {
    let machine = wired("WEHRMACHT", STECKER_SETUP);
    let snapshot = machine.settings();
    let json = serde_json::to_string(&snapshot).unwrap();
    let restored: MachineSettings = serde_json::from_str(&json).unwrap();
    assert_eq!(snapshot, restored);

    let mut copy = make_machine("WEHRMACHT").unwrap();
    copy.apply_settings(&restored).unwrap();
    assert_eq!(encode(&mut copy, MESSAGE), "LDHHAUKORQRKSVXGZUI");
}

#[test]
fn uhr_settings_survive_json_round_trip() {
    let machine = wired("WEHRMACHT", UHR_SETUP);
    let snapshot = machine.settings();
    let json = serde_json::to_string(&snapshot).unwrap();
    let restored: MachineSettings = serde_json::from_str(&json).unwrap();

    let mut copy = make_machine("WEHRMACHT").unwrap();
    copy.apply_settings(&restored).unwrap();
    assert_eq!(encode(&mut copy, MESSAGE), "FMIPNGKZJLVICKACOJZ");
}
