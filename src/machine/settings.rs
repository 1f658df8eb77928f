//! Rotor-order configuration.
//!
//! A bank's rotor order is written as a 10-character string, two characters
//! per slot: the wiring number followed by `N` (normal) or `R` (reversed),
//! e.g. `"0N1N2N3N4N"`. Near the end of the war this was set once each day
//! from the key list.

use serde::{Deserialize, Serialize};

use crate::rotor::{Orientation, RotorSpec};

/// Default cipher bank order.
pub const DEFAULT_CIPHER_ORDER: &str = "0N1N2N3N4N";

/// Default control bank order.
pub const DEFAULT_CONTROL_ORDER: &str = "5N6N7N8N9N";

/// Default index bank order. By the end of the war the index rotors were
/// always installed 10, 20, 30, 40, 50.
pub const DEFAULT_INDEX_ORDER: &str = "0N1N2N3N4N";

/// Rotor selections for all three banks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MachineSettings {
    pub cipher: [RotorSpec; 5],
    pub control: [RotorSpec; 5],
    pub index: [RotorSpec; 5],
}

impl MachineSettings {
    /// Build settings from order strings, substituting the documented
    /// default for any string that is absent or not exactly 10 characters.
    /// Individual bad characters degrade per slot: a non-digit wiring
    /// number becomes 0, any orientation character other than `R` reads as
    /// normal.
    pub fn from_strings(
        cipher: Option<&str>,
        control: Option<&str>,
        index: Option<&str>,
    ) -> Self {
        Self {
            cipher: parse_order(cipher, DEFAULT_CIPHER_ORDER),
            control: parse_order(control, DEFAULT_CONTROL_ORDER),
            index: parse_order(index, DEFAULT_INDEX_ORDER),
        }
    }
}

impl Default for MachineSettings {
    fn default() -> Self {
        Self::from_strings(None, None, None)
    }
}

fn parse_order(text: Option<&str>, default: &str) -> [RotorSpec; 5] {
    let text = match text {
        Some(text) if text.chars().count() == 10 => text,
        _ => default,
    };
    let symbols: Vec<char> = text.chars().collect();
    std::array::from_fn(|slot| RotorSpec {
        number: symbols[slot * 2].to_digit(10).unwrap_or(0) as usize,
        orientation: if symbols[slot * 2 + 1].to_ascii_uppercase() == 'R' {
            Orientation::Reversed
        } else {
            Orientation::Normal
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_orders() {
        let settings = MachineSettings::default();
        assert_eq!(settings.cipher[0].number, 0);
        assert_eq!(settings.cipher[4].number, 4);
        assert_eq!(settings.control[0].number, 5);
        assert_eq!(settings.control[4].number, 9);
        assert!(settings
            .cipher
            .iter()
            .all(|spec| spec.orientation == Orientation::Normal));
    }

    #[test]
    fn test_parse_reversed_and_lowercase() {
        let settings = MachineSettings::from_strings(Some("0R1n2N3r4N"), None, None);
        assert_eq!(settings.cipher[0].orientation, Orientation::Reversed);
        assert_eq!(settings.cipher[1].orientation, Orientation::Normal);
        assert_eq!(settings.cipher[3].orientation, Orientation::Reversed);
    }

    #[test]
    fn test_wrong_length_falls_back_to_default() {
        let settings = MachineSettings::from_strings(Some("0N1N"), Some(""), None);
        assert_eq!(settings.cipher[1].number, 1);
        assert_eq!(settings.control[0].number, 5);
    }

    #[test]
    fn test_bad_characters_degrade_per_slot() {
        let settings = MachineSettings::from_strings(Some("XN1N2N3N4N"), None, None);
        assert_eq!(settings.cipher[0].number, 0);
        assert_eq!(settings.cipher[1].number, 1);
    }
}
