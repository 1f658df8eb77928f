//! The rotor cage: three banks and the stepping network between them.
//!
//! The cage owns the cipher, control and index banks plus the fixed wiring
//! that connects them. Each keyed cycle pushes the message current through
//! the cipher bank, then fires a set of stepping currents: control bank →
//! control/index wiring → index bank → magnets → cipher rotors, followed by
//! the control bank's own odometer advance.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::machine::settings::MachineSettings;
use crate::rotor::{wiring, BankKind, RotorBank};

/// Which way the message current flows through the cipher bank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Encrypt,
    Decrypt,
}

/// Position of the machine-type switch.
///
/// The CSP-889 and CSP-2900 differ in the control-to-index wiring, in how
/// many stepping currents are driven, and in the step direction of cipher
/// rotors 2 and 4. In the middle (neutral) position no current flows at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MachineVariant {
    Csp889,
    Csp2900,
    Neutral,
}

impl fmt::Display for MachineVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MachineVariant::Csp889 => write!(f, "CSP 889"),
            MachineVariant::Csp2900 => write!(f, "CSP 2900"),
            MachineVariant::Neutral => write!(f, " "),
        }
    }
}

/// The rotor cage.
///
/// `lockup_count` counts enciphered characters since the first or last
/// cipher rotor last moved. A postwar modification trips a hard stop when it
/// reaches 21; an index bank installed so that the outer rotors never step
/// is the usual cause.
#[derive(Clone, Serialize, Deserialize)]
pub struct RotorCage {
    pub cipher: RotorBank,
    pub control: RotorBank,
    pub index: RotorBank,
    pub lockup_count: u32,
}

impl RotorCage {
    /// Assemble a cage from rotor-order settings. All positions start at 0;
    /// callers normally [`zeroize`](Self::zeroize) and set the index bank
    /// before use.
    pub fn new(settings: &MachineSettings) -> Self {
        Self {
            cipher: RotorBank::new(BankKind::Cipher, &settings.cipher),
            control: RotorBank::new(BankKind::Control, &settings.control),
            index: RotorBank::new(BankKind::Index, &settings.index),
            lockup_count: 0,
        }
    }

    /// Encipher or decipher one contact through the cipher bank using the
    /// current rotor positions. No rotor moves.
    pub fn substitute(&self, direction: Direction, contact: u8) -> u8 {
        match direction {
            Direction::Encrypt => self.cipher.left_to_right_path(contact),
            Direction::Decrypt => self.cipher.right_to_left_path(contact),
        }
    }

    /// Advance the control bank one cycle, water-meter fashion.
    ///
    /// Slot 2 steps every cycle. Slot 3 steps when slot 2 leaves the home
    /// position. Slot 1 steps when slot 3 leaves home, which can only happen
    /// while slot 2 is on home. Slots 0 and 4 never move on their own.
    pub fn step_control_bank(&mut self) {
        let fast_at_home = self.control.rotor(2).is_home();
        let medium_at_home = self.control.rotor(3).is_home();
        if fast_at_home {
            if medium_at_home {
                self.control.rotor_mut(1).rotate_cw();
            }
            self.control.rotor_mut(3).rotate_cw();
        }
        self.control.rotor_mut(2).rotate_cw();
    }

    /// Fire the stepping currents and advance the energized cipher rotors.
    ///
    /// Several current paths can land on the same magnet in one cycle, so
    /// the magnet states are collected first and each energized rotor steps
    /// exactly once. Between 1 and 4 cipher rotors move per cycle. Whenever
    /// slot 0 or 4 moves the lockup counter resets.
    pub fn step_cipher_bank(&mut self, variant: MachineVariant) {
        let contacts = match variant {
            // Four currents enter the control bank at contacts F through I.
            MachineVariant::Csp889 => 5..=8,
            // The CSP-2900 drives six currents, D through I.
            MachineVariant::Csp2900 => 3..=8,
            MachineVariant::Neutral => return,
        };

        let mut energized = [false; RotorBank::SLOTS];
        for contact in contacts {
            let control_out = self.control.right_to_left_path(contact);
            let index_in = match variant {
                MachineVariant::Csp2900 => {
                    // Control outputs P, Q and R are not connected on the 2900.
                    if (15..=17).contains(&control_out) {
                        continue;
                    }
                    wiring::CONTROL_INDEX_2900[control_out as usize]
                }
                _ => wiring::CONTROL_INDEX_889[control_out as usize],
            };
            let index_out = self.index.left_to_right_path(index_in);
            let magnet = wiring::INDEX_MAG[index_out as usize] as usize;
            energized[magnet - 1] = true;
        }

        for slot in 0..RotorBank::SLOTS {
            if !energized[slot] {
                continue;
            }
            if variant == MachineVariant::Csp2900 && (slot == 1 || slot == 3) {
                // Rotors 2 and 4 run backwards on a CSP-2900.
                self.cipher.rotor_mut(slot).rotate_ccw();
            } else {
                self.cipher.rotor_mut(slot).rotate_cw();
            }
            if slot == 0 || slot == 4 {
                self.lockup_count = 0;
            }
        }
    }

    /// One full keyed cycle: substitute with the rotors as they stand, then
    /// step the cipher bank, then the control bank. The substitution always
    /// sees the pre-step positions and both banks always advance, whatever
    /// the substituted value was.
    pub fn cycle(&mut self, contact: u8, direction: Direction, variant: MachineVariant) -> u8 {
        let out = self.substitute(direction, contact);
        self.step_cipher_bank(variant);
        self.step_control_bank();
        out
    }

    /// Run one cycle's worth of rotor motion without a substitution. The
    /// Blank key does this: it drives the stepping magnets but prints
    /// nothing from the cipher bank.
    pub fn advance(&mut self, variant: MachineVariant) {
        self.step_cipher_bank(variant);
        self.step_control_bank();
    }

    /// Set the cipher and control rotors straight to the home position,
    /// letter `O` on top.
    pub fn zeroize(&mut self) {
        self.set_cipher_positions("OOOOO");
        self.set_control_positions("OOOOO");
    }

    /// One press of the Blank key with the zeroize switch on: every cipher
    /// and control rotor not yet home advances one step toward it. Repeated
    /// presses end with the machine zeroized.
    pub fn zeroize_step(&mut self, variant: MachineVariant) {
        for slot in 0..RotorBank::SLOTS {
            if !self.cipher.rotor(slot).is_home() {
                if variant == MachineVariant::Csp2900 && (slot == 1 || slot == 3) {
                    self.cipher.rotor_mut(slot).rotate_ccw();
                } else {
                    self.cipher.rotor_mut(slot).rotate_cw();
                }
                if slot == 0 || slot == 4 {
                    self.lockup_count = 0;
                }
            }
            if !self.control.rotor(slot).is_home() {
                self.control.rotor_mut(slot).rotate_cw();
            }
        }
    }

    /// Set the cipher rotor positions from a display string. Moving the
    /// first or last rotor by hand clears the lockup counter, exactly as a
    /// magnet-driven step of those rotors does.
    pub fn set_cipher_positions(&mut self, text: &str) {
        let outer_before = (
            self.cipher.rotor(0).position(),
            self.cipher.rotor(4).position(),
        );
        self.cipher.set_positions(text);
        let outer_after = (
            self.cipher.rotor(0).position(),
            self.cipher.rotor(4).position(),
        );
        if outer_before != outer_after {
            self.lockup_count = 0;
        }
    }

    /// Set the control rotor positions from a display string.
    pub fn set_control_positions(&mut self, text: &str) {
        self.control.set_positions(text);
    }

    /// Set the index rotor positions from a display string of digits.
    pub fn set_index_positions(&mut self, text: &str) {
        self.index.set_positions(text);
    }

    /// Cipher rotor positions for display.
    pub fn cipher_positions(&self) -> String {
        self.cipher.positions()
    }

    /// Control rotor positions for display.
    pub fn control_positions(&self) -> String {
        self.control.positions()
    }

    /// Index rotor positions for display.
    pub fn index_positions(&self) -> String {
        self.index.positions()
    }
}

impl fmt::Debug for RotorCage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RotorCage")
            .field("cipher", &self.cipher_positions())
            .field("control", &self.control_positions())
            .field("index", &self.index_positions())
            .field("lockup_count", &self.lockup_count)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::machine::settings::MachineSettings;

    fn zeroized_cage() -> RotorCage {
        let mut cage = RotorCage::new(&MachineSettings::default());
        cage.zeroize();
        cage.set_index_positions("00000");
        cage
    }

    #[test]
    fn test_identity_cipher_bank_substitutes_straight_through() {
        let settings = MachineSettings::from_strings(Some("0N0N0N0N0N"), None, None);
        let mut cage = RotorCage::new(&settings);
        cage.set_cipher_positions("AAAAA");
        assert_eq!(cage.substitute(Direction::Encrypt, 0), 0);
    }

    #[test]
    fn test_substitution_is_a_bijection_under_direction_flip() {
        let cage = zeroized_cage();
        for contact in 0..26 {
            let enciphered = cage.substitute(Direction::Encrypt, contact);
            assert_eq!(cage.substitute(Direction::Decrypt, enciphered), contact);
        }
    }

    #[test]
    fn test_substitute_has_no_side_effects() {
        let cage = zeroized_cage();
        let before = cage.cipher_positions();
        for contact in 0..26 {
            cage.substitute(Direction::Encrypt, contact);
        }
        assert_eq!(cage.cipher_positions(), before);
    }

    #[test]
    fn test_odometer_all_home_steps_three_rotors() {
        let mut cage = zeroized_cage();
        cage.step_control_bank();
        assert_eq!(cage.control_positions(), "ONNNO");
    }

    #[test]
    fn test_odometer_only_fast_home_steps_two_rotors() {
        let mut cage = zeroized_cage();
        cage.set_control_positions("OOOAO");
        cage.step_control_bank();
        assert_eq!(cage.control_positions(), "OONZO");
    }

    #[test]
    fn test_odometer_neither_home_steps_fast_only() {
        let mut cage = zeroized_cage();
        cage.set_control_positions("OOABO");
        cage.step_control_bank();
        assert_eq!(cage.control_positions(), "OOZBO");
    }

    #[test]
    fn test_odometer_medium_home_alone_does_not_carry() {
        // Slot 3 sits on home while slot 2 is away: the slow rotor must not
        // move, only the fast one.
        let mut cage = zeroized_cage();
        cage.set_control_positions("OOAOO");
        cage.step_control_bank();
        assert_eq!(cage.control_positions(), "OOZOO");
    }

    #[test]
    fn test_first_cipher_step_matches_machine() {
        let mut cage = zeroized_cage();
        cage.step_cipher_bank(MachineVariant::Csp889);
        assert_eq!(cage.cipher_positions(), "NONON");

        let mut cage = zeroized_cage();
        cage.step_cipher_bank(MachineVariant::Csp2900);
        assert_eq!(cage.cipher_positions(), "NONON");
    }

    #[test]
    fn test_cipher_step_with_offset_index_bank() {
        let mut cage = zeroized_cage();
        cage.set_index_positions("12345");
        cage.step_cipher_bank(MachineVariant::Csp889);
        assert_eq!(cage.cipher_positions(), "NNOON");
    }

    #[test]
    fn test_outer_rotor_step_resets_lockup() {
        let mut cage = zeroized_cage();
        cage.lockup_count = 17;
        // The first step from the zeroized defaults moves slots 0, 2 and 4.
        cage.step_cipher_bank(MachineVariant::Csp889);
        assert_eq!(cage.lockup_count, 0);
    }

    #[test]
    fn test_neutral_variant_moves_nothing() {
        let mut cage = zeroized_cage();
        cage.step_cipher_bank(MachineVariant::Neutral);
        assert_eq!(cage.cipher_positions(), "OOOOO");
    }

    #[test]
    fn test_cycle_substitutes_before_stepping() {
        let mut cage = zeroized_cage();
        let frozen = cage.clone();
        let out = cage.cycle(7, Direction::Encrypt, MachineVariant::Csp889);
        assert_eq!(out, frozen.substitute(Direction::Encrypt, 7));
        assert_ne!(cage.cipher_positions(), frozen.cipher_positions());
        assert_ne!(cage.control_positions(), frozen.control_positions());
    }

    #[test]
    fn test_advance_moves_like_a_cycle() {
        let mut keyed = zeroized_cage();
        keyed.cycle(0, Direction::Encrypt, MachineVariant::Csp889);
        let mut blanked = zeroized_cage();
        blanked.advance(MachineVariant::Csp889);
        assert_eq!(keyed.cipher_positions(), blanked.cipher_positions());
        assert_eq!(keyed.control_positions(), blanked.control_positions());
    }

    #[test]
    fn test_zeroize_sets_home() {
        let mut cage = RotorCage::new(&MachineSettings::default());
        cage.set_cipher_positions("ABCDE");
        cage.set_control_positions("VWXYZ");
        cage.zeroize();
        assert_eq!(cage.cipher_positions(), "OOOOO");
        assert_eq!(cage.control_positions(), "OOOOO");
    }

    #[test]
    fn test_zeroize_step_converges_to_home() {
        let mut cage = RotorCage::new(&MachineSettings::default());
        cage.set_cipher_positions("ABCDE");
        cage.set_control_positions("VWXYZ");
        let mut presses = 0;
        while cage.cipher_positions() != "OOOOO" || cage.control_positions() != "OOOOO" {
            cage.zeroize_step(MachineVariant::Csp889);
            presses += 1;
            assert!(presses <= 26, "zeroizing must finish within one revolution");
        }
        // Position E is 16 clockwise steps from home.
        assert_eq!(presses, 16);
    }

    #[test]
    fn test_zeroize_step_converges_on_csp2900() {
        let mut cage = RotorCage::new(&MachineSettings::default());
        cage.set_cipher_positions("ABCDE");
        let mut presses = 0;
        while cage.cipher_positions() != "OOOOO" {
            cage.zeroize_step(MachineVariant::Csp2900);
            presses += 1;
            assert!(presses <= 26);
        }
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        const ORDER: &str = "[0-9][NR][0-9][NR][0-9][NR][0-9][NR][0-9][NR]";

        proptest! {
            #[test]
            fn substitution_inverts_for_any_setting(
                order in ORDER,
                positions in "[A-Z]{5}",
                contact in 0u8..26,
            ) {
                let settings =
                    MachineSettings::from_strings(Some(&order), None, None);
                let mut cage = RotorCage::new(&settings);
                cage.set_cipher_positions(&positions);
                let enciphered = cage.substitute(Direction::Encrypt, contact);
                prop_assert_eq!(
                    cage.substitute(Direction::Decrypt, enciphered),
                    contact
                );
            }

            #[test]
            fn substitution_is_a_permutation(
                order in ORDER,
                positions in "[A-Z]{5}",
            ) {
                let settings =
                    MachineSettings::from_strings(Some(&order), None, None);
                let mut cage = RotorCage::new(&settings);
                cage.set_cipher_positions(&positions);
                let mut seen = [false; 26];
                for contact in 0..26 {
                    let out = cage.substitute(Direction::Encrypt, contact) as usize;
                    prop_assert!(!seen[out]);
                    seen[out] = true;
                }
            }

            #[test]
            fn stepping_moves_one_to_four_cipher_rotors(
                control in ORDER,
                index in ORDER,
                index_positions in "[0-9]{5}",
            ) {
                let settings =
                    MachineSettings::from_strings(None, Some(&control), Some(&index));
                let mut cage = RotorCage::new(&settings);
                cage.zeroize();
                cage.set_index_positions(&index_positions);
                let before = cage.cipher_positions();
                cage.step_cipher_bank(MachineVariant::Csp889);
                let after = cage.cipher_positions();
                let moved = before
                    .chars()
                    .zip(after.chars())
                    .filter(|(b, a)| b != a)
                    .count();
                prop_assert!((1..=4).contains(&moved));
            }
        }
    }

    #[test]
    fn test_hand_setting_outer_cipher_rotor_resets_lockup() {
        let mut cage = zeroized_cage();
        cage.lockup_count = 12;
        cage.set_cipher_positions("AOOOO");
        assert_eq!(cage.lockup_count, 0);

        cage.lockup_count = 12;
        cage.set_cipher_positions("AOOOO");
        assert_eq!(cage.lockup_count, 12, "unchanged outer rotors keep the count");

        cage.set_cipher_positions("AOBOO");
        assert_eq!(cage.lockup_count, 12, "middle rotors do not clear it");
    }
}
