//! A bank of five rotors of one kind.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rotor::wheel::{Orientation, Rotor};
use crate::rotor::wiring;

/// Which of the three banks a rotor set belongs to.
///
/// The kind fixes the contact count, the display alphabet, and which way the
/// bank is read: the cipher bank carries the plaintext/ciphertext current in
/// either direction, the control bank always carries the stepping current
/// right to left, the index bank always left to right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BankKind {
    Cipher,
    Control,
    Index,
}

impl BankKind {
    /// Number of contacts on each rotor of this kind.
    pub fn modulus(self) -> u8 {
        match self {
            BankKind::Cipher | BankKind::Control => wiring::LETTER_COUNT,
            BankKind::Index => wiring::DIGIT_COUNT,
        }
    }

    /// Display symbol of the zeroized position.
    pub fn home_symbol(self) -> char {
        match self {
            BankKind::Cipher | BankKind::Control => 'O',
            BankKind::Index => '0',
        }
    }

    /// Position value of the zeroized position.
    pub fn home_position(self) -> u8 {
        match self {
            BankKind::Cipher | BankKind::Control => wiring::HOME_POSITION,
            BankKind::Index => 0,
        }
    }

    /// Position named by a display symbol, if the symbol is in this bank's
    /// alphabet.
    fn symbol_position(self, symbol: char) -> Option<u8> {
        match self {
            BankKind::Cipher | BankKind::Control => wiring::letter_index(symbol),
            BankKind::Index => symbol.to_digit(10).map(|digit| digit as u8),
        }
    }

    /// Display symbol of a position.
    fn position_symbol(self, position: u8) -> char {
        match self {
            BankKind::Cipher | BankKind::Control => wiring::index_letter(position),
            BankKind::Index => char::from(b'0' + position % wiring::DIGIT_COUNT),
        }
    }
}

/// Selection of one rotor for a bank slot: which wiring, and which way up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RotorSpec {
    /// Index into the wiring table for this bank's rotor size.
    pub number: usize,
    pub orientation: Orientation,
}

/// An ordered bank of exactly five rotors.
///
/// Slot order is fixed at construction; the machine's rotor order is chosen
/// once when the cage is assembled, never rearranged at runtime.
#[derive(Clone, Serialize, Deserialize)]
pub struct RotorBank {
    kind: BankKind,
    rotors: [Rotor; 5],
}

impl RotorBank {
    /// Rotors in every bank.
    pub const SLOTS: usize = 5;

    /// Assemble a bank from five rotor selections. Out-of-range wiring
    /// numbers fall back to wiring 0.
    pub fn new(kind: BankKind, specs: &[RotorSpec; 5]) -> Self {
        let rotors = std::array::from_fn(|slot| {
            let spec = specs[slot];
            match kind {
                BankKind::Index => {
                    Rotor::from_wiring(&wiring::index_rotor(spec.number), spec.orientation)
                }
                _ => Rotor::from_wiring(&wiring::large_rotor(spec.number), spec.orientation),
            }
        });
        Self { kind, rotors }
    }

    pub fn kind(&self) -> BankKind {
        self.kind
    }

    pub fn rotor(&self, slot: usize) -> &Rotor {
        &self.rotors[slot]
    }

    pub fn rotor_mut(&mut self, slot: usize) -> &mut Rotor {
        &mut self.rotors[slot]
    }

    /// Pass a current through slots 0 to 4, entering each rotor on the left.
    pub fn left_to_right_path(&self, contact: u8) -> u8 {
        self.rotors
            .iter()
            .fold(contact, |current, rotor| rotor.left_to_right(current))
    }

    /// Pass a current through slots 4 to 0, entering each rotor on the right.
    pub fn right_to_left_path(&self, contact: u8) -> u8 {
        self.rotors
            .iter()
            .rev()
            .fold(contact, |current, rotor| rotor.right_to_left(current))
    }

    /// Current positions as a 5-symbol display string, slot 0 first.
    pub fn positions(&self) -> String {
        self.rotors
            .iter()
            .map(|rotor| self.kind.position_symbol(rotor.position()))
            .collect()
    }

    /// Set positions from a display string.
    ///
    /// Sanitized symbol by symbol rather than rejected: a missing, surplus,
    /// or out-of-alphabet symbol becomes the bank's home symbol. Lowercase
    /// letters are accepted.
    pub fn set_positions(&mut self, text: &str) {
        let mut symbols = text.chars();
        for rotor in &mut self.rotors {
            let position = symbols
                .next()
                .and_then(|symbol| self.kind.symbol_position(symbol.to_ascii_uppercase()))
                .unwrap_or_else(|| self.kind.home_position());
            rotor.set_position(position);
        }
    }
}

impl fmt::Debug for RotorBank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RotorBank")
            .field("kind", &self.kind)
            .field("positions", &self.positions())
            .finish()
    }
}
