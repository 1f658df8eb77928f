//! The operating state machine driven by keystrokes and switch changes.
//!
//! The switch action table, as observed on the Pampanito machine:
//!
//! ```text
//!          P                      R                       E
//! Zeroize  Blank key only         Blank key only          Blank key only
//!          Counter updates        Counter updates         Counter updates
//!          No rotor moves         Rotors step toward home Rotors step toward home
//!          Prints a space         No printing             Prints a space
//!
//! Operate  All printable keys     1-5 and Blank keys      26 letter keys
//!          Counter updates        Counter updates         Counter updates
//!          No rotor moves         1-5 move cipher+control Cipher and control move
//!          Printing               Blank moves cipher only Z/X/space handling, printing
//! ```
//!
//! Decrypt matches Encrypt except for direction and the Z, X and space bar
//! conventions: enciphering turns Z into X and the space bar into Z;
//! deciphering turns Z back into a space and ignores the space bar. Switching
//! from Plaintext or Encrypt into Reset pads the output to a full
//! five-letter group.

use serde::{Deserialize, Serialize};

use crate::machine::cage::{Direction, MachineVariant, RotorCage};
use crate::machine::keyboard::Key;
use crate::machine::settings::MachineSettings;
use crate::rotor::wiring;

/// Enciphered characters without outer cipher-rotor movement before the
/// machine refuses further keys. A postwar addition to catch index rotors
/// installed so the outer rotors never step.
pub const LOCKUP_LIMIT: u32 = 21;

/// The five-position master switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperatingSwitch {
    Off,
    Plaintext,
    Reset,
    Encrypt,
    Decrypt,
}

impl OperatingSwitch {
    /// Single-letter label engraved on the switch plate.
    pub fn label(self) -> char {
        match self {
            OperatingSwitch::Off => 'O',
            OperatingSwitch::Plaintext => 'P',
            OperatingSwitch::Reset => 'R',
            OperatingSwitch::Encrypt => 'E',
            OperatingSwitch::Decrypt => 'D',
        }
    }
}

/// The three-position zeroize/operate switch. In the middle position no key
/// does anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ZeroizeSwitch {
    Zeroize,
    Neutral,
    Operate,
}

/// The machine: a rotor cage plus the switches and counters around it.
///
/// All session state lives here as explicit fields; front ends mutate the
/// switches through the setters (which carry the transition side effects)
/// and feed keystrokes to [`handle_key`](Self::handle_key). Everything a
/// key or switch change emits is returned as a string of zero or more
/// characters for the caller's output tape.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MachineController {
    pub cage: RotorCage,
    operating_switch: OperatingSwitch,
    previous_operating: OperatingSwitch,
    zeroize_switch: ZeroizeSwitch,
    variant: MachineVariant,
    keystroke_count: u32,
    group_count: u32,
}

impl MachineController {
    /// Power-on state: machine off, zeroize switch on Zeroize, CSP-889,
    /// cipher and control banks zeroized, index rotors at `00000`.
    pub fn new(settings: &MachineSettings) -> Self {
        let mut cage = RotorCage::new(settings);
        cage.zeroize();
        cage.set_index_positions("00000");
        Self {
            cage,
            operating_switch: OperatingSwitch::Off,
            previous_operating: OperatingSwitch::Off,
            zeroize_switch: ZeroizeSwitch::Zeroize,
            variant: MachineVariant::Csp889,
            keystroke_count: 0,
            group_count: 0,
        }
    }

    pub fn operating_switch(&self) -> OperatingSwitch {
        self.operating_switch
    }

    pub fn zeroize_switch(&self) -> ZeroizeSwitch {
        self.zeroize_switch
    }

    pub fn variant(&self) -> MachineVariant {
        self.variant
    }

    pub fn keystroke_count(&self) -> u32 {
        self.keystroke_count
    }

    pub fn group_count(&self) -> u32 {
        self.group_count
    }

    /// Has the missing-rotor-motion stop tripped?
    pub fn is_locked(&self) -> bool {
        self.cage.lockup_count >= LOCKUP_LIMIT
    }

    /// The counter clear button. Mechanical, so it works even with the
    /// machine off.
    pub fn clear_keystroke_count(&mut self) {
        self.keystroke_count = 0;
    }

    /// Move the master switch, returning any characters the transition
    /// prints.
    ///
    /// Leaving Encrypt/Decrypt clears the lockup stop. Turning the machine
    /// off resets the group cam. Switching into Reset out of Plaintext or
    /// Encrypt spins the group cam back to its start, printing the spaces
    /// needed to round out the current five-letter group.
    pub fn set_operating_switch(&mut self, switch: OperatingSwitch) -> String {
        self.operating_switch = switch;
        if matches!(
            switch,
            OperatingSwitch::Off | OperatingSwitch::Plaintext | OperatingSwitch::Reset
        ) {
            self.cage.lockup_count = 0;
        }
        if switch == OperatingSwitch::Off {
            self.previous_operating = OperatingSwitch::Off;
            self.group_count = 0;
            return String::new();
        }

        let mut emitted = String::new();
        if switch == OperatingSwitch::Reset
            && matches!(
                self.previous_operating,
                OperatingSwitch::Plaintext | OperatingSwitch::Encrypt
            )
        {
            let fill = (5 - self.keystroke_count % 5) % 5;
            for _ in 0..fill {
                emitted.push(' ');
            }
            self.group_count = 0;
        }
        self.previous_operating = switch;
        emitted
    }

    pub fn set_zeroize_switch(&mut self, switch: ZeroizeSwitch) {
        self.zeroize_switch = switch;
    }

    pub fn set_variant(&mut self, variant: MachineVariant) {
        self.variant = variant;
    }

    /// Handle one keystroke, returning the characters it prints (empty for
    /// a dead or counted-only key).
    pub fn handle_key(&mut self, key: Key) -> String {
        // Machine off, either selector in the middle: keys do nothing.
        if self.operating_switch == OperatingSwitch::Off
            || self.variant == MachineVariant::Neutral
            || self.zeroize_switch == ZeroizeSwitch::Neutral
        {
            return String::new();
        }
        if self.is_locked() {
            return String::new();
        }
        // The repeat drive is not emulated.
        if key == Key::Repeat {
            return String::new();
        }
        if self.zeroize_switch == ZeroizeSwitch::Zeroize {
            return self.zeroize_key(key);
        }
        match self.operating_switch {
            OperatingSwitch::Off => String::new(),
            OperatingSwitch::Plaintext => self.plaintext_key(key),
            OperatingSwitch::Reset => self.reset_key(key),
            OperatingSwitch::Encrypt => self.encrypt_key(key),
            OperatingSwitch::Decrypt => self.decrypt_key(key),
        }
    }

    /// Zeroize switch on: only the Blank key responds. The documentation
    /// says this should work only in Reset, but the machine itself steps
    /// rotors in Encrypt and Decrypt too (printing a space there), and in
    /// Plaintext the Blank key still counts and spaces the tape.
    fn zeroize_key(&mut self, key: Key) -> String {
        if key != Key::Blank {
            return String::new();
        }
        match self.operating_switch {
            OperatingSwitch::Reset | OperatingSwitch::Encrypt | OperatingSwitch::Decrypt => {
                self.cage.zeroize_step(self.variant);
                self.keystroke_count += 1;
                if self.operating_switch == OperatingSwitch::Reset {
                    String::new()
                } else {
                    " ".to_string()
                }
            }
            OperatingSwitch::Plaintext => {
                self.keystroke_count += 1;
                " ".to_string()
            }
            OperatingSwitch::Off => String::new(),
        }
    }

    /// Plaintext: every printable key prints itself; Blank and the space
    /// bar print a space.
    fn plaintext_key(&mut self, key: Key) -> String {
        let printed = match key {
            Key::Letter(letter) => letter.to_string(),
            Key::Digit(digit) => digit.to_string(),
            Key::Dash => "-".to_string(),
            Key::Blank | Key::SpaceBar => " ".to_string(),
            Key::Repeat => return String::new(),
        };
        self.keystroke_count += 1;
        printed
    }

    /// Reset: keys 1-5 fire a stepping cycle and also advance the matching
    /// control rotor; this is how the control bank is set to a message key.
    /// The Blank key moving the cipher bank alone is a quirk of the
    /// artifact, not a documented feature.
    fn reset_key(&mut self, key: Key) -> String {
        match key {
            Key::Digit(digit @ '1'..='5') => {
                self.cage.step_cipher_bank(self.variant);
                let slot = (digit as u8 - b'1') as usize;
                self.cage.control.rotor_mut(slot).rotate_cw();
                self.keystroke_count += 1;
            }
            Key::Blank => {
                self.cage.step_cipher_bank(self.variant);
                self.keystroke_count += 1;
            }
            _ => {}
        }
        String::new()
    }

    fn encrypt_key(&mut self, key: Key) -> String {
        match key {
            // Digits and the dash are dead during enciphering.
            Key::Digit(_) | Key::Dash => String::new(),
            Key::Blank => {
                self.cage.advance(self.variant);
                self.keystroke_count += 1;
                self.group_count += 1;
                " ".to_string()
            }
            // There are only 26 ciphertext characters: Z stands in for the
            // space, and a typed Z becomes X. Deciphered text never has a Z.
            Key::SpaceBar => self.encrypt_letter('Z'),
            Key::Letter('Z') => self.encrypt_letter('X'),
            Key::Letter(letter) => self.encrypt_letter(letter),
            Key::Repeat => String::new(),
        }
    }

    fn encrypt_letter(&mut self, letter: char) -> String {
        let Some(contact) = wiring::letter_index(letter) else {
            return String::new();
        };
        let out = self.cage.cycle(contact, Direction::Encrypt, self.variant);
        self.keystroke_count += 1;
        let mut emitted = String::new();
        // Ciphertext prints in five-letter groups.
        if self.group_count != 0 && self.group_count % 5 == 0 {
            emitted.push(' ');
        }
        emitted.push(wiring::index_letter(out));
        self.group_count += 1;
        self.cage.lockup_count += 1;
        emitted
    }

    fn decrypt_key(&mut self, key: Key) -> String {
        match key {
            // The space bar, digits and dash are dead during deciphering.
            Key::SpaceBar | Key::Digit(_) | Key::Dash => String::new(),
            Key::Blank => {
                self.cage.advance(self.variant);
                self.keystroke_count += 1;
                self.cage.lockup_count += 1;
                " ".to_string()
            }
            Key::Letter(letter) => {
                let Some(contact) = wiring::letter_index(letter) else {
                    return String::new();
                };
                let out = self.cage.cycle(contact, Direction::Decrypt, self.variant);
                self.keystroke_count += 1;
                self.cage.lockup_count += 1;
                let out = wiring::index_letter(out);
                if out == 'Z' {
                    " ".to_string()
                } else {
                    out.to_string()
                }
            }
            Key::Repeat => String::new(),
        }
    }
}
