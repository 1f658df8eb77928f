//! The machine: rotor cage, keyboard, and the operating state machine.
//!
//! This module implements the complete ECM Mark II mechanism:
//! - [`RotorCage`] - substitution and the indirect stepping network
//! - [`MachineController`] - switches, counters, and keystroke handling
//! - [`MachineSettings`] - daily rotor-order configuration
//! - [`Key`] - keyboard events

pub mod cage;
pub mod controller;
pub mod keyboard;
pub mod settings;

pub use cage::{Direction, MachineVariant, RotorCage};
pub use controller::{MachineController, OperatingSwitch, ZeroizeSwitch, LOCKUP_LIMIT};
pub use keyboard::{keystrokes, Key, KeyboardError};
pub use settings::{
    MachineSettings, DEFAULT_CIPHER_ORDER, DEFAULT_CONTROL_ORDER, DEFAULT_INDEX_ORDER,
};
