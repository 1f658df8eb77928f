//! # SIGABA Emulator
//!
//! An emulator of the ECM Mark II (aka SIGABA), the US cipher machine of
//! World War II, in its CSP-889 and CSP-2900 versions. The emulation
//! follows the machine now aboard USS Pampanito SS-383 in San Francisco,
//! quirks included, so identical rotor orders, starting positions and
//! keystrokes reproduce the artifact's output bit for bit.

pub mod machine;
pub mod rotor;

#[cfg(feature = "tui")]
pub mod tui;

// Re-export commonly used types
pub use machine::{
    keystrokes, Direction, Key, KeyboardError, MachineController, MachineSettings,
    MachineVariant, OperatingSwitch, RotorCage, ZeroizeSwitch,
};
pub use rotor::{BankKind, Orientation, Rotor, RotorBank, RotorSpec};

#[cfg(feature = "tui")]
pub use tui::run_panel;
