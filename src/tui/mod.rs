//! Terminal front panel for the emulator.
//!
//! Renders the machine the way an operator sees it:
//! - the three rotor bank position windows
//! - the master, zeroize and machine-type switches
//! - the keystroke counter and the paper tape
//!
//! The panel only feeds key events and switch changes into the
//! [`MachineController`](crate::MachineController) and reads back display
//! strings; the cipher logic all lives in the core.

mod app;
mod ui;

pub use app::{run_panel, PanelApp};
