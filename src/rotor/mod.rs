//! Rotor primitives.
//!
//! This module provides the pieces the rotor cage is assembled from:
//! - [`Rotor`] - one wired rotor with a position and an orientation
//! - [`RotorBank`] - an ordered bank of five rotors of one kind
//! - [`wiring`] - the wiring tables and alphabet helpers

mod bank;
mod wheel;
pub mod wiring;

pub use bank::{BankKind, RotorBank, RotorSpec};
pub use wheel::{Orientation, Rotor};
