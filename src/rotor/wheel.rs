//! A single rotor: one wiring permutation, a position, and an orientation.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::rotor::wiring;

/// How a rotor is seated in its bank. A reversed rotor is installed upside
/// down and back to front, which flips both its step direction and the side
/// its wiring table is read from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    Normal,
    Reversed,
}

/// One physical rotor.
///
/// Large (cipher/control) rotors have 26 contacts, small (index) rotors 10.
/// Both share this type; an index rotor simply uses the first ten slots of
/// the wiring arrays. The inverse table is computed once at construction so
/// both current directions are a single lookup.
///
/// Positions are the clockwise displacement of the rotor from its labeled
/// zero on top, held modulo the contact count.
#[derive(Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rotor {
    position: u8,
    reversed: bool,
    size: u8,
    forward: [u8; 26],
    backward: [u8; 26],
}

impl Rotor {
    /// Build a rotor from a wiring table (left side in, right side out).
    ///
    /// The table length sets the contact count, capped at 26. Entries are
    /// reduced modulo the contact count, so any input produces a usable
    /// rotor; the built-in tables are permutations and survive unchanged.
    pub fn from_wiring(table: &[u8], orientation: Orientation) -> Self {
        let size = table.len().clamp(1, 26) as u8;
        let mut forward = [0u8; 26];
        let mut backward = [0u8; 26];
        for (left, &right) in table.iter().take(size as usize).enumerate() {
            forward[left] = right % size;
        }
        for left in 0..size {
            backward[forward[left as usize] as usize] = left;
        }
        Self {
            position: 0,
            reversed: orientation == Orientation::Reversed,
            size,
            forward,
            backward,
        }
    }

    /// Current position, in `[0, contact count)`.
    #[inline]
    pub fn position(&self) -> u8 {
        self.position
    }

    /// Set the position directly, wrapping modulo the contact count.
    #[inline]
    pub fn set_position(&mut self, position: u8) {
        self.position = position % self.size;
    }

    /// Is this rotor installed reversed?
    #[inline]
    pub fn is_reversed(&self) -> bool {
        self.reversed
    }

    /// Is a large rotor sitting on its zeroized position (letter `O` on top)?
    #[inline]
    pub fn is_home(&self) -> bool {
        self.position == wiring::HOME_POSITION
    }

    /// Rotate one step clockwise as seen by the operator.
    ///
    /// Large rotors are labeled clockwise increasing, so a clockwise step
    /// *decreases* the position of a normally seated rotor and increases the
    /// position of a reversed one.
    pub fn rotate_cw(&mut self) {
        self.position = if self.reversed {
            (self.position + 1) % self.size
        } else {
            (self.position + self.size - 1) % self.size
        };
    }

    /// Rotate one step counter-clockwise as seen by the operator.
    pub fn rotate_ccw(&mut self) {
        self.position = if self.reversed {
            (self.position + self.size - 1) % self.size
        } else {
            (self.position + 1) % self.size
        };
    }

    /// Pass a current through the rotor entering on the left side.
    #[inline]
    pub fn left_to_right(&self, contact: u8) -> u8 {
        if self.reversed {
            self.turned_path(&self.backward, contact)
        } else {
            self.straight_path(&self.forward, contact)
        }
    }

    /// Pass a current through the rotor entering on the right side.
    #[inline]
    pub fn right_to_left(&self, contact: u8) -> u8 {
        if self.reversed {
            self.turned_path(&self.forward, contact)
        } else {
            self.straight_path(&self.backward, contact)
        }
    }

    /// Table lookup for a normally seated rotor: offset in by the position,
    /// look up, offset back out.
    fn straight_path(&self, table: &[u8; 26], contact: u8) -> u8 {
        let n = self.size as usize;
        let pos = self.position as usize;
        let contact = contact as usize % n;
        ((table[(contact + pos) % n] as usize + n - pos) % n) as u8
    }

    /// Table lookup for a reversed rotor. Upside down and back to front means
    /// both offsets change sign, with the opposite-side table supplied by the
    /// caller.
    fn turned_path(&self, table: &[u8; 26], contact: u8) -> u8 {
        let n = self.size as usize;
        let pos = self.position as usize;
        let contact = contact as usize % n;
        ((pos + n - table[(pos + n - contact) % n] as usize) % n) as u8
    }
}

impl fmt::Debug for Rotor {
    // The wiring tables are noise in debug output; show the moving parts.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rotor")
            .field("position", &self.position)
            .field("reversed", &self.reversed)
            .field("size", &self.size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rotor::wiring;

    fn large(number: usize, orientation: Orientation) -> Rotor {
        Rotor::from_wiring(&wiring::large_rotor(number), orientation)
    }

    #[test]
    fn test_rotation_inverts() {
        for orientation in [Orientation::Normal, Orientation::Reversed] {
            let mut rotor = large(3, orientation);
            for start in 0..26 {
                rotor.set_position(start);
                rotor.rotate_cw();
                rotor.rotate_ccw();
                assert_eq!(rotor.position(), start);
            }
        }
    }

    #[test]
    fn test_reversal_flips_step_direction() {
        let mut normal = large(1, Orientation::Normal);
        normal.set_position(10);
        normal.rotate_cw();
        assert_eq!(normal.position(), 9, "clockwise decreases a normal rotor");

        let mut reversed = large(1, Orientation::Reversed);
        reversed.set_position(10);
        reversed.rotate_cw();
        assert_eq!(reversed.position(), 11, "clockwise increases a reversed rotor");
    }

    #[test]
    fn test_position_wraps() {
        let mut rotor = large(2, Orientation::Normal);
        rotor.set_position(0);
        rotor.rotate_cw();
        assert_eq!(rotor.position(), 25);
        rotor.rotate_ccw();
        assert_eq!(rotor.position(), 0);

        rotor.set_position(200);
        assert_eq!(rotor.position(), 200 % 26);
    }

    #[test]
    fn test_paths_invert_each_other() {
        for number in 0..10 {
            for orientation in [Orientation::Normal, Orientation::Reversed] {
                let mut rotor = large(number, orientation);
                for position in [0u8, 1, 13, 14, 25] {
                    rotor.set_position(position);
                    for contact in 0..26 {
                        let out = rotor.left_to_right(contact);
                        assert_eq!(rotor.right_to_left(out), contact);
                    }
                }
            }
        }
    }

    #[test]
    fn test_index_rotor_paths_invert() {
        for number in 0..5 {
            for orientation in [Orientation::Normal, Orientation::Reversed] {
                let mut rotor =
                    Rotor::from_wiring(&wiring::index_rotor(number), orientation);
                for position in 0..10 {
                    rotor.set_position(position);
                    for contact in 0..10 {
                        let out = rotor.left_to_right(contact);
                        assert_eq!(rotor.right_to_left(out), contact);
                    }
                }
            }
        }
    }

    #[test]
    fn test_straight_through_rotor_is_transparent() {
        // The identity wiring cancels its own position offset at any setting.
        let mut rotor = large(0, Orientation::Normal);
        for position in 0..26 {
            rotor.set_position(position);
            for contact in 0..26 {
                assert_eq!(rotor.left_to_right(contact), contact);
                assert_eq!(rotor.right_to_left(contact), contact);
            }
        }
    }

    #[test]
    fn test_wiring_sanitized_modulo_contacts() {
        let rotor = Rotor::from_wiring(&[30, 1, 2, 3, 4, 5, 6, 7, 8, 9], Orientation::Normal);
        // 30 % 10 == 0, so the table is still the identity permutation.
        assert_eq!(rotor.left_to_right(0), 0);
    }
}
