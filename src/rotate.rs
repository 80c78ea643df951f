//! 2D point rotation on the fixed-point amplitude scale.

use crate::trig::{self, ONE};

/// Rotate `(x, y)` about the origin by the angle whose sine and cosine
/// (amplitude scale, `ONE` = 1.0) are given.
///
/// Uses 32-bit intermediates and truncating division. The truncation
/// costs up to one unit per component per rotation; a rotate/unrotate
/// round trip can therefore drift by up to two units. This matches the
/// legacy fixed-point behavior and is deliberate — see DESIGN.md.
pub fn rotate(x: i16, y: i16, sin: i16, cos: i16) -> (i16, i16) {
    let xi = x as i32;
    let yi = y as i32;
    let s = sin as i32;
    let c = cos as i32;
    (
        ((xi * c - yi * s) / ONE as i32) as i16,
        ((xi * s + yi * c) / ONE as i32) as i16,
    )
}

/// Rotate `(x, y)` about the origin by `theta` angle units.
///
/// Convenience wrapper costing two table lookups; hoist the `sin`/`cos`
/// out with [`rotate`] when rotating many points by the same angle.
pub fn rotate_angle(x: i16, y: i16, theta: i16) -> (i16, i16) {
    rotate(x, y, trig::sin(theta), trig::cos(theta))
}
