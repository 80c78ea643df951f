//! Integer trigonometry on a 16384-units-per-turn angle scale.
//!
//! Two fixed-point scales live here and must never be mixed up:
//! the *angle* scale (`CYCLE` units = 360 deg) and the *amplitude*
//! scale (`ONE` = +1.0). `sin`/`cos` map angle units to amplitude
//! units; `atan2` maps amplitudes (or any same-scale pair) back to
//! angle units.
//!
//! All functions use quarter-wave / first-octant lookup tables with
//! linear interpolation and 32-bit intermediates, which keeps them
//! cheap on cores without an FPU.

// ── Angle scale ───────────────────────────────────────────────────────────────

/// Angle units per full turn (360 deg).
pub const CYCLE: i16 = 16384;
/// Angle units per half turn (180 deg).
pub const HALF_CYCLE: i16 = CYCLE / 2;
/// Angle units per quarter turn (90 deg).
pub const QUARTER: i16 = CYCLE / 4;

// ── Amplitude scale ───────────────────────────────────────────────────────────

/// Amplitude value treated as +1.0 by `sin`, `cos` and `atan2`.
pub const ONE: i16 = 32767;

/// Angle units per table entry in the quarter-wave sine table.
const SIN_STEP: i32 = (QUARTER as i32) / 32;

/// Quarter-wave sine table: `round(sin(i * 90deg/32) * ONE)` for i in 0..=32.
const SIN_TABLE: [i16; 33] = [
    0, 1608, 3212, 4808, 6393, 7962, 9512, 11039, 12539, 14010, 15446, 16846,
    18204, 19519, 20787, 22005, 23170, 24279, 25329, 26319, 27245, 28105,
    28898, 29621, 30273, 30852, 31356, 31785, 32137, 32412, 32609, 32728,
    32767,
];

/// First-octant arctangent table: `round(atan(i/32) * CYCLE / 2pi)` for
/// i in 0..=32. Domain is the ratio scale 0..=`ONE`, codomain 0..=45 deg.
const ATAN_TABLE: [i16; 33] = [
    0, 81, 163, 244, 324, 404, 483, 562, 639, 715, 790, 863, 936, 1006, 1075,
    1143, 1209, 1273, 1336, 1397, 1457, 1514, 1571, 1625, 1678, 1729, 1779,
    1828, 1874, 1920, 1964, 2007, 2048,
];

// ── Conversions ───────────────────────────────────────────────────────────────

/// Convert integer degrees to angle units (truncating).
pub const fn from_deg(deg: i16) -> i16 {
    ((CYCLE as i32 * deg as i32) / 360) as i16
}

/// Convert angle units to integer degrees (truncating).
pub const fn to_deg(theta: i16) -> i16 {
    ((theta as i32 * 360) / CYCLE as i32) as i16
}

// ── Trig functions ────────────────────────────────────────────────────────────

/// Sine of `theta` (angle units), scaled so that +-1.0 is +-`ONE`.
pub fn sin(theta: i16) -> i16 {
    // Reduce into [0, CYCLE); the two high bits of the reduced angle
    // select the quadrant.
    let t = (theta as i32).rem_euclid(CYCLE as i32);
    let quadrant = t / QUARTER as i32;
    let mut r = t % QUARTER as i32;

    // Mirror the descending quadrants back onto the ascending table.
    if quadrant & 1 == 1 {
        r = QUARTER as i32 - r;
    }

    let idx = (r / SIN_STEP) as usize;
    let value = if idx == 32 {
        SIN_TABLE[32] as i32
    } else {
        let frac = r % SIN_STEP;
        let y0 = SIN_TABLE[idx] as i32;
        let y1 = SIN_TABLE[idx + 1] as i32;
        y0 + (y1 - y0) * frac / SIN_STEP
    };

    if quadrant >= 2 {
        -value as i16
    } else {
        value as i16
    }
}

/// Cosine of `theta` (angle units). Defined as `sin(QUARTER - theta)`,
/// which makes the identity exact at every angle.
pub fn cos(theta: i16) -> i16 {
    sin((QUARTER as i32 - theta as i32) as i16)
}

/// Tangent of `theta` on the amplitude scale (`ONE` = 1.0).
///
/// Undefined where `cos(theta)` is zero (+-90 deg, +-270 deg); the
/// caller must keep `theta` away from those angles.
pub fn tan(theta: i16) -> i32 {
    sin(theta) as i32 * ONE as i32 / cos(theta) as i32
}

/// Four-quadrant arctangent of `y/x` in angle units, in `[0, CYCLE)`.
///
/// The point is reflected into the first octant by +-180 deg and
/// -90 deg rotations while the offsets accumulate, then the octant
/// ratio `y*ONE/x` is looked up in `ATAN_TABLE`. No division by zero
/// is possible: the `y == 0` axis is shortcut and the reflections
/// leave both coordinates strictly positive.
pub fn atan2(y: i16, x: i16) -> i16 {
    if y == 0 {
        return if x >= 0 { 0 } else { HALF_CYCLE };
    }

    let mut xi = x as i32;
    let mut yi = y as i32;
    let mut offset = 0i32;

    // Lower half plane: rotate by 180 deg.
    if yi < 0 {
        xi = -xi;
        yi = -yi;
        offset = HALF_CYCLE as i32;
    }
    // Second quadrant: rotate by -90 deg.
    if xi < 0 {
        let t = xi;
        xi = yi;
        yi = -t;
        offset += QUARTER as i32;
    }

    // First octant lookup; the mirror octant uses the reciprocal ratio.
    let a = if yi <= xi {
        atan_lookup(yi * ONE as i32 / xi)
    } else {
        QUARTER as i32 - atan_lookup(xi * ONE as i32 / yi)
    };

    ((offset + a).rem_euclid(CYCLE as i32)) as i16
}

/// Interpolated `ATAN_TABLE` lookup for a ratio in `0..=ONE`.
fn atan_lookup(ratio: i32) -> i32 {
    let idx = (ratio >> 10) as usize;
    if idx >= 32 {
        return ATAN_TABLE[32] as i32;
    }
    let frac = ratio & 0x3FF;
    let y0 = ATAN_TABLE[idx] as i32;
    let y1 = ATAN_TABLE[idx + 1] as i32;
    y0 + (y1 - y0) * frac / 1024
}

// ── Line intercepts ───────────────────────────────────────────────────────────

/// The y value of the line through `(x0, y0)` and `(x1, y1)` at `x`.
///
/// Wide-arithmetic linear interpolation, truncating. This is the same
/// primitive the table lookups use internally; the rasterizer and the
/// horizon geometry reuse it directly. Requires `x0 != x1`.
pub fn y_intercept(x0: i16, y0: i16, x1: i16, y1: i16, x: i16) -> i16 {
    let num = (x as i32 - x0 as i32) * (y1 as i32 - y0 as i32);
    (y0 as i32 + num / (x1 as i32 - x0 as i32)) as i16
}

/// The x value of the line through `(x0, y0)` and `(x1, y1)` at `y`.
/// Requires `y0 != y1`.
pub fn x_intercept(x0: i16, y0: i16, x1: i16, y1: i16, y: i16) -> i16 {
    y_intercept(y0, x0, y1, x1, y)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
