//! Attitude solution from accelerometer and magnetometer averages.
//!
//! A static-condition AHRS: roll and pitch come from the gravity vector,
//! yaw from the tilt-compensated magnetic field. Inputs are boxcar
//! averages, so the solution lags real motion by half the sample window
//! and is only trustworthy in unaccelerated flight. The validity flag
//! reports whether the measured gravity magnitude is close enough to
//! 1 g to believe the angles.

use crate::sample::{ImuSource, ACC_MAG_MAX, ACC_MAG_MIN, IMU_ONE};
use crate::trig::{self, HALF_CYCLE, ONE, QUARTER};

// ── Types ─────────────────────────────────────────────────────────────────────

/// One attitude solution in angle units (16384 per turn).
///
/// `roll` is in (-180, 180], `pitch` in [-90, 90], `yaw` in [0, 360).
/// When `valid` is false the angles are still the best available
/// estimate; consumers decide how to flag them.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Attitude {
    pub yaw: i16,
    pub pitch: i16,
    pub roll: i16,
    pub valid: bool,
}

/// Sign flips mapping raw sensor axes onto the plane frame.
///
/// The plane frame is X forward, Y starboard, Z down, with gravity
/// positive. Which raw axes need inverting depends on how the sensor
/// board is mounted; the default matches the reference installation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisConvention {
    pub invert_acc_x: bool,
    pub invert_acc_y: bool,
    pub invert_acc_z: bool,
    pub invert_mag_x: bool,
    pub invert_mag_y: bool,
    pub invert_mag_z: bool,
}

impl Default for AxisConvention {
    fn default() -> Self {
        Self {
            invert_acc_x: true,
            invert_acc_y: false,
            invert_acc_z: false,
            invert_mag_x: false,
            invert_mag_y: true,
            invert_mag_z: true,
        }
    }
}

fn flip(v: i16, invert: bool) -> i32 {
    if invert {
        -(v as i32)
    } else {
        v as i32
    }
}

// ── Solver ────────────────────────────────────────────────────────────────────

/// Compute one attitude solution from the current sensor snapshot.
///
/// Total function: every input produces angles, and `valid` carries the
/// gravity-magnitude check result.
pub fn solve(imu: &impl ImuSource, axes: &AxisConvention) -> Attitude {
    let a = imu.acceleration();
    let m = imu.magnetic_field();

    let ax = flip(a.x, axes.invert_acc_x);
    let ay = flip(a.y, axes.invert_acc_y);
    let az = flip(a.z, axes.invert_acc_z);
    let mx = flip(m.x, axes.invert_mag_x);
    let my = flip(m.y, axes.invert_mag_y);
    let mz = flip(m.z, axes.invert_mag_z);

    // Roll from the gravity vector, brought into (-180, 180].
    let mut roll = trig::atan2(ay as i16, az as i16);
    if roll > HALF_CYCLE {
        roll = (roll as i32 - trig::CYCLE as i32) as i16;
    }

    let roll_sin = trig::sin(roll) as i32;
    let roll_cos = trig::cos(roll) as i32;

    // Pitch against the roll-compensated vertical, folded into
    // [-90, 90]. Folding (reflecting past the pole) rather than
    // wrapping keeps a nose-high pass through vertical continuous.
    let ta = (ay * roll_sin) / ONE as i32;
    let tb = (az * roll_cos) / ONE as i32;
    let mut pitch = trig::atan2((-ax) as i16, (ta + tb) as i16);
    if pitch > QUARTER {
        pitch = (HALF_CYCLE as i32 - pitch as i32) as i16;
    }
    if pitch < -QUARTER {
        pitch = (-(HALF_CYCLE as i32) - pitch as i32) as i16;
    }

    let pitch_sin = trig::sin(pitch) as i32;
    let pitch_cos = trig::cos(pitch) as i32;

    // Tilt-compensated heading, already in [0, 360).
    let ta = (mx * pitch_cos) / ONE as i32;
    let tb = (mz * pitch_sin) / ONE as i32;
    let tc = (((mz * roll_sin) / ONE as i32) * pitch_cos) / ONE as i32;
    let td = (((mx * roll_sin) / ONE as i32) * pitch_sin) / ONE as i32;
    let te = (my * roll_cos) / ONE as i32;
    let yaw = trig::atan2((tc - td - te) as i16, (ta + tb) as i16);

    // Gravity magnitude check on the normalized squared length.
    let mag = (ax * ax) / IMU_ONE + (ay * ay) / IMU_ONE + (az * az) / IMU_ONE;
    let valid = (ACC_MAG_MIN..=ACC_MAG_MAX).contains(&mag);

    #[cfg(feature = "defmt")]
    if !valid {
        defmt::warn!("attitude invalid: |a|^2/one = {}", mag);
    }

    Attitude {
        yaw,
        pitch,
        roll,
        valid,
    }
}
