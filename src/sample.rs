//! Raw-sample buffering between the sensor interrupt and the solver.
//!
//! The sensor driver runs in interrupt context and pushes one reading
//! per data-ready event; the solver runs in the main loop and wants a
//! boxcar (moving-average) snapshot of the most recent window. Both
//! sides go through a critical section so a 16-bit sample can never
//! tear between its halves while the average is being summed.

use core::cell::RefCell;
use critical_section::Mutex;

// ── Sensor scale constants ────────────────────────────────────────────────────

/// Raw sensor value treated as 1.0 (1 g for the accelerometer).
pub const IMU_ONE: i32 = 16383;
/// Lower bound of the acceptable accelerometer magnitude band (0.90 g).
pub const ACC_MAG_MIN: i32 = 14745;
/// Upper bound of the acceptable accelerometer magnitude band (1.10 g).
pub const ACC_MAG_MAX: i32 = 18021;

/// Default boxcar window: 25 samples, 0.25 s at a 100 Hz data rate.
pub const SAMPLE_WINDOW: usize = 25;

// ── Types ─────────────────────────────────────────────────────────────────────

/// One three-axis sensor reading.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Vector3 {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl Vector3 {
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }
}

/// Snapshot access to the filtered sensor vectors the solver consumes.
///
/// Implementations return a boxcar average over their most recent
/// window. The solver only ever reads one snapshot per solution.
pub trait ImuSource {
    fn acceleration(&self) -> Vector3;
    fn magnetic_field(&self) -> Vector3;
}

// ── Circular buffer ───────────────────────────────────────────────────────────

/// Fixed-length circular buffer of three-axis samples.
///
/// Plain storage with no synchronization of its own; [`ImuBuffers`]
/// wraps it for cross-context sharing.
pub struct SampleRing<const N: usize> {
    x: [i16; N],
    y: [i16; N],
    z: [i16; N],
    idx: usize,
}

impl<const N: usize> SampleRing<N> {
    pub const fn new() -> Self {
        Self {
            x: [0; N],
            y: [0; N],
            z: [0; N],
            idx: 0,
        }
    }

    /// Overwrite the oldest slot with a new reading.
    pub fn push(&mut self, v: Vector3) {
        self.x[self.idx] = v.x;
        self.y[self.idx] = v.y;
        self.z[self.idx] = v.z;
        self.idx = (self.idx + 1) % N;
    }

    // Per-axis boxcar sums; division is truncating to match the legacy
    // averaging exactly.

    fn mean_x(&self) -> i16 {
        let sum: i32 = self.x.iter().map(|&s| s as i32).sum();
        (sum / N as i32) as i16
    }

    fn mean_y(&self) -> i16 {
        let sum: i32 = self.y.iter().map(|&s| s as i32).sum();
        (sum / N as i32) as i16
    }

    fn mean_z(&self) -> i16 {
        let sum: i32 = self.z.iter().map(|&s| s as i32).sum();
        (sum / N as i32) as i16
    }
}

impl<const N: usize> Default for SampleRing<N> {
    fn default() -> Self {
        Self::new()
    }
}

// ── Shared buffers ────────────────────────────────────────────────────────────

/// The pair of sample rings shared between the sensor interrupt
/// (writer) and the attitude solver (reader).
///
/// Every multi-sample operation runs inside `critical_section::with`,
/// one axis at a time, so the interrupt is masked only for the length
/// of a single summation.
pub struct ImuBuffers<const N: usize = SAMPLE_WINDOW> {
    acc: Mutex<RefCell<SampleRing<N>>>,
    mag: Mutex<RefCell<SampleRing<N>>>,
}

impl<const N: usize> ImuBuffers<N> {
    pub const fn new() -> Self {
        Self {
            acc: Mutex::new(RefCell::new(SampleRing::new())),
            mag: Mutex::new(RefCell::new(SampleRing::new())),
        }
    }

    /// Record one accelerometer reading (interrupt context).
    pub fn record_acceleration(&self, v: Vector3) {
        critical_section::with(|cs| self.acc.borrow_ref_mut(cs).push(v));
    }

    /// Record one magnetometer reading (interrupt context).
    pub fn record_magnetic_field(&self, v: Vector3) {
        critical_section::with(|cs| self.mag.borrow_ref_mut(cs).push(v));
    }

    fn boxcar(ring: &Mutex<RefCell<SampleRing<N>>>) -> Vector3 {
        // One critical section per axis keeps the masked window short.
        let x = critical_section::with(|cs| ring.borrow_ref(cs).mean_x());
        let y = critical_section::with(|cs| ring.borrow_ref(cs).mean_y());
        let z = critical_section::with(|cs| ring.borrow_ref(cs).mean_z());
        Vector3 { x, y, z }
    }
}

impl<const N: usize> Default for ImuBuffers<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> ImuSource for ImuBuffers<N> {
    fn acceleration(&self) -> Vector3 {
        Self::boxcar(&self.acc)
    }

    fn magnetic_field(&self) -> Vector3 {
        Self::boxcar(&self.mag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ring_averages_its_window() {
        let mut ring: SampleRing<4> = SampleRing::new();
        for i in 0..4 {
            ring.push(Vector3::new(i, 2 * i, -i));
        }
        // x: (0+1+2+3)/4 = 1, y: 12/4 = 3, z: -6/4 truncates to -1.
        assert_eq!(ring.mean_x(), 1);
        assert_eq!(ring.mean_y(), 3);
        assert_eq!(ring.mean_z(), -1);
    }

    #[test]
    fn ring_wraps_and_overwrites_oldest() {
        let mut ring: SampleRing<3> = SampleRing::new();
        for v in [10, 20, 30, 40] {
            ring.push(Vector3::new(v, 0, 0));
        }
        // 10 was overwritten by 40: (40+20+30)/3 = 30.
        assert_eq!(ring.mean_x(), 30);
    }

    #[test]
    fn truncating_average_bias() {
        let mut ring: SampleRing<2> = SampleRing::new();
        ring.push(Vector3::new(0, 0, -3));
        ring.push(Vector3::new(0, 0, 0));
        // -3/2 truncates toward zero, not toward negative infinity.
        assert_eq!(ring.mean_z(), -1);
    }

    #[test]
    fn buffers_snapshot_through_critical_sections() {
        let buffers: ImuBuffers<8> = ImuBuffers::new();
        for _ in 0..8 {
            buffers.record_acceleration(Vector3::new(0, 0, 16383));
            buffers.record_magnetic_field(Vector3::new(16383, 0, 0));
        }
        assert_eq!(buffers.acceleration(), Vector3::new(0, 0, 16383));
        assert_eq!(buffers.magnetic_field(), Vector3::new(16383, 0, 0));
    }
}
