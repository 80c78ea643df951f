//! End-to-end pass through the whole pipeline: raw samples in, packed
//! frame out.

use miniefis::efis::CENTER_Y;
use miniefis::{solve, AxisConvention, Efis, FrameBuffer, ImuBuffers, ImuSource, Vector3};

#[test]
fn level_flight_sample_to_frame() {
    let buffers: ImuBuffers = ImuBuffers::new();

    // A quarter second of steady level readings: gravity straight
    // down, magnetic field straight ahead.
    for _ in 0..25 {
        buffers.record_acceleration(Vector3::new(0, 0, 16383));
        buffers.record_magnetic_field(Vector3::new(16383, 0, 0));
    }

    let attitude = solve(&buffers, &AxisConvention::default());
    assert_eq!(attitude.roll, 0);
    assert_eq!(attitude.pitch, 0);
    assert_eq!(attitude.yaw, 0);
    assert!(attitude.valid);

    let mut efis = Efis::new();
    let mut fb = FrameBuffer::new();
    efis.draw(&mut fb, &attitude);

    // Sky above the horizon, ground below, the horizon line itself on
    // the center row.
    assert!(fb.pixel(5, 50));
    assert!(fb.pixel(5, CENTER_Y));
    assert!(!fb.pixel(5, 5));
    // No invalid warning on a valid solution: the sky inside the
    // left warning block's footprint stays lit.
    assert!(fb.pixel(10, 50));
}

#[test]
fn maneuvering_flight_raises_warning() {
    let buffers: ImuBuffers = ImuBuffers::new();

    // Pulling g: twice the gravity magnitude.
    for _ in 0..25 {
        buffers.record_acceleration(Vector3::new(0, 0, 32700));
        buffers.record_magnetic_field(Vector3::new(16383, 0, 0));
    }

    let attitude = solve(&buffers, &AxisConvention::default());
    assert!(!attitude.valid);

    let mut efis = Efis::new();
    let mut fb = FrameBuffer::new();
    efis.draw(&mut fb, &attitude);

    // The left warning block inverts the sky in its corner of the
    // screen, so a pixel inside it reads dark where plain sky reads
    // lit.
    let mut reference = FrameBuffer::new();
    let mut quiet = Efis::new();
    let valid = miniefis::Attitude { valid: true, ..attitude };
    quiet.draw(&mut reference, &valid);
    assert_ne!(fb.bytes(), reference.bytes());
    assert!(reference.pixel(10, 50));
    assert!(!fb.pixel(10, 50));
}

#[test]
fn partial_window_still_averages() {
    // A window that is only partly filled averages in the zero slots,
    // shrinking the magnitude below the validity band.
    let buffers: ImuBuffers = ImuBuffers::new();
    for _ in 0..5 {
        buffers.record_acceleration(Vector3::new(0, 0, 16383));
    }
    let acc = buffers.acceleration();
    // 16383 * 5 / 25, truncating.
    assert_eq!(acc, Vector3::new(0, 0, 3276));

    let attitude = solve(&buffers, &AxisConvention::default());
    assert!(!attitude.valid);
}
