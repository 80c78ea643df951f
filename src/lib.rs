//! Fixed-point AHRS and artificial-horizon renderer for 128x64
//! monochrome displays.
//!
//! The whole pipeline is integer-only: a 16384-units-per-turn angle
//! scale, table-driven trig, and a 1-bpp column-major frame buffer,
//! so it runs on cores without an FPU and the test suite runs on the
//! host unchanged.
//!
//! Data flows in one direction per frame:
//!
//! 1. a sensor driver pushes raw readings into [`sample::ImuBuffers`]
//!    from interrupt context;
//! 2. [`ahrs::solve`] turns a boxcar snapshot of those readings into an
//!    [`ahrs::Attitude`];
//! 3. [`efis::Efis::draw`] renders the attitude into a
//!    [`gfx::FrameBuffer`], whose packed bytes go to the display
//!    transport.

#![cfg_attr(not(test), no_std)]

pub mod ahrs;
pub mod efis;
mod font;
pub mod gfx;
pub mod rotate;
pub mod sample;
pub mod trig;

pub use ahrs::{solve, Attitude, AxisConvention};
pub use efis::Efis;
pub use gfx::{Color, FrameBuffer};
pub use sample::{ImuBuffers, ImuSource, Vector3};
