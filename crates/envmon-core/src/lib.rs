//! Hardware-independent core library for envmon
//!
//! This crate contains the platform-agnostic part of the envmon handheld
//! environment monitor: sensor capability traits, the sampling scheduler,
//! the render throttle, the shutdown and fail-safe terminal paths, and the
//! [`Monitor`](app_state::Monitor) that owns all loop state.
//!
//! It is `#![no_std]` with `extern crate alloc` so it compiles on both
//! embedded targets (ESP32-S3) and desktop hosts (for the simulator and tests).

#![no_std]

extern crate alloc;

pub mod app_state;
pub mod config;
pub mod display_manager;
pub mod fail_safe;
pub mod framebuffer;
pub mod pages;
pub mod power;
pub mod sampling;
pub mod sensors;
pub mod time;
pub mod ui;

#[cfg(test)]
mod test_support;
