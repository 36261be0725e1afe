//! ESP32-S3 firmware-specific modules for envmon
//!
//! This crate contains the parts that only compile for the device: bus and
//! peripheral bring-up, the I2C sensor hub, and the PMIC-backed power button
//! and power switch. Everything else lives in `envmon-core`.

#![no_std]

extern crate alloc;

pub mod board;
