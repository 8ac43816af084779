//! CO2Matrix firmware library.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod config;
pub mod display;
pub mod history;
pub mod menu;
pub mod sensor;

pub mod error;
pub mod pins;

// Concrete hardware adapters; the ESP-IDF-only ones are guarded by cfg
// attributes inside.
pub mod adapters;
