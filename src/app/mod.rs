//! Orchestration layer.
//!
//! [`service::AppService`] owns the sensor link, the display, the menu
//! controller and the reading history, and multiplexes them over one
//! cooperative execution context. [`ports`] defines the traits the
//! service needs from the outside world; [`status`] the snapshots it
//! publishes back out.

pub mod ports;
pub mod service;
pub mod status;

pub use service::AppService;
