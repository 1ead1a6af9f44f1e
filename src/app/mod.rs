//! Application core: pure domain logic, zero I/O.
//!
//! Turns untrusted duty commands into validated two-phase PWM writes.
//! All interaction with hardware happens through the [`ports::PwmPort`]
//! trait, keeping this layer fully testable without real peripherals.

pub mod commands;
pub mod controller;
pub mod ports;
pub mod registry;
