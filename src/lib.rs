//! LineWatch firmware library.
//!
//! Production-line monitoring and alarm controller: counts accepted and
//! rejected products via hardware edge counters, derives rolling
//! throughput and rejection-rate statistics once per second, evaluates
//! alarm thresholds, drives an operator indicator panel (four LEDs plus
//! a buzzer) and tracks batch progress toward a target quantity.
//!
//! Exposes the pure-logic modules for integration testing and external
//! inspection. All ESP-IDF-specific code is guarded by
//! `#[cfg(target_os = "espidf")]` within each module.

#![deny(unused_must_use)]

pub mod app;
pub mod batch;
pub mod config;
pub mod controls;
pub mod counters;
pub mod events;
pub mod fsm;
pub mod panel;
pub mod stats;

pub mod error;
mod pins;

pub mod adapters;
pub mod drivers;
