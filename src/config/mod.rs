//! Configuration management for portsweep.
//!
//! Provides XDG-compliant storage of the defaults applied to every scan.

mod settings;

pub use settings::{AppSettings, Paths};
