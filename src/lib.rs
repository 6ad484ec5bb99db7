//! Client library for Hunter Douglas Platinum shade controllers
//!
//! This crate speaks the proprietary line-oriented TCP protocol exposed by
//! Platinum-series gateways: it discovers the rooms and shades configured on
//! a controller and issues height commands to individual shades.
//!
//! # Features
//!
//! - Room and shade discovery from the controller's data dump
//! - Height control with 3-digit wire encoding (0-999 device units)
//! - Typed, recoverable errors for connection and protocol failures
//! - One short-lived connection per operation, matching the device's
//!   one-exchange-per-connection model
//!
//! # Example
//!
//! ```no_run
//! use hdplatinum::{PlatinumClient, PlatinumConfig, ShadeController};
//!
//! # fn main() -> hdplatinum::Result<()> {
//! let client = PlatinumClient::new(PlatinumConfig::new("192.168.1.50", 522))?;
//! for room in client.list_rooms()? {
//!     println!("{}: {} shades", room.name, room.shades.len());
//! }
//! let mut shade = client.get_shade("10")?;
//! client.set_height(&mut shade, 500)?;
//! # Ok(())
//! # }
//! ```

// Core modules
pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod protocol;

// Test support modules - available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod mock;

// Re-export main types for convenience
pub use client::{PlatinumClient, Room, Shade, ShadeController};
pub use config::PlatinumConfig;
pub use error::{PlatinumError, Result};
