//! Mock implementations for testing
//!
//! This module provides a mock controller for testing consumers of the
//! [`ShadeController`] trait without a device or a socket.

use crate::client::{Room, Shade, ShadeController};
use crate::error::{PlatinumError, Result};
use std::sync::Mutex;

/// Mock shade controller for testing
pub struct MockShadeController {
    rooms: Vec<Room>,
    sent_commands: Mutex<Vec<(String, u16)>>,
    fail_commands: bool,
}

impl MockShadeController {
    /// Create an empty mock controller
    pub fn new() -> Self {
        Self {
            rooms: Vec::new(),
            sent_commands: Mutex::new(Vec::new()),
            fail_commands: false,
        }
    }

    /// Seed the mock with a room snapshot
    pub fn with_rooms(mut self, rooms: Vec<Room>) -> Self {
        self.rooms = rooms;
        self
    }

    /// Make every subsequent `set_height` fail with a connection error
    pub fn failing(mut self) -> Self {
        self.fail_commands = true;
        self
    }

    /// Height-set commands recorded so far, as `(shade_id, height)` pairs
    pub fn sent_commands(&self) -> Vec<(String, u16)> {
        self.sent_commands.lock().expect("mock lock poisoned").clone()
    }
}

impl ShadeController for MockShadeController {
    fn list_shades(&self) -> Result<Vec<Shade>> {
        Ok(self
            .rooms
            .iter()
            .flat_map(|room| room.shades.iter().cloned())
            .collect())
    }

    fn list_rooms(&self) -> Result<Vec<Room>> {
        Ok(self.rooms.clone())
    }

    fn set_height(&self, shade: &mut Shade, height: u16) -> Result<()> {
        if self.fail_commands {
            return Err(PlatinumError::connection("Mock command failure"));
        }
        self.sent_commands
            .lock()
            .expect("mock lock poisoned")
            .push((shade.id.clone(), height));
        shade.height = height;
        Ok(())
    }
}

impl Default for MockShadeController {
    fn default() -> Self {
        Self::new()
    }
}
