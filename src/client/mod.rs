//! Platinum client implementation and domain models
//!
//! Every public operation opens its own connection against the controller
//! and fully closes it before returning; queries rebuild fresh snapshots on
//! every call, with no caching in between.

pub mod connection;

use crate::config::PlatinumConfig;
use crate::error::{PlatinumError, Result};
use crate::protocol::{self, RoomRecord, ShadeRecord};
use connection::Session;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// A motorized shade as configured on a controller
///
/// Read-only snapshot; the only mutation path is
/// [`ShadeController::set_height`], which updates `height` optimistically
/// after a successful send.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shade {
    /// Shade identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Identifier of the owning room
    pub room_id: String,
    /// Current height in device units (0-999)
    pub height: u16,
    /// `host:port` of the controller that owns this shade; height changes
    /// open a fresh connection there
    pub address: String,
}

/// A room grouping shades as configured on a controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Room identifier, unique per controller
    pub id: String,
    /// Display name
    pub name: String,
    /// Shades assigned to this room, in device-reported order; may be empty
    pub shades: Vec<Shade>,
}

/// Trait for shade controller implementations
pub trait ShadeController {
    /// List all shades in device-reported order
    fn list_shades(&self) -> Result<Vec<Shade>>;

    /// List all rooms with their shades
    fn list_rooms(&self) -> Result<Vec<Room>>;

    /// Move a shade to `height` (0-999)
    ///
    /// Fire-and-forget: no acknowledgment is read back. The local `height`
    /// field is updated only if the command was fully written.
    fn set_height(&self, shade: &mut Shade, height: u16) -> Result<()>;
}

/// TCP client for a single Platinum controller
pub struct PlatinumClient {
    config: PlatinumConfig,
}

impl PlatinumClient {
    /// Create a client for the configured controller
    pub fn new(config: PlatinumConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// The active configuration
    pub fn config(&self) -> &PlatinumConfig {
        &self.config
    }

    fn open_session(&self) -> Result<Session> {
        Session::open(&self.config.address(), self.config.read_timeout)
    }

    /// Request a full data dump from the controller
    ///
    /// Returns one payload string per device line, in device order, ending
    /// with the record that carried the end-of-data sentinel. A truncated
    /// dump is an error, never a partial result.
    pub fn get_data(&self) -> Result<Vec<String>> {
        let mut session = self.open_session()?;
        session.send(protocol::DATA_COMMAND)?;

        let mut records = Vec::new();
        loop {
            let line = session.read_line()?.ok_or_else(|| {
                PlatinumError::protocol(format!(
                    "Data dump from {} ended without {:?} sentinel",
                    session.address(),
                    protocol::DATA_END
                ))
            })?;
            records.push(protocol::payload(&line)?.to_string());
            if protocol::is_end_of_data(&line) {
                break;
            }
        }

        debug!(
            "Received {} records from {}",
            records.len(),
            session.address()
        );
        Ok(records)
    }

    /// Look up a single shade by id
    pub fn get_shade(&self, id: &str) -> Result<Shade> {
        self.list_shades()?
            .into_iter()
            .find(|shade| shade.id == id)
            .ok_or_else(|| PlatinumError::not_found(format!("Shade {id}")))
    }

    /// Look up a single room by id
    pub fn get_room(&self, id: &str) -> Result<Room> {
        self.list_rooms()?
            .into_iter()
            .find(|room| room.id == id)
            .ok_or_else(|| PlatinumError::not_found(format!("Room {id}")))
    }
}

impl ShadeController for PlatinumClient {
    fn list_shades(&self) -> Result<Vec<Shade>> {
        let records = self.get_data()?;
        shades_from_records(&records, &self.config.address())
    }

    fn list_rooms(&self) -> Result<Vec<Room>> {
        // One dump serves both record kinds; rooms and shades always travel
        // in the same response
        let records = self.get_data()?;
        let shades = shades_from_records(&records, &self.config.address())?;
        rooms_from_records(&records, &shades)
    }

    fn set_height(&self, shade: &mut Shade, height: u16) -> Result<()> {
        if height > protocol::MAX_HEIGHT {
            return Err(PlatinumError::invalid_input(format!(
                "Height {height} exceeds maximum {}",
                protocol::MAX_HEIGHT
            )));
        }

        // Commands never share a query connection
        let mut session = Session::open(&shade.address, self.config.read_timeout)?;
        session.send(&protocol::set_height_command(&shade.id, height))?;
        session.send(protocol::END_COMMAND)?;

        shade.height = height;
        info!(
            "Set shade {} ({:?}) height to {height}",
            shade.id, shade.name
        );
        Ok(())
    }
}

/// Build shades from dump records, pairing each shade definition with the
/// record immediately after it
///
/// Positional pairing is a wire-format contract: the controller emits the
/// setting record directly after its shade record, with no interleaving.
fn shades_from_records(records: &[String], address: &str) -> Result<Vec<Shade>> {
    let mut shades = Vec::new();
    for (index, record) in records.iter().enumerate() {
        if !ShadeRecord::matches(record) {
            continue;
        }
        let definition = ShadeRecord::parse(record)?;
        let setting = records.get(index + 1).ok_or_else(|| {
            PlatinumError::protocol(format!(
                "Shade {} has no setting record following its definition",
                definition.id
            ))
        })?;
        let height = protocol::parse_setting_height(setting)?;
        shades.push(Shade {
            id: definition.id,
            name: definition.name,
            room_id: definition.room_id,
            height,
            address: address.to_string(),
        });
    }
    Ok(shades)
}

/// Build rooms from dump records, partitioning the shade snapshot by room id
fn rooms_from_records(records: &[String], shades: &[Shade]) -> Result<Vec<Room>> {
    let mut rooms = Vec::new();
    for record in records {
        if !RoomRecord::matches(record) {
            continue;
        }
        let definition = RoomRecord::parse(record)?;
        let room_shades: Vec<Shade> = shades
            .iter()
            .filter(|shade| shade.room_id == definition.id)
            .cloned()
            .collect();
        rooms.push(Room {
            id: definition.id,
            name: definition.name,
            shades: room_shades,
        });
    }

    for shade in shades {
        if !rooms.iter().any(|room| room.id == shade.room_id) {
            warn!(
                "Shade {} references unknown room {}",
                shade.id, shade.room_id
            );
        }
    }
    Ok(rooms)
}
