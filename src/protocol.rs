//! Wire protocol for Platinum controllers
//!
//! The protocol is line-oriented. Every device line carries a transport
//! prefix separated from the payload by a single space; only the payload
//! takes part in record parsing. Payload fields are `-` delimited, with the
//! record marker fused onto the first field. Heights are rendered as exactly
//! three decimal digits.

use crate::error::{PlatinumError, Result};

/// Command requesting a full data dump
pub const DATA_COMMAND: &str = "$dat";

/// Command terminating a height-set exchange
pub const END_COMMAND: &str = "$rls";

/// Marker fused onto the first field of a room record
pub const ROOM_PREFIX: &str = "$cr";

/// Marker fused onto the first field of a shade record
pub const SHADE_PREFIX: &str = "$cs";

/// Marker opening a height-set command
pub const SET_HEIGHT_PREFIX: &str = "$pss";

/// Fixed middle field of a height-set command
pub const SET_HEIGHT_FIELD: &str = "04";

/// Suffix of the raw line closing a data dump
pub const DATA_END: &str = " $upd01-";

/// Maximum height expressible in the 3-digit wire field
pub const MAX_HEIGHT: u16 = 999;

const FIELD_DELIMITER: char = '-';
const TRANSPORT_DELIMITER: char = ' ';

/// Records split into at most this many fields; the last keeps any
/// remaining delimiters (names may contain `-`)
const RECORD_FIELDS: usize = 4;

/// Strip the transport prefix from a raw device line
///
/// A line without the single-space delimiter violates the protocol.
pub fn payload(line: &str) -> Result<&str> {
    line.split_once(TRANSPORT_DELIMITER)
        .map(|(_, payload)| payload)
        .ok_or_else(|| {
            PlatinumError::protocol(format!("Device line missing transport delimiter: {line:?}"))
        })
}

/// Whether a raw device line closes the data dump
pub fn is_end_of_data(line: &str) -> bool {
    line.ends_with(DATA_END)
}

/// Whether a record payload could be a room or shade definition
///
/// Used to reject a definition record standing where a setting record is
/// required.
pub fn is_definition_record(record: &str) -> bool {
    record.starts_with(ROOM_PREFIX) || record.starts_with(SHADE_PREFIX)
}

fn split_record(record: &str) -> Result<Vec<&str>> {
    let fields: Vec<&str> = record.splitn(RECORD_FIELDS, FIELD_DELIMITER).collect();
    if fields.len() < RECORD_FIELDS {
        return Err(PlatinumError::protocol(format!(
            "Record has {} fields, expected {RECORD_FIELDS}: {record:?}",
            fields.len()
        )));
    }
    Ok(fields)
}

/// Parsed room definition record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomRecord {
    pub id: String,
    pub name: String,
}

impl RoomRecord {
    /// Whether a record payload is a room definition
    pub fn matches(record: &str) -> bool {
        record.starts_with(ROOM_PREFIX)
    }

    /// Parse `$cr<id>-<unused>-<unused>-<name>`
    pub fn parse(record: &str) -> Result<Self> {
        let fields = split_record(record)?;
        let id = fields[0].strip_prefix(ROOM_PREFIX).ok_or_else(|| {
            PlatinumError::protocol(format!("Room record missing {ROOM_PREFIX} marker: {record:?}"))
        })?;
        Ok(Self {
            id: id.to_string(),
            name: fields[3].to_string(),
        })
    }
}

/// Parsed shade definition record
///
/// The height lives in the setting record that follows, not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShadeRecord {
    pub id: String,
    pub room_id: String,
    pub name: String,
}

impl ShadeRecord {
    /// Whether a record payload is a shade definition
    pub fn matches(record: &str) -> bool {
        record.starts_with(SHADE_PREFIX)
    }

    /// Parse `$cs<id>-<roomId>-<unused>-<name>`
    pub fn parse(record: &str) -> Result<Self> {
        let fields = split_record(record)?;
        let id = fields[0].strip_prefix(SHADE_PREFIX).ok_or_else(|| {
            PlatinumError::protocol(format!(
                "Shade record missing {SHADE_PREFIX} marker: {record:?}"
            ))
        })?;
        Ok(Self {
            id: id.to_string(),
            room_id: fields[1].to_string(),
            name: fields[3].to_string(),
        })
    }
}

/// Extract the height from the setting record paired with a shade record
///
/// The setting record is positional: it is the record immediately after the
/// shade definition, and its third `-` field is the 3-digit height.
pub fn parse_setting_height(record: &str) -> Result<u16> {
    if is_definition_record(record) {
        return Err(PlatinumError::protocol(format!(
            "Expected setting record, got definition record: {record:?}"
        )));
    }
    let fields = split_record(record)?;
    let height = fields[2].parse::<u16>().map_err(|e| {
        PlatinumError::protocol(format!(
            "Setting record has non-numeric height {:?}: {e}",
            fields[2]
        ))
    })?;
    if height > MAX_HEIGHT {
        return Err(PlatinumError::protocol(format!(
            "Setting record height {height} exceeds {MAX_HEIGHT}: {record:?}"
        )));
    }
    Ok(height)
}

/// Encode the height-set command for one shade
///
/// The height must already be validated against [`MAX_HEIGHT`]; it renders
/// zero-padded to three digits.
pub fn set_height_command(shade_id: &str, height: u16) -> String {
    format!("{SET_HEIGHT_PREFIX}{shade_id}-{SET_HEIGHT_FIELD}-{height:03}-")
}
