//! Telemetry records and the reference-room vocabulary
//!
//! A record is what a gateway reports for one tag sighting: which tag, which
//! fixed sensor heard it (by coordinates and by room) and how strongly.

use serde::{Deserialize, Serialize};

/// One RSSI sighting of a wearable tag by a fixed sensor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    /// Tag identifier (IMEI or equivalent)
    #[serde(alias = "imei")]
    pub device_id: String,

    /// Sensor coordinates as free text. Carried through, never parsed.
    #[serde(alias = "sensor_latlong", default)]
    pub reference_location: String,

    /// Room the reporting sensor is installed in
    #[serde(alias = "sensor_room")]
    pub reference_room: String,

    /// Received signal strength in dBm
    pub rssi: f64,

    /// ISO-8601 time of the sighting
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl TelemetryRecord {
    /// Create a record without a timestamp
    pub fn new(device_id: impl Into<String>, reference_room: impl Into<String>, rssi: f64) -> Self {
        Self {
            device_id: device_id.into(),
            reference_location: String::new(),
            reference_room: reference_room.into(),
            rssi,
            timestamp: None,
        }
    }

    /// Attach sensor coordinates
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.reference_location = location.into();
        self
    }

    /// Attach a timestamp
    pub fn with_timestamp(mut self, timestamp: impl Into<String>) -> Self {
        self.timestamp = Some(timestamp.into());
        self
    }
}

/// Closed vocabulary of sensor placements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Room {
    /// Patient ward
    Ward,
    /// Reception / waiting area
    Reception,
    /// Corridor between areas
    Corridor,
    /// Outside the building
    Surroundings,
}

impl Room {
    /// All rooms in code order
    pub const ALL: [Room; 4] = [Room::Ward, Room::Reception, Room::Corridor, Room::Surroundings];

    /// Room assumed when the reported name is not in the vocabulary
    pub const FALLBACK: Room = Room::Reception;

    /// Integer code the classifier was trained on
    pub fn code(self) -> u8 {
        match self {
            Room::Ward => 0,
            Room::Reception => 1,
            Room::Corridor => 2,
            Room::Surroundings => 3,
        }
    }

    /// Canonical name
    pub fn name(self) -> &'static str {
        match self {
            Room::Ward => "Ward",
            Room::Reception => "Reception",
            Room::Corridor => "Corridor",
            Room::Surroundings => "Surroundings",
        }
    }

    /// Exact-match parse of a room name.
    ///
    /// Accepts the canonical names and the Portuguese names used by the first
    /// hospital deployment, whose training data the shipped model comes from.
    pub fn parse(name: &str) -> Option<Room> {
        match name {
            "Ward" | "Enfermaria" => Some(Room::Ward),
            "Reception" | "Recepção" => Some(Room::Reception),
            "Corridor" | "Corredor" => Some(Room::Corridor),
            "Surroundings" | "Arredores" => Some(Room::Surroundings),
            _ => None,
        }
    }

    /// Total resolution: unknown names map to [`Room::FALLBACK`], tagged as such
    pub fn resolve(name: &str) -> RoomResolution {
        match Room::parse(name) {
            Some(room) => RoomResolution { room, fallback: false },
            None => RoomResolution {
                room: Room::FALLBACK,
                fallback: true,
            },
        }
    }
}

/// Outcome of resolving a free-text room name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomResolution {
    /// Resolved room
    pub room: Room,
    /// True when the name was unknown and the fallback room was used
    pub fallback: bool,
}
