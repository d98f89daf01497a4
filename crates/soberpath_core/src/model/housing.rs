//! Residential houses and rooms.

use serde::{Deserialize, Serialize};

/// Room configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoomType {
    Single,
    Double,
    Family,
}

impl RoomType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Single => "Single",
            Self::Double => "Double",
            Self::Family => "Family",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: String,
    pub name: String,
    pub available: bool,
    pub capacity: u32,
    #[serde(rename = "type")]
    pub room_type: RoomType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct House {
    pub id: String,
    pub name: String,
    pub rooms: Vec<Room>,
}

impl House {
    /// Number of rooms that can still be allocated.
    pub fn available_room_count(&self) -> usize {
        self.rooms.iter().filter(|room| room.available).count()
    }

    pub fn room(&self, room_id: &str) -> Option<&Room> {
        self.rooms.iter().find(|room| room.id == room_id)
    }

    pub fn room_mut(&mut self, room_id: &str) -> Option<&mut Room> {
        self.rooms.iter_mut().find(|room| room.id == room_id)
    }
}

/// Seed houses.
pub fn seed_houses() -> Vec<House> {
    let room = |id: &str, name: &str, available: bool, capacity: u32, room_type: RoomType| Room {
        id: id.to_string(),
        name: name.to_string(),
        available,
        capacity,
        room_type,
    };
    vec![
        House {
            id: "house1".to_string(),
            name: "House A".to_string(),
            rooms: vec![
                room("r1", "Room 1", true, 1, RoomType::Single),
                room("r2", "Room 2", false, 4, RoomType::Family),
                room("r3", "Room 3", true, 2, RoomType::Double),
            ],
        },
        House {
            id: "house2".to_string(),
            name: "House B".to_string(),
            rooms: vec![
                room("r4", "Room 1", true, 1, RoomType::Single),
                room("r5", "Room 2", true, 2, RoomType::Double),
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::seed_houses;

    #[test]
    fn available_room_count_skips_occupied_rooms() {
        let houses = seed_houses();
        assert_eq!(houses[0].available_room_count(), 2);
        assert_eq!(houses[1].available_room_count(), 2);
    }
}
