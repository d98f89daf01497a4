//! Room allocation wizard and housing state.
//!
//! # Responsibility
//! - Drive the two-step "pick house, then pick room" selection.
//! - Complete an allocation by occupying the room and approving the
//!   application.
//!
//! # Invariants
//! - A room can only be selected inside the selected house, when available
//!   and matching the active type filter.
//! - Going back to the house list clears house, room and filter.
//! - Completion approves the application before occupying the room; a failed
//!   approval leaves housing untouched.

use crate::model::housing::{House, Room, RoomType};
use crate::repo::activity_repo::ActivityRepository;
use crate::repo::collection_repo::{load_collection, save_collection, Collection};
use crate::repo::collection_store::CollectionStore;
use crate::service::application_service::{ApplicationError, ApplicationService};
use chrono::{NaiveDate, NaiveDateTime};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocationError {
    HouseNotFound(String),
    RoomNotFound(String),
    RoomUnavailable(String),
    RoomFilteredOut(String),
    NoHouseSelected,
    NoRoomSelected,
    Application(ApplicationError),
}

impl Display for AllocationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::HouseNotFound(id) => write!(f, "house not found: {id}"),
            Self::RoomNotFound(id) => write!(f, "room not found in selected house: {id}"),
            Self::RoomUnavailable(id) => write!(f, "room {id} is not available"),
            Self::RoomFilteredOut(id) => write!(f, "room {id} does not match the room type filter"),
            Self::NoHouseSelected => f.write_str("select a house first"),
            Self::NoRoomSelected => f.write_str("select a room first"),
            Self::Application(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AllocationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Application(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ApplicationError> for AllocationError {
    fn from(value: ApplicationError) -> Self {
        Self::Application(value)
    }
}

/// Room type filter on the room step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RoomFilter {
    #[default]
    All,
    Only(RoomType),
}

impl RoomFilter {
    pub fn matches(self, room: &Room) -> bool {
        match self {
            Self::All => true,
            Self::Only(room_type) => room.room_type == room_type,
        }
    }
}

/// Current wizard step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AllocationStep {
    ChoosingHouse,
    ChoosingRoom {
        house_id: String,
        room_id: Option<String>,
        filter: RoomFilter,
    },
}

/// Selection state for allocating a room to one application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationWizard {
    application_id: String,
    step: AllocationStep,
}

impl AllocationWizard {
    pub fn new(application_id: impl Into<String>) -> Self {
        Self {
            application_id: application_id.into(),
            step: AllocationStep::ChoosingHouse,
        }
    }

    pub fn application_id(&self) -> &str {
        &self.application_id
    }

    pub fn step(&self) -> &AllocationStep {
        &self.step
    }

    /// Moves to the room step for `house_id`, clearing room and filter.
    pub fn select_house(&mut self, houses: &[House], house_id: &str) -> Result<(), AllocationError> {
        if !houses.iter().any(|house| house.id == house_id) {
            return Err(AllocationError::HouseNotFound(house_id.to_string()));
        }
        self.step = AllocationStep::ChoosingRoom {
            house_id: house_id.to_string(),
            room_id: None,
            filter: RoomFilter::All,
        };
        Ok(())
    }

    pub fn back_to_houses(&mut self) {
        self.step = AllocationStep::ChoosingHouse;
    }

    /// Changes the room type filter. A selected room that no longer matches
    /// is deselected.
    pub fn set_filter(&mut self, houses: &[House], new_filter: RoomFilter) -> Result<(), AllocationError> {
        let AllocationStep::ChoosingRoom {
            house_id,
            room_id,
            filter,
        } = &mut self.step
        else {
            return Err(AllocationError::NoHouseSelected);
        };
        *filter = new_filter;

        let still_matches = room_id
            .as_deref()
            .and_then(|id| find_room(houses, house_id, id))
            .is_some_and(|room| new_filter.matches(room));
        if !still_matches {
            *room_id = None;
        }
        Ok(())
    }

    /// Rooms of the selected house that pass the filter, including
    /// unavailable ones.
    pub fn visible_rooms<'h>(&self, houses: &'h [House]) -> Vec<&'h Room> {
        let AllocationStep::ChoosingRoom {
            house_id, filter, ..
        } = &self.step
        else {
            return Vec::new();
        };
        houses
            .iter()
            .find(|house| &house.id == house_id)
            .map(|house| {
                house
                    .rooms
                    .iter()
                    .filter(|room| filter.matches(room))
                    .collect()
            })
            .unwrap_or_default()
    }

    pub fn select_room(&mut self, houses: &[House], room_id: &str) -> Result<(), AllocationError> {
        let AllocationStep::ChoosingRoom {
            house_id,
            room_id: selected,
            filter,
        } = &mut self.step
        else {
            return Err(AllocationError::NoHouseSelected);
        };
        let room = find_room(houses, house_id, room_id)
            .ok_or_else(|| AllocationError::RoomNotFound(room_id.to_string()))?;
        if !filter.matches(room) {
            return Err(AllocationError::RoomFilteredOut(room_id.to_string()));
        }
        if !room.available {
            return Err(AllocationError::RoomUnavailable(room_id.to_string()));
        }
        *selected = Some(room_id.to_string());
        Ok(())
    }

    /// `(house_id, room_id)` once both steps are done.
    pub fn selection(&self) -> Option<(&str, &str)> {
        match &self.step {
            AllocationStep::ChoosingRoom {
                house_id,
                room_id: Some(room_id),
                ..
            } => Some((house_id.as_str(), room_id.as_str())),
            _ => None,
        }
    }
}

fn find_room<'h>(houses: &'h [House], house_id: &str, room_id: &str) -> Option<&'h Room> {
    houses
        .iter()
        .find(|house| house.id == house_id)
        .and_then(|house| house.room(room_id))
}

/// House card on the first wizard step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HouseSummary {
    pub id: String,
    pub name: String,
    pub available_rooms: usize,
}

/// Confirmation of a completed allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllocationOutcome {
    pub application_id: String,
    pub house_id: String,
    pub house_name: String,
    pub room_id: String,
    pub room_name: String,
    pub capacity: u32,
}

/// Housing service over a collection store.
pub struct HousingService<S: CollectionStore> {
    store: S,
    houses: Vec<House>,
}

impl<S: CollectionStore> HousingService<S> {
    pub fn open(store: S) -> Self {
        let houses = load_collection::<House>(&store);
        Self { store, houses }
    }

    pub fn houses(&self) -> &[House] {
        &self.houses
    }

    pub fn house_summaries(&self) -> Vec<HouseSummary> {
        self.houses
            .iter()
            .map(|house| HouseSummary {
                id: house.id.clone(),
                name: house.name.clone(),
                available_rooms: house.available_room_count(),
            })
            .collect()
    }

    /// Completes `wizard`: approves its application, then occupies the room.
    pub fn complete<S2: CollectionStore, R: ActivityRepository>(
        &mut self,
        wizard: &AllocationWizard,
        applications: &mut ApplicationService<S2, R>,
        actor: &str,
        on: NaiveDate,
        at: NaiveDateTime,
    ) -> Result<AllocationOutcome, AllocationError> {
        let (house_id, room_id) = wizard.selection().ok_or(AllocationError::NoRoomSelected)?;
        let house = self
            .houses
            .iter_mut()
            .find(|house| house.id == house_id)
            .ok_or_else(|| AllocationError::HouseNotFound(house_id.to_string()))?;
        let house_name = house.name.clone();
        let room = house
            .room_mut(room_id)
            .ok_or_else(|| AllocationError::RoomNotFound(room_id.to_string()))?;
        if !room.available {
            return Err(AllocationError::RoomUnavailable(room_id.to_string()));
        }

        applications.approve(wizard.application_id(), actor, on, at)?;
        room.available = false;

        let outcome = AllocationOutcome {
            application_id: wizard.application_id().to_string(),
            house_id: house_id.to_string(),
            house_name,
            room_id: room.id.clone(),
            room_name: room.name.clone(),
            capacity: room.capacity,
        };
        self.persist();
        info!("event=room_allocate module=service status=ok");
        Ok(outcome)
    }

    fn persist(&self) {
        if let Err(err) = save_collection(&self.store, &self.houses) {
            warn!(
                "event=collection_save module=service status=error key={} error={err}",
                House::STORAGE_KEY
            );
        }
    }
}
