//! Typed, versioned collections over a `CollectionStore`.
//!
//! # Responsibility
//! - Encode record collections into a versioned JSON envelope.
//! - Decode stored payloads, dropping records that do not match the shape.
//! - Fall back to the record type's seed collection when nothing usable is
//!   stored.
//!
//! # Invariants
//! - Payloads are written as `{"schemaVersion": N, "items": [...]}`.
//! - A bare JSON array is read as schema version 0 (the console's legacy
//!   format); items keep the same shape across versions 0 and 1.
//! - Payloads newer than `COLLECTION_SCHEMA_VERSION` are never decoded.
//! - Loading never fails; failures are logged and seeds are returned.

use crate::model::application::{seed_applications, Application};
use crate::model::housing::{seed_houses, House};
use crate::model::progress::ProgressEntry;
use crate::model::roster::{
    seed_admins, seed_clients, seed_social_workers, Admin, Client, SocialWorker,
};
use crate::repo::collection_store::{CollectionStore, StoreResult};
use log::{debug, info, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Envelope version written by this crate.
pub const COLLECTION_SCHEMA_VERSION: u32 = 1;

const SCHEMA_VERSION_FIELD: &str = "schemaVersion";
const ITEMS_FIELD: &str = "items";

pub const ADMIN_LIST_KEY: &str = "adminList";
pub const SOCIAL_WORKER_LIST_KEY: &str = "socialWorkerList";
pub const CLIENT_LIST_KEY: &str = "clientList";
pub const APPLICATION_LIST_KEY: &str = "applicationList";
pub const HOUSE_LIST_KEY: &str = "houseList";
pub const CLIENT_PROGRESS_KEY: &str = "clientProgress";

/// A record type persisted as one named collection.
pub trait Collection: Serialize + DeserializeOwned {
    /// Fixed storage key of the collection.
    const STORAGE_KEY: &'static str;

    /// Collection used when storage holds nothing usable.
    fn seed() -> Vec<Self>;
}

impl Collection for Admin {
    const STORAGE_KEY: &'static str = ADMIN_LIST_KEY;

    fn seed() -> Vec<Self> {
        seed_admins()
    }
}

impl Collection for SocialWorker {
    const STORAGE_KEY: &'static str = SOCIAL_WORKER_LIST_KEY;

    fn seed() -> Vec<Self> {
        seed_social_workers()
    }
}

impl Collection for Client {
    const STORAGE_KEY: &'static str = CLIENT_LIST_KEY;

    fn seed() -> Vec<Self> {
        seed_clients()
    }
}

impl Collection for Application {
    const STORAGE_KEY: &'static str = APPLICATION_LIST_KEY;

    fn seed() -> Vec<Self> {
        seed_applications()
    }
}

impl Collection for House {
    const STORAGE_KEY: &'static str = HOUSE_LIST_KEY;

    fn seed() -> Vec<Self> {
        seed_houses()
    }
}

impl Collection for ProgressEntry {
    const STORAGE_KEY: &'static str = CLIENT_PROGRESS_KEY;

    fn seed() -> Vec<Self> {
        Vec::new()
    }
}

/// Why a stored payload could not be decoded at all.
#[derive(Debug)]
pub enum DecodeError {
    Malformed(serde_json::Error),
    NotACollection,
    UnsupportedVersion { found: u64, latest_supported: u32 },
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(err) => write!(f, "malformed collection payload: {err}"),
            Self::NotACollection => f.write_str("payload is not a collection"),
            Self::UnsupportedVersion {
                found,
                latest_supported,
            } => write!(
                f,
                "collection schema version {found} is newer than supported {latest_supported}"
            ),
        }
    }
}

impl Error for DecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Malformed(err) => Some(err),
            _ => None,
        }
    }
}

/// Result of decoding one stored payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedCollection<T> {
    pub schema_version: u32,
    pub items: Vec<T>,
    /// Number of stored records that did not match the record shape.
    pub dropped: usize,
}

/// Encodes `items` into the current envelope format.
pub fn encode_collection<T: Serialize>(items: &[T]) -> Result<String, serde_json::Error> {
    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Envelope<'a, T> {
        schema_version: u32,
        items: &'a [T],
    }

    serde_json::to_string(&Envelope {
        schema_version: COLLECTION_SCHEMA_VERSION,
        items,
    })
}

/// Decodes a stored payload, keeping only well-formed records.
pub fn decode_collection<T: DeserializeOwned>(
    payload: &str,
) -> Result<DecodedCollection<T>, DecodeError> {
    let value: Value = serde_json::from_str(payload).map_err(DecodeError::Malformed)?;
    let (schema_version, raw_items) = match value {
        Value::Array(items) => (0, items),
        Value::Object(mut map) => {
            let version = map
                .get(SCHEMA_VERSION_FIELD)
                .and_then(Value::as_u64)
                .ok_or(DecodeError::NotACollection)?;
            if version > u64::from(COLLECTION_SCHEMA_VERSION) {
                return Err(DecodeError::UnsupportedVersion {
                    found: version,
                    latest_supported: COLLECTION_SCHEMA_VERSION,
                });
            }
            match map.remove(ITEMS_FIELD) {
                Some(Value::Array(items)) => (version as u32, items),
                _ => return Err(DecodeError::NotACollection),
            }
        }
        _ => return Err(DecodeError::NotACollection),
    };

    let total = raw_items.len();
    let items: Vec<T> = raw_items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();

    Ok(DecodedCollection {
        schema_version,
        dropped: total - items.len(),
        items,
    })
}

/// Loads collection `T` from `store`, falling back to `T::seed()`.
///
/// # Side effects
/// - Emits `collection_load` events; read and decode failures are logged at
///   warn level and otherwise ignored.
pub fn load_collection<T: Collection>(store: &impl CollectionStore) -> Vec<T> {
    let key = T::STORAGE_KEY;
    match store.read(key) {
        Ok(Some(payload)) => match decode_collection::<T>(&payload) {
            Ok(decoded) => {
                if decoded.dropped > 0 {
                    debug!(
                        "event=collection_load module=repo status=partial key={key} dropped={}",
                        decoded.dropped
                    );
                }
                if !decoded.items.is_empty() {
                    debug!(
                        "event=collection_load module=repo status=ok key={key} schema_version={} count={}",
                        decoded.schema_version,
                        decoded.items.len()
                    );
                    return decoded.items;
                }
                info!("event=collection_load module=repo status=seed key={key} reason=empty");
            }
            Err(err) => {
                warn!(
                    "event=collection_load module=repo status=seed key={key} reason=decode_failed error={err}"
                );
            }
        },
        Ok(None) => {
            info!("event=collection_load module=repo status=seed key={key} reason=missing");
        }
        Err(err) => {
            warn!(
                "event=collection_load module=repo status=seed key={key} reason=read_failed error={err}"
            );
        }
    }
    T::seed()
}

/// Writes `items` as collection `T`.
pub fn save_collection<T: Collection>(
    store: &impl CollectionStore,
    items: &[T],
) -> StoreResult<()> {
    let payload = encode_collection(items)?;
    store.write(T::STORAGE_KEY, &payload)
}
