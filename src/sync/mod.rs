//! Phone to watch data sync
//!
//! The phone publishes data items (a path plus a small key/value map) that
//! the sync service mirrors onto the watch. Binary payloads travel as
//! assets: the map only carries an opaque handle that has to be resolved to
//! a byte stream separately.

use embassy_sync::{blocking_mutex::raw::NoopRawMutex, channel::Channel};
use heapless::{LinearMap, String};

use crate::error::FetchError;
use crate::ui::Icon;

pub mod asset;
pub mod listener;
#[cfg(test)]
pub(crate) mod mock;

pub use asset::{fetch_worker, AssetFetcher};
pub use listener::SyncListener;

/// Queued icon fetches before new requests are dropped
pub const FETCH_QUEUE_LEN: usize = 4;
/// Finished fetches waiting to be applied by the engine
pub const COMPLETION_QUEUE_LEN: usize = 2;

/// Result of one icon fetch
pub type FetchOutcome = Result<Icon, FetchError>;
/// Asset handles waiting to be fetched
pub type FetchRequests = Channel<NoopRawMutex, AssetHandle, FETCH_QUEUE_LEN>;
/// Fetch results waiting to be applied on the rendering side
pub type FetchCompletions = Channel<NoopRawMutex, FetchOutcome, COMPLETION_QUEUE_LEN>;

/// A key, path or value did not fit its fixed-size storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CapacityError;

/// Opaque reference to a blob held by the sync service
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AssetHandle(String<64>);

impl AssetHandle {
    pub fn new(digest: &str) -> Result<Self, CapacityError> {
        String::try_from(digest).map(Self).map_err(|_| CapacityError)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataValue {
    Text(String<32>),
    Asset(AssetHandle),
}

/// Key/value payload of a data item
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DataMap(LinearMap<String<16>, DataValue, 8>);

impl DataMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: &str, value: DataValue) -> Result<(), CapacityError> {
        let key = String::try_from(key).map_err(|_| CapacityError)?;
        self.0.insert(key, value).map_err(|_| CapacityError)?;
        Ok(())
    }

    pub fn put_text(&mut self, key: &str, value: &str) -> Result<(), CapacityError> {
        let value = String::try_from(value).map_err(|_| CapacityError)?;
        self.insert(key, DataValue::Text(value))
    }

    pub fn put_asset(&mut self, key: &str, handle: AssetHandle) -> Result<(), CapacityError> {
        self.insert(key, DataValue::Asset(handle))
    }

    pub fn get(&self, key: &str) -> Option<&DataValue> {
        self.0.iter().find(|(k, _)| k.as_str() == key).map(|(_, v)| v)
    }

    /// Text value under `key`; `None` if absent or not text
    pub fn get_text(&self, key: &str) -> Option<&str> {
        match self.get(key) {
            Some(DataValue::Text(text)) => Some(text.as_str()),
            _ => None,
        }
    }

    /// Asset handle under `key`; `None` if absent or not an asset
    pub fn get_asset(&self, key: &str) -> Option<&AssetHandle> {
        match self.get(key) {
            Some(DataValue::Asset(handle)) => Some(handle),
            _ => None,
        }
    }
}

/// A changed data item as delivered by the sync channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncRecord {
    pub path: String<32>,
    pub data: DataMap,
}

impl SyncRecord {
    pub fn new(path: &str) -> Result<Self, CapacityError> {
        Ok(Self {
            path: String::try_from(path).map_err(|_| CapacityError)?,
            data: DataMap::new(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataEvent {
    Changed(SyncRecord),
    Deleted(String<32>),
}

/// Connection to the phone's sync service.
///
/// The client is a shared handle: the engine drives connection and
/// subscription while the asset fetcher only resolves assets, so every
/// method takes `&self`.
pub trait SyncClient {
    type Error;
    type Stream: embedded_io_async::Read;

    fn is_connected(&self) -> bool;

    /// Start connecting; the host reports success through the engine's
    /// `on_connected`.
    fn connect(&self);

    /// Connect and resolve once the connection is up or has failed.
    async fn await_connection(&self) -> Result<(), Self::Error>;

    fn disconnect(&self);

    /// Subscribe to data item changes
    fn add_listener(&self);

    fn remove_listener(&self);

    /// Resolve an asset to a readable stream, `None` if the service does not
    /// know the handle.
    async fn open_asset(&self, handle: &AssetHandle) -> Result<Option<Self::Stream>, Self::Error>;
}
