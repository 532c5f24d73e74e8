//! Forecast updates from the phone

use super::{AssetHandle, DataEvent, FetchRequests, SyncRecord};
use crate::{
    fmt::{debug, trace, warn},
    system::config::WatchFaceConfig,
    ui::{set_text, DisplayState},
};

/// Applies forecast records to the display state and queues icon fetches.
///
/// Records are applied in delivery order, last writer wins per field.
pub struct SyncListener {
    config: WatchFaceConfig,
}

impl SyncListener {
    pub fn new(config: WatchFaceConfig) -> Self {
        Self { config }
    }

    /// Process a buffer of data events.
    ///
    /// Returns whether an immediate redraw is wanted.
    pub fn on_data_changed<'e, I>(
        &self,
        events: I,
        state: &mut DisplayState,
        requests: &FetchRequests,
    ) -> bool
    where
        I: IntoIterator<Item = &'e DataEvent>,
    {
        let mut redraw = false;
        for event in events {
            if let DataEvent::Changed(record) = event {
                redraw |= self.on_record_changed(record, state, requests);
            }
        }
        redraw
    }

    /// Process a single changed record.
    ///
    /// Returns whether an immediate redraw is wanted. The icon arrives later
    /// through the fetch completion queue.
    pub fn on_record_changed(
        &self,
        record: &SyncRecord,
        state: &mut DisplayState,
        requests: &FetchRequests,
    ) -> bool {
        if record.path.as_str() != self.config.weather_path {
            trace!("Ignoring data item {}", record.path.as_str());
            return false;
        }

        let high = record.data.get_text(self.config.high_key).unwrap_or("");
        let low = record.data.get_text(self.config.low_key).unwrap_or("");
        set_text(&mut state.high, high);
        set_text(&mut state.low, low);
        debug!("Forecast updated: {} | {}", high, low);

        match record.data.get_asset(self.config.icon_key) {
            Some(handle) => request_fetch(requests, handle),
            None => warn!("Forecast without icon asset"),
        }

        !state.ambient
    }
}

fn request_fetch(requests: &FetchRequests, handle: &AssetHandle) {
    if requests.try_send(handle.clone()).is_err() {
        warn!("Icon fetch queue full, dropping {}", handle.as_str());
    }
}
