//! Icon download
//!
//! Resolves an asset handle through the sync client, reads the whole blob
//! and decodes it into a fixed-size icon. Runs away from the rendering
//! side; results travel back over the completion channel.

use embassy_time::{with_timeout, Duration};
use embedded_io_async::Read;

use super::{AssetHandle, FetchCompletions, FetchOutcome, FetchRequests, SyncClient};
use crate::{
    error::FetchError,
    fmt::{debug, warn},
    system::config::WatchFaceConfig,
    ui::Icon,
};

/// Largest asset the fetcher buffers
pub const MAX_ASSET_LEN: usize = 32 * 1024;

pub struct AssetFetcher<C> {
    client: C,
    connect_timeout: Duration,
    buf: [u8; MAX_ASSET_LEN],
}

impl<C> AssetFetcher<C>
where
    C: SyncClient,
{
    pub fn new(client: C, config: &WatchFaceConfig) -> Self {
        Self {
            client,
            connect_timeout: config.connect_timeout,
            buf: [0; MAX_ASSET_LEN],
        }
    }

    /// Fetch and decode the icon behind `handle`.
    ///
    /// Waits at most the configured connect timeout for the sync channel.
    pub async fn fetch(&mut self, handle: &AssetHandle) -> FetchOutcome {
        self.ensure_connected().await?;

        let mut stream = self
            .client
            .open_asset(handle)
            .await
            .map_err(|_| FetchError::Client)?
            .ok_or(FetchError::AssetNotFound)?;
        let len = read_to_end(&mut stream, &mut self.buf).await?;
        debug!("Loaded asset {} ({} bytes)", handle.as_str(), len);

        Icon::from_bmp(&self.buf[..len])
    }

    async fn ensure_connected(&self) -> Result<(), FetchError> {
        if self.client.is_connected() {
            return Ok(());
        }
        match with_timeout(self.connect_timeout, self.client.await_connection()).await {
            Ok(Ok(())) => Ok(()),
            Ok(Err(_)) => Err(FetchError::ConnectFailed),
            Err(_) => Err(FetchError::ConnectTimeout),
        }
    }
}

async fn read_to_end<R: Read>(stream: &mut R, buf: &mut [u8]) -> Result<usize, FetchError> {
    let mut len = 0;
    while len < buf.len() {
        match stream.read(&mut buf[len..]).await.map_err(|_| FetchError::Read)? {
            0 => return Ok(len),
            n => len += n,
        }
    }

    // Buffer full: fine only if the stream ends here
    let mut probe = [0u8; 1];
    match stream.read(&mut probe).await.map_err(|_| FetchError::Read)? {
        0 => Ok(len),
        _ => Err(FetchError::AssetTooLarge),
    }
}

/// Serve fetch requests one at a time, forever.
///
/// A newer request never cancels the one in flight, so a slow stale fetch
/// can still land after a fresher one.
pub async fn fetch_worker<C>(
    fetcher: &mut AssetFetcher<C>,
    requests: &FetchRequests,
    completions: &FetchCompletions,
) -> !
where
    C: SyncClient,
{
    loop {
        let handle = requests.receive().await;
        let outcome = fetcher.fetch(&handle).await;
        if let Err(e) = &outcome {
            warn!("Icon fetch failed: {:?}", e);
        }
        completions.send(outcome).await;
    }
}
