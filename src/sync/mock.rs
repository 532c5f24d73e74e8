//! In-memory sync client for tests

use core::cell::{Cell, RefCell};
use std::rc::Rc;

use embassy_sync::{blocking_mutex::raw::NoopRawMutex, channel::Channel};

use super::{AssetHandle, SyncClient};

/// Take everything queued in `channel`, oldest first
pub fn drain<T, const N: usize>(channel: &Channel<NoopRawMutex, T, N>) -> Vec<T> {
    core::iter::from_fn(|| channel.try_receive().ok()).collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockError;

impl embedded_io_async::Error for MockError {
    fn kind(&self) -> embedded_io_async::ErrorKind {
        embedded_io_async::ErrorKind::Other
    }
}

#[derive(Default)]
pub struct MockState {
    pub connected: Cell<bool>,
    pub listening: Cell<bool>,
    /// `await_connection` never resolves
    pub hang_on_connect: Cell<bool>,
    /// `await_connection` fails
    pub refuse_connect: Cell<bool>,
    pub connect_calls: Cell<u32>,
    pub assets: RefCell<Vec<(String, Vec<u8>)>>,
}

#[derive(Clone, Default)]
pub struct MockClient(pub Rc<MockState>);

impl MockClient {
    pub fn with_asset(self, handle: &str, bytes: Vec<u8>) -> Self {
        self.0.assets.borrow_mut().push((handle.into(), bytes));
        self
    }
}

pub struct MockStream {
    data: Vec<u8>,
    pos: usize,
}

impl embedded_io_async::ErrorType for MockStream {
    type Error = MockError;
}

impl embedded_io_async::Read for MockStream {
    async fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        // Short reads exercise the fetcher's read loop
        let n = buf.len().min(self.data.len() - self.pos).min(500);
        buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(n)
    }
}

impl SyncClient for MockClient {
    type Error = MockError;
    type Stream = MockStream;

    fn is_connected(&self) -> bool {
        self.0.connected.get()
    }

    fn connect(&self) {
        self.0.connect_calls.set(self.0.connect_calls.get() + 1);
    }

    async fn await_connection(&self) -> Result<(), MockError> {
        self.connect();
        if self.0.hang_on_connect.get() {
            core::future::pending::<()>().await;
        }
        if self.0.refuse_connect.get() {
            return Err(MockError);
        }
        self.0.connected.set(true);
        Ok(())
    }

    fn disconnect(&self) {
        self.0.connected.set(false);
    }

    fn add_listener(&self) {
        self.0.listening.set(true);
    }

    fn remove_listener(&self) {
        self.0.listening.set(false);
    }

    async fn open_asset(&self, handle: &AssetHandle) -> Result<Option<MockStream>, MockError> {
        Ok(self
            .0
            .assets
            .borrow()
            .iter()
            .find(|(name, _)| name == handle.as_str())
            .map(|(_, data)| MockStream {
                data: data.clone(),
                pos: 0,
            }))
    }
}
