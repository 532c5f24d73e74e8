//! Sunshine watch face
//!
//! Shows the time, the date and a phone-synced forecast (high and low
//! temperature plus a condition icon). Drawing goes through
//! `embedded-graphics`, so any [`DrawTarget`] of `Rgb565` pixels works: a
//! panel driver on the watch or an in-memory framebuffer on a host.
//!
//! [`engine::WatchFaceEngine`] handles the lifecycle callbacks,
//! [`sync::fetch_worker`] downloads icons off the rendering path and
//! [`runner::run`] ties both to the redraw timer.
//!
//! [`DrawTarget`]: embedded_graphics::draw_target::DrawTarget

#![cfg_attr(not(test), no_std)]
#![allow(async_fn_in_trait)]

mod fmt;

pub mod engine;
pub mod error;
pub mod runner;
pub mod sync;
pub mod system;
pub mod ui;

pub use engine::{RenderTarget, TimeZoneReceiver, WatchFaceEngine};
pub use error::FetchError;
pub use system::config::WatchFaceConfig;
