//! Event loop
//!
//! Drives a [`WatchFaceEngine`] from icon fetch completions, host callbacks
//! and the redraw timer, polled in that order. A frame is drawn whenever one
//! of them asks for it.

use chrono::FixedOffset;
use embassy_futures::select::{select3, Either3};
use embassy_sync::{blocking_mutex::raw::NoopRawMutex, channel::Channel};
use embassy_time::{Duration, Timer};
use embedded_graphics::{draw_target::DrawTarget, pixelcolor::Rgb565};

use crate::{
    engine::{DeviceProperties, Insets, RenderTarget, TapEvent, TimeZoneReceiver, WatchFaceEngine},
    fmt::trace,
    sync::{DataEvent, FetchCompletions, SyncClient},
    system::{time::WallClock, timer::TimerState},
};

pub const HOST_EVENT_QUEUE_LEN: usize = 8;

/// Callbacks delivered by the host, in order
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    Create,
    Destroy,
    Properties(DeviceProperties),
    Insets(Insets),
    Visibility(bool),
    Ambient(bool),
    TimeTick,
    Tap(TapEvent),
    TimeZoneChanged(FixedOffset),
    Connected,
    DataChanged(DataEvent),
}

pub type HostEvents = Channel<NoopRawMutex, HostEvent, HOST_EVENT_QUEUE_LEN>;

/// Run the engine until the host destroys it.
///
/// Only drawing errors end the loop early.
pub async fn run<C, Z, D>(
    engine: &mut WatchFaceEngine<'_, C, Z>,
    events: &HostEvents,
    completions: &FetchCompletions,
    display: &mut D,
    clock: &WallClock,
) -> Result<(), D::Error>
where
    C: SyncClient,
    Z: TimeZoneReceiver,
    D: DrawTarget<Color = Rgb565>,
{
    loop {
        let timer = engine.timer_state();
        match select3(completions.receive(), events.receive(), next_tick(timer, clock)).await {
            Either3::First(outcome) => engine.apply_fetch_outcome(outcome),
            Either3::Second(HostEvent::Destroy) => {
                engine.on_destroy();
                return Ok(());
            }
            Either3::Second(event) => dispatch(engine, event, clock.now_ms()),
            Either3::Third(()) => {
                engine.on_timer(clock.now_ms());
            }
        }

        if engine.take_redraw() {
            let bounds = display.bounding_box();
            engine.on_draw(display, bounds, clock.now_ms())?;
        }
    }
}

fn dispatch<C, Z>(engine: &mut WatchFaceEngine<'_, C, Z>, event: HostEvent, now_ms: u64)
where
    C: SyncClient,
    Z: TimeZoneReceiver,
{
    trace!("Host event");
    match event {
        HostEvent::Create => engine.on_create(),
        HostEvent::Destroy => engine.on_destroy(),
        HostEvent::Properties(properties) => engine.on_properties_changed(properties),
        HostEvent::Insets(insets) => engine.on_apply_insets(insets),
        HostEvent::Visibility(visible) => engine.on_visibility_changed(visible, now_ms),
        HostEvent::Ambient(ambient) => engine.on_ambient_mode_changed(ambient, now_ms),
        HostEvent::TimeTick => engine.on_time_tick(),
        HostEvent::Tap(tap) => engine.on_tap(tap),
        HostEvent::TimeZoneChanged(zone) => engine.on_time_zone_changed(zone),
        HostEvent::Connected => engine.on_connected(),
        HostEvent::DataChanged(event) => engine.on_data_changed(core::iter::once(&event)),
    }
}

async fn next_tick(timer: TimerState, clock: &WallClock) {
    match timer {
        TimerState::Stopped => core::future::pending().await,
        TimerState::Running { deadline_ms } => {
            let wait = deadline_ms.saturating_sub(clock.now_ms());
            Timer::after(Duration::from_millis(wait)).await
        }
    }
}
