//! Watch face engine
//!
//! Maps the host's lifecycle callbacks onto the display state, the redraw
//! timer and the sync channel. Every callback runs on the rendering side;
//! the only other actor is the icon fetch worker, whose results are applied
//! here through [`WatchFaceEngine::apply_fetch_outcome`].

use chrono::FixedOffset;
use embassy_time::Duration;
use embedded_graphics::{
    draw_target::DrawTarget, geometry::Point, pixelcolor::Rgb565, primitives::Rectangle,
};

use crate::{
    fmt::{debug, info},
    sync::{DataEvent, FetchCompletions, FetchOutcome, FetchRequests, SyncClient, SyncListener},
    system::{
        config::WatchFaceConfig,
        time::Calendar,
        timer::{TimerState, UpdateTimer},
    },
    ui::{DisplayState, StyleConfig, SunshineWatchFace},
};

/// Screen shape as reported by the window insets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Insets {
    pub round: bool,
}

/// Device capabilities reported once by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceProperties {
    /// Only a few colours are available in ambient mode
    pub low_bit_ambient: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TapKind {
    Touch,
    TouchCancel,
    Tap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TapEvent {
    pub kind: TapKind,
    pub position: Point,
}

/// Registration for the system's time-zone-changed broadcast.
pub trait TimeZoneReceiver {
    fn register(&mut self);
    fn unregister(&mut self);
    /// Zone the system is using right now
    fn current_zone(&self) -> FixedOffset;
}

/// Host callbacks a watch face has to handle.
///
/// A test harness can drive an implementation directly without a host.
pub trait RenderTarget {
    fn on_create(&mut self);
    fn on_destroy(&mut self);
    fn on_properties_changed(&mut self, properties: DeviceProperties);
    fn on_apply_insets(&mut self, insets: Insets);
    fn on_visibility_changed(&mut self, visible: bool, now_ms: u64);
    fn on_ambient_mode_changed(&mut self, ambient: bool, now_ms: u64);
    /// Host's own coarse tick, delivered in ambient mode
    fn on_time_tick(&mut self);
    fn on_tap(&mut self, tap: TapEvent);
    fn on_draw<D>(&mut self, target: &mut D, bounds: Rectangle, now_ms: u64) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>;
}

pub struct WatchFaceEngine<'a, C, Z> {
    config: WatchFaceConfig,
    client: C,
    time_zone_receiver: Z,
    time_zone_registered: bool,
    requests: &'a FetchRequests,
    listener: SyncListener,
    face: SunshineWatchFace,
    state: DisplayState,
    style: StyleConfig,
    calendar: Calendar,
    timer: UpdateTimer,
    visible: bool,
    redraw: bool,
}

impl<'a, C, Z> WatchFaceEngine<'a, C, Z>
where
    C: SyncClient,
    Z: TimeZoneReceiver,
{
    pub fn new(
        config: WatchFaceConfig,
        client: C,
        time_zone_receiver: Z,
        requests: &'a FetchRequests,
    ) -> Self {
        let state = DisplayState::default();
        Self {
            client,
            time_zone_receiver,
            time_zone_registered: false,
            requests,
            listener: SyncListener::new(config),
            face: SunshineWatchFace::new(config),
            style: StyleConfig::new(&config, state.round, state.ambient, state.low_bit_ambient),
            state,
            calendar: Calendar::default(),
            timer: UpdateTimer::new(config.update_rate),
            visible: false,
            redraw: false,
            config,
        }
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn style(&self) -> &StyleConfig {
        &self.style
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    pub fn timer_state(&self) -> TimerState {
        self.timer.state()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Whether a redraw was requested since the last call
    pub fn take_redraw(&mut self) -> bool {
        core::mem::take(&mut self.redraw)
    }

    /// The sync channel is up; start listening for data items
    pub fn on_connected(&mut self) {
        debug!("Sync channel connected");
        self.client.add_listener();
    }

    pub fn on_time_zone_changed(&mut self, zone: FixedOffset) {
        self.calendar.set_zone(zone);
        self.invalidate();
    }

    pub fn on_data_changed<'e, I>(&mut self, events: I)
    where
        I: IntoIterator<Item = &'e DataEvent>,
    {
        if self
            .listener
            .on_data_changed(events, &mut self.state, self.requests)
        {
            self.invalidate();
        }
    }

    /// Redraw timer fired at `now_ms`.
    ///
    /// Returns the delay to the next tick, or `None` if the timer is
    /// stopped and the tick is dropped.
    pub fn on_timer(&mut self, now_ms: u64) -> Option<Duration> {
        let next = self.timer.tick(now_ms)?;
        self.invalidate();
        Some(next)
    }

    /// Apply a finished icon fetch. Failures keep the current icon.
    pub fn apply_fetch_outcome(&mut self, outcome: FetchOutcome) {
        match outcome {
            Ok(icon) => {
                self.state.icon = Some(icon);
                if !self.state.ambient {
                    self.invalidate();
                }
            }
            Err(e) => debug!("Keeping previous icon: {:?}", e),
        }
    }

    /// Apply every fetch result waiting in `completions`
    pub fn poll_completions(&mut self, completions: &FetchCompletions) {
        while let Ok(outcome) = completions.try_receive() {
            self.apply_fetch_outcome(outcome);
        }
    }

    fn invalidate(&mut self) {
        self.redraw = true;
    }

    fn restyle(&mut self) {
        self.style = StyleConfig::new(
            &self.config,
            self.state.round,
            self.state.ambient,
            self.state.low_bit_ambient,
        );
    }

    fn should_timer_run(&self) -> bool {
        self.visible && !self.state.ambient
    }

    fn update_timer(&mut self, now_ms: u64) {
        let run = self.should_timer_run();
        self.timer.update(run, now_ms);
    }

    fn register_time_zone_receiver(&mut self) {
        if self.time_zone_registered {
            return;
        }
        self.time_zone_registered = true;
        self.time_zone_receiver.register();
    }

    fn unregister_time_zone_receiver(&mut self) {
        if !self.time_zone_registered {
            return;
        }
        self.time_zone_registered = false;
        self.time_zone_receiver.unregister();
    }
}

impl<C, Z> RenderTarget for WatchFaceEngine<'_, C, Z>
where
    C: SyncClient,
    Z: TimeZoneReceiver,
{
    fn on_create(&mut self) {
        info!("Watch face engine created");
        self.restyle();
    }

    fn on_destroy(&mut self) {
        info!("Watch face engine destroyed");
        self.timer.stop();
    }

    fn on_properties_changed(&mut self, properties: DeviceProperties) {
        self.state.low_bit_ambient = properties.low_bit_ambient;
        self.restyle();
    }

    fn on_apply_insets(&mut self, insets: Insets) {
        self.state.round = insets.round;
        self.restyle();
    }

    fn on_visibility_changed(&mut self, visible: bool, now_ms: u64) {
        self.visible = visible;
        if visible {
            self.client.connect();
            self.register_time_zone_receiver();
            // Broadcasts are missed while hidden
            self.calendar.set_zone(self.time_zone_receiver.current_zone());
            self.invalidate();
        } else {
            if self.client.is_connected() {
                self.client.remove_listener();
                self.client.disconnect();
            }
            self.unregister_time_zone_receiver();
        }
        self.update_timer(now_ms);
    }

    fn on_ambient_mode_changed(&mut self, ambient: bool, now_ms: u64) {
        if self.state.ambient != ambient {
            self.state.ambient = ambient;
            self.restyle();
            self.invalidate();
        }
        self.update_timer(now_ms);
    }

    fn on_time_tick(&mut self) {
        self.invalidate();
    }

    fn on_tap(&mut self, _tap: TapEvent) {
        self.invalidate();
    }

    fn on_draw<D>(&mut self, target: &mut D, bounds: Rectangle, now_ms: u64) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.redraw = false;
        let now = self.calendar.local(now_ms);
        self.face
            .render(target, bounds, &self.style, &self.state, &now)
    }
}
