//! The cooperative main-loop orchestrator.

use log::{info, warn};

use crate::app::ports::{AccessPointPort, ButtonPort, Clock, MatrixPort, OrientationPort, StatusSink};
use crate::app::status::{StatusKind, StatusSnapshot};
use crate::config::{SystemConfig, HISTORY_CAPACITY};
use crate::display::{tiers, Display, DisplayState};
use crate::history::HistoryBuffer;
use crate::menu::MenuController;
use crate::sensor::{Reading, SensorLink, SerialPort};

/// Readings the MH-Z19 reports while its cell is still stabilizing.
pub const WARMUP_SENTINELS: [i32; 2] = [500, 515];

/// Render cadence during warm-up.
const WARMUP_RENDER_INTERVAL_MS: u32 = 100;
/// Render passes between warm-up poll attempts, i.e. one attempt per
/// second.
const WARMUP_RENDERS_PER_POLL: u32 = 10;

fn is_warmup_sentinel(ppm: i32) -> bool {
    ppm < 0 || WARMUP_SENTINELS.contains(&ppm)
}

/// Owns every subsystem and steps them from the main loop.
///
/// All state is accessed by one logical task at a time between yield
/// points, so nothing here needs locking. Sensor polling and history
/// sampling are time-gated against stored timestamps rather than
/// separately scheduled, so irregular tick cadence does not drift.
pub struct AppService<P: SerialPort, M: MatrixPort, O: OrientationPort> {
    sensor: SensorLink<P>,
    display: Display<M, O>,
    menu: MenuController,
    history: HistoryBuffer<HISTORY_CAPACITY>,
    config: SystemConfig,
    status: Option<StatusSnapshot>,
    warmed_up: bool,
    failed_reads: u32,
    last_poll_at_ms: Option<u64>,
    last_history_at_ms: Option<u64>,
}

impl<P: SerialPort, M: MatrixPort, O: OrientationPort> AppService<P, M, O> {
    pub fn new(sensor: SensorLink<P>, display: Display<M, O>, config: SystemConfig) -> Self {
        Self {
            sensor,
            display,
            menu: MenuController::new(),
            history: HistoryBuffer::new(),
            config,
            status: None,
            warmed_up: false,
            failed_reads: 0,
            last_poll_at_ms: None,
            last_history_at_ms: None,
        }
    }

    /// Show the boot pattern. Called once before warm-up.
    pub fn boot(&mut self, now_ms: u64) {
        self.display.set_state(DisplayState::Boot, now_ms);
    }

    /// Block until the sensor delivers a stable reading. Idempotent;
    /// returns immediately once completed.
    ///
    /// Renders the sweep animation for a minimum period first (the
    /// sensor ignores requests right after power-on anyway), then polls
    /// once a second until the reported ppm is neither a warm-up
    /// sentinel nor unknown.
    pub fn warmup<C: Clock, S: StatusSink>(&mut self, clock: &mut C, sink: &mut S) {
        if self.warmed_up {
            return;
        }

        let start = clock.now_ms();
        self.display.set_state(DisplayState::Warmup, start);
        self.publish(sink, StatusSnapshot::event(StatusKind::Warmup, start));
        info!("sensor warm-up started");

        while clock.now_ms().saturating_sub(start) < self.config.warmup_min_render_ms {
            self.display.render(clock.now_ms());
            clock.sleep_ms(WARMUP_RENDER_INTERVAL_MS);
        }

        // One poll attempt per second; the animation keeps running at
        // the render cadence between attempts. Every attempt, failed or
        // not, publishes a waiting status.
        loop {
            let now = clock.now_ms();
            if let Ok(reading) = self.sensor.poll() {
                self.display.set_reading(reading, now);
                if !is_warmup_sentinel(reading.ppm) {
                    break;
                }
            }
            self.publish(sink, StatusSnapshot::event(StatusKind::WarmupWaiting, now));
            for _ in 0..WARMUP_RENDERS_PER_POLL {
                self.display.render(clock.now_ms());
                clock.sleep_ms(WARMUP_RENDER_INTERVAL_MS);
            }
        }

        let now = clock.now_ms();
        self.warmed_up = true;
        self.last_poll_at_ms = Some(now);
        self.last_history_at_ms = Some(now);
        self.publish(sink, StatusSnapshot::event(StatusKind::WarmupCompleted, now));
        self.display.set_state(DisplayState::Display, now);
        info!("sensor warm-up completed");
    }

    /// Poll the sensor and sample the history ring when their intervals
    /// are due. No-op before warm-up and after a calibration halt.
    pub fn sensor_tick<S: StatusSink>(&mut self, now_ms: u64, sink: &mut S) {
        if !self.warmed_up || self.menu.halted() {
            return;
        }

        let poll_due = self
            .last_poll_at_ms
            .is_none_or(|t| now_ms.saturating_sub(t) >= self.config.poll_interval_ms);
        if poll_due {
            self.last_poll_at_ms = Some(now_ms);
            match self.sensor.poll() {
                Ok(reading) => {
                    self.failed_reads = 0;
                    self.display.set_reading(reading, now_ms);
                    let tier = tiers::classify(reading.ppm);
                    self.publish(sink, StatusSnapshot::read_ok(now_ms, reading, tier));
                }
                Err(failure) => {
                    self.failed_reads += 1;
                    warn!(
                        "sensor read failed: {failure} ({} consecutive)",
                        self.failed_reads
                    );
                    if self.failed_reads > self.config.max_failed_readings {
                        self.sensor.mark_unknown();
                        self.display.set_reading(self.sensor.last_reading(), now_ms);
                    }
                    self.publish(sink, StatusSnapshot::read_failed(now_ms));
                }
            }
        }

        let history_due = self
            .last_history_at_ms
            .is_none_or(|t| now_ms.saturating_sub(t) >= self.config.history_interval_ms);
        if history_due {
            self.last_history_at_ms = Some(now_ms);
            self.history.append(self.sensor.last_reading().ppm);
        }
    }

    /// Sample the button, step the menu, and draw one frame.
    pub fn ui_tick<B: ButtonPort, A: AccessPointPort>(
        &mut self,
        now_ms: u64,
        button: &mut B,
        access_point: &mut A,
    ) {
        let pressed = button.is_pressed();
        self.menu
            .tick(now_ms, pressed, &mut self.sensor, &mut self.display, access_point);
        self.display.render(now_ms);
    }

    /// Whether the unrecoverable calibration failure occurred. The
    /// error pattern stays on screen; only a power cycle recovers.
    pub fn halted(&self) -> bool {
        self.menu.halted()
    }

    /// The most recently published status, if any.
    pub fn status(&self) -> Option<&StatusSnapshot> {
        self.status.as_ref()
    }

    pub fn last_reading(&self) -> Reading {
        self.sensor.last_reading()
    }

    /// Sampled ppm history, oldest first.
    pub fn history(&self) -> &HistoryBuffer<HISTORY_CAPACITY> {
        &self.history
    }

    fn publish<S: StatusSink>(&mut self, sink: &mut S, snapshot: StatusSnapshot) {
        sink.publish(&snapshot);
        self.status = Some(snapshot);
    }
}
