//! Mock hardware for host-side integration tests.
//!
//! The sensor port and the frame recorder hand out shared handles so a
//! test can keep inspecting traffic after the real halves have been
//! moved into the application service.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use co2matrix::app::ports::{
    AccessPointPort, ButtonPort, Clock, MatrixPort, OrientationPort, StatusSink,
};
use co2matrix::app::status::StatusSnapshot;
use co2matrix::app::AppService;
use co2matrix::config::SystemConfig;
use co2matrix::display::{Display, Rgb, CELLS};
use co2matrix::sensor::frame::{self, Frame, FRAME_LEN};
use co2matrix::sensor::{SensorLink, SerialPort};

// ── Sensor ────────────────────────────────────────────────────

pub struct ScriptedSensorPort {
    responses: Rc<RefCell<VecDeque<Frame>>>,
    written: Rc<RefCell<Vec<Vec<u8>>>>,
    truncate_writes: Rc<Cell<bool>>,
}

/// Test-side handle to a [`ScriptedSensorPort`] that has been moved
/// into the sensor link.
#[derive(Clone)]
pub struct SensorScript {
    responses: Rc<RefCell<VecDeque<Frame>>>,
    written: Rc<RefCell<Vec<Vec<u8>>>>,
    truncate_writes: Rc<Cell<bool>>,
}

pub fn scripted_sensor() -> (ScriptedSensorPort, SensorScript) {
    let responses = Rc::new(RefCell::new(VecDeque::new()));
    let written = Rc::new(RefCell::new(Vec::new()));
    let truncate_writes = Rc::new(Cell::new(false));
    let port = ScriptedSensorPort {
        responses: Rc::clone(&responses),
        written: Rc::clone(&written),
        truncate_writes: Rc::clone(&truncate_writes),
    };
    let script = SensorScript {
        responses,
        written,
        truncate_writes,
    };
    (port, script)
}

impl SensorScript {
    pub fn queue_ppm(&self, ppm: u16) {
        let mut f: Frame = [
            0xFF,
            0x86,
            (ppm >> 8) as u8,
            (ppm & 0xFF) as u8,
            0x47,
            0x40,
            0x00,
            0x00,
            0x00,
        ];
        f[8] = frame::checksum(&f);
        self.responses.borrow_mut().push_back(f);
    }

    pub fn last_written(&self) -> Option<Vec<u8>> {
        self.written.borrow().last().cloned()
    }

    /// Make every subsequent write report fewer bytes than offered.
    pub fn fail_writes(&self) {
        self.truncate_writes.set(true);
    }
}

impl SerialPort for ScriptedSensorPort {
    fn write(&mut self, bytes: &[u8]) -> usize {
        self.written.borrow_mut().push(bytes.to_vec());
        if self.truncate_writes.get() {
            bytes.len() - 1
        } else {
            bytes.len()
        }
    }

    fn read(&mut self, buf: &mut [u8], _timeout_ms: u32) -> usize {
        match self.responses.borrow_mut().pop_front() {
            Some(resp) => {
                buf[..FRAME_LEN].copy_from_slice(&resp);
                FRAME_LEN
            }
            None => 0,
        }
    }

    fn reconnect(&mut self) {}
}

// ── Display / orientation ─────────────────────────────────────

pub struct FrameRecorder {
    frames: Rc<RefCell<Vec<[Rgb; CELLS]>>>,
}

#[derive(Clone)]
pub struct FrameLog {
    frames: Rc<RefCell<Vec<[Rgb; CELLS]>>>,
}

pub fn frame_recorder() -> (FrameRecorder, FrameLog) {
    let frames = Rc::new(RefCell::new(Vec::new()));
    (
        FrameRecorder {
            frames: Rc::clone(&frames),
        },
        FrameLog { frames },
    )
}

impl FrameLog {
    pub fn count(&self) -> usize {
        self.frames.borrow().len()
    }

    pub fn last(&self) -> Option<[Rgb; CELLS]> {
        self.frames.borrow().last().copied()
    }
}

impl MatrixPort for FrameRecorder {
    fn commit(&mut self, frame: &[Rgb; CELLS]) {
        self.frames.borrow_mut().push(*frame);
    }
}

pub struct FixedOrientation(pub u8);

impl OrientationPort for FixedOrientation {
    fn quadrant(&mut self) -> u8 {
        self.0
    }
}

// ── Clock / sink / button / AP ────────────────────────────────

pub struct ManualClock {
    pub now: u64,
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now
    }

    fn sleep_ms(&mut self, ms: u32) {
        self.now += u64::from(ms);
    }
}

pub struct RecordingSink {
    pub published: Vec<StatusSnapshot>,
}

impl StatusSink for RecordingSink {
    fn publish(&mut self, status: &StatusSnapshot) {
        self.published.push(status.clone());
    }
}

pub struct StubButton {
    pub pressed: bool,
}

impl ButtonPort for StubButton {
    fn is_pressed(&mut self) -> bool {
        self.pressed
    }
}

pub struct MemoryAp {
    pub active: bool,
}

impl AccessPointPort for MemoryAp {
    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn is_active(&self) -> bool {
        self.active
    }
}

// ── Assembled rig ─────────────────────────────────────────────

pub struct Rig {
    pub app: AppService<ScriptedSensorPort, FrameRecorder, FixedOrientation>,
    pub script: SensorScript,
    pub frames: FrameLog,
    pub clock: ManualClock,
    pub sink: RecordingSink,
    pub button: StubButton,
    pub ap: MemoryAp,
}

impl Rig {
    pub fn new() -> Self {
        let config = SystemConfig::default();
        let (port, script) = scripted_sensor();
        let (recorder, frames) = frame_recorder();
        let sensor = SensorLink::new(port, config.response_timeout_ms);
        let display = Display::new(recorder, FixedOrientation(0), config.brightness);
        Self {
            app: AppService::new(sensor, display, config),
            script,
            frames,
            clock: ManualClock { now: 0 },
            sink: RecordingSink {
                published: Vec::new(),
            },
            button: StubButton { pressed: false },
            ap: MemoryAp { active: false },
        }
    }

    /// Boot and complete warm-up with one immediately stable reading.
    pub fn warmed() -> Self {
        let mut rig = Self::new();
        rig.script.queue_ppm(450);
        rig.app.boot(rig.clock.now);
        rig.app.warmup(&mut rig.clock, &mut rig.sink);
        rig
    }

    /// One UI tick at an absolute time with the given button level.
    pub fn ui(&mut self, now: u64, pressed: bool) {
        self.button.pressed = pressed;
        self.app.ui_tick(now, &mut self.button, &mut self.ap);
    }
}
