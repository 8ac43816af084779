//! Button-driven settings menu.
//!
//! A non-blocking state machine ticked from the main loop. A short
//! press from idle opens the menu; further short presses cycle the
//! cursor through the calibration options; holding the button for two
//! seconds executes the highlighted option (or, on the entry position,
//! toggles the access point). The menu falls back to idle after 15
//! seconds without input.
//!
//! A calibration command that fails to leave the UART is the one
//! unrecoverable condition in the system: the controller switches the
//! display to `Error` and refuses all further input until power cycle.

use log::{error, info};

use crate::app::ports::{AccessPointPort, CalibrationPort, DisplayPort};
use crate::display::DisplayState;

/// Hold duration that turns a press into an action trigger.
pub const LONG_PRESS_MS: u64 = 2_000;
/// Idle time after which an open menu closes itself.
pub const MENU_TIMEOUT_MS: u64 = 15_000;
/// How long an Applied/Wifi confirmation stays on screen.
pub const CONFIRM_DISPLAY_MS: u64 = 2_000;

/// Cursor position inside the open menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursor {
    /// Entry position; a long press here toggles the access point.
    None,
    Calibration,
    SelfCalOn,
    SelfCalOff,
}

impl Cursor {
    /// Short-press order. The cycle closes over the three options,
    /// never returning to the entry position.
    fn advance(self) -> Self {
        match self {
            Self::None | Self::SelfCalOff => Self::Calibration,
            Self::Calibration => Self::SelfCalOn,
            Self::SelfCalOn => Self::SelfCalOff,
        }
    }

    fn setting_state(self) -> DisplayState {
        match self {
            Self::None => DisplayState::Display,
            Self::Calibration => DisplayState::SettingCalibration,
            Self::SelfCalOn => DisplayState::SettingSelfCalOn,
            Self::SelfCalOff => DisplayState::SettingSelfCalOff,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Idle,
    /// Button went down while idle; waiting for release to open the menu.
    EntryPress { pressed_at: u64 },
    Browsing { cursor: Cursor, last_interaction: u64 },
    /// Button went down while browsing; release advances, a two-second
    /// hold executes.
    MenuPress { cursor: Cursor, pressed_at: u64 },
    /// Showing an Applied/Wifi confirmation until the deadline.
    Confirming { until: u64 },
    /// Calibration write failed. Terminal.
    Halted,
}

pub struct MenuController {
    phase: Phase,
    prev_pressed: bool,
}

impl Default for MenuController {
    fn default() -> Self {
        Self::new()
    }
}

impl MenuController {
    pub fn new() -> Self {
        Self {
            phase: Phase::Idle,
            prev_pressed: false,
        }
    }

    /// Whether the controller has hit the unrecoverable calibration
    /// failure and shut the system down.
    pub fn halted(&self) -> bool {
        self.phase == Phase::Halted
    }

    /// Advance the state machine one step. Called once per main-loop
    /// cycle with the current button level; edges are derived from the
    /// previous sample, so poll cadence is the only debounce.
    pub fn tick<C, D, A>(
        &mut self,
        now_ms: u64,
        pressed: bool,
        calibration: &mut C,
        display: &mut D,
        access_point: &mut A,
    ) where
        C: CalibrationPort,
        D: DisplayPort,
        A: AccessPointPort,
    {
        let was_pressed = self.prev_pressed;
        self.prev_pressed = pressed;

        match self.phase {
            Phase::Halted => {}
            Phase::Idle => {
                if pressed && !was_pressed {
                    self.phase = Phase::EntryPress { pressed_at: now_ms };
                }
            }
            Phase::EntryPress { pressed_at } => {
                if !pressed {
                    if now_ms.saturating_sub(pressed_at) < LONG_PRESS_MS {
                        self.phase = Phase::Browsing {
                            cursor: Cursor::None,
                            last_interaction: now_ms,
                        };
                        info!("menu opened");
                    } else {
                        self.phase = Phase::Idle;
                    }
                }
            }
            Phase::Browsing {
                cursor,
                last_interaction,
            } => {
                if pressed && !was_pressed {
                    self.phase = Phase::MenuPress {
                        cursor,
                        pressed_at: now_ms,
                    };
                } else if now_ms.saturating_sub(last_interaction) >= MENU_TIMEOUT_MS {
                    info!("menu timed out");
                    self.phase = Phase::Idle;
                    display.set_state(DisplayState::Display, now_ms);
                }
            }
            Phase::MenuPress { cursor, pressed_at } => {
                // Presses are classified purely by held duration, so a
                // release sampled after the threshold still executes.
                if now_ms.saturating_sub(pressed_at) >= LONG_PRESS_MS {
                    self.execute(cursor, now_ms, calibration, display, access_point);
                } else if !pressed {
                    let next = cursor.advance();
                    self.phase = Phase::Browsing {
                        cursor: next,
                        last_interaction: now_ms,
                    };
                    display.set_state(next.setting_state(), now_ms);
                }
            }
            Phase::Confirming { until } => {
                if now_ms >= until {
                    self.phase = Phase::Idle;
                    display.set_state(DisplayState::Display, now_ms);
                }
            }
        }
    }

    fn execute<C, D, A>(
        &mut self,
        cursor: Cursor,
        now_ms: u64,
        calibration: &mut C,
        display: &mut D,
        access_point: &mut A,
    ) where
        C: CalibrationPort,
        D: DisplayPort,
        A: AccessPointPort,
    {
        match cursor {
            Cursor::None => {
                let active = !access_point.is_active();
                access_point.set_active(active);
                info!("access point toggled {}", if active { "on" } else { "off" });
                let state = if active {
                    DisplayState::WifiOn
                } else {
                    DisplayState::WifiOff
                };
                self.confirm(state, now_ms, display);
            }
            Cursor::Calibration => {
                info!("zero-point calibration requested");
                let ok = calibration.zero_point_calibrate();
                self.apply(ok, DisplayState::AppliedCalibration, now_ms, display);
            }
            Cursor::SelfCalOn => {
                let ok = calibration.set_calibration_mode(true);
                self.apply(ok, DisplayState::AppliedSelfCalOn, now_ms, display);
            }
            Cursor::SelfCalOff => {
                let ok = calibration.set_calibration_mode(false);
                self.apply(ok, DisplayState::AppliedSelfCalOff, now_ms, display);
            }
        }
    }

    fn apply<D: DisplayPort>(
        &mut self,
        ok: bool,
        applied: DisplayState,
        now_ms: u64,
        display: &mut D,
    ) {
        if ok {
            self.confirm(applied, now_ms, display);
        } else {
            error!("calibration command failed to reach the sensor; halting");
            display.set_state(DisplayState::Error, now_ms);
            self.phase = Phase::Halted;
        }
    }

    fn confirm<D: DisplayPort>(&mut self, state: DisplayState, now_ms: u64, display: &mut D) {
        display.set_state(state, now_ms);
        self.phase = Phase::Confirming {
            until: now_ms + CONFIRM_DISPLAY_MS,
        };
    }
}
