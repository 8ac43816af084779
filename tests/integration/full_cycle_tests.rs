//! End-to-end scenarios: boot, warm-up, polling, menu, failure modes.

use co2matrix::app::status::StatusKind;
use co2matrix::menu::{CONFIRM_DISPLAY_MS, LONG_PRESS_MS, MENU_TIMEOUT_MS};
use co2matrix::sensor::frame;

use crate::mock_hw::Rig;

#[test]
fn boot_warmup_and_first_reading() {
    let mut rig = Rig::new();
    rig.script.queue_ppm(515);
    rig.script.queue_ppm(515);
    rig.script.queue_ppm(450);

    rig.app.boot(rig.clock.now);
    // The boot pattern went out before warm-up started.
    assert_eq!(rig.frames.count(), 1);

    rig.app.warmup(&mut rig.clock, &mut rig.sink);

    let kinds: Vec<StatusKind> = rig.sink.published.iter().map(|s| s.kind).collect();
    assert_eq!(
        kinds,
        vec![
            StatusKind::Warmup,
            StatusKind::WarmupWaiting,
            StatusKind::WarmupWaiting,
            StatusKind::WarmupCompleted,
        ]
    );
    assert_eq!(rig.app.last_reading().ppm, 450);
    // 6 s of sweep animation, then one poll attempt per second until
    // the reading leaves the sentinel range.
    assert!(rig.clock.now >= 8000);
    assert!(rig.frames.count() > 60);

    // The final frame is the readout: the excellent tier (cyan) on the
    // top three rows.
    let frame = rig.frames.last().unwrap();
    for i in 0..15 {
        assert_eq!(frame[i], frame[0], "cell {i}");
    }
    assert_eq!(frame[0].0, 0);
    assert!(frame[0].1 > 0 && frame[0].2 > 0);
}

#[test]
fn readings_flow_into_status_and_display() {
    let mut rig = Rig::warmed();
    let t0 = rig.clock.now;

    rig.script.queue_ppm(850);
    rig.app.sensor_tick(t0 + 2000, &mut rig.sink);

    let last = rig.sink.published.last().unwrap();
    assert_eq!(last.kind, StatusKind::ReadOk);
    assert_eq!(last.ppm, Some(850));
    assert_eq!(last.rating, Some("okay"));
    assert_eq!(last.color, Some("FFFD13"));

    // The next render paints the okay tier on the top rows.
    rig.ui(t0 + 2010, false);
    let frame = rig.frames.last().unwrap();
    assert_ne!(frame[0], (0, 0, 0));
    assert_eq!(frame[0], frame[14]);
}

#[test]
fn menu_long_press_sends_self_calibration_on() {
    let mut rig = Rig::warmed();
    let t = rig.clock.now;

    // Open the menu, then step to the self-cal-on entry.
    rig.ui(t + 100, true);
    rig.ui(t + 200, false);
    rig.ui(t + 300, true);
    rig.ui(t + 400, false);
    rig.ui(t + 500, true);
    rig.ui(t + 600, false);
    // Hold to execute.
    rig.ui(t + 700, true);
    rig.ui(t + 700 + LONG_PRESS_MS, true);

    let written = rig.script.last_written().unwrap();
    assert_eq!(written, frame::command(0x79, 0xA0).to_vec());
    assert!(!rig.app.halted());

    // Confirmation expires back to the normal readout.
    rig.ui(t + 800 + LONG_PRESS_MS, false);
    rig.ui(t + 800 + LONG_PRESS_MS + CONFIRM_DISPLAY_MS, false);
}

#[test]
fn menu_times_out_without_side_effects() {
    let mut rig = Rig::warmed();
    let t = rig.clock.now;

    rig.ui(t + 100, true);
    rig.ui(t + 200, false);
    rig.ui(t + 300, true);
    rig.ui(t + 400, false); // browsing the calibration entry
    let writes_before = rig.script.last_written();

    rig.ui(t + 400 + MENU_TIMEOUT_MS, false);
    assert_eq!(rig.script.last_written(), writes_before);
    assert!(!rig.ap.active);
}

#[test]
fn access_point_toggle_from_the_entry_position() {
    let mut rig = Rig::warmed();
    let t = rig.clock.now;

    rig.ui(t + 100, true);
    rig.ui(t + 200, false); // menu open, entry position
    rig.ui(t + 300, true);
    rig.ui(t + 300 + LONG_PRESS_MS, true);

    assert!(rig.ap.active);
    // All cells lit green for the confirmation flash.
    let frame = rig.frames.last().unwrap();
    assert!(frame.iter().all(|c| *c == frame[0]));
    assert!(frame[0].1 > 0 && frame[0].0 == 0);
}

#[test]
fn failed_calibration_write_halts_for_good() {
    let mut rig = Rig::warmed();
    let t = rig.clock.now;
    rig.script.fail_writes();

    rig.ui(t + 100, true);
    rig.ui(t + 200, false);
    rig.ui(t + 300, true);
    rig.ui(t + 400, false); // calibration entry
    rig.ui(t + 500, true);
    rig.ui(t + 500 + LONG_PRESS_MS, true);

    assert!(rig.app.halted());

    // Polling publishes nothing further.
    let published = rig.sink.published.len();
    rig.app.sensor_tick(t + 20_000, &mut rig.sink);
    assert_eq!(rig.sink.published.len(), published);

    // Rendering continues so the error pattern stays visible.
    let frames = rig.frames.count();
    rig.ui(t + 21_000, false);
    assert_eq!(rig.frames.count(), frames + 1);
}
