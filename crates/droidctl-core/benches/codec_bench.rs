//! Criterion benchmarks for the droidctl control-message codec.
//!
//! Touch and keycode encoding sit on the swipe and typing hot paths, so
//! they are measured individually alongside the variable-length messages.
//!
//! Run with:
//! ```bash
//! cargo bench --package droidctl-core --bench codec_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use droidctl_core::domain::geometry::{Point, Size};
use droidctl_core::input::{KeyAction, Keycode, MetaState, MotionAction, MotionButtons};
use droidctl_core::protocol::codec::{
    decode_control_message, decode_device_message, encode_control_message, encode_device_message,
};
use droidctl_core::protocol::messages::{
    ControlMessage, CopyKey, DeviceMessage, InjectKeycodeMessage, ScreenPowerMode, ScrollEvent,
    SetClipboardMessage, TouchEvent, POINTER_ID_MOUSE,
};

// ── Message fixtures ──────────────────────────────────────────────────────────

fn make_keycode() -> ControlMessage {
    ControlMessage::InjectKeycode(InjectKeycodeMessage {
        action: KeyAction::Down,
        keycode: Keycode::ENTER,
        repeat: 0,
        meta_state: MetaState(MetaState::SHIFT_ON),
    })
}

fn make_text() -> ControlMessage {
    ControlMessage::InjectText("benchmark text input".to_string())
}

fn make_touch() -> ControlMessage {
    ControlMessage::InjectTouch(TouchEvent {
        action: MotionAction::Move,
        pointer_id: POINTER_ID_MOUSE,
        position: Point::new(540, 960),
        surface: Size::new(1080, 1920),
        pressure: 1,
        buttons: MotionButtons::primary(),
    })
}

fn make_scroll() -> ControlMessage {
    ControlMessage::InjectScroll(ScrollEvent {
        position: Point::new(540, 960),
        surface: Size::new(1080, 1920),
        h_scroll: 0,
        v_scroll: -1,
        buttons: MotionButtons::primary(),
    })
}

fn make_set_clipboard() -> ControlMessage {
    ControlMessage::SetClipboard(SetClipboardMessage {
        sequence: 42,
        paste: true,
        text: "Hello, clipboard!".to_string(),
    })
}

fn control_fixtures() -> Vec<(&'static str, ControlMessage)> {
    vec![
        ("InjectKeycode", make_keycode()),
        ("InjectText", make_text()),
        ("InjectTouch", make_touch()),
        ("InjectScroll", make_scroll()),
        ("BackOrScreenOn", ControlMessage::BackOrScreenOn { action: KeyAction::Down }),
        ("GetClipboard", ControlMessage::GetClipboard { copy_key: CopyKey::Copy }),
        ("SetClipboard", make_set_clipboard()),
        (
            "SetScreenPowerMode",
            ControlMessage::SetScreenPowerMode { mode: ScreenPowerMode::Off },
        ),
    ]
}

// ── Benchmark groups ──────────────────────────────────────────────────────────

/// Benchmarks `encode_control_message` for every fixture.
fn bench_encode(c: &mut Criterion) {
    let mut group = c.benchmark_group("encode_control_message");
    for (name, msg) in &control_fixtures() {
        group.bench_with_input(BenchmarkId::new("msg", name), msg, |b, msg| {
            b.iter(|| encode_control_message(black_box(msg)).expect("encode must succeed"))
        });
    }
    group.finish();
}

/// Benchmarks `decode_control_message` from pre-encoded bytes.
fn bench_decode(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_control_message");
    for (name, msg) in &control_fixtures() {
        let bytes = encode_control_message(msg).expect("encode must succeed for benchmark setup");
        group.bench_with_input(BenchmarkId::new("msg", name), &bytes, |b, bytes| {
            b.iter(|| decode_control_message(black_box(bytes)).expect("decode must succeed"))
        });
    }
    group.finish();
}

/// Benchmarks parsing of the two device replies.
fn bench_device_replies(c: &mut Criterion) {
    let mut group = c.benchmark_group("decode_device_message");
    let replies = [
        ("Clipboard", DeviceMessage::Clipboard { text: "x".repeat(1024) }),
        ("AckClipboard", DeviceMessage::AckClipboard { sequence: 7 }),
    ];
    for (name, msg) in &replies {
        let bytes = encode_device_message(msg).expect("encode must succeed for benchmark setup");
        group.bench_with_input(BenchmarkId::new("msg", name), &bytes, |b, bytes| {
            b.iter(|| decode_device_message(black_box(bytes)).expect("decode must succeed"))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_encode, bench_decode, bench_device_replies);
criterion_main!(benches);
