//! Replayed reports flow through the pipeline onto virtual devices.

use hotas_relay::stick::{AXIS_RZ, AXIS_X, AXIS_Y, BUTTON_POV_RIGHT, BUTTON_POV_UP, BUTTON_TRIGGER};
use hotas_relay::throttle::{
    AXIS_F, AXIS_L, AXIS_R, AXIS_TX, BUTTON_MODE_M1, BUTTON_MODE_M2, BUTTON_MODE_S1, BUTTON_SW1,
};
use hotas_relay::{
    from_fn, Config, DebugLogger, DeviceClass, DeviceManager, FilteredListener, InputEventBus,
    Mode, Pipeline, ReplaySource, SinkSync, StateUpdate, StickState, ThrottleState,
    VirtualDevice,
};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

const THROTTLE_REFERENCE: [u8; 13] = [
    0xFF, 0x03, 0x00, 0x00, 0x00, 0x00, 0x20, 0x80, 0x80, 0x80, 0x80, 0x00, 0x00,
];

fn stick_reference() -> [u8; 13] {
    let mut r = [0u8; 13];
    r[..4].copy_from_slice(&[0x00, 0x80, 0xFF, 0x7F]);
    r[4] = 0xFF;
    r[5] = 0x2F; // POV code 2, Z high nibble 0xF
    r[6] = 0x01; // trigger
    r
}

#[test]
fn throttle_reports_reach_the_virtual_device() {
    let config = Config::default();
    let sink = VirtualDevice::for_projection::<ThrottleState>(&config.throttle.emulated_name);

    let mut bus = InputEventBus::<ThrottleState>::new();
    bus.add_labeled_listener("sink", SinkSync::new(sink.clone()));
    bus.add_labeled_listener("debug", DebugLogger::new());
    let mut pipeline = Pipeline::new(bus);

    let state = pipeline.process(&THROTTLE_REFERENCE).unwrap();
    assert_eq!(state.throttle_l, 1023);
    assert_eq!(state.throttle_r, 0);
    assert_eq!(state.mode, Some(Mode::M1));

    assert_eq!(sink.name(), DeviceClass::Throttle.emulated_name());
    assert_eq!(sink.axis(AXIS_L), Some(1023));
    assert_eq!(sink.axis(AXIS_R), Some(0));
    assert_eq!(sink.axis(AXIS_F), Some(128));
    assert_eq!(sink.axis(AXIS_TX), Some(128));
    assert_eq!(sink.pressed(), vec![BUTTON_MODE_M1]);

    // Switch to M2 and press SW1; the mode button moves with it.
    let mut next = THROTTLE_REFERENCE;
    next[3] = 0b0000_0010;
    next[6] = 0b0100_0000;
    pipeline.process(&next).unwrap();
    assert_eq!(sink.button(BUTTON_MODE_M1), Some(false));
    assert_eq!(sink.button(BUTTON_MODE_M2), Some(true));
    assert_eq!(sink.button(BUTTON_MODE_S1), Some(false));
    assert_eq!(sink.button(BUTTON_SW1), Some(true));

    // No mode bits: the selector stays where it was.
    let mut idle = THROTTLE_REFERENCE;
    idle[6] = 0;
    pipeline.process(&idle).unwrap();
    assert_eq!(sink.button(BUTTON_MODE_M2), Some(true));
    assert_eq!(sink.button(BUTTON_SW1), Some(false));
}

#[test]
fn stick_reports_reach_the_virtual_device() {
    let sink = VirtualDevice::for_projection::<StickState>(DeviceClass::Stick.emulated_name());
    let mut bus = InputEventBus::<StickState>::new();
    bus.add_listener(SinkSync::new(sink.clone()));
    let mut pipeline = Pipeline::new(bus);

    pipeline.process(&stick_reference()).unwrap();
    assert_eq!(sink.axis(AXIS_X), Some(32768));
    assert_eq!(sink.axis(AXIS_Y), Some(32767));
    assert_eq!(sink.axis(AXIS_RZ), Some(4095));
    assert_eq!(sink.pressed(), vec![BUTTON_TRIGGER, BUTTON_POV_UP, BUTTON_POV_RIGHT]);
}

#[test]
fn failing_sink_does_not_block_other_listeners() {
    // A sink declared without any buttons rejects every button write.
    let broken = VirtualDevice::new("broken", <ThrottleState as hotas_relay::Projection>::AXES, &[]);
    let delivered = Arc::new(AtomicU64::new(0));

    let mut bus = InputEventBus::<ThrottleState>::new();
    bus.add_labeled_listener("broken-sink", SinkSync::new(broken));
    let counter = Arc::clone(&delivered);
    bus.add_fn(move |update| {
        counter.store(update.seq, Ordering::SeqCst);
        Ok(())
    });
    let mut pipeline = Pipeline::new(bus);

    let summary = pipeline.run(
        &mut ReplaySource::new([THROTTLE_REFERENCE; 3]),
        &hotas_relay::StopSignal::new(),
    );
    assert_eq!(summary.committed, 3);
    assert_eq!(summary.listener_failures, 3);
    assert_eq!(delivered.load(Ordering::SeqCst), 3);
}

#[test]
fn manager_runs_both_devices_from_config() {
    let config = Config::from_toml_str("debug = true").unwrap();

    let throttle_sink = VirtualDevice::for_projection::<ThrottleState>(&config.throttle.emulated_name);
    let mut throttle_bus = InputEventBus::<ThrottleState>::new();
    throttle_bus.add_listener(SinkSync::new(throttle_sink.clone()));
    if config.debug {
        throttle_bus.add_listener(DebugLogger::new());
    }

    let stick_sink = VirtualDevice::for_projection::<StickState>(&config.stick.emulated_name);
    let stick_hits = Arc::new(AtomicU64::new(0));
    let mut stick_bus = InputEventBus::<StickState>::new();
    stick_bus.add_listener(SinkSync::new(stick_sink.clone()));
    let hits = Arc::clone(&stick_hits);
    stick_bus.add_listener(FilteredListener::every_nth(
        2,
        from_fn(move |_: &StateUpdate<'_, StickState>| {
            hits.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }),
    ));

    let throttle = Pipeline::new(throttle_bus);
    let stick = Pipeline::new(stick_bus);
    let throttle_reader = throttle.reader();
    let stick_reader = stick.reader();

    let mut manager = DeviceManager::new();
    manager
        .spawn(throttle, ReplaySource::new([THROTTLE_REFERENCE, [0u8; 13]]))
        .unwrap();
    manager
        .spawn(stick, ReplaySource::new([stick_reference(); 5]))
        .unwrap();

    while manager.running() > 0 {
        std::thread::yield_now();
    }
    let results = manager.shutdown();
    assert!(results.iter().all(|(_, r)| r.is_ok()));

    assert_eq!(throttle_reader.snapshot().throttle_l, 0);
    assert_eq!(throttle_reader.snapshot().mode, Some(Mode::M1));
    assert_eq!(throttle_sink.axis(AXIS_L), Some(0));
    assert_eq!(stick_reader.snapshot().x, 32768);
    assert_eq!(stick_sink.axis(AXIS_X), Some(32768));
    // Five stick reports, every second one forwarded.
    assert_eq!(stick_hits.load(Ordering::SeqCst), 2);
}
