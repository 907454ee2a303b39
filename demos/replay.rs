//! Replays a short recorded session through both pipelines onto virtual devices.
//!
//! `cargo run --example replay [config.toml]`, with `RUST_LOG=hotas_relay=debug`
//! to see the decoded state.

use hotas_relay::{
    Config, DebugLogger, DeviceManager, InputEventBus, Pipeline, Projection, ReplaySource,
    SinkSync, StickState, ThrottleState, VirtualDevice,
};
use tracing_subscriber::EnvFilter;

fn throttle_session() -> Vec<[u8; 13]> {
    let mut reports = Vec::new();
    for step in 0..=4u16 {
        let lever = step * 255;
        let [lo, hi] = lever.to_le_bytes();
        let mut r = [0u8; 13];
        r[0] = lo;
        r[1] = hi & 0x03;
        r[6] = 0x20; // M1
        r[7..11].fill(0x80);
        reports.push(r);
    }
    // SW1 held while switching to M2.
    let mut r = [0u8; 13];
    r[3] = 0x02;
    r[6] = 0x40;
    reports.push(r);
    reports
}

fn stick_session() -> Vec<[u8; 13]> {
    [0x0000u16, 0x4000, 0x8000, 0xC000, 0xFFFF]
        .into_iter()
        .enumerate()
        .map(|(pov, x)| {
            let [lo, hi] = x.to_le_bytes();
            let mut r = [0u8; 13];
            r[0] = lo;
            r[1] = hi;
            r[2] = 0x00;
            r[3] = 0x80;
            r[5] = (pov as u8) << 4;
            r[6] = 0x01;
            r
        })
        .collect()
}

fn print_device<S: Projection>(device: &VirtualDevice) {
    println!("== {} ==", device.name());
    for axis in S::AXES {
        println!("  axis {:>2} = {:?}", axis.id, device.axis(axis.id));
    }
    println!("  pressed: {:#x?}", device.pressed());
    println!("  writes:  {}", device.writes());
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => Config::load(path).expect("load config"),
        None => Config::default(),
    };

    let throttle_sink = VirtualDevice::for_projection::<ThrottleState>(&config.throttle.emulated_name);
    let mut throttle_bus = InputEventBus::new();
    throttle_bus.add_labeled_listener("virtual-throttle", SinkSync::new(throttle_sink.clone()));

    let stick_sink = VirtualDevice::for_projection::<StickState>(&config.stick.emulated_name);
    let mut stick_bus = InputEventBus::new();
    stick_bus.add_labeled_listener("virtual-stick", SinkSync::new(stick_sink.clone()));

    if config.debug {
        throttle_bus.add_labeled_listener("debug", DebugLogger::new());
        stick_bus.add_labeled_listener("debug", DebugLogger::new());
    }

    let throttle = Pipeline::<ThrottleState>::new(throttle_bus);
    let stick = Pipeline::<StickState>::new(stick_bus);
    let throttle_state = throttle.reader();
    let stick_state = stick.reader();

    let mut manager = DeviceManager::new();
    manager
        .spawn(throttle, ReplaySource::new(throttle_session()))
        .expect("spawn throttle worker");
    manager
        .spawn(stick, ReplaySource::new(stick_session()))
        .expect("spawn stick worker");

    while manager.running() > 0 {
        std::thread::sleep(std::time::Duration::from_millis(5));
    }
    for (device, result) in manager.shutdown() {
        match result {
            Ok(summary) => println!("{device}: {summary:?}"),
            Err(error) => println!("{device}: {error}"),
        }
    }

    print_device::<ThrottleState>(&throttle_sink);
    print_device::<StickState>(&stick_sink);
    println!("throttle: {:?}", throttle_state.snapshot());
    println!("stick:    {:?}", stick_state.snapshot());
}
