//! X-56 Rhino stick: report layout, decoder, and sink table.
//!
//! ```text
//!  0-1  X (16-bit little endian)
//!  2-3  Y (16-bit little endian)
//!  4    Z low byte
//!  5    PPPPZZZZ  POV code (0 center, 1..=8 clockwise from up), Z high nibble
//!  6    hhPDCBAT  H1 up/right, Pinky, D, Thumb (C), B, A, Trigger
//!  7    ..HHHHhh  H2 left/down/right/up, H1 left/down
//!  9    RX
//! 10    RY
//! ```

use crate::binding::{AxisBinding, Projection, BTN_JOYSTICK, BTN_TRIGGER_HAPPY};
use crate::bits::read_axis16_le;
use crate::device::{fixed_report, Decode, DeviceClass};
use crate::error::DecodeError;
use crate::event::Hat;
use serde::Serialize;

pub const AXIS_X: u16 = 0;
pub const AXIS_Y: u16 = 1;
pub const AXIS_RX: u16 = 2;
pub const AXIS_RY: u16 = 3;
pub const AXIS_RZ: u16 = 4;

pub const BUTTON_TRIGGER: u16 = BTN_JOYSTICK;
pub const BUTTON_A: u16 = BTN_JOYSTICK + 1;
pub const BUTTON_B: u16 = BTN_JOYSTICK + 2;
pub const BUTTON_THUMB: u16 = BTN_JOYSTICK + 3;
pub const BUTTON_D: u16 = BTN_JOYSTICK + 4;
pub const BUTTON_PINKY: u16 = BTN_JOYSTICK + 5;
pub const BUTTON_H1_UP: u16 = BTN_JOYSTICK + 6;
pub const BUTTON_H1_RIGHT: u16 = BTN_JOYSTICK + 7;
pub const BUTTON_H1_DOWN: u16 = BTN_JOYSTICK + 8;
pub const BUTTON_H1_LEFT: u16 = BTN_JOYSTICK + 9;
pub const BUTTON_H2_UP: u16 = BTN_JOYSTICK + 10;
pub const BUTTON_H2_RIGHT: u16 = BTN_JOYSTICK + 11;
pub const BUTTON_H2_DOWN: u16 = BTN_JOYSTICK + 12;
pub const BUTTON_H2_LEFT: u16 = BTN_JOYSTICK + 13;
pub const BUTTON_POV_UP: u16 = BTN_JOYSTICK + 14;
pub const BUTTON_POV_RIGHT: u16 = BTN_JOYSTICK + 15;
pub const BUTTON_POV_DOWN: u16 = BTN_TRIGGER_HAPPY + 16;
pub const BUTTON_POV_LEFT: u16 = BTN_TRIGGER_HAPPY + 17;

/// Complete stick snapshot: 5 axes, 6 buttons and 3 hats.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StickState {
    pub x: u16,
    pub y: u16,
    /// Twist, 0..=4095.
    pub z: u16,
    pub rx: u16,
    pub ry: u16,

    pub trigger: bool,
    pub a: bool,
    pub b: bool,
    /// The "C" button.
    pub thumb: bool,
    pub d: bool,
    /// Pinky paddle.
    pub pinky: bool,

    pub pov: Hat,
    pub h1: Hat,
    pub h2: Hat,
}

impl StickState {
    /// Decodes one stick report. Only fails on reports shorter than
    /// [`REPORT_LEN`](crate::REPORT_LEN).
    pub fn decode(report: &[u8]) -> Result<Self, DecodeError> {
        let b = fixed_report(DeviceClass::Stick, report)?;

        let h1 = ((b[7] & 0b0000_0011) << 2) | ((b[6] & 0b1100_0000) >> 6);
        let h2 = (b[7] & 0b0011_1100) >> 2;

        Ok(Self {
            x: read_axis16_le([b[0], b[1]]),
            y: read_axis16_le([b[2], b[3]]),
            z: read_axis16_le([b[4], b[5] & 0b0000_1111]),
            rx: u16::from(b[9]),
            ry: u16::from(b[10]),

            trigger: b[6] & 0b0000_0001 != 0,
            a: b[6] & 0b0000_0010 != 0,
            b: b[6] & 0b0000_0100 != 0,
            thumb: b[6] & 0b0000_1000 != 0,
            d: b[6] & 0b0001_0000 != 0,
            pinky: b[6] & 0b0010_0000 != 0,

            pov: Hat::from_pov(b[5] >> 4),
            h1: Hat::from_nibble(h1),
            h2: Hat::from_nibble(h2),
        })
    }
}

impl Decode for StickState {
    const DEVICE: DeviceClass = DeviceClass::Stick;

    fn decode(report: &[u8], _previous: &Self) -> Result<Self, DecodeError> {
        StickState::decode(report)
    }
}

impl Projection for StickState {
    const AXES: &'static [AxisBinding] = &[
        AxisBinding::new(AXIS_X, 0, 65535),
        AxisBinding::new(AXIS_Y, 0, 65535),
        AxisBinding::new(AXIS_RX, 0, 255),
        AxisBinding::new(AXIS_RY, 0, 255),
        AxisBinding::new(AXIS_RZ, 0, 4095),
    ];

    const BUTTONS: &'static [u16] = &[
        BUTTON_TRIGGER,
        BUTTON_A,
        BUTTON_B,
        BUTTON_THUMB,
        BUTTON_D,
        BUTTON_PINKY,
        BUTTON_H1_UP,
        BUTTON_H1_RIGHT,
        BUTTON_H1_DOWN,
        BUTTON_H1_LEFT,
        BUTTON_H2_UP,
        BUTTON_H2_RIGHT,
        BUTTON_H2_DOWN,
        BUTTON_H2_LEFT,
        BUTTON_POV_UP,
        BUTTON_POV_RIGHT,
        BUTTON_POV_DOWN,
        BUTTON_POV_LEFT,
    ];

    fn axes(&self) -> Vec<(u16, i32)> {
        vec![
            (AXIS_X, i32::from(self.x)),
            (AXIS_Y, i32::from(self.y)),
            (AXIS_RX, i32::from(self.rx)),
            (AXIS_RY, i32::from(self.ry)),
            (AXIS_RZ, i32::from(self.z)),
        ]
    }

    fn buttons(&self) -> Vec<(u16, bool)> {
        vec![
            (BUTTON_TRIGGER, self.trigger),
            (BUTTON_A, self.a),
            (BUTTON_B, self.b),
            (BUTTON_THUMB, self.thumb),
            (BUTTON_D, self.d),
            (BUTTON_PINKY, self.pinky),
            (BUTTON_H1_UP, self.h1.up),
            (BUTTON_H1_RIGHT, self.h1.right),
            (BUTTON_H1_DOWN, self.h1.down),
            (BUTTON_H1_LEFT, self.h1.left),
            (BUTTON_H2_UP, self.h2.up),
            (BUTTON_H2_RIGHT, self.h2.right),
            (BUTTON_H2_DOWN, self.h2.down),
            (BUTTON_H2_LEFT, self.h2.left),
            (BUTTON_POV_UP, self.pov.up),
            (BUTTON_POV_RIGHT, self.pov.right),
            (BUTTON_POV_DOWN, self.pov.down),
            (BUTTON_POV_LEFT, self.pov.left),
        ]
    }
}
