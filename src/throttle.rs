//! X-56 Rhino throttle: report layout, decoder, and sink table.
//!
//! Bit map of the 13-byte input report (bits listed MSB first):
//!
//! ```text
//!  0  LLLLLLLL  ThrottleL (low byte)
//!  1  RRRRRRLL  ThrottleR (low 6 bits), ThrottleL (high 2 bits)
//!  2  IGFERRRR  I, G, F, E, ThrottleR (high 4 bits)
//!  3  TSSSSSSH  TGL1Up, SW6, SW5, SW4, SW3, SW2, SW1, H
//!  4  HTTTTTTT  H3 up, TGL4Down, TGL4Up, TGL3Down, TGL3Up, TGL2Down, TGL2Up, TGL1Down
//!  5  KHHHHHHH  K1Up, H4 left/down/right/up, H3 left/down/right
//!  6  MMMSTSSK  Mode S1/M2/M1, SLD, Thumb button, ScrollUp, ScrollDown, K1Down
//!  7  FFFFFFFF  F
//!  8  XXXXXXXX  Thumb X
//!  9  GGGGGGGG  G
//! 10  YYYYYYYY  Thumb Y
//! 11  RRRRRRRR  RTY4
//! 12  RRRRRRRR  RTY3
//! ```
//!
//! ThrottleR's 10 bits are the ones ThrottleL leaves over: byte 1's high six
//! bits form the low end, byte 2's low nibble the high end.

use crate::binding::{AxisBinding, Projection, BTN_JOYSTICK, BTN_TRIGGER_HAPPY};
use crate::bits::{read_axis16_le, read_bit};
use crate::device::{fixed_report, Decode, DeviceClass};
use crate::error::DecodeError;
use crate::event::{Hat, Mode};
use serde::Serialize;

pub const AXIS_L: u16 = 0;
pub const AXIS_R: u16 = 1;
pub const AXIS_F: u16 = 2;
pub const AXIS_TX: u16 = 3;
pub const AXIS_TY: u16 = 4;
pub const AXIS_G: u16 = 5;
pub const AXIS_RTY4: u16 = 6;
pub const AXIS_RTY3: u16 = 7;

pub const BUTTON_E: u16 = BTN_JOYSTICK;
pub const BUTTON_F: u16 = BTN_JOYSTICK + 1;
pub const BUTTON_G: u16 = BTN_JOYSTICK + 2;
pub const BUTTON_I: u16 = BTN_JOYSTICK + 3;
pub const BUTTON_H: u16 = BTN_JOYSTICK + 4;
pub const BUTTON_SW1: u16 = BTN_JOYSTICK + 5;
pub const BUTTON_SW2: u16 = BTN_JOYSTICK + 6;
pub const BUTTON_SW3: u16 = BTN_JOYSTICK + 7;
pub const BUTTON_SW4: u16 = BTN_JOYSTICK + 8;
pub const BUTTON_SW5: u16 = BTN_JOYSTICK + 9;
pub const BUTTON_SW6: u16 = BTN_JOYSTICK + 10;
pub const BUTTON_TGL1_UP: u16 = BTN_JOYSTICK + 11;
pub const BUTTON_TGL1_DOWN: u16 = BTN_JOYSTICK + 12;
pub const BUTTON_TGL2_UP: u16 = BTN_JOYSTICK + 13;
pub const BUTTON_TGL2_DOWN: u16 = BTN_JOYSTICK + 14;
pub const BUTTON_TGL3_UP: u16 = BTN_JOYSTICK + 15;
pub const BUTTON_TGL3_DOWN: u16 = BTN_TRIGGER_HAPPY + 16;
pub const BUTTON_TGL4_UP: u16 = BTN_TRIGGER_HAPPY + 17;
pub const BUTTON_TGL4_DOWN: u16 = BTN_TRIGGER_HAPPY + 18;
pub const BUTTON_H3_UP: u16 = BTN_TRIGGER_HAPPY + 19;
pub const BUTTON_H3_RIGHT: u16 = BTN_TRIGGER_HAPPY + 20;
pub const BUTTON_H3_DOWN: u16 = BTN_TRIGGER_HAPPY + 21;
pub const BUTTON_H3_LEFT: u16 = BTN_TRIGGER_HAPPY + 22;
pub const BUTTON_H4_UP: u16 = BTN_TRIGGER_HAPPY + 23;
pub const BUTTON_H4_RIGHT: u16 = BTN_TRIGGER_HAPPY + 24;
pub const BUTTON_H4_DOWN: u16 = BTN_TRIGGER_HAPPY + 25;
pub const BUTTON_H4_LEFT: u16 = BTN_TRIGGER_HAPPY + 26;
pub const BUTTON_K1_UP: u16 = BTN_TRIGGER_HAPPY + 27;
pub const BUTTON_K1_DOWN: u16 = BTN_TRIGGER_HAPPY + 28;
pub const BUTTON_SCROLL_DOWN: u16 = BTN_TRIGGER_HAPPY + 29;
pub const BUTTON_SCROLL_UP: u16 = BTN_TRIGGER_HAPPY + 30;
pub const BUTTON_THUMB: u16 = BTN_TRIGGER_HAPPY + 31;
pub const BUTTON_SLD: u16 = BTN_TRIGGER_HAPPY + 32;
pub const BUTTON_MODE_M1: u16 = BTN_TRIGGER_HAPPY + 33;
pub const BUTTON_MODE_M2: u16 = BTN_TRIGGER_HAPPY + 34;
pub const BUTTON_MODE_S1: u16 = BTN_TRIGGER_HAPPY + 35;

/// Complete throttle snapshot: 8 axes, 24 buttons, 2 hats and the mode selector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ThrottleState {
    /// Left throttle lever, 0..=1023.
    pub throttle_l: u16,
    /// Right throttle lever, 0..=1023.
    pub throttle_r: u16,
    pub f_axis: u16,
    pub thumb_x: u16,
    pub g_axis: u16,
    pub thumb_y: u16,
    pub rty4: u16,
    pub rty3: u16,

    pub e: bool,
    pub f: bool,
    pub g: bool,
    pub i: bool,
    pub h: bool,
    pub sw1: bool,
    pub sw2: bool,
    pub sw3: bool,
    pub sw4: bool,
    pub sw5: bool,
    pub sw6: bool,
    pub tgl1_up: bool,
    pub tgl1_down: bool,
    pub tgl2_up: bool,
    pub tgl2_down: bool,
    pub tgl3_up: bool,
    pub tgl3_down: bool,
    pub tgl4_up: bool,
    pub tgl4_down: bool,
    pub h3: Hat,
    pub h4: Hat,
    pub k1_up: bool,
    pub k1_down: bool,
    pub scroll_up: bool,
    pub scroll_down: bool,
    pub thumb: bool,
    pub sld: bool,
    pub mode: Option<Mode>,
}

impl ThrottleState {
    /// Decodes one throttle report.
    ///
    /// Only fails on reports shorter than [`REPORT_LEN`](crate::REPORT_LEN).
    /// A report with no mode bit set keeps `previous.mode`.
    pub fn decode(report: &[u8], previous: &ThrottleState) -> Result<Self, DecodeError> {
        let b = fixed_report(DeviceClass::Throttle, report)?;

        let throttle_r_lo = ((b[1] & 0b1111_1100) >> 2) | ((b[2] & 0b0000_0011) << 6);
        let throttle_r_hi = (b[2] & 0b0000_1100) >> 2;

        Ok(Self {
            throttle_l: read_axis16_le([b[0], b[1] & 0b0000_0011]),
            throttle_r: read_axis16_le([throttle_r_lo, throttle_r_hi]),

            i: read_bit(b[2], 0),
            g: read_bit(b[2], 1),
            f: read_bit(b[2], 2),
            e: read_bit(b[2], 3),

            tgl1_up: read_bit(b[3], 0),
            sw6: read_bit(b[3], 1),
            sw5: read_bit(b[3], 2),
            sw4: read_bit(b[3], 3),
            sw3: read_bit(b[3], 4),
            sw2: read_bit(b[3], 5),
            sw1: read_bit(b[3], 6),
            h: read_bit(b[3], 7),

            tgl4_down: read_bit(b[4], 1),
            tgl4_up: read_bit(b[4], 2),
            tgl3_down: read_bit(b[4], 3),
            tgl3_up: read_bit(b[4], 4),
            tgl2_down: read_bit(b[4], 5),
            tgl2_up: read_bit(b[4], 6),
            tgl1_down: read_bit(b[4], 7),

            k1_up: read_bit(b[5], 0),
            h4: Hat {
                left: read_bit(b[5], 1),
                down: read_bit(b[5], 2),
                right: read_bit(b[5], 3),
                up: read_bit(b[5], 4),
            },
            // H3 straddles bytes 4 and 5.
            h3: Hat {
                up: read_bit(b[4], 0),
                left: read_bit(b[5], 5),
                down: read_bit(b[5], 6),
                right: read_bit(b[5], 7),
            },

            mode: decode_mode(b[6]).or(previous.mode),
            sld: read_bit(b[6], 3),
            thumb: read_bit(b[6], 4),
            scroll_up: read_bit(b[6], 5),
            scroll_down: read_bit(b[6], 6),
            k1_down: read_bit(b[6], 7),

            f_axis: u16::from(b[7]),
            thumb_x: u16::from(b[8]),
            g_axis: u16::from(b[9]),
            thumb_y: u16::from(b[10]),
            rty4: u16::from(b[11]),
            rty3: u16::from(b[12]),
        })
    }
}

/// First set bit wins: S1, then M2, then M1.
fn decode_mode(byte: u8) -> Option<Mode> {
    if read_bit(byte, 0) {
        Some(Mode::S1)
    } else if read_bit(byte, 1) {
        Some(Mode::M2)
    } else if read_bit(byte, 2) {
        Some(Mode::M1)
    } else {
        None
    }
}

impl Decode for ThrottleState {
    const DEVICE: DeviceClass = DeviceClass::Throttle;

    fn decode(report: &[u8], previous: &Self) -> Result<Self, DecodeError> {
        ThrottleState::decode(report, previous)
    }
}

impl Projection for ThrottleState {
    const AXES: &'static [AxisBinding] = &[
        AxisBinding::new(AXIS_L, 0, 1023),
        AxisBinding::new(AXIS_R, 0, 1023),
        AxisBinding::new(AXIS_F, 0, 255),
        AxisBinding::new(AXIS_TX, 0, 255),
        AxisBinding::new(AXIS_TY, 0, 255),
        AxisBinding::new(AXIS_G, 0, 255),
        AxisBinding::new(AXIS_RTY4, 0, 255),
        AxisBinding::new(AXIS_RTY3, 0, 255),
    ];

    const BUTTONS: &'static [u16] = &[
        BUTTON_E,
        BUTTON_F,
        BUTTON_G,
        BUTTON_I,
        BUTTON_H,
        BUTTON_SW1,
        BUTTON_SW2,
        BUTTON_SW3,
        BUTTON_SW4,
        BUTTON_SW5,
        BUTTON_SW6,
        BUTTON_TGL1_UP,
        BUTTON_TGL1_DOWN,
        BUTTON_TGL2_UP,
        BUTTON_TGL2_DOWN,
        BUTTON_TGL3_UP,
        BUTTON_TGL3_DOWN,
        BUTTON_TGL4_UP,
        BUTTON_TGL4_DOWN,
        BUTTON_H3_UP,
        BUTTON_H3_RIGHT,
        BUTTON_H3_DOWN,
        BUTTON_H3_LEFT,
        BUTTON_H4_UP,
        BUTTON_H4_RIGHT,
        BUTTON_H4_DOWN,
        BUTTON_H4_LEFT,
        BUTTON_K1_UP,
        BUTTON_K1_DOWN,
        BUTTON_SCROLL_DOWN,
        BUTTON_SCROLL_UP,
        BUTTON_THUMB,
        BUTTON_SLD,
        BUTTON_MODE_M1,
        BUTTON_MODE_M2,
        BUTTON_MODE_S1,
    ];

    fn axes(&self) -> Vec<(u16, i32)> {
        vec![
            (AXIS_L, i32::from(self.throttle_l)),
            (AXIS_R, i32::from(self.throttle_r)),
            (AXIS_F, i32::from(self.f_axis)),
            (AXIS_TX, i32::from(self.thumb_x)),
            (AXIS_TY, i32::from(self.thumb_y)),
            (AXIS_G, i32::from(self.g_axis)),
            (AXIS_RTY4, i32::from(self.rty4)),
            (AXIS_RTY3, i32::from(self.rty3)),
        ]
    }

    fn buttons(&self) -> Vec<(u16, bool)> {
        vec![
            (BUTTON_E, self.e),
            (BUTTON_F, self.f),
            (BUTTON_G, self.g),
            (BUTTON_I, self.i),
            (BUTTON_H, self.h),
            (BUTTON_SW1, self.sw1),
            (BUTTON_SW2, self.sw2),
            (BUTTON_SW3, self.sw3),
            (BUTTON_SW4, self.sw4),
            (BUTTON_SW5, self.sw5),
            (BUTTON_SW6, self.sw6),
            (BUTTON_TGL1_UP, self.tgl1_up),
            (BUTTON_TGL1_DOWN, self.tgl1_down),
            (BUTTON_TGL2_UP, self.tgl2_up),
            (BUTTON_TGL2_DOWN, self.tgl2_down),
            (BUTTON_TGL3_UP, self.tgl3_up),
            (BUTTON_TGL3_DOWN, self.tgl3_down),
            (BUTTON_TGL4_UP, self.tgl4_up),
            (BUTTON_TGL4_DOWN, self.tgl4_down),
            (BUTTON_H3_UP, self.h3.up),
            (BUTTON_H3_RIGHT, self.h3.right),
            (BUTTON_H3_DOWN, self.h3.down),
            (BUTTON_H3_LEFT, self.h3.left),
            (BUTTON_H4_UP, self.h4.up),
            (BUTTON_H4_RIGHT, self.h4.right),
            (BUTTON_H4_DOWN, self.h4.down),
            (BUTTON_H4_LEFT, self.h4.left),
            (BUTTON_K1_UP, self.k1_up),
            (BUTTON_K1_DOWN, self.k1_down),
            (BUTTON_SCROLL_DOWN, self.scroll_down),
            (BUTTON_SCROLL_UP, self.scroll_up),
            (BUTTON_THUMB, self.thumb),
            (BUTTON_SLD, self.sld),
            (BUTTON_MODE_M1, self.mode == Some(Mode::M1)),
            (BUTTON_MODE_M2, self.mode == Some(Mode::M2)),
            (BUTTON_MODE_S1, self.mode == Some(Mode::S1)),
        ]
    }
}
