//! Device classes and the report source seam.
//!
//! Each physical peripheral of the HOTAS is a [`DeviceClass`]. Raw input reports
//! reach the decoders through a [`ReportSource`], which backends implement
//! (hidapi in `backends::hid`, recorded reports in `backends::virtual_input`).

use crate::error::{DecodeError, SourceError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of one input report for both the throttle and the stick.
pub const REPORT_LEN: usize = 13;

/// USB vendor id shared by both X-56 Rhino units.
pub const VENDOR_ID: u16 = 0x0738;

/// The two independent peripherals of the HOTAS.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceClass {
    Throttle,
    Stick,
}

impl DeviceClass {
    /// USB product id of the real device.
    pub const fn product_id(self) -> u16 {
        match self {
            DeviceClass::Throttle => 0xa221,
            DeviceClass::Stick => 0x2221,
        }
    }

    /// Name the virtual (emulated) device is created with.
    pub const fn emulated_name(self) -> &'static str {
        match self {
            DeviceClass::Throttle => "Mad Catz Saitek Pro Flight X-56 Rhino Throttle (emulated)",
            DeviceClass::Stick => "Mad Catz Saitek Pro Flight X-56 Rhino Stick (emulated)",
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            DeviceClass::Throttle => "throttle",
            DeviceClass::Stick => "stick",
        }
    }
}

impl fmt::Display for DeviceClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Blocking producer of raw input reports, in arrival order.
///
/// `read_report` fills `buf` with the next report and returns its length.
/// `Ok(0)` means nothing arrived before the source's own timeout; the caller
/// simply tries again. [`SourceError::Closed`] ends the stream for good.
pub trait ReportSource {
    fn read_report(&mut self, buf: &mut [u8]) -> Result<usize, SourceError>;
}

impl<T: ReportSource + ?Sized> ReportSource for Box<T> {
    fn read_report(&mut self, buf: &mut [u8]) -> Result<usize, SourceError> {
        (**self).read_report(buf)
    }
}

/// A complete snapshot type that can be produced from one raw report.
///
/// `previous` is the currently committed snapshot. Decoders only consult it for
/// fields the wire format does not always carry (the throttle's mode switch).
pub trait Decode: Copy + Default + Send + Sync + 'static {
    const DEVICE: DeviceClass;

    fn decode(report: &[u8], previous: &Self) -> Result<Self, DecodeError>;
}

/// Borrows the fixed-size head of `report`, ignoring trailing bytes.
pub(crate) fn fixed_report(
    device: DeviceClass,
    report: &[u8],
) -> Result<&[u8; REPORT_LEN], DecodeError> {
    report
        .get(..REPORT_LEN)
        .and_then(|head| head.try_into().ok())
        .ok_or(DecodeError::ShortReport {
            device,
            expected: REPORT_LEN,
            actual: report.len(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_report_rejects_short_input() {
        let err = fixed_report(DeviceClass::Stick, &[0u8; 12]).unwrap_err();
        assert_eq!(
            err,
            DecodeError::ShortReport {
                device: DeviceClass::Stick,
                expected: 13,
                actual: 12
            }
        );
    }

    #[test]
    fn fixed_report_ignores_trailing_bytes() {
        let mut buf = [0u8; 64];
        buf[12] = 0xAB;
        buf[13] = 0xCD;
        let head = fixed_report(DeviceClass::Throttle, &buf).unwrap();
        assert_eq!(head.len(), REPORT_LEN);
        assert_eq!(head[12], 0xAB);
    }

    #[test]
    fn product_ids_match_hardware() {
        assert_eq!(DeviceClass::Throttle.product_id(), 0xa221);
        assert_eq!(DeviceClass::Stick.product_id(), 0x2221);
        assert_eq!(DeviceClass::Stick.to_string(), "stick");
    }
}
