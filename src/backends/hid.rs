use crate::config::DeviceConfig;
use crate::device::ReportSource;
use crate::error::SourceError;
use hidapi::{HidApi, HidDevice};
use std::time::Duration;

/// Report source reading a physical device through `hidapi`.
pub struct HidReportSource {
    name: String,
    raw: HidDevice,
    timeout_ms: i32,
}

impl HidReportSource {
    /// Opens the first device matching the configured vendor and product id.
    pub fn open(api: &HidApi, config: &DeviceConfig) -> Result<Self, SourceError> {
        let info = api
            .device_list()
            .find(|info| {
                info.vendor_id() == config.vendor_id && info.product_id() == config.product_id
            })
            .ok_or(SourceError::DeviceNotFound {
                vendor_id: config.vendor_id,
                product_id: config.product_id,
            })?;

        let raw = info.open_device(api)?;
        let name = info.product_string().unwrap_or("Unknown").to_string();
        tracing::info!(
            vendor_id = config.vendor_id,
            product_id = config.product_id,
            name = %name,
            "device connected"
        );

        Ok(Self {
            name,
            raw,
            timeout_ms: timeout_ms(config.read_timeout()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl ReportSource for HidReportSource {
    /// Blocks for at most the configured timeout; `Ok(0)` when nothing arrived.
    fn read_report(&mut self, buf: &mut [u8]) -> Result<usize, SourceError> {
        Ok(self.raw.read_timeout(buf, self.timeout_ms)?)
    }
}

/// `hidapi` takes a signed millisecond count; saturate rather than wrap.
fn timeout_ms(timeout: Duration) -> i32 {
    i32::try_from(timeout.as_millis()).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_saturates() {
        assert_eq!(timeout_ms(Duration::from_millis(100)), 100);
        assert_eq!(timeout_ms(Duration::from_secs(u64::MAX)), i32::MAX);
    }
}
