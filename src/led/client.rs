use log::{info, warn};
use std::time::Duration;

use crate::config::{LedConfig, LedEndpointStyle};
use crate::error::{Error, Result};

pub fn led_url(base: &str, style: LedEndpointStyle, on: bool) -> String {
    let base = base.trim_end_matches('/');
    match style {
        LedEndpointStyle::Paths => {
            format!("{}/{}", base, if on { "led-on" } else { "led-off" })
        }
        LedEndpointStyle::FlashControl => {
            format!("{}/control?var=flash_led&val={}", base, if on { 1 } else { 0 })
        }
    }
}

/// Remote LED switched with plain GET requests.
pub struct LedClient {
    base_url: Option<String>,
    style: LedEndpointStyle,
    http: reqwest::blocking::Client,
    on: bool,
}

impl LedClient {
    pub fn new(config: &LedConfig) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()?;
        Ok(Self {
            base_url: config.base_url.clone(),
            style: config.endpoint,
            http,
            on: false,
        })
    }

    pub fn is_configured(&self) -> bool {
        self.base_url.is_some()
    }

    pub fn is_on(&self) -> bool {
        self.on
    }

    /// The local state only changes after the device accepted the request.
    pub fn set(&mut self, on: bool) -> Result<()> {
        let base = self.base_url.as_deref().ok_or(Error::LedNotConfigured)?;
        let url = led_url(base, self.style, on);
        let resp = self.http.get(&url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(Error::LedStatus {
                url,
                status: status.as_u16(),
            });
        }
        self.on = on;
        info!("[LedClient::set] led {}", if on { "on" } else { "off" });
        Ok(())
    }

    pub fn toggle(&mut self) -> Result<()> {
        self.set(!self.on)
    }

    /// Best-effort switch-off on exit; failures are only logged.
    pub fn shutdown(&mut self) {
        if !self.is_configured() {
            return;
        }
        if let Err(e) = self.set(false) {
            warn!("[LedClient::shutdown] turning led off failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_style_urls() {
        assert_eq!(
            led_url("http://192.168.4.1/", LedEndpointStyle::Paths, true),
            "http://192.168.4.1/led-on"
        );
        assert_eq!(
            led_url("http://192.168.4.1", LedEndpointStyle::Paths, false),
            "http://192.168.4.1/led-off"
        );
    }

    #[test]
    fn flash_control_urls() {
        assert_eq!(
            led_url("http://10.0.0.7", LedEndpointStyle::FlashControl, true),
            "http://10.0.0.7/control?var=flash_led&val=1"
        );
        assert_eq!(
            led_url("http://10.0.0.7", LedEndpointStyle::FlashControl, false),
            "http://10.0.0.7/control?var=flash_led&val=0"
        );
    }

    #[test]
    fn unconfigured_client_refuses() {
        let mut led = LedClient::new(&LedConfig::default()).unwrap();
        assert!(matches!(led.set(true), Err(Error::LedNotConfigured)));
        assert!(!led.is_on());
        led.shutdown();
    }
}
