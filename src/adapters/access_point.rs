//! Open soft access point, toggled from the menu.
//!
//! The AP exists so a phone can reach the status interface in the
//! field. It is configured once at boot and started/stopped on demand;
//! it never persists across restarts.

use anyhow::{anyhow, Result};
use esp_idf_hal::modem::Modem;
use esp_idf_svc::eventloop::EspSystemEventLoop;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use esp_idf_svc::wifi::{AccessPointConfiguration, AuthMethod, Configuration, EspWifi};
use log::{info, warn};

use crate::app::ports::AccessPointPort;

const AP_SSID: &str = "co2matrix";
const AP_CHANNEL: u8 = 1;

pub struct SoftAp<'d> {
    wifi: EspWifi<'d>,
    active: bool,
}

impl SoftAp<'_> {
    pub fn new(
        modem: Modem,
        sysloop: EspSystemEventLoop,
        nvs: EspDefaultNvsPartition,
    ) -> Result<Self> {
        let mut wifi = EspWifi::new(modem, sysloop, Some(nvs))?;
        let config = AccessPointConfiguration {
            ssid: AP_SSID
                .try_into()
                .map_err(|()| anyhow!("AP SSID exceeds 32 bytes"))?,
            auth_method: AuthMethod::None,
            channel: AP_CHANNEL,
            ..Default::default()
        };
        wifi.set_configuration(&Configuration::AccessPoint(config))?;
        Ok(Self {
            wifi,
            active: false,
        })
    }
}

impl AccessPointPort for SoftAp<'_> {
    fn set_active(&mut self, active: bool) {
        let result = if active {
            self.wifi.start()
        } else {
            self.wifi.stop()
        };
        match result {
            Ok(()) => {
                self.active = active;
                info!(
                    "access point '{AP_SSID}' {}",
                    if active { "started" } else { "stopped" }
                );
            }
            Err(err) => warn!("access point toggle failed: {err}"),
        }
    }

    fn is_active(&self) -> bool {
        self.active
    }
}
