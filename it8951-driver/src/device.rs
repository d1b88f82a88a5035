//! Device lifecycle
//!
//! [`It8951`] owns the transport for the whole session. It is created by
//! [`It8951::initialize`] and released by [`It8951::shutdown`] or by being
//! dropped, so every exit path, including a failed initialization, leaves
//! chip-select and reset low.

use it8951_hal::{Delay, InputPin, OutputPin, SpiBus};
use it8951_protocol::register::{I80CPCR, I80CPCR_PACKED_WRITE};
use it8951_protocol::{
    AreaImageInfo, Command, DeviceInfo, DisplayMode, Vcom, VcomCommand, DEVICE_INFO_WORDS,
};

use crate::bus::{Bus, Pins};
use crate::config::DriverConfig;
use crate::error::Result;

/// An open IT8951 session
pub struct It8951<SPI, CS, RST, BUSY, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
    D: Delay,
{
    pub(crate) bus: Bus<SPI, CS, RST, BUSY, D>,
    pub(crate) config: DriverConfig,
    info: DeviceInfo,
    fast_mode: DisplayMode,
}

impl<SPI, CS, RST, BUSY, D> It8951<SPI, CS, RST, BUSY, D>
where
    SPI: SpiBus,
    CS: OutputPin,
    RST: OutputPin,
    BUSY: InputPin,
    D: Delay,
{
    /// Open the transport and bring the controller up
    ///
    /// Resets the chip, switches it to run mode, reads the device
    /// information, picks the panel's fast waveform, enables packed pixel
    /// writes and programs `vcom` unless the controller already holds it.
    pub fn initialize(
        pins: Pins<SPI, CS, RST, BUSY, D>,
        config: DriverConfig,
        vcom: Vcom,
    ) -> Result<Self, SPI::Error> {
        let bus = Bus::open(pins, &config)?;
        let mut epd = Self {
            bus,
            config,
            info: DeviceInfo::default(),
            fast_mode: DisplayMode::A2,
        };

        epd.bus.reset();
        epd.system_run()?;

        epd.info = epd.get_system_info()?;
        epd.fast_mode = DisplayMode::fast_for_lut(epd.info.lut_version_str().as_str());
        info!(
            "panel {}x{}, buffer at {:x}, fast mode {}",
            epd.info.panel_width,
            epd.info.panel_height,
            epd.info.target_address(),
            epd.fast_mode.as_u16()
        );

        epd.write_register(I80CPCR, I80CPCR_PACKED_WRITE)?;
        epd.bus.wait_ready()?;

        if epd.read_vcom()? != vcom {
            epd.write_vcom(vcom)?;
            info!("VCOM = -{} mV", epd.read_vcom()?.millivolts());
        }
        Ok(epd)
    }

    /// Release chip-select and reset
    pub fn shutdown(self) {
        info!("shutdown");
        self.bus.release();
    }

    /// Device information read at initialization
    pub fn device_info(&self) -> &DeviceInfo {
        &self.info
    }

    /// Fast no-flash waveform of this panel
    pub fn fast_mode(&self) -> DisplayMode {
        self.fast_mode
    }

    /// Active configuration
    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// The whole panel as an area
    pub fn full_area(&self) -> AreaImageInfo {
        AreaImageInfo::full(self.info.panel_width, self.info.panel_height)
    }

    /// Switch to run mode
    pub fn system_run(&mut self) -> Result<(), SPI::Error> {
        info!("system run");
        self.bus.write_command(Command::SysRun)
    }

    /// Switch to standby
    pub fn standby(&mut self) -> Result<(), SPI::Error> {
        info!("standby");
        self.bus.write_command(Command::Standby)
    }

    /// Switch to sleep
    pub fn sleep(&mut self) -> Result<(), SPI::Error> {
        info!("sleep");
        self.bus.write_command(Command::Sleep)
    }

    /// Query the device information block
    pub fn get_system_info(&mut self) -> Result<DeviceInfo, SPI::Error> {
        self.bus.write_command(Command::GetDeviceInfo)?;
        let mut words = [0u16; DEVICE_INFO_WORDS];
        self.bus.read_data_buffer(&mut words)?;
        let info = DeviceInfo::from_words(&words)?;
        debug!("device info {}x{}", info.panel_width, info.panel_height);
        Ok(info)
    }

    /// Read the programmed VCOM
    pub fn read_vcom(&mut self) -> Result<Vcom, SPI::Error> {
        self.bus.write_command(Command::Vcom)?;
        self.bus.write_data(VcomCommand::Get.as_u16())?;
        let vcom = Vcom(self.bus.read_data()?);
        debug!("read VCOM {}", vcom.millivolts());
        Ok(vcom)
    }

    /// Program VCOM
    pub fn write_vcom(&mut self, vcom: Vcom) -> Result<(), SPI::Error> {
        info!("set VCOM {}", vcom.millivolts());
        self.bus.write_command(Command::Vcom)?;
        self.bus.write_data(VcomCommand::Set.as_u16())?;
        self.bus.write_data(vcom.millivolts())
    }
}
