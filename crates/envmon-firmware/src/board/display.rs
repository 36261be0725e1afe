//! ILI9342C panel on SPI2

use embassy_time::Delay;
use embedded_hal_bus::spi::{ExclusiveDevice, NoDelay};
use envmon_core::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, Screen};
use esp_hal::Blocking;
use esp_hal::gpio::{Level, Output, OutputConfig};
use esp_hal::peripherals::{GPIO34, GPIO35, GPIO36, GPIO37, SPI2};
use esp_hal::spi::master::{Config, Spi};
use mipidsi::interface::SpiInterface;
use mipidsi::models::ILI9342CRgb565;
use mipidsi::{Builder as MipidsiBuilder, Display, NoResetPin};
use static_cell::StaticCell;
use thiserror_no_std::Error;

/// SPI batching buffer (larger = faster, uses more RAM).
const SPI_BUFFER_LEN: usize = 512;

type PanelSpi = ExclusiveDevice<Spi<'static, Blocking>, Output<'static>, NoDelay>;

type PanelInterface = SpiInterface<'static, PanelSpi, Output<'static>>;

pub type Panel = Display<PanelInterface, ILI9342CRgb565, NoResetPin>;

#[derive(Error, Debug)]
pub enum DisplayError {
    #[error("SPI bus configuration rejected")]
    Spi,
    #[error("chip select setup failed")]
    ChipSelect,
    #[error("panel initialization failed")]
    Panel,
}

/// Pins and peripherals wired to the panel.
pub struct DisplayPins {
    pub spi: SPI2<'static>,
    pub sck: GPIO36<'static>,
    pub mosi: GPIO37<'static>,
    pub cs: GPIO35<'static>,
    pub dc: GPIO34<'static>,
}

/// Bring the panel up and wrap it in a double-buffered [`Screen`].
pub fn init_screen(pins: DisplayPins) -> Result<Screen<Panel>, DisplayError> {
    let spi_bus = Spi::new(pins.spi, Config::default())
        .map_err(|_| DisplayError::Spi)?
        .with_sck(pins.sck)
        .with_mosi(pins.mosi);

    let cs = Output::new(pins.cs, Level::High, OutputConfig::default());
    let spi_device =
        ExclusiveDevice::new_no_delay(spi_bus, cs).map_err(|_| DisplayError::ChipSelect)?;

    let dc = Output::new(pins.dc, Level::Low, OutputConfig::default());

    static SPI_BUFFER: StaticCell<[u8; SPI_BUFFER_LEN]> = StaticCell::new();
    let buffer = SPI_BUFFER.init([0u8; SPI_BUFFER_LEN]);
    let di = SpiInterface::new(spi_device, dc, buffer);

    let panel = MipidsiBuilder::new(ILI9342CRgb565, di)
        .display_size(DISPLAY_WIDTH_PX, DISPLAY_HEIGHT_PX)
        .init(&mut Delay)
        .map_err(|_| DisplayError::Panel)?;

    Ok(Screen::new(panel))
}
