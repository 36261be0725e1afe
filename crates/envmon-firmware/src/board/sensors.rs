//! Sensor hub for the SHT40 and BMP280 on port A

use bme280_rs::{AsyncBme280, Configuration, Filter, Oversampling, SensorMode, StandbyTime};
use embassy_embedded_hal::shared_bus::asynch::i2c::I2cDevice;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;
use embassy_time::{Delay, Duration, Instant};
use embedded_hal_async::i2c::I2c;
use envmon_core::sensors::{LatchedSensor, Quantity, SensorError, SensorHub, UnitKind};
use heapless::Vec;
use log::{debug, error, info, warn};
use sht4x::{Precision, Sht4xAsync};

pub const SHT40_ADDRESS: u8 = 0x44;
pub const BMP280_ADDRESS: u8 = 0x76;

/// SHT40 high-repeatability measurements, once per second.
const CLIMATE_PERIOD: Duration = Duration::from_secs(1);

/// BMP280 normal mode standby.
const PRESSURE_PERIOD: Duration = Duration::from_millis(500);

const MAX_UNITS: usize = 2;

type Sht40<'a, M, BUS> = Sht4xAsync<I2cDevice<'a, M, BUS>, Delay>;
type Bmp280<'a, M, BUS> = AsyncBme280<I2cDevice<'a, M, BUS>, Delay>;

/// [`SensorHub`] over one shared I2C bus.
///
/// Registration checks that the unit's addresses acknowledge. Drivers are
/// created and configured in [`begin_all`](SensorHub::begin_all), each with
/// its own device handle on the bus. Conversions happen in
/// [`poll`](SensorHub::poll) once the chip's cadence has elapsed.
pub struct I2cSensorHub<'a, M: RawMutex + 'static, BUS: I2c + 'static> {
    /// `None` when the bus could not be opened; every registration fails.
    bus: Option<&'a Mutex<M, BUS>>,
    registered: Vec<UnitKind, MAX_UNITS>,
    sht40: Option<Sht40<'a, M, BUS>>,
    bmp280: Option<Bmp280<'a, M, BUS>>,
    channels: [LatchedSensor; 3],
    next_climate: Instant,
    next_pressure: Instant,
}

impl<'a, M, BUS> I2cSensorHub<'a, M, BUS>
where
    M: RawMutex + 'static,
    BUS: I2c + 'static,
{
    pub fn new(bus: &'a Mutex<M, BUS>) -> Self {
        Self::with_bus(Some(bus))
    }

    /// A hub with no bus behind it.
    pub fn detached() -> Self {
        Self::with_bus(None)
    }

    fn with_bus(bus: Option<&'a Mutex<M, BUS>>) -> Self {
        Self {
            bus,
            registered: Vec::new(),
            sht40: None,
            bmp280: None,
            channels: [LatchedSensor::new(); 3],
            next_climate: Instant::MIN,
            next_pressure: Instant::MIN,
        }
    }

    fn needs(&self, quantity: Quantity) -> bool {
        self.registered.iter().any(|unit| unit.provides(quantity))
    }

    fn index(quantity: Quantity) -> usize {
        match quantity {
            Quantity::Humidity => 0,
            Quantity::Temperature => 1,
            Quantity::Pressure => 2,
        }
    }

    fn device(&self, sensor: &'static str) -> Result<I2cDevice<'a, M, BUS>, SensorError> {
        self.bus
            .map(I2cDevice::new)
            .ok_or(SensorError::InitializationFailed {
                sensor,
                details: "no I2C bus",
            })
    }

    /// Zero-length write; only a present chip acknowledges its address.
    async fn acknowledges(&self, address: u8) -> bool {
        match self.bus {
            Some(bus) => I2cDevice::new(bus).write(address, &[]).await.is_ok(),
            None => false,
        }
    }

    async fn begin_sht40(&mut self) -> Result<Sht40<'a, M, BUS>, SensorError> {
        let mut sensor = Sht4xAsync::<_, Delay>::new(self.device("SHT40")?);
        let serial = sensor.serial_number(&mut Delay).await.map_err(|e| {
            error!("SHT40 serial read failed: {:?}", e);
            SensorError::InitializationFailed {
                sensor: "SHT40",
                details: "no response to serial number request",
            }
        })?;
        info!("SHT40 ready (serial {:#010x})", serial);
        Ok(sensor)
    }

    async fn begin_bmp280(&mut self) -> Result<Bmp280<'a, M, BUS>, SensorError> {
        let i2c = self.device("BMP280")?;
        let mut sensor = AsyncBme280::new_with_address(i2c, BMP280_ADDRESS, Delay);
        sensor.init().await.map_err(|e| {
            error!("BMP280 initialization failed: {:?}", e);
            SensorError::InitializationFailed {
                sensor: "BMP280",
                details: "chip did not initialize",
            }
        })?;

        let config = Configuration::default()
            .with_temperature_oversampling(Oversampling::Oversample2)
            .with_pressure_oversampling(Oversampling::Oversample16)
            .with_filter(Filter::Filter16)
            .with_standby_time(StandbyTime::Millis500)
            .with_sensor_mode(SensorMode::Normal);
        sensor
            .set_sampling_configuration(config)
            .await
            .map_err(|e| {
                error!("BMP280 configuration failed: {:?}", e);
                SensorError::InitializationFailed {
                    sensor: "BMP280",
                    details: "sampling configuration rejected",
                }
            })?;

        info!("BMP280 ready");
        Ok(sensor)
    }

    async fn poll_climate(&mut self) -> Result<(), SensorError> {
        let Some(sensor) = self.sht40.as_mut() else {
            return Ok(());
        };

        let measurement = sensor
            .measure(Precision::High, &mut Delay)
            .await
            .map_err(|e| {
                warn!("SHT40 measurement failed: {:?}", e);
                SensorError::ReadFailed {
                    sensor: "SHT40",
                    operation: "measure temperature/humidity",
                }
            })?;

        let temperature = measurement.temperature_celsius().to_num::<f32>();
        let humidity = measurement.humidity_percent().to_num::<f32>();
        self.channels[Self::index(Quantity::Temperature)].publish(temperature);
        self.channels[Self::index(Quantity::Humidity)].publish(humidity);
        Ok(())
    }

    async fn poll_pressure(&mut self) -> Result<(), SensorError> {
        let Some(sensor) = self.bmp280.as_mut() else {
            return Ok(());
        };

        let pressure = sensor.read_pressure().await.map_err(|e| {
            warn!("BMP280 pressure read failed: {:?}", e);
            SensorError::ReadFailed {
                sensor: "BMP280",
                operation: "read pressure",
            }
        })?;

        // `None` until the first conversion has finished
        if let Some(pa) = pressure {
            self.channels[Self::index(Quantity::Pressure)].publish(pa);
        }
        Ok(())
    }
}

impl<'a, M, BUS> SensorHub for I2cSensorHub<'a, M, BUS>
where
    M: RawMutex + 'static,
    BUS: I2c + 'static,
{
    type Channel = LatchedSensor;

    async fn register(&mut self, unit: UnitKind) -> bool {
        if self.registered.contains(&unit) {
            warn!("{}", SensorError::AlreadyRegistered { sensor: unit.name() });
            return false;
        }

        if self.bus.is_none() {
            warn!("{}: no I2C bus", unit.name());
            return false;
        }

        let mut addresses: Vec<u8, 2> = Vec::new();
        if unit.provides(Quantity::Humidity) {
            let _ = addresses.push(SHT40_ADDRESS);
        }
        if unit.provides(Quantity::Pressure) {
            let _ = addresses.push(BMP280_ADDRESS);
        }

        for address in addresses {
            if !self.acknowledges(address).await {
                warn!("{}: no device at {:#04x}", unit.name(), address);
                return false;
            }
        }

        debug!("{}: present", unit.name());
        self.registered.push(unit).is_ok()
    }

    async fn begin_all(&mut self) -> bool {
        if self.registered.is_empty() {
            return false;
        }

        if self.needs(Quantity::Humidity) {
            match self.begin_sht40().await {
                Ok(sensor) => self.sht40 = Some(sensor),
                Err(e) => {
                    error!("{}", e);
                    return false;
                }
            }
        }

        if self.needs(Quantity::Pressure) {
            match self.begin_bmp280().await {
                Ok(sensor) => self.bmp280 = Some(sensor),
                Err(e) => {
                    error!("{}", e);
                    return false;
                }
            }
        }

        true
    }

    async fn poll(&mut self) {
        for channel in &mut self.channels {
            channel.begin_poll();
        }

        let now = Instant::now();
        if now >= self.next_climate {
            self.next_climate = now + CLIMATE_PERIOD;
            if let Err(e) = self.poll_climate().await {
                debug!("{}", e);
            }
        }
        if now >= self.next_pressure {
            self.next_pressure = now + PRESSURE_PERIOD;
            if let Err(e) = self.poll_pressure().await {
                debug!("{}", e);
            }
        }
    }

    fn channel(&mut self, quantity: Quantity) -> &mut LatchedSensor {
        &mut self.channels[Self::index(quantity)]
    }
}
