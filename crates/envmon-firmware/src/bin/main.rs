#![no_std]
#![no_main]
#![deny(
    clippy::mem_forget,
    reason = "mem::forget is generally not safe to do with esp_hal types, especially those \
    holding buffers for the duration of a data transfer."
)]
#![deny(clippy::large_stack_frames)]

use embassy_executor::Spawner;
use embassy_time::{Delay, Duration, Timer};
use esp_hal::clock::CpuClock;
use esp_hal::timer::timg::TimerGroup;
use log::{error, info, warn};

use envmon_core::app_state::{InitError, Monitor, MonitorParts, SystemState};
use envmon_core::config::MonitorConfig;
use envmon_core::sensors::HardwareProfile;
use envmon_firmware::board::display::{DisplayPins, init_screen};
use envmon_firmware::board::sensors::I2cSensorHub;
use envmon_firmware::board::{EmbassyClock, init_internal_bus, init_port_a};

/// Pause between loop iterations.
const LOOP_PERIOD: Duration = Duration::from_millis(10);

#[panic_handler]
fn panic(info: &core::panic::PanicInfo) -> ! {
    rtt_target::rprintln!("PANIC: {}", info);
    loop {}
}

extern crate alloc;

// This creates a default app-descriptor required by the esp-idf bootloader.
// For more information see: <https://docs.espressif.com/projects/esp-idf/en/stable/esp32/api-reference/system/app_image_format.html#application-description>
esp_bootloader_esp_idf::esp_app_desc!();

/// Profile baked in by build.rs, falling back to the default.
fn configured_profile() -> HardwareProfile {
    match option_env!("ENVMON_PROFILE") {
        Some(raw) => raw.parse().unwrap_or_else(|e| {
            warn!("ENVMON_PROFILE={}: {}", raw, e);
            HardwareProfile::default()
        }),
        None => HardwareProfile::default(),
    }
}

#[allow(
    clippy::large_stack_frames,
    reason = "it's not unusual to allocate larger buffers etc. in main"
)]
#[esp_rtos::main]
async fn main(_spawner: Spawner) -> ! {
    rtt_target::rtt_init_log!();

    let config = esp_hal::Config::default().with_cpu_clock(CpuClock::max());
    let peripherals = esp_hal::init(config);

    esp_alloc::heap_allocator!(#[esp_hal::ram(reclaimed)] size: 73744);

    let timg0 = TimerGroup::new(peripherals.TIMG0);
    esp_rtos::start(timg0.timer0);
    info!("Embassy initialized");

    let (button, power) =
        match init_internal_bus(peripherals.I2C0, peripherals.GPIO12, peripherals.GPIO11).await {
            Ok(parts) => parts,
            Err(e) => panic!("Internal I2C bus: {:?}", e),
        };

    let screen = match init_screen(DisplayPins {
        spi: peripherals.SPI2,
        sck: peripherals.GPIO36,
        mosi: peripherals.GPIO37,
        cs: peripherals.GPIO35,
        dc: peripherals.GPIO34,
    }) {
        Ok(screen) => screen,
        Err(e) => panic!("Display: {}", e),
    };
    info!("Display initialized");

    let (hub, bus_error) =
        match init_port_a(peripherals.I2C1, peripherals.GPIO2, peripherals.GPIO1) {
            Ok(bus) => (I2cSensorHub::new(bus), None),
            Err(e) => {
                error!("Port A I2C bus: {:?}", e);
                (I2cSensorHub::detached(), Some(InitError::Bus))
            }
        };

    let config = MonitorConfig::for_profile(configured_profile());
    let parts = MonitorParts {
        hub,
        renderer: screen,
        button,
        power,
        clock: EmbassyClock,
        delay: Delay,
    };

    let mut monitor = match bus_error {
        Some(e) => Monitor::halted(config, parts, e),
        None => Monitor::setup(config, parts).await,
    };

    let mut last_state = monitor.state();
    loop {
        let state = monitor.tick().await;
        if state != last_state {
            match state {
                SystemState::ShuttingDown => error!("Power-off request returned"),
                other => info!("State: {:?}", other),
            }
            last_state = state;
        }
        Timer::after(LOOP_PERIOD).await;
    }
}
