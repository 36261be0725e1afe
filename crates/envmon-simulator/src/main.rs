//! Desktop simulator for the envmon handheld environment monitor.
//!
//! Runs the envmon-core monitor loop against synthetic sensors on virtual
//! time and writes the last frame to a PNG. Bring-up failures and the power
//! button can be scripted from the command line, see `--help`.

mod board;
mod cli;

use std::process::ExitCode;
use std::time::Duration;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay};
use embedded_hal_async::delay::DelayNs;
use log::{error, info};
use thiserror_no_std::Error;

use envmon_core::app_state::{Monitor, MonitorParts, SystemState};
use envmon_core::config::MonitorConfig;
use envmon_core::time::Clock;
use envmon_core::ui::{DISPLAY_HEIGHT_PX, DISPLAY_WIDTH_PX, Screen};

use board::{ScriptedButton, SimDelay, SimPower, SyntheticHub, VirtualTime};
use cli::{CliError, Command, RunOptions};

/// Pixel scale factor for the PNG snapshot.
const SNAPSHOT_SCALE: u32 = 2;

/// Pause between loop iterations, matching the firmware's tick.
const LOOP_PERIOD_MS: u32 = 10;

/// Interval between reading reports in the log.
const REPORT_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Error, Debug)]
enum SimError {
    #[error(transparent)]
    Cli(#[from] CliError),
    #[error("failed to write snapshot: {0}")]
    Snapshot(String),
}

/// What happened during a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct RunSummary {
    state: SystemState,
    elapsed: Duration,
    powered_off_at: Option<Duration>,
}

type SimMonitor = Monitor<
    SyntheticHub,
    Screen<SimulatorDisplay<Rgb565>>,
    ScriptedButton,
    SimPower,
    VirtualTime,
    SimDelay,
>;

async fn boot(opts: &RunOptions, time: &VirtualTime) -> SimMonitor {
    let hub = SyntheticHub::new(time.clone(), opts.profile)
        .fail_register(opts.fail_register)
        .fail_begin(opts.fail_begin);
    let display = SimulatorDisplay::<Rgb565>::new(Size::new(
        u32::from(DISPLAY_WIDTH_PX),
        u32::from(DISPLAY_HEIGHT_PX),
    ));

    let parts = MonitorParts {
        hub,
        renderer: Screen::new(display),
        button: ScriptedButton::new(time.clone(), opts.hold_at),
        power: SimPower::new(time.clone()),
        clock: time.clone(),
        delay: SimDelay::new(time.clone(), opts.realtime),
    };

    Monitor::setup(MonitorConfig::for_profile(opts.profile), parts).await
}

/// Tick `monitor` until the run time is used up or it shuts down.
async fn run_loop(monitor: &mut SimMonitor, opts: &RunOptions, time: &VirtualTime) -> RunSummary {
    let mut pacer = SimDelay::new(time.clone(), opts.realtime);
    let mut next_report = time.now();

    let state = loop {
        if time.now() >= opts.run_for {
            break monitor.state();
        }

        match monitor.tick().await {
            SystemState::Running => {}
            SystemState::ShuttingDown => break SystemState::ShuttingDown,
            // The tick itself idled
            SystemState::Halted => continue,
        }

        if time.now() >= next_report {
            let readings = monitor.readings();
            info!(
                "t={} ms humidity={:.1} % temperature={:.1} C pressure={:.1} hPa",
                time.now().as_millis(),
                readings.humidity.value(),
                readings.temperature.value(),
                readings.pressure.value(),
            );
            next_report += REPORT_INTERVAL;
        }

        pacer.delay_ms(LOOP_PERIOD_MS).await;
    };

    RunSummary {
        state,
        elapsed: time.now(),
        powered_off_at: monitor.shutdown().power().off_at(),
    }
}

fn run(opts: RunOptions) -> Result<RunSummary, SimError> {
    info!(
        "Simulating {} for {} s",
        opts.profile,
        opts.run_for.as_secs()
    );

    let time = VirtualTime::new();
    let (monitor, summary) = embassy_futures::block_on(async {
        let mut monitor = boot(&opts, &time).await;
        let summary = run_loop(&mut monitor, &opts, &time).await;
        (monitor, summary)
    });

    info!("Registered units: {:?}", monitor.hub().registered());
    if let Some(message) = monitor.halt_message() {
        info!("Halted: {}", message);
    }

    let display = monitor.into_parts().renderer.into_display();
    let output_settings = OutputSettingsBuilder::new().scale(SNAPSHOT_SCALE).build();
    display
        .to_rgb_output_image(&output_settings)
        .save_png(&opts.output)
        .map_err(|e| SimError::Snapshot(e.to_string()))?;
    info!("Last frame written to {}", opts.output.display());

    Ok(summary)
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = Command::parse(&args)
        .map_err(SimError::from)
        .and_then(|command| match command {
            Command::ShowHelp => {
                println!("{}", Command::help());
                Ok(None)
            }
            Command::Run(opts) => run(opts).map(Some),
        });

    match result {
        Ok(Some(summary)) => {
            info!(
                "Finished in state {:?} after {} ms",
                summary.state,
                summary.elapsed.as_millis()
            );
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
