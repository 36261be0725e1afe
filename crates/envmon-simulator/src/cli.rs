use std::path::PathBuf;
use std::time::Duration;

use envmon_core::sensors::{HardwareProfile, UnitKind};
use thiserror_no_std::Error;

/// Default length of a simulated run.
const DEFAULT_RUN_SECS: u64 = 10;

/// Default snapshot file for the last frame.
const DEFAULT_OUTPUT: &str = "envmon-frame.png";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CliError {
    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Options for a simulated run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOptions {
    pub profile: HardwareProfile,
    /// Unit whose registration is made to fail.
    pub fail_register: Option<UnitKind>,
    pub fail_begin: bool,
    /// Simulated time to run for.
    pub run_for: Duration,
    /// Simulated time at which the power button is held.
    pub hold_at: Option<Duration>,
    pub output: PathBuf,
    /// Pace the simulation against the wall clock.
    pub realtime: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            profile: HardwareProfile::default(),
            fail_register: None,
            fail_begin: false,
            run_for: Duration::from_secs(DEFAULT_RUN_SECS),
            hold_at: None,
            output: PathBuf::from(DEFAULT_OUTPUT),
            realtime: false,
        }
    }
}

/// Parsed command-line intent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Run(RunOptions),
    ShowHelp,
}

impl Command {
    pub fn parse(args: &[String]) -> Result<Self, CliError> {
        let mut opts = RunOptions::default();
        let mut iter = args.iter();

        while let Some(flag) = iter.next() {
            match flag.as_str() {
                "-h" | "--help" => return Ok(Command::ShowHelp),
                "--profile" => {
                    let raw = take_value(flag, &mut iter)?;
                    opts.profile = raw
                        .parse()
                        .map_err(|e| CliError::InvalidArgs(format!("{e}: '{raw}'")))?;
                }
                "--fail-register" => {
                    let raw = take_value(flag, &mut iter)?;
                    opts.fail_register = Some(parse_unit(&raw)?);
                }
                "--fail-begin" => opts.fail_begin = true,
                "--run-secs" => {
                    let secs = parse_number(flag, &take_value(flag, &mut iter)?)?;
                    opts.run_for = Duration::from_secs(secs);
                }
                "--hold-at" => {
                    let ms = parse_number(flag, &take_value(flag, &mut iter)?)?;
                    opts.hold_at = Some(Duration::from_millis(ms));
                }
                "--output" => opts.output = PathBuf::from(take_value(flag, &mut iter)?),
                "--realtime" => opts.realtime = true,
                other => {
                    return Err(CliError::InvalidArgs(format!(
                        "unknown flag '{other}', try --help"
                    )));
                }
            }
        }

        Ok(Command::Run(opts))
    }

    pub fn help() -> &'static str {
        concat!(
            "envmon-simulator - run the monitor loop against synthetic sensors\n",
            "\n",
            "USAGE:\n",
            "  envmon-simulator [OPTIONS]\n",
            "\n",
            "OPTIONS:\n",
            "  --profile <env-iv|discrete>   Hardware profile (default: env-iv)\n",
            "  --fail-register <unit>        Fail registration of env4, sht40 or bmp280\n",
            "  --fail-begin                  Fail sensor bring-up\n",
            "  --run-secs <number>           Simulated seconds to run (default: 10)\n",
            "  --hold-at <ms>                Hold the power button at this simulated time\n",
            "  --output <path>               PNG snapshot of the last frame (default: envmon-frame.png)\n",
            "  --realtime                    Sleep for simulated pauses\n",
            "  -h, --help                    Show this help\n",
        )
    }
}

fn parse_unit(raw: &str) -> Result<UnitKind, CliError> {
    [UnitKind::EnvIv, UnitKind::Sht40, UnitKind::Bmp280]
        .into_iter()
        .find(|unit| unit.name().eq_ignore_ascii_case(raw))
        .ok_or_else(|| {
            CliError::InvalidArgs(format!("unknown unit '{raw}' (expected env4, sht40 or bmp280)"))
        })
}

fn parse_number(flag: &str, raw: &str) -> Result<u64, CliError> {
    raw.parse()
        .map_err(|_| CliError::InvalidArgs(format!("{flag} must be a positive integer")))
}

fn take_value(flag: &str, iter: &mut std::slice::Iter<String>) -> Result<String, CliError> {
    iter.next()
        .cloned()
        .ok_or_else(|| CliError::InvalidArgs(format!("expected a value after {flag}")))
}
