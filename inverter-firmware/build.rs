//! Build script for inverter-firmware
//!
//! - Sets up linker search paths for memory.x
//! - Validates watchapp.toml and generates `watchapp_config.rs`
//! - Records the build time as the wall-clock base

use std::env;
use std::fmt;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Deserialize;

fn main() {
    setup_linker();
    let config = load_config();
    generate_config(&config);
}

/// Set up linker search paths and scripts
fn setup_linker() {
    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());

    // Copy memory.x to the output directory
    let memory_x = include_bytes!("memory.x");
    let mut f = File::create(out_dir.join("memory.x")).unwrap();
    f.write_all(memory_x).unwrap();

    // Tell rustc where to find memory.x
    println!("cargo:rustc-link-search={}", out_dir.display());

    println!("cargo:rustc-link-arg-bins=--nmagic");
    println!("cargo:rustc-link-arg-bins=-Tlink.x");
    println!("cargo:rustc-link-arg-bins=-Tlink-rp.x");
    if env::var_os("CARGO_FEATURE_DEFMT").is_some() {
        println!("cargo:rustc-link-arg-bins=-Tdefmt.x");
    }

    println!("cargo:rerun-if-changed=memory.x");
    println!("cargo:rerun-if-changed=build.rs");
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct WatchappToml {
    clock: ClockSection,
    #[serde(default)]
    time: TimeSection,
    #[serde(default)]
    display: DisplaySection,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ClockSection {
    revision: u8,
    restart_policy: Option<RestartPolicy>,
    #[serde(default)]
    teardown: Teardown,
    sweep_duration_ms: Option<u32>,
}

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "snake_case")]
enum RestartPolicy {
    Reschedule,
    CancelThenRestart,
}

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Teardown {
    #[default]
    Full,
    TimerOnly,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct TimeSection {
    #[serde(default)]
    utc_offset_minutes: i32,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct DisplaySection {
    #[serde(default = "default_contrast")]
    contrast: u8,
    #[serde(default = "default_frame_interval")]
    frame_interval_ms: u32,
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            contrast: default_contrast(),
            frame_interval_ms: default_frame_interval(),
        }
    }
}

fn default_contrast() -> u8 {
    0xCF
}

fn default_frame_interval() -> u32 {
    50
}

/// A semantic problem in watchapp.toml
#[derive(Debug)]
enum ConfigError {
    Revision(u8),
    SweepDuration(u32),
    UtcOffset(i32),
    FrameInterval(u32),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Revision(r) => write!(f, "clock.revision = {r}: must be 1, 2 or 3"),
            ConfigError::SweepDuration(d) => {
                write!(f, "clock.sweep_duration_ms = {d}: must be 1-60000")
            }
            ConfigError::UtcOffset(o) => {
                write!(f, "time.utc_offset_minutes = {o}: must be -720 to 840")
            }
            ConfigError::FrameInterval(i) => {
                write!(f, "display.frame_interval_ms = {i}: must be 10-1000")
            }
        }
    }
}

/// Load and validate watchapp.toml, panicking with a readable report
fn load_config() -> WatchappToml {
    println!("cargo:rerun-if-changed=watchapp.toml");

    let config_path = Path::new("watchapp.toml");
    if !config_path.exists() {
        panic!(
            "\n\
            ╔══════════════════════════════════════════════════════════════════╗\n\
            ║  ERROR: watchapp.toml not found!                                 ║\n\
            ║                                                                  ║\n\
            ║  The firmware requires a watchapp.toml configuration file.       ║\n\
            ║  Please create one in the inverter-firmware directory.           ║\n\
            ╚══════════════════════════════════════════════════════════════════╝\n"
        );
    }

    let content = match fs::read_to_string(config_path) {
        Ok(content) => content,
        Err(e) => panic!("{}", boxed("Failed to read watchapp.toml", &[e.to_string()])),
    };

    let config: WatchappToml = match toml::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            let lines: Vec<String> = e.to_string().lines().map(str::to_string).collect();
            panic!("{}", boxed("Invalid watchapp.toml", &lines));
        }
    };

    let errors = validate(&config);
    if !errors.is_empty() {
        let lines: Vec<String> = errors.iter().map(|e| format!("• {e}")).collect();
        panic!("{}", boxed("Invalid values in watchapp.toml", &lines));
    }

    if config.clock.revision == 3
        && (config.clock.restart_policy.is_some() || config.clock.sweep_duration_ms.is_some())
    {
        println!("cargo:warning=revision 3 has no sweep; sweep settings are ignored");
    }

    println!("cargo:warning=watchapp.toml validated successfully");
    config
}

fn validate(config: &WatchappToml) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if !(1..=3).contains(&config.clock.revision) {
        errors.push(ConfigError::Revision(config.clock.revision));
    }
    if let Some(duration) = config.clock.sweep_duration_ms {
        if !(1..=60_000).contains(&duration) {
            errors.push(ConfigError::SweepDuration(duration));
        }
    }
    if !(-720..=840).contains(&config.time.utc_offset_minutes) {
        errors.push(ConfigError::UtcOffset(config.time.utc_offset_minutes));
    }
    if !(10..=1_000).contains(&config.display.frame_interval_ms) {
        errors.push(ConfigError::FrameInterval(config.display.frame_interval_ms));
    }

    errors
}

/// Format a message inside a box
fn boxed(title: &str, lines: &[String]) -> String {
    let body = lines
        .iter()
        .map(|line| {
            let truncated = if line.chars().count() > 64 {
                format!("{}...", line.chars().take(61).collect::<String>())
            } else {
                line.clone()
            };
            format!("║  {:<64} ║", truncated)
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        "\n\
        ╔══════════════════════════════════════════════════════════════════╗\n\
        ║  ERROR: {:<57}║\n\
        ╠══════════════════════════════════════════════════════════════════╣\n\
        {}\n\
        ╚══════════════════════════════════════════════════════════════════╝\n",
        title, body
    )
}

/// Write `watchapp_config.rs` into OUT_DIR
fn generate_config(config: &WatchappToml) {
    let revision = match config.clock.revision {
        1 => "Revision::V1",
        3 => "Revision::V3",
        _ => "Revision::V2",
    };
    let restart_policy = match config.clock.restart_policy {
        None => "None".to_string(),
        Some(RestartPolicy::Reschedule) => "Some(RestartPolicy::Reschedule)".to_string(),
        Some(RestartPolicy::CancelThenRestart) => {
            "Some(RestartPolicy::CancelThenRestart)".to_string()
        }
    };
    let teardown = match config.clock.teardown {
        Teardown::Full => "TeardownPolicy::Full",
        Teardown::TimerOnly => "TeardownPolicy::TimerOnly",
    };
    let sweep_duration = match config.clock.sweep_duration_ms {
        Some(ms) => format!("Some({ms})"),
        None => "None".to_string(),
    };
    let build_epoch = chrono::Utc::now().timestamp();

    let out_dir = PathBuf::from(env::var("OUT_DIR").unwrap());
    let mut f = File::create(out_dir.join("watchapp_config.rs")).unwrap();
    write!(
        f,
        "// Generated from watchapp.toml by build.rs\n\
         pub const REVISION: Revision = {revision};\n\
         pub const RESTART_POLICY: Option<RestartPolicy> = {restart_policy};\n\
         pub const TEARDOWN: TeardownPolicy = {teardown};\n\
         pub const SWEEP_DURATION_MS: Option<u32> = {sweep_duration};\n\
         pub const UTC_OFFSET_MINUTES: i32 = {utc_offset};\n\
         pub const CONTRAST: u8 = {contrast};\n\
         pub const FRAME_INTERVAL_MS: u64 = {frame_interval};\n\
         pub const BUILD_EPOCH: i64 = {build_epoch};\n",
        utc_offset = config.time.utc_offset_minutes,
        contrast = config.display.contrast,
        frame_interval = config.display.frame_interval_ms,
    )
    .unwrap();
}
