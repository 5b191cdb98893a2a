use serde::{Deserialize, Serialize};
use clap::{ArgAction, Parser, ValueEnum, ValueHint};
use dirs_next::home_dir;
use std::{fs, path::{Path, PathBuf}, time::Duration};
use thiserror::Error;

use crate::display::components::STARTUP_TITLE;
use crate::display::ControllerConfig;

/// Error type for config loading/validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Validation error: {0}")]
    Validation(String),
}

/// Where weather comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    #[default]
    Avwx,
    Demo,
}

/// Where frames go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SinkKind {
    #[default]
    Terminal,
    Emulator,
    Matrix,
}

/// Top-level app configuration. Every field is optional so files and
/// flags can be layered; `Config::default()` carries the built-in values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub station: Option<String>,             // ICAO identifier, e.g. "KDEN"
    pub log_level: Option<String>,           // e.g., "info" | "debug"
    pub source: Option<SourceKind>,
    pub api_token: Option<String>,           // AVWX bearer token
    pub refresh_interval_secs: Option<u64>,
    pub alternate_ticks: Option<u32>,        // frames per screen
    pub fps: Option<u32>,
    pub startup_hold_ms: Option<u64>,
    pub title: Option<String>,
    /// panel geometry & sink selection
    pub display: Option<DisplayConfig>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub sink: Option<SinkKind>,
    pub scale: Option<u32>,      // emulator window pixels per panel pixel
    pub brightness: Option<u8>,  // 0-100
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: Some(64),
            height: Some(32),
            sink: Some(SinkKind::Terminal),
            scale: Some(10),
            brightness: Some(75),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            station: None,
            log_level: Some("info".into()),
            source: Some(SourceKind::Avwx),
            api_token: None,
            refresh_interval_secs: Some(300),
            alternate_ticks: Some(150),
            fps: Some(30),
            startup_hold_ms: Some(2000),
            title: Some(STARTUP_TITLE.into()),
            display: Some(DisplayConfig::default()),
        }
    }
}

/// CLI overrides. All fields are Options so we can layer them over YAML.
#[derive(Debug, Parser, Clone, Default)]
#[command(name = "avhud", version, about = "Aviation weather HUD for RGB LED panels")]
pub struct Cli {
    /// Path to a YAML config file (overrides search)
    #[arg(long, value_hint = ValueHint::FilePath)]
    pub config: Option<PathBuf>,
    /// ICAO station, e.g. KDEN
    #[arg(short, long)]
    pub station: Option<String>,
    #[arg(long)]
    pub log_level: Option<String>,
    /// shorthand for --log-level debug
    #[arg(short, long, action = ArgAction::SetTrue)]
    pub debug: bool,
    #[arg(long, value_enum)]
    pub source: Option<SourceKind>,
    #[arg(long)]
    pub api_token: Option<String>,
    #[arg(long)]
    pub refresh_interval_secs: Option<u64>,
    #[arg(long)]
    pub alternate_ticks: Option<u32>,
    #[arg(long)]
    pub fps: Option<u32>,
    #[arg(long, value_enum)]
    pub sink: Option<SinkKind>,
    #[arg(long)]
    pub display_width: Option<u32>,
    #[arg(long)]
    pub display_height: Option<u32>,
    #[arg(long)]
    pub scale: Option<u32>,
    #[arg(long)]
    pub brightness: Option<u8>,
    /// dump fully merged config (after overrides) and exit
    #[arg(long, action = ArgAction::SetTrue)]
    pub dump_config: bool,
}

/// Public entry point: parse CLI, read YAML, merge, validate.
pub fn load() -> Result<(Config, Cli), ConfigError> {
    let cli = Cli::parse();
    let cfg = load_with(&cli)?;
    Ok((cfg, cli))
}

/// Layer defaults, the YAML file and `cli`, then validate.
pub fn load_with(cli: &Cli) -> Result<Config, ConfigError> {
    // 1) defaults (from `Default` impl)
    let mut cfg = Config::default();

    // 2) YAML file (explicit path or search)
    if let Some(p) = cli.config.as_ref() {
        if p.exists() {
            let y = read_yaml(p)?;
            merge(&mut cfg, y);
        } else {
            return Err(ConfigError::Validation(format!(
                "Config file not found: {}",
                p.display()
            )));
        }
    } else if let Some(p) = find_config_file() {
        let y = read_yaml(&p)?;
        merge(&mut cfg, y);
    }

    // 3) CLI overrides (highest precedence)
    apply_cli_overrides(&mut cfg, cli);

    // 4) Validate
    normalize(&mut cfg);
    validate(&cfg)?;

    Ok(cfg)
}

/// Try common locations in order (first hit wins).
fn find_config_file() -> Option<PathBuf> {
    // XDG-style: ~/.config/avhud/config.yaml
    if let Some(home) = home_dir() {
        let p = home.join(".config/avhud/config.yaml");
        if p.exists() { return Some(p) }
        let p = home.join(".config/avhud.yaml");
        if p.exists() { return Some(p) }
    }
    // project local
    for candidate in &["avhud.yaml", "config/avhud.yaml"] {
        let p = PathBuf::from(candidate);
        if p.exists() { return Some(p) }
    }
    None
}

/// Parse one YAML layer. Missing keys stay `None`.
pub fn read_yaml(path: &Path) -> Result<Config, ConfigError> {
    let s = fs::read_to_string(path)?;
    let cfg: PartialConfig = serde_yaml::from_str(&s)?;
    Ok(cfg.into())
}

// file layer: absent keys must not pick up the built-in defaults
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PartialConfig {
    station: Option<String>,
    log_level: Option<String>,
    source: Option<SourceKind>,
    api_token: Option<String>,
    refresh_interval_secs: Option<u64>,
    alternate_ticks: Option<u32>,
    fps: Option<u32>,
    startup_hold_ms: Option<u64>,
    title: Option<String>,
    display: Option<PartialDisplay>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PartialDisplay {
    width: Option<u32>,
    height: Option<u32>,
    sink: Option<SinkKind>,
    scale: Option<u32>,
    brightness: Option<u8>,
}

impl From<PartialConfig> for Config {
    fn from(p: PartialConfig) -> Self {
        Config {
            station: p.station,
            log_level: p.log_level,
            source: p.source,
            api_token: p.api_token,
            refresh_interval_secs: p.refresh_interval_secs,
            alternate_ticks: p.alternate_ticks,
            fps: p.fps,
            startup_hold_ms: p.startup_hold_ms,
            title: p.title,
            display: p.display.map(|d| DisplayConfig {
                width: d.width,
                height: d.height,
                sink: d.sink,
                scale: d.scale,
                brightness: d.brightness,
            }),
        }
    }
}

/// Shallow merge `src` into `dst`, Option-by-Option.
fn merge(dst: &mut Config, src: Config) {
    // top-level
    if src.station.is_some()               { dst.station = src.station; }
    if src.log_level.is_some()             { dst.log_level = src.log_level; }
    if src.source.is_some()                { dst.source = src.source; }
    if src.api_token.is_some()             { dst.api_token = src.api_token; }
    if src.refresh_interval_secs.is_some() { dst.refresh_interval_secs = src.refresh_interval_secs; }
    if src.alternate_ticks.is_some()       { dst.alternate_ticks = src.alternate_ticks; }
    if src.fps.is_some()                   { dst.fps = src.fps; }
    if src.startup_hold_ms.is_some()       { dst.startup_hold_ms = src.startup_hold_ms; }
    if src.title.is_some()                 { dst.title = src.title; }
    // display
    match (&mut dst.display, src.display) {
        (None, Some(c)) => dst.display = Some(c),
        (Some(d), Some(s)) => merge_display(d, s),
        _ => {}
    }
}

fn merge_display(dst: &mut DisplayConfig, src: DisplayConfig) {
    if src.width.is_some()       { dst.width = src.width; }
    if src.height.is_some()      { dst.height = src.height; }
    if src.sink.is_some()        { dst.sink = src.sink; }
    if src.scale.is_some()       { dst.scale = src.scale; }
    if src.brightness.is_some()  { dst.brightness = src.brightness; }
}

fn apply_cli_overrides(cfg: &mut Config, cli: &Cli) {
    if cli.station.is_some()               { cfg.station = cli.station.clone(); }
    if cli.log_level.is_some()             { cfg.log_level = cli.log_level.clone(); }
    if cli.debug                           { cfg.log_level = Some("debug".into()); }
    if cli.source.is_some()                { cfg.source = cli.source; }
    if cli.api_token.is_some()             { cfg.api_token = cli.api_token.clone(); }
    if cli.refresh_interval_secs.is_some() { cfg.refresh_interval_secs = cli.refresh_interval_secs; }
    if cli.alternate_ticks.is_some()       { cfg.alternate_ticks = cli.alternate_ticks; }
    if cli.fps.is_some()                   { cfg.fps = cli.fps; }

    let display = cfg.display.get_or_insert_with(DisplayConfig::default);
    if cli.sink.is_some()           { display.sink = cli.sink; }
    if cli.display_width.is_some()  { display.width = cli.display_width; }
    if cli.display_height.is_some() { display.height = cli.display_height; }
    if cli.scale.is_some()          { display.scale = cli.scale; }
    if cli.brightness.is_some()     { display.brightness = cli.brightness; }
}

fn normalize(cfg: &mut Config) {
    if let Some(station) = cfg.station.as_mut() {
        *station = station.trim().to_ascii_uppercase();
    }
    if let Some(token) = cfg.api_token.as_ref() {
        if token.trim().is_empty() {
            cfg.api_token = None;
        }
    }
}

/// Put any invariants here (required fields, ranges, etc.)
pub fn validate(cfg: &Config) -> Result<(), ConfigError> {
    match cfg.station.as_deref() {
        None | Some("") => {
            return Err(ConfigError::Validation(
                "station is required (--station or `station:` in the config file)".into(),
            ))
        }
        Some(s) if !(3..=4).contains(&s.len()) || !s.chars().all(|c| c.is_ascii_alphanumeric()) => {
            return Err(ConfigError::Validation(format!(
                "station `{}` must be 3-4 letters or digits",
                s
            )))
        }
        Some(_) => {}
    }

    if cfg.fps == Some(0) {
        return Err(ConfigError::Validation("fps must be > 0".into()));
    }
    if cfg.alternate_ticks == Some(0) {
        return Err(ConfigError::Validation("alternate_ticks must be > 0".into()));
    }
    if cfg.refresh_interval_secs == Some(0) {
        return Err(ConfigError::Validation("refresh_interval_secs must be > 0".into()));
    }

    if let Some(display) = cfg.display.as_ref() {
        if display.width == Some(0) || display.height == Some(0) {
            return Err(ConfigError::Validation("display width/height must be > 0".into()));
        }
        if display.scale == Some(0) {
            return Err(ConfigError::Validation("display scale must be > 0".into()));
        }
        if let Some(b) = display.brightness {
            if b > 100 {
                return Err(ConfigError::Validation("display brightness must be 0..=100".into()));
            }
        }
    }
    Ok(())
}

impl Config {
    pub fn station(&self) -> &str {
        self.station.as_deref().unwrap_or_default()
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or("info")
    }

    pub fn source(&self) -> SourceKind {
        self.source.unwrap_or_default()
    }

    fn display(&self) -> DisplayConfig {
        let mut d = DisplayConfig::default();
        if let Some(set) = self.display.clone() {
            merge_display(&mut d, set);
        }
        d
    }

    pub fn sink(&self) -> SinkKind {
        self.display().sink.unwrap_or_default()
    }

    /// Panel (width, height)
    pub fn panel_size(&self) -> (u32, u32) {
        let d = self.display();
        (d.width.unwrap_or(64), d.height.unwrap_or(32))
    }

    pub fn scale(&self) -> u32 {
        self.display().scale.unwrap_or(10)
    }

    pub fn brightness(&self) -> u8 {
        self.display().brightness.unwrap_or(75)
    }

    /// Flat view for the display controller
    pub fn to_controller_config(&self) -> ControllerConfig {
        let defaults = ControllerConfig::default();
        ControllerConfig {
            station: self.station().to_string(),
            refresh_interval: self
                .refresh_interval_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.refresh_interval),
            alternate_ticks: self.alternate_ticks.unwrap_or(defaults.alternate_ticks),
            fps: self.fps.unwrap_or(defaults.fps),
            startup_hold: self
                .startup_hold_ms
                .map(Duration::from_millis)
                .unwrap_or(defaults.startup_hold),
            title: self.title.clone().unwrap_or(defaults.title),
        }
    }

    /// Effective config as YAML, token masked
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        let mut shown = self.clone();
        if shown.api_token.is_some() {
            shown.api_token = Some("********".into());
        }
        Ok(serde_yaml::to_string(&shown)?)
    }
}
