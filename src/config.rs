use log::{info, warn};
use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

const CONFIG_PATH: &str = "hud.ini";

// --- Minimal INI reader ---
#[derive(Debug, Default)]
pub struct SimpleIni {
    sections: HashMap<String, HashMap<String, String>>,
}

impl SimpleIni {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Result<(), std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        self.parse(&content);
        Ok(())
    }

    pub fn parse(&mut self, content: &str) {
        self.sections.clear();
        let mut current_section = String::new();

        for raw_line in content.lines() {
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with(';') || line.starts_with('#') {
                continue;
            }

            if let Some(name) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                current_section = name.trim().to_string();
                self.sections.entry(current_section.clone()).or_default();
                continue;
            }

            if let Some((key, value)) = line.split_once('=') {
                let key = key.trim();
                if key.is_empty() {
                    continue;
                }
                self.sections
                    .entry(current_section.clone())
                    .or_default()
                    .insert(key.to_string(), value.trim().to_string());
            }
        }
    }

    pub fn get(&self, section: &str, key: &str) -> Option<String> {
        self.sections.get(section).and_then(|s| s.get(key)).cloned()
    }

    /// Parses a value, logging and discarding anything malformed.
    pub fn get_parsed<T: FromStr>(&self, section: &str, key: &str) -> Option<T> {
        let raw = self.get(section, key)?;
        match raw.parse::<T>() {
            Ok(v) => Some(v),
            Err(_) => {
                warn!("Ignoring invalid value '{raw}' for [{section}] {key}");
                None
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "Error",
            Self::Warn => "Warn",
            Self::Info => "Info",
            Self::Debug => "Debug",
            Self::Trace => "Trace",
        }
    }

    pub const fn as_level_filter(self) -> log::LevelFilter {
        match self {
            Self::Error => log::LevelFilter::Error,
            Self::Warn => log::LevelFilter::Warn,
            Self::Info => log::LevelFilter::Info,
            Self::Debug => log::LevelFilter::Debug,
            Self::Trace => log::LevelFilter::Trace,
        }
    }
}

impl FromStr for LogLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub log_level: LogLevel,
    /// Skin directory holding HUD textures. Empty means no skin textures.
    pub skin_dir: String,
    pub api_base_url: String,
    pub health_bar_width: f32,
    /// Vertical rise of the curved end of the health bar, 0..64.
    pub health_bar_height: f32,
    /// Fraction of `health_bar_width` the bar occupies, 0.2..1.
    pub health_bar_length: f32,
    pub health_glow_portion: f32,
    pub miss_glow_portion: f32,
    /// Seconds the miss bar lingers before retracting.
    pub miss_reset_delay: f32,
    /// Seconds the retraction takes.
    pub miss_retract_duration: f32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Warn,
            skin_dir: String::new(),
            api_base_url: "https://osu.ppy.sh/api/v2".to_string(),
            health_bar_width: 300.0,
            health_bar_height: 20.0,
            health_bar_length: 0.98,
            health_glow_portion: 0.6,
            miss_glow_portion: 0.9,
            miss_reset_delay: 0.5,
            miss_retract_duration: 0.3,
        }
    }
}

impl Config {
    pub fn from_ini(conf: &SimpleIni) -> Self {
        let default = Self::default();
        Self {
            log_level: conf
                .get("Options", "LogLevel")
                .and_then(|v| LogLevel::from_str(&v).ok())
                .unwrap_or(default.log_level),
            skin_dir: conf.get("Skin", "Directory").unwrap_or(default.skin_dir),
            api_base_url: conf
                .get("Network", "ApiBaseUrl")
                .map(|v| v.trim_end_matches('/').to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or(default.api_base_url),
            health_bar_width: conf
                .get_parsed::<f32>("HealthBar", "Width")
                .filter(|v| v.is_finite() && *v > 0.0)
                .unwrap_or(default.health_bar_width),
            health_bar_height: conf
                .get_parsed::<f32>("HealthBar", "Height")
                .map(|v| v.clamp(0.0, 64.0))
                .unwrap_or(default.health_bar_height),
            health_bar_length: conf
                .get_parsed::<f32>("HealthBar", "Length")
                .map(|v| v.clamp(0.2, 1.0))
                .unwrap_or(default.health_bar_length),
            health_glow_portion: conf
                .get_parsed::<f32>("HealthBar", "GlowPortion")
                .map(|v| v.clamp(0.0, 1.0))
                .unwrap_or(default.health_glow_portion),
            miss_glow_portion: conf
                .get_parsed::<f32>("HealthBar", "MissGlowPortion")
                .map(|v| v.clamp(0.0, 1.0))
                .unwrap_or(default.miss_glow_portion),
            miss_reset_delay: conf
                .get_parsed::<f32>("HealthBar", "MissResetDelay")
                .map(|v| v.max(0.0))
                .unwrap_or(default.miss_reset_delay),
            miss_retract_duration: conf
                .get_parsed::<f32>("HealthBar", "MissRetractDuration")
                .map(|v| v.max(0.0))
                .unwrap_or(default.miss_retract_duration),
        }
    }

    fn to_ini_string(&self) -> String {
        let mut content = String::new();
        content.push_str("[HealthBar]\n");
        content.push_str(&format!("GlowPortion={}\n", self.health_glow_portion));
        content.push_str(&format!("Height={}\n", self.health_bar_height));
        content.push_str(&format!("Length={}\n", self.health_bar_length));
        content.push_str(&format!("MissGlowPortion={}\n", self.miss_glow_portion));
        content.push_str(&format!("MissResetDelay={}\n", self.miss_reset_delay));
        content.push_str(&format!(
            "MissRetractDuration={}\n",
            self.miss_retract_duration
        ));
        content.push_str(&format!("Width={}\n", self.health_bar_width));
        content.push('\n');

        content.push_str("[Network]\n");
        content.push_str(&format!("ApiBaseUrl={}\n", self.api_base_url));
        content.push('\n');

        content.push_str("[Options]\n");
        content.push_str(&format!("LogLevel={}\n", self.log_level.as_str()));
        content.push('\n');

        content.push_str("[Skin]\n");
        content.push_str(&format!("Directory={}\n", self.skin_dir));
        content
    }
}

// Global, mutable configuration instance.
static CONFIG: std::sync::LazyLock<Mutex<Config>> =
    std::sync::LazyLock::new(|| Mutex::new(Config::default()));

fn create_default_config_file() -> Result<(), std::io::Error> {
    info!("'{CONFIG_PATH}' not found, creating with default values.");
    std::fs::write(CONFIG_PATH, Config::default().to_ini_string())
}

pub fn load() {
    if !Path::new(CONFIG_PATH).exists()
        && let Err(e) = create_default_config_file()
    {
        warn!("Failed to create default config file: {e}");
    }

    let mut conf = SimpleIni::new();
    match conf.load(CONFIG_PATH) {
        Ok(()) => {
            *CONFIG.lock().unwrap() = Config::from_ini(&conf);
            info!("Configuration loaded from '{CONFIG_PATH}'.");
        }
        Err(e) => {
            warn!("Failed to load '{CONFIG_PATH}': {e}. Using default values.");
        }
    }
}

pub fn get() -> Config {
    CONFIG.lock().unwrap().clone()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ini(text: &str) -> SimpleIni {
        let mut conf = SimpleIni::new();
        conf.parse(text);
        conf
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let cfg = Config::from_ini(&ini("[Options]\nLogLevel=debug\n"));
        assert_eq!(cfg.log_level, LogLevel::Debug);
        assert_eq!(cfg.miss_reset_delay, Config::default().miss_reset_delay);
        assert_eq!(cfg.api_base_url, Config::default().api_base_url);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let cfg = Config::from_ini(&ini(
            "; comment\n[HealthBar]\nHeight = 100\nLength=0.05\nGlowPortion=abc\n",
        ));
        assert_eq!(cfg.health_bar_height, 64.0);
        assert_eq!(cfg.health_bar_length, 0.2);
        assert_eq!(cfg.health_glow_portion, Config::default().health_glow_portion);
    }

    #[test]
    fn written_defaults_read_back_unchanged() {
        let default = Config::default();
        let cfg = Config::from_ini(&ini(&default.to_ini_string()));
        assert_eq!(cfg, default);
    }

    #[test]
    fn api_url_loses_trailing_slash() {
        let cfg = Config::from_ini(&ini("[Network]\nApiBaseUrl=http://localhost:8080/api/\n"));
        assert_eq!(cfg.api_base_url, "http://localhost:8080/api");
    }
}
