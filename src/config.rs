/// 应用配置管理
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const APP_DIR: &str = "ttrack";
const DATA_FILE_NAME: &str = "tasks.txt";
const LOG_LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 任务数据文件（未设置时使用默认数据目录）
    pub data_file: Option<PathBuf>,
    /// 错误和警告是否彩色输出
    pub color: bool,
    /// 日志级别
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_file: None,
            color: true,
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Data file to use: the configured one, or `<data dir>/ttrack/tasks.txt`.
    pub fn resolve_data_file(&self) -> Result<PathBuf> {
        match &self.data_file {
            Some(path) => Ok(path.clone()),
            None => Ok(get_data_dir()?.join(DATA_FILE_NAME)),
        }
    }
}

fn base_dirs() -> Result<directories::BaseDirs> {
    directories::BaseDirs::new().context("Failed to get user directories")
}

/// 获取配置文件路径
/// Windows: %APPDATA%\ttrack\config.toml
/// macOS: ~/Library/Application Support/ttrack/config.toml
/// Linux: ~/.config/ttrack/config.toml
pub fn get_config_path() -> Result<PathBuf> {
    Ok(base_dirs()?.config_dir().join(APP_DIR).join("config.toml"))
}

/// 获取数据目录
/// Linux: ~/.local/share/ttrack
pub fn get_data_dir() -> Result<PathBuf> {
    Ok(base_dirs()?.data_dir().join(APP_DIR))
}

/// 日志目录
pub fn get_log_dir() -> Result<PathBuf> {
    Ok(get_data_dir()?.join("logs"))
}

/// 加载配置
pub fn load_config() -> Result<Config> {
    load_config_from(&get_config_path()?)
}

pub fn load_config_from(path: &Path) -> Result<Config> {
    if !path.exists() {
        // 配置文件不存在，返回默认配置
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config: Config = toml::from_str(&content)
        .with_context(|| format!("Invalid config {}", path.display()))?;

    Ok(config)
}

/// 保存配置
pub fn save_config(config: &Config) -> Result<()> {
    save_config_to(config, &get_config_path()?)
}

pub fn save_config_to(config: &Config, path: &Path) -> Result<()> {
    // 确保目录存在
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;

    Ok(())
}

/// Check a log level name before it is stored.
pub fn validate_log_level(level: &str) -> Result<String> {
    let normalized = level.trim().to_lowercase();
    if LOG_LEVELS.contains(&normalized.as_str()) {
        Ok(normalized)
    } else {
        anyhow::bail!(
            "Unknown log level '{}', expected one of: {}",
            level,
            LOG_LEVELS.join(", ")
        )
    }
}

/// 更新数据文件路径
pub fn set_data_file(path: PathBuf) -> Result<()> {
    let mut config = load_config()?;
    config.data_file = Some(path);
    save_config(&config)?;
    println!("✓ Data file set to: {}", config.resolve_data_file()?.display());
    Ok(())
}

/// 更新彩色输出开关
pub fn set_color(enabled: bool) -> Result<()> {
    let mut config = load_config()?;
    config.color = enabled;
    save_config(&config)?;
    println!("✓ Color output {}", if enabled { "enabled" } else { "disabled" });
    Ok(())
}

/// 更新日志级别
pub fn set_log_level(level: &str) -> Result<()> {
    let level = validate_log_level(level)?;
    let mut config = load_config()?;
    config.log_level = level;
    save_config(&config)?;
    println!("✓ Log level set to: {}", config.log_level);
    Ok(())
}

/// 显示当前配置
pub fn show_config() -> Result<()> {
    let config = load_config()?;
    println!("Current configuration:");
    println!("  Data file:  {}", config.resolve_data_file()?.display());
    println!("  Color:      {}", if config.color { "on" } else { "off" });
    println!("  Log level:  {}", config.log_level);
    println!("  Log dir:    {}", get_log_dir()?.display());
    println!();
    println!("Config file: {}", get_config_path()?.display());
    Ok(())
}
