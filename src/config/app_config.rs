// ==========================================
// 工厂面积预测系统 - 应用配置
// ==========================================
// 职责: 注册表文件路径、默认预测区间、日志过滤器
// 来源优先级: 环境变量 > 配置文件 > 内置默认
// ==========================================

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::path::{Path, PathBuf};

// ==========================================
// 环境变量键
// ==========================================
pub mod env_keys {
    pub const REGISTRY_PATH: &str = "PLANT_AREA_FORECAST_REGISTRY";
    pub const START_YEAR: &str = "PLANT_AREA_FORECAST_START_YEAR";
    pub const END_YEAR: &str = "PLANT_AREA_FORECAST_END_YEAR";
    pub const CONFIG_PATH: &str = "PLANT_AREA_FORECAST_CONFIG";
}

/// 原服务固定的预测区间
pub const DEFAULT_FORECAST_START_YEAR: i32 = 2026;
pub const DEFAULT_FORECAST_END_YEAR: i32 = 2030;

// ==========================================
// AppConfig - 应用配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// 工厂注册表 JSON 文件；None 表示使用内置注册表
    #[serde(default)]
    pub registry_path: Option<PathBuf>,

    /// 请求未指定区间时使用的默认起始年（含）
    #[serde(default)]
    pub default_start_year: Option<i32>,

    /// 请求未指定区间时使用的默认结束年（含）
    #[serde(default)]
    pub default_end_year: Option<i32>,

    /// 日志过滤器（RUST_LOG 语法）
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// 以 JSON 行输出日志
    #[serde(default)]
    pub log_json: bool,
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            registry_path: None,
            default_start_year: Some(DEFAULT_FORECAST_START_YEAR),
            default_end_year: Some(DEFAULT_FORECAST_END_YEAR),
            log_filter: default_log_filter(),
            log_json: false,
        }
    }
}

impl AppConfig {
    /// 从 JSON 文件加载配置（缺失字段取默认值）
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        let config: AppConfig = serde_json::from_str(&raw)?;
        Ok(config)
    }

    /// 加载配置
    ///
    /// 1. 配置文件：PLANT_AREA_FORECAST_CONFIG 指定，或用户配置目录下 config.json（存在时）
    /// 2. 环境变量覆写
    pub fn load() -> Result<Self, Box<dyn Error>> {
        let config_path = match std::env::var(env_keys::CONFIG_PATH) {
            Ok(p) if !p.trim().is_empty() => Some(PathBuf::from(p.trim())),
            _ => default_config_dir().map(|d| d.join("config.json")),
        };

        let mut config = match config_path {
            Some(path) if path.exists() => {
                tracing::info!("加载配置文件: {}", path.display());
                Self::from_json_file(&path)?
            }
            _ => Self::default(),
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// 应用环境变量覆写
    pub fn apply_env_overrides(&mut self) -> Result<(), Box<dyn Error>> {
        if let Ok(path) = std::env::var(env_keys::REGISTRY_PATH) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                self.registry_path = Some(PathBuf::from(trimmed));
            }
        }
        if let Some(year) = read_year_env(env_keys::START_YEAR)? {
            self.default_start_year = Some(year);
        }
        if let Some(year) = read_year_env(env_keys::END_YEAR)? {
            self.default_end_year = Some(year);
        }
        Ok(())
    }

    /// 默认预测区间
    pub fn default_horizon(&self) -> (Option<i32>, Option<i32>) {
        (self.default_start_year, self.default_end_year)
    }

    /// 实际使用的注册表路径（配置优先，其次用户配置目录下 plants.json（存在时））
    pub fn resolve_registry_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.registry_path {
            return Some(path.clone());
        }
        default_config_dir()
            .map(|d| d.join("plants.json"))
            .filter(|p| p.exists())
    }
}

fn read_year_env(key: &str) -> Result<Option<i32>, Box<dyn Error>> {
    match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => {
            let year = v
                .trim()
                .parse::<i32>()
                .map_err(|e| format!("环境变量 {} 不是有效年份: {}", key, e))?;
            Ok(Some(year))
        }
        _ => Ok(None),
    }
}

/// 用户配置目录（~/.config/plant-area-forecast 等）
pub fn default_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("plant-area-forecast"))
}
