// ==========================================
// 工厂面积预测系统 - 配置层
// ==========================================
// 职责: 全局兜底常量、应用配置（文件 + 环境变量）
// ==========================================

pub mod app_config;
pub mod defaults;

// 重导出核心配置
pub use app_config::{default_config_dir, env_keys, AppConfig};
