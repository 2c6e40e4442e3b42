// ==========================================
// 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// 输出到 stderr（stdout 留给预测结果 JSON）
// ==========================================

use crate::config::AppConfig;
use tracing_subscriber::{fmt, EnvFilter};

/// 初始化日志系统
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（默认: info）
///   例如: RUST_LOG=debug 或 RUST_LOG=plant_area_forecast=trace
///
/// # 示例
/// ```no_run
/// use plant_area_forecast::logging;
/// logging::init();
/// ```
pub fn init() {
    init_with_filter("info", false);
}

/// 按应用配置初始化（RUST_LOG 优先于配置中的过滤器）
pub fn init_from_config(config: &AppConfig) {
    init_with_filter(&config.log_filter, config.log_json);
}

/// 初始化日志系统
///
/// - default_filter: RUST_LOG 未设置时使用的过滤器
/// - json: 是否输出 JSON 行
pub fn init_with_filter(default_filter: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter));

    let builder = fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_line_number(true);

    // 重复初始化时静默忽略
    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

/// 初始化测试环境的日志系统
///
/// 使用更详细的日志级别，便于调试
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
