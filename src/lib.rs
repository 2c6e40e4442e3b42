// ==========================================
// 工厂面积预测系统 - 核心库
// ==========================================
// 职责: 由两年历史校准比例推演未来财年的分区面积
// 流程: 参数解析 → 两年校准 → 逐年推演 → 结果组装
// 系统定位: 决策支持（只读计算，无持久化）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 工厂注册表
pub mod repository;

// 引擎层 - 校准与推演
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    ForecastResponse, ForecastYearResult, HistoricalAreaRecord, OperationalParameters,
    PartialOperationalParameters, PlantProfile, SalesRecord,
};

// 引擎
pub use engine::{
    AreaProjector, CalibrationEngine, ForecastError, ForecastInput, ForecastOrchestrator,
    OperationalParameterResolver, ResultAssembler, YearRange,
};

// 仓储
pub use repository::{InMemoryPlantRegistry, PlantRegistry};

// API
pub use api::{ApiError, AreaForecastResponse, ForecastApi, ForecastRequest};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "工厂面积预测系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        assert!(!APP_NAME.is_empty());
    }
}
