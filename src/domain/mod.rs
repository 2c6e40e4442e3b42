// ==========================================
// 工厂面积预测系统 - 领域模型层
// ==========================================
// 职责: 定义工厂档案、运行参数、校准与预测结果
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod forecast;
pub mod params;
pub mod plant;

// 重导出核心类型
pub use forecast::{
    CalibrationResult, CalibrationSummary, CalibrationYear, ForecastResponse, ForecastYearResult,
    HistoricalDebugRow, PolicyParams, PolicySources, ProjectedYear, RatioSource,
};
pub use params::{OperationalParameters, ParameterField, PartialOperationalParameters};
pub use plant::{find_sales, HistoricalAreaRecord, PlantProfile, SalesRecord};
