// ==========================================
// 工厂面积预测系统 - 引擎层
// ==========================================
// 职责: 参数解析、历史校准、面积推演、结果组装
// 红线: 纯计算，无状态，不读写外部存储
// ==========================================

pub mod assembler;
pub mod calibration;
pub mod error;
pub mod events;
pub mod formulas;
pub mod orchestrator;
pub mod param_resolver;
pub mod projector;

// 重导出核心引擎
pub use assembler::ResultAssembler;
pub use calibration::CalibrationEngine;
pub use error::{ForecastError, ForecastResult};
pub use events::{ForecastEvent, ForecastObserver, NoOpObserver, OptionalObserver};
pub use orchestrator::{ForecastInput, ForecastOrchestrator};
pub use param_resolver::{OperationalParameterResolver, ParameterSource};
pub use projector::{AreaProjector, YearRange};
