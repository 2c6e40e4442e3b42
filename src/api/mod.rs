// ==========================================
// 工厂面积预测系统 - API 层
// ==========================================
// 职责: 对外预测接口（请求校验、错误映射、响应包装）
// ==========================================

pub mod error;
pub mod forecast_api;
pub mod validator;

// 重导出核心类型
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use forecast_api::{AreaForecastResponse, ForecastApi, ForecastRequest};
pub use validator::{FieldViolation, ForecastRequestValidator};
