// ==========================================
// 工厂面积预测系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 错误信息必须能定位到 工厂 / 财年 / 字段
// ==========================================

use thiserror::Error;

/// 预测引擎错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// 工厂不存在
    #[error("工厂不存在: plant={plant}")]
    PlantNotFound { plant: String },

    /// 数据完整性错误（校准年缺销量、校准窗口不是两年、参数无法解析等）
    #[error("数据完整性错误: plant={plant}, {detail}")]
    DataIntegrityError { plant: String, detail: String },

    /// 校准失败（分母为零或比例非有限值）
    #[error("校准失败: plant={plant}, FY={fiscal_year}, field={field}: {detail}")]
    CalibrationError {
        plant: String,
        fiscal_year: i32,
        field: String,
        detail: String,
    },

    #[error("内部错误: {0}")]
    InternalError(String),
}

impl ForecastError {
    pub fn data_integrity(plant: &str, detail: impl Into<String>) -> Self {
        ForecastError::DataIntegrityError {
            plant: plant.to_string(),
            detail: detail.into(),
        }
    }

    pub fn calibration(plant: &str, fiscal_year: i32, field: &str, detail: impl Into<String>) -> Self {
        ForecastError::CalibrationError {
            plant: plant.to_string(),
            fiscal_year,
            field: field.to_string(),
            detail: detail.into(),
        }
    }
}

/// Result 类型别名
pub type ForecastResult<T> = Result<T, ForecastError>;
