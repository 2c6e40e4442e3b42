// ==========================================
// 工厂面积预测系统 - API层错误类型
// ==========================================
// 职责: 汇总各层错误，映射为调用方可理解的错误与状态码
// 红线: 错误信息必须包含显式原因（工厂 / 财年 / 字段）
// ==========================================

use crate::engine::error::ForecastError;
use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 请求错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("工厂不存在: {0}")]
    PlantNotFound(String),

    #[error("文件导入失败: {0}")]
    ImportError(String),

    // ==========================================
    // 数据错误
    // ==========================================
    #[error("数据完整性错误: {0}")]
    DataIntegrityError(String),

    #[error("校准失败: plant={plant}, FY={fiscal_year}, field={field}: {detail}")]
    CalibrationError {
        plant: String,
        fiscal_year: i32,
        field: String,
        detail: String,
    },

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// HTTP 风格状态码
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidInput(_) | ApiError::ImportError(_) => 400,
            ApiError::PlantNotFound(_) => 404,
            ApiError::DataIntegrityError(_) | ApiError::CalibrationError { .. } => 422,
            ApiError::InternalError(_) | ApiError::Other(_) => 500,
        }
    }

    /// 错误代码（机器可读）
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::PlantNotFound(_) => "PLANT_NOT_FOUND",
            ApiError::ImportError(_) => "IMPORT_ERROR",
            ApiError::DataIntegrityError(_) => "DATA_INTEGRITY_ERROR",
            ApiError::CalibrationError { .. } => "CALIBRATION_ERROR",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
            ApiError::Other(_) => "OTHER_ERROR",
        }
    }

    /// 转为错误响应体
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            status: "error".to_string(),
            code: self.code().to_string(),
            status_code: self.status_code(),
            message: self.to_string(),
            details: match self {
                ApiError::CalibrationError {
                    plant,
                    fiscal_year,
                    field,
                    ..
                } => Some(serde_json::json!({
                    "plant": plant,
                    "FY": fiscal_year,
                    "field": field,
                })),
                _ => None,
            },
        }
    }
}

// ==========================================
// 从 ForecastError 转换
// ==========================================
impl From<ForecastError> for ApiError {
    fn from(err: ForecastError) -> Self {
        match err {
            ForecastError::PlantNotFound { plant } => ApiError::PlantNotFound(plant),
            ForecastError::DataIntegrityError { plant, detail } => {
                ApiError::DataIntegrityError(format!("plant={}, {}", plant, detail))
            }
            ForecastError::CalibrationError {
                plant,
                fiscal_year,
                field,
                detail,
            } => ApiError::CalibrationError {
                plant,
                fiscal_year,
                field,
                detail,
            },
            ForecastError::InternalError(msg) => ApiError::InternalError(msg),
        }
    }
}

impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        ApiError::ImportError(err.to_string())
    }
}

// ==========================================
// 从 RepositoryError 转换
// 注册表加载失败属于启动期数据问题
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::FileReadError { .. } => ApiError::InternalError(err.to_string()),
            RepositoryError::ParseError(_) | RepositoryError::DuplicatePlant(_) => {
                ApiError::DataIntegrityError(err.to_string())
            }
            RepositoryError::ValidationError { .. } => ApiError::DataIntegrityError(err.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// 错误响应体
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub code: String,
    pub status_code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forecast_error_conversion_and_status() {
        let api_err: ApiError = ForecastError::PlantNotFound {
            plant: "NOPE".to_string(),
        }
        .into();
        assert!(matches!(&api_err, ApiError::PlantNotFound(p) if p == "NOPE"));
        assert_eq!(api_err.status_code(), 404);

        let api_err: ApiError = ForecastError::data_integrity("DNIN", "缺少销量").into();
        assert_eq!(api_err.status_code(), 422);
        assert!(api_err.to_string().contains("DNIN"));

        let api_err: ApiError =
            ForecastError::calibration("DNKI", 2025, "inventory_area", "为零").into();
        assert_eq!(api_err.status_code(), 422);
        let response = api_err.to_response();
        assert_eq!(response.code, "CALIBRATION_ERROR");
        assert_eq!(response.details.unwrap()["FY"], 2025);
    }

    #[test]
    fn test_import_and_other_status() {
        let api_err: ApiError = ImportError::MissingColumn("FY".to_string()).into();
        assert_eq!(api_err.status_code(), 400);
        assert!(api_err.to_string().contains("FY"));

        let api_err: ApiError = anyhow::anyhow!("boom").into();
        assert_eq!(api_err.status_code(), 500);
        assert_eq!(api_err.to_response().status, "error");
    }

    #[test]
    fn test_repository_error_conversion() {
        let api_err: ApiError = RepositoryError::DuplicatePlant("DNIN".to_string()).into();
        assert!(matches!(api_err, ApiError::DataIntegrityError(msg) if msg.contains("DNIN")));
    }
}
