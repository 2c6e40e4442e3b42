// ==========================================
// 工厂面积预测系统 - 请求校验器
// ==========================================
// 职责: 计算前拦截非法请求参数
// 规则: OEE ∈ (0, 1]；节拍/工时/设备占地/库容/总面积 > 0；
//       安全缓冲 ≥ 0 且有限；起始年 ≤ 结束年；工厂标识非空
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::forecast_api::ForecastRequest;
use crate::domain::params::{ParameterField, PartialOperationalParameters};
use serde::{Deserialize, Serialize};

// ==========================================
// FieldViolation - 单字段违规
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldViolation {
    pub field: String,
    pub reason: String,
}

impl FieldViolation {
    fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ==========================================
// ForecastRequestValidator
// ==========================================
pub struct ForecastRequestValidator;

impl ForecastRequestValidator {
    /// 校验预测请求
    ///
    /// 收集全部违规后一次性返回 InvalidInput
    pub fn validate(&self, request: &ForecastRequest) -> ApiResult<()> {
        let violations = self.collect_violations(request);
        if violations.is_empty() {
            return Ok(());
        }

        let message = violations
            .iter()
            .map(|v| format!("{}: {}", v.field, v.reason))
            .collect::<Vec<_>>()
            .join("; ");
        tracing::warn!(plant = %request.plant_name, violations = violations.len(), "请求校验失败");
        Err(ApiError::InvalidInput(message))
    }

    /// 收集违规列表
    pub fn collect_violations(&self, request: &ForecastRequest) -> Vec<FieldViolation> {
        let mut violations = Vec::new();

        if request.plant_name.trim().is_empty() {
            violations.push(FieldViolation::new("plant_name", "工厂标识不能为空"));
        }

        Self::check_overrides(&request.overrides, &mut violations);

        if let (Some(start), Some(end)) = (request.start_year, request.end_year) {
            if start > end {
                violations.push(FieldViolation::new(
                    "start_year",
                    format!("起始年 {} 晚于结束年 {}", start, end),
                ));
            }
        }

        violations
    }

    fn check_overrides(overrides: &PartialOperationalParameters, violations: &mut Vec<FieldViolation>) {
        let positive = [
            (ParameterField::CycleTimeHours, overrides.cycle_time_hours),
            (ParameterField::MachineSizeM2, overrides.machine_size_m2),
            (ParameterField::WarehouseCapacityUnitsM2, overrides.warehouse_capacity_units_m2),
            (ParameterField::TotalPlantArea, overrides.total_plant_area),
        ];
        for (field, value) in positive {
            if let Some(v) = value {
                if !(v.is_finite() && v > 0.0) {
                    violations.push(FieldViolation::new(field.as_str(), format!("必须为正数，实际 {}", v)));
                }
            }
        }

        if let Some(oee) = overrides.base_oee {
            if !(oee.is_finite() && oee > 0.0 && oee <= 1.0) {
                violations.push(FieldViolation::new(
                    ParameterField::BaseOee.as_str(),
                    format!("必须位于 (0, 1]，实际 {}", oee),
                ));
            }
        }

        if let Some(0) = overrides.working_hours_year {
            violations.push(FieldViolation::new(
                ParameterField::WorkingHoursYear.as_str(),
                "必须为正数，实际 0",
            ));
        }

        if let Some(sb) = overrides.safety_buffer {
            if !(sb.is_finite() && sb >= 0.0) {
                violations.push(FieldViolation::new(
                    ParameterField::SafetyBuffer.as_str(),
                    format!("必须为非负有限数，实际 {}", sb),
                ));
            }
        }
    }
}
