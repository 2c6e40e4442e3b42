// ==========================================
// 工厂面积预测系统 - 运行参数解析器
// ==========================================
// 职责: 合并 用户覆写 / 工厂默认值 / 全局兜底常量
// 优先级（逐字段）: 用户覆写 > 工厂默认值 > 全局兜底
// 输出: 完整的 OperationalParameters，或 DataIntegrityError
// ==========================================

use crate::config::defaults;
use crate::domain::params::{OperationalParameters, ParameterField, PartialOperationalParameters};
use crate::engine::error::{ForecastError, ForecastResult};
use serde::{Deserialize, Serialize};
use tracing::instrument;

// ==========================================
// ParameterSource - 参数来源层级
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ParameterSource {
    Override,       // 用户覆写
    PlantDefault,   // 工厂默认值
    GlobalFallback, // 全局兜底
}

// ==========================================
// OperationalParameterResolver - 运行参数解析器
// ==========================================
pub struct OperationalParameterResolver {
    // 无状态
}

impl OperationalParameterResolver {
    pub fn new() -> Self {
        Self {}
    }

    /// 解析完整运行参数
    ///
    /// # 参数
    /// - `plant_id`: 工厂标识（仅用于错误信息）
    /// - `overrides`: 用户覆写（可选）
    /// - `plant_defaults`: 工厂默认值
    ///
    /// # 返回
    /// - Ok(OperationalParameters): 全部字段已解析
    /// - Err(DataIntegrityError): 某字段三层均无值
    #[instrument(skip(self, overrides, plant_defaults))]
    pub fn resolve(
        &self,
        plant_id: &str,
        overrides: Option<&PartialOperationalParameters>,
        plant_defaults: &PartialOperationalParameters,
    ) -> ForecastResult<OperationalParameters> {
        let empty = PartialOperationalParameters::default();
        let overrides = overrides.unwrap_or(&empty);

        let params = OperationalParameters {
            cycle_time_hours: self.resolve_field(
                plant_id,
                ParameterField::CycleTimeHours,
                overrides.cycle_time_hours,
                plant_defaults.cycle_time_hours,
                None,
            )?,
            base_oee: self.resolve_field(
                plant_id,
                ParameterField::BaseOee,
                overrides.base_oee,
                plant_defaults.base_oee,
                None,
            )?,
            working_hours_year: self.resolve_field(
                plant_id,
                ParameterField::WorkingHoursYear,
                overrides.working_hours_year,
                plant_defaults.working_hours_year,
                Some(defaults::WORKING_HOURS_YEAR),
            )?,
            machine_size_m2: self.resolve_field(
                plant_id,
                ParameterField::MachineSizeM2,
                overrides.machine_size_m2,
                plant_defaults.machine_size_m2,
                None,
            )?,
            safety_buffer: self.resolve_field(
                plant_id,
                ParameterField::SafetyBuffer,
                overrides.safety_buffer,
                plant_defaults.safety_buffer,
                Some(defaults::SAFETY_BUFFER),
            )?,
            warehouse_capacity_units_m2: self.resolve_field(
                plant_id,
                ParameterField::WarehouseCapacityUnitsM2,
                overrides.warehouse_capacity_units_m2,
                plant_defaults.warehouse_capacity_units_m2,
                None,
            )?,
            total_plant_area: self.resolve_field(
                plant_id,
                ParameterField::TotalPlantArea,
                overrides.total_plant_area,
                plant_defaults.total_plant_area,
                None,
            )?,
        };

        self.check_ranges(plant_id, &params)?;
        Ok(params)
    }

    /// 取值范围校验
    ///
    /// - base_oee ∈ (0, 1]
    /// - safety_buffer ≥ 0
    /// - 其余字段 > 0
    /// - 全部为有限值
    fn check_ranges(&self, plant_id: &str, params: &OperationalParameters) -> ForecastResult<()> {
        for field in ParameterField::ALL {
            let value = params.value(field);
            let (valid, expected) = match field {
                ParameterField::BaseOee => (value > 0.0 && value <= 1.0, "(0, 1]"),
                ParameterField::SafetyBuffer => (value >= 0.0, ">= 0"),
                _ => (value > 0.0, "> 0"),
            };
            if !value.is_finite() || !valid {
                return Err(ForecastError::data_integrity(
                    plant_id,
                    format!("运行参数 {} 超出范围: 期望 {}，实际 {}", field, expected, value),
                ));
            }
        }
        Ok(())
    }

    /// 单字段分层解析
    fn resolve_field<T: Copy + std::fmt::Debug>(
        &self,
        plant_id: &str,
        field: ParameterField,
        override_value: Option<T>,
        plant_default: Option<T>,
        global_fallback: Option<T>,
    ) -> ForecastResult<T> {
        let (value, source) = match (override_value, plant_default, global_fallback) {
            (Some(v), _, _) => (v, ParameterSource::Override),
            (None, Some(v), _) => (v, ParameterSource::PlantDefault),
            (None, None, Some(v)) => (v, ParameterSource::GlobalFallback),
            (None, None, None) => {
                return Err(ForecastError::data_integrity(
                    plant_id,
                    format!("运行参数 {} 无法解析（无覆写、无工厂默认值、无全局兜底）", field),
                ))
            }
        };

        tracing::trace!(field = %field, ?value, ?source, "运行参数已解析");
        Ok(value)
    }
}

impl Default for OperationalParameterResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plant_defaults() -> PartialOperationalParameters {
        PartialOperationalParameters {
            cycle_time_hours: Some(0.05),
            base_oee: Some(0.79),
            machine_size_m2: Some(75.0),
            warehouse_capacity_units_m2: Some(6.0),
            total_plant_area: Some(29090.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_uses_plant_defaults_and_global_fallback() {
        let resolver = OperationalParameterResolver::new();
        let params = resolver.resolve("DNIN", None, &plant_defaults()).unwrap();

        assert_eq!(params.cycle_time_hours, 0.05);
        assert_eq!(params.base_oee, 0.79);
        assert_eq!(params.working_hours_year, 6000);
        assert_eq!(params.safety_buffer, 0.05);
        assert_eq!(params.total_plant_area, 29090.0);
    }

    #[test]
    fn test_resolve_override_wins() {
        let resolver = OperationalParameterResolver::new();
        let overrides = PartialOperationalParameters {
            base_oee: Some(0.85),
            safety_buffer: Some(0.0),
            working_hours_year: Some(5000),
            ..Default::default()
        };
        let params = resolver
            .resolve("DNIN", Some(&overrides), &plant_defaults())
            .unwrap();

        assert_eq!(params.base_oee, 0.85);
        assert_eq!(params.safety_buffer, 0.0);
        assert_eq!(params.working_hours_year, 5000);
        // 未覆写字段保持工厂默认值
        assert_eq!(params.machine_size_m2, 75.0);
    }

    #[test]
    fn test_plant_default_beats_global_fallback() {
        let resolver = OperationalParameterResolver::new();
        let mut defaults = plant_defaults();
        defaults.working_hours_year = Some(7200);
        defaults.safety_buffer = Some(0.1);

        let params = resolver.resolve("DNIN", None, &defaults).unwrap();
        assert_eq!(params.working_hours_year, 7200);
        assert_eq!(params.safety_buffer, 0.1);
    }

    #[test]
    fn test_out_of_range_plant_default_rejected() {
        let resolver = OperationalParameterResolver::new();
        let cases: [(fn(&mut PartialOperationalParameters), &str); 5] = [
            (|d| d.total_plant_area = Some(-5000.0), "total_plant_area"),
            (|d| d.warehouse_capacity_units_m2 = Some(0.0), "warehouse_capacity_units_m2"),
            (|d| d.base_oee = Some(1.2), "base_oee"),
            (|d| d.safety_buffer = Some(-0.01), "safety_buffer"),
            (|d| d.working_hours_year = Some(0), "working_hours_year"),
        ];

        for (mutate, field) in cases {
            let mut defaults = plant_defaults();
            mutate(&mut defaults);
            match resolver.resolve("BAD", None, &defaults) {
                Err(ForecastError::DataIntegrityError { plant, detail }) => {
                    assert_eq!(plant, "BAD");
                    assert!(detail.contains(field), "detail={}", detail);
                }
                other => panic!("Expected DataIntegrityError for {}, got {:?}", field, other),
            }
        }
    }

    #[test]
    fn test_boundary_values_accepted() {
        let resolver = OperationalParameterResolver::new();
        let mut defaults = plant_defaults();
        defaults.base_oee = Some(1.0);
        defaults.safety_buffer = Some(0.0);
        assert!(resolver.resolve("DNIN", None, &defaults).is_ok());
    }

    #[test]
    fn test_missing_field_without_fallback() {
        let resolver = OperationalParameterResolver::new();
        let mut defaults = plant_defaults();
        defaults.machine_size_m2 = None;

        let result = resolver.resolve("DNIN", None, &defaults);
        match result {
            Err(ForecastError::DataIntegrityError { plant, detail }) => {
                assert_eq!(plant, "DNIN");
                assert!(detail.contains("machine_size_m2"));
            }
            other => panic!("Expected DataIntegrityError, got {:?}", other),
        }

        // 覆写可补齐缺失字段
        let overrides = PartialOperationalParameters {
            machine_size_m2: Some(60.0),
            ..Default::default()
        };
        let params = resolver.resolve("DNIN", Some(&overrides), &defaults).unwrap();
        assert_eq!(params.machine_size_m2, 60.0);
    }
}
