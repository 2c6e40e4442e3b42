// ==========================================
// 工厂面积预测系统 - 结果组装器
// ==========================================
// 职责: 取整并打包 校准比例 / 政策比例 / 逐年预测 / 校准调试行
// 红线: 只做取整与打包，不做任何业务计算
// ==========================================
// 取整规则（四舍六入五成双）:
// - productivity_factor: 3 位小数
// - inventory_days: 1 位小数
// - passage_ratio: 3 位小数
// - 政策比例: 4 位小数
// - 面积: 整数 m²；销量截断为整数
// ==========================================

use crate::config::defaults::{CUSTOMER_WH_POLICY_FALLBACK, CUSTOMER_WH_POLICY_HISTORICAL};
use crate::domain::forecast::{
    CalibrationResult, CalibrationSummary, ForecastResponse, ForecastYearResult,
    HistoricalDebugRow, PolicyParams, ProjectedYear, RatioSource,
};
use crate::domain::params::OperationalParameters;
use crate::domain::plant::HistoricalAreaRecord;
use crate::engine::formulas::{round_area, round_to_decimals};

pub struct ResultAssembler {
    // 无状态
}

impl ResultAssembler {
    pub fn new() -> Self {
        Self {}
    }

    /// 组装响应
    pub fn assemble(
        &self,
        plant_id: &str,
        params: &OperationalParameters,
        calibration: &CalibrationResult,
        projected: &[ProjectedYear],
        historical_areas: &[HistoricalAreaRecord],
    ) -> ForecastResponse {
        let mut historical_areas = historical_areas.to_vec();
        historical_areas.sort_by_key(|r| r.fiscal_year);

        ForecastResponse {
            plant: plant_id.to_string(),
            operational_params: *params,
            calibration: self.calibration_summary(calibration),
            policy_params: self.policy_params(calibration),
            forecast: projected
                .iter()
                .map(|y| self.forecast_year(y, params.total_plant_area))
                .collect(),
            historical_debug: self.historical_debug(calibration),
            historical_areas,
        }
    }

    pub fn calibration_summary(&self, calibration: &CalibrationResult) -> CalibrationSummary {
        CalibrationSummary {
            productivity_factor: round_to_decimals(calibration.productivity_factor, 3),
            inventory_days: round_to_decimals(calibration.inventory_days, 1),
            passage_ratio: round_to_decimals(calibration.passage_ratio, 3),
        }
    }

    pub fn policy_params(&self, calibration: &CalibrationResult) -> PolicyParams {
        let customer_wh_policy = match calibration.policy_sources.customer_wh {
            RatioSource::Historical => CUSTOMER_WH_POLICY_HISTORICAL,
            RatioSource::Fallback => CUSTOMER_WH_POLICY_FALLBACK,
        };

        PolicyParams {
            people_gathering_ratio: round_to_decimals(calibration.people_gathering_ratio, 4),
            admin_area_ratio: round_to_decimals(calibration.admin_area_ratio, 4),
            external_wh_ratio: round_to_decimals(calibration.external_wh_ratio, 4),
            customer_wh_ratio: round_to_decimals(calibration.customer_wh_ratio, 4),
            customer_wh_policy: customer_wh_policy.to_string(),
        }
    }

    pub fn forecast_year(&self, year: &ProjectedYear, total_plant_area: f64) -> ForecastYearResult {
        ForecastYearResult {
            fiscal_year: year.fiscal_year,
            sales_units: year.sales_units.trunc() as i64,
            production_area: round_area(year.production_area),
            inventory_area: round_area(year.inventory_area),
            passage_area: round_area(year.passage_area),
            people_gathering_area: round_area(year.people_gathering_area),
            admin_area: round_area(year.admin_area),
            external_wh_area: round_area(year.external_wh_area),
            customer_wh_area: round_area(year.customer_wh_area),
            vacant_area: round_area(year.vacant_area),
            total_area: round_area(year.total_area),
            over_capacity: year.is_over_capacity(total_plant_area),
        }
    }

    /// 校准年调试行（原始浮点，不取整）
    pub fn historical_debug(&self, calibration: &CalibrationResult) -> Vec<HistoricalDebugRow> {
        calibration
            .years
            .iter()
            .map(|y| HistoricalDebugRow {
                fiscal_year: y.fiscal_year,
                sales_units: y.sales_units.trunc() as i64,
                production_area: y.production_area,
                baseline_prod_area: y.baseline_production_area,
                productivity_factor: y.productivity_factor,
            })
            .collect()
    }
}

impl Default for ResultAssembler {
    fn default() -> Self {
        Self::new()
    }
}
