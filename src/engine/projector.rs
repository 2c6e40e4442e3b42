// ==========================================
// 工厂面积预测系统 - 面积推演引擎
// ==========================================
// 职责: 将校准比例与运行参数应用到未来各财年销量
// 输入: 未来销量（财年 > 校准窗口最后一年，可按 [start, end] 裁剪）
// 输出: 逐年 ProjectedYear（浮点，未取整）
// 红线: 逐年独立计算，年与年之间不传递状态
// 红线: 空置面积不低于总面积 8%；总面积可超出工厂面积，不截断
// ==========================================

use crate::domain::forecast::{CalibrationResult, ProjectedYear};
use crate::domain::params::OperationalParameters;
use crate::domain::plant::SalesRecord;
use crate::engine::error::{ForecastError, ForecastResult};
use crate::engine::formulas;
use tracing::instrument;

// ==========================================
// YearRange - 预测区间（含端点，均可缺省）
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct YearRange {
    pub start_year: Option<i32>,
    pub end_year: Option<i32>,
}

impl YearRange {
    pub fn new(start_year: Option<i32>, end_year: Option<i32>) -> Self {
        Self {
            start_year,
            end_year,
        }
    }

    /// 不限区间
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn contains(&self, fiscal_year: i32) -> bool {
        self.start_year.map_or(true, |s| fiscal_year >= s)
            && self.end_year.map_or(true, |e| fiscal_year <= e)
    }
}

// ==========================================
// AreaProjector - 面积推演引擎
// ==========================================
pub struct AreaProjector {
    // 无状态引擎
}

impl AreaProjector {
    pub fn new() -> Self {
        Self {}
    }

    /// 选取待预测的财年（按财年升序）
    ///
    /// 规则: 财年 > 校准窗口最后一年，且落在区间内
    pub fn select_future_years(
        &self,
        sales: &[SalesRecord],
        last_calibration_year: i32,
        range: YearRange,
    ) -> Vec<SalesRecord> {
        let mut future: Vec<SalesRecord> = sales
            .iter()
            .filter(|r| r.fiscal_year > last_calibration_year && range.contains(r.fiscal_year))
            .copied()
            .collect();
        future.sort_by_key(|r| r.fiscal_year);
        future
    }

    /// 推演全部未来财年
    #[instrument(skip(self, future_sales, calibration, params), fields(years = future_sales.len()))]
    pub fn project(
        &self,
        plant_id: &str,
        future_sales: &[SalesRecord],
        calibration: &CalibrationResult,
        params: &OperationalParameters,
    ) -> ForecastResult<Vec<ProjectedYear>> {
        future_sales
            .iter()
            .map(|record| self.project_year(plant_id, record, calibration, params))
            .collect()
    }

    /// 推演单个财年
    ///
    /// 1. 基准生产面积
    /// 2. 生产面积 = 基准 × 生产力系数
    /// 3. 库存面积 = 日均销量 × 库存天数 / 仓储密度
    /// 4. 通道面积 = 通道比例 × (生产 + 库存)
    /// 5. 客户仓 / 外部仓 = 库存面积 × 比例
    /// 6. 人员聚集 / 行政 = 生产面积 × 比例
    /// 7. 已分配 = 上述七项之和
    /// 8. 空置 = max(工厂面积 − 已分配, 8% 工厂面积)
    /// 9. 总面积 = 已分配 + 空置
    pub fn project_year(
        &self,
        plant_id: &str,
        record: &SalesRecord,
        calibration: &CalibrationResult,
        params: &OperationalParameters,
    ) -> ForecastResult<ProjectedYear> {
        let sales = record.sales_units;
        if !sales.is_finite() || sales < 0.0 {
            return Err(ForecastError::data_integrity(
                plant_id,
                format!("预测年 FY={} 销量非法: {}", record.fiscal_year, sales),
            ));
        }

        let baseline = formulas::baseline_production_area(sales, params);
        let production_area = baseline * calibration.productivity_factor;
        let inventory_area = formulas::inventory_area(sales, calibration.inventory_days, params);
        let passage_area =
            formulas::passage_area(production_area, inventory_area, calibration.passage_ratio);

        let customer_wh_area = inventory_area * calibration.customer_wh_ratio;
        let external_wh_area = inventory_area * calibration.external_wh_ratio;
        let people_gathering_area = production_area * calibration.people_gathering_ratio;
        let admin_area = production_area * calibration.admin_area_ratio;

        let allocated_area = production_area
            + inventory_area
            + passage_area
            + customer_wh_area
            + external_wh_area
            + people_gathering_area
            + admin_area;

        let vacant_area = formulas::vacant_area(params.total_plant_area, allocated_area);
        let total_area = allocated_area + vacant_area;

        if !total_area.is_finite() {
            return Err(ForecastError::InternalError(format!(
                "plant={} FY={} 推演结果非有限值",
                plant_id, record.fiscal_year
            )));
        }

        if vacant_area > params.total_plant_area - allocated_area {
            tracing::warn!(
                fiscal_year = record.fiscal_year,
                allocated_area,
                total_area,
                total_plant_area = params.total_plant_area,
                "总面积超出工厂总面积，不截断"
            );
        }

        Ok(ProjectedYear {
            fiscal_year: record.fiscal_year,
            sales_units: sales,
            baseline_production_area: baseline,
            production_area,
            inventory_area,
            passage_area,
            people_gathering_area,
            admin_area,
            external_wh_area,
            customer_wh_area,
            allocated_area,
            vacant_area,
            total_area,
        })
    }
}

impl Default for AreaProjector {
    fn default() -> Self {
        Self::new()
    }
}
