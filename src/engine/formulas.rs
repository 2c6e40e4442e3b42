// ==========================================
// 工厂面积预测系统 - 面积换算公式
// ==========================================
// 职责: 校准与推演共用的基础公式
// 红线: 公式只做浮点计算，不取整、不校验
// ==========================================

use crate::config::defaults::{DAYS_PER_YEAR, MIN_VACANT_RATIO};
use crate::domain::params::OperationalParameters;

/// 基准生产面积
///
/// 需求机时 → 设备台数 → 设备占地:
/// ((销量 × (1 + 安全缓冲)) × 节拍) / (OEE × 年工时) × 单台占地
pub fn baseline_production_area(sales_units: f64, params: &OperationalParameters) -> f64 {
    let volume = sales_units * (1.0 + params.safety_buffer);
    let required_hours = volume * params.cycle_time_hours;
    let machines_required =
        required_hours / (params.base_oee * f64::from(params.working_hours_year));
    machines_required * params.machine_size_m2
}

/// 库存面积 = 日均销量 × 库存天数 / 仓储密度
pub fn inventory_area(sales_units: f64, inventory_days: f64, params: &OperationalParameters) -> f64 {
    let daily_sales = sales_units / DAYS_PER_YEAR;
    let avg_inventory_units = daily_sales * inventory_days;
    avg_inventory_units / params.warehouse_capacity_units_m2
}

/// 库存天数（库存面积公式的反推）
pub fn inventory_days(inventory_area: f64, sales_units: f64, params: &OperationalParameters) -> f64 {
    (inventory_area * params.warehouse_capacity_units_m2 * DAYS_PER_YEAR) / sales_units
}

/// 通道面积 = 通道比例 × (生产 + 库存)
pub fn passage_area(production_area: f64, inventory_area: f64, passage_ratio: f64) -> f64 {
    passage_ratio * (production_area + inventory_area)
}

/// 空置面积下限
pub fn min_vacant_area(total_plant_area: f64) -> f64 {
    total_plant_area * MIN_VACANT_RATIO
}

/// 空置面积 = max(总面积 − 已分配, 下限)
pub fn vacant_area(total_plant_area: f64, allocated_area: f64) -> f64 {
    let calculated = total_plant_area - allocated_area;
    calculated.max(min_vacant_area(total_plant_area))
}

/// 两个年度值的算术平均
pub fn mean_of_two(a: f64, b: f64) -> f64 {
    (a + b) / 2.0
}

/// 按小数位四舍六入五成双
pub fn round_to_decimals(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round_ties_even() / factor
}

/// 面积取整（四舍六入五成双）
pub fn round_area(value: f64) -> i64 {
    value.round_ties_even() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> OperationalParameters {
        OperationalParameters {
            cycle_time_hours: 0.2,
            base_oee: 0.75,
            working_hours_year: 6000,
            machine_size_m2: 80.0,
            safety_buffer: 0.05,
            warehouse_capacity_units_m2: 6.0,
            total_plant_area: 32523.0,
        }
    }

    #[test]
    fn test_baseline_production_area() {
        // 2_000_000 × 1.05 × 0.2 / (0.75 × 6000) × 80 = 7466.67
        let area = baseline_production_area(2_000_000.0, &params());
        assert!((area - 7466.666_666_666_667).abs() < 1e-6);
    }

    #[test]
    fn test_inventory_round_trip() {
        let p = params();
        let days = inventory_days(4604.0, 2_273_809.0, &p);
        let area = inventory_area(2_273_809.0, days, &p);
        assert!((area - 4604.0).abs() < 1e-9);
    }

    #[test]
    fn test_vacant_area_floor() {
        // 未超分配：剩余面积
        assert_eq!(vacant_area(10000.0, 5000.0), 5000.0);
        // 超分配：下限 8%
        assert_eq!(vacant_area(10000.0, 12000.0), 800.0);
        // 剩余不足下限
        assert_eq!(vacant_area(10000.0, 9500.0), 800.0);
    }

    #[test]
    fn test_round_half_to_even() {
        assert_eq!(round_area(2.5), 2);
        assert_eq!(round_area(3.5), 4);
        assert_eq!(round_area(-0.4), 0);
        assert_eq!(round_to_decimals(0.125, 2), 0.12);
        assert_eq!(round_to_decimals(1.2345678, 4), 1.2346);
    }
}
