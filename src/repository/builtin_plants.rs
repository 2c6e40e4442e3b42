// ==========================================
// 工厂面积预测系统 - 内置工厂数据
// ==========================================
// 历史年: FY2024, FY2025
// 未来年: FY2026 起
// 说明: 标注 "假设值" 的参数需替换为工厂实测值
// ==========================================

use crate::domain::params::PartialOperationalParameters;
use crate::domain::plant::{HistoricalAreaRecord, PlantProfile, SalesRecord};

/// 历史面积行（FY, 生产, 空置, 通道, 人员, 行政, 库存, 外部仓, 客户仓, 总面积）
type AreaRow = (i32, f64, f64, f64, f64, f64, f64, f64, f64, f64);

fn sales_from(first_year: i32, units: &[f64]) -> Vec<SalesRecord> {
    units
        .iter()
        .enumerate()
        .map(|(i, &u)| SalesRecord::new(first_year + i as i32, u))
        .collect()
}

fn historical_from(rows: &[AreaRow]) -> Vec<HistoricalAreaRecord> {
    rows.iter()
        .map(
            |&(fy, production, vacant, passage, people, admin, inventory, external_wh, customer_wh, total)| {
                HistoricalAreaRecord {
                    fiscal_year: fy,
                    production_area: production,
                    inventory_area: inventory,
                    passage_area: passage,
                    people_area: Some(people),
                    admin_area: Some(admin),
                    external_wh_area: Some(external_wh),
                    customer_wh_area: Some(customer_wh),
                    vacant_area: Some(vacant),
                    total_area: Some(total),
                }
            },
        )
        .collect()
}

fn defaults(
    cycle_time_hours: f64,
    base_oee: f64,
    machine_size_m2: f64,
    warehouse_capacity_units_m2: f64,
    total_plant_area: f64,
) -> PartialOperationalParameters {
    PartialOperationalParameters {
        cycle_time_hours: Some(cycle_time_hours),
        base_oee: Some(base_oee),
        machine_size_m2: Some(machine_size_m2),
        warehouse_capacity_units_m2: Some(warehouse_capacity_units_m2),
        total_plant_area: Some(total_plant_area),
        ..Default::default()
    }
}

/// 内置工厂档案
pub fn builtin_profiles() -> Vec<PlantProfile> {
    vec![dnha_m(), dnha_j(), dnin(), dnki()]
}

// ==========================================
// DNHA_M
// ==========================================
fn dnha_m() -> PlantProfile {
    PlantProfile {
        plant_id: "DNHA_M".to_string(),
        // 节拍、设备占地为假设值；总面积取历史合计近似
        defaults: defaults(0.04, 0.79, 80.0, 6.0, 27900.0),
        sales: sales_from(
            2024,
            &[
                13_000_000.0, 14_000_000.0, 14_400_000.0, 15_200_000.0, 16_000_000.0,
                17_000_000.0, 21_000_000.0, 22_000_000.0, 22_000_000.0, 22_000_000.0,
                24_000_000.0, 24_000_000.0,
            ],
        ),
        historical_area: historical_from(&[
            (2024, 11763.0, 2425.0, 6526.0, 1216.0, 788.0, 3561.0, 4093.0, 10935.0, 27947.0),
            (2025, 9858.0, 6770.0, 4999.0, 671.0, 681.0, 3300.0, 4100.0, 10535.0, 23609.0),
        ]),
    }
}

// ==========================================
// DNHA_J
// ==========================================
fn dnha_j() -> PlantProfile {
    PlantProfile {
        plant_id: "DNHA_J".to_string(),
        // 节拍（Elfie + Thermal 均值）、OEE、设备占地为假设值
        defaults: defaults(0.06, 0.78, 70.0, 6.0, 15550.0),
        // 销量为 Elfie + Thermal 合计
        sales: sales_from(
            2024,
            &[
                1_000_000.0, 1_000_000.0, 2_000_000.0, 2_400_000.0, 2_600_000.0,
                5_000_000.0, 7_200_000.0, 8_200_000.0, 8_000_000.0, 8_200_000.0,
                8_200_000.0, 8_400_000.0,
            ],
        ),
        historical_area: historical_from(&[
            (2024, 5281.0, 2458.0, 2637.0, 708.0, 1999.0, 3226.0, 1500.0, 1800.0, 15350.0),
            (2025, 5836.0, 2497.0, 2735.0, 814.0, 1510.0, 2887.0, 1500.0, 2000.0, 15312.0),
        ]),
    }
}

// ==========================================
// DNIN
// ==========================================
fn dnin() -> PlantProfile {
    PlantProfile {
        plant_id: "DNIN".to_string(),
        // 设备占地为假设值
        defaults: defaults(0.05, 0.79, 75.0, 6.0, 29090.0),
        sales: sales_from(
            2024,
            &[
                12_666_667.0, 12_666_667.0, 12_666_667.0, 12_666_667.0,
                13_366_667.0, 14_691_667.0, 14_881_667.0, 14_666_667.0,
                14_666_667.0, 14_666_667.0, 14_666_667.0, 14_666_667.0,
            ],
        ),
        historical_area: historical_from(&[
            (2024, 8655.0, 862.0, 3906.0, 598.0, 2819.0, 11600.0, 0.0, 875.0, 27579.0),
            (2025, 9339.0, 2304.0, 3495.0, 571.0, 2819.0, 11293.0, 0.0, 875.0, 27517.0),
        ]),
    }
}

// ==========================================
// DNKI
// ==========================================
fn dnki() -> PlantProfile {
    PlantProfile {
        plant_id: "DNKI".to_string(),
        defaults: defaults(0.2, 0.75, 80.0, 6.0, 32523.0),
        sales: sales_from(
            2024,
            &[
                2_273_809.0, 1_940_476.0, 2_023_809.0, 2_136_905.0, 2_251_451.0,
                2_370_000.0, 2_500_000.0, 2_650_000.0, 2_800_000.0, 2_950_000.0,
                3_100_000.0, 3_250_000.0,
            ],
        ),
        historical_area: historical_from(&[
            (2024, 6416.0, 860.0, 3013.0, 685.0, 716.0, 4604.0, 17222.0, 1838.0, 32656.0),
            (2025, 5991.0, 1691.0, 3013.0, 685.0, 310.0, 4604.0, 15165.0, 2629.0, 29769.0),
        ]),
    }
}
