// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use plant_area_forecast::domain::params::PartialOperationalParameters;
use plant_area_forecast::domain::plant::{HistoricalAreaRecord, PlantProfile, SalesRecord};
use plant_area_forecast::repository::InMemoryPlantRegistry;
use std::sync::Arc;

// ==========================================
// PlantProfile 构建器
// ==========================================

pub struct PlantBuilder {
    plant_id: String,
    defaults: PartialOperationalParameters,
    sales: Vec<SalesRecord>,
    historical_area: Vec<HistoricalAreaRecord>,
}

impl PlantBuilder {
    pub fn new(plant_id: &str) -> Self {
        Self {
            plant_id: plant_id.to_string(),
            defaults: PartialOperationalParameters::default(),
            sales: Vec::new(),
            historical_area: Vec::new(),
        }
    }

    /// 便于精确计算的参数：基准生产面积 = 销量 / 60
    ///
    /// 节拍 1h、OEE 1.0、年工时 6000、设备占地 100 m²、缓冲 0、库容 1 件/m²
    pub fn unit_defaults(mut self, total_plant_area: f64) -> Self {
        self.defaults = PartialOperationalParameters {
            cycle_time_hours: Some(1.0),
            base_oee: Some(1.0),
            working_hours_year: Some(6000),
            machine_size_m2: Some(100.0),
            safety_buffer: Some(0.0),
            warehouse_capacity_units_m2: Some(1.0),
            total_plant_area: Some(total_plant_area),
        };
        self
    }

    pub fn defaults(mut self, defaults: PartialOperationalParameters) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn sales(mut self, fiscal_year: i32, sales_units: f64) -> Self {
        self.sales.push(SalesRecord::new(fiscal_year, sales_units));
        self
    }

    pub fn historical(mut self, record: HistoricalAreaRecord) -> Self {
        self.historical_area.push(record);
        self
    }

    /// 仅含必填面积的历史年
    pub fn historical_basic(self, fiscal_year: i32, production: f64, inventory: f64, passage: f64) -> Self {
        self.historical(HistoricalAreaRecord::new(fiscal_year, production, inventory, passage))
    }

    pub fn build(self) -> PlantProfile {
        PlantProfile {
            plant_id: self.plant_id,
            defaults: self.defaults,
            sales: self.sales,
            historical_area: self.historical_area,
        }
    }
}

// ==========================================
// 标准测试工厂
// ==========================================

/// UNIT 工厂: 两个校准年生产面积恰好等于基准面积
///
/// - FY2024: 销量 6000 → 基准 100；通道比例 0.2
/// - FY2025: 销量 12000 → 基准 200；通道比例 0.4
/// - FY2026..=FY2028 为预测年
pub fn unit_plant(total_plant_area: f64) -> PlantProfile {
    PlantBuilder::new("UNIT")
        .unit_defaults(total_plant_area)
        .sales(2024, 6000.0)
        .sales(2025, 12000.0)
        .sales(2026, 18000.0)
        .sales(2027, 24000.0)
        .sales(2028, 30000.0)
        .historical_basic(2024, 100.0, 300.0, 80.0)
        .historical_basic(2025, 200.0, 300.0, 200.0)
        .build()
}

/// 内置四厂 + 额外工厂
pub fn registry_with(extra: Vec<PlantProfile>) -> Arc<InMemoryPlantRegistry> {
    let mut registry = InMemoryPlantRegistry::builtin();
    for profile in extra {
        registry.insert(profile).unwrap();
    }
    Arc::new(registry)
}
