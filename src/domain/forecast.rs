// ==========================================
// 工厂面积预测系统 - 校准与预测结果模型
// ==========================================
// 用途: 校准比例、逐年预测面积、响应报文
// 红线: 中间计算保持浮点，仅在输出边界取整
// ==========================================

use crate::domain::params::OperationalParameters;
use crate::domain::plant::HistoricalAreaRecord;
use serde::{Deserialize, Serialize};

// ==========================================
// RatioSource - 比例来源
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RatioSource {
    Historical, // 两年历史均值
    Fallback,   // 历史字段缺失，使用兜底常量
}

/// 四项政策比例的来源
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySources {
    pub people_gathering: RatioSource,
    pub admin_area: RatioSource,
    pub external_wh: RatioSource,
    pub customer_wh: RatioSource,
}

// ==========================================
// CalibrationYear - 单个校准年的中间量
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalibrationYear {
    pub fiscal_year: i32,
    pub sales_units: f64,
    pub production_area: f64,
    pub baseline_production_area: f64,
    pub productivity_factor: f64,
    pub inventory_days: f64,
    pub passage_ratio: f64,
}

// ==========================================
// CalibrationResult - 校准结果（未取整）
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationResult {
    pub productivity_factor: f64,
    pub inventory_days: f64,
    pub passage_ratio: f64,
    pub people_gathering_ratio: f64,
    pub admin_area_ratio: f64,
    pub external_wh_ratio: f64,
    pub customer_wh_ratio: f64,
    pub policy_sources: PolicySources,
    /// 两个校准年的逐年中间量（按财年升序）
    pub years: [CalibrationYear; 2],
}

impl CalibrationResult {
    /// 校准窗口最后一年
    pub fn last_calibration_year(&self) -> i32 {
        self.years[0].fiscal_year.max(self.years[1].fiscal_year)
    }
}

// ==========================================
// ProjectedYear - 单个预测年的浮点结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProjectedYear {
    pub fiscal_year: i32,
    pub sales_units: f64,
    pub baseline_production_area: f64,
    pub production_area: f64,
    pub inventory_area: f64,
    pub passage_area: f64,
    pub people_gathering_area: f64,
    pub admin_area: f64,
    pub external_wh_area: f64,
    pub customer_wh_area: f64,
    pub allocated_area: f64,
    pub vacant_area: f64,
    pub total_area: f64,
}

impl ProjectedYear {
    /// 总面积超出工厂总面积（总面积不截断，仅标记）
    ///
    /// 空置下限生效时即超出: 已分配 > 92% 工厂面积
    pub fn is_over_capacity(&self, total_plant_area: f64) -> bool {
        self.vacant_area > total_plant_area - self.allocated_area
    }
}

// ==========================================
// ForecastYearResult - 预测年输出（整数 m²）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastYearResult {
    #[serde(rename = "FY")]
    pub fiscal_year: i32,
    pub sales_units: i64,
    #[serde(rename = "production_area_m2")]
    pub production_area: i64,
    #[serde(rename = "inventory_area_m2")]
    pub inventory_area: i64,
    #[serde(rename = "passage_area_m2")]
    pub passage_area: i64,
    #[serde(rename = "people_gathering_area_m2")]
    pub people_gathering_area: i64,
    #[serde(rename = "admin_area_m2")]
    pub admin_area: i64,
    #[serde(rename = "external_wh_area_m2")]
    pub external_wh_area: i64,
    #[serde(rename = "customer_wh_area_m2")]
    pub customer_wh_area: i64,
    #[serde(rename = "vacant_area_m2")]
    pub vacant_area: i64,
    #[serde(rename = "total_area_m2")]
    pub total_area: i64,
    /// 分配面积超出工厂总面积
    pub over_capacity: bool,
}

impl ForecastYearResult {
    /// 七项分配面积之和（取整后）
    pub fn allocated_sum(&self) -> i64 {
        self.production_area
            + self.inventory_area
            + self.passage_area
            + self.people_gathering_area
            + self.admin_area
            + self.external_wh_area
            + self.customer_wh_area
    }
}

// ==========================================
// 响应报文
// ==========================================

/// 校准比例（已取整）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationSummary {
    pub productivity_factor: f64,
    pub inventory_days: f64,
    pub passage_ratio: f64,
}

/// 政策比例（已取整）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyParams {
    pub people_gathering_ratio: f64,
    pub admin_area_ratio: f64,
    pub external_wh_ratio: f64,
    pub customer_wh_ratio: f64,
    pub customer_wh_policy: String,
}

/// 校准年调试行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalDebugRow {
    #[serde(rename = "FY")]
    pub fiscal_year: i32,
    pub sales_units: i64,
    pub production_area: f64,
    pub baseline_prod_area: f64,
    pub productivity_factor: f64,
}

/// 面积预测响应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastResponse {
    pub plant: String,
    pub operational_params: OperationalParameters,
    pub calibration: CalibrationSummary,
    pub policy_params: PolicyParams,
    pub forecast: Vec<ForecastYearResult>,
    pub historical_debug: Vec<HistoricalDebugRow>,
    pub historical_areas: Vec<HistoricalAreaRecord>,
}
