// ==========================================
// 工厂面积预测系统 - 工厂主数据领域模型
// ==========================================
// 用途: 工厂档案（默认参数 + 销量序列 + 两年历史面积）
// 红线: 工厂档案只读，由工厂注册表持有
// ==========================================

use crate::domain::params::PartialOperationalParameters;
use serde::{Deserialize, Serialize};

// ==========================================
// SalesRecord - 年度销量
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    #[serde(rename = "FY", alias = "fiscal_year")]
    pub fiscal_year: i32,
    pub sales_units: f64, // 年销量 (件, >=0)
}

impl SalesRecord {
    pub fn new(fiscal_year: i32, sales_units: f64) -> Self {
        Self {
            fiscal_year,
            sales_units,
        }
    }
}

// ==========================================
// HistoricalAreaRecord - 历史年度面积
// ==========================================
// 校准窗口: 每个工厂恰好两条，年份须在销量序列中存在
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalAreaRecord {
    #[serde(rename = "FY", alias = "fiscal_year")]
    pub fiscal_year: i32,

    // ===== 必填面积 (m²) =====
    pub production_area: f64,
    pub inventory_area: f64,
    pub passage_area: f64,

    // ===== 政策面积 (可缺失，缺失时使用兜底比例) =====
    #[serde(default)]
    pub people_area: Option<f64>,
    #[serde(default)]
    pub admin_area: Option<f64>,
    #[serde(default)]
    pub external_wh_area: Option<f64>,
    #[serde(default)]
    pub customer_wh_area: Option<f64>,

    // ===== 仅用于展示，不参与校准 =====
    #[serde(default)]
    pub vacant_area: Option<f64>,
    #[serde(default)]
    pub total_area: Option<f64>,
}

impl HistoricalAreaRecord {
    /// 仅包含必填面积的历史记录
    pub fn new(fiscal_year: i32, production_area: f64, inventory_area: f64, passage_area: f64) -> Self {
        Self {
            fiscal_year,
            production_area,
            inventory_area,
            passage_area,
            people_area: None,
            admin_area: None,
            external_wh_area: None,
            customer_wh_area: None,
            vacant_area: None,
            total_area: None,
        }
    }
}

// ==========================================
// PlantProfile - 工厂档案
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantProfile {
    pub plant_id: String,
    #[serde(default)]
    pub defaults: PartialOperationalParameters,
    pub sales: Vec<SalesRecord>,
    pub historical_area: Vec<HistoricalAreaRecord>,
}

impl PlantProfile {
    /// 按财年查找销量
    pub fn sales_for(&self, fiscal_year: i32) -> Option<f64> {
        find_sales(&self.sales, fiscal_year)
    }
}

/// 在销量序列中按财年查找
pub fn find_sales(sales: &[SalesRecord], fiscal_year: i32) -> Option<f64> {
    sales
        .iter()
        .find(|r| r.fiscal_year == fiscal_year)
        .map(|r| r.sales_units)
}
