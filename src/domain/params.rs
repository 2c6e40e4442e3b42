// ==========================================
// 工厂面积预测系统 - 运行参数领域模型
// ==========================================
// 用途: 产能换算所需的运行参数（节拍/OEE/工时/设备占地/缓冲/库容/总面积）
// 红线: 参数一经解析即不可变，每次请求独立构造
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// OperationalParameters - 完整运行参数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OperationalParameters {
    pub cycle_time_hours: f64,            // 单件节拍 (小时/件)
    pub base_oee: f64,                    // 设备综合效率 (0-1)
    pub working_hours_year: u32,          // 年工作小时
    pub machine_size_m2: f64,             // 单台设备占地 (m²)
    pub safety_buffer: f64,               // 需求安全缓冲 (比例, >=0)
    pub warehouse_capacity_units_m2: f64, // 仓储密度 (件/m²)
    pub total_plant_area: f64,            // 工厂总面积 (m²)
}

impl OperationalParameters {
    /// 按字段取值（整数字段转为 f64）
    pub fn value(&self, field: ParameterField) -> f64 {
        match field {
            ParameterField::CycleTimeHours => self.cycle_time_hours,
            ParameterField::BaseOee => self.base_oee,
            ParameterField::WorkingHoursYear => f64::from(self.working_hours_year),
            ParameterField::MachineSizeM2 => self.machine_size_m2,
            ParameterField::SafetyBuffer => self.safety_buffer,
            ParameterField::WarehouseCapacityUnitsM2 => self.warehouse_capacity_units_m2,
            ParameterField::TotalPlantArea => self.total_plant_area,
        }
    }
}

// ==========================================
// PartialOperationalParameters - 部分运行参数
// ==========================================
// 用途: 用户覆写 / 工厂默认值，字段均可缺失
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialOperationalParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cycle_time_hours: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_oee: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_hours_year: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub machine_size_m2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_buffer: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warehouse_capacity_units_m2: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_plant_area: Option<f64>,
}

impl PartialOperationalParameters {
    /// 是否没有任何字段
    pub fn is_empty(&self) -> bool {
        self.cycle_time_hours.is_none()
            && self.base_oee.is_none()
            && self.working_hours_year.is_none()
            && self.machine_size_m2.is_none()
            && self.safety_buffer.is_none()
            && self.warehouse_capacity_units_m2.is_none()
            && self.total_plant_area.is_none()
    }
}

// ==========================================
// ParameterField - 参数字段标识
// ==========================================
// 用途: 错误信息与校验结果中精确指出字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterField {
    CycleTimeHours,
    BaseOee,
    WorkingHoursYear,
    MachineSizeM2,
    SafetyBuffer,
    WarehouseCapacityUnitsM2,
    TotalPlantArea,
}

impl ParameterField {
    pub const ALL: [ParameterField; 7] = [
        ParameterField::CycleTimeHours,
        ParameterField::BaseOee,
        ParameterField::WorkingHoursYear,
        ParameterField::MachineSizeM2,
        ParameterField::SafetyBuffer,
        ParameterField::WarehouseCapacityUnitsM2,
        ParameterField::TotalPlantArea,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ParameterField::CycleTimeHours => "cycle_time_hours",
            ParameterField::BaseOee => "base_oee",
            ParameterField::WorkingHoursYear => "working_hours_year",
            ParameterField::MachineSizeM2 => "machine_size_m2",
            ParameterField::SafetyBuffer => "safety_buffer",
            ParameterField::WarehouseCapacityUnitsM2 => "warehouse_capacity_units_m2",
            ParameterField::TotalPlantArea => "total_plant_area",
        }
    }
}

impl fmt::Display for ParameterField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
