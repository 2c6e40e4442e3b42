// ==========================================
// 工厂面积预测系统 - 全局兜底常量
// ==========================================
// 职责: 运行参数与政策比例的全局兜底值
// 说明: 仅当用户覆写与工厂默认值均缺失时使用
// ==========================================

/// 年工作小时（3 班 × 约 250 天）
pub const WORKING_HOURS_YEAR: u32 = 6000;

/// 需求安全缓冲（5%）
pub const SAFETY_BUFFER: f64 = 0.05;

/// 年天数（库存天数换算）
pub const DAYS_PER_YEAR: f64 = 365.0;

/// 空置面积下限（占工厂总面积比例）
pub const MIN_VACANT_RATIO: f64 = 0.08;

/// 校准窗口年数
pub const CALIBRATION_WINDOW_YEARS: usize = 2;

// ==========================================
// 政策比例兜底值（历史字段缺失时统一使用，不参与平均）
// ==========================================
pub mod policy_fallback {
    /// 人员聚集面积 / 生产面积
    pub const PEOPLE_GATHERING_RATIO: f64 = 0.10;
    /// 行政面积 / 生产面积
    pub const ADMIN_AREA_RATIO: f64 = 0.08;
    /// 外部仓库面积 / 库存面积
    pub const EXTERNAL_WH_RATIO: f64 = 1.00;
    /// 客户仓库面积 / 库存面积
    pub const CUSTOMER_WH_RATIO: f64 = 0.19;
}

// ==========================================
// 客户仓库政策说明（随响应输出）
// ==========================================
pub const CUSTOMER_WH_POLICY_HISTORICAL: &str = "Calculated from historical data";
pub const CUSTOMER_WH_POLICY_FALLBACK: &str = "Fixed 19% policy (no historical data)";
