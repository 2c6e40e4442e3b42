// ==========================================
// 工厂面积预测系统 - 校准引擎
// ==========================================
// 职责: 由两年历史数据反推无量纲比例
// 输入: 两条历史面积记录 + 销量序列 + 运行参数
// 输出: CalibrationResult（每项比例为两年算术平均或兜底常量）
// 红线: 分母为零 / 比例非有限值 → CalibrationError，绝不静默产出
// ==========================================

use crate::config::defaults::{policy_fallback, CALIBRATION_WINDOW_YEARS};
use crate::domain::forecast::{CalibrationResult, CalibrationYear, PolicySources, RatioSource};
use crate::domain::params::OperationalParameters;
use crate::domain::plant::{find_sales, HistoricalAreaRecord, SalesRecord};
use crate::engine::error::{ForecastError, ForecastResult};
use crate::engine::formulas;
use tracing::instrument;

// ==========================================
// CalibrationEngine - 校准引擎
// ==========================================
pub struct CalibrationEngine {
    // 无状态引擎
}

impl CalibrationEngine {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 校准
    ///
    /// 规则:
    /// 1) 校准窗口必须恰好两个不同财年
    /// 2) 每个校准年必须有销量
    /// 3) 生产力系数 / 库存天数 / 通道比例：两年比例的算术平均
    /// 4) 政策比例：两年均有字段 → 平均；两年均缺失 → 兜底常量；仅一年有 → 数据完整性错误
    #[instrument(skip(self, historical, sales, params), fields(
        historical_count = historical.len(),
        sales_count = sales.len()
    ))]
    pub fn calibrate(
        &self,
        plant_id: &str,
        historical: &[HistoricalAreaRecord],
        sales: &[SalesRecord],
        params: &OperationalParameters,
    ) -> ForecastResult<CalibrationResult> {
        let window = self.calibration_window(plant_id, historical)?;

        let mut years = Vec::with_capacity(CALIBRATION_WINDOW_YEARS);
        for record in window.iter() {
            years.push(self.calibrate_year(plant_id, record, sales, params)?);
        }
        let years = [years[0], years[1]];

        let productivity_factor =
            formulas::mean_of_two(years[0].productivity_factor, years[1].productivity_factor);
        let inventory_days = formulas::mean_of_two(years[0].inventory_days, years[1].inventory_days);
        let passage_ratio = formulas::mean_of_two(years[0].passage_ratio, years[1].passage_ratio);

        let (people_gathering_ratio, people_source) = self.policy_ratio(
            plant_id,
            &window,
            "people_gathering_ratio",
            |r| r.people_area,
            |r| r.production_area,
            policy_fallback::PEOPLE_GATHERING_RATIO,
        )?;
        let (admin_area_ratio, admin_source) = self.policy_ratio(
            plant_id,
            &window,
            "admin_area_ratio",
            |r| r.admin_area,
            |r| r.production_area,
            policy_fallback::ADMIN_AREA_RATIO,
        )?;
        let (external_wh_ratio, external_source) = self.policy_ratio(
            plant_id,
            &window,
            "external_wh_ratio",
            |r| r.external_wh_area,
            |r| r.inventory_area,
            policy_fallback::EXTERNAL_WH_RATIO,
        )?;
        let (customer_wh_ratio, customer_source) = self.policy_ratio(
            plant_id,
            &window,
            "customer_wh_ratio",
            |r| r.customer_wh_area,
            |r| r.inventory_area,
            policy_fallback::CUSTOMER_WH_RATIO,
        )?;

        tracing::debug!(
            productivity_factor,
            inventory_days,
            passage_ratio,
            "校准完成"
        );

        Ok(CalibrationResult {
            productivity_factor,
            inventory_days,
            passage_ratio,
            people_gathering_ratio,
            admin_area_ratio,
            external_wh_ratio,
            customer_wh_ratio,
            policy_sources: PolicySources {
                people_gathering: people_source,
                admin_area: admin_source,
                external_wh: external_source,
                customer_wh: customer_source,
            },
            years,
        })
    }

    // ==========================================
    // 校准窗口
    // ==========================================

    /// 校验校准窗口并按财年升序返回
    fn calibration_window<'a>(
        &self,
        plant_id: &str,
        historical: &'a [HistoricalAreaRecord],
    ) -> ForecastResult<[&'a HistoricalAreaRecord; 2]> {
        if historical.len() != CALIBRATION_WINDOW_YEARS {
            return Err(ForecastError::data_integrity(
                plant_id,
                format!(
                    "校准窗口必须恰好 {} 年历史面积数据，实际 {} 条",
                    CALIBRATION_WINDOW_YEARS,
                    historical.len()
                ),
            ));
        }

        let (a, b) = (&historical[0], &historical[1]);
        if a.fiscal_year == b.fiscal_year {
            return Err(ForecastError::data_integrity(
                plant_id,
                format!("校准窗口财年重复: FY={}", a.fiscal_year),
            ));
        }

        for record in [a, b] {
            self.validate_areas(plant_id, record)?;
        }

        Ok(if a.fiscal_year < b.fiscal_year { [a, b] } else { [b, a] })
    }

    /// 面积字段必须为非负有限值
    fn validate_areas(&self, plant_id: &str, record: &HistoricalAreaRecord) -> ForecastResult<()> {
        let fields = [
            ("production_area", Some(record.production_area)),
            ("inventory_area", Some(record.inventory_area)),
            ("passage_area", Some(record.passage_area)),
            ("people_area", record.people_area),
            ("admin_area", record.admin_area),
            ("external_wh_area", record.external_wh_area),
            ("customer_wh_area", record.customer_wh_area),
        ];

        for (field, value) in fields {
            if let Some(v) = value {
                if !v.is_finite() || v < 0.0 {
                    return Err(ForecastError::data_integrity(
                        plant_id,
                        format!("FY={} 字段 {} 非法: {}", record.fiscal_year, field, v),
                    ));
                }
            }
        }
        Ok(())
    }

    // ==========================================
    // 单年校准
    // ==========================================

    fn calibrate_year(
        &self,
        plant_id: &str,
        record: &HistoricalAreaRecord,
        sales: &[SalesRecord],
        params: &OperationalParameters,
    ) -> ForecastResult<CalibrationYear> {
        let fy = record.fiscal_year;

        let sales_units = find_sales(sales, fy).ok_or_else(|| {
            ForecastError::data_integrity(plant_id, format!("校准年 FY={} 缺少销量数据", fy))
        })?;
        if !sales_units.is_finite() || sales_units < 0.0 {
            return Err(ForecastError::data_integrity(
                plant_id,
                format!("校准年 FY={} 销量非法: {}", fy, sales_units),
            ));
        }

        // 分母检查
        if sales_units == 0.0 {
            return Err(ForecastError::calibration(plant_id, fy, "sales_units", "销量为零，无法反推库存天数"));
        }
        if record.production_area == 0.0 {
            return Err(ForecastError::calibration(plant_id, fy, "production_area", "生产面积为零"));
        }
        if record.inventory_area == 0.0 {
            return Err(ForecastError::calibration(plant_id, fy, "inventory_area", "库存面积为零"));
        }

        let baseline = formulas::baseline_production_area(sales_units, params);
        if !baseline.is_finite() || baseline <= 0.0 {
            return Err(ForecastError::calibration(
                plant_id,
                fy,
                "baseline_production_area",
                format!("基准生产面积无效: {}", baseline),
            ));
        }
        let productivity_factor = checked_ratio(
            plant_id,
            fy,
            "productivity_factor",
            record.production_area,
            baseline,
        )?;

        let inventory_days = formulas::inventory_days(record.inventory_area, sales_units, params);
        ensure_finite(plant_id, fy, "inventory_days", inventory_days)?;

        let passage_ratio = checked_ratio(
            plant_id,
            fy,
            "passage_ratio",
            record.passage_area,
            record.production_area + record.inventory_area,
        )?;

        Ok(CalibrationYear {
            fiscal_year: fy,
            sales_units,
            production_area: record.production_area,
            baseline_production_area: baseline,
            productivity_factor,
            inventory_days,
            passage_ratio,
        })
    }

    // ==========================================
    // 政策比例
    // ==========================================

    fn policy_ratio(
        &self,
        plant_id: &str,
        window: &[&HistoricalAreaRecord; 2],
        field: &str,
        numerator: impl Fn(&HistoricalAreaRecord) -> Option<f64>,
        denominator: impl Fn(&HistoricalAreaRecord) -> f64,
        fallback: f64,
    ) -> ForecastResult<(f64, RatioSource)> {
        match (numerator(window[0]), numerator(window[1])) {
            (Some(n0), Some(n1)) => {
                let r0 = checked_ratio(plant_id, window[0].fiscal_year, field, n0, denominator(window[0]))?;
                let r1 = checked_ratio(plant_id, window[1].fiscal_year, field, n1, denominator(window[1]))?;
                Ok((formulas::mean_of_two(r0, r1), RatioSource::Historical))
            }
            (None, None) => {
                tracing::debug!(field, fallback, "历史字段缺失，使用兜底比例");
                Ok((fallback, RatioSource::Fallback))
            }
            (Some(_), None) | (None, Some(_)) => Err(ForecastError::data_integrity(
                plant_id,
                format!(
                    "{} 所需历史字段仅在一个校准年存在（FY={} / FY={}）",
                    field, window[0].fiscal_year, window[1].fiscal_year
                ),
            )),
        }
    }
}

impl Default for CalibrationEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// 带分母检查的比例
fn checked_ratio(
    plant_id: &str,
    fiscal_year: i32,
    field: &str,
    numerator: f64,
    denominator: f64,
) -> ForecastResult<f64> {
    if denominator == 0.0 {
        return Err(ForecastError::calibration(plant_id, fiscal_year, field, "分母为零"));
    }
    let ratio = numerator / denominator;
    ensure_finite(plant_id, fiscal_year, field, ratio)?;
    Ok(ratio)
}

fn ensure_finite(plant_id: &str, fiscal_year: i32, field: &str, value: f64) -> ForecastResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ForecastError::calibration(
            plant_id,
            fiscal_year,
            field,
            format!("比例非有限值: {}", value),
        ))
    }
}
