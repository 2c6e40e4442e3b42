// ==========================================
// 工厂面积预测系统 - 预测编排器
// ==========================================
// 职责: 串联完整预测流程
// 流程: 工厂查找 → 参数解析 → 两年校准 → 逐年推演 → 结果组装
// 红线: 校准与推演全部成功才输出，失败时不返回任何预测年
// ==========================================

use crate::domain::forecast::ForecastResponse;
use crate::domain::params::PartialOperationalParameters;
use crate::domain::plant::{HistoricalAreaRecord, SalesRecord};
use crate::engine::assembler::ResultAssembler;
use crate::engine::calibration::CalibrationEngine;
use crate::engine::error::{ForecastError, ForecastResult};
use crate::engine::events::{ForecastEvent, ForecastObserver, OptionalObserver};
use crate::engine::param_resolver::OperationalParameterResolver;
use crate::engine::projector::{AreaProjector, YearRange};
use crate::repository::PlantRegistry;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::instrument;

// ==========================================
// ForecastInput - 单次预测输入
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ForecastInput {
    pub plant_id: String,
    /// 运行参数覆写
    pub overrides: Option<PartialOperationalParameters>,
    /// 预测区间（含端点）
    pub range: YearRange,
    /// 替换注册表中的销量序列（如上传文件）
    pub sales_override: Option<Vec<SalesRecord>>,
    /// 替换注册表中的历史面积记录（如上传文件）
    pub historical_override: Option<Vec<HistoricalAreaRecord>>,
}

impl ForecastInput {
    pub fn for_plant(plant_id: &str) -> Self {
        Self {
            plant_id: plant_id.to_string(),
            ..Default::default()
        }
    }

    pub fn with_overrides(mut self, overrides: PartialOperationalParameters) -> Self {
        self.overrides = Some(overrides);
        self
    }

    pub fn with_range(mut self, start_year: Option<i32>, end_year: Option<i32>) -> Self {
        self.range = YearRange::new(start_year, end_year);
        self
    }

    pub fn with_sales(mut self, sales: Vec<SalesRecord>) -> Self {
        self.sales_override = Some(sales);
        self
    }

    pub fn with_historical(mut self, historical: Vec<HistoricalAreaRecord>) -> Self {
        self.historical_override = Some(historical);
        self
    }
}

// ==========================================
// ForecastOrchestrator - 预测编排器
// ==========================================
pub struct ForecastOrchestrator {
    registry: Arc<dyn PlantRegistry>,
    resolver: OperationalParameterResolver,
    calibration_engine: CalibrationEngine,
    projector: AreaProjector,
    assembler: ResultAssembler,
    observer: OptionalObserver,
}

impl ForecastOrchestrator {
    pub fn new(registry: Arc<dyn PlantRegistry>) -> Self {
        Self {
            registry,
            resolver: OperationalParameterResolver::new(),
            calibration_engine: CalibrationEngine::new(),
            projector: AreaProjector::new(),
            assembler: ResultAssembler::new(),
            observer: OptionalObserver::none(),
        }
    }

    /// 挂载计算过程观察者
    pub fn with_observer(mut self, observer: Arc<dyn ForecastObserver>) -> Self {
        self.observer = OptionalObserver::with_observer(observer);
        self
    }

    /// 执行单个工厂的面积预测
    #[instrument(skip(self, input), fields(plant_id = %input.plant_id))]
    pub fn run(&self, input: &ForecastInput) -> ForecastResult<ForecastResponse> {
        let plant_id = input.plant_id.as_str();

        // 1. 工厂查找（先于一切计算）
        let plant = self
            .registry
            .find_by_id(plant_id)
            .ok_or_else(|| ForecastError::PlantNotFound {
                plant: plant_id.to_string(),
            })?;

        let sales: &[SalesRecord] = input.sales_override.as_deref().unwrap_or(plant.sales.as_slice());
        let historical: &[HistoricalAreaRecord] = input
            .historical_override
            .as_deref()
            .unwrap_or(plant.historical_area.as_slice());
        ensure_unique_years(plant_id, "sales", sales.iter().map(|r| r.fiscal_year))?;
        ensure_unique_years(plant_id, "historical_area", historical.iter().map(|r| r.fiscal_year))?;

        tracing::debug!(
            sales_count = sales.len(),
            historical_count = historical.len(),
            sales_overridden = input.sales_override.is_some(),
            historical_overridden = input.historical_override.is_some(),
            "开始预测"
        );

        // 2. 参数解析
        let params = self
            .resolver
            .resolve(plant_id, input.overrides.as_ref(), &plant.defaults)?;
        self.observer.notify(|| ForecastEvent::ParametersResolved {
            plant_id: plant_id.to_string(),
            params,
        });

        // 3. 两年校准
        let calibration = self
            .calibration_engine
            .calibrate(plant_id, historical, sales, &params)?;
        for year in calibration.years.iter() {
            self.observer.notify(|| ForecastEvent::CalibrationYearComputed {
                plant_id: plant_id.to_string(),
                year: *year,
            });
        }
        self.observer.notify(|| ForecastEvent::Calibrated {
            plant_id: plant_id.to_string(),
            calibration: calibration.clone(),
        });

        // 4. 逐年推演
        let future_sales = self.projector.select_future_years(
            sales,
            calibration.last_calibration_year(),
            input.range,
        );
        let projected = self
            .projector
            .project(plant_id, &future_sales, &calibration, &params)?;
        for year in projected.iter() {
            self.observer.notify(|| ForecastEvent::YearProjected {
                plant_id: plant_id.to_string(),
                year: *year,
            });
        }

        // 5. 组装
        let response = self
            .assembler
            .assemble(plant_id, &params, &calibration, &projected, historical);

        tracing::info!(
            plant_id,
            forecast_years = response.forecast.len(),
            productivity_factor = response.calibration.productivity_factor,
            "预测完成"
        );

        Ok(response)
    }
}

/// 同一序列内财年不可重复
fn ensure_unique_years(
    plant_id: &str,
    series: &str,
    years: impl IntoIterator<Item = i32>,
) -> ForecastResult<()> {
    let mut seen = HashSet::new();
    for fiscal_year in years {
        if !seen.insert(fiscal_year) {
            return Err(ForecastError::data_integrity(
                plant_id,
                format!("{} 中财年重复: FY={}", series, fiscal_year),
            ));
        }
    }
    Ok(())
}
