// ==========================================
// 工厂面积预测系统 - 预测 API
// ==========================================
// 职责: 请求校验 → 默认区间 → 编排器执行 → 成功响应包装
// 红线: 失败时不返回任何预测年（无部分结果）
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::ForecastRequestValidator;
use crate::domain::forecast::ForecastResponse;
use crate::domain::params::PartialOperationalParameters;
use crate::domain::plant::{HistoricalAreaRecord, SalesRecord};
use crate::engine::events::ForecastObserver;
use crate::engine::orchestrator::{ForecastInput, ForecastOrchestrator};
use crate::importer::PlantDataImporter;
use crate::repository::PlantRegistry;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

// ==========================================
// ForecastRequest - 预测请求
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastRequest {
    /// 工厂标识
    #[serde(alias = "plant")]
    pub plant_name: String,

    /// 运行参数覆写（与工厂标识同级的扁平字段）
    #[serde(flatten)]
    pub overrides: PartialOperationalParameters,

    /// 预测起始年（含）；缺省取配置默认值
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_year: Option<i32>,

    /// 预测结束年（含）；缺省取配置默认值
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_year: Option<i32>,

    /// 替换销量序列
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales: Option<Vec<SalesRecord>>,

    /// 替换历史面积记录
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub historical_areas: Option<Vec<HistoricalAreaRecord>>,
}

impl ForecastRequest {
    pub fn for_plant(plant_name: &str) -> Self {
        Self {
            plant_name: plant_name.to_string(),
            ..Default::default()
        }
    }
}

// ==========================================
// AreaForecastResponse - 成功响应
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaForecastResponse {
    pub status: String,
    #[serde(flatten)]
    pub body: ForecastResponse,
}

impl AreaForecastResponse {
    pub fn success(body: ForecastResponse) -> Self {
        Self {
            status: "success".to_string(),
            body,
        }
    }
}

// ==========================================
// ForecastApi - 预测 API
// ==========================================
pub struct ForecastApi {
    orchestrator: ForecastOrchestrator,
    validator: ForecastRequestValidator,
    importer: PlantDataImporter,
    default_start_year: Option<i32>,
    default_end_year: Option<i32>,
}

impl ForecastApi {
    /// 创建 ForecastApi
    ///
    /// # 参数
    /// - registry: 工厂注册表
    /// - default_horizon: 请求未指定区间时的 (起始年, 结束年)
    pub fn new(registry: Arc<dyn PlantRegistry>, default_horizon: (Option<i32>, Option<i32>)) -> Self {
        Self {
            orchestrator: ForecastOrchestrator::new(registry),
            validator: ForecastRequestValidator,
            importer: PlantDataImporter::new(),
            default_start_year: default_horizon.0,
            default_end_year: default_horizon.1,
        }
    }

    /// 挂载计算过程观察者
    pub fn with_observer(mut self, observer: Arc<dyn ForecastObserver>) -> Self {
        self.orchestrator = self.orchestrator.with_observer(observer);
        self
    }

    /// 执行面积预测
    ///
    /// # 返回
    /// - Ok(AreaForecastResponse): status = "success"
    /// - Err(ApiError): InvalidInput / PlantNotFound / DataIntegrityError / CalibrationError
    pub fn forecast(&self, request: &ForecastRequest) -> ApiResult<AreaForecastResponse> {
        self.validator.validate(request)?;

        let input = self.build_input(request);
        info!(
            plant = %input.plant_id,
            start_year = ?input.range.start_year,
            end_year = ?input.range.end_year,
            "执行面积预测"
        );

        let body = self.orchestrator.run(&input).map_err(|e| {
            warn!(plant = %input.plant_id, error = %e, "面积预测失败");
            ApiError::from(e)
        })?;

        Ok(AreaForecastResponse::success(body))
    }

    /// 使用上传文件替换销量 / 历史面积后执行预测
    ///
    /// 文件中的数据优先于请求体内联数据
    pub fn forecast_with_files(
        &self,
        request: &ForecastRequest,
        sales_file: Option<&Path>,
        historical_file: Option<&Path>,
    ) -> ApiResult<AreaForecastResponse> {
        let mut request = request.clone();
        if let Some(path) = sales_file {
            request.sales = Some(self.importer.import_sales(path)?);
        }
        if let Some(path) = historical_file {
            request.historical_areas = Some(self.importer.import_historical_areas(path)?);
        }
        self.forecast(&request)
    }

    /// 请求 → 编排器输入（区间缺省时取配置默认值）
    fn build_input(&self, request: &ForecastRequest) -> ForecastInput {
        let (start_year, end_year) = match (request.start_year, request.end_year) {
            (None, None) => (self.default_start_year, self.default_end_year),
            explicit => explicit,
        };

        let mut input = ForecastInput::for_plant(request.plant_name.trim()).with_range(start_year, end_year);
        if !request.overrides.is_empty() {
            input = input.with_overrides(request.overrides.clone());
        }
        if let Some(sales) = &request.sales {
            input = input.with_sales(sales.clone());
        }
        if let Some(historical) = &request.historical_areas {
            input = input.with_historical(historical.clone());
        }
        input
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::InMemoryPlantRegistry;

    fn api() -> ForecastApi {
        ForecastApi::new(Arc::new(InMemoryPlantRegistry::builtin()), (Some(2026), Some(2030)))
    }

    #[test]
    fn test_request_deserializes_flat_overrides() {
        let request: ForecastRequest = serde_json::from_str(
            r#"{"plant_name": "DNIN", "base_oee": 0.85, "safety_buffer": 0.1, "end_year": 2028}"#,
        )
        .unwrap();
        assert_eq!(request.plant_name, "DNIN");
        assert_eq!(request.overrides.base_oee, Some(0.85));
        assert_eq!(request.overrides.safety_buffer, Some(0.1));
        assert_eq!(request.overrides.cycle_time_hours, None);
        assert_eq!(request.end_year, Some(2028));
        assert_eq!(request.start_year, None);
    }

    #[test]
    fn test_default_horizon_applied() {
        let response = api().forecast(&ForecastRequest::for_plant("DNHA_M")).unwrap();
        assert_eq!(response.status, "success");
        let years: Vec<i32> = response.body.forecast.iter().map(|f| f.fiscal_year).collect();
        assert_eq!(years, vec![2026, 2027, 2028, 2029, 2030]);
    }

    #[test]
    fn test_explicit_partial_range_kept() {
        let mut request = ForecastRequest::for_plant("DNHA_M");
        request.start_year = Some(2033);
        let response = api().forecast(&request).unwrap();
        let years: Vec<i32> = response.body.forecast.iter().map(|f| f.fiscal_year).collect();
        assert_eq!(years, vec![2033, 2034, 2035]);
    }

    #[test]
    fn test_success_wrapper_serialization() {
        let response = api().forecast(&ForecastRequest::for_plant("DNKI")).unwrap();
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["plant"], "DNKI");
        assert!(value["forecast"][0]["FY"].is_number());
        assert!(value["policy_params"]["customer_wh_policy"].is_string());
    }

    #[test]
    fn test_unknown_plant_is_404() {
        let err = api().forecast(&ForecastRequest::for_plant("XYZ")).unwrap_err();
        assert!(matches!(err, ApiError::PlantNotFound(ref p) if p == "XYZ"));
        assert_eq!(err.status_code(), 404);
    }
}
