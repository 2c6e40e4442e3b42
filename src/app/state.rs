// ==========================================
// 工厂面积预测系统 - 应用状态
// ==========================================
// 职责: 按配置装配注册表与 API 实例
// 注册表来源: 配置路径 / 用户配置目录 plants.json / 内置四厂
// ==========================================

use std::sync::Arc;

use crate::api::{ApiResult, ForecastApi};
use crate::config::AppConfig;
use crate::repository::InMemoryPlantRegistry;

/// 应用状态
///
/// 进程内共享，全部成员只读
pub struct AppState {
    /// 生效配置
    pub config: AppConfig,

    /// 工厂注册表
    pub registry: Arc<InMemoryPlantRegistry>,

    /// 预测API
    pub forecast_api: Arc<ForecastApi>,
}

impl AppState {
    /// 按配置创建 AppState
    ///
    /// # 返回
    /// - Ok(AppState)
    /// - Err(ApiError): 注册表文件读取失败（InternalError）或内容非法（DataIntegrityError）
    pub fn new(config: AppConfig) -> ApiResult<Self> {
        let registry = match config.resolve_registry_path() {
            Some(path) => {
                tracing::info!("加载工厂注册表: {}", path.display());
                InMemoryPlantRegistry::from_json_file(&path)?
            }
            None => {
                tracing::info!("使用内置工厂注册表");
                InMemoryPlantRegistry::builtin()
            }
        };
        Ok(Self::with_registry(config, registry))
    }

    /// 使用给定注册表创建 AppState
    pub fn with_registry(config: AppConfig, registry: InMemoryPlantRegistry) -> Self {
        let registry = Arc::new(registry);
        let forecast_api = Arc::new(ForecastApi::new(registry.clone(), config.default_horizon()));
        tracing::debug!(plants = registry.len(), "AppState 初始化完成");

        Self {
            config,
            registry,
            forecast_api,
        }
    }

    /// 可预测的工厂标识（升序）
    pub fn list_plants(&self) -> Vec<String> {
        self.registry.plant_ids()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, ForecastRequest};
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_builtin_state() {
        let state = AppState::with_registry(AppConfig::default(), InMemoryPlantRegistry::builtin());
        assert_eq!(state.list_plants(), vec!["DNHA_J", "DNHA_M", "DNIN", "DNKI"]);

        let response = state
            .forecast_api
            .forecast(&ForecastRequest::for_plant("DNIN"))
            .unwrap();
        assert_eq!(response.body.forecast.len(), 5);
    }

    #[test]
    fn test_state_from_registry_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"plants": [{{
                "plant_id": "P1",
                "defaults": {{"cycle_time_hours": 0.05, "base_oee": 0.8, "machine_size_m2": 50.0,
                              "warehouse_capacity_units_m2": 5.0, "total_plant_area": 20000.0}},
                "sales": [{{"FY": 2024, "sales_units": 1000000}}, {{"FY": 2025, "sales_units": 1100000}},
                          {{"FY": 2026, "sales_units": 1200000}}],
                "historical_area": [
                    {{"fiscal_year": 2024, "production_area": 4000, "inventory_area": 1500, "passage_area": 1200}},
                    {{"fiscal_year": 2025, "production_area": 4200, "inventory_area": 1600, "passage_area": 1250}}
                ]
            }}]}}"#
        )
        .unwrap();

        let config = AppConfig {
            registry_path: Some(file.path().to_path_buf()),
            ..AppConfig::default()
        };
        let state = AppState::new(config).unwrap();
        assert_eq!(state.list_plants(), vec!["P1"]);

        let response = state
            .forecast_api
            .forecast(&ForecastRequest::for_plant("P1"))
            .unwrap();
        assert_eq!(response.body.forecast.len(), 1);
        assert_eq!(response.body.forecast[0].fiscal_year, 2026);
    }

    #[test]
    fn test_missing_registry_file() {
        let config = AppConfig {
            registry_path: Some("/nonexistent/plants.json".into()),
            ..AppConfig::default()
        };
        match AppState::new(config) {
            Err(err) => {
                assert!(matches!(err, ApiError::InternalError(ref msg) if msg.contains("plants.json")));
                assert_eq!(err.status_code(), 500);
            }
            Ok(_) => panic!("Expected InternalError"),
        }
    }

    #[test]
    fn test_invalid_registry_file_is_data_integrity_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{\"plants\": 42}}").unwrap();

        let config = AppConfig {
            registry_path: Some(file.path().to_path_buf()),
            ..AppConfig::default()
        };
        match AppState::new(config) {
            Err(err) => assert_eq!(err.status_code(), 422),
            Ok(_) => panic!("Expected DataIntegrityError"),
        }
    }
}
