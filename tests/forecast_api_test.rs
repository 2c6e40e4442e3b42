// ==========================================
// 预测 API 集成测试
// ==========================================
// 测试范围: 请求校验 → 默认区间 → 文件覆盖 → 错误状态码
// ==========================================

mod helpers;

use helpers::plant_builder::{registry_with, unit_plant, PlantBuilder};
use plant_area_forecast::api::{ApiError, ForecastApi, ForecastRequest};
use plant_area_forecast::app::AppState;
use plant_area_forecast::config::AppConfig;
use plant_area_forecast::domain::params::PartialOperationalParameters;
use plant_area_forecast::domain::plant::SalesRecord;
use plant_area_forecast::logging;
use plant_area_forecast::repository::InMemoryPlantRegistry;
use std::io::Write;
use std::sync::Arc;
use tempfile::Builder;

// ==========================================
// 测试辅助函数
// ==========================================

fn builtin_api() -> ForecastApi {
    ForecastApi::new(
        Arc::new(InMemoryPlantRegistry::builtin()),
        AppConfig::default().default_horizon(),
    )
}

fn csv_file(content: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
    write!(file, "{}", content).unwrap();
    file
}

// ==========================================
// 请求校验
// ==========================================

#[test]
fn test_invalid_overrides_rejected_with_400() {
    let api = builtin_api();

    let mut request = ForecastRequest::for_plant("DNIN");
    request.overrides.base_oee = Some(1.5);
    let err = api.forecast(&request).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(ref msg) if msg.contains("base_oee")));
    assert_eq!(err.status_code(), 400);

    let mut request = ForecastRequest::for_plant("DNIN");
    request.start_year = Some(2030);
    request.end_year = Some(2026);
    assert_eq!(api.forecast(&request).unwrap_err().status_code(), 400);

    let err = api.forecast(&ForecastRequest::for_plant("")).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput(_)));
}

#[test]
fn test_validation_runs_before_plant_lookup() {
    let mut request = ForecastRequest::for_plant("UNKNOWN");
    request.overrides.total_plant_area = Some(-1.0);
    let err = builtin_api().forecast(&request).unwrap_err();
    assert_eq!(err.status_code(), 400);
}

// ==========================================
// 错误状态码
// ==========================================

#[test]
fn test_error_status_codes() {
    let api = ForecastApi::new(registry_with(vec![unit_plant(100_000.0)]), (None, None));

    let err = api.forecast(&ForecastRequest::for_plant("UNKNOWN")).unwrap_err();
    assert_eq!(err.status_code(), 404);
    assert_eq!(err.to_response().code, "PLANT_NOT_FOUND");

    // 缺少校准年销量
    let mut request = ForecastRequest::for_plant("UNIT");
    request.sales = Some(vec![SalesRecord::new(2024, 6000.0)]);
    let err = api.forecast(&request).unwrap_err();
    assert!(matches!(err, ApiError::DataIntegrityError(_)));
    assert_eq!(err.status_code(), 422);

    // 重复财年
    let mut request = ForecastRequest::for_plant("UNIT");
    request.sales = Some(vec![
        SalesRecord::new(2024, 6000.0),
        SalesRecord::new(2025, 12000.0),
        SalesRecord::new(2026, 18000.0),
        SalesRecord::new(2026, 18000.0),
    ]);
    let err = api.forecast(&request).unwrap_err();
    assert!(matches!(err, ApiError::DataIntegrityError(ref msg) if msg.contains("FY=2026")));
    assert_eq!(err.status_code(), 422);
}

#[test]
fn test_out_of_range_registry_defaults_are_422() {
    let bad_plant = |id: &str, mutate: fn(&mut PartialOperationalParameters)| {
        let mut defaults = unit_plant(100_000.0).defaults;
        mutate(&mut defaults);
        let base = unit_plant(100_000.0);
        PlantBuilder::new(id)
            .defaults(defaults)
            .sales(2024, 6000.0)
            .sales(2025, 12000.0)
            .sales(2026, 18000.0)
            .historical(base.historical_area[0].clone())
            .historical(base.historical_area[1].clone())
            .build()
    };
    let api = ForecastApi::new(
        registry_with(vec![
            bad_plant("NO_WH", |d| d.warehouse_capacity_units_m2 = Some(0.0)),
            bad_plant("NEG_AREA", |d| d.total_plant_area = Some(-5000.0)),
        ]),
        (None, None),
    );

    for (plant, field) in [("NO_WH", "warehouse_capacity_units_m2"), ("NEG_AREA", "total_plant_area")] {
        let err = api.forecast(&ForecastRequest::for_plant(plant)).unwrap_err();
        assert!(matches!(err, ApiError::DataIntegrityError(ref msg) if msg.contains(field)), "{:?}", err);
        assert_eq!(err.status_code(), 422);
    }
}

// ==========================================
// 默认区间
// ==========================================

#[test]
fn test_configured_horizon() {
    let config = AppConfig {
        default_start_year: Some(2028),
        default_end_year: Some(2029),
        ..AppConfig::default()
    };
    let state = AppState::with_registry(config, InMemoryPlantRegistry::builtin());
    let response = state
        .forecast_api
        .forecast(&ForecastRequest::for_plant("DNKI"))
        .unwrap();

    let years: Vec<i32> = response.body.forecast.iter().map(|y| y.fiscal_year).collect();
    assert_eq!(years, vec![2028, 2029]);
}

#[test]
fn test_unbounded_horizon_uses_all_future_years() {
    let api = ForecastApi::new(Arc::new(InMemoryPlantRegistry::builtin()), (None, None));
    let response = api.forecast(&ForecastRequest::for_plant("DNKI")).unwrap();
    assert_eq!(response.body.forecast.len(), 10);
}

// ==========================================
// 上传文件覆盖
// ==========================================

#[test]
fn test_forecast_with_uploaded_files() {
    logging::init_test();
    let sales = csv_file("FY,Sales Units\nFY24,6000\nFY25,12000\nFY26,18000\nFY27,24000\n");
    let historical = csv_file(
        "FY,Production Area,Inventory Area,Passage Area\n\
         FY24,100,300,80\n\
         FY25,200,300,200\n",
    );

    let api = ForecastApi::new(registry_with(vec![unit_plant(100_000.0)]), (Some(2026), Some(2030)));
    let response = api
        .forecast_with_files(
            &ForecastRequest::for_plant("UNIT"),
            Some(sales.path()),
            Some(historical.path()),
        )
        .unwrap();

    let production: Vec<i64> = response.body.forecast.iter().map(|y| y.production_area).collect();
    assert_eq!(production, vec![300, 400]);
    assert_eq!(response.body.calibration.productivity_factor, 1.0);
}

#[test]
fn test_uploaded_file_errors_are_400() {
    let sales = csv_file("FY,Sales Units\nFY24,abc\n");
    let err = builtin_api()
        .forecast_with_files(&ForecastRequest::for_plant("DNIN"), Some(sales.path()), None)
        .unwrap_err();
    assert!(matches!(err, ApiError::ImportError(ref msg) if msg.contains("sales_units")));
    assert_eq!(err.status_code(), 400);
}

// ==========================================
// 响应格式
// ==========================================

#[test]
fn test_response_wire_format() {
    let response = builtin_api()
        .forecast(&ForecastRequest::for_plant("DNHA_M"))
        .unwrap();
    let value = serde_json::to_value(&response).unwrap();

    assert_eq!(value["status"], "success");
    assert_eq!(value["plant"], "DNHA_M");
    assert_eq!(value["operational_params"]["working_hours_year"], 6000);

    let first = &value["forecast"][0];
    assert_eq!(first["FY"], 2026);
    for key in [
        "sales_units",
        "production_area_m2",
        "inventory_area_m2",
        "passage_area_m2",
        "people_gathering_area_m2",
        "admin_area_m2",
        "external_wh_area_m2",
        "customer_wh_area_m2",
        "vacant_area_m2",
        "total_area_m2",
    ] {
        assert!(first[key].is_i64(), "missing {}", key);
    }

    assert!(value["historical_debug"][0]["baseline_prod_area"].is_number());
    assert_eq!(value["historical_areas"][0]["FY"], 2024);
}

#[test]
fn test_request_from_json() {
    let request: ForecastRequest = serde_json::from_str(
        r#"{
            "plant_name": "DNHA_J",
            "cycle_time_hours": 0.05,
            "start_year": 2026,
            "end_year": 2027,
            "sales": [{"FY": 2026, "sales_units": 3000000}, {"FY": 2027, "sales_units": 3500000},
                      {"FY": 2024, "sales_units": 1000000}, {"FY": 2025, "sales_units": 1000000}]
        }"#,
    )
    .unwrap();

    let response = builtin_api().forecast(&request).unwrap();
    assert_eq!(response.body.operational_params.cycle_time_hours, 0.05);
    let sales: Vec<i64> = response.body.forecast.iter().map(|y| y.sales_units).collect();
    assert_eq!(sales, vec![3_000_000, 3_500_000]);
}
