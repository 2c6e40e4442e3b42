// ==========================================
// 工厂面积预测系统 - 命令行入口
// ==========================================
// 用法:
//   plant-area-forecast --list
//   plant-area-forecast <PLANT> [START_YEAR END_YEAR]
// 输出: 预测结果 JSON（stdout），日志（stderr）
// ==========================================

use anyhow::{bail, Context};
use plant_area_forecast::api::ForecastRequest;
use plant_area_forecast::app::AppState;
use plant_area_forecast::config::AppConfig;
use plant_area_forecast::logging;

fn parse_year(raw: &str, name: &str) -> anyhow::Result<i32> {
    raw.trim()
        .parse::<i32>()
        .with_context(|| format!("{} 不是有效年份: {}", name, raw))
}

fn main() -> anyhow::Result<()> {
    let config = AppConfig::load().map_err(|e| anyhow::anyhow!("配置加载失败: {}", e))?;
    logging::init_from_config(&config);

    tracing::info!("{} v{}", plant_area_forecast::APP_NAME, plant_area_forecast::VERSION);

    let state = AppState::new(config).context("工厂注册表加载失败")?;

    let args: Vec<String> = std::env::args().skip(1).collect();
    let plant = match args.first().map(|s| s.trim()) {
        Some("--list") => {
            for plant_id in state.list_plants() {
                println!("{}", plant_id);
            }
            return Ok(());
        }
        Some(p) if !p.is_empty() && !p.starts_with('-') => p.to_string(),
        _ => bail!("用法: plant-area-forecast <PLANT> [START_YEAR END_YEAR] | --list"),
    };

    let mut request = ForecastRequest::for_plant(&plant);
    match args.len() {
        1 => {}
        3 => {
            request.start_year = Some(parse_year(&args[1], "START_YEAR")?);
            request.end_year = Some(parse_year(&args[2], "END_YEAR")?);
        }
        _ => bail!("START_YEAR 与 END_YEAR 需同时给出"),
    }

    match state.forecast_api.forecast(&request) {
        Ok(response) => {
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Err(err) => {
            let body = err.to_response();
            println!("{}", serde_json::to_string_pretty(&body)?);
            bail!("预测失败 (status {}): {}", err.status_code(), err)
        }
    }
}
