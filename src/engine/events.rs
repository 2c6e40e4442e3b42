// ==========================================
// 工厂面积预测系统 - 计算过程观察钩子
// ==========================================
// 职责: 对外暴露计算中间量（解析参数 / 校准年 / 预测年）
// 说明: 调用方可选挂载；未挂载时不产生任何输出
// 红线: 观察者只读，不能影响计算结果
// ==========================================

use crate::domain::forecast::{CalibrationResult, CalibrationYear, ProjectedYear};
use crate::domain::params::OperationalParameters;
use std::sync::Arc;

// ==========================================
// 预测过程事件
// ==========================================

#[derive(Debug, Clone, PartialEq)]
pub enum ForecastEvent {
    /// 运行参数已解析
    ParametersResolved {
        plant_id: String,
        params: OperationalParameters,
    },
    /// 单个校准年的中间量
    CalibrationYearComputed {
        plant_id: String,
        year: CalibrationYear,
    },
    /// 校准完成
    Calibrated {
        plant_id: String,
        calibration: CalibrationResult,
    },
    /// 单个预测年的浮点结果
    YearProjected {
        plant_id: String,
        year: ProjectedYear,
    },
}

impl ForecastEvent {
    pub fn as_str(&self) -> &str {
        match self {
            ForecastEvent::ParametersResolved { .. } => "ParametersResolved",
            ForecastEvent::CalibrationYearComputed { .. } => "CalibrationYearComputed",
            ForecastEvent::Calibrated { .. } => "Calibrated",
            ForecastEvent::YearProjected { .. } => "YearProjected",
        }
    }
}

// ==========================================
// 观察者 Trait
// ==========================================

/// 预测过程观察者
///
/// 仅接收中间量的只读副本，无返回值
pub trait ForecastObserver: Send + Sync {
    fn on_event(&self, event: &ForecastEvent);
}

/// 空操作观察者
#[derive(Debug, Clone, Default)]
pub struct NoOpObserver;

impl ForecastObserver for NoOpObserver {
    fn on_event(&self, _event: &ForecastEvent) {}
}

/// 可选观察者包装
///
/// 简化 Option<Arc<dyn ForecastObserver>> 的使用
#[derive(Clone, Default)]
pub struct OptionalObserver {
    inner: Option<Arc<dyn ForecastObserver>>,
}

impl OptionalObserver {
    pub fn with_observer(observer: Arc<dyn ForecastObserver>) -> Self {
        Self {
            inner: Some(observer),
        }
    }

    pub fn none() -> Self {
        Self { inner: None }
    }

    /// 通知观察者（未挂载时跳过，事件只在挂载时构造）
    pub fn notify<F>(&self, make_event: F)
    where
        F: FnOnce() -> ForecastEvent,
    {
        if let Some(observer) = &self.inner {
            let event = make_event();
            tracing::trace!(event_type = event.as_str(), "通知预测观察者");
            observer.on_event(&event);
        }
    }

    pub fn is_configured(&self) -> bool {
        self.inner.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CountingObserver {
        names: Mutex<Vec<String>>,
    }

    impl ForecastObserver for CountingObserver {
        fn on_event(&self, event: &ForecastEvent) {
            self.names.lock().unwrap().push(event.as_str().to_string());
        }
    }

    fn params() -> OperationalParameters {
        OperationalParameters {
            cycle_time_hours: 0.04,
            base_oee: 0.79,
            working_hours_year: 6000,
            machine_size_m2: 80.0,
            safety_buffer: 0.05,
            warehouse_capacity_units_m2: 6.0,
            total_plant_area: 27900.0,
        }
    }

    #[test]
    fn test_optional_observer_none_skips_event_construction() {
        let observer = OptionalObserver::none();
        assert!(!observer.is_configured());
        observer.notify(|| panic!("未挂载观察者时不应构造事件"));
    }

    #[test]
    fn test_optional_observer_forwards_event() {
        let counting = Arc::new(CountingObserver::default());
        let observer = OptionalObserver::with_observer(counting.clone());
        assert!(observer.is_configured());

        observer.notify(|| ForecastEvent::ParametersResolved {
            plant_id: "DNHA_M".to_string(),
            params: params(),
        });

        assert_eq!(*counting.names.lock().unwrap(), vec!["ParametersResolved".to_string()]);
    }

    #[test]
    fn test_noop_observer() {
        let observer = OptionalObserver::with_observer(Arc::new(NoOpObserver));
        observer.notify(|| ForecastEvent::ParametersResolved {
            plant_id: "DNHA_M".to_string(),
            params: params(),
        });
    }
}
