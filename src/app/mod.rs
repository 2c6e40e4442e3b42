// ==========================================
// 工厂面积预测系统 - 应用层
// ==========================================
// 职责: 配置 → 注册表 → API 的装配
// ==========================================

pub mod state;

// 重导出
pub use state::AppState;
