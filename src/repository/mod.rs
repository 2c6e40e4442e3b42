// ==========================================
// 工厂面积预测系统 - 数据仓储层
// ==========================================
// 职责: 工厂档案的只读提供方
// ==========================================

pub mod builtin_plants;
pub mod error;
pub mod plant_registry;

// 重导出核心类型
pub use error::{RepositoryError, RepositoryResult};
pub use plant_registry::{InMemoryPlantRegistry, PlantRegistry, RegistryFile};
