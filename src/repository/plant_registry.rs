// ==========================================
// 工厂面积预测系统 - 工厂注册表
// ==========================================
// 职责: 按工厂标识提供只读工厂档案
// 实现: 内存注册表（内置 / JSON 文件 / 测试合成数据）
// 红线: 档案以 Arc 快照形式提供，调用方不能修改
// ==========================================

use crate::domain::plant::PlantProfile;
use crate::repository::builtin_plants;
use crate::repository::error::{RepositoryError, RepositoryResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

// ==========================================
// PlantRegistry Trait
// ==========================================

/// 工厂注册表（只读）
pub trait PlantRegistry: Send + Sync {
    /// 按工厂标识查找
    ///
    /// # 返回
    /// - Some(profile): 工厂档案快照
    /// - None: 工厂不存在
    fn find_by_id(&self, plant_id: &str) -> Option<Arc<PlantProfile>>;
}

// ==========================================
// 注册表文件格式
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistryFile {
    pub plants: Vec<PlantProfile>,
}

// ==========================================
// InMemoryPlantRegistry - 内存注册表
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct InMemoryPlantRegistry {
    plants: BTreeMap<String, Arc<PlantProfile>>,
}

impl InMemoryPlantRegistry {
    /// 空注册表
    pub fn new() -> Self {
        Self::default()
    }

    /// 内置注册表（DNHA_M / DNHA_J / DNIN / DNKI）
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        for profile in builtin_plants::builtin_profiles() {
            registry
                .plants
                .insert(profile.plant_id.clone(), Arc::new(profile));
        }
        registry
    }

    /// 由工厂档案列表构建
    pub fn from_profiles(profiles: Vec<PlantProfile>) -> RepositoryResult<Self> {
        let mut registry = Self::new();
        for profile in profiles {
            registry.insert(profile)?;
        }
        Ok(registry)
    }

    /// 从 JSON 字符串加载
    pub fn from_json_str(raw: &str) -> RepositoryResult<Self> {
        let file: RegistryFile = serde_json::from_str(raw)?;
        Self::from_profiles(file.plants)
    }

    /// 从 JSON 文件加载
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> RepositoryResult<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|e| RepositoryError::FileReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let registry = Self::from_json_str(&raw)?;
        tracing::info!(
            path = %path.display(),
            plants = registry.len(),
            "工厂注册表加载完成"
        );
        Ok(registry)
    }

    /// 加入工厂档案（销量按财年排序，财年不可重复）
    pub fn insert(&mut self, mut profile: PlantProfile) -> RepositoryResult<()> {
        let plant_id = profile.plant_id.trim().to_string();
        if plant_id.is_empty() {
            return Err(RepositoryError::ValidationError {
                plant: profile.plant_id.clone(),
                message: "工厂标识为空".to_string(),
            });
        }
        if self.plants.contains_key(&plant_id) {
            return Err(RepositoryError::DuplicatePlant(plant_id));
        }

        profile.plant_id = plant_id.clone();
        profile.sales.sort_by_key(|r| r.fiscal_year);
        if let Some(dup) = profile
            .sales
            .windows(2)
            .find(|w| w[0].fiscal_year == w[1].fiscal_year)
        {
            return Err(RepositoryError::ValidationError {
                plant: plant_id,
                message: format!("销量财年重复: FY={}", dup[0].fiscal_year),
            });
        }

        self.plants.insert(plant_id, Arc::new(profile));
        Ok(())
    }

    /// 工厂标识列表（升序）
    pub fn plant_ids(&self) -> Vec<String> {
        self.plants.keys().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }
}

impl PlantRegistry for InMemoryPlantRegistry {
    fn find_by_id(&self, plant_id: &str) -> Option<Arc<PlantProfile>> {
        self.plants.get(plant_id.trim()).cloned()
    }
}
