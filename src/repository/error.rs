// ==========================================
// 工厂面积预测系统 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("注册表文件读取失败: path={path}, {message}")]
    FileReadError { path: String, message: String },

    #[error("注册表文件解析失败: {0}")]
    ParseError(String),

    #[error("工厂标识重复: {0}")]
    DuplicatePlant(String),

    #[error("数据验证失败: plant={plant}, {message}")]
    ValidationError { plant: String, message: String },
}

impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::ParseError(err.to_string())
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
