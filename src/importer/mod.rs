// ==========================================
// 工厂面积预测系统 - 导入层
// ==========================================
// 职责: 外部销量 / 历史面积文件 → 领域记录
// 支持: Excel (.xlsx), CSV
// ==========================================

pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod plant_data_importer;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::{normalize_header, parse_fiscal_year, FieldMapper};
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRecord, UniversalFileParser};
pub use plant_data_importer::PlantDataImporter;
