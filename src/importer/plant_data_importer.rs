// ==========================================
// 工厂面积预测系统 - 工厂数据导入器
// ==========================================
// 流程: 文件解析 → 字段映射 → 领域记录
// 用途: 请求级销量 / 历史面积覆盖
// ==========================================

use crate::domain::plant::{HistoricalAreaRecord, SalesRecord};
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::{CsvParser, UniversalFileParser};
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

// ==========================================
// PlantDataImporter
// ==========================================
pub struct PlantDataImporter {
    parser: UniversalFileParser,
    mapper: FieldMapper,
}

impl Default for PlantDataImporter {
    fn default() -> Self {
        Self::new()
    }
}

impl PlantDataImporter {
    pub fn new() -> Self {
        Self {
            parser: UniversalFileParser,
            mapper: FieldMapper,
        }
    }

    /// 导入销量文件（.csv / .xlsx）
    pub fn import_sales<P: AsRef<Path>>(&self, path: P) -> ImportResult<Vec<SalesRecord>> {
        let path = path.as_ref();
        info!(path = %path.display(), "开始导入销量数据");
        let rows = self.parser.parse(path)?;
        debug!(rows = rows.len(), "销量文件解析完成");
        let records = self.mapper.map_sales(&rows)?;
        info!(records = records.len(), "销量数据导入完成");
        Ok(records)
    }

    /// 导入历史面积文件（.csv / .xlsx）
    pub fn import_historical_areas<P: AsRef<Path>>(
        &self,
        path: P,
    ) -> ImportResult<Vec<HistoricalAreaRecord>> {
        let path = path.as_ref();
        info!(path = %path.display(), "开始导入历史面积数据");
        let rows = self.parser.parse(path)?;
        debug!(rows = rows.len(), "历史面积文件解析完成");
        let records = self.mapper.map_historical_areas(&rows)?;
        info!(records = records.len(), "历史面积数据导入完成");
        Ok(records)
    }

    /// 从 CSV 文本流导入销量
    pub fn sales_from_csv_reader<R: Read>(&self, reader: R) -> ImportResult<Vec<SalesRecord>> {
        let rows = CsvParser.parse_reader(reader)?;
        self.mapper.map_sales(&rows)
    }

    /// 从 CSV 文本流导入历史面积
    pub fn historical_from_csv_reader<R: Read>(
        &self,
        reader: R,
    ) -> ImportResult<Vec<HistoricalAreaRecord>> {
        let rows = CsvParser.parse_reader(reader)?;
        self.mapper.map_historical_areas(&rows)
    }
}
