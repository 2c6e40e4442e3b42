// ==========================================
// 工厂面积预测系统 - 字段映射器
// ==========================================
// 职责: 行记录 → 销量 / 历史面积记录
// 表头规范化: 去空白、转小写、空格与连字符转下划线
// 财年格式: 2024 / FY2024 / FY24 / 2024.0
// ==========================================

use crate::domain::plant::{HistoricalAreaRecord, SalesRecord};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawRecord;
use std::collections::{HashMap, HashSet};

// ==========================================
// 列名别名表（规范化后的表头 → 字段名）
// ==========================================
const FISCAL_YEAR_ALIASES: &[&str] = &["fy", "fiscal_year", "year"];
const SALES_ALIASES: &[&str] = &["sales_units", "sales", "units"];

const AREA_ALIASES: &[(&str, &[&str])] = &[
    ("production_area", &["production_area", "production"]),
    ("inventory_area", &["inventory_area", "inventory"]),
    ("passage_area", &["passage_area", "passage"]),
    ("people_area", &["people_area", "people_gathering_area", "people_gathering"]),
    ("admin_area", &["admin_area", "admin"]),
    ("external_wh_area", &["external_wh_area", "external_wh", "external_warehouse"]),
    ("customer_wh_area", &["customer_wh_area", "customer_wh", "customer_warehouse"]),
    ("vacant_area", &["vacant_area", "vacant_lot", "vacant"]),
    ("total_area", &["total_area", "total"]),
];

/// 表头规范化
pub fn normalize_header(header: &str) -> String {
    header
        .trim()
        .trim_start_matches('\u{feff}')
        .to_lowercase()
        .replace(['-', ' '], "_")
}

/// 解析财年文本
pub fn parse_fiscal_year(value: &str) -> Option<i32> {
    let trimmed = value.trim();
    let upper = trimmed.to_uppercase();
    if let Some(rest) = upper.strip_prefix("FY") {
        let digits = rest.trim();
        if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }
        return match digits.len() {
            2 => digits.parse::<i32>().ok().map(|y| 2000 + y),
            4 => digits.parse::<i32>().ok(),
            _ => None,
        };
    }

    let number = trimmed.parse::<f64>().ok()?;
    if number.fract() != 0.0 || !(1000.0..=9999.0).contains(&number) {
        return None;
    }
    Some(number as i32)
}

/// 解析数值（允许千分位逗号）
fn parse_number(value: &str) -> Option<f64> {
    let cleaned: String = value.chars().filter(|c| *c != ',' && !c.is_whitespace()).collect();
    let number = cleaned.parse::<f64>().ok()?;
    number.is_finite().then_some(number)
}

// ==========================================
// FieldMapper - 字段映射器
// ==========================================
pub struct FieldMapper;

impl FieldMapper {
    /// 行记录 → 规范化表头视图
    fn normalize_row(row: &RawRecord) -> HashMap<String, &str> {
        row.iter()
            .map(|(k, v)| (normalize_header(k), v.as_str()))
            .collect()
    }

    fn lookup<'a>(row: &HashMap<String, &'a str>, aliases: &[&str]) -> Option<&'a str> {
        aliases
            .iter()
            .find_map(|alias| row.get(*alias).copied())
            .filter(|v| !v.trim().is_empty())
    }

    fn has_column(rows: &[HashMap<String, &str>], aliases: &[&str]) -> bool {
        rows.iter()
            .any(|row| aliases.iter().any(|alias| row.contains_key(*alias)))
    }

    fn fiscal_year(row_no: usize, row: &HashMap<String, &str>) -> ImportResult<i32> {
        let raw = Self::lookup(row, FISCAL_YEAR_ALIASES)
            .ok_or_else(|| ImportError::FiscalYearFormatError {
                row: row_no,
                value: String::new(),
            })?;
        parse_fiscal_year(raw).ok_or_else(|| ImportError::FiscalYearFormatError {
            row: row_no,
            value: raw.to_string(),
        })
    }

    fn number(row_no: usize, field: &str, raw: &str) -> ImportResult<f64> {
        parse_number(raw).ok_or_else(|| ImportError::TypeConversionError {
            row: row_no,
            field: field.to_string(),
            message: format!("无法解析为数值: {}", raw),
        })
    }

    fn check_duplicate(seen: &mut HashSet<i32>, row_no: usize, fiscal_year: i32) -> ImportResult<()> {
        if !seen.insert(fiscal_year) {
            return Err(ImportError::DuplicateFiscalYear {
                row: row_no,
                fiscal_year,
            });
        }
        Ok(())
    }

    /// 映射销量记录（按财年升序返回）
    ///
    /// 行号从 1 开始（不含表头）
    pub fn map_sales(&self, rows: &[RawRecord]) -> ImportResult<Vec<SalesRecord>> {
        if rows.is_empty() {
            return Err(ImportError::EmptyData);
        }
        let normalized: Vec<_> = rows.iter().map(Self::normalize_row).collect();
        if !Self::has_column(&normalized, FISCAL_YEAR_ALIASES) {
            return Err(ImportError::MissingColumn("FY".to_string()));
        }
        if !Self::has_column(&normalized, SALES_ALIASES) {
            return Err(ImportError::MissingColumn("sales_units".to_string()));
        }

        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(normalized.len());
        for (idx, row) in normalized.iter().enumerate() {
            let row_no = idx + 1;
            let fiscal_year = Self::fiscal_year(row_no, row)?;
            Self::check_duplicate(&mut seen, row_no, fiscal_year)?;

            let raw = Self::lookup(row, SALES_ALIASES).ok_or_else(|| ImportError::TypeConversionError {
                row: row_no,
                field: "sales_units".to_string(),
                message: "销量为空".to_string(),
            })?;
            let sales_units = Self::number(row_no, "sales_units", raw)?;
            if sales_units < 0.0 {
                return Err(ImportError::TypeConversionError {
                    row: row_no,
                    field: "sales_units".to_string(),
                    message: format!("销量不能为负: {}", raw),
                });
            }

            records.push(SalesRecord::new(fiscal_year, sales_units));
        }

        records.sort_by_key(|r| r.fiscal_year);
        Ok(records)
    }

    /// 映射历史面积记录（按财年升序返回）
    pub fn map_historical_areas(&self, rows: &[RawRecord]) -> ImportResult<Vec<HistoricalAreaRecord>> {
        if rows.is_empty() {
            return Err(ImportError::EmptyData);
        }
        let normalized: Vec<_> = rows.iter().map(Self::normalize_row).collect();
        if !Self::has_column(&normalized, FISCAL_YEAR_ALIASES) {
            return Err(ImportError::MissingColumn("FY".to_string()));
        }
        for (field, aliases) in AREA_ALIASES.iter().take(3) {
            if !Self::has_column(&normalized, aliases) {
                return Err(ImportError::MissingColumn(field.to_string()));
            }
        }

        let mut seen = HashSet::new();
        let mut records = Vec::with_capacity(normalized.len());
        for (idx, row) in normalized.iter().enumerate() {
            let row_no = idx + 1;
            let fiscal_year = Self::fiscal_year(row_no, row)?;
            Self::check_duplicate(&mut seen, row_no, fiscal_year)?;

            let mut areas: HashMap<&str, f64> = HashMap::new();
            for (field, aliases) in AREA_ALIASES.iter() {
                if let Some(raw) = Self::lookup(row, aliases) {
                    areas.insert(field, Self::number(row_no, field, raw)?);
                }
            }

            let required = |field: &str| -> ImportResult<f64> {
                areas.get(field).copied().ok_or_else(|| ImportError::TypeConversionError {
                    row: row_no,
                    field: field.to_string(),
                    message: "必填面积为空".to_string(),
                })
            };

            records.push(HistoricalAreaRecord {
                fiscal_year,
                production_area: required("production_area")?,
                inventory_area: required("inventory_area")?,
                passage_area: required("passage_area")?,
                people_area: areas.get("people_area").copied(),
                admin_area: areas.get("admin_area").copied(),
                external_wh_area: areas.get("external_wh_area").copied(),
                customer_wh_area: areas.get("customer_wh_area").copied(),
                vacant_area: areas.get("vacant_area").copied(),
                total_area: areas.get("total_area").copied(),
            });
        }

        records.sort_by_key(|r| r.fiscal_year);
        Ok(records)
    }
}
