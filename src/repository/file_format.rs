// ==========================================
// 健身连锁记录系统 - 文件格式读写
// ==========================================
// 支持: CSV (表格) / JSON (嵌套)
// 约定: 文件不存在时视为空数据源
// ==========================================

use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::record_store::Record;
use csv::{ReaderBuilder, WriterBuilder};
use serde_json::Value;
use std::fs::{self, File};
use std::path::Path;

// ==========================================
// CSV 读写
// ==========================================

/// 读取 CSV 文件为记录列表 (所有值为字符串)
pub fn read_csv(path: &Path) -> RepositoryResult<Vec<Record>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let file = File::open(path).map_err(|e| RepositoryError::io(path, e))?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // 允许行长度不一致
        .from_reader(file);

    let csv_error = |e: csv::Error| RepositoryError::CsvParse {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    // 读取表头
    let headers: Vec<String> = reader
        .headers()
        .map_err(csv_error)?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let mut records = Vec::new();
    for result in reader.records() {
        let row = result.map_err(csv_error)?;
        let mut record = Record::new();

        for (col_idx, value) in row.iter().enumerate() {
            if let Some(header) = headers.get(col_idx) {
                record.insert(header.clone(), Value::String(value.trim().to_string()));
            }
        }

        // 跳过完全空白的行
        if record
            .values()
            .all(|v| v.as_str().map(str::is_empty).unwrap_or(false))
        {
            continue;
        }

        records.push(record);
    }

    Ok(records)
}

/// 写入 CSV 文件
///
/// 表头为所有记录字段的并集 (按首次出现顺序)
///
/// 红线: CSV 只承载标量; 含数组/对象的记录返回 UnsupportedShape, 文件不写入
pub fn write_csv(path: &Path, records: &[Record]) -> RepositoryResult<()> {
    let mut headers: Vec<String> = Vec::new();
    for (idx, record) in records.iter().enumerate() {
        for (key, value) in record {
            if matches!(value, Value::Array(_) | Value::Object(_)) {
                return Err(RepositoryError::UnsupportedShape {
                    path: path.display().to_string(),
                    message: format!("第 {} 条记录的字段 {} 为嵌套值, CSV 不支持", idx, key),
                });
            }
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    ensure_parent(path)?;

    let csv_error = |e: csv::Error| RepositoryError::CsvParse {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .map_err(csv_error)?;

    if !headers.is_empty() {
        writer.write_record(&headers).map_err(csv_error)?;
    }

    for record in records {
        let row: Vec<String> = headers
            .iter()
            .map(|h| record.get(h).map(cell_text).unwrap_or_default())
            .collect();
        writer.write_record(&row).map_err(csv_error)?;
    }

    writer.flush().map_err(|e| RepositoryError::io(path, e))?;
    Ok(())
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

// ==========================================
// JSON 读写
// ==========================================

/// 读取 JSON 文件为记录列表
///
/// 支持两种顶层结构:
/// - 数组: 每个元素为一条记录
/// - 对象: id -> 记录, 记录缺少 id 字段时补上
pub fn read_json(path: &Path) -> RepositoryResult<Vec<Record>> {
    if !path.exists() {
        return Ok(Vec::new());
    }

    let raw = fs::read_to_string(path).map_err(|e| RepositoryError::io(path, e))?;
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let value: Value = serde_json::from_str(&raw).map_err(|e| RepositoryError::JsonParse {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let shape_error = |message: String| RepositoryError::UnsupportedShape {
        path: path.display().to_string(),
        message,
    };

    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| match item {
                Value::Object(record) => Ok(record),
                other => Err(shape_error(format!(
                    "第 {} 个元素不是对象: {}",
                    idx, other
                ))),
            })
            .collect(),
        Value::Object(map) => map
            .into_iter()
            .map(|(id, item)| match item {
                Value::Object(fields) => {
                    if fields.contains_key("id") {
                        Ok(fields)
                    } else {
                        let mut record = Record::new();
                        record.insert("id".to_string(), Value::String(id));
                        record.extend(fields);
                        Ok(record)
                    }
                }
                other => Err(shape_error(format!("键 {} 的值不是对象: {}", id, other))),
            })
            .collect(),
        other => Err(shape_error(format!("顶层结构必须为数组或对象: {}", other))),
    }
}

/// 写入 JSON 文件 (顶层数组)
pub fn write_json(path: &Path, records: &[Record]) -> RepositoryResult<()> {
    ensure_parent(path)?;

    let content =
        serde_json::to_string_pretty(records).map_err(|e| RepositoryError::JsonParse {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;

    fs::write(path, content).map_err(|e| RepositoryError::io(path, e))
}

fn ensure_parent(path: &Path) -> RepositoryResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| RepositoryError::io(parent, e))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    #[test]
    fn test_read_csv_valid_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "date,amount").unwrap();
        writeln!(temp_file, "2024-01-05, 40").unwrap();
        writeln!(temp_file, "2024-01-09,55.5").unwrap();

        let records = read_csv(temp_file.path()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("amount"), Some(&json!("40")));
        assert_eq!(records[1].get("date"), Some(&json!("2024-01-09")));
    }

    #[test]
    fn test_read_csv_skip_empty_rows() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "date,member_id").unwrap();
        writeln!(temp_file, "2024-01-05,1").unwrap();
        writeln!(temp_file, ",").unwrap();
        writeln!(temp_file, "2024-01-06,2").unwrap();

        let records = read_csv(temp_file.path()).unwrap();
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(read_csv(&dir.path().join("none.csv")).unwrap().is_empty());
        assert!(read_json(&dir.path().join("none.json")).unwrap().is_empty());
    }

    #[test]
    fn test_read_json_keyed_object() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(
            temp_file,
            r#"{{"G1": {{"name": "Downtown"}}, "G2": {{"id": "G2", "name": "Uptown"}}}}"#
        )
        .unwrap();

        let records = read_json(temp_file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get("id"), Some(&json!("G1")));
        assert_eq!(records[0].keys().next().map(String::as_str), Some("id"));
        assert_eq!(records[1].get("name"), Some(&json!("Uptown")));
    }

    #[test]
    fn test_read_json_rejects_scalar_elements() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "[1, 2]").unwrap();
        assert!(matches!(
            read_json(temp_file.path()),
            Err(RepositoryError::UnsupportedShape { .. })
        ));
    }

    #[test]
    fn test_read_json_malformed() {
        let mut temp_file = NamedTempFile::new().unwrap();
        write!(temp_file, "[{{").unwrap();
        assert!(matches!(
            read_json(temp_file.path()),
            Err(RepositoryError::JsonParse { .. })
        ));
    }

    #[test]
    fn test_write_csv_union_headers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/payments.csv");
        let records = vec![
            json!({"date": "2024-01-05", "amount": 40}),
            json!({"date": "2024-01-06", "note": "cash"}),
        ]
        .into_iter()
        .map(|v| v.as_object().cloned().unwrap())
        .collect::<Vec<_>>();

        write_csv(&path, &records).unwrap();
        let loaded = read_csv(&path).unwrap();

        assert_eq!(loaded.len(), 2);
        assert_eq!(loaded[0].get("amount"), Some(&json!("40")));
        assert_eq!(loaded[0].get("note"), Some(&json!("")));
        assert_eq!(loaded[1].get("note"), Some(&json!("cash")));
    }

    #[test]
    fn test_write_csv_rejects_nested_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("gyms.csv");
        let records = vec![json!({"id": "G1", "manager": {"name": "Lee"}})
            .as_object()
            .cloned()
            .unwrap()];

        let result = write_csv(&path, &records);

        assert!(matches!(
            result,
            Err(RepositoryError::UnsupportedShape { ref message, .. }) if message.contains("manager")
        ));
        assert!(!path.exists());
    }
}
