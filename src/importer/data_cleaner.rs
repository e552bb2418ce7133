// ==========================================
// 健身连锁记录系统 - 字段清洗
// ==========================================
// 职责: TRIM / NULL 标准化 / 数值解析
// 红线: 清洗失败返回 Err(说明), 由调用方记录为 InvalidRecord
// ==========================================

use serde_json::Value;

/// 空串与纯空白视为缺失
pub fn normalize_null(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    })
}

/// 标量值转文本
///
/// # 返回
/// - Ok(None): 缺失 / null / 空串
/// - Ok(Some): 字符串、数字、布尔
/// - Err: 数组或对象
pub fn value_to_text(value: Option<&Value>) -> Result<Option<String>, String> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(normalize_null(Some(s.clone()))),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(format!("期望标量, 实际为嵌套结构: {}", other)),
    }
}

/// 数值解析: 支持 JSON 数字与数字文本
///
/// # 返回
/// - Ok(None): 缺失 / null / 空串
/// - Err: 无法解析或非有限值
pub fn value_to_number(value: Option<&Value>) -> Result<Option<f64>, String> {
    let parsed = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            trimmed.parse::<f64>().ok()
        }
        Some(other) => return Err(format!("无法解析为数值: {}", other)),
    };

    match parsed {
        Some(n) if n.is_finite() => Ok(Some(n)),
        _ => Err(format!("无法解析为数值: {}", describe(value))),
    }
}

/// 逗号分隔文本或字符串数组 -> 字符串列表
pub fn value_to_list(value: Option<&Value>) -> Result<Vec<String>, String> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::String(s)) => Ok(s
            .split(',')
            .filter_map(|part| normalize_null(Some(part.to_string())))
            .collect()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.trim().to_string()),
                other => Err(format!("列表元素必须为字符串: {}", other)),
            })
            .collect(),
        Some(other) => Err(format!("期望列表, 实际为: {}", other)),
    }
}

fn describe(value: Option<&Value>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_null() {
        assert_eq!(normalize_null(Some("  ".to_string())), None);
        assert_eq!(normalize_null(Some(" Gold ".to_string())), Some("Gold".to_string()));
        assert_eq!(normalize_null(None), None);
    }

    #[test]
    fn test_value_to_text() {
        assert_eq!(value_to_text(Some(&json!(12))), Ok(Some("12".to_string())));
        assert_eq!(value_to_text(Some(&json!(""))), Ok(None));
        assert_eq!(value_to_text(None), Ok(None));
        assert!(value_to_text(Some(&json!({"a": 1}))).is_err());
    }

    #[test]
    fn test_value_to_number() {
        assert_eq!(value_to_number(Some(&json!(99.5))), Ok(Some(99.5)));
        assert_eq!(value_to_number(Some(&json!(" 40 "))), Ok(Some(40.0)));
        assert_eq!(value_to_number(Some(&json!(""))), Ok(None));
        assert!(value_to_number(Some(&json!("forty"))).is_err());
        assert!(value_to_number(Some(&json!("NaN"))).is_err());
        assert!(value_to_number(Some(&json!([1]))).is_err());
    }

    #[test]
    fn test_value_to_list() {
        assert_eq!(
            value_to_list(Some(&json!("Cardio, Free Weights,"))),
            Ok(vec!["Cardio".to_string(), "Free Weights".to_string()])
        );
        assert_eq!(
            value_to_list(Some(&json!(["Pool", "Sauna"]))),
            Ok(vec!["Pool".to_string(), "Sauna".to_string()])
        );
        assert!(value_to_list(Some(&json!([1]))).is_err());
    }
}
