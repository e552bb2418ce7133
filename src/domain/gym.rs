// ==========================================
// 健身连锁记录系统 - 场馆实体
// ==========================================
// 红线: zones 唯一, 3-30 字符, 仅字母数字与空格
// ==========================================

use serde::{Deserialize, Serialize};

pub const ZONE_MIN_LEN: usize = 3;
pub const ZONE_MAX_LEN: usize = 30;

// ==========================================
// GymRecord - 场馆记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GymRecord {
    pub id: String,
    pub name: String,
    pub city: Option<String>,
    pub manager_name: Option<String>,
    pub manager_contact: Option<String>,
    pub manager_email: Option<String>,
    pub zones: Vec<String>,
}

/// 校验单个区域名
pub fn validate_zone(zone: &str) -> Result<(), String> {
    let len = zone.chars().count();
    if !(ZONE_MIN_LEN..=ZONE_MAX_LEN).contains(&len) {
        return Err(format!(
            "区域名长度必须在 {}-{} 之间: {}",
            ZONE_MIN_LEN, ZONE_MAX_LEN, zone
        ));
    }
    if !zone.chars().all(|c| c.is_alphanumeric() || c == ' ') {
        return Err(format!("区域名只允许字母数字与空格: {}", zone));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_zone() {
        assert!(validate_zone("Cardio").is_ok());
        assert!(validate_zone("Free Weights 2").is_ok());
        assert!(validate_zone("ab").is_err());
        assert!(validate_zone(&"x".repeat(31)).is_err());
        assert!(validate_zone("Spin-Room").is_err());
    }
}
