//! 公共验证函数模块
//! 提供科目名、每日科目数、计划天数的输入验证，供核心会话和 HTTP 路由共用。

use crate::constants::MAX_SUBJECT_NAME_CHARS;

/// 规范化科目名：去除首尾空白，1-64 字符，不允许控制字符
pub fn normalize_subject_name(subject: &str) -> Result<String, &'static str> {
    let trimmed = subject.trim();
    if trimmed.is_empty() {
        return Err("subject name must not be empty");
    }
    if trimmed.chars().count() > MAX_SUBJECT_NAME_CHARS {
        return Err("subject name must be at most 64 characters");
    }
    if trimmed.chars().any(char::is_control) {
        return Err("subject name must not contain control characters");
    }
    Ok(trimmed.to_string())
}

/// 验证每日科目数：1..=max
pub fn validate_daily_capacity(capacity: u32, max: u32) -> Result<(), String> {
    if capacity == 0 || capacity > max {
        return Err(format!("dailyCapacity must be between 1 and {max}"));
    }
    Ok(())
}

/// 验证计划天数：1..=max
pub fn validate_horizon_days(days: u32, max: u32) -> Result<(), String> {
    if days == 0 || days > max {
        return Err(format!("horizonDays must be between 1 and {max}"));
    }
    Ok(())
}
