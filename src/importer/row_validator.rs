// ==========================================
// 贸易物流管理后台 - 行校验/映射器
// ==========================================
// 职责: 按导入模式校验单行 → 标准化记录 + 错误 + 警告
// 规则:
// - 必填字段问题写入 errors，并令整行 success = false
// - 选填字段问题只写入 warnings，不影响 success
// - 单字段内短路（缺失/枚举不符即跳过后续检查），字段之间不短路
// ==========================================

use crate::domain::import::ImportResult;
use crate::importer::error::ImportOutcome;
use crate::importer::field_rule::{FieldRule, ImportSchema, RuleKind};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;

const EMAIL_PATTERN: &str = r"^[^\s@]+@[^\s@]+\.\S+$";
const PHONE_PATTERN: &str = r"^\+?[\d\s-]+$";

/// 可接受的纯日期格式（按顺序尝试）
const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%Y%m%d"];

/// 可接受的无时区日期时间格式（视为 UTC）
const DATETIME_FORMATS: [&str; 3] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%d %H:%M"];

/// 单字段检查结论
#[derive(Debug, PartialEq)]
enum Finding {
    Missing,
    Invalid(String),
}

pub struct RowValidator {
    email: Regex,
    phone: Regex,
}

impl RowValidator {
    pub fn new() -> ImportOutcome<Self> {
        Ok(Self {
            email: Regex::new(EMAIL_PATTERN)?,
            phone: Regex::new(PHONE_PATTERN)?,
        })
    }

    /// 校验并映射一行
    ///
    /// # 参数
    /// - row: 数据行单元格
    /// - headers: 表头行（按名称大小写不敏感匹配字段）
    /// - schema: 导入模式
    pub fn validate(&self, row: &[String], headers: &[String], schema: &ImportSchema) -> ImportResult {
        let mut result = ImportResult {
            success: true,
            ..ImportResult::default()
        };

        for rule in schema.required() {
            match self.check_field(rule, lookup(row, headers, &rule.field)) {
                Ok(value) => {
                    result.data.insert(rule.field.clone(), value);
                }
                Err(Finding::Missing) => {
                    result.success = false;
                    result
                        .errors
                        .push(format!("Missing required field: {}", rule.field));
                }
                Err(Finding::Invalid(message)) => {
                    result.success = false;
                    result.errors.push(message);
                }
            }
        }

        for rule in schema.optional() {
            match self.check_field(rule, lookup(row, headers, &rule.field)) {
                Ok(value) => {
                    result.data.insert(rule.field.clone(), value);
                }
                Err(Finding::Missing) => {
                    result
                        .warnings
                        .push(format!("Missing optional field: {}", rule.field));
                }
                Err(Finding::Invalid(message)) => result.warnings.push(message),
            }
        }

        result
    }

    /// 检查单个字段，成功时返回标准化后的值
    fn check_field(&self, rule: &FieldRule, raw: Option<&str>) -> Result<String, Finding> {
        let value = match raw.map(str::trim) {
            Some(v) if !v.is_empty() => v,
            _ => return Err(Finding::Missing),
        };
        let field = &rule.field;

        match &rule.kind {
            RuleKind::String => Ok(value.to_string()),
            RuleKind::Enum { values } => {
                if values.iter().any(|allowed| allowed == value) {
                    Ok(value.to_string())
                } else {
                    Err(Finding::Invalid(format!(
                        "Invalid {}: {}. Must be one of: {}",
                        field,
                        value,
                        values.join(", ")
                    )))
                }
            }
            RuleKind::Number { min, max } => {
                let number = parse_number(value)
                    .ok_or_else(|| Finding::Invalid(format!("Invalid number for {}", field)))?;
                if let Some(min) = min {
                    if number < *min {
                        return Err(Finding::Invalid(format!(
                            "{} must be greater than {}",
                            field, min
                        )));
                    }
                }
                if let Some(max) = max {
                    if number > *max {
                        return Err(Finding::Invalid(format!(
                            "{} must be less than {}",
                            field, max
                        )));
                    }
                }
                Ok(number.to_string())
            }
            RuleKind::Date => parse_date(value)
                .map(|d| d.format("%Y-%m-%d").to_string())
                .ok_or_else(|| Finding::Invalid(format!("Invalid date for {}", field))),
            RuleKind::Email => {
                if self.email.is_match(value) {
                    Ok(value.to_string())
                } else {
                    Err(Finding::Invalid(format!("Invalid email for {}", field)))
                }
            }
            RuleKind::Phone => {
                if self.phone.is_match(value) {
                    Ok(value.to_string())
                } else {
                    Err(Finding::Invalid(format!("Invalid phone number for {}", field)))
                }
            }
        }
    }
}

/// 按表头名称（大小写不敏感）取单元格
fn lookup<'a>(row: &'a [String], headers: &[String], field: &str) -> Option<&'a str> {
    let field = field.to_lowercase();
    headers
        .iter()
        .position(|h| h.trim().to_lowercase() == field)
        .and_then(|idx| row.get(idx))
        .map(String::as_str)
}

/// 解析有限浮点数（拒绝 NaN / inf）
fn parse_number(value: &str) -> Option<f64> {
    value.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// 解析日历日期；带时区的时间戳先换算到 UTC 再截断为日期
fn parse_date(value: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc).date_naive());
    }

    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    fn single(rule: FieldRule) -> ImportSchema {
        ImportSchema::builder("test").required(rule).build()
    }

    fn validate_one(rule: FieldRule, value: &str) -> ImportResult {
        let headers = strings(&[rule.field.as_str()]);
        let schema = single(rule);
        RowValidator::new()
            .unwrap()
            .validate(&strings(&[value]), &headers, &schema)
    }

    #[test]
    fn test_number_round_trips_value() {
        let result = validate_one(FieldRule::number("qty", Some(0.0), None), "5");
        assert!(result.success);
        assert_eq!(result.data["qty"], "5");

        let result = validate_one(FieldRule::number("qty", None, None), "5.50");
        assert_eq!(result.data["qty"], "5.5");
    }

    #[test]
    fn test_number_exponent_input_written_as_plain_decimal() {
        let result = validate_one(FieldRule::number("qty", None, None), "1e21");
        assert_eq!(result.data["qty"], "1000000000000000000000");

        let result = validate_one(FieldRule::number("qty", None, None), "1e-7");
        assert_eq!(result.data["qty"], "0.0000001");

        let result = validate_one(FieldRule::number("qty", None, None), "2.5E3");
        assert_eq!(result.data["qty"], "2500");
    }

    #[test]
    fn test_number_bounds() {
        let result = validate_one(FieldRule::number("qty", Some(0.0), Some(10.0)), "-1");
        assert!(!result.success);
        assert!(result.errors[0].contains("must be greater than 0"));
        assert!(!result.data.contains_key("qty"));

        let result = validate_one(FieldRule::number("qty", Some(0.0), Some(10.0)), "11");
        assert_eq!(result.errors, vec!["qty must be less than 10"]);

        // 边界值本身合法
        assert!(validate_one(FieldRule::number("qty", Some(0.0), Some(10.0)), "0").success);
    }

    #[test]
    fn test_number_rejects_garbage_and_non_finite() {
        for bad in ["abc", "NaN", "inf", "5kg"] {
            let result = validate_one(FieldRule::number("qty", None, None), bad);
            assert_eq!(result.errors, vec!["Invalid number for qty"], "value: {}", bad);
        }
    }

    #[test]
    fn test_date_normalization() {
        let result = validate_one(FieldRule::date("d"), "2024-03-15");
        assert_eq!(result.data["d"], "2024-03-15");

        let result = validate_one(FieldRule::date("d"), "2024/3/5");
        assert_eq!(result.data["d"], "2024-03-05");

        // 换算为 UTC 日期，避免跨日偏移
        let result = validate_one(FieldRule::date("d"), "2024-03-15T23:30:00-05:00");
        assert_eq!(result.data["d"], "2024-03-16");

        let result = validate_one(FieldRule::date("d"), "2024-03-15 08:00:00");
        assert_eq!(result.data["d"], "2024-03-15");
    }

    #[test]
    fn test_date_invalid() {
        let result = validate_one(FieldRule::date("d"), "not-a-date");
        assert!(!result.success);
        assert!(result.errors[0].contains("Invalid date"));

        let result = validate_one(FieldRule::date("d"), "2024-02-30");
        assert!(!result.success);
    }

    #[test]
    fn test_email() {
        assert!(validate_one(FieldRule::email("e"), "a@b.com").success);

        let result = validate_one(FieldRule::email("e"), "not-an-email");
        assert_eq!(result.errors, vec!["Invalid email for e"]);

        assert!(!validate_one(FieldRule::email("e"), "a b@c.com").success);
        assert!(!validate_one(FieldRule::email("e"), "a@@b.com").success);
    }

    #[test]
    fn test_phone() {
        assert!(validate_one(FieldRule::phone("p"), "+31 10 555-0100").success);
        assert!(validate_one(FieldRule::phone("p"), "5550100").success);

        let result = validate_one(FieldRule::phone("p"), "555-CALL");
        assert_eq!(result.errors, vec!["Invalid phone number for p"]);
        assert!(!validate_one(FieldRule::phone("p"), "++1 555").success);
    }

    #[test]
    fn test_enum_message_lists_allowed_values() {
        let result = validate_one(FieldRule::one_of("currency", &["USD", "EUR"]), "JPY");
        assert_eq!(
            result.errors,
            vec!["Invalid currency: JPY. Must be one of: USD, EUR"]
        );
        // 枚举严格匹配大小写
        assert!(!validate_one(FieldRule::one_of("currency", &["USD"]), "usd").success);
    }

    #[test]
    fn test_missing_required_fields_reported_individually() {
        let schema = ImportSchema::builder("test")
            .required(FieldRule::string("a"))
            .required(FieldRule::email("b"))
            .required(FieldRule::string("c"))
            .build();
        let headers = strings(&["a", "b", "c"]);

        let result = RowValidator::new()
            .unwrap()
            .validate(&strings(&["", "   ", "ok"]), &headers, &schema);

        assert!(!result.success);
        assert_eq!(
            result.errors,
            vec!["Missing required field: a", "Missing required field: b"]
        );
        assert_eq!(result.data["c"], "ok");
    }

    #[test]
    fn test_header_match_is_case_insensitive() {
        let schema = single(FieldRule::string("contract_number"));
        let headers = strings(&["Contract_Number"]);

        let result = RowValidator::new()
            .unwrap()
            .validate(&strings(&["CT-1"]), &headers, &schema);
        assert!(result.success);
        assert_eq!(result.data["contract_number"], "CT-1");
    }

    #[test]
    fn test_absent_header_counts_as_missing() {
        let schema = single(FieldRule::string("name"));
        let result = RowValidator::new()
            .unwrap()
            .validate(&strings(&["x"]), &strings(&["other"]), &schema);
        assert_eq!(result.errors, vec!["Missing required field: name"]);
    }

    #[test]
    fn test_optional_failures_only_warn() {
        let schema = ImportSchema::builder("test")
            .required(FieldRule::string("name"))
            .optional(FieldRule::email("email"))
            .optional(FieldRule::string("notes"))
            .build();
        let headers = strings(&["name", "email"]);

        let result = RowValidator::new()
            .unwrap()
            .validate(&strings(&["Acme", "bad"]), &headers, &schema);

        assert!(result.success);
        assert!(result.errors.is_empty());
        assert_eq!(
            result.warnings,
            vec!["Invalid email for email", "Missing optional field: notes"]
        );
        assert!(!result.data.contains_key("email"));
    }
}
