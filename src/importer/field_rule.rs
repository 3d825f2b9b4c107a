// ==========================================
// 贸易物流管理后台 - 字段规则与导入模式
// ==========================================
// 职责: 声明式字段规则（必填/选填 + 取值类型）
// 约束: 同一模式内字段名唯一；规则顺序即模板列顺序
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

// ==========================================
// RuleKind - 字段取值规则
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RuleKind {
    /// 任意字符串，原样保存
    String,
    /// 浮点数，可选上下界（含边界值）
    Number { min: Option<f64>, max: Option<f64> },
    /// 日历日期，保存为 YYYY-MM-DD
    Date,
    Email,
    Phone,
    /// 封闭枚举
    Enum { values: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldRule {
    pub field: String,
    pub kind: RuleKind,
}

impl FieldRule {
    pub fn new(field: impl Into<String>, kind: RuleKind) -> Self {
        Self {
            field: field.into(),
            kind,
        }
    }

    pub fn string(field: impl Into<String>) -> Self {
        Self::new(field, RuleKind::String)
    }

    pub fn number(field: impl Into<String>, min: Option<f64>, max: Option<f64>) -> Self {
        Self::new(field, RuleKind::Number { min, max })
    }

    pub fn date(field: impl Into<String>) -> Self {
        Self::new(field, RuleKind::Date)
    }

    pub fn email(field: impl Into<String>) -> Self {
        Self::new(field, RuleKind::Email)
    }

    pub fn phone(field: impl Into<String>) -> Self {
        Self::new(field, RuleKind::Phone)
    }

    pub fn one_of(field: impl Into<String>, values: &[&str]) -> Self {
        Self::new(
            field,
            RuleKind::Enum {
                values: values.iter().map(|v| v.to_string()).collect(),
            },
        )
    }
}

// ==========================================
// ImportSchema - 某类实体的导入模式
// ==========================================
// 构造后不可变；sample 仅用于模板生成
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportSchema {
    name: String,
    required: Vec<FieldRule>,
    optional: Vec<FieldRule>,
    sample: BTreeMap<String, String>,
}

impl ImportSchema {
    pub fn builder(name: impl Into<String>) -> SchemaBuilder {
        SchemaBuilder {
            name: name.into(),
            required: Vec::new(),
            optional: Vec::new(),
            sample: BTreeMap::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn required(&self) -> &[FieldRule] {
        &self.required
    }

    pub fn optional(&self) -> &[FieldRule] {
        &self.optional
    }

    pub fn sample(&self) -> &BTreeMap<String, String> {
        &self.sample
    }

    /// 全部字段名（必填在前，选填在后）
    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.required
            .iter()
            .chain(self.optional.iter())
            .map(|r| r.field.as_str())
    }
}

pub struct SchemaBuilder {
    name: String,
    required: Vec<FieldRule>,
    optional: Vec<FieldRule>,
    sample: BTreeMap<String, String>,
}

impl SchemaBuilder {
    pub fn required(mut self, rule: FieldRule) -> Self {
        self.required.push(rule);
        self
    }

    pub fn optional(mut self, rule: FieldRule) -> Self {
        self.optional.push(rule);
        self
    }

    pub fn sample(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.sample.insert(field.into(), value.into());
        self
    }

    /// 构建模式
    ///
    /// 字段名重复时保留先出现的规则（必填优先于选填），后者丢弃并告警
    pub fn build(self) -> ImportSchema {
        let mut seen = std::collections::HashSet::new();
        let mut keep = |rule: &FieldRule| {
            let fresh = seen.insert(rule.field.to_lowercase());
            if !fresh {
                warn!(schema = %self.name, field = %rule.field, "重复字段规则已忽略");
            }
            fresh
        };

        let required: Vec<FieldRule> = self.required.into_iter().filter(|r| keep(r)).collect();
        let optional: Vec<FieldRule> = self.optional.into_iter().filter(|r| keep(r)).collect();

        ImportSchema {
            name: self.name,
            required,
            optional,
            sample: self.sample,
        }
    }
}
