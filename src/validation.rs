//! 声明式字段校验
//!
//! 每个路由声明一组 [`FieldRule`]，按声明顺序全部执行并收集所有失败，
//! 任何一条失败时处理函数都不会产生副作用。

use std::collections::BTreeMap;
use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::{Map, Value};
use validator::ValidateEmail;

use crate::utils::parse_date;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Check {
    NotEmpty,
    Email,
    MobilePhone,
    MinLength(usize),
    IsoDate,
    Boolean,
    StringArray,
    /// 非空数组，且每个元素都形如 `\S+@\S+\.\S+`
    EmailList,
}

#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub field: &'static str,
    pub check: Check,
    pub message: &'static str,
    pub optional: bool,
}

impl FieldRule {
    pub const fn new(field: &'static str, check: Check, message: &'static str) -> Self {
        Self {
            field,
            check,
            message,
            optional: false,
        }
    }

    /// 字段缺失时跳过该规则
    pub const fn optional(self) -> Self {
        Self {
            optional: true,
            ..self
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn by_field(&self) -> BTreeMap<&str, Vec<&str>> {
        let mut map: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for error in &self.errors {
            map.entry(error.field.as_str())
                .or_default()
                .push(error.message.as_str());
        }
        map
    }

    fn push(&mut self, field: &str, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.to_string(),
            message: message.into(),
        });
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.errors.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{} {}", error.message, error.field)?;
        }
        Ok(())
    }
}

pub fn validate(body: &Map<String, Value>, rules: &[FieldRule]) -> Result<(), ValidationErrors> {
    let mut errors = ValidationErrors::default();

    for rule in rules {
        let value = body.get(rule.field);
        if value.is_none() && rule.optional {
            continue;
        }
        apply(rule, value, &mut errors);
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

fn apply(rule: &FieldRule, value: Option<&Value>, errors: &mut ValidationErrors) {
    let passed = match rule.check {
        Check::NotEmpty => match value {
            None | Some(Value::Null) => false,
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(_) => true,
        },
        Check::Email => as_str(value).is_some_and(is_email),
        Check::MobilePhone => as_str(value).is_some_and(is_mobile_phone),
        Check::MinLength(min) => as_str(value).is_some_and(|s| s.chars().count() >= min),
        Check::IsoDate => as_str(value).is_some_and(|s| parse_date(s).is_some()),
        Check::Boolean => match value {
            Some(Value::Bool(_)) => true,
            Some(Value::String(s)) => matches!(s.as_str(), "true" | "false" | "1" | "0"),
            _ => false,
        },
        Check::StringArray => match value {
            Some(Value::Array(items)) => items.iter().all(Value::is_string),
            _ => false,
        },
        Check::EmailList => match value {
            Some(Value::Array(items)) if !items.is_empty() => {
                for item in items {
                    let text = match item {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    };
                    if !matches_loose_email(&text) {
                        errors.push(rule.field, format!("Invalid email format: {}", text));
                    }
                }
                true
            }
            _ => false,
        },
    };

    if !passed {
        errors.push(rule.field, rule.message);
    }
}

fn as_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str)
}

// 社区邮箱列表沿用宽松的格式检查，不锚定
static LOOSE_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\S+@\S+\.\S+").expect("loose email regex"));

// 可选的 `+` 前缀，7 到 15 位数字，数字之间允许空格和短横线
static MOBILE_PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[ -]*(?:[0-9][ -]*){7,15}$").expect("mobile phone regex")
});

fn matches_loose_email(value: &str) -> bool {
    LOOSE_EMAIL.is_match(value)
}

fn is_email(value: &str) -> bool {
    value.validate_email()
}

fn is_mobile_phone(value: &str) -> bool {
    MOBILE_PHONE.is_match(value.trim())
}
