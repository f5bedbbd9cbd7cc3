use axum::{
    Json,
    extract::{FromRequest, Request},
};
use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::AppError;
use crate::utils::parse_date;
use crate::validation::{FieldRule, ValidationErrors, validate};

/// JSON 对象请求体。解析失败时返回信封而不是 axum 默认的纯文本拒绝
///
/// multipart 表单的文本字段也会收集成同样的结构，以复用校验与字段读取
#[derive(Debug, Clone)]
pub struct JsonBody(pub Map<String, Value>);

impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

        match value {
            Value::Object(map) => Ok(JsonBody(map)),
            _ => Err(AppError::BadRequest(
                "Request body must be a JSON object".to_string(),
            )),
        }
    }
}

impl JsonBody {
    pub fn validate(&self, rules: &[FieldRule]) -> Result<(), ValidationErrors> {
        validate(&self.0, rules)
    }

    /// 校验通过之后再转换成具体的请求类型
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T, AppError> {
        serde_json::from_value(Value::Object(self.0))
            .map_err(|err| AppError::BadRequest(err.to_string()))
    }

    /// 字符串字段；数字和布尔值按文本读取，null 视为缺失
    pub fn string(&self, key: &str) -> Option<String> {
        match self.0.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        match self.0.get(key)? {
            Value::Bool(b) => Some(*b),
            Value::String(s) => match s.trim() {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            },
            Value::Number(n) => n.as_i64().map(|n| n != 0),
            _ => None,
        }
    }

    pub fn integer(&self, key: &str) -> Option<i32> {
        match self.0.get(key)? {
            Value::Number(n) => n.as_i64().and_then(|n| i32::try_from(n).ok()),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    /// 无法解析的日期按缺失处理
    pub fn date(&self, key: &str) -> Option<DateTime<Utc>> {
        self.0.get(key)?.as_str().and_then(parse_date)
    }
}
