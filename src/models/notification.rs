use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 未指定过期时间时，通知在创建 7 天后过期
pub const DEFAULT_EXPIRY_DAYS: i64 = 7;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub description: String,
    pub community_id: String,
    pub expired_date: DateTime<Utc>,
    pub active: bool,
    pub is_public: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewNotification {
    pub title: String,
    pub description: String,
    pub community_id: String,
    pub expired_date: DateTime<Utc>,
    pub active: bool,
    pub is_public: bool,
}

impl NewNotification {
    /// 填充默认值：过期时间为 `now` 之后 7 天，`active` 与 `is_public` 默认为 false
    pub fn with_defaults(
        title: String,
        description: String,
        community_id: String,
        expired_date: Option<DateTime<Utc>>,
        active: Option<bool>,
        is_public: Option<bool>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            title,
            description,
            community_id,
            expired_date: expired_date.unwrap_or(now + Duration::days(DEFAULT_EXPIRY_DAYS)),
            active: active.unwrap_or(false),
            is_public: is_public.unwrap_or(false),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct NotificationChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub community_id: Option<String>,
    pub expired_date: Option<DateTime<Utc>>,
    pub active: Option<bool>,
    pub is_public: Option<bool>,
}

impl NotificationChanges {
    pub fn apply(self, notification: &mut Notification) {
        if let Some(title) = self.title {
            notification.title = title;
        }
        if let Some(description) = self.description {
            notification.description = description;
        }
        if let Some(community_id) = self.community_id {
            notification.community_id = community_id;
        }
        if let Some(expired_date) = self.expired_date {
            notification.expired_date = expired_date;
        }
        if let Some(active) = self.active {
            notification.active = active;
        }
        if let Some(is_public) = self.is_public {
            notification.is_public = is_public;
        }
    }
}
