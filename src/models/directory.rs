use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// 社区通讯录条目，比广告多了联系方式，且可以不属于任何社区
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Directory {
    pub id: String,
    pub title: String,
    pub description: String,
    pub description2: Option<String>,
    pub description3: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: Option<String>,
    pub back_drop_image: Option<String>,
    pub expired_date: Option<DateTime<Utc>>,
    pub is_public: bool,
    pub community_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewDirectory {
    pub title: String,
    pub description: String,
    pub description2: Option<String>,
    pub description3: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub kind: Option<String>,
    pub back_drop_image: Option<String>,
    pub expired_date: Option<DateTime<Utc>>,
    pub is_public: bool,
    pub community_id: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct DirectoryChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub description2: Option<String>,
    pub description3: Option<String>,
    pub phone_number: Option<String>,
    pub email: Option<String>,
    pub kind: Option<String>,
    pub back_drop_image: Option<String>,
    pub expired_date: Option<DateTime<Utc>>,
    pub is_public: Option<bool>,
    pub community_id: Option<String>,
}

impl DirectoryChanges {
    pub fn apply(self, entry: &mut Directory) {
        if let Some(title) = self.title {
            entry.title = title;
        }
        if let Some(description) = self.description {
            entry.description = description;
        }
        if self.description2.is_some() {
            entry.description2 = self.description2;
        }
        if self.description3.is_some() {
            entry.description3 = self.description3;
        }
        if self.phone_number.is_some() {
            entry.phone_number = self.phone_number;
        }
        if self.email.is_some() {
            entry.email = self.email;
        }
        if self.kind.is_some() {
            entry.kind = self.kind;
        }
        if self.back_drop_image.is_some() {
            entry.back_drop_image = self.back_drop_image;
        }
        if self.expired_date.is_some() {
            entry.expired_date = self.expired_date;
        }
        if let Some(is_public) = self.is_public {
            entry.is_public = is_public;
        }
        if self.community_id.is_some() {
            entry.community_id = self.community_id;
        }
    }
}
