use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Advertisement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub description2: Option<String>,
    pub description3: Option<String>,
    #[serde(rename = "type")]
    #[sqlx(rename = "type")]
    pub kind: Option<String>,
    pub back_drop_image: Option<String>,
    pub expired_date: Option<DateTime<Utc>>,
    pub is_public: bool,
    pub community_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewAdvertisement {
    pub title: String,
    pub description: String,
    pub description2: Option<String>,
    pub description3: Option<String>,
    pub kind: Option<String>,
    pub back_drop_image: Option<String>,
    pub expired_date: Option<DateTime<Utc>>,
    pub is_public: bool,
    pub community_id: String,
}

#[derive(Debug, Clone, Default)]
pub struct AdvertisementChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub description2: Option<String>,
    pub description3: Option<String>,
    pub kind: Option<String>,
    pub back_drop_image: Option<String>,
    pub expired_date: Option<DateTime<Utc>>,
    pub is_public: Option<bool>,
    pub community_id: Option<String>,
}

impl AdvertisementChanges {
    pub fn apply(self, ad: &mut Advertisement) {
        if let Some(title) = self.title {
            ad.title = title;
        }
        if let Some(description) = self.description {
            ad.description = description;
        }
        if self.description2.is_some() {
            ad.description2 = self.description2;
        }
        if self.description3.is_some() {
            ad.description3 = self.description3;
        }
        if self.kind.is_some() {
            ad.kind = self.kind;
        }
        if self.back_drop_image.is_some() {
            ad.back_drop_image = self.back_drop_image;
        }
        if self.expired_date.is_some() {
            ad.expired_date = self.expired_date;
        }
        if let Some(is_public) = self.is_public {
            ad.is_public = is_public;
        }
        if let Some(community_id) = self.community_id {
            ad.community_id = community_id;
        }
    }
}
