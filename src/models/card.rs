use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Community;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Card {
    pub id: String,
    pub card_number: String,
    pub full_name: String,
    pub date_of_birth: Option<DateTime<Utc>>,
    pub nationality: String,
    pub gender: String,
    pub date_of_issue: DateTime<Utc>,
    pub date_of_expiry: Option<DateTime<Utc>>,
    pub un_card_number: Option<String>,
    pub student_number: Option<String>,
    pub passport_photo: Option<String>,
    pub front_photo: Option<String>,
    pub back_photo: Option<String>,
    pub status: Option<String>,
    pub active: bool,
    pub community_id: String,
    pub user_id: String,
    pub created_at: DateTime<Utc>,
}

/// 卡片列表项，附带所属社区
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardWithCommunity {
    #[serde(flatten)]
    pub card: Card,
    pub community: Option<Community>,
}

/// 卡片 id 由上传流程预先生成，照片路径中会用到它
#[derive(Debug, Clone)]
pub struct NewCard {
    pub id: String,
    pub card_number: String,
    pub full_name: String,
    pub date_of_birth: Option<DateTime<Utc>>,
    pub nationality: String,
    pub gender: String,
    pub date_of_issue: DateTime<Utc>,
    pub date_of_expiry: Option<DateTime<Utc>>,
    pub un_card_number: Option<String>,
    pub student_number: Option<String>,
    pub passport_photo: Option<String>,
    pub front_photo: Option<String>,
    pub back_photo: Option<String>,
    pub status: Option<String>,
    pub active: bool,
    pub community_id: String,
    pub user_id: String,
}

impl NewCard {
    pub fn into_card(self, created_at: DateTime<Utc>) -> Card {
        Card {
            id: self.id,
            card_number: self.card_number,
            full_name: self.full_name,
            date_of_birth: self.date_of_birth,
            nationality: self.nationality,
            gender: self.gender,
            date_of_issue: self.date_of_issue,
            date_of_expiry: self.date_of_expiry,
            un_card_number: self.un_card_number,
            student_number: self.student_number,
            passport_photo: self.passport_photo,
            front_photo: self.front_photo,
            back_photo: self.back_photo,
            status: self.status,
            active: self.active,
            community_id: self.community_id,
            user_id: self.user_id,
            created_at,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CardChanges {
    pub card_number: Option<String>,
    pub full_name: Option<String>,
    pub date_of_birth: Option<DateTime<Utc>>,
    pub nationality: Option<String>,
    pub gender: Option<String>,
    pub date_of_issue: Option<DateTime<Utc>>,
    pub date_of_expiry: Option<DateTime<Utc>>,
    pub un_card_number: Option<String>,
    pub student_number: Option<String>,
    pub status: Option<String>,
    pub active: Option<bool>,
    pub community_id: Option<String>,
}

impl CardChanges {
    pub fn apply(self, card: &mut Card) {
        if let Some(card_number) = self.card_number {
            card.card_number = card_number;
        }
        if let Some(full_name) = self.full_name {
            card.full_name = full_name;
        }
        if self.date_of_birth.is_some() {
            card.date_of_birth = self.date_of_birth;
        }
        if let Some(nationality) = self.nationality {
            card.nationality = nationality;
        }
        if let Some(gender) = self.gender {
            card.gender = gender;
        }
        if let Some(date_of_issue) = self.date_of_issue {
            card.date_of_issue = date_of_issue;
        }
        if self.date_of_expiry.is_some() {
            card.date_of_expiry = self.date_of_expiry;
        }
        if self.un_card_number.is_some() {
            card.un_card_number = self.un_card_number;
        }
        if self.student_number.is_some() {
            card.student_number = self.student_number;
        }
        if self.status.is_some() {
            card.status = self.status;
        }
        if let Some(active) = self.active {
            card.active = active;
        }
        if let Some(community_id) = self.community_id {
            card.community_id = community_id;
        }
    }
}
