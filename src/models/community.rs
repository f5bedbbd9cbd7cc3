use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    pub id: String,
    pub name: String,
    pub emails: Vec<String>,
    pub phone_numbers: Vec<String>,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCommunity {
    pub name: String,
    pub emails: Vec<String>,
    #[serde(default)]
    pub phone_numbers: Vec<String>,
    pub description: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CommunityChanges {
    pub name: Option<String>,
    pub emails: Option<Vec<String>>,
    pub phone_numbers: Option<Vec<String>>,
    pub description: Option<String>,
}

impl CommunityChanges {
    pub fn apply(self, community: &mut Community) {
        if let Some(name) = self.name {
            community.name = name;
        }
        if let Some(emails) = self.emails {
            community.emails = emails;
        }
        if let Some(phone_numbers) = self.phone_numbers {
            community.phone_numbers = phone_numbers;
        }
        if let Some(description) = self.description {
            community.description = description;
        }
    }
}
