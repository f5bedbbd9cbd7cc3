use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub gender: Option<String>,
    pub age: Option<i32>,
    pub created_at: DateTime<Utc>,
}

/// 新建用户时写入的字段，密码已经过哈希
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub password_hash: String,
    pub gender: Option<String>,
    pub age: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct UserChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub password_hash: Option<String>,
    pub gender: Option<String>,
    pub age: Option<i32>,
}

impl UserChanges {
    pub fn apply(self, user: &mut User) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(email) = self.email {
            user.email = email;
        }
        if let Some(phone_number) = self.phone_number {
            user.phone_number = phone_number;
        }
        if let Some(password_hash) = self.password_hash {
            user.password_hash = password_hash;
        }
        if self.gender.is_some() {
            user.gender = self.gender;
        }
        if self.age.is_some() {
            user.age = self.age;
        }
    }
}
