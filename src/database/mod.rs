// 持久化层
// 处理函数只依赖 Store trait，生产环境使用 Postgres，测试与本地调试使用内存实现

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    Advertisement, AdvertisementChanges, Card, CardChanges, CardWithCommunity, Community,
    CommunityChanges, Directory, DirectoryChanges, NewAdvertisement, NewCard, NewCommunity,
    NewDirectory, NewNotification, NewUser, Notification, NotificationChanges, User, UserChanges,
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("record not found")]
    NotFound,

    #[error("foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    #[error("unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl StoreError {
    /// 记录不存在或外键指向不存在的记录，对外都视为 not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, StoreError::NotFound | StoreError::ForeignKeyViolation(_))
    }
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                StoreError::ForeignKeyViolation(db.constraint().unwrap_or_default().to_string())
            }
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                StoreError::UniqueViolation(db.constraint().unwrap_or_default().to_string())
            }
            other => StoreError::Database(other),
        }
    }
}

pub type StoreResult<T> = Result<T, StoreError>;

/// 所有列表按创建时间倒序返回；update/delete 在记录不存在时返回 `StoreError::NotFound`
#[async_trait]
pub trait Store: Send + Sync + 'static {
    // 用户
    async fn create_user(&self, new: NewUser) -> StoreResult<User>;
    async fn find_user(&self, id: &str) -> StoreResult<Option<User>>;
    async fn find_user_by_phone(&self, phone_number: &str) -> StoreResult<Option<User>>;
    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>>;
    async fn update_user(&self, id: &str, changes: UserChanges) -> StoreResult<User>;
    async fn delete_user(&self, id: &str) -> StoreResult<()>;

    // 社区
    async fn create_community(&self, new: NewCommunity) -> StoreResult<Community>;
    async fn list_communities(&self) -> StoreResult<Vec<Community>>;
    async fn find_community(&self, id: &str) -> StoreResult<Option<Community>>;
    async fn update_community(&self, id: &str, changes: CommunityChanges) -> StoreResult<Community>;
    async fn delete_community(&self, id: &str) -> StoreResult<()>;

    // 卡片
    async fn create_card(&self, new: NewCard) -> StoreResult<Card>;
    async fn list_cards_for_user(&self, user_id: &str) -> StoreResult<Vec<CardWithCommunity>>;
    async fn list_cards_for_community(&self, community_id: &str) -> StoreResult<Vec<Card>>;
    async fn find_card(&self, id: &str) -> StoreResult<Option<Card>>;
    async fn update_card(&self, id: &str, changes: CardChanges) -> StoreResult<Card>;
    async fn delete_card(&self, id: &str) -> StoreResult<()>;

    // 广告
    async fn create_advertisement(&self, new: NewAdvertisement) -> StoreResult<Advertisement>;
    async fn list_advertisements(&self) -> StoreResult<Vec<Advertisement>>;
    async fn find_advertisement(&self, id: &str) -> StoreResult<Option<Advertisement>>;
    async fn update_advertisement(
        &self,
        id: &str,
        changes: AdvertisementChanges,
    ) -> StoreResult<Advertisement>;
    async fn delete_advertisement(&self, id: &str) -> StoreResult<()>;

    // 通讯录
    async fn create_directory(&self, new: NewDirectory) -> StoreResult<Directory>;
    async fn list_directories(&self) -> StoreResult<Vec<Directory>>;
    async fn find_directory(&self, id: &str) -> StoreResult<Option<Directory>>;
    async fn update_directory(&self, id: &str, changes: DirectoryChanges) -> StoreResult<Directory>;
    async fn delete_directory(&self, id: &str) -> StoreResult<()>;

    // 通知
    async fn create_notification(&self, new: NewNotification) -> StoreResult<Notification>;
    /// 公开通知加上指定社区的通知；未指定社区时返回全部
    async fn list_notifications(&self, community_id: Option<&str>) -> StoreResult<Vec<Notification>>;
    async fn list_notifications_for_community(
        &self,
        community_id: &str,
    ) -> StoreResult<Vec<Notification>>;
    async fn find_notification(&self, id: &str) -> StoreResult<Option<Notification>>;
    async fn update_notification(
        &self,
        id: &str,
        changes: NotificationChanges,
    ) -> StoreResult<Notification>;
    async fn delete_notification(&self, id: &str) -> StoreResult<()>;
}
