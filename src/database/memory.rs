use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{Store, StoreError, StoreResult};
use crate::models::{
    Advertisement, AdvertisementChanges, Card, CardChanges, CardWithCommunity, Community,
    CommunityChanges, Directory, DirectoryChanges, NewAdvertisement, NewCard, NewCommunity,
    NewDirectory, NewNotification, NewUser, Notification, NotificationChanges, User, UserChanges,
};

/// 进程内存储，约束与 Postgres schema 保持一致：
/// 唯一索引、外键检查以及删除社区时的级联删除
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    communities: Vec<Community>,
    cards: Vec<Card>,
    advertisements: Vec<Advertisement>,
    directories: Vec<Directory>,
    notifications: Vec<Notification>,
}

impl Tables {
    fn require_community(&self, id: &str, constraint: &str) -> StoreResult<()> {
        if self.communities.iter().any(|c| c.id == id) {
            Ok(())
        } else {
            Err(StoreError::ForeignKeyViolation(constraint.to_string()))
        }
    }

    fn require_user(&self, id: &str, constraint: &str) -> StoreResult<()> {
        if self.users.iter().any(|u| u.id == id) {
            Ok(())
        } else {
            Err(StoreError::ForeignKeyViolation(constraint.to_string()))
        }
    }

    fn check_user_unique(
        &self,
        email: &str,
        phone_number: &str,
        except: Option<&str>,
    ) -> StoreResult<()> {
        let others = self.users.iter().filter(|u| Some(u.id.as_str()) != except);
        for user in others {
            if user.email == email {
                return Err(StoreError::UniqueViolation("users_email_key".into()));
            }
            if user.phone_number == phone_number {
                return Err(StoreError::UniqueViolation("users_phone_number_key".into()));
            }
        }
        Ok(())
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn tables(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// 按创建时间倒序；时间相同则后插入的排在前面
fn newest_first<T>(
    rows: impl DoubleEndedIterator<Item = T>,
    created_at: impl Fn(&T) -> DateTime<Utc>,
) -> Vec<T> {
    let mut rows: Vec<T> = rows.rev().collect();
    rows.sort_by_key(|row| std::cmp::Reverse(created_at(row)));
    rows
}

fn remove_by_id<T>(rows: &mut Vec<T>, id: &str, row_id: impl Fn(&T) -> &str) -> StoreResult<()> {
    let before = rows.len();
    rows.retain(|row| row_id(row) != id);
    if rows.len() == before {
        return Err(StoreError::NotFound);
    }
    Ok(())
}

#[async_trait]
impl Store for MemoryStore {
    async fn create_user(&self, new: NewUser) -> StoreResult<User> {
        let mut tables = self.tables();
        tables.check_user_unique(&new.email, &new.phone_number, None)?;

        let user = User {
            id: new_id(),
            name: new.name,
            email: new.email,
            phone_number: new.phone_number,
            password_hash: new.password_hash,
            gender: new.gender,
            age: new.age,
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_user(&self, id: &str) -> StoreResult<Option<User>> {
        Ok(self.tables().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_user_by_phone(&self, phone_number: &str) -> StoreResult<Option<User>> {
        Ok(self
            .tables()
            .users
            .iter()
            .find(|u| u.phone_number == phone_number)
            .cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        Ok(self.tables().users.iter().find(|u| u.email == email).cloned())
    }

    async fn update_user(&self, id: &str, changes: UserChanges) -> StoreResult<User> {
        let mut tables = self.tables();
        let mut updated = tables
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(StoreError::NotFound)?;
        changes.apply(&mut updated);
        tables.check_user_unique(&updated.email, &updated.phone_number, Some(id))?;

        if let Some(user) = tables.users.iter_mut().find(|u| u.id == id) {
            *user = updated.clone();
        }
        Ok(updated)
    }

    async fn delete_user(&self, id: &str) -> StoreResult<()> {
        let mut tables = self.tables();
        remove_by_id(&mut tables.users, id, |u| u.id.as_str())?;
        tables.cards.retain(|c| c.user_id != id);
        Ok(())
    }

    async fn create_community(&self, new: NewCommunity) -> StoreResult<Community> {
        let community = Community {
            id: new_id(),
            name: new.name,
            emails: new.emails,
            phone_numbers: new.phone_numbers,
            description: new.description,
            created_at: Utc::now(),
        };
        self.tables().communities.push(community.clone());
        Ok(community)
    }

    async fn list_communities(&self) -> StoreResult<Vec<Community>> {
        let tables = self.tables();
        Ok(newest_first(tables.communities.iter().cloned(), |c| c.created_at))
    }

    async fn find_community(&self, id: &str) -> StoreResult<Option<Community>> {
        Ok(self.tables().communities.iter().find(|c| c.id == id).cloned())
    }

    async fn update_community(&self, id: &str, changes: CommunityChanges) -> StoreResult<Community> {
        let mut tables = self.tables();
        let community = tables
            .communities
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::NotFound)?;
        changes.apply(community);
        Ok(community.clone())
    }

    async fn delete_community(&self, id: &str) -> StoreResult<()> {
        let mut tables = self.tables();
        remove_by_id(&mut tables.communities, id, |c| c.id.as_str())?;
        tables.cards.retain(|c| c.community_id != id);
        tables.advertisements.retain(|a| a.community_id != id);
        tables.directories.retain(|d| d.community_id.as_deref() != Some(id));
        tables.notifications.retain(|n| n.community_id != id);
        Ok(())
    }

    async fn create_card(&self, new: NewCard) -> StoreResult<Card> {
        let mut tables = self.tables();
        tables.require_community(&new.community_id, "cards_community_id_fkey")?;
        tables.require_user(&new.user_id, "cards_user_id_fkey")?;
        if tables.cards.iter().any(|c| c.id == new.id) {
            return Err(StoreError::UniqueViolation("cards_pkey".into()));
        }

        let card = new.into_card(Utc::now());
        tables.cards.push(card.clone());
        Ok(card)
    }

    async fn list_cards_for_user(&self, user_id: &str) -> StoreResult<Vec<CardWithCommunity>> {
        let tables = self.tables();
        let cards = newest_first(
            tables.cards.iter().filter(|c| c.user_id == user_id).cloned(),
            |c| c.created_at,
        );
        Ok(cards
            .into_iter()
            .map(|card| {
                let community = tables
                    .communities
                    .iter()
                    .find(|c| c.id == card.community_id)
                    .cloned();
                CardWithCommunity { card, community }
            })
            .collect())
    }

    async fn list_cards_for_community(&self, community_id: &str) -> StoreResult<Vec<Card>> {
        let tables = self.tables();
        Ok(newest_first(
            tables.cards.iter().filter(|c| c.community_id == community_id).cloned(),
            |c| c.created_at,
        ))
    }

    async fn find_card(&self, id: &str) -> StoreResult<Option<Card>> {
        Ok(self.tables().cards.iter().find(|c| c.id == id).cloned())
    }

    async fn update_card(&self, id: &str, changes: CardChanges) -> StoreResult<Card> {
        let mut tables = self.tables();
        if !tables.cards.iter().any(|c| c.id == id) {
            return Err(StoreError::NotFound);
        }
        if let Some(community_id) = &changes.community_id {
            tables.require_community(community_id, "cards_community_id_fkey")?;
        }
        let card = tables
            .cards
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(StoreError::NotFound)?;
        changes.apply(card);
        Ok(card.clone())
    }

    async fn delete_card(&self, id: &str) -> StoreResult<()> {
        remove_by_id(&mut self.tables().cards, id, |c| c.id.as_str())
    }

    async fn create_advertisement(&self, new: NewAdvertisement) -> StoreResult<Advertisement> {
        let mut tables = self.tables();
        tables.require_community(&new.community_id, "advertisements_community_id_fkey")?;

        let ad = Advertisement {
            id: new_id(),
            title: new.title,
            description: new.description,
            description2: new.description2,
            description3: new.description3,
            kind: new.kind,
            back_drop_image: new.back_drop_image,
            expired_date: new.expired_date,
            is_public: new.is_public,
            community_id: new.community_id,
            created_at: Utc::now(),
        };
        tables.advertisements.push(ad.clone());
        Ok(ad)
    }

    async fn list_advertisements(&self) -> StoreResult<Vec<Advertisement>> {
        let tables = self.tables();
        Ok(newest_first(tables.advertisements.iter().cloned(), |a| a.created_at))
    }

    async fn find_advertisement(&self, id: &str) -> StoreResult<Option<Advertisement>> {
        Ok(self.tables().advertisements.iter().find(|a| a.id == id).cloned())
    }

    async fn update_advertisement(
        &self,
        id: &str,
        changes: AdvertisementChanges,
    ) -> StoreResult<Advertisement> {
        let mut tables = self.tables();
        if !tables.advertisements.iter().any(|a| a.id == id) {
            return Err(StoreError::NotFound);
        }
        if let Some(community_id) = &changes.community_id {
            tables.require_community(community_id, "advertisements_community_id_fkey")?;
        }
        let ad = tables
            .advertisements
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(StoreError::NotFound)?;
        changes.apply(ad);
        Ok(ad.clone())
    }

    async fn delete_advertisement(&self, id: &str) -> StoreResult<()> {
        remove_by_id(&mut self.tables().advertisements, id, |a| a.id.as_str())
    }

    async fn create_directory(&self, new: NewDirectory) -> StoreResult<Directory> {
        let mut tables = self.tables();
        if let Some(community_id) = &new.community_id {
            tables.require_community(community_id, "directories_community_id_fkey")?;
        }

        let entry = Directory {
            id: new_id(),
            title: new.title,
            description: new.description,
            description2: new.description2,
            description3: new.description3,
            phone_number: new.phone_number,
            email: new.email,
            kind: new.kind,
            back_drop_image: new.back_drop_image,
            expired_date: new.expired_date,
            is_public: new.is_public,
            community_id: new.community_id,
            created_at: Utc::now(),
        };
        tables.directories.push(entry.clone());
        Ok(entry)
    }

    async fn list_directories(&self) -> StoreResult<Vec<Directory>> {
        let tables = self.tables();
        Ok(newest_first(tables.directories.iter().cloned(), |d| d.created_at))
    }

    async fn find_directory(&self, id: &str) -> StoreResult<Option<Directory>> {
        Ok(self.tables().directories.iter().find(|d| d.id == id).cloned())
    }

    async fn update_directory(&self, id: &str, changes: DirectoryChanges) -> StoreResult<Directory> {
        let mut tables = self.tables();
        if !tables.directories.iter().any(|d| d.id == id) {
            return Err(StoreError::NotFound);
        }
        if let Some(community_id) = &changes.community_id {
            tables.require_community(community_id, "directories_community_id_fkey")?;
        }
        let entry = tables
            .directories
            .iter_mut()
            .find(|d| d.id == id)
            .ok_or(StoreError::NotFound)?;
        changes.apply(entry);
        Ok(entry.clone())
    }

    async fn delete_directory(&self, id: &str) -> StoreResult<()> {
        remove_by_id(&mut self.tables().directories, id, |d| d.id.as_str())
    }

    async fn create_notification(&self, new: NewNotification) -> StoreResult<Notification> {
        let mut tables = self.tables();
        tables.require_community(&new.community_id, "notifications_community_id_fkey")?;

        let notification = Notification {
            id: new_id(),
            title: new.title,
            description: new.description,
            community_id: new.community_id,
            expired_date: new.expired_date,
            active: new.active,
            is_public: new.is_public,
            created_at: Utc::now(),
        };
        tables.notifications.push(notification.clone());
        Ok(notification)
    }

    async fn list_notifications(&self, community_id: Option<&str>) -> StoreResult<Vec<Notification>> {
        let tables = self.tables();
        Ok(newest_first(
            tables
                .notifications
                .iter()
                .filter(|n| match community_id {
                    None => true,
                    Some(id) => n.is_public || n.community_id == id,
                })
                .cloned(),
            |n| n.created_at,
        ))
    }

    async fn list_notifications_for_community(
        &self,
        community_id: &str,
    ) -> StoreResult<Vec<Notification>> {
        let tables = self.tables();
        Ok(newest_first(
            tables
                .notifications
                .iter()
                .filter(|n| n.community_id == community_id)
                .cloned(),
            |n| n.created_at,
        ))
    }

    async fn find_notification(&self, id: &str) -> StoreResult<Option<Notification>> {
        Ok(self.tables().notifications.iter().find(|n| n.id == id).cloned())
    }

    async fn update_notification(
        &self,
        id: &str,
        changes: NotificationChanges,
    ) -> StoreResult<Notification> {
        let mut tables = self.tables();
        if !tables.notifications.iter().any(|n| n.id == id) {
            return Err(StoreError::NotFound);
        }
        if let Some(community_id) = &changes.community_id {
            tables.require_community(community_id, "notifications_community_id_fkey")?;
        }
        let notification = tables
            .notifications
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(StoreError::NotFound)?;
        changes.apply(notification);
        Ok(notification.clone())
    }

    async fn delete_notification(&self, id: &str) -> StoreResult<()> {
        remove_by_id(&mut self.tables().notifications, id, |n| n.id.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_user(email: &str, phone: &str) -> NewUser {
        NewUser {
            name: "Ada".into(),
            email: email.into(),
            phone_number: phone.into(),
            password_hash: "hash".into(),
            gender: None,
            age: Some(36),
        }
    }

    fn new_community() -> NewCommunity {
        NewCommunity {
            name: "Riverside".into(),
            emails: vec!["info@riverside.org".into()],
            phone_numbers: vec![],
            description: "Neighbourhood association".into(),
        }
    }

    #[tokio::test]
    async fn duplicate_phone_is_a_unique_violation() {
        let store = MemoryStore::new();
        store.create_user(new_user("a@x.io", "5550001")).await.unwrap();
        let err = store.create_user(new_user("b@x.io", "5550001")).await.unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation(_)));
    }

    #[tokio::test]
    async fn dangling_community_is_a_foreign_key_violation() {
        let store = MemoryStore::new();
        let err = store
            .create_notification(NewNotification::with_defaults(
                "t".into(),
                "d".into(),
                "missing".into(),
                None,
                None,
                None,
                Utc::now(),
            ))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ForeignKeyViolation(_)));
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn deleting_community_cascades() {
        let store = MemoryStore::new();
        let community = store.create_community(new_community()).await.unwrap();
        store
            .create_notification(NewNotification::with_defaults(
                "t".into(),
                "d".into(),
                community.id.clone(),
                None,
                None,
                None,
                Utc::now(),
            ))
            .await
            .unwrap();

        store.delete_community(&community.id).await.unwrap();
        assert!(store.list_notifications(None).await.unwrap().is_empty());
        assert!(matches!(
            store.delete_community(&community.id).await,
            Err(StoreError::NotFound)
        ));
    }

    #[tokio::test]
    async fn lists_are_newest_first() {
        let store = MemoryStore::new();
        let first = store.create_community(new_community()).await.unwrap();
        let second = store.create_community(new_community()).await.unwrap();
        let ids: Vec<String> = store
            .list_communities()
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id]);
    }

    #[tokio::test]
    async fn partial_update_keeps_untouched_fields() {
        let store = MemoryStore::new();
        let community = store.create_community(new_community()).await.unwrap();
        let updated = store
            .update_community(
                &community.id,
                CommunityChanges {
                    name: Some("Riverside East".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Riverside East");
        assert_eq!(updated.description, community.description);
        assert_eq!(updated.emails, community.emails);
    }
}
