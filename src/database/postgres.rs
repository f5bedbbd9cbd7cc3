use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{Store, StoreError, StoreResult};
use crate::models::{
    Advertisement, AdvertisementChanges, Card, CardChanges, CardWithCommunity, Community,
    CommunityChanges, Directory, DirectoryChanges, NewAdvertisement, NewCard, NewCommunity,
    NewDirectory, NewNotification, NewUser, Notification, NotificationChanges, User, UserChanges,
};

/// 基于 sqlx 连接池的存储实现，部分更新通过 COALESCE 合并
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn delete_by_id(&self, table: &str, id: &str) -> StoreResult<()> {
        let sql = format!("DELETE FROM {table} WHERE id = $1");
        let result = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

#[async_trait]
impl Store for PgStore {
    async fn create_user(&self, new: NewUser) -> StoreResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, name, email, phone_number, password_hash, gender, age)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(new_id())
        .bind(new.name)
        .bind(new.email)
        .bind(new.phone_number)
        .bind(new.password_hash)
        .bind(new.gender)
        .bind(new.age)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user(&self, id: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_phone(&self, phone_number: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE phone_number = $1")
            .bind(phone_number)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> StoreResult<Option<User>> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;
        Ok(user)
    }

    async fn update_user(&self, id: &str, changes: UserChanges) -> StoreResult<User> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone_number = COALESCE($4, phone_number),
                password_hash = COALESCE($5, password_hash),
                gender = COALESCE($6, gender),
                age = COALESCE($7, age)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.email)
        .bind(changes.phone_number)
        .bind(changes.password_hash)
        .bind(changes.gender)
        .bind(changes.age)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn delete_user(&self, id: &str) -> StoreResult<()> {
        self.delete_by_id("users", id).await
    }

    async fn create_community(&self, new: NewCommunity) -> StoreResult<Community> {
        let community = sqlx::query_as::<_, Community>(
            r#"
            INSERT INTO communities (id, name, emails, phone_numbers, description)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(new_id())
        .bind(new.name)
        .bind(new.emails)
        .bind(new.phone_numbers)
        .bind(new.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(community)
    }

    async fn list_communities(&self) -> StoreResult<Vec<Community>> {
        let communities =
            sqlx::query_as::<_, Community>("SELECT * FROM communities ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(communities)
    }

    async fn find_community(&self, id: &str) -> StoreResult<Option<Community>> {
        let community = sqlx::query_as::<_, Community>("SELECT * FROM communities WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(community)
    }

    async fn update_community(&self, id: &str, changes: CommunityChanges) -> StoreResult<Community> {
        let community = sqlx::query_as::<_, Community>(
            r#"
            UPDATE communities SET
                name = COALESCE($2, name),
                emails = COALESCE($3, emails),
                phone_numbers = COALESCE($4, phone_numbers),
                description = COALESCE($5, description)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.name)
        .bind(changes.emails)
        .bind(changes.phone_numbers)
        .bind(changes.description)
        .fetch_one(&self.pool)
        .await?;

        Ok(community)
    }

    async fn delete_community(&self, id: &str) -> StoreResult<()> {
        self.delete_by_id("communities", id).await
    }

    async fn create_card(&self, new: NewCard) -> StoreResult<Card> {
        let card = sqlx::query_as::<_, Card>(
            r#"
            INSERT INTO cards (
                id, card_number, full_name, date_of_birth, nationality, gender,
                date_of_issue, date_of_expiry, un_card_number, student_number,
                passport_photo, front_photo, back_photo, status, active,
                community_id, user_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            RETURNING *
            "#,
        )
        .bind(new.id)
        .bind(new.card_number)
        .bind(new.full_name)
        .bind(new.date_of_birth)
        .bind(new.nationality)
        .bind(new.gender)
        .bind(new.date_of_issue)
        .bind(new.date_of_expiry)
        .bind(new.un_card_number)
        .bind(new.student_number)
        .bind(new.passport_photo)
        .bind(new.front_photo)
        .bind(new.back_photo)
        .bind(new.status)
        .bind(new.active)
        .bind(new.community_id)
        .bind(new.user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(card)
    }

    async fn list_cards_for_user(&self, user_id: &str) -> StoreResult<Vec<CardWithCommunity>> {
        let cards = sqlx::query_as::<_, Card>(
            "SELECT * FROM cards WHERE user_id = $1 ORDER BY created_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        let mut community_ids: Vec<String> = cards.iter().map(|c| c.community_id.clone()).collect();
        community_ids.sort();
        community_ids.dedup();

        let communities: HashMap<String, Community> =
            sqlx::query_as::<_, Community>("SELECT * FROM communities WHERE id = ANY($1)")
                .bind(&community_ids)
                .fetch_all(&self.pool)
                .await?
                .into_iter()
                .map(|community| (community.id.clone(), community))
                .collect();

        Ok(cards
            .into_iter()
            .map(|card| {
                let community = communities.get(&card.community_id).cloned();
                CardWithCommunity { card, community }
            })
            .collect())
    }

    async fn list_cards_for_community(&self, community_id: &str) -> StoreResult<Vec<Card>> {
        let cards = sqlx::query_as::<_, Card>(
            "SELECT * FROM cards WHERE community_id = $1 ORDER BY created_at DESC",
        )
        .bind(community_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(cards)
    }

    async fn find_card(&self, id: &str) -> StoreResult<Option<Card>> {
        let card = sqlx::query_as::<_, Card>("SELECT * FROM cards WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(card)
    }

    async fn update_card(&self, id: &str, changes: CardChanges) -> StoreResult<Card> {
        let card = sqlx::query_as::<_, Card>(
            r#"
            UPDATE cards SET
                card_number = COALESCE($2, card_number),
                full_name = COALESCE($3, full_name),
                date_of_birth = COALESCE($4, date_of_birth),
                nationality = COALESCE($5, nationality),
                gender = COALESCE($6, gender),
                date_of_issue = COALESCE($7, date_of_issue),
                date_of_expiry = COALESCE($8, date_of_expiry),
                un_card_number = COALESCE($9, un_card_number),
                student_number = COALESCE($10, student_number),
                status = COALESCE($11, status),
                active = COALESCE($12, active),
                community_id = COALESCE($13, community_id)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.card_number)
        .bind(changes.full_name)
        .bind(changes.date_of_birth)
        .bind(changes.nationality)
        .bind(changes.gender)
        .bind(changes.date_of_issue)
        .bind(changes.date_of_expiry)
        .bind(changes.un_card_number)
        .bind(changes.student_number)
        .bind(changes.status)
        .bind(changes.active)
        .bind(changes.community_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(card)
    }

    async fn delete_card(&self, id: &str) -> StoreResult<()> {
        self.delete_by_id("cards", id).await
    }

    async fn create_advertisement(&self, new: NewAdvertisement) -> StoreResult<Advertisement> {
        let ad = sqlx::query_as::<_, Advertisement>(
            r#"
            INSERT INTO advertisements (
                id, title, description, description2, description3, "type",
                back_drop_image, expired_date, is_public, community_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(new_id())
        .bind(new.title)
        .bind(new.description)
        .bind(new.description2)
        .bind(new.description3)
        .bind(new.kind)
        .bind(new.back_drop_image)
        .bind(new.expired_date)
        .bind(new.is_public)
        .bind(new.community_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(ad)
    }

    async fn list_advertisements(&self) -> StoreResult<Vec<Advertisement>> {
        let ads = sqlx::query_as::<_, Advertisement>(
            "SELECT * FROM advertisements ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(ads)
    }

    async fn find_advertisement(&self, id: &str) -> StoreResult<Option<Advertisement>> {
        let ad = sqlx::query_as::<_, Advertisement>("SELECT * FROM advertisements WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(ad)
    }

    async fn update_advertisement(
        &self,
        id: &str,
        changes: AdvertisementChanges,
    ) -> StoreResult<Advertisement> {
        let ad = sqlx::query_as::<_, Advertisement>(
            r#"
            UPDATE advertisements SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                description2 = COALESCE($4, description2),
                description3 = COALESCE($5, description3),
                "type" = COALESCE($6, "type"),
                back_drop_image = COALESCE($7, back_drop_image),
                expired_date = COALESCE($8, expired_date),
                is_public = COALESCE($9, is_public),
                community_id = COALESCE($10, community_id)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.description2)
        .bind(changes.description3)
        .bind(changes.kind)
        .bind(changes.back_drop_image)
        .bind(changes.expired_date)
        .bind(changes.is_public)
        .bind(changes.community_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(ad)
    }

    async fn delete_advertisement(&self, id: &str) -> StoreResult<()> {
        self.delete_by_id("advertisements", id).await
    }

    async fn create_directory(&self, new: NewDirectory) -> StoreResult<Directory> {
        let entry = sqlx::query_as::<_, Directory>(
            r#"
            INSERT INTO directories (
                id, title, description, description2, description3, phone_number, email,
                "type", back_drop_image, expired_date, is_public, community_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(new_id())
        .bind(new.title)
        .bind(new.description)
        .bind(new.description2)
        .bind(new.description3)
        .bind(new.phone_number)
        .bind(new.email)
        .bind(new.kind)
        .bind(new.back_drop_image)
        .bind(new.expired_date)
        .bind(new.is_public)
        .bind(new.community_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    async fn list_directories(&self) -> StoreResult<Vec<Directory>> {
        let entries =
            sqlx::query_as::<_, Directory>("SELECT * FROM directories ORDER BY created_at DESC")
                .fetch_all(&self.pool)
                .await?;
        Ok(entries)
    }

    async fn find_directory(&self, id: &str) -> StoreResult<Option<Directory>> {
        let entry = sqlx::query_as::<_, Directory>("SELECT * FROM directories WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(entry)
    }

    async fn update_directory(&self, id: &str, changes: DirectoryChanges) -> StoreResult<Directory> {
        let entry = sqlx::query_as::<_, Directory>(
            r#"
            UPDATE directories SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                description2 = COALESCE($4, description2),
                description3 = COALESCE($5, description3),
                phone_number = COALESCE($6, phone_number),
                email = COALESCE($7, email),
                "type" = COALESCE($8, "type"),
                back_drop_image = COALESCE($9, back_drop_image),
                expired_date = COALESCE($10, expired_date),
                is_public = COALESCE($11, is_public),
                community_id = COALESCE($12, community_id)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.description2)
        .bind(changes.description3)
        .bind(changes.phone_number)
        .bind(changes.email)
        .bind(changes.kind)
        .bind(changes.back_drop_image)
        .bind(changes.expired_date)
        .bind(changes.is_public)
        .bind(changes.community_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(entry)
    }

    async fn delete_directory(&self, id: &str) -> StoreResult<()> {
        self.delete_by_id("directories", id).await
    }

    async fn create_notification(&self, new: NewNotification) -> StoreResult<Notification> {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            INSERT INTO notifications (
                id, title, description, community_id, expired_date, active, is_public
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(new_id())
        .bind(new.title)
        .bind(new.description)
        .bind(new.community_id)
        .bind(new.expired_date)
        .bind(new.active)
        .bind(new.is_public)
        .fetch_one(&self.pool)
        .await?;

        Ok(notification)
    }

    async fn list_notifications(&self, community_id: Option<&str>) -> StoreResult<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(
            r#"
            SELECT * FROM notifications
            WHERE $1::TEXT IS NULL OR is_public OR community_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(community_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(notifications)
    }

    async fn list_notifications_for_community(
        &self,
        community_id: &str,
    ) -> StoreResult<Vec<Notification>> {
        let notifications = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE community_id = $1 ORDER BY created_at DESC",
        )
        .bind(community_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(notifications)
    }

    async fn find_notification(&self, id: &str) -> StoreResult<Option<Notification>> {
        let notification =
            sqlx::query_as::<_, Notification>("SELECT * FROM notifications WHERE id = $1")
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        Ok(notification)
    }

    async fn update_notification(
        &self,
        id: &str,
        changes: NotificationChanges,
    ) -> StoreResult<Notification> {
        let notification = sqlx::query_as::<_, Notification>(
            r#"
            UPDATE notifications SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                community_id = COALESCE($4, community_id),
                expired_date = COALESCE($5, expired_date),
                active = COALESCE($6, active),
                is_public = COALESCE($7, is_public)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.title)
        .bind(changes.description)
        .bind(changes.community_id)
        .bind(changes.expired_date)
        .bind(changes.active)
        .bind(changes.is_public)
        .fetch_one(&self.pool)
        .await?;

        Ok(notification)
    }

    async fn delete_notification(&self, id: &str) -> StoreResult<()> {
        self.delete_by_id("notifications", id).await
    }
}
