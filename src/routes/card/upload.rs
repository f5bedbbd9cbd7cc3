//! 卡片上传流程
//!
//! 顺序固定：读取表单并检查照片 → 校验文本字段 → 计算照片路径 → 写入记录 → 落盘照片 → 返回用户的卡片列表。
//! 任何一步校验失败都不会写数据库或磁盘；落盘失败时删除刚写入的记录和已写出的文件。

use axum::{
    body::Bytes,
    extract::{
        Extension, Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
};
use chrono::Utc;
use serde_json::{Map, Value};
use tracing::{error, info};
use uuid::Uuid;

use crate::{
    AppState,
    database::StoreError,
    error::{AppError, not_found},
    extract::JsonBody,
    models::{CardWithCommunity, NewCard},
    response::{ApiResponse, success_to_api_response},
    storage::{CardPhotoPaths, CardPhotos, PhotoSlot},
    utils::{Claims, error_codes},
};

use super::model::CREATE_RULES;

#[derive(Debug, Default)]
struct PendingPhotos {
    passport: Option<Bytes>,
    front: Option<Bytes>,
    back: Option<Bytes>,
}

impl PendingPhotos {
    fn slot_mut(&mut self, slot: PhotoSlot) -> &mut Option<Bytes> {
        match slot {
            PhotoSlot::Passport => &mut self.passport,
            PhotoSlot::Front => &mut self.front,
            PhotoSlot::Back => &mut self.back,
        }
    }

    /// 按 passport、front、back 的顺序报告第一个缺失的照片
    fn complete(self) -> Result<CardPhotos, AppError> {
        let missing = |slot: PhotoSlot| {
            AppError::rejected(
                error_codes::BAD_REQUEST,
                "Please upload the required file(s)",
                format!("{} is required", slot.field_name()),
            )
        };
        Ok(CardPhotos {
            passport: self.passport.ok_or_else(|| missing(PhotoSlot::Passport))?,
            front: self.front.ok_or_else(|| missing(PhotoSlot::Front))?,
            back: self.back.ok_or_else(|| missing(PhotoSlot::Back))?,
        })
    }
}

fn multipart_error(err: MultipartError) -> AppError {
    AppError::BadRequest(err.body_text())
}

/// 文本字段收集为对象，照片留在内存里
async fn read_form(mut multipart: Multipart) -> Result<(JsonBody, PendingPhotos), AppError> {
    let mut fields = Map::new();
    let mut photos = PendingPhotos::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if let Some(slot) = PhotoSlot::from_field_name(&name) {
            let bytes = field.bytes().await.map_err(multipart_error)?;
            let entry = photos.slot_mut(slot);
            if entry.is_some() {
                return Err(AppError::rejected(
                    error_codes::BAD_REQUEST,
                    "Only one file is allowed per photo",
                    format!("{} was uploaded more than once", name),
                ));
            }
            *entry = Some(bytes);
        } else if field.file_name().is_some() {
            // 未知的文件字段直接丢弃
            field.bytes().await.map_err(multipart_error)?;
        } else {
            let text = field.text().await.map_err(multipart_error)?;
            fields.insert(name, Value::String(text));
        }
    }

    Ok((JsonBody(fields), photos))
}

// 外键失效按约束区分：token 仍有效但用户已被删除时不应报告社区不存在
fn insert_error(err: StoreError) -> AppError {
    match &err {
        StoreError::ForeignKeyViolation(constraint) if constraint == "cards_user_id_fkey" => {
            AppError::NotFound("User not found".to_string())
        }
        _ => not_found("Community not found")(err),
    }
}

fn path_string(path: &std::path::Path) -> Option<String> {
    Some(path.to_string_lossy().into_owned())
}

fn new_card(id: String, fields: &JsonBody, paths: &CardPhotoPaths, user_id: String) -> NewCard {
    NewCard {
        id,
        card_number: fields.string("cardNumber").unwrap_or_default(),
        full_name: fields.string("fullName").unwrap_or_default(),
        date_of_birth: fields.date("dateOfBirth"),
        nationality: fields.string("nationality").unwrap_or_default(),
        gender: fields.string("gender").unwrap_or_default(),
        // 无法解析的签发日期按当前时间处理，无法解析的到期日期置空
        date_of_issue: fields.date("dateOfIssue").unwrap_or_else(Utc::now),
        date_of_expiry: fields.date("dateOfExpiry"),
        un_card_number: fields.string("unCardNumber"),
        student_number: fields.string("studentNumber"),
        passport_photo: path_string(&paths.passport),
        front_photo: path_string(&paths.front),
        back_photo: path_string(&paths.back),
        status: fields.string("status"),
        active: fields.flag("active").unwrap_or(true),
        community_id: fields.string("communityId").unwrap_or_default(),
        user_id,
    }
}

#[axum::debug_handler]
pub async fn create_card(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<ApiResponse<Vec<CardWithCommunity>>, AppError> {
    let multipart = multipart.map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;

    let (fields, photos) = read_form(multipart).await?;
    let photos = photos.complete()?;
    fields
        .validate(CREATE_RULES)
        .map_err(AppError::validation(error_codes::BAD_REQUEST, "Validation failed"))?;

    // 先生成卡片 id，文件名前缀同时包含毫秒时间戳与 id
    let card_id = Uuid::new_v4().to_string();
    let prefix = format!("{}-{}", Utc::now().timestamp_millis(), card_id);
    let paths = state.storage.card_photo_paths(&prefix);

    let card = state
        .store
        .create_card(new_card(card_id, &fields, &paths, claims.user_id.clone()))
        .await
        .map_err(insert_error)?;

    if let Err(e) = state.storage.write_card_photos(&paths, &photos).await {
        error!(card_id = %card.id, "Failed to write card photos: {}", e);
        state.storage.remove_card_photos(&paths).await;
        if let Err(delete_err) = state.store.delete_card(&card.id).await {
            error!(card_id = %card.id, "Failed to roll back card: {}", delete_err);
        }
        return Err(AppError::Internal(format!("failed to store card photos: {}", e)));
    }
    info!(card_id = %card.id, user_id = %claims.user_id, "Card created");

    let cards = state.store.list_cards_for_user(&claims.user_id).await?;
    Ok(success_to_api_response(
        cards,
        "Card created successfully",
        "CARD_CREATED",
    ))
}
