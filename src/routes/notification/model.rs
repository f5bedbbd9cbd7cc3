use serde::Deserialize;

use crate::validation::{Check, FieldRule};

pub(super) const CREATE_RULES: &[FieldRule] = &[
    FieldRule::new("title", Check::NotEmpty, "Title is required"),
    FieldRule::new("description", Check::NotEmpty, "Description is required"),
    FieldRule::new("communityId", Check::NotEmpty, "Community ID is required"),
    FieldRule::new("expiredDate", Check::IsoDate, "Expired Date must be a valid date").optional(),
    FieldRule::new("active", Check::Boolean, "Active must be a boolean").optional(),
    FieldRule::new("isPublic", Check::Boolean, "isPublic must be a boolean").optional(),
];

pub(super) const UPDATE_RULES: &[FieldRule] = &[
    FieldRule::new("title", Check::NotEmpty, "Title cannot be empty").optional(),
    FieldRule::new("description", Check::NotEmpty, "Description cannot be empty").optional(),
    FieldRule::new("communityId", Check::NotEmpty, "Community ID cannot be empty").optional(),
    FieldRule::new("isPublic", Check::Boolean, "isPublic must be a boolean").optional(),
    FieldRule::new("expiredDate", Check::IsoDate, "Expired Date must be a valid date").optional(),
    FieldRule::new("active", Check::Boolean, "Active must be a boolean").optional(),
];

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationQuery {
    pub community_id: Option<String>,
}
