use crate::validation::{Check, FieldRule};

// 通讯录条目可以不属于任何社区，所以 communityId 不是必填
pub(super) const CREATE_RULES: &[FieldRule] = &[
    FieldRule::new("title", Check::NotEmpty, "Title is required"),
    FieldRule::new("description", Check::NotEmpty, "Description is required"),
    FieldRule::new("email", Check::Email, "Invalid email").optional(),
    FieldRule::new("phoneNumber", Check::MobilePhone, "Invalid phone number").optional(),
    FieldRule::new("expiredDate", Check::IsoDate, "Expired Date must be a valid date").optional(),
    FieldRule::new("isPublic", Check::Boolean, "isPublic must be a boolean").optional(),
];

pub(super) const UPDATE_RULES: &[FieldRule] = &[
    FieldRule::new("title", Check::NotEmpty, "Title cannot be empty").optional(),
    FieldRule::new("description", Check::NotEmpty, "Description cannot be empty").optional(),
    FieldRule::new("email", Check::Email, "Invalid email").optional(),
    FieldRule::new("phoneNumber", Check::MobilePhone, "Invalid phone number").optional(),
    FieldRule::new("expiredDate", Check::IsoDate, "Expired Date must be a valid date").optional(),
    FieldRule::new("isPublic", Check::Boolean, "isPublic must be a boolean").optional(),
];
