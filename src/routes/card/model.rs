use crate::validation::{Check, FieldRule};

/// multipart 文本字段的规则，在确认三张照片都已上传之后执行
pub(super) const CREATE_RULES: &[FieldRule] = &[
    FieldRule::new("cardNumber", Check::NotEmpty, "Card number is required"),
    FieldRule::new("fullName", Check::NotEmpty, "Full name is required"),
    FieldRule::new("communityId", Check::NotEmpty, "Community ID is required"),
    FieldRule::new("dateOfBirth", Check::NotEmpty, "Date of birth is required"),
    FieldRule::new("nationality", Check::NotEmpty, "Nationality is required"),
    FieldRule::new("gender", Check::NotEmpty, "Gender is required"),
    FieldRule::new("active", Check::Boolean, "Active must be a boolean").optional(),
];

pub(super) const UPDATE_RULES: &[FieldRule] = &[
    FieldRule::new("cardNumber", Check::NotEmpty, "Card number cannot be empty").optional(),
    FieldRule::new("fullName", Check::NotEmpty, "Full name cannot be empty").optional(),
    FieldRule::new("communityId", Check::NotEmpty, "Community ID cannot be empty").optional(),
    FieldRule::new("dateOfBirth", Check::IsoDate, "Date of birth must be a valid date").optional(),
    FieldRule::new("dateOfIssue", Check::IsoDate, "Date of issue must be a valid date").optional(),
    FieldRule::new("dateOfExpiry", Check::IsoDate, "Date of expiry must be a valid date").optional(),
    FieldRule::new("active", Check::Boolean, "Active must be a boolean").optional(),
];
