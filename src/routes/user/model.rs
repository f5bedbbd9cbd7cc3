use crate::validation::{Check, FieldRule};

pub(super) const CREATE_RULES: &[FieldRule] = &[
    FieldRule::new("name", Check::NotEmpty, "Name is required"),
    FieldRule::new("phoneNumber", Check::MobilePhone, "Invalid phone number"),
    FieldRule::new("email", Check::Email, "Invalid email"),
    FieldRule::new(
        "password",
        Check::MinLength(6),
        "Password must be at least 6 characters long",
    ),
];

pub(super) const UPDATE_RULES: &[FieldRule] = &[
    FieldRule::new("name", Check::NotEmpty, "Name cannot be empty").optional(),
    FieldRule::new("email", Check::Email, "Invalid email").optional(),
    FieldRule::new("phoneNumber", Check::MobilePhone, "Invalid phone number").optional(),
    FieldRule::new(
        "password",
        Check::MinLength(6),
        "Password must be at least 6 characters long",
    )
    .optional(),
];
