use crate::validation::{Check, FieldRule};

pub(super) const CREATE_RULES: &[FieldRule] = &[
    FieldRule::new("name", Check::NotEmpty, "Community name is required"),
    FieldRule::new("emails", Check::EmailList, "At least one email is required"),
    FieldRule::new(
        "phoneNumbers",
        Check::StringArray,
        "Phone numbers should be an array of strings",
    )
    .optional(),
    FieldRule::new("description", Check::NotEmpty, "Description is required"),
];

pub(super) const UPDATE_RULES: &[FieldRule] = &[
    FieldRule::new("name", Check::NotEmpty, "Community name cannot be empty").optional(),
    FieldRule::new("emails", Check::EmailList, "Emails should be a non-empty array").optional(),
    FieldRule::new(
        "phoneNumbers",
        Check::StringArray,
        "Phone numbers should be an array of strings",
    )
    .optional(),
    FieldRule::new("description", Check::NotEmpty, "Description cannot be empty").optional(),
];
