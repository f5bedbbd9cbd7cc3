use serde::Serialize;

use crate::models::User;
use crate::validation::{Check, FieldRule};

pub(super) const REGISTER_RULES: &[FieldRule] = &[
    FieldRule::new("name", Check::NotEmpty, "Invalid value"),
    FieldRule::new("email", Check::Email, "Invalid value"),
    FieldRule::new("phoneNumber", Check::NotEmpty, "Invalid value"),
    FieldRule::new("password", Check::MinLength(6), "Invalid value"),
];

pub(super) const LOGIN_RULES: &[FieldRule] = &[
    FieldRule::new("password", Check::MinLength(6), "Password is too short"),
    FieldRule::new("phoneNumber", Check::NotEmpty, "Phone number is required"),
];

/// 注册、登录以及创建用户的返回：去掉密码的用户信息加上 token
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    #[serde(flatten)]
    pub user: User,
    pub token: String,
}
