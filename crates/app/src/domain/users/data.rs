//! User Data

use crate::domain::users::records::{UserRole, UserUuid};

/// New User Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub uuid: UserUuid,
    pub email: String,
    pub role: UserRole,
    pub full_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
}
