use std::str::FromStr;

use derive_more::Display;

use crate::base::ResourceID;
use crate::domain::datatype::security::PasswordHash;
use crate::error::resource::{ValidationErrorKind, ValidationFieldError};

use super::{impl_entity, state_copy, state_ref, EntityData};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    #[display(fmt = "ADMIN")]
    Admin,
    #[display(fmt = "STAFF")]
    Staff,
    #[display(fmt = "CUSTOMER")]
    Customer,
    #[display(fmt = "DRIVER")]
    Driver,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Staff => "STAFF",
            Role::Customer => "CUSTOMER",
            Role::Driver => "DRIVER",
        }
    }
}

impl ResourceID for Role {
    fn resource_id() -> &'static str {
        "iam::role"
    }
}

impl FromStr for Role {
    type Err = ValidationFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "STAFF" => Ok(Self::Staff),
            "CUSTOMER" => Ok(Self::Customer),
            "DRIVER" => Ok(Self::Driver),
            _ => Err(ValidationFieldError::from_resource::<Self>(
                s.into(),
                String::new(),
                vec![ValidationErrorKind::UnknownVariant],
            )),
        }
    }
}

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum UserStatus {
    #[display(fmt = "ACTIVE")]
    Active,
    #[display(fmt = "INACTIVE")]
    Inactive,
    #[display(fmt = "SUSPENDED")]
    Suspended,
}

impl UserStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserStatus::Active => "ACTIVE",
            UserStatus::Inactive => "INACTIVE",
            UserStatus::Suspended => "SUSPENDED",
        }
    }
}

impl ResourceID for UserStatus {
    fn resource_id() -> &'static str {
        "iam::user_status"
    }
}

impl FromStr for UserStatus {
    type Err = ValidationFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ACTIVE" => Ok(Self::Active),
            "INACTIVE" => Ok(Self::Inactive),
            "SUSPENDED" => Ok(Self::Suspended),
            _ => Err(ValidationFieldError::from_resource::<Self>(
                s.into(),
                String::new(),
                vec![ValidationErrorKind::UnknownVariant],
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserState {
    pub(in crate::domain) username: String,
    pub(in crate::domain) email: String,
    pub(in crate::domain) password_hash: PasswordHash,
    pub(in crate::domain) full_name: String,
    pub(in crate::domain) phone_number: Option<String>,
    pub(in crate::domain) image_url: Option<url::Url>,
    pub(in crate::domain) role: Role,
    pub(in crate::domain) status: UserStatus,
}

#[derive(Debug, Clone)]
pub struct User {
    pub(in crate::domain) data: EntityData,
    pub(in crate::domain) state: UserState,
}

impl_entity!(User, UserState);

impl User {
    state_ref!(username, String);
    state_ref!(email, String);
    state_ref!(password_hash, PasswordHash);
    state_ref!(full_name, String);
    state_ref!(phone_number, Option<String>);
    state_ref!(image_url, Option<url::Url>);
    state_copy!(role, Role);
    state_copy!(status, UserStatus);

    pub fn new(
        username: String,
        email: String,
        password_hash: PasswordHash,
        full_name: String,
        phone_number: Option<String>,
        role: Role,
    ) -> Self {
        Self {
            data: EntityData::new(),
            state: UserState {
                username,
                email,
                password_hash,
                full_name,
                phone_number,
                image_url: None,
                role,
                status: UserStatus::Active,
            },
        }
    }

    pub fn update_profile(
        &mut self,
        full_name: Option<String>,
        phone_number: Option<String>,
        image_url: Option<url::Url>,
    ) {
        if let Some(full_name) = full_name {
            self.state.full_name = full_name;
        }
        if let Some(phone_number) = phone_number {
            self.state.phone_number = Some(phone_number);
        }
        if let Some(image_url) = image_url {
            self.state.image_url = Some(image_url);
        }
        self.data.touch();
    }

    pub fn set_status(&mut self, status: UserStatus) {
        self.state.status = status;
        self.data.touch();
    }
}
