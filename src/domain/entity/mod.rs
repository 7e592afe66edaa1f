pub mod fleet;
pub mod iam;
pub mod order;
pub mod pricing;

use chrono::{DateTime, Utc};
use uuid::Uuid;

pub trait Entity {
    fn ident(&self) -> Uuid;
    fn version(&self) -> u32;
    fn created(&self) -> DateTime<Utc>;
    fn updated(&self) -> Option<DateTime<Utc>>;
}

/// Identity and audit data shared by every persisted entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityData {
    pub(in crate::domain) id: Uuid,
    pub(in crate::domain) created: DateTime<Utc>,
    pub(in crate::domain) updated: Option<DateTime<Utc>>,
    pub(in crate::domain) version: u32,
}

impl EntityData {
    pub(in crate::domain) fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            created: Utc::now(),
            updated: None,
            version: 1,
        }
    }

    /// Marks the entity as modified, bumping its version.
    pub(in crate::domain) fn touch(&mut self) {
        self.updated = Some(Utc::now());
        self.version += 1;
    }
}

macro_rules! impl_entity {
    ($entity:ty, $state:ty) => {
        impl crate::domain::entity::Entity for $entity {
            fn ident(&self) -> uuid::Uuid {
                self.data.id
            }

            fn version(&self) -> u32 {
                self.data.version
            }

            fn created(&self) -> chrono::DateTime<chrono::Utc> {
                self.data.created
            }

            fn updated(&self) -> Option<chrono::DateTime<chrono::Utc>> {
                self.data.updated
            }
        }

        impl $entity {
            pub fn restore(data: crate::domain::entity::EntityData, state: $state) -> Self {
                Self { data, state }
            }
        }
    };
}

macro_rules! state_ref {
    ($prop:ident, $rtrn:ty) => {
        pub fn $prop(&self) -> &$rtrn {
            &self.state.$prop
        }
    };
}

macro_rules! state_copy {
    ($prop:ident, $rtrn:ty) => {
        pub fn $prop(&self) -> $rtrn {
            self.state.$prop
        }
    };
}

pub(self) use impl_entity;
pub(self) use state_copy;
pub(self) use state_ref;
