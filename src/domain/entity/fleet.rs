use std::str::FromStr;

use chrono::NaiveDate;
use derive_more::Display;
use uuid::Uuid;

use crate::base::ResourceID;
use crate::error::resource::{ValidationErrorKind, ValidationFieldError};

use super::{impl_entity, state_copy, state_ref, EntityData};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum VehicleStatus {
    #[display(fmt = "AVAILABLE")]
    Available,
    #[display(fmt = "IN_SERVICE")]
    InService,
    #[display(fmt = "UNDER_MAINTENANCE")]
    UnderMaintenance,
    #[display(fmt = "RETIRED")]
    Retired,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Available => "AVAILABLE",
            VehicleStatus::InService => "IN_SERVICE",
            VehicleStatus::UnderMaintenance => "UNDER_MAINTENANCE",
            VehicleStatus::Retired => "RETIRED",
        }
    }
}

impl ResourceID for VehicleStatus {
    fn resource_id() -> &'static str {
        "fleet::vehicle_status"
    }
}

impl FromStr for VehicleStatus {
    type Err = ValidationFieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AVAILABLE" => Ok(Self::Available),
            "IN_SERVICE" => Ok(Self::InService),
            "UNDER_MAINTENANCE" => Ok(Self::UnderMaintenance),
            "RETIRED" => Ok(Self::Retired),
            _ => Err(ValidationFieldError::from_resource::<Self>(
                s.into(),
                String::new(),
                vec![ValidationErrorKind::UnknownVariant],
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleTypeState {
    pub(in crate::domain) name: String,
    pub(in crate::domain) load_capacity_kg: i32,
}

#[derive(Debug, Clone)]
pub struct VehicleType {
    pub(in crate::domain) data: EntityData,
    pub(in crate::domain) state: VehicleTypeState,
}

impl_entity!(VehicleType, VehicleTypeState);

impl VehicleType {
    state_ref!(name, String);
    state_copy!(load_capacity_kg, i32);

    pub fn new(name: String, load_capacity_kg: i32) -> Self {
        Self {
            data: EntityData::new(),
            state: VehicleTypeState {
                name,
                load_capacity_kg,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleState {
    pub(in crate::domain) license_plate: String,
    pub(in crate::domain) model: Option<String>,
    pub(in crate::domain) manufacturer: Option<String>,
    pub(in crate::domain) year: Option<i32>,
    pub(in crate::domain) status: VehicleStatus,
    pub(in crate::domain) vehicle_type_id: Uuid,
    pub(in crate::domain) inspection_expiry: Option<NaiveDate>,
    pub(in crate::domain) insurance_expiry: Option<NaiveDate>,
    pub(in crate::domain) last_maintenance: Option<NaiveDate>,
    pub(in crate::domain) next_maintenance: Option<NaiveDate>,
}

#[derive(Debug, Clone)]
pub struct Vehicle {
    pub(in crate::domain) data: EntityData,
    pub(in crate::domain) state: VehicleState,
}

impl_entity!(Vehicle, VehicleState);

impl Vehicle {
    state_ref!(license_plate, String);
    state_ref!(model, Option<String>);
    state_ref!(manufacturer, Option<String>);
    state_copy!(year, Option<i32>);
    state_copy!(status, VehicleStatus);
    state_copy!(vehicle_type_id, Uuid);
    state_copy!(inspection_expiry, Option<NaiveDate>);
    state_copy!(insurance_expiry, Option<NaiveDate>);
    state_copy!(last_maintenance, Option<NaiveDate>);
    state_copy!(next_maintenance, Option<NaiveDate>);

    pub fn new(
        license_plate: String,
        model: Option<String>,
        manufacturer: Option<String>,
        year: Option<i32>,
        vehicle_type_id: Uuid,
    ) -> Self {
        Self {
            data: EntityData::new(),
            state: VehicleState {
                license_plate,
                model,
                manufacturer,
                year,
                status: VehicleStatus::Available,
                vehicle_type_id,
                inspection_expiry: None,
                insurance_expiry: None,
                last_maintenance: None,
                next_maintenance: None,
            },
        }
    }

    pub fn set_status(&mut self, status: VehicleStatus) {
        self.state.status = status;
        self.data.touch();
    }

    /// Records a completed maintenance, moving the vehicle back to available.
    pub fn record_maintenance(&mut self, performed: NaiveDate, next: Option<NaiveDate>) {
        self.state.last_maintenance = Some(performed);
        self.state.next_maintenance = next;
        if self.state.status == VehicleStatus::UnderMaintenance {
            self.state.status = VehicleStatus::Available;
        }
        self.data.touch();
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::domain::entity::Entity;

    #[test]
    fn new_vehicle_is_available() {
        let vehicle = Vehicle::new(
            "51C-123.45".into(),
            Some("Hino 300".into()),
            Some("Hino".into()),
            Some(2021),
            Uuid::new_v4(),
        );
        assert_eq!(vehicle.status(), VehicleStatus::Available);
        assert_eq!(vehicle.version(), 1);
    }

    #[test]
    fn maintenance_record_returns_vehicle_to_available() {
        let mut vehicle = Vehicle::new("51C-678.90".into(), None, None, None, Uuid::new_v4());
        vehicle.set_status(VehicleStatus::UnderMaintenance);

        let performed = NaiveDate::from_ymd_opt(2026, 3, 14).unwrap();
        let next = NaiveDate::from_ymd_opt(2026, 9, 14).unwrap();
        vehicle.record_maintenance(performed, Some(next));

        assert_eq!(vehicle.status(), VehicleStatus::Available);
        assert_eq!(vehicle.last_maintenance(), Some(performed));
        assert_eq!(vehicle.next_maintenance(), Some(next));
        assert_eq!(vehicle.version(), 3);
    }

    #[test]
    fn vehicle_status_rejects_unknown_variant() {
        assert!(VehicleStatus::from_str("FLYING").is_err());
    }
}
