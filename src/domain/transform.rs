use sqlx::postgres::PgRow;
use sqlx::Row;

use super::entity::{
    fleet::{Vehicle, VehicleState, VehicleType, VehicleTypeState},
    iam::{User, UserState},
    order::{Order, OrderState},
    pricing::{CategoryAdjustment, CategoryAdjustmentState, PricingRule, PricingRuleState},
    EntityData,
};

impl From<&PgRow> for EntityData {
    fn from(row: &PgRow) -> Self {
        Self {
            id: row.get("id"),
            created: row.get("created"),
            updated: row.get("updated"),
            version: row.get::<i32, _>("version") as u32,
        }
    }
}

impl From<&PgRow> for UserState {
    fn from(row: &PgRow) -> Self {
        Self {
            username: row.get("username"),
            email: row.get("email"),
            password_hash: row
                .get::<String, _>("password_hash")
                .parse()
                .expect("iam.account to hold a valid PHC password hash"),
            full_name: row.get("full_name"),
            phone_number: row.get("phone_number"),
            image_url: row.get::<Option<String>, _>("image_url").map(|s| {
                s.parse()
                    .expect("iam.account to hold a valid image url")
            }),
            role: row
                .get::<String, _>("role")
                .parse()
                .expect("iam.account to hold a known role"),
            status: row
                .get::<String, _>("status")
                .parse()
                .expect("iam.account to hold a known user status"),
        }
    }
}

impl From<&PgRow> for User {
    fn from(row: &PgRow) -> Self {
        Self::restore(row.into(), row.into())
    }
}

impl From<&PgRow> for VehicleTypeState {
    fn from(row: &PgRow) -> Self {
        Self {
            name: row.get("name"),
            load_capacity_kg: row.get("load_capacity_kg"),
        }
    }
}

impl From<&PgRow> for VehicleType {
    fn from(row: &PgRow) -> Self {
        Self::restore(row.into(), row.into())
    }
}

impl From<&PgRow> for VehicleState {
    fn from(row: &PgRow) -> Self {
        Self {
            license_plate: row.get("license_plate"),
            model: row.get("model"),
            manufacturer: row.get("manufacturer"),
            year: row.get("year"),
            status: row
                .get::<String, _>("status")
                .parse()
                .expect("fleet.vehicle to hold a known vehicle status"),
            vehicle_type_id: row.get("vehicle_type_id"),
            inspection_expiry: row.get("inspection_expiry"),
            insurance_expiry: row.get("insurance_expiry"),
            last_maintenance: row.get("last_maintenance"),
            next_maintenance: row.get("next_maintenance"),
        }
    }
}

impl From<&PgRow> for Vehicle {
    fn from(row: &PgRow) -> Self {
        Self::restore(row.into(), row.into())
    }
}

impl From<&PgRow> for OrderState {
    fn from(row: &PgRow) -> Self {
        Self {
            code: row.get("code"),
            receiver_name: row.get("receiver_name"),
            receiver_phone: row.get("receiver_phone"),
            package_description: row.get("package_description"),
            total_quantity: row.get("total_quantity"),
            pickup_address: row.get("pickup_address"),
            delivery_address: row.get("delivery_address"),
            sender_id: row.get("sender_id"),
            status: row
                .get::<String, _>("status")
                .parse()
                .expect("orders.delivery_order to hold a known order status"),
            quoted_price: row.get("quoted_price"),
        }
    }
}

impl From<&PgRow> for Order {
    fn from(row: &PgRow) -> Self {
        Self::restore(row.into(), row.into())
    }
}

impl From<&PgRow> for PricingRuleState {
    fn from(row: &PgRow) -> Self {
        Self {
            vehicle_type_id: row.get("vehicle_type_id"),
            from_km: row.get("from_km"),
            to_km: row.get("to_km"),
            unit_price: row.get("unit_price"),
        }
    }
}

impl From<&PgRow> for PricingRule {
    fn from(row: &PgRow) -> Self {
        Self::restore(row.into(), row.into())
    }
}

impl From<&PgRow> for CategoryAdjustmentState {
    fn from(row: &PgRow) -> Self {
        Self {
            category: row.get("category"),
            multiplier: row.get("multiplier"),
            extra_fee: row.get("extra_fee"),
        }
    }
}

impl From<&PgRow> for CategoryAdjustment {
    fn from(row: &PgRow) -> Self {
        Self::restore(row.into(), row.into())
    }
}
