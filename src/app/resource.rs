macro_rules! resource_response {
    (struct $name:ident; $($field:ident: $field_ty:ty),+ ,) => {
		#[derive(core::fmt::Debug, core::clone::Clone, serde::Serialize)]
        pub struct $name {
            pub id: Uuid,
            pub created: DateTime<Utc>,
            pub updated: Option<DateTime<Utc>>,
            pub version: u32,
            $(pub $field: $field_ty),+
        }
    };
}

pub mod iam {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};
    use url::Url;
    use uuid::Uuid;

    use crate::base::resource_id;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct CreateUser<'a> {
        pub username: &'a str,
        pub email: &'a str,
        pub password: &'a str,
        pub full_name: &'a str,
        pub phone_number: Option<&'a str>,
        pub role: &'a str,
    }

    resource_id!(CreateUser<'_>, "iam::CreateUser");

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct UpdateUser {
        pub full_name: Option<String>,
        pub phone_number: Option<String>,
        pub image_url: Option<Url>,
    }

    resource_id!(UpdateUser, "iam::UpdateUser");

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct UpdateUserStatus<'a> {
        pub status: &'a str,
    }

    resource_id!(UpdateUserStatus<'_>, "iam::UpdateUserStatus");

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct UserCredential<'a> {
        pub email: &'a str,
        pub password: &'a str,
    }

    resource_id!(UserCredential<'_>, "iam::UserCredential");

    resource_response! {
        struct UserResponse;
        username: String,
        email: String,
        full_name: String,
        phone_number: Option<String>,
        image_url: Option<Url>,
        role: &'static str,
        status: &'static str,
    }

    resource_id!(UserResponse, "iam::User");

    #[derive(Debug, Clone, Serialize)]
    pub struct AuthenticateUserResponse {
        pub user: UserResponse,
        pub token: String,
    }

    resource_id!(AuthenticateUserResponse, "iam::AuthenticateUser");
}

pub mod fleet {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    use crate::base::resource_id;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct CreateVehicleType<'a> {
        pub name: &'a str,
        pub load_capacity_kg: i32,
    }

    resource_id!(CreateVehicleType<'_>, "fleet::CreateVehicleType");

    resource_response! {
        struct VehicleTypeResponse;
        name: String,
        load_capacity_kg: i32,
    }

    resource_id!(VehicleTypeResponse, "fleet::VehicleType");

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct RegisterVehicle<'a> {
        pub license_plate: &'a str,
        pub model: Option<&'a str>,
        pub manufacturer: Option<&'a str>,
        pub year: Option<i32>,
        pub vehicle_type_id: Uuid,
    }

    resource_id!(RegisterVehicle<'_>, "fleet::RegisterVehicle");

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct UpdateVehicleStatus<'a> {
        pub status: &'a str,
    }

    resource_id!(UpdateVehicleStatus<'_>, "fleet::UpdateVehicleStatus");

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct RecordMaintenance {
        pub performed: NaiveDate,
        pub next: Option<NaiveDate>,
    }

    resource_id!(RecordMaintenance, "fleet::RecordMaintenance");

    resource_response! {
        struct VehicleResponse;
        license_plate: String,
        model: Option<String>,
        manufacturer: Option<String>,
        year: Option<i32>,
        status: &'static str,
        vehicle_type_id: Uuid,
        inspection_expiry: Option<NaiveDate>,
        insurance_expiry: Option<NaiveDate>,
        last_maintenance: Option<NaiveDate>,
        next_maintenance: Option<NaiveDate>,
    }

    resource_id!(VehicleResponse, "fleet::Vehicle");
}

pub mod order {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    use crate::base::resource_id;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct PlaceOrder<'a> {
        pub receiver_name: &'a str,
        pub receiver_phone: Option<&'a str>,
        pub package_description: Option<&'a str>,
        pub total_quantity: i32,
        pub pickup_address: &'a str,
        pub delivery_address: &'a str,
        pub vehicle_type_id: Uuid,
        pub distance_km: f64,
        pub vehicle_count: u32,
        pub category: Option<&'a str>,
    }

    resource_id!(PlaceOrder<'_>, "order::PlaceOrder");

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct ChangeOrderStatus<'a> {
        pub status: &'a str,
    }

    resource_id!(ChangeOrderStatus<'_>, "order::ChangeOrderStatus");

    resource_response! {
        struct OrderResponse;
        code: String,
        receiver_name: String,
        receiver_phone: Option<String>,
        package_description: Option<String>,
        total_quantity: i32,
        pickup_address: String,
        delivery_address: String,
        sender_id: Uuid,
        status: &'static str,
        quoted_price: i64,
    }

    resource_id!(OrderResponse, "order::Order");
}

pub mod pricing {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Serialize};
    use uuid::Uuid;

    use crate::base::resource_id;

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct CreatePricingRule {
        pub vehicle_type_id: Uuid,
        pub from_km: f64,
        pub to_km: Option<f64>,
        pub unit_price: i64,
    }

    resource_id!(CreatePricingRule, "pricing::CreatePricingRule");

    resource_response! {
        struct PricingRuleResponse;
        vehicle_type_id: Uuid,
        from_km: f64,
        to_km: Option<f64>,
        unit_price: i64,
    }

    resource_id!(PricingRuleResponse, "pricing::PricingRule");

    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct QuoteRequest<'a> {
        pub vehicle_type_id: Uuid,
        pub distance_km: f64,
        pub vehicle_count: u32,
        pub category: Option<&'a str>,
    }

    resource_id!(QuoteRequest<'_>, "pricing::QuoteRequest");

    #[derive(Debug, Clone, Serialize)]
    pub struct TierBreakdown {
        pub range: String,
        pub unit_price: i64,
        pub distance_km: f64,
        pub amount: i64,
    }

    #[derive(Debug, Clone, Serialize)]
    pub struct QuoteResponse {
        pub total_price: i64,
        pub base_price_per_vehicle: i64,
        pub adjusted_price_per_vehicle: i64,
        pub tiers: Vec<TierBreakdown>,
    }

    resource_id!(QuoteResponse, "pricing::Quote");
}
