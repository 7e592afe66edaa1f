pub mod resource;
pub mod use_case;

pub mod transform {
    pub mod user {
        use crate::{
            app::resource::iam::UserResponse,
            domain::entity::{iam::User, Entity},
        };

        impl From<User> for UserResponse {
            fn from(user: User) -> Self {
                Self {
                    id: user.ident(),
                    created: user.created(),
                    updated: user.updated(),
                    version: user.version(),
                    role: user.role().as_str(),
                    status: user.status().as_str(),
                    username: user.username().clone(),
                    email: user.email().clone(),
                    full_name: user.full_name().clone(),
                    phone_number: user.phone_number().clone(),
                    image_url: user.image_url().clone(),
                }
            }
        }
    }

    pub mod fleet {
        use crate::{
            app::resource::fleet::{VehicleResponse, VehicleTypeResponse},
            domain::entity::{
                fleet::{Vehicle, VehicleType},
                Entity,
            },
        };

        impl From<VehicleType> for VehicleTypeResponse {
            fn from(vehicle_type: VehicleType) -> Self {
                Self {
                    id: vehicle_type.ident(),
                    created: vehicle_type.created(),
                    updated: vehicle_type.updated(),
                    version: vehicle_type.version(),
                    name: vehicle_type.name().clone(),
                    load_capacity_kg: vehicle_type.load_capacity_kg(),
                }
            }
        }

        impl From<Vehicle> for VehicleResponse {
            fn from(vehicle: Vehicle) -> Self {
                Self {
                    id: vehicle.ident(),
                    created: vehicle.created(),
                    updated: vehicle.updated(),
                    version: vehicle.version(),
                    license_plate: vehicle.license_plate().clone(),
                    model: vehicle.model().clone(),
                    manufacturer: vehicle.manufacturer().clone(),
                    year: vehicle.year(),
                    status: vehicle.status().as_str(),
                    vehicle_type_id: vehicle.vehicle_type_id(),
                    inspection_expiry: vehicle.inspection_expiry(),
                    insurance_expiry: vehicle.insurance_expiry(),
                    last_maintenance: vehicle.last_maintenance(),
                    next_maintenance: vehicle.next_maintenance(),
                }
            }
        }
    }

    pub mod order {
        use crate::{
            app::resource::order::OrderResponse,
            domain::entity::{order::Order, Entity},
        };

        impl From<Order> for OrderResponse {
            fn from(order: Order) -> Self {
                Self {
                    id: order.ident(),
                    created: order.created(),
                    updated: order.updated(),
                    version: order.version(),
                    code: order.code().clone(),
                    receiver_name: order.receiver_name().clone(),
                    receiver_phone: order.receiver_phone().clone(),
                    package_description: order.package_description().clone(),
                    total_quantity: order.total_quantity(),
                    pickup_address: order.pickup_address().clone(),
                    delivery_address: order.delivery_address().clone(),
                    sender_id: order.sender_id(),
                    status: order.status().as_str(),
                    quoted_price: order.quoted_price(),
                }
            }
        }
    }

    pub mod pricing {
        use crate::{
            app::resource::pricing::{PricingRuleResponse, QuoteResponse, TierBreakdown},
            domain::entity::{
                pricing::{PricingRule, Quote, TierAmount},
                Entity,
            },
        };

        impl From<PricingRule> for PricingRuleResponse {
            fn from(rule: PricingRule) -> Self {
                Self {
                    id: rule.ident(),
                    created: rule.created(),
                    updated: rule.updated(),
                    version: rule.version(),
                    vehicle_type_id: rule.vehicle_type_id(),
                    from_km: rule.from_km(),
                    to_km: rule.to_km(),
                    unit_price: rule.unit_price(),
                }
            }
        }

        impl From<TierAmount> for TierBreakdown {
            fn from(tier: TierAmount) -> Self {
                Self {
                    range: tier.range,
                    unit_price: tier.unit_price,
                    distance_km: tier.distance_km,
                    amount: tier.amount,
                }
            }
        }

        impl From<Quote> for QuoteResponse {
            fn from(quote: Quote) -> Self {
                Self {
                    total_price: quote.total_price,
                    base_price_per_vehicle: quote.base_price_per_vehicle,
                    adjusted_price_per_vehicle: quote.adjusted_price_per_vehicle,
                    tiers: quote.tiers.into_iter().map(Into::into).collect(),
                }
            }
        }
    }
}
