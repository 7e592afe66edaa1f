use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use serial_test::serial;

use crate::setup::setup_test;

mod setup;

#[derive(Debug, Clone, Serialize)]
struct CreateUserDto<'a> {
    username: &'a str,
    email: &'a str,
    password: &'a str,
    full_name: &'a str,
    phone_number: Option<&'a str>,
    role: &'a str,
}

#[derive(Debug, Clone, Serialize)]
struct CredentialDto<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct UserResponse {
    id: String,
}

#[derive(Debug, Clone, Deserialize)]
struct AuthResponse {
    user: UserResponse,
    token: String,
}

#[derive(Debug, Clone, Serialize)]
struct CreateVehicleTypeDto<'a> {
    name: &'a str,
    load_capacity_kg: i32,
}

#[derive(Debug, Clone, Deserialize)]
struct VehicleTypeResponse {
    id: String,
}

#[derive(Debug, Clone, Serialize)]
struct CreatePricingRuleDto<'a> {
    vehicle_type_id: &'a str,
    from_km: f64,
    to_km: Option<f64>,
    unit_price: i64,
}

#[derive(Debug, Clone, Serialize)]
struct PlaceOrderDto<'a> {
    receiver_name: &'a str,
    receiver_phone: Option<&'a str>,
    package_description: Option<&'a str>,
    total_quantity: i32,
    pickup_address: &'a str,
    delivery_address: &'a str,
    vehicle_type_id: &'a str,
    distance_km: f64,
    vehicle_count: u32,
    category: Option<&'a str>,
}

#[derive(Debug, Clone, Serialize)]
struct ChangeStatusDto<'a> {
    status: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
struct OrderResponse {
    id: String,
    code: String,
    status: String,
    quoted_price: i64,
}

async fn authenticate(
    client: &reqwest::Client,
    url: &url::Url,
    username: &str,
    email: &str,
    role: &str,
) -> AuthResponse {
    let res = client
        .post(url.join("/api/users").unwrap())
        .json(&CreateUserDto {
            username,
            email,
            password: "secure:12345678",
            full_name: "Test Account",
            phone_number: None,
            role,
        })
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);

    let res = client
        .post(url.join("/api/auth").unwrap())
        .json(&CredentialDto {
            email,
            password: "secure:12345678",
        })
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    res.json().await.unwrap()
}

async fn setup_vehicle_type_with_tiers(
    client: &reqwest::Client,
    url: &url::Url,
    staff_token: &str,
) -> String {
    let res = client
        .post(url.join("/api/vehicle-types").unwrap())
        .bearer_auth(staff_token)
        .json(&CreateVehicleTypeDto {
            name: "VAN_500",
            load_capacity_kg: 500,
        })
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);
    let vehicle_type: VehicleTypeResponse = res.json().await.unwrap();

    let tiers = [
        (0.0, Some(4.0), 150_000),
        (4.0, Some(40.0), 12_000),
        (40.0, None, 9_000),
    ];
    for (from_km, to_km, unit_price) in tiers {
        let res = client
            .post(url.join("/api/pricing/rules").unwrap())
            .bearer_auth(staff_token)
            .json(&CreatePricingRuleDto {
                vehicle_type_id: &vehicle_type.id,
                from_km,
                to_km,
                unit_price,
            })
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), reqwest::StatusCode::CREATED);
    }

    vehicle_type.id
}

#[tokio::test]
#[ignore = "requires a running api server and database"]
#[serial]
async fn placed_order_is_quoted_and_walks_the_delivery_flow() {
    let (client, url, _pool) = setup_test().await;

    let staff = authenticate(&client, &url, "ops-staff", "ops@fleetops.dev", "STAFF").await;
    let vehicle_type_id = setup_vehicle_type_with_tiers(&client, &url, &staff.token).await;

    let customer =
        authenticate(&client, &url, "shop-owner", "shop@fleetops.dev", "CUSTOMER").await;

    let res = client
        .post(url.join("/api/orders").unwrap())
        .bearer_auth(&customer.token)
        .json(&PlaceOrderDto {
            receiver_name: "Van Minh",
            receiver_phone: Some("+84907776666"),
            package_description: Some("20 boxes of ceramics"),
            total_quantity: 20,
            pickup_address: "12 Ly Thuong Kiet, Ha Noi",
            delivery_address: "45 Le Loi, Hai Phong",
            vehicle_type_id: &vehicle_type_id,
            distance_km: 50.0,
            vehicle_count: 1,
            category: Some("FRAGILE"),
        })
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);
    let order: OrderResponse = res.json().await.unwrap();

    assert!(order.code.starts_with("ORD-"));
    assert_eq!(order.status, "PENDING");
    // 672k base * 1.25 + 50k fragile fee, rounded to the nearest thousand
    assert_eq!(order.quoted_price, 890_000);

    let res = client
        .get(url.join("/api/orders").unwrap())
        .bearer_auth(&customer.token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let listed: Vec<OrderResponse> = res.json().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, order.id);

    let flow = [
        "PROCESSING",
        "CONTRACT_SIGNED",
        "ASSIGNED_TO_DRIVER",
        "PICKING_UP",
        "ON_DELIVERY",
        "DELIVERED",
        "COMPLETED",
    ];
    for status in flow {
        let res = client
            .put(url.join(&format!("/api/orders/{}/status", order.id)).unwrap())
            .bearer_auth(&staff.token)
            .json(&ChangeStatusDto { status })
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), reqwest::StatusCode::OK);
        let updated: OrderResponse = res.json().await.unwrap();
        assert_eq!(updated.status, status);
    }
}

#[tokio::test]
#[ignore = "requires a running api server and database"]
#[serial]
async fn order_cannot_be_cancelled_once_on_the_road() {
    let (client, url, _pool) = setup_test().await;

    let staff = authenticate(&client, &url, "dispatch", "dispatch@fleetops.dev", "STAFF").await;
    let vehicle_type_id = setup_vehicle_type_with_tiers(&client, &url, &staff.token).await;

    let customer =
        authenticate(&client, &url, "retailer", "retailer@fleetops.dev", "CUSTOMER").await;

    let res = client
        .post(url.join("/api/orders").unwrap())
        .bearer_auth(&customer.token)
        .json(&PlaceOrderDto {
            receiver_name: "Thanh Tam",
            receiver_phone: None,
            package_description: None,
            total_quantity: 5,
            pickup_address: "1 Nguyen Hue, HCMC",
            delivery_address: "99 Tran Phu, Da Nang",
            vehicle_type_id: &vehicle_type_id,
            distance_km: 10.0,
            vehicle_count: 1,
            category: None,
        })
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);
    let order: OrderResponse = res.json().await.unwrap();

    // cancellation is allowed while the order has not left the warehouse
    for status in ["PROCESSING", "CONTRACT_SIGNED", "ASSIGNED_TO_DRIVER", "PICKING_UP"] {
        let res = client
            .put(url.join(&format!("/api/orders/{}/status", order.id)).unwrap())
            .bearer_auth(&staff.token)
            .json(&ChangeStatusDto { status })
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), reqwest::StatusCode::OK);
    }

    let res = client
        .post(url.join(&format!("/api/orders/{}/cancel", order.id)).unwrap())
        .bearer_auth(&customer.token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
#[ignore = "requires a running api server and database"]
#[serial]
async fn quote_without_matching_rules_is_unprocessable() {
    let (client, url, _pool) = setup_test().await;

    let staff = authenticate(&client, &url, "planner", "planner@fleetops.dev", "STAFF").await;

    let res = client
        .post(url.join("/api/vehicle-types").unwrap())
        .bearer_auth(&staff.token)
        .json(&CreateVehicleTypeDto {
            name: "TRUCK_2T",
            load_capacity_kg: 2000,
        })
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);
    let vehicle_type: VehicleTypeResponse = res.json().await.unwrap();

    #[derive(Serialize)]
    struct QuoteDto<'a> {
        vehicle_type_id: &'a str,
        distance_km: f64,
        vehicle_count: u32,
        category: Option<&'a str>,
    }

    let res = client
        .post(url.join("/api/pricing/quote").unwrap())
        .json(&QuoteDto {
            vehicle_type_id: &vehicle_type.id,
            distance_km: 25.0,
            vehicle_count: 1,
            category: None,
        })
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::UNPROCESSABLE_ENTITY);
}
