use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use serial_test::serial;

use crate::setup::setup_test;

mod setup;

#[derive(Debug, Clone, Serialize)]
pub struct CreateUserDto<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub full_name: &'a str,
    pub phone_number: Option<&'a str>,
    pub role: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CredentialDto<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub full_name: String,
    pub phone_number: Option<String>,
    pub role: String,
    pub status: String,
    pub version: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub token: String,
}

#[tokio::test]
#[ignore = "requires a running api server and database"]
#[serial]
async fn create_authenticate_and_fetch_user() {
    let (client, url, _pool) = setup_test().await;

    let dto = CreateUserDto {
        username: "customer01",
        email: "customer01@fleetops.dev",
        password: "secure:12345678",
        full_name: "Ngoc Anh",
        phone_number: Some("+84901234567"),
        role: "CUSTOMER",
    };

    let res = client
        .post(url.join("/api/users").unwrap())
        .json(&dto)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);
    let created: UserResponse = res.json().await.unwrap();

    assert_eq!(created.username, dto.username);
    assert_eq!(created.email, dto.email);
    assert_eq!(created.role, "CUSTOMER");
    assert_eq!(created.status, "ACTIVE");
    assert_eq!(created.version, 1);

    let res = client
        .post(url.join("/api/auth").unwrap())
        .json(&CredentialDto {
            email: dto.email,
            password: dto.password,
        })
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let auth: AuthResponse = res.json().await.unwrap();
    assert_eq!(auth.user.id, created.id);

    let res = client
        .get(url.join(&format!("/api/users/{}", created.id)).unwrap())
        .bearer_auth(&auth.token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let fetched: UserResponse = res.json().await.unwrap();
    assert_eq!(fetched.id, created.id);
}

#[tokio::test]
#[ignore = "requires a running api server and database"]
#[serial]
async fn duplicated_email_is_rejected() {
    let (client, url, _pool) = setup_test().await;

    let dto = CreateUserDto {
        username: "driver02",
        email: "driver02@fleetops.dev",
        password: "secure:12345678",
        full_name: "Quang Huy",
        phone_number: None,
        role: "DRIVER",
    };

    let res = client
        .post(url.join("/api/users").unwrap())
        .json(&dto)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::CREATED);

    let duplicated = CreateUserDto {
        username: "driver02-bis",
        ..dto.clone()
    };
    let res = client
        .post(url.join("/api/users").unwrap())
        .json(&duplicated)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::BAD_REQUEST);
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateStatusDto<'a> {
    pub status: &'a str,
}

#[tokio::test]
#[ignore = "requires a running api server and database"]
#[serial]
async fn suspended_account_cannot_authenticate() {
    let (client, url, _pool) = setup_test().await;

    let staff = CreateUserDto {
        username: "ops-admin",
        email: "ops-admin@fleetops.dev",
        password: "secure:12345678",
        full_name: "Bao Chau",
        phone_number: None,
        role: "STAFF",
    };
    let customer = CreateUserDto {
        username: "late-payer",
        email: "late-payer@fleetops.dev",
        password: "secure:12345678",
        full_name: "Hong Nhung",
        phone_number: None,
        role: "CUSTOMER",
    };

    for dto in [&staff, &customer] {
        let res = client
            .post(url.join("/api/users").unwrap())
            .json(dto)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), reqwest::StatusCode::CREATED);
    }

    let res = client
        .post(url.join("/api/auth").unwrap())
        .json(&CredentialDto {
            email: customer.email,
            password: customer.password,
        })
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let customer_auth: AuthResponse = res.json().await.unwrap();

    let res = client
        .post(url.join("/api/auth").unwrap())
        .json(&CredentialDto {
            email: staff.email,
            password: staff.password,
        })
        .send()
        .await
        .unwrap();
    let staff_auth: AuthResponse = res.json().await.unwrap();

    // only staff can change an account status
    let status_url = url
        .join(&format!("/api/users/{}/status", customer_auth.user.id))
        .unwrap();
    let res = client
        .put(status_url.clone())
        .bearer_auth(&customer_auth.token)
        .json(&UpdateStatusDto {
            status: "SUSPENDED",
        })
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::FORBIDDEN);

    let res = client
        .put(status_url)
        .bearer_auth(&staff_auth.token)
        .json(&UpdateStatusDto {
            status: "SUSPENDED",
        })
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::OK);
    let suspended: UserResponse = res.json().await.unwrap();
    assert_eq!(suspended.status, "SUSPENDED");
    assert_eq!(suspended.version, 2);

    let res = client
        .post(url.join("/api/auth").unwrap())
        .json(&CredentialDto {
            email: customer.email,
            password: customer.password,
        })
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::FORBIDDEN);
}

#[tokio::test]
#[ignore = "requires a running api server and database"]
#[serial]
async fn wrong_password_is_unauthorized() {
    let (client, url, _pool) = setup_test().await;

    let dto = CreateUserDto {
        username: "staff03",
        email: "staff03@fleetops.dev",
        password: "secure:12345678",
        full_name: "Thu Ha",
        phone_number: None,
        role: "STAFF",
    };

    client
        .post(url.join("/api/users").unwrap())
        .json(&dto)
        .send()
        .await
        .unwrap();

    let res = client
        .post(url.join("/api/auth").unwrap())
        .json(&CredentialDto {
            email: dto.email,
            password: "not-the-password",
        })
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), reqwest::StatusCode::UNAUTHORIZED);
}
