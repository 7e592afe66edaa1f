use std::sync::Arc;

use async_trait::async_trait;
use salvo::{http::StatusCode, writer::Json, Depot, FlowCtrl, Handler, Request, Response};
use sqlx::PgPool;
use uuid::Uuid;

use crate::app::{
    resource::{
        fleet::{CreateVehicleType, RecordMaintenance, RegisterVehicle, UpdateVehicleStatus},
        iam::{CreateUser, UpdateUser, UpdateUserStatus, UserCredential},
        order::{ChangeOrderStatus, PlaceOrder},
        pricing::{CreatePricingRule, QuoteRequest},
    },
    use_case,
};
use crate::error::app::ApplicationError;
use crate::error::http::BadRequest;
use crate::error::security::UnauthorizedError;
use crate::infra::service::security::{Argon2HashService, JwtEncryptionService};

macro_rules! map_res_err {
    ($result:ident, $response:ident) => {
        match $result {
            Err(err) => {
                $response.render(err);
                return;
            }
            Ok(ok) => ok,
        }
    };
}

/// Extract a authorization token from a request.
///
/// Token must be formated in the Bearer authentication scheme
/// described in [RFC 7617](https://datatracker.ietf.org/doc/html/rfc7617)
fn extract_token<'req>(req: &'req Request) -> Result<&'req str, UnauthorizedError> {
    let scheme: Option<&str> = req.header("authorization");
    scheme
        .ok_or(UnauthorizedError::TokenNotPresent)?
        .strip_prefix("Bearer ")
        .ok_or(UnauthorizedError::MalformattedToken)
}

/// Extract a uuid from a request id param
///
/// # Panic
///
/// Panics if a id param is not present or the content is not a valid uuid
fn extract_id(req: &Request) -> Uuid {
    req.params()
        .get("id")
        .expect("Expect to route only with valid uuid")
        .parse()
        .expect("Expect id param as a valid uuid")
}

pub struct CreateUserController {
    pool: PgPool,
    hash_service: Arc<Argon2HashService>,
}

impl CreateUserController {
    pub fn new(pool: PgPool, hash_service: Arc<Argon2HashService>) -> Self {
        Self { pool, hash_service }
    }
}

#[async_trait]
impl Handler for CreateUserController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result: Result<CreateUser, _> = req.parse_body().await.map_err(BadRequest::from);
        let dto = map_res_err!(result, res);

        let result = use_case::iam::create_user(&self.pool, self.hash_service.as_ref(), dto).await;
        let user = map_res_err!(result, res);

        res.render(Json(user));
        res.set_status_code(StatusCode::CREATED);
    }
}

pub struct AuthenticateUserController {
    pool: PgPool,
    hash_service: Arc<Argon2HashService>,
    token_service: Arc<JwtEncryptionService>,
}

impl AuthenticateUserController {
    pub fn new(
        pool: PgPool,
        hash_service: Arc<Argon2HashService>,
        token_service: Arc<JwtEncryptionService>,
    ) -> Self {
        Self {
            pool,
            hash_service,
            token_service,
        }
    }
}

#[async_trait]
impl Handler for AuthenticateUserController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result: Result<UserCredential, _> = req.parse_body().await.map_err(BadRequest::from);
        let credential = map_res_err!(result, res);

        let result = use_case::iam::authenticate_user(
            &self.pool,
            self.hash_service.as_ref(),
            self.token_service.as_ref(),
            credential,
        )
        .await;
        let auth_response = map_res_err!(result, res);

        res.render(Json(auth_response));
        res.set_status_code(StatusCode::OK);
    }
}

pub struct UpdateUserController {
    pool: PgPool,
    token_service: Arc<JwtEncryptionService>,
}

impl UpdateUserController {
    pub fn new(pool: PgPool, token_service: Arc<JwtEncryptionService>) -> Self {
        Self {
            pool,
            token_service,
        }
    }
}

#[async_trait]
impl Handler for UpdateUserController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result: Result<UpdateUser, _> = req.parse_body().await.map_err(BadRequest::from);
        let dto = map_res_err!(result, res);

        let id = extract_id(req);
        let result = extract_token(req).map_err(ApplicationError::<()>::from);
        let tk = map_res_err!(result, res);

        let result =
            use_case::iam::update_user(&self.pool, self.token_service.as_ref(), tk, id, dto).await;
        let resource = map_res_err!(result, res);

        res.render(Json(resource));
        res.set_status_code(StatusCode::OK);
    }
}

pub struct UpdateUserStatusController {
    pool: PgPool,
    token_service: Arc<JwtEncryptionService>,
}

impl UpdateUserStatusController {
    pub fn new(pool: PgPool, token_service: Arc<JwtEncryptionService>) -> Self {
        Self {
            pool,
            token_service,
        }
    }
}

#[async_trait]
impl Handler for UpdateUserStatusController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let id = extract_id(req);
        let result = extract_token(req)
            .map(str::to_owned)
            .map_err(ApplicationError::<()>::from);
        let tk = map_res_err!(result, res);

        let result: Result<UpdateUserStatus, _> =
            req.parse_body().await.map_err(BadRequest::from);
        let dto = map_res_err!(result, res);

        let result =
            use_case::iam::set_user_status(&self.pool, self.token_service.as_ref(), &tk, id, dto)
                .await;
        let resource = map_res_err!(result, res);

        res.render(Json(resource));
        res.set_status_code(StatusCode::OK);
    }
}

pub struct GetUserController {
    pool: PgPool,
    token_service: Arc<JwtEncryptionService>,
}

impl GetUserController {
    pub fn new(pool: PgPool, token_service: Arc<JwtEncryptionService>) -> Self {
        Self {
            pool,
            token_service,
        }
    }
}

#[async_trait]
impl Handler for GetUserController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let id = extract_id(req);
        let result = extract_token(req).map_err(ApplicationError::<()>::from);
        let tk = map_res_err!(result, res);

        let result = use_case::iam::get_user(&self.pool, self.token_service.as_ref(), tk, id).await;
        let resource = map_res_err!(result, res);

        res.render(Json(resource));
        res.set_status_code(StatusCode::OK);
    }
}

pub struct CreateVehicleTypeController {
    pool: PgPool,
    token_service: Arc<JwtEncryptionService>,
}

impl CreateVehicleTypeController {
    pub fn new(pool: PgPool, token_service: Arc<JwtEncryptionService>) -> Self {
        Self {
            pool,
            token_service,
        }
    }
}

#[async_trait]
impl Handler for CreateVehicleTypeController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result = extract_token(req)
            .map(str::to_owned)
            .map_err(ApplicationError::<()>::from);
        let tk = map_res_err!(result, res);

        let result: Result<CreateVehicleType, _> =
            req.parse_body().await.map_err(BadRequest::from);
        let dto = map_res_err!(result, res);

        let result =
            use_case::fleet::create_vehicle_type(&self.pool, self.token_service.as_ref(), &tk, dto)
                .await;
        let resource = map_res_err!(result, res);

        res.render(Json(resource));
        res.set_status_code(StatusCode::CREATED);
    }
}

pub struct RegisterVehicleController {
    pool: PgPool,
    token_service: Arc<JwtEncryptionService>,
}

impl RegisterVehicleController {
    pub fn new(pool: PgPool, token_service: Arc<JwtEncryptionService>) -> Self {
        Self {
            pool,
            token_service,
        }
    }
}

#[async_trait]
impl Handler for RegisterVehicleController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result = extract_token(req)
            .map(str::to_owned)
            .map_err(ApplicationError::<()>::from);
        let tk = map_res_err!(result, res);

        let result: Result<RegisterVehicle, _> = req.parse_body().await.map_err(BadRequest::from);
        let dto = map_res_err!(result, res);

        let result =
            use_case::fleet::register_vehicle(&self.pool, self.token_service.as_ref(), &tk, dto)
                .await;
        let resource = map_res_err!(result, res);

        res.render(Json(resource));
        res.set_status_code(StatusCode::CREATED);
    }
}

pub struct GetVehicleController {
    pool: PgPool,
}

impl GetVehicleController {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Handler for GetVehicleController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let id = extract_id(req);

        let result = use_case::fleet::get_vehicle(&self.pool, id).await;
        let resource = map_res_err!(result, res);

        res.render(Json(resource));
        res.set_status_code(StatusCode::OK);
    }
}

pub struct ListVehiclesController {
    pool: PgPool,
}

impl ListVehiclesController {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Handler for ListVehiclesController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let status: Option<String> = req.query("status");

        let result = use_case::fleet::list_vehicles(&self.pool, status.as_deref()).await;
        let resources = map_res_err!(result, res);

        res.render(Json(resources));
        res.set_status_code(StatusCode::OK);
    }
}

pub struct UpdateVehicleStatusController {
    pool: PgPool,
    token_service: Arc<JwtEncryptionService>,
}

impl UpdateVehicleStatusController {
    pub fn new(pool: PgPool, token_service: Arc<JwtEncryptionService>) -> Self {
        Self {
            pool,
            token_service,
        }
    }
}

#[async_trait]
impl Handler for UpdateVehicleStatusController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let id = extract_id(req);
        let result = extract_token(req)
            .map(str::to_owned)
            .map_err(ApplicationError::<()>::from);
        let tk = map_res_err!(result, res);

        let result: Result<UpdateVehicleStatus, _> =
            req.parse_body().await.map_err(BadRequest::from);
        let dto = map_res_err!(result, res);

        let result = use_case::fleet::update_vehicle_status(
            &self.pool,
            self.token_service.as_ref(),
            &tk,
            id,
            dto,
        )
        .await;
        let resource = map_res_err!(result, res);

        res.render(Json(resource));
        res.set_status_code(StatusCode::OK);
    }
}

pub struct RecordMaintenanceController {
    pool: PgPool,
    token_service: Arc<JwtEncryptionService>,
}

impl RecordMaintenanceController {
    pub fn new(pool: PgPool, token_service: Arc<JwtEncryptionService>) -> Self {
        Self {
            pool,
            token_service,
        }
    }
}

#[async_trait]
impl Handler for RecordMaintenanceController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result: Result<RecordMaintenance, _> =
            req.parse_body().await.map_err(BadRequest::from);
        let dto = map_res_err!(result, res);

        let id = extract_id(req);
        let result = extract_token(req).map_err(ApplicationError::<()>::from);
        let tk = map_res_err!(result, res);

        let result = use_case::fleet::record_maintenance(
            &self.pool,
            self.token_service.as_ref(),
            tk,
            id,
            dto,
        )
        .await;
        let resource = map_res_err!(result, res);

        res.render(Json(resource));
        res.set_status_code(StatusCode::OK);
    }
}

pub struct PlaceOrderController {
    pool: PgPool,
    token_service: Arc<JwtEncryptionService>,
}

impl PlaceOrderController {
    pub fn new(pool: PgPool, token_service: Arc<JwtEncryptionService>) -> Self {
        Self {
            pool,
            token_service,
        }
    }
}

#[async_trait]
impl Handler for PlaceOrderController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result = extract_token(req)
            .map(str::to_owned)
            .map_err(ApplicationError::<()>::from);
        let tk = map_res_err!(result, res);

        let result: Result<PlaceOrder, _> = req.parse_body().await.map_err(BadRequest::from);
        let dto = map_res_err!(result, res);

        let result =
            use_case::order::place_order(&self.pool, self.token_service.as_ref(), &tk, dto).await;
        let resource = map_res_err!(result, res);

        res.render(Json(resource));
        res.set_status_code(StatusCode::CREATED);
    }
}

pub struct GetOrderController {
    pool: PgPool,
}

impl GetOrderController {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Handler for GetOrderController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let id = extract_id(req);

        let result = use_case::order::get_order(&self.pool, id).await;
        let resource = map_res_err!(result, res);

        res.render(Json(resource));
        res.set_status_code(StatusCode::OK);
    }
}

pub struct ListOrdersController {
    pool: PgPool,
    token_service: Arc<JwtEncryptionService>,
}

impl ListOrdersController {
    pub fn new(pool: PgPool, token_service: Arc<JwtEncryptionService>) -> Self {
        Self {
            pool,
            token_service,
        }
    }
}

#[async_trait]
impl Handler for ListOrdersController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result = extract_token(req).map_err(ApplicationError::<()>::from);
        let tk = map_res_err!(result, res);

        let result = use_case::order::list_orders(&self.pool, self.token_service.as_ref(), tk).await;
        let resources = map_res_err!(result, res);

        res.render(Json(resources));
        res.set_status_code(StatusCode::OK);
    }
}

pub struct ChangeOrderStatusController {
    pool: PgPool,
    token_service: Arc<JwtEncryptionService>,
}

impl ChangeOrderStatusController {
    pub fn new(pool: PgPool, token_service: Arc<JwtEncryptionService>) -> Self {
        Self {
            pool,
            token_service,
        }
    }
}

#[async_trait]
impl Handler for ChangeOrderStatusController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let id = extract_id(req);
        let result = extract_token(req)
            .map(str::to_owned)
            .map_err(ApplicationError::<()>::from);
        let tk = map_res_err!(result, res);

        let result: Result<ChangeOrderStatus, _> =
            req.parse_body().await.map_err(BadRequest::from);
        let dto = map_res_err!(result, res);

        let result = use_case::order::change_order_status(
            &self.pool,
            self.token_service.as_ref(),
            &tk,
            id,
            dto,
        )
        .await;
        let resource = map_res_err!(result, res);

        res.render(Json(resource));
        res.set_status_code(StatusCode::OK);
    }
}

pub struct CancelOrderController {
    pool: PgPool,
    token_service: Arc<JwtEncryptionService>,
}

impl CancelOrderController {
    pub fn new(pool: PgPool, token_service: Arc<JwtEncryptionService>) -> Self {
        Self {
            pool,
            token_service,
        }
    }
}

#[async_trait]
impl Handler for CancelOrderController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let id = extract_id(req);
        let result = extract_token(req).map_err(ApplicationError::<()>::from);
        let tk = map_res_err!(result, res);

        let result =
            use_case::order::cancel_order(&self.pool, self.token_service.as_ref(), tk, id).await;
        let resource = map_res_err!(result, res);

        res.render(Json(resource));
        res.set_status_code(StatusCode::OK);
    }
}

pub struct CreatePricingRuleController {
    pool: PgPool,
    token_service: Arc<JwtEncryptionService>,
}

impl CreatePricingRuleController {
    pub fn new(pool: PgPool, token_service: Arc<JwtEncryptionService>) -> Self {
        Self {
            pool,
            token_service,
        }
    }
}

#[async_trait]
impl Handler for CreatePricingRuleController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result: Result<CreatePricingRule, _> =
            req.parse_body().await.map_err(BadRequest::from);
        let dto = map_res_err!(result, res);

        let result = extract_token(req).map_err(ApplicationError::<()>::from);
        let tk = map_res_err!(result, res);

        let result =
            use_case::pricing::create_rule(&self.pool, self.token_service.as_ref(), tk, dto).await;
        let resource = map_res_err!(result, res);

        res.render(Json(resource));
        res.set_status_code(StatusCode::CREATED);
    }
}

pub struct ListPricingRulesController {
    pool: PgPool,
}

impl ListPricingRulesController {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Handler for ListPricingRulesController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let vehicle_type_id = extract_id(req);

        let result = use_case::pricing::list_rules(&self.pool, vehicle_type_id).await;
        let resources = map_res_err!(result, res);

        res.render(Json(resources));
        res.set_status_code(StatusCode::OK);
    }
}

pub struct QuotePriceController {
    pool: PgPool,
}

impl QuotePriceController {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl Handler for QuotePriceController {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, _: &mut FlowCtrl) {
        let result: Result<QuoteRequest, _> = req.parse_body().await.map_err(BadRequest::from);
        let dto = map_res_err!(result, res);

        let result = use_case::pricing::quote_price(&self.pool, dto).await;
        let quote = map_res_err!(result, res);

        res.render(Json(quote));
        res.set_status_code(StatusCode::OK);
    }
}
