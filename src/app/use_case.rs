use serde::{Deserialize, Serialize};

use crate::domain::datatype::security::{Token, TokenPayload};
use crate::domain::service::TokenEncryptionService;
use crate::error::security::{ForbiddenError, UnauthorizedError};

/// Claims carried by an authentication token besides the subject.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub role: String,
}

fn authenticate<TS>(
    token_service: &TS,
    token: &str,
) -> Result<TokenPayload<UserClaims>, UnauthorizedError>
where
    TS: TokenEncryptionService,
{
    let token: Token<UserClaims> = Token::verify(token.into(), token_service)?;
    Ok(token.payload().clone())
}

fn require_staff(payload: &TokenPayload<UserClaims>) -> Result<(), ForbiddenError> {
    match payload.data.role.as_str() {
        "ADMIN" | "STAFF" => Ok(()),
        _ => Err(ForbiddenError::AccessDenied),
    }
}

pub mod iam {
    use std::time::Duration;

    use sqlx::PgPool;
    use uuid::Uuid;

    use super::{authenticate, require_staff, UserClaims};
    use crate::{
        app::resource::iam::{
            AuthenticateUserResponse, CreateUser, UpdateUser, UpdateUserStatus, UserCredential,
            UserResponse,
        },
        domain::{
            datatype::security::{Token, TokenPayload, TokenSubject},
            entity::{
                iam::{Role, User, UserStatus},
                Entity,
            },
            service::{PasswordHashService, TokenEncryptionService},
        },
        error::{
            app::ApplicationError,
            resource::{ValidationError, ValidationErrorKind, ValidationFieldError},
            security::{AuthenticationError, ForbiddenError},
        },
        infra::database::repository,
    };

    const AUTHENTICATION_TOKEN_EXPIRATION: Duration = Duration::from_secs(60 * 60 * 8);

    mod validation {
        use super::*;

        pub async fn create_user<'dto>(
            pool: &PgPool,
            dto: &CreateUser<'dto>,
        ) -> Result<Role, ApplicationError<CreateUser<'dto>>> {
            let mut errors = Vec::new();

            let role = match dto.role.parse::<Role>() {
                Ok(role) => Some(role),
                Err(mut err) => {
                    err.path = "/role".into();
                    errors.push(err);
                    None
                }
            };

            let emails = repository::iam::emails_exist(pool, [dto.email]).await?;
            if !emails.is_empty() {
                errors.push(ValidationFieldError::new(
                    "base::email",
                    dto.email.into(),
                    "/email".into(),
                    vec![ValidationErrorKind::AlreadyExists],
                ));
            }

            let usernames = repository::iam::usernames_exist(pool, [dto.username]).await?;
            if !usernames.is_empty() {
                errors.push(ValidationFieldError::new(
                    "base::username",
                    dto.username.into(),
                    "/username".into(),
                    vec![ValidationErrorKind::AlreadyExists],
                ));
            }

            if !errors.is_empty() {
                return Err(ValidationError::from_resource(dto.clone(), errors).into());
            }

            Ok(role.expect("Expect a parsed role when no validation error was collected"))
        }
    }

    pub async fn create_user<'dto, HS: PasswordHashService>(
        pool: &PgPool,
        hash_service: &HS,
        dto: CreateUser<'dto>,
    ) -> Result<UserResponse, ApplicationError<CreateUser<'dto>>> {
        let role = validation::create_user(pool, &dto).await?;

        let password_hash = hash_service.hash_password(dto.password).map_err(|_| {
            ValidationError::from_resource(
                dto.clone(),
                vec![ValidationFieldError::new(
                    "base::password",
                    dto.password.into(),
                    "/password".into(),
                    vec![ValidationErrorKind::Invalid],
                )],
            )
        })?;

        let user = User::new(
            dto.username.into(),
            dto.email.into(),
            password_hash,
            dto.full_name.into(),
            dto.phone_number.map(Into::into),
            role,
        );

        repository::iam::insert_user(pool, [&user]).await?;

        Ok(user.into())
    }

    pub async fn authenticate_user<'dto, HS, TS>(
        pool: &PgPool,
        hash_service: &HS,
        token_service: &TS,
        credential: UserCredential<'dto>,
    ) -> Result<AuthenticateUserResponse, ApplicationError<UserCredential<'dto>>>
    where
        HS: PasswordHashService,
        TS: TokenEncryptionService,
    {
        let user = repository::iam::find_user_by_email(pool, credential.email)
            .await?
            .ok_or_else(|| {
                ValidationError::from_resource(
                    credential.clone(),
                    vec![ValidationFieldError::new(
                        "base::email",
                        credential.email.into(),
                        "/email".into(),
                        vec![ValidationErrorKind::NotFound],
                    )],
                )
            })?;

        if hash_service
            .verify_password(credential.password, user.password_hash())
            .is_err()
        {
            return Err(AuthenticationError::InvalidCredential.into());
        }

        if user.status() != UserStatus::Active {
            return Err(ForbiddenError::AccessDenied.into());
        }

        let payload = TokenPayload::new(
            AUTHENTICATION_TOKEN_EXPIRATION,
            TokenSubject::User(user.ident()),
            UserClaims {
                role: user.role().as_str().into(),
            },
        );
        let token =
            Token::new(payload, token_service).expect("Expect to sign a user authentication token");

        Ok(AuthenticateUserResponse {
            user: user.into(),
            token: token.into(),
        })
    }

    pub async fn update_user<TS: TokenEncryptionService>(
        pool: &PgPool,
        token_service: &TS,
        token: &str,
        id: Uuid,
        dto: UpdateUser,
    ) -> Result<UserResponse, ApplicationError<UpdateUser>> {
        let payload = authenticate(token_service, token)?;
        if payload.sub.user_id() != id {
            return Err(ForbiddenError::AccessDenied.into());
        }

        let mut user = repository::iam::find_user_by_id(pool, id)
            .await?
            .ok_or_else(|| {
                ValidationError::from_resource(
                    dto.clone(),
                    vec![ValidationFieldError::new(
                        "base::uuid",
                        id.to_string(),
                        "/id".into(),
                        vec![ValidationErrorKind::NotFound],
                    )],
                )
            })?;

        user.update_profile(
            dto.full_name.clone(),
            dto.phone_number.clone(),
            dto.image_url.clone(),
        );
        repository::iam::update_user(pool, &user).await?;

        Ok(user.into())
    }

    /// Suspends, deactivates or reactivates an account. Staff only.
    pub async fn set_user_status<'dto, TS: TokenEncryptionService>(
        pool: &PgPool,
        token_service: &TS,
        token: &str,
        id: Uuid,
        dto: UpdateUserStatus<'dto>,
    ) -> Result<UserResponse, ApplicationError<UpdateUserStatus<'dto>>> {
        let payload = authenticate(token_service, token)?;
        require_staff(&payload)?;

        let status = dto.status.parse::<UserStatus>().map_err(|mut err| {
            err.path = "/status".into();
            ValidationError::from_resource(dto.clone(), vec![err])
        })?;

        let mut user = repository::iam::find_user_by_id(pool, id)
            .await?
            .ok_or_else(|| {
                ValidationError::from_resource(
                    dto.clone(),
                    vec![ValidationFieldError::new(
                        "base::uuid",
                        id.to_string(),
                        "/id".into(),
                        vec![ValidationErrorKind::NotFound],
                    )],
                )
            })?;

        user.set_status(status);
        repository::iam::update_user(pool, &user).await?;

        Ok(user.into())
    }

    pub async fn get_user<TS: TokenEncryptionService>(
        pool: &PgPool,
        token_service: &TS,
        token: &str,
        id: Uuid,
    ) -> Result<UserResponse, ApplicationError<()>> {
        authenticate(token_service, token)?;

        let user = repository::iam::find_user_by_id(pool, id)
            .await?
            .ok_or_else(|| {
                ValidationError::from_resource(
                    (),
                    vec![ValidationFieldError::new(
                        "base::uuid",
                        id.to_string(),
                        "/id".into(),
                        vec![ValidationErrorKind::NotFound],
                    )],
                )
            })?;

        Ok(user.into())
    }
}

pub mod fleet {
    use sqlx::PgPool;
    use uuid::Uuid;

    use super::{authenticate, require_staff};
    use crate::{
        app::resource::fleet::{
            CreateVehicleType, RecordMaintenance, RegisterVehicle, UpdateVehicleStatus,
            VehicleResponse, VehicleTypeResponse,
        },
        domain::{
            entity::fleet::{Vehicle, VehicleStatus, VehicleType},
            service::TokenEncryptionService,
        },
        error::{
            app::ApplicationError,
            resource::{ValidationError, ValidationErrorKind, ValidationFieldError},
        },
        infra::database::repository,
    };

    pub async fn create_vehicle_type<'dto, TS: TokenEncryptionService>(
        pool: &PgPool,
        token_service: &TS,
        token: &str,
        dto: CreateVehicleType<'dto>,
    ) -> Result<VehicleTypeResponse, ApplicationError<CreateVehicleType<'dto>>> {
        let payload = authenticate(token_service, token)?;
        require_staff(&payload)?;

        let mut errors = Vec::new();
        if dto.name.is_empty() {
            errors.push(ValidationFieldError::new(
                "base::name",
                dto.name.into(),
                "/name".into(),
                vec![ValidationErrorKind::MinLength(1)],
            ));
        }
        if dto.load_capacity_kg <= 0 {
            errors.push(ValidationFieldError::new(
                "base::weight",
                dto.load_capacity_kg.to_string(),
                "/load_capacity_kg".into(),
                vec![ValidationErrorKind::Positive],
            ));
        }
        if !errors.is_empty() {
            return Err(ValidationError::from_resource(dto.clone(), errors).into());
        }

        let vehicle_type = VehicleType::new(dto.name.into(), dto.load_capacity_kg);
        repository::fleet::insert_vehicle_type(pool, [&vehicle_type]).await?;

        Ok(vehicle_type.into())
    }

    pub async fn register_vehicle<'dto, TS: TokenEncryptionService>(
        pool: &PgPool,
        token_service: &TS,
        token: &str,
        dto: RegisterVehicle<'dto>,
    ) -> Result<VehicleResponse, ApplicationError<RegisterVehicle<'dto>>> {
        let payload = authenticate(token_service, token)?;
        require_staff(&payload)?;

        let mut errors = Vec::new();

        let plates = repository::fleet::license_plates_exist(pool, [dto.license_plate]).await?;
        if !plates.is_empty() {
            errors.push(ValidationFieldError::new(
                "fleet::license_plate",
                dto.license_plate.into(),
                "/license_plate".into(),
                vec![ValidationErrorKind::AlreadyExists],
            ));
        }

        if repository::fleet::find_vehicle_type(pool, dto.vehicle_type_id)
            .await?
            .is_none()
        {
            errors.push(ValidationFieldError::new(
                "base::uuid",
                dto.vehicle_type_id.to_string(),
                "/vehicle_type_id".into(),
                vec![ValidationErrorKind::NotFound],
            ));
        }

        if !errors.is_empty() {
            return Err(ValidationError::from_resource(dto.clone(), errors).into());
        }

        let vehicle = Vehicle::new(
            dto.license_plate.into(),
            dto.model.map(Into::into),
            dto.manufacturer.map(Into::into),
            dto.year,
            dto.vehicle_type_id,
        );
        repository::fleet::insert_vehicle(pool, [&vehicle]).await?;

        Ok(vehicle.into())
    }

    pub async fn get_vehicle(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<VehicleResponse, ApplicationError<()>> {
        let vehicle = repository::fleet::find_vehicle(pool, id)
            .await?
            .ok_or_else(|| not_found(id))?;
        Ok(vehicle.into())
    }

    pub async fn list_vehicles(
        pool: &PgPool,
        status: Option<&str>,
    ) -> Result<Vec<VehicleResponse>, ApplicationError<()>> {
        let status = match status {
            Some(status) => Some(status.parse::<VehicleStatus>().map_err(|mut err| {
                err.path = "/status".into();
                ValidationError::from_resource((), vec![err])
            })?),
            None => None,
        };

        let vehicles = repository::fleet::list_vehicles(pool, status).await?;
        Ok(vehicles.into_iter().map(Into::into).collect())
    }

    pub async fn update_vehicle_status<'dto, TS: TokenEncryptionService>(
        pool: &PgPool,
        token_service: &TS,
        token: &str,
        id: Uuid,
        dto: UpdateVehicleStatus<'dto>,
    ) -> Result<VehicleResponse, ApplicationError<UpdateVehicleStatus<'dto>>> {
        let payload = authenticate(token_service, token)?;
        require_staff(&payload)?;

        let status = dto.status.parse::<VehicleStatus>().map_err(|mut err| {
            err.path = "/status".into();
            ValidationError::from_resource(dto.clone(), vec![err])
        })?;

        let mut vehicle = repository::fleet::find_vehicle(pool, id)
            .await?
            .ok_or_else(|| {
                ValidationError::from_resource(
                    dto.clone(),
                    vec![ValidationFieldError::new(
                        "base::uuid",
                        id.to_string(),
                        "/id".into(),
                        vec![ValidationErrorKind::NotFound],
                    )],
                )
            })?;

        vehicle.set_status(status);
        repository::fleet::update_vehicle(pool, &vehicle).await?;

        Ok(vehicle.into())
    }

    pub async fn record_maintenance<TS: TokenEncryptionService>(
        pool: &PgPool,
        token_service: &TS,
        token: &str,
        id: Uuid,
        dto: RecordMaintenance,
    ) -> Result<VehicleResponse, ApplicationError<RecordMaintenance>> {
        let payload = authenticate(token_service, token)?;
        require_staff(&payload)?;

        let mut vehicle = repository::fleet::find_vehicle(pool, id)
            .await?
            .ok_or_else(|| {
                ValidationError::from_resource(
                    dto.clone(),
                    vec![ValidationFieldError::new(
                        "base::uuid",
                        id.to_string(),
                        "/id".into(),
                        vec![ValidationErrorKind::NotFound],
                    )],
                )
            })?;

        vehicle.record_maintenance(dto.performed, dto.next);
        repository::fleet::update_vehicle(pool, &vehicle).await?;

        Ok(vehicle.into())
    }

    fn not_found(id: Uuid) -> ApplicationError<()> {
        ValidationError::from_resource(
            (),
            vec![ValidationFieldError::new(
                "base::uuid",
                id.to_string(),
                "/id".into(),
                vec![ValidationErrorKind::NotFound],
            )],
        )
        .into()
    }
}

pub mod order {
    use sqlx::PgPool;
    use uuid::Uuid;

    use super::authenticate;
    use crate::{
        app::resource::order::{ChangeOrderStatus, OrderResponse, PlaceOrder},
        domain::{
            entity::{
                order::{Order, OrderStatus},
                pricing,
            },
            service::TokenEncryptionService,
        },
        error::{
            app::ApplicationError,
            resource::{ValidationError, ValidationErrorKind, ValidationFieldError},
        },
        infra::database::repository,
    };

    fn order_code() -> String {
        let id = Uuid::new_v4().simple().to_string();
        format!("ORD-{}", id[..8].to_uppercase())
    }

    mod validation {
        use super::*;

        pub fn place_order<'dto>(
            dto: &PlaceOrder<'dto>,
        ) -> Result<(), ApplicationError<PlaceOrder<'dto>>> {
            let mut errors = Vec::new();

            if dto.receiver_name.is_empty() {
                errors.push(ValidationFieldError::new(
                    "base::name",
                    dto.receiver_name.into(),
                    "/receiver_name".into(),
                    vec![ValidationErrorKind::MinLength(1)],
                ));
            }
            if dto.total_quantity <= 0 {
                errors.push(ValidationFieldError::new(
                    "base::quantity",
                    dto.total_quantity.to_string(),
                    "/total_quantity".into(),
                    vec![ValidationErrorKind::Positive],
                ));
            }
            if dto.distance_km <= 0.0 {
                errors.push(ValidationFieldError::new(
                    "base::distance",
                    dto.distance_km.to_string(),
                    "/distance_km".into(),
                    vec![ValidationErrorKind::Positive],
                ));
            }
            if dto.vehicle_count == 0 {
                errors.push(ValidationFieldError::new(
                    "base::quantity",
                    dto.vehicle_count.to_string(),
                    "/vehicle_count".into(),
                    vec![ValidationErrorKind::Minimum(1)],
                ));
            }

            if !errors.is_empty() {
                return Err(ValidationError::from_resource(dto.clone(), errors).into());
            }
            Ok(())
        }
    }

    pub async fn place_order<'dto, TS: TokenEncryptionService>(
        pool: &PgPool,
        token_service: &TS,
        token: &str,
        dto: PlaceOrder<'dto>,
    ) -> Result<OrderResponse, ApplicationError<PlaceOrder<'dto>>> {
        let payload = authenticate(token_service, token)?;
        validation::place_order(&dto)?;

        let rules =
            repository::pricing::rules_for_vehicle_type(pool, dto.vehicle_type_id).await?;
        let adjustment = match dto.category {
            Some(category) => Some(
                repository::pricing::find_category_adjustment(pool, category)
                    .await?
                    .ok_or_else(|| {
                        ValidationError::from_resource(
                            dto.clone(),
                            vec![ValidationFieldError::new(
                                "pricing::category",
                                category.into(),
                                "/category".into(),
                                vec![ValidationErrorKind::NotFound],
                            )],
                        )
                    })?,
            ),
            None => None,
        };

        let quote = pricing::quote(
            &rules,
            adjustment.as_ref(),
            dto.distance_km,
            dto.vehicle_count,
        )?;

        let order = Order::place(
            order_code(),
            dto.receiver_name.into(),
            dto.receiver_phone.map(Into::into),
            dto.package_description.map(Into::into),
            dto.total_quantity,
            dto.pickup_address.into(),
            dto.delivery_address.into(),
            payload.sub.user_id(),
            quote.total_price,
        );
        repository::order::insert_order(pool, [&order]).await?;

        Ok(order.into())
    }

    pub async fn get_order(pool: &PgPool, id: Uuid) -> Result<OrderResponse, ApplicationError<()>> {
        let order = repository::order::find_order(pool, id)
            .await?
            .ok_or_else(|| not_found(id))?;
        Ok(order.into())
    }

    /// Lists the orders placed by the authenticated user.
    pub async fn list_orders<TS: TokenEncryptionService>(
        pool: &PgPool,
        token_service: &TS,
        token: &str,
    ) -> Result<Vec<OrderResponse>, ApplicationError<()>> {
        let payload = authenticate(token_service, token)?;
        let orders =
            repository::order::list_orders_by_sender(pool, payload.sub.user_id()).await?;
        Ok(orders.into_iter().map(Into::into).collect())
    }

    pub async fn change_order_status<'dto, TS: TokenEncryptionService>(
        pool: &PgPool,
        token_service: &TS,
        token: &str,
        id: Uuid,
        dto: ChangeOrderStatus<'dto>,
    ) -> Result<OrderResponse, ApplicationError<ChangeOrderStatus<'dto>>> {
        authenticate(token_service, token)?;

        let status = dto.status.parse::<OrderStatus>().map_err(|mut err| {
            err.path = "/status".into();
            ValidationError::from_resource(dto.clone(), vec![err])
        })?;

        let mut order = repository::order::find_order(pool, id)
            .await?
            .ok_or_else(|| {
                ValidationError::from_resource(
                    dto.clone(),
                    vec![ValidationFieldError::new(
                        "base::uuid",
                        id.to_string(),
                        "/id".into(),
                        vec![ValidationErrorKind::NotFound],
                    )],
                )
            })?;

        order.transition(status)?;
        repository::order::update_order(pool, &order).await?;

        Ok(order.into())
    }

    pub async fn cancel_order<TS: TokenEncryptionService>(
        pool: &PgPool,
        token_service: &TS,
        token: &str,
        id: Uuid,
    ) -> Result<OrderResponse, ApplicationError<()>> {
        authenticate(token_service, token)?;

        let mut order = repository::order::find_order(pool, id)
            .await?
            .ok_or_else(|| not_found(id))?;

        order.transition(OrderStatus::Cancelled)?;
        repository::order::update_order(pool, &order).await?;

        Ok(order.into())
    }

    fn not_found(id: Uuid) -> ApplicationError<()> {
        ValidationError::from_resource(
            (),
            vec![ValidationFieldError::new(
                "base::uuid",
                id.to_string(),
                "/id".into(),
                vec![ValidationErrorKind::NotFound],
            )],
        )
        .into()
    }
}

pub mod pricing {
    use sqlx::PgPool;
    use uuid::Uuid;

    use super::{authenticate, require_staff};
    use crate::{
        app::resource::pricing::{
            CreatePricingRule, PricingRuleResponse, QuoteRequest, QuoteResponse,
        },
        domain::{
            entity::pricing::{self as pricing_domain, PricingRule},
            service::TokenEncryptionService,
        },
        error::{
            app::ApplicationError,
            resource::{ValidationError, ValidationErrorKind, ValidationFieldError},
        },
        infra::database::repository,
    };

    mod validation {
        use super::*;

        pub async fn create_rule(
            pool: &PgPool,
            dto: &CreatePricingRule,
            rule: &PricingRule,
        ) -> Result<(), ApplicationError<CreatePricingRule>> {
            let mut errors = Vec::new();

            if dto.from_km < 0.0 {
                errors.push(ValidationFieldError::new(
                    "base::distance",
                    dto.from_km.to_string(),
                    "/from_km".into(),
                    vec![ValidationErrorKind::Positive],
                ));
            }
            if let Some(to_km) = dto.to_km {
                if to_km <= dto.from_km {
                    errors.push(ValidationFieldError::new(
                        "base::distance",
                        to_km.to_string(),
                        "/to_km".into(),
                        vec![ValidationErrorKind::Minimum(dto.from_km as u64)],
                    ));
                }
            }
            if dto.unit_price <= 0 {
                errors.push(ValidationFieldError::new(
                    "base::money",
                    dto.unit_price.to_string(),
                    "/unit_price".into(),
                    vec![ValidationErrorKind::Positive],
                ));
            }

            if repository::fleet::find_vehicle_type(pool, dto.vehicle_type_id)
                .await?
                .is_none()
            {
                errors.push(ValidationFieldError::new(
                    "base::uuid",
                    dto.vehicle_type_id.to_string(),
                    "/vehicle_type_id".into(),
                    vec![ValidationErrorKind::NotFound],
                ));
            } else {
                let existing =
                    repository::pricing::rules_for_vehicle_type(pool, dto.vehicle_type_id).await?;
                if existing.iter().any(|other| other.overlaps(rule)) {
                    errors.push(ValidationFieldError::new(
                        "base::distance",
                        dto.from_km.to_string(),
                        "/from_km".into(),
                        vec![ValidationErrorKind::Overlapping],
                    ));
                }
            }

            if !errors.is_empty() {
                return Err(ValidationError::from_resource(dto.clone(), errors).into());
            }
            Ok(())
        }
    }

    pub async fn create_rule<TS: TokenEncryptionService>(
        pool: &PgPool,
        token_service: &TS,
        token: &str,
        dto: CreatePricingRule,
    ) -> Result<PricingRuleResponse, ApplicationError<CreatePricingRule>> {
        let payload = authenticate(token_service, token)?;
        require_staff(&payload)?;

        let rule = PricingRule::new(dto.vehicle_type_id, dto.from_km, dto.to_km, dto.unit_price);
        validation::create_rule(pool, &dto, &rule).await?;

        repository::pricing::insert_rule(pool, [&rule]).await?;

        Ok(rule.into())
    }

    pub async fn list_rules(
        pool: &PgPool,
        vehicle_type_id: Uuid,
    ) -> Result<Vec<PricingRuleResponse>, ApplicationError<()>> {
        let rules = repository::pricing::rules_for_vehicle_type(pool, vehicle_type_id).await?;
        Ok(rules.into_iter().map(Into::into).collect())
    }

    pub async fn quote_price<'dto>(
        pool: &PgPool,
        dto: QuoteRequest<'dto>,
    ) -> Result<QuoteResponse, ApplicationError<QuoteRequest<'dto>>> {
        let mut errors = Vec::new();
        if dto.distance_km <= 0.0 {
            errors.push(ValidationFieldError::new(
                "base::distance",
                dto.distance_km.to_string(),
                "/distance_km".into(),
                vec![ValidationErrorKind::Positive],
            ));
        }
        if dto.vehicle_count == 0 {
            errors.push(ValidationFieldError::new(
                "base::quantity",
                dto.vehicle_count.to_string(),
                "/vehicle_count".into(),
                vec![ValidationErrorKind::Minimum(1)],
            ));
        }
        if !errors.is_empty() {
            return Err(ValidationError::from_resource(dto.clone(), errors).into());
        }

        let rules =
            repository::pricing::rules_for_vehicle_type(pool, dto.vehicle_type_id).await?;
        let adjustment = match dto.category {
            Some(category) => Some(
                repository::pricing::find_category_adjustment(pool, category)
                    .await?
                    .ok_or_else(|| {
                        ValidationError::from_resource(
                            dto.clone(),
                            vec![ValidationFieldError::new(
                                "pricing::category",
                                category.into(),
                                "/category".into(),
                                vec![ValidationErrorKind::NotFound],
                            )],
                        )
                    })?,
            ),
            None => None,
        };

        let quote = pricing_domain::quote(
            &rules,
            adjustment.as_ref(),
            dto.distance_km,
            dto.vehicle_count,
        )?;

        Ok(quote.into())
    }
}
