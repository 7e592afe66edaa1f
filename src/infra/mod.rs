pub mod controller;
pub mod database;
pub mod migration;
pub mod service;

pub mod router {
    use std::sync::Arc;

    use salvo::{logging::Logger, routing::PathFilter, Router};
    use sqlx::PgPool;

    use super::{
        controller::*,
        service::security::{Argon2HashService, JwtEncryptionService},
    };

    pub fn app(
        pool: &PgPool,
        hash_service: Arc<Argon2HashService>,
        token_service: Arc<JwtEncryptionService>,
    ) -> Router {
        PathFilter::register_wisp_regex(
            "uuid",
            regex::Regex::new(
                "^[0-9a-fA-F]{8}-[0-9a-fA-F]{4}-4[0-9a-fA-F]{3}-[89abAB][0-9a-fA-F]{3}-[0-9a-fA-F]{12}$",
            )
            .expect("Expect a valid uuid v4 regex"),
        );

        Router::new()
            .push(
                Router::with_path("api")
                    .push(
                        Router::with_path("users")
                            .post(CreateUserController::new(pool.clone(), hash_service.clone()))
                            .push(
                                Router::with_path("<id:uuid>")
                                    .get(GetUserController::new(
                                        pool.clone(),
                                        token_service.clone(),
                                    ))
                                    .put(UpdateUserController::new(
                                        pool.clone(),
                                        token_service.clone(),
                                    ))
                                    .push(Router::with_path("status").put(
                                        UpdateUserStatusController::new(
                                            pool.clone(),
                                            token_service.clone(),
                                        ),
                                    )),
                            ),
                    )
                    .push(Router::with_path("auth").post(AuthenticateUserController::new(
                        pool.clone(),
                        hash_service,
                        token_service.clone(),
                    )))
                    .push(
                        Router::with_path("vehicle-types").post(CreateVehicleTypeController::new(
                            pool.clone(),
                            token_service.clone(),
                        )),
                    )
                    .push(
                        Router::with_path("vehicles")
                            .post(RegisterVehicleController::new(
                                pool.clone(),
                                token_service.clone(),
                            ))
                            .get(ListVehiclesController::new(pool.clone()))
                            .push(
                                Router::with_path("<id:uuid>")
                                    .get(GetVehicleController::new(pool.clone()))
                                    .push(Router::with_path("status").put(
                                        UpdateVehicleStatusController::new(
                                            pool.clone(),
                                            token_service.clone(),
                                        ),
                                    ))
                                    .push(Router::with_path("maintenance").post(
                                        RecordMaintenanceController::new(
                                            pool.clone(),
                                            token_service.clone(),
                                        ),
                                    )),
                            ),
                    )
                    .push(
                        Router::with_path("orders")
                            .post(PlaceOrderController::new(
                                pool.clone(),
                                token_service.clone(),
                            ))
                            .get(ListOrdersController::new(
                                pool.clone(),
                                token_service.clone(),
                            ))
                            .push(
                                Router::with_path("<id:uuid>")
                                    .get(GetOrderController::new(pool.clone()))
                                    .push(Router::with_path("status").put(
                                        ChangeOrderStatusController::new(
                                            pool.clone(),
                                            token_service.clone(),
                                        ),
                                    ))
                                    .push(Router::with_path("cancel").post(
                                        CancelOrderController::new(
                                            pool.clone(),
                                            token_service.clone(),
                                        ),
                                    )),
                            ),
                    )
                    .push(
                        Router::with_path("pricing")
                            .push(
                                Router::with_path("rules")
                                    .post(CreatePricingRuleController::new(
                                        pool.clone(),
                                        token_service,
                                    ))
                                    .push(Router::with_path("<id:uuid>").get(
                                        ListPricingRulesController::new(pool.clone()),
                                    )),
                            )
                            .push(
                                Router::with_path("quote")
                                    .post(QuotePriceController::new(pool.clone())),
                            ),
                    ),
            )
            .hoop(Logger)
    }
}
