pub mod connection {
    use std::time::Duration;

    use crate::config::env_var;

    pub async fn create_pool() -> sqlx::PgPool {
        let dburl = env_var::get().database_url.clone();
        sqlx::postgres::PgPoolOptions::new()
            .min_connections(1)
            .max_connections(5)
            .acquire_timeout(Duration::from_millis(1000))
            .idle_timeout(Duration::from_millis(1000 * 30))
            .max_lifetime(Duration::from_millis(1000 * 10))
            .connect(&dburl)
            .await
            .expect("Expect to create a database pool with a open connection")
    }
}

pub mod sql {
    use sqlx::{Database, Encode, QueryBuilder, Type};

    pub fn push_list<'args, I, T, DB>(qb: &mut QueryBuilder<'args, DB>, list: I)
    where
        I: IntoIterator<Item = T>,
        T: 'args + Encode<'args, DB> + Send + Type<DB>,
        DB: Database,
    {
        qb.push("(");
        let mut sep = qb.separated(", ");
        for item in list {
            sep.push_bind(item);
        }
        sep.push_unseparated(")");
    }
}

pub mod repository {
    pub mod iam {
        use std::collections::HashSet;

        use futures::TryStreamExt;
        use sqlx::{PgPool, QueryBuilder, Row};
        use uuid::Uuid;

        use crate::{
            domain::entity::{iam::User, Entity},
            error::persistence::PersistenceError,
            infra::database::sql,
        };

        const ACCOUNT_COLUMNS: &str = concat!(
            "id, created, updated, version, username, email, password_hash, ",
            "full_name, phone_number, image_url, role, status",
        );

        pub async fn insert_user<'u, I>(pool: &PgPool, users: I) -> Result<(), PersistenceError>
        where
            I: IntoIterator<Item = &'u User>,
        {
            let mut qb = QueryBuilder::new(format!("INSERT INTO iam.account ({ACCOUNT_COLUMNS}) "));

            qb.push_values(users.into_iter(), |mut qb, user| {
                qb.push_bind(user.ident());
                qb.push_bind(user.created());
                qb.push_bind(user.updated());
                qb.push_bind(user.version() as i32);
                qb.push_bind(user.username());
                qb.push_bind(user.email());
                qb.push_bind(user.password_hash().as_str());
                qb.push_bind(user.full_name());
                qb.push_bind(user.phone_number());
                qb.push_bind(user.image_url().clone().map(|url| url.to_string()));
                qb.push_bind(user.role().as_str());
                qb.push_bind(user.status().as_str());
            });

            qb.build().execute(pool).await?;

            Ok(())
        }

        pub async fn update_user(pool: &PgPool, user: &User) -> Result<(), PersistenceError> {
            sqlx::query(concat!(
                "UPDATE iam.account SET updated = $2, version = $3, full_name = $4, ",
                "phone_number = $5, image_url = $6, status = $7 WHERE id = $1",
            ))
            .bind(user.ident())
            .bind(user.updated())
            .bind(user.version() as i32)
            .bind(user.full_name())
            .bind(user.phone_number())
            .bind(user.image_url().clone().map(|url| url.to_string()))
            .bind(user.status().as_str())
            .execute(pool)
            .await?;

            Ok(())
        }

        pub async fn find_user_by_id(
            pool: &PgPool,
            id: Uuid,
        ) -> Result<Option<User>, PersistenceError> {
            let row =
                sqlx::query(&format!("SELECT {ACCOUNT_COLUMNS} FROM iam.account WHERE id = $1"))
                    .bind(id)
                    .fetch_optional(pool)
                    .await?;

            Ok(row.as_ref().map(User::from))
        }

        pub async fn find_user_by_email(
            pool: &PgPool,
            email: &str,
        ) -> Result<Option<User>, PersistenceError> {
            let row = sqlx::query(&format!(
                "SELECT {ACCOUNT_COLUMNS} FROM iam.account WHERE email = $1"
            ))
            .bind(email)
            .fetch_optional(pool)
            .await?;

            Ok(row.as_ref().map(User::from))
        }

        pub async fn usernames_exist<'u, I>(
            pool: &PgPool,
            usernames: I,
        ) -> Result<HashSet<String>, PersistenceError>
        where
            I: IntoIterator<Item = &'u str>,
        {
            let mut qb = QueryBuilder::new("SELECT username FROM iam.account WHERE username IN ");
            sql::push_list(&mut qb, usernames);

            let mut rows = qb.build().fetch(pool);

            let mut set = HashSet::new();
            while let Some(row) = rows.try_next().await? {
                set.insert(row.get(0));
            }

            Ok(set)
        }

        pub async fn emails_exist<'u, I>(
            pool: &PgPool,
            emails: I,
        ) -> Result<HashSet<String>, PersistenceError>
        where
            I: IntoIterator<Item = &'u str>,
        {
            let mut qb = QueryBuilder::new("SELECT email FROM iam.account WHERE email IN ");
            sql::push_list(&mut qb, emails);

            let mut rows = qb.build().fetch(pool);

            let mut set = HashSet::new();
            while let Some(row) = rows.try_next().await? {
                set.insert(row.get(0));
            }

            Ok(set)
        }
    }

    pub mod fleet {
        use std::collections::HashSet;

        use futures::TryStreamExt;
        use sqlx::{PgPool, QueryBuilder, Row};
        use uuid::Uuid;

        use crate::{
            domain::entity::{
                fleet::{Vehicle, VehicleStatus, VehicleType},
                Entity,
            },
            error::persistence::PersistenceError,
            infra::database::sql,
        };

        const VEHICLE_COLUMNS: &str = concat!(
            "id, created, updated, version, license_plate, model, manufacturer, year, ",
            "status, vehicle_type_id, inspection_expiry, insurance_expiry, ",
            "last_maintenance, next_maintenance",
        );

        pub async fn insert_vehicle_type<'v, I>(
            pool: &PgPool,
            vehicle_types: I,
        ) -> Result<(), PersistenceError>
        where
            I: IntoIterator<Item = &'v VehicleType>,
        {
            let mut qb = QueryBuilder::new(
                "INSERT INTO fleet.vehicle_type (id, created, updated, version, name, load_capacity_kg) "
            );

            qb.push_values(vehicle_types.into_iter(), |mut qb, vehicle_type| {
                qb.push_bind(vehicle_type.ident());
                qb.push_bind(vehicle_type.created());
                qb.push_bind(vehicle_type.updated());
                qb.push_bind(vehicle_type.version() as i32);
                qb.push_bind(vehicle_type.name());
                qb.push_bind(vehicle_type.load_capacity_kg());
            });

            qb.build().execute(pool).await?;

            Ok(())
        }

        pub async fn find_vehicle_type(
            pool: &PgPool,
            id: Uuid,
        ) -> Result<Option<VehicleType>, PersistenceError> {
            let row = sqlx::query(concat!(
                "SELECT id, created, updated, version, name, load_capacity_kg ",
                "FROM fleet.vehicle_type WHERE id = $1",
            ))
            .bind(id)
            .fetch_optional(pool)
            .await?;

            Ok(row.as_ref().map(VehicleType::from))
        }

        pub async fn insert_vehicle<'v, I>(
            pool: &PgPool,
            vehicles: I,
        ) -> Result<(), PersistenceError>
        where
            I: IntoIterator<Item = &'v Vehicle>,
        {
            let mut qb =
                QueryBuilder::new(format!("INSERT INTO fleet.vehicle ({VEHICLE_COLUMNS}) "));

            qb.push_values(vehicles.into_iter(), |mut qb, vehicle| {
                qb.push_bind(vehicle.ident());
                qb.push_bind(vehicle.created());
                qb.push_bind(vehicle.updated());
                qb.push_bind(vehicle.version() as i32);
                qb.push_bind(vehicle.license_plate());
                qb.push_bind(vehicle.model());
                qb.push_bind(vehicle.manufacturer());
                qb.push_bind(vehicle.year());
                qb.push_bind(vehicle.status().as_str());
                qb.push_bind(vehicle.vehicle_type_id());
                qb.push_bind(vehicle.inspection_expiry());
                qb.push_bind(vehicle.insurance_expiry());
                qb.push_bind(vehicle.last_maintenance());
                qb.push_bind(vehicle.next_maintenance());
            });

            qb.build().execute(pool).await?;

            Ok(())
        }

        pub async fn update_vehicle(
            pool: &PgPool,
            vehicle: &Vehicle,
        ) -> Result<(), PersistenceError> {
            sqlx::query(concat!(
                "UPDATE fleet.vehicle SET updated = $2, version = $3, status = $4, ",
                "inspection_expiry = $5, insurance_expiry = $6, last_maintenance = $7, ",
                "next_maintenance = $8 WHERE id = $1",
            ))
            .bind(vehicle.ident())
            .bind(vehicle.updated())
            .bind(vehicle.version() as i32)
            .bind(vehicle.status().as_str())
            .bind(vehicle.inspection_expiry())
            .bind(vehicle.insurance_expiry())
            .bind(vehicle.last_maintenance())
            .bind(vehicle.next_maintenance())
            .execute(pool)
            .await?;

            Ok(())
        }

        pub async fn find_vehicle(
            pool: &PgPool,
            id: Uuid,
        ) -> Result<Option<Vehicle>, PersistenceError> {
            let row =
                sqlx::query(&format!("SELECT {VEHICLE_COLUMNS} FROM fleet.vehicle WHERE id = $1"))
                    .bind(id)
                    .fetch_optional(pool)
                    .await?;

            Ok(row.as_ref().map(Vehicle::from))
        }

        pub async fn list_vehicles(
            pool: &PgPool,
            status: Option<VehicleStatus>,
        ) -> Result<Vec<Vehicle>, PersistenceError> {
            let mut qb =
                QueryBuilder::new(format!("SELECT {VEHICLE_COLUMNS} FROM fleet.vehicle"));
            if let Some(status) = status {
                qb.push(" WHERE status = ");
                qb.push_bind(status.as_str());
            }
            qb.push(" ORDER BY created");

            let mut rows = qb.build().fetch(pool);

            let mut vehicles = Vec::new();
            while let Some(row) = rows.try_next().await? {
                vehicles.push(Vehicle::from(&row));
            }

            Ok(vehicles)
        }

        pub async fn license_plates_exist<'p, I>(
            pool: &PgPool,
            plates: I,
        ) -> Result<HashSet<String>, PersistenceError>
        where
            I: IntoIterator<Item = &'p str>,
        {
            let mut qb = QueryBuilder::new(
                "SELECT license_plate FROM fleet.vehicle WHERE license_plate IN ",
            );
            sql::push_list(&mut qb, plates);

            let mut rows = qb.build().fetch(pool);

            let mut set = HashSet::new();
            while let Some(row) = rows.try_next().await? {
                set.insert(row.get(0));
            }

            Ok(set)
        }
    }

    pub mod order {
        use futures::TryStreamExt;
        use sqlx::{PgPool, QueryBuilder};
        use uuid::Uuid;

        use crate::{
            domain::entity::{order::Order, Entity},
            error::persistence::PersistenceError,
        };

        const ORDER_COLUMNS: &str = concat!(
            "id, created, updated, version, code, receiver_name, receiver_phone, ",
            "package_description, total_quantity, pickup_address, delivery_address, ",
            "sender_id, status, quoted_price",
        );

        pub async fn insert_order<'o, I>(pool: &PgPool, orders: I) -> Result<(), PersistenceError>
        where
            I: IntoIterator<Item = &'o Order>,
        {
            let mut qb =
                QueryBuilder::new(format!("INSERT INTO orders.delivery_order ({ORDER_COLUMNS}) "));

            qb.push_values(orders.into_iter(), |mut qb, order| {
                qb.push_bind(order.ident());
                qb.push_bind(order.created());
                qb.push_bind(order.updated());
                qb.push_bind(order.version() as i32);
                qb.push_bind(order.code());
                qb.push_bind(order.receiver_name());
                qb.push_bind(order.receiver_phone());
                qb.push_bind(order.package_description());
                qb.push_bind(order.total_quantity());
                qb.push_bind(order.pickup_address());
                qb.push_bind(order.delivery_address());
                qb.push_bind(order.sender_id());
                qb.push_bind(order.status().as_str());
                qb.push_bind(order.quoted_price());
            });

            qb.build().execute(pool).await?;

            Ok(())
        }

        pub async fn update_order(pool: &PgPool, order: &Order) -> Result<(), PersistenceError> {
            sqlx::query(concat!(
                "UPDATE orders.delivery_order SET updated = $2, version = $3, status = $4 ",
                "WHERE id = $1",
            ))
            .bind(order.ident())
            .bind(order.updated())
            .bind(order.version() as i32)
            .bind(order.status().as_str())
            .execute(pool)
            .await?;

            Ok(())
        }

        pub async fn find_order(
            pool: &PgPool,
            id: Uuid,
        ) -> Result<Option<Order>, PersistenceError> {
            let row = sqlx::query(&format!(
                "SELECT {ORDER_COLUMNS} FROM orders.delivery_order WHERE id = $1"
            ))
            .bind(id)
            .fetch_optional(pool)
            .await?;

            Ok(row.as_ref().map(Order::from))
        }

        pub async fn list_orders_by_sender(
            pool: &PgPool,
            sender_id: Uuid,
        ) -> Result<Vec<Order>, PersistenceError> {
            let sql = format!(
                "SELECT {ORDER_COLUMNS} FROM orders.delivery_order \
                 WHERE sender_id = $1 ORDER BY created DESC"
            );
            let mut rows = sqlx::query(&sql).bind(sender_id).fetch(pool);

            let mut orders = Vec::new();
            while let Some(row) = rows.try_next().await? {
                orders.push(Order::from(&row));
            }

            Ok(orders)
        }
    }

    pub mod pricing {
        use futures::TryStreamExt;
        use sqlx::{PgPool, QueryBuilder};
        use uuid::Uuid;

        use crate::{
            domain::entity::{
                pricing::{CategoryAdjustment, PricingRule},
                Entity,
            },
            error::persistence::PersistenceError,
        };

        pub async fn insert_rule<'r, I>(pool: &PgPool, rules: I) -> Result<(), PersistenceError>
        where
            I: IntoIterator<Item = &'r PricingRule>,
        {
            let mut qb = QueryBuilder::new(concat!(
                "INSERT INTO pricing.pricing_rule ",
                "(id, created, updated, version, vehicle_type_id, from_km, to_km, unit_price) ",
            ));

            qb.push_values(rules.into_iter(), |mut qb, rule| {
                qb.push_bind(rule.ident());
                qb.push_bind(rule.created());
                qb.push_bind(rule.updated());
                qb.push_bind(rule.version() as i32);
                qb.push_bind(rule.vehicle_type_id());
                qb.push_bind(rule.from_km());
                qb.push_bind(rule.to_km());
                qb.push_bind(rule.unit_price());
            });

            qb.build().execute(pool).await?;

            Ok(())
        }

        /// Tiers of a vehicle type, ordered for the quote tier walk.
        pub async fn rules_for_vehicle_type(
            pool: &PgPool,
            vehicle_type_id: Uuid,
        ) -> Result<Vec<PricingRule>, PersistenceError> {
            let mut rows = sqlx::query(concat!(
                "SELECT id, created, updated, version, vehicle_type_id, from_km, to_km, ",
                "unit_price FROM pricing.pricing_rule WHERE vehicle_type_id = $1 ",
                "ORDER BY from_km",
            ))
            .bind(vehicle_type_id)
            .fetch(pool);

            let mut rules = Vec::new();
            while let Some(row) = rows.try_next().await? {
                rules.push(PricingRule::from(&row));
            }

            Ok(rules)
        }

        pub async fn find_category_adjustment(
            pool: &PgPool,
            category: &str,
        ) -> Result<Option<CategoryAdjustment>, PersistenceError> {
            let row = sqlx::query(concat!(
                "SELECT id, created, updated, version, category, multiplier, extra_fee ",
                "FROM pricing.category_adjustment WHERE category = $1",
            ))
            .bind(category)
            .fetch_optional(pool)
            .await?;

            Ok(row.as_ref().map(CategoryAdjustment::from))
        }
    }
}
