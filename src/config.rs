pub mod env_var {
    use lazy_static::lazy_static;

    lazy_static! {
        static ref ENV_VAR: EnvVar = load_env();
    }

    #[derive(Debug, Clone)]
    pub struct EnvVar {
        pub port: u16,
        pub token_key: String,
        pub database_host: String,
        pub database_port: u16,
        pub database_name: String,
        pub database_user: String,
        pub database_password: String,
        pub database_url: String,
        /// Database applied by the `testMigration` activity.
        pub test_database_name: String,
        /// Database the `generateDiff` activity compares the target against.
        pub reference_database_name: String,
        /// Root directory resolved against changelog file paths.
        pub changelog_search_path: String,
    }

    macro_rules! get_env {
        ($env:literal) => {
            std::env::var($env).expect(concat!("Missing env var ", $env))
        };
        ($env:literal, $default:expr) => {
            std::env::var($env).unwrap_or_else(|_| $default)
        };
    }

    fn load_env() -> EnvVar {
        let port: u16 = get_env!("PORT").parse().expect("Invalid PORT");
        let token_key = get_env!("TOKEN_KEY");
        let database_host = get_env!("DATABASE_HOST");
        let database_name = get_env!("DATABASE_NAME");
        let database_user = get_env!("DATABASE_USER");
        let database_password = get_env!("DATABASE_PASSWORD");
        let database_port: u16 = get_env!("DATABASE_PORT")
            .parse()
            .expect("Invalid DATABASE_PORT");

        let test_database_name =
            get_env!("TEST_DATABASE_NAME", format!("{database_name}_test"));
        let reference_database_name = get_env!(
            "REFERENCE_DATABASE_NAME",
            format!("{database_name}_reference")
        );
        let changelog_search_path = get_env!("CHANGELOG_SEARCH_PATH", "resources".into());

        let database_url = format!("postgres://{database_user}:{database_password}@{database_host}:{database_port}/{database_name}");

        EnvVar {
            port,
            token_key,
            database_host,
            database_name,
            database_password,
            database_port,
            database_user,
            database_url,
            test_database_name,
            reference_database_name,
            changelog_search_path,
        }
    }

    pub fn get() -> &'static EnvVar {
        &ENV_VAR
    }

    impl EnvVar {
        pub fn database_url_for(&self, database: &str) -> String {
            format!(
                "postgres://{}:{}@{}:{}/{database}",
                self.database_user, self.database_password, self.database_host, self.database_port
            )
        }
    }
}
