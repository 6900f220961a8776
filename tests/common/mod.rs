#![allow(dead_code)]

use chrono::{Duration, Utc};
use sqlx::{Connection, Executor, PgConnection, PgPool};
use tourbase::configuration::{get_configuration, DatabaseSettings, Settings};
use uuid::Uuid;

pub struct TestApp {
    pub address: String,
    pub db_pool: PgPool,
    pub settings: Settings,
    _storage: tempfile::TempDir,
}

pub async fn spawn_app_with_configuration(mut configuration: Settings) -> Option<TestApp> {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");

    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);
    configuration.database.database_name = Uuid::new_v4().to_string();
    configuration.telegram = None;

    let storage = tempfile::tempdir().expect("Failed to create storage dir");
    configuration.storage.root = storage.path().to_string_lossy().into_owned();

    let connection_pool = match configure_database(&configuration.database).await {
        Ok(pool) => pool,
        Err(err) => {
            eprintln!("Skipping tests: failed to connect to postgres: {}", err);
            return None;
        }
    };

    let server = tourbase::startup::run(listener, connection_pool.clone(), configuration.clone())
        .await
        .expect("Failed to bind address.");

    let _ = tokio::spawn(server);

    Some(TestApp {
        address,
        db_pool: connection_pool,
        settings: configuration,
        _storage: storage,
    })
}

/// Spawns the server for `test`. Without PostgreSQL the test is reported as
/// skipped, unless `TOURBASE_REQUIRE_DB` is set, which turns the skip into a failure.
pub async fn spawn_app(test: &str) -> Option<TestApp> {
    let configuration = get_configuration().expect("Failed to get configuration");
    let app = spawn_app_with_configuration(configuration).await;

    if app.is_none() {
        if std::env::var_os("TOURBASE_REQUIRE_DB").is_some() {
            panic!("{test}: PostgreSQL is required but not reachable");
        }
        eprintln!("SKIPPED {test}: PostgreSQL is not reachable");
    }
    app
}

pub async fn configure_database(config: &DatabaseSettings) -> Result<PgPool, sqlx::Error> {
    let mut connection = PgConnection::connect(&config.connection_string_without_db()).await?;

    connection
        .execute(format!(r#"CREATE DATABASE "{}""#, config.database_name).as_str())
        .await?;

    let connection_pool = PgPool::connect(&config.connection_string()).await?;

    sqlx::migrate!("./migrations").run(&connection_pool).await?;

    Ok(connection_pool)
}

/// A stored user together with a live session.
pub struct Member {
    pub id: Uuid,
    pub token: String,
}

impl TestApp {
    pub fn cookie(&self, member: &Member) -> String {
        format!("{}={}", self.settings.session.cookie_name, member.token)
    }

    pub async fn member(&self, role: &str) -> Member {
        let id = Uuid::new_v4();
        let suffix = &id.simple().to_string()[..8];

        sqlx::query(
            "INSERT INTO app_user (id, username, email, password_hash, role, activated_at) \
             VALUES ($1, $2, $3, 'not-a-hash', $4, NOW())",
        )
        .bind(id)
        .bind(format!("{role}-{suffix}"))
        .bind(format!("{role}-{suffix}@example.com"))
        .bind(role)
        .execute(&self.db_pool)
        .await
        .expect("Failed to insert user");

        let token = format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple());
        sqlx::query("INSERT INTO user_session (id, user_id, expires_at) VALUES ($1, $2, $3)")
            .bind(&token)
            .bind(id)
            .bind(Utc::now() + Duration::hours(1))
            .execute(&self.db_pool)
            .await
            .expect("Failed to insert session");

        Member { id, token }
    }

    pub async fn product(&self, product_type: &str) -> Uuid {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO product (id, name, product_type) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(format!("Product {}", &id.simple().to_string()[..8]))
            .bind(product_type)
            .execute(&self.db_pool)
            .await
            .expect("Failed to insert product");
        id
    }

    pub async fn place(&self, city: &str) -> Uuid {
        let id = Uuid::new_v4();
        sqlx::query("INSERT INTO place (id, name, city) VALUES ($1, $2, $3)")
            .bind(id)
            .bind(format!("Place {}", &id.simple().to_string()[..8]))
            .bind(city)
            .execute(&self.db_pool)
            .await
            .expect("Failed to insert place");
        id
    }

    pub async fn post_form(
        &self,
        path: &str,
        member: Option<&Member>,
        form: &[(&str, &str)],
    ) -> reqwest::Response {
        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .unwrap();

        let mut request = client.post(format!("{}{}", self.address, path)).form(form);
        if let Some(member) = member {
            request = request.header(reqwest::header::COOKIE, self.cookie(member));
        }

        request.send().await.expect("Failed to execute request.")
    }

    pub async fn get(&self, path: &str, member: Option<&Member>) -> reqwest::Response {
        let mut request = reqwest::Client::new().get(format!("{}{}", self.address, path));
        if let Some(member) = member {
            request = request.header(reqwest::header::COOKIE, self.cookie(member));
        }

        request.send().await.expect("Failed to execute request.")
    }
}
