use chrono::{TimeZone, Utc};
use comparator::configuration::{
    ComparisonSettings, DatabaseSettings, IngestionSettings, Settings, VkSettings,
};
use comparator::models::Build;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

pub struct TestApp {
    pub address: String,
    pub db_pool: SqlitePool,
    // tempdir removes the database file on drop
    _db_dir: tempfile::TempDir,
}

pub fn test_settings(db_path: &str) -> Settings {
    Settings {
        app_host: "127.0.0.1".to_string(),
        app_port: 0,
        allowed_origins: "*".to_string(),
        database: DatabaseSettings {
            path: db_path.to_string(),
        },
        comparison: ComparisonSettings {
            price_range: 50_000,
            result_limit: 20,
        },
        ingestion: IngestionSettings {
            min_price: 40_000,
            item_limit: 1_000,
        },
        vk: VkSettings::default(),
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(|_| {}).await
}

// we have to run the server in another task
pub async fn spawn_app_with(tweak: impl FnOnce(&mut Settings)) -> TestApp {
    let db_dir = tempfile::tempdir().expect("Failed to create temp dir");
    let db_path = db_dir.path().join("catalog.db");
    let db_path = db_path.to_str().expect("non-utf8 temp path");

    let mut configuration = test_settings(db_path);
    tweak(&mut configuration);

    let connection_pool = configure_database(db_path).await;

    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let server = comparator::startup::run(listener, connection_pool.clone(), configuration)
        .await
        .expect("Failed to bind address.");
    let _ = tokio::spawn(server);
    println!("Used Port: {}", port);

    TestApp {
        address,
        db_pool: connection_pool,
        _db_dir: db_dir,
    }
}

pub async fn configure_database(db_path: &str) -> SqlitePool {
    let connect_options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true);

    let connection_pool = SqlitePoolOptions::new()
        .connect_with(connect_options)
        .await
        .expect("Failed to connect to database pool");

    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate database");

    connection_pool
}

pub fn sample_build(id: &str, price: i64) -> Build {
    Build {
        id: id.to_string(),
        company: "PC Shop".to_string(),
        title: format!("Build {}", id),
        description: "Игровой ПК".to_string(),
        price,
        price_formatted: String::new(),
        cpu: "I5-12400F".to_string(),
        gpu: "RTX 3060".to_string(),
        ram: "16".to_string(),
        case_color: None,
        photo_url: None,
        vk_url: format!("https://vk.com/market-1?w=product-{}", id),
        is_our_build: false,
        parsed_at: Utc.with_ymd_and_hms(2024, 1, 15, 12, 0, 0).unwrap(),
        price_comparison: None,
    }
}

pub async fn seed(pool: &SqlitePool, builds: &[Build]) {
    for build in builds {
        comparator::db::build::upsert(pool, build)
            .await
            .expect("Failed to seed build");
    }
}
