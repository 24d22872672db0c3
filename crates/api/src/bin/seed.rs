//! Idempotent canonical-data seeder.
//!
//! Inserts the four founding houses and the initial subject catalogue,
//! skipping rows whose names already exist. Safe to run repeatedly.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

const HOUSES: &[(&str, &str, &str)] = &[
    ("Grifinória", "Leão", "Godric Gryffindor"),
    ("Sonserina", "Serpente", "Salazar Slytherin"),
    ("Lufa-Lufa", "Texugo", "Helga Hufflepuff"),
    ("Corvinal", "Águia", "Rowena Ravenclaw"),
];

const SUBJECTS: &[&str] = &[
    "Poções",
    "Herbologia",
    "Defesa Contra as Artes das Trevas",
    "Transfiguração",
    "Feitiços",
];

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "seed=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = hogwarts_db::create_pool(&database_url)
        .await
        .expect("Failed to connect to database");

    hogwarts_db::run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    for (name, mascot, founder) in HOUSES {
        let result = sqlx::query(
            "INSERT INTO houses (name, mascot, founder) VALUES ($1, $2, $3)
             ON CONFLICT (name) DO NOTHING",
        )
        .bind(name)
        .bind(mascot)
        .bind(founder)
        .execute(&pool)
        .await
        .expect("Failed to seed house");
        if result.rows_affected() > 0 {
            tracing::info!(name = %name, "Seeded house");
        }
    }

    for name in SUBJECTS {
        let result = sqlx::query(
            "INSERT INTO subjects (name) VALUES ($1) ON CONFLICT (name) DO NOTHING",
        )
        .bind(name)
        .execute(&pool)
        .await
        .expect("Failed to seed subject");
        if result.rows_affected() > 0 {
            tracing::info!(name = %name, "Seeded subject");
        }
    }

    tracing::info!("Seed complete");
}
