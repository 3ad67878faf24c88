//! Test utilities with lazy testcontainers support
//!
//! Containers are started lazily on first use and shared across tests.

#[cfg(test)]
pub mod containers {
    use std::sync::OnceLock;

    use testcontainers::{ContainerAsync, runners::AsyncRunner};
    use testcontainers_modules::{postgres::Postgres, redis::Redis};

    static POSTGRES: OnceLock<ContainerAsync<Postgres>> = OnceLock::new();
    static REDIS: OnceLock<ContainerAsync<Redis>> = OnceLock::new();

    /// Get or start a PostgreSQL container (lazy initialization)
    pub async fn get_postgres() -> &'static ContainerAsync<Postgres> {
        if POSTGRES.get().is_none() {
            let container = Postgres::default()
                .with_user("quizdeck")
                .with_password("quizdeck_test")
                .with_db_name("quizdeck_test")
                .start()
                .await
                .expect("Failed to start PostgreSQL container");

            let _ = POSTGRES.set(container);
        }
        POSTGRES.get().unwrap()
    }

    /// Get or start a Redis container (lazy initialization)
    pub async fn get_redis() -> &'static ContainerAsync<Redis> {
        if REDIS.get().is_none() {
            let container = Redis::default()
                .start()
                .await
                .expect("Failed to start Redis container");

            let _ = REDIS.set(container);
        }
        REDIS.get().unwrap()
    }

    /// Get PostgreSQL connection URL from the container
    pub async fn postgres_url() -> String {
        let container = get_postgres().await;
        let host = container.get_host().await.unwrap();
        let port = container.get_host_port_ipv4(5432).await.unwrap();
        format!(
            "postgres://quizdeck:quizdeck_test@{}:{}/quizdeck_test",
            host, port
        )
    }

    /// Get Redis connection URL from the container
    pub async fn redis_url() -> String {
        let container = get_redis().await;
        let host = container.get_host().await.unwrap();
        let port = container.get_host_port_ipv4(6379).await.unwrap();
        format!("redis://{}:{}", host, port)
    }
}

#[cfg(test)]
pub mod fixtures {
    use std::sync::atomic::{AtomicU32, Ordering};

    use redis::aio::ConnectionManager;
    use sqlx::PgPool;

    use super::containers;
    use crate::db::repositories::{CourseRepository, ExamRepository, QuestionRepository};

    static SEQ: AtomicU32 = AtomicU32::new(0);

    /// Process-unique suffix so concurrent tests seed disjoint rows
    pub fn unique_tag() -> u32 {
        SEQ.fetch_add(1, Ordering::Relaxed)
    }

    /// Migrated pool against the shared PostgreSQL container
    pub async fn test_pool() -> PgPool {
        let database_url = containers::postgres_url().await;
        let pool = PgPool::connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }

    /// Managed connection against the shared Redis container
    pub async fn test_redis() -> ConnectionManager {
        let redis_url = containers::redis_url().await;
        let client = redis::Client::open(redis_url).expect("Failed to open test Redis client");
        ConnectionManager::new(client)
            .await
            .expect("Failed to connect to test Redis")
    }

    /// Insert a registered user and return its id
    pub async fn seed_user(pool: &PgPool) -> i32 {
        sqlx::query_scalar(
            "INSERT INTO users (username, registered) VALUES ($1, TRUE) RETURNING id",
        )
        .bind(format!("learner-{}", unique_tag()))
        .fetch_one(pool)
        .await
        .expect("Failed to seed user")
    }

    /// Seed a course with one boolean-type question under one exam
    ///
    /// Returns (course_id, exam_id, question_id).
    pub async fn seed_question(pool: &PgPool, code: &str) -> (i32, i32, i32) {
        let course = CourseRepository::create(pool, code, "Seeded Course")
            .await
            .expect("Failed to seed course");
        let exam = ExamRepository::create(pool, "Seeded Exam", course.id, false, false)
            .await
            .expect("Failed to seed exam");
        let question = QuestionRepository::create(
            pool,
            "boolean",
            "Seeded question?",
            None,
            None,
            exam.id,
            Some(true),
        )
        .await
        .expect("Failed to seed question");

        (course.id, exam.id, question.id)
    }
}
