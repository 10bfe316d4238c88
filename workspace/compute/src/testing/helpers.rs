use chrono::{NaiveDate, NaiveDateTime};
use migration::{Migrator, MigratorTrait};
use model::entities::{budget_line, currency_rate, hourly_rate, project, task, time_entry, user};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ConnectionTrait, Database, DatabaseConnection, Set};

/// Create an in-memory SQLite database with the full schema applied.
pub async fn setup_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("Failed to connect to in-memory database");

    db.execute_unprepared("PRAGMA foreign_keys = ON;")
        .await
        .expect("Failed to enable foreign keys");

    Migrator::up(&db, None).await.expect("Migrations failed");

    db
}

pub fn dt(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S").expect("bad test datetime")
}

pub fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("bad test date")
}

pub async fn create_user(db: &DatabaseConnection, username: &str, name: Option<&str>) -> user::Model {
    user::ActiveModel {
        username: Set(username.to_string()),
        name: Set(name.map(str::to_string)),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create user")
}

pub async fn create_project(db: &DatabaseConnection, name: &str) -> project::Model {
    project::ActiveModel {
        name: Set(name.to_string()),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create project")
}

pub async fn create_task(
    db: &DatabaseConnection,
    project_id: i32,
    title: &str,
    created_at: Option<NaiveDateTime>,
) -> task::Model {
    task::ActiveModel {
        project_id: Set(project_id),
        title: Set(title.to_string()),
        created_at: Set(created_at),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create task")
}

pub async fn create_time_entry(
    db: &DatabaseConnection,
    task_id: i32,
    user_id: i32,
    title: &str,
    time_spent: Decimal,
) -> time_entry::Model {
    time_entry::ActiveModel {
        task_id: Set(task_id),
        user_id: Set(user_id),
        title: Set(title.to_string()),
        time_spent: Set(time_spent),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create time entry")
}

pub async fn create_rate(
    db: &DatabaseConnection,
    user_id: i32,
    project_id: i32,
    currency: &str,
    rate: Decimal,
    effective_from: NaiveDateTime,
) -> hourly_rate::Model {
    hourly_rate::ActiveModel {
        user_id: Set(user_id),
        project_id: Set(project_id),
        currency: Set(currency.to_string()),
        rate: Set(rate),
        effective_from: Set(effective_from),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create hourly rate")
}

pub async fn create_credit(
    db: &DatabaseConnection,
    project_id: i32,
    amount: Decimal,
    comment: &str,
    date: NaiveDate,
) -> budget_line::Model {
    budget_line::ActiveModel {
        project_id: Set(project_id),
        amount: Set(amount),
        comment: Set(comment.to_string()),
        date: Set(date),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create budget line")
}

pub async fn create_currency_rate(
    db: &DatabaseConnection,
    currency: &str,
    rate: Decimal,
) -> currency_rate::Model {
    currency_rate::ActiveModel {
        currency: Set(currency.to_string()),
        rate: Set(rate),
        ..Default::default()
    }
    .insert(db)
    .await
    .expect("Failed to create currency rate")
}
