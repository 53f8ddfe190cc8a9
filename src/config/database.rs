use crate::domain::{
    member::entity::member, reservation::entity::reservation,
    reservation_time::entity::reservation_time, theme::entity::theme,
};
use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr, Schema,
    Statement,
};
use tracing::info;

pub async fn establish_connection(
    database_url: &str,
    schema_update: bool,
) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(database_url.to_owned());
    // 인메모리 SQLite는 커넥션마다 별도 DB가 되므로 단일 커넥션으로 고정
    if database_url.contains(":memory:") {
        options.max_connections(1).min_connections(1);
    }
    options.sqlx_logging(false);

    let db = Database::connect(options).await?;
    info!("Successfully connected to the database.");

    if schema_update {
        sync_schema(&db).await?;
    } else {
        info!("Skipping database schema synchronization (DB_SCHEMA_UPDATE is not true).");
    }

    Ok(db)
}

/// 엔티티 정의로부터 테이블과 인덱스를 생성합니다. (이미 있으면 건너뜀)
pub async fn sync_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    info!("Starting database schema synchronization...");

    // Order matters for foreign keys! (Parent first, then Child)

    // 1. Independent Entities
    create_table_if_not_exists(db, &schema, member::Entity).await?;
    create_table_if_not_exists(db, &schema, theme::Entity).await?;
    create_table_if_not_exists(db, &schema, reservation_time::Entity).await?;

    // 2. Dependent Entities
    create_table_if_not_exists(db, &schema, reservation::Entity).await?;

    create_unique_index_if_not_exists(db, "uq_member_email", "member", &["email"]).await?;
    create_unique_index_if_not_exists(
        db,
        "uq_reservation_time_start_at",
        "reservation_time",
        &["start_at"],
    )
    .await?;
    // 같은 날짜/시간/테마의 중복 예약 방지
    create_unique_index_if_not_exists(
        db,
        "uq_reservation_slot",
        "reservation",
        &["date", "time_id", "theme_id"],
    )
    .await?;
    // 인기 테마 집계와 내 예약 조회용 인덱스
    create_index_if_not_exists(db, "idx_reservation_date_theme", "reservation", &["date", "theme_id"])
        .await?;
    create_index_if_not_exists(db, "idx_reservation_member", "reservation", &["member_id"]).await?;

    info!("Database schema synchronization completed.");
    Ok(())
}

/// 인덱스가 이미 존재해서 실패한 경우만 true
///
/// MySQL은 `Duplicate key name`, SQLite/Postgres는 `already exists`로 응답합니다.
/// 기존 행이 유니크 조건을 어겨 실패한 경우(`Duplicate entry`)는 포함하지 않습니다.
fn is_already_exists(e: &DbErr) -> bool {
    let err_str = e.to_string().to_lowercase();
    err_str.contains("duplicate key name") || err_str.contains("already exists")
}

async fn create_index_if_not_exists(
    db: &DatabaseConnection,
    index_name: &str,
    table_name: &str,
    columns: &[&str],
) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let cols = columns.join(", ");
    let sql = format!("CREATE INDEX {} ON {} ({})", index_name, table_name, cols);
    let stmt = Statement::from_string(backend, sql);
    match db.execute(stmt).await {
        Ok(_) => Ok(()),
        Err(e) if is_already_exists(&e) => Ok(()),
        Err(e) => {
            tracing::error!("Failed to create index {}: {}", index_name, e);
            Err(e)
        }
    }
}

async fn create_unique_index_if_not_exists(
    db: &DatabaseConnection,
    index_name: &str,
    table_name: &str,
    columns: &[&str],
) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let cols = columns.join(", ");
    let sql = format!(
        "CREATE UNIQUE INDEX {} ON {} ({})",
        index_name, table_name, cols
    );
    let stmt = Statement::from_string(backend, sql);
    match db.execute(stmt).await {
        Ok(_) => Ok(()),
        Err(e) if is_already_exists(&e) => Ok(()),
        Err(e) => {
            tracing::error!("Failed to create unique index {}: {}", index_name, e);
            Err(e)
        }
    }
}

async fn create_table_if_not_exists<E>(
    db: &DatabaseConnection,
    schema: &Schema,
    entity: E,
) -> Result<(), DbErr>
where
    E: sea_orm::EntityTrait,
{
    let table_name = entity.table_name().to_owned();
    let backend = db.get_database_backend();
    let create_stmt: Statement =
        backend.build(schema.create_table_from_entity(entity).if_not_exists());

    db.execute(create_stmt).await.map(|_| ()).map_err(|e| {
        tracing::error!("Failed to create table {}: {}", table_name, e);
        e
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_tolerate_existing_index_errors() {
        let mysql = DbErr::Custom("Duplicate key name 'uq_reservation_slot'".to_string());
        let sqlite = DbErr::Custom("index uq_reservation_slot already exists".to_string());

        assert!(is_already_exists(&mysql));
        assert!(is_already_exists(&sqlite));
    }

    #[test]
    fn should_not_tolerate_duplicate_rows_when_creating_unique_index() {
        let err = DbErr::Custom(
            "Duplicate entry '2026-10-20-1-1' for key 'uq_reservation_slot'".to_string(),
        );

        assert!(!is_already_exists(&err));
    }
}
