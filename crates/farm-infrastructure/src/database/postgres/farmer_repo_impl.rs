// ============================================================================
// Farm Infrastructure - PostgreSQL Farmer Repository
// File: crates/farm-infrastructure/src/database/postgres/farmer_repo_impl.rs
// ============================================================================

use async_trait::async_trait;
use sqlx::{FromRow, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;
use tracing::{info, error};
use chrono::{DateTime, NaiveDate, Utc};

use farm_core::domain::{Farmer, FarmerFilter, FarmerPatch, NewFarmer, SearchTerm};
use farm_core::error::DomainError;
use farm_core::repositories::FarmerRepository;

const COLUMNS: &str = "id, full_name, cpf, birth_date, phone, active, created_at, updated_at";

pub struct PgFarmerRepository {
    pool: PgPool,
}

impl PgFarmerRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// Internal row type for SQLx mapping
#[derive(Debug, FromRow)]
struct FarmerRow {
    pub id: Uuid,
    pub full_name: String,
    pub cpf: String,
    pub birth_date: Option<NaiveDate>,
    pub phone: Option<String>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<FarmerRow> for Farmer {
    fn from(row: FarmerRow) -> Self {
        Farmer {
            id: row.id,
            full_name: row.full_name,
            cpf: row.cpf,
            birth_date: row.birth_date,
            phone: row.phone,
            active: row.active,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Escapes `LIKE` metacharacters so the term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Unique violations become `ConstraintViolation`, everything else a database error.
fn map_write_error(e: sqlx::Error) -> DomainError {
    match e.as_database_error() {
        Some(db) if db.is_unique_violation() => {
            DomainError::ConstraintViolation(db.constraint().unwrap_or("farmers_cpf_key").to_string())
        }
        _ => DomainError::DatabaseError(e.to_string()),
    }
}

/// Appends the filter's predicates to a query that already has a `WHERE` clause.
fn push_filter(qb: &mut QueryBuilder<'_, Postgres>, filter: &FarmerFilter) {
    if let Some(active) = filter.status.required_active() {
        qb.push(" AND active = ").push_bind(active);
    }
    match &filter.term {
        Some(SearchTerm::Cpf(cpf)) => {
            qb.push(" AND cpf = ").push_bind(cpf.clone());
        }
        Some(SearchTerm::Name(name)) => {
            qb.push(" AND full_name ILIKE ")
                .push_bind(format!("%{}%", escape_like(name)))
                .push(r" ESCAPE '\'");
        }
        None => {}
    }
}

#[async_trait]
impl FarmerRepository for PgFarmerRepository {
    async fn insert(&self, farmer: &NewFarmer) -> Result<Farmer, DomainError> {
        let row: FarmerRow = sqlx::query_as(
            r#"
            INSERT INTO farmers (full_name, cpf, birth_date, phone, active)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING
                id, full_name, cpf, birth_date, phone, active, created_at, updated_at
            "#
        )
        .bind(&farmer.full_name)
        .bind(farmer.cpf.as_str())
        .bind(farmer.birth_date)
        .bind(&farmer.phone)
        .bind(farmer.active)
        .fetch_one(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error creating farmer: {}", e);
            map_write_error(e)
        })?;

        info!("Farmer row inserted: {}", row.id);
        Ok(row.into())
    }

    async fn find_by_id(&self, id: &Uuid) -> Result<Option<Farmer>, DomainError> {
        let row: Option<FarmerRow> = sqlx::query_as(
            r#"
            SELECT
                id, full_name, cpf, birth_date, phone, active, created_at, updated_at
            FROM farmers
            WHERE id = $1
            "#
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding farmer by id: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_by_cpf(&self, cpf: &str) -> Result<Option<Farmer>, DomainError> {
        let row: Option<FarmerRow> = sqlx::query_as(
            r#"
            SELECT
                id, full_name, cpf, birth_date, phone, active, created_at, updated_at
            FROM farmers
            WHERE cpf = $1
            "#
        )
        .bind(cpf)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e: sqlx::Error| {
            error!("Database error finding farmer by cpf: {}", e);
            DomainError::DatabaseError(e.to_string())
        })?;

        Ok(row.map(|r| r.into()))
    }

    async fn find_many(&self, filter: &FarmerFilter) -> Result<Vec<Farmer>, DomainError> {
        let mut qb: QueryBuilder<'_, Postgres> =
            QueryBuilder::new(format!("SELECT {} FROM farmers WHERE TRUE", COLUMNS));
        push_filter(&mut qb, filter);
        qb.push(" ORDER BY full_name ASC, id ASC");

        let rows: Vec<FarmerRow> = qb
            .build_query_as::<FarmerRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error listing farmers: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(rows.into_iter().map(Farmer::from).collect())
    }

    async fn update_by_id(&self, id: &Uuid, patch: &FarmerPatch) -> Result<Option<Farmer>, DomainError> {
        let mut qb: QueryBuilder<'_, Postgres> = QueryBuilder::new("UPDATE farmers SET updated_at = NOW()");
        if let Some(full_name) = &patch.full_name {
            qb.push(", full_name = ").push_bind(full_name.clone());
        }
        if let Some(birth_date) = patch.birth_date {
            qb.push(", birth_date = ").push_bind(birth_date);
        }
        if let Some(phone) = &patch.phone {
            qb.push(", phone = ").push_bind(phone.clone());
        }
        if let Some(active) = patch.active {
            qb.push(", active = ").push_bind(active);
        }
        qb.push(" WHERE id = ").push_bind(*id);
        qb.push(" RETURNING ").push(COLUMNS);

        let row: Option<FarmerRow> = qb
            .build_query_as::<FarmerRow>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error updating farmer: {}", e);
                map_write_error(e)
            })?;

        Ok(row.map(|r| r.into()))
    }

    async fn delete_by_id(&self, id: &Uuid) -> Result<u64, DomainError> {
        let result = sqlx::query("DELETE FROM farmers WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database error deleting farmer: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;

        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e: sqlx::Error| {
                error!("Database ping failed: {}", e);
                DomainError::DatabaseError(e.to_string())
            })?;
        Ok(())
    }
}
