//! Repository for the `applications` table.

use appvet_core::types::DbId;
use sqlx::PgPool;

use crate::models::application::{
    Application, ApplicationFilter, CreateApplication, TransitionOutcome, UpdateApplicationFields,
};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "\
    id, title, description, technical_desc, project_type, duration_days, \
    cost, document_link, status, risk_score, review_note, submitter_id, \
    created_at, updated_at";

/// Provides CRUD and transition operations for applications.
pub struct ApplicationRepo;

impl ApplicationRepo {
    /// Insert a new application, returning the created row.
    ///
    /// Status always starts as PENDING (column default); the risk score is
    /// computed by the caller before insert.
    pub async fn create(
        pool: &PgPool,
        input: &CreateApplication,
    ) -> Result<Application, sqlx::Error> {
        let query = format!(
            "INSERT INTO applications
                (title, description, technical_desc, project_type, duration_days,
                 cost, document_link, risk_score, submitter_id)
             VALUES ($1, $2, $3, $4, $5, $6, NULLIF($7, ''), $8, $9)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.technical_desc)
            .bind(&input.project_type)
            .bind(input.duration_days)
            .bind(input.cost)
            .bind(input.document_link.as_deref().unwrap_or(""))
            .bind(input.risk_score)
            .bind(input.submitter_id)
            .fetch_one(pool)
            .await
    }

    /// Find an application by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Application>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM applications WHERE id = $1");
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List applications matching the filter, most recently created first.
    pub async fn list(
        pool: &PgPool,
        filter: &ApplicationFilter,
    ) -> Result<Vec<Application>, sqlx::Error> {
        let (where_clause, bind_values) = build_filter(filter);
        let query = format!(
            "SELECT {COLUMNS} FROM applications {where_clause} ORDER BY created_at DESC"
        );

        let mut q = sqlx::query_as::<_, Application>(&query);
        for val in &bind_values {
            q = match val {
                BindValue::BigInt(v) => q.bind(*v),
                BindValue::Int(v) => q.bind(*v),
                BindValue::Text(v) => q.bind(v.as_str()),
            };
        }
        q.fetch_all(pool).await
    }

    /// Update content fields. Only non-`None` fields in `input` are applied.
    ///
    /// An empty `document_link` clears the stored link (NULLIF folds the
    /// empty-string sentinel back to NULL). Returns `None` if no row with
    /// the given `id` exists.
    pub async fn update_fields(
        pool: &PgPool,
        id: DbId,
        input: &UpdateApplicationFields,
    ) -> Result<Option<Application>, sqlx::Error> {
        let query = format!(
            "UPDATE applications SET
                title = COALESCE($2, title),
                description = COALESCE($3, description),
                technical_desc = COALESCE($4, technical_desc),
                project_type = COALESCE($5, project_type),
                duration_days = COALESCE($6, duration_days),
                cost = COALESCE($7, cost),
                document_link = NULLIF(COALESCE($8, document_link), ''),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.technical_desc)
            .bind(&input.project_type)
            .bind(input.duration_days)
            .bind(input.cost)
            .bind(&input.document_link)
            .fetch_optional(pool)
            .await
    }

    /// Transition an application's status, optionally replacing the review
    /// note, and return the prior status/note alongside the updated row.
    ///
    /// The prior values are read inside the same statement under a row lock
    /// (`FOR UPDATE`), so concurrent transitions serialize per application
    /// and the audit entry written from the outcome always reflects the
    /// status the row actually held at commit time.
    pub async fn transition_status(
        pool: &PgPool,
        id: DbId,
        new_status: &str,
        review_note: Option<&str>,
    ) -> Result<Option<TransitionOutcome>, sqlx::Error> {
        let query = format!(
            "WITH prev AS (
                SELECT id, status, review_note FROM applications WHERE id = $1 FOR UPDATE
             )
             UPDATE applications a SET
                status = $2,
                review_note = COALESCE($3, a.review_note),
                updated_at = NOW()
             FROM prev
             WHERE a.id = prev.id
             RETURNING {qualified},
                prev.status AS prev_status,
                prev.review_note AS prev_review_note",
            qualified = qualified_columns("a")
        );
        sqlx::query_as::<_, TransitionOutcome>(&query)
            .bind(id)
            .bind(new_status)
            .bind(review_note)
            .fetch_optional(pool)
            .await
    }

    /// Overwrite the stored risk score. Returns `None` if no row exists.
    pub async fn update_risk_score(
        pool: &PgPool,
        id: DbId,
        risk_score: i32,
    ) -> Result<Option<Application>, sqlx::Error> {
        let query = format!(
            "UPDATE applications SET risk_score = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Application>(&query)
            .bind(id)
            .bind(risk_score)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete an application. Audit entries cascade with the
    /// row. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM applications WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// Internal helpers for dynamic query building
// ---------------------------------------------------------------------------

/// Typed bind value for dynamically-built application queries.
enum BindValue {
    BigInt(i64),
    Int(i32),
    Text(String),
}

/// Build a WHERE clause and bind values from the list filter.
///
/// The clause is empty if no filters are active, or starts with `WHERE `.
fn build_filter(filter: &ApplicationFilter) -> (String, Vec<BindValue>) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    if let Some(submitter_id) = filter.submitter_id {
        conditions.push(format!("submitter_id = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::BigInt(submitter_id));
    }

    if let Some(ref status) = filter.status {
        conditions.push(format!("status = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(status.clone()));
    }

    if let Some(ref project_type) = filter.project_type {
        conditions.push(format!("project_type = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(project_type.clone()));
    }

    if let Some(min_score) = filter.min_score {
        conditions.push(format!("risk_score >= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Int(min_score));
    }

    if let Some(max_score) = filter.max_score {
        conditions.push(format!("risk_score <= ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Int(max_score));
    }

    if let Some(ref search) = filter.search {
        conditions.push(format!(
            "(title ILIKE ${bind_idx} OR description ILIKE ${bind_idx} \
             OR technical_desc ILIKE ${bind_idx})"
        ));
        bind_idx += 1;
        bind_values.push(BindValue::Text(format!("%{search}%")));
    }

    let _ = bind_idx;

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values)
}

/// The shared column list with every column qualified by a table alias,
/// for queries that join against a CTE.
fn qualified_columns(alias: &str) -> String {
    COLUMNS
        .split(", ")
        .map(|c| format!("{alias}.{c}"))
        .collect::<Vec<_>>()
        .join(", ")
}
