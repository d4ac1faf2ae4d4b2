//! PostgreSQL implementation of LlmConfigRepository

use async_trait::async_trait;
use sqlx::PgPool;

use voxrelay::{DomainError, LlmConfig, LlmConfigRepository, Provider};

pub struct PgLlmConfigRepository {
    pool: PgPool,
}

impl PgLlmConfigRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LlmConfigRow {
    id: String,
    provider: String,
    api_key: String,
    model_name: String,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl TryFrom<LlmConfigRow> for LlmConfig {
    type Error = DomainError;

    fn try_from(row: LlmConfigRow) -> Result<Self, Self::Error> {
        let provider: Provider = row.provider.parse().map_err(DomainError::Repository)?;
        Ok(Self {
            id: row.id,
            provider,
            api_key: row.api_key,
            model_name: row.model_name,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl LlmConfigRepository for PgLlmConfigRepository {
    async fn find_all(&self) -> Result<Vec<LlmConfig>, DomainError> {
        let rows = sqlx::query_as::<_, LlmConfigRow>(
            "SELECT * FROM llm_configs ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    async fn insert(&self, config: &LlmConfig) -> Result<LlmConfig, DomainError> {
        let row = sqlx::query_as::<_, LlmConfigRow>(
            r#"
            INSERT INTO llm_configs (id, provider, api_key, model_name, created_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&config.id)
        .bind(config.provider.to_string())
        .bind(&config.api_key)
        .bind(&config.model_name)
        .bind(config.created_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::Repository(e.to_string()))?;

        row.try_into()
    }

    async fn delete(&self, id: &str) -> Result<bool, DomainError> {
        let result = sqlx::query("DELETE FROM llm_configs WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::Repository(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
