use async_trait::async_trait;
use bigdecimal::BigDecimal;
use num_traits::FromPrimitive;
use sqlx::PgPool;

use business::domain::errors::RepositoryError;
use business::domain::shared::plate::PlateNumber;
use business::domain::toll::model::TollRecord;
use business::domain::toll::repository::TollRepository;

use super::entity::TollEntity;

pub struct TollRepositoryPostgres {
    pool: PgPool,
}

impl TollRepositoryPostgres {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn database_error(operation: &str, err: sqlx::Error) -> RepositoryError {
    tracing::error!("tolls {} failed: {}", operation, err);
    RepositoryError::DatabaseError
}

#[async_trait]
impl TollRepository for TollRepositoryPostgres {
    async fn put(&self, record: &TollRecord) -> Result<(), RepositoryError> {
        let cost = BigDecimal::from_f64(record.cost)
            .map(|c| c.round(2))
            .ok_or_else(|| {
                tracing::error!("toll {} has a non-finite cost", record.id);
                RepositoryError::DatabaseError
            })?;

        // payment_id is never touched by the conflict update.
        sqlx::query(
            r#"INSERT INTO tolls (plate_number, id, toll_booth_id, crossed_at, cost, image_bucket, image_key)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (plate_number, id) DO UPDATE SET
                toll_booth_id = EXCLUDED.toll_booth_id,
                crossed_at = EXCLUDED.crossed_at,
                cost = EXCLUDED.cost,
                image_bucket = EXCLUDED.image_bucket,
                image_key = EXCLUDED.image_key"#,
        )
        .bind(record.plate_number.as_str())
        .bind(&record.id)
        .bind(&record.toll_booth_id)
        .bind(record.timestamp)
        .bind(cost)
        .bind(&record.image.bucket)
        .bind(&record.image.key)
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("put", e))?;

        Ok(())
    }

    async fn query_by_plate(&self, plate: &PlateNumber) -> Result<Vec<TollRecord>, RepositoryError> {
        let entities = sqlx::query_as::<_, TollEntity>(
            "SELECT plate_number, id, toll_booth_id, crossed_at, cost, image_bucket, image_key, payment_id FROM tolls WHERE plate_number = $1",
        )
        .bind(plate.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| database_error("query_by_plate", e))?;

        Ok(entities.into_iter().map(|e| e.into_domain()).collect())
    }

    async fn attach_payment(
        &self,
        plate: &PlateNumber,
        toll_record_id: &str,
        payment_id: &str,
    ) -> Result<(), RepositoryError> {
        let result = sqlx::query(
            "UPDATE tolls SET payment_id = $3 WHERE plate_number = $1 AND id = $2 AND payment_id IS NULL",
        )
        .bind(plate.as_str())
        .bind(toll_record_id)
        .bind(payment_id)
        .execute(&self.pool)
        .await
        .map_err(|e| database_error("attach_payment", e))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::PreconditionFailed);
        }

        Ok(())
    }
}
