use async_trait::async_trait;
use sqlx::PgPool;

use super::dto::{Exercise, ExerciseFilter};

#[async_trait]
pub trait ExerciseCatalog: Send + Sync {
    /// Entries with the exact difficulty whose type and muscle are in the
    /// filter's sets, in catalog order.
    async fn find(&self, filter: &ExerciseFilter) -> anyhow::Result<Vec<Exercise>>;

    /// Insert an entry; `false` when an identical entry already exists.
    async fn insert(&self, exercise: &Exercise) -> anyhow::Result<bool>;
}

#[derive(Clone)]
pub struct PgExerciseCatalog {
    db: PgPool,
}

impl PgExerciseCatalog {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ExerciseCatalog for PgExerciseCatalog {
    async fn find(&self, filter: &ExerciseFilter) -> anyhow::Result<Vec<Exercise>> {
        let rows = sqlx::query_as::<_, Exercise>(
            r#"
            SELECT name, "type", muscle, equipment, difficulty, instructions
            FROM exercises
            WHERE difficulty = $1
              AND "type" = ANY($2)
              AND muscle = ANY($3)
            ORDER BY id
            "#,
        )
        .bind(&filter.difficulty)
        .bind(filter.types.as_slice())
        .bind(filter.muscles.as_slice())
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn insert(&self, exercise: &Exercise) -> anyhow::Result<bool> {
        let res = sqlx::query(
            r#"
            INSERT INTO exercises (name, "type", muscle, equipment, difficulty, instructions)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (name, "type", muscle, equipment, difficulty) DO NOTHING
            "#,
        )
        .bind(&exercise.name)
        .bind(&exercise.kind)
        .bind(&exercise.muscle)
        .bind(&exercise.equipment)
        .bind(&exercise.difficulty)
        .bind(&exercise.instructions)
        .execute(&self.db)
        .await?;
        Ok(res.rows_affected() == 1)
    }
}
