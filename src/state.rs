use std::sync::{Arc, Mutex};

use anyhow::Context;
use rand::{rngs::StdRng, SeedableRng};
use sqlx::postgres::PgPoolOptions;

use crate::auth::repo::{PgUserStore, UserStore};
use crate::config::AppConfig;
use crate::exercises::repo::{ExerciseCatalog, PgExerciseCatalog};
use crate::gateway::{HttpGateway, ReqwestGateway};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub gateway: Arc<dyn HttpGateway>,
    pub users: Arc<dyn UserStore>,
    pub exercises: Arc<dyn ExerciseCatalog>,
    /// Source of randomness for the diet backfill.
    pub rng: Arc<Mutex<StdRng>>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        // Run migrations if present
        if let Err(e) = sqlx::migrate!("./migrations").run(&db).await {
            tracing::warn!(error = %e, "migration failed; continuing");
        }

        let gateway = Arc::new(ReqwestGateway::new(&config.http)?) as Arc<dyn HttpGateway>;
        let users = Arc::new(PgUserStore::new(db.clone())) as Arc<dyn UserStore>;
        let exercises = Arc::new(PgExerciseCatalog::new(db)) as Arc<dyn ExerciseCatalog>;

        Ok(Self::from_parts(config, gateway, users, exercises))
    }

    pub fn from_parts(
        config: Arc<AppConfig>,
        gateway: Arc<dyn HttpGateway>,
        users: Arc<dyn UserStore>,
        exercises: Arc<dyn ExerciseCatalog>,
    ) -> Self {
        let rng = match config.backfill_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            config,
            gateway,
            users,
            exercises,
            rng: Arc::new(Mutex::new(rng)),
        }
    }
}
