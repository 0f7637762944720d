mod attribute;
mod change;
mod error;
#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;
mod normalize;
mod prices;
mod search;

pub use attribute::Attribute;
pub use change::{fractional_change, rank_changes};
pub use error::DbError;
pub use normalize::normalize;
pub use prices::parse_date;

use std::path::Path;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::{debug, info};

pub(crate) const PRICE_TABLE: &str = "fondata";
pub(crate) const TITLE_TABLE: &str = "fontitle";

/// Read handle onto the fund store.
///
/// A handle owns a single connection and is meant to be used by one logical
/// request at a time. It is released when dropped; [`FonDb::close`] does the
/// same but surfaces errors from the driver.
#[derive(Debug)]
pub struct FonDb {
    db: DatabaseConnection,
}

impl FonDb {
    /// Opens the sqlite store at `path` in read only mode.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, DbError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(DbError::MissingStore(path.display().to_string()));
        }
        Self::connect(format!("sqlite://{}?mode=ro", path.display())).await
    }

    /// Connects using a raw connection url, e.g. `sqlite://funds.db?mode=rwc`.
    pub async fn connect(url: impl Into<String>) -> Result<Self, DbError> {
        let url = url.into();
        let mut opt = ConnectOptions::new(url.clone());
        opt.max_connections(1)
            .min_connections(0)
            .sqlx_logging(false);
        let db = Database::connect(opt)
            .await
            .map_err(|source| DbError::Connection {
                location: url.clone(),
                source,
            })?;
        debug!("fund store connected {url}");
        Ok(Self { db })
    }

    pub async fn close(self) -> Result<(), DbError> {
        self.db.close().await?;
        info!("fund store closed");
        Ok(())
    }

    pub(crate) fn connection(&self) -> &DatabaseConnection {
        &self.db
    }
}
