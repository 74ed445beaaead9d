//! Forecast viewer service
//!
//! Ties the feed client and the snapshot store together: fetch a region's
//! weekly forecast, persist it as a new snapshot, read the latest snapshot
//! back and turn it into display cards.

pub mod context;
pub mod service;
pub mod view;

pub use context::*;
pub use service::*;
pub use view::*;

use tenki_db::DbError;
use tenki_ingest::IngestError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error(transparent)]
    Ingest(#[from] IngestError),

    #[error(transparent)]
    Db(#[from] DbError),
}

impl ViewerError {
    /// Single line shown to the user in place of the forecast
    pub fn user_message(&self) -> String {
        format!("エラー: {self}")
    }
}

pub type ViewerResult<T> = Result<T, ViewerError>;
