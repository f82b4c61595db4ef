//! # Shoe Resource Handlers
//!
//! One operation per endpoint. Each validates its input completely before
//! touching the store, so a validation failure never leaves a side effect.
//! Once a write has been issued there is no compensation.

use std::sync::Arc;

use tracing::info;

use crate::observability::Event;
use crate::shoe::{Shoe, ShoeId, ShoeInput};
use crate::store::ShoeStore;

use super::errors::{ApiError, ApiResult};

/// Resource handlers over a shared store
#[derive(Clone)]
pub struct ShoeHandler {
    store: Arc<dyn ShoeStore>,
}

impl ShoeHandler {
    pub fn new(store: Arc<dyn ShoeStore>) -> Self {
        Self { store }
    }

    /// Every shoe, unfiltered, in storage order
    pub async fn list(&self) -> ApiResult<Vec<Shoe>> {
        Ok(self.store.find_all().await?)
    }

    pub async fn get(&self, id: &str) -> ApiResult<Shoe> {
        let id = ShoeId::parse(id)?;
        self.store.find_by_id(id).await?.ok_or(ApiError::NotFound)
    }

    pub async fn create(&self, input: ShoeInput) -> ApiResult<Shoe> {
        let fields = input.validate()?;
        let shoe = self.store.insert(fields).await?;

        info!(event = %Event::ShoeCreated, id = %shoe.id, "shoe created");
        Ok(shoe)
    }

    /// Whole-record replace.
    ///
    /// Order: id format, required attributes, existence. Optional
    /// attributes missing from `input` are cleared on the stored record.
    pub async fn update(&self, id: &str, input: ShoeInput) -> ApiResult<Shoe> {
        let id = ShoeId::parse(id)?;
        let fields = input.validate()?;

        let mut shoe = self.store.find_by_id(id).await?.ok_or(ApiError::NotFound)?;
        shoe.replace(fields);
        let saved = self.store.save(shoe).await?;

        info!(event = %Event::ShoeUpdated, id = %saved.id, "shoe updated");
        Ok(saved)
    }

    pub async fn delete(&self, id: &str) -> ApiResult<()> {
        let id = ShoeId::parse(id)?;
        let shoe = self.store.find_by_id(id).await?.ok_or(ApiError::NotFound)?;
        self.store.delete(&shoe).await?;

        info!(event = %Event::ShoeDeleted, id = %shoe.id, "shoe deleted");
        Ok(())
    }
}
