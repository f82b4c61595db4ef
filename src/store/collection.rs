//! Insertion-ordered shoe collection shared by the backends

use std::collections::{HashMap, HashSet};

use chrono::Utc;

use crate::shoe::{Shoe, ShoeFields, ShoeId};

use super::errors::{StoreError, StoreResult};

/// Live documents in creation order, plus every id ever handed out.
#[derive(Debug, Default)]
pub(crate) struct Collection {
    order: Vec<ShoeId>,
    documents: HashMap<ShoeId, Shoe>,
    issued: HashSet<ShoeId>,
}

impl Collection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<Shoe> {
        self.order
            .iter()
            .filter_map(|id| self.documents.get(id))
            .cloned()
            .collect()
    }

    pub fn get(&self, id: &ShoeId) -> Option<Shoe> {
        self.documents.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Build a new record under an id that was never issued before.
    /// Nothing is stored until `put`.
    pub fn prepare(&self, fields: ShoeFields) -> Shoe {
        let mut id = ShoeId::generate();
        while self.issued.contains(&id) {
            id = ShoeId::generate();
        }
        Shoe::new(id, fields, Utc::now())
    }

    /// Insert or overwrite; a new id goes to the end of the order
    pub fn put(&mut self, shoe: Shoe) {
        if self.issued.insert(shoe.id) || !self.documents.contains_key(&shoe.id) {
            self.order.retain(|id| *id != shoe.id);
            self.order.push(shoe.id);
        }
        self.documents.insert(shoe.id, shoe);
    }

    /// Refresh `updated_at` on a stored record and return the saved copy
    pub fn prepare_save(&self, mut shoe: Shoe) -> StoreResult<Shoe> {
        if !self.documents.contains_key(&shoe.id) {
            return Err(StoreError::Missing(shoe.id));
        }
        shoe.touch(Utc::now());
        Ok(shoe)
    }

    pub fn remove(&mut self, id: &ShoeId) -> StoreResult<Shoe> {
        let shoe = self.documents.remove(id).ok_or(StoreError::Missing(*id))?;
        self.order.retain(|other| other != id);
        Ok(shoe)
    }
}
