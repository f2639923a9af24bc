//! Interned, case-insensitive category labels.
//!
//! A category is identified by its lowercase name. The interner hands out one
//! shared instance per lowercase key, and the casing seen first is the one kept
//! for display. Instances are never evicted for the lifetime of the interner.

use crate::constants::CATEGORY_SEPARATOR;
use crate::error::{MediaError, Result};
use std::collections::HashMap;
use std::sync::Arc;

#[derive(Debug, PartialEq, Eq)]
pub struct Category {
    name: String,
}

impl Category {
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[derive(Debug, Default)]
pub struct CategoryInterner {
    cache: HashMap<String, Arc<Category>>,
}

impl CategoryInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the category for `name`, creating it on first sight.
    ///
    /// Blank or whitespace-only names are rejected.
    pub fn get_or_create(&mut self, name: &str) -> Result<Arc<Category>> {
        if name.trim().is_empty() {
            return Err(MediaError::InvalidArgument(
                "category name must not be blank".to_string(),
            ));
        }

        let category = self
            .cache
            .entry(name.to_lowercase())
            .or_insert_with(|| {
                log::debug!("New category: {name}");
                Arc::new(Category {
                    name: name.to_string(),
                })
            });
        Ok(Arc::clone(category))
    }

    /// Parse a comma-separated list of category names.
    ///
    /// Names are trimmed. A blank list yields no categories; a blank entry
    /// inside a non-blank list is an error.
    pub fn parse_list(&mut self, text: &str) -> Result<Vec<Arc<Category>>> {
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        text.split(',')
            .map(|name| self.get_or_create(name.trim()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}

/// Join category names with `", "`, empty when there are none.
pub fn join_names(categories: &[Arc<Category>]) -> String {
    categories
        .iter()
        .map(|c| c.name())
        .collect::<Vec<_>>()
        .join(CATEGORY_SEPARATOR)
}
