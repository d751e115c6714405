//! Page information carried by paginated data collections
//!
//! Copyright (c) 2025 Datakit Team
//! Licensed under the Apache-2.0 license

use crate::value::{Payload, Value};
use serde::{Deserialize, Serialize};

/// Position of a collection's items within a larger, paged result
///
/// A paginated collection outputs its items under a wrap key together with
/// `links` and `meta` entries built from this.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub current_page: u32,
    pub per_page: u32,
    pub total: u32,
    #[serde(default)]
    pub path: Option<String>,
}

impl Pagination {
    pub fn new(current_page: u32, per_page: u32, total: u32) -> Self {
        Self {
            current_page: current_page.max(1),
            per_page: per_page.max(1),
            total,
            path: None,
        }
    }

    /// Base URL the page links are built from
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn last_page(&self) -> u32 {
        self.total.div_ceil(self.per_page.max(1)).max(1)
    }

    fn page_url(&self, page: u32) -> Value {
        match &self.path {
            Some(path) => Value::from(format!("{path}?page={page}")),
            None => Value::Null,
        }
    }

    /// `first`, `last`, `prev` and `next` page URLs, `null` where absent
    pub fn links(&self) -> Payload {
        let last = self.last_page();
        let prev = (self.current_page > 1).then(|| self.current_page - 1);
        let next = (self.current_page < last).then(|| self.current_page + 1);

        Payload::from([
            ("first".to_string(), self.page_url(1)),
            ("last".to_string(), self.page_url(last)),
            ("prev".to_string(), prev.map_or(Value::Null, |page| self.page_url(page))),
            ("next".to_string(), next.map_or(Value::Null, |page| self.page_url(page))),
        ])
    }

    /// Counters describing the page holding `item_count` items
    pub fn meta(&self, item_count: usize) -> Payload {
        let first = self
            .current_page
            .saturating_sub(1)
            .saturating_mul(self.per_page)
            .saturating_add(1);
        let count = u32::try_from(item_count).unwrap_or(u32::MAX);
        let (from, to) = if count == 0 {
            (None, None)
        } else {
            (Some(first), Some(first.saturating_add(count - 1)))
        };

        Payload::from([
            ("current_page".to_string(), Value::from(self.current_page)),
            ("from".to_string(), Value::from(from)),
            ("last_page".to_string(), Value::from(self.last_page())),
            ("path".to_string(), Value::from(self.path.clone())),
            ("per_page".to_string(), Value::from(self.per_page)),
            ("to".to_string(), Value::from(to)),
            ("total".to_string(), Value::from(self.total)),
        ])
    }
}
