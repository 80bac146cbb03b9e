use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use gallery_core::pagination::PageRequest;
use gallery_core::types::{ItemId, Timestamp};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{ItemStore, StoreError};
use crate::models::item::{CreateItem, Item};

/// A fixture file that cannot be loaded.
#[derive(Debug, thiserror::Error)]
pub enum FixtureError {
    #[error("Malformed fixture JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid fixture item {id}: {reason}")]
    Invalid { id: ItemId, reason: &'static str },
}

/// In-memory catalog.
///
/// Items are kept sorted newest-first. A read-only store rejects every write
/// with [`StoreError::Rejected`], which is how a demo deployment behaves when
/// its dataset must not change.
#[derive(Debug)]
pub struct FixtureItemStore {
    items: RwLock<Vec<Item>>,
    read_only: bool,
}

impl FixtureItemStore {
    pub fn new(mut items: Vec<Item>) -> Self {
        sort_newest_first(&mut items);
        Self {
            items: RwLock::new(items),
            read_only: false,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Load items from a JSON array of item records.
    ///
    /// Records must satisfy the same rules the database enforces: a non-blank
    /// title, a non-negative click count and a unique id.
    pub fn from_json(json: &str) -> Result<Self, FixtureError> {
        let items: Vec<Item> = serde_json::from_str(json)?;

        let mut ids = HashSet::with_capacity(items.len());
        for item in &items {
            if item.title.trim().is_empty() {
                return Err(FixtureError::Invalid {
                    id: item.id,
                    reason: "title must not be blank",
                });
            }
            if item.click_count < 0 {
                return Err(FixtureError::Invalid {
                    id: item.id,
                    reason: "click_count must not be negative",
                });
            }
            if !ids.insert(item.id) {
                return Err(FixtureError::Invalid {
                    id: item.id,
                    reason: "duplicate id",
                });
            }
        }

        tracing::debug!(count = items.len(), "Loaded fixture items");
        Ok(Self::new(items))
    }

    /// Built-in demo catalog.
    pub fn demo() -> Self {
        let entries = [
            (1, "Labubu Dream Forest", "A whimsical adventure in a mystical forest. 4K animated wallpaper.", 15, 1234),
            (2, "Labubu Starry Walk", "A healing stroll under a romantic starry sky.", 14, 856),
            (3, "Labubu Rainbow World", "A colourful rainbow world straight out of a fairy tale.", 13, 2341),
            (4, "Labubu Ocean Dreams", "Deep-sea exploration with glowing jellyfish.", 12, 567),
            (5, "Labubu Cherry Blossom", "Spring petals drifting over a quiet street.", 11, 1789),
            (6, "Labubu Snow Day", "Soft snowfall and a warm scarf.", 10, 934),
        ];

        let items = entries
            .into_iter()
            .map(|(n, title, description, day, clicks)| {
                let created_at = demo_date(day);
                Item {
                    id: Uuid::from_u128(n),
                    title: title.to_string(),
                    description: Some(description.to_string()),
                    cover_url: format!("/placeholder.svg?height=320&width=240&text=cover-{n}"),
                    pan_link: format!("https://pan.baidu.com/s/demo{n:04}"),
                    click_count: clicks,
                    created_at,
                    updated_at: created_at,
                    created_by: None,
                }
            })
            .collect();

        Self::new(items)
    }

    /// Reject all writes from now on.
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Snapshot of every item, newest first.
    pub async fn snapshot(&self) -> Vec<Item> {
        self.items.read().await.clone()
    }

    fn reject_if_read_only(&self) -> Result<(), StoreError> {
        if self.read_only {
            tracing::debug!("Fixture store is read-only, rejecting write");
            Err(StoreError::Rejected("fixture store is read-only".into()))
        } else {
            Ok(())
        }
    }
}

impl Default for FixtureItemStore {
    fn default() -> Self {
        Self::empty()
    }
}

fn sort_newest_first(items: &mut [Item]) {
    items.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.id.cmp(&a.id))
    });
}

fn demo_date(day: u32) -> Timestamp {
    NaiveDate::from_ymd_opt(2024, 1, day)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default()
}

#[async_trait]
impl ItemStore for FixtureItemStore {
    fn name(&self) -> &'static str {
        "fixture"
    }

    async fn list_items(&self, page: PageRequest) -> Result<(Vec<Item>, i64), StoreError> {
        let items = self.items.read().await;
        let total = items.len() as i64;

        let mut out = Vec::with_capacity(page.expected_len(total) as usize);
        out.extend(
            items
                .iter()
                .skip(usize::try_from(page.offset).unwrap_or(usize::MAX))
                .take(usize::try_from(page.limit).unwrap_or(0))
                .cloned(),
        );
        Ok((out, total))
    }

    async fn find_item(&self, id: ItemId) -> Result<Option<Item>, StoreError> {
        let items = self.items.read().await;
        Ok(items.iter().find(|item| item.id == id).cloned())
    }

    async fn increment_click(&self, id: ItemId) -> Result<Option<i64>, StoreError> {
        self.reject_if_read_only()?;

        let mut items = self.items.write().await;
        Ok(items.iter_mut().find(|item| item.id == id).map(|item| {
            item.click_count += 1;
            item.click_count
        }))
    }

    async fn create_item(&self, input: &CreateItem) -> Result<Item, StoreError> {
        self.reject_if_read_only()?;
        if input.title.trim().is_empty() {
            return Err(StoreError::Rejected("title must not be blank".into()));
        }

        let mut items = self.items.write().await;
        if items.iter().any(|item| item.id == input.id) {
            return Err(StoreError::Rejected(format!(
                "item {} already exists",
                input.id
            )));
        }

        let now = Utc::now();
        let item = Item {
            id: input.id,
            title: input.title.clone(),
            description: input.description.clone(),
            cover_url: input.cover_url.clone(),
            pan_link: input.pan_link.clone(),
            click_count: 0,
            created_at: now,
            updated_at: now,
            created_by: input.created_by.clone(),
        };
        items.push(item.clone());
        sort_newest_first(&mut items);
        Ok(item)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
