use std::sync::Arc;

use tracing::{debug, info};

use crate::config::constants::{DEFAULT_PAGE, DEFAULT_PAGE_SIZE};
use crate::error::{AuthError, Result};
use crate::models::{default_catalog, InterestItem, InterestPage, Pagination};
use crate::storage::Storage;

/// Paged reads over the interests catalogue plus the selection toggle
#[derive(Clone)]
pub struct InterestService {
    storage: Arc<dyn Storage>,
}

impl InterestService {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { storage }
    }

    /// One page of the catalogue in ascending id order.
    ///
    /// Page numbers start at 1; missing or zero values fall back to the
    /// defaults. A page past the end comes back empty with the same
    /// pagination envelope.
    pub async fn list(&self, page: Option<u32>, page_size: Option<u32>) -> Result<InterestPage> {
        let page = match page {
            Some(p) if p >= 1 => p,
            _ => DEFAULT_PAGE,
        };
        let page_size = match page_size {
            Some(s) if s >= 1 => s,
            _ => DEFAULT_PAGE_SIZE,
        };

        let total = self.storage.count_interests().await?;
        let offset = (page as u64 - 1) * page_size as u64;
        let interests = self.storage.list_interests(offset, page_size).await?;
        let total_pages = total.div_ceil(page_size as u64);

        debug!(
            "Listed {} interests (page {} of {})",
            interests.len(),
            page,
            total_pages
        );

        Ok(InterestPage {
            interests,
            pagination: Pagination {
                total,
                total_pages,
                current_page: page,
                page_size,
            },
        })
    }

    /// Set the selected flag on one item, returning its updated state
    pub async fn set_selected(&self, id: u32, selected: bool) -> Result<InterestItem> {
        self.storage
            .set_interest_selected(id, selected)
            .await?
            .ok_or(AuthError::InterestNotFound)
    }

    /// Load the reference catalogue, skipping ids already present.
    /// Returns how many items were inserted.
    pub async fn seed(&self) -> Result<u32> {
        let mut inserted = 0;
        for item in default_catalog() {
            if self.storage.insert_interest(&item).await? {
                inserted += 1;
            }
        }

        info!("Seeded interests catalogue: {} inserted", inserted);
        Ok(inserted)
    }
}
