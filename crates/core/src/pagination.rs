//! Page planning and the paged result envelope.
//!
//! [`plan_page`] is the pure arithmetic (total pages, page clamping, offset);
//! [`assemble`] runs it, calls the rows-provider only when there is
//! something to fetch, and wraps the result in a [`PageEnvelope`].

use std::future::Future;

use serde::Serialize;

use crate::search::{OutOfRangePolicy, PagingPolicy, SearchCondition};

/// Number of pages needed for `total_count` rows at `size` rows per page.
///
/// Returns 0 for an empty result set or a non-positive size.
pub fn total_pages(total_count: i64, size: i64) -> i64 {
    if size <= 0 || total_count <= 0 {
        return 0;
    }
    total_count / size + i64::from(total_count % size != 0)
}

/// Resolved paging for one request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagePlan {
    /// Final 0-based page index, after clamping.
    pub page: i64,
    pub size: i64,
    pub offset: i64,
    pub total_pages: i64,
    /// Whether the rows-provider should be called at all.
    pub fetch: bool,
}

/// Work out which page to serve for a given total.
///
/// With no rows the page resets to 0 and nothing is fetched. A page past the
/// end is either clamped to the last page or left in place with no fetch,
/// depending on [`PagingPolicy::out_of_range`].
pub fn plan_page(total_count: i64, condition: &SearchCondition, policy: &PagingPolicy) -> PagePlan {
    let size = condition.size;
    let total_pages = total_pages(total_count, size);

    let (page, fetch) = if total_pages == 0 {
        (0, false)
    } else if condition.page >= total_pages {
        match policy.out_of_range {
            OutOfRangePolicy::Clamp => (total_pages - 1, true),
            OutOfRangePolicy::Empty => (condition.page, false),
        }
    } else {
        (condition.page.max(0), true)
    };

    PagePlan {
        page,
        size,
        offset: page.saturating_mul(size),
        total_pages,
        fetch,
    }
}

/// One page of results plus paging metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageEnvelope<T> {
    pub items: Vec<T>,
    pub total_count: i64,
    pub page: i64,
    pub size: i64,
    pub total_pages: i64,
    pub has_next: bool,
    pub has_previous: bool,
}

impl<T> PageEnvelope<T> {
    pub fn from_plan(items: Vec<T>, total_count: i64, plan: &PagePlan) -> Self {
        Self {
            items,
            total_count: total_count.max(0),
            page: plan.page,
            size: plan.size,
            total_pages: plan.total_pages,
            has_next: plan.page.saturating_add(1) < plan.total_pages,
            has_previous: plan.page > 0,
        }
    }

    /// Transform every item, keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> PageEnvelope<U> {
        PageEnvelope {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            page: self.page,
            size: self.size,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_previous: self.has_previous,
        }
    }
}

/// Build a page envelope from a total count and a rows-provider.
///
/// `fetch` receives `(offset, limit)` and must return rows already filtered
/// and sorted by the storage layer. It is not called when `total_count` is 0
/// or when an out-of-range page is served empty. Its error is returned as-is.
pub async fn assemble<T, E, F, Fut>(
    total_count: i64,
    condition: &SearchCondition,
    policy: &PagingPolicy,
    fetch: F,
) -> Result<PageEnvelope<T>, E>
where
    F: FnOnce(i64, i64) -> Fut,
    Fut: Future<Output = Result<Vec<T>, E>>,
{
    let plan = plan_page(total_count, condition, policy);

    let items = if plan.fetch {
        fetch(plan.offset, plan.size).await?
    } else {
        Vec::new()
    };

    Ok(PageEnvelope::from_plan(items, total_count, &plan))
}
