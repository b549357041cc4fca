use serde::{Deserialize, Serialize};

// ============================================================================
// Offset Pagination
// ============================================================================

/// Default page size when the caller does not pick one.
pub const DEFAULT_QUERY_LIMIT: u32 = 30;

/// Hard ceiling on the page size.
pub const MAX_QUERY_LIMIT: u32 = 50;

/// Offset pagination window: skip `offset` resources, take up to `limit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OffsetQuery {
    pub limit: u32,
    pub offset: u32,
}

impl OffsetQuery {
    /// Build a window with the limit clamped to `1..=MAX_QUERY_LIMIT`.
    pub fn new(limit: u32, offset: u32) -> Self {
        Self {
            limit: limit.clamp(1, MAX_QUERY_LIMIT),
            offset,
        }
    }
}

impl Default for OffsetQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_QUERY_LIMIT,
            offset: 0,
        }
    }
}

/// One page of resources plus the metadata needed to walk the result set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult<R> {
    pub list: Vec<R>,
    /// Number of resources on this page.
    pub count: u32,
    pub limit: u32,
    pub offset: u32,
    /// Offset of the following page, `None` when this page came back short.
    /// A full page only means a next page *may* exist: when the remaining
    /// resources exactly fill a page this points at an empty one. Known
    /// limitation of offset pagination without a total count.
    pub next: Option<u32>,
    /// Offset of the preceding page.
    pub prev: u32,
}

/// Assemble a [`QueryResult`] from a resource list and the window that
/// produced it.
pub fn make_query_result<R>(list: Vec<R>, params: OffsetQuery) -> QueryResult<R> {
    let count = list.len() as u32;
    let next = if count == params.limit {
        Some(params.offset + count)
    } else {
        None
    };

    QueryResult {
        list,
        count,
        limit: params.limit,
        offset: params.offset,
        next,
        prev: params.offset.saturating_sub(params.limit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_page_past_the_end() {
        let result = make_query_result(Vec::<u32>::new(), OffsetQuery::new(30, 50));

        assert_eq!(result.count, 0);
        assert_eq!(result.next, None);
        assert_eq!(result.prev, 20);
    }

    #[test]
    fn full_page_points_at_the_next_window() {
        let result = make_query_result(vec![0; 30], OffsetQuery::new(30, 60));

        assert_eq!(result.count, 30);
        assert_eq!(result.next, Some(90));
        assert_eq!(result.prev, 30);
    }

    #[test]
    fn short_page_means_end_of_results() {
        let result = make_query_result(vec![0; 7], OffsetQuery::new(30, 0));

        assert_eq!(result.count, 7);
        assert_eq!(result.next, None);
        assert_eq!(result.prev, 0);
    }

    #[test]
    fn prev_never_goes_negative() {
        let result = make_query_result(vec![0; 5], OffsetQuery::new(30, 10));

        assert_eq!(result.prev, 0);
    }

    #[test]
    fn limit_is_clamped() {
        assert_eq!(OffsetQuery::new(500, 0).limit, MAX_QUERY_LIMIT);
        assert_eq!(OffsetQuery::new(0, 0).limit, 1);
        assert_eq!(OffsetQuery::default().limit, DEFAULT_QUERY_LIMIT);
    }
}
