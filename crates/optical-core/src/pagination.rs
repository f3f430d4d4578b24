//! Page slicing and name search over insertion-ordered records.

use serde::Serialize;

/// Page number used when the client sends nothing usable.
pub const DEFAULT_PAGE: usize = 1;
/// Page size used when the client sends nothing usable.
pub const DEFAULT_LIMIT: usize = 10;
/// Upper bound applied to `limit` unless the caller configures another one.
pub const MAX_LIMIT: usize = 100;

/// A clamped page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: usize,
    /// Page size, at least 1
    pub limit: usize,
    /// Case-insensitive substring filter on the record's search field
    pub search: Option<String>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
            search: None,
        }
    }
}

impl PageRequest {
    /// Build a request from raw query-string values.
    ///
    /// Values are read like `parseInt`: the leading integer counts, anything
    /// unparsable or zero falls back to the default, negatives clamp to 1.
    pub fn from_raw(
        page: Option<&str>,
        limit: Option<&str>,
        search: Option<&str>,
        default_limit: usize,
        max_limit: usize,
    ) -> Self {
        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        Self {
            page: clamp(page, DEFAULT_PAGE),
            limit: clamp(limit, default_limit.max(1)).min(max_limit.max(1)),
            search,
        }
    }

    fn offset(&self) -> usize {
        (self.page - 1).saturating_mul(self.limit)
    }
}

/// One page of results.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            total_pages: self.total_pages,
        }
    }
}

/// Filter, count and slice `records`, preserving their order.
///
/// Pages past the end come back empty rather than as an error.
pub fn paginate<T>(
    records: Vec<T>,
    request: &PageRequest,
    search_text: impl Fn(&T) -> &str,
) -> Page<T> {
    let filtered: Vec<T> = match request.search.as_deref() {
        Some(needle) => records
            .into_iter()
            .filter(|r| matches_search(search_text(r), needle))
            .collect(),
        None => records,
    };

    let total = filtered.len();
    let total_pages = total.div_ceil(request.limit).max(1);
    let items = filtered
        .into_iter()
        .skip(request.offset())
        .take(request.limit)
        .collect();

    Page {
        items,
        total,
        page: request.page,
        total_pages,
    }
}

/// Case-insensitive substring match. An empty needle matches everything.
pub fn matches_search(haystack: &str, needle: &str) -> bool {
    let needle = needle.trim();
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn clamp(raw: Option<&str>, default: usize) -> usize {
    match raw.and_then(parse_int_prefix) {
        None | Some(0) => default,
        Some(n) if n < 0 => 1,
        Some(n) => usize::try_from(n).unwrap_or(usize::MAX),
    }
}

/// Parse the leading (optionally signed) integer of `raw`.
fn parse_int_prefix(raw: &str) -> Option<i64> {
    let raw = raw.trim_start();
    let (sign, rest) = match raw.as_bytes().first() {
        Some(b'-') => (-1, &raw[1..]),
        Some(b'+') => (1, &raw[1..]),
        _ => (1, raw),
    };
    let digits_end = rest
        .char_indices()
        .find(|(_, c)| !c.is_ascii_digit())
        .map(|(i, _)| i)
        .unwrap_or(rest.len());
    if digits_end == 0 {
        return None;
    }
    // Saturate absurdly long inputs instead of failing.
    let value = rest[..digits_end].parse::<i64>().unwrap_or(i64::MAX);
    Some(sign * value)
}
