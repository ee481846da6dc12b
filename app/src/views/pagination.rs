//! List pagination

/// One page control
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLink {
    /// 1-based page number
    pub number: u64,
    /// List offset of the page
    pub offset: u64,
    /// Whether this is the page shown
    pub active: bool,
}

/// Most page controls shown at once
pub const MAX_PAGE_LINKS: u64 = 100;

/// Page controls for a list of `count` articles
///
/// Empty when everything fits on one page. Past [`MAX_PAGE_LINKS`] pages
/// only a window around the page at `offset` is shown; `count` comes from
/// the server.
#[must_use]
pub fn pagination(count: u64, page_size: u64, offset: u64) -> Vec<PageLink> {
    let page_size = page_size.max(1);
    let total_pages = count.div_ceil(page_size);
    if total_pages <= 1 {
        return Vec::new();
    }

    let current = (offset / page_size).min(total_pages - 1);
    let end = current
        .saturating_sub(MAX_PAGE_LINKS / 2)
        .saturating_add(MAX_PAGE_LINKS)
        .min(total_pages);
    let start = end.saturating_sub(MAX_PAGE_LINKS);

    (start..end)
        .map(|index| PageLink {
            number: index + 1,
            offset: index * page_size,
            active: index * page_size == offset,
        })
        .collect()
}
