/// Page size used when no configuration overrides it.
pub const DEFAULT_PAGE_SIZE: u32 = 30;

/// Whether a page beyond `page` holds more items.
///
/// Shared by the remote and starred sources so both report the same
/// boundary: `page * page_size < total_count`.
pub fn has_more(page: u32, page_size: u32, total_count: u64) -> bool {
    u64::from(page) * u64::from(page_size) < total_count
}

/// Resolves the starting page from an external carrier value.
///
/// Absent, unparseable or non-positive values fall back to page 1.
pub fn initial_page(raw: Option<&str>) -> u32 {
    raw.and_then(|value| value.trim().parse::<i64>().ok())
        .map(clamp_page)
        .unwrap_or(1)
}

pub(crate) fn clamp_page(requested: i64) -> u32 {
    u32::try_from(requested.max(1)).unwrap_or(u32::MAX)
}

/// Half-open index range `[(page-1)*size, page*size)` clipped to `len`.
pub(crate) fn slice_bounds(page: u32, page_size: u32, len: usize) -> (usize, usize) {
    let start = (u64::from(page.max(1)) - 1) * u64::from(page_size);
    let end = start + u64::from(page_size);
    let clip = |value: u64| usize::try_from(value).map_or(len, |v| v.min(len));
    (clip(start), clip(end))
}
