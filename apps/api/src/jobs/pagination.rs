//! Client-side pagination over a fully fetched result set.

pub const PAGE_SIZE: usize = 10;

/// Upper bound for a requested page; keeps `page * size` far from overflow.
pub const MAX_PAGE: u32 = 100_000;

/// Parses a 1-based page number from its leading integer, so `"2abc"` is
/// page 2. Input with no leading number yields 1; out-of-range values are
/// clamped into `1..=MAX_PAGE`.
pub fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(leading_integer)
        .map(|p| p.clamp(1, i64::from(MAX_PAGE)) as u32)
        .unwrap_or(1)
}

/// Optional sign followed by at least one ASCII digit, after leading
/// whitespace. Digits too long for `i64` saturate.
fn leading_integer(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let magnitude = rest[..end].parse::<i64>().unwrap_or(i64::MAX);
    Some(sign * magnitude)
}

/// Zero-based index of the first item on `page`.
pub fn page_start(page: u32, page_size: usize) -> usize {
    (page.max(1) as usize - 1) * page_size
}

/// Items at zero-based indices `[start, start + page_size)`; empty past the end.
pub fn paginate<T>(items: Vec<T>, page: u32, page_size: usize) -> Vec<T> {
    items
        .into_iter()
        .skip(page_start(page, page_size))
        .take(page_size)
        .collect()
}

pub fn total_pages(total_count: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 0;
    }
    total_count.div_ceil(page_size)
}

pub fn has_next_page(page: u32, page_size: usize, total_count: usize) -> bool {
    (page as usize) * page_size < total_count
}
