/// Normalize the `page`/`limit` query parameters of a list request.
/// Defaults to page 1 with 10 items, caps the page size at 100.
pub fn validate_pagination(page: Option<usize>, limit: Option<usize>) -> (usize, usize) {
    let page = page.unwrap_or(1).max(1);
    let limit = limit.unwrap_or(10).clamp(1, 100);
    (page, limit)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        assert_eq!(validate_pagination(None, None), (1, 10));
    }

    #[test]
    fn zero_page_becomes_one_and_limit_is_capped() {
        assert_eq!(validate_pagination(Some(0), Some(500)), (1, 100));
        assert_eq!(validate_pagination(Some(3), Some(0)), (3, 1));
    }
}
