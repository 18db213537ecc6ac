//! Page-level mount gating for the chat widget.

/// Whether the widget should activate on `page_path`.
///
/// Seller-facing pages (the prefix itself or anything below it) never get the
/// widget. The match is on a path-segment boundary, so `/seller/dashboard` is
/// excluded while `/sellers-guide` is not.
pub fn should_mount(page_path: &str, seller_prefix: &str) -> bool {
    let prefix = seller_prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return true;
    }
    match page_path.strip_prefix(prefix) {
        Some(rest) => !(rest.is_empty() || rest.starts_with('/')),
        None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buyer_pages_mount() {
        assert!(should_mount("/", "/seller"));
        assert!(should_mount("/properties", "/seller"));
        assert!(should_mount("/property/12/", "/seller"));
    }

    #[test]
    fn test_seller_pages_do_not_mount() {
        assert!(!should_mount("/seller", "/seller"));
        assert!(!should_mount("/seller/dashboard", "/seller"));
        assert!(!should_mount("/seller/property/3/edit/", "/seller/"));
    }

    #[test]
    fn test_prefix_matches_whole_segments_only() {
        assert!(should_mount("/sellers-guide", "/seller"));
    }

    #[test]
    fn test_empty_prefix_mounts_everywhere() {
        assert!(should_mount("/seller", ""));
    }
}
