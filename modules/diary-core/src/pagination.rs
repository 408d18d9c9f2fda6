/// Addresses for pages `2..=page_count` of a diary rooted at `base_url`.
///
/// Empty when the diary fits on one page.
pub fn remaining_page_urls(base_url: &str, page_count: usize) -> Vec<String> {
    if page_count <= 1 {
        return Vec::new();
    }

    let separator = if base_url.ends_with('/') { "" } else { "/" };
    (2..=page_count)
        .map(|page| format!("{base_url}{separator}page/{page}/"))
        .collect()
}
