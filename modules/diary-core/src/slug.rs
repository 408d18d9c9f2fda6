/// Strip a trailing `-YYYY` year token from a film slug.
///
/// Letterboxd disambiguates remakes by appending the release year
/// (`oppenheimer-2023`); poster addresses use the bare slug.
pub fn strip_year_suffix(slug: &str) -> &str {
    if slug.len() < 5 {
        return slug;
    }

    match slug.rsplit_once('-') {
        Some((head, tail)) if tail.len() == 4 && tail.bytes().all(|b| b.is_ascii_digit()) => head,
        _ => slug,
    }
}
