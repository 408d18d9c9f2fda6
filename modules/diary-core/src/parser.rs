//! Extracts a [`PageBundle`] from the markup of one diary page.
//!
//! Every field is extracted independently. A missing element or malformed
//! value leaves that field absent and never aborts the rest of the parse.

use std::sync::LazyLock;

use chrono::NaiveDate;
use scraper::{ElementRef, Html, Selector};

use crate::slug::strip_year_suffix;
use crate::types::{Entry, PageBundle, ProfileIdentity};

const POSTER_BASE: &str = "https://a.ltrbxd.com/resized/film-poster";
const POSTER_SUFFIX: &str = "-0-300-0-450-crop.jpg";

const AVATAR_SMALL: &str = "-0-48-0-48-crop";
const AVATAR_LARGE: &str = "-0-220-0-220-crop";

/// Right single quotation mark, as in "Jane’s film diary".
const TITLE_APOSTROPHE: char = '\u{2019}';

const DATE_MARKER: &str = "for";
const MAX_SCORE: u8 = 10;

static TITLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("title").unwrap());
static PAGINATION_ITEM: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.paginate-pages li").unwrap());
static AVATAR: LazyLock<Selector> = LazyLock::new(|| Selector::parse(".avatar img").unwrap());
static ROW: LazyLock<Selector> = LazyLock::new(|| Selector::parse("tr.diary-entry-row").unwrap());
static POSTER: LazyLock<Selector> = LazyLock::new(|| Selector::parse("[data-film-id]").unwrap());
static FILM_TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h3.headline-3 a").unwrap());
static DAY_LINK: LazyLock<Selector> = LazyLock::new(|| Selector::parse("td.td-day a").unwrap());
static RATING: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("input.rateit-field").unwrap());
static LIKED: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("td.td-like .icon-liked").unwrap());

pub fn parse_page(html: &str) -> PageBundle {
    let document = Html::parse_document(html);
    let root = document.root_element();

    let entries: Vec<Entry> = document.select(&ROW).map(parse_row).collect();

    PageBundle {
        page_count: document.select(&PAGINATION_ITEM).count(),
        identity: ProfileIdentity {
            display_name: select_text(root, &TITLE)
                .map(|title| display_name_from_title(&title))
                .unwrap_or_default(),
            avatar_url: select_attr(root, &AVATAR, "src").and_then(|src| large_avatar(&src)),
        },
        entries,
    }
}

/// Turn one `tr.diary-entry-row` into an [`Entry`].
pub fn parse_row(row: ElementRef<'_>) -> Entry {
    let poster = row.select(&POSTER).next();
    let media_id = poster.and_then(|p| non_empty_attr(p, "data-film-id"));
    let slug = poster
        .and_then(|p| non_empty_attr(p, "data-film-slug"))
        .map(|raw| strip_year_suffix(&raw).to_string());

    let image_url = match (&media_id, &slug) {
        (Some(id), Some(slug)) => Some(poster_url(id, slug)),
        _ => None,
    };

    Entry {
        title: select_text(row, &FILM_TITLE).unwrap_or_default(),
        logged_date: select_attr(row, &DAY_LINK, "href")
            .and_then(|href| logged_date_from_href(&href)),
        score: select_attr(row, &RATING, "value").and_then(|value| parse_score(&value)),
        favorited: row.select(&LIKED).next().is_some(),
        media_id,
        slug,
        image_url,
    }
}

/// Poster address: each character of the film id becomes one path segment.
///
/// `784328` + `oppenheimer` →
/// `.../film-poster/7/8/4/3/2/8/784328-oppenheimer-0-300-0-450-crop.jpg`
pub fn poster_url(media_id: &str, slug: &str) -> String {
    let segments: Vec<String> = media_id.chars().map(String::from).collect();
    format!(
        "{POSTER_BASE}/{}/{media_id}-{slug}{POSTER_SUFFIX}",
        segments.join("/")
    )
}

/// Date encoded in a diary link such as `/jane/films/diary/for/2023/07/15/`.
/// The last `for` segment is the marker, so a user named `for` still parses.
pub fn logged_date_from_href(href: &str) -> Option<NaiveDate> {
    let segments: Vec<&str> = href.split('/').filter(|s| !s.is_empty()).collect();
    let marker = segments.iter().rposition(|s| *s == DATE_MARKER)?;

    let &[year, month, day] = segments.get(marker + 1..marker + 4)? else {
        return None;
    };

    NaiveDate::from_ymd_opt(year.parse().ok()?, month.parse().ok()?, day.parse().ok()?)
}

/// The page title reads `"\u{200e}Jane’s film diary • Letterboxd"`. The
/// leading mark character survives trimming and is dropped positionally.
pub fn display_name_from_title(title: &str) -> String {
    let before = title.split(TITLE_APOSTROPHE).next().unwrap_or_default();
    let mut chars = before.trim().chars();
    chars.next();
    chars.as_str().to_string()
}

/// Swap the small avatar rendition for the large one. Anything that isn't a
/// small rendition (default avatars, unexpected sizes) counts as no avatar.
pub fn large_avatar(src: &str) -> Option<String> {
    src.contains(AVATAR_SMALL)
        .then(|| src.replace(AVATAR_SMALL, AVATAR_LARGE))
}

fn parse_score(value: &str) -> Option<u8> {
    value
        .trim()
        .parse::<u8>()
        .ok()
        .filter(|score| *score <= MAX_SCORE)
}

fn select_text(scope: ElementRef<'_>, selector: &Selector) -> Option<String> {
    scope
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}

fn select_attr(scope: ElementRef<'_>, selector: &Selector, attr: &str) -> Option<String> {
    scope
        .select(selector)
        .next()
        .and_then(|el| non_empty_attr(el, attr))
}

fn non_empty_attr(el: ElementRef<'_>, attr: &str) -> Option<String> {
    el.value()
        .attr(attr)
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}
