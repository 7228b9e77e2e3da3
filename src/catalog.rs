//! Google Books catalog client and record normalization
//!
//! One outbound GET per committed query. The heterogeneous volume payload is
//! projected field-by-field into [`BookRecord`] with fixed default sentinels;
//! any failure along the way is absorbed into a fixed-length placeholder list
//! so the caller never sees an error, only an all-placeholder working list.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{BookshowError, Result};
use crate::logging;

const CATALOG_BASE_URL: &str = "https://www.googleapis.com/books/v1/volumes";
const USER_AGENT: &str = concat!("Bookshow/", env!("CARGO_PKG_VERSION"));
const HTTP_TIMEOUT_SECS: u64 = 30;

/// Upper bound on the working list, and the exact length of the
/// placeholder fallback.
pub const MAX_RESULTS: usize = 35;

/// How many category tags a card may show.
pub const MAX_CATEGORY_TAGS: usize = 3;

// ---------------------------------------------------------------------------
// Wire types (Google Books volumes payload)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct VolumesResponse {
    /// Absent on zero-result queries; treated as an empty list, not an error.
    pub items: Option<Vec<VolumeItem>>,
}

#[derive(Debug, Deserialize)]
pub struct VolumeItem {
    pub id: String,
    #[serde(rename = "volumeInfo")]
    pub volume_info: Option<VolumeInfo>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VolumeInfo {
    pub title: Option<String>,
    pub authors: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub average_rating: Option<f64>,
    pub page_count: Option<u32>,
    pub print_type: Option<String>,
    pub ratings_count: Option<u32>,
    pub image_links: Option<ImageLinks>,
    pub description: Option<String>,
    pub info_link: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct ImageLinks {
    pub thumbnail: Option<String>,
}

// ---------------------------------------------------------------------------
// Normalized records
// ---------------------------------------------------------------------------

/// Normalized projection of one catalog volume.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
    pub id: String,
    pub title: String,
    /// Comma-joined author names.
    pub authors: String,
    /// Comma-joined subject tags.
    pub categories: String,
    /// Average rating in [0.0, 5.0].
    pub rating: f64,
    pub ratings_count: u32,
    /// None renders as "N/A".
    pub page_count: Option<u32>,
    pub print_type: String,
    /// Empty when the catalog has no cover art.
    pub image_url: String,
    pub description: String,
    pub info_link: String,
}

impl BookRecord {
    /// Project one upstream volume, substituting sentinels for every
    /// absent optional field.
    pub fn from_volume(item: VolumeItem) -> Self {
        let info = item.volume_info.unwrap_or_default();
        Self {
            id: item.id,
            title: info.title.unwrap_or_else(|| "Untitled".to_string()),
            authors: info
                .authors
                .map(|a| a.join(", "))
                .unwrap_or_else(|| "Unknown Author".to_string()),
            categories: info
                .categories
                .map(|c| c.join(", "))
                .unwrap_or_else(|| "General".to_string()),
            rating: info.average_rating.unwrap_or(0.0),
            ratings_count: info.ratings_count.unwrap_or(0),
            page_count: info.page_count,
            print_type: info.print_type.unwrap_or_else(|| "Unknown".to_string()),
            image_url: info
                .image_links
                .and_then(|l| l.thumbnail)
                .unwrap_or_default(),
            description: info.description.unwrap_or_default(),
            info_link: info.info_link.unwrap_or_else(|| "#".to_string()),
        }
    }

    /// First letter of up to the first 3 title words, uppercased and
    /// space-joined. Drives the generated cover placeholder.
    pub fn cover_initials(&self) -> String {
        title_initials(&self.title)
    }

    /// Cover art source: the catalog thumbnail when present, otherwise a
    /// generated SVG data URI built from the title initials.
    pub fn cover_source(&self) -> String {
        if self.image_url.is_empty() {
            placeholder_image_uri(&self.title)
        } else {
            self.image_url.clone()
        }
    }

    /// At most [`MAX_CATEGORY_TAGS`] trimmed category tags; the rest are
    /// dropped, not summarized.
    pub fn category_tags(&self) -> Vec<&str> {
        self.categories
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .take(MAX_CATEGORY_TAGS)
            .collect()
    }

    /// Numeric rating to one decimal; "0.0" when unrated.
    pub fn rating_display(&self) -> String {
        format!("{:.1}", self.rating)
    }

    /// Filled stars out of 5, rounded to the nearest integer.
    pub fn star_count(&self) -> usize {
        (self.rating.round().clamp(0.0, 5.0)) as usize
    }

    pub fn page_count_display(&self) -> String {
        match self.page_count {
            Some(n) => n.to_string(),
            None => "N/A".to_string(),
        }
    }

    /// Whether Enter-on-card has somewhere real to go.
    pub fn has_info_link(&self) -> bool {
        !self.info_link.is_empty() && self.info_link != "#"
    }
}

/// One entry of the working list: a real catalog record or a synthetic
/// placeholder padding a failed result set. Never both.
#[derive(Debug, Clone)]
pub enum CardRecord {
    Book(BookRecord),
    Placeholder { id: String },
}

impl CardRecord {
    pub fn is_placeholder(&self) -> bool {
        matches!(self, CardRecord::Placeholder { .. })
    }

    pub fn as_book(&self) -> Option<&BookRecord> {
        match self {
            CardRecord::Book(book) => Some(book),
            CardRecord::Placeholder { .. } => None,
        }
    }
}

/// Fixed-length all-placeholder working list, used whenever a fetch fails
/// so the grid layout never collapses.
pub fn placeholder_list() -> Vec<CardRecord> {
    (0..MAX_RESULTS)
        .map(|i| CardRecord::Placeholder {
            id: format!("dummy-{}", i),
        })
        .collect()
}

/// Map an upstream payload into normalized records, capped at
/// [`MAX_RESULTS`]. Absent `items` is an empty list.
pub fn normalize(response: VolumesResponse) -> Vec<BookRecord> {
    response
        .items
        .unwrap_or_default()
        .into_iter()
        .take(MAX_RESULTS)
        .map(BookRecord::from_volume)
        .collect()
}

// ---------------------------------------------------------------------------
// HTTP client
// ---------------------------------------------------------------------------

/// Blocking catalog search client. One instance is shared across fetch
/// worker threads via `Arc`.
pub struct CatalogClient {
    http: reqwest::blocking::Client,
    api_key: Option<String>,
}

impl CatalogClient {
    pub fn new(api_key: Option<String>) -> Result<Self> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(HTTP_TIMEOUT_SECS))
            .build()?;

        Ok(Self { http, api_key })
    }

    /// Issue one catalog search and normalize the result.
    ///
    /// `q` is URL-encoded by the query builder; `maxResults` is fixed at 35.
    /// The API key is passed as a query parameter only when configured.
    pub fn search(&self, query: &str) -> Result<Vec<BookRecord>> {
        let mut params: Vec<(&str, String)> = vec![
            ("q", query.to_string()),
            ("maxResults", MAX_RESULTS.to_string()),
        ];
        if let Some(key) = &self.api_key {
            params.push(("key", key.clone()));
        }

        logging::debug("CATALOG", &format!("GET {} q='{}'", CATALOG_BASE_URL, query));

        let response = self.http.get(CATALOG_BASE_URL).query(&params).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(BookshowError::CatalogStatus(
                status.as_u16(),
                query.to_string(),
            ));
        }

        let payload: VolumesResponse = response
            .json()
            .map_err(|e| BookshowError::Decode(e.to_string()))?;

        Ok(normalize(payload))
    }
}

// ---------------------------------------------------------------------------
// Generated cover placeholder
// ---------------------------------------------------------------------------

/// First letter of up to the first 3 words, uppercased and space-joined.
fn title_initials(title: &str) -> String {
    title
        .split_whitespace()
        .take(3)
        .filter_map(|word| word.chars().next())
        .flat_map(|c| c.to_uppercase())
        .map(|c| c.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

/// SVG data URI standing in for missing cover art, showing the title's
/// initials on a dark slate background.
pub fn placeholder_image_uri(title: &str) -> String {
    let initials = title_initials(title);

    let svg = format!(
        r##"<svg xmlns="http://www.w3.org/2000/svg" width="600" height="900" viewBox="0 0 600 900"><rect width="100%" height="100%" fill="#2D3748"/><text x="50%" y="50%" fill="#4A5568" font-family="monospace" font-size="80" text-anchor="middle" dominant-baseline="middle">{}</text></svg>"##,
        initials
    );

    format!("data:image/svg+xml;utf8,{}", percent_encode_component(&svg))
}

/// Percent-encode a data-URI payload, leaving the characters
/// `encodeURIComponent` leaves unreserved.
fn percent_encode_component(input: &str) -> String {
    let mut out = String::with_capacity(input.len() * 2);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> VolumesResponse {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn normalizes_full_volume() {
        let response = parse(
            r#"{
                "items": [{
                    "id": "abc123",
                    "volumeInfo": {
                        "title": "The Rust Book",
                        "authors": ["Steve Klabnik", "Carol Nichols"],
                        "categories": ["Computers", "Programming"],
                        "averageRating": 4.5,
                        "pageCount": 560,
                        "printType": "BOOK",
                        "ratingsCount": 120,
                        "imageLinks": {"thumbnail": "http://example.com/c.jpg"},
                        "description": "Learn Rust.",
                        "infoLink": "http://example.com/info"
                    }
                }]
            }"#,
        );

        let records = normalize(response);
        assert_eq!(records.len(), 1);
        let book = &records[0];
        assert_eq!(book.id, "abc123");
        assert_eq!(book.authors, "Steve Klabnik, Carol Nichols");
        assert_eq!(book.categories, "Computers, Programming");
        assert_eq!(book.rating, 4.5);
        assert_eq!(book.ratings_count, 120);
        assert_eq!(book.page_count, Some(560));
        assert_eq!(book.image_url, "http://example.com/c.jpg");
        assert_eq!(book.info_link, "http://example.com/info");
    }

    #[test]
    fn substitutes_defaults_for_absent_fields() {
        let response = parse(r#"{"items": [{"id": "bare", "volumeInfo": {}}]}"#);
        let records = normalize(response);
        let book = &records[0];

        assert_eq!(book.title, "Untitled");
        assert_eq!(book.authors, "Unknown Author");
        assert_eq!(book.categories, "General");
        assert_eq!(book.rating, 0.0);
        assert_eq!(book.ratings_count, 0);
        assert_eq!(book.page_count, None);
        assert_eq!(book.page_count_display(), "N/A");
        assert_eq!(book.print_type, "Unknown");
        assert_eq!(book.image_url, "");
        assert_eq!(book.description, "");
        assert_eq!(book.info_link, "#");
        assert!(!book.has_info_link());
    }

    #[test]
    fn missing_items_is_empty_not_error() {
        let records = normalize(parse(r#"{}"#));
        assert!(records.is_empty());
    }

    #[test]
    fn truncates_to_max_results() {
        let items: Vec<String> = (0..50)
            .map(|i| format!(r#"{{"id": "v{}", "volumeInfo": {{}}}}"#, i))
            .collect();
        let json = format!(r#"{{"items": [{}]}}"#, items.join(","));
        let records = normalize(parse(&json));
        assert_eq!(records.len(), MAX_RESULTS);
    }

    #[test]
    fn placeholder_list_pads_to_fixed_length() {
        let list = placeholder_list();
        assert_eq!(list.len(), MAX_RESULTS);
        assert!(list.iter().all(CardRecord::is_placeholder));
        assert!(matches!(
            &list[0],
            CardRecord::Placeholder { id } if id == "dummy-0"
        ));
    }

    #[test]
    fn cover_initials_take_first_three_words() {
        let mut book = BookRecord::from_volume(VolumeItem {
            id: "x".into(),
            volume_info: Some(VolumeInfo {
                title: Some("the lord of the rings".into()),
                ..Default::default()
            }),
        });
        assert_eq!(book.cover_initials(), "T L O");

        book.title = "dune".into();
        assert_eq!(book.cover_initials(), "D");
    }

    #[test]
    fn placeholder_uri_embeds_uppercased_initials() {
        let uri = placeholder_image_uri("war and peace");
        assert!(uri.starts_with("data:image/svg+xml;utf8,"));
        // "W A P" percent-encodes its spaces
        assert!(uri.contains("W%20A%20P"));
        assert!(uri.contains("%232D3748"));
    }

    #[test]
    fn cover_source_falls_back_to_generated_placeholder() {
        let book = BookRecord::from_volume(VolumeItem {
            id: "x".into(),
            volume_info: Some(VolumeInfo {
                title: Some("Dune".into()),
                ..Default::default()
            }),
        });
        assert!(book.cover_source().starts_with("data:image/svg+xml"));
    }

    #[test]
    fn category_tags_capped_at_three() {
        let book = BookRecord::from_volume(VolumeItem {
            id: "x".into(),
            volume_info: Some(VolumeInfo {
                categories: Some(vec![
                    "Fiction".into(),
                    "Fantasy".into(),
                    "Epic".into(),
                    "Classics".into(),
                    "Adventure".into(),
                ]),
                ..Default::default()
            }),
        });
        assert_eq!(book.category_tags(), vec!["Fiction", "Fantasy", "Epic"]);
    }

    #[test]
    fn rating_display_and_stars() {
        let mut book = BookRecord::from_volume(VolumeItem {
            id: "x".into(),
            volume_info: Some(VolumeInfo {
                average_rating: Some(4.4),
                ..Default::default()
            }),
        });
        assert_eq!(book.rating_display(), "4.4");
        assert_eq!(book.star_count(), 4);

        book.rating = 4.5;
        assert_eq!(book.star_count(), 5);

        book.rating = 0.0;
        assert_eq!(book.rating_display(), "0.0");
        assert_eq!(book.star_count(), 0);
    }
}
