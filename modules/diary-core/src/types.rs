use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One logged viewing from a diary page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub media_id: Option<String>,
    /// Film slug with any trailing `-YYYY` stripped.
    pub slug: Option<String>,
    pub title: String,
    /// Present iff both `media_id` and `slug` are present.
    pub image_url: Option<String>,
    pub logged_date: Option<NaiveDate>,
    /// Half-star units, 0..=10.
    pub score: Option<u8>,
    pub favorited: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileIdentity {
    pub display_name: String,
    /// Large avatar address. `None` means the caller should use a placeholder.
    pub avatar_url: Option<String>,
}

/// Parsed contents of a single fetched page.
#[derive(Debug, Clone, Default)]
pub struct PageBundle {
    /// Number of pagination items. Only meaningful on page 1.
    pub page_count: usize,
    /// Only meaningful on page 1.
    pub identity: ProfileIdentity,
    pub entries: Vec<Entry>,
}

/// Every entry across all pages, first page first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiaryResult {
    pub entries: Vec<Entry>,
    pub identity: ProfileIdentity,
}

impl DiaryResult {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_serializes_with_camel_case_keys() {
        let entry = Entry {
            media_id: Some("784328".to_string()),
            slug: Some("oppenheimer".to_string()),
            title: "Oppenheimer".to_string(),
            image_url: None,
            logged_date: NaiveDate::from_ymd_opt(2023, 7, 15),
            score: Some(8),
            favorited: true,
        };

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["mediaId"], "784328");
        assert_eq!(json["loggedDate"], "2023-07-15");
        assert_eq!(json["score"], 8);
        assert!(json["imageUrl"].is_null());
        assert_eq!(json["favorited"], true);
    }

    #[test]
    fn identity_serializes_missing_avatar_as_null() {
        let identity = ProfileIdentity {
            display_name: "Jane".to_string(),
            avatar_url: None,
        };
        let json = serde_json::to_value(&identity).unwrap();
        assert_eq!(json["displayName"], "Jane");
        assert!(json["avatarUrl"].is_null());
    }
}
