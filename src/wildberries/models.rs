//! Request and response models for the Wildberries content API.

use serde::{Deserialize, Serialize};

/// Body of `POST /content/v2/get/cards/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardsListRequest {
    pub settings: CardsSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardsSettings {
    pub cursor: RequestCursor,
    pub filter: CardsFilter,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestCursor {
    pub limit: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardsFilter {
    #[serde(rename = "objectIDs")]
    pub object_ids: Vec<u64>,
    /// `-1` lists cards with and without photos.
    #[serde(rename = "withPhoto")]
    pub with_photo: i32,
}

impl CardsListRequest {
    /// Builds a request for one subject, regardless of photo presence.
    pub fn for_subject(subject_id: u64, limit: u32) -> Self {
        Self {
            settings: CardsSettings {
                cursor: RequestCursor { limit },
                filter: CardsFilter { object_ids: vec![subject_id], with_photo: -1 },
            },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardsListResponse {
    #[serde(default)]
    pub cards: Vec<Card>,
    #[serde(default)]
    pub cursor: ResponseCursor,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResponseCursor {
    #[serde(default)]
    pub total: i64,
    #[serde(rename = "updatedAt", default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(rename = "nmID", default, skip_serializing_if = "Option::is_none")]
    pub nm_id: Option<i64>,
}

/// A catalog card. Only the fields used for export are modelled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Card {
    #[serde(rename = "nmID")]
    pub nm_id: i64,
    #[serde(rename = "vendorCode", default)]
    pub vendor_code: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "subjectName", default)]
    pub subject_name: Option<String>,
    #[serde(default)]
    pub sizes: Vec<CardSize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardSize {
    #[serde(rename = "techSize", default)]
    pub tech_size: Option<String>,
    #[serde(default)]
    pub skus: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_body_shape() {
        let request = CardsListRequest::for_subject(435, 100);
        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "settings": {
                    "cursor": { "limit": 100 },
                    "filter": { "objectIDs": [435], "withPhoto": -1 }
                }
            })
        );
    }

    #[test]
    fn test_parse_cards_response() {
        let body = r#"{
            "cards": [{
                "nmID": 123456,
                "imtID": 99,
                "subjectID": 435,
                "subjectName": "Подушки",
                "vendorCode": "PIL-001",
                "title": "Подушка декоративная",
                "photos": [],
                "sizes": [
                    {"chrtID": 1, "techSize": "40x40", "skus": ["2000000000011", "2000000000028"]},
                    {"chrtID": 2, "techSize": "50x50", "skus": ["2000000000035"]}
                ]
            }],
            "cursor": {"updatedAt": "2024-05-01T10:00:00Z", "nmID": 123456, "total": 1}
        }"#;

        let response: CardsListResponse = serde_json::from_str(body).unwrap();
        assert_eq!(response.cards.len(), 1);
        assert_eq!(response.cursor.total, 1);
        assert_eq!(response.cursor.nm_id, Some(123456));

        let card = &response.cards[0];
        assert_eq!(card.nm_id, 123456);
        assert_eq!(card.vendor_code, "PIL-001");
        assert_eq!(card.subject_name.as_deref(), Some("Подушки"));
        assert_eq!(card.sizes.len(), 2);
        assert_eq!(card.sizes[0].tech_size.as_deref(), Some("40x40"));
        assert_eq!(card.sizes[0].skus, vec!["2000000000011", "2000000000028"]);
    }

    #[test]
    fn test_parse_card_missing_optional_fields() {
        let body = r#"{"cards": [{"nmID": 1, "vendorCode": "A"}]}"#;
        let response: CardsListResponse = serde_json::from_str(body).unwrap();

        let card = &response.cards[0];
        assert!(card.title.is_none());
        assert!(card.subject_name.is_none());
        assert!(card.sizes.is_empty());
        assert_eq!(response.cursor.total, 0);
    }
}
