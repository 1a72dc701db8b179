use chrono::{DateTime, Utc};

use crate::{date::ShootingDate, ids::ItemId, text::rich_text_to_plain};

/// Image reference attached to a content record.
///
/// Width and height are whatever the content store reported for the upload;
/// they are optional and only used to derive an aspect ratio.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Photo {
    pub url: String,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub width: Option<u32>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub height: Option<u32>,
}

impl Photo {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            width: None,
            height: None,
        }
    }

    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self
    }

    /// Width over height, when both dimensions are known and non-zero.
    pub fn aspect_ratio(&self) -> Option<f32> {
        match (self.width, self.height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Some(w as f32 / h as f32),
            _ => None,
        }
    }
}

/// A single gallery record. Immutable once fetched.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct Item {
    pub id: ItemId,
    #[cfg_attr(feature = "serde", serde(default))]
    pub title: String,
    /// Rich-text (HTML) body as authored in the content store.
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub body: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(
            default,
            rename = "shootingdate",
            skip_serializing_if = "Option::is_none"
        )
    )]
    pub shooting_date: Option<String>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub photo: Option<Photo>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub created_at: Option<DateTime<Utc>>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub published_at: Option<DateTime<Utc>>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub updated_at: Option<DateTime<Utc>>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub revised_at: Option<DateTime<Utc>>,
}

impl Item {
    pub fn new(id: ItemId, title: impl Into<String>) -> Self {
        Self {
            id,
            title: title.into(),
            body: None,
            shooting_date: None,
            photo: None,
            created_at: None,
            published_at: None,
            updated_at: None,
            revised_at: None,
        }
    }

    pub fn with_photo(mut self, photo: Photo) -> Self {
        self.photo = Some(photo);
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_shooting_date(mut self, raw: impl Into<String>) -> Self {
        self.shooting_date = Some(raw.into());
        self
    }

    pub fn image_url(&self) -> Option<&str> {
        self.photo
            .as_ref()
            .map(|p| p.url.as_str())
            .filter(|url| !url.is_empty())
    }

    /// Body converted to plain text, `None` when absent or blank.
    pub fn body_text(&self) -> Option<String> {
        self.body
            .as_deref()
            .map(rich_text_to_plain)
            .filter(|text| !text.is_empty())
    }

    /// Parsed shooting date; malformed values are treated as absent.
    pub fn shooting_date(&self) -> Option<ShootingDate> {
        self.shooting_date
            .as_deref()
            .and_then(|raw| ShootingDate::parse(raw).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item() -> Item {
        Item::new(ItemId::new("a1").unwrap(), "Jiufen")
    }

    #[test]
    fn aspect_ratio_requires_both_dimensions() {
        assert_eq!(Photo::new("u").aspect_ratio(), None);
        let photo = Photo::new("u").with_dimensions(1600, 800);
        assert_eq!(photo.aspect_ratio(), Some(2.0));
        let zero = Photo::new("u").with_dimensions(0, 800);
        assert_eq!(zero.aspect_ratio(), None);
    }

    #[test]
    fn blank_body_and_missing_image_are_absent() {
        let it = item().with_body("<p> </p>");
        assert_eq!(it.body_text(), None);
        assert_eq!(it.image_url(), None);
        assert_eq!(item().with_photo(Photo::new("")).image_url(), None);
    }

    #[test]
    fn malformed_shooting_date_is_ignored() {
        assert!(item().with_shooting_date("soon").shooting_date().is_none());
        assert!(
            item()
                .with_shooting_date("2021-03-04")
                .shooting_date()
                .is_some()
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn decodes_content_store_record() {
        let raw = r#"{
            "id": "x9",
            "title": "Night market",
            "body": "<p>Shilin</p>",
            "shootingdate": "2022-11-05T15:00:00.000Z",
            "photo": {"url": "https://img/x9.jpg", "width": 1200, "height": 800},
            "createdAt": "2023-01-01T00:00:00.000Z",
            "publishedAt": "2023-01-01T00:00:00.000Z",
            "category": {"id": "ignored"}
        }"#;
        let item: Item = serde_json::from_str(raw).unwrap();
        assert_eq!(item.id.as_str(), "x9");
        assert_eq!(item.image_url(), Some("https://img/x9.jpg"));
        assert_eq!(item.photo.unwrap().aspect_ratio(), Some(1.5));
        assert!(item.created_at.is_some());
        assert!(item.updated_at.is_none());
    }
}
