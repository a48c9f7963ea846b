//! Form Payloads
//!
//! Multipart bodies for the write endpoints, and organizer event input with
//! the checks run before anything is sent.

use chrono::NaiveDateTime;
use std::collections::BTreeMap;

use crate::error::{ApiError, ApiResult};
use crate::models::parse_event_datetime;

/// Date format the API expects for event start times
pub const EVENT_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M";

/// Image extensions the API accepts for event pictures
pub const IMAGE_EXTENSIONS: [&str; 4] = ["jpg", "jpeg", "png", "gif"];

/// Value of one multipart part
#[derive(Clone, Debug, PartialEq)]
pub enum PartValue {
    Text(String),
    File {
        file_name: String,
        mime_type: String,
        bytes: Vec<u8>,
    },
}

/// One named multipart part
#[derive(Clone, Debug, PartialEq)]
pub struct FormPart {
    pub name: String,
    pub value: PartValue,
}

/// Ordered multipart/form-data payload
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MultipartForm {
    parts: Vec<FormPart>,
}

impl MultipartForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text field
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(FormPart {
            name: name.into(),
            value: PartValue::Text(value.into()),
        });
        self
    }

    /// Append a file field
    pub fn file(mut self, name: impl Into<String>, upload: FileUpload) -> Self {
        self.parts.push(FormPart {
            name: name.into(),
            value: PartValue::File {
                file_name: upload.file_name,
                mime_type: upload.mime_type,
                bytes: upload.bytes,
            },
        });
        self
    }

    pub fn parts(&self) -> &[FormPart] {
        &self.parts
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    /// First text value with this name
    pub fn text_value(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|part| match &part.value {
            PartValue::Text(value) if part.name == name => Some(value.as_str()),
            _ => None,
        })
    }
}

/// A file picked by the user
#[derive(Clone, Debug, PartialEq)]
pub struct FileUpload {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl FileUpload {
    /// Build an upload, guessing the MIME type from the extension when the
    /// caller doesn't know it
    pub fn new(file_name: impl Into<String>, mime_type: Option<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_type
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| mime_for(&file_name).to_string());
        Self {
            file_name,
            mime_type,
            bytes,
        }
    }

    /// Lowercased extension, if any
    pub fn extension(&self) -> Option<String> {
        let (_, ext) = self.file_name.rsplit_once('.')?;
        Some(ext.to_lowercase())
    }

    /// Whether the API will accept this file as an event picture
    pub fn is_supported_image(&self) -> bool {
        self.extension()
            .map(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
            .unwrap_or(false)
    }
}

fn mime_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        _ => "application/octet-stream",
    }
}

/// Organizer input for an event, exactly as typed
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EventDraft {
    pub title: String,
    pub description: String,
    /// `YYYY-MM-DDTHH:MM`, the value of a datetime-local input
    pub date: String,
    pub location: String,
    pub venue: String,
    pub tag: String,
    pub capacity: String,
    pub ticket_price: String,
    pub image: Option<FileUpload>,
}

impl EventDraft {
    /// Check every field, reporting all problems at once
    pub fn validate(&self) -> ApiResult<EventForm> {
        let mut problems = BTreeMap::new();

        let title = self.title.trim();
        if title.is_empty() {
            problems.insert("title".to_string(), "Title is required".to_string());
        }

        let location = self.location.trim();
        if location.is_empty() {
            problems.insert("location".to_string(), "Location is required".to_string());
        }

        let starts_at = parse_event_datetime(&self.date);
        if starts_at.is_none() {
            problems.insert(
                "date".to_string(),
                "Use the format YYYY-MM-DDTHH:MM".to_string(),
            );
        }

        let capacity = match self.capacity.trim().parse::<u32>() {
            Ok(n) if n > 0 => Some(n),
            _ => {
                problems.insert(
                    "capacity".to_string(),
                    "Capacity must be a whole number above zero".to_string(),
                );
                None
            }
        };

        let ticket_price = match self.ticket_price.trim().parse::<f64>() {
            Ok(p) if p.is_finite() && p >= 0.0 => Some(p.round() as u64),
            _ => {
                problems.insert(
                    "ticket_price".to_string(),
                    "Price must be zero or a positive number".to_string(),
                );
                None
            }
        };

        if let Some(image) = &self.image {
            if !image.is_supported_image() {
                problems.insert(
                    "image".to_string(),
                    "Only JPG, PNG and GIF images are accepted".to_string(),
                );
            }
        }

        match (starts_at, capacity, ticket_price) {
            (Some(starts_at), Some(capacity), Some(ticket_price)) if problems.is_empty() => {
                Ok(EventForm {
                    title: title.to_string(),
                    description: self.description.trim().to_string(),
                    starts_at,
                    location: location.to_string(),
                    venue: self.venue.trim().to_string(),
                    tag: self.tag.trim().to_string(),
                    capacity,
                    ticket_price,
                    image: self.image.clone(),
                })
            }
            _ => Err(ApiError::invalid_fields(problems)),
        }
    }
}

/// Validated event input, ready to send
#[derive(Clone, Debug, PartialEq)]
pub struct EventForm {
    pub title: String,
    pub description: String,
    pub starts_at: NaiveDateTime,
    pub location: String,
    pub venue: String,
    pub tag: String,
    pub capacity: u32,
    pub ticket_price: u64,
    pub image: Option<FileUpload>,
}

impl EventForm {
    /// Multipart payload in the field layout of the events endpoints
    pub fn to_multipart(&self) -> MultipartForm {
        let mut form = MultipartForm::new()
            .text("title", &self.title)
            .text("description", &self.description)
            .text("date", self.starts_at.format(EVENT_DATE_FORMAT).to_string())
            .text("location", &self.location)
            .text("capacity", self.capacity.to_string())
            .text("ticket_price", self.ticket_price.to_string());

        if !self.venue.is_empty() {
            form = form.text("venue", &self.venue);
        }
        if !self.tag.is_empty() {
            form = form.text("tag", &self.tag);
        }
        if let Some(image) = &self.image {
            form = form.file("image", image.clone());
        }

        form
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> EventDraft {
        EventDraft {
            title: "  Konser Indie ".to_string(),
            description: "Live band".to_string(),
            date: "2025-08-17T19:30".to_string(),
            location: "Bandar Lampung".to_string(),
            venue: "Taman Budaya".to_string(),
            tag: "Musik".to_string(),
            capacity: "200".to_string(),
            ticket_price: "75000".to_string(),
            image: None,
        }
    }

    #[test]
    fn test_valid_draft() {
        let form = draft().validate().unwrap();
        assert_eq!(form.title, "Konser Indie");
        assert_eq!(form.capacity, 200);
        assert_eq!(form.ticket_price, 75000);
        assert_eq!(
            form.starts_at.format(EVENT_DATE_FORMAT).to_string(),
            "2025-08-17T19:30"
        );
    }

    #[test]
    fn test_space_separated_date_is_accepted() {
        let mut d = draft();
        d.date = "2025-08-17 19:30".to_string();
        assert!(d.validate().is_ok());
    }

    #[test]
    fn test_all_problems_are_reported() {
        let d = EventDraft {
            capacity: "0".to_string(),
            ticket_price: "-10".to_string(),
            date: "next friday".to_string(),
            ..EventDraft::default()
        };

        let err = d.validate().unwrap_err();
        for field in ["title", "location", "date", "capacity", "ticket_price"] {
            assert!(err.field(field).is_some(), "missing problem for {}", field);
        }
        assert!(matches!(err, ApiError::Validation { .. }));
    }

    #[test]
    fn test_price_must_be_a_number() {
        let mut d = draft();
        d.ticket_price = "gratis".to_string();
        let err = d.validate().unwrap_err();
        assert_eq!(err.field("ticket_price"), Some("Price must be zero or a positive number"));

        d.ticket_price = "0".to_string();
        assert_eq!(d.validate().unwrap().ticket_price, 0);
    }

    #[test]
    fn test_image_extension_is_checked() {
        let mut d = draft();
        d.image = Some(FileUpload::new("poster.bmp", None, vec![1, 2, 3]));
        assert!(d.validate().unwrap_err().field("image").is_some());

        d.image = Some(FileUpload::new("poster.PNG", None, vec![1, 2, 3]));
        let form = d.validate().unwrap();
        assert_eq!(form.image.unwrap().mime_type, "image/png");
    }

    #[test]
    fn test_multipart_layout() {
        let mut d = draft();
        d.image = Some(FileUpload::new("poster.jpg", Some("image/jpeg".to_string()), vec![0xff]));
        let form = d.validate().unwrap().to_multipart();

        assert_eq!(form.text_value("title"), Some("Konser Indie"));
        assert_eq!(form.text_value("date"), Some("2025-08-17T19:30"));
        assert_eq!(form.text_value("ticket_price"), Some("75000"));
        assert_eq!(form.text_value("venue"), Some("Taman Budaya"));

        let image = form.parts().iter().find(|p| p.name == "image").unwrap();
        assert!(matches!(
            &image.value,
            PartValue::File { file_name, .. } if file_name == "poster.jpg"
        ));
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let mut d = draft();
        d.venue = "  ".to_string();
        d.tag = String::new();
        let form = d.validate().unwrap().to_multipart();

        assert_eq!(form.text_value("venue"), None);
        assert_eq!(form.text_value("tag"), None);
        assert!(!form.is_empty());
    }
}
