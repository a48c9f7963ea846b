//! Data Model
//!
//! Records exchanged with the ticketing API. They are passed through as the
//! server sends them; the only interpretation done here is display
//! formatting.

use chrono::NaiveDateTime;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Server-assigned event identifier
pub type EventId = u64;

/// A listed, ticketable event
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "EventRecord")]
pub struct Event {
    pub id: EventId,
    pub title: String,
    /// Start date as sent by the server (ISO 8601 in practice)
    pub date: String,
    pub venue: String,
    pub location: String,
    pub tag: String,
    pub price: f64,
    pub image: Option<String>,
    pub description: Option<String>,
    pub capacity: Option<u32>,
    pub organizer_id: Option<u64>,
}

/// Event as it arrives on the wire. The storefront and backend spellings
/// (`price`/`ticket_price`, `tag`/`category`, `image`/`image_url`) may both
/// be present; the storefront one wins.
#[derive(Deserialize)]
struct EventRecord {
    id: EventId,
    #[serde(default, deserialize_with = "null_as_default")]
    title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    date: String,
    #[serde(default, deserialize_with = "null_as_default")]
    venue: String,
    #[serde(default, deserialize_with = "null_as_default")]
    location: String,
    #[serde(default)]
    tag: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    price: Option<f64>,
    #[serde(default)]
    ticket_price: Option<f64>,
    #[serde(default)]
    image: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    capacity: Option<u32>,
    #[serde(default)]
    organizer_id: Option<u64>,
}

impl From<EventRecord> for Event {
    fn from(raw: EventRecord) -> Self {
        Self {
            id: raw.id,
            title: raw.title,
            date: raw.date,
            venue: raw.venue,
            location: raw.location,
            tag: raw.tag.or(raw.category).unwrap_or_default(),
            price: raw.price.or(raw.ticket_price).unwrap_or_default(),
            image: raw.image.or(raw.image_url),
            description: raw.description,
            capacity: raw.capacity,
            organizer_id: raw.organizer_id,
        }
    }
}

impl Event {
    /// Parse the start date, accepting the formats the API emits
    pub fn starts_at(&self) -> Option<NaiveDateTime> {
        parse_event_datetime(&self.date)
    }

    /// Date line for cards, falling back to the raw value
    pub fn display_date(&self) -> String {
        self.starts_at()
            .map(|dt| dt.format("%a, %d %b %Y • %H:%M").to_string())
            .unwrap_or_else(|| self.date.clone())
    }

    /// Price rendered as currency
    pub fn display_price(&self) -> String {
        format_price(self.price)
    }

    /// Venue when known, otherwise the location
    pub fn place(&self) -> &str {
        if self.venue.trim().is_empty() {
            &self.location
        } else {
            &self.venue
        }
    }
}

/// Parse `YYYY-MM-DDTHH:MM[:SS[.fff]]` or the same with a space separator
pub fn parse_event_datetime(raw: &str) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    const FORMATS: [&str; 4] = [
        "%Y-%m-%dT%H:%M:%S%.f",
        "%Y-%m-%dT%H:%M",
        "%Y-%m-%d %H:%M:%S%.f",
        "%Y-%m-%d %H:%M",
    ];

    FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .or_else(|| {
            chrono::DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.naive_local())
        })
}

/// Render a price as Rupiah with dot thousands separators: `Rp 150.000`
pub fn format_price(price: f64) -> String {
    let rounded = price.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    if rounded < 0.0 {
        format!("-Rp {}", grouped)
    } else {
        format!("Rp {}", grouped)
    }
}

/// The signed-in user's account record, kept exactly as the server sent it
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Profile(pub Map<String, Value>);

impl Profile {
    /// String value of a field
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn name(&self) -> Option<&str> {
        self.get_str("name")
    }

    pub fn email(&self) -> Option<&str> {
        self.get_str("email")
    }

    pub fn role(&self) -> Option<&str> {
        self.get_str("role")
    }

    /// Every scalar field rendered as text, in server order
    pub fn display_fields(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .filter_map(|(key, value)| {
                let text = match value {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    Value::Bool(b) => b.to_string(),
                    _ => return None,
                };
                Some((key.clone(), text))
            })
            .collect()
    }
}

/// Acknowledgement body of event create/update/delete and registration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct WriteReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub id: Option<EventId>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Login request body; the API accepts an email or a username as identifier
#[derive(Clone, Debug, Serialize)]
pub struct Credentials {
    pub identifier: String,
    pub password: String,
}

/// Successful login response
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user_id: Option<u64>,
    #[serde(default)]
    pub role: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Account role chosen at registration
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Attendee buying tickets
    #[default]
    User,
    /// Organizer managing events
    Admin,
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" | "attendee" => Ok(Role::User),
            "admin" | "organizer" => Ok(Role::Admin),
            other => Err(format!("Unknown role: {}", other)),
        }
    }
}

/// Registration request body
#[derive(Clone, Debug, Serialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

/// Ticket booking request body
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct BookingRequest {
    pub event_id: EventId,
    pub quantity: u32,
}

/// Successful booking response
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct BookingReceipt {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub booking_id: Option<u64>,
    #[serde(default)]
    pub booking_code: Option<String>,
    #[serde(default)]
    pub total_price: Option<f64>,
}

/// One entry of the signed-in user's booking history
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BookingSummary {
    pub id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub booking_code: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub event_title: String,
    #[serde(default)]
    pub event_date: Option<String>,
    #[serde(default)]
    pub quantity: u32,
    #[serde(default)]
    pub total_price: f64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub booking_date: Option<String>,
}

impl BookingSummary {
    /// Event date for display, falling back to the raw value
    pub fn display_event_date(&self) -> String {
        let raw = self.event_date.as_deref().unwrap_or_default();
        parse_event_datetime(raw)
            .map(|dt| dt.format("%a, %d %b %Y • %H:%M").to_string())
            .unwrap_or_else(|| raw.to_string())
    }
}

/// Total charged for `quantity` tickets
pub fn booking_total(price: f64, quantity: u32) -> f64 {
    price * f64::from(quantity)
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
