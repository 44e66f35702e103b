use std::collections::HashMap;

use qdrant_client::{
	Payload,
	qdrant::{Value, value::Kind},
};

use minutes_domain::{
	category::{MeetingCategory, decode_categories, encode_categories},
	meeting::{DISPLAY_TEXT_CHARS, Meeting, truncate_text},
};

/// Fallback id for payloads written before the id field existed, or mangled
/// out-of-band. Such records are readable but not addressable.
pub const UNKNOWN_MEETING_ID: &str = "unknown_meeting";

/// The flat payload form of a meeting as persisted in Qdrant. Categories are
/// comma-joined on write and decoded defensively on read.
#[derive(Clone, Debug)]
pub struct MeetingRecord {
	pub meeting_id: String,
	pub text: String,
	pub timestamp: String,
	pub user_id: String,
	pub categories: Vec<MeetingCategory>,
	pub length: u64,
	pub content_hash: String,
}
impl MeetingRecord {
	pub fn payload(&self) -> Payload {
		let mut payload = Payload::new();

		payload.insert("meeting_id", self.meeting_id.clone());
		payload.insert("text", self.text.clone());
		payload.insert("timestamp", self.timestamp.clone());
		payload.insert("user_id", self.user_id.clone());
		payload.insert("categories", encode_categories(&self.categories));
		payload.insert("length", Value::from(self.length as i64));
		payload.insert("hash", self.content_hash.clone());

		payload
	}

	/// Never fails: missing fields fall back to empty strings or `{other}` so
	/// that a damaged record is tolerated and filtered downstream instead of
	/// poisoning a whole scan.
	pub fn from_payload(payload: &HashMap<String, Value>) -> Self {
		let text = payload_str(payload, "text").unwrap_or_default();
		let categories = match payload_str(payload, "categories") {
			Some(raw) => decode_categories(&raw),
			None => vec![MeetingCategory::Other],
		};
		let length = payload_u64(payload, "length").unwrap_or(text.chars().count() as u64);

		Self {
			meeting_id: payload_str(payload, "meeting_id")
				.unwrap_or_else(|| UNKNOWN_MEETING_ID.to_string()),
			timestamp: payload_str(payload, "timestamp").unwrap_or_default(),
			user_id: payload_str(payload, "user_id").unwrap_or_default(),
			content_hash: payload_str(payload, "hash").unwrap_or_default(),
			text,
			categories,
			length,
		}
	}

	pub fn into_meeting(self) -> Meeting {
		Meeting {
			meeting_id: self.meeting_id,
			text: truncate_text(&self.text, DISPLAY_TEXT_CHARS),
			timestamp: self.timestamp,
			categories: self.categories,
			similarity_score: None,
		}
	}
}

fn payload_str(payload: &HashMap<String, Value>, key: &str) -> Option<String> {
	let value = payload.get(key)?;

	match &value.kind {
		Some(Kind::StringValue(text)) => Some(text.clone()),
		_ => None,
	}
}

fn payload_u64(payload: &HashMap<String, Value>, key: &str) -> Option<u64> {
	let value = payload.get(key)?;

	match &value.kind {
		Some(Kind::IntegerValue(value)) => u64::try_from(*value).ok(),
		Some(Kind::DoubleValue(value)) =>
			if value.fract() == 0.0 && *value >= 0.0 {
				Some(*value as u64)
			} else {
				None
			},
		_ => None,
	}
}
