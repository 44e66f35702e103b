use serde::{Deserialize, Serialize};
use time::{
	OffsetDateTime,
	format_description::{BorrowedFormatItem, well_known::Rfc3339},
	macros::format_description,
};

use crate::category::MeetingCategory;

/// Stored transcripts are cut at this many characters.
pub const STORED_TEXT_CHARS: usize = 1_000;
/// Every read path cuts again to this many characters.
pub const DISPLAY_TEXT_CHARS: usize = 500;
pub const TRUNCATION_MARKER: &str = "...";

const MEETING_ID_STAMP: &[BorrowedFormatItem<'static>] =
	format_description!("[year][month][day]_[hour][minute][second]");

/// The central entity. `similarity_score` is only present on
/// context-retrieval results; plain history reads leave it unset.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Meeting {
	pub meeting_id: String,
	pub text: String,
	pub timestamp: String,
	pub categories: Vec<MeetingCategory>,
	pub similarity_score: Option<f32>,
}

pub fn truncate_text(text: &str, max_chars: usize) -> String {
	if text.chars().count() <= max_chars {
		return text.to_string();
	}

	let mut truncated = text.chars().take(max_chars).collect::<String>();

	truncated.push_str(TRUNCATION_MARKER);

	truncated
}

/// Blake3 hex digest of the post-truncation text; used only for
/// exact-duplicate detection within a user's namespace.
pub fn content_hash(text: &str) -> String {
	blake3::hash(text.as_bytes()).to_hex().to_string()
}

/// `meeting_<UTC stamp, second precision>_<first 8 hex chars of the hash>`.
/// Stable once assigned; doubles as the lookup key.
pub fn meeting_id(
	now: OffsetDateTime,
	content_hash: &str,
) -> Result<String, time::error::Format> {
	let stamp = now.format(MEETING_ID_STAMP)?;
	let prefix = content_hash.get(..8).unwrap_or(content_hash);

	Ok(format!("meeting_{stamp}_{prefix}"))
}

pub fn rfc3339_timestamp(now: OffsetDateTime) -> Result<String, time::error::Format> {
	now.format(&Rfc3339)
}
