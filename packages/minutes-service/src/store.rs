use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use minutes_domain::{
	category::{self, MeetingCategory},
	meeting,
};
use minutes_storage::models::MeetingRecord;

use crate::{Error, MeetingOp, MinutesService, Result};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct StoreMeetingRequest {
	pub user_id: String,
	pub meeting_text: String,
	#[serde(default)]
	pub categories: Option<Vec<MeetingCategory>>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct StoreMeetingResponse {
	pub meeting_id: String,
	pub op: MeetingOp,
	pub categories: Vec<MeetingCategory>,
}

impl MinutesService {
	pub async fn store_meeting(&self, req: StoreMeetingRequest) -> Result<StoreMeetingResponse> {
		let user_id = req.user_id.trim();
		let text = req.meeting_text.trim();

		if user_id.is_empty() {
			return Err(Error::InvalidRequest { message: "user_id is required.".to_string() });
		}
		if text.is_empty() {
			return Err(Error::InvalidRequest {
				message: "meeting_text must not be empty.".to_string(),
			});
		}

		let now = OffsetDateTime::now_utc();
		let stored_text = meeting::truncate_text(text, meeting::STORED_TEXT_CHARS);
		let content_hash = meeting::content_hash(&stored_text);
		let meeting_id = meeting::meeting_id(now, &content_hash)
			.map_err(|_| Error::Storage { message: "Failed to format meeting id.".to_string() })?;
		let timestamp = meeting::rfc3339_timestamp(now)
			.map_err(|_| Error::Storage { message: "Failed to format timestamp.".to_string() })?;

		// The scan-then-insert below must not interleave for one user, or two
		// identical stores both pass the duplicate check.
		let lock = self.user_lock(user_id);
		let _guard = lock.lock().await;

		self.store.ensure_collection(user_id).await?;

		let existing = self.store.all_records(user_id).await?;

		if let Some(record) = existing.iter().find(|record| record.content_hash == content_hash) {
			tracing::info!(
				user_id,
				meeting_id = %record.meeting_id,
				"Skipping duplicate meeting content."
			);

			return Ok(StoreMeetingResponse {
				meeting_id: record.meeting_id.clone(),
				op: MeetingOp::Duplicate,
				categories: record.categories.clone(),
			});
		}

		let categories = match req.categories.filter(|categories| !categories.is_empty()) {
			Some(categories) => category::canonicalize(categories),
			None => category::categorize(&stored_text),
		};
		let vector = self.embed_one(&stored_text).await?;
		let record = MeetingRecord {
			meeting_id: meeting_id.clone(),
			timestamp,
			user_id: user_id.to_string(),
			categories: categories.clone(),
			length: stored_text.chars().count() as u64,
			content_hash,
			text: stored_text,
		};

		self.store.add(user_id, &record, vector).await?;

		tracing::info!(
			user_id,
			meeting_id = %meeting_id,
			categories = %category::encode_categories(&categories),
			"Stored meeting."
		);

		Ok(StoreMeetingResponse { meeting_id, op: MeetingOp::Stored, categories })
	}
}
