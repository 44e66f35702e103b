use serde::{Deserialize, Serialize};

use minutes_domain::meeting::Meeting;

use crate::{Error, MinutesService, Result};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ContextRequest {
	pub user_id: String,
	pub text: String,
	#[serde(default)]
	pub n_results: Option<u32>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ContextResponse {
	pub items: Vec<Meeting>,
}

impl MinutesService {
	/// Nearest stored meetings for a new transcript, best match first. An
	/// empty collection is a valid "no context" state, not an error.
	pub async fn relevant_context(&self, req: ContextRequest) -> Result<ContextResponse> {
		let user_id = req.user_id.trim();
		let text = req.text.trim();

		if user_id.is_empty() {
			return Err(Error::InvalidRequest { message: "user_id is required.".to_string() });
		}
		if text.is_empty() {
			return Err(Error::InvalidRequest { message: "text must not be empty.".to_string() });
		}

		self.store.ensure_collection(user_id).await?;

		let count = self.store.count(user_id).await?;

		if count == 0 {
			return Ok(ContextResponse { items: Vec::new() });
		}

		let requested = u64::from(req.n_results.unwrap_or(self.cfg.context.default_results));

		// Zero-limit searches are rejected by the index; report "no context"
		// instead.
		if requested == 0 {
			return Ok(ContextResponse { items: Vec::new() });
		}

		let vector = self.embed_one(text).await?;
		let hits = self.store.search(user_id, vector, requested.min(count)).await?;
		let items = hits
			.into_iter()
			.map(|hit| {
				let mut item = hit.record.into_meeting();

				// 1 - distance only lands in [0, 1] under the cosine metric the
				// store is created with.
				item.similarity_score = Some(round3(1.0 - hit.distance));

				item
			})
			.collect::<Vec<_>>();

		tracing::info!(user_id, count = items.len(), "Found relevant meetings for context.");

		Ok(ContextResponse { items })
	}
}

fn round3(value: f32) -> f32 {
	(value * 1_000.0).round() / 1_000.0
}
