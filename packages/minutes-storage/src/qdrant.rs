use qdrant_client::{
	Qdrant,
	qdrant::{
		CountPointsBuilder, CreateCollectionBuilder, DeletePointsBuilder, Distance, PointId,
		PointStruct, ScrollPointsBuilder, SearchPointsBuilder, UpsertPointsBuilder,
		VectorParamsBuilder,
	},
};
use uuid::Uuid;

use crate::{Result, models::MeetingRecord};

const SCROLL_PAGE_SIZE: u32 = 256;

/// Collection naming is part of the durable contract; renaming the scheme
/// orphans every existing user collection.
pub fn collection_name(user_id: &str) -> String {
	format!("user_{user_id}_meetings")
}

/// Qdrant point ids must be integers or UUIDs, so the string `meeting_id`
/// maps to a deterministic UUIDv5. The full id stays in the payload.
pub fn point_id(meeting_id: &str) -> String {
	Uuid::new_v5(&Uuid::NAMESPACE_OID, meeting_id.as_bytes()).to_string()
}

/// One vector collection per user, cosine distance, created lazily.
pub struct MeetingStore {
	pub client: Qdrant,
	pub vector_dim: u32,
}

#[derive(Clone, Debug)]
pub struct ScoredMeeting {
	pub record: MeetingRecord,
	pub distance: f32,
}

impl MeetingStore {
	pub fn new(cfg: &minutes_config::Qdrant) -> Result<Self> {
		let client = Qdrant::from_url(&cfg.url).build()?;

		Ok(Self { client, vector_dim: cfg.vector_dim })
	}

	pub async fn ensure_collection(&self, user_id: &str) -> Result<()> {
		let collection = collection_name(user_id);

		if self.client.collection_exists(&collection).await? {
			return Ok(());
		}

		tracing::info!(user_id, "Creating meeting collection.");

		self.client
			.create_collection(
				CreateCollectionBuilder::new(&collection).vectors_config(
					VectorParamsBuilder::new(u64::from(self.vector_dim), Distance::Cosine),
				),
			)
			.await?;

		Ok(())
	}

	pub async fn add(&self, user_id: &str, record: &MeetingRecord, vector: Vec<f32>) -> Result<()> {
		let point = PointStruct::new(point_id(&record.meeting_id), vector, record.payload());

		self.client
			.upsert_points(
				UpsertPointsBuilder::new(collection_name(user_id), vec![point]).wait(true),
			)
			.await?;

		Ok(())
	}

	/// Full scan, paged internally. Order is unspecified; callers re-sort.
	pub async fn all_records(&self, user_id: &str) -> Result<Vec<MeetingRecord>> {
		let collection = collection_name(user_id);
		let mut records = Vec::new();
		let mut offset: Option<PointId> = None;

		loop {
			let mut scroll = ScrollPointsBuilder::new(collection.clone())
				.limit(SCROLL_PAGE_SIZE)
				.with_payload(true)
				.with_vectors(false);

			if let Some(next) = offset.take() {
				scroll = scroll.offset(next);
			}

			let response = self.client.scroll(scroll).await?;

			records.extend(
				response.result.iter().map(|point| MeetingRecord::from_payload(&point.payload)),
			);

			match response.next_page_offset {
				Some(next) => offset = Some(next),
				None => break,
			}
		}

		Ok(records)
	}

	pub async fn search(
		&self,
		user_id: &str,
		vector: Vec<f32>,
		limit: u64,
	) -> Result<Vec<ScoredMeeting>> {
		let response = self
			.client
			.search_points(
				SearchPointsBuilder::new(collection_name(user_id), vector, limit)
					.with_payload(true),
			)
			.await?;
		// Qdrant reports cosine similarity; the store contract is distance,
		// ascending with rank.
		let hits = response
			.result
			.into_iter()
			.map(|point| ScoredMeeting {
				record: MeetingRecord::from_payload(&point.payload),
				distance: 1.0 - point.score,
			})
			.collect();

		Ok(hits)
	}

	pub async fn delete(&self, user_id: &str, meeting_id: &str) -> Result<()> {
		self.client
			.delete_points(
				DeletePointsBuilder::new(collection_name(user_id))
					.points(vec![point_id(meeting_id)])
					.wait(true),
			)
			.await?;

		Ok(())
	}

	pub async fn count(&self, user_id: &str) -> Result<u64> {
		let response = self
			.client
			.count(CountPointsBuilder::new(collection_name(user_id)).exact(true))
			.await?;

		Ok(response.result.map(|result| result.count).unwrap_or(0))
	}
}
