pub mod context;
pub mod delete;
pub mod history;
pub mod store;

mod error;

use std::{
	collections::HashMap,
	future::Future,
	pin::Pin,
	sync::{Arc, Mutex},
};

pub use context::{ContextRequest, ContextResponse};
pub use delete::{DeleteMeetingRequest, DeleteMeetingResponse};
pub use error::{Error, Result};
pub use history::{HistoryRequest, HistoryResponse};
pub use store::{StoreMeetingRequest, StoreMeetingResponse};

use minutes_config::{Config, EmbeddingProviderConfig};
use minutes_providers::embedding;
use minutes_storage::qdrant::MeetingStore;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

pub trait EmbeddingProvider
where
	Self: Send + Sync,
{
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, minutes_providers::Result<Vec<Vec<f32>>>>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MeetingOp {
	Stored,
	Duplicate,
	Deleted,
}

#[derive(Clone)]
pub struct Providers {
	pub embedding: Arc<dyn EmbeddingProvider>,
}

pub struct MinutesService {
	pub cfg: Config,
	pub store: MeetingStore,
	pub providers: Providers,
	user_locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

struct DefaultProviders;

impl EmbeddingProvider for DefaultProviders {
	fn embed<'a>(
		&'a self,
		cfg: &'a EmbeddingProviderConfig,
		texts: &'a [String],
	) -> BoxFuture<'a, minutes_providers::Result<Vec<Vec<f32>>>> {
		Box::pin(embedding::embed(cfg, texts))
	}
}

impl Providers {
	pub fn new(embedding: Arc<dyn EmbeddingProvider>) -> Self {
		Self { embedding }
	}
}

impl Default for Providers {
	fn default() -> Self {
		Self { embedding: Arc::new(DefaultProviders) }
	}
}

impl MinutesService {
	pub fn new(cfg: Config, store: MeetingStore) -> Self {
		Self::with_providers(cfg, store, Providers::default())
	}

	pub fn with_providers(cfg: Config, store: MeetingStore, providers: Providers) -> Self {
		Self { cfg, store, providers, user_locks: Mutex::new(HashMap::new()) }
	}

	/// One async mutex per user namespace; `store_meeting` holds it across its
	/// scan-then-insert sequence.
	pub(crate) fn user_lock(&self, user_id: &str) -> Arc<tokio::sync::Mutex<()>> {
		let mut locks = self.user_locks.lock().unwrap_or_else(|err| err.into_inner());

		locks.entry(user_id.to_string()).or_default().clone()
	}

	pub(crate) async fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
		let texts = [text.to_string()];
		let vectors =
			self.providers.embedding.embed(&self.cfg.providers.embedding, &texts).await?;
		let Some(vector) = vectors.into_iter().next() else {
			return Err(Error::Provider {
				message: "Embedding provider returned no vectors.".to_string(),
			});
		};

		if vector.len() != self.cfg.storage.qdrant.vector_dim as usize {
			return Err(Error::Provider {
				message: "Embedding vector dimension mismatch.".to_string(),
			});
		}

		Ok(vector)
	}
}
