use std::sync::Arc;

use minutes_service::MinutesService;
use minutes_storage::qdrant::MeetingStore;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<MinutesService>,
}
impl AppState {
	pub fn new(config: minutes_config::Config) -> color_eyre::Result<Self> {
		let store = MeetingStore::new(&config.storage.qdrant)?;
		let service = MinutesService::new(config, store);

		Ok(Self { service: Arc::new(service) })
	}
}
