use serde::{Deserialize, Serialize};

use crate::{Error, MeetingOp, MinutesService, Result};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DeleteMeetingRequest {
	pub user_id: String,
	pub meeting_id: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct DeleteMeetingResponse {
	pub meeting_id: String,
	pub op: MeetingOp,
}

impl MinutesService {
	/// Idempotent by choice: deleting an id that never existed reports the
	/// same outcome as deleting one that did.
	pub async fn delete_meeting(&self, req: DeleteMeetingRequest) -> Result<DeleteMeetingResponse> {
		let user_id = req.user_id.trim();
		let meeting_id = req.meeting_id.trim();

		if user_id.is_empty() || meeting_id.is_empty() {
			return Err(Error::InvalidRequest {
				message: "user_id and meeting_id are required.".to_string(),
			});
		}

		self.store.ensure_collection(user_id).await?;
		self.store.delete(user_id, meeting_id).await?;

		tracing::info!(user_id, meeting_id, "Deleted meeting.");

		Ok(DeleteMeetingResponse { meeting_id: meeting_id.to_string(), op: MeetingOp::Deleted })
	}
}
