use minutes_service::{DeleteMeetingRequest, MeetingOp, StoreMeetingRequest};
use minutes_testkit::TestCollections;

#[tokio::test]
#[ignore = "Requires external Qdrant. Set MINUTES_QDRANT_URL to run."]
async fn delete_meeting_is_idempotent() {
	let Some(qdrant_url) = super::test_qdrant_url() else {
		eprintln!(
			"Skipping delete_meeting_is_idempotent; set MINUTES_QDRANT_URL to run this test."
		);

		return;
	};
	let collections = TestCollections::new(qdrant_url.clone());
	let user_id = super::tracked_user(&collections, "delete");
	let service = super::build_service(qdrant_url);

	let stored = service
		.store_meeting(StoreMeetingRequest {
			user_id: user_id.clone(),
			meeting_text: "Decision log for the cache eviction change.".to_string(),
			categories: None,
		})
		.await
		.expect("Store failed.");

	let first = service
		.delete_meeting(DeleteMeetingRequest {
			user_id: user_id.clone(),
			meeting_id: stored.meeting_id.clone(),
		})
		.await
		.expect("First delete failed.");

	assert_eq!(first.op, MeetingOp::Deleted);

	let count = service.store.count(&user_id).await.expect("Count failed.");

	assert_eq!(count, 0);

	// Deleting the same id again, and an id that never existed, both succeed.
	let second = service
		.delete_meeting(DeleteMeetingRequest {
			user_id: user_id.clone(),
			meeting_id: stored.meeting_id,
		})
		.await
		.expect("Second delete failed.");

	assert_eq!(second.op, MeetingOp::Deleted);

	let never_existed = service
		.delete_meeting(DeleteMeetingRequest {
			user_id,
			meeting_id: "meeting_20200101_000000_deadbeef".to_string(),
		})
		.await
		.expect("Delete of unknown id failed.");

	assert_eq!(never_existed.op, MeetingOp::Deleted);

	collections.cleanup().await.expect("Failed to cleanup test collections.");
}
