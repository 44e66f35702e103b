use minutes_domain::{category::MeetingCategory, meeting};
use minutes_service::{MeetingOp, StoreMeetingRequest};
use minutes_testkit::TestCollections;

#[tokio::test]
#[ignore = "Requires external Qdrant. Set MINUTES_QDRANT_URL to run."]
async fn store_meeting_deduplicates_identical_text() {
	let Some(qdrant_url) = super::test_qdrant_url() else {
		eprintln!(
			"Skipping store_meeting_deduplicates_identical_text; set MINUTES_QDRANT_URL to run this test."
		);

		return;
	};
	let collections = TestCollections::new(qdrant_url.clone());
	let user_id = super::tracked_user(&collections, "dedup");
	let service = super::build_service(qdrant_url);
	let request = StoreMeetingRequest {
		user_id: user_id.clone(),
		meeting_text: "Discussed the rollout timeline for the payments API.".to_string(),
		categories: None,
	};

	let first = service.store_meeting(request.clone()).await.expect("First store failed.");
	let second = service.store_meeting(request).await.expect("Second store failed.");

	assert_eq!(first.op, MeetingOp::Stored);
	assert_eq!(second.op, MeetingOp::Duplicate);
	assert_eq!(second.meeting_id, first.meeting_id);

	let count = service.store.count(&user_id).await.expect("Count failed.");

	assert_eq!(count, 1);

	collections.cleanup().await.expect("Failed to cleanup test collections.");
}

#[tokio::test]
#[ignore = "Requires external Qdrant. Set MINUTES_QDRANT_URL to run."]
async fn store_meeting_truncates_long_transcripts() {
	let Some(qdrant_url) = super::test_qdrant_url() else {
		eprintln!(
			"Skipping store_meeting_truncates_long_transcripts; set MINUTES_QDRANT_URL to run this test."
		);

		return;
	};
	let collections = TestCollections::new(qdrant_url.clone());
	let user_id = super::tracked_user(&collections, "truncate");
	let service = super::build_service(qdrant_url);
	let long_text = "a".repeat(1_500);

	service
		.store_meeting(StoreMeetingRequest {
			user_id: user_id.clone(),
			meeting_text: long_text,
			categories: None,
		})
		.await
		.expect("Store failed.");

	let records = service.store.all_records(&user_id).await.expect("Scan failed.");

	assert_eq!(records.len(), 1);
	assert_eq!(
		records[0].text.chars().count(),
		meeting::STORED_TEXT_CHARS + meeting::TRUNCATION_MARKER.len(),
	);

	let history = service
		.meeting_history(minutes_service::HistoryRequest {
			user_id,
			limit: None,
			skip: None,
			search_text: None,
			categories: None,
			start_date: None,
			end_date: None,
		})
		.await
		.expect("History failed.");

	assert_eq!(
		history.meetings[0].text.chars().count(),
		meeting::DISPLAY_TEXT_CHARS + meeting::TRUNCATION_MARKER.len(),
	);

	collections.cleanup().await.expect("Failed to cleanup test collections.");
}

#[tokio::test]
#[ignore = "Requires external Qdrant. Set MINUTES_QDRANT_URL to run."]
async fn store_meeting_auto_categorizes_when_no_categories_given() {
	let Some(qdrant_url) = super::test_qdrant_url() else {
		eprintln!(
			"Skipping store_meeting_auto_categorizes_when_no_categories_given; set MINUTES_QDRANT_URL to run this test."
		);

		return;
	};
	let collections = TestCollections::new(qdrant_url.clone());
	let user_id = super::tracked_user(&collections, "categorize");
	let service = super::build_service(qdrant_url);

	let tagged = service
		.store_meeting(StoreMeetingRequest {
			user_id: user_id.clone(),
			meeting_text: "Let's review the API security roadmap".to_string(),
			categories: None,
		})
		.await
		.expect("Store failed.");

	assert_eq!(
		tagged.categories,
		vec![
			MeetingCategory::Api,
			MeetingCategory::Security,
			MeetingCategory::Planning,
			MeetingCategory::Review,
		],
	);

	let untagged = service
		.store_meeting(StoreMeetingRequest {
			user_id,
			meeting_text: "Coffee chat notes".to_string(),
			categories: None,
		})
		.await
		.expect("Store failed.");

	assert_eq!(untagged.categories, vec![MeetingCategory::Other]);

	collections.cleanup().await.expect("Failed to cleanup test collections.");
}
