use std::time::Duration;

use tokio::time;

use minutes_domain::category::MeetingCategory;
use minutes_service::{HistoryRequest, StoreMeetingRequest};
use minutes_testkit::TestCollections;

fn history_request(user_id: &str) -> HistoryRequest {
	HistoryRequest {
		user_id: user_id.to_string(),
		limit: None,
		skip: None,
		search_text: None,
		categories: None,
		start_date: None,
		end_date: None,
	}
}

#[tokio::test]
#[ignore = "Requires external Qdrant. Set MINUTES_QDRANT_URL to run."]
async fn history_filters_sorts_and_paginates() {
	let Some(qdrant_url) = super::test_qdrant_url() else {
		eprintln!(
			"Skipping history_filters_sorts_and_paginates; set MINUTES_QDRANT_URL to run this test."
		);

		return;
	};
	let collections = TestCollections::new(qdrant_url.clone());
	let user_id = super::tracked_user(&collections, "history");
	let service = super::build_service(qdrant_url);
	let texts = [
		"Drafted the quarterly roadmap.",
		"Security audit of the login flow.",
		"General retrospective notes.",
	];

	// Meeting timestamps have second precision; space the stores out so the
	// sort and the date filters see three distinct values.
	for text in texts {
		service
			.store_meeting(StoreMeetingRequest {
				user_id: user_id.clone(),
				meeting_text: text.to_string(),
				categories: None,
			})
			.await
			.expect("Store failed.");

		time::sleep(Duration::from_millis(1_100)).await;
	}

	let full = service.meeting_history(history_request(&user_id)).await.expect("History failed.");

	assert_eq!(full.total, 3);
	assert_eq!(full.filtered_total, 3);
	assert_eq!(full.meetings.len(), 3);
	assert!(full.meetings[0].text.contains("retrospective"));
	assert!(full.meetings[2].text.contains("roadmap"));

	let by_category = service
		.meeting_history(HistoryRequest {
			categories: Some(vec![MeetingCategory::Security]),
			..history_request(&user_id)
		})
		.await
		.expect("History failed.");

	assert_eq!(by_category.filtered_total, 1);
	assert!(by_category.meetings[0].text.contains("Security audit"));

	let middle_timestamp = full.meetings[1].timestamp.clone();
	let since_middle = service
		.meeting_history(HistoryRequest {
			start_date: Some(middle_timestamp),
			..history_request(&user_id)
		})
		.await
		.expect("History failed.");

	assert_eq!(since_middle.filtered_total, 2);
	assert!(since_middle.meetings.iter().all(|meeting| !meeting.text.contains("roadmap")));

	let by_search = service
		.meeting_history(HistoryRequest {
			search_text: Some("ROADMAP".to_string()),
			..history_request(&user_id)
		})
		.await
		.expect("History failed.");

	assert_eq!(by_search.filtered_total, 1);

	let out_of_range = service
		.meeting_history(HistoryRequest { skip: Some(10), ..history_request(&user_id) })
		.await
		.expect("History failed.");

	assert!(out_of_range.meetings.is_empty());
	assert_eq!(out_of_range.filtered_total, 3);
	assert_eq!(out_of_range.total, 3);

	let paged = service
		.meeting_history(HistoryRequest {
			limit: Some(1),
			skip: Some(1),
			..history_request(&user_id)
		})
		.await
		.expect("History failed.");

	assert_eq!(paged.meetings.len(), 1);
	assert!(paged.meetings[0].text.contains("Security audit"));

	let oversized_limit = service
		.meeting_history(HistoryRequest { limit: Some(500), ..history_request(&user_id) })
		.await
		.expect("History failed.");

	assert_eq!(oversized_limit.limit, 100);
	assert_eq!(oversized_limit.meetings.len(), 3);

	collections.cleanup().await.expect("Failed to cleanup test collections.");
}
