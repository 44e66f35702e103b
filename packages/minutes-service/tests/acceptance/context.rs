use minutes_service::{ContextRequest, StoreMeetingRequest};
use minutes_testkit::TestCollections;

#[tokio::test]
#[ignore = "Requires external Qdrant. Set MINUTES_QDRANT_URL to run."]
async fn relevant_context_is_empty_for_new_user() {
	let Some(qdrant_url) = super::test_qdrant_url() else {
		eprintln!(
			"Skipping relevant_context_is_empty_for_new_user; set MINUTES_QDRANT_URL to run this test."
		);

		return;
	};
	let collections = TestCollections::new(qdrant_url.clone());
	let user_id = super::tracked_user(&collections, "ctx_empty");
	let service = super::build_service(qdrant_url);

	let response = service
		.relevant_context(ContextRequest {
			user_id,
			text: "Kickoff for the new billing project.".to_string(),
			n_results: None,
		})
		.await
		.expect("Context lookup failed.");

	assert!(response.items.is_empty());

	collections.cleanup().await.expect("Failed to cleanup test collections.");
}

#[tokio::test]
#[ignore = "Requires external Qdrant. Set MINUTES_QDRANT_URL to run."]
async fn relevant_context_ranks_exact_match_first() {
	let Some(qdrant_url) = super::test_qdrant_url() else {
		eprintln!(
			"Skipping relevant_context_ranks_exact_match_first; set MINUTES_QDRANT_URL to run this test."
		);

		return;
	};
	let collections = TestCollections::new(qdrant_url.clone());
	let user_id = super::tracked_user(&collections, "ctx_rank");
	let service = super::build_service(qdrant_url);
	let texts = [
		"Planned the migration timeline for the data warehouse.",
		"Security review of the OAuth integration.",
		"Brainstormed onboarding improvements.",
	];

	let mut meeting_ids = Vec::new();

	for text in texts {
		let stored = service
			.store_meeting(StoreMeetingRequest {
				user_id: user_id.clone(),
				meeting_text: text.to_string(),
				categories: None,
			})
			.await
			.expect("Store failed.");

		meeting_ids.push(stored.meeting_id);
	}

	let response = service
		.relevant_context(ContextRequest {
			user_id,
			text: texts[1].to_string(),
			n_results: None,
		})
		.await
		.expect("Context lookup failed.");

	assert!(!response.items.is_empty());
	assert!(response.items.len() <= 3);
	assert_eq!(response.items[0].meeting_id, meeting_ids[1]);

	let top_score =
		response.items[0].similarity_score.expect("Context items must carry a score.");

	assert!(top_score > 0.99, "Exact match should score ~1.0, got {top_score}.");

	for item in &response.items {
		assert!(item.similarity_score.is_some());
	}

	collections.cleanup().await.expect("Failed to cleanup test collections.");
}
