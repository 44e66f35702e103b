use serde::{Deserialize, Serialize};

const API_KEYWORDS: [&str; 3] = ["api", "endpoint", "rest"];
const SECURITY_KEYWORDS: [&str; 3] = ["security", "auth", "oauth"];
const PLANNING_KEYWORDS: [&str; 3] = ["plan", "roadmap", "timeline"];
const REVIEW_KEYWORDS: [&str; 3] = ["review", "assess", "evaluate"];

/// Topic tags attached to a meeting. The wire and payload form is the
/// lowercase name; anything unrecognized decodes to [`MeetingCategory::Other`].
#[derive(
	Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Deserialize, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum MeetingCategory {
	Api,
	Security,
	Planning,
	Review,
	Other,
}
impl MeetingCategory {
	pub fn as_str(self) -> &'static str {
		match self {
			Self::Api => "api",
			Self::Security => "security",
			Self::Planning => "planning",
			Self::Review => "review",
			Self::Other => "other",
		}
	}

	pub fn parse(token: &str) -> Self {
		match token.trim() {
			"api" => Self::Api,
			"security" => Self::Security,
			"planning" => Self::Planning,
			"review" => Self::Review,
			_ => Self::Other,
		}
	}
}

/// Keyword-based auto-categorization. Case-insensitive substring match; every
/// matching group is returned, `{other}` when none match.
pub fn categorize(text: &str) -> Vec<MeetingCategory> {
	let lower = text.to_lowercase();
	let mut categories = Vec::new();

	if API_KEYWORDS.iter().any(|keyword| lower.contains(keyword)) {
		categories.push(MeetingCategory::Api);
	}
	if SECURITY_KEYWORDS.iter().any(|keyword| lower.contains(keyword)) {
		categories.push(MeetingCategory::Security);
	}
	if PLANNING_KEYWORDS.iter().any(|keyword| lower.contains(keyword)) {
		categories.push(MeetingCategory::Planning);
	}
	if REVIEW_KEYWORDS.iter().any(|keyword| lower.contains(keyword)) {
		categories.push(MeetingCategory::Review);
	}
	if categories.is_empty() {
		categories.push(MeetingCategory::Other);
	}

	categories
}

/// Sorted, deduplicated form. Encoding relies on this so the stored string is
/// deterministic for any input order.
pub fn canonicalize(mut categories: Vec<MeetingCategory>) -> Vec<MeetingCategory> {
	categories.sort();
	categories.dedup();

	categories
}

pub fn encode_categories(categories: &[MeetingCategory]) -> String {
	canonicalize(categories.to_vec())
		.iter()
		.map(|category| category.as_str())
		.collect::<Vec<_>>()
		.join(",")
}

pub fn decode_categories(raw: &str) -> Vec<MeetingCategory> {
	if raw.trim().is_empty() {
		return vec![MeetingCategory::Other];
	}

	canonicalize(raw.split(',').map(MeetingCategory::parse).collect())
}
