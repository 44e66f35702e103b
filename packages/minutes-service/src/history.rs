use serde::{Deserialize, Serialize};

use minutes_domain::{category::MeetingCategory, meeting::Meeting};

use crate::{Error, MinutesService, Result};

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct HistoryRequest {
	pub user_id: String,
	#[serde(default)]
	pub limit: Option<u32>,
	#[serde(default)]
	pub skip: Option<u32>,
	#[serde(default)]
	pub search_text: Option<String>,
	#[serde(default)]
	pub categories: Option<Vec<MeetingCategory>>,
	#[serde(default)]
	pub start_date: Option<String>,
	#[serde(default)]
	pub end_date: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct HistoryResponse {
	pub meetings: Vec<Meeting>,
	/// Records in the collection before filtering.
	pub total: u64,
	/// Records matching the filters, before pagination.
	pub filtered_total: u64,
	pub skip: u32,
	pub limit: u32,
}

struct HistoryFilter<'a> {
	search_text: Option<&'a str>,
	categories: Option<&'a [MeetingCategory]>,
	start_date: Option<&'a str>,
	end_date: Option<&'a str>,
}

impl MinutesService {
	pub async fn meeting_history(&self, req: HistoryRequest) -> Result<HistoryResponse> {
		let user_id = req.user_id.trim();

		if user_id.is_empty() {
			return Err(Error::InvalidRequest { message: "user_id is required.".to_string() });
		}

		let limit =
			req.limit.unwrap_or(self.cfg.history.default_limit).min(self.cfg.history.max_limit);
		let skip = req.skip.unwrap_or(0);

		self.store.ensure_collection(user_id).await?;

		let records = self.store.all_records(user_id).await?;
		let total = records.len() as u64;
		let filter = HistoryFilter {
			search_text: req.search_text.as_deref().filter(|value| !value.trim().is_empty()),
			categories: req.categories.as_deref().filter(|values| !values.is_empty()),
			start_date: req.start_date.as_deref().filter(|value| !value.trim().is_empty()),
			end_date: req.end_date.as_deref().filter(|value| !value.trim().is_empty()),
		};
		// Records with blank text should not exist, but a damaged payload is
		// skipped rather than surfaced.
		let meetings = records
			.into_iter()
			.filter(|record| !record.text.trim().is_empty())
			.map(|record| record.into_meeting())
			.collect::<Vec<_>>();
		let meetings = filter_and_sort(meetings, &filter);
		let filtered_total = meetings.len() as u64;
		let meetings = paginate(meetings, skip, limit);

		Ok(HistoryResponse { meetings, total, filtered_total, skip, limit })
	}
}

impl HistoryFilter<'_> {
	fn matches(&self, meeting: &Meeting) -> bool {
		if let Some(needle) = self.search_text
			&& !meeting.text.to_lowercase().contains(&needle.to_lowercase())
		{
			return false;
		}
		if let Some(categories) = self.categories
			&& !categories.iter().any(|category| meeting.categories.contains(category))
		{
			return false;
		}
		if let Some(start) = self.start_date
			&& meeting.timestamp.as_str() < start
		{
			return false;
		}
		if let Some(end) = self.end_date
			&& meeting.timestamp.as_str() > end
		{
			return false;
		}

		true
	}
}

/// Newest first; the sort is stable so scan order breaks timestamp ties.
/// Date bounds compare lexicographically, which is sound because every
/// timestamp comes from the same UTC RFC 3339 formatter.
fn filter_and_sort(meetings: Vec<Meeting>, filter: &HistoryFilter<'_>) -> Vec<Meeting> {
	let mut meetings =
		meetings.into_iter().filter(|meeting| filter.matches(meeting)).collect::<Vec<_>>();

	meetings.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

	meetings
}

fn paginate(meetings: Vec<Meeting>, skip: u32, limit: u32) -> Vec<Meeting> {
	meetings.into_iter().skip(skip as usize).take(limit as usize).collect()
}
