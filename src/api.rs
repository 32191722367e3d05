// API client module: contains a small blocking HTTP client that talks to
// the YouTube Data API v3. Two endpoints are involved: `search` turns a
// keyword into a list of mixed-kind items, and `videos` returns the
// statistics block for a single video id.

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::blocking::Client;
use serde::Deserialize;

use crate::report::VideoRecord;

const API_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// Kind tag carried by search items that are playable videos (as opposed
/// to channels or playlists).
const VIDEO_KIND: &str = "youtube#video";

/// Simple API client that holds a reqwest blocking client, the base URL
/// of the Data API and the API key sent with every request.
pub struct YouTubeClient {
    client: Client,
    base_url: String,
    api_key: String,
}

/// Response of the `search` endpoint. Only the fields this tool reads are
/// modeled; the API sends more.
#[derive(Deserialize, Debug)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<SearchItem>,
}

#[derive(Deserialize, Debug)]
pub struct SearchItem {
    pub id: SearchItemId,
    pub snippet: SearchSnippet,
}

/// The `id` object of a search item. `video_id` is only present when the
/// kind tag says the item is a video.
#[derive(Deserialize, Debug)]
pub struct SearchItemId {
    pub kind: String,
    #[serde(rename = "videoId")]
    pub video_id: Option<String>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct SearchSnippet {
    pub title: String,
    pub channel_title: String,
}

/// Response of the `videos` endpoint when asked for `part=statistics`.
#[derive(Deserialize, Debug)]
pub struct VideoListResponse {
    #[serde(default)]
    pub items: Vec<VideoItem>,
}

#[derive(Deserialize, Debug)]
pub struct VideoItem {
    pub statistics: VideoStatistics,
}

/// Statistics block for a single video. Both counters are decimal strings
/// on the wire and either may be absent (likes can be hidden, views are
/// missing on some live items).
#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct VideoStatistics {
    pub view_count: Option<String>,
    pub like_count: Option<String>,
}

impl YouTubeClient {
    /// Create a client configured from the `API_KEY` environment variable.
    /// A missing or empty key is a configuration error and fails here,
    /// before any network call is made.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("API_KEY")
            .context("No API key found in environment variables (set API_KEY)")?;
        if api_key.trim().is_empty() {
            anyhow::bail!("API_KEY is set but empty");
        }
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(YouTubeClient {
            client,
            base_url: API_BASE_URL.to_string(),
            api_key,
        })
    }

    /// Search for `query` and return one record per video-kind result that
    /// has a statistics block. Non-video items (channels, playlists) are
    /// filtered out; videos whose statistics lookup comes back empty are
    /// skipped silently. Record order follows the search response.
    pub fn search(
        &self,
        query: &str,
        max_results: u32,
        region_code: &str,
    ) -> Result<Vec<VideoRecord>> {
        let url = format!("{}/search", self.base_url);
        let params = [
            ("q", query.to_string()),
            ("part", "id,snippet".to_string()),
            ("maxResults", max_results.to_string()),
            ("regionCode", region_code.to_string()),
            ("key", self.api_key.clone()),
        ];
        let res = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .context("Failed to send search request")?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Search failed: {} - {}", status, txt);
        }
        let resp: SearchResponse = res.json().context("Parsing search response json")?;

        let videos = video_items(resp);
        let bar = ProgressBar::new(videos.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{spinner} fetching statistics {pos}/{len}").unwrap(),
        );

        let mut records = Vec::new();
        for (video_id, title) in videos {
            if let Some(stats) = self.video_statistics(&video_id)? {
                records.push(record_from_statistics(title, stats));
            }
            bar.inc(1);
        }
        bar.finish_and_clear();
        Ok(records)
    }

    /// Fetch the statistics block for one video id. The API answers with a
    /// list; an empty list (deleted or private video) maps to `None`.
    fn video_statistics(&self, video_id: &str) -> Result<Option<VideoStatistics>> {
        let url = format!("{}/videos", self.base_url);
        let params = [
            ("part", "statistics".to_string()),
            ("id", video_id.to_string()),
            ("key", self.api_key.clone()),
        ];
        let res = self
            .client
            .get(&url)
            .query(&params)
            .send()
            .with_context(|| format!("Failed to send statistics request for video {}", video_id))?;
        if !res.status().is_success() {
            let status = res.status();
            let txt = res.text().unwrap_or_else(|_| "".into());
            anyhow::bail!("Statistics lookup failed: {} - {}", status, txt);
        }
        let resp: VideoListResponse = res.json().context("Parsing statistics response json")?;
        Ok(first_statistics(resp))
    }
}

/// Reduce a search response to `(video_id, title)` pairs, keeping only
/// video-kind items. Items tagged as videos but missing an id (the API
/// should never send those) are dropped as well.
fn video_items(resp: SearchResponse) -> Vec<(String, String)> {
    resp.items
        .into_iter()
        .filter(|item| item.id.kind == VIDEO_KIND)
        .filter_map(|item| item.id.video_id.map(|id| (id, item.snippet.title)))
        .collect()
}

fn first_statistics(resp: VideoListResponse) -> Option<VideoStatistics> {
    resp.items.into_iter().next().map(|item| item.statistics)
}

/// Build the record for one video. Counts stay in the API's string form
/// here, defaulting to "0" when absent; the reporter does the numeric
/// coercion when it reloads the CSV.
fn record_from_statistics(title: String, stats: VideoStatistics) -> VideoRecord {
    VideoRecord {
        title,
        view_count: stats.view_count.unwrap_or_else(|| "0".to_string()),
        like_count: stats.like_count.unwrap_or_else(|| "0".to_string()),
    }
}
