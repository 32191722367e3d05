// Entrypoint for the report CLI.
// - Keeps `main` small: collect, echo, persist, reload, sort, render.
// - Returns `anyhow::Result` so any failure prints its error chain and
//   exits non-zero.

use yt_report::{api::YouTubeClient, chart, report};

const QUERY: &str = "programare";
const MAX_RESULTS: u32 = 5;
const REGION_CODE: &str = "RO";
const REPORT_PATH: &str = "video_report.csv";
const CHART_PATH: &str = "video_report.png";

fn main() -> anyhow::Result<()> {
    // Reads the API key from the `API_KEY` environment variable and
    // fails fast when it is missing. See `api::YouTubeClient::from_env`.
    let client = YouTubeClient::from_env()?;

    let videos = client.search(QUERY, MAX_RESULTS, REGION_CODE)?;

    println!("Video report:");
    report::print_table(&videos);
    report::write_csv(&videos, REPORT_PATH)?;

    // Rendering works off the persisted file, not the in-memory records,
    // so a saved report can be re-rendered without re-querying.
    let mut rows = report::load_csv(REPORT_PATH)?;
    report::sort_by_views(&mut rows);

    chart::render(&rows, CHART_PATH)?;
    chart::open_viewer(CHART_PATH)?;
    Ok(())
}
