// Library root
// -----------
// This crate exposes a small library surface for the report CLI. The
// binary (`main.rs`) wires these modules into the single pipeline run.
//
// Module responsibilities:
// - `api`: Encapsulates the HTTP interactions with the YouTube Data API
//   (keyword search, per-video statistics) and joins the two responses
//   into report records.
// - `report`: CSV persistence and reload, numeric coercion, sorting and
//   the stdout table.
// - `chart`: Renders the bar-chart figure and opens it in the platform
//   image viewer.
//
// Keeping this separation makes it possible to re-render a saved report
// without re-querying the API, and to test the join and table logic
// without network access.
pub mod api;
pub mod chart;
pub mod report;
