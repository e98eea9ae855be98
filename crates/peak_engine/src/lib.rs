//! Peak engine: page retrieval, extraction and the scraping pipeline.
mod analyze;
mod coords;
mod decode;
mod detail;
mod export;
mod fetch;
mod listing;
mod persist;
mod pipeline;
mod retry;
mod text;
mod types;

pub use analyze::DetailAnalyzer;
pub use coords::{degree_values, resolve_coordinates, CoordinateResolver};
pub use decode::{decode_html, decode_page, DecodeError, DecodedHtml};
pub use detail::{extract_classification, ClassificationMatcher};
pub use export::{render_peaks_json, write_peaks_json, ExportError};
pub use fetch::{FetchSettings, Fetcher, ReqwestFetcher};
pub use listing::{group_from_url, parse_elevation, parse_listing, ListingPage};
pub use persist::{ensure_output_dir, write_atomically, PersistError};
pub use pipeline::{
    NullProgressSink, Pipeline, PipelineError, ProgressSink, ScrapeConfig, ScrapeOutput,
    DEFAULT_BATCH_SIZE, DEFAULT_CONCURRENCY,
};
pub use retry::{fetch_page, retry_transient, RetryPolicy};
pub use text::{collapse_whitespace, document_text, element_text};
pub use types::{EngineEvent, FailureKind, FetchError, FetchMetadata, FetchOutput, FetchedPage};
