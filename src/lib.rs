//! # Rehydrate - restore full posts from dehydrated annotation records
//!
//! Datasets of social-media posts are usually shared "dehydrated": each
//! record holds only a post id and standoff annotations (entities). This
//! crate fetches the full posts from the platform API, merges the
//! annotations back into them (including quoted and retweeted posts) and
//! writes the result as a JSON stream.
//!
//! ## Modules
//!
//! - **hydrate**: decode records, batch them, match them to fetched posts, merge entities
//! - **api**: bearer token exchange and batched post lookup over a pluggable transport
//! - **settings**: credentials and run options
//!
//! ## Quick Start
//!
//! ```rust
//! use rehydrate::hydrate::{merge_entities, DehydratedRecord};
//! use serde_json::json;
//!
//! let record: DehydratedRecord = serde_json::from_value(json!({
//!     "id": 1,
//!     "entities": {"hashtags": [{"text": "a"}]}
//! })).unwrap();
//!
//! let mut post = json!({"id": 1, "entities": {"hashtags": [{"text": "b"}]}, "text": "hi"});
//! merge_entities(&mut post, &record);
//!
//! assert_eq!(post["entities"]["hashtags"], json!([{"text": "b"}, {"text": "a"}]));
//! ```
//!
//! Against the live API:
//!
//! ```no_run
//! use rehydrate::{rehydrate, Settings};
//!
//! # fn main() -> anyhow::Result<()> {
//! let settings = Settings::load("twitter.properties")?;
//! let input = std::fs::File::open("dehydrated.json")?;
//! let summary = rehydrate(input, std::io::stdout().lock(), &settings)?;
//! eprintln!("{} posts written", summary.written);
//! # Ok(())
//! # }
//! ```

use std::io::{Read, Write};

pub mod api;
pub mod error;
pub mod hydrate;
pub mod pipeline;
pub mod settings;

// Re-export commonly used types for convenience
pub use api::{BearerToken, Endpoints, HttpTransport, Transport};
pub use error::{RehydrateError, Result};
pub use hydrate::{merge_entities, DehydratedRecord, PostId};
pub use pipeline::{Rehydrator, RunSummary};
pub use settings::Settings;

/// Main entry point: rehydrate a record stream against the live API
pub fn rehydrate<R: Read, W: Write>(input: R, output: W, settings: &Settings) -> Result<RunSummary> {
    let transport = HttpTransport::new(settings.timeout)?;
    let rehydrator = Rehydrator::connect(transport, settings)?;
    rehydrator.run(input, output)
}
