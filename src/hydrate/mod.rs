//! Record-level rehydration: decoding dehydrated records, batching them,
//! matching them to fetched posts and merging annotations back in.
//!
//! Nothing here touches the network; see [`crate::api`] for that.

pub mod types;
pub mod reader;
pub mod batch;
pub mod reconcile;
pub mod merger;
pub mod writer;

pub use types::{post_id, DehydratedRecord, PostId, BATCH_SIZE};
pub use reader::RecordReader;
pub use batch::Batches;
pub use reconcile::PostIndex;
pub use merger::merge_entities;
pub use writer::PostWriter;
