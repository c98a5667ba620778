use crate::api::{acquire_token, lookup_posts, BearerToken, Endpoints, Transport};
use crate::error::Result;
use crate::hydrate::{merge_entities, Batches, DehydratedRecord, PostId, PostIndex, PostWriter, RecordReader};
use crate::settings::Settings;
use std::io::{Read, Write};
use tracing::{debug, info};

/// Counts for one completed run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Records decoded from the input
    pub records: usize,
    /// Lookup calls made
    pub batches: usize,
    /// Posts written to the output
    pub written: usize,
    /// Records with no matching post
    pub missing: usize,
}

/// Everything a run needs after authentication: the transport, endpoint
/// URLs, the bearer token and the response mode.
///
/// Batches are fetched, merged and written strictly one after another.
pub struct Rehydrator<T: Transport> {
    transport: T,
    endpoints: Endpoints,
    token: BearerToken,
    compat_mode: bool,
}

impl<T: Transport> Rehydrator<T> {
    /// Acquire a bearer token and build the run context.
    pub fn connect(transport: T, settings: &Settings) -> Result<Self> {
        let endpoints = Endpoints::new(&settings.api_base);
        let token = acquire_token(
            &transport,
            &endpoints,
            &settings.consumer_key,
            &settings.consumer_secret,
        )?;
        info!("obtained bearer token");

        Ok(Self::with_token(
            transport,
            endpoints,
            token,
            settings.compatibility_mode,
        ))
    }

    pub fn with_token(transport: T, endpoints: Endpoints, token: BearerToken, compat_mode: bool) -> Self {
        Rehydrator {
            transport,
            endpoints,
            token,
            compat_mode,
        }
    }

    /// Rehydrate every record in `input`, writing merged posts to `output`.
    ///
    /// Any decode, transport or response error aborts the run; posts from
    /// batches completed before the failure have already been written.
    pub fn run<R: Read, W: Write>(&self, input: R, output: W) -> Result<RunSummary> {
        let mut writer = PostWriter::new(output);
        let mut summary = RunSummary::default();

        for batch in Batches::new(RecordReader::new(input)) {
            let batch = batch?;
            let missing = self.process_batch(&batch, &mut writer)?;
            writer.flush()?;

            summary.batches += 1;
            summary.records += batch.len();
            summary.missing += missing.len();
            debug!(
                batch = summary.batches,
                size = batch.len(),
                missing = missing.len(),
                "batch complete"
            );
        }

        summary.written = writer.written();
        info!(
            records = summary.records,
            written = summary.written,
            missing = summary.missing,
            batches = summary.batches,
            "rehydration finished"
        );
        Ok(summary)
    }

    /// Fetch, reconcile, merge and write one batch. Returns the ids that
    /// had no matching post.
    pub fn process_batch<W: Write>(
        &self,
        batch: &[DehydratedRecord],
        writer: &mut PostWriter<W>,
    ) -> Result<Vec<PostId>> {
        let posts = lookup_posts(
            &self.transport,
            &self.endpoints,
            &self.token,
            batch,
            self.compat_mode,
        )?;

        let mut index = PostIndex::from_posts(posts)?;
        index.reconcile(batch, |post, record| {
            merge_entities(post, record);
            writer.write_post(post)
        })
    }
}
