use crate::error::Result;
use crate::hydrate::types::{DehydratedRecord, BATCH_SIZE};

/// Groups a record stream into consecutive batches.
///
/// Every batch holds `size` records except the last, which holds the
/// remainder. Only one batch is buffered at a time. If a record fails to
/// decode, the partial batch is dropped and the error is yielded instead.
pub struct Batches<I> {
    records: I,
    size: usize,
    done: bool,
}

impl<I> Batches<I>
where
    I: Iterator<Item = Result<DehydratedRecord>>,
{
    pub fn new(records: I) -> Self {
        Self::with_size(records, BATCH_SIZE)
    }

    pub fn with_size(records: I, size: usize) -> Self {
        assert!(size > 0, "batch size must be positive");
        Batches {
            records,
            size,
            done: false,
        }
    }
}

impl<I> Iterator for Batches<I>
where
    I: Iterator<Item = Result<DehydratedRecord>>,
{
    type Item = Result<Vec<DehydratedRecord>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let mut batch = Vec::with_capacity(self.size);
        while batch.len() < self.size {
            match self.records.next() {
                Some(Ok(record)) => batch.push(record),
                Some(Err(err)) => {
                    self.done = true;
                    return Some(Err(err));
                }
                None => {
                    self.done = true;
                    break;
                }
            }
        }

        if batch.is_empty() {
            None
        } else {
            Some(Ok(batch))
        }
    }
}
