use crate::error::{RehydrateError, Result};
use crate::hydrate::types::DehydratedRecord;
use serde_json::de::IoRead;
use serde_json::StreamDeserializer;
use std::io::Read;

/// Lazily decodes a stream of concatenated JSON objects into records.
///
/// Whitespace between objects is tolerated. After the first decode error
/// the reader yields nothing further.
pub struct RecordReader<R: Read> {
    stream: StreamDeserializer<'static, IoRead<R>, DehydratedRecord>,
    failed: bool,
}

impl<R: Read> RecordReader<R> {
    pub fn new(reader: R) -> Self {
        RecordReader {
            stream: StreamDeserializer::new(IoRead::new(reader)),
            failed: false,
        }
    }
}

impl<R: Read> Iterator for RecordReader<R> {
    type Item = Result<DehydratedRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        match self.stream.next()? {
            Ok(record) => Some(Ok(record)),
            Err(err) => {
                self.failed = true;
                Some(Err(RehydrateError::Decode(err)))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concatenated_objects() {
        let input = br#"{"id": 1}{"id": 2}
            {"id": 3, "entities": {"urls": []}}

        "#;

        let ids: Vec<u64> = RecordReader::new(&input[..])
            .map(|r| r.unwrap().id)
            .collect();

        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(RecordReader::new(&b"  \n"[..]).count(), 0);
    }

    #[test]
    fn test_malformed_input_stops_stream() {
        let input = b"{\"id\": 1}\n{\"id\": 2,,}\n{\"id\": 3}";
        let mut reader = RecordReader::new(&input[..]);

        assert_eq!(reader.next().unwrap().unwrap().id, 1);

        let err = reader.next().unwrap().unwrap_err();
        assert!(matches!(err, RehydrateError::Decode(_)));
        assert!(err.to_string().contains("line 2"));

        assert!(reader.next().is_none());
    }
}
