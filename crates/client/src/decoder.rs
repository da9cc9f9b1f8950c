//! Newline-delimited JSON frame decoder.
//!
//! Network chunk boundaries do not align with record boundaries, so the
//! decoder buffers any trailing partial line and prepends it to the next
//! chunk before splitting. Blank lines are skipped; a line that fails to
//! parse is reported as a [`DecodedFrame::Malformed`] frame rather than
//! aborting the stream. The resulting record sequence depends only on
//! the byte content, not on where the chunks were split.

use fieldserve_core::record::{parse_record, ProgressRecord};

/// One decoded line from the stream.
#[derive(Debug)]
pub enum DecodedFrame {
    Record(ProgressRecord),
    /// The line was not valid JSON. Logged by the caller, not fatal.
    Malformed {
        line: String,
        error: serde_json::Error,
    },
}

/// Stateful decoder over raw byte chunks.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    partial: Vec<u8>,
}

impl FrameDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one chunk and return every complete line it finishes.
    pub fn push_chunk(&mut self, chunk: &[u8]) -> Vec<DecodedFrame> {
        self.partial.extend_from_slice(chunk);

        // Single scan with one drain at the end; the buffer is never
        // shifted per line.
        let mut frames = Vec::new();
        let mut start = 0;
        while let Some(pos) = self.partial[start..].iter().position(|&b| b == b'\n') {
            let line = &self.partial[start..start + pos];
            start += pos + 1;

            let text = String::from_utf8_lossy(line);
            let trimmed = text.trim();
            if trimmed.is_empty() {
                continue;
            }
            match parse_record(trimmed) {
                Ok(record) => frames.push(DecodedFrame::Record(record)),
                Err(error) => frames.push(DecodedFrame::Malformed {
                    line: trimmed.to_string(),
                    error,
                }),
            }
        }
        self.partial.drain(..start);
        frames
    }

    /// Best-effort parse of the buffered trailing line at stream end.
    ///
    /// A parse failure here is swallowed: a truncated final frame is
    /// expected when the server closes mid-record.
    pub fn finish(self) -> Option<ProgressRecord> {
        let text = String::from_utf8_lossy(&self.partial);
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        parse_record(trimmed).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fieldserve_core::record::StreamStatus;

    fn records_only(frames: Vec<DecodedFrame>) -> Vec<ProgressRecord> {
        frames
            .into_iter()
            .map(|f| match f {
                DecodedFrame::Record(r) => r,
                DecodedFrame::Malformed { line, error } => {
                    panic!("unexpected malformed frame: {error} ({line})")
                }
            })
            .collect()
    }

    // -- basic framing --

    #[test]
    fn single_chunk_with_complete_lines() {
        let mut decoder = FrameDecoder::new();
        let frames = decoder.push_chunk(b"{\"processedRecords\":1}\n{\"processedRecords\":2}\n");
        let records = records_only(frames);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].processed_records, Some(2));
    }

    #[test]
    fn record_split_across_chunks_is_reassembled() {
        let mut decoder = FrameDecoder::new();
        // `{"summary":{"created":1}}` split mid-key.
        assert!(decoder.push_chunk(b"{\"sum").is_empty());
        let frames = decoder.push_chunk(b"mary\":{\"created\":1}}\n");

        let records = records_only(frames);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].summary.unwrap().created, Some(1));
    }

    #[test]
    fn many_lines_in_one_chunk_decode_in_order_and_keep_the_tail() {
        let mut payload = String::new();
        for i in 0..200 {
            payload.push_str(&format!("{{\"processedRecords\":{i}}}\n"));
        }
        payload.push_str("{\"processedRecords\":9");

        let mut decoder = FrameDecoder::new();
        let records = records_only(decoder.push_chunk(payload.as_bytes()));
        assert_eq!(records.len(), 200);
        assert_eq!(records[0].processed_records, Some(0));
        assert_eq!(records[199].processed_records, Some(199));

        // The trailing partial stays buffered for the next chunk.
        let records = records_only(decoder.push_chunk(b"99}\n"));
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].processed_records, Some(999));
    }

    #[test]
    fn empty_lines_are_skipped() {
        let mut decoder = FrameDecoder::new();
        let frames = decoder.push_chunk(b"\n\n{\"status\":\"processing\"}\n\n");
        let records = records_only(frames);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].status, Some(StreamStatus::Processing));
    }

    #[test]
    fn split_point_does_not_change_the_record_sequence() {
        let payload = b"{\"processedRecords\":10}\n{\"processedRecords\":20}\n{\"status\":\"completed\"}\n";

        // Decode in one piece.
        let mut whole = FrameDecoder::new();
        let whole_records = records_only(whole.push_chunk(payload));

        // Decode byte-by-byte: every chunk boundary possible.
        let mut split = FrameDecoder::new();
        let mut split_records = Vec::new();
        for byte in payload.iter() {
            split_records.extend(records_only(split.push_chunk(&[*byte])));
        }

        assert_eq!(whole_records.len(), split_records.len());
        for (a, b) in whole_records.iter().zip(&split_records) {
            assert_eq!(a.processed_records, b.processed_records);
            assert_eq!(a.status, b.status);
        }
    }

    // -- malformed lines --

    #[test]
    fn malformed_line_is_reported_not_fatal() {
        let mut decoder = FrameDecoder::new();
        let frames = decoder.push_chunk(b"not json\n{\"processedRecords\":5}\n");

        assert_eq!(frames.len(), 2);
        assert!(matches!(&frames[0], DecodedFrame::Malformed { line, .. } if line == "not json"));
        assert!(matches!(&frames[1], DecodedFrame::Record(r) if r.processed_records == Some(5)));
    }

    // -- stream end --

    #[test]
    fn finish_parses_unterminated_final_record() {
        let mut decoder = FrameDecoder::new();
        decoder.push_chunk(b"{\"status\":\"completed\"}");
        let record = decoder.finish().expect("trailing record should parse");
        assert_eq!(record.status, Some(StreamStatus::Completed));
    }

    #[test]
    fn finish_swallows_truncated_final_record() {
        let mut decoder = FrameDecoder::new();
        decoder.push_chunk(b"{\"summary\":{\"crea");
        assert!(decoder.finish().is_none());
    }

    #[test]
    fn finish_with_no_partial_is_none() {
        let mut decoder = FrameDecoder::new();
        decoder.push_chunk(b"{\"status\":\"processing\"}\n");
        assert!(decoder.finish().is_none());
    }
}
