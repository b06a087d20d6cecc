use super::{extract_text, GenerateContentResponse};

/// Incremental decoder for the `alt=sse` streaming wire format.
///
/// Network reads do not align with event boundaries, so the decoder buffers
/// raw bytes between calls and only decodes once a full `data:` line has
/// arrived. Keeping the buffer as bytes means a multibyte character split
/// across two reads is reassembled before any UTF-8 decoding happens.
/// Emission order matches arrival order.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feeds raw bytes from the wire, returning the text chunks completed by
    /// this read. Lines that are not well-formed events are skipped; bytes
    /// after the last newline stay buffered for the next call.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(bytes);

        let mut texts = Vec::new();
        while let Some(newline) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=newline).collect();
            let line = String::from_utf8_lossy(&line);
            if let Some(text) = decode_line(line.trim()) {
                texts.push(text);
            }
        }
        texts
    }
}

fn decode_line(line: &str) -> Option<String> {
    let data = line.strip_prefix("data: ").or_else(|| line.strip_prefix("data:"))?;
    let response: GenerateContentResponse = serde_json::from_str(data.trim()).ok()?;
    extract_text(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn event(text: &str) -> String {
        format!("data: {{\"candidates\":[{{\"content\":{{\"parts\":[{{\"text\":\"{text}\"}}]}}}}]}}\n\n")
    }

    #[test]
    fn decodes_complete_events_in_order() {
        let mut decoder = SseDecoder::new();
        let wire = format!("{}{}", event("Hello"), event(" world"));
        assert_eq!(decoder.feed(wire.as_bytes()), vec!["Hello", " world"]);
    }

    #[test]
    fn buffers_events_split_across_reads() {
        let mut decoder = SseDecoder::new();
        let wire = event("chunk");
        let (head, tail) = wire.split_at(wire.len() / 2);

        assert!(decoder.feed(head.as_bytes()).is_empty());
        assert_eq!(decoder.feed(tail.as_bytes()), vec!["chunk"]);
    }

    #[test]
    fn multibyte_text_split_across_reads_stays_intact() {
        let mut decoder = SseDecoder::new();
        let wire = event("café");
        // Split one byte into the two-byte encoding of the accented char.
        let split = wire.find('é').expect("accented char present") + 1;
        let (head, tail) = wire.as_bytes().split_at(split);

        assert!(decoder.feed(head).is_empty());
        assert_eq!(decoder.feed(tail), vec!["café"]);
    }

    #[test]
    fn ignores_comments_and_unparsable_lines() {
        let mut decoder = SseDecoder::new();
        let wire = format!(": keep-alive\ndata: not json\n{}", event("ok"));
        assert_eq!(decoder.feed(wire.as_bytes()), vec!["ok"]);
    }
}
