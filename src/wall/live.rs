use super::{Post, PostStream};
use futures::stream::{self, Stream, StreamExt};
use std::collections::VecDeque;

/// Turn an open `text/event-stream` response into a stream of posts.
///
/// Each `data:` line carries one JSON-encoded post. Anything that does not
/// decode is skipped, never surfaced: a malformed push event must not take
/// the feed down. The stream ends when the server closes the connection or
/// the transport fails.
pub(crate) fn sse_post_stream(response: reqwest::Response) -> PostStream {
    let decoder = SseDecoder::new(response.bytes_stream().boxed());
    Box::pin(stream::unfold(decoder, |mut decoder| async move {
        decoder.next_post().await.map(|post| (post, decoder))
    }))
}

/// Incremental decoder over a chunked byte stream. Chunk boundaries do not
/// line up with event boundaries, so partial lines are buffered between
/// chunks.
struct SseDecoder<S> {
    chunks: S,
    buf: Vec<u8>,
    ready: VecDeque<Post>,
}

impl<S, B> SseDecoder<S>
where
    S: Stream<Item = Result<B, reqwest::Error>> + Unpin,
    B: AsRef<[u8]>,
{
    fn new(chunks: S) -> Self {
        Self {
            chunks,
            buf: Vec::new(),
            ready: VecDeque::new(),
        }
    }

    async fn next_post(&mut self) -> Option<Post> {
        loop {
            if let Some(post) = self.ready.pop_front() {
                return Some(post);
            }

            match self.chunks.next().await {
                Some(Ok(chunk)) => {
                    self.buf.extend_from_slice(chunk.as_ref());
                    for line in take_complete_lines(&mut self.buf) {
                        if let Some(post) = parse_event_line(&line) {
                            self.ready.push_back(post);
                        }
                    }
                }
                Some(Err(err)) => {
                    tracing::warn!(error = %err, "live stream transport error, closing");
                    return None;
                }
                None => return None,
            }
        }
    }
}

/// Split off every complete (newline-terminated) line, leaving any partial
/// trailing line in the buffer.
fn take_complete_lines(buf: &mut Vec<u8>) -> Vec<String> {
    let Some(last_newline) = buf.iter().rposition(|&b| b == b'\n') else {
        return Vec::new();
    };

    let rest = buf.split_off(last_newline + 1);
    let complete = std::mem::replace(buf, rest);

    String::from_utf8_lossy(&complete)
        .lines()
        .map(|line| line.trim_end_matches('\r').to_string())
        .collect()
}

/// Decode one SSE line. Only `data:` lines carry posts; blank separators,
/// comments and `event:`/`id:` fields are skipped silently.
fn parse_event_line(line: &str) -> Option<Post> {
    let line = line.trim();
    if line.is_empty() || line.starts_with(':') {
        return None;
    }

    let Some(payload) = line.strip_prefix("data:") else {
        return None;
    };

    match serde_json::from_str::<Post>(payload.trim()) {
        Ok(post) => Some(post),
        Err(err) => {
            tracing::warn!(error = %err, "skipping malformed live event");
            None
        }
    }
}
