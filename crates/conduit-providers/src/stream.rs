use std::sync::Arc;

use conduit_types::{offer_cancellable, CancelToken, DropCounter, RawEvent};
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::traits::DialectParser;

/// Lines longer than this are reported as a decode error and skipped; the
/// reader keeps going.
pub const MAX_LINE_BYTES: usize = 1024 * 1024;

/// Per-run producer statistics, returned when the parser task finishes.
#[derive(Debug, Default, Clone, Copy)]
pub struct ParserStats {
    pub lines_read: u64,
    pub dropped: u64,
}

/// Drives one dialect parser over a reader, emitting `RawEvent`s on `tx`
/// until EOF or cancellation.
///
/// This is the one shared line-reading control-flow function every dialect
/// is parameterized through: `DialectParser` is the trait object the
/// caller plugs in.
pub fn spawn_parser<R>(
    parser: Arc<dyn DialectParser>,
    mut reader: R,
    tx: mpsc::Sender<RawEvent>,
    mut cancel: CancelToken,
) -> JoinHandle<ParserStats>
where
    R: AsyncBufRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut stats = ParserStats::default();
        let mut drops = DropCounter::new(100);
        let mut buf: Vec<u8> = Vec::new();

        loop {
            if cancel.is_cancelled() {
                break;
            }

            buf.clear();
            let read_result = tokio::select! {
                res = reader.read_until(b'\n', &mut buf) => res,
                _ = cancel.cancelled() => break,
            };

            let n = match read_result {
                Ok(0) => break,
                Ok(n) => n,
                Err(_) => break,
            };
            let _ = n;
            stats.lines_read += 1;

            while matches!(buf.last(), Some(b'\n') | Some(b'\r')) {
                buf.pop();
            }
            if buf.is_empty() {
                continue;
            }

            if buf.len() > MAX_LINE_BYTES {
                let oversized = RawEvent::error(
                    None,
                    format!("line exceeds {} byte maximum", MAX_LINE_BYTES),
                );
                if !offer_cancellable(&tx, oversized, &cancel) {
                    stats.dropped += 1;
                }
                continue;
            }

            for event in parser.parse_line(&buf) {
                if !offer_cancellable(&tx, event, &cancel) {
                    stats.dropped += 1;
                    if drops.record() {
                        eprintln!(
                            "[conduit:{}] dropped event (drop #{}): sink full or run cancelled",
                            parser.id(),
                            drops.count()
                        );
                    }
                }
            }
        }

        stats
    })
}
