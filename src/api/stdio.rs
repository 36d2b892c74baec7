//! Newline-delimited JSON transport: one request per input line, one
//! response per output line.

use std::io;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{info_span, warn, Instrument};

use super::{handle_line, Response};
use crate::clients::InventoryClient;

/// Answers every non-blank line of `reader` on `writer` until end of input.
///
/// Lines are read as raw bytes, so a line that is not UTF-8 gets a
/// `bad_request` response instead of ending the loop. Returns the number of
/// requests answered.
pub async fn serve_lines<R, W>(client: &InventoryClient, mut reader: R, mut writer: W) -> io::Result<u64>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf = Vec::new();
    let mut request_no: u64 = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf).await? == 0 {
            break;
        }
        let raw = trim_line_end(&buf);
        if raw.iter().all(u8::is_ascii_whitespace) {
            continue;
        }
        request_no += 1;

        let span = info_span!("request", request_no);
        let response = match std::str::from_utf8(raw) {
            Ok(line) => handle_line(client, line).instrument(span).await,
            Err(e) => {
                let _entered = span.enter();
                warn!(error = %e, "Rejected request that is not UTF-8");
                Response::bad_request(format!("request is not valid UTF-8: {e}"))
            }
        };

        let mut out = serde_json::to_vec(&response)?;
        out.push(b'\n');
        writer.write_all(&out).await?;
        writer.flush().await?;
    }

    Ok(request_no)
}

fn trim_line_end(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
