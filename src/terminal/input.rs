//! Reading candidate input from a byte stream.

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

/// Read the next line from `reader`, without its line ending.
///
/// Bytes that are not valid UTF-8 become U+FFFD instead of failing the
/// read, so one badly encoded line never ends the session. Returns `None`
/// at end of input.
///
/// # Errors
///
/// Returns the underlying I/O error if the stream itself fails.
pub async fn read_input_line<R>(
    reader: &mut R,
    buf: &mut Vec<u8>,
) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    buf.clear();
    if reader.read_until(b'\n', buf).await? == 0 {
        return Ok(None);
    }

    let line = match String::from_utf8(std::mem::take(buf)) {
        Ok(line) => line,
        Err(e) => {
            tracing::warn!(
                bytes = e.as_bytes().len(),
                "input line was not valid UTF-8; invalid bytes replaced"
            );
            String::from_utf8_lossy(e.as_bytes()).into_owned()
        }
    };
    Ok(Some(line.trim_end_matches(['\n', '\r']).to_owned()))
}
