/// Reassembles complete text lines from an arbitrarily chunked byte stream.
///
/// Log streams arrive in fixed-size reads that can split a line anywhere,
/// including inside a multi-byte character, so incomplete bytes are carried
/// in a residual buffer until the next chunk supplies the rest. NUL bytes
/// are stripped and lines that are blank after stripping are suppressed.
#[derive(Debug, Default)]
pub struct LineFramer {
    residual: Vec<u8>,
}

impl LineFramer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one chunk, returning every line completed by it, in order.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.residual.extend_from_slice(chunk);

        let mut lines = Vec::new();
        while let Some(pos) = self.residual.iter().position(|&b| b == b'\n') {
            let rest = self.residual.split_off(pos + 1);
            let mut raw = std::mem::replace(&mut self.residual, rest);
            raw.pop(); // the newline itself
            if let Some(line) = clean(&raw) {
                lines.push(line);
            }
        }
        lines
    }

    /// Flush the trailing line at end of stream, if the stream did not end
    /// with a newline.
    pub fn finish(self) -> Option<String> {
        clean(&self.residual)
    }
}

fn clean(raw: &[u8]) -> Option<String> {
    let line = String::from_utf8_lossy(raw).replace('\0', "");
    if line.trim().is_empty() {
        None
    } else {
        Some(line)
    }
}
