//! Line reassembly for arbitrarily chunked text.

/// Splits incoming text into complete lines, holding back the unterminated
/// trailing fragment until a later chunk completes it.
#[derive(Debug, Default, Clone)]
pub struct StreamBuffer {
    pending: String,
}

impl StreamBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `chunk` and return every line it completes, in order.
    ///
    /// A chunk ending exactly on a line feed leaves nothing pending and does
    /// not produce a trailing blank line.
    pub fn ingest(&mut self, chunk: &str) -> Vec<String> {
        self.pending.push_str(chunk);

        let Some(last_newline) = self.pending.rfind('\n') else {
            return Vec::new();
        };

        let rest = self.pending.split_off(last_newline + 1);
        let complete = std::mem::replace(&mut self.pending, rest);

        complete[..complete.len() - 1]
            .split('\n')
            .map(str::to_string)
            .collect()
    }

    /// The unterminated fragment carried to the next chunk
    pub fn pending(&self) -> &str {
        &self.pending
    }

    pub fn clear(&mut self) {
        self.pending.clear();
    }
}
