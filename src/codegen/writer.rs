//! Indent-aware string builder shared by all emitters.
//!
//! PineScript bodies and the C-style stub targets both indent with 4
//! spaces.

pub struct CodeWriter {
    buf: String,
    indent_level: usize,
    at_line_start: bool,
}

impl CodeWriter {
    pub fn new() -> Self {
        Self {
            buf: String::with_capacity(2048),
            indent_level: 0,
            at_line_start: true,
        }
    }

    /// Write a complete line (appends newline).
    pub fn line(&mut self, text: &str) {
        self.write_indent();
        self.buf.push_str(text);
        self.buf.push('\n');
        self.at_line_start = true;
    }

    /// Write an empty line.
    pub fn blank(&mut self) {
        self.buf.push('\n');
        self.at_line_start = true;
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    pub fn dedent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    /// Write `text` then `{` on its own line and indent (C-style targets).
    pub fn block_open(&mut self, text: &str) {
        self.line(text);
        self.line("{");
        self.indent();
    }

    /// Dedent and close a `{` block.
    pub fn block_close(&mut self) {
        self.dedent();
        self.line("}");
    }

    /// Consume the writer and return the generated source text.
    pub fn finish(self) -> String {
        self.buf
    }

    fn write_indent(&mut self) {
        if self.at_line_start && self.indent_level > 0 {
            for _ in 0..self.indent_level {
                self.buf.push_str("    ");
            }
        }
        self.at_line_start = false;
    }
}

impl Default for CodeWriter {
    fn default() -> Self {
        Self::new()
    }
}
