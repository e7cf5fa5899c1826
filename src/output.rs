//! Output sinks for the PRN and PRA instructions.
//!
//! The CPU hands every emission to an [`OutputSink`] in program order. Sinks
//! are provided for recording (`Vec<Output>`), callbacks (any `FnMut(Output)`)
//! and text streams ([`WriterSink`]).

use std::io::Write;

/// A single value emitted by the CPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Output {
    /// Decimal value printed by PRN.
    Number(u8),
    /// Character code printed by PRA.
    Char(u8),
}

impl std::fmt::Display for Output {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            Output::Number(n) => writeln!(f, "{}", n),
            Output::Char(c) => write!(f, "{}", *c as char),
        }
    }
}

/// Receiver for CPU output.
pub trait OutputSink {
    /// Accepts one emission. Called in program order.
    fn emit(&mut self, output: Output);
}

impl OutputSink for Vec<Output> {
    fn emit(&mut self, output: Output) {
        self.push(output);
    }
}

impl<F: FnMut(Output)> OutputSink for F {
    fn emit(&mut self, output: Output) {
        self(output)
    }
}

/// Writes emissions as text: PRN values one per line, PRA characters raw.
///
/// # Examples
///
/// ```
/// use ls8::{Output, OutputSink, WriterSink};
///
/// let mut sink = WriterSink::new(Vec::new());
/// sink.emit(Output::Number(72));
/// sink.emit(Output::Char(b'H'));
/// assert_eq!(sink.into_inner(), b"72\nH");
/// ```
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> OutputSink for WriterSink<W> {
    fn emit(&mut self, output: Output) {
        // The emulated machine has no notion of a failed console write.
        if let Err(e) = write!(self.writer, "{}", output).and_then(|_| self.writer.flush()) {
            log::error!("failed to write output: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink_preserves_order() {
        let mut sink: Vec<Output> = Vec::new();
        sink.emit(Output::Number(1));
        sink.emit(Output::Char(b'a'));
        sink.emit(Output::Number(2));
        assert_eq!(
            sink,
            vec![Output::Number(1), Output::Char(b'a'), Output::Number(2)]
        );
    }

    #[test]
    fn test_closure_sink() {
        let mut seen = Vec::new();
        {
            let mut sink = |o: Output| seen.push(o);
            sink.emit(Output::Number(9));
        }
        assert_eq!(seen, vec![Output::Number(9)]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Output::Number(255).to_string(), "255\n");
        assert_eq!(Output::Char(b'!').to_string(), "!");
    }
}
