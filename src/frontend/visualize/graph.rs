//! Streaming writer for the Graphviz DOT output and the optional call into
//! the external `dot` tool.
//!
//! The writer mirrors DOT's order-dependent semantics directly: a `node
//! [...]` style directive applies to every node declared after it until the
//! next directive, so callers must emit the style for a node before the edge
//! that introduces it. Nothing is buffered into an object graph; every call
//! appends to the output immediately.

use std::fmt::{self, Display};
use std::io::{self, Write};
use std::process::Command;

use crate::error::GlossaError;

/// Attributes of a `node [...]` style directive. Unset attributes are left
/// out of the directive so earlier values stay in effect.
#[derive(Debug, Clone, Copy)]
pub struct Style {
    pub shape: Option<&'static str>,
    pub style: Option<&'static str>,
    pub color: Option<&'static str>,
    pub fill_color: &'static str,
}

/// Style of rule nodes: rounded khaki boxes with a red border.
pub const RULE_STYLE: Style = Style {
    shape: Some("box"),
    style: Some("\"rounded,filled\""),
    color: Some("red"),
    fill_color: "khaki",
};

/// Style of terminal nodes: the fill flips to palegreen, everything else is
/// inherited from the directive in effect.
pub const TERMINAL_STYLE: Style = Style {
    shape: None,
    style: None,
    color: None,
    fill_color: "palegreen",
};

impl Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node [")?;
        if let Some(shape) = self.shape {
            write!(f, "shape={}, ", shape)?;
        }
        if let Some(style) = self.style {
            write!(f, "style={}, ", style)?;
        }
        if let Some(color) = self.color {
            write!(f, "color={}, ", color)?;
        }
        write!(f, "fillcolor={}];", self.fill_color)
    }
}

/// Streaming DOT serializer owning the output resource between `open` and
/// `close`. Dropping the writer closes it, so the artifact ends with its
/// trailer on every exit path.
pub struct DotWriter<W: Write> {
    writer: W,
    opened: bool,
    closed: bool,
}

impl<W: Write> DotWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            opened: false,
            closed: false,
        }
    }

    /// Write the fixed header. Must precede any other write; subsequent
    /// calls do nothing.
    pub fn open(&mut self) -> io::Result<()> {
        if self.opened {
            return Ok(());
        }
        self.opened = true;
        writeln!(self.writer, "digraph G {{")
    }

    /// Write a global style directive applying to all nodes declared after
    /// it.
    pub fn style(&mut self, style: &Style) -> io::Result<()> {
        writeln!(self.writer, "{}", style)
    }

    /// Write one directed edge. The style intended for `to` must already be
    /// in effect.
    pub fn edge(&mut self, from: &str, to: &str) -> io::Result<()> {
        writeln!(self.writer, "\"{}\" -> \"{}\";", from, to)
    }

    /// Write the trailer and flush. Idempotent; if the header was never
    /// written the output stays empty, since a lone trailer would not be
    /// valid DOT.
    pub fn close(&mut self) -> io::Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        if self.opened {
            writeln!(self.writer, "}}")?;
        }
        self.writer.flush()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl<W: Write> Drop for DotWriter<W> {
    fn drop(&mut self) {
        let _ = self.close();
    }
}

/// Invoke the external GraphViz tool on a finished DOT file, as
/// `dot -T<format> <dot-file> -o <image-file>`. A failure here is reported
/// to the caller but the DOT artifact itself remains valid and in place.
pub fn render(dot_path: &str, image_path: &str, format: &str) -> Result<(), GlossaError> {
    tracing::debug!("rendering {} to {} as {}", dot_path, image_path, format);
    let status = Command::new("dot")
        .arg(format!("-T{}", format))
        .arg(dot_path)
        .arg("-o")
        .arg(image_path)
        .status()
        .map_err(|e| {
            GlossaError::render(format!(
                "Unable to run GraphViz on {}. Is 'dot' installed? ({})",
                dot_path, e
            ))
        })?;
    if status.success() {
        Ok(())
    } else {
        Err(GlossaError::render(format!(
            "GraphViz failed on {} ({})",
            dot_path, status
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_graph() {
        let mut buf = Vec::new();
        {
            let mut dot = DotWriter::new(&mut buf);
            dot.open().unwrap();
            dot.close().unwrap();
        }
        assert_eq!(String::from_utf8(buf).unwrap(), "digraph G {\n}\n");
    }

    #[test]
    fn test_styles_and_edges() {
        let mut buf = Vec::new();
        {
            let mut dot = DotWriter::new(&mut buf);
            dot.open().unwrap();
            dot.style(&RULE_STYLE).unwrap();
            dot.edge("file_0", "program_1").unwrap();
            dot.style(&TERMINAL_STYLE).unwrap();
            dot.edge("program_1", "PROGRAMMA_2").unwrap();
            dot.close().unwrap();
        }
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "digraph G {\n\
             node [shape=box, style=\"rounded,filled\", color=red, fillcolor=khaki];\n\
             \"file_0\" -> \"program_1\";\n\
             node [fillcolor=palegreen];\n\
             \"program_1\" -> \"PROGRAMMA_2\";\n\
             }\n"
        );
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut buf = Vec::new();
        {
            let mut dot = DotWriter::new(&mut buf);
            dot.open().unwrap();
            dot.close().unwrap();
            dot.close().unwrap();
            assert!(dot.is_closed());
        }
        assert_eq!(String::from_utf8(buf).unwrap(), "digraph G {\n}\n");
    }

    #[test]
    fn test_drop_writes_trailer() {
        let mut buf = Vec::new();
        {
            let mut dot = DotWriter::new(&mut buf);
            dot.open().unwrap();
            // Dropped without an explicit close.
        }
        assert_eq!(String::from_utf8(buf).unwrap(), "digraph G {\n}\n");
    }

    #[test]
    fn test_unopened_writer_stays_empty() {
        let mut buf = Vec::new();
        {
            let mut dot = DotWriter::new(&mut buf);
            dot.close().unwrap();
        }
        assert!(buf.is_empty());
    }
}
