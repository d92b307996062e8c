use std::{error::Error, fmt, fmt::Display, io};

use crate::frontend::position::Position;

/// All errors the crate can surface to a caller.
///
/// Lexing and parsing errors carry the source position they were raised at.
/// `MalformedTraversal` signals a broken enter/exit discipline during a tree
/// walk and is always fatal for the running session. `ResourceError` wraps a
/// failure on the output destination together with its path. `RenderError`
/// only concerns the optional GraphViz invocation and never invalidates the
/// already written DOT artifact.
#[derive(Debug)]
pub enum GlossaError {
    SyntaxError { pos: Position, msg: String },
    ParseError { pos: Position, msg: String },
    MalformedTraversal { msg: String },
    ResourceError { path: String, cause: io::Error },
    RenderError { msg: String },
}

impl GlossaError {
    pub fn malformed(msg: &str) -> Self {
        GlossaError::MalformedTraversal {
            msg: msg.to_string(),
        }
    }

    pub fn resource(path: &str, cause: io::Error) -> Self {
        GlossaError::ResourceError {
            path: path.to_string(),
            cause,
        }
    }

    pub fn render(msg: String) -> Self {
        GlossaError::RenderError { msg }
    }
}

impl Display for GlossaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GlossaError::SyntaxError { pos, msg } => write!(f, "Syntax error at {}: {}", pos, msg),
            GlossaError::ParseError { pos, msg } => write!(f, "Parse error at {}: {}", pos, msg),
            GlossaError::MalformedTraversal { msg } => write!(f, "Malformed traversal: {}", msg),
            GlossaError::ResourceError { path, cause } => {
                write!(f, "Resource error on '{}': {}", path, cause)
            }
            GlossaError::RenderError { msg } => write!(f, "Render error: {}", msg),
        }
    }
}

impl Error for GlossaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            GlossaError::ResourceError { cause, .. } => Some(cause),
            _ => None,
        }
    }
}
