//! The frontend module contains everything from source text to the rendered
//! parse-tree graph.
//!
//! # Lexer
//! The lexer converts the input string into a queue of tokens which are
//! defined in the token module.
//! ### Example
//! ```rust
//! use glossa::frontend::lexer::Lexer;
//! let tokens_or_err = Lexer::new("x <- 1 + 2").tokenize();
//! ```
//!
//! # Parser
//! The parser consumes the token stream and builds a parse tree in which
//! every consumed token survives as a terminal leaf.
//! ### Example
//! ```rust
//! use glossa::frontend::{lexer::Lexer, parser::Parser};
//! let tokens = Lexer::new("PROGRAMMA P\nARXH\nTELOS_PROGRAMMATOS")
//!     .tokenize()
//!     .unwrap();
//! let tree_or_err = Parser::new(tokens).parse();
//! ```
//!
//! # Visualization
//! The walker drives a traversal session over the tree which serializes it
//! into the Graphviz DOT language, to be rendered into an image with the
//! external `dot` tool.

pub mod lexer;
pub mod parser;
pub mod parsetree;
pub mod position;
pub mod token;
pub mod visualize;
pub mod walker;
