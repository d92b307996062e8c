//! Generic depth-first dispatch over a parse tree.
//!
//! The walker owns the iteration order and nothing else: rule nodes are
//! announced before their children (enter) and after all of them (exit),
//! terminals are visited exactly once in left-to-right sibling order. All
//! policy and state lives in the listener.

use super::parsetree::{ParseNode, RuleNode};
use super::token::Token;
use crate::error::GlossaError;

/// Callbacks fired by [`walk`]. Any callback may fail, which stops the walk
/// and propagates the error to the caller.
pub trait ParseTreeListener {
    fn enter_rule(&mut self, rule: &RuleNode) -> Result<(), GlossaError>;
    fn exit_rule(&mut self, rule: &RuleNode) -> Result<(), GlossaError>;
    fn visit_terminal(&mut self, token: &Token) -> Result<(), GlossaError>;
}

/// Walk `node` depth-first, dispatching to `listener`.
pub fn walk<L: ParseTreeListener>(listener: &mut L, node: &ParseNode) -> Result<(), GlossaError> {
    match node {
        ParseNode::Rule(rule) => {
            listener.enter_rule(rule)?;
            for child in &rule.children {
                walk(listener, child)?;
            }
            listener.exit_rule(rule)
        }
        ParseNode::Terminal(token) => listener.visit_terminal(token),
    }
}
