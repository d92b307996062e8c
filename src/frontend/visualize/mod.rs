//! Serializing a parse tree into a Graphviz/DOT graph.
//!
//! The [`Visualizer`] is a traversal session: it reacts to the enter/exit/
//! terminal callbacks of the generic walker, keeps the ancestry of currently
//! open rules on a stack, hands out globally unique node identifiers from a
//! session-scoped serial counter, and streams style directives and edges
//! through the [`graph::DotWriter`]. All traversal state lives in the
//! session object, so independent traversals never interfere.
//!
//! Which terminals are drawn, whether identifier and literal source text is
//! embedded in node ids, and which control-construct rules get nodes of
//! their own is decided by the [`Policy`] the session is created with.

use std::fs;
use std::io::{self, Write};

use tracing::{debug, trace};

use super::parsetree::{RuleKind, RuleNode};
use super::token::{Token, Type};
use super::walker::ParseTreeListener;
use crate::error::GlossaError;

pub mod classify;
pub mod graph;

use self::classify::classify;
use self::graph::{DotWriter, RULE_STYLE, TERMINAL_STYLE};

pub use super::parsetree::Policy;

/// Lifecycle of a traversal session. The first entered rule opens the
/// session, the exit of that rule closes it; a closed session accepts no
/// further callbacks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Unopened,
    Open,
    Closed,
}

/// One parse-tree-to-DOT traversal session.
pub struct Visualizer<W: Write> {
    policy: Policy,
    /// Monotone counter; never reset or reused within the session, which is
    /// what makes node identifiers unique.
    serial: u32,
    /// Identifiers of the rules entered but not yet exited, root first.
    rule_stack: Vec<String>,
    /// True while a keyword-like classification has fired during the current
    /// terminal visit; cleared when the visit ends.
    keyword_seen: bool,
    state: SessionState,
    /// Description of the output destination, for error reporting.
    target: String,
    dot: DotWriter<W>,
}

impl Visualizer<io::BufWriter<fs::File>> {
    /// Open a session writing to the file at `path`.
    pub fn create(path: &str, policy: Policy) -> Result<Self, GlossaError> {
        let file = fs::File::create(path).map_err(|e| GlossaError::resource(path, e))?;
        Ok(Self::new(io::BufWriter::new(file), path, policy))
    }
}

impl<W: Write> Visualizer<W> {
    pub fn new(writer: W, target: &str, policy: Policy) -> Self {
        Self {
            policy,
            serial: 0,
            rule_stack: Vec::new(),
            keyword_seen: false,
            state: SessionState::Unopened,
            target: target.to_string(),
            dot: DotWriter::new(writer),
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Number of rules currently entered but not exited.
    pub fn depth(&self) -> usize {
        self.rule_stack.len()
    }

    /// Close the session early. The trailer is written (if the header was)
    /// and the output resource is released, so the artifact stays consumable
    /// even when the traversal never ran to completion, e.g. after an
    /// upstream failure.
    pub fn abort(&mut self) -> Result<(), GlossaError> {
        if self.state == SessionState::Closed {
            return Ok(());
        }
        debug!("aborting traversal session for {}", self.target);
        self.rule_stack.clear();
        self.state = SessionState::Closed;
        self.dot
            .close()
            .map_err(|e| GlossaError::resource(&self.target, e))
    }

    //-------
    // HELPER
    //-------

    fn next_serial(&mut self) -> u32 {
        let n = self.serial;
        self.serial += 1;
        n
    }

    fn resource_err(&self, cause: io::Error) -> GlossaError {
        GlossaError::resource(&self.target, cause)
    }

    /// Emit the node for an entered rule and push it on the ancestry stack.
    /// The root gets no incoming edge.
    fn rule_node(&mut self, kind: RuleKind) -> Result<(), GlossaError> {
        let id = format!("{}_{}", kind.as_str(), self.next_serial());
        if let Some(parent) = self.rule_stack.last().cloned() {
            self.dot
                .style(&RULE_STYLE)
                .map_err(|e| self.resource_err(e))?;
            self.dot
                .edge(&parent, &id)
                .map_err(|e| self.resource_err(e))?;
        }
        self.rule_stack.push(id);
        Ok(())
    }

    /// Emit a terminal-styled leaf hanging off the current stack top.
    fn leaf_node(&mut self, id: &str) -> Result<(), GlossaError> {
        let parent = match self.rule_stack.last().cloned() {
            Some(parent) => parent,
            None => return Ok(()),
        };
        self.dot
            .style(&TERMINAL_STYLE)
            .map_err(|e| self.resource_err(e))?;
        self.dot
            .edge(&parent, id)
            .map_err(|e| self.resource_err(e))?;
        Ok(())
    }

    /// Literal leaf for the exit of a primitive rule, with the literal
    /// source text embedded in the identifier.
    fn literal_node(&mut self, rule: &RuleNode) -> Result<(), GlossaError> {
        let prefix = match classify::literal_prefix(rule.kind) {
            Some(prefix) => prefix,
            None => return Ok(()),
        };
        let text = match rule.terminal_text() {
            Some(text) => text.replace('"', "\\\""),
            None => return Ok(()),
        };
        let id = format!("{}_{}_{}", text, prefix, self.next_serial());
        self.leaf_node(&id)
    }

    fn emit_terminal(&mut self, token: &Token) -> Result<(), GlossaError> {
        match self.state {
            SessionState::Closed => {
                return Err(GlossaError::malformed(
                    "visit_terminal after the session was closed",
                ))
            }
            // No rule has been entered yet, so there is no ancestor to
            // attach the terminal to.
            SessionState::Unopened => return Ok(()),
            SessionState::Open => {}
        }
        let class = match classify(&token.typ) {
            Some(class) => class,
            None => {
                trace!("terminal {} has no display entry, skipping", token.typ);
                return Ok(());
            }
        };
        if class.keyword_like {
            self.keyword_seen = true;
        }
        let id = match token.typ {
            Type::Identifier => {
                // A keyword-like classification in the same visit takes
                // priority over the identifier classification.
                if self.policy.guard_identifiers && self.keyword_seen {
                    trace!("identifier {} suppressed by keyword guard", token.lexeme);
                    return Ok(());
                }
                if self.policy.capture_literal_text {
                    format!("{}_{}_{}", token.text(), class.prefix, self.next_serial())
                } else {
                    format!("{}_{}", class.prefix, self.next_serial())
                }
            }
            _ => format!("{}_{}", class.prefix, self.next_serial()),
        };
        self.leaf_node(&id)
    }

    fn finalize(&mut self) -> Result<(), GlossaError> {
        debug!("traversal complete, closing {}", self.target);
        self.state = SessionState::Closed;
        self.dot
            .close()
            .map_err(|e| GlossaError::resource(&self.target, e))
    }
}

impl<W: Write> ParseTreeListener for Visualizer<W> {
    fn enter_rule(&mut self, rule: &RuleNode) -> Result<(), GlossaError> {
        match self.state {
            SessionState::Closed => {
                return Err(GlossaError::malformed(
                    "enter_rule after the session was closed",
                ))
            }
            SessionState::Unopened => {
                self.dot.open().map_err(|e| self.resource_err(e))?;
                self.state = SessionState::Open;
            }
            SessionState::Open => {}
        }
        if rule.kind.is_literal() || !self.policy.supports(rule.kind) {
            return Ok(());
        }
        self.rule_node(rule.kind)
    }

    fn exit_rule(&mut self, rule: &RuleNode) -> Result<(), GlossaError> {
        match self.state {
            SessionState::Closed => {
                return Err(GlossaError::malformed(
                    "exit_rule after the session was closed",
                ))
            }
            SessionState::Unopened => {
                return Err(GlossaError::malformed("exit_rule before any rule was entered"))
            }
            SessionState::Open => {}
        }
        if rule.kind.is_literal() {
            if self.policy.capture_literal_text {
                self.literal_node(rule)?;
            }
            return Ok(());
        }
        if !self.policy.supports(rule.kind) {
            return Ok(());
        }
        let popped = match self.rule_stack.pop() {
            Some(id) => id,
            None => return Err(GlossaError::malformed("exit_rule on an empty ancestry stack")),
        };
        let name = match popped.rsplit_once('_') {
            Some((name, _)) => name,
            None => popped.as_str(),
        };
        if name != rule.kind.as_str() {
            return Err(GlossaError::malformed(&format!(
                "exit_rule for '{}' does not match the entered rule '{}'",
                rule.kind.as_str(),
                popped
            )));
        }
        if self.rule_stack.is_empty() {
            // The root was exited.
            self.finalize()?;
        }
        Ok(())
    }

    fn visit_terminal(&mut self, token: &Token) -> Result<(), GlossaError> {
        let result = self.emit_terminal(token);
        // The guard lives for exactly one terminal visit.
        self.keyword_seen = false;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::lexer::Lexer;
    use crate::frontend::parser::Parser;
    use crate::frontend::parsetree::ParseNode;
    use crate::frontend::position::Position;
    use crate::frontend::walker::walk;

    fn rule(kind: RuleKind) -> RuleNode<'static> {
        RuleNode::new(kind, Vec::new())
    }

    fn token(typ: Type, lexeme: &'static str) -> Token<'static> {
        Token::new(typ, Position::new(1, 1, 1), lexeme)
    }

    /// Edge lines of the produced output as (from, to) pairs.
    fn edges(output: &str) -> Vec<(String, String)> {
        output
            .lines()
            .filter(|line| line.contains("->"))
            .map(|line| {
                let mut ids = line.split('"').filter(|part| {
                    !part.trim().is_empty() && !part.contains("->") && *part != ";"
                });
                (
                    ids.next().expect("edge with no source").to_string(),
                    ids.next().expect("edge with no target").to_string(),
                )
            })
            .collect()
    }

    #[test]
    fn test_stack_depth_trace() {
        let mut buf = Vec::new();
        {
            let mut session = Visualizer::new(&mut buf, "<test>", Policy::guarded());
            let mut trace = vec![];
            session.enter_rule(&rule(RuleKind::File)).unwrap();
            trace.push(session.depth());
            session.enter_rule(&rule(RuleKind::Program)).unwrap();
            trace.push(session.depth());
            session.enter_rule(&rule(RuleKind::StmtList)).unwrap();
            trace.push(session.depth());
            session.exit_rule(&rule(RuleKind::StmtList)).unwrap();
            trace.push(session.depth());
            session.exit_rule(&rule(RuleKind::Program)).unwrap();
            trace.push(session.depth());
            session.exit_rule(&rule(RuleKind::File)).unwrap();
            trace.push(session.depth());
            assert_eq!(trace, vec![1, 2, 3, 2, 1, 0]);
            assert_eq!(session.state(), SessionState::Closed);
        }
    }

    #[test]
    fn test_program_with_four_terminals() {
        let mut buf = Vec::new();
        {
            let mut session = Visualizer::new(&mut buf, "<test>", Policy::literal_capture());
            let program = RuleNode::new(
                RuleKind::Program,
                vec![
                    ParseNode::Terminal(token(Type::Programma, "PROGRAMMA")),
                    ParseNode::Terminal(token(Type::Identifier, "Test")),
                    ParseNode::Terminal(token(Type::Arxh, "ARXH")),
                    ParseNode::Terminal(token(Type::TelosProgrammatos, "TELOS_PROGRAMMATOS")),
                ],
            );
            walk(&mut session, &ParseNode::Rule(program)).unwrap();
            assert_eq!(session.state(), SessionState::Closed);
        }
        let output = String::from_utf8(buf).unwrap();
        assert_eq!(output.matches("digraph G {").count(), 1);
        assert_eq!(output.lines().filter(|l| *l == "}").count(), 1);
        let edges = edges(&output);
        assert_eq!(edges.len(), 4);
        for (from, _) in &edges {
            assert_eq!(from, "program_0");
        }
        assert!(edges.iter().any(|(_, to)| to.contains("Test")));
    }

    #[test]
    fn test_ids_unique_and_edge_count() {
        let src = "PROGRAMMA Demo\n\
                   METABLHTES AKERAIES: x, y\n\
                   ARXH\n\
                   x <- 1 + 2 * 3\n\
                   AN x > 5 TOTE\n  GRAPSE 'big', x\n\
                   ALLIOS\n  GRAPSE 'small'\n\
                   TELOS_AN\n\
                   OSO x < 10 EPANALABE\n  x <- x + 1\nTELOS_EPANALHPSHS\n\
                   TELOS_PROGRAMMATOS";
        let tokens = Lexer::new(src).tokenize().unwrap();
        let tree = Parser::new(tokens).parse().unwrap();
        let mut buf = Vec::new();
        {
            let mut session = Visualizer::new(&mut buf, "<test>", Policy::literal_capture());
            walk(&mut session, &tree).unwrap();
            assert_eq!(session.state(), SessionState::Closed);
        }
        let output = String::from_utf8(buf).unwrap();
        let edges = edges(&output);
        assert!(!edges.is_empty());

        // Every edge introduces exactly one new node: targets are pairwise
        // distinct and only the root never appears as a target.
        let mut targets: Vec<&String> = edges.iter().map(|(_, to)| to).collect();
        targets.sort();
        let total = targets.len();
        targets.dedup();
        assert_eq!(targets.len(), total);

        let mut nodes: Vec<&String> = edges.iter().flat_map(|(f, t)| vec![f, t]).collect();
        nodes.sort();
        nodes.dedup();
        assert_eq!(edges.len(), nodes.len() - 1);
        let roots: Vec<&&String> = nodes
            .iter()
            .filter(|n| !edges.iter().any(|(_, to)| to == **n))
            .collect();
        assert_eq!(roots.len(), 1);
        assert_eq!(roots[0].as_str(), "file_0");
    }

    #[test]
    fn test_guarded_policy_hides_control_rules_and_text() {
        let src = "PROGRAMMA Demo\nARXH\n\
                   OSO x < 10 EPANALABE\n  x <- x + 1\nTELOS_EPANALHPSHS\n\
                   TELOS_PROGRAMMATOS";
        let tokens = Lexer::new(src).tokenize().unwrap();
        let tree = Parser::new(tokens).parse().unwrap();
        let mut buf = Vec::new();
        {
            let mut session = Visualizer::new(&mut buf, "<test>", Policy::guarded());
            walk(&mut session, &tree).unwrap();
        }
        let output = String::from_utf8(buf).unwrap();
        // Control-construct rules get no nodes; their children hang off the
        // enclosing statement list.
        assert!(!output.contains("whilectrl"));
        assert!(!output.contains("stat_while"));
        assert!(output.contains("stmtlist"));
        // Identifier ids carry no source text in guarded mode.
        assert!(output.contains("IDENTIFIER_"));
        assert!(!output.contains("x_IDENTIFIER"));
        // Demo appears only inside an id in capture mode, never in guarded.
        assert!(!output.contains("Demo"));
    }

    #[test]
    fn test_keyword_never_doubles_as_identifier() {
        let mut buf = Vec::new();
        {
            let mut session = Visualizer::new(&mut buf, "<test>", Policy::guarded());
            session.enter_rule(&rule(RuleKind::IfCtrl)).unwrap();
            session.visit_terminal(&token(Type::An, "AN")).unwrap();
            assert!(!session.keyword_seen);
        }
        let output = String::from_utf8(buf).unwrap();
        assert_eq!(edges(&output).len(), 1);
        assert!(output.contains("\"AN_1\""));
        assert!(!output.contains("IDENTIFIER"));
    }

    #[test]
    fn test_literal_emitted_on_rule_exit() {
        let literal = RuleNode::new(
            RuleKind::IntLiteral,
            vec![ParseNode::Terminal(token(Type::Integer(42), "42"))],
        );

        // Capture mode: the exit of the primitive rule produces the leaf.
        let mut buf = Vec::new();
        {
            let mut session = Visualizer::new(&mut buf, "<test>", Policy::literal_capture());
            session.enter_rule(&rule(RuleKind::PrimaryExpr)).unwrap();
            session.enter_rule(&literal).unwrap();
            assert_eq!(session.depth(), 1);
            session.exit_rule(&literal).unwrap();
        }
        let output = String::from_utf8(buf).unwrap();
        let found = edges(&output);
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].0, "expr_primitive_0");
        assert!(found[0].1.starts_with("42_INTEGER_"));

        // Guarded mode: nothing is emitted for the literal.
        let mut buf = Vec::new();
        {
            let mut session = Visualizer::new(&mut buf, "<test>", Policy::guarded());
            session.enter_rule(&rule(RuleKind::PrimaryExpr)).unwrap();
            session.enter_rule(&literal).unwrap();
            session.exit_rule(&literal).unwrap();
        }
        let output = String::from_utf8(buf).unwrap();
        assert!(edges(&output).is_empty());
    }

    #[test]
    fn test_abort_closes_session() {
        let mut buf = Vec::new();
        {
            let mut session = Visualizer::new(&mut buf, "<test>", Policy::guarded());
            session.enter_rule(&rule(RuleKind::File)).unwrap();
            session.abort().unwrap();
            assert_eq!(session.state(), SessionState::Closed);
            // Aborting twice is harmless.
            session.abort().unwrap();
            // Any further callback is a usage error.
            assert!(session.enter_rule(&rule(RuleKind::Program)).is_err());
            assert!(session
                .visit_terminal(&token(Type::An, "AN"))
                .is_err());
        }
        let output = String::from_utf8(buf).unwrap();
        assert!(output.starts_with("digraph G {"));
        assert!(output.trim_end().ends_with('}'));
    }

    #[test]
    fn test_malformed_exits() {
        // Exit before any enter.
        let mut buf = Vec::new();
        let mut session = Visualizer::new(&mut buf, "<test>", Policy::guarded());
        assert!(session.exit_rule(&rule(RuleKind::File)).is_err());

        // Exit of a rule that is not on top of the stack.
        let mut buf = Vec::new();
        let mut session = Visualizer::new(&mut buf, "<test>", Policy::guarded());
        session.enter_rule(&rule(RuleKind::File)).unwrap();
        session.enter_rule(&rule(RuleKind::Program)).unwrap();
        let err = session.exit_rule(&rule(RuleKind::File)).unwrap_err();
        match err {
            GlossaError::MalformedTraversal { msg } => {
                assert!(msg.contains("program"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_sessions_are_independent() {
        // Serial counters are per session, not ambient.
        let mut first_buf = Vec::new();
        let mut second_buf = Vec::new();
        {
            let mut first = Visualizer::new(&mut first_buf, "<a>", Policy::guarded());
            let mut second = Visualizer::new(&mut second_buf, "<b>", Policy::guarded());
            first.enter_rule(&rule(RuleKind::File)).unwrap();
            second.enter_rule(&rule(RuleKind::File)).unwrap();
            first.enter_rule(&rule(RuleKind::Program)).unwrap();
            second.enter_rule(&rule(RuleKind::Program)).unwrap();
        }
        let first = String::from_utf8(first_buf).unwrap();
        let second = String::from_utf8(second_buf).unwrap();
        assert!(first.contains("\"file_0\" -> \"program_1\";"));
        assert_eq!(first, second);
    }
}
