//! Parse tree datastructures.
//!
//! Unlike an abstract syntax tree the parse tree keeps every consumed token
//! as a leaf, so a traversal sees the full concrete syntax: internal nodes
//! carry a grammar rule kind, leaves carry the original tokens.

use super::token::Token;

/// A vertex of the parse tree: either a rule instance or a terminal leaf.
#[derive(Debug, Clone)]
pub enum ParseNode<'a> {
    Rule(RuleNode<'a>),
    Terminal(Token<'a>),
}

/// One instance of a grammar production with its children in source order.
#[derive(Debug, Clone)]
pub struct RuleNode<'a> {
    pub kind: RuleKind,
    pub children: Vec<ParseNode<'a>>,
}

impl<'a> RuleNode<'a> {
    pub fn new(kind: RuleKind, children: Vec<ParseNode<'a>>) -> Self {
        Self { kind, children }
    }

    /// Display text of the first terminal child, if any. Literal rules wrap
    /// exactly one terminal, so this is how their source text is recovered.
    pub fn terminal_text(&self) -> Option<&str> {
        self.children.iter().find_map(|child| match child {
            ParseNode::Terminal(token) => Some(token.text()),
            ParseNode::Rule(_) => None,
        })
    }
}

/// The closed set of grammar productions the parser can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    File,
    Program,
    FuncDef,
    ProcDef,
    FunArgs,
    VarDecl,
    VarDeclItem,
    ConstDecl,
    ConstDeclItem,
    StmtList,
    ExprStmt,
    AssignStmt,
    IoStmt,
    IfStmt,
    WhileStmt,
    DoWhileStmt,
    SwitchStmt,
    Assign,
    IfCtrl,
    ElseIfCtrl,
    ElseCtrl,
    WhileCtrl,
    DoWhileCtrl,
    ForCtrl,
    SwitchCtrl,
    CaseCtrl,
    OtherwiseCtrl,
    ParenExpr,
    PowerExpr,
    UnaryExpr,
    MulDivExpr,
    PlusMinusExpr,
    CompareExpr,
    LogicExpr,
    CallExpr,
    PrimaryExpr,
    IntLiteral,
    DecLiteral,
    StrLiteral,
}

impl RuleKind {
    /// Name used in emitted graph node identifiers. Must not end with an
    /// underscore: identifiers are formed as `<name>_<serial>` and split at
    /// the last underscore when a matching exit is verified.
    pub fn as_str(self) -> &'static str {
        match self {
            RuleKind::File => "file",
            RuleKind::Program => "program",
            RuleKind::FuncDef => "funcdef",
            RuleKind::ProcDef => "procdef",
            RuleKind::FunArgs => "funargs",
            RuleKind::VarDecl => "vardecl",
            RuleKind::VarDeclItem => "vardecl_item",
            RuleKind::ConstDecl => "constdecl",
            RuleKind::ConstDeclItem => "constdecl_item",
            RuleKind::StmtList => "stmtlist",
            RuleKind::ExprStmt => "stat_expr",
            RuleKind::AssignStmt => "stat_assignment",
            RuleKind::IoStmt => "stat_ioexpr",
            RuleKind::IfStmt => "stat_ifctrl",
            RuleKind::WhileStmt => "stat_while",
            RuleKind::DoWhileStmt => "stat_dowhile",
            RuleKind::SwitchStmt => "stat_switch",
            RuleKind::Assign => "assign",
            RuleKind::IfCtrl => "ifctrl",
            RuleKind::ElseIfCtrl => "elseifctrl",
            RuleKind::ElseCtrl => "elsectrl",
            RuleKind::WhileCtrl => "whilectrl",
            RuleKind::DoWhileCtrl => "dowhilectrl",
            RuleKind::ForCtrl => "forctrl",
            RuleKind::SwitchCtrl => "switchctrl",
            RuleKind::CaseCtrl => "casectrl",
            RuleKind::OtherwiseCtrl => "otherwise",
            RuleKind::ParenExpr => "expr_paren",
            RuleKind::PowerExpr => "expr_power",
            RuleKind::UnaryExpr => "expr_unary",
            RuleKind::MulDivExpr => "expr_muldiv",
            RuleKind::PlusMinusExpr => "expr_plusminus",
            RuleKind::CompareExpr => "expr_compare",
            RuleKind::LogicExpr => "expr_logic",
            RuleKind::CallExpr => "expr_funcproccall",
            RuleKind::PrimaryExpr => "expr_primitive",
            RuleKind::IntLiteral => "primitive_int",
            RuleKind::DecLiteral => "primitive_dec",
            RuleKind::StrLiteral => "primitive_string",
        }
    }

    /// Control-construct rules. A traversal policy may leave them out, in
    /// which case they are skipped entirely and their children attach to the
    /// nearest emitted ancestor.
    pub fn is_control(self) -> bool {
        matches!(
            self,
            RuleKind::WhileStmt
                | RuleKind::DoWhileStmt
                | RuleKind::SwitchStmt
                | RuleKind::WhileCtrl
                | RuleKind::DoWhileCtrl
                | RuleKind::ForCtrl
                | RuleKind::SwitchCtrl
                | RuleKind::CaseCtrl
                | RuleKind::OtherwiseCtrl
                | RuleKind::UnaryExpr
        )
    }

    /// Literal rules are transparent: they are never pushed on the ancestry
    /// stack. With literal capture enabled their exit emits a leaf node
    /// carrying the literal source text.
    pub fn is_literal(self) -> bool {
        matches!(
            self,
            RuleKind::IntLiteral | RuleKind::DecLiteral | RuleKind::StrLiteral
        )
    }
}

/// All control-construct rules, for policies that support the full grammar.
pub const CONTROL_RULES: &[RuleKind] = &[
    RuleKind::WhileStmt,
    RuleKind::DoWhileStmt,
    RuleKind::SwitchStmt,
    RuleKind::WhileCtrl,
    RuleKind::DoWhileCtrl,
    RuleKind::ForCtrl,
    RuleKind::SwitchCtrl,
    RuleKind::CaseCtrl,
    RuleKind::OtherwiseCtrl,
    RuleKind::UnaryExpr,
];

/// Per-deployment configuration of one traversal session.
///
/// The two stock policies correspond to the two historic renditions of the
/// serializer: a guarded one that suppresses identifier output after a
/// keyword classification and knows no control constructs, and a capturing
/// one that embeds identifier/literal source text in the emitted node ids.
#[derive(Debug, Clone)]
pub struct Policy {
    /// Suppress an identifier classification when a keyword-like one already
    /// fired for the same terminal visit.
    pub guard_identifiers: bool,
    /// Embed identifier and literal source text in node identifiers and emit
    /// literal nodes on exit of their enclosing primitive rule.
    pub capture_literal_text: bool,
    /// Control-construct rules this policy emits nodes for.
    pub control_rules: &'static [RuleKind],
}

impl Policy {
    pub fn guarded() -> Self {
        Self {
            guard_identifiers: true,
            capture_literal_text: false,
            control_rules: &[],
        }
    }

    pub fn literal_capture() -> Self {
        Self {
            guard_identifiers: false,
            capture_literal_text: true,
            control_rules: CONTROL_RULES,
        }
    }

    /// Whether a rule of this kind gets a node of its own under this policy.
    pub fn supports(&self, kind: RuleKind) -> bool {
        !kind.is_control() || self.control_rules.contains(&kind)
    }
}
