//! Recursive descent parser producing a parse tree.
//!
//! Every token the parser consumes ends up as a terminal leaf in the tree,
//! so a later traversal sees the concrete syntax including keywords and
//! punctuation. Statements are recognized by their leading token; a
//! statement list runs until one of the closing keywords of the enclosing
//! construct (or end of file) comes up.

use std::collections::VecDeque;

use super::{
    parsetree::{ParseNode, RuleKind, RuleNode},
    position::Position,
    token::{Token, Type},
};
use crate::error::GlossaError::{self, ParseError};

pub struct Parser<'a> {
    tokens: VecDeque<Token<'a>>,
}

type ParserResult<'a> = Result<ParseNode<'a>, GlossaError>;

impl<'a> Parser<'a> {
    pub fn new(tokens: VecDeque<Token<'a>>) -> Self {
        Self { tokens }
    }

    //-------
    // HELPER
    //-------

    /// Type of the token at the front of the queue.
    fn peek(&self) -> &Type {
        self.tokens
            .front()
            .map(|token| &token.typ)
            .unwrap_or(&Type::Eof)
    }

    /// Type of the token after the front one; used to tell an assignment
    /// from an expression statement and a call from a plain identifier.
    fn peek_second(&self) -> &Type {
        self.tokens
            .get(1)
            .map(|token| &token.typ)
            .unwrap_or(&Type::Eof)
    }

    fn next(&mut self) -> Option<Token<'a>> {
        self.tokens.pop_front()
    }

    /// Consume the next token, which must be of the expected type.
    fn consume(&mut self, expected: &Type) -> Result<Token<'a>, GlossaError> {
        match self.next() {
            Some(token) if &token.typ == expected => Ok(token),
            Some(token) => Err(ParseError {
                pos: token.pos,
                msg: format!("Expected '{}', found '{}'.", expected, token.typ),
            }),
            None => Err(ParseError {
                pos: Position::new(0, 0, 0),
                msg: format!("Expected '{}', found end of input.", expected),
            }),
        }
    }

    /// Consume the next token as a terminal leaf.
    fn terminal(&mut self, expected: &Type) -> ParserResult<'a> {
        Ok(ParseNode::Terminal(self.consume(expected)?))
    }

    /// Consume whatever comes next as a terminal leaf. Callers must have
    /// peeked already.
    fn any_terminal(&mut self) -> ParserResult<'a> {
        match self.next() {
            Some(token) => Ok(ParseNode::Terminal(token)),
            None => Err(ParseError {
                pos: Position::new(0, 0, 0),
                msg: "Unexpected end of input.".to_string(),
            }),
        }
    }

    fn rule(kind: RuleKind, children: Vec<ParseNode<'a>>) -> ParseNode<'a> {
        ParseNode::Rule(RuleNode::new(kind, children))
    }

    fn parse_err(&mut self, err: &str) -> GlossaError {
        match self.next() {
            Some(token) => ParseError {
                pos: token.pos,
                msg: format!("{} Found '{}' instead.", err, token.typ),
            },
            None => ParseError {
                pos: Position::new(0, 0, 0),
                msg: err.to_string(),
            },
        }
    }

    //--------
    // PARSING
    //--------

    /// Parse a whole source file: the main program followed by any number of
    /// function and procedure definitions.
    pub fn parse(&mut self) -> ParserResult<'a> {
        let mut children = vec![self.parse_program()?];
        loop {
            match self.peek() {
                Type::Synarthsh => children.push(self.parse_funcdef()?),
                Type::Diadikasia => children.push(self.parse_procdef()?),
                _ => break,
            }
        }
        children.push(self.terminal(&Type::Eof)?);
        Ok(Self::rule(RuleKind::File, children))
    }

    fn parse_program(&mut self) -> ParserResult<'a> {
        let mut children = vec![
            self.terminal(&Type::Programma)?,
            self.terminal(&Type::Identifier)?,
        ];
        self.parse_decls(&mut children)?;
        children.push(self.terminal(&Type::Arxh)?);
        children.push(self.parse_stmtlist()?);
        children.push(self.terminal(&Type::TelosProgrammatos)?);
        Ok(Self::rule(RuleKind::Program, children))
    }

    fn parse_funcdef(&mut self) -> ParserResult<'a> {
        let mut children = vec![
            self.terminal(&Type::Synarthsh)?,
            self.terminal(&Type::Identifier)?,
            self.terminal(&Type::LeftParen)?,
        ];
        if self.peek() == &Type::Identifier {
            children.push(self.parse_param_list()?);
        }
        children.push(self.terminal(&Type::RightParen)?);
        children.push(self.terminal(&Type::Colon)?);
        children.push(self.parse_type_name()?);
        self.parse_decls(&mut children)?;
        children.push(self.terminal(&Type::Arxh)?);
        children.push(self.parse_stmtlist()?);
        children.push(self.terminal(&Type::TelosSynarthshs)?);
        Ok(Self::rule(RuleKind::FuncDef, children))
    }

    fn parse_procdef(&mut self) -> ParserResult<'a> {
        let mut children = vec![
            self.terminal(&Type::Diadikasia)?,
            self.terminal(&Type::Identifier)?,
            self.terminal(&Type::LeftParen)?,
        ];
        if self.peek() == &Type::Identifier {
            children.push(self.parse_param_list()?);
        }
        children.push(self.terminal(&Type::RightParen)?);
        self.parse_decls(&mut children)?;
        children.push(self.terminal(&Type::Arxh)?);
        children.push(self.parse_stmtlist()?);
        children.push(self.terminal(&Type::TelosDiadikasias)?);
        Ok(Self::rule(RuleKind::ProcDef, children))
    }

    /// Formal parameters: identifiers separated by commas.
    fn parse_param_list(&mut self) -> ParserResult<'a> {
        let mut children = vec![self.terminal(&Type::Identifier)?];
        while self.peek() == &Type::Comma {
            children.push(self.terminal(&Type::Comma)?);
            children.push(self.terminal(&Type::Identifier)?);
        }
        Ok(Self::rule(RuleKind::FunArgs, children))
    }

    fn parse_type_name(&mut self) -> ParserResult<'a> {
        match self.peek() {
            Type::Akeraies | Type::Pragmatikes | Type::Xarakthres | Type::Logikes => {
                self.any_terminal()
            }
            _ => Err(self.parse_err("Expected a type name.")),
        }
    }

    //-------------
    // Declarations
    //-------------

    fn parse_decls(&mut self, children: &mut Vec<ParseNode<'a>>) -> Result<(), GlossaError> {
        loop {
            match self.peek() {
                Type::Metablhtes => children.push(self.parse_vardecl()?),
                Type::Statheres => children.push(self.parse_constdecl()?),
                _ => return Ok(()),
            }
        }
    }

    fn parse_vardecl(&mut self) -> ParserResult<'a> {
        let mut children = vec![self.terminal(&Type::Metablhtes)?];
        children.push(self.parse_vardecl_item()?);
        loop {
            match self.peek() {
                Type::Akeraies | Type::Pragmatikes | Type::Xarakthres | Type::Logikes => {
                    children.push(self.parse_vardecl_item()?)
                }
                _ => break,
            }
        }
        Ok(Self::rule(RuleKind::VarDecl, children))
    }

    /// One declaration group: `AKERAIES: a, b, c`.
    fn parse_vardecl_item(&mut self) -> ParserResult<'a> {
        let mut children = vec![self.parse_type_name()?, self.terminal(&Type::Colon)?];
        children.push(self.terminal(&Type::Identifier)?);
        while self.peek() == &Type::Comma {
            children.push(self.terminal(&Type::Comma)?);
            children.push(self.terminal(&Type::Identifier)?);
        }
        Ok(Self::rule(RuleKind::VarDeclItem, children))
    }

    fn parse_constdecl(&mut self) -> ParserResult<'a> {
        let mut children = vec![self.terminal(&Type::Statheres)?];
        children.push(self.parse_constdecl_item()?);
        while self.peek() == &Type::Identifier {
            children.push(self.parse_constdecl_item()?);
        }
        Ok(Self::rule(RuleKind::ConstDecl, children))
    }

    /// One constant binding: `PI = 3.14`.
    fn parse_constdecl_item(&mut self) -> ParserResult<'a> {
        let children = vec![
            self.terminal(&Type::Identifier)?,
            self.terminal(&Type::Equal)?,
            self.parse_expr()?,
        ];
        Ok(Self::rule(RuleKind::ConstDeclItem, children))
    }

    //-----------
    // Statements
    //-----------

    /// True for tokens that close the statement list of the enclosing
    /// construct.
    fn ends_stmtlist(typ: &Type) -> bool {
        matches!(
            typ,
            Type::TelosProgrammatos
                | Type::TelosSynarthshs
                | Type::TelosDiadikasias
                | Type::TelosAn
                | Type::AlliosAn
                | Type::Allios
                | Type::TelosEpanalhpshs
                | Type::MexrisOtou
                | Type::Periptwsh
                | Type::TelosEpilogwn
                | Type::Eof
        )
    }

    fn parse_stmtlist(&mut self) -> ParserResult<'a> {
        let mut children = Vec::new();
        while !Self::ends_stmtlist(self.peek()) {
            children.push(self.parse_statement()?);
        }
        Ok(Self::rule(RuleKind::StmtList, children))
    }

    fn parse_statement(&mut self) -> ParserResult<'a> {
        match self.peek() {
            Type::Identifier if self.peek_second() == &Type::Assign => {
                let assign = self.parse_assign()?;
                Ok(Self::rule(RuleKind::AssignStmt, vec![assign]))
            }
            Type::Grapse | Type::Ektipose | Type::Diabase | Type::Kalese => self.parse_iostmt(),
            Type::An => {
                let ifctrl = self.parse_ifctrl()?;
                Ok(Self::rule(RuleKind::IfStmt, vec![ifctrl]))
            }
            Type::Oso => {
                let whilectrl = self.parse_whilectrl()?;
                Ok(Self::rule(RuleKind::WhileStmt, vec![whilectrl]))
            }
            Type::ArxhEpanalhpshs => {
                let dowhilectrl = self.parse_dowhilectrl()?;
                Ok(Self::rule(RuleKind::DoWhileStmt, vec![dowhilectrl]))
            }
            Type::Epilekse => {
                let switchctrl = self.parse_switchctrl()?;
                Ok(Self::rule(RuleKind::SwitchStmt, vec![switchctrl]))
            }
            Type::Gia => self.parse_forctrl(),
            _ => {
                let expr = self.parse_expr()?;
                Ok(Self::rule(RuleKind::ExprStmt, vec![expr]))
            }
        }
    }

    fn parse_assign(&mut self) -> ParserResult<'a> {
        let children = vec![
            self.terminal(&Type::Identifier)?,
            self.terminal(&Type::Assign)?,
            self.parse_expr()?,
        ];
        Ok(Self::rule(RuleKind::Assign, children))
    }

    fn parse_iostmt(&mut self) -> ParserResult<'a> {
        let mut children = vec![self.any_terminal()?, self.parse_expr()?];
        while self.peek() == &Type::Comma {
            children.push(self.terminal(&Type::Comma)?);
            children.push(self.parse_expr()?);
        }
        Ok(Self::rule(RuleKind::IoStmt, children))
    }

    fn parse_ifctrl(&mut self) -> ParserResult<'a> {
        let mut children = vec![
            self.terminal(&Type::An)?,
            self.parse_expr()?,
            self.terminal(&Type::Tote)?,
            self.parse_stmtlist()?,
        ];
        while self.peek() == &Type::AlliosAn {
            let branch = vec![
                self.terminal(&Type::AlliosAn)?,
                self.parse_expr()?,
                self.terminal(&Type::Tote)?,
                self.parse_stmtlist()?,
            ];
            children.push(Self::rule(RuleKind::ElseIfCtrl, branch));
        }
        if self.peek() == &Type::Allios {
            let branch = vec![self.terminal(&Type::Allios)?, self.parse_stmtlist()?];
            children.push(Self::rule(RuleKind::ElseCtrl, branch));
        }
        children.push(self.terminal(&Type::TelosAn)?);
        Ok(Self::rule(RuleKind::IfCtrl, children))
    }

    fn parse_whilectrl(&mut self) -> ParserResult<'a> {
        let children = vec![
            self.terminal(&Type::Oso)?,
            self.parse_expr()?,
            self.terminal(&Type::Epanalabe)?,
            self.parse_stmtlist()?,
            self.terminal(&Type::TelosEpanalhpshs)?,
        ];
        Ok(Self::rule(RuleKind::WhileCtrl, children))
    }

    fn parse_dowhilectrl(&mut self) -> ParserResult<'a> {
        let children = vec![
            self.terminal(&Type::ArxhEpanalhpshs)?,
            self.parse_stmtlist()?,
            self.terminal(&Type::MexrisOtou)?,
            self.parse_expr()?,
        ];
        Ok(Self::rule(RuleKind::DoWhileCtrl, children))
    }

    fn parse_forctrl(&mut self) -> ParserResult<'a> {
        let mut children = vec![
            self.terminal(&Type::Gia)?,
            self.terminal(&Type::Identifier)?,
            self.terminal(&Type::Apo)?,
            self.parse_expr()?,
            self.terminal(&Type::Mexri)?,
            self.parse_expr()?,
        ];
        if self.peek() == &Type::MeBhma {
            children.push(self.terminal(&Type::MeBhma)?);
            children.push(self.parse_expr()?);
        }
        children.push(self.parse_stmtlist()?);
        children.push(self.terminal(&Type::TelosEpanalhpshs)?);
        Ok(Self::rule(RuleKind::ForCtrl, children))
    }

    fn parse_switchctrl(&mut self) -> ParserResult<'a> {
        let mut children = vec![self.terminal(&Type::Epilekse)?, self.parse_expr()?];
        while self.peek() == &Type::Periptwsh && self.peek_second() != &Type::Allios {
            let case = vec![
                self.terminal(&Type::Periptwsh)?,
                self.parse_expr()?,
                self.parse_stmtlist()?,
            ];
            children.push(Self::rule(RuleKind::CaseCtrl, case));
        }
        if self.peek() == &Type::Periptwsh {
            let otherwise = vec![
                self.terminal(&Type::Periptwsh)?,
                self.terminal(&Type::Allios)?,
                self.parse_stmtlist()?,
            ];
            children.push(Self::rule(RuleKind::OtherwiseCtrl, otherwise));
        }
        children.push(self.terminal(&Type::TelosEpilogwn)?);
        Ok(Self::rule(RuleKind::SwitchCtrl, children))
    }

    //------------
    // Expressions
    //------------

    fn parse_expr(&mut self) -> ParserResult<'a> {
        self.parse_logic()
    }

    fn parse_logic(&mut self) -> ParserResult<'a> {
        let mut node = self.parse_compare()?;
        loop {
            match self.peek() {
                Type::Kai | Type::H => {
                    let children = vec![node, self.any_terminal()?, self.parse_compare()?];
                    node = Self::rule(RuleKind::LogicExpr, children);
                }
                _ => return Ok(node),
            }
        }
    }

    fn parse_compare(&mut self) -> ParserResult<'a> {
        let mut node = self.parse_plusminus()?;
        loop {
            match self.peek() {
                Type::Equal
                | Type::NotEqual
                | Type::Less
                | Type::Greater
                | Type::Leq
                | Type::Geq => {
                    let children = vec![node, self.any_terminal()?, self.parse_plusminus()?];
                    node = Self::rule(RuleKind::CompareExpr, children);
                }
                _ => return Ok(node),
            }
        }
    }

    fn parse_plusminus(&mut self) -> ParserResult<'a> {
        let mut node = self.parse_muldiv()?;
        loop {
            match self.peek() {
                Type::Plus | Type::Minus => {
                    let children = vec![node, self.any_terminal()?, self.parse_muldiv()?];
                    node = Self::rule(RuleKind::PlusMinusExpr, children);
                }
                _ => return Ok(node),
            }
        }
    }

    fn parse_muldiv(&mut self) -> ParserResult<'a> {
        let mut node = self.parse_unary()?;
        loop {
            match self.peek() {
                Type::Mul | Type::Div => {
                    let children = vec![node, self.any_terminal()?, self.parse_unary()?];
                    node = Self::rule(RuleKind::MulDivExpr, children);
                }
                _ => return Ok(node),
            }
        }
    }

    fn parse_unary(&mut self) -> ParserResult<'a> {
        match self.peek() {
            Type::Plus | Type::Minus | Type::Oxi => {
                let children = vec![self.any_terminal()?, self.parse_unary()?];
                Ok(Self::rule(RuleKind::UnaryExpr, children))
            }
            _ => self.parse_power(),
        }
    }

    /// Exponentiation is right-associative.
    fn parse_power(&mut self) -> ParserResult<'a> {
        let base = self.parse_call()?;
        if self.peek() == &Type::Power {
            let children = vec![base, self.terminal(&Type::Power)?, self.parse_power()?];
            Ok(Self::rule(RuleKind::PowerExpr, children))
        } else {
            Ok(base)
        }
    }

    fn parse_call(&mut self) -> ParserResult<'a> {
        let is_builtin = matches!(
            self.peek(),
            Type::AM | Type::AT | Type::E | Type::Ef | Type::Hm | Type::Log | Type::Syn | Type::TR
        );
        let is_user_call = self.peek() == &Type::Identifier && self.peek_second() == &Type::LeftParen;
        if is_builtin || is_user_call {
            let mut children = vec![self.any_terminal()?, self.terminal(&Type::LeftParen)?];
            if self.peek() != &Type::RightParen {
                children.push(self.parse_arg_list()?);
            }
            children.push(self.terminal(&Type::RightParen)?);
            Ok(Self::rule(RuleKind::CallExpr, children))
        } else {
            self.parse_primary()
        }
    }

    /// Actual arguments: expressions separated by commas.
    fn parse_arg_list(&mut self) -> ParserResult<'a> {
        let mut children = vec![self.parse_expr()?];
        while self.peek() == &Type::Comma {
            children.push(self.terminal(&Type::Comma)?);
            children.push(self.parse_expr()?);
        }
        Ok(Self::rule(RuleKind::FunArgs, children))
    }

    fn parse_primary(&mut self) -> ParserResult<'a> {
        match self.peek() {
            Type::LeftParen => {
                let children = vec![
                    self.terminal(&Type::LeftParen)?,
                    self.parse_expr()?,
                    self.terminal(&Type::RightParen)?,
                ];
                Ok(Self::rule(RuleKind::ParenExpr, children))
            }
            Type::Integer(_) => {
                let literal = Self::rule(RuleKind::IntLiteral, vec![self.any_terminal()?]);
                Ok(Self::rule(RuleKind::PrimaryExpr, vec![literal]))
            }
            Type::Decimal(_) => {
                let literal = Self::rule(RuleKind::DecLiteral, vec![self.any_terminal()?]);
                Ok(Self::rule(RuleKind::PrimaryExpr, vec![literal]))
            }
            Type::String(_) => {
                let literal = Self::rule(RuleKind::StrLiteral, vec![self.any_terminal()?]);
                Ok(Self::rule(RuleKind::PrimaryExpr, vec![literal]))
            }
            Type::Boolean(_) | Type::Identifier => {
                let terminal = self.any_terminal()?;
                Ok(Self::rule(RuleKind::PrimaryExpr, vec![terminal]))
            }
            _ => Err(self.parse_err("Expected an expression.")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontend::lexer::Lexer;

    fn parse(src: &'static str) -> ParseNode<'static> {
        let tokens = Lexer::new(src).tokenize().unwrap();
        Parser::new(tokens).parse().unwrap()
    }

    fn kind(node: &ParseNode) -> RuleKind {
        match node {
            ParseNode::Rule(rule) => rule.kind,
            ParseNode::Terminal(token) => panic!("expected rule, found terminal {}", token),
        }
    }

    fn children<'a, 'b>(node: &'b ParseNode<'a>) -> &'b [ParseNode<'a>] {
        match node {
            ParseNode::Rule(rule) => &rule.children,
            ParseNode::Terminal(token) => panic!("expected rule, found terminal {}", token),
        }
    }

    #[test]
    fn test_minimal_program() {
        let tree = parse("PROGRAMMA Test\nARXH\nTELOS_PROGRAMMATOS");
        assert_eq!(kind(&tree), RuleKind::File);
        let program = &children(&tree)[0];
        assert_eq!(kind(program), RuleKind::Program);
        // PROGRAMMA, identifier, ARXH, empty stmtlist, TELOS_PROGRAMMATOS
        assert_eq!(children(program).len(), 5);
        assert_eq!(kind(&children(program)[3]), RuleKind::StmtList);
    }

    #[test]
    fn test_assignment_and_io() {
        let tree = parse(
            "PROGRAMMA P\n\
             METABLHTES AKERAIES: x\n\
             ARXH\n\
             x <- 1 + 2 * 3\n\
             GRAPSE x, 'done'\n\
             TELOS_PROGRAMMATOS",
        );
        let program = &children(&tree)[0];
        let stmtlist = &children(program)[4];
        assert_eq!(kind(stmtlist), RuleKind::StmtList);
        let stmts = children(stmtlist);
        assert_eq!(stmts.len(), 2);
        assert_eq!(kind(&stmts[0]), RuleKind::AssignStmt);
        assert_eq!(kind(&stmts[1]), RuleKind::IoStmt);
        // Precedence: the assigned expression is a plus with a muldiv child.
        let assign = &children(&stmts[0])[0];
        let expr = &children(assign)[2];
        assert_eq!(kind(expr), RuleKind::PlusMinusExpr);
        assert_eq!(kind(&children(expr)[2]), RuleKind::MulDivExpr);
    }

    #[test]
    fn test_if_with_branches() {
        let tree = parse(
            "PROGRAMMA P\nARXH\n\
             AN x > 0 TOTE\n  GRAPSE x\n\
             ALLIOS_AN x = 0 TOTE\n  GRAPSE 'zero'\n\
             ALLIOS\n  GRAPSE 'neg'\n\
             TELOS_AN\n\
             TELOS_PROGRAMMATOS",
        );
        let program = &children(&tree)[0];
        let stmt = &children(&children(program)[3])[0];
        assert_eq!(kind(stmt), RuleKind::IfStmt);
        let ifctrl = &children(stmt)[0];
        assert_eq!(kind(ifctrl), RuleKind::IfCtrl);
        let kinds: Vec<RuleKind> = children(ifctrl)
            .iter()
            .filter_map(|c| match c {
                ParseNode::Rule(r) => Some(r.kind),
                ParseNode::Terminal(_) => None,
            })
            .collect();
        assert!(kinds.contains(&RuleKind::ElseIfCtrl));
        assert!(kinds.contains(&RuleKind::ElseCtrl));
    }

    #[test]
    fn test_loops_and_switch() {
        let tree = parse(
            "PROGRAMMA P\nARXH\n\
             OSO x < 10 EPANALABE\n  x <- x + 1\nTELOS_EPANALHPSHS\n\
             ARXH_EPANALHPSHS\n  x <- x - 1\nMEXRIS_OTOU x = 0\n\
             GIA i APO 1 MEXRI 10 ME_BHMA 2\n  GRAPSE i\nTELOS_EPANALHPSHS\n\
             EPILEKSE x\nPERIPTWSH 1\n  GRAPSE 'one'\nPERIPTWSH ALLIOS\n  GRAPSE 'other'\nTELOS_EPILOGWN\n\
             TELOS_PROGRAMMATOS",
        );
        let program = &children(&tree)[0];
        let stmts = children(&children(program)[3]);
        assert_eq!(kind(&stmts[0]), RuleKind::WhileStmt);
        assert_eq!(kind(&stmts[1]), RuleKind::DoWhileStmt);
        assert_eq!(kind(&stmts[2]), RuleKind::ForCtrl);
        assert_eq!(kind(&stmts[3]), RuleKind::SwitchStmt);
    }

    #[test]
    fn test_logical_operators() {
        let tree = parse(
            "PROGRAMMA P\nARXH\n\
             AN x > 0 KAI OXI x > 9 TOTE\n  GRAPSE x\nTELOS_AN\n\
             TELOS_PROGRAMMATOS",
        );
        let program = &children(&tree)[0];
        let ifstmt = &children(&children(program)[3])[0];
        let ifctrl = &children(ifstmt)[0];
        let condition = &children(ifctrl)[1];
        assert_eq!(kind(condition), RuleKind::LogicExpr);
        assert_eq!(kind(&children(condition)[0]), RuleKind::CompareExpr);
        let rhs = &children(condition)[2];
        assert_eq!(kind(rhs), RuleKind::CompareExpr);
        assert_eq!(kind(&children(rhs)[0]), RuleKind::UnaryExpr);
    }

    #[test]
    fn test_calls_and_literals() {
        let tree = parse("PROGRAMMA P\nARXH\nx <- T_R(2) + f(1, 2)\nTELOS_PROGRAMMATOS");
        let program = &children(&tree)[0];
        let assign = &children(&children(&children(program)[3])[0])[0];
        let expr = &children(assign)[2];
        assert_eq!(kind(expr), RuleKind::PlusMinusExpr);
        assert_eq!(kind(&children(expr)[0]), RuleKind::CallExpr);
        assert_eq!(kind(&children(expr)[2]), RuleKind::CallExpr);
    }

    #[test]
    fn test_subprograms() {
        let tree = parse(
            "PROGRAMMA P\nARXH\nTELOS_PROGRAMMATOS\n\
             SYNARTHSH f(a, b): AKERAIES\nARXH\nf <- a + b\nTELOS_SYNARTHSHS\n\
             DIADIKASIA g(x)\nARXH\nGRAPSE x\nTELOS_DIADIKASIAS",
        );
        let kids = children(&tree);
        assert_eq!(kind(&kids[1]), RuleKind::FuncDef);
        assert_eq!(kind(&kids[2]), RuleKind::ProcDef);
    }

    #[test]
    fn test_parse_errors() {
        let tokens = Lexer::new("PROGRAMMA ARXH").tokenize().unwrap();
        let err = Parser::new(tokens).parse().unwrap_err();
        match err {
            ParseError { msg, .. } => assert!(msg.contains("Identifier")),
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
