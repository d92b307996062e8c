//! Display classification of terminal symbols.
//!
//! One declarative table maps a terminal's symbol kind to the prefix used in
//! its graph node identifier and to whether the match counts as keyword-like
//! (which arms the identifier guard for the rest of the visit). Kinds absent
//! from the table are not drawn at all: loop and multi-way selection
//! keywords, the logical operators, colons, raw literal tokens (those are
//! drawn on exit of their enclosing primitive rule instead), whitespace and
//! end-of-file all skip silently.

use super::super::parsetree::RuleKind;
use super::super::token::Type;

/// Table row for one displayable terminal kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub prefix: &'static str,
    pub keyword_like: bool,
}

/// Look a symbol kind up in the display table. `None` means the terminal is
/// not displayed.
pub fn classify(typ: &Type) -> Option<Classification> {
    use Type::*;
    let (prefix, keyword_like) = match typ {
        Programma => ("PROGRAMMA", true),
        Arxh => ("ARXH", true),
        TelosProgrammatos => ("TELOS_PROGRAMMATOS", true),
        Synarthsh => ("SYNARTHSH", true),
        TelosSynarthshs => ("TELOS_SYNARTHSHS", true),
        Diadikasia => ("DIADIKASIA", true),
        TelosDiadikasias => ("TELOS_DIADIKASIAS", true),
        Metablhtes => ("METABLHTES", true),
        Statheres => ("STATHERES", true),
        An => ("AN", true),
        Tote => ("TOTE", true),
        TelosAn => ("TELOS_AN", true),
        AlliosAn => ("ALLIOS_AN", true),
        Allios => ("ALLIOS", true),
        Akeraies => ("AKERAIES", true),
        Pragmatikes => ("PRAGMATIKES", true),
        Xarakthres => ("XARAKTHRES", true),
        Logikes => ("LOGIKES", true),
        Grapse => ("GRAPSE", true),
        Ektipose => ("EKTIPOSE", true),
        Diabase => ("DIABASE", true),
        Kalese => ("KALESE", true),
        Boolean(true) => ("ALHTHHS", true),
        Boolean(false) => ("PSEYDHS", true),
        AM => ("A_M", true),
        AT => ("A_T", true),
        E => ("E", true),
        Ef => ("EF", true),
        Hm => ("HM", true),
        Log => ("LOG", true),
        Syn => ("SYN", true),
        TR => ("T_R", true),
        Identifier => ("IDENTIFIER", false),
        Equal => ("EQUALS", false),
        NotEqual => ("NOTEQUALS", false),
        Greater => ("GT", false),
        Geq => ("GE", false),
        Less => ("LT", false),
        Leq => ("LE", false),
        Plus => ("PLUS", false),
        Minus => ("MINUS", false),
        Mul => ("MUL", false),
        Div => ("DIV", false),
        Power => ("POWER", false),
        Semicolon => ("SEMICOLON", false),
        Comma => ("COMMA", false),
        Assign => ("ASSIGNMENT", false),
        LeftParen => ("LPAREN", false),
        RightParen => ("RPAREN", false),
        LeftBracket => ("LBRACKET", false),
        RightBracket => ("RBRACKET", false),
        LeftAnchor => ("LANCHOR", false),
        RightAnchor => ("RANCHOR", false),
        _ => return None,
    };
    Some(Classification {
        prefix,
        keyword_like,
    })
}

/// Prefix for literal nodes emitted on exit of a primitive rule.
pub fn literal_prefix(kind: RuleKind) -> Option<&'static str> {
    match kind {
        RuleKind::IntLiteral => Some("INTEGER"),
        RuleKind::DecLiteral => Some("DECIMAL"),
        RuleKind::StrLiteral => Some("STRING"),
        _ => None,
    }
}
