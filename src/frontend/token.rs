use phf::phf_map;
use std::fmt;

use super::position::Position;

/// A single lexical token. The lexeme borrows from the source string so the
/// token stream stays cheap to clone and pass around.
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub typ: Type,
    pub pos: Position,
    pub lexeme: &'a str,
}

impl<'a> Token<'a> {
    pub fn new(typ: Type, pos: Position, lexeme: &'a str) -> Self {
        Self { typ, pos, lexeme }
    }

    pub fn new_non_literal(
        typ: Type,
        pos: Position,
        src: &'a str,
        range: std::ops::Range<usize>,
    ) -> Self {
        Self {
            typ,
            pos,
            lexeme: &src[range],
        }
    }

    /// Display text of the token: the raw lexeme, except for string literals
    /// where the quotes are stripped so the text can be embedded in quoted
    /// DOT identifiers without breaking them.
    pub fn text(&self) -> &str {
        match &self.typ {
            Type::String(s) => s,
            _ => self.lexeme,
        }
    }

    pub fn get_keyword(key: &str) -> Option<Type> {
        KEYWORDS.get(key).cloned()
    }
}

impl<'a> fmt::Display for Token<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{:?}: {} @ {}>", self.typ, self.lexeme, self.pos)
    }
}

/// Every terminal symbol kind of the GLOSSA grammar.
#[derive(Debug, PartialEq, Clone)]
pub enum Type {
    // Literals
    Integer(i64),
    Decimal(f64),
    String(String),
    Boolean(bool),

    // Program structure keywords
    Programma,
    Arxh,
    TelosProgrammatos,
    Synarthsh,
    TelosSynarthshs,
    Diadikasia,
    TelosDiadikasias,

    // Declaration and type keywords
    Metablhtes,
    Statheres,
    Akeraies,
    Pragmatikes,
    Xarakthres,
    Logikes,

    // Selection keywords
    An,
    Tote,
    TelosAn,
    AlliosAn,
    Allios,

    // Repetition keywords
    Oso,
    Epanalabe,
    TelosEpanalhpshs,
    ArxhEpanalhpshs,
    MexrisOtou,
    Gia,
    Apo,
    Mexri,
    MeBhma,

    // Multi-way selection keywords
    Epilekse,
    Periptwsh,
    TelosEpilogwn,

    // I/O keywords
    Grapse,
    Ektipose,
    Diabase,
    Kalese,

    // Logical operators
    Kai,
    H,
    Oxi,

    // Builtin functions
    AM,
    AT,
    E,
    Ef,
    Hm,
    Log,
    Syn,
    TR,

    // Arithmetic operators
    Plus,
    Minus,
    Mul,
    Div,
    Power,

    // Comparison operators
    Equal,
    NotEqual,
    Less,
    Greater,
    Leq,
    Geq,

    // Assignment `<-`
    Assign,

    Identifier,

    // Punctuation
    LeftParen,
    RightParen,
    LeftBracket,
    RightBracket,
    LeftAnchor,
    RightAnchor,
    Comma,
    Colon,
    Semicolon,

    Whitespace,
    Eof,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Reserved words of GLOSSA in their transliterated spelling, mapped to the
/// token type the lexer should produce for them.
static KEYWORDS: phf::Map<&'static str, Type> = phf_map! {
    "PROGRAMMA" => Type::Programma,
    "ARXH" => Type::Arxh,
    "TELOS_PROGRAMMATOS" => Type::TelosProgrammatos,
    "SYNARTHSH" => Type::Synarthsh,
    "TELOS_SYNARTHSHS" => Type::TelosSynarthshs,
    "DIADIKASIA" => Type::Diadikasia,
    "TELOS_DIADIKASIAS" => Type::TelosDiadikasias,
    "METABLHTES" => Type::Metablhtes,
    "STATHERES" => Type::Statheres,
    "AKERAIES" => Type::Akeraies,
    "PRAGMATIKES" => Type::Pragmatikes,
    "XARAKTHRES" => Type::Xarakthres,
    "LOGIKES" => Type::Logikes,
    "AN" => Type::An,
    "TOTE" => Type::Tote,
    "TELOS_AN" => Type::TelosAn,
    "ALLIOS_AN" => Type::AlliosAn,
    "ALLIOS" => Type::Allios,
    "OSO" => Type::Oso,
    "EPANALABE" => Type::Epanalabe,
    "TELOS_EPANALHPSHS" => Type::TelosEpanalhpshs,
    "ARXH_EPANALHPSHS" => Type::ArxhEpanalhpshs,
    "MEXRIS_OTOU" => Type::MexrisOtou,
    "GIA" => Type::Gia,
    "APO" => Type::Apo,
    "MEXRI" => Type::Mexri,
    "ME_BHMA" => Type::MeBhma,
    "EPILEKSE" => Type::Epilekse,
    "PERIPTWSH" => Type::Periptwsh,
    "TELOS_EPILOGWN" => Type::TelosEpilogwn,
    "GRAPSE" => Type::Grapse,
    "EKTIPOSE" => Type::Ektipose,
    "DIABASE" => Type::Diabase,
    "KALESE" => Type::Kalese,
    "KAI" => Type::Kai,
    "H" => Type::H,
    "OXI" => Type::Oxi,
    "A_M" => Type::AM,
    "A_T" => Type::AT,
    "E" => Type::E,
    "EF" => Type::Ef,
    "HM" => Type::Hm,
    "LOG" => Type::Log,
    "SYN" => Type::Syn,
    "T_R" => Type::TR,
    "ALHTHHS" => Type::Boolean(true),
    "PSEYDHS" => Type::Boolean(false),
};
