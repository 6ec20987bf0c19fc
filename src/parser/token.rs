//! Token model shared by the lexer and the tree builder
//!
//! Tokens never own text. Each [`Token`] holds a `&'src str` view into the
//! buffer it was lexed from, so the borrow checker keeps the buffer alive for
//! as long as any token (or any tree node copied from one) exists.

use crate::config::{DataModel, Standard};
use std::fmt;
use std::ops::Deref;

macro_rules! token_kinds {
    ($($variant:ident => $name:literal,)*) => {
        /// Every token category produced by the lexer.
        ///
        /// Declaration order matters: keywords occupy one contiguous range
        /// (see [`TokenKind::is_keyword`]).
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        pub enum TokenKind {
            $($variant,)*
        }

        impl TokenKind {
            /// All kinds, in declaration order.
            pub const ALL: &'static [TokenKind] = &[$(TokenKind::$variant,)*];

            /// Human-readable name used in diagnostics and token dumps.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(TokenKind::$variant => $name,)*
                }
            }
        }
    };
}

token_kinds! {
    Identifier => "identifier",

    // Keywords
    Void => "'void'",
    Char => "'char'",
    Short => "'short'",
    Int => "'int'",
    Long => "'long'",
    Float => "'float'",
    Double => "'double'",
    Signed => "'signed'",
    Unsigned => "'unsigned'",
    Bool => "'bool'",
    BoolUnderscore => "'_Bool'",
    Complex => "'_Complex'",
    Imaginary => "'_Imaginary'",
    BitInt => "'_BitInt'",
    Decimal32 => "'_Decimal32'",
    Decimal64 => "'_Decimal64'",
    Decimal128 => "'_Decimal128'",
    Const => "'const'",
    Volatile => "'volatile'",
    Restrict => "'restrict'",
    Atomic => "'_Atomic'",
    Static => "'static'",
    Extern => "'extern'",
    Auto => "'auto'",
    Register => "'register'",
    ThreadLocal => "'thread_local'",
    ThreadLocalUnderscore => "'_Thread_local'",
    Constexpr => "'constexpr'",
    Typedef => "'typedef'",
    Inline => "'inline'",
    Noreturn => "'_Noreturn'",
    Struct => "'struct'",
    Union => "'union'",
    Enum => "'enum'",
    Alignas => "'alignas'",
    AlignasUnderscore => "'_Alignas'",
    Alignof => "'alignof'",
    AlignofUnderscore => "'_Alignof'",
    Typeof => "'typeof'",
    TypeofUnqual => "'typeof_unqual'",
    StaticAssert => "'static_assert'",
    StaticAssertUnderscore => "'_Static_assert'",
    Generic => "'_Generic'",
    Sizeof => "'sizeof'",
    True => "'true'",
    False => "'false'",
    Nullptr => "'nullptr'",
    Return => "'return'",
    If => "'if'",
    Else => "'else'",
    Switch => "'switch'",
    Case => "'case'",
    Default => "'default'",
    While => "'while'",
    Do => "'do'",
    For => "'for'",
    Break => "'break'",
    Continue => "'continue'",
    Goto => "'goto'",

    // Literals
    Constant => "constant",
    StringLiteral => "string literal",

    // Punctuators
    OpenParen => "'('",
    CloseParen => "')'",
    OpenBrace => "'{'",
    CloseBrace => "'}'",
    OpenBracket => "'['",
    CloseBracket => "']'",
    Semicolon => "';'",
    Comma => "','",
    Colon => "':'",
    Question => "'?'",
    Dot => "'.'",
    Ellipsis => "'...'",
    Arrow => "'->'",
    Hash => "'#'",
    HashHash => "'##'",
    PlusEqual => "'+='",
    MinusEqual => "'-='",
    StarEqual => "'*='",
    SlashEqual => "'/='",
    PercentEqual => "'%='",
    AmpersandEqual => "'&='",
    BarEqual => "'|='",
    CaretEqual => "'^='",
    LeftShiftEqual => "'<<='",
    RightShiftEqual => "'>>='",
    PlusPlus => "'++'",
    MinusMinus => "'--'",
    LeftShift => "'<<'",
    RightShift => "'>>'",
    EqualEqual => "'=='",
    NotEqual => "'!='",
    LessEqual => "'<='",
    GreaterEqual => "'>='",
    AmpersandAmpersand => "'&&'",
    BarBar => "'||'",
    Plus => "'+'",
    Minus => "'-'",
    Star => "'*'",
    Slash => "'/'",
    Percent => "'%'",
    Ampersand => "'&'",
    Bar => "'|'",
    Caret => "'^'",
    Tilde => "'~'",
    Exclamation => "'!'",
    Equal => "'='",
    Less => "'<'",
    Greater => "'>'",
}

impl TokenKind {
    pub const FIRST_KEYWORD: TokenKind = TokenKind::Void;
    pub const LAST_KEYWORD: TokenKind = TokenKind::Goto;

    pub fn is_keyword(self) -> bool {
        (Self::FIRST_KEYWORD..=Self::LAST_KEYWORD).contains(&self)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reserved word and the first standard that reserves it.
#[derive(Debug, Clone, Copy)]
pub struct Keyword {
    pub text: &'static str,
    pub kind: TokenKind,
    pub since: Standard,
}

/// Keywords sorted by length (longest first), then bytewise.
///
/// The ordering is what [`lookup_keyword`] binary-searches on.
pub const KEYWORDS: &[Keyword] = &[
    Keyword { text: "_Static_assert", kind: TokenKind::StaticAssertUnderscore, since: Standard::C11 },
    Keyword { text: "_Thread_local", kind: TokenKind::ThreadLocalUnderscore, since: Standard::C11 },
    Keyword { text: "static_assert", kind: TokenKind::StaticAssert, since: Standard::C23 },
    Keyword { text: "typeof_unqual", kind: TokenKind::TypeofUnqual, since: Standard::C23 },
    Keyword { text: "thread_local", kind: TokenKind::ThreadLocal, since: Standard::C23 },
    Keyword { text: "_Decimal128", kind: TokenKind::Decimal128, since: Standard::C23 },
    Keyword { text: "_Decimal32", kind: TokenKind::Decimal32, since: Standard::C23 },
    Keyword { text: "_Decimal64", kind: TokenKind::Decimal64, since: Standard::C23 },
    Keyword { text: "_Imaginary", kind: TokenKind::Imaginary, since: Standard::C99 },
    Keyword { text: "_Noreturn", kind: TokenKind::Noreturn, since: Standard::C11 },
    Keyword { text: "constexpr", kind: TokenKind::Constexpr, since: Standard::C23 },
    Keyword { text: "_Alignas", kind: TokenKind::AlignasUnderscore, since: Standard::C11 },
    Keyword { text: "_Alignof", kind: TokenKind::AlignofUnderscore, since: Standard::C11 },
    Keyword { text: "_Complex", kind: TokenKind::Complex, since: Standard::C99 },
    Keyword { text: "_Generic", kind: TokenKind::Generic, since: Standard::C11 },
    Keyword { text: "continue", kind: TokenKind::Continue, since: Standard::C90 },
    Keyword { text: "register", kind: TokenKind::Register, since: Standard::C90 },
    Keyword { text: "restrict", kind: TokenKind::Restrict, since: Standard::C99 },
    Keyword { text: "unsigned", kind: TokenKind::Unsigned, since: Standard::C90 },
    Keyword { text: "volatile", kind: TokenKind::Volatile, since: Standard::C90 },
    Keyword { text: "_Atomic", kind: TokenKind::Atomic, since: Standard::C11 },
    Keyword { text: "_BitInt", kind: TokenKind::BitInt, since: Standard::C23 },
    Keyword { text: "alignas", kind: TokenKind::Alignas, since: Standard::C23 },
    Keyword { text: "alignof", kind: TokenKind::Alignof, since: Standard::C23 },
    Keyword { text: "default", kind: TokenKind::Default, since: Standard::C90 },
    Keyword { text: "nullptr", kind: TokenKind::Nullptr, since: Standard::C23 },
    Keyword { text: "typedef", kind: TokenKind::Typedef, since: Standard::C90 },
    Keyword { text: "double", kind: TokenKind::Double, since: Standard::C90 },
    Keyword { text: "extern", kind: TokenKind::Extern, since: Standard::C90 },
    Keyword { text: "inline", kind: TokenKind::Inline, since: Standard::C99 },
    Keyword { text: "return", kind: TokenKind::Return, since: Standard::C90 },
    Keyword { text: "signed", kind: TokenKind::Signed, since: Standard::C90 },
    Keyword { text: "sizeof", kind: TokenKind::Sizeof, since: Standard::C90 },
    Keyword { text: "static", kind: TokenKind::Static, since: Standard::C90 },
    Keyword { text: "struct", kind: TokenKind::Struct, since: Standard::C90 },
    Keyword { text: "switch", kind: TokenKind::Switch, since: Standard::C90 },
    Keyword { text: "typeof", kind: TokenKind::Typeof, since: Standard::C23 },
    Keyword { text: "_Bool", kind: TokenKind::BoolUnderscore, since: Standard::C99 },
    Keyword { text: "break", kind: TokenKind::Break, since: Standard::C90 },
    Keyword { text: "const", kind: TokenKind::Const, since: Standard::C90 },
    Keyword { text: "false", kind: TokenKind::False, since: Standard::C23 },
    Keyword { text: "float", kind: TokenKind::Float, since: Standard::C90 },
    Keyword { text: "short", kind: TokenKind::Short, since: Standard::C90 },
    Keyword { text: "union", kind: TokenKind::Union, since: Standard::C90 },
    Keyword { text: "while", kind: TokenKind::While, since: Standard::C90 },
    Keyword { text: "auto", kind: TokenKind::Auto, since: Standard::C90 },
    Keyword { text: "bool", kind: TokenKind::Bool, since: Standard::C23 },
    Keyword { text: "case", kind: TokenKind::Case, since: Standard::C90 },
    Keyword { text: "char", kind: TokenKind::Char, since: Standard::C90 },
    Keyword { text: "else", kind: TokenKind::Else, since: Standard::C90 },
    Keyword { text: "enum", kind: TokenKind::Enum, since: Standard::C90 },
    Keyword { text: "goto", kind: TokenKind::Goto, since: Standard::C90 },
    Keyword { text: "long", kind: TokenKind::Long, since: Standard::C90 },
    Keyword { text: "true", kind: TokenKind::True, since: Standard::C23 },
    Keyword { text: "void", kind: TokenKind::Void, since: Standard::C90 },
    Keyword { text: "for", kind: TokenKind::For, since: Standard::C90 },
    Keyword { text: "int", kind: TokenKind::Int, since: Standard::C90 },
    Keyword { text: "do", kind: TokenKind::Do, since: Standard::C90 },
    Keyword { text: "if", kind: TokenKind::If, since: Standard::C90 },
];

/// Exact keyword lookup for a scanned identifier.
///
/// Returns `None` for non-keywords and for words the selected standard does
/// not reserve yet.
pub fn lookup_keyword(word: &str, standard: Standard) -> Option<TokenKind> {
    KEYWORDS
        .binary_search_by(|keyword| {
            word.len()
                .cmp(&keyword.text.len())
                .then_with(|| keyword.text.as_bytes().cmp(word.as_bytes()))
        })
        .ok()
        .map(|index| KEYWORDS[index])
        .filter(|keyword| keyword.since <= standard)
        .map(|keyword| keyword.kind)
}

/// Punctuators, longest spelling first so a prefix scan finds the maximal munch.
pub const PUNCTUATORS: &[(&str, TokenKind)] = &[
    ("<<=", TokenKind::LeftShiftEqual),
    (">>=", TokenKind::RightShiftEqual),
    ("...", TokenKind::Ellipsis),
    ("+=", TokenKind::PlusEqual),
    ("-=", TokenKind::MinusEqual),
    ("*=", TokenKind::StarEqual),
    ("/=", TokenKind::SlashEqual),
    ("%=", TokenKind::PercentEqual),
    ("&=", TokenKind::AmpersandEqual),
    ("|=", TokenKind::BarEqual),
    ("^=", TokenKind::CaretEqual),
    ("<<", TokenKind::LeftShift),
    (">>", TokenKind::RightShift),
    ("++", TokenKind::PlusPlus),
    ("--", TokenKind::MinusMinus),
    ("==", TokenKind::EqualEqual),
    ("!=", TokenKind::NotEqual),
    ("<=", TokenKind::LessEqual),
    (">=", TokenKind::GreaterEqual),
    ("&&", TokenKind::AmpersandAmpersand),
    ("||", TokenKind::BarBar),
    ("->", TokenKind::Arrow),
    ("##", TokenKind::HashHash),
    ("(", TokenKind::OpenParen),
    (")", TokenKind::CloseParen),
    ("{", TokenKind::OpenBrace),
    ("}", TokenKind::CloseBrace),
    ("[", TokenKind::OpenBracket),
    ("]", TokenKind::CloseBracket),
    (";", TokenKind::Semicolon),
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Star),
    ("/", TokenKind::Slash),
    ("%", TokenKind::Percent),
    ("&", TokenKind::Ampersand),
    ("|", TokenKind::Bar),
    ("^", TokenKind::Caret),
    ("~", TokenKind::Tilde),
    ("=", TokenKind::Equal),
    ("<", TokenKind::Less),
    (">", TokenKind::Greater),
    ("!", TokenKind::Exclamation),
    ("?", TokenKind::Question),
    (",", TokenKind::Comma),
    (".", TokenKind::Dot),
    (":", TokenKind::Colon),
    ("#", TokenKind::Hash),
];

/// Longest punctuator at the start of `rest`, with its length in bytes.
pub fn match_punctuator(rest: &str) -> Option<(TokenKind, usize)> {
    PUNCTUATORS
        .iter()
        .find(|(spelling, _)| rest.starts_with(spelling))
        .map(|&(spelling, kind)| (kind, spelling.len()))
}

/// Type of an integer constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rank {
    Int,
    Long,
    LongLong,
    UnsignedInt,
    UnsignedLong,
    UnsignedLongLong,
}

impl Rank {
    pub fn is_unsigned(self) -> bool {
        self >= Rank::UnsignedInt
    }

    /// Largest value representable in this rank under `model`.
    pub fn max_value(self, model: DataModel) -> u64 {
        let long_is_wide = model.long_bits() == 64;
        match self {
            Rank::Int => i32::MAX as u64,
            Rank::UnsignedInt => u32::MAX as u64,
            Rank::Long if long_is_wide => i64::MAX as u64,
            Rank::Long => i32::MAX as u64,
            Rank::UnsignedLong if long_is_wide => u64::MAX,
            Rank::UnsignedLong => u32::MAX as u64,
            Rank::LongLong => i64::MAX as u64,
            Rank::UnsignedLongLong => u64::MAX,
        }
    }

    /// Width in bits under `model`.
    pub fn bits(self, model: DataModel) -> u32 {
        match self {
            Rank::Int | Rank::UnsignedInt => 32,
            Rank::Long | Rank::UnsignedLong => model.long_bits(),
            Rank::LongLong | Rank::UnsignedLongLong => 64,
        }
    }

    /// Integer conversion rank: `int` < `long` < `long long`, ignoring
    /// signedness.
    pub fn conversion_rank(self) -> u8 {
        match self {
            Rank::Int | Rank::UnsignedInt => 0,
            Rank::Long | Rank::UnsignedLong => 1,
            Rank::LongLong | Rank::UnsignedLongLong => 2,
        }
    }

    pub fn to_unsigned(self) -> Rank {
        match self {
            Rank::Int => Rank::UnsignedInt,
            Rank::Long => Rank::UnsignedLong,
            Rank::LongLong => Rank::UnsignedLongLong,
            unsigned => unsigned,
        }
    }

    /// Type both operands of an arithmetic operator are converted to.
    pub fn common(self, other: Rank, model: DataModel) -> Rank {
        if self == other {
            return self;
        }
        if self.is_unsigned() == other.is_unsigned() {
            return if self.conversion_rank() >= other.conversion_rank() {
                self
            } else {
                other
            };
        }

        let (unsigned, signed) = if self.is_unsigned() {
            (self, other)
        } else {
            (other, self)
        };
        if unsigned.conversion_rank() >= signed.conversion_rank() {
            unsigned
        } else if signed.bits(model) > unsigned.bits(model) {
            signed
        } else {
            signed.to_unsigned()
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Rank::Int => "int",
            Rank::Long => "long",
            Rank::LongLong => "long long",
            Rank::UnsignedInt => "unsigned int",
            Rank::UnsignedLong => "unsigned long",
            Rank::UnsignedLongLong => "unsigned long long",
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value and type of an integer or character constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Constant {
    pub value: u64,
    pub rank: Rank,
}

impl Constant {
    pub fn new(value: u64, rank: Rank) -> Self {
        Self { value, rank }
    }

    pub fn int(value: u64) -> Self {
        Self::new(value, Rank::Int)
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.value, self.rank)
    }
}

/// One lexical unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    /// Exact source text of the token.
    pub text: &'src str,
    /// Byte offset of `text` in the lexed buffer.
    pub offset: usize,
    /// Set only for [`TokenKind::Constant`].
    pub constant: Option<Constant>,
}

impl<'src> Token<'src> {
    pub fn new(kind: TokenKind, text: &'src str, offset: usize) -> Self {
        Self {
            kind,
            text,
            offset,
            constant: None,
        }
    }

    pub fn constant(text: &'src str, offset: usize, constant: Constant) -> Self {
        Self {
            kind: TokenKind::Constant,
            text,
            offset,
            constant: Some(constant),
        }
    }

    /// Byte offset one past the last byte of the token.
    pub fn end(&self) -> usize {
        self.offset + self.text.len()
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier => write!(f, "identifier '{}'", self.text),
            TokenKind::Constant => write!(f, "constant {}", self.text),
            TokenKind::StringLiteral => write!(f, "string literal {}", self.text),
            kind => f.write_str(kind.as_str()),
        }
    }
}

/// The ordered output of one lex call.
///
/// Dereferences to a token slice; the parser only ever works on sub-slices of
/// it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenList<'src> {
    source: &'src str,
    tokens: Vec<Token<'src>>,
}

impl<'src> TokenList<'src> {
    pub fn new(source: &'src str, tokens: Vec<Token<'src>>) -> Self {
        Self { source, tokens }
    }

    /// The buffer every token's text points into.
    pub fn source(&self) -> &'src str {
        self.source
    }

    pub fn as_slice(&self) -> &[Token<'src>] {
        &self.tokens
    }

    pub fn kinds(&self) -> Vec<TokenKind> {
        self.tokens.iter().map(|token| token.kind).collect()
    }
}

impl<'src> Deref for TokenList<'src> {
    type Target = [Token<'src>];

    fn deref(&self) -> &Self::Target {
        &self.tokens
    }
}

/// One line per token, in the format of `--dump-tokens`.
impl fmt::Display for TokenList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, token) in self.tokens.iter().enumerate() {
            write!(f, "{index}: {} {}", token.kind, token.text)?;
            if let Some(constant) = token.constant {
                write!(f, " = {constant}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_display_names_are_unique_and_non_empty() {
        let mut seen = FxHashSet::default();
        for kind in TokenKind::ALL {
            let name = kind.as_str();
            assert!(!name.is_empty(), "{kind:?} has no name");
            assert!(seen.insert(name), "duplicate name {name}");
        }
    }

    #[test]
    fn test_is_keyword_matches_contiguous_range() {
        let first = TokenKind::ALL
            .iter()
            .position(|kind| *kind == TokenKind::FIRST_KEYWORD)
            .unwrap();
        let last = TokenKind::ALL
            .iter()
            .position(|kind| *kind == TokenKind::LAST_KEYWORD)
            .unwrap();

        for (index, kind) in TokenKind::ALL.iter().enumerate() {
            assert_eq!(kind.is_keyword(), (first..=last).contains(&index), "{kind:?}");
        }
    }

    #[test]
    fn test_every_keyword_kind_has_a_table_entry() {
        for kind in TokenKind::ALL.iter().filter(|kind| kind.is_keyword()) {
            let entry = KEYWORDS.iter().find(|keyword| keyword.kind == *kind);
            let entry = entry.unwrap_or_else(|| panic!("{kind:?} missing from KEYWORDS"));
            assert_eq!(kind.as_str(), format!("'{}'", entry.text));
        }
        assert_eq!(
            KEYWORDS.len(),
            TokenKind::ALL.iter().filter(|kind| kind.is_keyword()).count()
        );
    }

    #[test]
    fn test_keyword_table_is_sorted_for_binary_search() {
        for pair in KEYWORDS.windows(2) {
            let (a, b) = (pair[0].text, pair[1].text);
            assert!(
                a.len() > b.len() || (a.len() == b.len() && a < b),
                "{a} must sort before {b}"
            );
        }
    }

    #[test]
    fn test_lookup_keyword() {
        for keyword in KEYWORDS {
            assert_eq!(lookup_keyword(keyword.text, Standard::C23), Some(keyword.kind));
        }
        assert_eq!(lookup_keyword("int5a", Standard::C23), None);
        assert_eq!(lookup_keyword("Int", Standard::C23), None);
        assert_eq!(lookup_keyword("", Standard::C23), None);
        assert_eq!(lookup_keyword("bool", Standard::C17), None);
        assert_eq!(lookup_keyword("_Bool", Standard::C99), Some(TokenKind::BoolUnderscore));
        assert_eq!(lookup_keyword("_Bool", Standard::C90), None);
    }

    #[test]
    fn test_punctuators_longest_first() {
        for pair in PUNCTUATORS.windows(2) {
            assert!(pair[0].0.len() >= pair[1].0.len());
        }
        assert_eq!(match_punctuator("<<=1"), Some((TokenKind::LeftShiftEqual, 3)));
        assert_eq!(match_punctuator("<<1"), Some((TokenKind::LeftShift, 2)));
        assert_eq!(match_punctuator("<1"), Some((TokenKind::Less, 1)));
        assert_eq!(match_punctuator("+++"), Some((TokenKind::PlusPlus, 2)));
        assert_eq!(match_punctuator("+-"), Some((TokenKind::Plus, 1)));
        assert_eq!(match_punctuator("[{()}]"), Some((TokenKind::OpenBracket, 1)));
        assert_eq!(match_punctuator("abc"), None);
        assert_eq!(match_punctuator(""), None);
    }

    #[test]
    fn test_rank_limits() {
        assert_eq!(Rank::Int.max_value(DataModel::Llp64), 2_147_483_647);
        assert_eq!(Rank::Long.max_value(DataModel::Llp64), 2_147_483_647);
        assert_eq!(Rank::Long.max_value(DataModel::Lp64), i64::MAX as u64);
        assert_eq!(Rank::UnsignedLong.max_value(DataModel::Llp64), u32::MAX as u64);
        assert_eq!(Rank::UnsignedLongLong.max_value(DataModel::Llp64), u64::MAX);
        assert!(Rank::UnsignedInt.is_unsigned());
        assert!(!Rank::LongLong.is_unsigned());
    }

    #[test]
    fn test_common_rank() {
        let llp64 = DataModel::Llp64;
        let lp64 = DataModel::Lp64;
        assert_eq!(Rank::Int.common(Rank::Int, llp64), Rank::Int);
        assert_eq!(Rank::Int.common(Rank::Long, llp64), Rank::Long);
        assert_eq!(Rank::Int.common(Rank::UnsignedInt, llp64), Rank::UnsignedInt);
        assert_eq!(
            Rank::LongLong.common(Rank::UnsignedInt, llp64),
            Rank::LongLong
        );
        assert_eq!(
            Rank::Long.common(Rank::UnsignedInt, llp64),
            Rank::UnsignedLong
        );
        assert_eq!(Rank::Long.common(Rank::UnsignedInt, lp64), Rank::Long);
        assert_eq!(
            Rank::UnsignedLong.common(Rank::LongLong, lp64),
            Rank::UnsignedLongLong
        );
    }
}
