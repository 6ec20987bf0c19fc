//! Integer constant scanning
//!
//! Accumulates digits under the rank the literal currently has and escalates
//! the rank whenever the next digit would not fit. Decimal literals climb
//! `int -> long -> long long`; octal, hexadecimal and binary literals may also
//! take the unsigned rank in between. A `u` suffix keeps the literal on the
//! unsigned ladder from the start.

use super::token::{Constant, Rank};
use crate::config::DataModel;
use crate::diagnostics::{DiagnosticKind, Diagnostics};

/// Result of scanning one integer constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntegerLiteral {
    pub constant: Constant,
    /// Bytes consumed, including prefix and suffix.
    pub len: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Suffix {
    unsigned: bool,
    longs: u8,
}

impl Suffix {
    fn rank(self) -> Rank {
        match (self.unsigned, self.longs) {
            (false, 0) => Rank::Int,
            (true, 0) => Rank::UnsignedInt,
            (false, 1) => Rank::Long,
            (true, 1) => Rank::UnsignedLong,
            (false, _) => Rank::LongLong,
            (true, _) => Rank::UnsignedLongLong,
        }
    }
}

/// Scan the integer constant at the start of `input`.
///
/// `input[0]` must be an ASCII digit. `offset` is where `input` starts in the
/// lexed buffer and only anchors diagnostics.
pub fn scan_integer(
    input: &[u8],
    model: DataModel,
    offset: usize,
    diagnostics: &mut Diagnostics,
) -> IntegerLiteral {
    let (base, prefix_len) = detect_base(input);

    let digits_end = prefix_len
        + input[prefix_len..]
            .iter()
            .take_while(|byte| digit_value(**byte, base).is_some())
            .count();
    let suffix_end = digits_end
        + input[digits_end..]
            .iter()
            .take_while(|byte| byte.is_ascii_alphanumeric() || **byte == b'_')
            .count();

    let suffix = match parse_suffix(&input[digits_end..suffix_end]) {
        Some(suffix) => suffix,
        None => {
            diagnostics.report(DiagnosticKind::InvalidSuffix, offset + digits_end);
            Suffix {
                unsigned: false,
                longs: 0,
            }
        }
    };

    let decimal = base == 10;
    let mut rank = suffix.rank();
    let mut value: u64 = 0;

    'digits: for &byte in &input[prefix_len..digits_end] {
        let digit = digit_value(byte, base).unwrap_or(0);
        loop {
            let bound = rank.max_value(model);
            if digit <= bound && value <= (bound - digit) / base {
                value = value * base + digit;
                break;
            }
            match promote(rank, decimal, suffix.unsigned) {
                Some(next) => rank = next,
                None => {
                    diagnostics.report(DiagnosticKind::IntegerOverflow, offset);
                    value = bound;
                    break 'digits;
                }
            }
        }
    }

    tracing::trace!(value, rank = %rank, len = suffix_end, "integer constant");

    IntegerLiteral {
        constant: Constant::new(value, rank),
        len: suffix_end,
    }
}

/// Next rank on the promotion ladder, if any.
fn promote(rank: Rank, decimal: bool, explicit_unsigned: bool) -> Option<Rank> {
    match rank {
        Rank::Int if decimal => Some(Rank::Long),
        Rank::Int => Some(Rank::UnsignedInt),
        Rank::UnsignedInt if decimal || explicit_unsigned => {
            Some(Rank::UnsignedLong)
        }
        Rank::UnsignedInt => Some(Rank::Long),
        Rank::Long if decimal => Some(Rank::LongLong),
        Rank::Long => Some(Rank::UnsignedLong),
        Rank::UnsignedLong if decimal || explicit_unsigned => {
            Some(Rank::UnsignedLongLong)
        }
        Rank::UnsignedLong => Some(Rank::LongLong),
        Rank::LongLong if !decimal && !explicit_unsigned => {
            Some(Rank::UnsignedLongLong)
        }
        Rank::LongLong | Rank::UnsignedLongLong => None,
    }
}

/// Base and prefix length. A prefix only counts when a digit of its base
/// follows it.
fn detect_base(input: &[u8]) -> (u64, usize) {
    match input {
        [b'0', b'x' | b'X', next, ..] if next.is_ascii_hexdigit() => (16, 2),
        [b'0', b'b' | b'B', b'0' | b'1', ..] => (2, 2),
        [b'0', next, ..] if next.is_ascii_digit() => (8, 1),
        _ => (10, 0),
    }
}

fn digit_value(byte: u8, base: u64) -> Option<u64> {
    let value = match byte {
        b'0'..=b'9' => byte - b'0',
        b'a'..=b'f' => byte - b'a' + 10,
        b'A'..=b'F' => byte - b'A' + 10,
        _ => return None,
    };
    let value = u64::from(value);
    (value < base).then_some(value)
}

/// Accepts `u`, `l`, `ll` and either order of `u` with `l`/`ll`. Both letters
/// of `ll` must share a case; `u` may be either case.
fn parse_suffix(suffix: &[u8]) -> Option<Suffix> {
    let (unsigned_front, rest) = strip_unsigned(suffix);
    let (longs, rest) = strip_long(rest);
    let (unsigned_back, rest) = if unsigned_front {
        (false, rest)
    } else {
        strip_unsigned(rest)
    };

    rest.is_empty().then_some(Suffix {
        unsigned: unsigned_front || unsigned_back,
        longs,
    })
}

fn strip_unsigned(suffix: &[u8]) -> (bool, &[u8]) {
    match suffix {
        [b'u' | b'U', rest @ ..] => (true, rest),
        _ => (false, suffix),
    }
}

fn strip_long(suffix: &[u8]) -> (u8, &[u8]) {
    match suffix {
        [b'l', b'l', rest @ ..] | [b'L', b'L', rest @ ..] => (2, rest),
        [b'l' | b'L', rest @ ..] => (1, rest),
        _ => (0, suffix),
    }
}
