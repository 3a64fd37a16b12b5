//! ASCII character pools backing the shorthand classes and token leaves.

use std::sync::LazyLock;

pub const LOWER: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPER: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const NUMBER: &str = "0123456789";
pub const SPACE: &str = " \u{000C}\n\r\t\u{000B}\u{00A0}\u{2028}\u{2029}";

/// Every printable ASCII character, `0x20..=0x7E`.
pub static PRINTABLE: LazyLock<Vec<char>> = LazyLock::new(|| ascii(0x20, 0x7E).collect());

/// Printable punctuation and space, without `_`.
pub static OTHER: LazyLock<Vec<char>> = LazyLock::new(|| {
    ascii(0x20, 0x2F)
        .chain(ascii(0x3A, 0x40))
        .chain(ascii(0x5B, 0x60))
        .chain(ascii(0x7B, 0x7E))
        .filter(|&c| c != '_')
        .collect()
});

/// Letters and digits, the pool for the `word` and `non-white-space` tokens.
pub static ALNUM: LazyLock<Vec<char>> =
    LazyLock::new(|| LOWER.chars().chain(UPPER.chars()).chain(NUMBER.chars()).collect());

/// Letters and punctuation, the pool for `\D`.
pub static NON_DIGIT: LazyLock<Vec<char>> = LazyLock::new(|| {
    LOWER
        .chars()
        .chain(UPPER.chars())
        .chain(OTHER.iter().copied())
        .collect()
});

static DIGITS: LazyLock<Vec<char>> = LazyLock::new(|| NUMBER.chars().collect());
static SPACES: LazyLock<Vec<char>> = LazyLock::new(|| SPACE.chars().collect());

static WORD: LazyLock<Vec<char>> =
    LazyLock::new(|| ALNUM.iter().copied().chain(std::iter::once('_')).collect());

static NON_SPACE: LazyLock<Vec<char>> = LazyLock::new(|| {
    PRINTABLE
        .iter()
        .copied()
        .filter(|c| !SPACE.contains(*c))
        .collect()
});

fn ascii(from: u8, to: u8) -> impl Iterator<Item = char> {
    (from..=to).map(char::from)
}

/// One of `\w \W \d \D \s \S`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shorthand {
    Word,
    NonWord,
    Digit,
    NonDigit,
    Space,
    NonSpace,
}

impl Shorthand {
    /// Look a class up by its source spelling, e.g. `"\\d"`.
    pub fn from_text(text: &str) -> Option<Self> {
        match text {
            "\\w" => Some(Shorthand::Word),
            "\\W" => Some(Shorthand::NonWord),
            "\\d" => Some(Shorthand::Digit),
            "\\D" => Some(Shorthand::NonDigit),
            "\\s" => Some(Shorthand::Space),
            "\\S" => Some(Shorthand::NonSpace),
            _ => None,
        }
    }

    pub fn members(self) -> &'static [char] {
        match self {
            Shorthand::Word => WORD.as_slice(),
            Shorthand::NonWord => OTHER.as_slice(),
            Shorthand::Digit => DIGITS.as_slice(),
            Shorthand::NonDigit => NON_DIGIT.as_slice(),
            Shorthand::Space => SPACES.as_slice(),
            Shorthand::NonSpace => NON_SPACE.as_slice(),
        }
    }
}

const CONTROL_SYMBOLS: [char; 32] = [
    '@', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', '[', '\\', ']', '^', '_',
];

/// Map the letter of a `\cX` escape to its C0 control character.
pub fn control_character(symbol: char) -> Option<char> {
    let index = CONTROL_SYMBOLS.iter().position(|&c| c == symbol)?;
    char::from_u32(index as u32)
}
