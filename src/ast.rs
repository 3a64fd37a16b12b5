use serde::{Deserialize, Serialize};

/// A node of a parsed regular expression.
///
/// `offset` and `text` locate the node in the source pattern and are carried by
/// every variant. The variant-specific fields live in `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegexNode {
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub text: String,
    #[serde(flatten)]
    pub kind: NodeKind,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum NodeKind {
    Alternate {
        left: Box<RegexNode>,
        right: Box<RegexNode>,
    },
    Match {
        body: Vec<RegexNode>,
    },
    CaptureGroup {
        body: Box<RegexNode>,
    },
    NonCaptureGroup {
        body: Box<RegexNode>,
    },
    PositiveLookahead {
        body: Box<RegexNode>,
    },
    NegativeLookahead {
        body: Box<RegexNode>,
    },
    Quantified {
        body: Box<RegexNode>,
        quantifier: Box<RegexNode>,
    },
    /// `max` is `None` for an unbounded repetition (`*`, `+`, `{n,}`).
    Quantifier {
        min: i64,
        #[serde(default)]
        max: Option<i64>,
        #[serde(default = "default_greedy")]
        greedy: bool,
    },
    Charset {
        body: Vec<RegexNode>,
        #[serde(default)]
        invert: bool,
    },
    Range {
        start: Box<RegexNode>,
        end: Box<RegexNode>,
    },
    Literal {
        body: char,
        #[serde(default)]
        escaped: bool,
    },
    Unicode {
        code: String,
    },
    Hex {
        code: String,
    },
    Octal {
        code: String,
    },
    BackReference {
        code: u32,
    },
    ControlCharacter {
        code: char,
    },
    Start,
    End,
    AnyCharacter,
    Backspace,
    WordBoundary,
    NonWordBoundary,
    Digit,
    NonDigit,
    FormFeed,
    LineFeed,
    CarriageReturn,
    WhiteSpace,
    NonWhiteSpace,
    Tab,
    VerticalTab,
    Word,
    NonWord,
    NullCharacter,
    /// Any tag this crate does not know about. Generated as the node's raw text.
    #[serde(other)]
    Unknown,
}

fn default_greedy() -> bool {
    true
}

impl NodeKind {
    pub fn type_name(&self) -> &'static str {
        match self {
            NodeKind::Alternate { .. } => "alternate",
            NodeKind::Match { .. } => "match",
            NodeKind::CaptureGroup { .. } => "capture-group",
            NodeKind::NonCaptureGroup { .. } => "non-capture-group",
            NodeKind::PositiveLookahead { .. } => "positive-lookahead",
            NodeKind::NegativeLookahead { .. } => "negative-lookahead",
            NodeKind::Quantified { .. } => "quantified",
            NodeKind::Quantifier { .. } => "quantifier",
            NodeKind::Charset { .. } => "charset",
            NodeKind::Range { .. } => "range",
            NodeKind::Literal { .. } => "literal",
            NodeKind::Unicode { .. } => "unicode",
            NodeKind::Hex { .. } => "hex",
            NodeKind::Octal { .. } => "octal",
            NodeKind::BackReference { .. } => "back-reference",
            NodeKind::ControlCharacter { .. } => "control-character",
            NodeKind::Start => "start",
            NodeKind::End => "end",
            NodeKind::AnyCharacter => "any-character",
            NodeKind::Backspace => "backspace",
            NodeKind::WordBoundary => "word-boundary",
            NodeKind::NonWordBoundary => "non-word-boundary",
            NodeKind::Digit => "digit",
            NodeKind::NonDigit => "non-digit",
            NodeKind::FormFeed => "form-feed",
            NodeKind::LineFeed => "line-feed",
            NodeKind::CarriageReturn => "carriage-return",
            NodeKind::WhiteSpace => "white-space",
            NodeKind::NonWhiteSpace => "non-white-space",
            NodeKind::Tab => "tab",
            NodeKind::VerticalTab => "vertical-tab",
            NodeKind::Word => "word",
            NodeKind::NonWord => "non-word",
            NodeKind::NullCharacter => "null-character",
            NodeKind::Unknown => "unknown",
        }
    }
}

impl RegexNode {
    pub fn new(text: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            offset: 0,
            text: text.into(),
            kind,
        }
    }

    /// Decode a tree in the JSON shape emitted by the regex parser.
    ///
    /// Missing required fields (a `match` without `body`, a `quantified`
    /// without `quantifier`, ...) are rejected here.
    pub fn from_json(input: &str) -> serde_json::Result<Self> {
        serde_json::from_str(input)
    }

    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    pub fn literal(ch: char) -> Self {
        Self::new(
            ch.to_string(),
            NodeKind::Literal {
                body: ch,
                escaped: false,
            },
        )
    }

    /// An escaped literal such as `\.`; `text` keeps the backslash.
    pub fn escaped(ch: char) -> Self {
        Self::new(
            format!("\\{ch}"),
            NodeKind::Literal {
                body: ch,
                escaped: true,
            },
        )
    }

    pub fn sequence(body: Vec<RegexNode>) -> Self {
        let text = body.iter().map(|n| n.text.as_str()).collect::<String>();
        Self::new(text, NodeKind::Match { body })
    }

    pub fn alternate(left: RegexNode, right: RegexNode) -> Self {
        let text = format!("{}|{}", left.text, right.text);
        Self::new(
            text,
            NodeKind::Alternate {
                left: Box::new(left),
                right: Box::new(right),
            },
        )
    }

    pub fn capture(body: RegexNode) -> Self {
        let text = format!("({})", body.text);
        Self::new(
            text,
            NodeKind::CaptureGroup {
                body: Box::new(body),
            },
        )
    }

    pub fn non_capture(body: RegexNode) -> Self {
        let text = format!("(?:{})", body.text);
        Self::new(
            text,
            NodeKind::NonCaptureGroup {
                body: Box::new(body),
            },
        )
    }

    pub fn quantifier(min: i64, max: Option<i64>) -> Self {
        let text = match max {
            Some(max) if max == min => format!("{{{min}}}"),
            Some(max) => format!("{{{min},{max}}}"),
            None => format!("{{{min},}}"),
        };
        Self::new(
            text,
            NodeKind::Quantifier {
                min,
                max,
                greedy: true,
            },
        )
    }

    pub fn quantified(body: RegexNode, quantifier: RegexNode) -> Self {
        let text = format!("{}{}", body.text, quantifier.text);
        Self::new(
            text,
            NodeKind::Quantified {
                body: Box::new(body),
                quantifier: Box::new(quantifier),
            },
        )
    }

    pub fn charset(body: Vec<RegexNode>, invert: bool) -> Self {
        let inner = body.iter().map(|n| n.text.as_str()).collect::<String>();
        let text = if invert {
            format!("[^{inner}]")
        } else {
            format!("[{inner}]")
        };
        Self::new(text, NodeKind::Charset { body, invert })
    }

    pub fn range(start: char, end: char) -> Self {
        Self::new(
            format!("{start}-{end}"),
            NodeKind::Range {
                start: Box::new(Self::literal(start)),
                end: Box::new(Self::literal(end)),
            },
        )
    }

    pub fn back_reference(code: u32) -> Self {
        Self::new(format!("\\{code}"), NodeKind::BackReference { code })
    }

    /// A token leaf; `text` is taken from `kind` when it has a well known spelling.
    pub fn token(kind: NodeKind) -> Self {
        let text = match kind {
            NodeKind::Start => "^",
            NodeKind::End => "$",
            NodeKind::AnyCharacter => ".",
            NodeKind::Backspace => "[\\b]",
            NodeKind::WordBoundary => "\\b",
            NodeKind::NonWordBoundary => "\\B",
            NodeKind::Digit => "\\d",
            NodeKind::NonDigit => "\\D",
            NodeKind::FormFeed => "\\f",
            NodeKind::LineFeed => "\\n",
            NodeKind::CarriageReturn => "\\r",
            NodeKind::WhiteSpace => "\\s",
            NodeKind::NonWhiteSpace => "\\S",
            NodeKind::Tab => "\\t",
            NodeKind::VerticalTab => "\\v",
            NodeKind::Word => "\\w",
            NodeKind::NonWord => "\\W",
            NodeKind::NullCharacter => "\\0",
            _ => "",
        };
        Self::new(text, kind)
    }
}
