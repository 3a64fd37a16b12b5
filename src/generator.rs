use std::ops::RangeInclusive;

use crate::ast::{NodeKind, RegexNode};
use crate::capture::CaptureContext;
use crate::classes::{self, Shorthand};
use crate::error::GenerateError;
use crate::random::RandomSource;

#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Deepest node nesting accepted before giving up with `TooDeep`.
    pub max_depth: usize,
    /// Extra repetitions added on top of `min` when a quantifier has no upper bound.
    pub unbounded_extra: RangeInclusive<u32>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_depth: 256,
            unbounded_extra: 3..=7,
        }
    }
}

/// Walks a pattern tree and produces one string the pattern should match.
pub struct Generator<'r, R> {
    random: &'r mut R,
    config: GeneratorConfig,
}

impl<'r, R: RandomSource> Generator<'r, R> {
    pub fn new(random: &'r mut R) -> Self {
        Self {
            random,
            config: GeneratorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: GeneratorConfig) -> Self {
        self.config = config;
        self
    }

    /// Generate one sample. Each call starts with no recorded captures.
    pub fn generate(&mut self, node: &RegexNode) -> Result<String, GenerateError> {
        let mut ctx = CaptureContext::new();
        let mut out = String::new();
        self.emit(node, &mut ctx, &mut out, 0)?;
        log::debug!(
            "generated {} chars from `{}` node at offset {}",
            out.chars().count(),
            node.kind.type_name(),
            node.offset
        );
        Ok(out)
    }

    // Appends the output for `node` to `out`.
    fn emit(
        &mut self,
        node: &RegexNode,
        ctx: &mut CaptureContext,
        out: &mut String,
        depth: usize,
    ) -> Result<(), GenerateError> {
        if depth >= self.config.max_depth {
            return Err(GenerateError::TooDeep {
                offset: node.offset,
                limit: self.config.max_depth,
            });
        }
        let depth = depth + 1;

        match &node.kind {
            NodeKind::Alternate { left, right } => {
                let branch = if self.random.boolean() { left } else { right };
                self.emit(branch, ctx, out, depth)?;
            }
            NodeKind::Match { body } => {
                for child in body {
                    self.emit(child, ctx, out, depth)?;
                }
            }
            NodeKind::CaptureGroup { body } => {
                let id = ctx.id_for(node);
                let start = out.len();
                self.emit(body, ctx, out, depth)?;
                ctx.record(id, out[start..].to_string());
            }
            // A lookahead's body is written out as if it were consumed.
            NodeKind::NonCaptureGroup { body } | NodeKind::PositiveLookahead { body } => {
                self.emit(body, ctx, out, depth)?;
            }
            NodeKind::NegativeLookahead { .. } => {}
            NodeKind::Quantified { body, quantifier } => {
                let count = self.repeat_count(quantifier)?;
                for _ in 0..count {
                    self.emit(body, ctx, out, depth)?;
                }
            }
            // Only meaningful as the bound of a `quantified` node.
            NodeKind::Quantifier { .. } => {}
            NodeKind::Charset { body, invert: true } => {
                let ch = self.pick_excluding(node, body, ctx, depth)?;
                out.push(ch);
            }
            NodeKind::Charset { body, invert: false } => {
                let member = self
                    .random
                    .pick(body.as_slice())
                    .ok_or(GenerateError::EmptyCharset { offset: node.offset })?;
                self.emit(member, ctx, out, depth)?;
            }
            NodeKind::Range { start, end } => {
                let bounds = self.range_bounds(node, start, end, ctx, depth)?;
                let value = self.code_point_between(*bounds.start(), *bounds.end());
                out.push(to_char(node, value)?);
            }
            NodeKind::Literal { body, escaped: true } => out.push(*body),
            NodeKind::Literal { escaped: false, .. } => out.push_str(&node.text),
            NodeKind::Unicode { code } | NodeKind::Hex { code } => {
                out.push(code_point(node, code, 16)?);
            }
            NodeKind::Octal { code } => out.push(code_point(node, code, 8)?),
            NodeKind::BackReference { code } => out.push_str(ctx.resolve(*code)),
            NodeKind::ControlCharacter { code } => {
                let ch = classes::control_character(*code).ok_or(GenerateError::UnknownControl {
                    offset: node.offset,
                    code: *code,
                })?;
                out.push(ch);
            }
            // Anchors, boundaries and a few escapes produce nothing.
            NodeKind::Start
            | NodeKind::End
            | NodeKind::Backspace
            | NodeKind::WordBoundary
            | NodeKind::NonWordBoundary
            | NodeKind::FormFeed
            | NodeKind::CarriageReturn
            | NodeKind::Tab
            | NodeKind::VerticalTab
            | NodeKind::NullCharacter => {}
            NodeKind::AnyCharacter => out.push(self.random.character()),
            NodeKind::LineFeed => out.push('\n'),
            NodeKind::Digit => out.push(self.pick_char(node, Shorthand::Digit.members())?),
            NodeKind::NonDigit => out.push(self.pick_char(node, &classes::NON_DIGIT)?),
            NodeKind::WhiteSpace => out.push(self.pick_char(node, Shorthand::Space.members())?),
            NodeKind::NonWhiteSpace | NodeKind::Word => {
                out.push(self.pick_char(node, &classes::ALNUM)?)
            }
            NodeKind::NonWord => out.push(self.pick_char(node, &classes::OTHER)?),
            NodeKind::Unknown => out.push_str(&node.text),
        }
        Ok(())
    }

    fn repeat_count(&mut self, quantifier: &RegexNode) -> Result<u32, GenerateError> {
        let &NodeKind::Quantifier { min, max, .. } = &quantifier.kind else {
            return Err(GenerateError::NotAQuantifier {
                offset: quantifier.offset,
                found: quantifier.kind.type_name(),
            });
        };
        let min = min.max(0);
        let max = match max {
            Some(max) => max,
            None => {
                let (lo, hi) = (
                    *self.config.unbounded_extra.start(),
                    *self.config.unbounded_extra.end(),
                );
                let extra = self.random.integer(lo.min(hi), lo.max(hi));
                let capped = min.checked_add(i64::from(extra)).ok_or(
                    GenerateError::InvalidBounds {
                        offset: quantifier.offset,
                        min,
                        max: i64::MAX,
                    },
                )?;
                log::trace!(
                    "unbounded quantifier at offset {} capped at {}",
                    quantifier.offset,
                    capped
                );
                capped
            }
        };
        let invalid = || GenerateError::InvalidBounds {
            offset: quantifier.offset,
            min,
            max,
        };
        if max < min {
            return Err(invalid());
        }
        let lo = u32::try_from(min).map_err(|_| invalid())?;
        let hi = u32::try_from(max).map_err(|_| invalid())?;
        Ok(self.random.integer(lo, hi))
    }

    // A uniform code point in `lo..=hi`, skipping the surrogate block.
    fn code_point_between(&mut self, lo: char, hi: char) -> u32 {
        let (lo, hi) = (lo as u32, hi as u32);
        if lo > SURROGATE_LAST || hi < SURROGATE_FIRST {
            return self.random.integer(lo, hi);
        }
        let value = self.random.integer(lo, hi - SURROGATE_COUNT);
        if value >= SURROGATE_FIRST {
            value + SURROGATE_COUNT
        } else {
            value
        }
    }

    // Code points of both range endpoints, in order.
    fn range_bounds(
        &mut self,
        range: &RegexNode,
        start: &RegexNode,
        end: &RegexNode,
        ctx: &mut CaptureContext,
        depth: usize,
    ) -> Result<RangeInclusive<char>, GenerateError> {
        let lo = self.endpoint(start, ctx, depth)?;
        let hi = self.endpoint(end, ctx, depth)?;
        if lo > hi {
            return Err(GenerateError::BackwardsRange {
                offset: range.offset,
                start: lo,
                end: hi,
            });
        }
        Ok(lo..=hi)
    }

    fn endpoint(
        &mut self,
        node: &RegexNode,
        ctx: &mut CaptureContext,
        depth: usize,
    ) -> Result<char, GenerateError> {
        let mut buf = String::new();
        self.emit(node, ctx, &mut buf, depth)?;
        let mut chars = buf.chars();
        match (chars.next(), chars.next()) {
            (Some(ch), None) => Ok(ch),
            _ => Err(GenerateError::InvalidRangeEndpoint {
                offset: node.offset,
                got: buf,
            }),
        }
    }

    // `[^...]`: start from every printable character and strike out each entry.
    fn pick_excluding(
        &mut self,
        charset: &RegexNode,
        exclusions: &[RegexNode],
        ctx: &mut CaptureContext,
        depth: usize,
    ) -> Result<char, GenerateError> {
        let mut pool: Vec<char> = classes::PRINTABLE.clone();
        for item in exclusions {
            match &item.kind {
                NodeKind::Literal { body, .. } => pool.retain(|c| c != body),
                NodeKind::Range { start, end } => {
                    let bounds = self.range_bounds(item, start, end, ctx, depth)?;
                    pool.retain(|c| !bounds.contains(c));
                    // A range entry also goes through the shorthand lookup below,
                    // which only matters if its text spells a class.
                    remove_shorthand(&mut pool, &item.text);
                }
                _ => remove_shorthand(&mut pool, &item.text),
            }
        }
        self.pick_char(charset, &pool)
    }

    fn pick_char(&mut self, node: &RegexNode, pool: &[char]) -> Result<char, GenerateError> {
        self.random
            .pick(pool)
            .copied()
            .ok_or(GenerateError::ExhaustedPool { offset: node.offset })
    }
}

const SURROGATE_FIRST: u32 = 0xD800;
const SURROGATE_LAST: u32 = 0xDFFF;
const SURROGATE_COUNT: u32 = SURROGATE_LAST - SURROGATE_FIRST + 1;

fn remove_shorthand(pool: &mut Vec<char>, text: &str) {
    if let Some(class) = Shorthand::from_text(text) {
        let members = class.members();
        pool.retain(|c| !members.contains(c));
    }
}

fn code_point(node: &RegexNode, code: &str, radix: u32) -> Result<char, GenerateError> {
    let value = u32::from_str_radix(code, radix).map_err(|_| GenerateError::InvalidCode {
        offset: node.offset,
        code: code.to_string(),
        radix,
    })?;
    to_char(node, value)
}

fn to_char(node: &RegexNode, value: u32) -> Result<char, GenerateError> {
    char::from_u32(value).ok_or(GenerateError::InvalidCodePoint {
        offset: node.offset,
        value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Always takes the right branch, the lowest integer and `'a'`.
    struct Lowest;

    impl RandomSource for Lowest {
        fn boolean(&mut self) -> bool {
            false
        }
        fn integer(&mut self, min: u32, _max: u32) -> u32 {
            min
        }
        fn character(&mut self) -> char {
            'a'
        }
    }

    /// Always takes the left branch, the highest integer and `'~'`.
    struct Highest;

    impl RandomSource for Highest {
        fn boolean(&mut self) -> bool {
            true
        }
        fn integer(&mut self, _min: u32, max: u32) -> u32 {
            max
        }
        fn character(&mut self) -> char {
            '~'
        }
    }

    fn low(node: &RegexNode) -> Result<String, GenerateError> {
        Generator::new(&mut Lowest).generate(node)
    }

    fn high(node: &RegexNode) -> Result<String, GenerateError> {
        Generator::new(&mut Highest).generate(node)
    }

    #[test]
    fn alternate_follows_coin() {
        let node = RegexNode::alternate(RegexNode::literal('a'), RegexNode::literal('b'));
        assert_eq!(high(&node).unwrap(), "a");
        assert_eq!(low(&node).unwrap(), "b");
    }

    #[test]
    fn unbounded_quantifier_adds_three_to_seven() {
        let star = RegexNode::quantified(RegexNode::literal('x'), RegexNode::quantifier(0, None));
        assert_eq!(low(&star).unwrap(), "");
        assert_eq!(high(&star).unwrap(), "xxxxxxx");

        let plus = RegexNode::quantified(RegexNode::literal('y'), RegexNode::quantifier(1, None));
        assert_eq!(high(&plus).unwrap(), "yyyyyyyy");
    }

    #[test]
    fn negative_min_is_clamped() {
        let node =
            RegexNode::quantified(RegexNode::literal('z'), RegexNode::quantifier(-4, Some(1)));
        assert_eq!(low(&node).unwrap(), "");
        assert_eq!(high(&node).unwrap(), "z");
    }

    #[test]
    fn inverted_bounds_fail() {
        let node =
            RegexNode::quantified(RegexNode::literal('z'), RegexNode::quantifier(5, Some(2)));
        assert_eq!(
            low(&node),
            Err(GenerateError::InvalidBounds {
                offset: 0,
                min: 5,
                max: 2
            })
        );
    }

    #[test]
    fn huge_unbounded_min_fails_cleanly() {
        let node = RegexNode::quantified(
            RegexNode::literal('a'),
            RegexNode::quantifier(i64::MAX, None),
        );
        assert_eq!(
            low(&node),
            Err(GenerateError::InvalidBounds {
                offset: 0,
                min: i64::MAX,
                max: i64::MAX
            })
        );
    }

    #[test]
    fn quantified_needs_quantifier_child() {
        let node = RegexNode::quantified(RegexNode::literal('a'), RegexNode::literal('b'));
        assert_eq!(
            low(&node),
            Err(GenerateError::NotAQuantifier {
                offset: 0,
                found: "literal"
            })
        );
    }

    #[test]
    fn unbounded_extra_is_configurable() {
        let node = RegexNode::quantified(RegexNode::literal('q'), RegexNode::quantifier(2, None));
        let config = GeneratorConfig {
            unbounded_extra: 1..=1,
            ..GeneratorConfig::default()
        };
        let out = Generator::new(&mut Highest).with_config(config).generate(&node);
        assert_eq!(out.unwrap(), "qqq");
    }

    #[test]
    fn lookaheads() {
        let positive = RegexNode::new(
            "(?=ab)",
            NodeKind::PositiveLookahead {
                body: Box::new(RegexNode::sequence(vec![
                    RegexNode::literal('a'),
                    RegexNode::literal('b'),
                ])),
            },
        );
        assert_eq!(low(&positive).unwrap(), "ab");

        let negative = RegexNode::new(
            "(?!ab)",
            NodeKind::NegativeLookahead {
                body: Box::new(RegexNode::literal('a')),
            },
        );
        assert_eq!(high(&negative).unwrap(), "");
    }

    #[test]
    fn range_picks_by_code_point() {
        let node = RegexNode::range('a', 'e');
        assert_eq!(low(&node).unwrap(), "a");
        assert_eq!(high(&node).unwrap(), "e");
    }

    #[test]
    fn range_across_surrogates_skips_them() {
        let node = RegexNode::new(
            "\\ud7ff-\\ue000",
            NodeKind::Range {
                start: Box::new(RegexNode::new(
                    "\\ud7ff",
                    NodeKind::Unicode {
                        code: "d7ff".into(),
                    },
                )),
                end: Box::new(RegexNode::new(
                    "\\ue000",
                    NodeKind::Unicode {
                        code: "e000".into(),
                    },
                )),
            },
        );
        assert_eq!(low(&node).unwrap(), "\u{D7FF}");
        assert_eq!(high(&node).unwrap(), "\u{E000}");
    }

    #[test]
    fn backwards_range_fails() {
        let node = RegexNode::range('z', 'a');
        assert_eq!(
            low(&node),
            Err(GenerateError::BackwardsRange {
                offset: 0,
                start: 'z',
                end: 'a'
            })
        );
    }

    #[test]
    fn range_endpoint_must_be_one_char() {
        let node = RegexNode::new(
            "x-",
            NodeKind::Range {
                start: Box::new(RegexNode::literal('x')),
                end: Box::new(RegexNode::token(NodeKind::Start).with_offset(2)),
            },
        );
        assert_eq!(
            low(&node),
            Err(GenerateError::InvalidRangeEndpoint {
                offset: 2,
                got: String::new()
            })
        );
    }

    #[test]
    fn numeric_escapes() {
        let unicode = RegexNode::new("\\u0041", NodeKind::Unicode { code: "0041".into() });
        let hex = RegexNode::new("\\x7e", NodeKind::Hex { code: "7e".into() });
        let octal = RegexNode::new("\\101", NodeKind::Octal { code: "101".into() });
        assert_eq!(low(&unicode).unwrap(), "A");
        assert_eq!(low(&hex).unwrap(), "~");
        assert_eq!(low(&octal).unwrap(), "A");

        let bad = RegexNode::new("\\8", NodeKind::Octal { code: "8".into() });
        assert!(matches!(
            low(&bad),
            Err(GenerateError::InvalidCode { radix: 8, .. })
        ));
        let surrogate = RegexNode::new("\\ud800", NodeKind::Unicode { code: "d800".into() });
        assert_eq!(
            low(&surrogate),
            Err(GenerateError::InvalidCodePoint {
                offset: 0,
                value: 0xD800
            })
        );
    }

    #[test]
    fn control_characters() {
        let node = RegexNode::new("\\cJ", NodeKind::ControlCharacter { code: 'J' });
        assert_eq!(low(&node).unwrap(), "\n");
        let bad = RegexNode::new("\\c1", NodeKind::ControlCharacter { code: '1' });
        assert_eq!(
            low(&bad),
            Err(GenerateError::UnknownControl {
                offset: 0,
                code: '1'
            })
        );
    }

    #[test]
    fn silent_tokens() {
        for kind in [
            NodeKind::Start,
            NodeKind::End,
            NodeKind::Backspace,
            NodeKind::WordBoundary,
            NodeKind::NonWordBoundary,
            NodeKind::FormFeed,
            NodeKind::CarriageReturn,
            NodeKind::Tab,
            NodeKind::VerticalTab,
            NodeKind::NullCharacter,
        ] {
            assert_eq!(high(&RegexNode::token(kind)).unwrap(), "");
        }
    }

    #[test]
    fn class_tokens_use_their_pools() {
        assert_eq!(low(&RegexNode::token(NodeKind::Digit)).unwrap(), "0");
        assert_eq!(high(&RegexNode::token(NodeKind::Digit)).unwrap(), "9");
        assert_eq!(low(&RegexNode::token(NodeKind::Word)).unwrap(), "a");
        assert_eq!(high(&RegexNode::token(NodeKind::NonWhiteSpace)).unwrap(), "9");
        assert_eq!(low(&RegexNode::token(NodeKind::WhiteSpace)).unwrap(), " ");
        assert_eq!(low(&RegexNode::token(NodeKind::NonWord)).unwrap(), " ");
        assert_eq!(high(&RegexNode::token(NodeKind::NonDigit)).unwrap(), "~");
        assert_eq!(low(&RegexNode::token(NodeKind::LineFeed)).unwrap(), "\n");
        assert_eq!(high(&RegexNode::token(NodeKind::AnyCharacter)).unwrap(), "~");
    }

    #[test]
    fn unknown_nodes_emit_text() {
        let node = RegexNode::new("(?<=a)", NodeKind::Unknown);
        assert_eq!(low(&node).unwrap(), "(?<=a)");
    }

    #[test]
    fn inverted_charset_removes_exclusions() {
        // [^ -}] leaves only '~'
        let node = RegexNode::charset(vec![RegexNode::range(' ', '}')], true);
        assert_eq!(low(&node).unwrap(), "~");

        let node = RegexNode::charset(
            vec![RegexNode::literal(' '), RegexNode::token(NodeKind::NonWord)],
            true,
        );
        assert_eq!(low(&node).unwrap(), "0");
    }

    #[test]
    fn exhausted_pool_fails() {
        let node = RegexNode::charset(vec![RegexNode::range(' ', '~')], true).with_offset(4);
        assert_eq!(low(&node), Err(GenerateError::ExhaustedPool { offset: 4 }));
    }

    #[test]
    fn empty_charset_fails() {
        let node = RegexNode::charset(Vec::new(), false);
        assert_eq!(low(&node), Err(GenerateError::EmptyCharset { offset: 0 }));
    }

    #[test]
    fn depth_limit() {
        let mut node = RegexNode::literal('a');
        for _ in 0..10 {
            node = RegexNode::non_capture(node);
        }
        let shallow = GeneratorConfig {
            max_depth: 5,
            ..GeneratorConfig::default()
        };
        let err = Generator::new(&mut Lowest).with_config(shallow).generate(&node);
        assert_eq!(err, Err(GenerateError::TooDeep { offset: 0, limit: 5 }));
        assert_eq!(low(&node).unwrap(), "a");
    }
}
