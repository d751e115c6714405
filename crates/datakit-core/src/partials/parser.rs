//! Partial path parser
//!
//! Turns flat selector paths such as `songs.name`, `songs.{name,artist}` or
//! `*` into a [`PartialTree`]. Whitespace is ignored; every other malformed
//! input (empty segments, unbalanced or nested braces) is rejected with the
//! position of the problem.
//!
//! Copyright (c) 2025 Datakit Team
//! Licensed under the Apache-2.0 license

use super::error::{PartialsError, PartialsResult};
use super::tree::PartialTree;
use std::iter::Peekable;
use std::str::Chars;

/// One dot-separated piece of a path
#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Field(String),
    Wildcard,
    /// `{a,b}`: sibling alternatives sharing the remaining suffix
    Group(Vec<Segment>),
}

/// Parser for include/exclude/only/except paths
pub struct PartialsParser;

impl PartialsParser {
    /// Parse `paths` into one tree.
    ///
    /// An empty list yields `None` (unset), which is distinct from a tree
    /// selecting nothing. Duplicate paths are idempotent.
    pub fn parse<I, S>(paths: I) -> PartialsResult<Option<PartialTree>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut tree: Option<PartialTree> = None;

        for path in paths {
            let segments = PathScanner::new(path.as_ref()).scan()?;
            let parsed = Self::build(&segments);
            tree = Some(match tree {
                Some(existing) => existing.merge(parsed),
                None => parsed,
            });
        }

        Ok(tree)
    }

    fn build(segments: &[Segment]) -> PartialTree {
        match segments.split_first() {
            Some((first, rest)) => Self::build_segment(first, rest),
            None => PartialTree::empty(),
        }
    }

    fn build_segment(segment: &Segment, rest: &[Segment]) -> PartialTree {
        match segment {
            Segment::Field(name) => PartialTree::field(name.clone(), Self::build(rest)),
            Segment::Wildcard => {
                PartialTree::wildcard((!rest.is_empty()).then(|| Self::build(rest)))
            }
            Segment::Group(alternatives) => alternatives
                .iter()
                .map(|alternative| Self::build_segment(alternative, rest))
                .reduce(PartialTree::merge)
                .unwrap_or_default(),
        }
    }
}

/// Character-level scanner for a single path
struct PathScanner {
    input: String,
    position: usize,
}

impl PathScanner {
    fn new(path: &str) -> Self {
        Self {
            input: path.to_string(),
            position: 0,
        }
    }

    fn scan(mut self) -> PartialsResult<Vec<Segment>> {
        let input = std::mem::take(&mut self.input);
        let mut chars = input.chars().peekable();
        let mut segments = Vec::new();

        loop {
            self.skip_whitespace(&mut chars);
            let segment = match chars.peek().copied() {
                Some('{') => self.scan_group(&mut chars, &input)?,
                Some(_) => self.scan_field(&mut chars, &input)?,
                None => {
                    return Err(PartialsError::parse(
                        "Expected a field name but reached end of input",
                        self.position,
                        input.as_str(),
                    ))
                }
            };
            segments.push(segment);

            self.skip_whitespace(&mut chars);
            match chars.peek().copied() {
                None => break,
                Some('.') => self.advance(&mut chars),
                Some(ch) => {
                    return Err(PartialsError::syntax(
                        "Unexpected character after segment",
                        self.position,
                        input.as_str(),
                        vec![".".to_string(), "end of input".to_string()],
                        ch.to_string(),
                    ))
                }
            }
        }

        Ok(segments)
    }

    fn scan_field(&mut self, chars: &mut Peekable<Chars<'_>>, input: &str) -> PartialsResult<Segment> {
        let name = self.scan_name(chars, input)?;
        if name.is_empty() {
            let found = chars.peek().map(|c| c.to_string()).unwrap_or_else(|| "EOF".to_string());
            return Err(PartialsError::syntax(
                "Empty segment",
                self.position,
                input,
                vec!["field name".to_string(), "*".to_string(), "{".to_string()],
                found,
            ));
        }
        Ok(Self::segment_for(name))
    }

    fn scan_group(&mut self, chars: &mut Peekable<Chars<'_>>, input: &str) -> PartialsResult<Segment> {
        let start = self.position;
        self.advance(chars); // consume '{'

        let mut alternatives = Vec::new();
        loop {
            let name = self.scan_name(chars, input)?;
            match chars.peek().copied() {
                Some(',') | Some('}') if name.is_empty() => {
                    return Err(PartialsError::parse("Empty field in group", self.position, input));
                }
                Some(',') => {
                    alternatives.push(Self::segment_for(name));
                    self.advance(chars);
                }
                Some('}') => {
                    alternatives.push(Self::segment_for(name));
                    self.advance(chars);
                    return Ok(Segment::Group(alternatives));
                }
                Some('{') => {
                    return Err(PartialsError::parse("Nested braces are not supported", self.position, input));
                }
                Some(ch) => {
                    return Err(PartialsError::syntax(
                        "Unexpected character inside braces",
                        self.position,
                        input,
                        vec![",".to_string(), "}".to_string()],
                        ch.to_string(),
                    ));
                }
                None => return Err(PartialsError::parse("Unclosed '{'", start, input)),
            }
        }
    }

    /// Read a name up to the next structural character
    ///
    /// Whitespace may surround the name but not split it.
    fn scan_name(&mut self, chars: &mut Peekable<Chars<'_>>, input: &str) -> PartialsResult<String> {
        self.skip_whitespace(chars);

        let mut name = String::new();
        while let Some(&ch) = chars.peek() {
            if matches!(ch, '.' | '{' | '}' | ',') || ch.is_whitespace() {
                break;
            }
            name.push(ch);
            self.advance(chars);
        }

        let gap = self.position;
        self.skip_whitespace(chars);
        match chars.peek() {
            Some(&ch) if !name.is_empty() && !matches!(ch, '.' | '{' | '}' | ',') => Err(PartialsError::syntax(
                "Whitespace inside a field name",
                gap,
                input,
                vec![".".to_string(), ",".to_string(), "}".to_string()],
                ch.to_string(),
            )),
            _ => Ok(name),
        }
    }

    fn skip_whitespace(&mut self, chars: &mut Peekable<Chars<'_>>) {
        while chars.peek().is_some_and(|ch| ch.is_whitespace()) {
            self.advance(chars);
        }
    }

    fn segment_for(name: String) -> Segment {
        if name == "*" {
            Segment::Wildcard
        } else {
            Segment::Field(name)
        }
    }

    fn advance(&mut self, chars: &mut Peekable<Chars<'_>>) {
        if let Some(ch) = chars.next() {
            self.position += ch.len_utf8();
        }
    }
}
