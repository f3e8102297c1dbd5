#![forbid(unsafe_code)]

//! A small CSS selector engine for [`MemoryDocument`](crate::MemoryDocument).
//!
//! Supports selector lists of compound selectors built from a type selector
//! (or `*`), `#id`, `.class`, `[attr]`, and `[attr=value]` with bare, single-,
//! or double-quoted values. Combinators and pseudo-classes are not supported;
//! a selector using them fails to parse and matches nothing.

use std::iter::Peekable;
use std::str::Chars;

/// One simple selector inside a compound.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    Universal,
    Tag(String),
    Id(String),
    Class(String),
    Attribute { name: String, value: Option<String> },
}

/// Simple selectors that must all match the same element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compound(pub Vec<SimpleSelector>);

/// Comma-separated alternatives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectorList(pub Vec<Compound>);

impl SelectorList {
    /// Parse `input`, returning `None` for anything outside the supported
    /// subset.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let mut parser = Parser {
            chars: input.chars().peekable(),
        };
        let mut compounds = Vec::new();
        loop {
            parser.skip_whitespace();
            compounds.push(parser.compound()?);
            parser.skip_whitespace();
            match parser.chars.next() {
                None => break,
                Some(',') => {}
                Some(_) => return None,
            }
        }
        Some(Self(compounds))
    }

    /// Whether an element with `tag` and attribute lookup `attr` matches any
    /// alternative.
    pub fn matches<'a>(&self, tag: &str, attr: impl Fn(&str) -> Option<&'a str>) -> bool {
        self.0
            .iter()
            .any(|compound| compound.0.iter().all(|simple| simple.matches(tag, &attr)))
    }
}

impl SimpleSelector {
    fn matches<'a>(&self, tag: &str, attr: &impl Fn(&str) -> Option<&'a str>) -> bool {
        match self {
            Self::Universal => true,
            Self::Tag(name) => name.eq_ignore_ascii_case(tag),
            Self::Id(id) => attr("id") == Some(id.as_str()),
            Self::Class(class) => {
                attr("class").is_some_and(|classes| classes.split_whitespace().any(|c| c == class))
            }
            Self::Attribute { name, value: None } => attr(name).is_some(),
            Self::Attribute {
                name,
                value: Some(value),
            } => attr(name) == Some(value.as_str()),
        }
    }
}

struct Parser<'a> {
    chars: Peekable<Chars<'a>>,
}

impl Parser<'_> {
    fn skip_whitespace(&mut self) {
        while self.chars.next_if(|c| c.is_whitespace()).is_some() {}
    }

    fn ident(&mut self) -> Option<String> {
        let mut out = String::new();
        while let Some(c) = self.chars.next_if(|c| is_ident_char(*c)) {
            out.push(c);
        }
        (!out.is_empty()).then_some(out)
    }

    fn compound(&mut self) -> Option<Compound> {
        let mut parts = Vec::new();
        match self.chars.peek() {
            Some('*') => {
                self.chars.next();
                parts.push(SimpleSelector::Universal);
            }
            Some(c) if is_ident_char(*c) => {
                parts.push(SimpleSelector::Tag(self.ident()?.to_ascii_lowercase()));
            }
            _ => {}
        }
        while let Some(&c) = self.chars.peek() {
            match c {
                '#' => {
                    self.chars.next();
                    parts.push(SimpleSelector::Id(self.ident()?));
                }
                '.' => {
                    self.chars.next();
                    parts.push(SimpleSelector::Class(self.ident()?));
                }
                '[' => {
                    self.chars.next();
                    parts.push(self.attribute()?);
                }
                _ => break,
            }
        }
        (!parts.is_empty()).then_some(Compound(parts))
    }

    fn attribute(&mut self) -> Option<SimpleSelector> {
        self.skip_whitespace();
        let name = self.ident()?;
        self.skip_whitespace();
        match self.chars.next()? {
            ']' => Some(SimpleSelector::Attribute { name, value: None }),
            '=' => {
                self.skip_whitespace();
                let value = match *self.chars.peek()? {
                    quote @ ('"' | '\'') => {
                        self.chars.next();
                        let mut out = String::new();
                        loop {
                            let c = self.chars.next()?;
                            if c == quote {
                                break;
                            }
                            out.push(c);
                        }
                        out
                    }
                    _ => self.ident()?,
                };
                self.skip_whitespace();
                if self.chars.next()? != ']' {
                    return None;
                }
                Some(SimpleSelector::Attribute {
                    name,
                    value: Some(value),
                })
            }
            _ => None,
        }
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_'
}
