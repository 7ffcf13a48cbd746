//! CSS Selector subset
//!
//! Selector lists of compound selectors (type, `*`, `#id`, `.class`,
//! attribute selectors) joined by descendant or child combinators.
//! Pseudo-classes and sibling combinators are rejected at parse time.

use std::str::FromStr;

use crate::{DomError, DomResult, DomTree, ElementData, NodeId};

/// Comma separated list; matches if any member matches
#[derive(Debug, Clone, PartialEq)]
pub struct SelectorList(pub Vec<ComplexSelector>);

/// Compounds joined by combinators, `combinators[i]` sits between
/// `compounds[i]` and `compounds[i + 1]`
#[derive(Debug, Clone, PartialEq)]
pub struct ComplexSelector {
    pub compounds: Vec<CompoundSelector>,
    pub combinators: Vec<Combinator>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// `a b`
    Descendant,
    /// `a > b`
    Child,
}

/// Simple selectors that must all match the same element
#[derive(Debug, Clone, PartialEq)]
pub struct CompoundSelector(pub Vec<SimpleSelector>);

#[derive(Debug, Clone, PartialEq)]
pub enum SimpleSelector {
    /// `*`
    Universal,
    /// Tag name, stored lowercased
    Type(String),
    /// `#id`
    Id(String),
    /// `.class`
    Class(String),
    /// `[attr]`, `[attr=value]`, etc.
    Attribute(AttributeSelector),
}

/// Attribute selector
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeSelector {
    pub name: String,
    pub matcher: Option<AttributeMatcher>,
    pub case_insensitive: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum AttributeMatcher {
    /// `[attr=value]` - exact match
    Exact(String),
    /// `[attr~=value]` - whitespace-separated list contains
    Contains(String),
    /// `[attr|=value]` - exact or prefix with hyphen
    DashMatch(String),
    /// `[attr^=value]` - starts with
    Prefix(String),
    /// `[attr$=value]` - ends with
    Suffix(String),
    /// `[attr*=value]` - contains substring
    Substring(String),
}

impl AttributeSelector {
    /// Check an attribute value (None = attribute absent)
    pub fn matches(&self, value: Option<&str>) -> bool {
        let (matcher, value) = match (&self.matcher, value) {
            (_, None) => return false,
            (None, Some(_)) => return true,
            (Some(m), Some(v)) => (m, v),
        };

        let fold = |s: &str| {
            if self.case_insensitive {
                s.to_lowercase()
            } else {
                s.to_string()
            }
        };
        let val = fold(value);

        match matcher {
            AttributeMatcher::Exact(expected) => val == fold(expected),
            AttributeMatcher::Contains(expected) => {
                let expected = fold(expected);
                val.split_whitespace().any(|w| w == expected)
            }
            AttributeMatcher::DashMatch(expected) => {
                let expected = fold(expected);
                val == expected || val.starts_with(&format!("{}-", expected))
            }
            AttributeMatcher::Prefix(expected) => !expected.is_empty() && val.starts_with(&fold(expected)),
            AttributeMatcher::Suffix(expected) => !expected.is_empty() && val.ends_with(&fold(expected)),
            AttributeMatcher::Substring(expected) => !expected.is_empty() && val.contains(&fold(expected)),
        }
    }
}

impl SimpleSelector {
    fn matches(&self, elem: &ElementData) -> bool {
        match self {
            SimpleSelector::Universal => true,
            SimpleSelector::Type(tag) => elem.tag_name.eq_ignore_ascii_case(tag),
            SimpleSelector::Id(id) => elem.id() == Some(id.as_str()),
            SimpleSelector::Class(class) => elem.has_class(class),
            SimpleSelector::Attribute(attr) => attr.matches(elem.attrs.get(&attr.name)),
        }
    }
}

impl CompoundSelector {
    /// Non-element nodes never match
    pub fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        match tree.element(id) {
            Ok(elem) => self.0.iter().all(|s| s.matches(elem)),
            Err(_) => false,
        }
    }
}

impl ComplexSelector {
    pub fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        match self.compounds.len() {
            0 => false,
            n => self.matches_from(tree, id, n - 1),
        }
    }

    fn matches_from(&self, tree: &DomTree, id: NodeId, idx: usize) -> bool {
        if !self.compounds[idx].matches(tree, id) {
            return false;
        }
        if idx == 0 {
            return true;
        }

        let parent_of = |n: NodeId| tree.get(n).map_or(NodeId::NONE, |node| node.parent);
        match self.combinators[idx - 1] {
            Combinator::Child => {
                let parent = parent_of(id);
                parent.is_valid() && self.matches_from(tree, parent, idx - 1)
            }
            Combinator::Descendant => {
                let mut ancestor = parent_of(id);
                while ancestor.is_valid() {
                    if self.matches_from(tree, ancestor, idx - 1) {
                        return true;
                    }
                    ancestor = parent_of(ancestor);
                }
                false
            }
        }
    }
}

impl SelectorList {
    pub fn parse(selector: &str) -> DomResult<Self> {
        Parser::new(selector).parse_list()
    }

    pub fn matches(&self, tree: &DomTree, id: NodeId) -> bool {
        self.0.iter().any(|complex| complex.matches(tree, id))
    }

    /// Matching descendants of `root` in document order
    pub fn query_all(&self, tree: &DomTree, root: NodeId) -> Vec<NodeId> {
        tree.descendants(root)
            .into_iter()
            .filter(|&id| self.matches(tree, id))
            .collect()
    }

    /// First matching descendant of `root`
    pub fn query_first(&self, tree: &DomTree, root: NodeId) -> Option<NodeId> {
        tree.descendants(root)
            .into_iter()
            .find(|&id| self.matches(tree, id))
    }
}

impl FromStr for SelectorList {
    type Err = DomError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

struct Parser<'a> {
    source: &'a str,
    chars: Vec<char>,
    pos: usize,
}

impl<'a> Parser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars: source.chars().collect(),
            pos: 0,
        }
    }

    fn error(&self, reason: impl Into<String>) -> DomError {
        DomError::invalid_selector(self.source, reason)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        Some(c)
    }

    fn expect(&mut self, expected: char) -> DomResult<()> {
        match self.bump() {
            Some(c) if c == expected => Ok(()),
            Some(c) => Err(self.error(format!("expected '{}', found '{}'", expected, c))),
            None => Err(self.error(format!("expected '{}', found end of input", expected))),
        }
    }

    /// Returns true if any whitespace was skipped
    fn skip_whitespace(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn parse_list(&mut self) -> DomResult<SelectorList> {
        let mut list = Vec::new();
        loop {
            self.skip_whitespace();
            list.push(self.parse_complex()?);
            self.skip_whitespace();
            match self.bump() {
                None => break,
                Some(',') => continue,
                Some(c) => return Err(self.error(format!("unexpected '{}'", c))),
            }
        }
        Ok(SelectorList(list))
    }

    fn parse_complex(&mut self) -> DomResult<ComplexSelector> {
        let mut compounds = vec![self.parse_compound()?];
        let mut combinators = Vec::new();

        loop {
            let had_space = self.skip_whitespace();
            let combinator = match self.peek() {
                None | Some(',') => break,
                Some('>') => {
                    self.bump();
                    self.skip_whitespace();
                    Combinator::Child
                }
                Some(c @ ('+' | '~')) => {
                    return Err(self.error(format!("combinator '{}' is not supported", c)));
                }
                Some(_) if had_space => Combinator::Descendant,
                Some(c) => return Err(self.error(format!("unexpected '{}'", c))),
            };
            combinators.push(combinator);
            compounds.push(self.parse_compound()?);
        }

        Ok(ComplexSelector { compounds, combinators })
    }

    fn parse_compound(&mut self) -> DomResult<CompoundSelector> {
        let mut parts = Vec::new();
        loop {
            let part = match self.peek() {
                Some('*') => {
                    self.bump();
                    SimpleSelector::Universal
                }
                Some('#') => {
                    self.bump();
                    SimpleSelector::Id(self.parse_ident()?)
                }
                Some('.') => {
                    self.bump();
                    SimpleSelector::Class(self.parse_ident()?)
                }
                Some('[') => SimpleSelector::Attribute(self.parse_attribute()?),
                Some(':') => return Err(self.error("pseudo-classes are not supported")),
                Some(c) if is_ident_char(c) && parts.is_empty() => {
                    SimpleSelector::Type(self.parse_ident()?.to_ascii_lowercase())
                }
                _ => break,
            };
            parts.push(part);
        }

        if parts.is_empty() {
            return Err(match self.peek() {
                Some(c) => self.error(format!("expected selector, found '{}'", c)),
                None => self.error("expected selector, found end of input"),
            });
        }
        Ok(CompoundSelector(parts))
    }

    fn parse_ident(&mut self) -> DomResult<String> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.pos += 1;
        }
        if self.pos == start {
            return Err(self.error("expected identifier"));
        }
        Ok(self.chars[start..self.pos].iter().collect())
    }

    fn parse_attribute(&mut self) -> DomResult<AttributeSelector> {
        self.expect('[')?;
        self.skip_whitespace();
        let name = self.parse_ident()?.to_ascii_lowercase();
        self.skip_whitespace();

        let op = match self.peek() {
            Some(']') => {
                self.bump();
                return Ok(AttributeSelector {
                    name,
                    matcher: None,
                    case_insensitive: false,
                });
            }
            Some('=') => {
                self.bump();
                '='
            }
            Some(c @ ('~' | '|' | '^' | '$' | '*')) => {
                self.bump();
                self.expect('=')?;
                c
            }
            Some(c) => return Err(self.error(format!("unexpected '{}' in attribute selector", c))),
            None => return Err(self.error("unterminated attribute selector")),
        };

        self.skip_whitespace();
        let value = match self.peek() {
            Some(q @ ('"' | '\'')) => self.parse_quoted(q)?,
            _ => self.parse_ident()?,
        };
        self.skip_whitespace();

        let case_insensitive = match self.peek() {
            Some('i' | 'I') => {
                self.bump();
                self.skip_whitespace();
                true
            }
            Some('s' | 'S') => {
                self.bump();
                self.skip_whitespace();
                false
            }
            _ => false,
        };
        self.expect(']')?;

        let matcher = match op {
            '=' => AttributeMatcher::Exact(value),
            '~' => AttributeMatcher::Contains(value),
            '|' => AttributeMatcher::DashMatch(value),
            '^' => AttributeMatcher::Prefix(value),
            '$' => AttributeMatcher::Suffix(value),
            _ => AttributeMatcher::Substring(value),
        };
        Ok(AttributeSelector {
            name,
            matcher: Some(matcher),
            case_insensitive,
        })
    }

    fn parse_quoted(&mut self, quote: char) -> DomResult<String> {
        self.expect(quote)?;
        let mut value = String::new();
        loop {
            match self.bump() {
                Some(c) if c == quote => return Ok(value),
                Some('\\') => match self.bump() {
                    Some(c) => value.push(c),
                    None => break,
                },
                Some(c) => value.push(c),
                None => break,
            }
        }
        Err(self.error("unterminated string"))
    }
}

fn is_ident_char(c: char) -> bool {
    c.is_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn compound(selector: &str) -> Vec<SimpleSelector> {
        let mut list = SelectorList::parse(selector).unwrap();
        list.0.remove(0).compounds.remove(0).0
    }

    #[test]
    fn test_parse_simple() {
        assert_eq!(compound("div"), vec![SimpleSelector::Type("div".into())]);
        assert_eq!(compound("#test"), vec![SimpleSelector::Id("test".into())]);
        assert_eq!(compound(".note"), vec![SimpleSelector::Class("note".into())]);
        assert_eq!(compound("*"), vec![SimpleSelector::Universal]);
    }

    #[test]
    fn test_parse_attribute_presence() {
        let parts = compound("[data-placeholder]");
        assert_eq!(
            parts,
            vec![SimpleSelector::Attribute(AttributeSelector {
                name: "data-placeholder".into(),
                matcher: None,
                case_insensitive: false,
            })]
        );
    }

    #[test]
    fn test_parse_attribute_operators() {
        let parts = compound(r#"div[lang|=en][title*='a b' i]"#);
        assert_eq!(parts.len(), 3);
        match &parts[2] {
            SimpleSelector::Attribute(attr) => {
                assert_eq!(attr.matcher, Some(AttributeMatcher::Substring("a b".into())));
                assert!(attr.case_insensitive);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_parse_list_and_combinators() {
        let list = SelectorList::parse("main > .a span, #b").unwrap();
        assert_eq!(list.0.len(), 2);
        assert_eq!(
            list.0[0].combinators,
            vec![Combinator::Child, Combinator::Descendant]
        );
    }

    #[test]
    fn test_parse_errors() {
        for bad in ["", "div,", "a + b", "a:hover", "[x", "[x=\"y]", "#", "div!"] {
            assert!(
                matches!(SelectorList::parse(bad), Err(DomError::InvalidSelector { .. })),
                "expected error for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_attribute_matchers() {
        let sel = |m: AttributeMatcher, ci: bool| AttributeSelector {
            name: "x".into(),
            matcher: Some(m),
            case_insensitive: ci,
        };

        assert!(sel(AttributeMatcher::Exact("true".into()), false).matches(Some("true")));
        assert!(!sel(AttributeMatcher::Exact("true".into()), false).matches(Some("TRUE")));
        assert!(sel(AttributeMatcher::Exact("true".into()), true).matches(Some("TRUE")));
        assert!(sel(AttributeMatcher::Contains("b".into()), false).matches(Some("a b c")));
        assert!(sel(AttributeMatcher::DashMatch("en".into()), false).matches(Some("en-US")));
        assert!(sel(AttributeMatcher::Prefix("btn-".into()), false).matches(Some("btn-primary")));
        assert!(!sel(AttributeMatcher::Suffix("".into()), false).matches(Some("x")));
        assert!(!sel(AttributeMatcher::Exact("".into()), false).matches(None));
    }

    #[test]
    fn test_match_in_tree() {
        let mut tree = DomTree::new();
        let main = tree.create_element("main");
        let div = tree.create_element("div");
        let span = tree.create_element("span");
        tree.append_child(tree.root(), main).unwrap();
        tree.append_child(main, div).unwrap();
        tree.append_child(div, span).unwrap();
        tree.set_attribute(span, "data-placeholder", "hi").unwrap();

        let descendant = SelectorList::parse("main [data-placeholder]").unwrap();
        let child = SelectorList::parse("main > [data-placeholder]").unwrap();

        assert_eq!(descendant.query_all(&tree, tree.root()), vec![span]);
        assert!(child.query_all(&tree, tree.root()).is_empty());
        assert_eq!(
            SelectorList::parse("div, span").unwrap().query_all(&tree, tree.root()),
            vec![div, span]
        );
    }
}
