//! Field annotation parsing and the option chain.
//!
//! An annotation has the form `KEY;name=value;name=value`. The key is split
//! off by [`split_annotation`]; the remaining segments become a
//! [`TagOption`] chain. Options run in priority order rather than declaration
//! order so a default is always substituted before the value is split.

use std::fmt;

use crate::error::OptionError;

/// Separates the key and option segments of an annotation.
pub const SEMICOLON: char = ';';
/// Separates an option name from its value.
pub const EQUAL: char = '=';
/// Delimiter used when a collection field does not configure one.
pub const DEFAULT_DELIMITER: &str = ",";

/// Option name that supplies a fallback for empty values.
pub const DEFAULT_OPTION: &str = "default";
/// Option name that sets the collection delimiter.
pub const DELIMITER_OPTION: &str = "delimiter";
/// Escape in a delimiter value that stands for a single space.
pub const SPACE_ESCAPE: &str = "\\s";
/// Escape in a delimiter value that stands for a tab.
pub const TAB_ESCAPE: &str = "\\t";

const DEFAULT_PRIORITY: u8 = 0;
const DELIMITER_PRIORITY: u8 = 100;

/// A value-transforming extension that can join an option chain.
///
/// Built-in options cover defaults and delimiters; implement this trait to
/// add new transformations and attach them with [`TagOption::push`].
pub trait Modifier: fmt::Debug + Send + Sync {
    /// Name used in error messages and equality checks.
    fn name(&self) -> &str;

    /// Position in the chain; lower values run first.
    ///
    /// Defaults run at 0 and delimiters at 100.
    fn priority(&self) -> u8 {
        50
    }

    /// Transform `value` before it reaches the next option.
    ///
    /// # Errors
    ///
    /// Returns an [`OptionError`] when the value cannot be transformed. The
    /// error aborts the field's load.
    fn apply(&self, value: String) -> Result<String, OptionError>;
}

/// One modifier in a chain.
#[derive(Debug)]
#[non_exhaustive]
pub enum OptionKind {
    /// Substitute the configured string when the incoming value is empty.
    Default(String),
    /// Split the value on the configured delimiter, ending the chain.
    Delimiter(String),
    /// A caller-supplied modifier.
    Custom(Box<dyn Modifier>),
}

impl OptionKind {
    fn priority(&self) -> u8 {
        match self {
            Self::Default(_) => DEFAULT_PRIORITY,
            Self::Delimiter(_) => DELIMITER_PRIORITY,
            Self::Custom(modifier) => modifier.priority(),
        }
    }
}

impl PartialEq for OptionKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Default(a), Self::Default(b)) | (Self::Delimiter(a), Self::Delimiter(b)) => {
                a == b
            }
            (Self::Custom(a), Self::Custom(b)) => a.name() == b.name(),
            _ => false,
        }
    }
}

impl fmt::Display for OptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default(value) => write!(f, "{DEFAULT_OPTION}={value}"),
            Self::Delimiter(value) => write!(f, "{DELIMITER_OPTION}={value}"),
            Self::Custom(modifier) => f.write_str(modifier.name()),
        }
    }
}

/// Output of an option chain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// The chain finished with a single string.
    Single(String),
    /// A delimiter split the value.
    List(Vec<String>),
}

/// Head of an owned, singly linked option chain.
#[derive(Debug, PartialEq)]
pub struct TagOption {
    kind: OptionKind,
    next: Option<Box<TagOption>>,
}

impl TagOption {
    /// Create a single-link chain.
    #[must_use]
    pub const fn new(kind: OptionKind) -> Self {
        Self { kind, next: None }
    }

    /// Shorthand for a [`OptionKind::Default`] link.
    #[must_use]
    pub fn default_value(value: impl Into<String>) -> Self {
        Self::new(OptionKind::Default(value.into()))
    }

    /// Shorthand for a [`OptionKind::Delimiter`] link.
    #[must_use]
    pub fn delimiter(value: impl Into<String>) -> Self {
        Self::new(OptionKind::Delimiter(value.into()))
    }

    /// Shorthand for a [`OptionKind::Custom`] link.
    #[must_use]
    pub fn custom(modifier: impl Modifier + 'static) -> Self {
        Self::new(OptionKind::Custom(Box::new(modifier)))
    }

    /// The modifier held by this link.
    #[must_use]
    pub const fn kind(&self) -> &OptionKind {
        &self.kind
    }

    /// The following link, if any.
    #[must_use]
    pub fn next(&self) -> Option<&Self> {
        self.next.as_deref()
    }

    /// Replace the following link.
    pub fn set_next(&mut self, next: Option<Self>) {
        self.next = next.map(Box::new);
    }

    /// Iterate over the modifiers in application order.
    pub fn iter(&self) -> impl Iterator<Item = &OptionKind> {
        std::iter::successors(Some(self), |link| link.next()).map(Self::kind)
    }

    /// Insert `option` into `chain`, keeping the chain priority ordered.
    ///
    /// Links with equal priority keep insertion order.
    #[must_use]
    pub fn push(chain: Option<Self>, option: Self) -> Self {
        let mut links = chain.map(Self::into_links).unwrap_or_default();
        links.extend(option.into_links());
        link(links).unwrap_or_else(|| Self::default_value(""))
    }

    /// Append the comma delimiter unless the chain already splits.
    #[must_use]
    pub fn ensure_delimiter(chain: Option<Self>) -> Self {
        match chain {
            Some(chain)
                if chain
                    .iter()
                    .any(|kind| matches!(kind, OptionKind::Delimiter(_))) =>
            {
                chain
            }
            other => Self::push(other, Self::delimiter(DEFAULT_DELIMITER)),
        }
    }

    /// Run `value` through every link.
    ///
    /// # Errors
    ///
    /// Returns the first [`OptionError`] raised by a custom modifier.
    pub fn apply(&self, mut value: String) -> Result<Applied, OptionError> {
        let mut current = Some(self);
        while let Some(option) = current {
            match &option.kind {
                OptionKind::Default(fallback) => {
                    if value.is_empty() {
                        value.clone_from(fallback);
                    }
                }
                OptionKind::Delimiter(delimiter) => {
                    return Ok(Applied::List(split(&value, delimiter)));
                }
                OptionKind::Custom(modifier) => value = modifier.apply(value)?,
            }
            current = option.next();
        }
        Ok(Applied::Single(value))
    }

    fn into_links(self) -> Vec<Self> {
        let mut links = Vec::new();
        let mut current = Some(self);
        while let Some(mut option) = current {
            current = option.next.take().map(|next| *next);
            links.push(option);
        }
        links
    }
}

impl fmt::Display for TagOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, kind) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{kind}")?;
        }
        Ok(())
    }
}

/// Sort `links` by priority and chain them together.
fn link(mut links: Vec<TagOption>) -> Option<TagOption> {
    links.sort_by_key(|option| option.kind.priority());
    links.into_iter().rev().fold(None, |next, mut option| {
        option.set_next(next);
        Some(option)
    })
}

/// Split `value` on `delimiter`, falling back to a comma when it is empty.
///
/// An empty value yields no elements.
fn split(value: &str, delimiter: &str) -> Vec<String> {
    if value.is_empty() {
        return Vec::new();
    }
    let delimiter = if delimiter.is_empty() {
        DEFAULT_DELIMITER
    } else {
        delimiter
    };
    value.split(delimiter).map(str::to_owned).collect()
}

/// Parse the option segments that follow the key.
///
/// Segments, names and values are trimmed. A delimiter made of whitespace
/// is written with the `\s` and `\t` escapes. Unknown option names are
/// ignored. Returns `None` when no recognised
/// option is present.
#[must_use]
pub fn parse_options(raw: &str) -> Option<TagOption> {
    let options = raw
        .split(SEMICOLON)
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .filter_map(parse_segment)
        .collect();
    link(options)
}

fn parse_segment(segment: &str) -> Option<TagOption> {
    let (name, value) = segment.split_once(EQUAL).unwrap_or((segment, ""));
    let value = value.trim();
    match name.trim() {
        DEFAULT_OPTION => Some(TagOption::default_value(value)),
        DELIMITER_OPTION => Some(TagOption::delimiter(unescape_delimiter(value))),
        unknown => {
            tracing::trace!(option = unknown, "ignoring unknown annotation option");
            None
        }
    }
}

fn unescape_delimiter(value: &str) -> String {
    value.replace(SPACE_ESCAPE, " ").replace(TAB_ESCAPE, "\t")
}

/// Split an annotation into its key and option chain.
///
/// ```
/// use env_config::tag::{split_annotation, OptionKind};
///
/// let (key, options) = split_annotation("PORT;default=8080");
/// assert_eq!(key, "PORT");
/// let options = options.expect("default option");
/// assert_eq!(options.kind(), &OptionKind::Default("8080".to_owned()));
/// ```
#[must_use]
pub fn split_annotation(annotation: &str) -> (&str, Option<TagOption>) {
    match annotation.split_once(SEMICOLON) {
        Some((key, rest)) => (key.trim(), parse_options(rest)),
        None => (annotation.trim(), None),
    }
}
