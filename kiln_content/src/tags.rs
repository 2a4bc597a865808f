//! Resource tags are dot-separated qualifiers embedded in file and directory
//! names, e.g. `Image.high.png` or `GUI/Med.Wide/`. They select a build
//! variant and are folded into the output file name.
//!
//! The tag region of a file name is everything strictly between the first and
//! the last `.`:
//!
//! | Name                 | Base    | Tags       | Extension |
//! |----------------------|---------|------------|-----------|
//! | `Image.png`          | `Image` |            | `.png`    |
//! | `Image.high.png`     | `Image` | `high`     | `.png`    |
//! | `Image.Med.Wide.png` | `Image` | `med.wide` | `.png`    |

use std::fmt::{self, Formatter};

use kiln_shared::itertools::Itertools;

/// Tag that marks assets shared by all variants. It is never written to an output name.
pub const COMMON_TAG: &str = "common";

/// Ordered sequence of lowercase tag tokens. The empty [`TagString`] means "no tag".
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TagString(Vec<String>);

impl TagString {
    /// Parses a dotted tag string. Tokens are lowercased and empty tokens are dropped.
    ///
    /// # Example
    ///
    /// ```rust
    /// use kiln_content::tags::TagString;
    /// let tags = TagString::parse("Med.Wide");
    /// assert_eq!(tags.tokens(), ["med", "wide"]);
    /// assert_eq!(tags.to_string(), "med.wide");
    /// ```
    pub fn parse(dotted: &str) -> Self {
        Self(
            dotted
                .split('.')
                .filter(|token| !token.is_empty())
                .map(|token| token.to_lowercase())
                .collect(),
        )
    }

    /// Creates the empty [`TagString`].
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn tokens(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Whether one of the tokens equals `token`, ignoring case.
    pub fn contains(&self, token: &str) -> bool {
        let token = token.to_lowercase();
        self.0.iter().any(|t| *t == token)
    }

    /// Appends the tokens of `other` after the tokens of `self`.
    pub fn chain(mut self, other: &TagString) -> Self {
        self.0.extend(other.0.iter().cloned());
        self
    }

    /// Tokens that end up in output names, i.e. everything except [`COMMON_TAG`].
    pub fn without_common(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str).filter(|token| *token != COMMON_TAG)
    }
}

impl fmt::Display for TagString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.iter().join("."))
    }
}

impl From<&str> for TagString {
    fn from(value: &str) -> Self {
        Self::parse(value)
    }
}

/// Byte positions of the first and the last `.` if the name has a tag region.
fn tag_region(name: &str) -> Option<(usize, usize)> {
    let first = name.find('.')?;
    let last = name.rfind('.')?;
    (first != last).then_some((first, last))
}

/// Returns the tags between the first and the last `.` of `name`.
///
/// # Example
///
/// ```rust
/// use kiln_content::tags::extract_tags;
/// assert_eq!(extract_tags("Image.png").to_string(), "");
/// assert_eq!(extract_tags("Image.High.png").to_string(), "high");
/// assert_eq!(extract_tags("Image.med.wide.png").to_string(), "med.wide");
/// ```
pub fn extract_tags(name: &str) -> TagString {
    match tag_region(name) {
        Some((first, last)) => TagString::parse(&name[first + 1..last]),
        None => TagString::empty(),
    }
}

/// Removes the tag region from `name` and keeps the base name and the final extension.
///
/// # Example
///
/// ```rust
/// use kiln_content::tags::strip_tags;
/// assert_eq!(strip_tags("Image.med.wide.png"), "Image.png");
/// assert_eq!(strip_tags("Image.png"), "Image.png");
/// ```
pub fn strip_tags(name: &str) -> String {
    match tag_region(name) {
        Some((first, last)) => format!("{}{}", &name[..first], &name[last..]),
        None => name.to_owned(),
    }
}

/// Whether the tags of `name` are equal to `tags`, ignoring case.
pub fn has_tags(name: &str, tags: &TagString) -> bool {
    extract_tags(name) == *tags
}

/// Splits a file name into base name, tags and extension (including the leading `.`).
/// A name without `.` has an empty extension.
pub fn split_name(name: &str) -> (String, TagString, String) {
    let tags = extract_tags(name);
    let stripped = strip_tags(name);
    match stripped.rfind('.') {
        Some(index) => (stripped[..index].to_owned(), tags, stripped[index..].to_owned()),
        None => (stripped, tags, String::new()),
    }
}

/// Builds `base` + `.tag` for every tag except [`COMMON_TAG`] + `extension`.
/// The extension may be given with or without the leading `.`.
///
/// # Example
///
/// ```rust
/// use kiln_content::tags::{synthesize_name, TagString};
/// let tags = TagString::parse("common.med.wide");
/// assert_eq!(synthesize_name("icon", &tags, ".csimage"), "icon.med.wide.csimage");
/// assert_eq!(synthesize_name("icon", &TagString::empty(), "csimage"), "icon.csimage");
/// ```
pub fn synthesize_name(base: &str, tags: &TagString, extension: &str) -> String {
    let mut name = base.to_owned();
    for tag in tags.without_common() {
        name.push('.');
        name.push_str(tag);
    }
    if !extension.is_empty() {
        if !extension.starts_with('.') {
            name.push('.');
        }
        name.push_str(extension);
    }
    name
}
