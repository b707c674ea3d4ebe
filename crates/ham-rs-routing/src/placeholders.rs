//! Typed placeholder tokens for URL templates.
//!
//! A template like `/post/<int>` carries placeholder tokens that the
//! [pattern compiler](crate::pattern) replaces with capturing expressions.
//! The token set is closed and global: anything that is not one of the five
//! tokens below is rejected at compile time.
//!
//! # Tokens
//!
//! | Token      | Expression                  | Captures |
//! |------------|-----------------------------|----------|
//! | `<int>`    | `(-?[0-9]+)`                | 1        |
//! | `<float>`  | `(-?[0-9]+(?:\.[0-9]*)?)`   | 1        |
//! | `<string>` | `([-a-zA-Z0-9_]+)`          | 1        |
//! | `<page>`   | `([0-9]*)/?([0-9]*)/?`      | 2        |
//! | `<path>`   | `([-a-zA-Z0-9_/]+)`         | 1        |

/// A placeholder token usable in a URL template.
///
/// Each variant binds a fixed capturing expression. `Slug` is spelled
/// `<string>` in templates; `Page` captures one or two optional numeric
/// segments and is the only token producing two capture groups.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placeholder {
    /// `<int>`: an optionally negative run of digits.
    Int,
    /// `<float>`: an optionally negative decimal number.
    Float,
    /// `<string>`: letters, digits, hyphens, and underscores.
    Slug,
    /// `<page>`: one or two optional numeric segments separated by `/`.
    Page,
    /// `<path>`: one or more path-safe characters, across segments.
    Path,
}

impl Placeholder {
    /// The substitution priority order used by the compiler.
    ///
    /// Longer tokens come first so no token's literal text can be consumed
    /// as a prefix of another's during replacement.
    pub const SUBSTITUTION_ORDER: [Self; 5] =
        [Self::Slug, Self::Float, Self::Page, Self::Path, Self::Int];

    /// Returns the literal token as written in a URL template.
    pub const fn token(self) -> &'static str {
        match self {
            Self::Int => "<int>",
            Self::Float => "<float>",
            Self::Slug => "<string>",
            Self::Page => "<page>",
            Self::Path => "<path>",
        }
    }

    /// Returns the capturing expression substituted for this token.
    pub const fn expression(self) -> &'static str {
        match self {
            Self::Int => "(-?[0-9]+)",
            Self::Float => r"(-?[0-9]+(?:\.[0-9]*)?)",
            Self::Slug => "([-a-zA-Z0-9_]+)",
            Self::Page => "([0-9]*)/?([0-9]*)/?",
            Self::Path => "([-a-zA-Z0-9_/]+)",
        }
    }

    /// Returns the number of capture groups this token contributes.
    pub const fn group_count(self) -> usize {
        match self {
            Self::Page => 2,
            _ => 1,
        }
    }

    /// Looks up a placeholder by its literal token, including the angle
    /// brackets.
    pub fn from_token(token: &str) -> Option<Self> {
        Self::SUBSTITUTION_ORDER
            .into_iter()
            .find(|p| p.token() == token)
    }
}
