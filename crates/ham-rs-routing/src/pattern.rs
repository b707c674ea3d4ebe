//! URL template compilation.
//!
//! [`compile`] turns a URL template such as `/post/<int>` into a
//! [`CompiledPattern`]: an anchored regex with the template's literal text
//! escaped, each [`Placeholder`](crate::placeholders::Placeholder) token
//! replaced by its capturing expression, the trailing slash made optional,
//! and, for mount prefixes, a wildcard tail capture appended.
//!
//! Compilation happens once at registration time; a `CompiledPattern` is
//! immutable afterwards and its regex source doubles as the route-table
//! key.

use regex::Regex;

use ham_rs_core::{HamError, HamResult};

use crate::placeholders::Placeholder;

/// A URL template compiled into a matchable pattern.
#[derive(Debug, Clone)]
pub struct CompiledPattern {
    /// The template as given at registration (e.g. `"/post/<int>"`).
    template: String,
    /// The compiled anchored regex.
    regex: Regex,
    /// Whether a wildcard tail capture was appended.
    wildcard: bool,
}

impl CompiledPattern {
    /// Returns the original template string.
    pub fn template(&self) -> &str {
        &self.template
    }

    /// Returns the regex source, used as the route-table key.
    ///
    /// Two templates that compile to the same regex collide in the table,
    /// with last-write-wins semantics.
    pub fn key(&self) -> &str {
        self.regex.as_str()
    }

    /// Returns whether this pattern carries a wildcard tail.
    pub const fn wildcard(&self) -> bool {
        self.wildcard
    }

    /// Returns `true` if `url` matches this pattern.
    pub fn is_match(&self, url: &str) -> bool {
        self.regex.is_match(url)
    }

    /// Matches `url` and extracts positional arguments.
    ///
    /// Returns `None` if the url does not match. On a match, the whole-match
    /// group is discarded, trailing groups that did not participate are
    /// dropped (so handlers can rely on their own argument defaults), and
    /// non-participating groups in the middle contribute empty strings.
    pub fn match_args(&self, url: &str) -> Option<Vec<String>> {
        let captures = self.regex.captures(url)?;

        let mut groups: Vec<Option<&str>> = captures
            .iter()
            .skip(1)
            .map(|m| m.map(|m| m.as_str()))
            .collect();
        while groups.last() == Some(&None) {
            groups.pop();
        }

        Some(
            groups
                .into_iter()
                .map(|g| g.unwrap_or_default().to_string())
                .collect(),
        )
    }
}

/// Rejects templates containing anything bracket-delimited that is not a
/// known placeholder token. Literal text never reaches the regex engine
/// unescaped, so the only way a template can misbehave is through a token
/// the substitution pass would leave behind; this check turns that latent
/// ambiguity into a registration-time error.
fn validate_placeholders(template: &str) -> HamResult<()> {
    let mut rest = template;
    while let Some(start) = rest.find('<') {
        let Some(len) = rest[start..].find('>') else {
            return Err(HamError::MalformedTemplate(format!(
                "unclosed placeholder in '{template}'"
            )));
        };
        let token = &rest[start..=start + len];
        if Placeholder::from_token(token).is_none() {
            return Err(HamError::MalformedTemplate(format!(
                "unknown placeholder '{token}' in '{template}'"
            )));
        }
        rest = &rest[start + len + 1..];
    }
    Ok(())
}

/// Compiles a URL template into a [`CompiledPattern`].
///
/// The trailing slash is stripped from the template and re-added as
/// optional, so `/about` and `/about/` register and match identically. With
/// `wildcard`, a capture for any remaining suffix is appended instead of
/// requiring end-of-string; mount prefixes are compiled this way. An empty
/// template (or `/`) matches exactly `` and `/`.
///
/// Literal text is escaped *before* placeholder substitution, in a fixed
/// longest-token-first order, so escaped punctuation can never be corrupted
/// by a replacement.
///
/// # Examples
///
/// ```
/// use ham_rs_routing::pattern::compile;
///
/// let pattern = compile("/post/<int>", false).unwrap();
/// assert_eq!(pattern.match_args("/post/42").unwrap(), vec!["42"]);
/// assert!(pattern.match_args("/post/abc").is_none());
/// ```
///
/// # Errors
///
/// Returns [`HamError::MalformedTemplate`] for unknown or unclosed
/// placeholder tokens.
pub fn compile(template: &str, wildcard: bool) -> HamResult<CompiledPattern> {
    let trimmed = template.trim_end_matches('/');
    validate_placeholders(trimmed)?;

    let mut source = regex::escape(trimmed);
    for placeholder in Placeholder::SUBSTITUTION_ORDER {
        source = source.replace(&regex::escape(placeholder.token()), placeholder.expression());
    }

    let anchored = if wildcard {
        format!("^{source}/?(.*)?$")
    } else {
        format!("^{source}/?$")
    };

    let regex = Regex::new(&anchored).map_err(|e| {
        HamError::MalformedTemplate(format!("invalid pattern for '{template}': {e}"))
    })?;

    Ok(CompiledPattern {
        template: template.to_string(),
        regex,
        wildcard,
    })
}
