//! The formatted-string engine behind folder and track names.
//!
//! A template mixes literal text with brace segments. A segment is an outer
//! brace pair holding exactly one inner `{tag}` placeholder plus optional
//! literal context and a leading `*` required-marker:
//!
//! ```text
//! {({date}) }{{album}}        "(2001) L'Album", or "L'Album" without a date
//! {*{artist}}                 "Unknown artist" when the tag is missing
//! {{tracknumber:02d}. }       "01. ", gone entirely without a track number
//! ```
//!
//! A segment whose tag is absent vanishes together with its prefix and
//! suffix, which is how optional punctuation disappears cleanly. The `*`
//! marker substitutes `Unknown <tag>` instead.

use crate::core::domain::tags::{TagBag, TagName, leading_number};
use crate::core::errors::TidysicError;

/// A compiled template, pre-split into alternating literal and segment
/// units for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedString {
    raw: String,
    units: Vec<Unit>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Unit {
    Literal(String),
    Segment(Segment),
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Segment {
    required: bool,
    prefix: String,
    tag: TagName,
    format: Option<FormatSpec>,
    suffix: String,
}

/// The `fmt` minilanguage: optional zero-pad flag, optional width, optional
/// trailing `d`, e.g. `02d`, `3d`, `4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FormatSpec {
    zero_pad: bool,
    width: usize,
}

impl FormattedString {
    /// Compiles `raw`, rejecting unbalanced or too-deep braces, unknown tag
    /// names, and malformed format specs.
    pub fn parse(raw: &str) -> Result<Self, TidysicError> {
        Self::validate(raw)?;
        let units = Self::build_units(raw)?;
        Ok(Self {
            raw: raw.to_string(),
            units,
        })
    }

    /// The template text as written.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Produces the name built from the tags in `tags`.
    ///
    /// Fails with [`TidysicError::EmptyRender`] when every segment vanished
    /// and no literal text remains, since an empty path component cannot be
    /// used.
    pub fn render(&self, tags: &TagBag) -> Result<String, TidysicError> {
        let mut out = String::new();
        for unit in &self.units {
            match unit {
                Unit::Literal(text) => out.push_str(text),
                Unit::Segment(segment) => out.push_str(&segment.render(tags)),
            }
        }

        if out.is_empty() {
            return Err(TidysicError::EmptyRender {
                template: self.raw.clone(),
                tags: tags.clone(),
            });
        }
        Ok(out)
    }

    /// Checks brace balance (depth at most 2) and every segment's tag name.
    ///
    /// Tag characters sit at depth 2; the accumulated name is checked when
    /// the enclosing segment closes, so a top-level `{artist}` is rejected
    /// as an (empty) unknown tag rather than silently passed through.
    fn validate(raw: &str) -> Result<(), TidysicError> {
        let mut depth = 0u32;
        let mut tag_name = String::new();

        for (column, ch) in raw.chars().enumerate() {
            match ch {
                '{' => {
                    depth += 1;
                    if depth > 2 {
                        return Err(Self::syntax_error(raw, column, "too many opening braces"));
                    }
                }
                '}' => {
                    if depth == 0 {
                        return Err(Self::syntax_error(raw, column, "too many closing braces"));
                    }
                    depth -= 1;
                    if depth == 0 {
                        let name = tag_name.split(':').next().unwrap_or("");
                        name.parse::<TagName>()?;
                        tag_name.clear();
                    }
                }
                _ if depth == 2 => tag_name.push(ch),
                _ => {}
            }
        }

        if depth != 0 {
            return Err(Self::syntax_error(
                raw,
                raw.chars().count(),
                "mismatched braces",
            ));
        }
        Ok(())
    }

    /// Splits validated text into literal and segment units.
    fn build_units(raw: &str) -> Result<Vec<Unit>, TidysicError> {
        let mut units = Vec::new();
        let mut depth = 0u32;
        let mut literal = String::new();
        let mut body = String::new();
        let mut segment_start = 0;

        for (column, ch) in raw.chars().enumerate() {
            match ch {
                '{' if depth == 0 => {
                    depth = 1;
                    segment_start = column;
                    if !literal.is_empty() {
                        units.push(Unit::Literal(std::mem::take(&mut literal)));
                    }
                }
                '{' => {
                    depth += 1;
                    body.push(ch);
                }
                '}' if depth == 1 => {
                    depth = 0;
                    let segment = Segment::parse(&body, raw, segment_start)?;
                    units.push(Unit::Segment(segment));
                    body.clear();
                }
                '}' => {
                    depth -= 1;
                    body.push(ch);
                }
                _ if depth == 0 => literal.push(ch),
                _ => body.push(ch),
            }
        }

        if !literal.is_empty() {
            units.push(Unit::Literal(literal));
        }
        Ok(units)
    }

    fn syntax_error(raw: &str, column: usize, reason: &str) -> TidysicError {
        TidysicError::TemplateSyntax {
            template: raw.to_string(),
            column,
            reason: reason.to_string(),
        }
    }
}

impl Segment {
    /// Parses a segment body (the text between the outer braces).
    fn parse(body: &str, raw: &str, column: usize) -> Result<Self, TidysicError> {
        let (required, body) = match body.strip_prefix('*') {
            Some(rest) => (true, rest),
            None => (false, body),
        };

        let open = body
            .find('{')
            .ok_or_else(|| FormattedString::syntax_error(raw, column, "segment without a tag"))?;
        let close = body
            .find('}')
            .ok_or_else(|| FormattedString::syntax_error(raw, column, "segment without a tag"))?;

        let prefix = body[..open].to_string();
        let inner = &body[open + 1..close];
        let suffix = body[close + 1..].to_string();

        let (tag, format) = match inner.split_once(':') {
            Some((tag, spec)) => {
                let format = FormatSpec::parse(spec)
                    .map_err(|reason| FormattedString::syntax_error(raw, column, &reason))?;
                (tag, Some(format))
            }
            None => (inner, None),
        };

        Ok(Segment {
            required,
            prefix,
            tag: tag.parse()?,
            format,
            suffix,
        })
    }

    /// Renders the segment, or an empty string when it vanishes.
    fn render(&self, tags: &TagBag) -> String {
        let value = tags.get(self.tag).filter(|value| !value.is_empty());
        let Some(value) = value else {
            if self.required {
                return format!("{}Unknown {}{}", self.prefix, self.tag, self.suffix);
            }
            return String::new();
        };

        let formatted = if self.tag.is_numeric() {
            match leading_number(value).parse::<u64>() {
                Ok(number) => match self.format {
                    Some(format) => format.apply_number(number),
                    None => number.to_string(),
                },
                // Not actually numeric; keep the stored text rather than
                // losing the file behind an error.
                Err(_) => value.to_string(),
            }
        } else {
            match self.format {
                Some(format) => format.apply_text(value),
                None => value.to_string(),
            }
        };

        format!("{}{}{}", self.prefix, formatted, self.suffix)
    }
}

impl FormatSpec {
    fn parse(spec: &str) -> Result<FormatSpec, String> {
        let digits = spec.strip_suffix('d').unwrap_or(spec);
        let (zero_pad, digits) = match digits.strip_prefix('0') {
            Some(rest) if !rest.is_empty() => (true, rest),
            _ => (false, digits),
        };

        let width = if digits.is_empty() {
            0
        } else {
            digits
                .parse::<usize>()
                .map_err(|_| format!("invalid format spec '{}'", spec))?
        };

        Ok(FormatSpec { zero_pad, width })
    }

    fn apply_number(self, number: u64) -> String {
        if self.zero_pad {
            format!("{:0width$}", number, width = self.width)
        } else {
            format!("{:width$}", number, width = self.width)
        }
    }

    fn apply_text(self, value: &str) -> String {
        format!("{:width$}", value, width = self.width)
    }
}
