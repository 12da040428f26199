//! Tag names and the tag-bag value object attached to every scanned file.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::core::errors::TidysicError;

/// The closed set of tags tidysic understands.
///
/// The wire name (as it appears in structure files and templates) is the
/// lowercase form returned by [`TagName::as_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TagName {
    Album,
    Artist,
    Title,
    Genre,
    TrackNumber,
    Date,
}

impl TagName {
    /// All tag names, in field order.
    pub const ALL: [TagName; 6] = [
        TagName::Album,
        TagName::Artist,
        TagName::Title,
        TagName::Genre,
        TagName::TrackNumber,
        TagName::Date,
    ];

    /// The name used in structure files and template segments.
    pub fn as_str(&self) -> &'static str {
        match self {
            TagName::Album => "album",
            TagName::Artist => "artist",
            TagName::Title => "title",
            TagName::Genre => "genre",
            TagName::TrackNumber => "tracknumber",
            TagName::Date => "date",
        }
    }

    /// Whether values of this tag are interpreted as integers at render time.
    pub fn is_numeric(&self) -> bool {
        matches!(self, TagName::TrackNumber | TagName::Date)
    }
}

impl fmt::Display for TagName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TagName {
    type Err = TidysicError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TagName::ALL
            .into_iter()
            .find(|name| name.as_str() == s)
            .ok_or_else(|| TidysicError::UnknownTag(s.to_string()))
    }
}

/// A mapping from each [`TagName`] to an optional string value.
///
/// Bags are created once per scanned file, overwritten at most once more
/// during clutter tagging, and immutable afterwards. Empty strings are
/// normalized to absent on the way in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagBag {
    pub album: Option<String>,
    pub artist: Option<String>,
    pub title: Option<String>,
    pub genre: Option<String>,
    pub tracknumber: Option<String>,
    pub date: Option<String>,
}

impl TagBag {
    /// The value stored for `name`, if any.
    pub fn get(&self, name: TagName) -> Option<&str> {
        let field = match name {
            TagName::Album => &self.album,
            TagName::Artist => &self.artist,
            TagName::Title => &self.title,
            TagName::Genre => &self.genre,
            TagName::TrackNumber => &self.tracknumber,
            TagName::Date => &self.date,
        };
        field.as_deref()
    }

    /// Stores `value` for `name`. `None` and empty strings both clear the
    /// field.
    pub fn set(&mut self, name: TagName, value: Option<String>) {
        let value = value.filter(|v| !v.is_empty());
        let field = match name {
            TagName::Album => &mut self.album,
            TagName::Artist => &mut self.artist,
            TagName::Title => &mut self.title,
            TagName::Genre => &mut self.genre,
            TagName::TrackNumber => &mut self.tracknumber,
            TagName::Date => &mut self.date,
        };
        *field = value;
    }

    /// Overwrites every field of `self` with the corresponding field of
    /// `other`.
    pub fn copy_from(&mut self, other: &TagBag) {
        *self = other.clone();
    }

    /// True when no tag has a value.
    pub fn is_empty(&self) -> bool {
        TagName::ALL.into_iter().all(|name| self.get(name).is_none())
    }

    /// Field-wise intersection of any number of bags.
    ///
    /// A field keeps its value only when every input bag carries that exact
    /// non-empty value. Zero inputs yield an all-absent bag; a single input
    /// yields a copy of itself.
    pub fn intersection<'a>(bags: impl IntoIterator<Item = &'a TagBag>) -> TagBag {
        let mut iter = bags.into_iter();
        let Some(first) = iter.next() else {
            return TagBag::default();
        };

        let mut common = first.clone();
        for bag in iter {
            for name in TagName::ALL {
                if common.get(name) != bag.get(name) {
                    common.set(name, None);
                }
            }
        }
        common
    }
}

/// The leading integer of an `N/M` pair, or `value` unchanged.
///
/// Tag containers commonly store track numbers as `3/12`; both the tag
/// reader and the template engine only want the track's own number.
pub fn leading_number(value: &str) -> &str {
    if let Some((n, total)) = value.split_once('/') {
        let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
        if all_digits(n) && all_digits(total) {
            return n;
        }
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bag(artist: Option<&str>, album: Option<&str>) -> TagBag {
        TagBag {
            artist: artist.map(str::to_string),
            album: album.map(str::to_string),
            ..TagBag::default()
        }
    }

    #[test]
    fn set_normalizes_empty_to_absent() {
        let mut tags = TagBag::default();
        tags.set(TagName::Artist, Some(String::new()));
        assert_eq!(tags.get(TagName::Artist), None);

        tags.set(TagName::Artist, Some("Artist".to_string()));
        assert_eq!(tags.get(TagName::Artist), Some("Artist"));

        tags.set(TagName::Artist, None);
        assert_eq!(tags.get(TagName::Artist), None);
    }

    #[test]
    fn intersection_of_single_bag_is_identity() {
        let b = bag(Some("A"), Some("X"));
        assert_eq!(TagBag::intersection([&b]), b);
        assert_eq!(TagBag::intersection([&b, &b]), b);
    }

    #[test]
    fn intersection_of_nothing_is_empty() {
        assert!(TagBag::intersection([]).is_empty());
    }

    #[test]
    fn intersection_drops_disagreeing_fields() {
        let a = bag(Some("A"), Some("X"));
        let b = bag(Some("A"), Some("Y"));
        let common = TagBag::intersection([&a, &b]);
        assert_eq!(common.get(TagName::Artist), Some("A"));
        assert_eq!(common.get(TagName::Album), None);
    }

    #[test]
    fn intersection_drops_fields_absent_on_one_side() {
        let a = bag(Some("A"), Some("X"));
        let b = bag(Some("A"), None);
        let common = TagBag::intersection([&a, &b]);
        assert_eq!(common.get(TagName::Artist), Some("A"));
        assert_eq!(common.get(TagName::Album), None);
    }

    #[test]
    fn copy_from_overwrites_every_field() {
        let mut target = bag(Some("old"), None);
        let source = bag(None, Some("new"));
        target.copy_from(&source);
        assert_eq!(target, source);
    }

    #[test]
    fn leading_number_strips_totals() {
        assert_eq!(leading_number("3/12"), "3");
        assert_eq!(leading_number("03/12"), "03");
        assert_eq!(leading_number("42"), "42");
        assert_eq!(leading_number("3/"), "3/");
        assert_eq!(leading_number("a/b"), "a/b");
        assert_eq!(leading_number("2001-05-12"), "2001-05-12");
    }

    #[test]
    fn tag_name_round_trips_through_from_str() {
        for name in TagName::ALL {
            assert_eq!(name.as_str().parse::<TagName>().unwrap(), name);
        }
        assert!("albumartist".parse::<TagName>().is_err());
    }
}
