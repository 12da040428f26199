use tidysic::{FormattedString, TagBag, TagName, TidysicError};

fn tags(pairs: &[(TagName, &str)]) -> TagBag {
    let mut bag = TagBag::default();
    for (name, value) in pairs {
        bag.set(*name, Some((*value).to_string()));
    }
    bag
}

#[test]
fn test_validation_rejects_bad_brace_nesting() {
    let too_many_opening = FormattedString::parse("{{{artist}}");
    assert!(matches!(
        too_many_opening,
        Err(TidysicError::TemplateSyntax { .. })
    ));

    let too_many_closing = FormattedString::parse("{{artist}}}");
    assert!(matches!(
        too_many_closing,
        Err(TidysicError::TemplateSyntax { .. })
    ));

    let mismatched = FormattedString::parse("{{artist}");
    assert!(matches!(
        mismatched,
        Err(TidysicError::TemplateSyntax { .. })
    ));
}

#[test]
fn test_validation_rejects_unknown_tags() {
    let unknown = FormattedString::parse("{{albumartist}}");
    assert!(matches!(unknown, Err(TidysicError::UnknownTag(name)) if name == "albumartist"));

    // A single-brace placeholder is not a segment; it is caught as an
    // (empty) unknown tag.
    assert!(FormattedString::parse("{artist}}").is_err());
}

#[test]
fn test_syntax_error_reports_column() {
    let Err(TidysicError::TemplateSyntax { column, .. }) = FormattedString::parse("x{{{artist}}")
    else {
        panic!("expected a syntax error");
    };
    assert_eq!(column, 3);
}

#[test]
fn test_extra_text_around_segments() {
    let template =
        FormattedString::parse("{surrounding stuff {artist} here too }always present {{album}}")
            .unwrap();

    let whole = tags(&[(TagName::Artist, "Artist"), (TagName::Album, "Album")]);
    assert_eq!(
        template.render(&whole).unwrap(),
        "surrounding stuff Artist here too always present Album"
    );

    let only_album = tags(&[(TagName::Album, "Album")]);
    assert_eq!(
        template.render(&only_album).unwrap(),
        "always present Album"
    );

    let empty = TagBag::default();
    assert_eq!(template.render(&empty).unwrap(), "always present ");
}

#[test]
fn test_literal_only_template_renders_to_itself() {
    let template = FormattedString::parse("just a literal").unwrap();
    assert_eq!(template.render(&TagBag::default()).unwrap(), "just a literal");
    assert_eq!(
        template
            .render(&tags(&[(TagName::Artist, "ignored")]))
            .unwrap(),
        "just a literal"
    );
}

#[test]
fn test_empty_render_is_an_error() {
    let template = FormattedString::parse("{{artist}}").unwrap();
    let err = template.render(&TagBag::default()).unwrap_err();
    assert!(matches!(err, TidysicError::EmptyRender { .. }));
}

#[test]
fn test_required_marker_substitutes_unknown() {
    let template = FormattedString::parse("{*{artist}}").unwrap();
    assert_eq!(template.render(&TagBag::default()).unwrap(), "Unknown artist");
}

#[test]
fn test_required_marker_keeps_surrounding_text() {
    let template = FormattedString::parse("{*({date}) }rest").unwrap();
    assert_eq!(
        template.render(&TagBag::default()).unwrap(),
        "(Unknown date) rest"
    );
    assert_eq!(
        template.render(&tags(&[(TagName::Date, "2001")])).unwrap(),
        "(2001) rest"
    );
}

#[test]
fn test_optional_punctuation_disappears() {
    let template = FormattedString::parse("{({date}) }rest").unwrap();
    assert_eq!(template.render(&TagBag::default()).unwrap(), "rest");
    assert_eq!(
        template.render(&tags(&[(TagName::Date, "2001")])).unwrap(),
        "(2001) rest"
    );
}

#[test]
fn test_number_formatting() {
    let template = FormattedString::parse("{{tracknumber:03d}}").unwrap();
    assert_eq!(
        template
            .render(&tags(&[(TagName::TrackNumber, "34")]))
            .unwrap(),
        "034"
    );
}

#[test]
fn test_tracknumber_with_total() {
    let template = FormattedString::parse("{{tracknumber:02d}}").unwrap();
    assert_eq!(
        template
            .render(&tags(&[(TagName::TrackNumber, "03/12")]))
            .unwrap(),
        "03"
    );
}

#[test]
fn test_numeric_tag_without_format_uses_plain_integer() {
    let template = FormattedString::parse("{{tracknumber}}").unwrap();
    assert_eq!(
        template
            .render(&tags(&[(TagName::TrackNumber, "03")]))
            .unwrap(),
        "3"
    );
}

#[test]
fn test_unparseable_numeric_value_falls_back_to_raw_text() {
    let template = FormattedString::parse("{{date}}").unwrap();
    assert_eq!(
        template
            .render(&tags(&[(TagName::Date, "2001-05-12")]))
            .unwrap(),
        "2001-05-12"
    );
}

#[test]
fn test_invalid_format_spec_is_a_parse_error() {
    let err = FormattedString::parse("{{tracknumber:wat}}").unwrap_err();
    assert!(matches!(err, TidysicError::TemplateSyntax { .. }));
}

#[test]
fn test_empty_tag_value_counts_as_absent() {
    let template = FormattedString::parse("{({genre}) }{*{title}}").unwrap();
    let mut bag = tags(&[(TagName::Title, "T")]);
    bag.genre = Some(String::new());
    assert_eq!(template.render(&bag).unwrap(), "T");
}
