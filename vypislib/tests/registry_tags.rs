use vypislib::error::VypisError;
use vypislib::registry::{lookup, SourceTag, ALL};

#[test]
fn dir_names_round_trip() {
    for tag in ALL {
        assert_eq!(SourceTag::from_dir_name(tag.dir_name()), Some(tag));
    }
}

#[test]
fn revisions_are_distinct_tags() {
    assert_eq!(SourceTag::from_dir_name("smbc_v1"), Some(SourceTag::SmbcV1));
    assert_eq!(SourceTag::from_dir_name("smbc_v2"), Some(SourceTag::SmbcV2));
    assert_ne!(
        SourceTag::from_dir_name("smbc_v1"),
        SourceTag::from_dir_name("smbc_v2")
    );
}

#[test]
fn unknown_names_have_no_parser() {
    assert_eq!(SourceTag::from_dir_name("dkb"), None);
    assert_eq!(SourceTag::from_dir_name("smbc_v3"), None);
    assert_eq!(SourceTag::from_dir_name(""), None);
}

#[test]
fn lookup_reports_unknown_format() {
    assert_eq!(lookup("rakuten_v1").expect("registered"), SourceTag::RakutenV1);
    let err = lookup("scratch").expect_err("unregistered");
    assert!(matches!(err, VypisError::UnknownFormat(_)));
}
