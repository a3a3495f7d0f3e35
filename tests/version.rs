//! Version classification tests

use kv_doctor::version::{NodeVersion, VersionEra, VersionError};

#[test]
fn suffix_is_stripped_before_parsing() {
    let v = NodeVersion::classify("1.3.1v1").expect("parses");
    assert_eq!(v.numeric, 131);
    assert_eq!(v.era, VersionEra::Post12);
}

#[test]
fn the_1_2_line_wins_by_prefix_not_by_number() {
    let v = NodeVersion::classify("1.2.0").expect("parses");
    assert_eq!(v.numeric, 120);
    assert_eq!(v.era, VersionEra::Era12);

    let v = NodeVersion::classify("1.2.1-p4").expect("parses");
    assert_eq!(v.numeric, 121);
    assert_eq!(v.era, VersionEra::Era12);
}

#[test]
fn older_versions_classify_pre_1_2() {
    let v = NodeVersion::classify("1.1.9").expect("parses");
    assert_eq!(v.numeric, 119);
    assert_eq!(v.era, VersionEra::Pre12);

    let v = NodeVersion::classify("1.0.3").expect("parses");
    assert_eq!(v.numeric, 103);
    assert_eq!(v.era, VersionEra::Pre12);
}

#[test]
fn newer_versions_classify_post_1_2() {
    let v = NodeVersion::classify("2.0.1").expect("parses");
    assert_eq!(v.numeric, 201);
    assert_eq!(v.era, VersionEra::Post12);
}

#[test]
fn empty_and_non_numeric_strings_are_errors() {
    assert!(matches!(
        NodeVersion::classify(""),
        Err(VersionError::NoLeadingDigit(_))
    ));
    assert!(matches!(
        NodeVersion::classify("v1.2.0"),
        Err(VersionError::NoLeadingDigit(_))
    ));
}

/// Digit concatenation is not semver: "1.10" reads as 110, which would
/// misorder against "1.9" (19). The era cutoffs were chosen against this
/// scheme's output, so the behavior is pinned here on purpose.
#[test]
fn digit_concatenation_quirk_is_preserved() {
    let v = NodeVersion::classify("1.10").expect("parses");
    assert_eq!(v.numeric, 110);

    let v = NodeVersion::classify("1.9").expect("parses");
    assert_eq!(v.numeric, 19);
    assert_eq!(v.era, VersionEra::Pre12);

    // Same effect on an old release with a wide minor: "0.14.2" reads as
    // 142 and lands past the 1.2 cutoff.
    let v = NodeVersion::classify("0.14.2").expect("parses");
    assert_eq!(v.numeric, 142);
    assert_eq!(v.era, VersionEra::Post12);
}
