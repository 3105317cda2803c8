use pyslots::{FunctionType, PythonVersion, PythonVersionTag, SLOTS};

use proptest::prelude::*;

#[test]
fn table_uses_known_function_types() {
    for slot in SLOTS {
        assert!(FunctionType::ALL.contains(&slot.function_type));
        assert_eq!(slot.function_type.to_string(), slot.function_type.as_str());
    }
}

#[test]
fn version_tags_display() {
    let shown: Vec<_> = [
        PythonVersionTag::Py2,
        PythonVersionTag::Py3,
        PythonVersionTag::Any,
    ]
    .iter()
    .map(ToString::to_string)
    .collect();
    assert_eq!(shown, ["2", "3", "*"]);
}

proptest! {
    #[test]
    fn function_type_parser_never_panics(s in "\\PC*") {
        if let Ok(ty) = s.parse::<FunctionType>() {
            prop_assert_eq!(ty.as_str(), s.as_str());
        }
    }

    #[test]
    fn version_tag_parser_accepts_only_known_tags(s in "\\PC{0,3}") {
        let parsed = s.parse::<PythonVersionTag>();
        prop_assert_eq!(parsed.is_ok(), matches!(s.as_str(), "2" | "3" | "*"));
    }

    #[test]
    fn version_display_parses_back(major in any::<u8>(), minor in any::<u8>()) {
        let version = PythonVersion { major, minor };
        prop_assert_eq!(version.to_string().parse::<PythonVersion>().unwrap(), version);
    }

    #[test]
    fn tag_match_is_exact_for_tagged_versions(major in any::<u8>()) {
        prop_assert!(PythonVersionTag::Any.matches(major));
        prop_assert_eq!(PythonVersionTag::Py2.matches(major), major == 2);
        prop_assert_eq!(PythonVersionTag::Py3.matches(major), major == 3);
    }
}
