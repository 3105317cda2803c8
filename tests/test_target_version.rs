//! Kept in its own test binary: it is the only test that touches the process environment.
use pyslots::{slots_for_target, target_version, PythonVersion, SLOTS};

const VAR: &str = "PYSLOTS_PYTHON_VERSION";

#[test]
fn target_version_from_environment() {
    let _ = env_logger::builder().is_test(true).try_init();

    std::env::remove_var(VAR);
    assert_eq!(target_version().unwrap(), None);
    assert_eq!(slots_for_target().unwrap().len(), SLOTS.len());

    std::env::set_var(VAR, "2.7");
    assert_eq!(target_version().unwrap(), Some(PythonVersion::PY2));
    let names: Vec<_> = slots_for_target()
        .unwrap()
        .into_iter()
        .map(|slot| slot.python_name)
        .collect();
    assert!(names.contains(&"next"));
    assert!(names.contains(&"__cmp__"));
    assert!(!names.contains(&"__next__"));
    assert_eq!(names.len(), SLOTS.len() - 1);

    std::env::set_var(VAR, "3.11");
    let slots = slots_for_target().unwrap();
    assert!(slots.iter().any(|slot| slot.python_name == "__next__"));
    assert!(!slots.iter().any(|slot| slot.python_name == "__cmp__"));
    assert_eq!(slots.len(), SLOTS.len() - 2);

    std::env::set_var(VAR, "eleven");
    let err = slots_for_target().unwrap_err();
    assert_eq!(
        err.report().to_string(),
        "failed to parse PYSLOTS_PYTHON_VERSION=`eleven`\n\
         caused by:\n  \
         - 0: failed to parse major version\n  \
         - 1: invalid digit found in string\n"
    );

    std::env::remove_var(VAR);
}
