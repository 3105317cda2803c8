//! Python version handling.
//!
//! Slots are tagged with the Python major version they exist in, and callers can pick a
//! target version through the `PYSLOTS_PYTHON_VERSION` environment variable.
use std::{env, ffi::OsString, fmt::Display, str::FromStr};

use crate::{
    bail, ensure,
    errors::{Context, Error, Result},
};

/// Environment variable naming the Python version to filter the slot table for.
pub const PYTHON_VERSION_ENV: &str = "PYSLOTS_PYTHON_VERSION";

/// Gets an external environment variable.
pub fn env_var(var: &str) -> Option<OsString> {
    env::var_os(var)
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct PythonVersion {
    pub major: u8,
    pub minor: u8,
}

impl PythonVersion {
    pub const PY2: Self = PythonVersion { major: 2, minor: 7 };
    pub const PY3: Self = PythonVersion { major: 3, minor: 0 };
}

impl Display for PythonVersion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for PythonVersion {
    type Err = Error;

    /// Accepts `X` or `X.Y`; a bare major version means minor `0`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let mut split = value.trim().splitn(2, '.');
        let major = split.next().unwrap_or_default();
        ensure!(!major.is_empty(), "expected a Python version, got `{}`", value);
        let major: u8 = major.parse().context("failed to parse major version")?;
        let minor = match split.next() {
            Some(minor) => minor.parse().context("failed to parse minor version")?,
            None => 0,
        };
        Ok(Self { major, minor })
    }
}

/// The Python major version(s) a slot belongs to.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub enum PythonVersionTag {
    Py2,
    Py3,
    /// Present in every version. Written `*`.
    #[default]
    Any,
}

impl PythonVersionTag {
    pub const fn as_str(self) -> &'static str {
        match self {
            PythonVersionTag::Py2 => "2",
            PythonVersionTag::Py3 => "3",
            PythonVersionTag::Any => "*",
        }
    }

    /// Whether a slot carrying this tag exists in Python `major`.
    pub const fn matches(self, major: u8) -> bool {
        match self {
            PythonVersionTag::Py2 => major == 2,
            PythonVersionTag::Py3 => major == 3,
            PythonVersionTag::Any => true,
        }
    }
}

impl Display for PythonVersionTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PythonVersionTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "2" => Ok(PythonVersionTag::Py2),
            "3" => Ok(PythonVersionTag::Py3),
            "*" => Ok(PythonVersionTag::Any),
            _ => bail!("unknown python version tag: {}", s),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for PythonVersionTag {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Reads the target Python version from `PYSLOTS_PYTHON_VERSION`.
///
/// Returns `Ok(None)` when the variable is unset.
pub fn target_version() -> Result<Option<PythonVersion>> {
    parse_target_version(env_var(PYTHON_VERSION_ENV))
}

fn parse_target_version(value: Option<OsString>) -> Result<Option<PythonVersion>> {
    let value = match value {
        Some(value) => value,
        None => return Ok(None),
    };
    let value = match value.into_string() {
        Ok(value) => value,
        Err(raw) => bail!("{} is not valid unicode: {:?}", PYTHON_VERSION_ENV, raw),
    };
    let version: PythonVersion = value
        .parse()
        .with_context(|| format!("failed to parse {}=`{}`", PYTHON_VERSION_ENV, value))?;
    log::debug!("target python version {} from {}", version, PYTHON_VERSION_ENV);
    Ok(Some(version))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_version() {
        assert_eq!(
            "3.9".parse::<PythonVersion>().unwrap(),
            PythonVersion { major: 3, minor: 9 }
        );
        assert_eq!("2".parse::<PythonVersion>().unwrap(), PythonVersion { major: 2, minor: 0 });
        assert_eq!(" 3.12 ".parse::<PythonVersion>().unwrap().to_string(), "3.12");
        assert!("".parse::<PythonVersion>().is_err());
        assert!("three".parse::<PythonVersion>().is_err());
        assert!("3.x".parse::<PythonVersion>().is_err());
    }

    #[test]
    fn tag_matches_major() {
        assert!(PythonVersionTag::Py2.matches(2));
        assert!(!PythonVersionTag::Py2.matches(3));
        assert!(PythonVersionTag::Py3.matches(3));
        assert!(PythonVersionTag::Any.matches(2));
        assert!(PythonVersionTag::Any.matches(3));
        assert_eq!(PythonVersionTag::default(), PythonVersionTag::Any);
    }

    #[test]
    fn tag_from_str() {
        assert_eq!("*".parse::<PythonVersionTag>().unwrap(), PythonVersionTag::Any);
        assert_eq!(
            "4".parse::<PythonVersionTag>().unwrap_err().to_string(),
            "unknown python version tag: 4"
        );
    }

    #[test]
    fn target_version_from_value() {
        assert_eq!(parse_target_version(None).unwrap(), None);
        assert_eq!(
            parse_target_version(Some("3.8".into())).unwrap(),
            Some(PythonVersion { major: 3, minor: 8 })
        );
        let err = parse_target_version(Some("py3".into())).unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to parse PYSLOTS_PYTHON_VERSION=`py3`"
        );
    }
}
