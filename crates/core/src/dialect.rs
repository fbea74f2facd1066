//! Supported shell dialects.
//!
//! A [`Dialect`] names one shell's alias-definition syntax. Each dialect maps to a
//! [`Syntax`] family; dialects in the same family share their render and parse
//! rules as well as command text.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Dialect {
    Bash,
    Zsh,
    Fish,
    Ksh,
    #[serde(rename = "powershell")]
    PowerShell,
    Pwsh,
    Cmd,
}

/// Syntax families. Render and parse rules are defined once per family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    Posix,
    Fish,
    PowerShell,
    DosKey,
}

impl Dialect {
    pub const ALL: [Dialect; 7] = [
        Dialect::Bash,
        Dialect::Zsh,
        Dialect::Fish,
        Dialect::Ksh,
        Dialect::PowerShell,
        Dialect::Pwsh,
        Dialect::Cmd,
    ];

    /// Canonical external name, used in CLI arguments and persisted files.
    pub fn name(self) -> &'static str {
        match self {
            Dialect::Bash => "bash",
            Dialect::Zsh => "zsh",
            Dialect::Fish => "fish",
            Dialect::Ksh => "ksh",
            Dialect::PowerShell => "powershell",
            Dialect::Pwsh => "pwsh",
            Dialect::Cmd => "cmd",
        }
    }

    pub fn syntax(self) -> Syntax {
        match self {
            Dialect::Bash | Dialect::Zsh | Dialect::Ksh => Syntax::Posix,
            Dialect::Fish => Syntax::Fish,
            Dialect::PowerShell | Dialect::Pwsh => Syntax::PowerShell,
            Dialect::Cmd => Syntax::DosKey,
        }
    }

    /// Line-comment prefix used for the managed block markers.
    pub fn comment_prefix(self) -> &'static str {
        match self {
            Dialect::Cmd => "REM",
            _ => "#",
        }
    }

    pub fn valid_names() -> String {
        Self::ALL.iter().map(|dialect| dialect.name()).join(", ")
    }
}

impl Display for Dialect {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|dialect| dialect.name() == value)
            .ok_or_else(|| Error::UnsupportedDialect {
                given: value.to_string(),
                valid: Self::valid_names(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_names_parse_back() {
        for dialect in Dialect::ALL {
            assert_eq!(dialect.name().parse::<Dialect>().unwrap(), dialect);
        }
    }

    #[test]
    fn test_unknown_name_lists_valid_names() {
        let error = "tcsh".parse::<Dialect>().unwrap_err();
        match error {
            Error::UnsupportedDialect { given, valid } => {
                assert_eq!(given, "tcsh");
                assert_eq!(valid, "bash, zsh, fish, ksh, powershell, pwsh, cmd");
            }
            other => panic!("Expected UnsupportedDialect, got {other:?}"),
        }
    }

    #[test]
    fn test_names_are_case_sensitive() {
        assert!("Bash".parse::<Dialect>().is_err());
    }

    #[test]
    fn test_syntax_families() {
        assert_eq!(Dialect::Zsh.syntax(), Syntax::Posix);
        assert_eq!(Dialect::Ksh.syntax(), Dialect::Bash.syntax());
        assert_eq!(Dialect::Pwsh.syntax(), Syntax::PowerShell);
        assert_eq!(Dialect::Cmd.syntax(), Syntax::DosKey);
    }

    #[test]
    fn test_serialized_names_match_canonical_names() {
        for dialect in Dialect::ALL {
            let json = serde_json::to_string(&dialect).unwrap();
            assert_eq!(json, format!("\"{}\"", dialect.name()));
        }
    }

    #[test]
    fn test_comment_prefix() {
        assert_eq!(Dialect::Bash.comment_prefix(), "#");
        assert_eq!(Dialect::Cmd.comment_prefix(), "REM");
    }
}
