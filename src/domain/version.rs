//! Version parsing and comparison for version files
//!
//! Two grammars are supported. [StrictVersion] only accepts numeric dotted
//! releases with an optional `aN`/`bN` pre-release and orders `60.0b2` below
//! `60.0`. [LooseVersion] tokenizes anything, which lets it read the trailing
//! `esr` marker. [compare] picks the grammar per call from the two operands.

use crate::error::{BumpError, Result};
use regex::Regex;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Trailing marker carried by extended-support release versions
pub const ESR_SUFFIX: &str = "esr";

/// Returns true when `version` ends with the extended-support marker
pub fn is_esr(version: &str) -> bool {
    version.ends_with(ESR_SUFFIX)
}

/// Which grammar a comparison runs under
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discipline {
    Strict,
    Loose,
}

impl Discipline {
    /// Select the grammar for comparing `a` against `b`.
    ///
    /// Loose whenever either side carries [ESR_SUFFIX], strict otherwise.
    pub fn select(a: &str, b: &str) -> Self {
        if is_esr(a) || is_esr(b) {
            Discipline::Loose
        } else {
            Discipline::Strict
        }
    }

    /// Compare two raw version strings under this grammar
    pub fn compare(self, a: &str, b: &str) -> Result<Ordering> {
        match self {
            Discipline::Strict => Ok(StrictVersion::parse(a)?.cmp(&StrictVersion::parse(b)?)),
            Discipline::Loose => Ok(LooseVersion::parse(a).cmp(&LooseVersion::parse(b))),
        }
    }
}

/// Compare two version strings, choosing the grammar from their content.
///
/// # Errors
/// Returns a version error when the strict grammar is selected and either
/// operand is not a strict version (e.g. `60.0rc1`).
///
/// # Example
/// ```
/// use std::cmp::Ordering;
/// use treebump::domain::version::compare;
///
/// assert_eq!(compare("60.0b2", "60.0").unwrap(), Ordering::Less);
/// assert_eq!(compare("60.0", "60.0esr").unwrap(), Ordering::Less);
/// ```
pub fn compare(a: &str, b: &str) -> Result<Ordering> {
    Discipline::select(a, b).compare(a, b)
}

static STRICT_PATTERN: OnceLock<Regex> = OnceLock::new();

fn strict_pattern() -> Result<&'static Regex> {
    if let Some(re) = STRICT_PATTERN.get() {
        return Ok(re);
    }
    let re = Regex::new(r"^(\d+)\.(\d+)(?:\.(\d+))?(?:([ab])(\d+))?$")
        .map_err(|e| BumpError::version(e.to_string()))?;
    Ok(STRICT_PATTERN.get_or_init(|| re))
}

/// Pre-release stage accepted by the strict grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Alpha,
    Beta,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Alpha => write!(f, "a"),
            Stage::Beta => write!(f, "b"),
        }
    }
}

/// Numeric release version, e.g. `60.0`, `60.0.1`, `61.0b3`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StrictVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub prerelease: Option<(Stage, u64)>,
}

impl StrictVersion {
    /// Parse a strict version string
    ///
    /// # Errors
    /// Returns a version error if `s` does not match `N.N[.N][(a|b)N]`
    pub fn parse(s: &str) -> Result<Self> {
        s.parse()
    }
}

impl FromStr for StrictVersion {
    type Err = BumpError;

    fn from_str(s: &str) -> Result<Self> {
        let caps = strict_pattern()?
            .captures(s)
            .ok_or_else(|| BumpError::version(format!("invalid version number '{}'", s)))?;

        let number = |index: usize| -> Result<u64> {
            match caps.get(index) {
                Some(m) => m.as_str().parse::<u64>().map_err(|_| {
                    BumpError::version(format!("version component out of range in '{}'", s))
                }),
                None => Ok(0),
            }
        };

        let prerelease = match caps.get(4).map(|m| m.as_str()) {
            Some("a") => Some((Stage::Alpha, number(5)?)),
            Some(_) => Some((Stage::Beta, number(5)?)),
            None => None,
        };

        Ok(StrictVersion {
            major: number(1)?,
            minor: number(2)?,
            patch: number(3)?,
            prerelease,
        })
    }
}

impl Ord for StrictVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.major, self.minor, self.patch)
            .cmp(&(other.major, other.minor, other.patch))
            .then_with(|| match (&self.prerelease, &other.prerelease) {
                (None, None) => Ordering::Equal,
                // A final release sorts after every pre-release of itself
                (None, Some(_)) => Ordering::Greater,
                (Some(_), None) => Ordering::Less,
                (Some(a), Some(b)) => a.cmp(b),
            })
    }
}

impl PartialOrd for StrictVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for StrictVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.patch == 0 {
            write!(f, "{}.{}", self.major, self.minor)?;
        } else {
            write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        }
        if let Some((stage, n)) = &self.prerelease {
            write!(f, "{}{}", stage, n)?;
        }
        Ok(())
    }
}

/// One token of a loosely parsed version.
///
/// Numbers order before words when the two meet at the same position.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub enum Component {
    Number(u64),
    Word(String),
}

/// Best-effort version made of numeric and alphabetic runs, e.g. `60.0esr`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct LooseVersion {
    components: Vec<Component>,
}

impl LooseVersion {
    /// Tokenize `s` into digit runs, lowercase letter runs and leftover text.
    ///
    /// Dots only separate; they never become components.
    pub fn parse(s: &str) -> Self {
        let mut components = Vec::new();
        let mut push = |piece: &str| {
            if piece.is_empty() || piece == "." {
                return;
            }
            let component = match piece.parse::<u64>() {
                Ok(n) if piece.bytes().all(|b| b.is_ascii_digit()) => Component::Number(n),
                _ => Component::Word(piece.to_string()),
            };
            components.push(component);
        };

        let mut rest = s;
        while !rest.is_empty() {
            let token_start =
                rest.find(|c: char| c.is_ascii_digit() || c.is_ascii_lowercase() || c == '.');
            let Some(start) = token_start else {
                push(rest);
                break;
            };
            push(&rest[..start]);
            rest = &rest[start..];

            let end = match rest.chars().next() {
                Some('.') => 1,
                Some(c) if c.is_ascii_digit() => rest
                    .find(|c: char| !c.is_ascii_digit())
                    .unwrap_or(rest.len()),
                _ => rest
                    .find(|c: char| !c.is_ascii_lowercase())
                    .unwrap_or(rest.len()),
            };
            push(&rest[..end]);
            rest = &rest[end..];
        }

        LooseVersion { components }
    }

    pub fn components(&self) -> &[Component] {
        &self.components
    }
}
