//! npm version ranges and their minimum satisfying version
//!
//! Supports the range grammar found in `package.json` files: `||` unions,
//! hyphen ranges, x-ranges (`1.x`, `1.2.*`), caret and tilde ranges, and
//! primitive comparators. Anything else (dist-tags, git URLs, `file:`/`npm:`
//! specifiers) is treated as having no minimum version.

use regex::Regex;
use semver::{BuildMetadata, Prerelease, Version};
use std::cmp::Ordering;
use std::sync::OnceLock;

/// Comparison operator of a primitive comparator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Gt,
    Gte,
    Lt,
    Lte,
    Eq,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Comparator {
    op: Op,
    version: Version,
}

impl Comparator {
    fn new(op: Op, version: Version) -> Self {
        Self { op, version }
    }

    fn matches(&self, version: &Version) -> bool {
        let ordering = version.cmp(&self.version);
        match self.op {
            Op::Gt => ordering == Ordering::Greater,
            Op::Gte => ordering != Ordering::Less,
            Op::Lt => ordering == Ordering::Less,
            Op::Lte => ordering != Ordering::Greater,
            Op::Eq => ordering == Ordering::Equal,
        }
    }
}

/// A parsed npm range: a union of comparator sets
///
/// An empty comparator set matches any release version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionRange {
    sets: Vec<Vec<Comparator>>,
}

/// One `X.Y.Z-pre` token where each numeric part may be a wildcard
#[derive(Debug, Clone)]
struct Partial {
    major: Option<u64>,
    minor: Option<u64>,
    patch: Option<u64>,
    pre: Prerelease,
}

impl Partial {
    fn version(&self) -> Version {
        let mut version = Version::new(
            self.major.unwrap_or(0),
            self.minor.unwrap_or(0),
            self.patch.unwrap_or(0),
        );
        version.pre = self.pre.clone();
        version
    }
}

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(
            r"^(<=|>=|<|>|=|~>|~|\^)?v?(\d+|[xX*])(?:\.(\d+|[xX*]))?(?:\.(\d+|[xX*]))?(?:-([0-9A-Za-z.-]+))?(?:\+[0-9A-Za-z.-]+)?$",
        )
        .expect("token pattern is valid")
    })
}

fn operator_spacing() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(<=|>=|<|>|=|~>|~|\^)\s+").expect("operator spacing pattern is valid")
    })
}

fn version(major: u64, minor: u64, patch: u64) -> Version {
    Version::new(major, minor, patch)
}

/// Lowest prerelease of a version, used for exclusive upper bounds (`<X.Y.Z-0`)
fn floor_of(major: u64, minor: u64, patch: u64) -> Version {
    let mut v = Version::new(major, minor, patch);
    v.pre = Prerelease::new("0").unwrap_or(Prerelease::EMPTY);
    v
}

/// Largest numeric version part npm accepts (`Number.MAX_SAFE_INTEGER`)
const MAX_SAFE_INTEGER: u64 = (1 << 53) - 1;

fn parse_number(part: Option<regex::Match<'_>>) -> Result<Option<u64>, ()> {
    match part.map(|m| m.as_str()) {
        None | Some("x") | Some("X") | Some("*") => Ok(None),
        Some(digits) => match digits.parse::<u64>() {
            Ok(n) if n <= MAX_SAFE_INTEGER => Ok(Some(n)),
            _ => Err(()),
        },
    }
}

fn parse_token(token: &str) -> Option<(Option<&str>, Partial)> {
    let caps = token_pattern().captures(token)?;
    let op = caps.get(1).map(|m| m.as_str());

    let major = parse_number(caps.get(2)).ok()?;
    let mut minor = parse_number(caps.get(3)).ok()?;
    let mut patch = parse_number(caps.get(4)).ok()?;
    // A wildcard swallows everything after it: `1.x.3` means `1.x`
    if major.is_none() {
        minor = None;
    }
    if minor.is_none() {
        patch = None;
    }

    let pre = match caps.get(5) {
        Some(pre) if patch.is_some() => Prerelease::new(pre.as_str()).ok()?,
        _ => Prerelease::EMPTY,
    };

    Some((
        op,
        Partial {
            major,
            minor,
            patch,
            pre,
        },
    ))
}

/// Expand `^M.m.p`
fn caret(p: &Partial) -> Vec<Comparator> {
    let Some(major) = p.major else {
        return Vec::new();
    };
    let Some(minor) = p.minor else {
        return vec![
            Comparator::new(Op::Gte, version(major, 0, 0)),
            Comparator::new(Op::Lt, floor_of(major + 1, 0, 0)),
        ];
    };
    let Some(patch) = p.patch else {
        let upper = if major == 0 {
            floor_of(0, minor + 1, 0)
        } else {
            floor_of(major + 1, 0, 0)
        };
        return vec![
            Comparator::new(Op::Gte, version(major, minor, 0)),
            Comparator::new(Op::Lt, upper),
        ];
    };

    let upper = if major == 0 && minor == 0 {
        floor_of(0, 0, patch + 1)
    } else if major == 0 {
        floor_of(0, minor + 1, 0)
    } else {
        floor_of(major + 1, 0, 0)
    };
    vec![
        Comparator::new(Op::Gte, p.version()),
        Comparator::new(Op::Lt, upper),
    ]
}

/// Expand `~M.m.p`
fn tilde(p: &Partial) -> Vec<Comparator> {
    let Some(major) = p.major else {
        return Vec::new();
    };
    let Some(minor) = p.minor else {
        return vec![
            Comparator::new(Op::Gte, version(major, 0, 0)),
            Comparator::new(Op::Lt, floor_of(major + 1, 0, 0)),
        ];
    };
    let lower = match p.patch {
        Some(_) => p.version(),
        None => version(major, minor, 0),
    };
    vec![
        Comparator::new(Op::Gte, lower),
        Comparator::new(Op::Lt, floor_of(major, minor + 1, 0)),
    ]
}

/// Expand a primitive or x-range comparator such as `>=1.2`, `1.x` or `<2`
fn primitive(op: Option<&str>, p: &Partial) -> Vec<Comparator> {
    let op = op.filter(|op| *op != "=");

    let Some(major) = p.major else {
        return match op {
            // `>*` and `<*` can never be satisfied
            Some(">") | Some("<") => vec![Comparator::new(Op::Lt, floor_of(0, 0, 0))],
            _ => Vec::new(),
        };
    };

    if p.minor.is_some() && p.patch.is_some() {
        let op = match op {
            Some(">") => Op::Gt,
            Some(">=") => Op::Gte,
            Some("<") => Op::Lt,
            Some("<=") => Op::Lte,
            _ => Op::Eq,
        };
        return vec![Comparator::new(op, p.version())];
    }

    let minor = p.minor;
    match op {
        Some(">") => {
            let lower = match minor {
                None => version(major + 1, 0, 0),
                Some(minor) => version(major, minor + 1, 0),
            };
            vec![Comparator::new(Op::Gte, lower)]
        }
        Some(">=") => vec![Comparator::new(
            Op::Gte,
            version(major, minor.unwrap_or(0), 0),
        )],
        Some("<") => vec![Comparator::new(
            Op::Lt,
            floor_of(major, minor.unwrap_or(0), 0),
        )],
        Some("<=") => {
            let upper = match minor {
                None => floor_of(major + 1, 0, 0),
                Some(minor) => floor_of(major, minor + 1, 0),
            };
            vec![Comparator::new(Op::Lt, upper)]
        }
        _ => match minor {
            None => vec![
                Comparator::new(Op::Gte, version(major, 0, 0)),
                Comparator::new(Op::Lt, floor_of(major + 1, 0, 0)),
            ],
            Some(minor) => vec![
                Comparator::new(Op::Gte, version(major, minor, 0)),
                Comparator::new(Op::Lt, floor_of(major, minor + 1, 0)),
            ],
        },
    }
}

/// Expand `A - B`
fn hyphen(from: &Partial, to: &Partial) -> Vec<Comparator> {
    let mut comparators = Vec::new();

    if let Some(major) = from.major {
        let lower = match (from.minor, from.patch) {
            (None, _) => version(major, 0, 0),
            (Some(minor), None) => version(major, minor, 0),
            _ => from.version(),
        };
        comparators.push(Comparator::new(Op::Gte, lower));
    }

    if let Some(major) = to.major {
        comparators.push(match (to.minor, to.patch) {
            (None, _) => Comparator::new(Op::Lt, floor_of(major + 1, 0, 0)),
            (Some(minor), None) => Comparator::new(Op::Lt, floor_of(major, minor + 1, 0)),
            _ => Comparator::new(Op::Lte, to.version()),
        });
    }

    comparators
}

fn parse_set(set: &str) -> Option<Vec<Comparator>> {
    let set = set.trim();

    if let Some((from, to)) = set.split_once(" - ") {
        let (_, from) = parse_token(from.trim())?;
        let (_, to) = parse_token(to.trim())?;
        return Some(hyphen(&from, &to));
    }

    let normalized = operator_spacing().replace_all(set, "$1");
    let mut comparators = Vec::new();
    for token in normalized.split_whitespace() {
        let (op, partial) = parse_token(token)?;
        comparators.extend(match op {
            Some("^") => caret(&partial),
            Some("~") | Some("~>") => tilde(&partial),
            op => primitive(op, &partial),
        });
    }
    Some(comparators)
}

impl VersionRange {
    /// Parse an npm range expression
    ///
    /// An empty string means "any version", as in npm.
    ///
    /// # Examples
    ///
    /// ```
    /// use size_report::deps::range::VersionRange;
    ///
    /// assert!(VersionRange::parse("^1.2.3").is_some());
    /// assert!(VersionRange::parse(">=1.0.0 <2.0.0 || 3.x").is_some());
    /// assert!(VersionRange::parse("latest").is_none());
    /// assert!(VersionRange::parse("workspace:*").is_none());
    /// ```
    pub fn parse(range: &str) -> Option<Self> {
        let sets = range
            .split("||")
            .map(parse_set)
            .collect::<Option<Vec<_>>>()?;
        Some(Self { sets })
    }

    /// Whether `version` satisfies at least one comparator set
    ///
    /// Prerelease versions only match a set that names a prerelease on the
    /// same `major.minor.patch`.
    pub fn matches(&self, version: &Version) -> bool {
        self.sets.iter().any(|set| set_matches(set, version))
    }

    /// Lowest version satisfying the range
    pub fn min_version(&self) -> Option<Version> {
        for candidate in [version(0, 0, 0), floor_of(0, 0, 0)] {
            if self.matches(&candidate) {
                return Some(candidate);
            }
        }

        let mut lowest: Option<Version> = None;
        for set in &self.sets {
            let mut set_min: Option<Version> = None;
            for comparator in set {
                let mut bound = comparator.version.clone();
                match comparator.op {
                    Op::Gt => {
                        if bound.pre.is_empty() {
                            bound.patch += 1;
                        } else {
                            bound.pre = Prerelease::new(&format!("{}.0", bound.pre))
                                .unwrap_or(Prerelease::EMPTY);
                        }
                    }
                    Op::Gte | Op::Eq => {}
                    Op::Lt | Op::Lte => continue,
                }
                if set_min.as_ref().is_none_or(|current| bound > *current) {
                    set_min = Some(bound);
                }
            }
            if let Some(set_min) = set_min {
                if lowest.as_ref().is_none_or(|current| *current > set_min) {
                    lowest = Some(set_min);
                }
            }
        }

        lowest.filter(|candidate| self.matches(candidate))
    }
}

fn set_matches(set: &[Comparator], version: &Version) -> bool {
    if !set.iter().all(|comparator| comparator.matches(version)) {
        return false;
    }
    if version.pre.is_empty() {
        return true;
    }
    set.iter().any(|comparator| {
        let allowed = &comparator.version;
        !allowed.pre.is_empty()
            && allowed.major == version.major
            && allowed.minor == version.minor
            && allowed.patch == version.patch
    })
}

/// Minimum satisfying version of a declared range, if one can be resolved
///
/// # Examples
///
/// ```
/// use size_report::deps::range::min_version;
///
/// assert_eq!(min_version("^1.3.0").unwrap().to_string(), "1.3.0");
/// assert_eq!(min_version("~1.2.3").unwrap().to_string(), "1.2.3");
/// assert_eq!(min_version(">1.2.3").unwrap().to_string(), "1.2.4");
/// assert_eq!(min_version("2.x || ^1.4").unwrap().to_string(), "1.4.0");
/// assert!(min_version("github:user/repo").is_none());
/// ```
pub fn min_version(range: &str) -> Option<Version> {
    let mut min = VersionRange::parse(range)?.min_version()?;
    min.build = BuildMetadata::EMPTY;
    Some(min)
}

/// Distance between two different versions, in npm `semver.diff` terms
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VersionBump {
    /// Major version changed
    Major,
    /// Minor version changed
    Minor,
    /// Patch version changed
    Patch,
    /// Major changed and the higher version is a prerelease
    Premajor,
    /// Minor changed and the higher version is a prerelease
    Preminor,
    /// Patch changed and the higher version is a prerelease
    Prepatch,
    /// Only the prerelease changed
    Prerelease,
}

/// Classify the distance between `a` and `b`; `None` when they are equal
///
/// # Examples
///
/// ```
/// use semver::Version;
/// use size_report::deps::range::{version_bump, VersionBump};
///
/// let v = |s| Version::parse(s).unwrap();
/// assert_eq!(version_bump(&v("1.2.3"), &v("2.0.0")), Some(VersionBump::Major));
/// assert_eq!(version_bump(&v("1.2.3"), &v("1.2.4")), Some(VersionBump::Patch));
/// assert_eq!(version_bump(&v("1.2.3"), &v("1.2.3")), None);
/// ```
pub fn version_bump(a: &Version, b: &Version) -> Option<VersionBump> {
    let (low, high) = match a.cmp_precedence(b) {
        Ordering::Equal => return None,
        Ordering::Less => (a, b),
        Ordering::Greater => (b, a),
    };

    let same_core = low.major == high.major && low.minor == high.minor && low.patch == high.patch;
    if !low.pre.is_empty() && high.pre.is_empty() {
        if low.patch == 0 && low.minor == 0 {
            return Some(VersionBump::Major);
        }
        if same_core {
            if low.minor != 0 && low.patch == 0 {
                return Some(VersionBump::Minor);
            }
            return Some(VersionBump::Patch);
        }
    }

    let pre = !high.pre.is_empty();
    let bump = if a.major != b.major {
        if pre {
            VersionBump::Premajor
        } else {
            VersionBump::Major
        }
    } else if a.minor != b.minor {
        if pre {
            VersionBump::Preminor
        } else {
            VersionBump::Minor
        }
    } else if a.patch != b.patch {
        if pre {
            VersionBump::Prepatch
        } else {
            VersionBump::Patch
        }
    } else {
        VersionBump::Prerelease
    };
    Some(bump)
}
