//! NTIID grammar: parsing and validation.
//!
//! ```text
//! tag:nextthought.com,<date>:<nttype>
//! tag:nextthought.com,<date>:<provider>-<nttype>
//! tag:nextthought.com,<date>:<provider>-<nttype>-<specific>
//! ```
//!
//! The segment list is split on `-` into at most three pieces. The last piece
//! is greedy, so `specific` may itself contain `-` and `:`.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::NtiidError;
use crate::types::{TAG_NTC, TYPE_ROOT};

/// Maximum number of `-` separated segments after the date.
const MAX_SEGMENTS: usize = 3;

/// Returns true for characters permitted anywhere in an NTIID string.
///
/// ASCII letters and digits plus `- . _ ~ ! $ & ( ) * + , : @`.
pub fn is_ntiid_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '-' | '.' | '_' | '~' | '!' | '$' | '&' | '(' | ')' | '*' | '+' | ',' | ':' | '@'
        )
}

/// The semantic fields of an NTIID.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct NtiidParts {
    /// Issuing namespace, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,

    /// Kind of the referenced object.
    pub nttype: String,

    /// Discriminator within the type. May contain `-` and `:`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specific: Option<String>,
}

impl NtiidParts {
    /// Joins the present segments with `-` in `provider, nttype, specific` order.
    pub fn segments(&self) -> String {
        let mut out = String::new();
        if let Some(provider) = &self.provider {
            out.push_str(provider);
            out.push('-');
        }
        out.push_str(&self.nttype);
        if let Some(specific) = &self.specific {
            out.push('-');
            out.push_str(specific);
        }
        out
    }

    /// Returns true for the placeholder parts of [`crate::ROOT`].
    pub fn is_root(&self) -> bool {
        self.provider.is_none() && self.specific.is_none() && self.nttype == TYPE_ROOT
    }
}

/// A validated NTIID string together with its parsed parts.
///
/// Values only come from [`Ntiid::parse`] or the builder, so every `Ntiid`
/// is well-formed. Equality, ordering and hashing use the canonical string.
#[derive(Debug, Clone)]
pub struct Ntiid {
    raw: String,
    date: String,
    parts: NtiidParts,
}

impl Ntiid {
    /// Parses and validates an NTIID string.
    pub fn parse(candidate: &str) -> Result<Self, NtiidError> {
        let (date, parts) = split(candidate)?;
        Ok(Self {
            raw: candidate.to_string(),
            date: date.to_string(),
            parts,
        })
    }

    /// Returns the canonical string.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Returns the parsed parts.
    pub fn parts(&self) -> &NtiidParts {
        &self.parts
    }

    /// Consumes the identifier, returning its parts.
    pub fn into_parts(self) -> NtiidParts {
        self.parts
    }

    pub fn provider(&self) -> Option<&str> {
        self.parts.provider.as_deref()
    }

    pub fn nttype(&self) -> &str {
        &self.parts.nttype
    }

    pub fn specific(&self) -> Option<&str> {
        self.parts.specific.as_deref()
    }

    /// Returns the date token exactly as it appears in the string
    /// (`YYYY`, `YYYY-MM` or `YYYY-MM-DD`).
    pub fn date_token(&self) -> &str {
        &self.date
    }

    pub fn is_root(&self) -> bool {
        self.parts.is_root()
    }

    pub fn is_of_type(&self, nttype: &str) -> bool {
        self.parts.nttype == nttype
    }
}

impl PartialEq for Ntiid {
    fn eq(&self, other: &Self) -> bool {
        self.raw == other.raw
    }
}

impl Eq for Ntiid {}

impl PartialOrd for Ntiid {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Ntiid {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.raw.cmp(&other.raw)
    }
}

impl std::hash::Hash for Ntiid {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl PartialEq<str> for Ntiid {
    fn eq(&self, other: &str) -> bool {
        self.raw == other
    }
}

impl PartialEq<&str> for Ntiid {
    fn eq(&self, other: &&str) -> bool {
        self.raw == *other
    }
}

impl fmt::Display for Ntiid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl FromStr for Ntiid {
    type Err = NtiidError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Ntiid {
    type Error = NtiidError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let (date, parts) = split(&value)?;
        let date = date.to_string();
        Ok(Self {
            raw: value,
            date,
            parts,
        })
    }
}

impl From<Ntiid> for String {
    fn from(id: Ntiid) -> Self {
        id.raw
    }
}

impl AsRef<str> for Ntiid {
    fn as_ref(&self) -> &str {
        &self.raw
    }
}

impl Serialize for Ntiid {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Ntiid {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::try_from(s).map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Free functions
// =============================================================================

/// Parses `candidate` into its parts.
pub fn parse(candidate: &str) -> Result<NtiidParts, NtiidError> {
    split(candidate).map(|(_, parts)| parts)
}

/// Checks that `candidate` is a well-formed NTIID without keeping the parts.
pub fn validate_ntiid_string(candidate: &str) -> Result<(), NtiidError> {
    split(candidate).map(|_| ())
}

pub fn is_valid_ntiid_string(candidate: &str) -> bool {
    validate_ntiid_string(candidate).is_ok()
}

/// Returns the type of a valid NTIID, or `None` if the string is invalid.
pub fn get_type(candidate: &str) -> Option<String> {
    parse(candidate).ok().map(|parts| parts.nttype)
}

/// Returns the provider of a valid NTIID, if it has one.
pub fn get_provider(candidate: &str) -> Option<String> {
    parse(candidate).ok().and_then(|parts| parts.provider)
}

/// Returns the specific part of a valid NTIID, if it has one.
pub fn get_specific(candidate: &str) -> Option<String> {
    parse(candidate).ok().and_then(|parts| parts.specific)
}

/// Returns true if `candidate` is a valid NTIID of exactly `nttype`.
pub fn is_ntiid_of_type(candidate: &str, nttype: &str) -> bool {
    get_type(candidate).is_some_and(|t| t == nttype)
}

/// Returns whichever of `nttypes` matches the type of `candidate`.
pub fn is_ntiid_of_types<'t>(candidate: &str, nttypes: &[&'t str]) -> Option<&'t str> {
    let found = get_type(candidate)?;
    nttypes.iter().copied().find(|t| *t == found)
}

// =============================================================================
// Splitting
// =============================================================================

fn split(candidate: &str) -> Result<(&str, NtiidParts), NtiidError> {
    if candidate.is_empty() {
        return Err(NtiidError::invalid(candidate, "empty string"));
    }

    // Whole-string check first; segment rules below are looser.
    if let Some(bad) = candidate.chars().find(|c| !is_ntiid_char(*c)) {
        return Err(NtiidError::invalid(
            candidate,
            format!("illegal character {bad:?}"),
        ));
    }

    let rest = candidate
        .strip_prefix(TAG_NTC)
        .and_then(|rest| rest.strip_prefix(','))
        .ok_or_else(|| NtiidError::invalid(candidate, format!("must start with '{TAG_NTC},'")))?;

    let Some((date, segments)) = rest.split_once(':') else {
        return Err(NtiidError::invalid(candidate, "missing ':' after date"));
    };

    check_date_token(date).map_err(|reason| NtiidError::invalid(candidate, reason))?;
    let parts = split_segments(segments).map_err(|reason| NtiidError::invalid(candidate, reason))?;

    Ok((date, parts))
}

/// Accepts the tag-URI date forms `YYYY`, `YYYY-MM` and `YYYY-MM-DD`.
fn check_date_token(token: &str) -> Result<(), String> {
    const WIDTHS: [usize; 3] = [4, 2, 2];

    let fields: Vec<&str> = token.split('-').collect();
    let well_shaped = fields.len() <= WIDTHS.len()
        && fields.iter().zip(WIDTHS).all(|(field, width)| {
            field.len() == width && field.bytes().all(|b| b.is_ascii_digit())
        });
    if !well_shaped {
        return Err(format!("malformed date '{token}'"));
    }

    let numbers: Option<Vec<u32>> = fields.iter().map(|f| f.parse().ok()).collect();
    let numbers = numbers.ok_or_else(|| format!("malformed date '{token}'"))?;
    let year = numbers[0] as i32;
    let month = numbers.get(1).copied().unwrap_or(1);
    let day = numbers.get(2).copied().unwrap_or(1);

    NaiveDate::from_ymd_opt(year, month, day)
        .map(|_| ())
        .ok_or_else(|| format!("date '{token}' is not a calendar date"))
}

fn split_segments(segments: &str) -> Result<NtiidParts, String> {
    let pieces: Vec<&str> = segments.splitn(MAX_SEGMENTS, '-').collect();
    let (provider, nttype, specific) = match pieces.as_slice() {
        [nttype] => (None, *nttype, None),
        [provider, nttype] => (Some(*provider), *nttype, None),
        [provider, nttype, specific] => (Some(*provider), *nttype, Some(*specific)),
        _ => return Err("no segments after date".to_string()),
    };

    if nttype.is_empty() {
        return Err("empty type segment".to_string());
    }
    if provider.is_some_and(str::is_empty) {
        return Err("empty provider segment".to_string());
    }
    if specific.is_some_and(str::is_empty) {
        return Err("empty specific segment".to_string());
    }

    Ok(NtiidParts {
        provider: provider.map(str::to_string),
        nttype: nttype.to_string(),
        specific: specific.map(str::to_string),
    })
}

// =============================================================================
// Tests
// =============================================================================
