//! Building NTIIDs from parts.

use chrono::{DateTime, NaiveDate, Utc};
use tracing::{debug, trace};

use crate::error::NtiidError;
use crate::grammar::{is_ntiid_char, Ntiid};
use crate::hash::{hash_to_fit, MIN_HASHED_LEN};
use crate::safe::{make_provider_safe, make_specific_safe};
use crate::types::TAG_NTC;

/// The date an NTIID is stamped with.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub enum NtiidDate {
    /// Current calendar day in UTC.
    #[default]
    Today,
    /// Unix timestamp in seconds. `0` means today. Converted in UTC, never
    /// local time.
    Timestamp(f64),
    /// An explicit calendar day.
    Day(NaiveDate),
}

impl NtiidDate {
    fn resolve(self, today: NaiveDate) -> Result<NaiveDate, NtiidError> {
        match self {
            NtiidDate::Today => Ok(today),
            NtiidDate::Timestamp(secs) if secs == 0.0 => Ok(today),
            NtiidDate::Timestamp(secs) => timestamp_day(secs),
            NtiidDate::Day(day) => Ok(day),
        }
    }
}

fn timestamp_day(secs: f64) -> Result<NaiveDate, NtiidError> {
    let out_of_range = || NtiidError::invalid(secs.to_string(), "timestamp out of range");
    if !secs.is_finite() {
        return Err(out_of_range());
    }
    DateTime::<Utc>::from_timestamp(secs.floor() as i64, 0)
        .map(|dt| dt.date_naive())
        .ok_or_else(out_of_range)
}

impl From<NaiveDate> for NtiidDate {
    fn from(day: NaiveDate) -> Self {
        NtiidDate::Day(day)
    }
}

impl From<DateTime<Utc>> for NtiidDate {
    fn from(at: DateTime<Utc>) -> Self {
        NtiidDate::Day(at.date_naive())
    }
}

impl From<f64> for NtiidDate {
    fn from(secs: f64) -> Self {
        NtiidDate::Timestamp(secs)
    }
}

impl From<i64> for NtiidDate {
    fn from(secs: i64) -> Self {
        NtiidDate::Timestamp(secs as f64)
    }
}

impl<T: Into<NtiidDate>> From<Option<T>> for NtiidDate {
    fn from(date: Option<T>) -> Self {
        date.map_or(NtiidDate::Today, Into::into)
    }
}

/// A provider or specific value and where it came from.
#[derive(Debug, Clone)]
enum Part {
    /// Caller text, safed at build time.
    Raw(String),
    /// Copied from a parsed identifier; already legal in its slot.
    Inherited(String),
}

#[derive(Debug, Clone)]
struct SpecificBound {
    max_len: usize,
    salt: String,
}

/// Builder for NTIIDs.
///
/// ```ignore
/// let id = NtiidBuilder::new()
///     .nttype("HTML")
///     .provider("NTI")
///     .specific("Chapter 1")
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct NtiidBuilder {
    date: Option<NtiidDate>,
    base_date: Option<String>,
    nttype: Option<String>,
    provider: Option<Part>,
    specific: Option<Part>,
    bound: Option<SpecificBound>,
}

impl NtiidBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from an existing identifier, inheriting its parts and date
    /// token. Explicit setters override what was inherited.
    ///
    /// Inherited provider and specific values are kept as they are; only
    /// values passed to the setters are safed.
    pub fn from_base(base: &Ntiid) -> Self {
        let parts = base.parts().clone();
        Self {
            base_date: Some(base.date_token().to_string()),
            nttype: Some(parts.nttype),
            provider: parts.provider.map(Part::Inherited),
            specific: parts.specific.map(Part::Inherited),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn date(mut self, date: impl Into<NtiidDate>) -> Self {
        self.date = Some(date.into());
        self
    }

    #[must_use]
    pub fn nttype(mut self, nttype: impl Into<String>) -> Self {
        self.nttype = Some(nttype.into());
        self
    }

    /// Sets the provider; it is strict-safed at build time.
    #[must_use]
    pub fn provider(mut self, provider: impl Into<String>) -> Self {
        self.provider = Some(Part::Raw(provider.into()));
        self
    }

    /// Sets the specific part; it is strict-safed at build time.
    #[must_use]
    pub fn specific(mut self, specific: impl Into<String>) -> Self {
        self.specific = Some(Part::Raw(specific.into()));
        self
    }

    /// Replaces a specific longer than `max_len` characters with a hashed
    /// form that fits in `max_len` (see [`hash_to_fit`]).
    ///
    /// `max_len` must be at least [`MIN_HASHED_LEN`]; a smaller bound fails
    /// at build time.
    #[must_use]
    pub fn max_specific_len(mut self, max_len: usize, salt: impl Into<String>) -> Self {
        self.bound = Some(SpecificBound {
            max_len,
            salt: salt.into(),
        });
        self
    }

    /// Builds the identifier, stamping today's UTC date when no date was set.
    pub fn build(&self) -> Result<Ntiid, NtiidError> {
        self.build_on(Utc::now().date_naive())
    }

    /// Builds the identifier with `today` standing in for the current day.
    pub fn build_on(&self, today: NaiveDate) -> Result<Ntiid, NtiidError> {
        let nttype = self
            .nttype
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or(NtiidError::MissingRequiredField { field: "nttype" })?;
        check_segment(nttype, "type")?;

        if self.specific.is_some() && self.provider.is_none() {
            return Err(NtiidError::MissingRequiredField { field: "provider" });
        }
        if let Some(bound) = &self.bound {
            if bound.max_len < MIN_HASHED_LEN {
                return Err(NtiidError::invalid(
                    bound.max_len.to_string(),
                    format!("max specific length must be at least {MIN_HASHED_LEN}"),
                ));
            }
        }

        let provider = match &self.provider {
            Some(Part::Raw(raw)) => Some(make_provider_safe(raw)?),
            Some(Part::Inherited(provider)) => {
                check_segment(provider, "provider")?;
                Some(provider.clone())
            }
            None => None,
        };
        let specific = self
            .specific
            .as_ref()
            .map(|part| self.bounded_specific(part))
            .transpose()?;

        let date = match (self.date, &self.base_date) {
            (Some(date), _) => date.resolve(today)?.format("%Y-%m-%d").to_string(),
            (None, Some(token)) => token.clone(),
            (None, None) => today.format("%Y-%m-%d").to_string(),
        };

        let mut composed = format!("{TAG_NTC},{date}:");
        if let Some(provider) = &provider {
            composed.push_str(provider);
            composed.push('-');
        }
        composed.push_str(nttype);
        if let Some(specific) = &specific {
            composed.push('-');
            composed.push_str(specific);
        }

        let id = Ntiid::try_from(composed)?;
        trace!(ntiid = %id, "built ntiid");
        Ok(id)
    }

    fn bounded_specific(&self, part: &Part) -> Result<String, NtiidError> {
        let (original, specific) = match part {
            Part::Raw(raw) => (raw, make_specific_safe(raw)?),
            Part::Inherited(specific) => (specific, specific.clone()),
        };
        match &self.bound {
            Some(bound) if specific.chars().count() > bound.max_len => {
                debug!(
                    length = specific.chars().count(),
                    max_len = bound.max_len,
                    "hashing overlong specific part"
                );
                hash_to_fit(original, &bound.salt, bound.max_len)
            }
            _ => Ok(specific),
        }
    }
}

/// Types and inherited providers are not safed, so they must already be a
/// single legal segment.
fn check_segment(value: &str, what: &str) -> Result<(), NtiidError> {
    if value.contains('-') {
        return Err(NtiidError::invalid(value, format!("{what} must not contain '-'")));
    }
    if let Some(bad) = value.chars().find(|c| !is_ntiid_char(*c)) {
        return Err(NtiidError::invalid(
            value,
            format!("illegal character {bad:?} in {what}"),
        ));
    }
    Ok(())
}

/// Builds an NTIID string from loose arguments.
///
/// `nttype` is required; a `specific` needs a `provider`, since a two-segment
/// identifier reads as `provider-nttype`.
pub fn make_ntiid(
    date: impl Into<NtiidDate>,
    nttype: Option<&str>,
    provider: Option<&str>,
    specific: Option<&str>,
) -> Result<String, NtiidError> {
    let builder = NtiidBuilder {
        date: Some(date.into()),
        nttype: nttype.map(str::to_string),
        provider: provider.map(|p| Part::Raw(p.to_string())),
        specific: specific.map(|s| Part::Raw(s.to_string())),
        ..NtiidBuilder::default()
    };
    builder.build().map(String::from)
}
