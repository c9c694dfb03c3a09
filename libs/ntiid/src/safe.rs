//! Safing: mapping free text into the `provider` and `specific` slots.
//!
//! Input is decomposed with Unicode NFKD and every non-ASCII code point is
//! dropped, so accented letters lose their marks and characters with no
//! ASCII decomposition disappear. Each remaining character outside the
//! allowed set becomes exactly one `_`. Nothing is collapsed or trimmed.
//!
//! The normalization table is pinned to NFKD; changing it would change the
//! identifiers already issued for the same input.

use std::borrow::Cow;

use tracing::debug;
use unicode_normalization::UnicodeNormalization;

use crate::error::NtiidError;

/// Replacement for each disallowed character.
pub const PLACEHOLDER: char = '_';

/// Which alphabet safing projects onto.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SafeMode {
    /// Letters, digits, `_` and `.` only. Never produces `-` or `:`.
    #[default]
    Strict,
    /// Strict plus `! $ & ( ) * + , : @ ~`. For callers that control the
    /// consuming context; output may contain `:`.
    Lax,
}

impl SafeMode {
    /// Returns true if `c` passes through unchanged in this mode.
    pub fn allows(self, c: char) -> bool {
        let strict = c.is_ascii_alphanumeric() || matches!(c, '_' | '.');
        match self {
            SafeMode::Strict => strict,
            SafeMode::Lax => {
                strict
                    || matches!(
                        c,
                        '!' | '$' | '&' | '(' | ')' | '*' | '+' | ',' | ':' | '@' | '~'
                    )
            }
        }
    }
}

/// Text or raw bytes accepted by the safing functions.
///
/// Bytes are decoded as UTF-8 permissively; invalid sequences become
/// U+FFFD, which normalization then drops.
pub trait SafeInput {
    fn to_text(&self) -> Cow<'_, str>;
}

impl SafeInput for str {
    fn to_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self)
    }
}

impl SafeInput for String {
    fn to_text(&self) -> Cow<'_, str> {
        Cow::Borrowed(self.as_str())
    }
}

impl SafeInput for [u8] {
    fn to_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self)
    }
}

impl<const N: usize> SafeInput for [u8; N] {
    fn to_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self)
    }
}

impl SafeInput for Vec<u8> {
    fn to_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(self)
    }
}

impl<T: SafeInput + ?Sized> SafeInput for &T {
    fn to_text(&self) -> Cow<'_, str> {
        (**self).to_text()
    }
}

/// Safes `input` in the given mode.
///
/// Fails with [`NtiidError::UnrepresentableInput`] when the result would be
/// empty or nothing but [`PLACEHOLDER`].
pub fn make_safe<T: SafeInput + ?Sized>(input: &T, mode: SafeMode) -> Result<String, NtiidError> {
    let text = input.to_text();
    let safe: String = text
        .nfkd()
        .filter(char::is_ascii)
        .map(|c| if mode.allows(c) { c } else { PLACEHOLDER })
        .collect();

    if safe.chars().all(|c| c == PLACEHOLDER) {
        debug!(input = %text, ?mode, "no representable characters after safing");
        return Err(NtiidError::UnrepresentableInput {
            input: text.into_owned(),
        });
    }

    Ok(safe)
}

/// Strict safing for the `specific` slot.
pub fn make_specific_safe<T: SafeInput + ?Sized>(input: &T) -> Result<String, NtiidError> {
    make_safe(input, SafeMode::Strict)
}

pub fn make_specific_safe_with<T: SafeInput + ?Sized>(
    input: &T,
    mode: SafeMode,
) -> Result<String, NtiidError> {
    make_safe(input, mode)
}

/// Strict safing for the `provider` slot.
pub fn make_provider_safe<T: SafeInput + ?Sized>(input: &T) -> Result<String, NtiidError> {
    make_safe(input, SafeMode::Strict)
}

pub fn make_provider_safe_with<T: SafeInput + ?Sized>(
    input: &T,
    mode: SafeMode,
) -> Result<String, NtiidError> {
    make_safe(input, mode)
}
