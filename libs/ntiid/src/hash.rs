//! Length-bounding hashes for overlong specific parts.
//!
//! Digests are SHA-256, hex-encoded upper-case (64 characters). The trailing
//! four-digit code is a length in characters (Unicode scalar values, not
//! bytes), zero-padded and taken modulo 10000.

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::NtiidError;
use crate::grammar::Ntiid;
use crate::make::NtiidBuilder;
use crate::safe::{make_specific_safe, PLACEHOLDER};

/// Number of leading safe characters kept as a readable anchor.
pub const HASH_PREFIX_LEN: usize = 8;

/// Width of the hex digest in a hashed specific part.
pub const DIGEST_HEX_LEN: usize = 64;

/// Length of the shortest hashed form, `<DIGEST>_<NNNN>`.
pub const MIN_HASHED_LEN: usize = DIGEST_HEX_LEN + 5;

const LENGTH_MODULUS: usize = 10_000;

/// Replaces `specific` with `<prefix>_<DIGEST>_<NNNN>`.
///
/// The digest covers the strict-safe form of `specific` followed by `salt`
/// (the raw text when nothing in it is representable). `prefix` is up to
/// [`HASH_PREFIX_LEN`] leading safe characters; it is omitted together with
/// its underscore when empty. `NNNN` is the character length of `specific`.
pub fn hash_and_truncate(specific: &str, salt: &str) -> String {
    hash_with_prefix(specific, salt, HASH_PREFIX_LEN)
}

/// Like [`hash_and_truncate`], but the result is at most `max_len`
/// characters long.
///
/// The readable prefix shrinks, down to nothing, to fit. Fails with
/// [`NtiidError::InvalidFormat`] when `max_len` is below
/// [`MIN_HASHED_LEN`].
pub fn hash_to_fit(specific: &str, salt: &str, max_len: usize) -> Result<String, NtiidError> {
    if max_len < MIN_HASHED_LEN {
        return Err(NtiidError::invalid(
            max_len.to_string(),
            format!("max specific length must be at least {MIN_HASHED_LEN}"),
        ));
    }
    let prefix_len = HASH_PREFIX_LEN.min(max_len.saturating_sub(MIN_HASHED_LEN + 1));
    Ok(hash_with_prefix(specific, salt, prefix_len))
}

/// Replaces the specific part of `candidate` with `<DIGEST>_<NNNN>`.
///
/// The digest covers the whole identifier string followed by `salt`; `NNNN`
/// is the identifier's length in characters. Date, provider and type are
/// kept.
pub fn hash_ntiid(candidate: &str, salt: &str) -> Result<Ntiid, NtiidError> {
    let base = Ntiid::parse(candidate)?;
    let digest = digest_hex(base.as_str(), salt);
    let specific = format_hashed(None, &digest, base.as_str().chars().count());

    debug!(ntiid = %base, "hashing ntiid specific part");
    NtiidBuilder::from_base(&base).specific(specific).build()
}

fn hash_with_prefix(specific: &str, salt: &str, prefix_len: usize) -> String {
    let safe = make_specific_safe(specific).ok();
    let digest = digest_hex(safe.as_deref().unwrap_or(specific), salt);

    let prefix = safe
        .as_deref()
        .map(|safe| anchor(safe, prefix_len))
        .filter(|p| !p.is_empty());
    format_hashed(prefix, &digest, specific.chars().count())
}

fn anchor(safe: &str, prefix_len: usize) -> &str {
    let end = safe
        .char_indices()
        .nth(prefix_len)
        .map_or(safe.len(), |(idx, _)| idx);
    safe[..end].trim_end_matches(PLACEHOLDER)
}

fn digest_hex(data: &str, salt: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode_upper(hasher.finalize())
}

fn format_hashed(prefix: Option<&str>, digest: &str, length: usize) -> String {
    let code = length % LENGTH_MODULUS;
    match prefix {
        Some(prefix) => format!("{prefix}_{digest}_{code:04}"),
        None => format!("{digest}_{code:04}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_ntiid_reference_value() {
        let ntiid = "tag:nextthought.com,2011-10:NTI-HTML-764853119912700730";
        let hashed = hash_ntiid(ntiid, "0000").unwrap();
        assert_eq!(
            hashed.as_str(),
            "tag:nextthought.com,2011-10:NTI-HTML-5C60CE517CB52C8631FCBA5F2FD3356CACEF712B2D7665508F2F6CE1712489A3_0055"
        );
        assert_eq!(hashed.date_token(), "2011-10");
    }

    #[test]
    fn test_hash_ntiid_keeps_provider() {
        let ntiid = "tag:nextthought.com,2011-10:a~b-HTML-764853119912700730";
        let hashed = hash_ntiid(ntiid, "0000").unwrap();
        assert_eq!(hashed.provider(), Some("a~b"));
        assert_eq!(hashed.nttype(), "HTML");
        assert!(hashed.specific().unwrap().ends_with("_0055"));
    }

    #[test]
    fn test_hash_ntiid_requires_provider() {
        let err = hash_ntiid("tag:nextthought.com,2011-10:HTML", "").unwrap_err();
        assert!(err.is_missing_field());
    }

    #[test]
    fn test_hash_ntiid_rejects_invalid() {
        assert!(hash_ntiid("not an ntiid", "").unwrap_err().is_invalid_format());
    }

    #[test]
    fn test_truncate_layout() {
        let specific = "Chapter 1: An Introduction to Everything";
        let out = hash_and_truncate(specific, "salt");
        let pieces: Vec<&str> = out.split('_').collect();
        assert_eq!(pieces.len(), 3, "{out}");
        assert_eq!(pieces[0], "Chapter");
        assert_eq!(pieces[1].len(), DIGEST_HEX_LEN);
        assert!(pieces[1].chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_lowercase()));
        assert_eq!(pieces[2], "0040");
    }

    #[test]
    fn test_truncate_is_deterministic() {
        let a = hash_and_truncate("some long specific value", "pepper");
        let b = hash_and_truncate("some long specific value", "pepper");
        assert_eq!(a, b);
    }

    #[test]
    fn test_salt_changes_digest() {
        let a = hash_and_truncate("some long specific value", "pepper");
        let b = hash_and_truncate("some long specific value", "peppex");
        assert_ne!(a, b);
        assert_eq!(a[..9], b[..9]);
    }

    #[test]
    fn test_truncate_without_representable_prefix() {
        let out = hash_and_truncate("Алибра школа", "");
        assert_eq!(out.len(), DIGEST_HEX_LEN + 5);
        assert!(out.ends_with("_0012"));
    }

    #[test]
    fn test_fit_shrinks_prefix() {
        let specific = "Chapter 1: An Introduction to Everything";
        assert_eq!(hash_to_fit(specific, "s", 100).unwrap(), hash_and_truncate(specific, "s"));

        let out = hash_to_fit(specific, "s", MIN_HASHED_LEN + 4).unwrap();
        assert!(out.starts_with("Cha_"), "{out}");
        assert_eq!(out.chars().count(), MIN_HASHED_LEN + 4);

        let out = hash_to_fit(specific, "s", MIN_HASHED_LEN).unwrap();
        assert_eq!(out.len(), MIN_HASHED_LEN);
        assert!(out.ends_with("_0040"));
    }

    #[test]
    fn test_fit_below_minimum_fails() {
        let err = hash_to_fit("anything", "s", MIN_HASHED_LEN - 1).unwrap_err();
        assert!(err.is_invalid_format());
    }

    #[test]
    fn test_truncate_output_is_strict_safe() {
        let out = hash_and_truncate("a/b?c d-e:f", "s");
        assert_eq!(make_specific_safe(&out).unwrap(), out);
    }
}
