//! # ntiid
//!
//! Typed, sortable, human-legible identifiers and their resolution.
//!
//! ## Format
//!
//! ```text
//! tag:nextthought.com,<date>:<provider->nttype<-specific>
//! ```
//!
//! Examples:
//! - `tag:nextthought.com,2011-10:Root`
//! - `tag:nextthought.com,2023-05-01:TestP-Test`
//! - `tag:nextthought.com,2011-10:NTI-HTML-With:Many:Colons`
//!
//! The date is a UTC calendar day. `provider` and `specific` are optional;
//! a `specific` always comes with a `provider`, and as the last segment it
//! may contain `-` and `:`.
//!
//! ## Pieces
//!
//! - [`grammar`]: parsing and validation ([`Ntiid`], [`NtiidParts`])
//! - [`safe`]: mapping free text into the provider and specific slots
//! - [`hash`]: fixed-width replacements for overlong specific parts
//! - [`make`]: building identifiers ([`NtiidBuilder`], [`make_ntiid`])
//! - [`resolver`]: type-keyed dispatch to pluggable resolvers
//!   ([`ResolverRegistry`])

mod error;
pub mod grammar;
pub mod hash;
pub mod make;
pub mod resolver;
pub mod safe;
mod types;

pub use error::{BoxError, NtiidError};
pub use grammar::{
    get_provider, get_specific, get_type, is_ntiid_char, is_ntiid_of_type, is_ntiid_of_types,
    is_valid_ntiid_string, parse, validate_ntiid_string, Ntiid, NtiidParts,
};
pub use hash::{
    hash_and_truncate, hash_ntiid, hash_to_fit, DIGEST_HEX_LEN, HASH_PREFIX_LEN, MIN_HASHED_LEN,
};
pub use make::{make_ntiid, NtiidBuilder, NtiidDate};
pub use resolver::{NtiidResolver, ResolverRegistry, SharedResolver};
pub use safe::{
    make_provider_safe, make_provider_safe_with, make_safe, make_specific_safe,
    make_specific_safe_with, SafeInput, SafeMode, PLACEHOLDER,
};
pub use types::*;
