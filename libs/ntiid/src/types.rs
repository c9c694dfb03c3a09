//! Well-known NTIID constants and type tags.
//!
//! Type tags are plain strings; these are the ones the wider system issues
//! and registers resolvers for. Any other allow-listed token is still a valid
//! `nttype`.

// =============================================================================
// Grammar Literals
// =============================================================================

/// Fixed scheme and authority that every NTIID begins with.
pub const TAG_NTC: &str = "tag:nextthought.com";

/// Historical date token used for identifiers that are not tied to a day.
pub const DATE: &str = "2011-10";

/// The root of the addressing space; names no specific object.
pub const ROOT: &str = "tag:nextthought.com,2011-10:Root";

// =============================================================================
// Object Identity
// =============================================================================

pub const TYPE_ROOT: &str = "Root";
pub const TYPE_OID: &str = "OID";
pub const TYPE_UUID: &str = "UUID";
pub const TYPE_INTID: &str = "INTID";

// =============================================================================
// Content
// =============================================================================

pub const TYPE_HTML: &str = "HTML";
pub const TYPE_QUIZ: &str = "Quiz";

// =============================================================================
// Classes and Sessions
// =============================================================================

pub const TYPE_CLASS: &str = "Class";
pub const TYPE_CLASS_SECTION: &str = "ClassSection";
pub const TYPE_MEETINGROOM: &str = "MeetingRoom";
pub const TYPE_TRANSCRIPT: &str = "Transcript";
pub const TYPE_TRANSCRIPT_SUMMARY: &str = "TranscriptSummary";

// =============================================================================
// Named Entities
// =============================================================================

/// Base type for entities addressed by name; subtypes use `NamedEntity:<Kind>`.
pub const TYPE_NAMED_ENTITY: &str = "NamedEntity";
pub const TYPE_NAMED_ENTITY_USER: &str = "NamedEntity:User";
pub const TYPE_NAMED_ENTITY_COMMUNITY: &str = "NamedEntity:Community";

/// Returns the base of a `Base:Sub` type tag, if it has one.
///
/// `NamedEntity:User` → `Some("NamedEntity")`; `HTML` → `None`.
pub fn base_type(nttype: &str) -> Option<&str> {
    nttype
        .split_once(':')
        .map(|(base, _)| base)
        .filter(|base| !base.is_empty())
}

/// Every type tag defined in this module.
pub fn well_known_types() -> &'static [&'static str] {
    &[
        TYPE_ROOT,
        TYPE_OID,
        TYPE_UUID,
        TYPE_INTID,
        TYPE_HTML,
        TYPE_QUIZ,
        TYPE_CLASS,
        TYPE_CLASS_SECTION,
        TYPE_MEETINGROOM,
        TYPE_TRANSCRIPT,
        TYPE_TRANSCRIPT_SUMMARY,
        TYPE_NAMED_ENTITY,
        TYPE_NAMED_ENTITY_USER,
        TYPE_NAMED_ENTITY_COMMUNITY,
    ]
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_starts_with_authority() {
        assert!(ROOT.starts_with(TAG_NTC));
        assert!(ROOT.contains(DATE));
    }

    #[test]
    fn test_base_type() {
        assert_eq!(base_type(TYPE_NAMED_ENTITY_USER), Some(TYPE_NAMED_ENTITY));
        assert_eq!(base_type(TYPE_HTML), None);
        assert_eq!(base_type(":User"), None);
    }

    #[test]
    fn test_all_types_unique() {
        let types = well_known_types();
        let unique: std::collections::HashSet<_> = types.iter().collect();
        assert_eq!(types.len(), unique.len(), "Duplicate type tags found!");
    }

    #[test]
    fn test_types_never_contain_separator() {
        for nttype in well_known_types() {
            assert!(!nttype.contains('-'), "{nttype} contains '-'");
        }
    }
}
