//! Registry of canonical display names for frequently collected substances.
//!
//! Canonical forms are the Korean display names used across the curated
//! catalog; aliases cover English names, trade shorthand, and formulas that
//! show up in raw MSDS extractions.

struct SynonymEntry {
    canonical: &'static str,
    aliases: &'static [&'static str],
}

const REGISTRY: &[SynonymEntry] = &[
    SynonymEntry {
        canonical: "에탄올",
        aliases: &["ethanol", "ethyl alcohol", "etoh", "주정"],
    },
    SynonymEntry {
        canonical: "염화나트륨",
        aliases: &["sodium chloride", "nacl", "소금"],
    },
    SynonymEntry {
        canonical: "정제수",
        aliases: &["water", "aqua", "h2o", "물"],
    },
    SynonymEntry {
        canonical: "수산화나트륨",
        aliases: &["sodium hydroxide", "naoh", "가성소다"],
    },
    SynonymEntry {
        canonical: "이소프로필알코올",
        aliases: &["isopropyl alcohol", "isopropanol", "ipa", "2-propanol"],
    },
    SynonymEntry {
        canonical: "글리세린",
        aliases: &["glycerin", "glycerol", "글리세롤"],
    },
    SynonymEntry {
        canonical: "과산화수소",
        aliases: &["hydrogen peroxide", "h2o2"],
    },
    SynonymEntry {
        canonical: "구연산",
        aliases: &["citric acid", "시트르산"],
    },
];

/// Canonical display name for a raw ingredient name, if the registry knows
/// it. Matching is case-insensitive over both aliases and canonical forms.
pub(crate) fn canonical_for(name: &str) -> Option<&'static str> {
    let folded = name.trim().to_lowercase();
    if folded.is_empty() {
        return None;
    }

    REGISTRY
        .iter()
        .find(|entry| {
            entry.canonical.to_lowercase() == folded
                || entry.aliases.iter().any(|alias| alias.to_lowercase() == folded)
        })
        .map(|entry| entry.canonical)
}
