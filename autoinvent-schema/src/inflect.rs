//! Display-name defaults derived from machine names.
//!
//! These are only called while a declaration is turned into a resolved record.
//! Any explicit label or query name in the declaration bypasses them.

use convert_case::{Case, Casing};

/// Nouns whose plural does not follow the suffix rules.
const IRREGULAR: &[(&str, &str)] = &[
    ("child", "children"),
    ("foot", "feet"),
    ("goose", "geese"),
    ("man", "men"),
    ("mouse", "mice"),
    ("person", "people"),
    ("tooth", "teeth"),
    ("woman", "women"),
];

/// Nouns that are the same in singular and plural.
const UNCOUNTABLE: &[&str] = &[
    "data",
    "deer",
    "equipment",
    "fish",
    "information",
    "metadata",
    "news",
    "series",
    "sheep",
    "species",
];

/// `"user_profile"` → `"User Profile"`.
pub fn title_case(value: &str) -> String {
    value.to_case(Case::Title)
}

/// `"User Profiles"` → `"userProfiles"`.
///
/// Only the first word is lowercased; the rest are joined as written, so
/// acronyms and digits survive (`"My APIs"` → `"myAPIs"`).
pub fn lower_camel(value: &str) -> String {
    let mut words = value.split_whitespace();
    let Some(first) = words.next() else {
        return String::new();
    };
    let mut out = first.to_lowercase();
    out.extend(words);
    out
}

/// Pluralize the last word of a display label: `"User Profile"` → `"User Profiles"`.
pub fn plural_noun(value: &str) -> String {
    let trimmed = value.trim_end();
    let split = trimmed.rfind(char::is_whitespace).map_or(0, |i| i + 1);
    let (head, word) = trimmed.split_at(split);
    if word.is_empty() {
        return value.to_string();
    }
    format!("{head}{}", plural_word(word))
}

fn plural_word(word: &str) -> String {
    let lower = word.to_lowercase();

    if UNCOUNTABLE.contains(&lower.as_str()) {
        return word.to_string();
    }

    if let Some((_, plural)) = IRREGULAR.iter().find(|(singular, _)| *singular == lower) {
        return match_initial_case(word, plural);
    }

    let consonant_y = lower.ends_with('y')
        && !["ay", "ey", "iy", "oy", "uy"]
            .iter()
            .any(|suffix| lower.ends_with(suffix));

    if ["s", "x", "z", "ch", "sh"]
        .iter()
        .any(|suffix| lower.ends_with(suffix))
    {
        format!("{word}es")
    } else if consonant_y {
        format!("{}ies", &word[..word.len() - 1])
    } else {
        format!("{word}s")
    }
}

fn match_initial_case(word: &str, replacement: &str) -> String {
    let mut chars = replacement.chars();
    match (word.chars().next(), chars.next()) {
        (Some(first), Some(r)) if first.is_uppercase() => {
            r.to_uppercase().chain(chars).collect()
        }
        _ => replacement.to_string(),
    }
}
