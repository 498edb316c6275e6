//! The three text normalizers used around the registry.
//!
//! Each has a different character-handling rule and a different consumer.
//! They are not interchangeable: a lookup built with one and queried with
//! another silently misses.
//!
//! - [`location_key`] — canonical secondary-index key (build and query time).
//! - [`filename_slug`] — draft data filenames only.
//! - [`city_token`] — the version+city query comparison only.

/// Join the four location fields into the canonical location key.
///
/// Each field is lower-cased and has all whitespace characters removed; no
/// other characters are touched. Fields are joined with `|` in the fixed
/// order island group, region code, province, city. Pure and total; callers
/// on both sides of the index must go through this exact function.
pub fn location_key(island_group: &str, region_code: &str, province: &str, city: &str) -> String {
    [island_group, region_code, province, city]
        .map(location_component)
        .join("|")
}

fn location_component(field: &str) -> String {
    field
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Sanitize one filename component for a draft data file.
///
/// Lower-cases, turns runs of whitespace into a single hyphen, strips
/// everything outside `[a-z0-9-]`, collapses hyphen runs, and trims edge
/// hyphens. This is a filename transform, not the location-key normalizer.
pub fn filename_slug(value: &str) -> String {
    let hyphenated = value
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-");

    let mut slug = String::with_capacity(hyphenated.len());
    for c in hyphenated.chars() {
        match c {
            'a'..='z' | '0'..='9' => slug.push(c),
            '-' => {
                if !slug.ends_with('-') {
                    slug.push('-');
                }
            }
            _ => {}
        }
    }
    slug.trim_matches('-').to_string()
}

/// Reduce a city name to the token compared by the version+city query.
///
/// Lower-cases and strips every character outside `[a-z0-9]`, including
/// hyphens, which [`filename_slug`] keeps. Applied identically to the query
/// argument and to each candidate record's city field.
pub fn city_token(value: &str) -> String {
    value
        .to_lowercase()
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_key_is_case_and_space_insensitive() {
        let canonical = location_key("Luzon", "06", "Iloilo", "Iloilo City");
        assert_eq!(canonical, "luzon|06|iloilo|iloilocity");
        assert_eq!(
            location_key("luzon", "06", "ILOILO", "iloilo  city"),
            canonical
        );
        assert_eq!(
            location_key(" Luzon ", "06", "Ilo ilo", "Iloilo\tCity"),
            canonical
        );
    }

    #[test]
    fn location_key_keeps_non_alphanumeric_characters() {
        // Only whitespace is removed; punctuation survives into the key.
        assert_eq!(
            location_key("Luzon", "06", "Iloilo", "Iloilo-City"),
            "luzon|06|iloilo|iloilo-city"
        );
    }

    #[test]
    fn filename_slug_hyphenates_and_strips() {
        assert_eq!(filename_slug("Iloilo City"), "iloilo-city");
        assert_eq!(filename_slug("  Puerto   Princesa  "), "puerto-princesa");
        assert_eq!(filename_slug("Parañaque"), "paraaque");
        assert_eq!(filename_slug("St. Niño!"), "st-nio");
        assert_eq!(filename_slug("a - b"), "a-b");
        assert_eq!(filename_slug("---"), "");
    }

    #[test]
    fn city_token_strips_everything_but_alphanumerics() {
        assert_eq!(city_token("Iloilo City"), "iloilocity");
        assert_eq!(city_token("iloilo-city"), "iloilocity");
        assert_eq!(city_token("ILOILO_CITY!"), "iloilocity");
    }

    #[test]
    fn the_three_normalizers_disagree_on_purpose() {
        let name = "Iloilo-City";
        assert_eq!(filename_slug(name), "iloilo-city");
        assert_eq!(city_token(name), "iloilocity");
        // And the location key keeps the hyphen while dropping only spaces.
        assert_eq!(location_component(name), "iloilo-city");
    }
}
