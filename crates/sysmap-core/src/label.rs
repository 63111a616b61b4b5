//! Compact node captions.

/// Caption for an entity box.
///
/// Shows `name (abbreviation)` when both fit within `max` characters, the
/// name alone when it fits, otherwise the abbreviation, otherwise the name
/// truncated to `max` characters followed by `...`.
pub fn display_label(name: &str, abbreviation: &str, max: usize) -> String {
    let name_len = name.chars().count();
    if name_len + abbreviation.chars().count() <= max {
        return if abbreviation.is_empty() {
            name.to_string()
        } else {
            format!("{name} ({abbreviation})")
        };
    }
    if name_len <= max {
        return name.to_string();
    }
    if !abbreviation.is_empty() {
        return abbreviation.to_string();
    }
    let truncated: String = name.chars().take(max).collect();
    format!("{truncated}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_pair() {
        assert_eq!(display_label("Agate", "AG", 40), "Agate (AG)");
        assert_eq!(display_label("Agate", "", 40), "Agate");
    }

    #[test]
    fn test_long_name_prefers_abbreviation() {
        let name = "Informationssystem für die Tierverkehrsdatenbank";
        assert_eq!(display_label(name, "TVD", 40), "TVD");
        assert_eq!(display_label(name, "", 10), "Informatio...");
    }

    #[test]
    fn test_name_fits_but_pair_does_not() {
        assert_eq!(display_label("Bundesamt für Landwirtschaft", "BLW-ABCDEFGHIJKLMN", 40), "Bundesamt für Landwirtschaft");
    }
}
