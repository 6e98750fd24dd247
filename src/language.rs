/// Maps a market country to the language the ad copy should be written in.
///
/// The match is on exact string equality by product contract: the caller
/// sends canonical country names, and anything unrecognized (including
/// case variants) deliberately falls back to english.
pub fn map_country_to_language(country: &str) -> &'static str {
    match country {
        "France" => "french",
        "Mexico" => "spanish",
        "Italy" => "italian",
        "Germany" => "german",
        "Brazil" => "portuguese",
        _ => "english",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_known_countries() {
        assert_eq!(map_country_to_language("France"), "french");
        assert_eq!(map_country_to_language("Mexico"), "spanish");
        assert_eq!(map_country_to_language("Italy"), "italian");
        assert_eq!(map_country_to_language("Germany"), "german");
        assert_eq!(map_country_to_language("Brazil"), "portuguese");
    }

    #[test]
    fn falls_back_to_english() {
        assert_eq!(map_country_to_language("Japan"), "english");
        assert_eq!(map_country_to_language(""), "english");
        // Exact-match semantics: case variants are not normalized.
        assert_eq!(map_country_to_language("france"), "english");
        assert_eq!(map_country_to_language("BRAZIL"), "english");
    }
}
