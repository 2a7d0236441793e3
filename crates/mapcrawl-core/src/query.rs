//! Search query assembly from the keyword/location inputs.

use crate::ConfigError;

/// Builds the feed search text from a keyword, a country and an optional city.
///
/// Produces `"{keyword} in {city}, {country}"`, or `"{keyword} in {country}"`
/// when the city is absent or blank. All inputs are trimmed first.
///
/// # Errors
///
/// Returns [`ConfigError::MissingField`] when the keyword or country is blank.
pub fn build_search_query(
    keyword: &str,
    country: &str,
    city: Option<&str>,
) -> Result<String, ConfigError> {
    let keyword = keyword.trim();
    let country = country.trim();
    if keyword.is_empty() {
        return Err(ConfigError::MissingField("keyword"));
    }
    if country.is_empty() {
        return Err(ConfigError::MissingField("country"));
    }

    match city.map(str::trim).filter(|c| !c.is_empty()) {
        Some(city) => Ok(format!("{keyword} in {city}, {country}")),
        None => Ok(format!("{keyword} in {country}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn includes_city_when_present() {
        let query = build_search_query("logistics", "Saudi Arabia", Some("Riyadh")).unwrap();
        assert_eq!(query, "logistics in Riyadh, Saudi Arabia");
    }

    #[test]
    fn omits_city_when_absent() {
        let query = build_search_query("freight", "Saudi Arabia", None).unwrap();
        assert_eq!(query, "freight in Saudi Arabia");
    }

    #[test]
    fn blank_city_is_treated_as_absent() {
        let query = build_search_query("freight", "China", Some("   ")).unwrap();
        assert_eq!(query, "freight in China");
    }

    #[test]
    fn trims_inputs() {
        let query = build_search_query("  freight ", " China ", Some(" Shenzhen ")).unwrap();
        assert_eq!(query, "freight in Shenzhen, China");
    }

    #[test]
    fn blank_keyword_is_rejected() {
        let err = build_search_query(" ", "China", None).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("keyword")));
    }

    #[test]
    fn blank_country_is_rejected() {
        let err = build_search_query("freight", "", Some("Riyadh")).unwrap_err();
        assert!(matches!(err, ConfigError::MissingField("country")));
    }
}
