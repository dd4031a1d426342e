use hyperswitch_masking::Secret;

/// Postal address attached to an order, as read from the store.
#[derive(Debug, Clone)]
pub struct OrderAddress {
    pub first_name: Secret<String>,
    pub last_name: Secret<String>,
    /// Free-form street line; decomposed by [`split_street`] at encoding
    /// time.
    pub street: Secret<String>,
    pub postal_code: Secret<String>,
    pub city: String,
    pub country_code: String,
    pub email: Secret<String>,
    pub telephone: Option<Secret<String>>,
}

/// Carrier-provided pickup location, already split into address fields.
#[derive(Debug, Clone)]
pub struct PickupLocation {
    pub street: Secret<String>,
    pub postal_code: Secret<String>,
    pub city: String,
    pub country_code: String,
    pub house_number: Option<Secret<String>>,
    pub number_suffix: Option<Secret<String>>,
}

/// Street name / house number / suffix split of a free-form street line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StreetDecomposition {
    pub street: String,
    pub house_number: Option<String>,
    pub number_suffix: Option<String>,
}

/// Splits a raw street line on the last whitespace token that starts with a
/// digit: the token's digit run is the house number, its remainder together
/// with any trailing tokens is the suffix. A line without a numeric token is
/// returned whole as the street name, and a leading numeric token keeps the
/// remainder as the street ("12 Main Street").
pub fn split_street(raw: &str) -> StreetDecomposition {
    let tokens: Vec<&str> = raw.split_whitespace().collect();
    let number_position = tokens
        .iter()
        .rposition(|token| token.starts_with(|c: char| c.is_ascii_digit()));

    let Some(position) = number_position else {
        return StreetDecomposition {
            street: raw.trim().to_string(),
            ..Default::default()
        };
    };

    let token = tokens[position];
    let digits_end = token
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(token.len());
    let house_number = token[..digits_end].to_string();

    let mut suffix_parts: Vec<&str> = Vec::new();
    if digits_end < token.len() {
        suffix_parts.push(&token[digits_end..]);
    }
    suffix_parts.extend_from_slice(&tokens[position + 1..]);
    let suffix = suffix_parts.join(" ");

    if position == 0 {
        return StreetDecomposition {
            street: suffix,
            house_number: Some(house_number),
            number_suffix: None,
        };
    }

    StreetDecomposition {
        street: tokens[..position].join(" "),
        house_number: Some(house_number),
        number_suffix: (!suffix.is_empty()).then_some(suffix),
    }
}

#[cfg(test)]
mod tests {
    use super::{split_street, StreetDecomposition};

    #[test]
    fn splits_street_with_attached_suffix() {
        assert_eq!(
            split_street("Main Street 12B"),
            StreetDecomposition {
                street: "Main Street".to_string(),
                house_number: Some("12".to_string()),
                number_suffix: Some("B".to_string()),
            }
        );
    }

    #[test]
    fn splits_street_with_detached_suffix() {
        assert_eq!(
            split_street("Kerkstraat 12 a"),
            StreetDecomposition {
                street: "Kerkstraat".to_string(),
                house_number: Some("12".to_string()),
                number_suffix: Some("a".to_string()),
            }
        );
    }

    #[test]
    fn keeps_whole_line_without_numeric_token() {
        assert_eq!(
            split_street("Onbekende weg"),
            StreetDecomposition {
                street: "Onbekende weg".to_string(),
                house_number: None,
                number_suffix: None,
            }
        );
    }

    #[test]
    fn number_first_line_keeps_remainder_as_street() {
        assert_eq!(
            split_street("12 Main Street"),
            StreetDecomposition {
                street: "Main Street".to_string(),
                house_number: Some("12".to_string()),
                number_suffix: None,
            }
        );
    }

    #[test]
    fn picks_last_numeric_token() {
        assert_eq!(
            split_street("1e Constantijn Huygensstraat 24"),
            StreetDecomposition {
                street: "1e Constantijn Huygensstraat".to_string(),
                house_number: Some("24".to_string()),
                number_suffix: None,
            }
        );
    }
}
