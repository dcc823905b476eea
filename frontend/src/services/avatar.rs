use shared::UserProfile;

pub const DEFAULT_AVATAR_COLOR: &str = "#9CA3AF";

pub const AVATAR_PALETTE: [&str; 10] = [
    "#F472B6", "#FB923C", "#FBBF24", "#34D399", "#2DD4BF",
    "#60A5FA", "#818CF8", "#A78BFA", "#E879F9", "#F87171",
];

/// Stable avatar color for a user id.
///
/// The hash folds over UTF-16 code units, the same units a browser client's
/// `charCodeAt` hash sees, so ids outside the BMP get the same color everywhere.
pub fn color_for(user_id: Option<&str>) -> &'static str {
    let id = match user_id {
        Some(id) if !id.is_empty() => id,
        _ => return DEFAULT_AVATAR_COLOR,
    };

    let hash = id.encode_utf16().fold(0i32, |hash, unit| {
        i32::from(unit).wrapping_add(hash.wrapping_shl(5).wrapping_sub(hash))
    });
    AVATAR_PALETTE[hash.unsigned_abs() as usize % AVATAR_PALETTE.len()]
}

/// Display name > first+last > first > last > email local-part > "?"
pub fn initials_for(user: &UserProfile) -> String {
    let non_blank = |value: &Option<String>| {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    };

    let display_name = non_blank(&user.display_name);
    let first_name = non_blank(&user.first_name);
    let last_name = non_blank(&user.last_name);

    let source = display_name
        .or_else(|| match (&first_name, &last_name) {
            (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
            _ => None,
        })
        .or(first_name)
        .or(last_name)
        .or_else(|| {
            non_blank(&user.email)
                .and_then(|email| email.split('@').next().map(str::to_string))
                .filter(|local| !local.is_empty())
        });

    match source {
        Some(source) => source
            .split_whitespace()
            .take(2)
            .filter_map(|token| token.chars().next())
            .flat_map(char::to_uppercase)
            .collect(),
        None => "?".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(display: Option<&str>, first: Option<&str>, last: Option<&str>, email: Option<&str>) -> UserProfile {
        UserProfile {
            id: None,
            display_name: display.map(str::to_string),
            first_name: first.map(str::to_string),
            last_name: last.map(str::to_string),
            email: email.map(str::to_string),
        }
    }

    #[test]
    fn test_color_is_deterministic() {
        let first = color_for(Some("user::42"));
        let second = color_for(Some("user::42"));
        assert_eq!(first, second);
        assert!(AVATAR_PALETTE.contains(&first));
    }

    #[test]
    fn test_color_default_for_missing_id() {
        assert_eq!(color_for(None), DEFAULT_AVATAR_COLOR);
        assert_eq!(color_for(Some("")), DEFAULT_AVATAR_COLOR);
    }

    #[test]
    fn test_color_rolling_hash() {
        // "a" hashes to 97 -> 97 % 10 = 7
        assert_eq!(color_for(Some("a")), AVATAR_PALETTE[7]);
        // "ab" -> 98 + (97 * 31) = 3105 -> 5
        assert_eq!(color_for(Some("ab")), AVATAR_PALETTE[5]);
    }

    #[test]
    fn test_color_hashes_utf16_units() {
        // U+1F600 is the surrogate pair D83D DE00: 0xDE00 + 0xD83D * 31 = 1772899 -> 9
        assert_eq!(color_for(Some("😀")), AVATAR_PALETTE[9]);
    }

    #[test]
    fn test_color_handles_long_ids_without_overflow() {
        let id = "x".repeat(500);
        assert!(AVATAR_PALETTE.contains(&color_for(Some(&id))));
    }

    #[test]
    fn test_display_name_wins() {
        assert_eq!(initials_for(&user(Some("Jo"), Some("Anna"), None, None)), "J");
        assert_eq!(initials_for(&user(Some("mary jane watson"), None, None, None)), "MJ");
    }

    #[test]
    fn test_name_precedence() {
        assert_eq!(initials_for(&user(None, Some("anna"), Some("smith"), None)), "AS");
        assert_eq!(initials_for(&user(None, Some("Anna"), None, None)), "A");
        assert_eq!(initials_for(&user(None, None, Some("Smith"), None)), "S");
        assert_eq!(initials_for(&user(Some("  "), None, Some("Smith"), None)), "S");
    }

    #[test]
    fn test_email_and_unknown() {
        assert_eq!(initials_for(&user(None, None, None, Some("jane.doe@example.com"))), "J");
        assert_eq!(initials_for(&user(None, None, None, Some("@example.com"))), "?");
        assert_eq!(initials_for(&UserProfile::default()), "?");
    }
}
