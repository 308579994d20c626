//! Generated placeholder images for records whose artwork fails to load.

const AVATAR_SERVICE: &str = "https://ui-avatars.com/api/";

/// Portrait placeholder derived from a display name.
pub fn avatar_url(name: &str) -> String {
    format!(
        "{}?name={}&background=22c55e&color=fff&size=128",
        AVATAR_SERVICE,
        urlencoding::encode(name)
    )
}

/// Logo placeholder derived from a company name ("Co" when blank).
pub fn logo_url(company: &str) -> String {
    let label = if company.trim().is_empty() { "Co" } else { company };
    format!(
        "{}?name={}&background=f3f4f6&color=6b7280&size=64",
        AVATAR_SERVICE,
        urlencoding::encode(label)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn avatar_is_deterministic() {
        assert_eq!(avatar_url("Holly Baer"), avatar_url("Holly Baer"));
        assert_eq!(
            avatar_url("Holly Baer"),
            "https://ui-avatars.com/api/?name=Holly%20Baer&background=22c55e&color=fff&size=128"
        );
    }

    #[test]
    fn avatar_escapes_query_characters() {
        let url = avatar_url("A&B=C");
        assert!(url.contains("name=A%26B%3DC&"));
    }

    #[test]
    fn blank_company_uses_default_label() {
        assert!(logo_url("").contains("name=Co&"));
        assert!(logo_url("Mylk Made").contains("name=Mylk%20Made&"));
    }
}
