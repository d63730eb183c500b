// File: src/invite/utils.rs
use once_cell::sync::Lazy;
use regex::Regex;

static PHONE_NUMBER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?\d{3,}$").unwrap());
static PHONE_SEPARATORS_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\-\.\(\)]").unwrap());

pub fn get_digits_only(text: &str) -> String {
    text.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Metin bir telefon numarası olabilir mi? Boşluk, tire, nokta ve parantezler yok sayılır.
pub fn is_maybe_a_phone_number(text: &str) -> bool {
    let stripped = PHONE_SEPARATORS_RE.replace_all(text, "");
    PHONE_NUMBER_RE.is_match(&stripped)
}

/// Çevirme servisine gönderilecek biçim: `+` ve yalnızca rakamlar.
pub fn normalize_phone_number(text: &str) -> Option<String> {
    if !is_maybe_a_phone_number(text) {
        return None;
    }
    Some(format!("+{}", get_digits_only(text)))
}

/// Davet bağlantısı: genel taban adres + oda adı (sorgu parametreleri olmadan).
pub fn build_invite_url(public_base_url: &str, room: &str) -> String {
    format!("{}/{}", public_base_url.trim_end_matches('/'), room)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digits_only_strips_formatting() {
        assert_eq!(get_digits_only("+90 (555) 111-22.33"), "905551112233");
    }

    #[test]
    fn recognizes_phone_like_text() {
        assert!(is_maybe_a_phone_number("+90 555 111 22 33"));
        assert!(is_maybe_a_phone_number("(212) 555-0100"));
        assert!(!is_maybe_a_phone_number("ayse@sentiric.cloud"));
        assert!(!is_maybe_a_phone_number("12"));
        assert!(!is_maybe_a_phone_number("+"));
    }

    #[test]
    fn normalizes_to_e164_like_form() {
        assert_eq!(normalize_phone_number("0 (555) 111-2233").as_deref(), Some("+05551112233"));
        assert_eq!(normalize_phone_number("+1 212 555 0100").as_deref(), Some("+12125550100"));
        assert_eq!(normalize_phone_number("destek"), None);
    }

    #[test]
    fn invite_url_joins_base_and_room() {
        assert_eq!(
            build_invite_url("https://meet.sentiric.cloud/", "haftalik-toplanti"),
            "https://meet.sentiric.cloud/haftalik-toplanti"
        );
    }
}
