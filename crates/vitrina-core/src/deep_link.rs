//! WhatsApp deep-link construction.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

const WHATSAPP_BASE: &str = "https://wa.me";

/// Characters left unescaped in the `text` parameter. Matches the set a
/// browser's `encodeURIComponent` preserves, so links built here are
/// byte-identical to ones built in a web client.
const MESSAGE_ESCAPE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Strips every non-digit character from a phone number.
///
/// `"+54 9 11 1234-5678"` becomes `"5491112345678"`.
#[must_use]
pub fn normalize_phone(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Builds `https://wa.me/<digits>?text=<escaped message>`.
///
/// `phone` is normalized first; callers are expected to have checked it
/// contains at least one digit.
#[must_use]
pub fn whatsapp_link(phone: &str, message: &str) -> String {
    let digits = normalize_phone(phone);
    let text = utf8_percent_encode(message, MESSAGE_ESCAPE);
    format!("{WHATSAPP_BASE}/{digits}?text={text}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_phone_strips_formatting() {
        assert_eq!(normalize_phone("+54 9 11 1234-5678"), "5491112345678");
    }

    #[test]
    fn normalize_phone_without_digits_is_empty() {
        assert_eq!(normalize_phone("call me"), "");
    }

    #[test]
    fn whatsapp_link_escapes_message() {
        let link = whatsapp_link("+54 9 11 1234-5678", "Hola! Quiero consultar:\n- Charizard x1");
        assert_eq!(
            link,
            "https://wa.me/5491112345678?text=Hola!%20Quiero%20consultar%3A%0A-%20Charizard%20x1"
        );
    }

    #[test]
    fn whatsapp_link_escapes_non_ascii_as_utf8() {
        let link = whatsapp_link("1", "Pokémon & más");
        assert_eq!(link, "https://wa.me/1?text=Pok%C3%A9mon%20%26%20m%C3%A1s");
    }
}
