//! Rich-text (HTML) body to plain text conversion for captions.

use once_cell::sync::Lazy;
use regex::Regex;

static LINE_BREAKS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)<br\s*/?>|</p\s*>").expect("valid line break regex")
});
static TAGS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<[^>]*>").expect("valid tag regex"));
static ENTITIES: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"&(#[0-9]+|#[xX][0-9a-fA-F]+|[a-zA-Z]+);")
        .expect("valid entity regex")
});

/// Convert an HTML fragment into caption text.
///
/// `<br>` and closing `</p>` become line breaks, every other tag is dropped,
/// common entities are decoded and surrounding whitespace is trimmed.
pub fn rich_text_to_plain(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }
    let broken = LINE_BREAKS.replace_all(html, "\n");
    let stripped = TAGS.replace_all(&broken, "");
    let decoded = ENTITIES.replace_all(&stripped, |caps: &regex::Captures| {
        decode_entity(&caps[1]).unwrap_or_else(|| caps[0].to_string())
    });
    decoded.trim().to_string()
}

fn decode_entity(name: &str) -> Option<String> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse().ok()?,
        };
        return char::from_u32(code).map(String::from);
    }
    let ch = match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        _ => return None,
    };
    Some(ch.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_and_breaks_become_newlines() {
        let html = "<p>Taipei<br>at dusk</p><p>Second <strong>line</strong></p>";
        assert_eq!(rich_text_to_plain(html), "Taipei\nat dusk\nSecond line");
    }

    #[test]
    fn entities_are_decoded_and_unknown_ones_kept() {
        assert_eq!(
            rich_text_to_plain("Tea &amp; cake &#26481; &#x4eac; &bogus;"),
            "Tea & cake 東 京 &bogus;"
        );
    }

    #[test]
    fn self_closing_break_variants() {
        assert_eq!(rich_text_to_plain("a<BR/>b<br />c"), "a\nb\nc");
        assert_eq!(rich_text_to_plain(""), "");
    }
}
