//! Decoding of the small set of character entities the markup fragments may carry.

/// Entities recognized by [`decode_entities`], with their replacement.
const ENTITIES: [(&str, char); 7] = [
    ("&lt;", '<'),
    ("&gt;", '>'),
    ("&amp;", '&'),
    ("&quot;", '"'),
    ("&#39;", '\''),
    ("&#34;", '"'),
    ("&apos;", '\''),
];

/// Replaces the recognized entities in a single left-to-right pass.
///
/// Text produced by a replacement is never re-scanned, so `&amp;lt;` decodes to `&lt;`.
/// Unknown entities and stray ampersands are kept as-is.
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        rest = &rest[pos..];
        match ENTITIES
            .iter()
            .find(|(entity, _)| rest.starts_with(entity))
        {
            Some((entity, replacement)) => {
                out.push(*replacement);
                rest = &rest[entity.len()..];
            }
            None => {
                out.push('&');
                rest = &rest[1..];
            }
        }
    }
    out.push_str(rest);
    out
}
