use html_escape::encode_double_quoted_attribute;
use serde::Serialize;

/// MIME type of the embedded structured-data payload
pub const JSON_LD_MIME: &str = "application/ld+json";

/// Serialize a schema object to compact JSON-LD text
pub fn to_json_ld<T: Serialize + ?Sized>(schema: &T) -> Result<String, serde_json::Error> {
    serde_json::to_string(schema)
}

/// Render a `<script type="application/ld+json">` element for page output.
///
/// `<`, `>` and `&` inside the payload are written as JSON unicode escapes so
/// no string value can close the script element early. The parsed JSON is
/// unchanged.
pub fn script_tag<T: Serialize + ?Sized>(schema: &T) -> Result<String, serde_json::Error> {
    let payload = escape_for_script(&to_json_ld(schema)?);
    Ok(format!(r#"<script type="{JSON_LD_MIME}">{payload}</script>"#))
}

/// Same as [`script_tag`] with an `id` attribute, e.g. `structured-data-article`
pub fn script_tag_with_id<T: Serialize + ?Sized>(
    schema: &T,
    id: &str,
) -> Result<String, serde_json::Error> {
    let payload = escape_for_script(&to_json_ld(schema)?);
    Ok(format!(
        r#"<script id="{}" type="{JSON_LD_MIME}">{payload}</script>"#,
        encode_double_quoted_attribute(id)
    ))
}

// Only string contents of serialized JSON can hold these characters.
fn escape_for_script(json: &str) -> String {
    let mut escaped = String::with_capacity(json.len());
    for c in json.chars() {
        match c {
            '<' => escaped.push_str("\\u003c"),
            '>' => escaped.push_str("\\u003e"),
            '&' => escaped.push_str("\\u0026"),
            _ => escaped.push(c),
        }
    }
    escaped
}
