//! Mustache-like `{{name}}` / dotted-path substitution for template strings.
//!
//! Pure and deterministic: no I/O, no escaping. Recipients are SMS/push/plain
//! email bodies, not browser-rendered markup, so there is nothing to escape
//! against.

use serde_json::Value as JsonValue;

/// Substitutes every `{{dotted.path}}` token in `template` with the value it
/// resolves to in `context`. Undefined or non-scalar resolutions render as
/// the empty string.
pub fn render(template: &str, context: &JsonValue) -> String {
    let mut output = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find("{{") {
        output.push_str(&rest[..open]);
        let after_open = &rest[open + 2..];

        let Some(close) = after_open.find("}}") else {
            // Unterminated token: emit the rest verbatim.
            output.push_str(&rest[open..]);
            return output;
        };

        let path = after_open[..close].trim();
        output.push_str(&resolve(context, path));
        rest = &after_open[close + 2..];
    }

    output.push_str(rest);
    output
}

/// Walks a dotted path (`a.b.c`) against a JSON object, returning the
/// scalar's natural string rendering, or empty for missing/non-scalar values.
fn resolve(context: &JsonValue, path: &str) -> String {
    if path.is_empty() {
        return String::new();
    }

    let mut current = context;
    for segment in path.split('.') {
        match current.get(segment) {
            Some(value) => current = value,
            None => return String::new(),
        }
    }

    match current {
        JsonValue::String(s) => s.clone(),
        JsonValue::Number(n) => n.to_string(),
        JsonValue::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn substitutes_top_level_variable() {
        let ctx = json!({"code": "9271"});
        assert_eq!(render("Your code is {{code}}", &ctx), "Your code is 9271");
    }

    #[test]
    fn substitutes_dotted_path() {
        let ctx = json!({"user": {"name": "Ada"}});
        assert_eq!(render("Hello {{ user.name }}", &ctx), "Hello Ada");
    }

    #[test]
    fn undefined_variable_renders_empty() {
        let ctx = json!({});
        assert_eq!(render("Hello {{name}}!", &ctx), "Hello !");
    }

    #[test]
    fn non_scalar_resolution_renders_empty() {
        let ctx = json!({"user": {"name": "Ada"}});
        assert_eq!(render("{{user}}", &ctx), "");
    }

    #[test]
    fn unterminated_token_is_emitted_verbatim() {
        let ctx = json!({});
        assert_eq!(render("broken {{token", &ctx), "broken {{token");
    }

    #[test]
    fn numbers_and_booleans_render_naturally() {
        let ctx = json!({"count": 3, "active": true});
        assert_eq!(render("{{count}}/{{active}}", &ctx), "3/true");
    }

    #[test]
    fn pure_rendering_is_repeatable() {
        let ctx = json!({"code": "1"});
        let a = render("{{code}}{{code}}", &ctx);
        let b = render("{{code}}{{code}}", &ctx);
        assert_eq!(a, b);
    }
}
