//! The fixed, ordered repair pipeline applied to bracket-matched spans
//! that fail to parse as strict JSON: strip trailing commas, then rewrite
//! single-quoted strings to double-quoted ones outside embedded
//! double-quoted runs.

/// Remove commas that appear immediately before a closing `}`/`]`
/// (ignoring intervening whitespace), without touching commas inside
/// string literals.
#[must_use]
pub(super) fn strip_trailing_commas(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escape = false;

    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if in_string {
            out.push(c);
            if escape {
                escape = false;
            } else if c == '\\' {
                escape = true;
            } else if c == '"' {
                in_string = false;
            }
            i += 1;
            continue;
        }
        if c == '"' {
            in_string = true;
            out.push(c);
            i += 1;
            continue;
        }
        if c == ',' {
            let mut j = i + 1;
            while j < chars.len() && chars[j].is_whitespace() {
                j += 1;
            }
            if j < chars.len() && (chars[j] == '}' || chars[j] == ']') {
                i += 1;
                continue;
            }
        }
        out.push(c);
        i += 1;
    }
    out
}

/// Rewrite single-quoted string literals to double-quoted ones, as long
/// as doing so does not cross an embedded double-quoted run. Any literal
/// double quote found inside a single-quoted run is escaped so the result
/// stays valid JSON.
#[must_use]
pub(super) fn rewrite_single_quotes(text: &str) -> String {
    #[derive(PartialEq)]
    enum State {
        None,
        Double,
        Single,
    }

    let mut state = State::None;
    let mut escape = false;
    let mut out = String::with_capacity(text.len());

    for c in text.chars() {
        match state {
            State::None => match c {
                '"' => {
                    state = State::Double;
                    out.push(c);
                }
                '\'' => {
                    state = State::Single;
                    out.push('"');
                }
                _ => out.push(c),
            },
            State::Double => {
                out.push(c);
                if escape {
                    escape = false;
                } else if c == '\\' {
                    escape = true;
                } else if c == '"' {
                    state = State::None;
                }
            }
            State::Single => {
                if escape {
                    out.push(c);
                    escape = false;
                } else if c == '\\' {
                    out.push(c);
                    escape = true;
                } else if c == '\'' {
                    out.push('"');
                    state = State::None;
                } else if c == '"' {
                    out.push_str("\\\"");
                } else {
                    out.push(c);
                }
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_trailing_comma_before_closing_brace() {
        let text = r#"{"a": 1, "b": 2,}"#;
        assert_eq!(strip_trailing_commas(text), r#"{"a": 1, "b": 2}"#);
    }

    #[test]
    fn leaves_commas_inside_strings_untouched() {
        let text = r#"{"a": "1, 2,"}"#;
        assert_eq!(strip_trailing_commas(text), text);
    }

    #[test]
    fn rewrites_single_quoted_object() {
        let text = "{'tool_name':'response','tool_args':{'text':'hello',}}";
        let rewritten = rewrite_single_quotes(text);
        assert_eq!(
            rewritten,
            r#"{"tool_name":"response","tool_args":{"text":"hello",}}"#
        );
    }

    #[test]
    fn full_pipeline_produces_valid_json() {
        let text = "{'tool_name':'response','tool_args':{'text':'hello',}}";
        let repaired = strip_trailing_commas(&rewrite_single_quotes(text));
        let value: serde_json::Value = serde_json::from_str(&repaired).unwrap();
        assert_eq!(value["tool_name"], "response");
        assert_eq!(value["tool_args"]["text"], "hello");
    }
}
