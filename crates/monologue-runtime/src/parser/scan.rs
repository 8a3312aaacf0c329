//! Balanced-brace scanning that respects string literals and escapes — the
//! state machine the lenient parser's bracket-matching strategies share.

/// Byte-offset spans of every top-level (non-nested) balanced `{...}`
/// object found in `text`, in order of appearance.
#[must_use]
pub(super) fn find_balanced_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut depth: u32 = 0;
    let mut start: Option<usize> = None;
    let mut in_string = false;
    let mut escape = false;

    for (i, c) in text.char_indices() {
        if in_string {
            if escape {
                escape = false;
            } else if c == '\\' {
                escape = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            '"' => in_string = true,
            '{' => {
                if depth == 0 {
                    start = Some(i);
                }
                depth += 1;
            }
            '}' if depth > 0 => {
                depth -= 1;
                if depth == 0 {
                    if let Some(s) = start.take() {
                        spans.push((s, i + c.len_utf8()));
                    }
                }
            }
            _ => {}
        }
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_single_top_level_object() {
        let text = r#"noise {"a": 1} trailing"#;
        let spans = find_balanced_spans(text);
        assert_eq!(spans.len(), 1);
        assert_eq!(&text[spans[0].0..spans[0].1], r#"{"a": 1}"#);
    }

    #[test]
    fn ignores_braces_inside_string_literals() {
        let text = r#"{"a": "}not a close{"}"#;
        let spans = find_balanced_spans(text);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0], (0, text.len()));
    }

    #[test]
    fn does_not_split_nested_objects() {
        let text = r#"{"a": {"b": 1}}"#;
        let spans = find_balanced_spans(text);
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0], (0, text.len()));
    }

    #[test]
    fn finds_multiple_top_level_objects() {
        let text = r#"{"a":1} middle {"b":2}"#;
        let spans = find_balanced_spans(text);
        assert_eq!(spans.len(), 2);
    }
}
