//! Extraction of fenced code-block bodies, the parser's first and most
//! trusted strategy.

/// Bodies of every fenced code block in `text` (```` ``` ```` or ```` ```json ````),
/// in order of appearance.
#[must_use]
pub(super) fn fenced_blocks(text: &str) -> Vec<String> {
    let mut blocks = Vec::new();
    let mut lines = text.lines().peekable();
    while let Some(line) = lines.next() {
        if !line.trim_start().starts_with("```") {
            continue;
        }
        let mut body = String::new();
        let mut closed = false;
        for inner in lines.by_ref() {
            if inner.trim_start().starts_with("```") {
                closed = true;
                break;
            }
            body.push_str(inner);
            body.push('\n');
        }
        if closed {
            blocks.push(body.trim().to_string());
        }
    }
    blocks
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_single_json_fence() {
        let text = "prose\n```json\n{\"a\": 1}\n```\nmore prose";
        let blocks = fenced_blocks(text);
        assert_eq!(blocks, vec!["{\"a\": 1}".to_string()]);
    }

    #[test]
    fn extracts_multiple_fences_in_order() {
        let text = "```\n{\"a\": 1}\n```\ntext\n```\n{\"b\": 2}\n```";
        let blocks = fenced_blocks(text);
        assert_eq!(
            blocks,
            vec!["{\"a\": 1}".to_string(), "{\"b\": 2}".to_string()]
        );
    }

    #[test]
    fn ignores_an_unclosed_fence() {
        let text = "```json\n{\"a\": 1}";
        assert!(fenced_blocks(text).is_empty());
    }
}
