//! Golden tests for mdterm
//!
//! These tests run the binary against fixture documents and check:
//! - Block token structure and order
//! - Inline children of each block
//! - Rendered output with styling disabled

use assert_cmd::Command;
use serde_json::Value;
use std::fs;
use std::path::PathBuf;

/// Get the path to the fixtures directory
pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

/// Create a command for running the mdterm binary
fn mdterm_cmd() -> Command {
    let mut cmd = Command::cargo_bin("mdterm").expect("Failed to find mdterm binary");
    cmd.env_remove("MDTERM_COLOR").env_remove("MDTERM_MAX_BYTES");
    cmd
}

/// Parse JSONL output into a vector of JSON values
fn parse_jsonl(output: &str) -> Vec<Value> {
    output
        .lines()
        .filter(|l| !l.trim().is_empty())
        .filter_map(|l| serde_json::from_str::<Value>(l).ok())
        .collect()
}

/// Tokenize a fixture through the CLI
fn fixture_tokens(name: &str) -> Vec<Value> {
    let output = mdterm_cmd()
        .arg("tokens")
        .arg(fixtures_dir().join(name))
        .output()
        .expect("failed to execute");
    assert!(output.status.success());
    parse_jsonl(&String::from_utf8_lossy(&output.stdout))
}

fn kind(v: &Value) -> &str {
    v.get("kind").and_then(|k| k.as_str()).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Token Tests ====================

    #[test]
    fn golden_search_results_block_kinds() {
        let tokens = fixture_tokens("search_results.md");

        let kinds: Vec<&str> = tokens.iter().map(kind).collect();
        assert_eq!(
            kinds,
            vec![
                "header",
                "paragraph",
                "header",
                "code_block",
                "blockquote",
                "header",
                "list_item",
                "list_item",
                "list_item",
                "list_item",
                "list_item",
                "list_item",
                "list_item",
                "paragraph",
            ]
        );
    }

    #[test]
    fn golden_search_results_header_levels() {
        let tokens = fixture_tokens("search_results.md");

        let levels: Vec<u64> = tokens
            .iter()
            .filter(|t| kind(t) == "header")
            .filter_map(|t| t["metadata"]["level"].as_u64())
            .collect();
        assert_eq!(levels, vec![1, 2, 3]);

        let children = tokens[0]["children"].as_array().expect("header children");
        assert_eq!(children.len(), 2);
        assert_eq!(children[1]["kind"], "inline_code");
        assert_eq!(children[1]["content"], "tokenizer");
    }

    #[test]
    fn golden_search_results_paragraph_inlines() {
        let tokens = fixture_tokens("search_results.md");

        let children = tokens[1]["children"].as_array().expect("paragraph children");
        let kinds: Vec<&str> = children.iter().map(kind).collect();
        assert_eq!(
            kinds,
            vec!["text", "bold", "text", "italic", "text", "link", "text"]
        );
        assert_eq!(children[5]["content"], "the guide");
        assert_eq!(children[5]["metadata"]["url"], "https://example.com/guide");
    }

    #[test]
    fn golden_search_results_code_block_verbatim() {
        let tokens = fixture_tokens("search_results.md");

        let code = &tokens[3];
        assert_eq!(code["metadata"]["language"], "rust");
        assert!(code.get("children").is_none());
        assert_eq!(
            code["content"],
            "fn tokenize(input: &str) -> Vec<Token> {\n    input.lines().map(Token::from).collect()\n}"
        );
    }

    #[test]
    fn golden_search_results_blockquote_merged() {
        let tokens = fixture_tokens("search_results.md");

        assert_eq!(
            tokens[4]["content"],
            "The tokenizer runs a single forward scan.\n\nIt never fails on malformed input."
        );
    }

    #[test]
    fn golden_search_results_list_metadata() {
        let tokens = fixture_tokens("search_results.md");

        let meta: Vec<(u64, bool, Option<u64>)> = tokens
            .iter()
            .filter(|t| kind(t) == "list_item")
            .map(|t| {
                let m = &t["metadata"];
                (
                    m["indent"].as_u64().unwrap(),
                    m["ordered"].as_bool().unwrap(),
                    m["number"].as_u64(),
                )
            })
            .collect();
        assert_eq!(
            meta,
            vec![
                (0, false, None),
                (2, false, None),
                (2, false, None),
                (0, false, None),
                (0, true, Some(1)),
                (0, true, Some(2)),
                (0, true, Some(10)),
            ]
        );
    }

    #[test]
    fn golden_search_results_degraded_markup_is_text() {
        let tokens = fixture_tokens("search_results.md");

        let last = tokens.last().expect("tokens");
        assert_eq!(kind(last), "paragraph");
        assert_eq!(last["children"].as_array().map(|c| c.len()), Some(1));
        assert_eq!(last["children"][0]["content"], "#not-a-header and a lone * star");
    }

    #[test]
    fn golden_unterminated_fence_flushed() {
        let tokens = fixture_tokens("unterminated.md");

        assert_eq!(tokens.len(), 2);
        assert_eq!(tokens[0]["content"], "Intro paragraph\ncontinues here.");
        assert_eq!(kind(&tokens[1]), "code_block");
        assert_eq!(tokens[1]["metadata"]["language"], "python");
        assert_eq!(tokens[1]["content"], "print(\"hello\")\n# still code");
    }

    // ==================== Render Tests ====================

    #[test]
    fn golden_search_results_render() {
        let expected = fs::read_to_string(fixtures_dir().join("search_results.txt"))
            .expect("golden file");

        let output = mdterm_cmd()
            .arg("--color")
            .arg("never")
            .arg("render")
            .arg(fixtures_dir().join("search_results.md"))
            .output()
            .expect("failed to execute");

        assert!(output.status.success());
        assert_eq!(String::from_utf8_lossy(&output.stdout), expected);
    }

    #[test]
    fn golden_render_is_stable_across_runs() {
        let run = || {
            mdterm_cmd()
                .arg("--color")
                .arg("always")
                .arg("render")
                .arg(fixtures_dir().join("search_results.md"))
                .output()
                .expect("failed to execute")
                .stdout
        };

        assert_eq!(run(), run());
    }
}
