//! Delimited list inputs.
//!
//! A list input is one record per line, optionally split further on commas.
//! A field opening with `"` runs to the matching quote and may contain the
//! delimiter; `""` inside it is a literal quote.

/// Options controlling how a list input is split.
#[derive(Debug, Clone, Default)]
pub struct ListOptions {
    /// Treat each line as a single item instead of splitting on commas.
    pub ignore_comma: bool,
    /// Lines whose first non-blank character is this marker are dropped.
    pub comment: Option<char>,
}

impl ListOptions {
    /// One item per line, `#` comments.
    pub fn lines_with_comments() -> Self {
        Self {
            ignore_comma: true,
            comment: Some('#'),
        }
    }
}

/// Split a list input into trimmed, non-empty items.
pub fn parse_list(input: &str, opts: &ListOptions) -> Vec<String> {
    let delimiter = if opts.ignore_comma { None } else { Some(',') };

    input
        .lines()
        .filter(|line| {
            let trimmed = line.trim_start();
            !trimmed.is_empty() && !opts.comment.is_some_and(|c| trimmed.starts_with(c))
        })
        .flat_map(|line| split_fields(line, delimiter))
        .map(|field| field.trim().to_string())
        .filter(|field| !field.is_empty())
        .collect()
}

fn split_fields(line: &str, delimiter: Option<char>) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    current.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            // Quotes are only special at the start of a field
            '"' if current.trim().is_empty() => {
                current.clear();
                in_quotes = true;
            }
            c if !in_quotes && Some(c) == delimiter => {
                fields.push(std::mem::take(&mut current));
            }
            c => current.push(c),
        }
    }
    fields.push(current);

    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(parse_list("", &ListOptions::lines_with_comments()).is_empty());
        assert!(parse_list("\n  \n", &ListOptions::default()).is_empty());
    }

    #[test]
    fn test_newline_delimited() {
        let items = parse_list(
            "name/app\n  ghcr.io/name/app  \n\n",
            &ListOptions::lines_with_comments(),
        );
        assert_eq!(items, vec!["name/app", "ghcr.io/name/app"]);
    }

    #[test]
    fn test_comment_lines_dropped() {
        let input = "type=ref,event=branch\n# type=sha\n   #indented comment\ntype=semver,pattern={{version}}";
        let items = parse_list(input, &ListOptions::lines_with_comments());
        assert_eq!(
            items,
            vec!["type=ref,event=branch", "type=semver,pattern={{version}}"]
        );
    }

    #[test]
    fn test_comment_marker_mid_line_kept() {
        let items = parse_list(
            "org.opencontainers.image.url=https://example.com/#readme",
            &ListOptions::lines_with_comments(),
        );
        assert_eq!(
            items,
            vec!["org.opencontainers.image.url=https://example.com/#readme"]
        );
    }

    #[test]
    fn test_comma_splitting() {
        let opts = ListOptions {
            ignore_comma: false,
            comment: None,
        };
        let items = parse_list("a, b,,c\nd", &opts);
        assert_eq!(items, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_quoted_field_keeps_delimiter() {
        let opts = ListOptions {
            ignore_comma: false,
            comment: None,
        };
        let items = parse_list(r#"a,"b,c",d"#, &opts);
        assert_eq!(items, vec!["a", "b,c", "d"]);
    }

    #[test]
    fn test_inner_quotes_are_literal() {
        let items = parse_list(
            r#"org.opencontainers.image.description=My "cool" app"#,
            &ListOptions::lines_with_comments(),
        );
        assert_eq!(
            items,
            vec![r#"org.opencontainers.image.description=My "cool" app"#]
        );

        let escaped = parse_list(r#""say ""hi""""#, &ListOptions::lines_with_comments());
        assert_eq!(escaped, vec![r#"say "hi""#]);
    }
}
