//! Output-format primitives shared by every snippet.
//!
//! Snippet logic is format independent: a snippet decides *what* goes into a
//! table or a code block, and [`TemplateFormat`] decides how that structure is
//! written out and which file extension the result gets.

/// The markup dialect snippets are rendered in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TemplateFormat {
    /// Asciidoctor markup, written as `.adoc` files. The default.
    #[default]
    Asciidoctor,
    /// Markdown markup, written as `.md` files.
    Markdown,
}

impl TemplateFormat {
    /// File extension for snippets rendered in this format.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Asciidoctor => "adoc",
            Self::Markdown => "md",
        }
    }

    /// Renders a source block.
    ///
    /// `language` selects syntax highlighting; `nowrap` disables line wrapping
    /// in formats that support the option.
    pub(crate) fn code_block(self, language: Option<&str>, nowrap: bool, content: &str) -> String {
        let mut block = String::new();
        match self {
            Self::Asciidoctor => {
                let mut attributes = vec!["source".to_string()];
                if let Some(language) = language {
                    attributes.push(language.to_string());
                }
                if nowrap {
                    attributes.push(r#"options="nowrap""#.to_string());
                }
                block.push_str(&format!("[{}]\n", attributes.join(",")));
                block.push_str("----\n");
                block.push_str(content);
                if !content.is_empty() && !content.ends_with('\n') {
                    block.push('\n');
                }
                block.push_str("----\n");
            }
            Self::Markdown => {
                block.push_str("```");
                if let Some(language) = language {
                    block.push_str(language);
                }
                block.push('\n');
                block.push_str(content);
                if !content.is_empty() && !content.ends_with('\n') {
                    block.push('\n');
                }
                block.push_str("```\n");
            }
        }
        block
    }

    /// Renders a table with an optional title, a header row, and data rows.
    pub(crate) fn table(
        self,
        title: Option<&str>,
        header: &[&str],
        rows: &[Vec<String>],
    ) -> String {
        match self {
            Self::Asciidoctor => {
                let mut table = String::new();
                if let Some(title) = title {
                    table.push_str(&format!(".{title}\n"));
                }
                table.push_str("|===\n");
                for cell in header {
                    table.push_str(&format!("|{cell}"));
                }
                table.push_str("\n\n");
                for row in rows {
                    for cell in row {
                        table.push_str(&format!("|{cell}\n"));
                    }
                    table.push('\n');
                }
                table.push_str("|===\n");
                table
            }
            Self::Markdown => {
                let mut table = String::new();
                if let Some(title) = title {
                    table.push_str(&format!("{title}\n\n"));
                }
                table.push_str(&format!("| {} |\n", header.join(" | ")));
                let dashes: Vec<_> = header.iter().map(|cell| "-".repeat(cell.len())).collect();
                table.push_str(&format!("| {} |\n", dashes.join(" | ")));
                for row in rows {
                    table.push_str(&format!("| {} |\n", row.join(" | ")));
                }
                table
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension() {
        assert_eq!(TemplateFormat::Asciidoctor.extension(), "adoc");
        assert_eq!(TemplateFormat::Markdown.extension(), "md");
    }

    #[test]
    fn test_asciidoctor_code_block() {
        let block = TemplateFormat::Asciidoctor.code_block(Some("bash"), false, "$ curl 'x'");
        assert_eq!(block, "[source,bash]\n----\n$ curl 'x'\n----\n");
    }

    #[test]
    fn test_asciidoctor_code_block_nowrap_without_language() {
        let block = TemplateFormat::Asciidoctor.code_block(None, true, "{}");
        assert_eq!(block, "[source,options=\"nowrap\"]\n----\n{}\n----\n");
    }

    #[test]
    fn test_markdown_code_block() {
        let block = TemplateFormat::Markdown.code_block(Some("http"), true, "GET / HTTP/1.1\n");
        assert_eq!(block, "```http\nGET / HTTP/1.1\n```\n");
    }

    #[test]
    fn test_asciidoctor_table_with_title() {
        let table = TemplateFormat::Asciidoctor.table(
            Some("/{foo}/{bar}"),
            &["Parameter", "Description"],
            &[
                vec!["`foo`".to_string(), "Foo description".to_string()],
                vec!["`bar`".to_string(), "Bar description".to_string()],
            ],
        );
        let expected = "./{foo}/{bar}\n\
                        |===\n\
                        |Parameter|Description\n\
                        \n\
                        |`foo`\n\
                        |Foo description\n\
                        \n\
                        |`bar`\n\
                        |Bar description\n\
                        \n\
                        |===\n";
        assert_eq!(table, expected);
    }

    #[test]
    fn test_markdown_table() {
        let table = TemplateFormat::Markdown.table(
            None,
            &["Parameter", "Description"],
            &[vec!["`a`".to_string(), "Alpha".to_string()]],
        );
        let expected = "| Parameter | Description |\n\
                        | --------- | ----------- |\n\
                        | `a` | Alpha |\n";
        assert_eq!(table, expected);
    }
}
