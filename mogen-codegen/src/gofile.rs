//! Assembly of the generated Go file: package clause, import block, the
//! format pass, and the check pass.

use crate::builder::CodeBuilder;
use crate::error::{Error, Result};

/// The generated file under construction.
///
/// Mocks are written into the body unindented; `generate` prefixes the
/// package clause and import block, `format` normalizes indentation and
/// drops imports the body never references, and `check` re-parses the result
/// with the same front end the input went through.
pub struct GoFile {
    package: String,
    imports: Vec<String>,
    body: CodeBuilder,
    out: String,
}

impl GoFile {
    pub fn new(package: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            imports: Vec::new(),
            body: CodeBuilder::new(),
            out: String::new(),
        }
    }

    pub fn add_import(&mut self, path: impl Into<String>) {
        let path = path.into();
        if !self.imports.contains(&path) {
            self.imports.push(path);
        }
    }

    /// Where mock declarations are written.
    pub fn body_mut(&mut self) -> &mut CodeBuilder {
        &mut self.body
    }

    /// Assembles the full file from the body written so far. Imports are
    /// sorted by path.
    pub fn generate(&mut self) {
        let mut out = format!("package {}\n", self.package);
        let mut imports = self.imports.clone();
        imports.sort();
        if !imports.is_empty() {
            out.push_str("\nimport (\n");
            for path in &imports {
                out.push_str(&format!("\"{path}\"\n"));
            }
            out.push_str(")\n");
        }
        if !self.body.is_empty() {
            out.push('\n');
            out.push_str(self.body.as_str());
        }
        self.out = out;
    }

    /// The format pass: scrubs imports whose qualifier never appears in the
    /// body, then reindents the whole file by brace depth.
    pub fn format(&mut self) -> Result<()> {
        let body = self.body.as_str().to_owned();
        self.imports.retain(|path| {
            let qualifier = path.rsplit('/').next().unwrap_or(path);
            qualifier_used(&body, qualifier)
        });
        self.generate();
        self.out = reindent(&self.out)?;
        Ok(())
    }

    /// The check pass: the output must parse with the same grammar the input
    /// did.
    pub fn check(&self) -> Result<()> {
        mogen_syntax::parse_file(&self.out)
            .map(|_| ())
            .map_err(|source| Error::Check { source })
    }

    /// The assembled file text. Valid after `generate`; still readable when
    /// a later pass failed, so callers can flush what exists.
    pub fn contents(&self) -> &str {
        &self.out
    }
}

/// Whether `qualifier` appears as a package qualifier (`qualifier.`) in the
/// text, not as a suffix of a longer identifier.
fn qualifier_used(text: &str, qualifier: &str) -> bool {
    let mut rest = text;
    let mut offset = 0;
    while let Some(at) = rest.find(qualifier) {
        let start = offset + at;
        let end = start + qualifier.len();
        let before_ok = text[..start]
            .chars()
            .next_back()
            .is_none_or(|c| !c.is_alphanumeric() && c != '_' && c != '.');
        if before_ok && text[end..].starts_with('.') {
            return true;
        }
        offset = end;
        rest = &text[offset..];
    }
    false
}

/// Reindents by brace/paren depth, one tab per level, string-literal and
/// line-comment aware.
fn reindent(src: &str) -> Result<String> {
    let mut out = String::with_capacity(src.len());
    let mut depth: i32 = 0;
    for line in src.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            out.push('\n');
            continue;
        }
        let leading_closers = trimmed
            .chars()
            .take_while(|c| matches!(c, '}' | ')'))
            .count() as i32;
        let level = (depth - leading_closers).max(0);
        for _ in 0..level {
            out.push('\t');
        }
        out.push_str(trimmed);
        out.push('\n');
        depth += line_nesting(trimmed);
        if depth < 0 {
            return Err(Error::Format(format!(
                "unbalanced delimiters at line {trimmed:?}"
            )));
        }
    }
    if depth != 0 {
        return Err(Error::Format("unbalanced delimiters at end of file".into()));
    }
    Ok(out)
}

/// Net `{`/`(` nesting of one line, skipping string contents and comments.
fn line_nesting(line: &str) -> i32 {
    let mut net = 0;
    let mut chars = line.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '{' | '(' => net += 1,
            '}' | ')' => net -= 1,
            '"' | '`' | '\'' => {
                while let Some(c) = chars.next() {
                    if c == '\\' && ch == '"' {
                        chars.next();
                    } else if c == ch {
                        break;
                    }
                }
            }
            '/' if chars.peek() == Some(&'/') => break,
            _ => {}
        }
    }
    net
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn assembles_package_imports_and_body() {
        let mut file = GoFile::new("util");
        file.add_import("net/http");
        file.add_import("io");
        file.add_import("io");
        file.body_mut().push_line("type T struct {");
        file.body_mut().push_line("}");
        file.generate();
        assert_eq!(
            file.contents(),
            "package util\n\nimport (\n\"io\"\n\"net/http\"\n)\n\ntype T struct {\n}\n"
        );
    }

    #[test]
    fn format_indents_and_drops_unused_imports() {
        let mut file = GoFile::new("util");
        file.add_import("io");
        file.add_import("net/http");
        file.body_mut().push_line("type T struct {");
        file.body_mut().push_line("c http.Client");
        file.body_mut().push_line("}");
        file.generate();
        file.format().unwrap();
        assert_eq!(
            file.contents(),
            "package util\n\nimport (\n\t\"net/http\"\n)\n\ntype T struct {\n\tc http.Client\n}\n"
        );
    }

    #[test]
    fn format_of_empty_body_keeps_just_the_package_clause() {
        let mut file = GoFile::new("util");
        file.add_import("io");
        file.generate();
        file.format().unwrap();
        assert_eq!(file.contents(), "package util\n");
    }

    #[test]
    fn reindent_handles_nested_blocks_and_string_braces() {
        let src = "func (m *M) Do() string {\nif x != nil {\nreturn \"}{\"\n}\nreturn \"\"\n}\n";
        let want =
            "func (m *M) Do() string {\n\tif x != nil {\n\t\treturn \"}{\"\n\t}\n\treturn \"\"\n}\n";
        assert_eq!(reindent(src).unwrap(), want);
    }

    #[test]
    fn reindent_rejects_unbalanced_input() {
        assert!(matches!(reindent("}\n"), Err(Error::Format(_))));
        assert!(matches!(reindent("func f() {\n"), Err(Error::Format(_))));
    }

    #[test]
    fn qualifier_matching_is_token_aware() {
        assert!(qualifier_used("c http.Client", "http"));
        assert!(!qualifier_used("c myhttp.Client", "http"));
        assert!(!qualifier_used("httpClient int", "http"));
    }

    #[test]
    fn check_accepts_generated_declarations() {
        let mut file = GoFile::new("util");
        file.body_mut().push_line("type T struct {");
        file.body_mut().push_line("}");
        file.generate();
        file.format().unwrap();
        file.check().unwrap();
    }

    #[test]
    fn check_rejects_garbage() {
        let mut file = GoFile::new("util");
        file.body_mut().push_line("type struct notgo {");
        file.body_mut().push_line("}");
        file.generate();
        assert!(matches!(file.check(), Err(Error::Check { .. })));
    }
}
