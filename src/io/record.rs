//! Line and field helpers shared by the readers.

use std::str::FromStr;

use crate::error::{InstanceError, Result, Section};

/// Non-blank lines of a file together with their 1-based line numbers.
pub(crate) struct LineCursor<'a> {
    lines: Vec<(usize, &'a str)>,
    pos: usize,
}

impl<'a> LineCursor<'a> {
    pub(crate) fn new(text: &'a str) -> Self {
        let lines = text
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty())
            .collect();
        Self { lines, pos: 0 }
    }

    pub(crate) fn peek(&self) -> Option<&'a str> {
        self.lines.get(self.pos).map(|&(_, line)| line)
    }

    pub(crate) fn next_line(&mut self) -> Option<(usize, &'a str)> {
        let line = self.lines.get(self.pos).copied();
        if line.is_some() {
            self.pos += 1;
        }
        line
    }

    /// Consumes the next line if it starts with `prefix`.
    pub(crate) fn skip_if(&mut self, prefix: &str) -> bool {
        if self.peek().is_some_and(|line| line.starts_with(prefix)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    /// Line number of the line `peek` would return, or one past the end.
    pub(crate) fn line_number(&self) -> usize {
        self.lines
            .get(self.pos)
            .map_or_else(|| self.lines.last().map_or(1, |&(n, _)| n + 1), |&(n, _)| n)
    }
}

/// Splits one CSV record. Double quotes group cells containing commas and
/// `""` inside quotes is a literal quote.
pub(crate) fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if quoted && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => quoted = !quoted,
            ',' if !quoted => fields.push(std::mem::take(&mut current)),
            _ => current.push(ch),
        }
    }
    fields.push(current);
    fields
}

/// Parses column `index` of a row.
pub(crate) fn field<T: FromStr>(
    fields: &[impl AsRef<str>],
    index: usize,
    name: &str,
    section: Section,
    line: usize,
) -> Result<T> {
    let raw = fields
        .get(index)
        .ok_or_else(|| InstanceError::parse(section, line, format!("missing {name} column")))?
        .as_ref()
        .trim();
    raw.parse()
        .map_err(|_| InstanceError::parse(section, line, format!("invalid {name}: {raw:?}")))
}

/// Fails unless the row has at least `expected` columns.
pub(crate) fn expect_columns(
    fields: &[impl AsRef<str>],
    expected: usize,
    section: Section,
    line: usize,
) -> Result<()> {
    if fields.len() < expected {
        return Err(InstanceError::parse(
            section,
            line,
            format!("expected {expected} columns, found {}", fields.len()),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cursor_skips_blank_lines() {
        let mut cursor = LineCursor::new("a\n\n  b  \r\nc");
        assert_eq!(cursor.next_line(), Some((1, "a")));
        assert_eq!(cursor.line_number(), 3);
        assert_eq!(cursor.peek(), Some("b"));
        assert!(!cursor.skip_if("x"));
        assert!(cursor.skip_if("b"));
        assert_eq!(cursor.next_line(), Some((4, "c")));
        assert_eq!(cursor.next_line(), None);
        assert_eq!(cursor.line_number(), 5);
    }

    #[test]
    fn test_split_plain() {
        assert_eq!(split_record("1,a,,3"), vec!["1", "a", "", "3"]);
    }

    #[test]
    fn test_split_quoted() {
        assert_eq!(
            split_record(r#"c1,n1,"['n1', 'n2', 'n3']",x"#),
            vec!["c1", "n1", "['n1', 'n2', 'n3']", "x"]
        );
        assert_eq!(split_record(r#""say ""hi""",2"#), vec![r#"say "hi""#, "2"]);
    }

    #[test]
    fn test_field_errors() {
        let fields = split_record("1,abc");
        let ok: usize = field(&fields, 0, "index", Section::Arcs, 3).expect("number");
        assert_eq!(ok, 1);

        let err = field::<f64>(&fields, 1, "transit time", Section::Arcs, 3).unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"invalid ARCS section at line 3: invalid transit time: "abc""#
        );
        assert!(field::<f64>(&fields, 5, "capacity", Section::Arcs, 3).is_err());
        assert!(expect_columns(&fields, 3, Section::Arcs, 3).is_err());
    }
}
