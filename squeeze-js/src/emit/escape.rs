/// Quotes a string value, picking whichever quote character needs fewer
/// escapes (double quotes on a tie). U+2028/U+2029 are always escaped since
/// they terminate lines inside literals in older engines.
pub fn quote_string(value: &str) -> String {
  let doubles = value.matches('"').count();
  let singles = value.matches('\'').count();
  let quote = if singles < doubles { '\'' } else { '"' };

  let mut out = String::with_capacity(value.len() + 2);
  out.push(quote);
  let mut chars = value.chars().peekable();
  while let Some(ch) = chars.next() {
    match ch {
      '\\' => out.push_str("\\\\"),
      '\n' => out.push_str("\\n"),
      '\r' => out.push_str("\\r"),
      '\t' => out.push_str("\\t"),
      '\u{8}' => out.push_str("\\b"),
      '\u{b}' => out.push_str("\\v"),
      '\u{c}' => out.push_str("\\f"),
      '\0' => {
        // `\0` followed by a digit would read as a legacy octal escape.
        if chars.peek().is_some_and(|c| c.is_ascii_digit()) {
          out.push_str("\\x00");
        } else {
          out.push_str("\\0");
        }
      }
      '\u{2028}' => out.push_str("\\u2028"),
      '\u{2029}' => out.push_str("\\u2029"),
      c if c == quote => {
        out.push('\\');
        out.push(c);
      }
      c if c < '\u{20}' => out.push_str(&format!("\\x{:02x}", c as u32)),
      c => out.push(c),
    }
  }
  out.push(quote);
  out
}

#[cfg(test)]
mod tests {
  use super::quote_string;

  #[test]
  fn test_prefers_fewer_escapes() {
    assert_eq!(quote_string("abc"), "\"abc\"");
    assert_eq!(quote_string("say \"hi\""), "'say \"hi\"'");
    assert_eq!(quote_string("it's"), "\"it's\"");
    assert_eq!(quote_string("'\""), "\"'\\\"\"");
  }

  #[test]
  fn test_escapes() {
    assert_eq!(quote_string("a\nb\\c"), "\"a\\nb\\\\c\"");
    assert_eq!(quote_string("\u{0}1"), "\"\\x001\"");
    assert_eq!(quote_string("\u{1}"), "\"\\x01\"");
    assert_eq!(quote_string("a\u{2028}"), "\"a\\u2028\"");
  }
}
