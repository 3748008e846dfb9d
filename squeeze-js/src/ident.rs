use ahash::HashSet;
use ahash::HashSetExt;
use once_cell::sync::Lazy;
use unicode_ident::is_xid_continue;
use unicode_ident::is_xid_start;

#[rustfmt::skip]
pub static RESERVED_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
  let mut set = HashSet::new();
  for word in [
    "break", "case", "catch", "class", "const", "continue", "debugger", "default", "delete",
    "do", "else", "enum", "export", "extends", "false", "finally", "for", "function", "if",
    "import", "in", "instanceof", "new", "null", "return", "super", "switch", "this", "throw",
    "true", "try", "typeof", "var", "void", "while", "with",
    // Strict mode and older editions.
    "implements", "interface", "let", "package", "private", "protected", "public", "static",
    "yield",
  ] {
    set.insert(word);
  }
  set
});

fn is_id_start(c: char) -> bool {
  c == '$' || c == '_' || is_xid_start(c)
}

fn is_id_continue(c: char) -> bool {
  c == '$' || c == '\u{200c}' || c == '\u{200d}' || is_xid_continue(c)
}

pub fn is_identifier_name(name: &str) -> bool {
  let mut chars = name.chars();
  match chars.next() {
    Some(c) if is_id_start(c) => chars.all(is_id_continue),
    _ => false,
  }
}

/// Usable as a bare property name or binding in every edition we emit for.
pub fn is_plain_identifier(name: &str) -> bool {
  is_identifier_name(name) && !RESERVED_WORDS.contains(name)
}
