//! Token writer that inserts a space only where two adjacent tokens would
//! otherwise lex differently (`returnx`, `a+ +b`, `a- -b`, `/a/ /b`).

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Trailing {
  None,
  Word,
  Plus,
  PlusPlus,
  Minus,
  MinusMinus,
  Slash,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Leading {
  Word,
  Plus,
  Minus,
  Slash,
  Other,
}

#[derive(Debug, Default)]
pub struct Emitter {
  out: String,
  trailing: Option<Trailing>,
}

impl Emitter {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.out.len()
  }

  pub fn is_empty(&self) -> bool {
    self.out.is_empty()
  }

  pub fn finish(self) -> String {
    self.out
  }

  pub fn write_keyword(&mut self, keyword: &str) {
    self.write_token(keyword, Leading::Word, Trailing::Word);
  }

  pub fn write_identifier(&mut self, identifier: &str) {
    self.write_token(identifier, Leading::Word, Trailing::Word);
  }

  /// Digits and identifier characters are interchangeable for boundary purposes.
  pub fn write_number(&mut self, number: &str) {
    let trailing = match number.as_bytes().last() {
      Some(b'.') => Trailing::None,
      _ => Trailing::Word,
    };
    let leading = match number.as_bytes().first() {
      Some(b'.') => Leading::Other,
      _ => Leading::Word,
    };
    self.write_token(number, leading, trailing);
  }

  pub fn write_punct(&mut self, punct: &str) {
    let (leading, trailing) = match punct {
      "+" => (Leading::Plus, Trailing::Plus),
      "++" => (Leading::Plus, Trailing::PlusPlus),
      "-" => (Leading::Minus, Trailing::Minus),
      "--" => (Leading::Minus, Trailing::MinusMinus),
      "/" => (Leading::Slash, Trailing::Slash),
      "/=" => (Leading::Slash, Trailing::None),
      _ => (Leading::Other, Trailing::None),
    };
    self.write_token(punct, leading, trailing);
  }

  /// A regex literal, delimiters and flags included.
  pub fn write_regex(&mut self, regex: &str) {
    let trailing = match regex.as_bytes().last() {
      Some(b'/') => Trailing::Slash,
      _ => Trailing::Word,
    };
    self.write_token(regex, Leading::Slash, trailing);
  }

  /// An already-escaped string literal including its quotes.
  pub fn write_quoted(&mut self, quoted: &str) {
    self.write_token(quoted, Leading::Other, Trailing::None);
  }

  fn write_token(&mut self, text: &str, leading: Leading, trailing: Trailing) {
    if text.is_empty() {
      return;
    }
    if let Some(prev) = self.trailing {
      if needs_space(prev, leading) {
        self.out.push(' ');
      }
    }
    self.out.push_str(text);
    self.trailing = Some(trailing);
  }
}

fn needs_space(prev: Trailing, next: Leading) -> bool {
  matches!(
    (prev, next),
    (Trailing::Word, Leading::Word)
      | (Trailing::Plus, Leading::Plus)
      | (Trailing::PlusPlus, Leading::Plus)
      | (Trailing::Minus, Leading::Minus)
      | (Trailing::MinusMinus, Leading::Minus)
      | (Trailing::Slash, Leading::Slash)
  )
}

#[cfg(test)]
mod tests {
  use super::Emitter;

  #[test]
  fn test_word_boundaries() {
    let mut e = Emitter::new();
    e.write_keyword("return");
    e.write_identifier("x");
    e.write_punct(";");
    e.write_keyword("typeof");
    e.write_punct("(");
    e.write_number("1");
    e.write_punct(")");
    assert_eq!(e.finish(), "return x;typeof(1)");
  }

  #[test]
  fn test_operator_boundaries() {
    let mut e = Emitter::new();
    e.write_identifier("a");
    e.write_punct("+");
    e.write_punct("+");
    e.write_identifier("b");
    e.write_punct("-");
    e.write_punct("--");
    e.write_identifier("c");
    e.write_punct("/");
    e.write_regex("/re/g");
    assert_eq!(e.finish(), "a+ +b- --c/ /re/g");
  }

  #[test]
  fn test_number_boundaries() {
    let mut e = Emitter::new();
    e.write_keyword("return");
    e.write_number(".5");
    e.write_keyword("in");
    e.write_number("1.");
    e.write_punct(".");
    e.write_identifier("x");
    assert_eq!(e.finish(), "return.5 in 1..x");
  }
}
