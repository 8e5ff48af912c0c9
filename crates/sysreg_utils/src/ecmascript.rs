use oxc::syntax::{identifier, keyword};

pub fn is_validate_identifier_name(name: &str) -> bool {
  identifier::is_identifier_name(name)
}

/// Like [`is_validate_identifier_name`], but also rejects reserved words, so the result can be
/// used as a binding name.
pub fn is_validate_binding_name(name: &str) -> bool {
  is_validate_identifier_name(name) && !keyword::is_reserved_keyword(name)
}

/// Turn arbitrary text (usually a module specifier) into a camel-cased identifier.
///
/// `"./foo-bar.js"` becomes `fooBarJs`, `"class"` becomes `_class`.
pub fn to_identifier(text: &str) -> String {
  let mut ret = String::with_capacity(text.len());
  let mut upper_next = false;
  // Leading separators and digits are dropped.
  let mut started = false;

  for char in text.chars() {
    let is_word = char.is_ascii_alphanumeric() || matches!(char, '$' | '_');
    if !is_word {
      if started {
        upper_next = true;
      }
      continue;
    }
    if !started {
      if char.is_ascii_digit() {
        continue;
      }
      started = true;
    }
    if upper_next {
      ret.push(char.to_ascii_uppercase());
      upper_next = false;
    } else {
      ret.push(char);
    }
  }

  if ret.is_empty() {
    return "_".to_string();
  }
  if !is_validate_binding_name(&ret) {
    ret.insert(0, '_');
  }
  ret
}

#[test]
fn test_is_validate_identifier_name() {
  assert!(is_validate_identifier_name("foo"));
  assert!(is_validate_identifier_name("default"));
  assert!(!is_validate_identifier_name("1aaaa"));
  assert!(!is_validate_identifier_name("a-b"));
}

#[test]
fn test_to_identifier() {
  assert_eq!(to_identifier("m"), "m");
  assert_eq!(to_identifier("./foo-bar.js"), "fooBarJs");
  assert_eq!(to_identifier("@scope/pkg"), "scopePkg");
  assert_eq!(to_identifier("123abc"), "abc");
  assert_eq!(to_identifier("class"), "_class");
  assert_eq!(to_identifier("---"), "_");
}
