use std::sync::LazyLock;

use regex::Regex;

static MODULE_MATCHER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?:\w+::)").unwrap());

/// Unwrapping for values whose absence is a bug in this workspace rather than bad input.
pub trait OptionExt<T> {
  fn unpack(self) -> T;
}

impl<T> OptionExt<T> for Option<T> {
  /// Similar to `unwrap`, but the panic message names the type that was expected.
  ///
  /// ```ignore
  /// None::<DependencyEntry>.unpack();
  /// // Got `None` value when calling `OptionExt::unpack()` on `DependencyEntry`
  /// ```
  fn unpack(self) -> T {
    self.map_or_else(
      || {
        let type_name = std::any::type_name::<T>();
        let type_name = MODULE_MATCHER_RE.replace_all(type_name, "");
        panic!("Got `None` value when calling `OptionExt::unpack()` on `{type_name}`")
      },
      |v| v,
    )
  }
}

#[test]
fn test_unpack_some() {
  assert_eq!(Some(3).unpack(), 3);
  assert_eq!(Some("a").unpack(), "a");
}

#[test]
#[should_panic(expected = "on `String`")]
fn test_unpack_none_names_type() {
  None::<std::string::String>.unpack();
}
