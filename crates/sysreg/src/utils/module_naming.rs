use std::path::Path;

use sugar_path::SugarPath;
use sysreg_common::NormalizedTransformOptions;

/// Decides the name passed as the first argument of `System.register`.
pub struct ModuleNaming<'a> {
  options: &'a NormalizedTransformOptions,
}

impl<'a> ModuleNaming<'a> {
  pub fn new(options: &'a NormalizedTransformOptions) -> Self {
    Self { options }
  }

  /// `None` means the registration is anonymous.
  pub fn module_name(&self, filename: &str) -> Option<String> {
    if let Some(module_id) = &self.options.module_id {
      return Some(module_id.clone());
    }
    if !self.options.module_ids {
      return None;
    }

    let mut module_name =
      self.options.module_root.as_ref().map(|root| format!("{root}/")).unwrap_or_default();

    let path = Path::new(filename);
    let relative = if path.is_absolute() {
      path.relative(&self.options.cwd).as_path().to_slash_lossy().into_owned()
    } else {
      path.to_slash_lossy().into_owned()
    };
    let mut relative = relative.trim_start_matches("./").to_string();

    if let Some(source_root) = &self.options.source_root {
      let source_root = source_root.trim_end_matches('/');
      if let Some(stripped) = relative.strip_prefix(source_root) {
        if stripped.is_empty() || stripped.starts_with('/') {
          relative = stripped.trim_start_matches('/').to_string();
        }
      }
    }

    if !self.options.keep_module_id_extensions {
      strip_extension(&mut relative);
    }

    module_name.push_str(&relative);
    let module_name = module_name.replace('\\', "/");

    match &self.options.get_module_id {
      Some(resolver) => Some(resolver.resolve(&module_name).unwrap_or(module_name)),
      None => Some(module_name),
    }
  }
}

/// Drops a trailing `.ext` made of word characters, if any.
fn strip_extension(name: &mut String) {
  let Some(dot) = name.rfind('.') else {
    return;
  };
  if name[dot + 1..].chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
    name.truncate(dot);
  }
}

#[cfg(test)]
mod tests {
  use std::path::PathBuf;

  use sysreg_common::{ModuleIdResolver, TransformOptions};

  use super::*;
  use crate::utils::normalize_options::normalize_options;

  fn options(raw: TransformOptions) -> NormalizedTransformOptions {
    normalize_options(TransformOptions { cwd: Some(PathBuf::from("/project")), ..raw })
  }

  #[test]
  fn anonymous_without_module_ids() {
    let options = options(TransformOptions::default());
    assert_eq!(ModuleNaming::new(&options).module_name("/project/src/a.js"), None);
  }

  #[test]
  fn explicit_module_id_wins() {
    let options = options(TransformOptions {
      module_ids: Some(true),
      module_id: Some("fixed".into()),
      ..Default::default()
    });
    let naming = ModuleNaming::new(&options);
    assert_eq!(naming.module_name("/project/src/a.js").as_deref(), Some("fixed"));
  }

  #[test]
  fn derived_from_the_path() {
    let options = options(TransformOptions {
      module_ids: Some(true),
      module_root: Some("app".into()),
      source_root: Some("src".into()),
      ..Default::default()
    });
    let naming = ModuleNaming::new(&options);
    assert_eq!(naming.module_name("/project/src/lib/a.js").as_deref(), Some("app/lib/a"));
    assert_eq!(naming.module_name("lib/b.mjs").as_deref(), Some("app/lib/b"));
    assert_eq!(naming.module_name("/project/srcs/c.js").as_deref(), Some("app/srcs/c"));
  }

  #[test]
  fn keeps_extensions_and_consults_the_resolver() {
    let options = options(TransformOptions {
      module_ids: Some(true),
      keep_module_id_extensions: Some(true),
      get_module_id: Some(ModuleIdResolver::new(|name| {
        name.starts_with("vendor/").then(|| "vendored".to_string())
      })),
      ..Default::default()
    });
    let naming = ModuleNaming::new(&options);
    assert_eq!(naming.module_name("/project/a.js").as_deref(), Some("a.js"));
    assert_eq!(naming.module_name("/project/vendor/x.js").as_deref(), Some("vendored"));
  }

  #[test]
  fn strips_only_the_last_extension() {
    let mut name = "a.min.js".to_string();
    strip_extension(&mut name);
    assert_eq!(name, "a.min");
    let mut name = "dir.v2/file".to_string();
    strip_extension(&mut name);
    assert_eq!(name, "dir.v2/file");
  }
}
