mod transform_options;
mod types;

pub use crate::{
  transform_options::{
    TransformOptions, module_id_resolver::ModuleIdResolver,
    normalized_transform_options::NormalizedTransformOptions,
  },
  types::{
    dependency_table::{DependencyEntry, DependencyTable},
    export_name_index::{ExportNameIndex, ExportNameIndexBuilder},
    specifier::Specifier,
    transform_output::TransformOutput,
  },
};
