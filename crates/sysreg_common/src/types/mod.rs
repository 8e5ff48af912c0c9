pub mod dependency_table;
pub mod export_name_index;
pub mod specifier;
pub mod transform_output;
