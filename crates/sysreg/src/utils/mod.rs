pub mod module_naming;
pub mod naming_context;
pub mod normalize_options;
pub mod parse_to_ecma_ast;
