pub mod ast_ext;
mod ast_snippet;

pub use ast_snippet::AstSnippet;
