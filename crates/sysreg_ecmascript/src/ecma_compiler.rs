use arcstr::ArcStr;
use oxc::{
  allocator::Allocator,
  ast::ast::Program,
  codegen::Codegen,
  parser::{Parser, ParserReturn},
  span::SourceType,
};
use sysreg_error::{BuildResult, TransformError};

use crate::ecma_ast::{EcmaAst, ModuleSource, ParsedProgram, ProgramCell};

pub struct EcmaCompiler;

impl EcmaCompiler {
  pub fn parse(
    filename: &str,
    source: impl Into<ArcStr>,
    source_type: SourceType,
  ) -> BuildResult<EcmaAst> {
    let owner = ModuleSource { text: source.into(), allocator: Allocator::default() };
    let cell = ProgramCell::try_new(owner, |owner| {
      let ParserReturn { program, errors, panicked, .. } =
        Parser::new(&owner.allocator, &owner.text, source_type).parse();
      if errors.is_empty() && !panicked {
        Ok(ParsedProgram { program })
      } else {
        Err(TransformError::Parse {
          filename: filename.to_string(),
          messages: errors.iter().map(|error| error.message.to_string()).collect(),
        })
      }
    })?;

    Ok(EcmaAst { filename: filename.into(), source_type, cell })
  }

  pub fn print(ast: &EcmaAst) -> String {
    Self::print_program(ast.program())
  }

  pub fn print_program(program: &Program) -> String {
    Codegen::new().build(program).code
  }

  /// Parse `source` as a classic script and print it back. Two programs that print the same way
  /// through this function are considered equal by the tests.
  pub fn normalize_script(source: &str) -> BuildResult<String> {
    let ast = Self::parse("<normalize>", source, SourceType::cjs())?;
    Ok(Self::print(&ast))
  }
}

#[test]
fn basic_test() {
  let ast = EcmaCompiler::parse("a.js", "const a = 1;", SourceType::mjs()).unwrap();
  assert_eq!(EcmaCompiler::print(&ast), "const a = 1;\n");
  assert_eq!(ast.filename.as_str(), "a.js");
}

#[test]
fn parse_error_names_the_file() {
  let error = EcmaCompiler::parse("broken.js", "import {", SourceType::mjs()).unwrap_err();
  assert!(matches!(
    error.transform_error(),
    Some(TransformError::Parse { filename, messages })
      if filename == "broken.js" && !messages.is_empty()
  ));
}

#[test]
fn normalize_script_is_stable() {
  let once = EcmaCompiler::normalize_script("System.register([], function (_export) {})").unwrap();
  assert_eq!(EcmaCompiler::normalize_script(&once).unwrap(), once);
}
