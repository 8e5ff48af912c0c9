use std::fmt::Debug;

use arcstr::ArcStr;
use oxc::{allocator::Allocator, ast::ast::Program, span::SourceType};
use self_cell::self_cell;

pub struct ModuleSource {
  pub text: ArcStr,
  pub allocator: Allocator,
}

pub struct ParsedProgram<'cell> {
  pub program: Program<'cell>,
}

self_cell!(
  /// Keeps the arena and the `Program<'ast>` allocated in it together, so a parsed module can be
  /// handed around as one owned value.
  pub struct ProgramCell {
    owner: ModuleSource,

    #[covariant]
    dependent: ParsedProgram,
  }
);

/// Borrowed view handed out by [`EcmaAst::with_mut`].
pub struct WithMutFields<'outer, 'inner> {
  pub source: &'inner ArcStr,
  pub allocator: &'inner Allocator,
  pub program: &'outer mut Program<'inner>,
}

/// A parsed module.
///
/// - To access `&mut ast::Program`, use `ast.with_mut(|fields| { fields.program; })`.
pub struct EcmaAst {
  pub filename: ArcStr,
  pub source_type: SourceType,
  pub(crate) cell: ProgramCell,
}

impl EcmaAst {
  pub fn source(&self) -> &ArcStr {
    &self.cell.borrow_owner().text
  }

  pub fn program(&self) -> &Program {
    &self.cell.borrow_dependent().program
  }

  pub fn with_mut<'outer, Ret>(
    &'outer mut self,
    func: impl for<'inner> FnOnce(WithMutFields<'outer, 'inner>) -> Ret,
  ) -> Ret {
    self.cell.with_dependent_mut::<'outer, Ret>(
      |owner: &ModuleSource, dependent: &'outer mut ParsedProgram| {
        func(WithMutFields {
          source: &owner.text,
          allocator: &owner.allocator,
          program: &mut dependent.program,
        })
      },
    )
  }
}

impl Debug for EcmaAst {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("EcmaAst")
      .field("filename", &self.filename)
      .field("source", &self.source())
      .finish_non_exhaustive()
  }
}
