mod assemble;
mod classify;
mod export_call;
mod hoist;
mod reassign;
mod setters;

use oxc::{allocator::TakeIn, ast_visit::VisitMut, semantic::Scoping};
use sysreg_common::NormalizedTransformOptions;
use sysreg_ecmascript::{AstSnippet, EcmaAst};
use sysreg_error::BuildResult;
use sysreg_utils::collections::FxIndexSet;

use self::{
  assemble::{RegistrationAssembler, RegistrationParts},
  classify::{ClassifiedModule, ModuleClassifier},
  export_call::ExportCall,
  hoist::{HoistDecision, VarHoister},
  reassign::ReassignmentRewriter,
  setters::SetterSynthesizer,
};
use crate::utils::naming_context::NamingContext;

/// What the caller learns about a registered module besides its code.
#[derive(Debug)]
pub struct RegisteredModule {
  pub dependencies: Vec<String>,
  pub exported_names: Vec<String>,
}

/// Replaces the body of `ast` with a single registration call.
///
/// The steps run in a fixed order:
/// 1. classify top-level statements into dependencies, pre-body and body,
/// 2. hoist `var` and class declarations out of the body when no top-level `let`/`const` exists,
/// 3. route every write to an exported binding through `_export`,
/// 4. build one setter per dependency,
/// 5. assemble the factory.
pub fn register_module(
  ast: &mut EcmaAst,
  scoping: &Scoping,
  module_name: Option<&str>,
  options: &NormalizedTransformOptions,
) -> BuildResult<RegisteredModule> {
  let mut naming = NamingContext::from_program(ast.program());

  ast.with_mut(|fields| -> BuildResult<RegisteredModule> {
    let alloc = fields.allocator;
    let snippet = AstSnippet::new(alloc);
    let export_ident = naming.generate_uid("export");
    let export_call = ExportCall::new(&snippet, &export_ident);

    let decision = HoistDecision::compute(&fields.program.body);
    tracing::debug!(can_hoist = decision.can_hoist(), "hoist decision");

    let statements = fields.program.body.take_in(alloc);
    let ClassifiedModule {
      dependencies,
      mut before_body,
      mut body,
      export_names,
      import_bindings,
      exported_names,
    } = ModuleClassifier::new(&snippet, export_call, decision.can_hoist()).classify(statements)?;
    tracing::debug!(dependencies = dependencies.iter().len(), "classified top-level statements");

    let hoisted_names = if decision.can_hoist() {
      VarHoister::new(&snippet).hoist(&mut body)
    } else {
      FxIndexSet::default()
    };

    let mut rewriter =
      ReassignmentRewriter::new(&snippet, export_call, scoping, &export_names, &mut naming);
    rewriter.visit_statements(&mut before_body);
    rewriter.visit_statements(&mut body);
    let ReassignmentRewriter { temporaries, rewritten, .. } = rewriter;
    tracing::debug!(rewritten, "rewrote writes to exported bindings");

    let mut declared: FxIndexSet<String> = import_bindings.into_iter().collect();
    declared.extend(hoisted_names);
    declared.extend(temporaries);
    if !declared.is_empty() {
      before_body.insert(0, snippet.var_decl_without_init_stmt(&declared));
    }

    let setters =
      SetterSynthesizer::new(&snippet, export_call, &mut naming).synthesize(&dependencies)?;

    let assembler = RegistrationAssembler::new(
      &snippet,
      &export_ident,
      &options.system_global,
      options.strict_mode,
    );
    let registration = assembler.assemble(RegistrationParts {
      module_name,
      dependencies: &dependencies,
      setters,
      directives: fields.program.directives.take_in(alloc),
      before_body,
      body,
    });
    fields.program.body.push(registration);

    Ok(RegisteredModule {
      dependencies: dependencies.sources().map(ToString::to_string).collect(),
      exported_names: exported_names.into_iter().collect(),
    })
  })
}
