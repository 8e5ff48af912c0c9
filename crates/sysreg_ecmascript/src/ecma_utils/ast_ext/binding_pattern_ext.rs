use oxc::ast::ast::{self, BindingPatternKind};
use smallvec::SmallVec;

pub trait BindingPatternExt<'ast> {
  /// Every identifier bound by the pattern, in source order.
  fn binding_identifiers(&self) -> SmallVec<[&ast::BindingIdentifier<'ast>; 1]>;
}

impl<'ast> BindingPatternExt<'ast> for ast::BindingPattern<'ast> {
  fn binding_identifiers(&self) -> SmallVec<[&ast::BindingIdentifier<'ast>; 1]> {
    let mut ret = SmallVec::new();
    collect_binding_identifiers(self, &mut ret);
    ret
  }
}

fn collect_binding_identifiers<'a, 'ast>(
  pattern: &'a ast::BindingPattern<'ast>,
  ret: &mut SmallVec<[&'a ast::BindingIdentifier<'ast>; 1]>,
) {
  match &pattern.kind {
    BindingPatternKind::BindingIdentifier(ident) => ret.push(ident),
    BindingPatternKind::ObjectPattern(object) => {
      for property in &object.properties {
        collect_binding_identifiers(&property.value, ret);
      }
      if let Some(rest) = &object.rest {
        collect_binding_identifiers(&rest.argument, ret);
      }
    }
    BindingPatternKind::ArrayPattern(array) => {
      for element in array.elements.iter().flatten() {
        collect_binding_identifiers(element, ret);
      }
      if let Some(rest) = &array.rest {
        collect_binding_identifiers(&rest.argument, ret);
      }
    }
    BindingPatternKind::AssignmentPattern(assign) => collect_binding_identifiers(&assign.left, ret),
  }
}
