use oxc::{
  allocator::{self, Allocator, Box, Dummy, IntoIn, TakeIn},
  ast::{
    AstBuilder, NONE,
    ast::{
      self, Argument, AssignmentOperator, BindingIdentifier, BindingPatternKind, Expression,
      PropertyKind, Statement, VariableDeclarationKind,
    },
  },
  span::{SPAN, Span},
};
use sysreg_utils::ecmascript::is_validate_identifier_name;

type PassedStr<'a> = &'a str;

// `AstBuilder` is more suitable name, but it's already used in oxc.
pub struct AstSnippet<'ast> {
  pub builder: AstBuilder<'ast>,
}

impl<'ast> AstSnippet<'ast> {
  pub fn new(alloc: &'ast Allocator) -> Self {
    Self { builder: AstBuilder::new(alloc) }
  }

  #[inline]
  pub fn alloc(&self) -> &'ast Allocator {
    self.builder.allocator
  }

  #[inline]
  pub fn id_name(&self, name: PassedStr, span: Span) -> ast::IdentifierName<'ast> {
    self.builder.identifier_name(span, self.builder.atom(name))
  }

  #[inline]
  pub fn id_ref_expr(&self, name: PassedStr, span: Span) -> Expression<'ast> {
    self.builder.expression_identifier(span, self.builder.atom(name))
  }

  #[inline]
  pub fn binding_pattern(&self, name: PassedStr) -> ast::BindingPattern<'ast> {
    self.builder.binding_pattern(
      self.builder.binding_pattern_kind_binding_identifier(SPAN, self.builder.atom(name)),
      NONE,
      false,
    )
  }

  pub fn string_literal_expr(&self, value: PassedStr, span: Span) -> Expression<'ast> {
    self.builder.expression_string_literal(span, self.builder.atom(value), None)
  }

  /// `object.property`, or `object["property"]` when `property` is not an identifier name.
  pub fn member_expr(
    &self,
    object: Expression<'ast>,
    property: PassedStr,
  ) -> ast::MemberExpression<'ast> {
    if is_validate_identifier_name(property) {
      self.builder.member_expression_static(SPAN, object, self.id_name(property, SPAN), false)
    } else {
      self.builder.member_expression_computed(
        SPAN,
        object,
        self.string_literal_expr(property, SPAN),
        false,
      )
    }
  }

  #[inline]
  pub fn member_expr_expr(
    &self,
    object: Expression<'ast>,
    property: PassedStr,
  ) -> Expression<'ast> {
    Expression::from(self.member_expr(object, property))
  }

  /// `root.a.b.c` for `names = ["a", "b", "c"]`
  pub fn static_member_chain_expr(&self, root: PassedStr, names: &[&str]) -> Expression<'ast> {
    names.iter().fold(self.id_ref_expr(root, SPAN), |object, name| {
      Expression::from(self.builder.member_expression_static(
        SPAN,
        object,
        self.id_name(name, SPAN),
        false,
      ))
    })
  }

  /// `object[property]` where `property` is an arbitrary expression.
  pub fn computed_member_expr(
    &self,
    object: Expression<'ast>,
    property: Expression<'ast>,
  ) -> ast::MemberExpression<'ast> {
    self.builder.member_expression_computed(SPAN, object, property, false)
  }

  /// ```js
  ///  id = ...
  /// ￣￣ AssignmentTarget
  /// ```
  pub fn simple_id_assignment_target(
    &self,
    id: PassedStr,
    span: Span,
  ) -> ast::AssignmentTarget<'ast> {
    ast::AssignmentTarget::AssignmentTargetIdentifier(
      self.builder.alloc_identifier_reference(span, self.builder.atom(id)),
    )
  }

  pub fn member_assignment_target(
    &self,
    member: ast::MemberExpression<'ast>,
  ) -> ast::AssignmentTarget<'ast> {
    ast::AssignmentTarget::from(ast::SimpleAssignmentTarget::from(member))
  }

  /// `[target] = [value]`
  pub fn assign_expr(
    &self,
    target: ast::AssignmentTarget<'ast>,
    value: Expression<'ast>,
  ) -> Expression<'ast> {
    self.builder.expression_assignment(SPAN, AssignmentOperator::Assign, target, value)
  }

  /// `[name] = [value];`
  pub fn id_assign_stmt(&self, name: PassedStr, value: Expression<'ast>) -> Statement<'ast> {
    self.expr_stmt(self.assign_expr(self.simple_id_assignment_target(name, SPAN), value))
  }

  #[inline]
  pub fn expr_stmt(&self, expr: Expression<'ast>) -> Statement<'ast> {
    self.builder.statement_expression(SPAN, expr)
  }

  /// `callee(arg)`
  pub fn call_expr_with_arg_expr(
    &self,
    callee: Expression<'ast>,
    arg: Expression<'ast>,
  ) -> Expression<'ast> {
    self.builder.expression_call(SPAN, callee, NONE, self.builder.vec1(Argument::from(arg)), false)
  }

  /// `callee(arg1, arg2)`
  pub fn call_expr_with_2arg_expr(
    &self,
    callee: Expression<'ast>,
    arg1: Expression<'ast>,
    arg2: Expression<'ast>,
  ) -> Expression<'ast> {
    self.builder.expression_call(
      SPAN,
      callee,
      NONE,
      self.builder.vec_from_iter([Argument::from(arg1), Argument::from(arg2)]),
      false,
    )
  }

  /// `var [name] = [init]`
  pub fn var_decl_stmt(&self, name: PassedStr, init: Expression<'ast>) -> Statement<'ast> {
    let declarations = self.builder.vec1(self.builder.variable_declarator(
      SPAN,
      VariableDeclarationKind::Var,
      self.binding_pattern(name),
      Some(init),
      false,
    ));
    Statement::from(self.builder.declaration_variable(
      SPAN,
      VariableDeclarationKind::Var,
      declarations,
      false,
    ))
  }

  /// `var a, b, c;`
  pub fn var_decl_without_init_stmt<S: AsRef<str>>(
    &self,
    names: impl IntoIterator<Item = S>,
  ) -> Statement<'ast> {
    let declarations = self.builder.vec_from_iter(names.into_iter().map(|name| {
      self.builder.variable_declarator(
        SPAN,
        VariableDeclarationKind::Var,
        self.binding_pattern(name.as_ref()),
        None,
        false,
      )
    }));
    Statement::from(self.builder.declaration_variable(
      SPAN,
      VariableDeclarationKind::Var,
      declarations,
      false,
    ))
  }

  /// `(a, b, c)` without the parentheses, which codegen adds where needed.
  pub fn seq_expr(&self, expressions: allocator::Vec<'ast, Expression<'ast>>) -> Expression<'ast> {
    Expression::SequenceExpression(self.builder.alloc_sequence_expression(SPAN, expressions))
  }

  /// `function ([params]) { [directives] [statements] }`
  pub fn function_expr(
    &self,
    params: &[&str],
    directives: allocator::Vec<'ast, ast::Directive<'ast>>,
    statements: allocator::Vec<'ast, Statement<'ast>>,
  ) -> Expression<'ast> {
    let items = self.builder.vec_from_iter(params.iter().map(|name| {
      self.builder.formal_parameter(
        SPAN,
        self.builder.vec(),
        self.binding_pattern(name),
        None,
        false,
        false,
      )
    }));
    Expression::FunctionExpression(self.builder.alloc_function(
      SPAN,
      ast::FunctionType::FunctionExpression,
      None::<BindingIdentifier>,
      false,
      false,
      false,
      NONE,
      NONE,
      self.builder.formal_parameters(SPAN, ast::FormalParameterKind::FormalParameter, items, NONE),
      NONE,
      Some(self.builder.function_body(SPAN, directives, statements)),
    ))
  }

  /// `"use strict"` and friends.
  pub fn directive(&self, value: PassedStr) -> ast::Directive<'ast> {
    self.builder.directive(SPAN, self.builder.string_literal(SPAN, self.builder.atom(value), None), self.builder.atom(value))
  }

  // return xxx
  pub fn return_stmt(&self, argument: Expression<'ast>) -> Statement<'ast> {
    Statement::ReturnStatement(
      ast::ReturnStatement { argument: Some(argument), ..ast::ReturnStatement::dummy(self.alloc()) }
        .into_in(self.alloc()),
    )
  }

  /// `{ key: value, ... }`, keys are always plain identifiers.
  pub fn object_expr(
    &self,
    properties: impl IntoIterator<Item = (&'static str, Expression<'ast>)>,
  ) -> Expression<'ast> {
    let mut object = ast::ObjectExpression::dummy(self.alloc());
    for (key, value) in properties {
      object.properties.push(self.builder.object_property_kind_object_property(
        SPAN,
        PropertyKind::Init,
        self.builder.property_key_static_identifier(SPAN, key),
        value,
        false,
        false,
        false,
      ));
    }
    Expression::ObjectExpression(Box::new_in(object, self.alloc()))
  }

  /// `{}`
  pub fn empty_object_expr(&self) -> Expression<'ast> {
    Expression::ObjectExpression(Box::new_in(
      ast::ObjectExpression::dummy(self.alloc()),
      self.alloc(),
    ))
  }

  /// `[a, b, c]`
  pub fn array_expr(
    &self,
    elements: impl IntoIterator<Item = Expression<'ast>>,
  ) -> Expression<'ast> {
    let mut array = ast::ArrayExpression::dummy(self.alloc());
    array.elements.extend(elements.into_iter().map(ast::ArrayExpressionElement::from));
    Expression::ArrayExpression(Box::new_in(array, self.alloc()))
  }

  /// Convert the `id` of a `var` declarator into the equivalent assignment target, so that
  /// `var { a, b: [c] } = obj` can be rewritten to `({ a, b: [c] } = obj)`.
  pub fn binding_pattern_to_assignment_target(
    &self,
    pattern: &mut ast::BindingPattern<'ast>,
  ) -> ast::AssignmentTarget<'ast> {
    match &mut pattern.kind {
      BindingPatternKind::BindingIdentifier(ident) => {
        self.simple_id_assignment_target(&ident.name, ident.span)
      }
      BindingPatternKind::ObjectPattern(object) => {
        let mut properties = self.builder.vec_with_capacity(object.properties.len());
        for property in object.properties.iter_mut() {
          properties.push(self.binding_property_to_assignment_target_property(property));
        }
        let rest = object.rest.as_mut().map(|rest| {
          ast::AssignmentTargetRest {
            span: rest.span,
            target: self.binding_pattern_to_assignment_target(&mut rest.argument),
          }
          .into_in(self.alloc())
        });
        ast::AssignmentTarget::ObjectAssignmentTarget(
          ast::ObjectAssignmentTarget {
            span: object.span,
            properties,
            rest,
            ..ast::ObjectAssignmentTarget::dummy(self.alloc())
          }
          .into_in(self.alloc()),
        )
      }
      BindingPatternKind::ArrayPattern(array) => {
        let mut elements = self.builder.vec_with_capacity(array.elements.len());
        for element in array.elements.iter_mut() {
          elements
            .push(element.as_mut().map(|element| self.binding_pattern_to_maybe_default(element)));
        }
        let rest = array.rest.as_mut().map(|rest| {
          ast::AssignmentTargetRest {
            span: rest.span,
            target: self.binding_pattern_to_assignment_target(&mut rest.argument),
          }
          .into_in(self.alloc())
        });
        ast::AssignmentTarget::ArrayAssignmentTarget(
          ast::ArrayAssignmentTarget {
            span: array.span,
            elements,
            rest,
            ..ast::ArrayAssignmentTarget::dummy(self.alloc())
          }
          .into_in(self.alloc()),
        )
      }
      // Only reachable for nested patterns, which go through `binding_pattern_to_maybe_default`.
      BindingPatternKind::AssignmentPattern(assign) => {
        self.binding_pattern_to_assignment_target(&mut assign.left)
      }
    }
  }

  fn binding_pattern_to_maybe_default(
    &self,
    pattern: &mut ast::BindingPattern<'ast>,
  ) -> ast::AssignmentTargetMaybeDefault<'ast> {
    if let BindingPatternKind::AssignmentPattern(assign) = &mut pattern.kind {
      return ast::AssignmentTargetMaybeDefault::AssignmentTargetWithDefault(
        ast::AssignmentTargetWithDefault {
          binding: self.binding_pattern_to_assignment_target(&mut assign.left),
          init: assign.right.take_in(self.alloc()),
          span: assign.span,
        }
        .into_in(self.alloc()),
      );
    }
    ast::AssignmentTargetMaybeDefault::from(self.binding_pattern_to_assignment_target(pattern))
  }

  fn binding_property_to_assignment_target_property(
    &self,
    property: &mut ast::BindingProperty<'ast>,
  ) -> ast::AssignmentTargetProperty<'ast> {
    if property.shorthand {
      // `{ a }` or `{ a = 1 }`
      let shorthand = match &mut property.value.kind {
        BindingPatternKind::BindingIdentifier(ident) => Some((ident.name, ident.span, None)),
        BindingPatternKind::AssignmentPattern(assign) => {
          let left = match &assign.left.kind {
            BindingPatternKind::BindingIdentifier(ident) => Some((ident.name, ident.span)),
            _ => None,
          };
          left.map(|(name, span)| (name, span, Some(assign.right.take_in(self.alloc()))))
        }
        _ => None,
      };
      if let Some((name, span, init)) = shorthand {
        return ast::AssignmentTargetProperty::AssignmentTargetPropertyIdentifier(
          ast::AssignmentTargetPropertyIdentifier {
            span: property.span,
            binding: self.builder.identifier_reference(span, name),
            init,
          }
          .into_in(self.alloc()),
        );
      }
    }

    ast::AssignmentTargetProperty::AssignmentTargetPropertyProperty(
      ast::AssignmentTargetPropertyProperty {
        name: property.key.take_in(self.alloc()),
        binding: self.binding_pattern_to_maybe_default(&mut property.value),
        span: property.span,
        computed: property.computed,
      }
      .into_in(self.alloc()),
    )
  }
}
