use std::path::PathBuf;

use sysreg::{RegisterTransformer, TransformOptions, TransformOutput};
use sysreg_ecmascript::EcmaCompiler;
use sysreg_error::TransformError;

fn transform(source: &str) -> TransformOutput {
  transform_with(TransformOptions::default(), "test.js", source)
}

fn transform_with(options: TransformOptions, filename: &str, source: &str) -> TransformOutput {
  RegisterTransformer::new(options).transform(source.to_string(), filename).unwrap()
}

fn normalize(source: &str) -> String {
  EcmaCompiler::normalize_script(source).unwrap()
}

#[test]
fn var_only_modules_hoist_declarations_into_the_factory() {
  let output = transform(
    r#"import { a } from "m";
    export var x = 1;
    export function f() { x = a; }
    x = 2;"#,
  );
  assert_eq!(
    output.code,
    normalize(
      r#"System.register(["m"], function (_export) {
        "use strict";
        var a, x;
        function f() { _export("x", x = a); }
        _export("f", f);
        return {
          setters: [function (_m) { a = _m.a; }],
          execute: function () {
            _export("x", x = 1);
            _export("x", x);
            _export("x", x = 2);
          }
        };
      });"#
    )
  );
  assert_eq!(output.exported_names, ["x", "f"]);
}

#[test]
fn block_scoped_declarations_keep_functions_in_place() {
  let output = transform(
    r#"import { a } from "m";
    export let y = a;
    export function g() { return y; }
    y++;"#,
  );
  assert_eq!(
    output.code,
    normalize(
      r#"System.register(["m"], function (_export) {
        "use strict";
        var a;
        return {
          setters: [function (_m) { a = _m.a; }],
          execute: function () {
            let y = a;
            _export("y", y);
            function g() { return y; }
            _export("g", g);
            _export("y", ++y);
          }
        };
      });"#
    )
  );
}

#[test]
fn reassignment_notifies_every_alias() {
  let output = transform("var v = 1; export { v as p, v as q }; v = 2;");
  assert_eq!(
    output.code,
    normalize(
      r#"System.register([], function (_export) {
        "use strict";
        var v;
        return {
          setters: [],
          execute: function () {
            _export("p", _export("q", v = 1));
            _export("p", v);
            _export("q", v);
            _export("p", _export("q", v = 2));
          }
        };
      });"#
    )
  );
  assert_eq!(output.exported_names, ["p", "q"]);
}

#[test]
fn wildcard_reexport_skips_default() {
  let output = transform(r#"export * from "lib"; export { named as renamed } from "lib";"#);
  assert_eq!(
    output.code,
    normalize(
      r#"System.register(["lib"], function (_export) {
        "use strict";
        return {
          setters: [function (_lib) {
            var _exportObj = {};
            for (var _key in _lib) {
              if (_key !== "default" && Object.prototype.hasOwnProperty.call(_lib, _key))
                _exportObj[_key] = _lib[_key];
            }
            _exportObj.renamed = _lib.named;
            _export(_exportObj);
          }],
          execute: function () {}
        };
      });"#
    )
  );
  assert_eq!(output.dependencies, ["lib"]);
  assert_eq!(output.exported_names, ["renamed"]);
}

#[test]
fn dependencies_keep_first_occurrence_order() {
  let output = transform(
    r#"import "c";
    export * from "a";
    import { x } from "b";
    import { y } from "a";
    export { z } from "c";"#,
  );
  assert_eq!(output.dependencies, ["c", "a", "b"]);
}

#[test]
fn imported_binding_reexported_under_another_name() {
  let output = transform(r#"import { x } from "m"; export { x as y };"#);
  assert_eq!(
    output.code,
    normalize(
      r#"System.register(["m"], function (_export) {
        "use strict";
        var x;
        return {
          setters: [function (_m) { x = _m.x; }],
          execute: function () { _export("y", x); }
        };
      });"#
    )
  );
  assert_eq!(output.dependencies, ["m"]);
}

#[test]
fn default_function_runs_before_execute() {
  let output = transform("export default function f() {}");
  assert_eq!(
    output.code,
    normalize(
      r#"System.register([], function (_export) {
        "use strict";
        function f() {}
        _export("default", f);
        return { setters: [], execute: function () {} };
      });"#
    )
  );
  assert_eq!(output.exported_names, ["default"]);
}

#[test]
fn anonymous_default_stays_in_execute() {
  let output = transform("export default class {}");
  assert_eq!(
    output.code,
    normalize(
      r#"System.register([], function (_export) {
        "use strict";
        return { setters: [], execute: function () { _export("default", class {}); } };
      });"#
    )
  );
}

#[test]
fn anonymous_default_function_runs_before_execute() {
  let output = transform("export default function () {}");
  assert_eq!(
    output.code,
    normalize(
      r#"System.register([], function (_export) {
        "use strict";
        _export("default", function () {});
        return { setters: [], execute: function () {} };
      });"#
    )
  );
}

#[test]
fn anonymous_default_function_stays_in_execute_next_to_let() {
  let output = transform("let ready = true; export default function () {}");
  assert_eq!(
    output.code,
    normalize(
      r#"System.register([], function (_export) {
        "use strict";
        return {
          setters: [],
          execute: function () {
            let ready = true;
            _export("default", function () {});
          }
        };
      });"#
    )
  );
}

#[test]
fn modules_without_imports_or_exports_are_only_wrapped() {
  let source = r#"System.register([], function (_export) { foo(); });"#;
  let output = transform(source);
  assert_eq!(
    output.code,
    normalize(
      r#"System.register([], function (_export2) {
        "use strict";
        return {
          setters: [],
          execute: function () {
            System.register([], function (_export) { foo(); });
          }
        };
      });"#
    )
  );
  assert!(output.dependencies.is_empty());
}

#[test]
fn generated_names_avoid_existing_bindings() {
  let output = transform("var _export = 1; export { _export as e };");
  assert_eq!(
    output.code,
    normalize(
      r#"System.register([], function (_export2) {
        "use strict";
        var _export;
        return {
          setters: [],
          execute: function () {
            _export2("e", _export = 1);
            _export2("e", _export);
          }
        };
      });"#
    )
  );
}

#[test]
fn postfix_update_in_expression_keeps_the_old_value() {
  let output = transform("export var n = 0; log(n++);");
  assert_eq!(
    output.code,
    normalize(
      r#"System.register([], function (_export) {
        "use strict";
        var n, _n;
        return {
          setters: [],
          execute: function () {
            _export("n", n = 0);
            _export("n", n);
            log((_n = n++, _export("n", n), _n));
          }
        };
      });"#
    )
  );
}

#[test]
fn each_postfix_update_gets_its_own_temporary() {
  let output = transform("export var n = 0; log(n++, n--);");
  assert_eq!(
    output.code,
    normalize(
      r#"System.register([], function (_export) {
        "use strict";
        var n, _n, _n2;
        return {
          setters: [],
          execute: function () {
            _export("n", n = 0);
            _export("n", n);
            log((_n = n++, _export("n", n), _n), (_n2 = n--, _export("n", n), _n2));
          }
        };
      });"#
    )
  );
}

#[test]
fn classes_share_one_binding_with_hoisted_functions() {
  let output = transform("export class A {} export function make() { return new A(); }");
  assert_eq!(
    output.code,
    normalize(
      r#"System.register([], function (_export) {
        "use strict";
        var A;
        function make() { return new A(); }
        _export("make", make);
        return {
          setters: [],
          execute: function () {
            _export("A", A = class A {});
            _export("A", A);
          }
        };
      });"#
    )
  );
}

#[test]
fn module_name_and_global_come_from_options() {
  let options = TransformOptions {
    cwd: Some(PathBuf::from("/project")),
    module_ids: Some(true),
    module_root: Some("app".into()),
    system_global: Some("SystemJS".into()),
    strict_mode: Some(false),
    ..Default::default()
  };
  let output = transform_with(options, "/project/src/main.js", "work();");
  assert_eq!(output.module_name.as_deref(), Some("app/src/main"));
  assert_eq!(
    output.code,
    normalize(
      r#"SystemJS.register("app/src/main", [], function (_export) {
        return { setters: [], execute: function () { work(); } };
      });"#
    )
  );
}

#[test]
fn hashbang_and_directives_are_preserved() {
  let output = transform("#!/usr/bin/env node\n\"use client\";\nrun();");
  assert!(output.code.starts_with("#!/usr/bin/env node"));
  assert!(output.code.contains(r#""use strict";"#));
  assert!(output.code.contains(r#""use client";"#));
}

#[test]
fn commonjs_input_is_rejected() {
  let error = RegisterTransformer::new(TransformOptions::default())
    .transform("module.exports = 1;".to_string(), "legacy.cjs")
    .unwrap_err();
  assert!(matches!(error.transform_error(), Some(TransformError::NotAModule { .. })));
}

#[test]
fn typescript_only_module_forms_are_rejected() {
  let sources = [
    "const x = 1; export = x;",
    "type T = number; export type { T };",
    "type T = number; export { type T };",
    "export interface Shape { size: number }",
    "export default interface Shape { size: number }",
    r#"import type { T } from "m";"#,
  ];
  for source in sources {
    let error = RegisterTransformer::new(TransformOptions::default())
      .transform(source.to_string(), "types.ts")
      .unwrap_err();
    assert!(
      matches!(error.transform_error(), Some(TransformError::UnsupportedExportForm { .. })),
      "{source}"
    );
  }
}

#[test]
fn typescript_values_keep_their_annotations() {
  let output = transform_with(
    TransformOptions::default(),
    "count.ts",
    "export let count: number = 0; count += 1;",
  );
  assert!(output.code.contains("let count: number = 0;"));
  assert!(output.code.contains(r#"_export("count", count += 1)"#));
  assert_eq!(output.exported_names, ["count"]);
}

#[test]
fn metadata_serializes_with_camel_case_keys() {
  let output = transform(r#"import "side-effect"; export const answer = 42;"#);
  let json = output.to_json().unwrap();
  assert!(json.contains(r#""moduleName": null"#));
  assert!(json.contains(r#""exportedNames": ["#));
  assert!(json.contains(r#""side-effect""#));
}
