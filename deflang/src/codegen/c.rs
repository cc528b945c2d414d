use log::debug;

use crate::codegen::ast::{Define, FunctionCall, Node};
use crate::codegen::generator::{GenerateResult, Generator};

/// Every value is a C `long long`.
const C_INT: &str = "long long";

/// Emits a definition as a C function.
///
/// `def add(a, b) add(a, b) end` becomes
///
/// ```c
/// long long add(long long a, long long b) {
///     return add(a, b);
/// }
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct CBackend;

impl CBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Generator for CBackend {
    type Output = String;

    fn visit_define(&mut self, define: &Define) -> GenerateResult<String> {
        let params = if define.params.is_empty() {
            "void".to_string()
        } else {
            define
                .params
                .iter()
                .map(|p| format!("{C_INT} {p}"))
                .collect::<Vec<_>>()
                .join(", ")
        };

        let body = self.generate(Node::from(&define.body))?;
        debug!("return expression of `{}`: {}", define.name, body);

        Ok(format!(
            "{C_INT} {}({}) {{\n    return {};\n}}\n",
            define.name, params, body
        ))
    }

    fn visit_integer(&mut self, value: i64) -> GenerateResult<String> {
        Ok(value.to_string())
    }

    fn visit_function_call(&mut self, call: &FunctionCall) -> GenerateResult<String> {
        let args = call
            .args
            .iter()
            .map(|arg| self.generate(Node::from(arg)))
            .collect::<GenerateResult<Vec<_>>>()?;
        Ok(format!("{}({})", call.name, args.join(", ")))
    }

    fn visit_var_ref(&mut self, name: &str) -> GenerateResult<String> {
        Ok(name.to_string())
    }
}
