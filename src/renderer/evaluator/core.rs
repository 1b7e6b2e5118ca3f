use std::collections::HashMap;

use crate::{
    ast::{BinaryOperator, Expr},
    error::RuntimeError,
    renderer::{evaluator::builtin::is_reserved_identifier, value::Value},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// Stores the variable namespace for one render pass.
///
/// A `Context` is created at the start of a render call, mutated in place by
/// `#set` directives, and discarded when the render ends. Nothing persists
/// across renders.
///
/// The reserved builtin names (see
/// [`builtin`](crate::renderer::evaluator::builtin)) can never be bound:
/// colliding caller-supplied entries are dropped at construction, and
/// [`Context::define`] silently ignores writes to them.
pub struct Context {
    /// The identifier-to-value bindings visible to expressions and
    /// interpolation.
    pub variables: HashMap<String, Value>,
}

#[allow(clippy::new_without_default)]
impl Context {
    /// Creates a new, empty render context.
    #[must_use]
    pub fn new() -> Self {
        Self { variables: HashMap::new() }
    }

    /// Creates a render context seeded with caller-supplied values.
    ///
    /// Entries whose name collides with a reserved builtin name are dropped,
    /// not errors: builtins always win.
    ///
    /// # Example
    /// ```
    /// use std::collections::HashMap;
    ///
    /// use velocette::renderer::{evaluator::core::Context, value::Value};
    ///
    /// let mut vars = HashMap::new();
    /// vars.insert("name".to_string(), Value::from("Ada"));
    /// vars.insert("Integer".to_string(), Value::Integer(0)); // dropped
    ///
    /// let context = Context::with_vars(&vars);
    /// assert_eq!(context.get_variable("name"), Some(&Value::from("Ada")));
    /// assert_eq!(context.get_variable("Integer"), None);
    /// ```
    #[must_use]
    pub fn with_vars(vars: &HashMap<String, Value>) -> Self {
        let mut context = Self::new();
        for (name, value) in vars {
            context.define(name, value.clone());
        }
        context
    }

    /// Looks up the raw value bound to `name`, without coercion.
    #[must_use]
    pub fn get_variable(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// Binds `name` to `value`.
    ///
    /// Writes targeting a reserved builtin name are silently ignored; the
    /// binding is left untouched and no error is raised. This is the
    /// protection both `#set` and context construction rely on.
    pub fn define(&mut self, name: &str, value: Value) {
        if is_reserved_identifier(name) {
            return;
        }
        self.variables.insert(name.to_owned(), value);
    }

    /// Resolves a `$identifier` reference for expression evaluation.
    ///
    /// The name is looked up in the context; a bound string that looks
    /// numeric is coerced to a number (see [`Value::coerce_numeric`]), any
    /// other bound value passes through unchanged, and an absent name
    /// resolves to [`Value::Null`].
    ///
    /// # Example
    /// ```
    /// use std::collections::HashMap;
    ///
    /// use velocette::renderer::{evaluator::core::Context, value::Value};
    ///
    /// let mut vars = HashMap::new();
    /// vars.insert("when".to_string(), Value::from("251221"));
    ///
    /// let context = Context::with_vars(&vars);
    /// assert_eq!(context.resolve("when"), Value::Integer(251_221));
    /// assert_eq!(context.resolve("missing"), Value::Null);
    /// ```
    #[must_use]
    pub fn resolve(&self, name: &str) -> Value {
        match self.get_variable(name) {
            Some(Value::String(s)) => {
                Value::coerce_numeric(s).unwrap_or_else(|| Value::String(s.clone()))
            },
            Some(value) => value.clone(),
            None => Value::Null,
        }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation.
    /// The evaluator dispatches based on expression variant: literals,
    /// variable references, unary and binary operations, and builtin method
    /// calls. It can reach nothing beyond the context and the builtin table:
    /// no ambient state, no I/O.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Errors
    /// Any `RuntimeError` raised by an operator or builtin.
    pub fn eval(&self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value)),
            Expr::Variable { name, .. } => Ok(self.resolve(name)),
            Expr::UnaryOp { op, expr, line } => {
                let value = self.eval(expr)?;
                Self::eval_unary(*op, &value, *line)
            },
            Expr::BinaryOp { left, op, right, line } => {
                self.eval_binary_op(left, *op, right, *line)
            },
            Expr::MethodCall { target,
                               method,
                               arguments,
                               line, } => self.eval_method_call(target, method, arguments, *line),
        }
    }

    /// Evaluates a binary operator applied to two expressions.
    ///
    /// Logical AND and OR short-circuit here, before the right operand is
    /// evaluated: `false && x` and `true || x` never touch `x`. All other
    /// operators evaluate both sides and delegate to
    /// [`Context::eval_binary`].
    ///
    /// # Parameters
    /// - `left`: Left operand.
    /// - `op`: Operator.
    /// - `right`: Right operand.
    /// - `line`: Template line number.
    ///
    /// # Returns
    /// The evaluated result.
    pub fn eval_binary_op(&self,
                          left: &Expr,
                          op: BinaryOperator,
                          right: &Expr,
                          line: usize)
                          -> EvalResult<Value> {
        match op {
            BinaryOperator::And => {
                if !self.eval(left)?.is_truthy() {
                    return Ok(Value::Bool(false));
                }
                Ok(Value::Bool(self.eval(right)?.is_truthy()))
            },
            BinaryOperator::Or => {
                if self.eval(left)?.is_truthy() {
                    return Ok(Value::Bool(true));
                }
                Ok(Value::Bool(self.eval(right)?.is_truthy()))
            },
            _ => {
                let lval = self.eval(left)?;
                let rval = self.eval(right)?;

                Self::eval_binary(op, &lval, &rval, line)
            },
        }
    }

    /// Evaluates a method call on a builtin namespace.
    ///
    /// Argument expressions are evaluated first, then the call is dispatched
    /// to the builtin table. Unknown namespaces or methods are an
    /// `UnknownMethod` error.
    pub fn eval_method_call(&self,
                            target: &str,
                            method: &str,
                            arguments: &[Expr],
                            line: usize)
                            -> EvalResult<Value> {
        let mut args = Vec::with_capacity(arguments.len());

        for expr in arguments {
            args.push(self.eval(expr)?);
        }

        Self::eval_builtin(target, method, &args, line)
    }
}
