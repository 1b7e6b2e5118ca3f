/// Represents a literal value in a directive expression.
///
/// `LiteralValue` covers all raw, constant values that can appear directly in
/// a directive body, such as numbers, booleans, and quoted strings.
/// It is used in the AST to represent literal expressions.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A 64-bit signed integer literal.
    Integer(i64),
    /// A 64-bit floating-point literal.
    Real(f64),
    /// A boolean literal value: `true` or `false`.
    Bool(bool),
    /// A quoted string literal, without its delimiters.
    String(String),
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

/// An abstract syntax tree (AST) node representing a directive expression.
///
/// `Expr` covers every construct the expression sandbox admits: literals,
/// `$identifier` references, unary and binary operations, and method calls on
/// the builtin namespace. Each variant carries the template line it was
/// parsed from for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (number, string, or boolean).
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Line number in the template.
        line:  usize,
    },
    /// Reference to a context variable, written `$name`.
    Variable {
        /// Name of the variable, without the `$` sigil.
        name: String,
        /// Line number in the template.
        line: usize,
    },
    /// A unary operation (negation or logical not).
    UnaryOp {
        /// The unary operator to apply.
        op:   UnaryOperator,
        /// The operand expression.
        expr: Box<Self>,
        /// Line number in the template.
        line: usize,
    },
    /// A binary operation (arithmetic, comparison, or logic).
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the template.
        line:  usize,
    },
    /// A method call on a builtin namespace, e.g. `$Integer.parseInt($x)`.
    MethodCall {
        /// The namespace the method is called on, e.g. `Integer`.
        target:    String,
        /// The method name, e.g. `parseInt`.
        method:    String,
        /// Argument expressions.
        arguments: Vec<Self>,
        /// Line number in the template.
        line:      usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use velocette::ast::Expr;
    ///
    /// let expr = Expr::Variable { name: "x".to_string(),
    ///                             line: 5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Literal { line, .. }
            | Self::Variable { line, .. }
            | Self::UnaryOp { line, .. }
            | Self::BinaryOp { line, .. }
            | Self::MethodCall { line, .. } => *line,
        }
    }
}

/// A unary operator applied to a single operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Numeric negation, `-x`.
    Negate,
    /// Logical not, `!x`.
    Not,
}

/// A binary operator combining two operands.
///
/// The set is closed: the expression sandbox exposes ordinary arithmetic,
/// relational, and logical operators and nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition, or string concatenation when either operand is a string.
    Add,
    /// Subtraction.
    Sub,
    /// Multiplication.
    Mul,
    /// Division. Always evaluates in floating point.
    Div,
    /// Remainder.
    Mod,
    /// `<`
    Less,
    /// `>`
    Greater,
    /// `<=`
    LessEqual,
    /// `>=`
    GreaterEqual,
    /// `==`
    Equal,
    /// `!=`
    NotEqual,
    /// `&&`
    And,
    /// `||`
    Or,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let symbol = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Less => "<",
            Self::Greater => ">",
            Self::LessEqual => "<=",
            Self::GreaterEqual => ">=",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::And => "&&",
            Self::Or => "||",
        };
        write!(f, "{symbol}")
    }
}
