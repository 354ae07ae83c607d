use std::f64::consts;
use std::fmt;

use serde::Deserialize;

use crate::math::function::realfunction::{
    EvaluationFailure,
    RealFunction
};

/// 定義域外求值的處理方式。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DomainPolicy {
    /// 定義域外（`ln(0)`、`sqrt(-1)`、除以零⋯）回報 `EvaluationFailure`
    #[default]
    Strict,
    /// 直接回傳 IEEE-754 結果（NaN / inf）
    Ieee
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryFunction {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    Ln,
    Log10,
    Log2,
    Sqrt,
    Abs
}

impl UnaryFunction {
    /// `log` 與 `ln` 同為自然對數。
    pub fn from_name(name: &str) -> Option<UnaryFunction> {
        match name {
            "sin" => Some(UnaryFunction::Sin),
            "cos" => Some(UnaryFunction::Cos),
            "tan" => Some(UnaryFunction::Tan),
            "asin" => Some(UnaryFunction::Asin),
            "acos" => Some(UnaryFunction::Acos),
            "atan" => Some(UnaryFunction::Atan),
            "sinh" => Some(UnaryFunction::Sinh),
            "cosh" => Some(UnaryFunction::Cosh),
            "tanh" => Some(UnaryFunction::Tanh),
            "exp" => Some(UnaryFunction::Exp),
            "ln" | "log" => Some(UnaryFunction::Ln),
            "log10" => Some(UnaryFunction::Log10),
            "log2" => Some(UnaryFunction::Log2),
            "sqrt" => Some(UnaryFunction::Sqrt),
            "abs" => Some(UnaryFunction::Abs),
            _ => None
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            UnaryFunction::Sin => "sin",
            UnaryFunction::Cos => "cos",
            UnaryFunction::Tan => "tan",
            UnaryFunction::Asin => "asin",
            UnaryFunction::Acos => "acos",
            UnaryFunction::Atan => "atan",
            UnaryFunction::Sinh => "sinh",
            UnaryFunction::Cosh => "cosh",
            UnaryFunction::Tanh => "tanh",
            UnaryFunction::Exp => "exp",
            UnaryFunction::Ln => "ln",
            UnaryFunction::Log10 => "log10",
            UnaryFunction::Log2 => "log2",
            UnaryFunction::Sqrt => "sqrt",
            UnaryFunction::Abs => "abs"
        }
    }

    fn check_domain(&self, x: f64) -> Result<(), EvaluationFailure> {
        let violated = match self {
            UnaryFunction::Ln | UnaryFunction::Log10 | UnaryFunction::Log2 => !(x > 0.0),
            UnaryFunction::Sqrt => x < 0.0,
            UnaryFunction::Asin | UnaryFunction::Acos => !(-1.0..=1.0).contains(&x),
            _ => false
        };
        if violated {
            Err(EvaluationFailure::new(format!("{}({}) is undefined", self.name(), x)))
        } else {
            Ok(())
        }
    }

    fn apply(&self, x: f64) -> f64 {
        match self {
            UnaryFunction::Sin => x.sin(),
            UnaryFunction::Cos => x.cos(),
            UnaryFunction::Tan => x.tan(),
            UnaryFunction::Asin => x.asin(),
            UnaryFunction::Acos => x.acos(),
            UnaryFunction::Atan => x.atan(),
            UnaryFunction::Sinh => x.sinh(),
            UnaryFunction::Cosh => x.cosh(),
            UnaryFunction::Tanh => x.tanh(),
            UnaryFunction::Exp => x.exp(),
            UnaryFunction::Ln => x.ln(),
            UnaryFunction::Log10 => x.log10(),
            UnaryFunction::Log2 => x.log2(),
            UnaryFunction::Sqrt => x.sqrt(),
            UnaryFunction::Abs => x.abs()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power
}

impl BinaryOperator {
    pub fn symbol(&self) -> char {
        match self {
            BinaryOperator::Add => '+',
            BinaryOperator::Subtract => '-',
            BinaryOperator::Multiply => '*',
            BinaryOperator::Divide => '/',
            BinaryOperator::Power => '^'
        }
    }
}

/// 算式語法樹節點。
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Number(f64),
    Variable,
    Negate(Box<Node>),
    Binary {
        operator: BinaryOperator,
        lhs: Box<Node>,
        rhs: Box<Node>
    },
    Call {
        function: UnaryFunction,
        argument: Box<Node>
    }
}

impl Node {
    pub fn binary(operator: BinaryOperator, lhs: Node, rhs: Node) -> Node {
        Node::Binary { operator, lhs: Box::new(lhs), rhs: Box::new(rhs) }
    }

    pub fn call(function: UnaryFunction, argument: Node) -> Node {
        Node::Call { function, argument: Box::new(argument) }
    }

    pub fn constant(name: &str) -> Option<Node> {
        match name {
            "pi" => Some(Node::Number(consts::PI)),
            "e" => Some(Node::Number(consts::E)),
            _ => None
        }
    }

    fn evaluate(&self, x: f64, policy: DomainPolicy) -> Result<f64, EvaluationFailure> {
        match self {
            Node::Number(value) => Ok(*value),
            Node::Variable => Ok(x),
            Node::Negate(operand) => Ok(-operand.evaluate(x, policy)?),
            Node::Call { function, argument } => {
                let value = argument.evaluate(x, policy)?;
                if policy == DomainPolicy::Strict {
                    function.check_domain(value)?;
                }
                Ok(function.apply(value))
            },
            Node::Binary { operator, lhs, rhs } => {
                let lhs = lhs.evaluate(x, policy)?;
                let rhs = rhs.evaluate(x, policy)?;
                match operator {
                    BinaryOperator::Add => Ok(lhs + rhs),
                    BinaryOperator::Subtract => Ok(lhs - rhs),
                    BinaryOperator::Multiply => Ok(lhs * rhs),
                    BinaryOperator::Divide => {
                        if policy == DomainPolicy::Strict && rhs == 0.0 {
                            Err(EvaluationFailure::new(format!("division by zero ({} / 0)", lhs)))
                        } else {
                            Ok(lhs / rhs)
                        }
                    },
                    BinaryOperator::Power => {
                        let value = lhs.powf(rhs);
                        // 溢位成 ±inf 照常回傳，與 `*`、`exp` 一致；只有 NaN 才是定義域外
                        if policy == DomainPolicy::Strict && value.is_nan() && lhs.is_finite() && rhs.is_finite() {
                            Err(EvaluationFailure::new(format!("{}^{} is undefined", lhs, rhs)))
                        } else {
                            Ok(value)
                        }
                    }
                }
            }
        }
    }
}

impl fmt::Display for Node {
    /// 完整加括號的標準形式；變數一律寫成 `x`。
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Number(value) => write!(f, "{}", value),
            Node::Variable => write!(f, "x"),
            Node::Negate(operand) => write!(f, "(-{})", operand),
            Node::Binary { operator, lhs, rhs } => write!(f, "({} {} {})", lhs, operator.symbol(), rhs),
            Node::Call { function, argument } => write!(f, "{}({})", function.name(), argument)
        }
    }
}

/// 已解析的單變數算式。
///
/// 由 `parser::parse_expression` 建構；以 `RealFunction` 的形式交給積分器。
#[derive(Debug, Clone, PartialEq)]
pub struct Expression {
    source: String,
    root: Node,
    policy: DomainPolicy
}

impl Expression {
    pub fn new(source: String, root: Node, policy: DomainPolicy) -> Expression {
        Expression { source, root, policy }
    }

    /// 使用者輸入的原始字串。
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn policy(&self) -> DomainPolicy {
        self.policy
    }

    pub fn with_policy(mut self, policy: DomainPolicy) -> Expression {
        self.policy = policy;
        self
    }
}

impl RealFunction for Expression {
    fn value(&self, x: f64) -> Result<f64, EvaluationFailure> {
        self.root.evaluate(x, self.policy)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}
