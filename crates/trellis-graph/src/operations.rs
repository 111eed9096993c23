//! Built-in node operations.

use crate::eval::Inputs;
use crate::node::{NodeOperation, SocketRegistry};
use crate::value::{kinds, Value};

/// Emits a fixed value.
#[derive(Debug, Clone, PartialEq)]
pub struct Constant(pub Value);

impl NodeOperation for Constant {
    fn title(&self) -> String {
        format!("Constant ({})", self.0.kind())
    }

    fn register(&self, sockets: &mut SocketRegistry<'_>) {
        sockets.output(self.0.kind(), "value");
    }

    fn evaluate(&self, _inputs: &Inputs<'_>, _output: usize) -> Option<Value> {
        Some(self.0.clone())
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ArithmeticOp {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl ArithmeticOp {
    pub fn name(self) -> &'static str {
        match self {
            ArithmeticOp::Add => "Add",
            ArithmeticOp::Subtract => "Subtract",
            ArithmeticOp::Multiply => "Multiply",
            ArithmeticOp::Divide => "Divide",
        }
    }

    /// `None` for division by zero.
    pub fn apply(self, a: f64, b: f64) -> Option<f64> {
        match self {
            ArithmeticOp::Add => Some(a + b),
            ArithmeticOp::Subtract => Some(a - b),
            ArithmeticOp::Multiply => Some(a * b),
            ArithmeticOp::Divide if b == 0.0 => None,
            ArithmeticOp::Divide => Some(a / b),
        }
    }
}

/// Two numbers in, one number out.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Arithmetic {
    pub op: ArithmeticOp,
}

impl Arithmetic {
    pub fn new(op: ArithmeticOp) -> Self {
        Self { op }
    }
}

impl NodeOperation for Arithmetic {
    fn title(&self) -> String {
        self.op.name().to_owned()
    }

    fn register(&self, sockets: &mut SocketRegistry<'_>) {
        sockets.input(kinds::NUMBER, "a");
        sockets.input(kinds::NUMBER, "b");
        sockets.output(kinds::NUMBER, "result");
    }

    fn evaluate(&self, inputs: &Inputs<'_>, _output: usize) -> Option<Value> {
        let a = inputs.number(0)?;
        let b = inputs.number(1)?;
        self.op.apply(a, b).map(Value::Number)
    }
}

/// Renders a number as text.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct Format {
    /// Fixed number of decimals; shortest representation when `None`.
    pub precision: Option<usize>,
}

impl Format {
    pub fn with_precision(precision: usize) -> Self {
        Self { precision: Some(precision) }
    }

    pub fn format(&self, n: f64) -> String {
        match self.precision {
            Some(p) => format!("{n:.p$}"),
            None => n.to_string(),
        }
    }
}

impl NodeOperation for Format {
    fn title(&self) -> String {
        "Format".to_owned()
    }

    fn register(&self, sockets: &mut SocketRegistry<'_>) {
        sockets.input(kinds::NUMBER, "value");
        sockets.output(kinds::STRING, "text");
    }

    fn evaluate(&self, inputs: &Inputs<'_>, _output: usize) -> Option<Value> {
        inputs.number(0).map(|n| Value::Text(self.format(n)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arithmetic_ops() {
        assert_eq!(ArithmeticOp::Add.apply(2.0, 3.0), Some(5.0));
        assert_eq!(ArithmeticOp::Subtract.apply(2.0, 3.0), Some(-1.0));
        assert_eq!(ArithmeticOp::Multiply.apply(2.0, 3.0), Some(6.0));
        assert_eq!(ArithmeticOp::Divide.apply(3.0, 2.0), Some(1.5));
        assert_eq!(ArithmeticOp::Divide.apply(3.0, 0.0), None);
    }

    #[test]
    fn format_precision() {
        assert_eq!(Format::default().format(42.0), "42");
        assert_eq!(Format::default().format(0.5), "0.5");
        assert_eq!(Format::with_precision(2).format(1.0 / 3.0), "0.33");
    }

    #[test]
    fn constant_title_names_its_kind() {
        assert_eq!(Constant(Value::Bool(true)).title(), "Constant (boolean)");
    }
}
