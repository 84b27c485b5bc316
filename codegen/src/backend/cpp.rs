use std::fmt::Write as _;

use super::Backend;
use crate::error::Result;
use crate::expression::{Expression, LambdaExpression};
use crate::instruction::Instruction;

/// Renders C++ for the firmware's generated `main.cpp`.
///
/// Variables become globals; every instruction becomes one or more
/// statements inside `setup()`.
#[derive(Debug, Clone)]
pub struct CppBackend {
    /// Bus variable used when a device does not name one.
    pub default_i2c_bus: String,
    pub indent: String,
}

impl Default for CppBackend {
    fn default() -> Self {
        Self {
            default_i2c_bus: "i2c_bus".to_string(),
            indent: "  ".to_string(),
        }
    }
}

impl CppBackend {
    pub fn new(default_i2c_bus: impl Into<String>) -> Self {
        Self {
            default_i2c_bus: default_i2c_bus.into(),
            ..Self::default()
        }
    }

    /// Statements for one instruction, without indentation.
    pub fn statements(&self, instruction: &Instruction) -> Vec<String> {
        match instruction {
            Instruction::NewVariable { id, class } => {
                vec![format!("{id} = new {}();", class.full_name())]
            }
            Instruction::RegisterDisplay {
                var,
                component,
                update_interval,
            } => vec![
                format!("{var}->set_update_interval({});", update_interval.as_millis()),
                format!("{var}->set_component_source({});", cpp_string(component)),
                format!("App.register_component({var});"),
                format!("App.register_display({var});"),
            ],
            Instruction::RegisterI2cDevice { var, bus, address } => vec![
                format!(
                    "{var}->set_i2c_bus({});",
                    bus.as_deref().unwrap_or(&self.default_i2c_bus)
                ),
                format!("{var}->set_i2c_address({address});"),
            ],
            Instruction::Call { var, method, args } => {
                let args: Vec<String> = args.iter().map(expression).collect();
                vec![format!("{var}->{method}({});", args.join(", "))]
            }
        }
    }
}

impl Backend for CppBackend {
    fn name(&self) -> &str {
        "cpp"
    }

    fn render(&self, instructions: &[Instruction]) -> Result<String> {
        let mut out = String::new();
        writeln!(out, "// Generated by lcdgen. Do not edit.")?;
        for instruction in instructions {
            if let Instruction::NewVariable { id, class } = instruction {
                writeln!(out, "{}{id};", class.pointer())?;
            }
        }
        writeln!(out)?;
        writeln!(out, "void setup() {{")?;
        for instruction in instructions {
            for statement in self.statements(instruction) {
                for line in statement.lines() {
                    writeln!(out, "{}{line}", self.indent)?;
                }
            }
        }
        writeln!(out, "}}")?;
        Ok(out)
    }
}

/// C++ source for an expression.
pub fn expression(expr: &Expression) -> String {
    match expr {
        Expression::Int(v) => v.to_string(),
        Expression::HexInt(v) => format!("0x{v:02X}"),
        Expression::Bool(v) => v.to_string(),
        Expression::Array(items) => {
            let items: Vec<String> = items.iter().map(expression).collect();
            format!("{{{}}}", items.join(", "))
        }
        Expression::Lambda(lambda) => lambda_expression(lambda),
    }
}

fn lambda_expression(lambda: &LambdaExpression) -> String {
    let parameters: Vec<String> = lambda
        .parameters
        .iter()
        .map(|p| format!("{} {}", p.ty, p.name))
        .collect();
    format!(
        "[{}]({}) -> {} {{\n{}\n}}",
        lambda.capture,
        parameters.join(", "),
        lambda.return_type,
        lambda.body
    )
}

fn cpp_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}
