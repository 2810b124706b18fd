//! Four-function keypad calculator used to key in the product price
//!
//! Operators chain: pressing an operator while another is pending evaluates
//! the pending one first, so `2 + 3 *` shows `5` before the next operand.

use std::fmt;
use thiserror::Error;

/// Maximum characters the display accepts from digit entry
pub const MAX_DISPLAY_LEN: usize = 15;

/// Significant digits kept in operation results
const RESULT_PRECISION: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CalculatorError {
    #[error("division by zero")]
    DivisionByZero,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub fn symbol(&self) -> char {
        match self {
            Operator::Add => '+',
            Operator::Subtract => '-',
            Operator::Multiply => '*',
            Operator::Divide => '/',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '*' | 'x' | '×' => Some(Operator::Multiply),
            '/' | '÷' => Some(Operator::Divide),
            _ => None,
        }
    }

    fn apply(&self, lhs: f64, rhs: f64) -> Result<f64, CalculatorError> {
        match self {
            Operator::Add => Ok(lhs + rhs),
            Operator::Subtract => Ok(lhs - rhs),
            Operator::Multiply => Ok(lhs * rhs),
            Operator::Divide if rhs == 0.0 => Err(CalculatorError::DivisionByZero),
            Operator::Divide => Ok(lhs / rhs),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Keypad calculator state
#[derive(Debug, Clone, PartialEq)]
pub struct Calculator {
    display: String,
    operator: Option<Operator>,
    previous: Option<String>,
    waiting_for_operand: bool,
}

impl Default for Calculator {
    fn default() -> Self {
        Self {
            display: "0".to_string(),
            operator: None,
            previous: None,
            waiting_for_operand: false,
        }
    }
}

impl Calculator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw display contents (`.` as decimal separator)
    pub fn display(&self) -> &str {
        &self.display
    }

    /// Display contents with a comma decimal separator
    pub fn display_text(&self) -> String {
        self.display.replace('.', ",")
    }

    /// Pending left operand and operator, e.g. `12,5 +`
    pub fn pending(&self) -> Option<String> {
        match (&self.previous, self.operator) {
            (Some(previous), Some(op)) => Some(format!("{} {}", previous.replace('.', ","), op)),
            _ => None,
        }
    }

    /// Current display as a number (0 when unreadable)
    pub fn value(&self) -> f64 {
        self.display.parse::<f64>().ok().filter(|v| v.is_finite()).unwrap_or(0.0)
    }

    /// Key a digit. Non-digit characters are ignored.
    pub fn input_digit(&mut self, digit: char) {
        if !digit.is_ascii_digit() {
            return;
        }
        if self.waiting_for_operand {
            self.display = digit.to_string();
            self.waiting_for_operand = false;
        } else if self.display.len() < MAX_DISPLAY_LEN {
            if self.display == "0" {
                self.display = digit.to_string();
            } else {
                self.display.push(digit);
            }
        }
    }

    /// Key the decimal point (at most once per operand)
    pub fn input_decimal(&mut self) {
        if self.waiting_for_operand {
            self.display = "0.".to_string();
            self.waiting_for_operand = false;
        } else if !self.display.contains('.') && self.display.len() < MAX_DISPLAY_LEN {
            self.display.push('.');
        }
    }

    /// Key an operator, evaluating any pending operation first.
    /// On error the calculator state is left untouched.
    pub fn input_operator(&mut self, op: Operator) -> Result<(), CalculatorError> {
        if self.display.parse::<f64>().is_err() {
            return Ok(());
        }

        if self.operator.is_some() && !self.waiting_for_operand {
            let result = format_result(self.evaluate()?);
            self.display = result.clone();
            self.previous = Some(result);
        } else {
            self.previous = Some(self.display.clone());
        }
        self.operator = Some(op);
        self.waiting_for_operand = true;
        Ok(())
    }

    /// Key `=`. Does nothing without a pending operation.
    pub fn equals(&mut self) -> Result<(), CalculatorError> {
        if self.operator.is_none() || self.previous.is_none() {
            return Ok(());
        }

        let result = self.evaluate()?;
        self.display = format_result(result);
        self.operator = None;
        self.previous = None;
        self.waiting_for_operand = false;
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// Remove the last keyed character; ignored right after an operator
    pub fn backspace(&mut self) {
        if self.waiting_for_operand {
            return;
        }
        if self.display.len() > 1 {
            self.display.pop();
        } else {
            self.display = "0".to_string();
        }
    }

    /// Key a sequence such as `"12.5+3="`. Unknown characters are ignored.
    pub fn press_keys(&mut self, keys: &str) -> Result<(), CalculatorError> {
        for key in keys.chars() {
            match key {
                '0'..='9' => self.input_digit(key),
                '.' | ',' => self.input_decimal(),
                '=' => self.equals()?,
                'C' | 'c' => self.clear(),
                '<' => self.backspace(),
                other => {
                    if let Some(op) = Operator::from_symbol(other) {
                        self.input_operator(op)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn evaluate(&self) -> Result<f64, CalculatorError> {
        let current = self.display.parse::<f64>().unwrap_or(f64::NAN);
        match (self.operator, &self.previous) {
            (Some(op), Some(previous)) => {
                let previous = previous.parse::<f64>().unwrap_or(0.0);
                if current.is_nan() {
                    return Ok(0.0);
                }
                op.apply(previous, current).map(round_significant)
            }
            _ => Ok(if current.is_nan() { 0.0 } else { current }),
        }
    }
}

fn round_significant(value: f64) -> f64 {
    if !value.is_finite() || value == 0.0 {
        return value;
    }
    format!("{:.*e}", RESULT_PRECISION - 1, value)
        .parse::<f64>()
        .unwrap_or(value)
}

fn format_result(value: f64) -> String {
    // Avoid showing "-0" after e.g. 2 - 2
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}
