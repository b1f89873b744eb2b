//! The REPL core: command dispatch decoupled from I/O.
//!
//! Every command returns structured [`ReplMsg`] replies; the binary
//! decides where each goes (stdout, stderr, colors). This keeps the
//! whole command surface testable without a terminal.

use std::collections::BTreeMap;

use log::debug;
use thiserror::Error;

use surdx_algebra::{AlgebraError, Environment, ExprNode, NumericEnvironment};
use surdx_num::{factorize, IntegerBackend, NumError, Rational, Surd};

use crate::float;

pub type Int = surdx_num::Int;

/// `fib(n) = (1/√5)(φⁿ - ψⁿ)`, seeded at startup.
const FIB_BODY: &str = "((1/5)^0.5)*(((1+5^0.5)/2)^n-((1-5^0.5)/2)^n)";

#[derive(Debug, Clone)]
pub enum ReplMsg {
    /// The result the user asked for.
    Output(String),
    /// Side information (stored definitions, version banner).
    Info(String),
    /// An error; the session continues.
    Error(String),
}

pub type ReplReply = Vec<ReplMsg>;

#[derive(Debug)]
pub enum ReplOutcome {
    Continue(ReplReply),
    Quit,
}

#[derive(Error, Debug)]
enum ReplError {
    #[error("{0}")]
    Parse(String),

    #[error(transparent)]
    Algebra(#[from] AlgebraError),

    #[error(transparent)]
    Num(#[from] NumError),

    #[error("unknown function `{0}`")]
    UnknownFunction(String),

    #[error("expected {expected} argument(s), got {got}")]
    ArityMismatch { expected: usize, got: usize },

    #[error("{0}")]
    Malformed(String),
}

struct UserFunc {
    params: Vec<String>,
    body: ExprNode<Int>,
}

pub struct Repl {
    funcs: BTreeMap<String, UserFunc>,
    constants: NumericEnvironment,
}

impl Default for Repl {
    fn default() -> Self {
        Self::new()
    }
}

impl Repl {
    pub fn new() -> Self {
        let fib = parse_expr(FIB_BODY)
            .and_then(|n| n.normalize().map_err(ReplError::from))
            .expect("built-in fib definition must parse");
        let mut funcs = BTreeMap::new();
        funcs.insert(
            "fib".to_string(),
            UserFunc {
                params: vec!["n".to_string()],
                body: fib,
            },
        );
        let mut constants = NumericEnvironment::default();
        constants.insert("pi".to_string(), std::f64::consts::PI);
        constants.insert("e".to_string(), std::f64::consts::E);
        constants.insert("phi".to_string(), 1.618_033_988_749_895_f64);
        constants.insert("egamma".to_string(), 0.577_215_664_901_532_9_f64);
        Repl { funcs, constants }
    }

    pub fn version_line(&self) -> String {
        format!(
            "surdx | version - {} | int - {}",
            env!("CARGO_PKG_VERSION"),
            <Int as IntegerBackend>::NAME
        )
    }

    pub fn handle_line(&mut self, line: &str) -> ReplOutcome {
        let line = line.trim();
        if line.is_empty() {
            return ReplOutcome::Continue(Vec::new());
        }
        let (cmd, body) = match line.split_once(' ') {
            Some((c, b)) => (c, b.trim()),
            None => (line, ""),
        };
        let result = match cmd {
            "normalize" => self.cmd_normalize(body),
            "func" => self.cmd_func(body),
            "constant" => self.cmd_constant(body),
            "print" => self.cmd_print(body),
            "factor" => self.cmd_factor(body),
            "version" => Ok(vec![ReplMsg::Info(self.version_line())]),
            "quit" => return ReplOutcome::Quit,
            _ => self.dispatch_fallback(line, cmd),
        };
        ReplOutcome::Continue(result.unwrap_or_else(|e| vec![ReplMsg::Error(e.to_string())]))
    }

    /// `name(args)` calls a stored function; anything else is treated
    /// as a bare expression to normalize.
    fn dispatch_fallback(&mut self, line: &str, cmd: &str) -> Result<ReplReply, ReplError> {
        if let (Some(lp), Some(rp)) = (cmd.find('('), cmd.rfind(')')) {
            if lp < rp {
                let name = &cmd[..lp];
                if self.funcs.contains_key(name) {
                    let argstr = cmd[lp + 1..rp].to_string();
                    return self.cmd_call(name, &argstr);
                }
            }
        }
        self.cmd_normalize(line)
    }

    fn cmd_normalize(&self, body: &str) -> Result<ReplReply, ReplError> {
        let node = parse_expr(body)?.normalize()?;
        Ok(self.print_result(&node))
    }

    /// Normalize, print, and append the approximation unless the
    /// result is already an exact integer.
    fn print_result(&self, node: &ExprNode<Int>) -> ReplReply {
        let mut text = node.to_string();
        let exact_integer = node
            .as_fraction()
            .filter(|f| f.no_symbols())
            .and_then(|f| f.try_to_surd())
            .and_then(|s| s.to_rational().ok())
            .map_or(false, |q| q.is_integer());
        if !exact_integer {
            if let Some(v) = node.eval_f64(&self.constants) {
                text.push_str(" = ");
                text.push_str(&float::shortest(v));
            }
        }
        vec![ReplMsg::Output(text)]
    }

    fn cmd_factor(&self, body: &str) -> Result<ReplReply, ReplError> {
        let node = parse_expr(body)?.normalize()?;
        let q = node
            .as_fraction()
            .and_then(|f| f.try_to_surd())
            .and_then(|s| s.to_rational().ok())
            .filter(Rational::is_integer)
            .ok_or_else(|| ReplError::Malformed("factor expects an integer".to_string()))?;
        if q.is_negative() || q.is_zero() {
            return Err(ReplError::Malformed(
                "factor expects a positive integer".to_string(),
            ));
        }
        let factors = factorize(q.numerator());
        let mut parts: Vec<String> = Vec::new();
        for (p, k) in factors {
            for _ in 0..k {
                parts.push(p.to_string());
            }
        }
        Ok(vec![ReplMsg::Output(parts.join(" "))])
    }

    fn cmd_func(&mut self, body: &str) -> Result<ReplReply, ReplError> {
        let lp = body
            .find('(')
            .ok_or_else(|| ReplError::Malformed("function needs `(` and `)`".to_string()))?;
        let rp = body[lp..]
            .find(')')
            .map(|o| lp + o)
            .ok_or_else(|| ReplError::Malformed("function needs `(` and `)`".to_string()))?;
        let name = body[..lp].trim();
        if name.is_empty() {
            return Err(ReplError::Malformed(
                "function name must not be empty".to_string(),
            ));
        }
        let params = split_args(&body[lp + 1..rp])?;
        let rest = body[rp + 1..].trim_start();
        let expr = rest
            .strip_prefix('=')
            .ok_or_else(|| ReplError::Malformed("expected `=` after the argument list".to_string()))?;
        let func = parse_expr(expr)?.normalize()?;
        debug!("storing function {name}({})", params.join(","));
        self.funcs.insert(
            name.to_string(),
            UserFunc {
                params,
                body: func,
            },
        );
        Ok(vec![ReplMsg::Info(self.render_func(name))])
    }

    fn cmd_constant(&mut self, body: &str) -> Result<ReplReply, ReplError> {
        let (name, value) = body
            .split_once('=')
            .ok_or_else(|| ReplError::Malformed("expected `=`".to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ReplError::Malformed(
                "constant name must not be empty".to_string(),
            ));
        }
        let value: f64 = value
            .trim()
            .parse()
            .map_err(|_| ReplError::Malformed(format!("malformed number `{}`", value.trim())))?;
        self.constants.insert(name.to_string(), value);
        Ok(vec![ReplMsg::Info(self.render_constant(name))])
    }

    fn cmd_print(&self, body: &str) -> Result<ReplReply, ReplError> {
        let mut out = Vec::new();
        if body.is_empty() {
            for name in self.funcs.keys() {
                out.push(ReplMsg::Info(self.render_func(name)));
            }
            let mut names: Vec<&String> = self.constants.keys().collect();
            names.sort();
            for name in names {
                out.push(ReplMsg::Info(self.render_constant(name)));
            }
        } else {
            if self.funcs.contains_key(body) {
                out.push(ReplMsg::Info(self.render_func(body)));
            }
            if self.constants.contains_key(body) {
                out.push(ReplMsg::Info(self.render_constant(body)));
            }
        }
        Ok(out)
    }

    fn cmd_call(&self, name: &str, argstr: &str) -> Result<ReplReply, ReplError> {
        let func = self
            .funcs
            .get(name)
            .ok_or_else(|| ReplError::UnknownFunction(name.to_string()))?;
        let args = split_args(argstr)?;
        if args.len() != func.params.len() {
            return Err(ReplError::ArityMismatch {
                expected: func.params.len(),
                got: args.len(),
            });
        }
        let mut env: Environment<Int> = Environment::default();
        for (param, arg) in func.params.iter().zip(&args) {
            let value = Rational::parse(arg)?;
            env.insert(param.clone(), Surd::from_rational(value));
        }
        let result = func.body.substitute(&env)?;
        Ok(self.print_result(&result))
    }

    fn render_func(&self, name: &str) -> String {
        match self.funcs.get(name) {
            Some(f) => format!("Function: {name}({}) = {}", f.params.join(","), f.body),
            None => format!("Function: {name} is not defined"),
        }
    }

    fn render_constant(&self, name: &str) -> String {
        match self.constants.get(name) {
            Some(v) => format!("Constant: {name} = {}", float::shortest(*v)),
            None => format!("Constant: {name} is not defined"),
        }
    }
}

fn parse_expr(input: &str) -> Result<ExprNode<Int>, ReplError> {
    surdx_parser::parse(input).map_err(|e| ReplError::Parse(e.render(input)))
}

/// Comma-separated argument list; empty list is fine, empty entries
/// are not.
fn split_args(s: &str) -> Result<Vec<String>, ReplError> {
    let s = s.trim();
    if s.is_empty() {
        return Ok(Vec::new());
    }
    s.split(',')
        .map(|a| {
            let a = a.trim();
            if a.is_empty() {
                Err(ReplError::Malformed(
                    "argument must not be empty".to_string(),
                ))
            } else {
                Ok(a.to_string())
            }
        })
        .collect()
}
