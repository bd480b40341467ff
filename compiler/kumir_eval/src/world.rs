//! Micro-world seam.
//!
//! Robots, vessels and similar performers live in the host. The engine only
//! sees a command table and an `execute` entry point. World commands are
//! called like builtin procedures and functions; a failure ("робот упёрся в
//! стену") becomes a runtime error at the call site.

use crate::value::Value;
use kumir_ir::TypeTag;

/// One command a micro-world accepts.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct WorldCommand {
    /// Command name as written in programs, e.g. `вправо` or `слева свободно`.
    pub name: &'static str,
    pub params: &'static [TypeTag],
    /// `Some` for sensor-style commands that yield a value.
    pub result: Option<TypeTag>,
}

impl WorldCommand {
    pub const fn action(name: &'static str) -> Self {
        WorldCommand {
            name,
            params: &[],
            result: None,
        }
    }

    pub const fn sensor(name: &'static str, result: TypeTag) -> Self {
        WorldCommand {
            name,
            params: &[],
            result: Some(result),
        }
    }
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum WorldError {
    /// The command was legal but the world refused it.
    #[error("{0}")]
    Refused(String),
    #[error("исполнитель не знает команды '{0}'")]
    UnknownCommand(String),
}

/// A performer the program can command.
pub trait MicroWorld {
    /// Performer name for diagnostics (`Робот`, `Водолей`).
    fn name(&self) -> &str;

    fn commands(&self) -> &[WorldCommand];

    /// Run `command` with arguments already coerced to its parameter types.
    fn execute(&mut self, command: &str, args: &[Value]) -> Result<Option<Value>, WorldError>;
}
