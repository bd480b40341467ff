//! Binary and unary operators.

/// Binary operators, grouped by precedence tier.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BinaryOp {
    // Power
    Pow,

    // Multiplicative
    Mul,
    Div,
    IntDiv,
    Mod,

    // Additive
    Add,
    Sub,

    // Relational
    Lt,
    LtEq,
    Gt,
    GtEq,

    // Equality
    Eq,
    NotEq,

    // Logical
    And,
    Or,
}

impl BinaryOp {
    /// Source spelling, used in diagnostics.
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Pow => "**",
            Self::Mul => "*",
            Self::Div => "/",
            Self::IntDiv => "div",
            Self::Mod => "mod",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Eq => "=",
            Self::NotEq => "<>",
            Self::And => "и",
            Self::Or => "или",
        }
    }

    /// Precedence tier. Lower binds tighter.
    ///
    /// - 1: `**`
    /// - 2: `*` `/` `div` `mod`
    /// - 3: `+` `-`
    /// - 4: `<` `<=` `>` `>=`
    /// - 5: `=` `<>`
    /// - 6: `и`
    /// - 7: `или`
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Pow => 1,
            Self::Mul | Self::Div | Self::IntDiv | Self::Mod => 2,
            Self::Add | Self::Sub => 3,
            Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => 4,
            Self::Eq | Self::NotEq => 5,
            Self::And => 6,
            Self::Or => 7,
        }
    }

    pub const fn is_comparison(self) -> bool {
        matches!(
            self,
            Self::Lt | Self::LtEq | Self::Gt | Self::GtEq | Self::Eq | Self::NotEq
        )
    }
}

/// Unary operators.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum UnaryOp {
    Neg,
    Plus,
    Not,
}

impl UnaryOp {
    pub const fn as_symbol(self) -> &'static str {
        match self {
            Self::Neg => "-",
            Self::Plus => "+",
            Self::Not => "не",
        }
    }
}
