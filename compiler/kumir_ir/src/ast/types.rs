//! Scalar type tags and parameter passing modes.

use std::fmt;

/// Declared type of a variable, parameter, table element or function result.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeTag {
    /// `цел`
    Integer,
    /// `вещ`
    Real,
    /// `лог`
    Boolean,
    /// `сим`
    Character,
    /// `лит`
    String,
}

impl TypeTag {
    pub const ALL: [TypeTag; 5] = [
        TypeTag::Integer,
        TypeTag::Real,
        TypeTag::Boolean,
        TypeTag::Character,
        TypeTag::String,
    ];

    pub const fn keyword(self) -> &'static str {
        match self {
            TypeTag::Integer => "цел",
            TypeTag::Real => "вещ",
            TypeTag::Boolean => "лог",
            TypeTag::Character => "сим",
            TypeTag::String => "лит",
        }
    }

    pub fn from_keyword(word: &str) -> Option<TypeTag> {
        let word = word.to_lowercase();
        TypeTag::ALL.into_iter().find(|tag| tag.keyword() == word)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// How an actual argument flows relative to a call.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParamMode {
    /// `арг`: value copied in.
    #[default]
    In,
    /// `рез`: formal starts uninitialized, final value copied back.
    Out,
    /// `аргрез`: copied in and copied back.
    InOut,
}

impl ParamMode {
    pub const fn keyword(self) -> &'static str {
        match self {
            ParamMode::In => "арг",
            ParamMode::Out => "рез",
            ParamMode::InOut => "аргрез",
        }
    }

    pub const fn copies_in(self) -> bool {
        matches!(self, ParamMode::In | ParamMode::InOut)
    }

    pub const fn copies_back(self) -> bool {
        matches!(self, ParamMode::Out | ParamMode::InOut)
    }
}

impl fmt::Display for ParamMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}
