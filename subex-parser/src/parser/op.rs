//! Precedence and associativity of the binary operators.

/// The associativity of a binary operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Associativity {
    /// `a op b op c` is parsed as `(a op b) op c`.
    Left,

    /// `a op b op c` is parsed as `a op (b op c)`.
    Right,
}

/// The precedence of an operation, in order from lowest precedence (evaluated last) to highest
/// precedence (evaluated first).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Precedence {
    /// Any precedence.
    Any,

    /// Precedence of addition (`+`) and subtraction (`-`), which separate terms.
    Term,

    /// Precedence of multiplication (`*`) and division (`/`), which separate factors.
    Factor,

    /// Precedence of exponentiation (`^`).
    Exp,

    /// Higher than every operator; nothing binds to an operand this tightly.
    Atom,
}

impl Precedence {
    /// Returns the next higher precedence level.
    pub fn tighter(self) -> Self {
        match self {
            Self::Any => Self::Term,
            Self::Term => Self::Factor,
            Self::Factor => Self::Exp,
            Self::Exp | Self::Atom => Self::Atom,
        }
    }
}

impl PartialOrd for Precedence {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        let left = *self as u8;
        let right = *other as u8;
        left.partial_cmp(&right)
    }
}

/// The binary operation that is being performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOpKind {
    Exp,
    Mul,
    Div,
    Add,
    Sub,
}

impl BinOpKind {
    /// Returns the operator spelled by the given lexeme.
    pub fn from_lexeme(lexeme: &str) -> Option<Self> {
        match lexeme {
            "^" => Some(Self::Exp),
            "*" => Some(Self::Mul),
            "/" => Some(Self::Div),
            "+" => Some(Self::Add),
            "-" => Some(Self::Sub),
            _ => None,
        }
    }

    /// Returns the lexeme of the operator.
    pub fn lexeme(self) -> &'static str {
        match self {
            Self::Exp => "^",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Add => "+",
            Self::Sub => "-",
        }
    }

    /// Returns the precedence of the binary operation.
    pub fn precedence(self) -> Precedence {
        match self {
            Self::Exp => Precedence::Exp,
            Self::Mul | Self::Div => Precedence::Factor,
            Self::Add | Self::Sub => Precedence::Term,
        }
    }

    /// Returns the associativity of the binary operation.
    pub fn associativity(self) -> Associativity {
        match self {
            Self::Exp => Associativity::Right,
            Self::Mul | Self::Div | Self::Add | Self::Sub => Associativity::Left,
        }
    }

    /// Returns true if the operands can be swapped without changing the meaning, i.e. for `+`
    /// and `*`.
    pub fn is_commutative(self) -> bool {
        matches!(self, Self::Add | Self::Mul)
    }

    /// Returns true if the operator can also be written in front of a single operand, as in `-x`.
    pub fn is_sign(self) -> bool {
        matches!(self, Self::Add | Self::Sub)
    }
}
