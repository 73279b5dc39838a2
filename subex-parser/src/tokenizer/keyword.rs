/// The word introducing a lambda abstraction.
pub const LAMBDA: &str = "lambda";

/// The names of the unary functions. A function name must be followed by a parenthesized
/// argument, as in `sqrt(x)`.
pub const UNARY_FUNCTIONS: [&str; 13] = [
    "sqrt", "abs", "exp", "ln", "floor", "ceil", "round", "trunc", "sin", "cos", "tan", "ctan",
    "random",
];

/// Returns true if the given word names a unary function.
pub fn is_unary_function(word: &str) -> bool {
    UNARY_FUNCTIONS.contains(&word)
}
