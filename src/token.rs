//! Lexical tokens of the equation grammar.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// An identifier-like symbol: one letter followed by lowercase letters
    /// (an element symbol such as `Fe`, or the electron marker `e`).
    Symbol,
    /// An unsigned integer literal.
    Number,
    Plus,
    Minus,
    Caret,
    Equals,
    OpenParen,
    CloseParen,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
    /// Character offset of the token's first character in the source.
    pub position: usize,
}
