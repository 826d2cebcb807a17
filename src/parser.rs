use log::{debug, trace};

use crate::ast::AstNode;
use crate::error::ParseError;
use crate::lexer::{Lexer, Token, TokenKind};

/// Parser settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParseOptions {
    max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { max_depth: 256 }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum depth of the produced tree. Parentheses, conditionals, call
    /// arguments, prefix operators and each link of a binary operator chain
    /// count towards it. Deeper input is rejected with a [`ParseError`]
    /// rather than exhausting the stack.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

const CAST_EXPLANATION: &str = "Type conversion is not supported";

/// Type names that make `(T)-x` a cast rather than a parenthesised subtraction.
const PREDEFINED_TYPES: &[&str] = &[
    "bool", "byte", "char", "decimal", "double", "float", "int", "long", "object", "sbyte",
    "short", "string", "uint", "ulong", "ushort",
];

/// Binary precedence levels, loosest first. All are left-associative.
const BINARY_LEVELS: usize = 10;

fn binary_operator(level: usize, kind: &TokenKind) -> Option<&'static str> {
    let op = match (level, kind) {
        (0, TokenKind::QuestionQuestion) => "??",
        (1, TokenKind::OrOr) => "||",
        (2, TokenKind::AndAnd) => "&&",
        (3, TokenKind::Pipe) => "|",
        (4, TokenKind::Caret) => "^",
        (5, TokenKind::Amp) => "&",
        (6, TokenKind::EqEq) => "==",
        (6, TokenKind::NotEq) => "!=",
        (6, TokenKind::Lt) => "<",
        (6, TokenKind::Le) => "<=",
        (6, TokenKind::Gt) => ">",
        (6, TokenKind::Ge) => ">=",
        (7, TokenKind::Shl) => "<<",
        (7, TokenKind::Shr) => ">>",
        (8, TokenKind::Plus) => "+",
        (8, TokenKind::Minus) => "-",
        (9, TokenKind::Star) => "*",
        (9, TokenKind::Slash) => "/",
        (9, TokenKind::Percent) => "%",
        _ => return None,
    };
    Some(op)
}

/// Recursive-descent parser over a pre-tokenized expression.
///
/// Constructs outside the modelled grammar become [`AstNode::Unsupported`]
/// and parsing continues around them. Only text that cannot be tokenized or
/// bracket-matched produces a [`ParseError`].
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    options: ParseOptions,
}

impl Parser {
    pub fn new(text: &str) -> Result<Self, ParseError> {
        Self::with_options(text, ParseOptions::default())
    }

    pub fn with_options(text: &str, options: ParseOptions) -> Result<Self, ParseError> {
        trace!("parsing expression: {}", text);
        let tokens = Lexer::new(text).tokenize()?;
        Ok(Self {
            tokens,
            pos: 0,
            depth: 0,
            options,
        })
    }

    pub fn parse(mut self) -> Result<AstNode, ParseError> {
        let expr = self.expression()?;
        let tok = self.peek();
        match tok.kind {
            TokenKind::Eof => Ok(expr),
            TokenKind::RParen | TokenKind::RBracket => {
                Err(ParseError::new(tok.pos, format!("unmatched {}", tok.kind)))
            }
            _ => Err(ParseError::new(
                tok.pos,
                format!("unexpected {} after expression", tok.kind),
            )),
        }
    }

    fn peek(&self) -> &Token {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.pos + offset).min(last)]
    }

    fn bump(&mut self) {
        if self.pos + 1 < self.tokens.len() {
            self.pos += 1;
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        let tok = self.peek();
        if tok.kind == *kind {
            self.bump();
            Ok(())
        } else {
            Err(ParseError::new(
                tok.pos,
                format!("expected {}, found {}", kind, tok.kind),
            ))
        }
    }

    fn descend(&mut self) -> Result<(), ParseError> {
        self.depth += 1;
        if self.depth > self.options.max_depth {
            return Err(ParseError::new(
                self.peek().pos,
                format!(
                    "expression nesting exceeds the maximum depth of {}",
                    self.options.max_depth
                ),
            ));
        }
        Ok(())
    }

    fn ascend(&mut self) {
        self.depth -= 1;
    }

    // expr ::= binary ('?' expr ':' expr)?
    fn expression(&mut self) -> Result<AstNode, ParseError> {
        self.descend()?;
        let cond = self.binary(0)?;
        let node = if self.peek().kind == TokenKind::Question {
            self.bump();
            let if_true = self.expression()?;
            self.expect(&TokenKind::Colon)?;
            let if_false = self.expression()?;
            AstNode::conditional(cond, if_true, if_false)
        } else {
            cond
        };
        self.ascend();
        Ok(node)
    }

    fn binary(&mut self, level: usize) -> Result<AstNode, ParseError> {
        if level == BINARY_LEVELS {
            return self.unary();
        }
        let mut node = self.binary(level + 1)?;
        // Each operator deepens the left spine of the tree by one.
        let mut chained = 0;
        while let Some(op) = binary_operator(level, &self.peek().kind) {
            self.bump();
            self.descend()?;
            chained += 1;
            let rhs = self.binary(level + 1)?;
            node = AstNode::binary(op, node, rhs);
        }
        self.depth -= chained;
        Ok(node)
    }

    fn unary(&mut self) -> Result<AstNode, ParseError> {
        let op = match self.peek().kind {
            TokenKind::Minus => "-",
            TokenKind::Not => "!",
            TokenKind::Plus => "+",
            TokenKind::Tilde => "~",
            TokenKind::LParen if self.cast_end().is_some() => return self.cast(),
            _ => {
                let node = self.primary()?;
                return self.postfix(node);
            }
        };
        self.bump();
        self.descend()?;
        let operand = self.unary()?;
        self.ascend();
        Ok(AstNode::unary(op, operand))
    }

    /// If a cast `(T)` starts at the current `(`, returns the index of the
    /// token following its `)`.
    fn cast_end(&self) -> Option<usize> {
        let mut i = self.pos + 1;
        let first = match &self.tokens.get(i)?.kind {
            TokenKind::Ident(name) if !matches!(name.as_str(), "true" | "false" | "null") => name,
            _ => return None,
        };
        let mut qualified = false;
        i += 1;
        while self.tokens.get(i)?.kind == TokenKind::Dot
            && matches!(self.tokens.get(i + 1)?.kind, TokenKind::Ident(_))
        {
            qualified = true;
            i += 2;
        }
        if self.tokens.get(i)?.kind == TokenKind::Question {
            i += 1;
        }
        while self.tokens.get(i)?.kind == TokenKind::LBracket
            && self.tokens.get(i + 1)?.kind == TokenKind::RBracket
        {
            i += 2;
        }
        if self.tokens.get(i)?.kind != TokenKind::RParen {
            return None;
        }
        let operand_start = matches!(
            self.tokens.get(i + 1)?.kind,
            TokenKind::Ident(_)
                | TokenKind::Num(_)
                | TokenKind::Str(_)
                | TokenKind::Char
                | TokenKind::LParen
                | TokenKind::Not
                | TokenKind::Tilde
        );
        let signed_operand = matches!(
            self.tokens.get(i + 1)?.kind,
            TokenKind::Plus | TokenKind::Minus
        ) && !qualified
            && PREDEFINED_TYPES.contains(&first.as_str());
        if operand_start || signed_operand {
            Some(i + 1)
        } else {
            None
        }
    }

    fn cast(&mut self) -> Result<AstNode, ParseError> {
        let start = self.peek().pos;
        if let Some(end) = self.cast_end() {
            self.pos = end;
        }
        self.descend()?;
        // The operand is parsed for well-formedness only.
        let _operand = self.unary()?;
        self.ascend();
        debug!("type conversion at position {} folded into an unsupported node", start);
        Ok(AstNode::unsupported(CAST_EXPLANATION))
    }

    fn primary(&mut self) -> Result<AstNode, ParseError> {
        let tok = self.peek().clone();
        match tok.kind {
            TokenKind::Num(v) => {
                self.bump();
                Ok(AstNode::constant(v))
            }
            TokenKind::Str(s) => {
                self.bump();
                Ok(AstNode::constant(s))
            }
            TokenKind::Char => {
                self.bump();
                Ok(self.unsupported(tok.pos, "Character literals are not supported"))
            }
            TokenKind::Ident(name) => {
                self.bump();
                match name.as_str() {
                    "true" => return Ok(AstNode::constant(true)),
                    "false" => return Ok(AstNode::constant(false)),
                    "null" => return Ok(self.unsupported(tok.pos, "Null literal is not supported")),
                    _ => {}
                }
                let mut qualified = name;
                while self.peek().kind == TokenKind::Dot {
                    let TokenKind::Ident(member) = &self.peek_at(1).kind else {
                        break;
                    };
                    qualified.push('.');
                    qualified.push_str(member);
                    self.bump();
                    self.bump();
                }
                if self.peek().kind == TokenKind::LParen {
                    self.bump();
                    let args = self.arguments(&TokenKind::RParen)?;
                    Ok(AstNode::function(qualified, args))
                } else if qualified.contains('.') {
                    Ok(self.unsupported(tok.pos, "Member access is not supported"))
                } else {
                    Ok(AstNode::parameter(qualified))
                }
            }
            TokenKind::LParen => {
                self.bump();
                let inner = self.expression()?;
                self.expect(&TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Eof => Err(ParseError::new(tok.pos, "unexpected end of input")),
            other => Err(ParseError::new(
                tok.pos,
                format!("expected expression, found {}", other),
            )),
        }
    }

    /// Calls on computed values, element access and member access that
    /// follow a primary expression.
    fn postfix(&mut self, mut node: AstNode) -> Result<AstNode, ParseError> {
        loop {
            let tok = self.peek().clone();
            node = match tok.kind {
                TokenKind::LParen => {
                    self.bump();
                    self.arguments(&TokenKind::RParen)?;
                    self.unsupported(tok.pos, "Invocation of a computed expression is not supported")
                }
                TokenKind::LBracket => {
                    self.bump();
                    self.arguments(&TokenKind::RBracket)?;
                    self.unsupported(tok.pos, "Element access is not supported")
                }
                TokenKind::Dot => {
                    self.bump();
                    let member = self.peek();
                    if !matches!(member.kind, TokenKind::Ident(_)) {
                        return Err(ParseError::new(
                            member.pos,
                            format!("expected member name, found {}", member.kind),
                        ));
                    }
                    self.bump();
                    self.unsupported(tok.pos, "Member access is not supported")
                }
                _ => return Ok(node),
            };
        }
    }

    /// Comma-separated expressions up to and including `close`.
    fn arguments(&mut self, close: &TokenKind) -> Result<Vec<AstNode>, ParseError> {
        let mut args = Vec::new();
        if self.peek().kind == *close {
            self.bump();
            return Ok(args);
        }
        loop {
            args.push(self.expression()?);
            let tok = self.peek();
            if tok.kind == TokenKind::Comma {
                self.bump();
                continue;
            }
            if tok.kind == *close {
                self.bump();
                return Ok(args);
            }
            return Err(ParseError::new(
                tok.pos,
                format!("expected ',' or {}, found {}", close, tok.kind),
            ));
        }
    }

    fn unsupported(&self, pos: usize, explanation: &str) -> AstNode {
        debug!("{} (position {})", explanation, pos);
        AstNode::unsupported(explanation)
    }
}

/// Parses `text` with default [`ParseOptions`].
pub fn parse(text: &str) -> Result<AstNode, ParseError> {
    Parser::new(text)?.parse()
}

/// Parses `text` with the given options.
pub fn parse_with(text: &str, options: ParseOptions) -> Result<AstNode, ParseError> {
    Parser::with_options(text, options)?.parse()
}
