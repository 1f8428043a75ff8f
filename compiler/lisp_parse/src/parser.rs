//! Recursive-descent parser.
//!
//! ```text
//! expr       := '(' headform ')' | integer | identifier | '&' expr
//! headform   := 'def' identifier '(' identifier* ')' expr+
//!             | 'if' '(' call ')' expr [expr]
//!             | operand expr*
//! integer    := digit+
//! identifier := lowercase (lowercase | '_' | operator-char)*
//! operand    := identifier | operator-char+
//! ```
//!
//! Atoms must be followed by whitespace, `)` or end of input. Operands and
//! the name of a `def` may also be followed directly by `(`.

use lisp_ir::{is_operator_char, Call, Conditional, Expr, ExprKind, FunctionDef, Span};
use lisp_stack::ensure_sufficient_stack;
use tracing::trace;

use crate::cursor::{is_whitespace, Cursor};
use crate::error::{ParseError, ParseErrorKind};

/// Whether `b` may continue an identifier or operand.
#[inline]
fn is_name_continue(b: u8) -> bool {
    b.is_ascii_lowercase() || b == b'_' || is_operator_char(b)
}

/// Parser state: a cursor over the whole input.
pub struct Parser<'a> {
    cursor: Cursor<'a>,
}

impl<'a> Parser<'a> {
    pub fn new(src: &'a str) -> Self {
        Parser {
            cursor: Cursor::new(src),
        }
    }

    /// Parse every top-level form until end of input.
    pub fn parse_program(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut exprs = Vec::new();
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.is_eof() {
                return Ok(exprs);
            }
            exprs.push(self.parse_expr()?);
        }
    }

    /// Parse exactly one form, leaving the cursor just past it.
    pub fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        ensure_sufficient_stack(|| self.parse_expr_inner())
    }

    fn parse_expr_inner(&mut self) -> Result<Expr, ParseError> {
        self.cursor.skip_whitespace();
        let start = self.cursor.pos();
        match self.cursor.current() {
            _ if self.cursor.is_eof() => Err(self.eof("an expression")),
            b'(' => self.parse_form(),
            b'&' => {
                self.cursor.advance();
                let inner = self.parse_expr()?;
                let span = Span::from_offsets(start, start).to(inner.span);
                Ok(Expr::new(ExprKind::Ref(Box::new(inner)), span))
            }
            b'0'..=b'9' => self.parse_int(),
            b'a'..=b'z' => {
                let name = self.parse_name();
                self.expect_atom_end(false)?;
                Ok(Expr::new(ExprKind::Ident(name), self.span_from(start)))
            }
            _ => Err(self.unexpected("an expression")),
        }
    }

    fn parse_int(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.pos();
        self.cursor.eat_while(|b| b.is_ascii_digit());
        let literal = self.cursor.slice_from(start);
        let span = self.span_from(start);
        let value = literal.parse::<i64>().map_err(|_| {
            ParseError::new(
                ParseErrorKind::IntegerOverflow {
                    literal: literal.to_string(),
                },
                span,
            )
        })?;
        self.expect_atom_end(false)?;
        Ok(Expr::new(ExprKind::Int(value), span))
    }

    /// `( ... )`: a definition, a conditional or a call.
    fn parse_form(&mut self) -> Result<Expr, ParseError> {
        let start = self.cursor.pos();
        self.cursor.advance();
        self.cursor.skip_whitespace();

        let head = self.cursor.current();
        if self.cursor.is_eof() {
            return Err(self.eof("an operand"));
        }
        if !(head.is_ascii_lowercase() || is_operator_char(head)) {
            return Err(self.unexpected("an operand"));
        }
        let operand = self.parse_name();
        self.expect_atom_end(true)?;
        trace!(pos = start, operand = %operand, "parse_form");

        match operand.as_str() {
            "def" => self.parse_def(start),
            "if" => self.parse_if(start),
            _ => {
                let args = self.parse_until_close()?;
                let span = self.span_from(start);
                Ok(Expr::new(
                    ExprKind::Call(Call {
                        operand,
                        args,
                        span,
                    }),
                    span,
                ))
            }
        }
    }

    /// `def name (params...) body...)`, with the `(def` already consumed.
    fn parse_def(&mut self, start: usize) -> Result<Expr, ParseError> {
        self.cursor.skip_whitespace();
        let name = self.parse_identifier("a function name", true)?;

        self.cursor.skip_whitespace();
        self.expect_byte(b'(', "`(` before the parameter list")?;
        let mut params = Vec::new();
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.current() == b')' {
                self.cursor.advance();
                break;
            }
            params.push(self.parse_identifier("a parameter name", false)?);
        }

        let body = self.parse_until_close()?;
        let span = self.span_from(start);
        if body.is_empty() {
            return Err(ParseError::new(ParseErrorKind::EmptyBody { name }, span));
        }
        Ok(Expr::new(
            ExprKind::Def(FunctionDef {
                name,
                params,
                body,
                span,
            }),
            span,
        ))
    }

    /// `if (cond) then [else])`, with the `(if` already consumed.
    fn parse_if(&mut self, start: usize) -> Result<Expr, ParseError> {
        let cond = self.parse_expr()?;
        let cond = match cond.kind {
            ExprKind::Call(call) => call,
            _ => return Err(ParseError::new(ParseErrorKind::ConditionNotCall, cond.span)),
        };
        let then_branch = self.parse_expr()?;

        self.cursor.skip_whitespace();
        let else_branch = if self.cursor.current() == b')' {
            None
        } else {
            let else_branch = self.parse_expr()?;
            self.cursor.skip_whitespace();
            Some(else_branch)
        };
        self.expect_byte(b')', "`)` to close `if`")?;

        let span = self.span_from(start);
        Ok(Expr::new(
            ExprKind::If(Box::new(Conditional {
                cond,
                then_branch,
                else_branch,
            })),
            span,
        ))
    }

    /// Expressions up to and including the closing `)`.
    fn parse_until_close(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut exprs = Vec::new();
        loop {
            self.cursor.skip_whitespace();
            if self.cursor.is_eof() {
                return Err(self.eof("`)`"));
            }
            if self.cursor.current() == b')' {
                self.cursor.advance();
                return Ok(exprs);
            }
            exprs.push(self.parse_expr()?);
        }
    }

    /// An identifier starting with a lowercase letter.
    fn parse_identifier(
        &mut self,
        expected: &'static str,
        allow_open: bool,
    ) -> Result<String, ParseError> {
        if self.cursor.is_eof() {
            return Err(self.eof(expected));
        }
        if !self.cursor.current().is_ascii_lowercase() {
            return Err(ParseError::new(
                ParseErrorKind::ExpectedIdentifier {
                    found: self.cursor.current_char().unwrap_or('\0'),
                    expected,
                },
                self.current_span(),
            ));
        }
        let name = self.parse_name();
        self.expect_atom_end(allow_open)?;
        Ok(name)
    }

    /// Consume a run of name characters.
    fn parse_name(&mut self) -> String {
        let start = self.cursor.pos();
        self.cursor.eat_while(is_name_continue);
        self.cursor.slice_from(start).to_string()
    }

    /// An atom must end at whitespace, `)`, end of input, or `(` when
    /// `allow_open` is set.
    fn expect_atom_end(&self, allow_open: bool) -> Result<(), ParseError> {
        let b = self.cursor.current();
        if self.cursor.is_eof() || is_whitespace(b) || b == b')' || (allow_open && b == b'(') {
            Ok(())
        } else {
            Err(self.unexpected("whitespace or `)`"))
        }
    }

    fn expect_byte(&mut self, byte: u8, expected: &'static str) -> Result<(), ParseError> {
        if self.cursor.is_eof() {
            return Err(self.eof(expected));
        }
        if self.cursor.current() != byte {
            return Err(self.unexpected(expected));
        }
        self.cursor.advance();
        Ok(())
    }

    fn span_from(&self, start: usize) -> Span {
        Span::from_offsets(start, self.cursor.pos())
    }

    fn current_span(&self) -> Span {
        let width = self.cursor.current_char().map_or(0, char::len_utf8);
        let pos = self.cursor.pos();
        Span::from_offsets(pos, pos + width)
    }

    #[cold]
    fn unexpected(&self, expected: &'static str) -> ParseError {
        ParseError::new(
            ParseErrorKind::UnexpectedChar {
                found: self.cursor.current_char().unwrap_or('\0'),
                expected,
            },
            self.current_span(),
        )
    }

    #[cold]
    fn eof(&self, expected: &'static str) -> ParseError {
        ParseError::new(
            ParseErrorKind::UnexpectedEof { expected },
            Span::point(self.cursor.pos()),
        )
    }
}

#[cfg(test)]
mod tests;
