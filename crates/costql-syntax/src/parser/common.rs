//! Productions shared by both document kinds: values, types, directives.

use indexmap::IndexMap;

use super::core::Parser;
use crate::Result;
use crate::ast::{Argument, Directive, Type, Value};
use crate::lexer::SyntaxKind;
use crate::strings::{decode_block_string, decode_string};

impl Parser<'_> {
    pub(super) fn at_string(&self) -> bool {
        self.at(SyntaxKind::StringValue) || self.at(SyntaxKind::BlockStringValue)
    }

    pub(super) fn string(&mut self) -> Result<String> {
        let token = self.bump();
        let raw = self.text(&token);
        match token.kind {
            SyntaxKind::BlockStringValue => Ok(decode_block_string(raw)),
            _ => decode_string(raw).map_err(|msg| self.error(token.span, msg)),
        }
    }

    pub(super) fn description(&mut self) -> Result<Option<String>> {
        if self.at_string() {
            return self.string().map(Some);
        }
        Ok(None)
    }

    /// `const_only` rejects variables, as required in type system documents
    /// and default values.
    pub(super) fn value(&mut self, const_only: bool) -> Result<Value> {
        let span = self.current_span();
        let value = match self.current() {
            Some(SyntaxKind::Dollar) => {
                if const_only {
                    return Err(self.error(span, "variables are not allowed in constant values"));
                }
                self.bump();
                Value::Variable(self.name("variable name")?)
            }
            Some(SyntaxKind::IntValue) => {
                let token = self.bump();
                let text = self.text(&token);
                let int = text
                    .parse::<i64>()
                    .map_err(|_| self.error(token.span, format!("integer `{text}` is out of range")))?;
                Value::Int(int)
            }
            Some(SyntaxKind::FloatValue) => {
                let token = self.bump();
                let text = self.text(&token);
                let float = text
                    .parse::<f64>()
                    .map_err(|_| self.error(token.span, format!("invalid float `{text}`")))?;
                Value::Float(float)
            }
            Some(SyntaxKind::StringValue | SyntaxKind::BlockStringValue) => Value::String(self.string()?),
            Some(SyntaxKind::Name) => {
                let token = self.bump();
                match self.text(&token) {
                    "true" => Value::Boolean(true),
                    "false" => Value::Boolean(false),
                    "null" => Value::Null,
                    other => Value::Enum(other.to_string()),
                }
            }
            Some(SyntaxKind::BracketOpen) => {
                self.enter()?;
                self.bump();
                let mut items = Vec::new();
                while !self.at(SyntaxKind::BracketClose) {
                    if self.eof() {
                        return Err(self.unexpected("`]`"));
                    }
                    items.push(self.value(const_only)?);
                }
                self.bump();
                self.leave();
                Value::List(items)
            }
            Some(SyntaxKind::BraceOpen) => {
                self.enter()?;
                self.bump();
                let mut fields = IndexMap::new();
                while !self.eat(SyntaxKind::BraceClose) {
                    let start = self.current_span();
                    let name = self.name("object field name or `}`")?;
                    self.expect(SyntaxKind::Colon, "`:`")?;
                    let value = self.value(const_only)?;
                    if fields.insert(name.clone(), value).is_some() {
                        return Err(self.error(start, format!("duplicate object field `{name}`")));
                    }
                }
                self.leave();
                Value::Object(fields)
            }
            _ => return Err(self.unexpected("a value")),
        };
        Ok(value)
    }

    pub(super) fn type_ref(&mut self) -> Result<Type> {
        self.enter()?;
        let ty = if self.eat(SyntaxKind::BracketOpen) {
            let inner = self.type_ref()?;
            self.expect(SyntaxKind::BracketClose, "`]`")?;
            Type::List(Box::new(inner))
        } else {
            Type::Named(self.name("a type")?)
        };
        self.leave();

        if self.eat(SyntaxKind::Bang) {
            return Ok(Type::NonNull(Box::new(ty)));
        }
        Ok(ty)
    }

    pub(super) fn arguments(&mut self, const_only: bool) -> Result<Vec<Argument>> {
        let mut arguments = Vec::new();
        if !self.eat(SyntaxKind::ParenOpen) {
            return Ok(arguments);
        }
        loop {
            let name = self.name("argument name")?;
            self.expect(SyntaxKind::Colon, "`:`")?;
            let value = self.value(const_only)?;
            arguments.push(Argument { name, value });
            if self.eat(SyntaxKind::ParenClose) {
                return Ok(arguments);
            }
        }
    }

    pub(super) fn directives(&mut self, const_only: bool) -> Result<Vec<Directive>> {
        let mut directives = Vec::new();
        while self.at(SyntaxKind::At) {
            let start = self.start();
            self.bump();
            let name = self.name("directive name")?;
            let arguments = self.arguments(const_only)?;
            directives.push(Directive {
                name,
                arguments,
                range: self.range_from(start),
            });
        }
        Ok(directives)
    }
}
