//! Executable document grammar: operations, fragments and selections.

use super::core::Parser;
use crate::Result;
use crate::ast::{
    ExecutableDefinition, ExecutableDocument, Field, FragmentDefinition, FragmentSpread,
    InlineFragment, OperationDefinition, OperationKind, Selection, SelectionSet,
    VariableDefinition,
};
use crate::lexer::SyntaxKind;

impl Parser<'_> {
    pub fn parse_executable(mut self) -> Result<ExecutableDocument> {
        let mut document = ExecutableDocument::default();
        while !self.eof() {
            document.definitions.push(self.executable_definition()?);
        }
        if document.definitions.is_empty() {
            return Err(self.unexpected("an operation or fragment"));
        }
        Ok(document)
    }

    fn executable_definition(&mut self) -> Result<ExecutableDefinition> {
        let start = self.start();

        if self.at(SyntaxKind::BraceOpen) {
            let selection_set = self.selection_set()?;
            return Ok(ExecutableDefinition::Operation(OperationDefinition {
                kind: OperationKind::Query,
                name: None,
                variables: Vec::new(),
                directives: Vec::new(),
                selection_set,
                range: self.range_from(start),
            }));
        }

        if self.eat_keyword("fragment") {
            let span = self.current_span();
            let name = self.name("a fragment name")?;
            if name == "on" {
                return Err(self.error(span, "a fragment cannot be named `on`"));
            }
            self.expect_keyword("on")?;
            let type_condition = self.name("a type condition")?;
            let directives = self.directives(false)?;
            let selection_set = self.selection_set()?;
            return Ok(ExecutableDefinition::Fragment(FragmentDefinition {
                name,
                type_condition,
                directives,
                selection_set,
                range: self.range_from(start),
            }));
        }

        let kind = match OperationKind::from_keyword(self.current_text()) {
            Some(kind) if self.at(SyntaxKind::Name) => kind,
            _ => return Err(self.unexpected("an operation or fragment")),
        };
        self.bump();

        let name = if self.at(SyntaxKind::Name) {
            Some(self.name("an operation name")?)
        } else {
            None
        };
        let variables = self.variable_definitions()?;
        let directives = self.directives(false)?;
        let selection_set = self.selection_set()?;

        Ok(ExecutableDefinition::Operation(OperationDefinition {
            kind,
            name,
            variables,
            directives,
            selection_set,
            range: self.range_from(start),
        }))
    }

    fn variable_definitions(&mut self) -> Result<Vec<VariableDefinition>> {
        let mut variables = Vec::new();
        if !self.eat(SyntaxKind::ParenOpen) {
            return Ok(variables);
        }
        while !self.eat(SyntaxKind::ParenClose) {
            self.expect(SyntaxKind::Dollar, "`$` or `)`")?;
            let name = self.name("a variable name")?;
            self.expect(SyntaxKind::Colon, "`:`")?;
            let ty = self.type_ref()?;
            let default_value = if self.eat(SyntaxKind::Equals) {
                Some(self.value(true)?)
            } else {
                None
            };
            let directives = self.directives(true)?;
            variables.push(VariableDefinition {
                name,
                ty,
                default_value,
                directives,
            });
        }
        Ok(variables)
    }

    fn selection_set(&mut self) -> Result<SelectionSet> {
        let start = self.start();
        self.expect(SyntaxKind::BraceOpen, "`{`")?;
        self.enter()?;

        let mut selections = Vec::new();
        while !self.eat(SyntaxKind::BraceClose) {
            selections.push(self.selection()?);
        }
        if selections.is_empty() {
            return Err(self.error(self.range_from(start), "selection set cannot be empty"));
        }

        self.leave();
        Ok(SelectionSet {
            selections,
            range: self.range_from(start),
        })
    }

    fn selection(&mut self) -> Result<Selection> {
        let start = self.start();

        if self.eat(SyntaxKind::Spread) {
            if self.at(SyntaxKind::Name) && !self.at_keyword("on") {
                let name = self.name("a fragment name")?;
                let directives = self.directives(false)?;
                return Ok(Selection::FragmentSpread(FragmentSpread {
                    name,
                    directives,
                    range: self.range_from(start),
                }));
            }

            let type_condition = if self.eat_keyword("on") {
                Some(self.name("a type condition")?)
            } else {
                None
            };
            let directives = self.directives(false)?;
            let selection_set = self.selection_set()?;
            return Ok(Selection::InlineFragment(InlineFragment {
                type_condition,
                directives,
                selection_set,
                range: self.range_from(start),
            }));
        }

        let first = self.name("a field, fragment spread or `}`")?;
        let (alias, name) = if self.eat(SyntaxKind::Colon) {
            (Some(first), self.name("a field name")?)
        } else {
            (None, first)
        };
        let arguments = self.arguments(false)?;
        let directives = self.directives(false)?;
        let selection_set = if self.at(SyntaxKind::BraceOpen) {
            self.selection_set()?
        } else {
            SelectionSet::default()
        };

        Ok(Selection::Field(Field {
            alias,
            name,
            arguments,
            directives,
            selection_set,
            range: self.range_from(start),
        }))
    }
}
