//! Type system document grammar.

use super::core::Parser;
use crate::Result;
use crate::ast::{
    DefinitionKind, DirectiveDefinition, EnumValueDefinition, FieldDefinition,
    InputValueDefinition, OperationKind, RootOperationType, SchemaDefinition, SchemaDocument,
    TypeDefinition, TypeSystemDefinition,
};
use crate::lexer::SyntaxKind;

impl Parser<'_> {
    pub fn parse_schema(mut self) -> Result<SchemaDocument> {
        let mut document = SchemaDocument::default();
        while !self.eof() {
            document.definitions.push(self.type_system_definition()?);
        }
        Ok(document)
    }

    fn type_system_definition(&mut self) -> Result<TypeSystemDefinition> {
        let start = self.start();

        if self.eat_keyword("extend") {
            if self.eat_keyword("schema") {
                let schema = self.schema_body(None, start, true)?;
                return Ok(TypeSystemDefinition::SchemaExtension(schema));
            }
            let kind = self.definition_kind()?;
            let definition = self.type_definition(kind, None, start, true)?;
            return Ok(TypeSystemDefinition::TypeExtension(definition));
        }

        let description = self.description()?;

        if self.eat_keyword("schema") {
            let schema = self.schema_body(description, start, false)?;
            return Ok(TypeSystemDefinition::Schema(schema));
        }
        if self.eat_keyword("directive") {
            let directive = self.directive_definition(description, start)?;
            return Ok(TypeSystemDefinition::Directive(directive));
        }

        let kind = self.definition_kind()?;
        let definition = self.type_definition(kind, description, start, false)?;
        Ok(TypeSystemDefinition::Type(definition))
    }

    fn definition_kind(&mut self) -> Result<DefinitionKind> {
        let kind = match self.current_text() {
            "scalar" => DefinitionKind::Scalar,
            "type" => DefinitionKind::Object,
            "interface" => DefinitionKind::Interface,
            "union" => DefinitionKind::Union,
            "enum" => DefinitionKind::Enum,
            "input" => DefinitionKind::InputObject,
            _ => return Err(self.unexpected("a type system definition")),
        };
        self.bump();
        Ok(kind)
    }

    fn schema_body(
        &mut self,
        description: Option<String>,
        start: rowan::TextSize,
        extension: bool,
    ) -> Result<SchemaDefinition> {
        let directives = self.directives(true)?;
        let mut operation_types = Vec::new();

        if extension && !self.at(SyntaxKind::BraceOpen) {
            if directives.is_empty() {
                return Err(self.unexpected("directives or `{`"));
            }
        } else {
            self.expect(SyntaxKind::BraceOpen, "`{`")?;
            while !self.eat(SyntaxKind::BraceClose) {
                let span = self.current_span();
                let keyword = self.name("an operation type or `}`")?;
                let kind = OperationKind::from_keyword(&keyword).ok_or_else(|| {
                    self.error(span, format!("unknown operation type `{keyword}`"))
                })?;
                self.expect(SyntaxKind::Colon, "`:`")?;
                let type_name = self.name("a type name")?;
                operation_types.push(RootOperationType { kind, type_name });
            }
        }

        Ok(SchemaDefinition {
            description,
            directives,
            operation_types,
            range: self.range_from(start),
        })
    }

    fn type_definition(
        &mut self,
        kind: DefinitionKind,
        description: Option<String>,
        start: rowan::TextSize,
        extension: bool,
    ) -> Result<TypeDefinition> {
        let name = self.name("a type name")?;
        let mut definition = TypeDefinition::new(kind, name, Default::default());
        definition.description = description;

        match kind {
            DefinitionKind::Object | DefinitionKind::Interface => {
                definition.implements = self.implements()?;
                definition.directives = self.directives(true)?;
                if self.at(SyntaxKind::BraceOpen) {
                    definition.fields = self.fields_definition()?;
                }
            }
            DefinitionKind::Union => {
                definition.directives = self.directives(true)?;
                if self.eat(SyntaxKind::Equals) {
                    self.eat(SyntaxKind::Pipe);
                    definition.members.push(self.name("a member type")?);
                    while self.eat(SyntaxKind::Pipe) {
                        definition.members.push(self.name("a member type")?);
                    }
                }
            }
            DefinitionKind::Enum => {
                definition.directives = self.directives(true)?;
                if self.eat(SyntaxKind::BraceOpen) {
                    while !self.eat(SyntaxKind::BraceClose) {
                        definition.values.push(self.enum_value_definition()?);
                    }
                }
            }
            DefinitionKind::InputObject => {
                definition.directives = self.directives(true)?;
                if self.eat(SyntaxKind::BraceOpen) {
                    while !self.eat(SyntaxKind::BraceClose) {
                        definition.input_fields.push(self.input_value_definition()?);
                    }
                }
            }
            DefinitionKind::Scalar => {
                definition.directives = self.directives(true)?;
            }
        }

        if extension
            && definition.directives.is_empty()
            && definition.implements.is_empty()
            && definition.fields.is_empty()
            && definition.members.is_empty()
            && definition.values.is_empty()
            && definition.input_fields.is_empty()
        {
            return Err(self.error(
                self.range_from(start),
                format!("extension of `{}` adds nothing", definition.name),
            ));
        }

        definition.range = self.range_from(start);
        Ok(definition)
    }

    fn implements(&mut self) -> Result<Vec<String>> {
        let mut interfaces = Vec::new();
        if !self.eat_keyword("implements") {
            return Ok(interfaces);
        }
        self.eat(SyntaxKind::Amp);
        interfaces.push(self.name("an interface name")?);
        while self.eat(SyntaxKind::Amp) {
            interfaces.push(self.name("an interface name")?);
        }
        Ok(interfaces)
    }

    fn fields_definition(&mut self) -> Result<Vec<FieldDefinition>> {
        self.expect(SyntaxKind::BraceOpen, "`{`")?;
        let mut fields = Vec::new();
        while !self.eat(SyntaxKind::BraceClose) {
            let start = self.start();
            let description = self.description()?;
            let name = self.name("a field name or `}`")?;
            let arguments = self.arguments_definition()?;
            self.expect(SyntaxKind::Colon, "`:`")?;
            let ty = self.type_ref()?;
            let directives = self.directives(true)?;
            fields.push(FieldDefinition {
                description,
                name,
                arguments,
                ty,
                directives,
                range: self.range_from(start),
            });
        }
        Ok(fields)
    }

    fn arguments_definition(&mut self) -> Result<Vec<InputValueDefinition>> {
        let mut arguments = Vec::new();
        if !self.eat(SyntaxKind::ParenOpen) {
            return Ok(arguments);
        }
        while !self.eat(SyntaxKind::ParenClose) {
            arguments.push(self.input_value_definition()?);
        }
        Ok(arguments)
    }

    fn input_value_definition(&mut self) -> Result<InputValueDefinition> {
        let description = self.description()?;
        let name = self.name("an input value name")?;
        self.expect(SyntaxKind::Colon, "`:`")?;
        let ty = self.type_ref()?;
        let default_value = if self.eat(SyntaxKind::Equals) {
            Some(self.value(true)?)
        } else {
            None
        };
        let directives = self.directives(true)?;
        Ok(InputValueDefinition {
            description,
            name,
            ty,
            default_value,
            directives,
        })
    }

    fn enum_value_definition(&mut self) -> Result<EnumValueDefinition> {
        let description = self.description()?;
        let span = self.current_span();
        let name = self.name("an enum value or `}`")?;
        if matches!(name.as_str(), "true" | "false" | "null") {
            return Err(self.error(span, format!("`{name}` cannot be an enum value")));
        }
        let directives = self.directives(true)?;
        Ok(EnumValueDefinition {
            description,
            name,
            directives,
        })
    }

    fn directive_definition(
        &mut self,
        description: Option<String>,
        start: rowan::TextSize,
    ) -> Result<DirectiveDefinition> {
        self.expect(SyntaxKind::At, "`@`")?;
        let name = self.name("a directive name")?;
        let arguments = self.arguments_definition()?;
        let repeatable = self.eat_keyword("repeatable");
        self.expect_keyword("on")?;
        self.eat(SyntaxKind::Pipe);
        let mut locations = vec![self.name("a directive location")?];
        while self.eat(SyntaxKind::Pipe) {
            locations.push(self.name("a directive location")?);
        }
        Ok(DirectiveDefinition {
            description,
            name,
            arguments,
            repeatable,
            locations,
            range: self.range_from(start),
        })
    }
}
