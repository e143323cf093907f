use crate::assemble::AssembledDocument;
use crate::error::{Location, ValidationError};
use apollo_compiler::ast;
use apollo_compiler::parser::{SourceMap, SourceSpan};
use apollo_compiler::schema::ExtendedType;
use apollo_compiler::{Node, Schema};

/// Find usages of deprecated fields, arguments, input fields and enum values.
///
/// Operations are walked from their root type and fragments from their type
/// condition, so each selection is visited once no matter how often it is
/// spread. Input values are checked wherever they appear: field and directive
/// arguments as well as variable defaults. Selections the schema does not
/// know are skipped; structural validation reports those.
#[must_use]
pub fn find_deprecated_usages(
    schema: &Schema,
    document: &AssembledDocument,
) -> Vec<ValidationError> {
    let mut scanner = Scanner {
        schema,
        sources: document.sources(),
        findings: Vec::new(),
    };

    for operation in &document.operations {
        scanner.variables(&operation.variables);
        scanner.directives(&operation.directives);
        if let Some(root) = schema.root_operation(operation.operation_type) {
            scanner.selection_set(root.as_str(), &operation.selection_set);
        }
    }
    for fragment in document.fragments.values() {
        scanner.directives(&fragment.directives);
        scanner.selection_set(fragment.type_condition.as_str(), &fragment.selection_set);
    }

    tracing::trace!(findings = scanner.findings.len(), "Scanned for deprecated usages");
    scanner.findings
}

struct Scanner<'a> {
    schema: &'a Schema,
    sources: &'a SourceMap,
    findings: Vec<ValidationError>,
}

impl Scanner<'_> {
    fn selection_set(&mut self, parent_type: &str, selection_set: &[ast::Selection]) {
        for selection in selection_set {
            match selection {
                ast::Selection::Field(field) => self.field(parent_type, field),
                ast::Selection::InlineFragment(inline) => {
                    self.directives(&inline.directives);
                    let type_name = inline
                        .type_condition
                        .as_ref()
                        .map_or(parent_type, |name| name.as_str());
                    self.selection_set(type_name, &inline.selection_set);
                }
                // fragment definitions are scanned on their own
                ast::Selection::FragmentSpread(spread) => self.directives(&spread.directives),
            }
        }
    }

    fn field(&mut self, parent_type: &str, field: &Node<ast::Field>) {
        if field.name.as_str().starts_with("__") {
            return;
        }
        let schema = self.schema;
        let Ok(definition) = schema.type_field(parent_type, field.name.as_str()) else {
            return;
        };

        if let Some(reason) = deprecation(&definition.directives) {
            self.report(
                format!("Field '{parent_type}.{}' is deprecated", field.name),
                reason,
                field.location(),
            );
        }

        self.arguments(
            &format!("field '{parent_type}.{}'", field.name),
            &definition.arguments,
            &field.arguments,
        );
        self.directives(&field.directives);
        self.selection_set(definition.ty.inner_named_type().as_str(), &field.selection_set);
    }

    fn directives(&mut self, directives: &ast::DirectiveList) {
        let schema = self.schema;
        for directive in &directives.0 {
            let Some(definition) = schema.directive_definitions.get(&directive.name) else {
                continue;
            };
            self.arguments(
                &format!("directive '@{}'", directive.name),
                &definition.arguments,
                &directive.arguments,
            );
        }
    }

    fn variables(&mut self, variables: &[Node<ast::VariableDefinition>]) {
        for variable in variables {
            if let Some(default_value) = &variable.default_value {
                self.value(variable.ty.inner_named_type().as_str(), default_value);
            }
            self.directives(&variable.directives);
        }
    }

    /// `owner` names the field or directive the arguments are passed to.
    fn arguments(
        &mut self,
        owner: &str,
        definitions: &[Node<ast::InputValueDefinition>],
        arguments: &[Node<ast::Argument>],
    ) {
        for argument in arguments {
            let Some(definition) = definitions
                .iter()
                .find(|definition| definition.name == argument.name)
            else {
                continue;
            };
            if let Some(reason) = deprecation(&definition.directives) {
                self.report(
                    format!("Argument '{}' of {owner} is deprecated", argument.name),
                    reason,
                    argument.location(),
                );
            }
            self.value(definition.ty.inner_named_type().as_str(), &argument.value);
        }
    }

    /// Check an input value against the named type it is expected to have.
    fn value(&mut self, type_name: &str, value: &Node<ast::Value>) {
        let schema = self.schema;
        match (&**value, schema.types.get(type_name)) {
            (ast::Value::List(items), _) => {
                for item in items {
                    self.value(type_name, item);
                }
            }
            (ast::Value::Enum(variant), Some(ExtendedType::Enum(enum_type))) => {
                let reason = enum_type
                    .values
                    .get(variant)
                    .and_then(|definition| deprecation(&definition.directives));
                if let Some(reason) = reason {
                    self.report(
                        format!("Enum value '{type_name}.{variant}' is deprecated"),
                        reason,
                        value.location(),
                    );
                }
            }
            (ast::Value::Object(fields), Some(ExtendedType::InputObject(input_type))) => {
                for (name, field_value) in fields {
                    let Some(field_def) = input_type.fields.get(name) else {
                        continue;
                    };
                    if let Some(reason) = deprecation(&field_def.directives) {
                        self.report(
                            format!("Input field '{type_name}.{name}' is deprecated"),
                            reason,
                            field_value.location(),
                        );
                    }
                    self.value(field_def.ty.inner_named_type().as_str(), field_value);
                }
            }
            _ => {}
        }
    }

    fn report(&mut self, message: String, reason: Option<&str>, span: Option<SourceSpan>) {
        let message = match reason {
            Some(reason) => format!("{message}: {reason}"),
            None => message,
        };
        self.findings.push(
            ValidationError::deprecated(message)
                .with_location(Location::from_span(span, self.sources)),
        );
    }
}

/// `Some(reason)` when the element carries `@deprecated`.
fn deprecation(directives: &ast::DirectiveList) -> Option<Option<&str>> {
    directives.get("deprecated").map(|directive| {
        directive
            .specified_argument_by_name("reason")
            .and_then(|reason| reason.as_str())
    })
}
