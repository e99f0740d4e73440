//! Recursive descent parser for GraphQL executable documents.
//!
//! [`GraphQLParser`] works with any token source implementing
//! [`GraphQLTokenSource`]. Each grammar rule has a corresponding `parse_*`
//! method returning `Result<AstNode, GraphQLParseError>`; the first error
//! aborts the whole parse.
//!
//! Only syntax is checked here. Duplicate names, undefined fragments, cycles
//! and type mismatches are left to validation.

use crate::GraphQLParseError;
use crate::GraphQLParseErrorKind;
use crate::GraphQLSourceSpan;
use crate::GraphQLTokenStream;
use crate::Location;
use crate::ast;
use crate::token::GraphQLToken;
use crate::token::GraphQLTokenKind;
use crate::token_source::GraphQLTokenSource;
use crate::token_source::StrGraphQLTokenSource;
use std::borrow::Cow;

/// Whether variable references are allowed in the value being parsed.
#[derive(Clone, Copy, Debug, PartialEq)]
enum ConstContext {
    AllowVariables,
    /// `$var = <default>` values must be constant.
    VariableDefaultValue,
}

/// Parses `source` as an executable document.
///
/// ```rust
/// let doc = gqlengine_parser::parse_executable("{ hello }").unwrap();
/// assert_eq!(doc.operations.len(), 1);
/// ```
pub fn parse_executable(source: &str) -> Result<ast::Document, GraphQLParseError> {
    GraphQLParser::new(source).parse_executable_document()
}

/// Recursive descent parser over a [`GraphQLTokenStream`].
pub struct GraphQLParser<'src, TTokenSource: GraphQLTokenSource<'src>> {
    token_stream: GraphQLTokenStream<'src, TTokenSource>,

    /// Nesting depth of selection sets and composite values.
    recursion_depth: usize,

    /// Id handed to the next parsed field.
    next_field_id: u32,
}

impl<'src> GraphQLParser<'src, StrGraphQLTokenSource<'src>> {
    pub fn new(source: &'src str) -> Self {
        Self::from_token_source(StrGraphQLTokenSource::new(source))
    }
}

impl<'src, TTokenSource: GraphQLTokenSource<'src>> GraphQLParser<'src, TTokenSource> {
    /// Deep enough for any realistic document, shallow enough that the
    /// recursion cannot exhaust the stack.
    const MAX_RECURSION_DEPTH: usize = 64;

    pub fn from_token_source(token_source: TTokenSource) -> Self {
        Self {
            token_stream: GraphQLTokenStream::new(token_source),
            recursion_depth: 0,
            next_field_id: 0,
        }
    }

    /// Parses the whole token stream as an executable document.
    pub fn parse_executable_document(mut self) -> Result<ast::Document, GraphQLParseError> {
        let mut doc = ast::Document::default();

        loop {
            match self.peek_kind()? {
                GraphQLTokenKind::Eof => break,
                GraphQLTokenKind::CurlyBraceOpen => {
                    let location = self.peek_location();
                    let selections = self.parse_selection_set()?;
                    doc.operations.push(ast::Operation {
                        kind: ast::OperationKind::Query,
                        name: None,
                        variables: Vec::new(),
                        directives: Vec::new(),
                        selections,
                        location,
                    });
                },
                GraphQLTokenKind::Name(keyword) => match keyword.as_ref() {
                    "query" => {
                        let op = self.parse_operation_definition(ast::OperationKind::Query)?;
                        doc.operations.push(op);
                    },
                    "mutation" => {
                        let op = self.parse_operation_definition(ast::OperationKind::Mutation)?;
                        doc.operations.push(op);
                    },
                    "subscription" => {
                        let op =
                            self.parse_operation_definition(ast::OperationKind::Subscription)?;
                        doc.operations.push(op);
                    },
                    "fragment" => {
                        let frag = self.parse_fragment_definition()?;
                        doc.fragments.push(frag);
                    },
                    _ => return Err(self.unexpected_definition()),
                },
                _ => return Err(self.unexpected_definition()),
            }
        }

        doc.field_count = self.next_field_id as usize;
        Ok(doc)
    }

    fn unexpected_definition(&mut self) -> GraphQLParseError {
        self.unexpected(&["{", "query", "mutation", "subscription", "fragment"])
    }

    // =========================================================================
    // Token helpers
    // =========================================================================

    /// Returns the kind of the next token without consuming it.
    ///
    /// Lexer error tokens surface here as `Err`. An exhausted stream reads as
    /// `Eof`.
    fn peek_kind(&mut self) -> Result<GraphQLTokenKind<'src>, GraphQLParseError> {
        match self.token_stream.peek() {
            None => Ok(GraphQLTokenKind::Eof),
            Some(GraphQLToken {
                kind: GraphQLTokenKind::Error { message, error_notes },
                span,
            }) => Err(GraphQLParseError::from_lexer_error(
                message.clone(),
                *span,
                error_notes.clone(),
            )),
            Some(token) => Ok(token.kind.clone()),
        }
    }

    fn peek_span(&mut self) -> GraphQLSourceSpan {
        let position = self.token_stream.current_position();
        match self.token_stream.peek() {
            Some(token) => token.span,
            None => GraphQLSourceSpan::new(position, position),
        }
    }

    fn peek_location(&mut self) -> Location {
        self.token_stream.current_position().to_location()
    }

    fn peek_is(&mut self, kind: &GraphQLTokenKind) -> Result<bool, GraphQLParseError> {
        Ok(Self::token_kinds_match(&self.peek_kind()?, kind))
    }

    /// Checks if the next token is the name `keyword`. `true`, `false`, and
    /// `null` never match; they are distinct token kinds.
    fn peek_is_keyword(&mut self, keyword: &str) -> Result<bool, GraphQLParseError> {
        Ok(matches!(self.peek_kind()?, GraphQLTokenKind::Name(name) if name == keyword))
    }

    fn peek_is_name(&mut self) -> Result<bool, GraphQLParseError> {
        Ok(matches!(
            self.peek_kind()?,
            GraphQLTokenKind::Name(_)
                | GraphQLTokenKind::True
                | GraphQLTokenKind::False
                | GraphQLTokenKind::Null
        ))
    }

    fn consume_token(&mut self) -> Option<GraphQLToken<'src>> {
        self.token_stream.consume()
    }

    /// Builds an "expected X, found Y" error for the next token.
    fn unexpected(&mut self, expected: &[&str]) -> GraphQLParseError {
        let expected: Vec<String> = expected.iter().map(|s| s.to_string()).collect();
        let expected_display = match expected.as_slice() {
            [only] => format!("`{only}`"),
            [first, second] => format!("`{first}` or `{second}`"),
            [init @ .., last] => format!(
                "one of {}, or `{last}`",
                init.iter().map(|e| format!("`{e}`")).collect::<Vec<_>>().join(", "),
            ),
            [] => "more input".to_string(),
        };
        let kind = match self.peek_kind() {
            Ok(kind) => kind,
            Err(lexer_error) => return lexer_error,
        };
        let span = self.peek_span();
        if matches!(kind, GraphQLTokenKind::Eof) {
            GraphQLParseError::new(
                format!("expected {expected_display}, found end of input"),
                span,
                GraphQLParseErrorKind::UnexpectedEof { expected },
            )
        } else {
            let found = kind.display();
            GraphQLParseError::new(
                format!("expected {expected_display}, found `{found}`"),
                span,
                GraphQLParseErrorKind::UnexpectedToken { expected, found },
            )
        }
    }

    /// Expects a specific token kind and consumes it.
    fn expect(
        &mut self,
        expected_kind: &GraphQLTokenKind,
    ) -> Result<GraphQLToken<'src>, GraphQLParseError> {
        if self.peek_is(expected_kind)? {
            if let Some(token) = self.consume_token() {
                return Ok(token);
            }
        }
        let display = expected_kind.display();
        Err(self.unexpected(&[display.as_str()]))
    }

    /// Expects a name token and returns it as an [`ast::Name`].
    ///
    /// `true`, `false`, and `null` are valid names here even though the lexer
    /// gives them their own token kinds.
    fn expect_name(&mut self) -> Result<ast::Name, GraphQLParseError> {
        if !self.peek_is_name()? {
            return Err(self.unexpected(&["name"]));
        }
        let Some(token) = self.consume_token() else {
            return Err(self.unexpected(&["name"]));
        };
        let value: Cow<'src, str> = match token.kind {
            GraphQLTokenKind::Name(s) => s,
            GraphQLTokenKind::True => Cow::Borrowed("true"),
            GraphQLTokenKind::False => Cow::Borrowed("false"),
            _ => Cow::Borrowed("null"),
        };
        Ok(ast::Name::new(value.into_owned(), token.span.location()))
    }

    /// Expects the structural keyword `keyword` (a `Name` token with that text).
    fn expect_keyword(&mut self, keyword: &str) -> Result<Location, GraphQLParseError> {
        if self.peek_is_keyword(keyword)? {
            if let Some(token) = self.consume_token() {
                return Ok(token.span.location());
            }
        }
        Err(self.unexpected(&[keyword]))
    }

    /// Compares token kinds by variant, ignoring payloads.
    fn token_kinds_match(actual: &GraphQLTokenKind, expected: &GraphQLTokenKind) -> bool {
        std::mem::discriminant(actual) == std::mem::discriminant(expected)
    }

    // =========================================================================
    // Recursion guard
    // =========================================================================

    /// Increments the nesting depth, failing once it passes
    /// `MAX_RECURSION_DEPTH`. Callers pair this with `exit_recursion()`.
    fn enter_recursion(&mut self) -> Result<(), GraphQLParseError> {
        self.recursion_depth += 1;
        if self.recursion_depth > Self::MAX_RECURSION_DEPTH {
            return Err(GraphQLParseError::new(
                "maximum nesting depth exceeded",
                self.peek_span(),
                GraphQLParseErrorKind::InvalidSyntax,
            ));
        }
        Ok(())
    }

    fn exit_recursion(&mut self) {
        self.recursion_depth -= 1;
    }

    // =========================================================================
    // Values
    // =========================================================================

    fn parse_value(&mut self, context: ConstContext) -> Result<ast::Value, GraphQLParseError> {
        self.enter_recursion()?;
        let result = self.parse_value_impl(context);
        self.exit_recursion();
        result
    }

    fn parse_value_impl(&mut self, context: ConstContext) -> Result<ast::Value, GraphQLParseError> {
        let kind = self.peek_kind()?;
        let span = self.peek_span();
        match kind {
            GraphQLTokenKind::Dollar => {
                if context == ConstContext::VariableDefaultValue {
                    return Err(GraphQLParseError::new(
                        "variables are not allowed in default values",
                        span,
                        GraphQLParseErrorKind::InvalidSyntax,
                    ));
                }
                self.consume_token();
                Ok(ast::Value::Variable(self.expect_name()?))
            },
            GraphQLTokenKind::IntValue(_) => {
                self.consume_token();
                match kind.parse_int_value() {
                    Some(Ok(i)) => Ok(ast::Value::Int(i)),
                    _ => Err(GraphQLParseError::new(
                        format!("integer value `{}` is out of range", kind.display()),
                        span,
                        GraphQLParseErrorKind::InvalidSyntax,
                    )),
                }
            },
            GraphQLTokenKind::FloatValue(_) => {
                self.consume_token();
                match kind.parse_float_value() {
                    Some(Ok(f)) if f.is_finite() => Ok(ast::Value::Float(f)),
                    _ => Err(GraphQLParseError::new(
                        format!("float value `{}` is out of range", kind.display()),
                        span,
                        GraphQLParseErrorKind::InvalidSyntax,
                    )),
                }
            },
            GraphQLTokenKind::StringValue(_) => {
                self.consume_token();
                match kind.parse_string_value() {
                    Some(Ok(s)) => Ok(ast::Value::String(s)),
                    Some(Err(err)) => Err(GraphQLParseError::new(
                        err.to_string(),
                        span,
                        GraphQLParseErrorKind::LexerError,
                    )),
                    None => Err(self.unexpected(&["value"])),
                }
            },
            GraphQLTokenKind::True => {
                self.consume_token();
                Ok(ast::Value::Boolean(true))
            },
            GraphQLTokenKind::False => {
                self.consume_token();
                Ok(ast::Value::Boolean(false))
            },
            GraphQLTokenKind::Null => {
                self.consume_token();
                Ok(ast::Value::Null)
            },
            GraphQLTokenKind::Name(name) => {
                self.consume_token();
                Ok(ast::Value::Enum(name.into_owned()))
            },
            GraphQLTokenKind::SquareBracketOpen => self.parse_list_value(context),
            GraphQLTokenKind::CurlyBraceOpen => self.parse_object_value(context),
            _ => Err(self.unexpected(&["value"])),
        }
    }

    fn parse_list_value(&mut self, context: ConstContext) -> Result<ast::Value, GraphQLParseError> {
        self.expect(&GraphQLTokenKind::SquareBracketOpen)?;
        let mut items = Vec::new();
        while !self.peek_is(&GraphQLTokenKind::SquareBracketClose)? {
            if self.token_stream.is_at_end() {
                return Err(self.unexpected(&["]"]));
            }
            items.push(self.parse_value(context)?);
        }
        self.expect(&GraphQLTokenKind::SquareBracketClose)?;
        Ok(ast::Value::List(items))
    }

    fn parse_object_value(&mut self, context: ConstContext) -> Result<ast::Value, GraphQLParseError> {
        self.expect(&GraphQLTokenKind::CurlyBraceOpen)?;
        let mut fields = Vec::new();
        while !self.peek_is(&GraphQLTokenKind::CurlyBraceClose)? {
            if self.token_stream.is_at_end() {
                return Err(self.unexpected(&["}"]));
            }
            let name = self.expect_name()?;
            self.expect(&GraphQLTokenKind::Colon)?;
            let value = self.parse_value(context)?;
            fields.push(ast::ObjectField { name, value });
        }
        self.expect(&GraphQLTokenKind::CurlyBraceClose)?;
        Ok(ast::Value::Object(fields))
    }

    // =========================================================================
    // Type references
    // =========================================================================

    fn parse_type_ref(&mut self) -> Result<ast::TypeRef, GraphQLParseError> {
        self.enter_recursion()?;
        let result = self.parse_type_ref_impl();
        self.exit_recursion();
        result
    }

    fn parse_type_ref_impl(&mut self) -> Result<ast::TypeRef, GraphQLParseError> {
        let base = if self.peek_is(&GraphQLTokenKind::SquareBracketOpen)? {
            self.consume_token();
            let inner = self.parse_type_ref()?;
            self.expect(&GraphQLTokenKind::SquareBracketClose)?;
            ast::TypeRef::List(Box::new(inner))
        } else if self.peek_is_name()? {
            ast::TypeRef::Named(self.expect_name()?)
        } else {
            return Err(self.unexpected(&["name", "["]));
        };

        if self.peek_is(&GraphQLTokenKind::Bang)? {
            self.consume_token();
            Ok(ast::TypeRef::NonNull(Box::new(base)))
        } else {
            Ok(base)
        }
    }

    // =========================================================================
    // Directives and arguments
    // =========================================================================

    /// Parses zero or more directive annotations: `@name(args)...`
    fn parse_directives(&mut self) -> Result<Vec<ast::Directive>, GraphQLParseError> {
        let mut directives = Vec::new();
        while self.peek_is(&GraphQLTokenKind::At)? {
            let location = self.expect(&GraphQLTokenKind::At)?.span.location();
            let name = self.expect_name()?;
            let arguments = if self.peek_is(&GraphQLTokenKind::ParenOpen)? {
                self.parse_arguments()?
            } else {
                Vec::new()
            };
            directives.push(ast::Directive {
                name,
                arguments,
                location,
            });
        }
        Ok(directives)
    }

    /// Parses a non-empty argument list: `(name: value, ...)`
    fn parse_arguments(&mut self) -> Result<Vec<ast::Argument>, GraphQLParseError> {
        let open = self.expect(&GraphQLTokenKind::ParenOpen)?;
        if self.peek_is(&GraphQLTokenKind::ParenClose)? {
            return Err(GraphQLParseError::new(
                "argument list cannot be empty; omit the parentheses instead",
                open.span,
                GraphQLParseErrorKind::InvalidEmptyConstruct {
                    construct: "argument list".to_string(),
                },
            ));
        }

        let mut arguments = Vec::new();
        while !self.peek_is(&GraphQLTokenKind::ParenClose)? {
            if self.token_stream.is_at_end() {
                return Err(self.unexpected(&[")"]));
            }
            let name = self.expect_name()?;
            self.expect(&GraphQLTokenKind::Colon)?;
            let value = self.parse_value(ConstContext::AllowVariables)?;
            arguments.push(ast::Argument { name, value });
        }
        self.expect(&GraphQLTokenKind::ParenClose)?;
        Ok(arguments)
    }

    // =========================================================================
    // Selections
    // =========================================================================

    fn parse_selection_set(&mut self) -> Result<Vec<ast::Selection>, GraphQLParseError> {
        self.enter_recursion()?;
        let result = self.parse_selection_set_impl();
        self.exit_recursion();
        result
    }

    /// `{` selection+ `}`; an empty selection set is a syntax error.
    fn parse_selection_set_impl(&mut self) -> Result<Vec<ast::Selection>, GraphQLParseError> {
        let open = self.expect(&GraphQLTokenKind::CurlyBraceOpen)?;
        if self.peek_is(&GraphQLTokenKind::CurlyBraceClose)? {
            return Err(GraphQLParseError::new(
                "selection set cannot be empty",
                open.span,
                GraphQLParseErrorKind::InvalidEmptyConstruct {
                    construct: "selection set".to_string(),
                },
            ));
        }

        let mut selections = Vec::new();
        loop {
            selections.push(self.parse_selection()?);
            if self.peek_is(&GraphQLTokenKind::CurlyBraceClose)? {
                break;
            }
            if self.token_stream.is_at_end() {
                let mut err = self.unexpected(&["}"]);
                err.add_note(format!("selection set opened at {}", open.span.location()));
                return Err(err);
            }
        }
        self.expect(&GraphQLTokenKind::CurlyBraceClose)?;
        Ok(selections)
    }

    fn parse_selection(&mut self) -> Result<ast::Selection, GraphQLParseError> {
        if !self.peek_is(&GraphQLTokenKind::Ellipsis)? {
            return self.parse_field().map(ast::Selection::Field);
        }

        let location = self.expect(&GraphQLTokenKind::Ellipsis)?.span.location();
        if self.peek_is_name()? && !self.peek_is_keyword("on")? {
            let fragment_name = self.expect_name()?;
            let directives = self.parse_directives()?;
            return Ok(ast::Selection::FragmentSpread(ast::FragmentSpread {
                fragment_name,
                directives,
                location,
            }));
        }

        let type_condition = if self.peek_is_keyword("on")? {
            self.consume_token();
            Some(self.expect_name()?)
        } else {
            None
        };
        let directives = self.parse_directives()?;
        let selections = self.parse_selection_set()?;
        Ok(ast::Selection::InlineFragment(ast::InlineFragment {
            type_condition,
            directives,
            selections,
            location,
        }))
    }

    /// Parses a field: `alias: name(args) @directives { selections }`
    fn parse_field(&mut self) -> Result<ast::Field, GraphQLParseError> {
        let first = self.expect_name()?;
        let (alias, name) = if self.peek_is(&GraphQLTokenKind::Colon)? {
            self.consume_token();
            let name = self.expect_name()?;
            (first, name)
        } else {
            (first.clone(), first)
        };

        let id = ast::FieldId(self.next_field_id);
        self.next_field_id += 1;

        let arguments = if self.peek_is(&GraphQLTokenKind::ParenOpen)? {
            self.parse_arguments()?
        } else {
            Vec::new()
        };
        let directives = self.parse_directives()?;

        let (selections, selection_set_location) =
            if self.peek_is(&GraphQLTokenKind::CurlyBraceOpen)? {
                let location = self.peek_location();
                (self.parse_selection_set()?, Some(location))
            } else {
                (Vec::new(), None)
            };

        Ok(ast::Field {
            id,
            alias,
            name,
            arguments,
            directives,
            selections,
            selection_set_location,
        })
    }

    // =========================================================================
    // Definitions
    // =========================================================================

    /// `query|mutation|subscription Name? @directives? (vars)? @directives? { ... }`
    fn parse_operation_definition(
        &mut self,
        kind: ast::OperationKind,
    ) -> Result<ast::Operation, GraphQLParseError> {
        let location = self.expect_keyword(kind.as_str())?;

        let name = if self.peek_is_name()? {
            Some(self.expect_name()?)
        } else {
            None
        };

        let mut directives = self.parse_directives()?;
        let variables = if self.peek_is(&GraphQLTokenKind::ParenOpen)? {
            self.parse_variable_definitions()?
        } else {
            Vec::new()
        };
        directives.extend(self.parse_directives()?);

        let selections = self.parse_selection_set()?;

        Ok(ast::Operation {
            kind,
            name,
            variables,
            directives,
            selections,
            location,
        })
    }

    fn parse_variable_definitions(
        &mut self,
    ) -> Result<Vec<ast::VariableDefinition>, GraphQLParseError> {
        let open = self.expect(&GraphQLTokenKind::ParenOpen)?;
        if self.peek_is(&GraphQLTokenKind::ParenClose)? {
            return Err(GraphQLParseError::new(
                "variable definition list cannot be empty; omit the parentheses instead",
                open.span,
                GraphQLParseErrorKind::InvalidEmptyConstruct {
                    construct: "variable definitions".to_string(),
                },
            ));
        }

        let mut variables = Vec::new();
        while !self.peek_is(&GraphQLTokenKind::ParenClose)? {
            if self.token_stream.is_at_end() {
                return Err(self.unexpected(&[")"]));
            }
            variables.push(self.parse_variable_definition()?);
        }
        self.expect(&GraphQLTokenKind::ParenClose)?;
        Ok(variables)
    }

    /// `$name: Type = default @directives`
    fn parse_variable_definition(&mut self) -> Result<ast::VariableDefinition, GraphQLParseError> {
        let location = self.expect(&GraphQLTokenKind::Dollar)?.span.location();
        let name = self.expect_name()?;
        self.expect(&GraphQLTokenKind::Colon)?;
        let var_type = self.parse_type_ref()?;

        let default_value = if self.peek_is(&GraphQLTokenKind::Equals)? {
            self.consume_token();
            Some(self.parse_value(ConstContext::VariableDefaultValue)?)
        } else {
            None
        };
        let directives = self.parse_directives()?;

        Ok(ast::VariableDefinition {
            name,
            var_type,
            default_value,
            directives,
            location,
        })
    }

    /// `fragment Name on Type @directives { ... }`
    fn parse_fragment_definition(&mut self) -> Result<ast::FragmentDecl, GraphQLParseError> {
        let location = self.expect_keyword("fragment")?;

        if self.peek_is_keyword("on")? {
            return Err(GraphQLParseError::new(
                "fragment name cannot be `on`",
                self.peek_span(),
                GraphQLParseErrorKind::InvalidSyntax,
            ));
        }
        let name = self.expect_name()?;

        self.expect_keyword("on")?;
        let type_condition = self.expect_name()?;
        let directives = self.parse_directives()?;
        let selections = self.parse_selection_set()?;

        Ok(ast::FragmentDecl {
            name,
            type_condition,
            directives,
            selections,
            location,
        })
    }
}
