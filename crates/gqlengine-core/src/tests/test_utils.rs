use crate::Schema;
use crate::SchemaBuilder;
use crate::validation::DefaultValidator;
use crate::validation::ValidationOutcome;
use crate::validation::Validator;
use gqlengine_parser::ast::Document;
use std::sync::OnceLock;

pub(crate) const TEST_SDL: &str = r#"
schema {
  query: Query
  mutation: Mutation
}

type Query {
  hello: String
  user(id: ID!): User
  users(first: Int = 10, role: Role): [User!]!
  node(id: ID!): Node
  search(text: String!): [SearchResult!]
  echo(input: EchoInput): String
  now: DateTime
}

type Mutation {
  setName(id: ID!, name: String!): User
}

interface Node {
  id: ID!
}

type User implements Node {
  id: ID!
  name: String!
  role: Role
  friends: [User!]
}

type Post implements Node {
  id: ID!
  title: String
  author: User
}

union SearchResult = User | Post

enum Role {
  ADMIN
  MEMBER
}

input EchoInput {
  text: String!
  times: Int = 1
  tags: [String!]
}

scalar DateTime

directive @auth(role: Role!) on FIELD | FIELD_DEFINITION
"#;

/// The shared schema most core tests run against.
pub(crate) fn test_schema() -> &'static Schema {
    static SCHEMA: OnceLock<Schema> = OnceLock::new();
    SCHEMA.get_or_init(|| {
        SchemaBuilder::new()
            .load_str(None, TEST_SDL)
            .and_then(SchemaBuilder::build)
            .expect("test schema builds")
    })
}

pub(crate) fn parse(query: &str) -> Document {
    gqlengine_parser::parse_executable(query).expect("query parses")
}

pub(crate) fn validate(document: &Document, max_depth: usize) -> ValidationOutcome<'static> {
    DefaultValidator.validate(test_schema(), document, max_depth)
}

/// Messages of the errors `rule` reported for `query`, in report order.
pub(crate) fn rule_errors(query: &str, rule: &str) -> Vec<String> {
    rule_errors_with_depth(query, rule, 0)
}

pub(crate) fn rule_errors_with_depth(query: &str, rule: &str, max_depth: usize) -> Vec<String> {
    let document = parse(query);
    validate(&document, max_depth)
        .errors
        .into_iter()
        .filter(|err| err.rule == Some(rule))
        .map(|err| err.message)
        .collect()
}

/// A query over `len` fragments where each one spreads the next twice, so
/// naive spread expansion visits the last fragment `2^(len-1)` times.
pub(crate) fn doubling_fragment_chain(len: usize) -> String {
    let mut query = String::from("{ user(id: 1) { ...F0 } }\n");
    for idx in 0..len {
        if idx + 1 == len {
            query.push_str(&format!("fragment F{idx} on User {{ id }}\n"));
        } else {
            let next = idx + 1;
            query.push_str(&format!("fragment F{idx} on User {{ id friends {{ ...F{next} ...F{next} }} }}\n"));
        }
    }
    query
}
