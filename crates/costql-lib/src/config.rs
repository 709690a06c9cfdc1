//! Directive names and their schema definitions.

pub const DEFAULT_COST_DIRECTIVE: &str = "costql";
pub const DEFAULT_FREE_DIRECTIVE: &str = "costqlFree";
pub const DEFAULT_RESOURCE_DIRECTIVE: &str = "costqlResource";

/// Definitions of the cost directives under their default names.
///
/// Prepend this to a schema so that other GraphQL tooling accepts the
/// annotations. The environment does not need it.
pub const DIRECTIVES_SDL: &str = r#"
directive @costql(
  always: Boolean
  shared: Boolean
  q: CostqlBounds
  base: CostqlPrice
  unit: CostqlPrice
  maxUnitsPerBase: Float
  joins: [CostqlJoin!]
) on OBJECT | INTERFACE | UNION | SCALAR | ENUM | FIELD_DEFINITION

directive @costqlFree on OBJECT | INTERFACE | UNION | SCALAR | ENUM | FIELD_DEFINITION

directive @costqlResource on OBJECT | INTERFACE | UNION

input CostqlBounds {
  const: Float
  min: Float
  avg: Float
  p95: Float
  max: Float
}

input CostqlPrice {
  access: CostqlBounds
  trivial: CostqlBounds
  local: CostqlBounds
  join: CostqlBounds
  fast: CostqlBounds
  slow: CostqlBounds
}

input CostqlJoin {
  types: [String!]
  autoDepth: Int
  fields: [String!]
  sub: [CostqlJoin!]
}
"#;

/// Names under which the cost annotations are recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvironmentConfig {
    pub cost_directive: String,
    pub free_directive: String,
    pub resource_directive: String,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            cost_directive: DEFAULT_COST_DIRECTIVE.to_owned(),
            free_directive: DEFAULT_FREE_DIRECTIVE.to_owned(),
            resource_directive: DEFAULT_RESOURCE_DIRECTIVE.to_owned(),
        }
    }
}
