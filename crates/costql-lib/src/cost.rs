//! Reading cost annotations off schema elements.
//!
//! Only the literal shape of the arguments is checked here. Names inside
//! `joins` are resolved once the whole type graph exists.

use costql_core::{Bounds, PartialBounds, Price, StepPricer, WorkType};
use costql_syntax::ast::{Directive, Value};
use indexmap::IndexMap;

use crate::config::EnvironmentConfig;
use crate::{Error, Result};

/// What an element itself declares, before inheritance and defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct DeclaredCost {
    pub free: bool,
    pub always: Option<bool>,
    pub shared: Option<bool>,
    pub cardinality: Option<Bounds>,
    pub pricing: Option<StepPricer>,
    pub joins: Option<Vec<JoinHint>>,
}

/// One entry of a `joins` argument, names still unresolved.
#[derive(Debug, Clone, Default, PartialEq)]
pub(crate) struct JoinHint {
    pub types: Option<Vec<String>>,
    pub auto_depth: u32,
    pub fields: Vec<String>,
    pub sub: Vec<JoinHint>,
}

impl DeclaredCost {
    fn free() -> Self {
        Self {
            free: true,
            cardinality: Some(Bounds::ALWAYS_1),
            pricing: Some(StepPricer::FREE),
            ..Self::default()
        }
    }

    pub(crate) fn parse<'a>(
        element: &str,
        directives: impl IntoIterator<Item = &'a Directive>,
        config: &EnvironmentConfig,
    ) -> Result<Self> {
        let mut free = false;
        let mut costs = Vec::new();
        for directive in directives {
            if directive.name == config.free_directive {
                free = true;
            } else if directive.name == config.cost_directive {
                costs.push(directive);
            }
        }

        if free && !costs.is_empty() {
            return Err(Error::ConflictingDirectives {
                element: element.to_owned(),
                free: config.free_directive.clone(),
                cost: config.cost_directive.clone(),
            });
        }
        if costs.len() > 1 {
            return Err(Error::DuplicateDirective {
                element: element.to_owned(),
                directive: config.cost_directive.clone(),
            });
        }
        if free {
            return Ok(Self::free());
        }
        match costs.first() {
            Some(directive) => Arguments { element, directive }.declared(),
            None => Ok(Self::default()),
        }
    }
}

struct Arguments<'a> {
    element: &'a str,
    directive: &'a Directive,
}

impl<'a> Arguments<'a> {
    fn declared(&self) -> Result<DeclaredCost> {
        let base = self.price("base")?;
        let unit = self.price("unit")?;
        let max_units_per_base = match self.get("maxUnitsPerBase") {
            Some(value) => Some(self.positive("maxUnitsPerBase", value)?),
            None => None,
        };
        // Prices the directive leaves out are free; defaults only fill elements without one.
        let pricing = Some(StepPricer::new(
            base.unwrap_or(Price::FREE),
            unit.unwrap_or(Price::FREE),
            max_units_per_base,
        ));

        let cardinality = match self.get("q") {
            Some(value) => bounds(self.element, "q", value)?,
            None => None,
        };
        let joins = match self.get("joins") {
            Some(value) => Some(join_hints(self.element, "joins", value)?),
            None => None,
        };

        Ok(DeclaredCost {
            free: false,
            always: self.flag("always")?,
            shared: self.flag("shared")?,
            cardinality,
            pricing,
            joins,
        })
    }

    /// Null counts as absent.
    fn get(&self, name: &str) -> Option<&'a Value> {
        self.directive.argument(name).filter(|v| !v.is_null())
    }

    fn flag(&self, name: &str) -> Result<Option<bool>> {
        let Some(value) = self.get(name) else {
            return Ok(None);
        };
        value
            .as_bool()
            .map(Some)
            .ok_or_else(|| invalid(self.element, name, "a boolean", value))
    }

    fn positive(&self, name: &str, value: &Value) -> Result<f64> {
        let n = number(self.element, name, value)?;
        if n > 0.0 {
            Ok(n)
        } else {
            Err(invalid(self.element, name, "a positive number", value))
        }
    }

    fn price(&self, name: &str) -> Result<Option<Price>> {
        match self.get(name) {
            Some(value) => price(self.element, name, value).map(Some),
            None => Ok(None),
        }
    }
}

fn invalid(element: &str, argument: &str, expected: &'static str, found: &Value) -> Error {
    Error::InvalidArgument {
        element: element.to_owned(),
        argument: argument.to_owned(),
        expected,
        found: found.kind_name(),
    }
}

fn object<'v>(element: &str, path: &str, value: &'v Value) -> Result<&'v IndexMap<String, Value>> {
    value
        .as_object()
        .ok_or_else(|| invalid(element, path, "an object", value))
}

fn member<'v>(fields: &'v IndexMap<String, Value>, key: &str) -> Option<&'v Value> {
    fields.get(key).filter(|v| !v.is_null())
}

fn number(element: &str, path: &str, value: &Value) -> Result<f64> {
    value
        .as_f64()
        .ok_or_else(|| invalid(element, path, "a number", value))
}

/// `{const | min, avg, p95, max}`, completed. `None` if too little is given.
fn bounds(element: &str, path: &str, value: &Value) -> Result<Option<Bounds>> {
    let fields = object(element, path, value)?;
    let point = |key: &str| -> Result<Option<f64>> {
        match member(fields, key) {
            Some(v) => number(element, &format!("{path}.{key}"), v).map(Some),
            None => Ok(None),
        }
    };
    let partial = PartialBounds {
        constant: point("const")?,
        min: point("min")?,
        avg: point("avg")?,
        p95: point("p95")?,
        max: point("max")?,
    };
    partial.complete().map_err(|e| Error::bounds(element, e))
}

/// A per-work-type object. Once given, instance access defaults to one.
fn price(element: &str, path: &str, value: &Value) -> Result<Price> {
    let fields = object(element, path, value)?;
    let mut price = Price::of(WorkType::InstanceAccess, Bounds::ALWAYS_1);
    for work in WorkType::ALL {
        let Some(slot) = member(fields, work.id()) else {
            continue;
        };
        if let Some(b) = bounds(element, &format!("{path}.{}", work.id()), slot)? {
            price = price.with(work, b);
        }
    }
    Ok(price)
}

fn join_hints(element: &str, path: &str, value: &Value) -> Result<Vec<JoinHint>> {
    match value {
        Value::List(items) => items
            .iter()
            .filter(|v| !v.is_null())
            .map(|v| join_hint(element, path, v))
            .collect(),
        single => Ok(vec![join_hint(element, path, single)?]),
    }
}

fn join_hint(element: &str, path: &str, value: &Value) -> Result<JoinHint> {
    let fields = object(element, path, value)?;

    let types = match member(fields, "types") {
        Some(v) => Some(names(element, &format!("{path}.types"), v)?),
        None => None,
    };
    let auto_depth = match member(fields, "autoDepth") {
        Some(v) => v
            .as_i64()
            .and_then(|depth| u32::try_from(depth).ok())
            .ok_or_else(|| {
                invalid(element, &format!("{path}.autoDepth"), "a non-negative int", v)
            })?,
        None => 0,
    };
    let field_names = match member(fields, "fields") {
        Some(v) => names(element, &format!("{path}.fields"), v)?,
        None => Vec::new(),
    };
    let sub = match member(fields, "sub") {
        Some(v) => join_hints(element, &format!("{path}.sub"), v)?,
        None => Vec::new(),
    };

    Ok(JoinHint {
        types,
        auto_depth,
        fields: field_names,
        sub,
    })
}

/// A list of strings; a lone string is a one-element list.
fn names(element: &str, path: &str, value: &Value) -> Result<Vec<String>> {
    let expected = "a list of strings";
    match value {
        Value::String(name) => Ok(vec![name.clone()]),
        Value::List(items) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_owned)
                    .ok_or_else(|| invalid(element, path, expected, item))
            })
            .collect(),
        other => Err(invalid(element, path, expected, other)),
    }
}
