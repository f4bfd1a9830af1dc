use std::sync::LazyLock;

use schemars::{JsonSchema, schema_for};
use serde_json::Value;
use travel_agent_model::ModelTool;

use super::ActionName;
use super::params::{
    BookFlightParams, BookHotelParams, SearchFlightsParams, SearchHotelsParams,
};

/// A catalog entry presented to the model.
#[derive(Clone, Debug, PartialEq)]
pub struct ActionDeclaration {
    /// Name of the action.
    pub name: ActionName,
    /// What the action does, in a few words.
    pub description: &'static str,
    /// JSON schema of the arguments.
    pub parameters: Value,
}

impl ActionDeclaration {
    /// Converts the declaration into the model protocol type.
    #[inline]
    pub fn to_model_tool(&self) -> ModelTool {
        ModelTool {
            name: self.name.as_str().to_owned(),
            description: self.description.to_owned(),
            parameters: self.parameters.clone(),
        }
    }
}

static CATALOG: LazyLock<Vec<ActionDeclaration>> = LazyLock::new(|| {
    ActionName::ALL.into_iter().map(declare).collect()
});

/// Returns every action the dialogue can dispatch, in catalog order.
///
/// The catalog is built once per process. It lists all actions whether or
/// not a handler is registered for them.
#[inline]
pub fn list_actions() -> &'static [ActionDeclaration] {
    &CATALOG
}

fn declare(name: ActionName) -> ActionDeclaration {
    // Keep descriptions short and literal, the model reads them verbatim.
    let (description, parameters) = match name {
        ActionName::SearchFlights => (
            "Search flights by creating an offer request and returning \
             the offers.",
            schema::<SearchFlightsParams>(),
        ),
        ActionName::BookFlight => (
            "Create an order from an offer_id (books the flight).",
            schema::<BookFlightParams>(),
        ),
        ActionName::SearchHotels => (
            "Search hotel offers in a city for the given dates.",
            schema::<SearchHotelsParams>(),
        ),
        ActionName::BookHotel => (
            "Book a hotel offer for a traveler.",
            schema::<BookHotelParams>(),
        ),
    };
    ActionDeclaration {
        name,
        description,
        parameters,
    }
}

#[inline]
fn schema<T: JsonSchema>() -> Value {
    schema_for!(T).to_value()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required(decl: &ActionDeclaration) -> Vec<&str> {
        let mut required: Vec<_> = decl.parameters["required"]
            .as_array()
            .map(|r| r.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default();
        required.sort_unstable();
        required
    }

    #[test]
    fn test_catalog_order() {
        let names: Vec<_> =
            list_actions().iter().map(|d| d.name.as_str()).collect();
        assert_eq!(
            names,
            ["search_flights", "book_flight", "search_hotels", "book_hotel"]
        );
        assert!(std::ptr::eq(list_actions(), list_actions()));
    }

    #[test]
    fn test_required_fields() {
        let catalog = list_actions();
        assert_eq!(required(&catalog[0]), ["passengers", "slices"]);
        assert_eq!(required(&catalog[1]), ["offer_id"]);
        assert_eq!(required(&catalog[2]), ["check_in", "check_out", "city"]);
        assert_eq!(required(&catalog[3]), ["offer_id", "payment", "traveler"]);
    }

    fn is_nullable(schema: &Value) -> bool {
        let null_type = match &schema["type"] {
            Value::String(ty) => ty == "null",
            Value::Array(types) => types.iter().any(|ty| ty == "null"),
            _ => false,
        };
        null_type
            || ["anyOf", "oneOf"].into_iter().any(|key| {
                schema[key]
                    .as_array()
                    .is_some_and(|variants| variants.iter().any(is_nullable))
            })
    }

    /// Returns the optional properties of `schema` and of every object it
    /// defines, paired with whether each is nullable.
    fn optional_properties(schema: &Value) -> Vec<(String, bool)> {
        let mut objects = vec![schema];
        if let Some(defs) = schema["$defs"].as_object() {
            objects.extend(defs.values());
        }

        let mut optional = vec![];
        for object in objects {
            let Some(properties) = object["properties"].as_object() else {
                continue;
            };
            let required = object["required"].as_array();
            for (name, property) in properties {
                let is_required = required.is_some_and(|r| {
                    r.iter().any(|field| field == name.as_str())
                });
                if !is_required {
                    optional.push((name.clone(), is_nullable(property)));
                }
            }
        }
        optional
    }

    #[test]
    fn test_optional_fields_are_nullable() {
        let mut seen = vec![];
        for decl in list_actions() {
            for (name, nullable) in optional_properties(&decl.parameters) {
                assert!(nullable, "{}: `{name}` is not nullable", decl.name);
                seen.push(name);
            }
        }
        for name in ["cabin_class", "max_connections", "passengers", "guests"]
        {
            assert!(seen.iter().any(|s| s == name), "{name} not checked");
        }
        // Nested passenger fields too.
        assert!(seen.iter().any(|s| s == "age"));
    }

    #[test]
    fn test_to_model_tool() {
        let tool = list_actions()[2].to_model_tool();
        assert_eq!(tool.name, "search_hotels");
        assert_eq!(tool.parameters["type"], "object");
    }
}
