use serde_core::ser::{SerializeSeq, SerializeStruct};
use serde_core::{Serialize, Serializer};

use crate::analysis::{PropertyDescriptor, TypeAnalyzer};
use crate::info::MethodDescriptor;

// -----------------------------------------------------------------------------
// Helpers

/// Serializes accessors as a list of their names.
struct MethodNames<'a>(&'a [&'static MethodDescriptor]);

impl Serialize for MethodNames<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(|method| method.name()))
    }
}

struct PropertyList<'a>(&'a [&'a PropertyDescriptor]);

impl Serialize for PropertyList<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_seq(Some(self.0.len()))?;
        for property in self.0 {
            state.serialize_element(*property)?;
        }
        state.end()
    }
}

// -----------------------------------------------------------------------------
// Serialize

impl Serialize for PropertyDescriptor {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Property", 7)?;
        state.serialize_field("name", self.name())?;
        state.serialize_field("declaring_type", self.declaring_type().type_path())?;
        state.serialize_field("field", &self.field().map(|field| field.name()))?;
        state.serialize_field("read_method", &self.read_method().map(MethodDescriptor::name))?;
        state.serialize_field("write_methods", &MethodNames(self.write_methods()))?;
        state.serialize_field("readable", &self.is_readable())?;
        state.serialize_field("writable", &self.is_writable())?;
        state.end()
    }
}

impl Serialize for TypeAnalyzer {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let properties = self.properties();
        let parent = self.parent().map(|parent| parent.descriptor().type_path());

        let mut state = serializer.serialize_struct("Analysis", 3)?;
        state.serialize_field("type", self.descriptor().type_path())?;
        state.serialize_field("parent", &parent)?;
        state.serialize_field("properties", &PropertyList(&properties))?;
        state.end()
    }
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use crate::analysis::AnalysisCache;
    use crate::info::Introspect;
    use crate::test_fixtures::{Counter, Entity, Gauge, Person, gauge};

    #[test]
    fn property_metadata() {
        let mut cache = AnalysisCache::new();
        let analyzer = cache.analyze_type::<Person>();
        let age = analyzer.property("age").unwrap();

        let value = serde_json::to_value(age).unwrap();
        assert_eq!(
            value,
            json!({
                "name": "age",
                "declaring_type": Person::type_descriptor().type_path(),
                "field": "age",
                "read_method": "getAge",
                "write_methods": ["setAge", "setAge"],
                "readable": true,
                "writable": true,
            }),
        );
    }

    #[test]
    fn analysis_metadata() {
        let mut cache = AnalysisCache::new();
        let analyzer = cache.analyze_type::<Person>();

        let value = serde_json::to_value(&*analyzer).unwrap();
        assert_eq!(value["type"], Person::type_descriptor().type_path());
        assert_eq!(value["parent"], Entity::type_descriptor().type_path());

        let names: Vec<&str> = value["properties"]
            .as_array()
            .unwrap()
            .iter()
            .filter_map(|p| p["name"].as_str())
            .collect();
        assert_eq!(names, ["URLPath", "active", "age", "id", "name", "revision", "tags"]);

        let revision = &value["properties"][5];
        assert_eq!(revision["declaring_type"], Entity::type_descriptor().type_path());
    }

    #[test]
    fn root_and_field_only() {
        let mut cache = AnalysisCache::new();
        let analyzer = cache.analyze_type::<Counter>();

        let value = serde_json::to_value(&*analyzer).unwrap();
        assert_eq!(value["parent"], Value::Null);
        assert_eq!(value["properties"][0]["read_method"], Value::Null);
        assert_eq!(value["properties"][0]["write_methods"], json!([]));
    }

    #[test]
    fn readable_matches_read_path() {
        let mut cache = AnalysisCache::new();
        let analyzer = cache.analyze_type::<Gauge>();
        let celsius = analyzer.property("celsius").unwrap();

        let value = serde_json::to_value(celsius).unwrap();
        assert_eq!(value["read_method"], "getCelsius");
        assert_eq!(value["readable"], true);
        assert!(analyzer.read(&gauge(), "celsius").is_ok());
    }
}
