use indexmap::IndexMap;

use crate::resource::Resource;
use crate::value::PropertyValue;

/// The root template describing a provisioned-infrastructure stack.
///
/// Sections are ordered maps keyed by logical name. Parameters, mappings,
/// conditions and outputs are opaque to the serializer -- they pass through
/// the generic value path. `resource_conditions` is a side table consulted
/// during assembly and never emitted as a section of its own; entries whose
/// key matches no resource are ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Template {
    pub format_version: Option<String>,
    pub transform: Option<String>,
    pub description: Option<String>,
    pub parameters: IndexMap<String, PropertyValue>,
    pub mappings: IndexMap<String, PropertyValue>,
    pub conditions: IndexMap<String, PropertyValue>,
    pub outputs: IndexMap<String, PropertyValue>,
    pub resources: IndexMap<String, Resource>,
    pub resource_conditions: IndexMap<String, String>,
}

impl Template {
    pub fn new() -> Self {
        Template::default()
    }

    pub fn add_resource(&mut self, name: impl Into<String>, resource: impl Into<Resource>) {
        self.resources.insert(name.into(), resource.into());
    }

    /// Adds a resource gated by a named condition from the `Conditions`
    /// section. The side-table entry is created together with the resource,
    /// so it always names a real resource.
    pub fn add_conditional_resource(
        &mut self,
        name: impl Into<String>,
        condition: impl Into<String>,
        resource: impl Into<Resource>,
    ) {
        let name = name.into();
        self.resource_conditions.insert(name.clone(), condition.into());
        self.resources.insert(name, resource.into());
    }

    pub fn add_parameter(&mut self, name: impl Into<String>, parameter: impl Into<PropertyValue>) {
        self.parameters.insert(name.into(), parameter.into());
    }

    pub fn add_mapping(&mut self, name: impl Into<String>, mapping: impl Into<PropertyValue>) {
        self.mappings.insert(name.into(), mapping.into());
    }

    pub fn add_condition(&mut self, name: impl Into<String>, condition: impl Into<PropertyValue>) {
        self.conditions.insert(name.into(), condition.into());
    }

    pub fn add_output(&mut self, name: impl Into<String>, output: impl Into<PropertyValue>) {
        self.outputs.insert(name.into(), output.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conditional_resource_keeps_side_table_in_sync() {
        let mut template = Template::new();
        template.add_conditional_resource("Backup", "IsProd", Resource::new("S3", "Bucket"));

        assert!(template.resources.contains_key("Backup"));
        assert_eq!(
            template.resource_conditions.get("Backup").map(String::as_str),
            Some("IsProd")
        );
    }

    #[test]
    fn test_resources_preserve_insertion_order() {
        let mut template = Template::new();
        template.add_resource("Zebra", Resource::new("SQS", "Queue"));
        template.add_resource("Apple", Resource::new("SQS", "Queue"));

        let names: Vec<&String> = template.resources.keys().collect();
        assert_eq!(names, ["Zebra", "Apple"]);
    }
}
