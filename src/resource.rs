use indexmap::IndexMap;

use crate::errors::{Error, Result};
use crate::value::PropertyValue;

/// One declared infrastructure object.
///
/// A resource is identified by its originating AWS service (`"SQS"`) and its
/// concrete shape name (`"Queue"`); together they produce the document's
/// `Type` string. Everything else is an open-ended ordered property bag --
/// the serializer treats resources as read-only data and never mutates them.
#[derive(Debug, Clone, PartialEq)]
pub struct Resource {
    service: String,
    shape: String,
    properties: IndexMap<String, PropertyValue>,
}

impl Resource {
    pub fn new(service: impl Into<String>, shape: impl Into<String>) -> Self {
        Resource {
            service: service.into(),
            shape: shape.into(),
            properties: IndexMap::new(),
        }
    }

    /// Builder-style property setter.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<PropertyValue>) {
        self.properties.insert(name.into(), value.into());
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    pub fn shape(&self) -> &str {
        &self.shape
    }

    pub fn properties(&self) -> &IndexMap<String, PropertyValue> {
        &self.properties
    }

    /// The CloudFormation `Type` string, `AWS::<Service>::<Shape>`.
    ///
    /// `logical_name` is only used to label the error when the declared
    /// identity is malformed (empty part, or a part embedding the `::`
    /// separator).
    pub(crate) fn type_name(&self, logical_name: &str) -> Result<String> {
        for (part, label) in [(&self.service, "service"), (&self.shape, "shape")] {
            if part.is_empty() {
                return Err(Error::MalformedResourceType {
                    name: logical_name.to_string(),
                    reason: format!("{} name is empty", label),
                });
            }
            if part.contains("::") {
                return Err(Error::MalformedResourceType {
                    name: logical_name.to_string(),
                    reason: format!("{} name \"{}\" contains \"::\"", label, part),
                });
            }
        }
        Ok(format!("AWS::{}::{}", self.service, self.shape))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_name() {
        let queue = Resource::new("SQS", "Queue");
        assert_eq!(queue.type_name("MyQueue").unwrap(), "AWS::SQS::Queue");
    }

    #[test]
    fn test_type_name_empty_service() {
        let broken = Resource::new("", "Queue");
        let err = broken.type_name("MyQueue").unwrap_err();
        assert!(err.to_string().contains("MyQueue"));
        assert!(err.to_string().contains("service"));
    }

    #[test]
    fn test_type_name_embedded_separator() {
        let broken = Resource::new("SQS::Extra", "Queue");
        assert!(broken.type_name("MyQueue").is_err());
    }

    #[test]
    fn test_properties_preserve_insertion_order() {
        let resource = Resource::new("S3", "Bucket")
            .with("BucketName", "logs")
            .with("AccessControl", "Private");
        let names: Vec<&String> = resource.properties().keys().collect();
        assert_eq!(names, ["BucketName", "AccessControl"]);
    }
}
