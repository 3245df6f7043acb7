//! Build AWS CloudFormation templates as typed Rust values and serialize
//! them to template JSON.
//!
//! A [`Template`] holds ordered sections of parameters, mappings, conditions,
//! outputs and [`Resource`]s. Property values are open-ended bags that mix
//! literals with [`Intrinsic`] function expressions (`Ref`, `Fn::GetAtt`,
//! `Fn::If`, ...), and [`serialize`] renders the whole graph as the indented
//! JSON document CloudFormation consumes -- unset fields omitted, property
//! names normalized, sections in their canonical order.
//!
//! ```
//! use cfn_composer::{serialize, Intrinsic, Resource, Template};
//!
//! let mut template = Template::new();
//! template.add_resource(
//!     "MyQueue",
//!     Resource::new("SQS", "Queue").with("QueueName", "orders"),
//! );
//! template.add_output(
//!     "QueueArn",
//!     cfn_composer::PropertyValue::from_json(&serde_json::json!({
//!         "Value": { "Fn::GetAtt": ["MyQueue", "Arn"] }
//!     })),
//! );
//!
//! let json = serialize(&template).unwrap();
//! assert!(json.contains("\"Type\": \"AWS::SQS::Queue\""));
//! ```

pub mod aws;
mod errors;
mod intrinsics;
mod normalize;
mod resource;
mod serializer;
mod template;
mod value;

pub use errors::{Error, Result};
pub use intrinsics::Intrinsic;
pub use resource::Resource;
pub use serializer::{serialize, to_json};
pub use template::Template;
pub use value::PropertyValue;
