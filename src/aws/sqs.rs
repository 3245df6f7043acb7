use crate::resource::Resource;
use crate::value::PropertyValue;

/// Attribute names usable with `Fn::GetAtt` on an SQS queue.
pub mod attributes {
    pub const QUEUE_ARN: &str = "QueueArn";
}

/// An `AWS::SQS::Queue` resource.
///
/// Every property accepts any [`PropertyValue`], so literals and intrinsic
/// expressions are interchangeable:
///
/// ```
/// use cfn_composer::aws::sqs::Queue;
/// use cfn_composer::{Intrinsic, Resource};
///
/// let queue: Resource = Queue::new()
///     .queue_name(Intrinsic::Sub {
///         template: "${AWS::StackName}-orders".to_string(),
///         variables: None,
///     })
///     .fifo_queue(false)
///     .into();
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Queue {
    pub content_based_deduplication: Option<PropertyValue>,
    pub delay_seconds: Option<PropertyValue>,
    pub fifo_queue: Option<PropertyValue>,
    pub maximum_message_size: Option<PropertyValue>,
    pub message_retention_period: Option<PropertyValue>,
    pub queue_name: Option<PropertyValue>,
    pub receive_message_wait_time_seconds: Option<PropertyValue>,
    pub redrive_policy: Option<PropertyValue>,
    pub visibility_timeout: Option<PropertyValue>,
}

impl Queue {
    pub fn new() -> Self {
        Queue::default()
    }

    pub fn content_based_deduplication(mut self, value: impl Into<PropertyValue>) -> Self {
        self.content_based_deduplication = Some(value.into());
        self
    }

    pub fn delay_seconds(mut self, value: impl Into<PropertyValue>) -> Self {
        self.delay_seconds = Some(value.into());
        self
    }

    pub fn fifo_queue(mut self, value: impl Into<PropertyValue>) -> Self {
        self.fifo_queue = Some(value.into());
        self
    }

    pub fn maximum_message_size(mut self, value: impl Into<PropertyValue>) -> Self {
        self.maximum_message_size = Some(value.into());
        self
    }

    pub fn message_retention_period(mut self, value: impl Into<PropertyValue>) -> Self {
        self.message_retention_period = Some(value.into());
        self
    }

    pub fn queue_name(mut self, value: impl Into<PropertyValue>) -> Self {
        self.queue_name = Some(value.into());
        self
    }

    pub fn receive_message_wait_time_seconds(mut self, value: impl Into<PropertyValue>) -> Self {
        self.receive_message_wait_time_seconds = Some(value.into());
        self
    }

    pub fn redrive_policy(mut self, value: impl Into<PropertyValue>) -> Self {
        self.redrive_policy = Some(value.into());
        self
    }

    pub fn visibility_timeout(mut self, value: impl Into<PropertyValue>) -> Self {
        self.visibility_timeout = Some(value.into());
        self
    }
}

impl From<Queue> for Resource {
    fn from(queue: Queue) -> Resource {
        let mut resource = Resource::new("SQS", "Queue");
        let properties = [
            ("ContentBasedDeduplication", queue.content_based_deduplication),
            ("DelaySeconds", queue.delay_seconds),
            ("FifoQueue", queue.fifo_queue),
            ("MaximumMessageSize", queue.maximum_message_size),
            ("MessageRetentionPeriod", queue.message_retention_period),
            ("QueueName", queue.queue_name),
            ("ReceiveMessageWaitTimeSeconds", queue.receive_message_wait_time_seconds),
            ("RedrivePolicy", queue.redrive_policy),
            ("VisibilityTimeout", queue.visibility_timeout),
        ];
        for (name, value) in properties {
            if let Some(value) = value {
                resource.set(name, value);
            }
        }
        resource
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unset_properties_are_not_declared() {
        let resource: Resource = Queue::new().queue_name("orders").into();
        assert_eq!(resource.service(), "SQS");
        assert_eq!(resource.shape(), "Queue");
        assert_eq!(resource.properties().len(), 1);
        assert_eq!(
            resource.properties()["QueueName"],
            PropertyValue::String("orders".to_string())
        );
    }

    #[test]
    fn test_property_order_matches_declaration() {
        let resource: Resource = Queue::new()
            .visibility_timeout(30)
            .queue_name("orders")
            .fifo_queue(true)
            .into();
        let names: Vec<&String> = resource.properties().keys().collect();
        assert_eq!(names, ["FifoQueue", "QueueName", "VisibilityTimeout"]);
    }
}
