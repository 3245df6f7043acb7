/// Property names that would collide with reserved identifiers are written
/// with a single trailing underscore (`Type_`, `Condition_`). Serialization
/// strips that marker so the document carries the real CloudFormation name.
///
/// Only a lone trailing underscore is a marker: names ending in two or more
/// underscores pass through untouched, which keeps the transform idempotent.
pub(crate) fn normalize_property_name(name: &str) -> &str {
    if name.ends_with('_') && !name.ends_with("__") {
        &name[..name.len() - 1]
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strips_single_trailing_underscore() {
        assert_eq!(normalize_property_name("Type_"), "Type");
        assert_eq!(normalize_property_name("Condition_"), "Condition");
    }

    #[test]
    fn test_leaves_plain_names_alone() {
        assert_eq!(normalize_property_name("QueueName"), "QueueName");
        assert_eq!(normalize_property_name(""), "");
    }

    #[test]
    fn test_leaves_interior_underscores_alone() {
        assert_eq!(normalize_property_name("my_name"), "my_name");
    }

    #[test]
    fn test_double_trailing_underscore_is_not_a_marker() {
        assert_eq!(normalize_property_name("Name__"), "Name__");
    }

    #[test]
    fn test_idempotent() {
        let once = normalize_property_name("Type_");
        assert_eq!(normalize_property_name(once), once);
    }
}
