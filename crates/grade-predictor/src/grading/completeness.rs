use std::collections::BTreeSet;

use super::domain::{ComponentId, GradingSchema};

/// True once every required component of `schema` has been supplied at least once.
/// The bonus and the free variable never block readiness.
pub fn is_ready_to_evaluate(schema: &GradingSchema, touched: &BTreeSet<ComponentId>) -> bool {
    missing_components(schema, touched).is_empty()
}

/// Required components not yet supplied, in schema order.
pub fn missing_components(
    schema: &GradingSchema,
    touched: &BTreeSet<ComponentId>,
) -> Vec<ComponentId> {
    schema
        .components()
        .iter()
        .copied()
        .filter(|id| !schema.is_optional(id) && !touched.contains(id))
        .collect()
}
