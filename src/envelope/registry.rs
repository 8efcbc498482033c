use std::any::TypeId;
use std::error::Error as StdError;

use serde::Serialize;
use serde_json::Value;

use crate::envelope::envelope_entries;

/// Module-path marker identifying codegen output. A registered type is only
/// treated as a generated-error container when its fully qualified type name
/// contains this marker.
pub const GENERATED_MARKER: &str = "::generated::";

type ProbeFn = Box<dyn Fn(&(dyn StdError + 'static)) -> Option<Value> + Send + Sync>;

struct RegisteredShape {
    type_id: TypeId,
    type_name: &'static str,
    probe: ProbeFn,
}

/// Registry of concrete generated-error container types.
///
/// Generated types are produced by an external codegen pipeline, so exact
/// type identity cannot be assumed by the classifier. Instead, callers
/// register each container type once and the registry answers capability
/// queries: "does this error value downcast to a registered container whose
/// serialized shape carries a sequence of sub-errors?". New generated shapes
/// are added by registration alone, without touching the classifier.
pub struct EnvelopeRegistry {
    marker: &'static str,
    shapes: Vec<RegisteredShape>,
}

impl Default for EnvelopeRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl EnvelopeRegistry {
    pub fn new() -> Self {
        Self::with_marker(GENERATED_MARKER)
    }

    /// A registry recognizing a different generated-code namespace marker.
    pub fn with_marker(marker: &'static str) -> Self {
        Self {
            marker,
            shapes: Vec::new(),
        }
    }

    /// Registers `T` as a candidate generated-error container. Registering
    /// the same type twice is a no-op.
    pub fn register<T>(&mut self)
    where
        T: StdError + Serialize + Send + Sync + 'static,
    {
        let type_id = TypeId::of::<T>();
        if self.shapes.iter().any(|shape| shape.type_id == type_id) {
            return;
        }

        self.shapes.push(RegisteredShape {
            type_id,
            type_name: std::any::type_name::<T>(),
            probe: Box::new(|err| {
                // unwrap exactly one level of single-owner indirection;
                // deeper nesting stays opaque
                let concrete = err
                    .downcast_ref::<T>()
                    .or_else(|| err.downcast_ref::<Box<T>>().map(|boxed| boxed.as_ref()))?;
                serde_json::to_value(concrete).ok()
            }),
        });
    }

    /// Decides whether `err` is a generated-error container and, when it is,
    /// returns its serialized shape for extraction.
    ///
    /// Acceptance requires, in order: a registered probe matching the
    /// concrete type, the type's module path carrying the generated-code
    /// marker, and the serialized shape holding an `errors` sequence.
    /// Detection never fails — any ambiguity resolves to `None`, sending the
    /// caller down the most restrictive (unknown-error) path.
    pub fn detect(&self, err: &(dyn StdError + 'static)) -> Option<Value> {
        for shape in &self.shapes {
            if !shape.type_name.contains(self.marker) {
                continue;
            }
            let Some(value) = (shape.probe)(err) else {
                continue;
            };
            if envelope_entries(&value).is_some() {
                return Some(value);
            }
        }
        None
    }
}

#[cfg(test)]
#[expect(clippy::unwrap_used, reason = "test assertions")]
mod tests {
    use super::EnvelopeRegistry;
    use std::error::Error as StdError;

    mod generated {
        #[derive(Debug, thiserror::Error, serde::Serialize)]
        #[error("list orders failed")]
        pub struct ListOrdersError {
            pub errors: Vec<Option<Entry>>,
        }

        #[derive(Debug, serde::Serialize)]
        pub struct Entry {
            pub title: Option<String>,
            pub detail: Option<String>,
            pub id: Option<String>,
            pub code: Option<String>,
        }

        #[derive(Debug, thiserror::Error, serde::Serialize)]
        #[error("errors is not a sequence")]
        pub struct ScalarErrorsField {
            pub errors: String,
        }
    }

    // same shape as the generated container, but not from a generated-code module
    #[derive(Debug, thiserror::Error, serde::Serialize)]
    #[error("lookalike")]
    struct LookalikeError {
        errors: Vec<String>,
    }

    fn container() -> generated::ListOrdersError {
        generated::ListOrdersError {
            errors: vec![Some(generated::Entry {
                title: Some("bad order".to_string()),
                detail: None,
                id: None,
                code: None,
            })],
        }
    }

    fn registry() -> EnvelopeRegistry {
        let mut registry = EnvelopeRegistry::new();
        registry.register::<generated::ListOrdersError>();
        registry.register::<generated::ScalarErrorsField>();
        registry.register::<LookalikeError>();
        registry
    }

    #[test]
    fn detects_a_registered_generated_container() {
        let err = container();
        let shape = registry().detect(&err).unwrap();
        assert!(shape.get("errors").unwrap().is_array());
    }

    #[test]
    fn unwraps_one_level_of_box_indirection() {
        let boxed: Box<generated::ListOrdersError> = Box::new(container());
        assert!(registry().detect(&boxed).is_some());

        let nested: Box<Box<generated::ListOrdersError>> = Box::new(Box::new(container()));
        let nested: &(dyn StdError + 'static) = &nested;
        assert!(registry().detect(nested).is_none());
    }

    #[test]
    fn rejects_types_outside_the_generated_namespace() {
        let err = LookalikeError {
            errors: vec!["still no".to_string()],
        };
        assert!(registry().detect(&err).is_none());
    }

    #[test]
    fn rejects_a_scalar_errors_field() {
        let err = generated::ScalarErrorsField {
            errors: "not a sequence".to_string(),
        };
        assert!(registry().detect(&err).is_none());
    }

    #[test]
    fn rejects_unregistered_types() {
        #[derive(Debug, thiserror::Error)]
        #[error("unregistered")]
        struct Unregistered;

        assert!(registry().detect(&Unregistered).is_none());
    }

    #[test]
    fn duplicate_registration_is_a_noop() {
        let mut registry = EnvelopeRegistry::new();
        registry.register::<generated::ListOrdersError>();
        registry.register::<generated::ListOrdersError>();

        let err = container();
        assert!(registry.detect(&err).is_some());
    }

    #[test]
    fn custom_marker_changes_what_counts_as_generated() {
        let mut registry = EnvelopeRegistry::with_marker("::tests::");
        registry.register::<LookalikeError>();

        let err = LookalikeError {
            errors: vec!["now accepted".to_string()],
        };
        assert!(registry.detect(&err).is_some());
    }
}
