pub mod annotation;
pub mod gene;

// re-export for cleaner imports
pub use self::annotation::{AnnotationOptions, AnnotationSet};
pub use self::gene::GeneRecord;
