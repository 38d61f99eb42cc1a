pub mod annotation;
pub mod annotation_set;
pub mod text_range;

pub use annotation::Annotation;
pub use annotation_set::AnnotationSet;
pub use text_range::TextRange;
