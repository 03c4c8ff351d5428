/// Background jobs
pub mod annotation;

pub use annotation::{
    create_annotation_queue, spawn_annotation_workers, AnnotationError, AnnotationJob,
    AnnotationOutcome, AnnotationQueue, AnnotationWorker, EVALUATION_PROMPT,
};
