/// Background annotation of newly created posts
///
/// Post creation submits an `AnnotationJob` and returns immediately. A
/// dispatcher task drains the bounded queue and runs each job on its own task,
/// with at most `concurrency` jobs in flight. A job either stores one comment
/// authored by the system author or logs why it did not. Nothing is retried and
/// no failure reaches the client that created the post.
use crate::error::AppError;
use crate::models::{Comment, SYSTEM_AUTHOR_NAME};
use crate::repository::ContentRepository;
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::sync::Semaphore;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};
use uuid::Uuid;
use vision_client::{ImageCommentator, VisionError};

/// Instruction sent with every image
pub const EVALUATION_PROMPT: &str = "You are an art teacher reviewing a drawing made by a child. \
Evaluate the drawing in three parts. Content: what the drawing shows and how clearly the idea comes across. \
Composition: how the elements are arranged on the page and how the space is used. \
Technique: line work, colour and shading. \
For each part point out what is done well and what falls short, then finish with concrete, \
encouraging suggestions the child can use to improve the next drawing.";

#[derive(Debug, Clone)]
pub struct AnnotationJob {
    pub post_id: Uuid,
    /// Image filename in the asset store
    pub image_key: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AnnotationError {
    #[error("failed to ensure system author: {0}")]
    SystemAuthor(#[source] AppError),

    #[error(transparent)]
    Vision(#[from] VisionError),

    #[error("failed to save comment: {0}")]
    SaveComment(#[source] AppError),
}

impl AnnotationError {
    /// Failure class used in log entries
    pub fn kind(&self) -> &'static str {
        match self {
            AnnotationError::SystemAuthor(_) | AnnotationError::SaveComment(_) => {
                "PersistenceError"
            }
            AnnotationError::Vision(err) => err.kind(),
        }
    }
}

/// Result of running one job
pub type AnnotationOutcome = std::result::Result<Comment, AnnotationError>;

/// Producer side of the annotation queue
#[derive(Clone)]
pub struct AnnotationQueue {
    sender: mpsc::Sender<AnnotationJob>,
}

impl AnnotationQueue {
    /// Enqueue without waiting.
    ///
    /// Returns false when the job was dropped because the queue is full or
    /// already shut down.
    pub fn submit(&self, job: AnnotationJob) -> bool {
        match self.sender.try_send(job) {
            Ok(()) => true,
            Err(TrySendError::Full(job)) => {
                warn!(post_id = %job.post_id, "Annotation queue full; dropping job");
                false
            }
            Err(TrySendError::Closed(job)) => {
                warn!(post_id = %job.post_id, "Annotation queue closed; dropping job");
                false
            }
        }
    }
}

pub type AnnotationReceiver = mpsc::Receiver<AnnotationJob>;

/// Create a bounded annotation queue
pub fn create_annotation_queue(capacity: usize) -> (AnnotationQueue, AnnotationReceiver) {
    let (sender, receiver) = mpsc::channel(capacity.max(1));
    (AnnotationQueue { sender }, receiver)
}

/// Runs annotation jobs against the repository and a commentator
pub struct AnnotationWorker {
    repo: Arc<dyn ContentRepository>,
    commentator: Arc<dyn ImageCommentator>,
    prompt: String,
}

impl AnnotationWorker {
    pub fn new(repo: Arc<dyn ContentRepository>, commentator: Arc<dyn ImageCommentator>) -> Self {
        Self {
            repo,
            commentator,
            prompt: EVALUATION_PROMPT.to_string(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    /// Lookup-or-create the system author, ask for commentary, store it.
    /// Stops at the first failure.
    pub async fn annotate(&self, job: &AnnotationJob) -> AnnotationOutcome {
        let author = self
            .repo
            .find_or_create_system_author(SYSTEM_AUTHOR_NAME)
            .await
            .map_err(AnnotationError::SystemAuthor)?;

        let text = self
            .commentator
            .comment_on_image(&job.image_key, &self.prompt)
            .await?;

        self.repo
            .create_comment(job.post_id, author.id, &text)
            .await
            .map_err(AnnotationError::SaveComment)
    }

    /// Run a job and log its outcome
    pub async fn handle(&self, job: AnnotationJob) -> AnnotationOutcome {
        debug!(post_id = %job.post_id, image = %job.image_key, "Annotating post");

        let outcome = self.annotate(&job).await;
        match &outcome {
            Ok(comment) => {
                info!(
                    post_id = %job.post_id,
                    comment_id = %comment.id,
                    "AI comment saved"
                );
            }
            Err(AnnotationError::Vision(VisionError::EmptyResponse)) => {
                warn!(
                    post_id = %job.post_id,
                    kind = "EmptyResponse",
                    "Vision provider returned no commentary; skipping AI comment"
                );
            }
            Err(e) => {
                error!(
                    post_id = %job.post_id,
                    kind = e.kind(),
                    error = %e,
                    "Failed to annotate post"
                );
            }
        }

        outcome
    }
}

/// Spawn the dispatcher for the annotation queue.
///
/// Each job runs on its own task so jobs interleave freely. When every
/// `AnnotationQueue` handle is dropped the dispatcher waits for in-flight jobs
/// and exits.
pub fn spawn_annotation_workers(
    worker: Arc<AnnotationWorker>,
    mut receiver: AnnotationReceiver,
    concurrency: usize,
) -> JoinHandle<()> {
    let concurrency = concurrency.max(1);

    tokio::spawn(async move {
        info!(concurrency, "Annotation workers started");
        let permits = Arc::new(Semaphore::new(concurrency));

        while let Some(job) = receiver.recv().await {
            let permit = match permits.clone().acquire_owned().await {
                Ok(permit) => permit,
                Err(_) => break,
            };

            let worker = worker.clone();
            tokio::spawn(async move {
                let _ = worker.handle(job).await;
                drop(permit);
            });
        }

        // Every permit back means every in-flight job finished
        if let Ok(all) = permits.acquire_many(concurrency as u32).await {
            drop(all);
        }
        info!("Annotation workers stopped (queue closed)");
    })
}
