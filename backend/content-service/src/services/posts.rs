/// Post service - handles post creation, retrieval, and management
use crate::error::{AppError, Result};
use crate::jobs::{AnnotationJob, AnnotationQueue};
use crate::models::{
    NewPost, Post, PostDetail, PostPage, PostStatus, PostUpdate, RankPage, RankedPost, UserDto,
};
use crate::repository::ContentRepository;
use crate::services::paging::PageWindow;
use std::sync::Arc;
use uuid::Uuid;

pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Fields supplied by the author, already validated
#[derive(Debug, Clone)]
pub struct PostInput {
    pub category_name: String,
    pub title: String,
    pub head_img: String,
    pub content: String,
}

pub struct PostService {
    repo: Arc<dyn ContentRepository>,
    annotations: Option<AnnotationQueue>,
}

impl PostService {
    pub fn new(repo: Arc<dyn ContentRepository>) -> Self {
        Self {
            repo,
            annotations: None,
        }
    }

    pub fn with_annotations(repo: Arc<dyn ContentRepository>, annotations: Option<AnnotationQueue>) -> Self {
        Self { repo, annotations }
    }

    async fn category_id(&self, name: &str) -> Result<Uuid> {
        self.repo
            .find_category_by_name(name)
            .await?
            .map(|category| category.id)
            .ok_or(AppError::CategoryNotFound)
    }

    async fn existing_post(&self, post_id: Uuid) -> Result<Post> {
        self.repo
            .find_post(post_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Post does not exist".to_string()))
    }

    /// Create a post in `Pending` and schedule its AI annotation.
    ///
    /// The job is queued only after the insert returns; annotation never
    /// affects the result of this call.
    pub async fn create_post(&self, user_id: Uuid, input: PostInput) -> Result<Post> {
        let category_id = self.category_id(&input.category_name).await?;

        let post = self
            .repo
            .create_post(NewPost {
                user_id,
                category_id,
                title: input.title,
                head_img: input.head_img,
                content: input.content,
            })
            .await?;

        tracing::info!(post_id = %post.id, user_id = %user_id, "post created");

        match &self.annotations {
            Some(queue) if !post.head_img.trim().is_empty() => {
                queue.submit(AnnotationJob {
                    post_id: post.id,
                    image_key: post.head_img.clone(),
                });
            }
            Some(_) => {
                tracing::debug!(post_id = %post.id, "post has no image; skipping annotation");
            }
            None => {
                tracing::debug!(post_id = %post.id, "annotation disabled");
            }
        }

        Ok(post)
    }

    /// Update a post; only its author or an admin may do so
    pub async fn update_post(
        &self,
        post_id: Uuid,
        actor_id: Uuid,
        actor_is_admin: bool,
        input: PostInput,
    ) -> Result<Post> {
        let category_id = self.category_id(&input.category_name).await?;
        let post = self.existing_post(post_id).await?;

        if post.user_id != actor_id && !actor_is_admin {
            return Err(AppError::Forbidden(
                "Only author and admin can edit posts".to_string(),
            ));
        }

        self.repo
            .update_post(
                post_id,
                PostUpdate {
                    category_id,
                    title: input.title,
                    head_img: input.head_img,
                    content: input.content,
                },
            )
            .await?
            .ok_or_else(|| AppError::NotFound("Post does not exist".to_string()))
    }

    /// Post with category, author, comments and like count
    pub async fn get_post_detail(&self, post_id: Uuid) -> Result<PostDetail> {
        let post = self.existing_post(post_id).await?;

        let category = self.repo.find_category_by_id(post.category_id).await?;
        let author = self
            .repo
            .find_user_by_id(post.user_id)
            .await?
            .as_ref()
            .map(UserDto::from);
        let comments = self.repo.list_comments(post_id).await?;
        let like_count = self.repo.count_likes(post_id).await?;

        Ok(PostDetail {
            post,
            category,
            author,
            comments,
            like_count,
        })
    }

    /// Delete a post; only its author or an admin may do so
    pub async fn delete_post(&self, post_id: Uuid, actor_id: Uuid, actor_is_admin: bool) -> Result<Post> {
        let post = self.existing_post(post_id).await?;

        if post.user_id != actor_id && !actor_is_admin {
            return Err(AppError::Forbidden(
                "Post does not belong to you, access denied".to_string(),
            ));
        }

        self.repo.delete_post(post_id).await?;
        tracing::info!(post_id = %post_id, "post deleted");

        Ok(post)
    }

    /// Newest-first page; `page_num` starts at 1
    pub async fn page(&self, page_num: i64, page_size: i64) -> Result<PostPage> {
        let window = PageWindow::new(page_num, page_size)?;

        let data = self.repo.list_posts(window.page_size, window.offset).await?;
        let total = self.repo.count_posts().await?;

        Ok(PostPage { data, total })
    }

    /// Posts ordered by like count; `rank` continues across pages
    pub async fn like_rank(&self, page_num: i64, page_size: i64) -> Result<RankPage> {
        let window = PageWindow::new(page_num, page_size)?;

        let data = self
            .repo
            .list_posts_by_likes(window.page_size, window.offset)
            .await?
            .into_iter()
            .enumerate()
            .map(|(index, row)| RankedPost {
                post: row.post,
                like_count: row.like_count,
                rank: window.position(index),
            })
            .collect();
        let total = self.repo.count_posts().await?;

        Ok(RankPage { data, total })
    }

    pub async fn user_posts(&self, user_id: Uuid) -> Result<Vec<Post>> {
        self.repo.list_user_posts(user_id).await
    }

    /// Moderation: Pending -> Approved
    pub async fn approve(&self, post_id: Uuid) -> Result<Post> {
        let post = self
            .repo
            .set_post_status(post_id, PostStatus::Approved)
            .await?
            .ok_or_else(|| AppError::NotFound("Post does not exist".to_string()))?;

        tracing::info!(post_id = %post_id, "post approved");
        Ok(post)
    }
}
