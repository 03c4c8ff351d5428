/// HTTP handlers and route table
///
/// - Auth: register, login, current user
/// - Categories: CRUD
/// - Posts: create (with background AI annotation), edit, detail, paging,
///   like ranking, moderation
/// - Comments / likes on posts
/// - Assets: image upload and serving
/// - Admin: account management
pub mod assets;
pub mod auth;
pub mod categories;
pub mod comments;
pub mod likes;
pub mod posts;
pub mod users;

use crate::auth::JwtKeys;
use crate::error::AppError;
use crate::middleware::JwtAuthMiddleware;
use actix_web::web;
use std::sync::Arc;

/// Register every route. Shared by the server and the integration tests.
pub fn configure(cfg: &mut web::ServiceConfig, jwt: Arc<JwtKeys>) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::ValidationError(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::NotFound(err.to_string()).into()),
    )
    .service(
        web::scope("/api/auth")
            .route("/register", web::post().to(auth::register))
            .route("/login", web::post().to(auth::login))
            .service(
                web::resource("/info")
                    .wrap(JwtAuthMiddleware::new(jwt.clone()))
                    .route(web::get().to(auth::info)),
            ),
    )
    .service(
        web::scope("/categories")
            .service(
                web::resource("")
                    .route(web::post().to(categories::create_category))
                    .route(web::get().to(categories::list_categories)),
            )
            .service(
                web::resource("/{id}")
                    .route(web::put().to(categories::update_category))
                    .route(web::get().to(categories::show_category))
                    .route(web::delete().to(categories::delete_category)),
            ),
    )
    .service(
        web::scope("/posts")
            .wrap(JwtAuthMiddleware::new(jwt.clone()))
            .service(web::resource("").route(web::post().to(posts::create_post)))
            .route("/page/list", web::post().to(posts::page_list))
            .route("/rank", web::get().to(posts::like_rank))
            .route("/upload", web::post().to(assets::upload_image))
            .service(
                web::resource("/{id}")
                    .route(web::put().to(posts::update_post))
                    .route(web::get().to(posts::get_post))
                    .route(web::delete().to(posts::delete_post)),
            )
            .route("/{id}/like", web::post().to(likes::like_post))
            .route("/{id}/unlike", web::post().to(likes::unlike_post))
            .route("/{id}/isliked", web::get().to(likes::is_liked))
            .service(
                web::resource("/{id}/comments")
                    .route(web::post().to(comments::add_comment))
                    .route(web::get().to(comments::list_comments)),
            ),
    )
    .route("/user/{id}", web::get().to(posts::get_user_posts))
    .service(
        web::scope("/admin")
            .wrap(JwtAuthMiddleware::new(jwt))
            .service(
                web::resource("/users")
                    .route(web::post().to(users::create_user))
                    .route(web::get().to(users::list_users)),
            )
            .service(
                web::resource("/users/{id}")
                    .route(web::put().to(users::update_user))
                    .route(web::get().to(users::get_user))
                    .route(web::delete().to(users::delete_user)),
            )
            .route("/posts/{id}/approve", web::post().to(posts::approve_post)),
    )
    .route("/images/{filename}", web::get().to(assets::serve_image));
}
