/// Uniform response envelope
///
/// Success and failure share one shape: `{"code": <status>, "data": ..., "msg": ...}`.
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Envelope<T: Serialize> {
    pub code: u16,
    pub data: Option<T>,
    pub msg: String,
}

impl Envelope<()> {
    pub fn failure(status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            code: status.as_u16(),
            data: None,
            msg: msg.into(),
        }
    }
}

/// 200 with a payload
pub fn success<T: Serialize>(data: T, msg: &str) -> HttpResponse {
    HttpResponse::Ok().json(Envelope {
        code: StatusCode::OK.as_u16(),
        data: Some(data),
        msg: msg.to_string(),
    })
}

/// 200 with `data: null`
pub fn success_empty(msg: &str) -> HttpResponse {
    HttpResponse::Ok().json(Envelope::<()> {
        code: StatusCode::OK.as_u16(),
        data: None,
        msg: msg.to_string(),
    })
}
