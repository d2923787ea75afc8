//! HTTP inbound adapter exposing the board under `/api/v1`.

pub mod error;
pub mod events;
pub mod health;
pub mod schemas;
pub mod slots;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod users;
pub mod validation;
pub mod votes;

pub use error::ApiResult;

use actix_web::web;

/// Register every board endpoint plus extractor error handlers that
/// answer malformed bodies and query strings with `request_not_valid`.
///
/// ```
/// use actix_web::{web, App};
/// use rsboard::inbound::http::configure_api;
///
/// let _app = App::new().service(web::scope("/api/v1").configure(configure_api));
/// ```
pub fn configure_api(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(error::json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(error::query_error_handler))
        .service(events::list_events)
        .service(events::nominate_event)
        .service(events::get_event)
        .service(votes::cast_vote)
        .service(slots::buy_slot)
        .service(votes::list_vote_records)
        .service(users::register_user)
        .service(users::get_user)
        .service(users::delete_user);
}
