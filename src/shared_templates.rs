/*! Helpers shared between the maud views. */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::Markup;

/// Render a maud template as an HTML response with the given status code.
#[inline]
pub fn render(status_code: StatusCode, template: Markup) -> Response {
    (status_code, template).into_response()
}
