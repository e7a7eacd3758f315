use axum::{
    http::StatusCode,
    response::Response,
};

use crate::{html::error_view, shared_templates::render};

pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

pub fn get_404_not_found_response() -> Response {
    render(
        StatusCode::NOT_FOUND,
        error_view(
            "Page Not Found",
            "404",
            "Sorry, we could not find that page.",
            "Check the address for typos, or head back to your transactions.",
        ),
    )
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;

    use super::get_404_not_found;

    #[tokio::test]
    async fn responds_with_not_found_status() {
        let response = get_404_not_found().await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
