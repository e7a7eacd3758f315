//! Alert system for displaying error messages to users.
//!
//! Alerts are rendered as small dismissable partials that htmx swaps into the
//! page's alert container when a mutation endpoint responds with an error
//! status.

use maud::{Markup, html};

/// Alert message types for styling
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AlertType {
    Success,
    Error,
}

/// Renders alert messages with appropriate styling
pub struct AlertView<'a> {
    pub alert_type: AlertType,
    pub message: &'a str,
    pub details: &'a str,
}

impl<'a> AlertView<'a> {
    /// Create a new success alert
    #[allow(dead_code)]
    pub fn success(message: &'a str, details: &'a str) -> Self {
        Self {
            alert_type: AlertType::Success,
            message,
            details,
        }
    }

    /// Create a new error alert
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self {
            alert_type: AlertType::Error,
            message,
            details,
        }
    }

    pub fn into_markup(self) -> Markup {
        let container_style = match self.alert_type {
            AlertType::Success => {
                "flex items-start gap-3 p-4 mb-2 rounded-lg border shadow \
                text-green-800 border-green-300 bg-green-50 \
                dark:bg-gray-800 dark:text-green-300 dark:border-green-800"
            }
            AlertType::Error => {
                "flex items-start gap-3 p-4 mb-2 rounded-lg border shadow \
                text-red-800 border-red-300 bg-red-50 \
                dark:bg-gray-800 dark:text-red-300 dark:border-red-800"
            }
        };

        html! {
            div role="alert" class=(container_style)
            {
                div class="flex-1"
                {
                    p class="font-semibold" { (self.message) }

                    @if !self.details.is_empty() {
                        p class="text-sm" { (self.details) }
                    }
                }

                button
                    type="button"
                    class="font-bold cursor-pointer bg-transparent border-none"
                    aria-label="Dismiss"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "✕"
                }
            }
        }
    }
}
