//! Star-rating feedback.

use crate::OutputFormat;
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_STARS: u8 = 1;
pub const MAX_STARS: u8 = 5;
pub const THANKS: &str = "Thanks for your feedback!";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRequest {
    pub stars: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FeedbackResponse {
    Acknowledged { stars: u8, message: &'static str },
    Rejected { reason: String },
}

/// Acknowledge a rating. Nothing is stored.
pub fn handle_feedback(request: FeedbackRequest) -> FeedbackResponse {
    if (MIN_STARS..=MAX_STARS).contains(&request.stars) {
        log::info!("Feedback received: {} stars", request.stars);
        FeedbackResponse::Acknowledged {
            stars: request.stars,
            message: THANKS,
        }
    } else {
        log::warn!("Rejected feedback rating {}", request.stars);
        FeedbackResponse::Rejected {
            reason: format!(
                "Rating must be between {} and {} stars, got {}",
                MIN_STARS, MAX_STARS, request.stars
            ),
        }
    }
}

impl fmt::Display for FeedbackResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FeedbackResponse::Acknowledged { stars, message } => {
                let filled = "*".repeat(usize::from(*stars));
                let empty = "-".repeat(usize::from(MAX_STARS - *stars));
                writeln!(f, "[{}{}] {}", filled, empty, message)
            }
            FeedbackResponse::Rejected { reason } => writeln!(f, "{}", reason),
        }
    }
}

pub fn run(stars: u8, format: OutputFormat) -> anyhow::Result<String> {
    let response = handle_feedback(FeedbackRequest { stars });
    Ok(match format {
        OutputFormat::Text => response.to_string(),
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&response)?;
            json.push('\n');
            json
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratings_in_range_are_acknowledged() {
        for stars in MIN_STARS..=MAX_STARS {
            assert_eq!(
                handle_feedback(FeedbackRequest { stars }),
                FeedbackResponse::Acknowledged {
                    stars,
                    message: THANKS
                }
            );
        }
    }

    #[test]
    fn ratings_out_of_range_are_rejected() {
        for stars in [0, 6, 255] {
            assert!(matches!(
                handle_feedback(FeedbackRequest { stars }),
                FeedbackResponse::Rejected { .. }
            ));
        }
    }

    #[test]
    fn text_and_json_output() {
        assert_eq!(
            run(3, OutputFormat::Text).unwrap(),
            "[***--] Thanks for your feedback!\n"
        );
        let json: serde_json::Value =
            serde_json::from_str(&run(0, OutputFormat::Json).unwrap()).unwrap();
        assert_eq!(json["status"], "rejected");
    }
}
