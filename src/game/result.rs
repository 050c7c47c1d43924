//! End-of-round form: star rating plus score upload.
//!
//! The submit control is disabled while an upload is in flight and comes
//! back on every outcome. A failed upload keeps label, score and rating so
//! the player can simply press submit again.

use crate::game::round::RoundEvent;
use crate::models::leaderboard::{ScoreSubmission, SubmitResult};

pub const MAX_STARS: u8 = 5;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("pick a star rating before submitting")]
    RatingRequired,
    #[error("rating must be 1-5, got {0}")]
    InvalidRating(u8),
    #[error("an upload is already in progress")]
    UploadInFlight,
}

#[derive(Debug, Clone)]
pub struct ResultForm {
    player_label: String,
    final_score: i64,
    rating: Option<u8>,
    uploading: bool,
    accepted_id: Option<i64>,
}

impl ResultForm {
    pub fn new(player_label: impl Into<String>, final_score: i64) -> Self {
        ResultForm {
            player_label: player_label.into(),
            final_score,
            rating: None,
            uploading: false,
            accepted_id: None,
        }
    }

    /// Builds the form from the controller's `Ended` event.
    pub fn from_event(event: &RoundEvent) -> Option<Self> {
        match event {
            RoundEvent::Ended {
                player_label,
                final_score,
            } => Some(ResultForm::new(player_label.clone(), *final_score)),
            _ => None,
        }
    }

    pub fn player_label(&self) -> &str {
        &self.player_label
    }

    pub fn final_score(&self) -> i64 {
        self.final_score
    }

    pub fn rating(&self) -> Option<u8> {
        self.rating
    }

    /// Stars lit in the widget: the first `rating` of them.
    pub fn stars(&self) -> [bool; MAX_STARS as usize] {
        let lit = self.rating.unwrap_or(0);
        std::array::from_fn(|i| (i as u8) < lit)
    }

    pub fn is_submit_enabled(&self) -> bool {
        !self.uploading
    }

    pub fn accepted_id(&self) -> Option<i64> {
        self.accepted_id
    }

    pub fn select_rating(&mut self, stars: u8) -> Result<(), FormError> {
        if !(1..=MAX_STARS).contains(&stars) {
            return Err(FormError::InvalidRating(stars));
        }
        self.rating = Some(stars);
        Ok(())
    }

    /// Disables the control and returns the request body to upload.
    pub fn begin_submit(&mut self) -> Result<ScoreSubmission, FormError> {
        if self.uploading {
            return Err(FormError::UploadInFlight);
        }
        let rating = self.rating.ok_or(FormError::RatingRequired)?;
        self.uploading = true;
        Ok(ScoreSubmission {
            player_name: Some(self.player_label.clone()),
            score: Some(self.final_score),
            rating: Some(i64::from(rating)),
        })
    }

    /// Re-enables the control whatever happened and hands the outcome back.
    pub fn finish_submit<E>(&mut self, outcome: Result<SubmitResult, E>) -> Result<i64, E> {
        self.uploading = false;
        let result = outcome?;
        self.accepted_id = Some(result.id);
        Ok(result.id)
    }
}
