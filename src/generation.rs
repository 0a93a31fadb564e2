//! Optional text and image generation
//!
//! Generation services are reached through the [`TextGenerator`] and
//! [`ImageGenerator`] ports. Every helper here degrades to a deterministic
//! result when the service fails: canned text, or no images at all.

use async_trait::async_trait;
use futures_util::future::join_all;
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    config::Mode,
    constants::generation::{IMAGE_ATTEMPTS, IMAGE_PAYLOAD_PREFIX, MAX_MESSAGE_LENGTH},
};

/// Failures of a generation request
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The service could not be reached or refused the request
    #[error("generation service unavailable: {0}")]
    Unavailable(String),
    /// The service answered with nothing usable
    #[error("generated response was empty")]
    Empty,
    /// The answer was longer than a spoken message should be
    #[error("generated response was too long")]
    TooLong,
    /// An image payload was not an inline image
    #[error("generated payload is not an image")]
    NotAnImage,
}

/// Completes a short text prompt
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Returns the raw completion for `prompt`
    async fn complete(&self, prompt: &str) -> Result<String, Error>;
}

/// Produces an inline image for a prompt
#[async_trait]
pub trait ImageGenerator: Send + Sync {
    /// Returns one image as a data URI
    async fn generate(&self, prompt: &str) -> Result<String, Error>;
}

/// Trims a completion and strips wrapping quotes
///
/// # Errors
///
/// * `Error::Empty` - Nothing is left after cleaning
/// * `Error::TooLong` - The text exceeds the accepted message length
pub fn sanitize(raw: &str) -> Result<String, Error> {
    let text = raw
        .trim()
        .trim_matches(|c| matches!(c, '"' | '\'' | '“' | '”' | '«' | '»'))
        .trim();
    if text.is_empty() {
        return Err(Error::Empty);
    }
    if text.chars().count() > MAX_MESSAGE_LENGTH {
        return Err(Error::TooLong);
    }
    Ok(text.to_owned())
}

/// Message used when no praise could be generated
pub fn fallback_praise(name: &str) -> String {
    format!("Congratulations, {name}! You won!")
}

/// Message used when no category introduction could be generated
pub fn fallback_intro(category: &str) -> String {
    format!("The category is {category}. Get ready to draw!")
}

async fn complete_or(generator: &dyn TextGenerator, prompt: &str, fallback: String) -> String {
    match generator.complete(prompt).await.and_then(|raw| sanitize(&raw)) {
        Ok(text) => text,
        Err(error) => {
            warn!(%error, "text generation failed, using fallback");
            fallback
        }
    }
}

/// A short message celebrating the winner
///
/// Falls back to [`fallback_praise`] on any failure.
pub async fn winner_praise(
    generator: &dyn TextGenerator,
    name: &str,
    score: u64,
    mode: Mode,
) -> String {
    let noun = mode.vocabulary().singular;
    let prompt = format!(
        "Write one short, cheerful sentence congratulating the {noun} \"{name}\" \
         for winning a drawing game with {score} points."
    );
    complete_or(generator, &prompt, fallback_praise(name)).await
}

/// A short line introducing the category the wheel landed on
///
/// Falls back to [`fallback_intro`] on any failure.
pub async fn category_intro(generator: &dyn TextGenerator, category: &str) -> String {
    let prompt = format!(
        "Write one short, playful sentence announcing that the next word to draw \
         belongs to the category \"{category}\". Do not reveal any word."
    );
    complete_or(generator, &prompt, fallback_intro(category)).await
}

fn image_prompt(word: &str) -> String {
    format!("A simple black line drawing of \"{word}\" on a white background, easy to copy")
}

/// Requests several reference drawings of `word` at once
///
/// Failed requests and payloads that are not inline images are dropped, so
/// the result may be empty.
pub async fn reference_images(generator: &dyn ImageGenerator, word: &str) -> Vec<String> {
    let prompt = image_prompt(word);
    let results = join_all((0..IMAGE_ATTEMPTS).map(|_| generator.generate(&prompt))).await;

    let images: Vec<String> = results
        .into_iter()
        .filter_map(|result| {
            result
                .and_then(|payload| {
                    if payload.starts_with(IMAGE_PAYLOAD_PREFIX) {
                        Ok(payload)
                    } else {
                        Err(Error::NotAnImage)
                    }
                })
                .map_err(|error| warn!(%error, "dropping image result"))
                .ok()
        })
        .collect();

    debug!(word, count = images.len(), "reference images generated");
    images
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use std::sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    use super::*;

    struct Fixed(Result<String, Error>);

    #[async_trait]
    impl TextGenerator for Fixed {
        async fn complete(&self, _prompt: &str) -> Result<String, Error> {
            self.0.clone()
        }
    }

    struct Recording {
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl TextGenerator for Recording {
        async fn complete(&self, prompt: &str) -> Result<String, Error> {
            self.prompts.lock().unwrap().push(prompt.to_owned());
            Ok("  \"Bravo!\"  ".to_owned())
        }
    }

    struct Cycling {
        calls: AtomicUsize,
        answers: Vec<Result<String, Error>>,
    }

    #[async_trait]
    impl ImageGenerator for Cycling {
        async fn generate(&self, _prompt: &str) -> Result<String, Error> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            self.answers[call % self.answers.len()].clone()
        }
    }

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize("  \"Well done!\" ").unwrap(), "Well done!");
        assert_eq!(sanitize("“¡Bien!”").unwrap(), "¡Bien!");
        assert_eq!(sanitize(" \"\" "), Err(Error::Empty));
        assert_eq!(
            sanitize(&"a".repeat(MAX_MESSAGE_LENGTH + 1)),
            Err(Error::TooLong)
        );
    }

    #[tokio::test]
    async fn test_praise_uses_generated_text() {
        let generator = Recording {
            prompts: Mutex::new(Vec::new()),
        };
        let praise = winner_praise(&generator, "Rojos", 10, Mode::Teams).await;
        assert_eq!(praise, "Bravo!");

        let prompts = generator.prompts.lock().unwrap();
        assert!(prompts[0].contains("team \"Rojos\""));
        assert!(prompts[0].contains("10 points"));
    }

    #[tokio::test]
    async fn test_praise_falls_back_on_failure() {
        let failing = Fixed(Err(Error::Unavailable("offline".to_owned())));
        assert_eq!(
            winner_praise(&failing, "Ana", 5, Mode::Players).await,
            "Congratulations, Ana! You won!"
        );

        let blank = Fixed(Ok("   ".to_owned()));
        assert_eq!(
            winner_praise(&blank, "Ana", 5, Mode::Players).await,
            "Congratulations, Ana! You won!"
        );
    }

    #[tokio::test]
    async fn test_intro_falls_back_on_failure() {
        let failing = Fixed(Err(Error::Unavailable("timeout".to_owned())));
        assert_eq!(
            category_intro(&failing, "Animales").await,
            "The category is Animales. Get ready to draw!"
        );

        let working = Fixed(Ok("Animals time!".to_owned()));
        assert_eq!(category_intro(&working, "Animales").await, "Animals time!");
    }

    #[tokio::test]
    async fn test_reference_images_keep_successes() {
        let generator = Cycling {
            calls: AtomicUsize::new(0),
            answers: vec![
                Ok("data:image/png;base64,AAAA".to_owned()),
                Err(Error::Unavailable("quota".to_owned())),
                Ok("https://example.com/cat.png".to_owned()),
            ],
        };

        let images = reference_images(&generator, "Gato").await;
        assert_eq!(generator.calls.load(Ordering::SeqCst), IMAGE_ATTEMPTS);
        assert_eq!(images, vec!["data:image/png;base64,AAAA".to_owned()]);
    }

    #[tokio::test]
    async fn test_reference_images_total_failure_is_empty() {
        let generator = Cycling {
            calls: AtomicUsize::new(0),
            answers: vec![Err(Error::Unavailable("down".to_owned()))],
        };
        assert!(reference_images(&generator, "Gato").await.is_empty());
    }
}
