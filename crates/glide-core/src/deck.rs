//! Slide deck model and loading

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeckError {
    #[error("Failed to read deck: {0}")]
    Io(#[from] std::io::Error),
    #[error("Malformed deck: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Deck has no slides")]
    Empty,
}

/// One snippet state of a code slide
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeStep {
    pub value: String,
}

impl CodeStep {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }
}

/// A code slide: an ordered sequence of snippet steps
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeSlide {
    #[serde(default)]
    pub title: Option<String>,
    pub steps: Vec<CodeStep>,
    /// Which transition is displayed; 0 renders step 0 statically
    #[serde(default)]
    pub current_step: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextSlide {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSlide {
    pub url: String,
    #[serde(default)]
    pub caption: Option<String>,
}

/// A slide of any kind; only code slides engage the diff engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Slide {
    Code(CodeSlide),
    Text(TextSlide),
    Image(ImageSlide),
}

impl Slide {
    pub fn as_code(&self) -> Option<&CodeSlide> {
        match self {
            Slide::Code(slide) => Some(slide),
            _ => None,
        }
    }

    pub fn is_code(&self) -> bool {
        matches!(self, Slide::Code(_))
    }
}

/// An ordered set of slides, as authored in the editor
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Deck {
    pub slides: Vec<Slide>,
}

impl Deck {
    pub fn from_json(json: &str) -> Result<Self, DeckError> {
        let deck: Deck = serde_json::from_str(json)?;
        if deck.slides.is_empty() {
            return Err(DeckError::Empty);
        }
        Ok(deck)
    }

    pub fn load(path: &Path) -> Result<Self, DeckError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}
