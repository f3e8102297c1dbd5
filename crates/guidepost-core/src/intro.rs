#![forbid(unsafe_code)]

//! Intro slides shown before the hands-on tour.
//!
//! Pure data for hosts that open a welcome carousel ahead of step one. The
//! controller carries them in [`TourConfig`](crate::TourConfig) and never
//! reads them.

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
pub struct IntroSlideExample {
    pub label: String,
    pub syntax: String,
    pub result: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
pub struct IntroSlideBenefit {
    pub icon: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
pub struct IntroSlideConversion {
    pub from: String,
    pub to: String,
    pub problem: String,
    pub solution: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
pub struct IntroSlideCallout {
    pub icon: String,
    pub title: String,
    pub text: String,
}

/// One welcome slide. Paragraphs in `content` render in order; the optional
/// sections render below them.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
pub struct IntroSlide {
    pub title: String,
    pub icon: String,
    pub content: Vec<String>,
    #[cfg_attr(
        feature = "config",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub examples: Vec<IntroSlideExample>,
    #[cfg_attr(
        feature = "config",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub benefits: Vec<IntroSlideBenefit>,
    #[cfg_attr(
        feature = "config",
        serde(default, skip_serializing_if = "Vec::is_empty")
    )]
    pub conversions: Vec<IntroSlideConversion>,
    #[cfg_attr(
        feature = "config",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub callout: Option<IntroSlideCallout>,
    #[cfg_attr(
        feature = "config",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub footer: Option<String>,
}

impl IntroSlide {
    #[must_use]
    pub fn new<I, S>(title: impl Into<String>, icon: impl Into<String>, content: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            title: title.into(),
            icon: icon.into(),
            content: content.into_iter().map(Into::into).collect(),
            examples: Vec::new(),
            benefits: Vec::new(),
            conversions: Vec::new(),
            callout: None,
            footer: None,
        }
    }

    #[must_use]
    pub fn with_footer(mut self, footer: impl Into<String>) -> Self {
        self.footer = Some(footer.into());
        self
    }

    #[must_use]
    pub fn with_benefit(mut self, benefit: IntroSlideBenefit) -> Self {
        self.benefits.push(benefit);
        self
    }
}
