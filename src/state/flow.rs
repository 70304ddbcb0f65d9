//! Banner creation flow
//!
//! Each user walks through `Idle -> AwaitingTemplateChoice -> AwaitingText
//! -> Rendering -> Idle`. Transitions are driven by [`FlowEvent`]s; an event
//! that does not apply to the current state is rejected without changing it.

use std::fmt;

use crate::engine::TemplateId;
use crate::utils::errors::{BannerBotError, Result};

/// What the caption will be drawn on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    Template(TemplateId),
    Wallpaper,
}

impl fmt::Display for Background {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Background::Template(id) => write!(f, "template {}", id),
            Background::Wallpaper => write!(f, "random wallpaper"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BannerFlow {
    #[default]
    Idle,
    AwaitingTemplateChoice,
    AwaitingText { background: Background },
    Rendering { background: Background },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEvent {
    /// `/new_banner` or the create button
    Start,
    Choose(Background),
    /// The user sent the caption
    SubmitText,
    Rendered,
    /// The caption failed validation; the user may send another one
    InputRejected,
    Cancel,
}

impl BannerFlow {
    pub fn name(&self) -> &'static str {
        match self {
            BannerFlow::Idle => "idle",
            BannerFlow::AwaitingTemplateChoice => "awaiting_template_choice",
            BannerFlow::AwaitingText { .. } => "awaiting_text",
            BannerFlow::Rendering { .. } => "rendering",
        }
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, BannerFlow::Idle)
    }

    /// State reached by applying `event`, or `InvalidStateTransition`
    pub fn apply(&self, event: FlowEvent) -> Result<BannerFlow> {
        use BannerFlow::*;

        let next = match (*self, event) {
            (_, FlowEvent::Cancel) => Idle,
            (Rendering { .. }, FlowEvent::Start) => return Err(self.rejected(event)),
            (_, FlowEvent::Start) => AwaitingTemplateChoice,
            (AwaitingTemplateChoice, FlowEvent::Choose(background)) => AwaitingText { background },
            (AwaitingText { background }, FlowEvent::SubmitText) => Rendering { background },
            (Rendering { .. }, FlowEvent::Rendered) => Idle,
            (Rendering { background }, FlowEvent::InputRejected) => AwaitingText { background },
            _ => return Err(self.rejected(event)),
        };
        Ok(next)
    }

    fn rejected(&self, event: FlowEvent) -> BannerBotError {
        BannerBotError::InvalidStateTransition {
            from: self.name().to_string(),
            to: event.name().to_string(),
        }
    }
}

impl FlowEvent {
    pub fn name(&self) -> &'static str {
        match self {
            FlowEvent::Start => "start",
            FlowEvent::Choose(_) => "choose",
            FlowEvent::SubmitText => "submit_text",
            FlowEvent::Rendered => "rendered",
            FlowEvent::InputRejected => "input_rejected",
            FlowEvent::Cancel => "cancel",
        }
    }
}
