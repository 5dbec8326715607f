// License: MIT
// Copyright © 2024 Frequenz Energy-as-a-Service GmbH

//! The abstract visual-node tree produced by a render pass.
//!
//! The tree is plain data: one tagged variant per node type. The host's
//! rendering substrate walks it and materializes the actual DOM/SVG; this
//! library only decides what the tree contains.

use serde::Serialize;

use crate::config::TapAction;

/// Key-point ordering of an animated flow dot along its line.
///
/// `Forward` runs from the line's start to its end (`"0;1"`), `Reverse` the
/// other way (`"1;0"`). Which endpoint is "start" comes from the line's path
/// data, so the slot renderer picks a base direction per row and link type
/// and then flips it for inverted individuals.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum KeyPoints {
    #[serde(rename = "0;1")]
    Forward,
    #[serde(rename = "1;0")]
    Reverse,
}

impl KeyPoints {
    /// The attribute value understood by the host's animation substrate.
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyPoints::Forward => "0;1",
            KeyPoints::Reverse => "1;0",
        }
    }

    /// Returns the opposite ordering.
    pub fn flipped(self) -> Self {
        match self {
            KeyPoints::Forward => KeyPoints::Reverse,
            KeyPoints::Reverse => KeyPoints::Forward,
        }
    }

    /// Returns the opposite ordering when `invert` is set.
    pub fn flipped_if(self, invert: bool) -> Self {
        if invert {
            self.flipped()
        } else {
            self
        }
    }
}

/// The target of a circle's tap/keyboard activation.
///
/// The renderer attaches one of these to every clickable circle; the host
/// forwards interactions through [`dispatch_activation`].
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Activation {
    /// The entity whose details dialog should open.
    pub entity: String,
    /// Host-defined action override, passed through from configuration.
    pub tap_action: Option<TapAction>,
}

/// An interaction event delivered by the host.
#[derive(Clone, Debug, PartialEq)]
pub enum Interaction {
    /// A pointer click or tap.
    Click,
    /// A key press, identified by the host's key name.
    Key(String),
}

/// Invokes `open_details` for interactions that activate the target.
///
/// Pointer clicks and the Enter key both activate; any other key is
/// ignored. The callback receives the originating interaction, the optional
/// tap-action override, and the target entity id.
pub fn dispatch_activation<F>(activation: &Activation, interaction: &Interaction, open_details: F)
where
    F: FnOnce(&Interaction, Option<&TapAction>, &str),
{
    let activates = match interaction {
        Interaction::Click => true,
        Interaction::Key(key) => key == "Enter",
    };
    if activates {
        open_details(
            interaction,
            activation.tap_action.as_ref(),
            &activation.entity,
        );
    }
}

/// One node of the visual tree.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VisNode {
    /// A grouping element.
    Container {
        class: String,
        children: Vec<VisNode>,
    },
    /// A device circle. Activating it opens the target's details dialog.
    Circle {
        class: String,
        color: Option<String>,
        activation: Option<Activation>,
        children: Vec<VisNode>,
    },
    /// An icon glyph.
    Icon { icon: String, class: Option<String> },
    /// A text span.
    Text { class: String, content: String },
    /// A flow line, addressable by id so dots can reference it.
    Line {
        id: String,
        path: String,
        class: String,
    },
    /// An animated dot travelling along the line with the given id.
    Dot {
        path_ref: String,
        class: String,
        duration_secs: f64,
        key_points: KeyPoints,
    },
    /// An empty placeholder keeping the fixed slot geometry.
    Spacer,
}

/// Constructors for [`VisNode`].
impl VisNode {
    pub(crate) fn container(class: impl Into<String>, children: Vec<VisNode>) -> Self {
        Self::Container {
            class: class.into(),
            children,
        }
    }

    pub(crate) fn icon(icon: impl Into<String>) -> Self {
        Self::Icon {
            icon: icon.into(),
            class: None,
        }
    }

    pub(crate) fn small_icon(icon: impl Into<String>) -> Self {
        Self::Icon {
            icon: icon.into(),
            class: Some(String::from("small")),
        }
    }

    pub(crate) fn text(class: impl Into<String>, content: impl Into<String>) -> Self {
        Self::Text {
            class: class.into(),
            content: content.into(),
        }
    }
}
